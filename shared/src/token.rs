//! JWT 新鲜度判定
//!
//! 只在客户端做轻量校验：不验签名，仅解出 payload 看 `exp`。
//! 规则：
//! - 不是三段式、或 payload 解不出来,一律视为畸形
//! - `exp` 早于当前时间视为过期
//! - 没有 `exp` 声明的令牌视为有效（由服务端负责拒绝）

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;

/// 我们关心的 payload 声明
#[derive(Debug, Clone, Deserialize)]
pub struct Claims {
    /// 过期时刻，Unix 秒
    #[serde(default)]
    pub exp: Option<u64>,
}

/// 令牌新鲜度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    Valid,
    Expired,
    Malformed,
}

/// 解出 payload 段的声明，结构不对返回 `None`
pub fn decode_claims(token: &str) -> Option<Claims> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return None;
    }
    let payload = URL_SAFE_NO_PAD.decode(parts[1]).ok()?;
    serde_json::from_slice(&payload).ok()
}

/// 判定令牌在 `now_secs`（Unix 秒）时刻的新鲜度
pub fn freshness(token: &str, now_secs: u64) -> Freshness {
    match decode_claims(token) {
        None => Freshness::Malformed,
        Some(claims) => match claims.exp {
            Some(exp) if exp < now_secs => Freshness::Expired,
            _ => Freshness::Valid,
        },
    }
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// 用给定 payload 拼一个结构合法的测试令牌
    fn make_token(payload: &str) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.as_bytes());
        format!("{header}.{body}.signature")
    }

    #[test]
    fn future_exp_is_valid() {
        let token = make_token(r#"{"exp":2000000000,"sub":"42"}"#);
        assert_eq!(freshness(&token, 1_700_000_000), Freshness::Valid);
    }

    #[test]
    fn past_exp_is_expired() {
        let token = make_token(r#"{"exp":1000}"#);
        assert_eq!(freshness(&token, 1_700_000_000), Freshness::Expired);
    }

    #[test]
    fn missing_exp_is_valid() {
        // 没有 exp 声明的令牌按有效处理
        let token = make_token(r#"{"sub":"42","role":"admin"}"#);
        assert_eq!(freshness(&token, 1_700_000_000), Freshness::Valid);
    }

    #[test]
    fn wrong_segment_count_is_malformed() {
        assert_eq!(freshness("a.b", 0), Freshness::Malformed);
        assert_eq!(freshness("a.b.c.d", 0), Freshness::Malformed);
        assert_eq!(freshness("", 0), Freshness::Malformed);
    }

    #[test]
    fn garbage_payload_is_malformed() {
        // base64 解不开
        assert_eq!(freshness("aaa.!!!.ccc", 0), Freshness::Malformed);
        // base64 解得开但不是 JSON
        let body = URL_SAFE_NO_PAD.encode(b"not json");
        assert_eq!(
            freshness(&format!("aaa.{body}.ccc"), 0),
            Freshness::Malformed
        );
    }

    #[test]
    fn exp_equal_to_now_is_valid() {
        // 只有严格早于当前时间才算过期
        let token = make_token(r#"{"exp":1700000000}"#);
        assert_eq!(freshness(&token, 1_700_000_000), Freshness::Valid);
    }
}
