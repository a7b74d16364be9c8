//! 展示层格式化
//!
//! 金额按 en-IN 习惯分组（最后三位一组，其余两位一组），日期
//! 统一转成 `12 Jan 2026` 一类的短格式。解析失败时原样回显，
//! 不让格式化错误打断页面渲染。

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// 印度位制的整数分组：1234567 -> "12,34,567"
fn group_indian(digits: &str) -> String {
    let len = digits.len();
    if len <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(len - 3);
    let mut groups: Vec<String> = Vec::new();
    let head_bytes = head.as_bytes();
    let mut i = head_bytes.len();
    while i > 0 {
        let start = i.saturating_sub(2);
        groups.push(head[start..i].to_string());
        i = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

/// INR 金额，例如 `₹1,23,456.50`
pub fn inr(amount: f64) -> String {
    let negative = amount < 0.0;
    let paise = (amount.abs() * 100.0).round() as u64;
    let rupees = paise / 100;
    let fraction = paise % 100;
    let grouped = group_indian(&rupees.to_string());
    let sign = if negative { "-" } else { "" };
    format!("{sign}₹{grouped}.{fraction:02}")
}

/// ISO 时间串转 `12 Jan 2026`，解析不了时原样返回
pub fn short_date(value: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return dt.format("%-d %b %Y").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format("%-d %b %Y").to_string();
    }
    if let Ok(d) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return d.format("%-d %b %Y").to_string();
    }
    value.to_string()
}

/// ISO 时间串转 `12 Jan 2026, 15:04`，解析不了时原样返回
pub fn short_date_time(value: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return dt.format("%-d %b %Y, %H:%M").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format("%-d %b %Y, %H:%M").to_string();
    }
    value.to_string()
}

/// 银行账号脱敏，只留末四位
pub fn mask_account(account: &str) -> String {
    let trimmed = account.trim();
    if trimmed.is_empty() {
        return "-".to_string();
    }
    if trimmed.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = trimmed
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("****{tail}")
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indian_grouping() {
        assert_eq!(inr(0.0), "₹0.00");
        assert_eq!(inr(999.0), "₹999.00");
        assert_eq!(inr(1000.0), "₹1,000.00");
        assert_eq!(inr(123456.5), "₹1,23,456.50");
        assert_eq!(inr(12345678.0), "₹1,23,45,678.00");
    }

    #[test]
    fn negative_amounts_keep_sign() {
        assert_eq!(inr(-56250.75), "-₹56,250.75");
    }

    #[test]
    fn rfc3339_dates() {
        assert_eq!(short_date("2026-01-12T09:30:00Z"), "12 Jan 2026");
        assert_eq!(short_date("2026-01-12T09:30:00.123Z"), "12 Jan 2026");
        assert_eq!(short_date("2026-01-12"), "12 Jan 2026");
    }

    #[test]
    fn unparseable_dates_pass_through() {
        assert_eq!(short_date("yesterday"), "yesterday");
        assert_eq!(short_date_time(""), "");
    }

    #[test]
    fn date_time_includes_clock() {
        assert_eq!(
            short_date_time("2026-01-12T09:30:00Z"),
            "12 Jan 2026, 09:30"
        );
    }

    #[test]
    fn account_masking() {
        assert_eq!(mask_account("000111222333"), "****2333");
        assert_eq!(mask_account("1234"), "****");
        assert_eq!(mask_account(""), "-");
        assert_eq!(mask_account("  98765  "), "****8765");
    }
}
