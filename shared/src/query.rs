//! 列表查询状态
//!
//! 分页与服务端过滤收拢在一个 `ListQuery` 里，页面层只持有一个
//! signal。换页、换过滤器都通过这里的方法走，保证
//! "过滤器变化必回第一页" 的约定只写一次。

use crate::DEFAULT_PAGE_SIZE;
use crate::models::{KycStatus, LoanStatus};

/// 能转成查询参数的服务端过滤器
pub trait FilterParams {
    fn params(&self) -> Vec<(&'static str, String)>;
}

/// 用户列表的服务端过滤范围
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserScope {
    /// 全量（未拉黑）用户
    All,
    /// 已拉黑用户
    Blocked,
    /// 按 KYC 状态过滤
    Kyc(KycStatus),
}

impl FilterParams for UserScope {
    fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            UserScope::All => vec![],
            UserScope::Blocked => vec![("isblocked", "true".to_string())],
            UserScope::Kyc(status) => vec![("kycStatus", status.as_str().to_string())],
        }
    }
}

/// 贷款列表的服务端过滤范围，`None` 表示全部状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoanScope(pub Option<LoanStatus>);

impl FilterParams for LoanScope {
    fn params(&self) -> Vec<(&'static str, String)> {
        match self.0 {
            None => vec![],
            Some(status) => vec![("status", status.as_str().to_string())],
        }
    }
}

/// 一个列表页的完整查询状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListQuery<F> {
    /// 从 1 开始
    pub page: u32,
    pub limit: u32,
    pub filter: F,
}

impl<F> ListQuery<F> {
    pub fn new(filter: F) -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            filter,
        }
    }

    pub fn next_page(&mut self) {
        self.page += 1;
    }

    /// 向前翻页，已在第一页时保持不动
    pub fn prev_page(&mut self) {
        if self.page > 1 {
            self.page -= 1;
        }
    }

    /// 换过滤器并回到第一页
    pub fn set_filter(&mut self, filter: F) {
        self.filter = filter;
        self.page = 1;
    }

    /// 后端不保证返回总数，按 "本页装满即可能有下一页" 推断
    pub fn has_next(&self, rows_on_page: usize) -> bool {
        rows_on_page as u32 >= self.limit
    }
}

impl<F: FilterParams> ListQuery<F> {
    /// 拼出查询串（不带前导 `?`）
    pub fn query_string(&self) -> String {
        let mut pairs = self.filter.params();
        let page = self.page.to_string();
        let limit = self.limit.to_string();
        pairs.push(("page", page));
        pairs.push(("limit", limit));
        pairs
            .into_iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    }
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_query_starts_at_first_page() {
        let q = ListQuery::new(UserScope::All);
        assert_eq!(q.page, 1);
        assert_eq!(q.limit, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn filter_change_resets_page() {
        let mut q = ListQuery::new(UserScope::Kyc(KycStatus::Pending));
        q.next_page();
        q.next_page();
        assert_eq!(q.page, 3);

        q.set_filter(UserScope::Kyc(KycStatus::Submitted));
        assert_eq!(q.page, 1);
        assert_eq!(q.filter, UserScope::Kyc(KycStatus::Submitted));
    }

    #[test]
    fn prev_page_saturates_at_one() {
        let mut q = ListQuery::new(UserScope::All);
        q.prev_page();
        assert_eq!(q.page, 1);
        q.next_page();
        q.prev_page();
        assert_eq!(q.page, 1);
    }

    #[test]
    fn next_page_heuristic_uses_row_count() {
        let q = ListQuery::new(UserScope::All);
        assert!(q.has_next(10));
        assert!(!q.has_next(9));
        assert!(!q.has_next(0));
    }

    #[test]
    fn query_string_contains_filter_and_paging() {
        let mut q = ListQuery::new(UserScope::Blocked);
        q.next_page();
        assert_eq!(q.query_string(), "isblocked=true&page=2&limit=10");

        let q = ListQuery::new(UserScope::Kyc(KycStatus::Submitted));
        assert_eq!(q.query_string(), "kycStatus=submitted&page=1&limit=10");

        let q = ListQuery::new(UserScope::All);
        assert_eq!(q.query_string(), "page=1&limit=10");
    }

    #[test]
    fn loan_scope_params() {
        assert!(LoanScope(None).params().is_empty());
        assert_eq!(
            LoanScope(Some(LoanStatus::Active)).params(),
            vec![("status", "active".to_string())]
        );
    }
}
