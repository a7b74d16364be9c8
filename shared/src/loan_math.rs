//! 审核表单的利息补算
//!
//! 平息（flat）口径：总利息 = 本金 × 年化利率% × 期限(天)/365，
//! 应还总额 = 本金 + 总利息。结果四舍五入到分。

/// 四舍五入到两位小数
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 平息口径的总利息，期限按天计
pub fn flat_interest(principal: f64, annual_rate_percent: f64, tenure_days: u32) -> f64 {
    round2(principal * annual_rate_percent / 100.0 * tenure_days as f64 / 365.0)
}

/// 应还总额
pub fn total_payable(principal: f64, total_interest: f64) -> f64 {
    round2(principal + total_interest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_interest_full_year() {
        // 5 万本金，年化 12%，365 天
        assert_eq!(flat_interest(50000.0, 12.0, 365), 6000.0);
        assert_eq!(total_payable(50000.0, 6000.0), 56000.0);
    }

    #[test]
    fn flat_interest_partial_year() {
        // 73 天即五分之一年
        assert_eq!(flat_interest(10000.0, 10.0, 73), 200.0);
    }

    #[test]
    fn rounding_to_paise() {
        // 10000 × 11.5% × 90/365 = 283.5616...
        assert_eq!(flat_interest(10000.0, 11.5, 90), 283.56);
        assert_eq!(total_payable(10000.0, 283.56), 10283.56);
    }

    #[test]
    fn zero_inputs() {
        assert_eq!(flat_interest(0.0, 12.0, 365), 0.0);
        assert_eq!(flat_interest(50000.0, 0.0, 365), 0.0);
        assert_eq!(flat_interest(50000.0, 12.0, 0), 0.0);
    }
}
