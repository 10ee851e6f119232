//! Numbers derived from a statement snapshot, plus the display formats used for them.

use crate::error::{Result, StatementError};
use crate::StatementSnapshot;

/// Utilization above this share of the limit is flagged by the advice intents.
pub const UTILIZATION_TARGET: f64 = 30.0;

/// `total_balance / credit_limit * 100`.
///
/// A zero or non-finite limit is reported as an error instead of leaking
/// `inf`/`NaN` into user-facing text.
pub fn utilization(data: &StatementSnapshot) -> Result<f64> {
    if !data.total_balance.is_finite() {
        return Err(StatementError::NonFiniteAmount("total balance"));
    }
    if !data.credit_limit.is_finite() {
        return Err(StatementError::NonFiniteAmount("credit limit"));
    }
    if data.credit_limit == 0.0 {
        return Err(StatementError::ZeroCreditLimit);
    }
    Ok(data.total_balance / data.credit_limit * 100.0)
}

/// Spending attributed to the current period:
/// `total_balance - last_statement_balance + payments_credits`.
pub fn current_spending(data: &StatementSnapshot) -> f64 {
    data.total_balance - data.last_statement_balance + data.payments_credits
}

/// True when payments and credits covered the previous statement balance in full.
pub fn paid_last_statement(data: &StatementSnapshot) -> bool {
    data.payments_credits >= data.last_statement_balance
}

/// Two-decimal currency without the symbol, e.g. `2156.34`.
pub fn money(amount: f64) -> String {
    format!("{:.2}", amount)
}

/// Whole-number percentage without the `%`, rounding halves away from zero.
pub fn percent(value: f64) -> String {
    format!("{:.0}", value.round())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Transaction;

    fn snapshot(total_balance: f64, credit_limit: f64) -> StatementSnapshot {
        StatementSnapshot {
            card_provider: "Bank".to_string(),
            card_variant: None,
            last_four_digits: "1111".to_string(),
            billing_cycle: "cycle".to_string(),
            payment_due_date: "Dec 20, 2025".to_string(),
            total_balance,
            minimum_payment: 0.0,
            credit_limit,
            available_credit: credit_limit - total_balance,
            last_statement_balance: 1542.78,
            payments_credits: 1600.0,
            rewards: None,
            transactions: Vec::<Transaction>::new(),
        }
    }

    #[test]
    fn test_utilization() {
        let u = utilization(&snapshot(2156.34, 10000.0)).unwrap();
        assert!((u - 21.5634).abs() < 1e-9);
        assert_eq!(percent(u), "22");
    }

    #[test]
    fn test_zero_limit_is_an_error() {
        assert_eq!(
            utilization(&snapshot(100.0, 0.0)),
            Err(StatementError::ZeroCreditLimit)
        );
    }

    #[test]
    fn test_non_finite_inputs_are_errors() {
        assert!(utilization(&snapshot(f64::NAN, 100.0)).is_err());
        assert!(utilization(&snapshot(10.0, f64::INFINITY)).is_err());
    }

    #[test]
    fn test_percent_rounds_half_up() {
        assert_eq!(percent(2.5), "3");
        assert_eq!(percent(29.49), "29");
        assert_eq!(percent(45.0), "45");
    }

    #[test]
    fn test_money_two_decimals() {
        assert_eq!(money(75.0), "75.00");
        assert_eq!(money(93.8), "93.80");
    }

    #[test]
    fn test_current_spending_and_last_payment() {
        let s = snapshot(2156.34, 10000.0);
        assert!((current_spending(&s) - 2213.56).abs() < 1e-9);
        assert!(paid_last_statement(&s));
    }
}
