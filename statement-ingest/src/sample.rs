//! The statement every simulated upload resolves to.

use statement_core::{RewardsSummary, StatementSnapshot, Transaction};

pub fn sample_statement() -> StatementSnapshot {
    StatementSnapshot {
        card_provider: "Major Bank Inc.".to_string(),
        card_variant: Some("Platinum Rewards".to_string()),
        last_four_digits: "1234".to_string(),
        billing_cycle: "Oct 26, 2025 - Nov 25, 2025".to_string(),
        payment_due_date: "Dec 20, 2025".to_string(),
        total_balance: 2156.34,
        minimum_payment: 75.00,
        credit_limit: 10000.00,
        available_credit: 7843.66,
        last_statement_balance: 1542.78,
        payments_credits: 1600.00,
        rewards: Some(RewardsSummary {
            previous_balance: 8520,
            earned: 2156,
            redeemed: 0,
            total_points: 10676,
        }),
        transactions: vec![
            Transaction::new("10-28", "Coffee Shop Downtown", -8.55, Some("Food & Drink")),
            Transaction::new("10-29", "Online Subscription Service", -15.00, Some("Bills & Utilities")),
            Transaction::new("11-02", "Grocery Store", -124.30, Some("Groceries")),
            Transaction::new("11-05", "Gas Station", -55.60, Some("Transportation")),
            Transaction::new("11-10", "Restaurant Dinner", -85.25, Some("Food & Drink")),
            Transaction::new("11-12", "PAYMENT RECEIVED - THANK YOU", 1600.00, Some("Payment")),
            Transaction::new("11-15", "Bookstore Purchase", -45.76, Some("Shopping")),
            Transaction::new("11-18", "Movie Tickets", -32.00, Some("Entertainment")),
            Transaction::new("11-22", "Utility Bill Payment", -120.10, Some("Bills & Utilities")),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_shape() {
        let s = sample_statement();
        assert_eq!(s.transactions.len(), 9);
        assert_eq!(s.expenses().count(), 8);
        assert_eq!(s.masked_card_number(), "**** **** **** 1234");
        assert_eq!(s.rewards.unwrap().total_points, 10676);
    }

    #[test]
    fn test_sample_available_credit_is_consistent() {
        let s = sample_statement();
        assert!((s.credit_limit - s.total_balance - s.available_credit).abs() < 1e-9);
    }
}
