//! Printable plain-text report with selectable sections.

use serde::{Deserialize, Serialize};
use statement_core::{money, StatementSnapshot, Transaction};
use std::fmt::Write;

use crate::breakdown::{spending_by_category, total_spending};

/// Which sections end up in the printed report
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportConfig {
    pub summary: bool,
    pub analysis: bool,
    pub transactions: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            summary: true,
            analysis: true,
            transactions: true,
        }
    }
}

impl ReportConfig {
    pub fn is_empty(&self) -> bool {
        !(self.summary || self.analysis || self.transactions)
    }
}

/// `-$8.55` for debits, `$1600.00` for credits
pub fn signed_amount(t: &Transaction) -> String {
    let sign = if t.amount < 0.0 { "-" } else { "" };
    format!("{sign}${}", money(t.abs_amount()))
}

pub fn render_report(data: &StatementSnapshot, config: ReportConfig) -> String {
    let mut sections = Vec::new();
    if config.summary {
        sections.push(account_summary(data));
    }
    if config.analysis {
        sections.push(spending_analysis(data));
    }
    if config.transactions {
        sections.push(transaction_history(data.transactions.iter()));
    }
    sections.join("\n")
}

pub fn account_summary(data: &StatementSnapshot) -> String {
    let mut s = String::from("Account Summary\n===============\n");
    let provider = match &data.card_variant {
        Some(v) => format!("{} ({})", data.card_provider, v),
        None => data.card_provider.clone(),
    };
    let rows = [
        ("Provider", provider),
        ("Card Number", data.masked_card_number()),
        ("Billing Cycle", data.billing_cycle.clone()),
        ("Due Date", data.payment_due_date.clone()),
        ("Credit Limit", format!("${}", money(data.credit_limit))),
        ("Available Credit", format!("${}", money(data.available_credit))),
        ("Total Balance", format!("${}", money(data.total_balance))),
        ("Minimum Payment", format!("${}", money(data.minimum_payment))),
    ];
    for (label, value) in rows {
        let _ = writeln!(s, "{:<18}{}", label, value);
    }
    if let Some(r) = data.rewards {
        let _ = writeln!(
            s,
            "{:<18}{} pts (+{} earned, -{} redeemed)",
            "Rewards", r.total_points, r.earned, r.redeemed
        );
    }
    s
}

pub fn spending_analysis(data: &StatementSnapshot) -> String {
    let mut s = String::from("Spending Analysis\n=================\n");
    let breakdown = spending_by_category(&data.transactions);
    if breakdown.is_empty() {
        s.push_str("No spending this period.\n");
        return s;
    }
    let total = total_spending(&data.transactions);
    for c in &breakdown {
        let share = c.total / total * 100.0;
        let _ = writeln!(
            s,
            "{:<20}{:>10}  {:>3}%",
            c.category,
            format!("${}", money(c.total)),
            statement_core::percent(share)
        );
    }
    let _ = writeln!(s, "{:<20}{:>10}", "Total", format!("${}", money(total)));
    s
}

pub fn transaction_history<'a>(txns: impl Iterator<Item = &'a Transaction>) -> String {
    let mut s = String::from("Transaction History\n===================\n");
    let _ = writeln!(s, "{:<8}{:<36}{:>12}", "Date", "Description", "Amount");
    for t in txns {
        let _ = writeln!(s, "{:<8}{:<36}{:>12}", t.date, t.description, signed_amount(t));
    }
    s
}
