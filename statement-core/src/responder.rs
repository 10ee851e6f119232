//! Rule-based financial query responder.
//!
//! A query is lowercased and checked against an ordered rule table. The first
//! rule whose trigger phrase occurs as a substring answers; a rule may decline
//! (the category summary does when no category name can be pulled out of the
//! query), in which case the walk continues and ends at the fallback.

use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::metrics::{self, UTILIZATION_TARGET, money, percent};
use crate::{StatementSnapshot, Transaction};

pub const GREETING: &str =
    "Hi! I'm your AI Financial Assistant. Ask me for advice or details about your statement.";

pub const FALLBACK: &str = "I'm not quite sure how to answer that. Try asking things like 'How can I improve my profile?', 'What is my credit utilization?', or 'Suggest ways to save money'.";

static CATEGORY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:on|for)\s+([\w\s&]+)$").expect("category pattern"));

/// What the user is asking about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Greeting,
    Balance,
    DueDate,
    ProfileAdvice,
    Utilization,
    LastBill,
    Savings,
    SpendingTrend,
    CategorySummary,
    Fallback,
}

impl Intent {
    pub fn label(&self) -> &'static str {
        match self {
            Intent::Greeting => "greeting",
            Intent::Balance => "balance",
            Intent::DueDate => "due-date",
            Intent::ProfileAdvice => "profile-advice",
            Intent::Utilization => "utilization",
            Intent::LastBill => "last-bill",
            Intent::Savings => "savings",
            Intent::SpendingTrend => "spending-trend",
            Intent::CategorySummary => "category-summary",
            Intent::Fallback => "fallback",
        }
    }
}

type Answer = fn(&str, &StatementSnapshot) -> Option<String>;

struct Rule {
    intent: Intent,
    triggers: &'static [&'static str],
    answer: Answer,
}

impl Rule {
    fn matches(&self, query: &str) -> bool {
        self.triggers.iter().any(|t| query.contains(t))
    }
}

/// Priority order: earlier rules win even if a later trigger also appears.
const RULES: &[Rule] = &[
    Rule {
        intent: Intent::Greeting,
        triggers: &["hello", "hi"],
        answer: greeting,
    },
    Rule {
        intent: Intent::Balance,
        triggers: &["total balance", "how much do i owe"],
        answer: balance,
    },
    Rule {
        intent: Intent::DueDate,
        triggers: &["due date"],
        answer: due_date,
    },
    Rule {
        intent: Intent::ProfileAdvice,
        triggers: &["improve my profile", "improve my credit"],
        answer: profile_advice,
    },
    Rule {
        intent: Intent::Utilization,
        triggers: &["credit utilization"],
        answer: utilization,
    },
    Rule {
        intent: Intent::LastBill,
        triggers: &["did i pay my last bill", "last statement balance"],
        answer: last_bill,
    },
    Rule {
        intent: Intent::Savings,
        triggers: &["how can i save", "save money"],
        answer: savings,
    },
    Rule {
        intent: Intent::SpendingTrend,
        triggers: &["spending trend", "spending more or less"],
        answer: spending_trend,
    },
    Rule {
        intent: Intent::CategorySummary,
        triggers: &["spending on", "spend on", "summary for"],
        answer: category_summary,
    },
];

/// Classify by trigger phrase only.
///
/// This is the intent whose rule fires first; `respond` may still end at the
/// fallback if that rule declines (a category phrase with nothing after it).
pub fn classify(query: &str) -> Intent {
    let q = query.to_lowercase();
    RULES
        .iter()
        .find(|r| r.matches(&q))
        .map(|r| r.intent)
        .unwrap_or(Intent::Fallback)
}

/// Answer a free-text question about a statement. Never returns an empty string.
pub fn respond(query: &str, data: &StatementSnapshot) -> String {
    let q = query.to_lowercase();
    for rule in RULES.iter().filter(|r| r.matches(&q)) {
        if let Some(reply) = (rule.answer)(&q, data) {
            debug!(intent = rule.intent.label(), "answered query");
            return reply;
        }
        debug!(intent = rule.intent.label(), "rule declined, continuing");
    }
    debug!(intent = Intent::Fallback.label(), "no rule answered");
    FALLBACK.to_string()
}

fn greeting(_q: &str, _data: &StatementSnapshot) -> Option<String> {
    Some(GREETING.to_string())
}

fn balance(_q: &str, data: &StatementSnapshot) -> Option<String> {
    Some(format!("Your total balance is ${}.", money(data.total_balance)))
}

fn due_date(_q: &str, data: &StatementSnapshot) -> Option<String> {
    Some(format!("Your payment is due on {}.", data.payment_due_date))
}

fn utilization_unavailable(e: &crate::StatementError) -> String {
    format!("I'm unable to compute your credit utilization because {e}.")
}

fn profile_advice(_q: &str, data: &StatementSnapshot) -> Option<String> {
    let mut lines = vec![
        "Of course. Here are some general tips to improve your financial profile based on this statement:".to_string(),
        String::new(),
        format!(
            "- Pay On Time: Always pay at least the minimum amount by the due date ({}) to avoid late fees and negative marks on your credit report.",
            data.payment_due_date
        ),
    ];

    match metrics::utilization(data) {
        Ok(u) if u > UTILIZATION_TARGET => lines.push(format!(
            "- Lower Credit Utilization: Your credit utilization is currently around {}%. Lenders prefer to see this below 30%. Paying down your balance can significantly improve your credit score.",
            percent(u)
        )),
        Ok(u) => lines.push(format!(
            "- Maintain Low Credit Utilization: Your credit utilization is excellent at around {}%. Keeping it below 30% is great for your credit score.",
            percent(u)
        )),
        Err(e) => {
            warn!(error = %e, "utilization unavailable for profile advice");
            lines.push(format!("- Credit Utilization: {}", utilization_unavailable(&e)));
        }
    }

    lines.push(
        "- Review Your Spending: Regularly check your transactions for accuracy and to understand your spending habits. This can help you find areas to save.".to_string(),
    );

    Some(lines.join("\n"))
}

fn utilization(_q: &str, data: &StatementSnapshot) -> Option<String> {
    let u = match metrics::utilization(data) {
        Ok(u) => u,
        Err(e) => {
            warn!(error = %e, "utilization unavailable");
            return Some(utilization_unavailable(&e));
        }
    };

    let comment = if u < 10.0 {
        "This is excellent! A very low utilization rate is viewed positively by lenders."
    } else if u < UTILIZATION_TARGET {
        "This is great. Keeping your utilization below 30% is a key factor for a healthy credit score."
    } else {
        "This is a bit high. Lenders generally prefer to see utilization below 30%. Focusing on paying down your balance would be beneficial for your credit score."
    };

    Some(format!(
        "Your credit utilization is {}%. This is calculated by dividing your total balance (${}) by your credit limit (${}).\n\n{}",
        percent(u),
        money(data.total_balance),
        money(data.credit_limit),
        comment
    ))
}

fn last_bill(_q: &str, data: &StatementSnapshot) -> Option<String> {
    let paid = money(data.payments_credits);
    let last = money(data.last_statement_balance);
    if metrics::paid_last_statement(data) {
        Some(format!(
            "Yes, it looks like you did. Your payments and credits of ${paid} covered your last statement balance of ${last}. Great job!"
        ))
    } else {
        Some(format!(
            "It appears you paid ${paid}, which was less than your last statement balance of ${last}. The remaining amount was carried over to this statement."
        ))
    }
}

fn savings(_q: &str, data: &StatementSnapshot) -> Option<String> {
    let mut top: Vec<&Transaction> = data.expenses().collect();
    // Most negative first; sort_by is stable so equal amounts keep statement order
    top.sort_by(|a, b| a.amount.partial_cmp(&b.amount).unwrap_or(Ordering::Equal));
    top.truncate(2);

    if top.is_empty() {
        return Some(
            "I couldn't find any expenses on this statement yet, so there's nothing to suggest cutting back on. Check again once some purchases show up."
                .to_string(),
        );
    }

    let heading = if top.len() == 1 {
        "This month, your biggest expense was:"
    } else {
        "This month, your biggest expenses were:"
    };
    let items: Vec<String> = top
        .iter()
        .enumerate()
        .map(|(i, t)| format!("{}. \"{}\" (${})", i + 1, t.description, money(t.abs_amount())))
        .collect();

    Some(format!(
        "A good way to start saving is by looking at your top spending areas. {heading}\n\n{}\n\nCould you reduce spending in these categories?",
        items.join("\n")
    ))
}

fn spending_trend(_q: &str, data: &StatementSnapshot) -> Option<String> {
    if metrics::current_spending(data) > data.last_statement_balance {
        Some("Your spending this period seems to be higher than the last. Reviewing your transaction list might help identify where the increase is coming from.".to_string())
    } else {
        Some("It looks like your spending was lower this period compared to your previous statement balance. Keep up the great work!".to_string())
    }
}

/// Category name following the first usable "on"/"for" through end of query.
pub fn extract_category(query: &str) -> Option<String> {
    let caps = CATEGORY_RE.captures(query)?;
    let name = caps.get(1)?.as_str().trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

fn category_summary(q: &str, data: &StatementSnapshot) -> Option<String> {
    let category = extract_category(q)?;

    // Uncategorized transactions never match here, unlike the spending breakdown
    let matches: Vec<&Transaction> = data
        .transactions
        .iter()
        .filter(|t| {
            t.category
                .as_deref()
                .is_some_and(|c| c.to_lowercase().contains(category.as_str()))
        })
        .collect();

    if matches.is_empty() {
        return Some(format!(
            "I couldn't find any spending for the category \"{category}\" in this statement."
        ));
    }

    let total: f64 = matches.iter().map(|t| t.abs_amount()).sum();
    let (_, largest) = matches.iter().fold((0.0_f64, "N/A"), |(best, desc), t| {
        if t.abs_amount() > best {
            (t.abs_amount(), t.description.as_str())
        } else {
            (best, desc)
        }
    });

    Some(format!(
        "You had {} transactions in the \"{}\" category, totalling ${}. Your largest purchase was for \"{}\".",
        matches.len(),
        category,
        money(total),
        largest
    ))
}
