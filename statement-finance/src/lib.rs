//! statement-finance: spending breakdown, transaction search, CSV export and printable reports

pub mod breakdown;
pub mod export;
pub mod report;

pub use breakdown::{search_transactions, spending_by_category, total_spending, CategorySpend};
pub use export::{export_csv, export_csv_path};
pub use report::{render_report, ReportConfig};
