//! statement-ingest: the sample statement, simulated PDF upload and JSON snapshots.

pub mod sample;
pub mod upload;

pub use sample::sample_statement;
pub use upload::{load_snapshot, open_statement, save_snapshot, simulate_upload, UploadedStatement};
