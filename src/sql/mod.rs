//! SQL Module - Script extraction, execution outcomes, store adapter

pub mod outcome;
pub mod script;
pub mod store;

pub use outcome::{BatchEntry, BatchOutcome, SqlOutcome};
pub use script::{extract_first_script, extract_scripts};
pub use store::StoreClient;
