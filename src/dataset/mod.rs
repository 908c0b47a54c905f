//! Dataset Module - CSV ingestion, type inference, context summaries

pub mod context;
pub mod frame;

pub use context::{build_contexts, ContextEntry, DatasetContext};
pub use frame::{Column, ColumnType, Dataset};
