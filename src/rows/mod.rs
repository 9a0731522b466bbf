pub mod processor;
pub mod types;

pub use processor::process_rows;
pub use types::{RowReport, RowResult, SheetRow};
