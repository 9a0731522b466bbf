pub mod dispatch;
pub mod runtime;

pub use dispatch::{ProcessSummary, dispatch, process_file};
pub use runtime::serve;
