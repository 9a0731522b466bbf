pub mod parser;

pub use parser::{Command, is_command, parse_command};
