pub mod extractor;

pub use extractor::{DEFAULT_LINK_LIMIT, LINK_PREFIX, extract_links, format_link_reply};
