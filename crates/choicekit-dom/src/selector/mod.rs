//! Selector types, parsing and matching for structural queries.

mod matcher;
mod parser;
mod types;

pub use matcher::SelectorMatcher;
pub use parser::parse_selector_list;
pub use types::*;
