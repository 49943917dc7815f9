//! Publication-date extraction: substring isolation (C3), parsing/validation (C4),
//! and the tiered finder (C6).

pub mod extractor;
pub mod finder;
pub mod parser;

pub use extractor::extract_best_date_string;
pub use finder::get_publishing_date;
pub use parser::parse_and_validate;
