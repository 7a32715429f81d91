pub mod extract;
pub mod fetch;

pub use extract::{extract_text, ExtractError};
pub use fetch::{fetch, RawDocument};
