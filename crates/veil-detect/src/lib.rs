//! Detection and substitution for veil
//!
//! - `RegexExtractor`: pattern and dictionary based detection
//! - `HybridExtractor`: merges several extractors, tolerating failures
//! - `Replacer`: deterministic, consistent substitute generation

pub mod extractor;
pub mod formulary;
pub mod hybrid;
pub mod name;
pub mod patterns;
pub mod pools;
pub mod replacer;

pub use extractor::{RegexExtractor, literal_pattern};
pub use hybrid::HybridExtractor;
pub use replacer::Replacer;
