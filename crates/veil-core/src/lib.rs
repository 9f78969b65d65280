//! Core domain models and logic for veil
//!
//! This crate contains:
//! - Domain models (Category, Entity, Document, ReplacementMapping)
//! - The `Extractor` seam shared by every detection backend
//! - Render engine (substitution and replacement log)

pub mod category;
pub mod document;
pub mod entity;
pub mod error;
pub mod extract;
pub mod mapping;
pub mod render;

pub use category::Category;
pub use document::Document;
pub use entity::{Entity, EntityKey, normalize, resolve_overlaps};
pub use error::{Error, Result};
pub use extract::Extractor;
pub use mapping::{MappingEntry, ReplacementMapping};
pub use render::{LogStyle, RenderEngine, Replacement, Transformation};
