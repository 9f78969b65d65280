pub mod collection;
pub mod file;
pub mod handler;
pub mod stdin;
pub mod text;

pub use handler::{SourceHandler, SourceHandlerRegistry};
