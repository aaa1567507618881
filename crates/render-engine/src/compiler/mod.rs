//! Typst compilation of document trees, with timeout and error handling

pub mod errors;
pub mod output;
pub mod render;

pub use errors::{CompileError, ErrorSeverity, RenderError};
pub use output::RenderFormat;
pub use render::{compile_tree_sync, validate_layout, CompiledDocument, LAYOUT_SOURCE};

#[cfg(feature = "server")]
pub use render::compile_tree;
