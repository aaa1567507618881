//! Declaration rendering engine
//!
//! Turns an assembled [`DocumentTree`](assembly_engine::DocumentTree) into a
//! concrete surface:
//! - PDF and SVG page preview, typeset by Typst in an in-memory world
//! - self-contained HTML with print CSS
//! - Word (.docx)
//! - paginated plain text
//!
//! # Feature Flags
//!
//! - `server` (default): async `render_document` / `compile_tree` with timeout (requires tokio)
//! - `wasm`: For browser/WASM environments (use `Renderer::render`)

pub mod compiler;
pub mod renderer;
pub mod world;

pub use compiler::{CompileError, RenderError, RenderFormat};
pub use renderer::{
    renderer_for, suggested_filename, DocxRenderer, HtmlRenderer, RenderArtifact,
    RenderedDocument, Renderer, TextRenderer, TypstRenderer,
};

#[cfg(feature = "server")]
pub use renderer::render_document;
