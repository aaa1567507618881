//! Typst World trait implementation for in-memory compilation

pub mod fonts;
pub mod virtual_fs;
pub mod virtual_world;

pub use fonts::{global_font_cache, FontCache, BODY_FONT};
pub use virtual_fs::VirtualFilesystem;
pub use virtual_world::VirtualWorld;
