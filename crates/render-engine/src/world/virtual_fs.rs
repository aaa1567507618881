//! In-memory sources for a single compilation
//!
//! Holds the generated entry point plus the layout module it imports. Nothing
//! is ever read from disk.

use std::collections::HashMap;

use typst::foundations::Bytes;
use typst::syntax::{FileId, Source, VirtualPath};

use crate::compiler::errors::RenderError;

/// Path of the generated entry point
pub const MAIN_PATH: &str = "/main.typ";

#[derive(Debug)]
pub struct VirtualFilesystem {
    files: HashMap<FileId, Bytes>,
    main_id: FileId,
}

impl VirtualFilesystem {
    /// Create a filesystem whose entry point is `main`
    pub fn new(main: String) -> Self {
        let main_id = file_id(MAIN_PATH);
        let mut files = HashMap::new();
        files.insert(main_id, Bytes::from(main.into_bytes()));
        Self { files, main_id }
    }

    /// Mount a module the entry point can import, e.g. "/layout.typ"
    pub fn mount_file(&mut self, path: &str, content: Bytes) -> Result<FileId, RenderError> {
        validate_path(path)?;
        let id = file_id(&normalize_path(path));
        self.files.insert(id, content);
        Ok(id)
    }

    pub fn main_id(&self) -> FileId {
        self.main_id
    }

    /// Source text of a `.typ` file
    pub fn get_source(&self, id: FileId) -> Option<Source> {
        let bytes = self.files.get(&id)?;
        let text = std::str::from_utf8(bytes).ok()?;
        Some(Source::new(id, text.to_string()))
    }

    pub fn get_file(&self, id: FileId) -> Option<&Bytes> {
        self.files.get(&id)
    }
}

fn file_id(path: &str) -> FileId {
    FileId::new(None, VirtualPath::new(path))
}

fn validate_path(path: &str) -> Result<(), RenderError> {
    if path.contains("..") {
        return Err(RenderError::PathSecurityViolation(format!(
            "Path traversal is not allowed: {}",
            path
        )));
    }
    Ok(())
}

fn normalize_path(path: &str) -> String {
    let mut normalized = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    };
    while normalized.contains("//") {
        normalized = normalized.replace("//", "/");
    }
    normalized
}
