//! Output format handling (PDF, SVG, HTML, Word, plain text)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RenderFormat {
    #[default]
    Pdf,
    /// First page as SVG, for previews
    Svg,
    Html,
    /// Word (.docx)
    Docx,
    Text,
}

impl RenderFormat {
    pub const ALL: [RenderFormat; 5] = [
        RenderFormat::Pdf,
        RenderFormat::Svg,
        RenderFormat::Html,
        RenderFormat::Docx,
        RenderFormat::Text,
    ];

    pub fn mime_type(&self) -> &'static str {
        match self {
            RenderFormat::Pdf => "application/pdf",
            RenderFormat::Svg => "image/svg+xml",
            RenderFormat::Html => "text/html; charset=utf-8",
            RenderFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            RenderFormat::Text => "text/plain; charset=utf-8",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            RenderFormat::Pdf => "pdf",
            RenderFormat::Svg => "svg",
            RenderFormat::Html => "html",
            RenderFormat::Docx => "docx",
            RenderFormat::Text => "txt",
        }
    }

    /// Formats produced by compiling the Typst layout
    pub fn is_typeset(&self) -> bool {
        matches!(self, RenderFormat::Pdf | RenderFormat::Svg)
    }
}

impl std::fmt::Display for RenderFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderFormat::Pdf => write!(f, "pdf"),
            RenderFormat::Svg => write!(f, "svg"),
            RenderFormat::Html => write!(f, "html"),
            RenderFormat::Docx => write!(f, "docx"),
            RenderFormat::Text => write!(f, "text"),
        }
    }
}

impl std::str::FromStr for RenderFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(RenderFormat::Pdf),
            "svg" => Ok(RenderFormat::Svg),
            "html" | "htm" => Ok(RenderFormat::Html),
            "docx" | "word" => Ok(RenderFormat::Docx),
            "text" | "txt" => Ok(RenderFormat::Text),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}
