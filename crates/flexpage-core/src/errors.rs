//! Error types for flexpage.

use std::fmt;

use thiserror::Error;

/// Top-level error type.
#[derive(Debug, Error)]
pub enum FlexpageError {
    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Failures reported by a [`Renderer`](crate::Renderer).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RenderError {
    #[error("Font not found: {family}")]
    FontNotFound { family: String },

    #[error("No font selected")]
    NoFontSelected,

    #[error("Invalid font data for {family}: {reason}")]
    InvalidFont { family: String, reason: String },
}

/// Kind of layout node, used to annotate errors and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Box,
    Text,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Box => f.write_str("box"),
            NodeKind::Text => f.write_str("text"),
        }
    }
}

/// Errors during layout and drawing.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LayoutError {
    /// The renderer failed underneath the named node and operation. Produced
    /// once at the deepest failing call and propagated unchanged.
    #[error("{node} {operation}: {source}")]
    Renderer {
        node: NodeKind,
        operation: &'static str,
        #[source]
        source: RenderError,
    },
}

impl LayoutError {
    /// Annotate a renderer failure with the node kind and operation.
    pub fn renderer(node: NodeKind, operation: &'static str, source: RenderError) -> Self {
        LayoutError::Renderer {
            node,
            operation,
            source,
        }
    }
}

/// Errors while producing output documents.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Document has no pages")]
    NoPages,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_error_message() {
        let err = LayoutError::renderer(
            NodeKind::Text,
            "set_font",
            RenderError::FontNotFound {
                family: "ipaexg".into(),
            },
        );
        assert_eq!(err.to_string(), "text set_font: Font not found: ipaexg");
    }

    #[test]
    fn test_top_level_is_transparent() {
        let err: FlexpageError = RenderError::NoFontSelected.into();
        assert_eq!(err.to_string(), "No font selected");
    }
}
