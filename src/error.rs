//! Error types for orchard

use std::path::PathBuf;

use thiserror::Error;

use crate::graph::NodeId;

/// Result type alias for orchard operations
pub type Result<T> = std::result::Result<T, OrchardError>;

/// Errors that can occur while extracting imports or navigating a graph.
///
/// Malformed import declarations are not errors: the parser is best-effort
/// and simply emits nothing for them.
#[derive(Debug, Error)]
pub enum OrchardError {
    #[error("unsupported language for import extraction: {0}")]
    UnsupportedLanguage(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("no node with id '{0}'")]
    NodeNotFound(NodeId),

    /// A node lists a child that is not in the node set.
    #[error("node '{parent}' references missing child '{child}'")]
    DanglingReference { parent: NodeId, child: NodeId },

    #[error("cannot access '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("error writing output: {0}")]
    Output(#[from] std::io::Error),
}

impl OrchardError {
    /// Whether this error stems from user configuration rather than data.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            OrchardError::UnsupportedLanguage(_) | OrchardError::InvalidConfig(_)
        )
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        OrchardError::Io {
            path: path.into(),
            source,
        }
    }
}
