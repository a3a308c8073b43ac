use thiserror::Error;

/// Errors from the file and format surfaces (import, JSON interchange).
/// The decoder itself is total and never produces one.
#[derive(Debug, Error)]
pub enum KunkunError {
    #[error("I/O error while {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("MXL archive error while {context}: {source}")]
    Archive {
        context: String,
        #[source]
        source: zip::result::ZipError,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported document: {0}")]
    UnsupportedDocument(String),
    #[error("part {index} not found ({available} parts in score)")]
    MissingPart { index: usize, available: usize },
}

pub type Result<T> = std::result::Result<T, KunkunError>;

impl KunkunError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    pub(crate) fn archive(context: impl Into<String>, source: zip::result::ZipError) -> Self {
        Self::Archive {
            context: context.into(),
            source,
        }
    }

    pub(crate) fn unsupported(message: impl Into<String>) -> Self {
        Self::UnsupportedDocument(message.into())
    }
}
