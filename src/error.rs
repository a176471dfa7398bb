use miette::Diagnostic;
use thiserror::Error;

/// Main error type for coilab operations
#[derive(Error, Diagnostic, Debug)]
pub enum CoilabError {
    #[error("IO error: {0}")]
    #[diagnostic(code(coilab::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(coilab::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(coilab::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Convert error: {message}")]
    #[diagnostic(code(coilab::convert))]
    Convert {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, CoilabError>;
