//! Error type for the command-line frontend.

use miette::Diagnostic;
use sift_client::ClientError;
use sift_query::QueryError;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum CliError {
    #[error("Error while {action}: {source}")]
    #[diagnostic(code(sift_cli::io))]
    IoError {
        action: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    #[diagnostic(
        code(sift_cli::config),
        help("Check the config file syntax and field names")
    )]
    TomlError(#[from] Box<toml::de::Error>),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    #[diagnostic(code(sift_cli::readline))]
    Readline(#[from] rustyline::error::ReadlineError),

    #[error("no service domain configured")]
    #[diagnostic(
        code(sift_cli::missing_domain),
        help("Pass --domain or set `domain` in the config file")
    )]
    MissingDomain,

    #[error("no project selected")]
    #[diagnostic(
        code(sift_cli::no_project),
        help("Run `use <project>` to select a project first")
    )]
    NoProject,

    #[error("slot {index} is out of range; this session has slots 1..={capacity}")]
    #[diagnostic(code(sift_cli::invalid_slot))]
    InvalidSlot { index: usize, capacity: usize },
}

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        Self::TomlError(Box::new(err))
    }
}

/// A specialized Result type for the CLI.
pub type Result<T> = std::result::Result<T, CliError>;
