use miette::Diagnostic;
use thiserror::Error;

use crate::client::ClientError;

#[derive(Error, Diagnostic, Debug)]
pub enum CliError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Client(#[from] ClientError),

    #[error("No access token available")]
    #[diagnostic(
        code(itwin_browser::cli::missing_token),
        help("Pass --token <TOKEN> or set the ITB_ACCESS_TOKEN environment variable.")
    )]
    MissingToken,

    #[error("Listing {collection} requires {flag}")]
    #[diagnostic(code(itwin_browser::cli::missing_scope))]
    MissingScope {
        collection: &'static str,
        flag: &'static str,
    },

    #[error("Failed to fetch {collection}")]
    #[diagnostic(
        code(itwin_browser::cli::fetch_failed),
        help("Run with RUST_LOG=itwin_browser=debug to see the failing request.")
    )]
    FetchFailed { collection: &'static str },

    #[error("Cannot sort by '{key}'")]
    #[diagnostic(
        code(itwin_browser::cli::unsupported_sort_key),
        help("Supported keys: {supported}")
    )]
    UnsupportedSortKey { key: String, supported: String },

    #[error("No thumbnail available for iModel {id}")]
    #[diagnostic(code(itwin_browser::cli::thumbnail_unavailable))]
    ThumbnailUnavailable { id: String },

    #[error("Failed to write output file")]
    #[diagnostic(code(itwin_browser::cli::io))]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("Failed to render output: {message}")]
    #[diagnostic(code(itwin_browser::cli::serialization))]
    Serialization { message: String },
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization {
            message: e.to_string(),
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;
