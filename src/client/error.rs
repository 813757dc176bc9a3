use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum ClientError {
    #[error("Failed to connect to the iTwin platform")]
    #[diagnostic(
        code(itwin_browser::client::connection_failed),
        help(
            "Check your network connection.\nOr set ITB_API_URL environment variable to point to the correct server."
        )
    )]
    ConnectionFailed {
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid response from the iTwin platform: {message}")]
    #[diagnostic(
        code(itwin_browser::client::invalid_response),
        help("The server returned data in an unexpected format.")
    )]
    InvalidResponse { message: String },

    #[error("Response is missing the '{field}' collection")]
    #[diagnostic(code(itwin_browser::client::missing_field))]
    MissingField { field: String },

    #[error("API error ({status}): {message}")]
    #[diagnostic(code(itwin_browser::client::api_error))]
    Api { status: u16, message: String },
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            ClientError::ConnectionFailed { source: e }
        } else {
            ClientError::InvalidResponse {
                message: e.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::InvalidResponse {
            message: e.to_string(),
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
