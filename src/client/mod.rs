//! HTTP access to the iTwin platform.
//!
//! - `credential`: access tokens and token providers
//! - `transport`: the `Transport` seam every network caller goes through
//! - `api_client`: the `reqwest` implementation of `Transport`
//! - `error`: client error types

mod api_client;
mod credential;
mod error;
mod transport;


pub use api_client::{API_URL_ENV, ApiClient, DEFAULT_API_URL};
pub use credential::{AccessToken, Credential};
pub use error::{ClientError, ClientResult};
#[cfg(test)]
pub use transport::MockTransport;
pub use transport::{ACCEPT_ITWIN_V1, ACCEPT_ITWIN_V2, ACCEPT_PNG, ApiRequest, Transport};
