//! HTTP transport for the arbor REST API.
//!
//! [`Transport`] is the seam between command logic and the network. The
//! [`ApiClient`] implements it with `reqwest`; tests substitute an in-memory
//! transport that records requests and replays canned results.

use std::future::Future;

use arbor_proto::{Request, ServerResult};
use reqwest::Client;
use tracing::{debug, trace};

use crate::config::Config;
use crate::error::CliError;
use crate::request::Method;

/// Executes one request against the server.
pub trait Transport {
    /// Send `body` to `path` and decode the result envelope.
    ///
    /// Application errors reported in the envelope are returned as a
    /// successful [`ServerResult`]; only transport failures are errors.
    fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Request>,
    ) -> impl Future<Output = Result<ServerResult, CliError>>;

    /// `GET path`, failing on application errors.
    fn get(&self, path: &str) -> impl Future<Output = Result<ServerResult, CliError>> {
        async move { checked(self.send(Method::Get, path, None).await?) }
    }

    /// `POST path` with `body`, failing on application errors.
    fn post(
        &self,
        path: &str,
        body: &Request,
    ) -> impl Future<Output = Result<ServerResult, CliError>> {
        async move { checked(self.send(Method::PostBody, path, Some(body)).await?) }
    }
}

/// Turn an application error in `result` into [`CliError::Server`].
///
/// # Errors
///
/// Returns `CliError::Server` if the result reports an error.
pub fn checked(result: ServerResult) -> Result<ServerResult, CliError> {
    if result.is_error() {
        return Err(CliError::Server {
            code: result.status_code,
            message: result.error_message(),
        });
    }
    Ok(result)
}

/// REST client authenticated with HTTP basic auth.
pub struct ApiClient {
    client: Client,
    config: Config,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("api_url", &self.config.api_url.as_str())
            .field("user", &self.config.user)
            .field("timeout", &self.config.timeout)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: Config) -> Result<Self, CliError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("arboradm/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CliError::Config(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { client, config })
    }
}

impl Transport for ApiClient {
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Request>,
    ) -> Result<ServerResult, CliError> {
        let url = self.config.endpoint(path);
        debug!(method = %method, url = %url, "Sending request");

        let mut req = match method {
            Method::Get => self.client.get(&url),
            Method::PostBody => self.client.post(&url),
            Method::PutBody => self.client.put(&url),
            Method::PatchBody => self.client.patch(&url),
            Method::Delete | Method::DeleteBody => self.client.delete(&url),
        };
        if let Some(user) = &self.config.user {
            req = req.basic_auth(user, self.config.password.as_deref());
        }
        if method.has_body() {
            if let Some(body) = body {
                req = req.json(body);
            }
        }

        let response = req.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        trace!(status = status.as_u16(), len = bytes.len(), "Received response");

        let mut result = match ServerResult::from_slice(&bytes) {
            Ok(result) => result,
            Err(_) if !status.is_success() => ServerResult::default(),
            Err(e) => return Err(e.into()),
        };
        if result.status_code == 0 || !status.is_success() {
            result.status_code = status.as_u16();
        }
        if result.status_text.is_empty() {
            result.status_text = status.canonical_reason().unwrap_or_default().to_owned();
        }
        Ok(result)
    }
}

#[cfg(test)]
pub(crate) mod fake {
    //! Recording transport for tests.

    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::*;

    /// A request seen by [`FakeTransport`].
    #[derive(Debug, Clone, PartialEq)]
    pub struct Sent {
        pub method: Method,
        pub path: String,
        pub body: Option<Request>,
    }

    /// Replays canned results keyed by `METHOD path`.
    #[derive(Default)]
    pub struct FakeTransport {
        responses: HashMap<String, ServerResult>,
        pub sent: RefCell<Vec<Sent>>,
    }

    impl FakeTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond(mut self, method: Method, path: &str, result: ServerResult) -> Self {
            self.responses
                .insert(format!("{} {path}", method.verb()), result);
            self
        }

        pub fn sent(&self) -> Vec<Sent> {
            self.sent.borrow().clone()
        }
    }

    impl Transport for FakeTransport {
        async fn send(
            &self,
            method: Method,
            path: &str,
            body: Option<&Request>,
        ) -> Result<ServerResult, CliError> {
            self.sent.borrow_mut().push(Sent {
                method,
                path: path.to_owned(),
                body: body.cloned(),
            });
            let key = format!("{} {path}", method.verb());
            self.responses
                .get(&key)
                .cloned()
                .ok_or_else(|| CliError::Transport(format!("no route for {key}")))
        }
    }
}
