//! Client for the Flexpool v1 REST API.
//!
//! Every call goes through [`Client::dispatch`], which builds the endpoint
//! URL, issues one GET through the [`Transport`], and decodes the
//! [`Envelope`]. The resource accessors ([`Client::miner`],
//! [`Client::worker`], [`Client::pool`]) project the envelope's result into
//! the records in [`types`].
//!
//! Calls are independent: there is no retry, caching, or shared state
//! between them.

mod decode;
pub mod envelope;
pub mod miner;
pub mod pool;
pub mod transport;
pub mod types;
pub mod worker;

use std::str::FromStr;

use strum::{AsRefStr, Display, EnumIter};

pub use envelope::{Envelope, ResponseError};
pub use miner::MinerApi;
pub use pool::PoolApi;
pub use transport::{HttpResponse, HttpTransport, Transport};
pub use worker::WorkerApi;

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::tracing::prelude::*;

/// Endpoint category. Selects the path segment and how parameters are
/// delimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Endpoint {
    Miner,
    Worker,
    Pool,
}

impl FromStr for Endpoint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "miner" => Ok(Endpoint::Miner),
            "worker" => Ok(Endpoint::Worker),
            "pool" => Ok(Endpoint::Pool),
            other => Err(Error::UnsupportedEndpoint(other.to_string())),
        }
    }
}

/// Build the request URL for one API call.
///
/// The layout is `base/<endpoint>[/<resource>]/<method>` followed by the
/// parameters. The pool endpoint takes no resource segment. Worker
/// parameters are appended as `/param` path segments; miner and pool
/// parameters are each appended as `?param`, repeated rather than joined
/// with `&`, which is what the upstream API expects.
pub fn endpoint_url(
    base_url: &str,
    endpoint: Endpoint,
    resource: &str,
    method: &str,
    params: &[String],
) -> String {
    let mut url = format!("{}/{}", base_url.trim_end_matches('/'), endpoint.as_ref());

    if endpoint != Endpoint::Pool {
        url.push('/');
        url.push_str(resource);
    }

    url.push('/');
    url.push_str(method);

    let delimiter = match endpoint {
        Endpoint::Worker => '/',
        Endpoint::Miner | Endpoint::Pool => '?',
    };
    for param in params {
        url.push(delimiter);
        url.push_str(param);
    }

    url
}

/// API client, generic over its transport.
#[derive(Debug, Clone)]
pub struct Client<T = HttpTransport> {
    base_url: String,
    transport: T,
}

impl Client<HttpTransport> {
    /// Client for the public API with default settings.
    pub fn new() -> Result<Self> {
        Self::from_config(&ClientConfig::default())
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        Self::from_config(&ClientConfig::with_base_url(base_url))
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(config.timeout)?;
        Ok(Self::with_transport(config.base_url.clone(), transport))
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(base_url: impl Into<String>, transport: T) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Endpoints under `/miner/<address>`.
    pub fn miner<'a>(&'a self, address: &'a str) -> MinerApi<'a, T> {
        MinerApi::new(self, address)
    }

    /// Endpoints under `/worker/<address>/<worker>`.
    pub fn worker<'a>(&'a self, address: &'a str, worker: &'a str) -> WorkerApi<'a, T> {
        WorkerApi::new(self, address, worker)
    }

    /// Endpoints under `/pool`.
    pub fn pool(&self) -> PoolApi<'_, T> {
        PoolApi::new(self)
    }

    /// Issue one request and decode the envelope.
    ///
    /// `resource` is ignored for [`Endpoint::Pool`]. `params` are
    /// pre-encoded `key=value` strings. Non-2xx responses are rejected with
    /// [`Error::Status`]; the envelope's own error descriptor is left for
    /// [`Envelope::into_result`] to check.
    pub async fn dispatch(
        &self,
        endpoint: Endpoint,
        resource: &str,
        method: &str,
        params: &[String],
    ) -> Result<Envelope> {
        let url = endpoint_url(&self.base_url, endpoint, resource, method, params);
        debug!(%url, "dispatching request");

        let response = match self.transport.get(&url).await {
            Ok(response) => response,
            Err(err) => {
                warn!(%url, "request failed: {err}");
                return Err(err);
            }
        };

        if !response.is_success() {
            // Carry the API's own message along when the body has one.
            let message = Envelope::from_slice(&response.body)
                .ok()
                .and_then(|env| env.api_error().map(|e| e.message.clone()));
            warn!(%url, status = response.status, "upstream rejected request");
            return Err(Error::Status {
                status: response.status,
                message,
            });
        }

        Envelope::from_slice(&response.body).inspect_err(|err| {
            warn!(%url, "undecodable envelope: {err}");
        })
    }

    /// Dispatch and unwrap the result, failing on an API error.
    pub(crate) async fn request(
        &self,
        endpoint: Endpoint,
        resource: &str,
        method: &str,
        params: &[String],
    ) -> Result<serde_json::Value> {
        self.dispatch(endpoint, resource, method, params)
            .await?
            .into_result()
    }
}

/// `page=<n>` parameter for the paginated endpoints.
pub(crate) fn page_param(page: u32) -> Vec<String> {
    vec![format!("page={page}")]
}
