//! NetAngels DNS client

mod auth;
mod http;
mod records;
mod wire;
mod zones;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::transport::{ReqwestTransport, Transport};

/// Typed client for the NetAngels DNS API.
///
/// The client holds no per-account state: credentials and the bearer token
/// live in the [`Session`](crate::Session) passed to each call, so one client
/// can serve many accounts and is `Send + Sync` whenever its transport is.
///
/// Calls are plain request/response round trips. Nothing is retried and
/// nothing is cached; a call that needs two requests (looking a zone up, then
/// listing its records) makes two independent requests.
pub struct NetangelsClient<T = ReqwestTransport> {
    pub(crate) transport: T,
    pub(crate) config: ClientConfig,
}

impl NetangelsClient<ReqwestTransport> {
    /// Build a client with a `reqwest` transport configured from `config`.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self { transport, config })
    }
}

impl<T: Transport> NetangelsClient<T> {
    /// Build a client over any [`Transport`].
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

impl<T> std::fmt::Debug for NetangelsClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetangelsClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
