//! Client identity resolution.
//!
//! Handlers never look at the socket directly; they receive a [`Client`]
//! produced by whichever [`ClientResolver`] the router state carries.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;

use crate::memory::ClientId;

use super::AppState;

pub trait ClientResolver: Send + Sync {
    fn resolve(&self, parts: &Parts) -> ClientId;
}

/// Keys clients by peer IP address (port ignored), or `"default"` when the
/// server was not started with connect info.
#[derive(Debug, Clone, Copy, Default)]
pub struct PeerAddrResolver;

impl ClientResolver for PeerAddrResolver {
    fn resolve(&self, parts: &Parts) -> ClientId {
        parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| ClientId::new(addr.ip().to_string()))
            .unwrap_or_else(|| ClientId::from(ClientId::FALLBACK))
    }
}

/// Resolves every request to the same identity.
#[derive(Debug, Clone)]
pub struct FixedResolver(pub ClientId);

impl ClientResolver for FixedResolver {
    fn resolve(&self, _parts: &Parts) -> ClientId {
        self.0.clone()
    }
}

/// Extractor yielding the caller's [`ClientId`].
pub struct Client(pub ClientId);

impl FromRequestParts<AppState> for Client {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(Client(state.resolver.resolve(parts)))
    }
}
