//! Request transport trait.
//!
//! This module defines the `Transport` trait, the single seam through which
//! descriptors are fetched, resources are created and services are invoked.

use crate::{HttpRequest, HttpResult, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// Sends one HTTP request and returns the server's answer.
///
/// Implementations resolve the request URI (absolute, or relative to the
/// server they point at), send the optional body, and decode the response
/// payload into a [`Value`](crate::Value). They do not retry.
///
/// # Errors contract
///
/// - If the request cannot be delivered, return [`Error::Transport`].
/// - If `expected_status` is set and the response status differs, return
///   [`Error::Server`] carrying the status and payload.
/// - Otherwise return the result, whatever its status.
///
/// [`Error::Transport`]: crate::Error::Transport
/// [`Error::Server`]: crate::Error::Server
///
/// # Examples
///
/// ```
/// use glu_core::traits::Transport;
/// use glu_core::{HttpRequest, HttpResult, Result};
/// use async_trait::async_trait;
/// use serde_json::json;
///
/// struct Echo;
///
/// #[async_trait]
/// impl Transport for Echo {
///     async fn send(&self, request: HttpRequest) -> Result<HttpResult> {
///         Ok(HttpResult::new(200, json!({"uri": request.uri})))
///     }
/// }
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let res = Echo.send(HttpRequest::get("/code")).await.unwrap();
/// assert_eq!(res.data["uri"], "/code");
/// # }
/// ```
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends a request.
    ///
    /// # Errors
    ///
    /// See the trait-level errors contract.
    async fn send(&self, request: HttpRequest) -> Result<HttpResult>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: HttpRequest) -> Result<HttpResult> {
        (**self).send(request).await
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for &T {
    async fn send(&self, request: HttpRequest) -> Result<HttpResult> {
        (**self).send(request).await
    }
}
