//! Entry point for talking to one Glu server.

use crate::transport::HttpTransport;
use crate::{Component, Resource};
use glu_core::traits::Transport;
use glu_core::{
    ClientConfig, ComponentDescriptor, DescUri, HttpRequest, HttpResult, HttpStatus,
    ResourceDescriptor, Result, Value, parse_listing,
};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Configuration and transport shared by every proxy obtained from one server.
pub(crate) struct Session {
    pub(crate) config: ClientConfig,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("transport", &"dyn Transport")
            .finish()
    }
}

impl Session {
    pub(crate) async fn send(&self, request: HttpRequest) -> Result<HttpResult> {
        tracing::debug!(method = %request.method, uri = %request.uri, "sending request");
        let result = self.transport.send(request).await?;
        tracing::debug!(status = result.status, "received response");
        Ok(result)
    }

    /// GETs `uri`, requiring 200, and returns the payload.
    pub(crate) async fn get_json(&self, uri: &str) -> Result<Value> {
        let result = self
            .send(HttpRequest::get(uri).expect_status(HttpStatus::OK))
            .await?;
        Ok(result.data)
    }

    pub(crate) async fn fetch_resource(self: &Arc<Self>, name: &str) -> Result<Resource> {
        let raw = self.get_json(&self.config.resource_path(name)).await?;
        let descriptor = ResourceDescriptor::parse(name, &raw)?;
        Ok(Resource::new(descriptor, Arc::clone(self)))
    }
}

/// A Glu server, identified by its configuration.
///
/// Every component and resource proxy obtained from a server shares its
/// transport. Cloning a `GluServer` is cheap.
///
/// # Examples
///
/// ```no_run
/// use glu_client::GluServer;
/// use glu_core::ClientConfig;
///
/// # async fn example() -> glu_core::Result<()> {
/// let server = GluServer::new(ClientConfig::new("http://localhost:8001"))?;
///
/// for (name, entry) in server.list_components().await? {
///     println!("{name}: {}", entry.desc);
/// }
///
/// let combiner = server.component("Combiner").await?;
/// let mut template = combiner.resource_template();
/// template.set("some_number", 3)?.set_suggested_name("r1");
/// let resource = template.create_resource().await?;
///
/// let mut foobar = resource.service("foobar")?;
/// foobar.set("text", "hi")?;
/// let result = foobar.access(None).await?;
/// println!("{} {}", result.status, result.data);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GluServer {
    session: Arc<Session>,
}

impl GluServer {
    /// Connects to the server described by `config` over HTTP.
    ///
    /// No request is made until the first call.
    ///
    /// # Errors
    ///
    /// Returns [`glu_core::Error::Config`] if the configuration is invalid.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Uses a custom transport instead of HTTP.
    #[must_use]
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            session: Arc::new(Session { config, transport }),
        }
    }

    /// Returns the configuration this server was created with.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.session.config
    }

    /// Lists the published components.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the listing is malformed.
    pub async fn list_components(&self) -> Result<BTreeMap<String, DescUri>> {
        let raw = self
            .session
            .get_json(&self.session.config.components_path())
            .await?;
        parse_listing(&raw)
    }

    /// Fetches and parses one component.
    ///
    /// # Errors
    ///
    /// Returns [`glu_core::Error::Server`] if the server does not answer 200
    /// (e.g. 404 for an unknown component), or
    /// [`glu_core::Error::MalformedDescriptor`] if the descriptor is broken.
    pub async fn component(&self, name: &str) -> Result<Component> {
        tracing::info!("Fetching component '{}'", name);
        let raw = self
            .session
            .get_json(&self.session.config.component_path(name))
            .await?;
        let descriptor = ComponentDescriptor::parse(&raw)?;
        Ok(Component::new(descriptor, Arc::clone(&self.session)))
    }

    /// Lists the live resources.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the listing is malformed.
    pub async fn list_resources(&self) -> Result<BTreeMap<String, DescUri>> {
        let raw = self
            .session
            .get_json(&self.session.config.resources_path())
            .await?;
        parse_listing(&raw)
    }

    /// Fetches and parses one live resource.
    ///
    /// # Errors
    ///
    /// Returns [`glu_core::Error::Server`] if the server does not answer 200,
    /// or [`glu_core::Error::MalformedDescriptor`] if the descriptor is broken.
    pub async fn resource(&self, name: &str) -> Result<Resource> {
        tracing::info!("Fetching resource '{}'", name);
        self.session.fetch_resource(name).await
    }

    /// Sends a raw request through the server's transport.
    ///
    /// # Errors
    ///
    /// Returns whatever the transport returns.
    pub async fn json_send(&self, request: HttpRequest) -> Result<HttpResult> {
        self.session.send(request).await
    }
}
