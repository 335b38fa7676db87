//! Client-side proxy for a live resource.

use crate::AccessibleService;
use crate::server::Session;
use glu_core::{
    Error, HttpMethod, HttpRequest, HttpStatus, ResourceDescriptor, Result, ServiceDefinition,
};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A live resource on the server.
///
/// Unlike [`Component`](crate::Component), looking up an unknown service on
/// a resource is an error.
///
/// The resource keeps service definitions, not callable handles:
/// [`service`](Self::service) builds a fresh [`AccessibleService`] with no
/// values or body on every call, so handles are never shared between calls.
#[derive(Debug, Clone)]
pub struct Resource {
    descriptor: ResourceDescriptor,
    session: Arc<Session>,
}

impl Resource {
    pub(crate) const fn new(descriptor: ResourceDescriptor, session: Arc<Session>) -> Self {
        Self {
            descriptor,
            session,
        }
    }

    /// Returns the parsed descriptor.
    #[must_use]
    pub const fn descriptor(&self) -> &ResourceDescriptor {
        &self.descriptor
    }

    /// Returns the resource name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.descriptor.name()
    }

    /// Returns the description given at creation.
    #[must_use]
    pub fn description(&self) -> &str {
        self.descriptor.description()
    }

    /// Returns the resource URI.
    #[must_use]
    pub fn uri(&self) -> &str {
        self.descriptor.uri()
    }

    /// Returns the definitions of all services.
    #[must_use]
    pub fn services(&self) -> &BTreeMap<String, ServiceDefinition> {
        self.descriptor.services()
    }

    /// Returns a fresh, unconfigured handle for calling a service.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the resource has no such service.
    pub fn service(&self, name: &str) -> Result<AccessibleService> {
        let definition = self.services().get(name).ok_or_else(|| Error::NotFound {
            kind: "Service",
            name: name.to_string(),
        })?;
        Ok(AccessibleService::new(
            definition.clone(),
            self.uri(),
            Arc::clone(&self.session),
        ))
    }

    /// Deletes the resource on the server.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Server`] unless the server answers 200.
    pub async fn delete(self) -> Result<()> {
        tracing::info!("Deleting resource '{}'", self.name());
        self.session
            .send(HttpRequest::new(HttpMethod::Delete, self.uri()).expect_status(HttpStatus::OK))
            .await?;
        Ok(())
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Resource: {}", self.name())?;
        writeln!(f, "    Description: {}", self.description())?;
        writeln!(f, "    URI:         {}", self.uri())?;
        write!(f, "    Services:")?;
        for service in self.services().values() {
            write!(f, "\n{service}")?;
        }
        Ok(())
    }
}
