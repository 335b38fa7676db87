//! Client-side proxy for a published component.

use crate::ResourceTemplate;
use crate::server::Session;
use glu_core::{
    ComponentDescriptor, ParameterDefinition, ResourceCreationParams, Result, ServiceDefinition,
    Value,
};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// A component as published by the server.
///
/// Lookups by name return `None` for unknown names; use
/// [`resource_template`](Self::resource_template) to instantiate the
/// component.
#[derive(Debug)]
pub struct Component {
    descriptor: Arc<ComponentDescriptor>,
    session: Arc<Session>,
    docs: OnceCell<Value>,
}

impl Component {
    pub(crate) fn new(descriptor: ComponentDescriptor, session: Arc<Session>) -> Self {
        Self {
            descriptor: Arc::new(descriptor),
            session,
            docs: OnceCell::new(),
        }
    }

    /// Returns the parsed descriptor.
    #[must_use]
    pub fn descriptor(&self) -> &ComponentDescriptor {
        &self.descriptor
    }

    /// Returns the component name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.descriptor.name()
    }

    /// Returns the short description.
    #[must_use]
    pub fn description(&self) -> &str {
        self.descriptor.description()
    }

    /// Returns the component URI.
    #[must_use]
    pub fn uri(&self) -> &str {
        self.descriptor.uri()
    }

    /// Looks up a resource-creation-time parameter.
    #[must_use]
    pub fn get_parameter(&self, name: &str) -> Option<&ParameterDefinition> {
        self.descriptor.parameter(name)
    }

    /// Returns all resource-creation-time parameters.
    #[must_use]
    pub fn parameters(&self) -> &BTreeMap<String, ParameterDefinition> {
        self.descriptor.parameters()
    }

    /// Looks up a service.
    #[must_use]
    pub fn get_service(&self, name: &str) -> Option<&ServiceDefinition> {
        self.descriptor.service(name)
    }

    /// Returns all services.
    #[must_use]
    pub fn services(&self) -> &BTreeMap<String, ServiceDefinition> {
        self.descriptor.services()
    }

    /// Returns the fixed `desc` / `suggested_name` creation parameters.
    #[must_use]
    pub fn resource_creation_params(&self) -> &ResourceCreationParams {
        self.descriptor.resource_creation_params()
    }

    /// Looks up one fixed creation parameter by key.
    #[must_use]
    pub fn resource_creation_param(&self, key: &str) -> Option<&ParameterDefinition> {
        self.descriptor.resource_creation_param(key)
    }

    /// Returns the component's long-form documentation.
    ///
    /// The first call fetches it from the documentation URI; later calls
    /// return the cached value.
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch fails. A failed fetch is not cached.
    pub async fn docs(&self) -> Result<&Value> {
        self.docs
            .get_or_try_init(|| async {
                tracing::debug!("Fetching documentation for '{}'", self.name());
                self.session.get_json(self.descriptor.doc_uri()).await
            })
            .await
    }

    /// Starts building a new resource from this component.
    #[must_use]
    pub fn resource_template(&self) -> ResourceTemplate {
        ResourceTemplate::new(Arc::clone(&self.descriptor), Arc::clone(&self.session))
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Component: {}", self.name())?;
        writeln!(f, "    Description: {}", self.description())?;
        writeln!(f, "    URI:         {}", self.uri())?;
        writeln!(f, "    Doc:         {}", self.descriptor.doc_uri())?;
        write!(f, "    Parameters:")?;
        for param in self.parameters().values() {
            write!(f, "\n        {param}")?;
        }
        write!(f, "\n    Services:")?;
        for service in self.services().values() {
            write!(f, "\n{service}")?;
        }
        Ok(())
    }
}
