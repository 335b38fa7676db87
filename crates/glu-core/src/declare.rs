//! Declarative descriptor construction.
//!
//! Servers describe their components with a plain registration table, built
//! once at startup: one [`ParamDecl`] per parameter, one [`ServiceDecl`] per
//! exposed method, one [`ComponentDecl`] per component. [`ComponentDecl::build`]
//! turns the table into the same [`ComponentDescriptor`] the client parses,
//! applying the same shape rules, so what a server publishes is exactly what
//! a client accepts.
//!
//! # Examples
//!
//! ```
//! use glu_core::declare::{ComponentDecl, ParamDecl, ServiceDecl};
//! use glu_core::{ClientConfig, ParameterType};
//!
//! let decl = ComponentDecl::new("Combiner", "Combines things")
//!     .param(ParamDecl::required("some_number", ParameterType::Number, "Some number"))
//!     .service(
//!         ServiceDecl::new("foobar", "Foo a bar")
//!             .param(ParamDecl::required("text", ParameterType::String, "Some text"))
//!             .positional(ParamDecl::optional("num", ParameterType::Number, "A number", 10)),
//!     );
//!
//! let comp = decl.build(&ClientConfig::default()).unwrap();
//! assert_eq!(comp.uri(), "/code/Combiner");
//! assert_eq!(comp.service("foobar").unwrap().uri(), "/code/Combiner/foobar");
//! ```

use crate::component::ResourceCreationParams;
use crate::{
    ClientConfig, ComponentDescriptor, Error, ParameterDefinition, ParameterType,
    ResourceDescriptor, Result, ServiceDefinition, Value,
};

/// One row of the registration table: a parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamDecl {
    /// Parameter name.
    pub name: String,
    /// Parameter type.
    pub param_type: ParameterType,
    /// Whether a value must be supplied.
    pub required: bool,
    /// Default for optional parameters.
    pub default: Option<Value>,
    /// Human-readable description.
    pub description: String,
}

impl ParamDecl {
    /// Declares a required parameter.
    #[must_use]
    pub fn required(
        name: impl Into<String>,
        param_type: ParameterType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            param_type,
            required: true,
            default: None,
            description: description.into(),
        }
    }

    /// Declares an optional parameter with a default.
    #[must_use]
    pub fn optional(
        name: impl Into<String>,
        param_type: ParameterType,
        description: impl Into<String>,
        default: impl Into<Value>,
    ) -> Self {
        Self {
            name: name.into(),
            param_type,
            required: false,
            default: Some(default.into()),
            description: description.into(),
        }
    }

    /// Checks the row and produces its definition.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedDescriptor`] if the required/default pairing
    /// is inconsistent or the default does not satisfy the type.
    pub fn build(&self) -> Result<ParameterDefinition> {
        match (&self.default, self.required) {
            (None, true) => Ok(ParameterDefinition::required(
                &self.name,
                self.param_type,
                &self.description,
            )),
            (Some(default), false) => ParameterDefinition::optional(
                &self.name,
                self.param_type,
                &self.description,
                default.clone(),
            ),
            (Some(_), true) => Err(Error::malformed(
                &self.name,
                "required parameter must not specify a default value",
            )),
            (None, false) => Err(Error::malformed(
                &self.name,
                "no default value specified for optional parameter",
            )),
        }
    }
}

/// One exposed method of a component.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceDecl {
    /// Service name; also its last URI segment.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Declared parameters.
    pub params: Vec<ParamDecl>,
    /// Names of positional parameters, in call order.
    pub positional: Vec<String>,
}

impl ServiceDecl {
    /// Declares a service with no parameters yet.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            params: Vec::new(),
            positional: Vec::new(),
        }
    }

    /// Adds a named (query string) parameter.
    #[must_use]
    pub fn param(mut self, param: ParamDecl) -> Self {
        self.params.push(param);
        self
    }

    /// Adds a parameter and appends it to the positional order.
    #[must_use]
    pub fn positional(mut self, param: ParamDecl) -> Self {
        self.positional.push(param.name.clone());
        self.params.push(param);
        self
    }

    fn build(&self, uri: String) -> Result<ServiceDefinition> {
        let params = self
            .params
            .iter()
            .map(ParamDecl::build)
            .collect::<Result<Vec<_>>>()?;
        ServiceDefinition::new(
            &self.name,
            &self.description,
            uri,
            params,
            self.positional.iter().cloned(),
        )
    }
}

/// A component's registration entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentDecl {
    /// Component name; also its last URI segment.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Resource-creation-time parameters.
    pub params: Vec<ParamDecl>,
    /// Exposed services.
    pub services: Vec<ServiceDecl>,
}

impl ComponentDecl {
    /// Declares a component with no parameters or services yet.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            params: Vec::new(),
            services: Vec::new(),
        }
    }

    /// Adds a resource-creation-time parameter.
    #[must_use]
    pub fn param(mut self, param: ParamDecl) -> Self {
        self.params.push(param);
        self
    }

    /// Adds a service.
    #[must_use]
    pub fn service(mut self, service: ServiceDecl) -> Self {
        self.services.push(service);
        self
    }

    /// Builds the component descriptor.
    ///
    /// The component lives at `<code_prefix>/<name>`, each service at
    /// `<code_prefix>/<name>/<service>`, and the documentation at
    /// `<meta_prefix>/doc/<name>`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedDescriptor`] naming the offending row if any
    /// parameter or service is inconsistent.
    pub fn build(&self, config: &ClientConfig) -> Result<ComponentDescriptor> {
        let uri = config.component_path(&self.name);
        let params = self
            .params
            .iter()
            .map(ParamDecl::build)
            .collect::<Result<Vec<_>>>()?;
        let services = self
            .services
            .iter()
            .map(|s| s.build(format!("{uri}/{}", s.name)))
            .collect::<Result<Vec<_>>>()?;
        ComponentDescriptor::new(
            &self.name,
            &self.description,
            format!("{}/doc/{}", config.meta_prefix, self.name),
            uri,
            params,
            ResourceCreationParams::standard(),
            services,
        )
    }

    /// Builds the descriptor of a resource instantiated from this component.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedDescriptor`] if any service is inconsistent.
    pub fn build_resource(
        &self,
        config: &ClientConfig,
        name: &str,
        description: &str,
    ) -> Result<ResourceDescriptor> {
        let uri = config.resource_path(name);
        let services = self
            .services
            .iter()
            .map(|s| Ok((s.name.clone(), s.build(format!("{uri}/{}", s.name))?)))
            .collect::<Result<_>>()?;
        Ok(ResourceDescriptor::new(name, description, uri, services))
    }
}
