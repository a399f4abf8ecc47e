//! Controllers referenced symbolically as `Class@action`.
//!
//! A route may name its handler instead of holding a closure. At dispatch time
//! the class is looked up in the [`ControllerRegistry`] to check that the
//! action exists, then an instance is obtained either from the router's
//! [`HandlerFactory`] (dependency-resolved construction) or from the class's
//! default constructor.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::ConstructionError;
use crate::request::Request;

/// A controller instance.
pub trait Controller: Send + Sync {
    /// Runs an action. Only called with names the class declares.
    fn call(&self, action: &str, req: &Request) -> Value;
}

/// Builds instances of a class without outside dependencies.
pub type Constructor = Arc<dyn Fn() -> Box<dyn Controller> + Send + Sync>;

/// Builds controller instances by class name, resolving their dependencies.
///
/// Implemented for closures:
///
/// ```
/// use oxide_route::{Controller, ConstructionError, HandlerFactory, Request};
/// use serde_json::Value;
///
/// struct Health;
///
/// impl Controller for Health {
///     fn call(&self, _action: &str, _req: &Request) -> Value {
///         Value::from("ok")
///     }
/// }
///
/// let factory = |class: &str| -> Result<Box<dyn Controller>, ConstructionError> {
///     match class {
///         "Health" => Ok(Box::new(Health)),
///         other => Err(format!("cannot resolve {other}").into()),
///     }
/// };
/// assert!(factory.construct("Health").is_ok());
/// assert!(factory.construct("Mailer").is_err());
/// ```
pub trait HandlerFactory: Send + Sync {
    /// Returns a ready instance of `class`.
    fn construct(&self, class: &str) -> Result<Box<dyn Controller>, ConstructionError>;
}

impl<F> HandlerFactory for F
where
    F: Fn(&str) -> Result<Box<dyn Controller>, ConstructionError> + Send + Sync,
{
    fn construct(&self, class: &str) -> Result<Box<dyn Controller>, ConstructionError> {
        self(class)
    }
}

/// Metadata for one controller class.
#[derive(Clone)]
pub struct ControllerClass {
    name: String,
    actions: Vec<String>,
    constructor: Option<Constructor>,
}

impl ControllerClass {
    /// Declares a class and the actions it answers to.
    pub fn new(name: impl Into<String>, actions: &[&str]) -> Self {
        Self {
            name: name.into(),
            actions: actions.iter().map(|a| (*a).to_string()).collect(),
            constructor: None,
        }
    }

    /// Uses `C::default()` as the constructor.
    #[must_use]
    pub fn with_default<C>(self) -> Self
    where
        C: Controller + Default + 'static,
    {
        self.with_constructor(|| Box::new(C::default()))
    }

    /// Uses a custom dependency-free constructor.
    #[must_use]
    pub fn with_constructor<F>(mut self, constructor: F) -> Self
    where
        F: Fn() -> Box<dyn Controller> + Send + Sync + 'static,
    {
        self.constructor = Some(Arc::new(constructor));
        self
    }

    /// Class name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared actions.
    pub fn actions(&self) -> &[String] {
        &self.actions
    }

    /// Whether the class declares `action`.
    pub fn has_action(&self, action: &str) -> bool {
        self.actions.iter().any(|a| a == action)
    }

    /// Builds an instance with the default constructor.
    pub fn construct(&self) -> Result<Box<dyn Controller>, ConstructionError> {
        self.constructor
            .as_ref()
            .map(|ctor| ctor())
            .ok_or_else(|| format!("{} has no default constructor", self.name).into())
    }
}

impl fmt::Debug for ControllerClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerClass")
            .field("name", &self.name)
            .field("actions", &self.actions)
            .field("constructor", &self.constructor.is_some())
            .finish()
    }
}

/// Known controller classes, by name.
#[derive(Debug, Default, Clone)]
pub struct ControllerRegistry {
    classes: HashMap<String, ControllerClass>,
}

impl ControllerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a class, replacing any class with the same name.
    pub fn register(&mut self, class: ControllerClass) {
        self.classes.insert(class.name.clone(), class);
    }

    /// Looks a class up.
    pub fn get(&self, name: &str) -> Option<&ControllerClass> {
        self.classes.get(name)
    }

    /// Whether `class` exists and declares `action`.
    pub fn has_action(&self, class: &str, action: &str) -> bool {
        self.get(class).is_some_and(|c| c.has_action(action))
    }
}
