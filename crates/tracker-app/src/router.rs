//! Explicit routing and event-binding tables.
//!
//! Both tables are built once at startup and shared read-only by every request:
//!
//! 1. [`Router`] - which view builder renders a URL path.
//! 2. [`Bindings`] - which handler turns a changed component property into new children for
//!    another component.

use crate::component::Node;
use futures::future::{BoxFuture, FutureExt};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;

pub type ViewBuilder = fn() -> Node;

#[derive(Default, Clone)]
pub struct Router {
    routes: HashMap<String, ViewBuilder>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, path: &str, builder: ViewBuilder) -> Self {
        self.routes.insert(path.to_string(), builder);
        self
    }

    /// Render the view registered for `path`, if any.
    pub fn resolve(&self, path: &str) -> Option<Node> {
        self.routes.get(path).map(|builder| builder())
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }
}

/// A component property, e.g. `input.value` or `output_graph.children`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Prop {
    pub id: String,
    pub property: String,
}

impl Prop {
    pub fn new(id: &str, property: &str) -> Self {
        Self {
            id: id.to_string(),
            property: property.to_string(),
        }
    }
}

impl std::fmt::Display for Prop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.id, self.property)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UpdateError {
    /// Leave the output as it is.
    #[error("no update: {0}")]
    NoUpdate(String),
}

pub type Handler = Arc<dyn Fn(String) -> BoxFuture<'static, Result<Node, UpdateError>> + Send + Sync>;

#[derive(Clone)]
pub struct Binding {
    pub output: Prop,
    handler: Handler,
}

impl Binding {
    pub async fn call(&self, value: String) -> Result<Node, UpdateError> {
        (self.handler)(value).await
    }
}

#[derive(Default, Clone)]
pub struct Bindings {
    table: HashMap<Prop, Binding>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` to recompute `output` whenever `input` changes. A later registration for
    /// the same input replaces the earlier one.
    pub fn bind<F, Fut>(mut self, input: Prop, output: Prop, handler: F) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Node, UpdateError>> + Send + 'static,
    {
        let handler: Handler = Arc::new(move |value| handler(value).boxed());
        self.table.insert(input, Binding { output, handler });
        self
    }

    pub fn get(&self, input: &Prop) -> Option<&Binding> {
        self.table.get(input)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
