//! Route tables: the host-framework metadata the walker consumes.
//!
//! A [`RouteTable`] is a named collection of [`Route`]s and forms a tree by
//! exclusively owning the tables its branch routes lead into. Tables are
//! built once, registered, and never mutated during a traversal.

use indexmap::IndexMap;
use serde_yaml_ng::Value;

use crate::error::WalkError;
use crate::openapi::{Parameter, Responses, SecurityRequirement};

/// Declared documentation metadata attached to a handler.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperationMeta {
    pub tags: Vec<String>,
    pub parameters: Vec<Parameter>,
    pub responses: Responses,
    pub deprecated: bool,
    pub security: Option<Vec<SecurityRequirement>>,
    pub extensions: IndexMap<String, Value>,
}

/// A leaf endpoint: the handler's identity, its documentation text, and any
/// declared metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Handler {
    name: String,
    doc: Option<String>,
    meta: OperationMeta,
}

impl Handler {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            meta: OperationMeta::default(),
        }
    }

    /// Attach the documentation text block.
    pub fn doc(mut self, text: impl Into<String>) -> Self {
        self.doc = Some(text.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.meta.tags.push(tag.into());
        self
    }

    pub fn parameter(mut self, parameter: Parameter) -> Self {
        self.meta.parameters.push(parameter);
        self
    }

    pub fn responses(mut self, responses: Responses) -> Self {
        self.meta.responses = responses;
        self
    }

    pub fn deprecated(mut self) -> Self {
        self.meta.deprecated = true;
        self
    }

    pub fn security(mut self, security: Vec<SecurityRequirement>) -> Self {
        self.meta.security = Some(security);
        self
    }

    /// Declare a vendor-extension field (conventionally `x-`-prefixed).
    /// Collisions with standard operation fields are caught at walk time.
    pub fn extension(mut self, key: impl Into<String>, value: Value) -> Self {
        self.meta.extensions.insert(key.into(), value);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn doc_text(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    pub fn meta(&self) -> &OperationMeta {
        &self.meta
    }
}

/// What a route resolves to: a handler, or a branch into a nested table.
#[derive(Debug, Clone, PartialEq)]
pub enum Endpoint {
    Handler(Handler),
    Branch { name: String, table: Box<RouteTable> },
}

/// A (method, pattern, endpoint) triple, immutable once registered.
/// Branch routes carry no method of their own.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    method: String,
    pattern: String,
    endpoint: Endpoint,
}

impl Route {
    pub fn new(method: &str, pattern: impl Into<String>, handler: Handler) -> Self {
        Self {
            method: method.to_ascii_uppercase(),
            pattern: pattern.into(),
            endpoint: Endpoint::Handler(handler),
        }
    }

    pub fn get(pattern: impl Into<String>, handler: Handler) -> Self {
        Self::new("GET", pattern, handler)
    }

    pub fn post(pattern: impl Into<String>, handler: Handler) -> Self {
        Self::new("POST", pattern, handler)
    }

    pub fn put(pattern: impl Into<String>, handler: Handler) -> Self {
        Self::new("PUT", pattern, handler)
    }

    pub fn delete(pattern: impl Into<String>, handler: Handler) -> Self {
        Self::new("DELETE", pattern, handler)
    }

    /// A branch into a nested table, mounted under `pattern`. The branch
    /// itself handles nothing; it only extends the path prefix.
    pub fn branch(pattern: impl Into<String>, name: impl Into<String>, table: RouteTable) -> Self {
        Self {
            method: String::new(),
            pattern: pattern.into(),
            endpoint: Endpoint::Branch {
                name: name.into(),
                table: Box::new(table),
            },
        }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }
}

/// A named collection of routes, possibly branching into nested tables.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteTable {
    name: String,
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            routes: Vec::new(),
        }
    }

    pub fn route(mut self, route: Route) -> Self {
        self.routes.push(route);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }
}

/// Root-table lookup by name, the explicit replacement for resolving a
/// table from a runtime import path.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    tables: IndexMap<String, RouteTable>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table under its own name.
    pub fn register(&mut self, table: RouteTable) {
        self.tables.insert(table.name.clone(), table);
    }

    pub fn get(&self, name: &str) -> Result<&RouteTable, WalkError> {
        self.tables
            .get(name)
            .ok_or_else(|| WalkError::UnknownTable(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn methods_are_uppercased() {
        let route = Route::new("get", "/end", Handler::new("end"));
        assert_eq!(route.method(), "GET");
    }

    #[test]
    fn branch_routes_have_no_method() {
        let route = Route::branch("/sub/", "subTree", RouteTable::new("SubApp"));
        assert_eq!(route.method(), "");
        assert!(matches!(route.endpoint(), Endpoint::Branch { name, .. } if name == "subTree"));
    }

    #[test]
    fn registry_lookup() {
        let mut registry = Registry::new();
        registry.register(RouteTable::new("TopApp"));
        assert!(registry.get("TopApp").is_ok());
        let err = registry.get("NoSuchApp").unwrap_err();
        assert!(matches!(err, WalkError::UnknownTable(name) if name == "NoSuchApp"));
    }
}
