//! The OpenAPI 3.0 document tree and its clean-serialization policy.
//!
//! Every type here serializes through an explicit per-field omission policy:
//! a field holding a falsy value (empty string, `false`, empty collection,
//! or a nested object whose own fields are all falsy) is dropped from the
//! output. Mapping keys keep field declaration order; the two gathered
//! collections (paths, operations) are kept in sorted order by construction.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::Serialize;
use serde_yaml_ng::Value;

use crate::error::ModelError;

fn is_false(b: &bool) -> bool {
    !*b
}

fn option_is_empty<T: Clean>(v: &Option<T>) -> bool {
    v.as_ref().is_none_or(Clean::is_empty)
}

fn security_is_empty(v: &Option<Vec<SecurityRequirement>>) -> bool {
    v.as_ref().is_none_or(Vec::is_empty)
}

/// Falsy check for nested object-model values.
trait Clean {
    fn is_empty(&self) -> bool;
}

/// Where a parameter lives in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Query,
    Path,
    Header,
    Cookie,
}

/// One entry in an operation's parameter list.
///
/// The location field is emitted under the wire name `in`; like the original
/// wire format, that name is a reserved word here, so it only exists at
/// serialization time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(rename = "in")]
    pub location: ParameterLocation,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,

    #[serde(skip_serializing_if = "is_false")]
    pub required: bool,

    #[serde(skip_serializing_if = "is_false")]
    pub deprecated: bool,

    #[serde(rename = "allowEmptyValue", skip_serializing_if = "is_false")]
    pub allow_empty_value: bool,
}

impl Parameter {
    pub fn new(name: impl Into<String>, location: ParameterLocation) -> Self {
        Self {
            name: name.into(),
            location,
            description: String::new(),
            required: false,
            deprecated: false,
            allow_empty_value: false,
        }
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = text.into();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }
}

/// Shorthand for the most common parameter kind.
pub fn query_parameter(name: impl Into<String>) -> Parameter {
    Parameter::new(name, ParameterLocation::Query)
}

/// External documentation reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExternalDocs {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,
}

impl Clean for ExternalDocs {
    fn is_empty(&self) -> bool {
        self.description.is_empty() && self.url.is_empty()
    }
}

/// A host serving the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Server {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
}

/// One security requirement: scheme name to required scopes.
pub type SecurityRequirement = IndexMap<String, Vec<String>>;

/// A response (HTTP body) returned by an operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Response {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,

    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub headers: IndexMap<String, Value>,

    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub content: IndexMap<String, Value>,

    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub links: IndexMap<String, Value>,
}

impl Response {
    pub fn is_empty(&self) -> bool {
        self.description.is_empty()
            && self.headers.is_empty()
            && self.content.is_empty()
            && self.links.is_empty()
    }
}

/// Mapping of the responses available from one operation: a default
/// response plus entries keyed by status code.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Responses {
    #[serde(skip_serializing_if = "Response::is_empty")]
    pub default: Response,

    #[serde(flatten)]
    pub codes: BTreeMap<String, Response>,
}

impl Responses {
    pub fn is_empty(&self) -> bool {
        self.default.is_empty() && self.codes.is_empty()
    }
}

/// A `Responses` whose default response carries one content entry of the
/// given media type.
pub fn media_type_responses(media_type: impl Into<String>, data: Value) -> Responses {
    let mut responses = Responses::default();
    responses.default.content.insert(media_type.into(), data);
    responses
}

pub fn text_html(data: Value) -> Responses {
    media_type_responses("text/html", data)
}

pub fn application_json(data: Value) -> Responses {
    media_type_responses("application/json", data)
}

/// Field names an extension key is not allowed to shadow.
const OPERATION_FIELDS: &[&str] = &[
    "tags",
    "summary",
    "description",
    "externalDocs",
    "operationId",
    "responses",
    "parameters",
    "requestBody",
    "callbacks",
    "deprecated",
    "security",
    "servers",
];

/// One operation (method) in a [`PathItem`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Operation {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub summary: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,

    #[serde(rename = "externalDocs", skip_serializing_if = "option_is_empty")]
    pub external_docs: Option<ExternalDocs>,

    #[serde(rename = "operationId", skip_serializing_if = "String::is_empty")]
    pub operation_id: String,

    #[serde(skip_serializing_if = "Responses::is_empty")]
    pub responses: Responses,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,

    #[serde(rename = "requestBody", skip_serializing_if = "IndexMap::is_empty")]
    pub request_body: IndexMap<String, Value>,

    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub callbacks: IndexMap<String, Value>,

    #[serde(skip_serializing_if = "is_false")]
    pub deprecated: bool,

    #[serde(skip_serializing_if = "security_is_empty")]
    pub security: Option<Vec<SecurityRequirement>>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<Server>,

    #[serde(flatten)]
    pub(crate) extensions: IndexMap<String, Value>,
}

impl Operation {
    /// Attach a vendor-extension field, emitted as a top-level sibling of
    /// the declared fields. Keys shadowing a declared field are rejected.
    pub fn extend(&mut self, key: impl Into<String>, value: Value) -> Result<(), ModelError> {
        let key = key.into();
        if OPERATION_FIELDS.contains(&key.as_str()) {
            return Err(ModelError::ExtensionCollision(key));
        }
        self.extensions.insert(key, value);
        Ok(())
    }

    pub fn extensions(&self) -> &IndexMap<String, Value> {
        &self.extensions
    }
}

/// One path in the `paths` mapping of an OpenAPI document.
///
/// Operations are keyed by lowercase HTTP method name and flattened beside
/// the declared fields in sorted order at serialization time.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PathItem {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub summary: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<Server>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,

    #[serde(flatten)]
    operations: BTreeMap<String, Operation>,
}

impl PathItem {
    /// Insert one operation. Duplicate method registration is a
    /// construction error, never an overwrite.
    pub fn add_operation(
        &mut self,
        method: impl Into<String>,
        operation: Operation,
    ) -> Result<(), ModelError> {
        let method = method.into();
        if self.operations.contains_key(&method) {
            return Err(ModelError::DuplicateOperation(method));
        }
        self.operations.insert(method, operation);
        Ok(())
    }

    /// Gather the operations of `other` into this path item.
    pub fn merge(&mut self, other: PathItem) -> Result<(), ModelError> {
        for (method, operation) in other.operations {
            self.add_operation(method, operation)?;
        }
        Ok(())
    }

    pub fn operations(&self) -> impl Iterator<Item = (&str, &Operation)> {
        self.operations.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// The `info` block of an OpenAPI document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Info {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,

    #[serde(rename = "termsOfService", skip_serializing_if = "String::is_empty")]
    pub terms_of_service: String,

    #[serde(skip_serializing_if = "option_is_empty")]
    pub contact: Option<Contact>,

    #[serde(skip_serializing_if = "option_is_empty")]
    pub license: Option<License>,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub version: String,
}

impl Default for Info {
    fn default() -> Self {
        Self {
            title: "TODO".to_string(),
            description: String::new(),
            terms_of_service: String::new(),
            contact: None,
            license: None,
            version: "TODO".to_string(),
        }
    }
}

/// Contact information for the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Contact {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub email: String,
}

impl Clean for Contact {
    fn is_empty(&self) -> bool {
        self.name.is_empty() && self.url.is_empty() && self.email.is_empty()
    }
}

/// License information for the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct License {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,
}

impl Clean for License {
    fn is_empty(&self) -> bool {
        self.name.is_empty() && self.url.is_empty()
    }
}

/// The root OpenAPI document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenApi {
    pub openapi: String,

    pub info: Info,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub paths: BTreeMap<String, PathItem>,
}

impl Default for OpenApi {
    fn default() -> Self {
        Self {
            openapi: "3.0.0".to_string(),
            info: Info::default(),
            paths: BTreeMap::new(),
        }
    }
}

impl OpenApi {
    /// Render the document as YAML: block style, mapping order preserved,
    /// multi-line strings as literal block scalars, no anchors or aliases.
    pub fn to_yaml(&self) -> Result<String, serde_yaml_ng::Error> {
        serde_yaml_ng::to_string(self)
    }
}
