//! The route tree walker: converts a [`RouteTable`] tree into an OpenAPI
//! document with deterministic, mergeable output.

use crate::doc::Documentation;
use crate::error::WalkError;
use crate::openapi::{OpenApi, Operation, PathItem};
use crate::route::{Endpoint, OperationMeta, Route, RouteTable};

/// Options controlling which routes reach the final document.
///
/// The filter is a substring match against the resolved rule path or the
/// operation id; `reverse` keeps the non-matching routes instead. Filtering
/// happens after conversion, so it never affects documentation extraction.
#[derive(Debug, Clone, Default)]
pub struct WalkOptions {
    pub filter: Option<String>,
    pub reverse: bool,
}

impl WalkOptions {
    fn matches(&self, rule: &ConvertedRule) -> bool {
        match &self.filter {
            None => true,
            Some(term) => {
                let hit = rule.rule_path.contains(term) || rule.operation_id.contains(term);
                hit != self.reverse
            }
        }
    }
}

/// One route converted into documentation terms.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertedRule {
    /// `<TableName>.<handlerName>`
    pub operation_id: String,
    /// Ancestor prefix + local pattern, duplicate slashes collapsed.
    pub rule_path: String,
    /// Uppercase HTTP method; empty for branches.
    pub method: String,
    pub doc: Documentation,
    pub meta: OperationMeta,
    /// Marks a branch into a nested table; branches produce no operation.
    pub branch: bool,
    /// The nested table's name, when this rule is a branch.
    pub sub_table: Option<String>,
}

fn join_paths(prefix: &str, pattern: &str) -> String {
    let mut joined = format!("{prefix}{pattern}");
    while joined.contains("//") {
        joined = joined.replace("//", "/");
    }
    joined
}

/// Convert one route of `table`, resolved against the URL prefix
/// accumulated from its ancestors.
pub fn convert_route(table: &RouteTable, route: &Route, prefix: &str) -> ConvertedRule {
    let rule_path = join_paths(prefix, route.pattern());
    match route.endpoint() {
        Endpoint::Handler(handler) => ConvertedRule {
            operation_id: format!("{}.{}", table.name(), handler.name()),
            rule_path,
            method: route.method().to_string(),
            doc: Documentation::new(handler.doc_text().unwrap_or("")),
            meta: handler.meta().clone(),
            branch: false,
            sub_table: None,
        },
        Endpoint::Branch { name, table: sub } => ConvertedRule {
            operation_id: format!("{}.{}", table.name(), name),
            rule_path,
            method: String::new(),
            doc: Documentation::default(),
            meta: OperationMeta::default(),
            branch: true,
            sub_table: Some(sub.name().to_string()),
        },
    }
}

/// Recursively convert every route reachable from `table`. Routes are
/// visited sorted by (pattern, method) so repeated runs over an unmodified
/// tree produce identical output.
pub fn walk(table: &RouteTable, prefix: &str) -> Vec<ConvertedRule> {
    let mut routes: Vec<&Route> = table.routes().iter().collect();
    routes.sort_by_key(|r| (r.pattern().to_string(), r.method().to_string()));

    let mut converted = Vec::new();
    for route in routes {
        let rule = convert_route(table, route, prefix);
        log::debug!("converted {} -> {}", rule.rule_path, rule.operation_id);
        if let Endpoint::Branch { table: sub, .. } = route.endpoint() {
            let sub_prefix = rule.rule_path.clone();
            converted.push(rule);
            converted.extend(walk(sub, &sub_prefix));
        } else {
            converted.push(rule);
        }
    }
    converted
}

fn build_operation(rule: &ConvertedRule) -> Result<Operation, WalkError> {
    let mut operation = Operation {
        tags: rule.meta.tags.clone(),
        summary: rule.doc.first().to_string(),
        description: rule.doc.full(),
        operation_id: rule.operation_id.clone(),
        responses: rule.meta.responses.clone(),
        parameters: rule.meta.parameters.clone(),
        deprecated: rule.meta.deprecated,
        security: rule.meta.security.clone(),
        ..Operation::default()
    };
    for (key, value) in &rule.meta.extensions {
        operation.extend(key.clone(), value.clone())?;
    }
    Ok(operation)
}

/// Assemble the OpenAPI document for a route table tree: group non-branch
/// conversions by rule path, one operation per HTTP method, paths in
/// lexicographic order. A repeated (path, method) pair anywhere in the tree
/// is ambiguous routing and fails the whole traversal.
pub fn document(table: &RouteTable, options: &WalkOptions) -> Result<OpenApi, WalkError> {
    let mut document = OpenApi::default();
    for rule in walk(table, "") {
        if rule.branch || !options.matches(&rule) {
            continue;
        }
        let operation = build_operation(&rule)?;
        let method = rule.method.to_ascii_lowercase();
        let item: &mut PathItem = document.paths.entry(rule.rule_path.clone()).or_default();
        item.add_operation(method.as_str(), operation)
            .map_err(|_| WalkError::DuplicateRoute {
                path: rule.rule_path.clone(),
                method,
            })?;
    }
    Ok(document)
}

/// [`document`] plus YAML rendering.
pub fn render(table: &RouteTable, options: &WalkOptions) -> Result<String, WalkError> {
    Ok(document(table, options)?.to_yaml()?)
}
