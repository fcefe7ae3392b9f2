//! # Core Type Definitions
//!
//! This module contains the value types shared by every stage of the engine:
//! - Content records supplied by the content provider (`entity` submodule)
//! - Graph identity and nodes (`NodeId`, `NodeType`, `GraphNode`)
//! - Relation and summary values (`BreadcrumbNode`, `AggregateSummary`)
//! - Composition output (`ComposedDocument`, `Composition`)
//! - Error taxonomy (`SchemaError`) and soft conditions (`Diagnostic`)
//!
//! ## Determinism Guarantees
//!
//! - Attributes are an insertion-ordered `serde_json::Map` (`preserve_order`)
//! - Reference sets use `BTreeSet` so iteration order never depends on hashing

mod entity;

pub(crate) use entity::entity_label;
pub use entity::*;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

// =============================================================================
// GRAPH IDENTITY
// =============================================================================

/// Opaque identity of a node: `<canonicalBaseUrl><path>#<fragment>`.
///
/// Two documents built independently for the same site agree on an id
/// whenever they agree on base URL, path and fragment.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub String);

impl NodeId {
    /// Build an id from an already-normalized base URL and path.
    #[must_use]
    pub fn new(base_url: &str, path: &str, fragment: &str) -> Self {
        Self(format!("{}{}#{}", base_url, path, fragment))
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `{"@id": ...}` object used wherever another node points at this one.
    #[must_use]
    pub fn as_reference(&self) -> Value {
        let mut reference = Map::new();
        reference.insert("@id".to_string(), Value::String(self.0.clone()));
        Value::Object(reference)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Type tag of a graph node, serialized as `@type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NodeType {
    Organization,
    WebSite,
    WebPage,
    ContactPage,
    BreadcrumbList,
    Person,
    Product,
    AggregateRating,
    ImageObject,
    VideoObject,
    #[serde(rename = "FAQPage")]
    FaqPage,
    BlogPosting,
    TravelAgency,
    Place,
}

impl NodeType {
    /// The vocabulary term for this tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Organization => "Organization",
            Self::WebSite => "WebSite",
            Self::WebPage => "WebPage",
            Self::ContactPage => "ContactPage",
            Self::BreadcrumbList => "BreadcrumbList",
            Self::Person => "Person",
            Self::Product => "Product",
            Self::AggregateRating => "AggregateRating",
            Self::ImageObject => "ImageObject",
            Self::VideoObject => "VideoObject",
            Self::FaqPage => "FAQPage",
            Self::BlogPosting => "BlogPosting",
            Self::TravelAgency => "TravelAgency",
            Self::Place => "Place",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// GRAPH NODE
// =============================================================================

/// One typed object of a composed document.
///
/// References to other nodes are stored twice: as `{"@id": ...}` values
/// inside `attributes` (what gets emitted) and in `references` (what the
/// composer and emitter reason about).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Unique identity within a document.
    pub id: NodeId,
    /// Type tag.
    pub node_type: NodeType,
    /// Projected attributes in insertion order.
    pub attributes: Map<String, Value>,
    /// Ids of the nodes this node points at.
    pub references: BTreeSet<NodeId>,
    /// Emit `@id` even when nothing in the same document points here.
    pub anchored: bool,
}

impl GraphNode {
    /// Create a node with no attributes.
    #[must_use]
    pub fn new(id: NodeId, node_type: NodeType) -> Self {
        Self {
            id,
            node_type,
            attributes: Map::new(),
            references: BTreeSet::new(),
            anchored: false,
        }
    }

    /// Create a node carrying already-projected attributes.
    #[must_use]
    pub fn with_attributes(id: NodeId, node_type: NodeType, attributes: Map<String, Value>) -> Self {
        Self {
            attributes,
            ..Self::new(id, node_type)
        }
    }

    /// Mark the node as addressable from other documents.
    #[must_use]
    pub fn anchored(mut self) -> Self {
        self.anchored = true;
        self
    }

    /// Point `key` at another node by id.
    pub fn reference(&mut self, key: &str, target: &NodeId) {
        self.attributes
            .insert(key.to_string(), target.as_reference());
        self.references.insert(target.clone());
    }

    /// Point `key` at several nodes. An empty target list leaves no key behind.
    pub fn reference_all(&mut self, key: &str, targets: &[NodeId]) {
        if targets.is_empty() {
            return;
        }
        let refs = targets.iter().map(NodeId::as_reference).collect();
        self.attributes.insert(key.to_string(), Value::Array(refs));
        self.references.extend(targets.iter().cloned());
    }

    /// Get an attribute by name.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }
}

// =============================================================================
// RELATIONS & SUMMARIES
// =============================================================================

/// One step of a breadcrumb chain. Positions start at 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreadcrumbNode {
    pub name: String,
    /// Site-relative URL.
    pub url: String,
    pub position: u32,
}

impl BreadcrumbNode {
    #[must_use]
    pub fn new(name: impl Into<String>, url: impl Into<String>, position: u32) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            position,
        }
    }
}

/// Mean rating and sample count. Only exists for a non-empty sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregateSummary {
    /// Mean rounded to one decimal.
    pub value: f64,
    pub count: usize,
}

impl AggregateSummary {
    /// `ratingValue` text: always one decimal place.
    #[must_use]
    pub fn rating_value_text(&self) -> String {
        format!("{:.1}", self.value)
    }

    /// `reviewCount` text: plain integer.
    #[must_use]
    pub fn review_count_text(&self) -> String {
        self.count.to_string()
    }
}

// =============================================================================
// COMPOSED DOCUMENT
// =============================================================================

/// The finalized node sequence plus the shared vocabulary context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposedDocument {
    pub context: String,
    pub nodes: Vec<GraphNode>,
}

impl ComposedDocument {
    #[must_use]
    pub fn new(context: impl Into<String>, nodes: Vec<GraphNode>) -> Self {
        Self {
            context: context.into(),
            nodes,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node by id.
    #[must_use]
    pub fn get(&self, id: &NodeId) -> Option<&GraphNode> {
        self.nodes.iter().find(|node| &node.id == id)
    }

    /// Whether any node of this document points at `id`.
    #[must_use]
    pub fn is_referenced(&self, id: &NodeId) -> bool {
        self.nodes.iter().any(|node| node.references.contains(id))
    }

    /// Referenced ids that no node of this document defines.
    ///
    /// These resolve against other documents of the same site (a tour
    /// pointing at a destination page, for example).
    #[must_use]
    pub fn external_references(&self) -> BTreeSet<NodeId> {
        let defined: BTreeSet<&NodeId> = self.nodes.iter().map(|node| &node.id).collect();
        self.nodes
            .iter()
            .flat_map(|node| node.references.iter())
            .filter(|id| !defined.contains(id))
            .cloned()
            .collect()
    }
}

/// A composed document together with the soft conditions met on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    pub document: ComposedDocument,
    pub diagnostics: Vec<Diagnostic>,
}

// =============================================================================
// SOFT CONDITIONS
// =============================================================================

/// Conditions that are reported but never stop composition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The route matched no known section; the breadcrumb chain is Home only.
    InvalidPath { path: String },
    /// No ratings were available; the rating node was omitted.
    EmptyCollection { entity: String },
    /// Optional data was out of range or inconsistent.
    MalformedEntity { entity: String, detail: String },
    /// A node lacked a required attribute and was left out of the document.
    SkippedNode { entity: String, field: String },
}

impl Diagnostic {
    /// Short machine-readable name of the condition.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidPath { .. } => "invalid_path",
            Self::EmptyCollection { .. } => "empty_collection",
            Self::MalformedEntity { .. } => "malformed_entity",
            Self::SkippedNode { .. } => "skipped_node",
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPath { path } => write!(f, "unmatched path '{}'", path),
            Self::EmptyCollection { entity } => write!(f, "{}: no ratings", entity),
            Self::MalformedEntity { entity, detail } => write!(f, "{}: {}", entity, detail),
            Self::SkippedNode { entity, field } => {
                write!(f, "{}: missing required field '{}'", entity, field)
            }
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the engine.
///
/// - Expected absence is never an error (see [`Diagnostic`])
/// - Use `Result<T, SchemaError>` for fallible operations
/// - The engine never panics
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A required attribute is absent on an entity.
    #[error("Missing required field '{field}' on {entity}")]
    MissingRequiredField { entity: String, field: String },

    /// Two nodes of one document share an id.
    #[error("Duplicate node identity: {0}")]
    DuplicateIdentity(NodeId),

    /// A composer operation was called in a state that does not allow it.
    #[error("Invalid composer state: cannot {operation} while {state}")]
    InvalidState {
        operation: &'static str,
        state: &'static str,
    },

    /// The site configuration is unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A serialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_id_follows_scheme() {
        let id = NodeId::new("https://example.com", "/tours/great-migration", "tour");
        assert_eq!(id.as_str(), "https://example.com/tours/great-migration#tour");
        assert_eq!(
            id.as_reference(),
            serde_json::json!({"@id": "https://example.com/tours/great-migration#tour"})
        );
    }

    #[test]
    fn reference_records_target_once() {
        let org = NodeId::new("https://example.com", "/", "organization");
        let mut node = GraphNode::new(
            NodeId::new("https://example.com", "/", "webpage"),
            NodeType::WebPage,
        );
        node.reference("publisher", &org);
        node.reference("about", &org);

        assert_eq!(node.references.len(), 1);
        assert_eq!(node.attribute("publisher"), Some(&org.as_reference()));
    }

    #[test]
    fn reference_all_with_no_targets_adds_nothing() {
        let mut node = GraphNode::new(
            NodeId::new("https://example.com", "/tours", "webpage"),
            NodeType::WebPage,
        );
        node.reference_all("hasPart", &[]);
        assert!(node.attribute("hasPart").is_none());
        assert!(node.references.is_empty());
    }

    #[test]
    fn summary_text_formats() {
        let summary = AggregateSummary {
            value: 4.0,
            count: 12,
        };
        assert_eq!(summary.rating_value_text(), "4.0");
        assert_eq!(summary.review_count_text(), "12");
    }

    #[test]
    fn external_references_excludes_defined_nodes() {
        let base = "https://example.com";
        let org = GraphNode::new(NodeId::new(base, "/", "organization"), NodeType::Organization);
        let place = NodeId::new(base, "/destinations/ngorongoro", "place");
        let mut tour = GraphNode::new(NodeId::new(base, "/tours/a", "tour"), NodeType::Product);
        tour.reference("brand", &org.id);
        tour.reference_all("isRelatedTo", std::slice::from_ref(&place));

        let doc = ComposedDocument::new("https://schema.org", vec![org, tour]);
        let external = doc.external_references();
        assert_eq!(external.len(), 1);
        assert!(external.contains(&place));
        assert!(doc.is_referenced(&NodeId::new(base, "/", "organization")));
    }

    #[test]
    fn diagnostic_kind_names() {
        let d = Diagnostic::InvalidPath {
            path: "/unknown".to_string(),
        };
        assert_eq!(d.kind(), "invalid_path");
        assert_eq!(d.to_string(), "unmatched path '/unknown'");
    }
}
