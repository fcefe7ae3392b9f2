//! # Schema Emitter
//!
//! Serializes a [`ComposedDocument`] into the wire format.
//!
//! - One node: the node object itself, carrying `@context`
//! - Zero or several nodes: `{"@context": ..., "@graph": [...]}`
//! - Each node: `@type`, then `@id` when the node is anchored or referenced
//!   by another node of the same document, then its attributes as inserted
//!
//! Emission is a pure formatting step. The same document always produces
//! the same bytes.

use crate::{ComposedDocument, GraphNode, SchemaError};
use serde_json::{Map, Value};

/// Key of the shared vocabulary context.
pub const CONTEXT_KEY: &str = "@context";

/// Key of the node list in multi-node documents.
pub const GRAPH_KEY: &str = "@graph";

/// Emit a document as a JSON value.
#[must_use]
pub fn emit(document: &ComposedDocument) -> Value {
    let mut root = Map::new();
    root.insert(
        CONTEXT_KEY.to_string(),
        Value::String(document.context.clone()),
    );

    if let [only] = document.nodes.as_slice() {
        let with_id = only.anchored || document.is_referenced(&only.id);
        root.extend(emit_node(only, with_id));
    } else {
        let nodes = document
            .nodes
            .iter()
            .map(|node| {
                let with_id = node.anchored || document.is_referenced(&node.id);
                Value::Object(emit_node(node, with_id))
            })
            .collect();
        root.insert(GRAPH_KEY.to_string(), Value::Array(nodes));
    }

    Value::Object(root)
}

/// Emit one node's object.
#[must_use]
pub fn emit_node(node: &GraphNode, with_id: bool) -> Map<String, Value> {
    let mut object = Map::new();
    object.insert(
        "@type".to_string(),
        Value::String(node.node_type.as_str().to_string()),
    );
    if with_id {
        object.insert("@id".to_string(), Value::String(node.id.0.clone()));
    }
    for (key, value) in &node.attributes {
        object.insert(key.clone(), value.clone());
    }
    object
}

/// Emit a document as JSON text, pretty-printed or compact.
pub fn emit_string(document: &ComposedDocument, pretty: bool) -> Result<String, SchemaError> {
    let value = emit(document);
    let text = if pretty {
        serde_json::to_string_pretty(&value)
    } else {
        serde_json::to_string(&value)
    };
    text.map_err(|e| SchemaError::SerializationError(e.to_string()))
}

/// BLAKE3 hash of the compact emission, hex encoded.
///
/// Suitable as a cache key or ETag for the rendered document.
///
/// # Requires
///
/// This function is only available with the `crypto-hash` feature enabled.
#[cfg(feature = "crypto-hash")]
pub fn document_checksum(document: &ComposedDocument) -> Result<String, SchemaError> {
    let text = emit_string(document, false)?;
    Ok(blake3::hash(text.as_bytes()).to_hex().to_string())
}

// =============================================================================
// TESTS
// =============================================================================
