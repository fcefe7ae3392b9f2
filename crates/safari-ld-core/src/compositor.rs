//! # Compositor Module
//!
//! Assembles typed nodes into one document.
//!
//! The composer is a small state machine:
//!
//! ```text
//! Empty --add_node--> Assembling --add_node--> Assembling
//! Empty | Assembling --finalize--> Finalized
//! ```
//!
//! - Node order is insertion order
//! - Ids are unique per document; a duplicate is rejected, never overwritten
//! - References are by id, so a node may point at one added later

use crate::primitives::SCHEMA_CONTEXT;
use crate::{ComposedDocument, GraphNode, NodeId, SchemaError};
use std::collections::BTreeSet;

/// Lifecycle state of a [`GraphComposer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposerState {
    Empty,
    Assembling,
    Finalized,
}

impl ComposerState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Assembling => "assembling",
            Self::Finalized => "finalized",
        }
    }
}

/// Collects the nodes of one document.
#[derive(Debug)]
pub struct GraphComposer {
    state: ComposerState,
    nodes: Vec<GraphNode>,
    ids: BTreeSet<NodeId>,
}

impl Default for GraphComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphComposer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: ComposerState::Empty,
            nodes: Vec::new(),
            ids: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn state(&self) -> ComposerState {
        self.state
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether a node with this id was already added.
    #[must_use]
    pub fn contains(&self, id: &NodeId) -> bool {
        self.ids.contains(id)
    }

    /// Append a node.
    ///
    /// # Errors
    /// - `InvalidState` after `finalize`
    /// - `DuplicateIdentity` if the id is taken; nodes already added are kept
    pub fn add_node(&mut self, node: GraphNode) -> Result<(), SchemaError> {
        if self.state == ComposerState::Finalized {
            return Err(self.invalid("add a node"));
        }
        if self.ids.contains(&node.id) {
            return Err(SchemaError::DuplicateIdentity(node.id));
        }

        self.ids.insert(node.id.clone());
        self.nodes.push(node);
        self.state = ComposerState::Assembling;
        Ok(())
    }

    /// Close the composer and hand out the document.
    ///
    /// An empty composer yields a document with no nodes. Finalizing twice
    /// is `InvalidState`.
    pub fn finalize(&mut self) -> Result<ComposedDocument, SchemaError> {
        if self.state == ComposerState::Finalized {
            return Err(self.invalid("finalize"));
        }
        self.state = ComposerState::Finalized;
        self.ids.clear();
        Ok(ComposedDocument::new(
            SCHEMA_CONTEXT,
            std::mem::take(&mut self.nodes),
        ))
    }

    fn invalid(&self, operation: &'static str) -> SchemaError {
        SchemaError::InvalidState {
            operation,
            state: self.state.as_str(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
