//! # safari-ld-core
//!
//! The structured-metadata composition engine for safari-ld - THE ENGINE.
//!
//! Content records (tours, destinations, blog posts, FAQs, gallery items,
//! team members, offices) go in; linked-data documents for search and
//! indexing agents come out.
//!
//! ## Pipeline
//!
//! ```text
//! ContentEntity ──► relation (breadcrumbs, ids, URLs)
//!               ──► projector (required / optional attributes)
//!               ──► aggregate (rating summaries)
//!               ──► compositor (one document, unique ids)
//!               ──► emitter (wire JSON)
//! ```
//!
//! `pages` drives the pipeline for every page kind of the site.
//!
//! ## Architectural Constraints
//!
//! - Every public operation is a pure function of its inputs
//! - No I/O, no logging, no async; soft conditions come back as
//!   [`Diagnostic`] values
//! - One [`SiteConfig`] supplies the canonical base URL for every id and link

// =============================================================================
// MODULES
// =============================================================================

pub mod aggregate;
pub mod compositor;
pub mod config;
pub mod emitter;
pub mod pages;
pub mod primitives;
pub mod projector;
pub mod relation;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    AggregateSummary, BlogPost, BreadcrumbNode, ComposedDocument, Composition, ContentEntity,
    Coordinates, Destination, Diagnostic, Faq, GalleryItem, GraphNode, Image, MediaKind, NodeId,
    NodeType, OfficeLocation, PostalAddress, Price, Review, SchemaError, SocialLinks, TeamMember,
    Tour,
};

// =============================================================================
// RE-EXPORTS: Engine Stages
// =============================================================================

pub use aggregate::{aggregate, aggregate_entity};
pub use compositor::{ComposerState, GraphComposer};
pub use config::{OrganizationProfile, SiteConfig};
#[cfg(feature = "crypto-hash")]
pub use emitter::document_checksum;
pub use emitter::{emit, emit_string};
pub use pages::{Page, SchemaBuilder, compose_page};
pub use projector::{DecimalText, FieldProjector, FieldValue, project};
pub use relation::{RelationResolver, humanize_slug, normalize_path, resolve_breadcrumbs};
