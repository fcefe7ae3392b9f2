//! # Primitives
//!
//! Fixed constants of the engine: the shared vocabulary context, the site
//! section table the Relation Resolver matches routes against, identity
//! fragments, and input limits.
//!
//! These values are compiled in. Anything that varies per deployment lives
//! in [`crate::config::SiteConfig`] instead.

/// Vocabulary context shared by every emitted document.
pub const SCHEMA_CONTEXT: &str = "https://schema.org";

/// Base URL used when no configuration is supplied.
pub const DEFAULT_BASE_URL: &str = "https://www.savannahtrails.com";

/// Name and URL of the first breadcrumb of every chain.
pub const HOME_NAME: &str = "Home";
pub const HOME_PATH: &str = "/";

// =============================================================================
// SITE SECTIONS
// =============================================================================

/// How the node for a matched section is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// The section itself is the crumb: `Tours` at `/tours`.
    Listing,
    /// The segment after the prefix names a region; it is humanized into
    /// the crumb (`/destinations/northern-serengeti` -> `Northern Serengeti`).
    Region,
}

/// A known top-level section of the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    /// Route prefix, matched on whole segments.
    pub prefix: &'static str,
    /// Crumb name for the section itself.
    pub name: &'static str,
    pub kind: SectionKind,
}

/// Known sections in match order.
///
/// Prefixes are single distinct segments, so at most one can match a path.
pub const SECTIONS: &[Section] = &[
    Section {
        prefix: "/tours",
        name: "Tours",
        kind: SectionKind::Listing,
    },
    Section {
        prefix: "/destinations",
        name: "Destinations",
        kind: SectionKind::Region,
    },
    Section {
        prefix: "/blog",
        name: "Blog",
        kind: SectionKind::Listing,
    },
    Section {
        prefix: "/faq",
        name: "FAQ",
        kind: SectionKind::Listing,
    },
    Section {
        prefix: "/gallery",
        name: "Gallery",
        kind: SectionKind::Listing,
    },
    Section {
        prefix: "/about",
        name: "About Us",
        kind: SectionKind::Listing,
    },
    Section {
        prefix: "/contact",
        name: "Contact",
        kind: SectionKind::Listing,
    },
];

// =============================================================================
// IDENTITY FRAGMENTS
// =============================================================================

pub const ORGANIZATION_FRAGMENT: &str = "organization";
pub const WEBSITE_FRAGMENT: &str = "website";
pub const WEBPAGE_FRAGMENT: &str = "webpage";
pub const BREADCRUMB_FRAGMENT: &str = "breadcrumb";
pub const TOUR_FRAGMENT: &str = "tour";
pub const RATING_FRAGMENT: &str = "rating";
pub const PLACE_FRAGMENT: &str = "place";
pub const POSTING_FRAGMENT: &str = "posting";
pub const FAQ_FRAGMENT: &str = "faq";

/// Prefixes for nodes that share a section page and are told apart by slug.
pub const MEDIA_FRAGMENT_PREFIX: &str = "media-";
pub const PERSON_FRAGMENT_PREFIX: &str = "person-";
pub const OFFICE_FRAGMENT_PREFIX: &str = "office-";

// =============================================================================
// RATINGS & COORDINATES
// =============================================================================

/// Bounds of a well-formed rating.
pub const MIN_RATING: f64 = 1.0;
pub const MAX_RATING: f64 = 5.0;

/// Absolute bounds of decimal-degree coordinates.
pub const LATITUDE_LIMIT: f64 = 90.0;
pub const LONGITUDE_LIMIT: f64 = 180.0;

// =============================================================================
// INPUT LIMITS
// =============================================================================

/// Maximum route length in bytes.
///
/// Longer routes are treated as unmatched.
pub const MAX_PATH_LENGTH: usize = 2048;
