//! # Relation Resolver
//!
//! Derives breadcrumb chains, canonical URLs and node identities from a
//! route path.
//!
//! - Paths are normalized first: leading `/`, no empty segments, no query
//!   or fragment, no trailing `/` except for the root
//! - The first section of [`SECTIONS`] whose prefix matches whole segments
//!   decides the chain; unmatched paths yield the Home crumb only
//! - The base URL comes from one [`SiteConfig`] and is never repeated

use crate::config::SiteConfig;
use crate::primitives::{HOME_NAME, HOME_PATH, MAX_PATH_LENGTH, SECTIONS, Section, SectionKind};
use crate::{BreadcrumbNode, Diagnostic, NodeId};

/// Normalize a route path.
///
/// `"tours//great-migration/?ref=x"` becomes `"/tours/great-migration"`.
#[must_use]
pub fn normalize_path(path: &str) -> String {
    let route = path
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim();
    let segments: Vec<&str> = route.split('/').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        HOME_PATH.to_string()
    } else {
        format!("/{}", segments.join("/"))
    }
}

/// Turn a slug into a display name: split on `-`, capitalize each part.
///
/// `"northern-serengeti"` becomes `"Northern Serengeti"`.
#[must_use]
pub fn humanize_slug(slug: &str) -> String {
    slug.split('-')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Find the section a path belongs to.
#[must_use]
pub fn match_section(path: &str) -> Option<&'static Section> {
    if path.len() > MAX_PATH_LENGTH {
        return None;
    }
    let path = normalize_path(path);
    SECTIONS.iter().find(|section| {
        path.strip_prefix(section.prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    })
}

/// Resolve the breadcrumb chain for a route.
///
/// The chain always starts with Home at position 1. A matched section adds
/// its crumb; a non-blank `title` then becomes the final crumb at the page's
/// own path. Unmatched paths return the Home crumb alone, title or not.
#[must_use]
pub fn resolve_breadcrumbs(path: &str, title: Option<&str>) -> Vec<BreadcrumbNode> {
    let mut chain = vec![BreadcrumbNode::new(HOME_NAME, HOME_PATH, 1)];
    let Some(section) = match_section(path) else {
        return chain;
    };

    let path = normalize_path(path);
    let rest = path[section.prefix.len()..].trim_start_matches('/');

    let (name, url) = match section.kind {
        SectionKind::Listing => (section.name.to_string(), section.prefix.to_string()),
        SectionKind::Region => match rest.split('/').next().filter(|s| !s.is_empty()) {
            Some(region) => (
                humanize_slug(region),
                format!("{}/{}", section.prefix, region),
            ),
            None => (section.name.to_string(), section.prefix.to_string()),
        },
    };
    push_crumb(&mut chain, name, url);

    if let Some(title) = title.map(str::trim).filter(|t| !t.is_empty()) {
        push_crumb(&mut chain, title.to_string(), path);
    }

    chain
}

fn push_crumb(chain: &mut Vec<BreadcrumbNode>, name: String, url: String) {
    let position = chain.len() as u32 + 1;
    chain.push(BreadcrumbNode::new(name, url, position));
}

// =============================================================================
// RESOLVER (bound to one site)
// =============================================================================

/// Relation resolution bound to the site's canonical base URL.
#[derive(Debug, Clone)]
pub struct RelationResolver {
    base_url: String,
}

impl RelationResolver {
    /// Bind to the configuration's base URL.
    #[must_use]
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL of a route: base URL followed by the normalized path.
    #[must_use]
    pub fn canonical_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, normalize_path(path))
    }

    /// Identity of the node `fragment` on the page at `path`.
    #[must_use]
    pub fn node_id(&self, path: &str, fragment: &str) -> NodeId {
        NodeId::new(&self.base_url, &normalize_path(path), fragment)
    }

    /// Breadcrumb chain plus an `InvalidPath` diagnostic when the route
    /// matched no section. The root itself is not reported.
    #[must_use]
    pub fn trail(&self, path: &str, title: Option<&str>) -> (Vec<BreadcrumbNode>, Option<Diagnostic>) {
        let chain = resolve_breadcrumbs(path, title);
        let unmatched = match_section(path).is_none() && normalize_path(path) != HOME_PATH;
        let diagnostic = unmatched.then(|| Diagnostic::InvalidPath {
            path: path.to_string(),
        });
        (chain, diagnostic)
    }
}

// =============================================================================
// TESTS
// =============================================================================
