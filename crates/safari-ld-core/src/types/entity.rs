//! Content records accepted by the engine.
//!
//! Every record is read-only input from the content provider. Display fields
//! the engine needs are plain `String`s defaulting to empty, so a record that
//! omits one still parses and is reported as a skipped node instead of
//! failing the whole page. Everything else is `Option` or a possibly empty
//! list: present-and-valid or absent.

use crate::primitives::{LATITUDE_LIMIT, LONGITUDE_LIMIT};
use serde::{Deserialize, Serialize};

// =============================================================================
// SHARED PARTS
// =============================================================================

/// An image reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Image {
    #[serde(default)]
    pub url: String,
    pub alt: Option<String>,
    pub caption: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Both components finite and inside their ranges.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude.abs() <= LATITUDE_LIMIT
            && self.longitude.abs() <= LONGITUDE_LIMIT
    }
}

/// Social profile links, emitted as `sameAs` in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    pub website: Option<String>,
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub twitter: Option<String>,
    pub linkedin: Option<String>,
    pub youtube: Option<String>,
    pub tripadvisor: Option<String>,
}

impl SocialLinks {
    /// Present links in a fixed order.
    #[must_use]
    pub fn urls(&self) -> Vec<String> {
        [
            &self.website,
            &self.facebook,
            &self.instagram,
            &self.twitter,
            &self.linkedin,
            &self.youtube,
            &self.tripadvisor,
        ]
        .into_iter()
        .flatten()
        .filter(|url| !url.trim().is_empty())
        .cloned()
        .collect()
    }
}

/// A postal address. All parts optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalAddress {
    pub street: Option<String>,
    pub locality: Option<String>,
    pub region: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

/// Price of a tour per person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub amount: f64,
    /// ISO 4217 code; the site default applies when absent.
    pub currency: Option<String>,
}

/// A single guest review of a tour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(default)]
    pub author: String,
    pub rating: f64,
    pub body: Option<String>,
    pub date_published: Option<String>,
}

// =============================================================================
// CONTENT RECORDS
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tour {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub name: String,
    pub summary: Option<String>,
    pub duration_days: Option<u32>,
    pub price: Option<Price>,
    pub max_group_size: Option<u32>,
    #[serde(default)]
    pub images: Vec<Image>,
    /// Slugs of the destinations this tour visits.
    #[serde(default)]
    pub destinations: Vec<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    pub country: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub best_time_to_visit: Option<String>,
    #[serde(default)]
    pub wildlife: Vec<String>,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub title: String,
    pub excerpt: Option<String>,
    pub author: Option<String>,
    /// ISO 8601 date.
    #[serde(default)]
    pub published: String,
    pub modified: Option<String>,
    pub category: Option<String>,
    pub reading_minutes: Option<u32>,
    pub image: Option<Image>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faq {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
    pub category: Option<String>,
}

/// Kind of gallery media.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    #[default]
    Image,
    Video,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub media: MediaKind,
    #[serde(default)]
    pub content_url: String,
    pub thumbnail_url: Option<String>,
    pub caption: Option<String>,
    pub photographer: Option<String>,
    pub location: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub duration_seconds: Option<u32>,
    pub upload_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    pub bio: Option<String>,
    pub image: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub expertise: Vec<String>,
    pub social: Option<SocialLinks>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OfficeLocation {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub name: String,
    pub address: Option<PostalAddress>,
    pub coordinates: Option<Coordinates>,
    pub telephone: Option<String>,
    pub email: Option<String>,
    /// Opening hours in `Mo-Fr 08:00-17:00` notation.
    #[serde(default)]
    pub opening_hours: Vec<String>,
}

// =============================================================================
// CONTENT ENTITY
// =============================================================================

/// Closed set of content kinds the engine accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentEntity {
    Tour(Tour),
    Destination(Destination),
    BlogPost(BlogPost),
    Faq(Faq),
    GalleryItem(GalleryItem),
    TeamMember(TeamMember),
    OfficeLocation(OfficeLocation),
}

impl ContentEntity {
    /// Provider identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Tour(t) => &t.id,
            Self::Destination(d) => &d.id,
            Self::BlogPost(p) => &p.id,
            Self::Faq(f) => &f.id,
            Self::GalleryItem(g) => &g.id,
            Self::TeamMember(m) => &m.id,
            Self::OfficeLocation(o) => &o.id,
        }
    }

    #[must_use]
    pub fn slug(&self) -> &str {
        match self {
            Self::Tour(t) => &t.slug,
            Self::Destination(d) => &d.slug,
            Self::BlogPost(p) => &p.slug,
            Self::Faq(f) => &f.slug,
            Self::GalleryItem(g) => &g.slug,
            Self::TeamMember(m) => &m.slug,
            Self::OfficeLocation(o) => &o.slug,
        }
    }

    /// Site-relative path of the page that hosts this entity.
    ///
    /// Tours, destinations and posts get their own page; the remaining kinds
    /// live on a shared section page.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Tour(t) => format!("/tours/{}", t.slug.trim()),
            Self::Destination(d) => format!("/destinations/{}", d.slug.trim()),
            Self::BlogPost(p) => format!("/blog/{}", p.slug.trim()),
            Self::Faq(_) => "/faq".to_string(),
            Self::GalleryItem(_) => "/gallery".to_string(),
            Self::TeamMember(_) => "/about".to_string(),
            Self::OfficeLocation(_) => "/contact".to_string(),
        }
    }

    /// Label used in errors and diagnostics, e.g. `tour 'great-migration'`.
    #[must_use]
    pub fn label(&self) -> String {
        let kind = match self {
            Self::Tour(_) => "tour",
            Self::Destination(_) => "destination",
            Self::BlogPost(_) => "blog post",
            Self::Faq(_) => "faq",
            Self::GalleryItem(_) => "gallery item",
            Self::TeamMember(_) => "team member",
            Self::OfficeLocation(_) => "office",
        };
        entity_label(kind, self.slug(), self.id())
    }
}

/// `kind 'slug'`, falling back to the id and then to the bare kind.
pub(crate) fn entity_label(kind: &str, slug: &str, id: &str) -> String {
    if !slug.trim().is_empty() {
        format!("{} '{}'", kind, slug)
    } else if !id.trim().is_empty() {
        format!("{} '{}'", kind, id)
    } else {
        kind.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_parses_with_kind_tag() {
        let json = r#"{"kind":"destination","id":"d1","slug":"northern-serengeti","name":"Northern Serengeti"}"#;
        let entity: ContentEntity = serde_json::from_str(json).expect("parse");
        assert_eq!(entity.path(), "/destinations/northern-serengeti");
        assert_eq!(entity.label(), "destination 'northern-serengeti'");
    }

    #[test]
    fn missing_display_field_parses_as_empty() {
        let json = r#"{"kind":"tour","id":"t9","slug":""}"#;
        let entity: ContentEntity = serde_json::from_str(json).expect("parse");
        match entity {
            ContentEntity::Tour(ref tour) => assert!(tour.name.is_empty()),
            _ => unreachable!("tagged as tour"),
        }
        assert_eq!(entity.label(), "tour 't9'");
    }

    #[test]
    fn social_links_skip_blank_entries() {
        let links = SocialLinks {
            facebook: Some("https://facebook.com/x".to_string()),
            twitter: Some("  ".to_string()),
            youtube: Some("https://youtube.com/x".to_string()),
            ..SocialLinks::default()
        };
        assert_eq!(
            links.urls(),
            vec!["https://facebook.com/x", "https://youtube.com/x"]
        );
    }

    #[test]
    fn coordinates_range_check() {
        assert!(Coordinates { latitude: -2.33, longitude: 34.83 }.is_valid());
        assert!(!Coordinates { latitude: 91.0, longitude: 0.0 }.is_valid());
        assert!(!Coordinates { latitude: f64::NAN, longitude: 0.0 }.is_valid());
    }
}
