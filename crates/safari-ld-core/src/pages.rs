//! # Page Composition
//!
//! The call sites of the composer: one builder that turns every page kind
//! of the site into a complete document.
//!
//! Every document shares the same frame, built from one [`SiteConfig`]:
//! the Organization node, the page node, and the breadcrumb list. Entity
//! nodes follow. Identities come from the [`RelationResolver`], so a tour
//! emitted on the listing page and on its own page carries the same `@id`.
//!
//! ## Failure Handling
//!
//! - A node missing a required field is skipped and reported as
//!   `SkippedNode`; the rest of the page is still composed
//! - `DuplicateIdentity` and `InvalidState` abort the page and are returned

use crate::aggregate::aggregate_entity;
use crate::compositor::GraphComposer;
use crate::config::SiteConfig;
use crate::primitives::{
    BREADCRUMB_FRAGMENT, FAQ_FRAGMENT, HOME_PATH, MEDIA_FRAGMENT_PREFIX, OFFICE_FRAGMENT_PREFIX,
    ORGANIZATION_FRAGMENT, PERSON_FRAGMENT_PREFIX, PLACE_FRAGMENT, POSTING_FRAGMENT,
    RATING_FRAGMENT, TOUR_FRAGMENT, WEBPAGE_FRAGMENT, WEBSITE_FRAGMENT,
};
use crate::projector::{DecimalText, FieldProjector, FieldValue, project};
use crate::relation::{RelationResolver, match_section, normalize_path};
use crate::types::entity_label;
use crate::{
    BlogPost, Composition, ContentEntity, Coordinates, Destination, Diagnostic, Faq, GalleryItem,
    GraphNode, Image, MediaKind, NodeId, NodeType, OfficeLocation, Review, SchemaError,
    TeamMember, Tour,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

// =============================================================================
// PAGES
// =============================================================================

/// A page of the site together with the content it presents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum Page {
    Home,
    TourDetail {
        tour: Tour,
    },
    TourListing {
        #[serde(default)]
        tours: Vec<Tour>,
    },
    Destination {
        destination: Destination,
    },
    BlogPost {
        post: BlogPost,
    },
    Faq {
        #[serde(default)]
        faqs: Vec<Faq>,
    },
    Gallery {
        #[serde(default)]
        items: Vec<GalleryItem>,
    },
    About {
        #[serde(default)]
        team: Vec<TeamMember>,
    },
    Contact {
        #[serde(default)]
        offices: Vec<OfficeLocation>,
    },
    /// A standalone document for one entity, for embedding outside its page.
    Entity {
        entity: ContentEntity,
    },
}

impl Page {
    /// Site-relative route of the page.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Home => HOME_PATH.to_string(),
            Self::TourDetail { tour } => format!("/tours/{}", tour.slug.trim()),
            Self::TourListing { .. } => "/tours".to_string(),
            Self::Destination { destination } => {
                format!("/destinations/{}", destination.slug.trim())
            }
            Self::BlogPost { post } => format!("/blog/{}", post.slug.trim()),
            Self::Faq { .. } => "/faq".to_string(),
            Self::Gallery { .. } => "/gallery".to_string(),
            Self::About { .. } => "/about".to_string(),
            Self::Contact { .. } => "/contact".to_string(),
            Self::Entity { entity } => entity.path(),
        }
    }
}

/// Validate the configuration and compose one page.
pub fn compose_page(config: &SiteConfig, page: &Page) -> Result<Composition, SchemaError> {
    let config = config.clone().validated()?;
    SchemaBuilder::new(&config).compose(page)
}

// =============================================================================
// BUILDER
// =============================================================================

/// Builds nodes and documents for one site.
///
/// Expects a configuration that went through [`SiteConfig::validated`].
#[derive(Debug, Clone)]
pub struct SchemaBuilder<'a> {
    config: &'a SiteConfig,
    resolver: RelationResolver,
}

impl<'a> SchemaBuilder<'a> {
    #[must_use]
    pub fn new(config: &'a SiteConfig) -> Self {
        Self {
            config,
            resolver: RelationResolver::new(config),
        }
    }

    #[must_use]
    pub fn resolver(&self) -> &RelationResolver {
        &self.resolver
    }

    #[must_use]
    pub fn organization_id(&self) -> NodeId {
        self.resolver.node_id(HOME_PATH, ORGANIZATION_FRAGMENT)
    }

    #[must_use]
    pub fn website_id(&self) -> NodeId {
        self.resolver.node_id(HOME_PATH, WEBSITE_FRAGMENT)
    }

    // -------------------------------------------------------------------------
    // Document assembly
    // -------------------------------------------------------------------------

    /// Compose the document for a page.
    pub fn compose(&self, page: &Page) -> Result<Composition, SchemaError> {
        let mut diagnostics = Vec::new();
        let mut composer = GraphComposer::new();
        let path = normalize_path(&page.path());

        match page {
            Page::Home => {
                composer.add_node(self.organization_node(&[])?)?;
                composer.add_node(self.website_node()?)?;
                let built = self.page_node(
                    NodeType::WebPage,
                    &path,
                    &self.config.site_name,
                    self.config.organization.description.as_deref(),
                );
                if let Some(mut node) = admit_one(built, &mut diagnostics)? {
                    node.reference("about", &self.organization_id());
                    composer.add_node(node)?;
                }
            }
            Page::TourDetail { tour } => {
                let nodes = admit(self.tour_nodes(tour, &mut diagnostics), &mut diagnostics)?;
                let page_node = self.page_node(
                    NodeType::WebPage,
                    &path,
                    &tour.name,
                    tour.summary.as_deref(),
                );
                let page_node = admit_one(page_node, &mut diagnostics)?.map(|mut node| {
                    if let Some(primary) = nodes.first() {
                        node.reference("mainEntity", &primary.id);
                    }
                    node
                });
                self.add_frame(&mut composer, &mut diagnostics, &path, Some(tour.name.as_str()), page_node, &[])?;
                add_all(&mut composer, nodes)?;
            }
            Page::TourListing { tours } => {
                let mut nodes = Vec::new();
                for tour in tours {
                    nodes.extend(admit(self.tour_nodes(tour, &mut diagnostics), &mut diagnostics)?);
                }
                let products = ids_of(&nodes, NodeType::Product);
                let page_node = self
                    .listing_node(&path, &mut diagnostics)?
                    .map(|mut node| {
                        node.reference_all("hasPart", &products);
                        node
                    });
                self.add_frame(&mut composer, &mut diagnostics, &path, None, page_node, &[])?;
                add_all(&mut composer, nodes)?;
            }
            Page::Destination { destination } => {
                let place = admit_one(self.place_node(destination, &mut diagnostics), &mut diagnostics)?;
                let page_node = self.page_node(
                    NodeType::WebPage,
                    &path,
                    &destination.name,
                    destination.description.as_deref(),
                );
                let page_node = admit_one(page_node, &mut diagnostics)?.map(|mut node| {
                    if let Some(place) = &place {
                        node.reference("mainEntity", &place.id);
                    }
                    node
                });
                self.add_frame(&mut composer, &mut diagnostics, &path, None, page_node, &[])?;
                add_all(&mut composer, place)?;
            }
            Page::BlogPost { post } => {
                let posting = admit_one(self.posting_node(post), &mut diagnostics)?;
                let page_node =
                    self.page_node(NodeType::WebPage, &path, &post.title, post.excerpt.as_deref());
                let page_node = admit_one(page_node, &mut diagnostics)?.map(|mut node| {
                    if let Some(posting) = &posting {
                        node.reference("mainEntity", &posting.id);
                    }
                    node
                });
                self.add_frame(&mut composer, &mut diagnostics, &path, Some(post.title.as_str()), page_node, &[])?;
                add_all(&mut composer, posting)?;
            }
            Page::Faq { faqs } => {
                let faq_page = self.faq_page_node(&path, faqs, &mut diagnostics);
                let faq_page = admit_one(faq_page, &mut diagnostics)?;
                self.add_frame(&mut composer, &mut diagnostics, &path, None, faq_page, &[])?;
            }
            Page::Gallery { items } => {
                let mut media = Vec::new();
                for item in items {
                    let built = self.media_node(item, &mut diagnostics);
                    media.extend(admit_one(built, &mut diagnostics)?);
                }
                let parts: Vec<NodeId> = media.iter().map(|node| node.id.clone()).collect();
                let page_node = self
                    .listing_node(&path, &mut diagnostics)?
                    .map(|mut node| {
                        node.reference_all("hasPart", &parts);
                        node
                    });
                self.add_frame(&mut composer, &mut diagnostics, &path, None, page_node, &[])?;
                add_all(&mut composer, media)?;
            }
            Page::About { team } => {
                let mut people = Vec::new();
                for member in team {
                    people.extend(admit_one(self.person_node(member), &mut diagnostics)?);
                }
                let employees: Vec<NodeId> = people.iter().map(|node| node.id.clone()).collect();
                let page_node = self
                    .listing_node(&path, &mut diagnostics)?
                    .map(|mut node| {
                        node.reference("about", &self.organization_id());
                        node
                    });
                self.add_frame(&mut composer, &mut diagnostics, &path, None, page_node, &employees)?;
                add_all(&mut composer, people)?;
            }
            Page::Contact { offices } => {
                let mut agencies = Vec::new();
                for office in offices {
                    let built = self.office_node(office, &mut diagnostics);
                    agencies.extend(admit_one(built, &mut diagnostics)?);
                }
                let section = section_name(&path, &self.config.site_name);
                let page_node = self.page_node(NodeType::ContactPage, &path, section, None);
                let page_node = admit_one(page_node, &mut diagnostics)?.map(|mut node| {
                    node.reference("about", &self.organization_id());
                    node
                });
                self.add_frame(&mut composer, &mut diagnostics, &path, None, page_node, &[])?;
                add_all(&mut composer, agencies)?;
            }
            Page::Entity { entity } => {
                let nodes = admit(self.entity_nodes(entity, &mut diagnostics), &mut diagnostics)?;
                composer.add_node(self.organization_node(&[])?)?;
                add_all(&mut composer, nodes)?;
            }
        }

        Ok(Composition {
            document: composer.finalize()?,
            diagnostics,
        })
    }

    /// Build the primary nodes of any content entity.
    pub fn entity_nodes(
        &self,
        entity: &ContentEntity,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Vec<GraphNode>, SchemaError> {
        match entity {
            ContentEntity::Tour(tour) => self.tour_nodes(tour, diagnostics),
            ContentEntity::Destination(destination) => {
                self.place_node(destination, diagnostics).map(|n| vec![n])
            }
            ContentEntity::BlogPost(post) => self.posting_node(post).map(|n| vec![n]),
            ContentEntity::Faq(faq) => self
                .faq_page_node(&entity.path(), std::slice::from_ref(faq), diagnostics)
                .map(|n| vec![n]),
            ContentEntity::GalleryItem(item) => self.media_node(item, diagnostics).map(|n| vec![n]),
            ContentEntity::TeamMember(member) => self.person_node(member).map(|n| vec![n]),
            ContentEntity::OfficeLocation(office) => {
                self.office_node(office, diagnostics).map(|n| vec![n])
            }
        }
    }

    /// Organization, page node and breadcrumb list, in that order.
    fn add_frame(
        &self,
        composer: &mut GraphComposer,
        diagnostics: &mut Vec<Diagnostic>,
        path: &str,
        crumb_title: Option<&str>,
        page_node: Option<GraphNode>,
        employees: &[NodeId],
    ) -> Result<(), SchemaError> {
        composer.add_node(self.organization_node(employees)?)?;
        if let Some(node) = page_node {
            composer.add_node(node)?;
        }
        if path != HOME_PATH {
            composer.add_node(self.breadcrumb_node(path, crumb_title, diagnostics))?;
        }
        Ok(())
    }

    /// Page node named after the section the path belongs to.
    fn listing_node(
        &self,
        path: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Option<GraphNode>, SchemaError> {
        let name = section_name(path, &self.config.site_name);
        admit_one(self.page_node(NodeType::WebPage, path, name, None), diagnostics)
    }

    // -------------------------------------------------------------------------
    // Site-wide nodes
    // -------------------------------------------------------------------------

    /// The Organization node, optionally listing employees by id.
    pub fn organization_node(&self, employees: &[NodeId]) -> Result<GraphNode, SchemaError> {
        let org = &self.config.organization;
        let contact = FieldProjector::new("contact point")
            .typed("ContactPoint")
            .optional("telephone", org.telephone.as_deref())
            .optional("email", org.email.as_deref())
            .fixed("contactType", "customer service");

        let attributes = FieldProjector::new("organization")
            .required("name", &org.name)
            .optional("legalName", org.legal_name.as_deref())
            .optional("description", org.description.as_deref())
            .required("url", self.resolver.canonical_url(HOME_PATH))
            .optional("logo", org.logo.as_deref())
            .optional("foundingDate", org.founding_year.map(|year| year.to_string()))
            .optional("sameAs", &org.same_as)
            .nested("contactPoint", contact)
            .finish()?;

        let mut node =
            GraphNode::with_attributes(self.organization_id(), NodeType::Organization, attributes)
                .anchored();
        node.reference_all("employee", employees);
        Ok(node)
    }

    /// The WebSite node, published by the organization.
    pub fn website_node(&self) -> Result<GraphNode, SchemaError> {
        let attributes = FieldProjector::new("website")
            .required("name", &self.config.site_name)
            .required("url", self.resolver.canonical_url(HOME_PATH))
            .required("inLanguage", &self.config.language)
            .finish()?;
        let mut node =
            GraphNode::with_attributes(self.website_id(), NodeType::WebSite, attributes).anchored();
        node.reference("publisher", &self.organization_id());
        Ok(node)
    }

    /// A page node (`WebPage` or `ContactPage`) that is part of the website
    /// and, below the root, points at its breadcrumb list.
    pub fn page_node(
        &self,
        node_type: NodeType,
        path: &str,
        name: &str,
        description: Option<&str>,
    ) -> Result<GraphNode, SchemaError> {
        let path = normalize_path(path);
        let attributes = FieldProjector::new(format!("page '{}'", path))
            .required("name", name)
            .required("url", self.resolver.canonical_url(&path))
            .optional("description", description)
            .required("inLanguage", &self.config.language)
            .finish()?;

        let mut node = GraphNode::with_attributes(
            self.resolver.node_id(&path, WEBPAGE_FRAGMENT),
            node_type,
            attributes,
        );
        node.reference("isPartOf", &self.website_id());
        if path != HOME_PATH {
            node.reference("breadcrumb", &self.resolver.node_id(&path, BREADCRUMB_FRAGMENT));
        }
        Ok(node)
    }

    /// The BreadcrumbList for a route. Unmatched routes get the Home-only
    /// list and an `InvalidPath` diagnostic.
    pub fn breadcrumb_node(
        &self,
        path: &str,
        title: Option<&str>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> GraphNode {
        let (chain, unmatched) = self.resolver.trail(path, title);
        diagnostics.extend(unmatched);

        let items = chain
            .iter()
            .map(|crumb| {
                json!({
                    "@type": "ListItem",
                    "position": crumb.position,
                    "name": crumb.name,
                    "item": self.resolver.canonical_url(&crumb.url),
                })
            })
            .collect();

        let mut node = GraphNode::new(
            self.resolver.node_id(path, BREADCRUMB_FRAGMENT),
            NodeType::BreadcrumbList,
        );
        node.attributes
            .insert("itemListElement".to_string(), Value::Array(items));
        node
    }

    // -------------------------------------------------------------------------
    // Entity nodes
    // -------------------------------------------------------------------------

    /// Product node for a tour, followed by its AggregateRating when it has
    /// reviews.
    pub fn tour_nodes(
        &self,
        tour: &Tour,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Vec<GraphNode>, SchemaError> {
        let label = entity_label("tour", &tour.slug, &tour.id);
        require_slug(&label, &tour.slug)?;
        let path = format!("/tours/{}", tour.slug.trim());
        let product_id = self.resolver.node_id(&path, TOUR_FRAGMENT);

        let price = tour.price.as_ref().filter(|price| {
            let usable = price.amount.is_finite() && price.amount >= 0.0;
            if !usable {
                diagnostics.push(Diagnostic::MalformedEntity {
                    entity: label.clone(),
                    detail: format!("price {} ignored", price.amount),
                });
            }
            usable
        });
        let offer = FieldProjector::new("offer")
            .typed("Offer")
            .required("price", price.map(|p| DecimalText(p.amount)))
            .required(
                "priceCurrency",
                price
                    .and_then(|p| p.currency.as_deref())
                    .unwrap_or(self.config.price_currency.as_str()),
            )
            .fixed("availability", "https://schema.org/InStock")
            .required("url", self.resolver.canonical_url(&path));

        let mut properties = Vec::new();
        if let Some(days) = tour.duration_days.filter(|&d| d > 0) {
            properties.push(property_value("Duration", format!("P{}D", days)));
        }
        if let Some(size) = tour.max_group_size.filter(|&s| s > 0) {
            properties.push(property_value("Maximum group size", size));
        }
        for highlight in &tour.highlights {
            properties.push(property_value("Highlight", highlight.as_str()));
        }

        let attributes = FieldProjector::new(label.clone())
            .required("name", &tour.name)
            .optional("description", tour.summary.as_deref())
            .optional("sku", &tour.id)
            .required("url", self.resolver.canonical_url(&path))
            .optional("image", image_urls(&tour.images))
            .nested_list("additionalProperty", properties)
            .nested("offers", offer)
            .nested_list("review", tour.reviews.iter().map(review).collect())
            .finish()?;

        let mut product =
            GraphNode::with_attributes(product_id.clone(), NodeType::Product, attributes).anchored();
        product.reference("brand", &self.organization_id());
        let destinations: Vec<NodeId> = tour
            .destinations
            .iter()
            .map(|slug| slug.trim())
            .filter(|slug| !slug.is_empty())
            .map(|slug| {
                self.resolver
                    .node_id(&format!("/destinations/{}", slug), PLACE_FRAGMENT)
            })
            .collect();
        product.reference_all("isRelatedTo", &destinations);

        let ratings: Vec<f64> = tour.reviews.iter().map(|r| r.rating).collect();
        let (summary, soft) = aggregate_entity(&label, &ratings);
        diagnostics.extend(soft);

        let Some(summary) = summary else {
            return Ok(vec![product]);
        };
        let rating_id = self.resolver.node_id(&path, RATING_FRAGMENT);
        let attributes = FieldProjector::new(label)
            .required("ratingValue", summary.rating_value_text())
            .required("reviewCount", summary.review_count_text())
            .fixed("bestRating", "5")
            .fixed("worstRating", "1")
            .finish()?;
        let mut rating =
            GraphNode::with_attributes(rating_id.clone(), NodeType::AggregateRating, attributes);
        rating.reference("itemReviewed", &product_id);
        product.reference("aggregateRating", &rating_id);

        Ok(vec![product, rating])
    }

    /// Place node for a destination.
    pub fn place_node(
        &self,
        destination: &Destination,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<GraphNode, SchemaError> {
        let label = entity_label("destination", &destination.slug, &destination.id);
        require_slug(&label, &destination.slug)?;
        let path = format!("/destinations/{}", destination.slug.trim());

        let mut properties = Vec::new();
        if let Some(season) = destination.best_time_to_visit.as_deref() {
            properties.push(property_value("Best time to visit", season));
        }
        if !destination.wildlife.is_empty() {
            properties.push(property_value("Wildlife", &destination.wildlife));
        }

        let attributes = FieldProjector::new(label.clone())
            .required("name", &destination.name)
            .optional("description", destination.description.as_deref())
            .required("url", self.resolver.canonical_url(&path))
            .optional("image", image_urls(&destination.images))
            .nested("geo", geo(&label, destination.coordinates, diagnostics))
            .nested(
                "containedInPlace",
                FieldProjector::new("country")
                    .typed("Country")
                    .required("name", destination.country.as_deref()),
            )
            .nested_list("additionalProperty", properties)
            .finish()?;

        Ok(GraphNode::with_attributes(
            self.resolver.node_id(&path, PLACE_FRAGMENT),
            NodeType::Place,
            attributes,
        )
        .anchored())
    }

    /// BlogPosting node. Without a named author the organization is credited.
    pub fn posting_node(&self, post: &BlogPost) -> Result<GraphNode, SchemaError> {
        let label = entity_label("blog post", &post.slug, &post.id);
        require_slug(&label, &post.slug)?;
        let path = format!("/blog/{}", post.slug.trim());
        let author = FieldProjector::new("author")
            .typed("Person")
            .required("name", post.author.as_deref());
        let image = post
            .image
            .as_ref()
            .map(image_object)
            .unwrap_or_else(|| FieldProjector::new("image"));
        let reading_time = post
            .reading_minutes
            .filter(|&m| m > 0)
            .map(|m| format!("PT{}M", m));

        let attributes = FieldProjector::new(label)
            .required("headline", &post.title)
            .optional("description", post.excerpt.as_deref())
            .required("datePublished", &post.published)
            .optional("dateModified", post.modified.as_deref())
            .optional("articleSection", post.category.as_deref())
            .optional("keywords", &post.tags)
            .optional("timeRequired", reading_time)
            .nested("image", image)
            .required("url", self.resolver.canonical_url(&path))
            .required("inLanguage", &self.config.language)
            .nested("author", author)
            .finish()?;

        let mut node = GraphNode::with_attributes(
            self.resolver.node_id(&path, POSTING_FRAGMENT),
            NodeType::BlogPosting,
            attributes,
        )
        .anchored();
        if !node.attributes.contains_key("author") {
            node.reference("author", &self.organization_id());
        }
        node.reference("publisher", &self.organization_id());
        node.reference("mainEntityOfPage", &self.resolver.node_id(&path, WEBPAGE_FRAGMENT));
        Ok(node)
    }

    /// FAQPage node for a set of questions. Incomplete questions are
    /// reported and left out; a page with none left is skipped.
    pub fn faq_page_node(
        &self,
        path: &str,
        faqs: &[Faq],
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<GraphNode, SchemaError> {
        let path = normalize_path(path);
        let mut questions = Vec::with_capacity(faqs.len());
        for faq in faqs {
            let label = entity_label("faq", &faq.slug, &faq.id);
            let answer = FieldProjector::new(label.clone())
                .typed("Answer")
                .required("text", &faq.answer)
                .finish_nested();
            let question = project(
                &label,
                [
                    ("@type", Some(json!("Question"))),
                    ("name", Some(json!(faq.question))),
                    ("acceptedAnswer", answer),
                ],
                [("about", faq.category.as_deref().map(|c| json!(c)))],
            );
            match question {
                Ok(map) => questions.push(Value::Object(map)),
                Err(SchemaError::MissingRequiredField { entity, field }) => {
                    diagnostics.push(Diagnostic::SkippedNode { entity, field });
                }
                Err(e) => return Err(e),
            }
        }

        let section = section_name(&path, &self.config.site_name);
        let attributes = FieldProjector::new(format!("page '{}'", path))
            .required("name", section)
            .required("url", self.resolver.canonical_url(&path))
            .required("inLanguage", &self.config.language)
            .required("mainEntity", Value::Array(questions))
            .finish()?;

        let mut node = GraphNode::with_attributes(
            self.resolver.node_id(&path, FAQ_FRAGMENT),
            NodeType::FaqPage,
            attributes,
        );
        node.reference("isPartOf", &self.website_id());
        node.reference("breadcrumb", &self.resolver.node_id(&path, BREADCRUMB_FRAGMENT));
        Ok(node)
    }

    /// ImageObject or VideoObject node for a gallery item.
    pub fn media_node(
        &self,
        item: &GalleryItem,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<GraphNode, SchemaError> {
        let label = entity_label("gallery item", &item.slug, &item.id);
        require_slug(&label, &item.slug)?;

        let (node_type, duration) = match item.media {
            MediaKind::Image => {
                if item.duration_seconds.is_some() {
                    diagnostics.push(Diagnostic::MalformedEntity {
                        entity: label.clone(),
                        detail: "duration on an image ignored".to_string(),
                    });
                }
                (NodeType::ImageObject, None)
            }
            MediaKind::Video => (
                NodeType::VideoObject,
                item.duration_seconds.filter(|&s| s > 0).map(iso_duration),
            ),
        };

        let attributes = FieldProjector::new(label)
            .required("name", &item.title)
            .required("contentUrl", &item.content_url)
            .optional("thumbnailUrl", item.thumbnail_url.as_deref())
            .optional("caption", item.caption.as_deref())
            .optional("width", item.width)
            .optional("height", item.height)
            .optional("duration", duration)
            .optional("uploadDate", item.upload_date.as_deref())
            .nested(
                "creator",
                FieldProjector::new("creator")
                    .typed("Person")
                    .required("name", item.photographer.as_deref()),
            )
            .nested(
                "contentLocation",
                FieldProjector::new("location")
                    .typed("Place")
                    .required("name", item.location.as_deref()),
            )
            .finish()?;

        let fragment = format!("{}{}", MEDIA_FRAGMENT_PREFIX, item.slug.trim());
        Ok(GraphNode::with_attributes(
            self.resolver.node_id("/gallery", &fragment),
            node_type,
            attributes,
        ))
    }

    /// Person node for a team member.
    pub fn person_node(&self, member: &TeamMember) -> Result<GraphNode, SchemaError> {
        let label = entity_label("team member", &member.slug, &member.id);
        require_slug(&label, &member.slug)?;

        let attributes = FieldProjector::new(label)
            .required("name", &member.name)
            .required("jobTitle", &member.role)
            .optional("description", member.bio.as_deref())
            .optional("image", member.image.as_deref())
            .optional("email", member.email.as_deref())
            .optional("knowsAbout", &member.expertise)
            .optional("sameAs", member.social.as_ref().map(|s| s.urls()))
            .finish()?;

        let fragment = format!("{}{}", PERSON_FRAGMENT_PREFIX, member.slug.trim());
        let mut node = GraphNode::with_attributes(
            self.resolver.node_id("/about", &fragment),
            NodeType::Person,
            attributes,
        );
        node.reference("worksFor", &self.organization_id());
        Ok(node)
    }

    /// TravelAgency node for an office, a branch of the organization.
    pub fn office_node(
        &self,
        office: &OfficeLocation,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<GraphNode, SchemaError> {
        let label = entity_label("office", &office.slug, &office.id);
        require_slug(&label, &office.slug)?;
        let address = office.address.clone().unwrap_or_default();

        let attributes = FieldProjector::new(label.clone())
            .required("name", &office.name)
            .required("url", self.resolver.canonical_url("/contact"))
            .optional("telephone", office.telephone.as_deref())
            .optional("email", office.email.as_deref())
            .optional("image", self.config.organization.logo.as_deref())
            .nested(
                "address",
                FieldProjector::new("address")
                    .typed("PostalAddress")
                    .optional("streetAddress", address.street)
                    .optional("addressLocality", address.locality)
                    .optional("addressRegion", address.region)
                    .optional("postalCode", address.postal_code)
                    .optional("addressCountry", address.country),
            )
            .nested("geo", geo(&label, office.coordinates, diagnostics))
            .optional("openingHours", &office.opening_hours)
            .finish()?;

        let fragment = format!("{}{}", OFFICE_FRAGMENT_PREFIX, office.slug.trim());
        let mut node = GraphNode::with_attributes(
            self.resolver.node_id("/contact", &fragment),
            NodeType::TravelAgency,
            attributes,
        )
        .anchored();
        node.reference("parentOrganization", &self.organization_id());
        Ok(node)
    }
}

// =============================================================================
// HELPERS
// =============================================================================

/// Turn a skipped node into a diagnostic; pass hard errors through.
fn admit(
    built: Result<Vec<GraphNode>, SchemaError>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Vec<GraphNode>, SchemaError> {
    match built {
        Ok(nodes) => Ok(nodes),
        Err(SchemaError::MissingRequiredField { entity, field }) => {
            diagnostics.push(Diagnostic::SkippedNode { entity, field });
            Ok(Vec::new())
        }
        Err(e) => Err(e),
    }
}

fn admit_one(
    built: Result<GraphNode, SchemaError>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Option<GraphNode>, SchemaError> {
    admit(built.map(|node| vec![node]), diagnostics).map(|nodes| nodes.into_iter().next())
}

fn add_all(
    composer: &mut GraphComposer,
    nodes: impl IntoIterator<Item = GraphNode>,
) -> Result<(), SchemaError> {
    nodes.into_iter().try_for_each(|node| composer.add_node(node))
}

fn ids_of(nodes: &[GraphNode], node_type: NodeType) -> Vec<NodeId> {
    nodes
        .iter()
        .filter(|node| node.node_type == node_type)
        .map(|node| node.id.clone())
        .collect()
}

fn require_slug(label: &str, slug: &str) -> Result<(), SchemaError> {
    if slug.trim().is_empty() {
        return Err(SchemaError::MissingRequiredField {
            entity: label.to_string(),
            field: "slug".to_string(),
        });
    }
    Ok(())
}

fn section_name<'s>(path: &str, fallback: &'s str) -> &'s str {
    match_section(path).map(|section| section.name).unwrap_or(fallback)
}

fn image_urls(images: &[Image]) -> Vec<String> {
    images.iter().map(|image| image.url.clone()).collect()
}

fn image_object(image: &Image) -> FieldProjector {
    FieldProjector::new("image")
        .typed("ImageObject")
        .required("url", &image.url)
        .optional("caption", image.caption.as_deref().or(image.alt.as_deref()))
        .optional("width", image.width)
        .optional("height", image.height)
}

fn review(review: &Review) -> FieldProjector {
    let author = FieldProjector::new("author")
        .typed("Person")
        .required("name", &review.author)
        .finish_nested();
    let rating = FieldProjector::new("rating")
        .typed("Rating")
        .required("ratingValue", DecimalText(review.rating))
        .fixed("bestRating", "5")
        .finish_nested();
    FieldProjector::new("review")
        .typed("Review")
        .required("author", author)
        .required("reviewRating", rating)
        .optional("reviewBody", review.body.as_deref())
        .optional("datePublished", review.date_published.as_deref())
}

fn property_value(name: &str, value: impl FieldValue) -> FieldProjector {
    FieldProjector::new("property")
        .typed("PropertyValue")
        .fixed("name", name)
        .required("value", value)
}

/// `GeoCoordinates` from valid coordinates; invalid ones are reported and
/// produce an empty projection, which the parent omits.
fn geo(label: &str, coordinates: Option<Coordinates>, diagnostics: &mut Vec<Diagnostic>) -> FieldProjector {
    let projector = FieldProjector::new("geo").typed("GeoCoordinates");
    match coordinates {
        Some(c) if c.is_valid() => projector
            .required("latitude", DecimalText(c.latitude))
            .required("longitude", DecimalText(c.longitude)),
        Some(c) => {
            diagnostics.push(Diagnostic::MalformedEntity {
                entity: label.to_string(),
                detail: format!("coordinates ({}, {}) out of range; geo omitted", c.latitude, c.longitude),
            });
            projector
        }
        None => projector,
    }
}

/// ISO 8601 duration from seconds, e.g. `PT3M25S`.
fn iso_duration(seconds: u32) -> String {
    let (hours, minutes, seconds) = (seconds / 3600, seconds % 3600 / 60, seconds % 60);
    let mut out = String::from("PT");
    if hours > 0 {
        out.push_str(&format!("{}H", hours));
    }
    if minutes > 0 {
        out.push_str(&format!("{}M", minutes));
    }
    if seconds > 0 || out.len() == 2 {
        out.push_str(&format!("{}S", seconds));
    }
    out
}

// =============================================================================
// TESTS
// =============================================================================
