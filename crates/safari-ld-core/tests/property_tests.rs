//! # Property-Based Tests
//!
//! Determinism and correctness invariants of the engine, checked with
//! proptest.

use proptest::collection::vec;
use proptest::prelude::*;
use safari_ld_core::{
    ComposedDocument, FieldProjector, GraphComposer, GraphNode, NodeId, NodeType, Page, SchemaError,
    SiteConfig, Tour, aggregate, emit_string, resolve_breadcrumbs,
};

const BASE: &str = "https://example.com";

/// Ratings on the one-decimal grid the site collects, 1.0 through 5.0.
fn rating() -> impl Strategy<Value = f64> {
    (10u32..=50).prop_map(|tenths| f64::from(tenths) / 10.0)
}

fn slug() -> impl Strategy<Value = String> {
    "[a-z]{1,8}(-[a-z]{1,8}){0,3}"
}

proptest! {
    /// Count equals the sample size and the mean stays within [min, max],
    /// widened by half a rounding step: `[1.04, 1.04]` averages to 1.0.
    #[test]
    fn aggregate_bounds(ratings in vec(1.0f64..=5.0, 1..200)) {
        let summary = aggregate(&ratings).expect("non-empty");
        let min = ratings.iter().copied().fold(f64::INFINITY, f64::min);
        let max = ratings.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        prop_assert_eq!(summary.count, ratings.len());
        prop_assert!(summary.value >= min - 0.05 - 1e-9);
        prop_assert!(summary.value <= max + 0.05 + 1e-9);
    }

    /// On the one-decimal grid the site collects, rounding never leaves
    /// [min, max].
    #[test]
    fn aggregate_bounds_on_rating_grid(ratings in vec(rating(), 1..200)) {
        let summary = aggregate(&ratings).expect("non-empty");
        let min = ratings.iter().copied().fold(f64::INFINITY, f64::min);
        let max = ratings.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        prop_assert!(summary.value >= min - 1e-9);
        prop_assert!(summary.value <= max + 1e-9);
    }

    /// Every chain for a known section is numbered 1..=n without gaps.
    #[test]
    fn breadcrumb_positions_are_contiguous(
        section in prop::sample::select(vec!["/tours", "/destinations", "/blog", "/faq", "/gallery", "/about", "/contact"]),
        rest in vec(slug(), 0..3),
        title in prop::option::of("[A-Za-z ]{0,20}"),
    ) {
        let path = if rest.is_empty() {
            section.to_string()
        } else {
            format!("{}/{}", section, rest.join("/"))
        };
        let chain = resolve_breadcrumbs(&path, title.as_deref());

        prop_assert!(chain.len() >= 2);
        for (index, crumb) in chain.iter().enumerate() {
            prop_assert_eq!(crumb.position as usize, index + 1);
        }
        prop_assert_eq!(&chain[0].url, "/");
    }

    /// Unmatched top-level segments always fall back to Home only.
    #[test]
    fn unknown_sections_resolve_to_home(segment in "[a-z]{1,12}", title in "[A-Za-z]{1,10}") {
        prop_assume!(!["tours", "destinations", "blog", "faq", "gallery", "about", "contact"]
            .contains(&segment.as_str()));
        let chain = resolve_breadcrumbs(&format!("/{}/x", segment), Some(title.as_str()));
        prop_assert_eq!(chain.len(), 1);
        prop_assert_eq!(chain[0].position, 1);
    }

    /// Projection without coordinates never yields `geo`, and is repeatable.
    #[test]
    fn projection_is_idempotent_and_has_no_geo(name in "[A-Za-z ]{1,30}", description in prop::option::of("[a-z ]{0,40}")) {
        let run = || {
            FieldProjector::new("destination")
                .required("name", name.as_str())
                .optional("description", description.as_deref())
                .nested(
                    "geo",
                    FieldProjector::new("geo")
                        .typed("GeoCoordinates")
                        .optional("latitude", None::<f64>)
                        .optional("longitude", None::<f64>),
                )
                .finish()
        };
        let first = run();
        let second = run();
        if name.trim().is_empty() {
            let missing = matches!(first, Err(SchemaError::MissingRequiredField { .. }));
            prop_assert!(missing);
        } else {
            let first = first.expect("projected");
            prop_assert!(!first.contains_key("geo"));
            prop_assert_eq!(Some(first), second.ok());
        }
    }

    /// A repeated id is rejected and the document keeps the first node only.
    #[test]
    fn composer_rejects_duplicates(fragments in vec("[a-z]{1,4}", 1..30)) {
        let mut composer = GraphComposer::new();
        let mut accepted = Vec::new();
        for fragment in &fragments {
            let node = GraphNode::new(NodeId::new(BASE, "/", fragment), NodeType::Person);
            match composer.add_node(node) {
                Ok(()) => accepted.push(fragment.clone()),
                Err(SchemaError::DuplicateIdentity(_)) => prop_assert!(accepted.contains(fragment)),
                Err(other) => prop_assert!(false, "unexpected error: {}", other),
            }
        }
        let doc = composer.finalize().expect("finalize");
        prop_assert_eq!(doc.len(), accepted.len());
    }

    /// Emitting the same composition twice gives byte-identical output.
    #[test]
    fn emission_is_deterministic(slugs in vec(slug(), 0..6), ratings in vec(rating(), 0..5)) {
        let config = SiteConfig { base_url: BASE.to_string(), ..SiteConfig::default() };
        let mut seen = std::collections::BTreeSet::new();
        let tours: Vec<Tour> = slugs
            .into_iter()
            .filter(|s| seen.insert(s.clone()))
            .map(|slug| Tour {
                name: slug.replace('-', " "),
                slug,
                reviews: ratings
                    .iter()
                    .map(|&rating| safari_ld_core::Review {
                        author: "Guest".to_string(),
                        rating,
                        body: None,
                        date_published: None,
                    })
                    .collect(),
                ..Tour::default()
            })
            .collect();
        let page = Page::TourListing { tours };

        let first = safari_ld_core::compose_page(&config, &page).expect("compose");
        let second = safari_ld_core::compose_page(&config, &page).expect("compose");
        prop_assert_eq!(
            emit_string(&first.document, true).expect("emit"),
            emit_string(&second.document, true).expect("emit")
        );
    }
}

#[test]
fn empty_document_emits_empty_node_list() {
    let doc: ComposedDocument = GraphComposer::new().finalize().expect("finalize");
    let text = emit_string(&doc, false).expect("emit");
    assert_eq!(text, r#"{"@context":"https://schema.org","@graph":[]}"#);
}
