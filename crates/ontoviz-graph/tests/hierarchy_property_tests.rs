//! Property tests for the hierarchy builder: however the parent graph is
//! shaped (diamonds, cycles, self-loops), every class is emitted exactly
//! once and orphans root under the implicit Thing node exactly once.

use ontoviz_graph::class_hierarchy_mermaid;
use ontoviz_model::{Class, Ontology};
use proptest::prelude::*;

const BASE: &str = "http://example.org/prop#";

/// Builds a snapshot of `n` classes `C0..Cn` with the given parent edges
/// (child index, parent index).
fn ontology_with_edges(n: usize, edges: &[(usize, usize)]) -> Ontology {
    let mut onto = Ontology {
        base_iri: BASE.to_string(),
        ..Ontology::default()
    };
    for i in 0..n {
        let iri = format!("{BASE}C{i}");
        onto.classes.insert(iri.clone(), Class::new(iri));
    }
    for &(child, parent) in edges {
        let child_iri = format!("{BASE}C{child}");
        let parent_iri = format!("{BASE}C{parent}");
        onto.classes
            .get_mut(&child_iri)
            .expect("child registered")
            .parents
            .push(parent_iri);
    }
    onto
}

proptest! {
    #[test]
    fn every_class_is_emitted_exactly_once(
        n in 1usize..12,
        raw_edges in prop::collection::vec((0usize..12, 0usize..12), 0..30),
    ) {
        let edges: Vec<(usize, usize)> = raw_edges
            .into_iter()
            .map(|(c, p)| (c % n, p % n))
            .collect();
        let onto = ontology_with_edges(n, &edges);
        let doc = class_hierarchy_mermaid(&onto);

        for i in 0..n {
            let node_line = format!("C{i}[\"C{i}\"]:::classNode");
            prop_assert_eq!(
                doc.matches(&node_line).count(),
                1,
                "C{} not emitted exactly once:\n{}", i, &doc
            );
        }
    }

    #[test]
    fn orphans_get_exactly_one_thing_edge(
        n in 1usize..12,
        raw_edges in prop::collection::vec((0usize..12, 0usize..12), 0..30),
    ) {
        let edges: Vec<(usize, usize)> = raw_edges
            .into_iter()
            .map(|(c, p)| (c % n, p % n))
            .collect();
        let onto = ontology_with_edges(n, &edges);
        let doc = class_hierarchy_mermaid(&onto);

        for i in 0..n {
            let has_parent = edges.iter().any(|&(c, _)| c == i);
            let thing_edge = format!("Thing --> C{i}\n");
            let expected = usize::from(!has_parent);
            prop_assert_eq!(
                format!("{doc}\n").matches(&thing_edge).count(),
                expected,
                "wrong Thing edge count for C{}:\n{}", i, &doc
            );
        }
    }
}
