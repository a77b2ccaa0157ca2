//! Schema-level property graph builder.
//!
//! Class-to-class relationships implied by the schema (never by instance
//! data), from two sources: restriction constraints on classes, and
//! domain/range declarations on object properties. Identical
//! `(subject, object, predicate)` triples from the two sources collapse to
//! one edge.

use std::collections::BTreeSet;

use ontoviz_model::{index::label_of, sanitize, Entity, Ontology};

/// Builds the Mermaid property graph document for an ontology snapshot.
///
/// Only classes participating in at least one edge are emitted as nodes;
/// with zero edges the document carries a single placeholder node so the
/// diagram renderer never sees a header without a body.
pub fn property_graph_mermaid(onto: &Ontology) -> String {
    let mut lines = vec![
        "graph BT".to_string(),
        "    %%{init: {\"flowchart\": {\"nodeSpacing\": 80, \"rankSpacing\": 100}}}%%".to_string(),
        "    classDef classNode fill:#ff6b35,stroke:#e55a2b,stroke-width:2px,color:#fff,font-weight:bold".to_string(),
    ];

    let is_named_class =
        |iri: &str| onto.in_namespace(iri) && onto.classes.contains_key(iri);

    // Source 1: restriction constraints on classes.
    let mut candidates: Vec<(&str, &str, &str)> = Vec::new();
    for class in onto.ns_classes() {
        for restriction in &class.restrictions {
            if is_named_class(&restriction.filler) {
                candidates.push((&class.iri, &restriction.filler, &restriction.property));
            }
        }
    }

    // Source 2: domain x range declarations on object properties.
    for prop in onto.ns_object_properties() {
        for domain in prop.domains.iter().filter(|d| is_named_class(d)) {
            for range in prop.ranges.iter().filter(|r| is_named_class(r)) {
                candidates.push((domain, range, &prop.iri));
            }
        }
    }

    let mut seen: BTreeSet<(&str, &str, &str)> = BTreeSet::new();
    let mut active: BTreeSet<&str> = BTreeSet::new();
    let mut edge_count = 0usize;
    for (subject, object, predicate) in candidates {
        if !seen.insert((subject, object, predicate)) {
            continue;
        }
        let s_id = sanitize(&ontoviz_model::local_name(subject));
        let o_id = sanitize(&ontoviz_model::local_name(object));
        let p_label = label_of(onto, predicate);
        lines.push(format!("    {s_id} -- \"{p_label}\" --> {o_id}"));
        active.insert(subject);
        active.insert(object);
        edge_count += 1;
    }

    // Sorted node emission keeps the document byte-identical across runs.
    for iri in active {
        let class = &onto.classes[iri];
        let id = sanitize(&class.local_name());
        let file = sanitize(&class.display_label());
        lines.push(format!("    {id}[\"{}\"]:::classNode", class.display_label()));
        lines.push(format!("    click {id} \"entities/{file}.html\""));
    }

    if edge_count == 0 {
        lines.push("    NoRelations[\"No properties found\"]:::classNode".to_string());
    }

    lines.join("\n")
}
