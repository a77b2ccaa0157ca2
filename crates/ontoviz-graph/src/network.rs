//! Instance relationship network.
//!
//! One shared triple-collection pass feeds two renderers: a Mermaid
//! diagram-markup document, and a serializable node/edge payload for the
//! interactive vis.js explorer. Both see identical triples in identical
//! order, so switching renderers never changes the graph shape.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use ontoviz_model::{
    index::label_of, local_name, sanitize, Entity, Ontology, PropertyValue,
};

use crate::style::style_bucket;

/// One realized relation between two individuals, all fields IRIs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceTriple {
    pub subject: String,
    pub predicate: String,
    pub object: String,
}

/// Collected instance network: participating individuals plus their triples,
/// both deterministically ordered.
#[derive(Debug, Clone, Default)]
pub struct InstanceNetwork {
    /// IRIs of individuals appearing as either endpoint of a triple, sorted
    /// by local name (display labels are not unique enough to sort on).
    pub nodes: Vec<String>,
    /// Triples sorted by (subject, predicate, object) local name.
    pub triples: Vec<InstanceTriple>,
}

/// Collects every realized `(subject, predicate, object)` triple whose
/// endpoints are both in-namespace individuals. Triples touching literals or
/// out-of-set entities are discarded.
pub fn collect_instance_network(onto: &Ontology) -> InstanceNetwork {
    let mut triples = Vec::new();
    let mut participants: BTreeSet<&str> = BTreeSet::new();

    for prop in onto.ns_object_properties() {
        for (subject, value) in onto.relations_of(prop) {
            let PropertyValue::Individual(object) = value else {
                continue;
            };
            let in_set = |iri: &str| onto.in_namespace(iri) && onto.individuals.contains_key(iri);
            if !in_set(subject) || !in_set(object) {
                continue;
            }
            participants.insert(subject);
            participants.insert(object);
            triples.push(InstanceTriple {
                subject: subject.to_string(),
                predicate: prop.iri.clone(),
                object: object.clone(),
            });
        }
    }

    let mut nodes: Vec<String> = participants.into_iter().map(String::from).collect();
    nodes.sort_by_key(|iri| (local_name(iri), iri.clone()));

    triples.sort_by_key(|t| {
        (
            local_name(&t.subject),
            local_name(&t.predicate),
            local_name(&t.object),
            t.subject.clone(),
            t.object.clone(),
        )
    });

    InstanceNetwork { nodes, triples }
}

/// Renders the instance network as a Mermaid `graph LR` document.
pub fn instance_network_mermaid(onto: &Ontology) -> String {
    let net = collect_instance_network(onto);
    let mut lines = vec![
        "graph LR".to_string(),
        "    %%{init: {\"flowchart\": {\"nodeSpacing\": 50, \"rankSpacing\": 80, \"curve\": \"basis\"}}}%%".to_string(),
        "    classDef instanceNode fill:#ff6b35,stroke:#e55a2b,stroke-width:2px,color:#fff".to_string(),
    ];

    for iri in &net.nodes {
        let ind = &onto.individuals[iri];
        let id = sanitize(&ind.local_name());
        let label = ind.display_label();
        let file = sanitize(&label);
        lines.push(format!("    {id}[\"{label}\"]:::instanceNode"));
        lines.push(format!("    click {id} \"entities/{file}.html\""));
    }

    let mut link_styles = Vec::new();
    for (i, triple) in net.triples.iter().enumerate() {
        let s_id = sanitize(&local_name(&triple.subject));
        let o_id = sanitize(&local_name(&triple.object));
        let p_label = label_of(onto, &triple.predicate);
        lines.push(format!("    {s_id} -- \"{p_label}\" --> {o_id}"));

        let bucket = style_bucket(&local_name(&triple.predicate));
        link_styles.push(format!("    linkStyle {i} {};", bucket.mermaid_stroke()));
    }
    lines.extend(link_styles);

    if net.nodes.is_empty() {
        lines.push("    Empty[\"No connected instances found\"]".to_string());
    }

    lines.join("\n")
}

// ============================================================================
// Interactive (vis.js) payload
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisNetwork {
    pub nodes: Vec<VisNode>,
    pub edges: Vec<VisEdge>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisNode {
    pub id: String,
    pub label: String,
    /// Local name of the individual's first declared type, or `"Default"`.
    pub group: String,
    /// Hover tooltip: `"<label> (<group>)"`.
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisColor {
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisFont {
    pub align: String,
    pub size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisEdge {
    #[serde(rename = "from")]
    pub source: String,
    #[serde(rename = "to")]
    pub target: String,
    pub label: String,
    pub color: VisColor,
    pub width: u32,
    pub dashes: bool,
    /// Always `"to"`: the arrow points at the object.
    pub arrows: String,
    pub font: VisFont,
}

/// Builds the interactive node/edge payload from the shared triple
/// collection. Node de-duplication is by IRI, so two individuals with the
/// same display label still produce two distinct nodes.
pub fn build_vis_network(onto: &Ontology) -> VisNetwork {
    let net = collect_instance_network(onto);

    let nodes = net
        .nodes
        .iter()
        .map(|iri| {
            let ind = &onto.individuals[iri];
            let label = ind.display_label();
            let group = ind
                .types
                .first()
                .map(|t| local_name(t))
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| "Default".to_string());
            VisNode {
                id: sanitize(&ind.local_name()),
                label: label.clone(),
                title: format!("{label} ({group})"),
                group,
            }
        })
        .collect();

    let edges = net
        .triples
        .iter()
        .map(|triple| {
            let style = style_bucket(&local_name(&triple.predicate)).vis_style();
            VisEdge {
                source: sanitize(&local_name(&triple.subject)),
                target: sanitize(&local_name(&triple.object)),
                label: label_of(onto, &triple.predicate),
                color: VisColor {
                    color: style.color.to_string(),
                },
                width: style.width,
                dashes: style.dashes,
                arrows: "to".to_string(),
                font: VisFont {
                    align: "middle".to_string(),
                    size: 10,
                },
            }
        })
        .collect();

    VisNetwork { nodes, edges }
}

/// Serializes the interactive payload to the JSON string embedded in the
/// network page.
pub fn instance_network_visjs(onto: &Ontology) -> Result<String, serde_json::Error> {
    serde_json::to_string(&build_vis_network(onto))
}
