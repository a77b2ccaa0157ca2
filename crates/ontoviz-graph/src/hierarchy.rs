//! Class hierarchy diagram builder.
//!
//! Walks the in-namespace class set with an explicit worklist and
//! visited-set (no recursion, so deep or even cyclic parent graphs cannot
//! blow the call stack) and emits a Mermaid `graph TD` document. Classes
//! with no qualifying parent hang off an implicit `owl:Thing` root node.

use std::collections::BTreeSet;

use ontoviz_model::{sanitize, Entity, Ontology};

/// Builds the Mermaid class hierarchy document for an ontology snapshot.
///
/// Every in-namespace class appears exactly once as a node, however many
/// children reference it; parents reachable from the class set are emitted
/// even when they carry no instances of their own.
pub fn class_hierarchy_mermaid(onto: &Ontology) -> String {
    let mut lines = vec![
        "graph TD".to_string(),
        "    %%{init: {\"flowchart\": {\"padding\": 20, \"nodeSpacing\": 50, \"rankSpacing\": 50}}}%%".to_string(),
        "    classDef classNode fill:#ff6b35,stroke:#e55a2b,stroke-width:2px,color:#fff".to_string(),
        "    classDef rootNode fill:#f7931e,stroke:#e55a2b,stroke-width:2px,color:#fff".to_string(),
        "    Thing[\"owl:Thing\"]:::rootNode".to_string(),
    ];

    let mut visited: BTreeSet<&str> = BTreeSet::new();
    let mut worklist: Vec<&str> = Vec::new();

    for class in onto.ns_classes() {
        worklist.push(&class.iri);
        while let Some(iri) = worklist.pop() {
            if !visited.insert(iri) {
                continue;
            }
            let Some(class) = onto.classes.get(iri) else {
                continue;
            };

            let id = sanitize(&class.local_name());
            let label = class.display_label();
            let file = sanitize(&label);
            lines.push(format!("    {id}[\"{label}\"]:::classNode"));
            lines.push(format!(
                "    click {id} \"entities/{file}.html\" \"Go to {label}\""
            ));

            let parents: Vec<&str> = class
                .parents
                .iter()
                .filter(|p| onto.in_namespace(p) && onto.classes.contains_key(*p))
                .map(String::as_str)
                .collect();
            if parents.is_empty() {
                lines.push(format!("    Thing --> {id}"));
            } else {
                for parent in parents {
                    let parent_id = sanitize(&ontoviz_model::local_name(parent));
                    lines.push(format!("    {parent_id} --> {id}"));
                    worklist.push(parent);
                }
            }
        }
    }

    lines.join("\n")
}
