//! Derived relation indices.
//!
//! Built once per run from the loaded snapshot and read-only during page
//! assembly. Every in-namespace entity gets an entry in the forward, data
//! and reverse maps even when its relation list is empty, so templates can
//! render "no relations" sections without key probing.

use std::collections::{BTreeMap, BTreeSet};

use crate::{Entity, Ontology, PropertyValue};

/// Forward, reverse and membership indices over one ontology snapshot.
#[derive(Debug, Clone, Default)]
pub struct RelationIndex {
    /// Entity IRI → `(predicate label, object label)` for object properties.
    pub relations: BTreeMap<String, Vec<(String, String)>>,
    /// Entity IRI → `(predicate label, literal)` for data properties.
    pub data_relations: BTreeMap<String, Vec<(String, String)>>,
    /// Entity IRI → `(subject label, predicate label)`: what points at me.
    pub reverse: BTreeMap<String, Vec<(String, String)>>,
    /// Class IRI → labels of its member individuals, instances of
    /// subclasses included.
    pub members: BTreeMap<String, Vec<String>>,
    /// Property IRI → realized `(subject label, object label)` pairs.
    pub pairs: BTreeMap<String, Vec<(String, String)>>,
}

impl RelationIndex {
    pub fn build(onto: &Ontology) -> Self {
        let mut index = Self::default();

        for class in onto.ns_classes() {
            index.seed_entity(&class.iri);
        }
        for prop in onto.ns_properties() {
            index.seed_entity(&prop.iri);
            index.pairs.insert(prop.iri.clone(), Vec::new());
        }
        for ind in onto.ns_individuals() {
            index.seed_entity(&ind.iri);
        }

        // Membership is transitive over the subclass hierarchy: an instance
        // of Cat is also a member of Animal. Walk each class's descendants
        // with a worklist; the visited set tolerates cycles.
        let mut children: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for class in onto.classes.values() {
            for parent in &class.parents {
                children
                    .entry(parent.as_str())
                    .or_default()
                    .push(class.iri.as_str());
            }
        }
        for class in onto.ns_classes() {
            let mut closure: BTreeSet<&str> = BTreeSet::new();
            let mut worklist = vec![class.iri.as_str()];
            while let Some(iri) = worklist.pop() {
                if !closure.insert(iri) {
                    continue;
                }
                if let Some(kids) = children.get(iri) {
                    worklist.extend(kids.iter().copied());
                }
            }
            let members = onto
                .ns_individuals()
                .filter(|i| i.types.iter().any(|t| closure.contains(t.as_str())))
                .map(|i| i.display_label())
                .collect();
            index.members.insert(class.iri.clone(), members);
        }

        for prop in onto.ns_object_properties() {
            let prop_label = prop.display_label();
            for (subject, value) in onto.relations_of(prop) {
                let PropertyValue::Individual(object) = value else {
                    continue;
                };
                let subject_label = label_of(onto, subject);
                let object_label = label_of(onto, object);
                if let Some(pairs) = index.pairs.get_mut(&prop.iri) {
                    pairs.push((subject_label.clone(), object_label.clone()));
                }
                if let Some(rows) = index.relations.get_mut(subject) {
                    rows.push((prop_label.clone(), object_label));
                }
                if let Some(rows) = index.reverse.get_mut(object.as_str()) {
                    rows.push((subject_label, prop_label.clone()));
                }
            }
        }

        for prop in onto.ns_data_properties() {
            let prop_label = prop.display_label();
            for (subject, value) in onto.relations_of(prop) {
                let PropertyValue::Literal(literal) = value else {
                    continue;
                };
                let subject_label = label_of(onto, subject);
                if let Some(pairs) = index.pairs.get_mut(&prop.iri) {
                    pairs.push((subject_label, literal.clone()));
                }
                if let Some(rows) = index.data_relations.get_mut(subject) {
                    rows.push((prop_label.clone(), literal.clone()));
                }
            }
        }

        index
    }

    fn seed_entity(&mut self, iri: &str) {
        self.relations.insert(iri.to_string(), Vec::new());
        self.data_relations.insert(iri.to_string(), Vec::new());
        self.reverse.insert(iri.to_string(), Vec::new());
    }
}

/// Display label for any IRI known to the snapshot, falling back to the IRI
/// local name for external references.
pub fn label_of(onto: &Ontology, iri: &str) -> String {
    if let Some(ind) = onto.individuals.get(iri) {
        return ind.display_label();
    }
    if let Some(class) = onto.classes.get(iri) {
        return class.display_label();
    }
    if let Some(prop) = onto.properties.get(iri) {
        return prop.display_label();
    }
    let name = crate::text::local_name(iri);
    if name.is_empty() {
        iri.to_string()
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_ontology;

    const SAMPLE: &str = r#"
<http://example.org/z> rdf:type owl:Ontology .
<http://example.org/z#Person> rdf:type owl:Class .
<http://example.org/z#likes> rdf:type owl:ObjectProperty .
<http://example.org/z#age> rdf:type owl:DatatypeProperty .
<http://example.org/z#alice> rdf:type <http://example.org/z#Person> .
<http://example.org/z#alice> rdfs:label "Alice" .
<http://example.org/z#bob> rdf:type <http://example.org/z#Person> .
<http://example.org/z#bob> rdfs:label "Bob" .
<http://example.org/z#alice> <http://example.org/z#likes> <http://example.org/z#bob> .
<http://example.org/z#alice> <http://example.org/z#age> "34" .
"#;

    #[test]
    fn forward_reverse_and_pairs() {
        let onto = parse_ontology(SAMPLE).unwrap();
        let index = RelationIndex::build(&onto);

        assert_eq!(
            index.relations["http://example.org/z#alice"],
            vec![("likes".to_string(), "Bob".to_string())]
        );
        assert_eq!(
            index.reverse["http://example.org/z#bob"],
            vec![("Alice".to_string(), "likes".to_string())]
        );
        assert_eq!(
            index.data_relations["http://example.org/z#alice"],
            vec![("age".to_string(), "34".to_string())]
        );
        assert_eq!(
            index.pairs["http://example.org/z#likes"],
            vec![("Alice".to_string(), "Bob".to_string())]
        );
    }

    #[test]
    fn every_entity_has_an_entry_even_when_empty() {
        let onto = parse_ontology(SAMPLE).unwrap();
        let index = RelationIndex::build(&onto);

        // Bob never appears as a subject; the entry still exists.
        assert!(index.relations["http://example.org/z#bob"].is_empty());
        // Classes and properties are seeded too.
        assert!(index.relations.contains_key("http://example.org/z#Person"));
        assert!(index.reverse.contains_key("http://example.org/z#likes"));
    }

    #[test]
    fn class_membership_lists_instance_labels() {
        let onto = parse_ontology(SAMPLE).unwrap();
        let index = RelationIndex::build(&onto);
        assert_eq!(
            index.members["http://example.org/z#Person"],
            vec!["Alice".to_string(), "Bob".to_string()]
        );
    }

    #[test]
    fn membership_includes_subclass_instances() {
        let doc = r#"
<http://example.org/z> rdf:type owl:Ontology .
<http://example.org/z#Animal> rdf:type owl:Class .
<http://example.org/z#Cat> rdf:type owl:Class .
<http://example.org/z#Cat> rdfs:subClassOf <http://example.org/z#Animal> .
<http://example.org/z#felix> rdf:type <http://example.org/z#Cat> .
"#;
        let onto = parse_ontology(doc).unwrap();
        let index = RelationIndex::build(&onto);
        assert_eq!(
            index.members["http://example.org/z#Animal"],
            vec!["felix".to_string()]
        );
        assert_eq!(
            index.members["http://example.org/z#Cat"],
            vec!["felix".to_string()]
        );
    }

    #[test]
    fn cyclic_subclass_links_do_not_hang_membership() {
        let doc = r#"
<http://example.org/z> rdf:type owl:Ontology .
<http://example.org/z#A> rdfs:subClassOf <http://example.org/z#B> .
<http://example.org/z#B> rdfs:subClassOf <http://example.org/z#A> .
<http://example.org/z#x> rdf:type <http://example.org/z#A> .
"#;
        let onto = parse_ontology(doc).unwrap();
        let index = RelationIndex::build(&onto);
        assert_eq!(index.members["http://example.org/z#A"], vec!["x".to_string()]);
        assert_eq!(index.members["http://example.org/z#B"], vec!["x".to_string()]);
    }

    #[test]
    fn external_namespace_entities_are_excluded() {
        let mixed = r#"
<http://example.org/z> rdf:type owl:Ontology .
<http://example.org/z#Person> rdf:type owl:Class .
<http://other.org/ext#Alien> rdf:type owl:Class .
"#;
        let onto = parse_ontology(mixed).unwrap();
        let index = RelationIndex::build(&onto);
        assert!(index.relations.contains_key("http://example.org/z#Person"));
        assert!(!index.relations.contains_key("http://other.org/ext#Alien"));
    }
}
