//! Ontology snapshot model for OntoViz.
//!
//! A loaded [`Ontology`] is a read-only snapshot of classes, properties and
//! individuals. It is built once per run by the loader and never mutated
//! afterwards; everything downstream (indices, graph builders, page
//! assembly) only reads from it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub mod index;
pub mod loader;
pub mod text;

pub use index::RelationIndex;
pub use loader::{load_ontology, parse_ontology, LoadError};
pub use text::{local_name, sanitize};

/// Fallback display name when the ontology metadata carries no label.
pub const FALLBACK_ONTOLOGY_NAME: &str = "Ontology visualiser";

/// Parsed ontology snapshot.
///
/// Entity maps are keyed by IRI in `BTreeMap`s so every iteration over the
/// snapshot is deterministic across runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ontology {
    /// IRI of the ontology itself (the `owl:Ontology` declaration).
    pub iri: String,
    /// Namespace prefix for in-ontology entities.
    pub base_iri: String,
    /// Optional display label of the ontology.
    pub label: Option<String>,
    pub classes: BTreeMap<String, Class>,
    pub properties: BTreeMap<String, Property>,
    pub individuals: BTreeMap<String, Individual>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Class {
    pub iri: String,
    pub label: Option<String>,
    pub comment: Option<String>,
    /// Named parent classes (`rdfs:subClassOf` targets that are plain IRIs).
    pub parents: Vec<String>,
    /// Local restriction constraints with a named-class filler.
    pub restrictions: Vec<Restriction>,
}

impl Class {
    pub fn new(iri: impl Into<String>) -> Self {
        Self {
            iri: iri.into(),
            label: None,
            comment: None,
            parents: Vec::new(),
            restrictions: Vec::new(),
        }
    }
}

/// Class-level constraint: instances relate via `property` to `filler`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restriction {
    pub property: String,
    pub filler: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyKind {
    Object,
    Data,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
    pub iri: String,
    pub label: Option<String>,
    pub comment: Option<String>,
    pub kind: PropertyKind,
    pub domains: Vec<String>,
    pub ranges: Vec<String>,
}

impl Property {
    pub fn new(iri: impl Into<String>, kind: PropertyKind) -> Self {
        Self {
            iri: iri.into(),
            label: None,
            comment: None,
            kind,
            domains: Vec::new(),
            ranges: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Individual {
    pub iri: String,
    pub label: Option<String>,
    pub comment: Option<String>,
    /// Declared named types, in declaration order.
    pub types: Vec<String>,
    /// Property assertions `(property IRI, value)`, in declaration order.
    pub assertions: Vec<(String, PropertyValue)>,
}

impl Individual {
    pub fn new(iri: impl Into<String>) -> Self {
        Self {
            iri: iri.into(),
            label: None,
            comment: None,
            types: Vec::new(),
            assertions: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyValue {
    /// Reference to another individual by IRI.
    Individual(String),
    /// Literal value (language tags and datatypes already stripped).
    Literal(String),
}

/// Common read access for classes, properties and individuals.
///
/// The display rules mirror the labeling policy used on every page and in
/// every diagram: declared label first, then the IRI local name, then the
/// IRI itself.
pub trait Entity {
    fn iri(&self) -> &str;
    fn label(&self) -> Option<&str>;
    fn comment(&self) -> Option<&str>;

    /// Human-readable label. Non-empty for any well-formed entity.
    fn display_label(&self) -> String {
        if let Some(label) = self.label() {
            if !label.is_empty() {
                return label.to_string();
            }
        }
        let name = text::local_name(self.iri());
        if name.is_empty() {
            self.iri().to_string()
        } else {
            name
        }
    }

    /// First declared comment, or the empty string.
    fn description(&self) -> String {
        self.comment().unwrap_or("").to_string()
    }

    /// Internal short name: the IRI fragment after the last `/` or `#`.
    fn local_name(&self) -> String {
        text::local_name(self.iri())
    }
}

impl Entity for Class {
    fn iri(&self) -> &str {
        &self.iri
    }
    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
    fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }
}

impl Entity for Property {
    fn iri(&self) -> &str {
        &self.iri
    }
    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
    fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }
}

impl Entity for Individual {
    fn iri(&self) -> &str {
        &self.iri
    }
    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
    fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }
}

impl Ontology {
    /// True when `iri` falls under the ontology's namespace prefix.
    ///
    /// Entities from imported/external namespaces are excluded from every
    /// index and page. An ontology without a declared base IRI accepts
    /// everything (the prefix is empty).
    pub fn in_namespace(&self, iri: &str) -> bool {
        iri.starts_with(&self.base_iri)
    }

    /// In-namespace classes, ordered by IRI.
    pub fn ns_classes(&self) -> impl Iterator<Item = &Class> {
        self.classes.values().filter(|c| self.in_namespace(&c.iri))
    }

    /// In-namespace properties of either kind, ordered by IRI.
    pub fn ns_properties(&self) -> impl Iterator<Item = &Property> {
        self.properties
            .values()
            .filter(|p| self.in_namespace(&p.iri))
    }

    /// In-namespace object properties, ordered by IRI.
    pub fn ns_object_properties(&self) -> impl Iterator<Item = &Property> {
        self.ns_properties()
            .filter(|p| p.kind == PropertyKind::Object)
    }

    /// In-namespace data properties, ordered by IRI.
    pub fn ns_data_properties(&self) -> impl Iterator<Item = &Property> {
        self.ns_properties().filter(|p| p.kind == PropertyKind::Data)
    }

    /// In-namespace individuals, ordered by IRI.
    pub fn ns_individuals(&self) -> impl Iterator<Item = &Individual> {
        self.individuals
            .values()
            .filter(|i| self.in_namespace(&i.iri))
    }

    /// Realized relation pairs of `property`: every `(subject IRI, value)`
    /// asserted in the data, ordered by subject IRI then declaration order.
    pub fn relations_of(&self, property: &Property) -> Vec<(&str, &PropertyValue)> {
        let mut pairs = Vec::new();
        for ind in self.individuals.values() {
            for (p, v) in &ind.assertions {
                if p == &property.iri {
                    pairs.push((ind.iri.as_str(), v));
                }
            }
        }
        pairs
    }

    /// Display name of the ontology, falling back to
    /// [`FALLBACK_ONTOLOGY_NAME`] when the metadata has no label.
    pub fn display_name(&self) -> Option<&str> {
        self.label.as_deref().filter(|l| !l.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_label_prefers_declared_label() {
        let mut class = Class::new("http://example.org/onto#Cat");
        assert_eq!(class.display_label(), "Cat");
        class.label = Some("Domestic cat".to_string());
        assert_eq!(class.display_label(), "Domestic cat");
    }

    #[test]
    fn display_label_falls_back_to_iri_without_local_name() {
        let class = Class::new("http://example.org/onto#");
        assert_eq!(class.display_label(), "http://example.org/onto#");
    }

    #[test]
    fn empty_declared_label_is_skipped() {
        let mut ind = Individual::new("http://example.org/onto#felix");
        ind.label = Some(String::new());
        assert_eq!(ind.display_label(), "felix");
    }

    #[test]
    fn namespace_filter_excludes_imports() {
        let onto = Ontology {
            base_iri: "http://example.org/onto#".to_string(),
            ..Ontology::default()
        };
        assert!(onto.in_namespace("http://example.org/onto#Cat"));
        assert!(!onto.in_namespace("http://www.w3.org/2002/07/owl#Thing"));
    }

    #[test]
    fn relations_of_orders_by_subject_iri() {
        let mut onto = Ontology::default();
        let prop = Property::new("p:likes", PropertyKind::Object);
        let mut b = Individual::new("i:b");
        b.assertions.push((
            "p:likes".to_string(),
            PropertyValue::Individual("i:a".to_string()),
        ));
        let mut a = Individual::new("i:a");
        a.assertions.push((
            "p:likes".to_string(),
            PropertyValue::Individual("i:b".to_string()),
        ));
        onto.individuals.insert(b.iri.clone(), b);
        onto.individuals.insert(a.iri.clone(), a);

        let subjects: Vec<&str> = onto.relations_of(&prop).iter().map(|(s, _)| *s).collect();
        assert_eq!(subjects, vec!["i:a", "i:b"]);
    }
}
