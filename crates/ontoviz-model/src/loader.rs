//! Line-oriented ontology loader.
//!
//! Parses a Turtle-subset / N-Triples-style serialization into an
//! [`Ontology`] snapshot: one `<subject> <predicate> <object> .` statement
//! per line, `#` comments, prefixed keywords (`rdf:`, `rdfs:`, `owl:`) and
//! inline `[ owl:onProperty <p> ; owl:someValuesFrom <c> ]` restriction
//! objects on `rdfs:subClassOf`.
//!
//! Loading happens in two passes so statement order never matters: the
//! first pass registers entity kinds from `rdf:type` declarations, the
//! second fills in labels, hierarchy, schema and assertions.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::{Class, Individual, Ontology, Property, PropertyKind, PropertyValue, Restriction};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("could not read `{path}`: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },
}

impl LoadError {
    fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}

/// Loads an ontology snapshot from a file.
pub fn load_ontology(path: &Path) -> Result<Ontology, LoadError> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_ontology(&content)
}

/// Parses an ontology snapshot from serialized text.
pub fn parse_ontology(content: &str) -> Result<Ontology, LoadError> {
    let statements = tokenize(content)?;
    let mut onto = Ontology::default();

    // Pass 1: entity kinds.
    for stmt in &statements {
        let Object::Iri(object) = &stmt.object else {
            // Restriction objects still mark the subject as a class.
            if stmt.predicate == "rdfs:subClassOf" {
                ensure_class(&mut onto.classes, &stmt.subject);
            }
            continue;
        };
        match stmt.predicate.as_str() {
            "rdf:type" | "a" => match object.as_str() {
                "owl:Ontology" => {
                    onto.iri = stmt.subject.clone();
                    onto.base_iri = base_iri_of(&stmt.subject);
                }
                "owl:Class" => {
                    ensure_class(&mut onto.classes, &stmt.subject);
                }
                "owl:ObjectProperty" => {
                    ensure_property(&mut onto.properties, &stmt.subject, PropertyKind::Object);
                }
                "owl:DatatypeProperty" => {
                    ensure_property(&mut onto.properties, &stmt.subject, PropertyKind::Data);
                }
                "owl:NamedIndividual" => {
                    ensure_individual(&mut onto.individuals, &stmt.subject);
                }
                class_iri => {
                    // Typed individual; the type itself becomes a class.
                    ensure_class(&mut onto.classes, class_iri);
                    let ind = ensure_individual(&mut onto.individuals, &stmt.subject);
                    if !ind.types.contains(&class_iri.to_string()) {
                        ind.types.push(class_iri.to_string());
                    }
                }
            },
            "rdfs:subClassOf" => {
                ensure_class(&mut onto.classes, &stmt.subject);
                ensure_class(&mut onto.classes, object);
            }
            _ => {}
        }
    }

    // Pass 2: labels, hierarchy, schema, assertions.
    for stmt in &statements {
        match stmt.predicate.as_str() {
            "rdf:type" | "a" => {}
            "rdfs:subClassOf" => {
                // Subjects were registered as classes in pass 1.
                let Some(class) = onto.classes.get_mut(&stmt.subject) else {
                    continue;
                };
                match &stmt.object {
                    Object::Iri(parent) => class.parents.push(parent.clone()),
                    Object::Restriction { property, filler } => {
                        class.restrictions.push(Restriction {
                            property: property.clone(),
                            filler: filler.clone(),
                        });
                    }
                    Object::Literal(_) => {
                        return Err(LoadError::parse(
                            stmt.line,
                            "rdfs:subClassOf expects a class or restriction object",
                        ));
                    }
                }
            }
            "rdfs:domain" => {
                if let (Some(prop), Object::Iri(class)) =
                    (onto.properties.get_mut(&stmt.subject), &stmt.object)
                {
                    prop.domains.push(class.clone());
                }
            }
            "rdfs:range" => {
                if let (Some(prop), Object::Iri(class)) =
                    (onto.properties.get_mut(&stmt.subject), &stmt.object)
                {
                    prop.ranges.push(class.clone());
                }
            }
            "rdfs:label" => {
                let label = stmt.object.as_text();
                if stmt.subject == onto.iri {
                    set_first(&mut onto.label, label);
                } else if let Some(class) = onto.classes.get_mut(&stmt.subject) {
                    set_first(&mut class.label, label);
                } else if let Some(prop) = onto.properties.get_mut(&stmt.subject) {
                    set_first(&mut prop.label, label);
                } else if let Some(ind) = onto.individuals.get_mut(&stmt.subject) {
                    set_first(&mut ind.label, label);
                }
            }
            "rdfs:comment" => {
                let comment = stmt.object.as_text();
                if let Some(class) = onto.classes.get_mut(&stmt.subject) {
                    set_first(&mut class.comment, comment);
                } else if let Some(prop) = onto.properties.get_mut(&stmt.subject) {
                    set_first(&mut prop.comment, comment);
                } else if let Some(ind) = onto.individuals.get_mut(&stmt.subject) {
                    set_first(&mut ind.comment, comment);
                }
            }
            _ => {
                // Property assertion on a known individual.
                if let Some(ind) = onto.individuals.get_mut(&stmt.subject) {
                    let value = match &stmt.object {
                        Object::Iri(iri) => PropertyValue::Individual(iri.clone()),
                        Object::Literal(text) => PropertyValue::Literal(text.clone()),
                        Object::Restriction { .. } => continue,
                    };
                    ind.assertions.push((stmt.predicate.clone(), value));
                }
            }
        }
    }

    Ok(onto)
}

/// The first declared label/comment wins; repeats are ignored.
fn set_first(slot: &mut Option<String>, value: String) {
    if slot.is_none() {
        *slot = Some(value);
    }
}

fn base_iri_of(iri: &str) -> String {
    if iri.ends_with('#') || iri.ends_with('/') {
        iri.to_string()
    } else {
        format!("{iri}#")
    }
}

fn ensure_class<'a>(classes: &'a mut BTreeMap<String, Class>, iri: &str) -> &'a mut Class {
    classes
        .entry(iri.to_string())
        .or_insert_with(|| Class::new(iri))
}

fn ensure_property<'a>(
    properties: &'a mut BTreeMap<String, Property>,
    iri: &str,
    kind: PropertyKind,
) -> &'a mut Property {
    properties
        .entry(iri.to_string())
        .or_insert_with(|| Property::new(iri, kind))
}

fn ensure_individual<'a>(
    individuals: &'a mut BTreeMap<String, Individual>,
    iri: &str,
) -> &'a mut Individual {
    individuals
        .entry(iri.to_string())
        .or_insert_with(|| Individual::new(iri))
}

struct Statement {
    line: usize,
    subject: String,
    predicate: String,
    object: Object,
}

enum Object {
    Iri(String),
    Literal(String),
    Restriction { property: String, filler: String },
}

impl Object {
    fn as_text(&self) -> String {
        match self {
            Object::Iri(iri) => iri.clone(),
            Object::Literal(text) => text.clone(),
            Object::Restriction { .. } => String::new(),
        }
    }
}

fn tokenize(content: &str) -> Result<Vec<Statement>, LoadError> {
    let mut statements = Vec::new();
    for (idx, raw) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some(body) = line.strip_suffix('.') else {
            return Err(LoadError::parse(line_no, "statement must end with `.`"));
        };
        let body = body.trim_end();

        // Runs of whitespace between tokens are fine; only the object may
        // itself contain spaces.
        let malformed =
            || LoadError::parse(line_no, "expected `<subject> <predicate> <object> .`");
        let (subject, rest) = split_token(body).ok_or_else(malformed)?;
        let (predicate, rest) = split_token(rest).ok_or_else(malformed)?;
        let object_text = rest.trim();
        if object_text.is_empty() {
            return Err(malformed());
        }

        statements.push(Statement {
            line: line_no,
            subject: extract_iri(subject),
            predicate: extract_iri(predicate),
            object: parse_object(object_text, line_no)?,
        });
    }
    Ok(statements)
}

/// Splits off the next whitespace-delimited token, returning it and the
/// unconsumed remainder. `None` when nothing but whitespace is left.
fn split_token(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    match s.find(char::is_whitespace) {
        Some(i) => Some((&s[..i], &s[i..])),
        None => Some((s, "")),
    }
}

fn parse_object(text: &str, line: usize) -> Result<Object, LoadError> {
    if let Some(rest) = text.strip_prefix('"') {
        let Some(end) = rest.find('"') else {
            return Err(LoadError::parse(line, "unterminated string literal"));
        };
        return Ok(Object::Literal(rest[..end].to_string()));
    }
    if let Some(inner) = text.strip_prefix('[') {
        let Some(inner) = inner.strip_suffix(']') else {
            return Err(LoadError::parse(line, "unterminated restriction `[ ... ]`"));
        };
        return parse_restriction(inner, line);
    }
    Ok(Object::Iri(extract_iri(text)))
}

fn parse_restriction(inner: &str, line: usize) -> Result<Object, LoadError> {
    let mut property = None;
    let mut filler = None;
    for part in inner.split(';') {
        let mut tokens = part.split_whitespace();
        let (Some(key), Some(value)) = (tokens.next(), tokens.next()) else {
            continue;
        };
        match key {
            "owl:onProperty" => property = Some(extract_iri(value)),
            "owl:someValuesFrom" | "owl:allValuesFrom" => filler = Some(extract_iri(value)),
            other => {
                return Err(LoadError::parse(
                    line,
                    format!("unsupported restriction member `{other}`"),
                ));
            }
        }
    }
    match (property, filler) {
        (Some(property), Some(filler)) => Ok(Object::Restriction { property, filler }),
        _ => Err(LoadError::parse(
            line,
            "restriction needs `owl:onProperty` and `owl:someValuesFrom`/`owl:allValuesFrom`",
        )),
    }
}

fn extract_iri(s: &str) -> String {
    s.trim_start_matches('<').trim_end_matches('>').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Entity;

    const SAMPLE: &str = r#"
# Pet ontology sample
<http://example.org/pets> rdf:type owl:Ontology .
<http://example.org/pets> rdfs:label "Pet ontology" .

<http://example.org/pets#Animal> rdf:type owl:Class .
<http://example.org/pets#Cat> rdf:type owl:Class .
<http://example.org/pets#Cat> rdfs:subClassOf <http://example.org/pets#Animal> .
<http://example.org/pets#Cat> rdfs:label "Cat" .
<http://example.org/pets#Cat> rdfs:comment "A small domesticated felid" .
<http://example.org/pets#Cat> rdfs:subClassOf [ owl:onProperty <http://example.org/pets#eats> ; owl:someValuesFrom <http://example.org/pets#Food> ] .
<http://example.org/pets#Food> rdf:type owl:Class .

<http://example.org/pets#eats> rdf:type owl:ObjectProperty .
<http://example.org/pets#eats> rdfs:domain <http://example.org/pets#Animal> .
<http://example.org/pets#eats> rdfs:range <http://example.org/pets#Food> .
<http://example.org/pets#age> rdf:type owl:DatatypeProperty .

<http://example.org/pets#felix> rdf:type <http://example.org/pets#Cat> .
<http://example.org/pets#felix> rdfs:label "Felix" .
<http://example.org/pets#whiskas> rdf:type <http://example.org/pets#Food> .
<http://example.org/pets#felix> <http://example.org/pets#eats> <http://example.org/pets#whiskas> .
<http://example.org/pets#felix> <http://example.org/pets#age> "7" .
"#;

    #[test]
    fn parses_entities_and_metadata() {
        let onto = parse_ontology(SAMPLE).unwrap();
        assert_eq!(onto.base_iri, "http://example.org/pets#");
        assert_eq!(onto.label.as_deref(), Some("Pet ontology"));
        assert_eq!(onto.classes.len(), 3);
        assert_eq!(onto.properties.len(), 2);
        assert_eq!(onto.individuals.len(), 2);

        let cat = &onto.classes["http://example.org/pets#Cat"];
        assert_eq!(cat.display_label(), "Cat");
        assert_eq!(cat.description(), "A small domesticated felid");
        assert_eq!(cat.parents, vec!["http://example.org/pets#Animal"]);
        assert_eq!(
            cat.restrictions,
            vec![Restriction {
                property: "http://example.org/pets#eats".to_string(),
                filler: "http://example.org/pets#Food".to_string(),
            }]
        );
    }

    #[test]
    fn assertion_order_is_independent_of_declaration_order() {
        // Assertion line appears before the individual is typed.
        let reordered = r#"
<http://example.org/x> rdf:type owl:Ontology .
<http://example.org/x#likes> rdf:type owl:ObjectProperty .
<http://example.org/x#a> <http://example.org/x#likes> <http://example.org/x#b> .
<http://example.org/x#a> rdf:type owl:NamedIndividual .
<http://example.org/x#b> rdf:type owl:NamedIndividual .
"#;
        // Two-pass loading: pass 1 registers `a` before pass 2 sees the
        // assertion, so the statement above still lands.
        let onto = parse_ontology(reordered).unwrap();
        let a = &onto.individuals["http://example.org/x#a"];
        assert_eq!(a.assertions.len(), 1);
    }

    #[test]
    fn literal_suffixes_are_stripped() {
        let content = r#"
<http://example.org/x#n> rdf:type owl:NamedIndividual .
<http://example.org/x#n> rdfs:label "Nala"@en .
"#;
        let onto = parse_ontology(content).unwrap();
        assert_eq!(
            onto.individuals["http://example.org/x#n"].label.as_deref(),
            Some("Nala")
        );
    }

    #[test]
    fn first_declared_label_and_comment_win() {
        let content = r#"
<http://example.org/x> rdf:type owl:Ontology .
<http://example.org/x> rdfs:label "First title" .
<http://example.org/x> rdfs:label "Second title" .
<http://example.org/x#C> rdf:type owl:Class .
<http://example.org/x#C> rdfs:label "First" .
<http://example.org/x#C> rdfs:label "Second" .
<http://example.org/x#C> rdfs:comment "Original note" .
<http://example.org/x#C> rdfs:comment "Revised note" .
"#;
        let onto = parse_ontology(content).unwrap();
        assert_eq!(onto.label.as_deref(), Some("First title"));
        let class = &onto.classes["http://example.org/x#C"];
        assert_eq!(class.label.as_deref(), Some("First"));
        assert_eq!(class.comment.as_deref(), Some("Original note"));
    }

    #[test]
    fn whitespace_runs_between_tokens_are_accepted() {
        let content = "<http://example.org/x#a>  rdf:type   owl:NamedIndividual .\n";
        let onto = parse_ontology(content).unwrap();
        assert!(onto.individuals.contains_key("http://example.org/x#a"));

        // A statement with no object is still rejected.
        assert!(parse_ontology("<a> <b> .\n").is_err());
    }

    #[test]
    fn malformed_statement_reports_line() {
        let err = parse_ontology("<a> <b>\n").unwrap_err();
        match err {
            LoadError::Parse { line, .. } => assert_eq!(line, 1),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn missing_ontology_declaration_accepts_everything() {
        let onto = parse_ontology("<http://example.org/x#C> rdf:type owl:Class .\n").unwrap();
        assert!(onto.base_iri.is_empty());
        assert!(onto.in_namespace("http://example.org/x#C"));
    }
}
