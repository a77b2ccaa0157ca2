//! Page assembly.
//!
//! One [`generate`] call writes the whole site:
//!
//! ```text
//! <out>/index.html
//! <out>/visualizations.html
//! <out>/network.html
//! <out>/entities/<Label>.html      one per in-namespace entity
//! <out>/static/style.css
//! ```
//!
//! Entity filenames come from the sanitized display label, so labels that
//! collide after sanitization collapse to one file and the entity with the
//! greatest IRI wins. Cross-page links use the same sanitization and stay
//! consistent with the diagram click targets.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use ontoviz_graph::{
    class_hierarchy_mermaid, instance_network_mermaid, instance_network_visjs,
    property_graph_mermaid,
};
use ontoviz_model::index::label_of;
use ontoviz_model::{sanitize, Entity, Ontology, RelationIndex};
use serde::Serialize;
use tera::{Context, Tera};

use crate::{templates, NetworkFormat, SiteConfig, SiteError, SiteReport};

#[derive(Serialize)]
struct RelRow {
    predicate: String,
    object: String,
}

#[derive(Serialize)]
struct RevRow {
    subject: String,
    predicate: String,
}

#[derive(Serialize)]
struct PairRow {
    subject: String,
    object: String,
}

#[derive(Serialize)]
struct IndexEntry {
    label: String,
    file: String,
}

/// Renders the full site for `onto` into `config.output`.
pub fn generate(onto: &Ontology, config: &SiteConfig) -> Result<SiteReport, SiteError> {
    let tera = templates::build_registry()?;
    let index = RelationIndex::build(onto);

    let entities_dir = config.output.join("entities");
    let static_dir = config.output.join("static");
    create_dir(&entities_dir)?;
    create_dir(&static_dir)?;
    write_file(&static_dir.join("style.css"), templates::STYLESHEET)?;

    let mut report = SiteReport::default();

    for class in onto.ns_classes() {
        let mut ctx = Context::new();
        insert_header(&mut ctx, class);
        let parents: Vec<String> = class.parents.iter().map(|p| label_of(onto, p)).collect();
        ctx.insert("types", &parents);
        ctx.insert(
            "individuals",
            &index.members.get(&class.iri).cloned().unwrap_or_default(),
        );
        ctx.insert("relations", &relation_rows(&index.relations, &class.iri));
        ctx.insert("reverse_relations", &reverse_rows(&index, &class.iri));
        let html = render(&tera, templates::CLASS, &ctx)?;
        write_file(&entities_dir.join(entity_file(&class.display_label())), &html)?;
        report.classes += 1;
        report.pages += 1;
    }

    for prop in onto.ns_properties() {
        let mut ctx = Context::new();
        insert_header(&mut ctx, prop);
        ctx.insert("individuals", &pair_rows(&index, &prop.iri));
        ctx.insert("relations", &relation_rows(&index.relations, &prop.iri));
        ctx.insert("reverse_relations", &reverse_rows(&index, &prop.iri));
        let html = render(&tera, templates::PROPERTY, &ctx)?;
        write_file(&entities_dir.join(entity_file(&prop.display_label())), &html)?;
        report.properties += 1;
        report.pages += 1;
    }

    for ind in onto.ns_individuals() {
        let mut ctx = Context::new();
        insert_header(&mut ctx, ind);
        let types: Vec<String> = ind.types.iter().map(|t| label_of(onto, t)).collect();
        ctx.insert("types", &types);
        ctx.insert("relations", &relation_rows(&index.relations, &ind.iri));
        ctx.insert(
            "data_relations",
            &relation_rows(&index.data_relations, &ind.iri),
        );
        ctx.insert("reverse_relations", &reverse_rows(&index, &ind.iri));
        let html = render(&tera, templates::ENTITY, &ctx)?;
        write_file(&entities_dir.join(entity_file(&ind.display_label())), &html)?;
        report.individuals += 1;
        report.pages += 1;
    }

    let mut ctx = Context::new();
    ctx.insert("class_hierarchy", &class_hierarchy_mermaid(onto));
    ctx.insert("property_graph", &property_graph_mermaid(onto));
    let html = render(&tera, templates::VISUALIZATIONS, &ctx)?;
    write_file(&config.output.join("visualizations.html"), &html)?;
    report.pages += 1;

    let network_doc = match config.network {
        NetworkFormat::Mermaid => instance_network_mermaid(onto),
        NetworkFormat::VisJs => instance_network_visjs(onto)?,
    };
    let mut ctx = Context::new();
    ctx.insert("instance_network", &network_doc);
    let html = render(&tera, config.network.template(), &ctx)?;
    write_file(&config.output.join("network.html"), &html)?;
    report.pages += 1;

    let mut ctx = Context::new();
    ctx.insert("title", &config.site_name);
    ctx.insert("classes", &entries(onto.ns_classes()));
    ctx.insert("properties", &entries(onto.ns_properties()));
    ctx.insert("individuals", &entries(onto.ns_individuals()));
    let html = render(&tera, templates::INDEX, &ctx)?;
    write_file(&config.output.join("index.html"), &html)?;
    report.pages += 1;

    Ok(report)
}

fn entries<'a, E: Entity + 'a>(items: impl Iterator<Item = &'a E>) -> Vec<IndexEntry> {
    items
        .map(|e| {
            let label = e.display_label();
            IndexEntry {
                file: entity_file(&label),
                label,
            }
        })
        .collect()
}

fn entity_file(label: &str) -> String {
    format!("{}.html", sanitize(label))
}

fn insert_header(ctx: &mut Context, entity: &impl Entity) {
    ctx.insert("label", &entity.display_label());
    ctx.insert("uri", entity.iri());
    ctx.insert("comment", &entity.description());
}

fn relation_rows(map: &BTreeMap<String, Vec<(String, String)>>, iri: &str) -> Vec<RelRow> {
    map.get(iri)
        .into_iter()
        .flatten()
        .map(|(predicate, object)| RelRow {
            predicate: predicate.clone(),
            object: object.clone(),
        })
        .collect()
}

fn reverse_rows(index: &RelationIndex, iri: &str) -> Vec<RevRow> {
    index
        .reverse
        .get(iri)
        .into_iter()
        .flatten()
        .map(|(subject, predicate)| RevRow {
            subject: subject.clone(),
            predicate: predicate.clone(),
        })
        .collect()
}

fn pair_rows(index: &RelationIndex, iri: &str) -> Vec<PairRow> {
    index
        .pairs
        .get(iri)
        .into_iter()
        .flatten()
        .map(|(subject, object)| PairRow {
            subject: subject.clone(),
            object: object.clone(),
        })
        .collect()
}

fn render(tera: &Tera, name: &str, ctx: &Context) -> Result<String, SiteError> {
    tera.render(name, ctx).map_err(|source| SiteError::Template {
        name: name.to_string(),
        source,
    })
}

fn create_dir(path: &Path) -> Result<(), SiteError> {
    fs::create_dir_all(path).map_err(|source| SiteError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, contents: &str) -> Result<(), SiteError> {
    fs::write(path, contents).map_err(|source| SiteError::Io {
        path: path.to_path_buf(),
        source,
    })
}
