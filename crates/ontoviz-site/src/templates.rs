//! Embedded template registry.
//!
//! Templates ship inside the binary so a generated site never depends on
//! files next to the executable. They are registered into one [`Tera`]
//! instance at startup; any syntax error surfaces immediately, naming the
//! offending template, before a single output file is touched.

use tera::Tera;

use crate::SiteError;

pub const INDEX: &str = "index.html";
pub const ENTITY: &str = "entity.html";
pub const CLASS: &str = "class.html";
pub const PROPERTY: &str = "property.html";
pub const VISUALIZATIONS: &str = "visualizations.html";
pub const NETWORK_MERMAID: &str = "network_mermaid.html";
pub const NETWORK_VISJS: &str = "network_visjs.html";

const TEMPLATES: &[(&str, &str)] = &[
    (INDEX, include_str!("../templates/index.html")),
    (ENTITY, include_str!("../templates/entity.html")),
    (CLASS, include_str!("../templates/class.html")),
    (PROPERTY, include_str!("../templates/property.html")),
    (VISUALIZATIONS, include_str!("../templates/visualizations.html")),
    (NETWORK_MERMAID, include_str!("../templates/network_mermaid.html")),
    (NETWORK_VISJS, include_str!("../templates/network_visjs.html")),
];

/// Embedded stylesheet copied to `<out>/static/style.css`.
pub const STYLESHEET: &str = include_str!("../static/style.css");

/// Registers every embedded template.
pub fn build_registry() -> Result<Tera, SiteError> {
    let mut tera = Tera::default();
    for (name, content) in TEMPLATES {
        tera.add_raw_template(name, content)
            .map_err(|source| SiteError::Template {
                name: (*name).to_string(),
                source,
            })?;
    }
    Ok(tera)
}
