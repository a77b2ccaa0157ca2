//! Static-site assembly for OntoViz.
//!
//! Takes one loaded ontology snapshot and writes a self-contained browsable
//! site: an index, one page per in-namespace entity, the schema diagrams
//! and the instance network in the chosen format. All rendering goes
//! through embedded Tera templates; the only runtime inputs are the
//! snapshot and the output directory.

use std::path::PathBuf;

use thiserror::Error;

pub mod pages;
pub mod templates;

pub use pages::generate;

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Error)]
pub enum SiteError {
    /// A template failed to register or render.
    #[error("template `{name}`: {source}")]
    Template {
        name: String,
        #[source]
        source: tera::Error,
    },

    /// An output file or directory could not be written.
    #[error("could not write `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The vis.js network payload could not be serialized.
    #[error("instance network serialization failed: {0}")]
    Network(#[from] serde_json::Error),
}

// ============================================================================
// Configuration
// ============================================================================

/// Output format for the instance network page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NetworkFormat {
    /// Static Mermaid diagram, rendered client-side from text.
    #[default]
    Mermaid,
    /// Interactive vis.js network backed by a JSON payload.
    VisJs,
}

impl NetworkFormat {
    /// Template that renders `network.html` for this format.
    pub fn template(self) -> &'static str {
        match self {
            NetworkFormat::Mermaid => templates::NETWORK_MERMAID,
            NetworkFormat::VisJs => templates::NETWORK_VISJS,
        }
    }
}

/// Everything [`generate`] needs besides the snapshot itself.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Root output directory. Created if missing, files inside overwritten.
    pub output: PathBuf,
    /// Instance network flavor.
    pub network: NetworkFormat,
    /// Title shown on the index page.
    pub site_name: String,
}

/// What a generation run produced, for the caller's summary output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SiteReport {
    pub classes: usize,
    pub properties: usize,
    pub individuals: usize,
    /// Total HTML files written, entity pages included.
    pub pages: usize,
}
