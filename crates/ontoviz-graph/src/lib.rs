//! Graph builders for OntoViz.
//!
//! Three builders over one ontology snapshot:
//! - class hierarchy (Mermaid, `hierarchy`)
//! - schema property graph (Mermaid, `property_graph`)
//! - instance relationship network (`network`), with a Mermaid renderer and
//!   an interactive vis.js payload sharing one triple-collection pass
//!
//! All output is deterministic: rendering an unchanged snapshot twice
//! produces byte-identical documents.

pub mod hierarchy;
pub mod network;
pub mod property_graph;
pub mod style;

pub use hierarchy::class_hierarchy_mermaid;
pub use network::{
    build_vis_network, collect_instance_network, instance_network_mermaid,
    instance_network_visjs, InstanceNetwork, InstanceTriple, VisEdge, VisNetwork, VisNode,
};
pub use property_graph::property_graph_mermaid;
pub use style::{style_bucket, EdgeBucket};
