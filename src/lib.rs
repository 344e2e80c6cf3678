//! **A graph algebra for working with Software Bills of Materials (SBOMs).**
//!
//! `sbom-graph` provides the canonical in-memory representation behind
//! format-agnostic SBOM tooling: a typed, labeled directed multigraph over
//! software components, together with the operations to normalize, compare,
//! combine, and match graphs produced independently.
//!
//! Format-specific ingesters (SPDX, CycloneDX) and serializers are external
//! collaborators: they construct a [`NodeList`] from whatever evidence they
//! have and hand it to this crate, or consume a canonicalized one.
//!
//! ## Key Features
//!
//! - **One mutable graph model**: [`NodeList`] owns its nodes, edges, and
//!   root elements; nodes reference each other by id only, keeping the graph
//!   copyable and serializable.
//! - **Canonicalization**: [`NodeList::clean_edges`] silently repairs the
//!   graphs producers assemble incrementally: dangling references are
//!   pruned and duplicate edges merged, never reported as errors.
//! - **Set algebra**: in-place [`NodeList::add`] (receiver-wins) and
//!   non-destructive [`NodeList::union`] / [`NodeList::intersect`]
//!   (argument-wins), all returning canonical graphs.
//! - **Evidence-based matching**: [`NodeList::get_matching_node`] resolves a
//!   probe node across hash and identifier evidence, with explicit
//!   ambiguity detection.
//! - **Order-insensitive equality**: storage is ordered for deterministic
//!   serialization, while [`NodeList::equal`] compares graphs as the sets
//!   they denote.
//!
//! ## Getting Started
//!
//! ```
//! use sbom_graph::{Edge, EdgeType, Node, NodeList};
//!
//! let mut sbom = NodeList::new();
//! sbom.add_root_node(Node::new("app").with_name("my-app").with_version("1.0.0"));
//! sbom.add_node(Node::new("libfoo").with_name("libfoo").with_version("0.3.1"));
//! sbom.add_edge(Edge::new(EdgeType::DependsOn, "app", ["libfoo", "missing"]));
//!
//! // Canonicalization drops the reference to the node that was never added.
//! sbom.clean_edges();
//! assert_eq!(sbom.edges[0].to, vec!["libfoo"]);
//! ```
//!
//! ## Combining graphs
//!
//! ```
//! use sbom_graph::{Node, NodeList};
//!
//! let mut scanner_a = NodeList::new();
//! scanner_a.add_node(Node::new("bash").with_name("bash").with_version("4.0"));
//!
//! let mut scanner_b = NodeList::new();
//! scanner_b.add_node(Node::new("bash").with_name("bash").with_version("4.0.1"));
//!
//! // Union applies newer evidence on top of older: the argument's node wins.
//! let merged = scanner_a.union(&scanner_b);
//! assert_eq!(merged.nodes["bash"].version, "4.0.1");
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    // Doc completeness: # Errors / # Panics sections are aspirational
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // Variable names like `old`/`new` or `kind`/`key` are clear in context
    clippy::similar_names
)]

pub mod error;
pub mod model;

// Re-export main types for convenience
pub use error::{Result, SbomGraphError};
pub use model::{
    Edge, EdgeType, HashAlgorithm, Node, NodeList, NodeListIndex, NodeType,
    SoftwareIdentifierType,
};
