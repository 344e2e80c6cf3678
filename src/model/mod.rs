//! The canonical SBOM graph model.
//!
//! A [`NodeList`] is the mutable representation every producer targets and
//! every consumer reads: nodes keyed by id, typed hyperedges, and root
//! element designations. The algebra over it (canonicalization, add, union,
//! intersection, matching) lives on the container itself; transient query
//! indices live in [`NodeListIndex`].

mod edge;
mod index;
mod matching;
mod node;
mod nodelist;

pub use edge::*;
pub use index::*;
pub use node::*;
pub use nodelist::*;
