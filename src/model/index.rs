//! Transient indices over a node list.
//!
//! [`NodeListIndex`] materializes the pointer view of a [`NodeList`] for the
//! duration of a query: nodes by id and name, and node-id sets keyed by
//! identifier `(kind, value)` and hash `(algorithm, digest)`. It borrows the
//! list it was built from and is rebuilt on demand; nothing is cached across
//! mutations.
//!
//! Lookups never fail: absent keys yield empty collections.

use crate::model::{HashAlgorithm, Node, NodeList, SoftwareIdentifierType};
use std::collections::{BTreeSet, HashMap};

/// Borrowed index over one [`NodeList`].
#[derive(Debug)]
#[must_use]
pub struct NodeListIndex<'a> {
    /// Node lookup by id.
    by_id: HashMap<&'a str, &'a Node>,
    /// Nodes by exact name, in storage order.
    by_name: HashMap<&'a str, Vec<&'a Node>>,
    /// Node-id sets by identifier kind and value.
    by_identifier: HashMap<(SoftwareIdentifierType, &'a str), BTreeSet<&'a str>>,
    /// Node-id sets by hash algorithm and digest.
    by_hash: HashMap<(HashAlgorithm, &'a str), BTreeSet<&'a str>>,
}

impl<'a> NodeListIndex<'a> {
    /// Build the index with a single scan over the list's nodes.
    pub fn build(list: &'a NodeList) -> Self {
        let mut by_id: HashMap<&str, &Node> = HashMap::with_capacity(list.nodes.len());
        let mut by_name: HashMap<&str, Vec<&Node>> = HashMap::new();
        let mut by_identifier: HashMap<(SoftwareIdentifierType, &str), BTreeSet<&str>> =
            HashMap::new();
        let mut by_hash: HashMap<(HashAlgorithm, &str), BTreeSet<&str>> = HashMap::new();

        for node in list.nodes.values() {
            by_id.insert(node.id.as_str(), node);
            if !node.name.is_empty() {
                by_name.entry(node.name.as_str()).or_default().push(node);
            }
            for (kind, value) in &node.identifiers {
                by_identifier
                    .entry((*kind, value.as_str()))
                    .or_default()
                    .insert(node.id.as_str());
            }
            for (algorithm, digest) in &node.hashes {
                by_hash
                    .entry((*algorithm, digest.as_str()))
                    .or_default()
                    .insert(node.id.as_str());
            }
        }

        Self {
            by_id,
            by_name,
            by_identifier,
            by_hash,
        }
    }

    /// Look up a node by id.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&'a Node> {
        self.by_id.get(id).copied()
    }

    /// Nodes whose name matches exactly, in storage order.
    #[must_use]
    pub fn nodes_named(&self, name: &str) -> &[&'a Node] {
        self.by_name.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Ids of the nodes recording `value` under the identifier `kind`.
    #[must_use]
    pub fn ids_with_identifier(
        &self,
        kind: SoftwareIdentifierType,
        value: &str,
    ) -> BTreeSet<&'a str> {
        self.by_identifier
            .get(&(kind, value))
            .cloned()
            .unwrap_or_default()
    }

    /// Ids of the nodes recording `digest` under `algorithm`.
    #[must_use]
    pub fn ids_with_hash(&self, algorithm: HashAlgorithm, digest: &str) -> BTreeSet<&'a str> {
        self.by_hash
            .get(&(algorithm, digest))
            .cloned()
            .unwrap_or_default()
    }

    /// Ids of the nodes recording the given package URL. Comparison is
    /// byte-exact.
    #[must_use]
    pub fn ids_with_purl(&self, purl: &str) -> BTreeSet<&'a str> {
        self.ids_with_identifier(SoftwareIdentifierType::Purl, purl)
    }

    /// True if any node records any hash.
    #[must_use]
    pub fn has_hashes(&self) -> bool {
        !self.by_hash.is_empty()
    }

    /// True if any node records any identifier.
    #[must_use]
    pub fn has_identifiers(&self) -> bool {
        !self.by_identifier.is_empty()
    }

    /// Number of distinct `(algorithm, digest)` pairs across all nodes.
    #[must_use]
    pub fn hash_entry_count(&self) -> usize {
        self.by_hash.len()
    }

    /// Number of distinct package URL values across all nodes.
    #[must_use]
    pub fn purl_entry_count(&self) -> usize {
        self.by_identifier
            .keys()
            .filter(|(kind, _)| *kind == SoftwareIdentifierType::Purl)
            .count()
    }
}
