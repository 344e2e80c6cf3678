//! The SBOM graph container and its algebra.
//!
//! [`NodeList`] owns the nodes, edges, and root designations of one SBOM
//! graph. Producers assemble it incrementally (or assign the fields
//! directly) and call [`NodeList::clean_edges`] to restore the structural
//! invariants; the set operations canonicalize their results themselves.
//!
//! The combination operations are deliberately asymmetric:
//!
//! - [`NodeList::add`] mutates the receiver and keeps the receiver's node
//!   when both sides carry the same id (receiver-wins).
//! - [`NodeList::union`] and [`NodeList::intersect`] build fresh lists and
//!   keep the argument's node on a shared id (argument-wins), modeling
//!   "newer evidence applied on top of older".

use crate::model::{Edge, EdgeType, Node, SoftwareIdentifierType};
use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use tracing::debug;

/// A mutable SBOM graph: nodes keyed by id, typed edges, and the ids of the
/// document-level root elements.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeList {
    /// Nodes keyed by their id, in insertion order.
    #[serde(default)]
    pub nodes: IndexMap<String, Node>,
    /// Edges, at most one per `(edge_type, from)` once canonicalized.
    #[serde(default)]
    pub edges: Vec<Edge>,
    /// Ids of the nodes the document describes at top level.
    #[serde(default)]
    pub root_elements: Vec<String>,
}

impl NodeList {
    /// Create an empty node list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// True if the list holds no nodes and no edges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Insert a node, keyed by its id.
    ///
    /// An existing node under the same id is replaced and keeps its
    /// position.
    pub fn add_node(&mut self, node: Node) {
        let id = node.id.clone();
        if self.nodes.insert(id.clone(), node).is_some() {
            debug!(%id, "replaced node on id collision");
        }
    }

    /// Append an edge.
    ///
    /// Duplicate `(edge_type, from)` keys are resolved by the next
    /// canonicalization.
    pub fn add_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    /// Insert a node and register it as a root element.
    pub fn add_root_node(&mut self, node: Node) {
        let id = node.id.clone();
        self.add_node(node);
        if !self.root_elements.contains(&id) {
            self.root_elements.push(id);
        }
    }

    /// Relate the listed node ids to `source_id` with an edge of the given
    /// type, merging into an existing edge of the same key.
    ///
    /// A `source_id` that does not resolve to a node is not an error: the
    /// resulting dangling edge is dropped by the next canonicalization.
    pub fn relate_nodes_at_id<I, S>(&mut self, source_id: &str, edge_type: EdgeType, node_ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let Some(existing) = self
            .edges
            .iter_mut()
            .find(|e| e.edge_type == edge_type && e.from == source_id)
        {
            for id in node_ids {
                existing.point_to(id);
            }
        } else {
            self.edges.push(Edge::new(edge_type, source_id, node_ids));
        }
    }

    /// Restore the edge invariants.
    ///
    /// Drops edges whose source does not resolve to a node, prunes
    /// destination ids that do not resolve (dropping edges left without
    /// destinations), and merges edges sharing `(edge_type, from)` into one
    /// edge whose destination list is the union in first-seen order. The
    /// surviving edges keep the order in which their keys first appeared.
    ///
    /// Idempotent; every operation that may have invalidated the invariants
    /// calls this before returning.
    pub fn clean_edges(&mut self) {
        let mut merged: IndexMap<(EdgeType, String), Edge> = IndexMap::new();
        let mut dropped = 0usize;

        for edge in std::mem::take(&mut self.edges) {
            if !self.nodes.contains_key(&edge.from) {
                dropped += 1;
                continue;
            }

            let mut to: Vec<String> = Vec::with_capacity(edge.to.len());
            for dest in edge.to {
                if self.nodes.contains_key(&dest) && !to.contains(&dest) {
                    to.push(dest);
                }
            }
            if to.is_empty() {
                dropped += 1;
                continue;
            }

            match merged.entry((edge.edge_type, edge.from.clone())) {
                Entry::Occupied(mut entry) => {
                    for dest in to {
                        entry.get_mut().point_to(dest);
                    }
                }
                Entry::Vacant(entry) => {
                    entry.insert(Edge {
                        edge_type: edge.edge_type,
                        from: edge.from,
                        to,
                    });
                }
            }
        }

        if dropped > 0 {
            debug!(dropped, "dropped dangling edges during canonicalization");
        }
        self.edges = merged.into_values().collect();
    }

    /// Merge `other` into this list in place.
    ///
    /// Nodes already present in the receiver are kept untouched
    /// (receiver-wins); new nodes are appended. Edges are appended or, when
    /// the `(edge_type, from)` key already exists, merged by destination
    /// union. Root elements are unchanged. The result is canonicalized.
    pub fn add(&mut self, other: &NodeList) {
        for node in other.nodes.values() {
            if !self.nodes.contains_key(&node.id) {
                self.nodes.insert(node.id.clone(), node.clone());
            }
        }
        for edge in &other.edges {
            self.relate_nodes_at_id(&edge.from, edge.edge_type, edge.to.iter().cloned());
        }
        self.clean_edges();
    }

    /// Return a new list combining this one with `other`.
    ///
    /// Nodes from both sides are present; when the same id appears on both,
    /// `other`'s node replaces this list's (argument-wins) while keeping its
    /// original position. Edges sharing `(edge_type, from)` are merged by
    /// destination union; root elements are the union of both lists in
    /// first-appearance order. Neither input is modified.
    #[must_use]
    pub fn union(&self, other: &NodeList) -> NodeList {
        let mut result = self.clone();
        for node in other.nodes.values() {
            result.nodes.insert(node.id.clone(), node.clone());
        }
        result.edges.extend(other.edges.iter().cloned());
        for root in &other.root_elements {
            if !result.root_elements.contains(root) {
                result.root_elements.push(root.clone());
            }
        }
        result.clean_edges();
        result
    }

    /// Return a new list with only the nodes whose id appears in both lists.
    ///
    /// When a shared id carries diverging data, `other`'s node is retained
    /// (argument-wins). Only this list's edges are considered; they survive
    /// if their endpoints do. Root elements are copied from `other`,
    /// filtered to surviving ids. Neither input is modified.
    #[must_use]
    pub fn intersect(&self, other: &NodeList) -> NodeList {
        let mut result = NodeList::new();
        for node in self.nodes.values() {
            if let Some(theirs) = other.nodes.get(&node.id) {
                result.nodes.insert(theirs.id.clone(), theirs.clone());
            }
        }
        result.edges = self.edges.clone();
        result.root_elements = other
            .root_elements
            .iter()
            .filter(|id| result.nodes.contains_key(*id))
            .cloned()
            .collect();
        result.clean_edges();
        result
    }

    /// Remove the listed nodes, then canonicalize (pruning edges that the
    /// removal left dangling). Root element ids are left as recorded;
    /// [`NodeList::get_root_nodes`] skips ids that no longer resolve.
    pub fn remove_nodes<S: AsRef<str>>(&mut self, ids: &[S]) {
        for id in ids {
            self.nodes.shift_remove(id.as_ref());
        }
        self.clean_edges();
    }

    /// Look up a node by id.
    #[must_use]
    pub fn get_node_by_id(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// All nodes whose name matches exactly, in storage order.
    #[must_use]
    pub fn get_nodes_by_name(&self, name: &str) -> Vec<&Node> {
        self.nodes.values().filter(|n| n.name == name).collect()
    }

    /// All nodes recording the identifier `value` under the kind named by
    /// the lowercase alias `kind` ("purl", "cpe22", "cpe23", "gitoid").
    ///
    /// Comparison is byte-exact; an unrecognized alias matches nothing
    /// unless a node records an `Unknown`-kind identifier with that value.
    #[must_use]
    pub fn get_nodes_by_identifier(&self, kind: &str, value: &str) -> Vec<&Node> {
        let kind = SoftwareIdentifierType::from_alias(kind);
        self.nodes
            .values()
            .filter(|n| n.identifiers.get(&kind).is_some_and(|v| v == value))
            .collect()
    }

    /// The root element nodes, skipping ids that do not resolve.
    #[must_use]
    pub fn get_root_nodes(&self) -> Vec<&Node> {
        self.root_elements
            .iter()
            .filter_map(|id| self.nodes.get(id))
            .collect()
    }

    /// The slice of the graph reachable from `id` within `max_depth` edge
    /// hops, as a fresh canonical list rooted at `id`.
    ///
    /// Returns an empty list when `id` does not resolve. A `max_depth` of 0
    /// yields just the start node.
    #[must_use]
    pub fn descendants(&self, id: &str, max_depth: usize) -> NodeList {
        let mut result = NodeList::new();
        let Some(start) = self.nodes.get(id) else {
            return result;
        };
        result.add_root_node(start.clone());

        let mut visited: HashSet<&str> = HashSet::from([id]);
        let mut frontier: Vec<&str> = vec![id];
        let mut depth = 0;

        while depth < max_depth && !frontier.is_empty() {
            let mut next: Vec<&str> = Vec::new();
            for edge in &self.edges {
                if !frontier.contains(&edge.from.as_str()) {
                    continue;
                }
                result.add_edge(edge.clone());
                for dest in &edge.to {
                    if let Some(node) = self.nodes.get(dest) {
                        if visited.insert(dest) {
                            result.add_node(node.clone());
                            next.push(dest);
                        }
                    }
                }
            }
            frontier = next;
            depth += 1;
        }

        result.clean_edges();
        result
    }

    /// Deep, order-insensitive structural equality.
    ///
    /// Two lists are equal when they hold the same set of nodes (by value),
    /// the same set of edges under `(edge_type, from, set(to))`, and the
    /// same set of root elements. Insertion order, edge order, and
    /// destination order never matter.
    #[must_use]
    pub fn equal(&self, other: &NodeList) -> bool {
        if self.nodes != other.nodes {
            return false;
        }
        if edge_signature(&self.edges) != edge_signature(&other.edges) {
            return false;
        }
        let roots: BTreeSet<&str> = self.root_elements.iter().map(String::as_str).collect();
        let other_roots: BTreeSet<&str> = other.root_elements.iter().map(String::as_str).collect();
        roots == other_roots
    }
}

impl PartialEq for NodeList {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

impl Eq for NodeList {}

/// Canonical view of an edge list: key to destination set.
fn edge_signature(edges: &[Edge]) -> BTreeMap<(EdgeType, &str), BTreeSet<&str>> {
    let mut signature: BTreeMap<(EdgeType, &str), BTreeSet<&str>> = BTreeMap::new();
    for edge in edges {
        signature
            .entry((edge.edge_type, edge.from.as_str()))
            .or_default()
            .extend(edge.to.iter().map(String::as_str));
    }
    signature
}

#[cfg(test)]
mod tests {
    use super::*;

    fn packaged(id: &str, name: &str) -> Node {
        Node::new(id).with_name(name)
    }

    #[test]
    fn test_add_node_replaces_on_collision() {
        let mut list = NodeList::new();
        list.add_node(packaged("n1", "first"));
        list.add_node(packaged("n2", "other"));
        list.add_node(packaged("n1", "second"));

        assert_eq!(list.node_count(), 2);
        assert_eq!(list.get_node_by_id("n1").map(|n| n.name.as_str()), Some("second"));
        // Replacement keeps the original position.
        assert_eq!(list.nodes.get_index(0).map(|(id, _)| id.as_str()), Some("n1"));
    }

    #[test]
    fn test_add_root_node_registers_once() {
        let mut list = NodeList::new();
        list.add_root_node(packaged("root", "app"));
        list.add_root_node(packaged("root", "app"));
        assert_eq!(list.root_elements, vec!["root"]);
    }

    #[test]
    fn test_relate_nodes_at_id_merges_into_existing_edge() {
        let mut list = NodeList::new();
        list.add_node(packaged("a", "a"));
        list.add_node(packaged("b", "b"));
        list.add_node(packaged("c", "c"));
        list.relate_nodes_at_id("a", EdgeType::Contains, ["b"]);
        list.relate_nodes_at_id("a", EdgeType::Contains, ["c", "b"]);

        assert_eq!(list.edge_count(), 1);
        assert_eq!(list.edges[0].to, vec!["b", "c"]);
    }

    #[test]
    fn test_descendants_bounded_by_depth() {
        let mut list = NodeList::new();
        for id in ["a", "b", "c", "d"] {
            list.add_node(packaged(id, id));
        }
        list.add_edge(Edge::new(EdgeType::DependsOn, "a", ["b"]));
        list.add_edge(Edge::new(EdgeType::DependsOn, "b", ["c"]));
        list.add_edge(Edge::new(EdgeType::DependsOn, "c", ["d"]));

        let slice = list.descendants("a", 2);
        assert_eq!(slice.node_count(), 3, "a, b, c within two hops");
        assert!(slice.get_node_by_id("d").is_none());
        assert_eq!(slice.root_elements, vec!["a"]);
        // The frontier edge c -> d must not leak a dangling destination.
        for edge in &slice.edges {
            for dest in &edge.to {
                assert!(slice.nodes.contains_key(dest), "dangling {dest}");
            }
        }
    }

    #[test]
    fn test_descendants_of_unknown_id_is_empty() {
        let list = NodeList::new();
        assert!(list.descendants("ghost", 3).is_empty());
    }

    #[test]
    fn test_equality_ignores_order_everywhere() {
        let mut left = NodeList::new();
        left.add_node(packaged("a", "a"));
        left.add_node(packaged("b", "b"));
        left.add_edge(Edge::new(EdgeType::Contains, "a", ["b", "a"]));
        left.root_elements = vec!["a".into(), "b".into()];

        let mut right = NodeList::new();
        right.add_node(packaged("b", "b"));
        right.add_node(packaged("a", "a"));
        right.add_edge(Edge::new(EdgeType::Contains, "a", ["a", "b"]));
        right.root_elements = vec!["b".into(), "a".into()];

        assert_eq!(left, right);
    }
}
