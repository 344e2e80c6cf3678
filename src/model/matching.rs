//! Evidence-based node matching.
//!
//! [`NodeList::get_matching_node`] answers "which node of this graph is the
//! piece of software this probe describes?". Hashes are the strongest
//! evidence, identifiers break ties. Matching distinguishes three outcomes:
//! a unique match, no match (including inconsistent evidence), and ambiguity
//! (several nodes survive every disambiguation step); only the last one is
//! an error.

use crate::error::{Result, SbomGraphError};
use crate::model::{Node, NodeList, NodeListIndex};
use std::collections::BTreeSet;

impl NodeList {
    /// Find the single node the probe positively identifies.
    ///
    /// Candidate sets are collected per evidence axis and intersected within
    /// each axis: every probe hash must agree on the same candidates, and
    /// every probe identifier likewise. A probe hash with no match in a
    /// list that records hashes means the evidence is inconsistent and the
    /// result is `Ok(None)`; if no node in the list records any hash, hash
    /// evidence is vacuous and identifiers alone decide (the same rule
    /// applies to identifiers).
    ///
    /// Combination: a unique hash candidate wins outright. Two or more hash
    /// candidates fall back to the identifier evidence, which must name
    /// exactly one of them; otherwise the match is
    /// [`SbomGraphError::AmbiguousMatch`]. A probe without usable evidence
    /// matches nothing.
    ///
    /// Identifier values (including package URLs) compare byte-exact.
    pub fn get_matching_node(&self, probe: &Node) -> Result<Option<&Node>> {
        let index = NodeListIndex::build(self);

        let hash_candidates = match self.candidates_by_hash(&index, probe) {
            Evidence::Inconsistent => return Ok(None),
            Evidence::None => None,
            Evidence::Candidates(set) => Some(set),
        };
        let identifier_candidates = match self.candidates_by_identifier(&index, probe) {
            Evidence::Inconsistent => return Ok(None),
            Evidence::None => None,
            Evidence::Candidates(set) => Some(set),
        };

        match (hash_candidates, identifier_candidates) {
            (Some(hashes), identifiers) => {
                if hashes.len() == 1 {
                    return Ok(hashes.first().and_then(|id| index.node(id)));
                }
                if let Some(identifiers) = identifiers {
                    if identifiers.len() == 1 {
                        if let Some(id) = identifiers.first() {
                            if hashes.contains(id) {
                                return Ok(index.node(id));
                            }
                        }
                    }
                }
                Err(SbomGraphError::ambiguous(hashes))
            }
            (None, Some(identifiers)) => {
                if identifiers.len() == 1 {
                    Ok(identifiers.first().and_then(|id| index.node(id)))
                } else {
                    Err(SbomGraphError::ambiguous(identifiers))
                }
            }
            (None, None) => Ok(None),
        }
    }

    /// Intersection of the hash candidate sets, one per probe digest.
    fn candidates_by_hash<'a>(
        &self,
        index: &NodeListIndex<'a>,
        probe: &Node,
    ) -> Evidence<'a> {
        if probe.hashes.is_empty() || !index.has_hashes() {
            return Evidence::None;
        }
        let mut candidates: Option<BTreeSet<&str>> = None;
        for (algorithm, digest) in &probe.hashes {
            let found = index.ids_with_hash(*algorithm, digest);
            if found.is_empty() {
                return Evidence::Inconsistent;
            }
            candidates = Some(match candidates {
                None => found,
                Some(previous) => previous.intersection(&found).copied().collect(),
            });
        }
        match candidates {
            Some(set) if !set.is_empty() => Evidence::Candidates(set),
            _ => Evidence::Inconsistent,
        }
    }

    /// Intersection of the identifier candidate sets, one per probe
    /// identifier.
    fn candidates_by_identifier<'a>(
        &self,
        index: &NodeListIndex<'a>,
        probe: &Node,
    ) -> Evidence<'a> {
        if probe.identifiers.is_empty() || !index.has_identifiers() {
            return Evidence::None;
        }
        let mut candidates: Option<BTreeSet<&str>> = None;
        for (kind, value) in &probe.identifiers {
            let found = index.ids_with_identifier(*kind, value);
            if found.is_empty() {
                return Evidence::Inconsistent;
            }
            candidates = Some(match candidates {
                None => found,
                Some(previous) => previous.intersection(&found).copied().collect(),
            });
        }
        match candidates {
            Some(set) if !set.is_empty() => Evidence::Candidates(set),
            _ => Evidence::Inconsistent,
        }
    }
}

/// What one evidence axis concluded.
enum Evidence<'a> {
    /// The axis has nothing to say: the probe carries no evidence of this
    /// kind, or no node in the receiver records any.
    None,
    /// The probe's evidence contradicts the receiver; the whole match must
    /// come up empty.
    Inconsistent,
    /// The non-empty candidate set every piece of evidence on this axis
    /// agrees on.
    Candidates(BTreeSet<&'a str>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HashAlgorithm, SoftwareIdentifierType};

    const SHA1_A: &str = "0b13c24e584ef7075f3d4fd3a9f8872c9fffa1b1";
    const SHA1_B: &str = "4c219efaf4d39295971409f796301a89a304cee6";
    const SHA256_A: &str = "e63a4879428aad2c768954d7be753fde3997771b2ce45bc7f99c35ff00d2a98b";

    fn list_of(nodes: Vec<Node>) -> NodeList {
        let mut list = NodeList::new();
        for node in nodes {
            list.add_node(node);
        }
        list
    }

    #[test]
    fn test_single_hash_unique_match() {
        let list = list_of(vec![
            Node::new("node1").with_hash(HashAlgorithm::Sha1, SHA1_A),
            Node::new("node2").with_hash(HashAlgorithm::Sha1, SHA1_B),
        ]);
        let probe = Node::new("").with_hash(HashAlgorithm::Sha1, SHA1_A);

        let found = list.get_matching_node(&probe).expect("unambiguous");
        assert_eq!(found.map(|n| n.id.as_str()), Some("node1"));
    }

    #[test]
    fn test_shared_hash_is_ambiguous() {
        let list = list_of(vec![
            Node::new("node1").with_hash(HashAlgorithm::Sha1, SHA1_A),
            Node::new("node2").with_hash(HashAlgorithm::Sha1, SHA1_A),
        ]);
        let probe = Node::new("").with_hash(HashAlgorithm::Sha1, SHA1_A);

        let err = list.get_matching_node(&probe).expect_err("two candidates");
        let SbomGraphError::AmbiguousMatch { candidates } = err else {
            panic!("expected ambiguity");
        };
        assert_eq!(candidates, vec!["node1", "node2"]);
    }

    #[test]
    fn test_diverging_hash_means_no_match() {
        let list = list_of(vec![Node::new("node1")
            .with_hash(HashAlgorithm::Sha1, SHA1_A)
            .with_hash(HashAlgorithm::Sha256, SHA256_A)]);
        let probe = Node::new("")
            .with_hash(HashAlgorithm::Sha1, SHA1_A)
            .with_hash(HashAlgorithm::Sha256, "no-match-here");

        let found = list.get_matching_node(&probe).expect("not an error");
        assert!(found.is_none(), "inconsistent evidence must match nothing");
    }

    #[test]
    fn test_probe_subset_of_node_hashes_matches() {
        let list = list_of(vec![Node::new("node1")
            .with_hash(HashAlgorithm::Sha1, SHA1_A)
            .with_hash(HashAlgorithm::Sha256, SHA256_A)
            .with_hash(HashAlgorithm::Sha512, "012d52b1ab7abc4b8e98d6767ef6465f")]);
        let probe = Node::new("")
            .with_hash(HashAlgorithm::Sha1, SHA1_A)
            .with_hash(HashAlgorithm::Sha256, SHA256_A);

        let found = list.get_matching_node(&probe).expect("unambiguous");
        assert_eq!(found.map(|n| n.id.as_str()), Some("node1"));
    }

    #[test]
    fn test_purl_breaks_hash_tie() {
        let list = list_of(vec![
            Node::new("node1")
                .with_hash(HashAlgorithm::Sha1, SHA1_A)
                .with_identifier(SoftwareIdentifierType::Purl, "pkg:apk/alpine/bash@4.0.1"),
            Node::new("node2")
                .with_hash(HashAlgorithm::Sha1, SHA1_A)
                .with_identifier(SoftwareIdentifierType::Purl, "pkg:apk/wolfi/bash@4.0.1"),
        ]);
        let probe = Node::new("")
            .with_hash(HashAlgorithm::Sha1, SHA1_A)
            .with_identifier(SoftwareIdentifierType::Purl, "pkg:apk/wolfi/bash@4.0.1");

        let found = list.get_matching_node(&probe).expect("tie broken by purl");
        assert_eq!(found.map(|n| n.id.as_str()), Some("node2"));
    }

    #[test]
    fn test_hash_evidence_vacuous_when_list_records_none() {
        // The probe carries a hash, but no node in the list does. The purl
        // alone decides.
        let list = list_of(vec![
            Node::new("node1")
                .with_identifier(SoftwareIdentifierType::Purl, "pkg:apk/alpine/bash@4.0.1"),
            Node::new("node2")
                .with_identifier(SoftwareIdentifierType::Purl, "pkg:apk/wolfi/bash@4.0.1"),
        ]);
        let probe = Node::new("")
            .with_hash(HashAlgorithm::Sha1, SHA1_A)
            .with_identifier(SoftwareIdentifierType::Purl, "pkg:apk/wolfi/bash@4.0.1");

        let found = list.get_matching_node(&probe).expect("purl-only match");
        assert_eq!(found.map(|n| n.id.as_str()), Some("node2"));
    }

    #[test]
    fn test_rearranged_purl_does_not_match() {
        // Byte-exact comparison: reordered query parameters are distinct
        // values.
        let list = list_of(vec![Node::new("node1").with_identifier(
            SoftwareIdentifierType::Purl,
            "pkg:deb/libzstd1@1.3.8?arch=amd64&upstream=libzstd",
        )]);
        let probe = Node::new("").with_identifier(
            SoftwareIdentifierType::Purl,
            "pkg:deb/libzstd1@1.3.8?upstream=libzstd&arch=amd64",
        );

        let found = list.get_matching_node(&probe).expect("not an error");
        assert!(found.is_none());
    }

    #[test]
    fn test_no_evidence_matches_nothing() {
        let list = list_of(vec![Node::new("node1").with_name("bash")]);
        let probe = Node::new("").with_name("bash");

        let found = list.get_matching_node(&probe).expect("not an error");
        assert!(found.is_none(), "names are not matching evidence");
    }

    #[test]
    fn test_result_never_contradicts_probe_hash() {
        let list = list_of(vec![
            Node::new("node1")
                .with_hash(HashAlgorithm::Sha1, SHA1_A)
                .with_hash(HashAlgorithm::Sha256, SHA256_A),
            Node::new("node2").with_hash(HashAlgorithm::Sha1, SHA1_B),
        ]);
        let probe = Node::new("")
            .with_hash(HashAlgorithm::Sha1, SHA1_A)
            .with_hash(HashAlgorithm::Sha256, SHA256_A);

        if let Ok(Some(node)) = list.get_matching_node(&probe) {
            for (algorithm, digest) in &probe.hashes {
                assert_eq!(node.hashes.get(algorithm), Some(digest));
            }
        } else {
            panic!("expected a match");
        }
    }
}
