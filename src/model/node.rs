//! Nodes of the SBOM graph and their closed enumerations.
//!
//! A [`Node`] describes a single component of a software artifact, either a
//! package or a file. Descriptive fields are plain strings where the empty
//! string means "absent"; hashes and identifiers are keyed maps whose key
//! types are closed enums with explicit `Unknown` sentinels.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Kind of component a node describes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum NodeType {
    /// A software package.
    #[default]
    Package,
    /// A file belonging to a package or document.
    File,
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeType::Package => write!(f, "package"),
            NodeType::File => write!(f, "file"),
        }
    }
}

/// Hash algorithm of a node digest.
///
/// Closed set. Producers map algorithm names they do not recognize to
/// [`HashAlgorithm::Unknown`] instead of dropping the digest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    Md5,
    Sha1,
    Sha256,
    Sha384,
    Sha512,
    #[serde(rename = "sha3-256")]
    Sha3_256,
    #[serde(rename = "sha3-384")]
    Sha3_384,
    #[serde(rename = "sha3-512")]
    Sha3_512,
    #[serde(rename = "blake2b-256")]
    Blake2b256,
    #[serde(rename = "blake2b-384")]
    Blake2b384,
    #[serde(rename = "blake2b-512")]
    Blake2b512,
    Blake3,
    Unknown,
}

impl HashAlgorithm {
    /// Parse a lowercase algorithm alias, mapping unrecognized names to
    /// [`HashAlgorithm::Unknown`].
    pub fn from_alias(alias: &str) -> Self {
        match alias {
            "md5" => HashAlgorithm::Md5,
            "sha1" => HashAlgorithm::Sha1,
            "sha256" => HashAlgorithm::Sha256,
            "sha384" => HashAlgorithm::Sha384,
            "sha512" => HashAlgorithm::Sha512,
            "sha3-256" => HashAlgorithm::Sha3_256,
            "sha3-384" => HashAlgorithm::Sha3_384,
            "sha3-512" => HashAlgorithm::Sha3_512,
            "blake2b-256" => HashAlgorithm::Blake2b256,
            "blake2b-384" => HashAlgorithm::Blake2b384,
            "blake2b-512" => HashAlgorithm::Blake2b512,
            "blake3" => HashAlgorithm::Blake3,
            _ => HashAlgorithm::Unknown,
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let alias = match self {
            HashAlgorithm::Md5 => "md5",
            HashAlgorithm::Sha1 => "sha1",
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha384 => "sha384",
            HashAlgorithm::Sha512 => "sha512",
            HashAlgorithm::Sha3_256 => "sha3-256",
            HashAlgorithm::Sha3_384 => "sha3-384",
            HashAlgorithm::Sha3_512 => "sha3-512",
            HashAlgorithm::Blake2b256 => "blake2b-256",
            HashAlgorithm::Blake2b384 => "blake2b-384",
            HashAlgorithm::Blake2b512 => "blake2b-512",
            HashAlgorithm::Blake3 => "blake3",
            HashAlgorithm::Unknown => "unknown",
        };
        write!(f, "{alias}")
    }
}

/// Kind of software identifier recorded on a node.
///
/// The lowercase aliases ("purl", "cpe22", "cpe23", "gitoid") are the
/// strings callers pass to identifier-keyed queries.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SoftwareIdentifierType {
    /// Package URL.
    Purl,
    /// Common Platform Enumeration, 2.2 syntax.
    Cpe22,
    /// Common Platform Enumeration, 2.3 syntax.
    Cpe23,
    /// Git object identifier.
    Gitoid,
    Unknown,
}

impl SoftwareIdentifierType {
    /// Parse a lowercase identifier-kind alias, mapping unrecognized names
    /// to [`SoftwareIdentifierType::Unknown`].
    pub fn from_alias(alias: &str) -> Self {
        match alias {
            "purl" => SoftwareIdentifierType::Purl,
            "cpe22" => SoftwareIdentifierType::Cpe22,
            "cpe23" => SoftwareIdentifierType::Cpe23,
            "gitoid" => SoftwareIdentifierType::Gitoid,
            _ => SoftwareIdentifierType::Unknown,
        }
    }
}

impl fmt::Display for SoftwareIdentifierType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let alias = match self {
            SoftwareIdentifierType::Purl => "purl",
            SoftwareIdentifierType::Cpe22 => "cpe22",
            SoftwareIdentifierType::Cpe23 => "cpe23",
            SoftwareIdentifierType::Gitoid => "gitoid",
            SoftwareIdentifierType::Unknown => "unknown",
        };
        write!(f, "{alias}")
    }
}

/// A component in the SBOM graph.
///
/// `id` is the primary key inside a `NodeList` and must stay stable for the
/// lifetime of the node's membership. All other string fields are opaque to
/// the graph algebra; an empty string is treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier within the enclosing node list.
    pub id: String,
    /// Component kind.
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// Component name.
    pub name: String,
    /// Version string.
    pub version: String,
    /// File name, for file nodes or packaged artifacts.
    pub file_name: String,
    /// Project homepage.
    pub url_home: String,
    /// Download location.
    pub url_download: String,
    /// Concluded license expression.
    pub license_concluded: String,
    /// Copyright notice.
    pub copyright: String,
    /// Provenance notes from the producer.
    pub source_info: String,
    /// Free-form comment.
    pub comment: String,
    /// One-line summary.
    pub summary: String,
    /// Longer description.
    pub description: String,
    /// Digests keyed by algorithm. At most one digest per algorithm.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub hashes: BTreeMap<HashAlgorithm, String>,
    /// Software identifiers keyed by kind. At most one value per kind.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub identifiers: BTreeMap<SoftwareIdentifierType, String>,
}

impl Node {
    /// Create a new node with the given id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Set the component kind.
    #[must_use]
    pub fn with_type(mut self, node_type: NodeType) -> Self {
        self.node_type = node_type;
        self
    }

    /// Set the component name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the version string.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Record a digest, replacing any previous digest under the same
    /// algorithm.
    #[must_use]
    pub fn with_hash(mut self, algorithm: HashAlgorithm, digest: impl Into<String>) -> Self {
        self.hashes.insert(algorithm, digest.into());
        self
    }

    /// Record a software identifier, replacing any previous value of the
    /// same kind.
    #[must_use]
    pub fn with_identifier(
        mut self,
        kind: SoftwareIdentifierType,
        value: impl Into<String>,
    ) -> Self {
        self.identifiers.insert(kind, value.into());
        self
    }

    /// The node's package URL, if one is recorded.
    #[must_use]
    pub fn purl(&self) -> Option<&str> {
        self.identifiers
            .get(&SoftwareIdentifierType::Purl)
            .map(String::as_str)
    }

    /// Complete this node with data from `other` without overwriting
    /// anything already present.
    ///
    /// String fields are copied only when this node's field is empty; hash
    /// and identifier entries are copied only for keys this node does not
    /// record yet. The id never changes.
    pub fn augment(&mut self, other: &Node) {
        for (mine, theirs) in self.string_fields_mut(other) {
            if mine.is_empty() {
                mine.clone_from(theirs);
            }
        }
        for (algorithm, digest) in &other.hashes {
            self.hashes
                .entry(*algorithm)
                .or_insert_with(|| digest.clone());
        }
        for (kind, value) in &other.identifiers {
            self.identifiers
                .entry(*kind)
                .or_insert_with(|| value.clone());
        }
    }

    /// Apply `other`'s data on top of this node.
    ///
    /// Non-empty string fields of `other` overwrite this node's; hash and
    /// identifier entries of `other` win on key conflict. The id never
    /// changes.
    pub fn update(&mut self, other: &Node) {
        self.node_type = other.node_type;
        for (mine, theirs) in self.string_fields_mut(other) {
            if !theirs.is_empty() {
                mine.clone_from(theirs);
            }
        }
        for (algorithm, digest) in &other.hashes {
            self.hashes.insert(*algorithm, digest.clone());
        }
        for (kind, value) in &other.identifiers {
            self.identifiers.insert(*kind, value.clone());
        }
    }

    /// Pairs of (own field, other's field) for every descriptive string,
    /// excluding the id.
    fn string_fields_mut<'a>(
        &'a mut self,
        other: &'a Node,
    ) -> [(&'a mut String, &'a String); 11] {
        [
            (&mut self.name, &other.name),
            (&mut self.version, &other.version),
            (&mut self.file_name, &other.file_name),
            (&mut self.url_home, &other.url_home),
            (&mut self.url_download, &other.url_download),
            (&mut self.license_concluded, &other.license_concluded),
            (&mut self.copyright, &other.copyright),
            (&mut self.source_info, &other.source_info),
            (&mut self.comment, &other.comment),
            (&mut self.summary, &other.summary),
            (&mut self.description, &other.description),
        ]
    }
}
