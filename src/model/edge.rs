//! Edges of the SBOM graph.
//!
//! An [`Edge`] is a typed hyperedge: one source node id and an ordered,
//! deduplicated list of destination ids. `(edge_type, from)` is the
//! canonical key; canonicalization merges edges sharing it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Relationship kind between nodes.
///
/// Closed vocabulary. Producers map relationship names they do not recognize
/// to [`EdgeType::Unknown`] instead of dropping the edge.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum EdgeType {
    Amends,
    Ancestor,
    BuildDependency,
    BuildTool,
    Contains,
    Copy,
    DataFile,
    DependencyManifest,
    DependsOn,
    Descendant,
    Describes,
    DevDependency,
    DevTool,
    DistributionArtifact,
    Documentation,
    DynamicLink,
    Example,
    ExpandedFromArchive,
    FileAdded,
    FileDeleted,
    FileModified,
    Generates,
    Metafile,
    OptionalComponent,
    OptionalDependency,
    Other,
    Packages,
    Patch,
    Prerequisite,
    ProvidedDependency,
    RequirementFor,
    RuntimeDependency,
    SpecificationFor,
    StaticLink,
    Test,
    TestCase,
    TestDependency,
    TestTool,
    Variant,
    #[default]
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

impl EdgeType {
    /// Parse a wire name, mapping unrecognized names to
    /// [`EdgeType::Unknown`].
    pub fn from_alias(alias: &str) -> Self {
        match alias {
            "amends" => EdgeType::Amends,
            "ancestor" => EdgeType::Ancestor,
            "buildDependency" => EdgeType::BuildDependency,
            "buildTool" => EdgeType::BuildTool,
            "contains" => EdgeType::Contains,
            "copy" => EdgeType::Copy,
            "dataFile" => EdgeType::DataFile,
            "dependencyManifest" => EdgeType::DependencyManifest,
            "dependsOn" => EdgeType::DependsOn,
            "descendant" => EdgeType::Descendant,
            "describes" => EdgeType::Describes,
            "devDependency" => EdgeType::DevDependency,
            "devTool" => EdgeType::DevTool,
            "distributionArtifact" => EdgeType::DistributionArtifact,
            "documentation" => EdgeType::Documentation,
            "dynamicLink" => EdgeType::DynamicLink,
            "example" => EdgeType::Example,
            "expandedFromArchive" => EdgeType::ExpandedFromArchive,
            "fileAdded" => EdgeType::FileAdded,
            "fileDeleted" => EdgeType::FileDeleted,
            "fileModified" => EdgeType::FileModified,
            "generates" => EdgeType::Generates,
            "metafile" => EdgeType::Metafile,
            "optionalComponent" => EdgeType::OptionalComponent,
            "optionalDependency" => EdgeType::OptionalDependency,
            "other" => EdgeType::Other,
            "packages" => EdgeType::Packages,
            "patch" => EdgeType::Patch,
            "prerequisite" => EdgeType::Prerequisite,
            "providedDependency" => EdgeType::ProvidedDependency,
            "requirementFor" => EdgeType::RequirementFor,
            "runtimeDependency" => EdgeType::RuntimeDependency,
            "specificationFor" => EdgeType::SpecificationFor,
            "staticLink" => EdgeType::StaticLink,
            "test" => EdgeType::Test,
            "testCase" => EdgeType::TestCase,
            "testDependency" => EdgeType::TestDependency,
            "testTool" => EdgeType::TestTool,
            "variant" => EdgeType::Variant,
            _ => EdgeType::Unknown,
        }
    }

    /// The wire name for this relationship kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            EdgeType::Amends => "amends",
            EdgeType::Ancestor => "ancestor",
            EdgeType::BuildDependency => "buildDependency",
            EdgeType::BuildTool => "buildTool",
            EdgeType::Contains => "contains",
            EdgeType::Copy => "copy",
            EdgeType::DataFile => "dataFile",
            EdgeType::DependencyManifest => "dependencyManifest",
            EdgeType::DependsOn => "dependsOn",
            EdgeType::Descendant => "descendant",
            EdgeType::Describes => "describes",
            EdgeType::DevDependency => "devDependency",
            EdgeType::DevTool => "devTool",
            EdgeType::DistributionArtifact => "distributionArtifact",
            EdgeType::Documentation => "documentation",
            EdgeType::DynamicLink => "dynamicLink",
            EdgeType::Example => "example",
            EdgeType::ExpandedFromArchive => "expandedFromArchive",
            EdgeType::FileAdded => "fileAdded",
            EdgeType::FileDeleted => "fileDeleted",
            EdgeType::FileModified => "fileModified",
            EdgeType::Generates => "generates",
            EdgeType::Metafile => "metafile",
            EdgeType::OptionalComponent => "optionalComponent",
            EdgeType::OptionalDependency => "optionalDependency",
            EdgeType::Other => "other",
            EdgeType::Packages => "packages",
            EdgeType::Patch => "patch",
            EdgeType::Prerequisite => "prerequisite",
            EdgeType::ProvidedDependency => "providedDependency",
            EdgeType::RequirementFor => "requirementFor",
            EdgeType::RuntimeDependency => "runtimeDependency",
            EdgeType::SpecificationFor => "specificationFor",
            EdgeType::StaticLink => "staticLink",
            EdgeType::Test => "test",
            EdgeType::TestCase => "testCase",
            EdgeType::TestDependency => "testDependency",
            EdgeType::TestTool => "testTool",
            EdgeType::Variant => "variant",
            EdgeType::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for EdgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Typed relationship from one node to one or more others.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Relationship kind.
    #[serde(rename = "type")]
    pub edge_type: EdgeType,
    /// Source node id.
    pub from: String,
    /// Destination node ids, ordered, without duplicates once canonicalized.
    pub to: Vec<String>,
}

impl Edge {
    /// Create a new edge.
    #[must_use]
    pub fn new<I, S>(edge_type: EdgeType, from: impl Into<String>, to: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            edge_type,
            from: from.into(),
            to: to.into_iter().map(Into::into).collect(),
        }
    }

    /// Append a destination id, skipping ids already present.
    pub fn point_to(&mut self, id: impl Into<String>) {
        let id = id.into();
        if !self.to.contains(&id) {
            self.to.push(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_type_aliases_round_trip() {
        for edge_type in [
            EdgeType::Contains,
            EdgeType::DependsOn,
            EdgeType::Describes,
            EdgeType::RuntimeDependency,
            EdgeType::ExpandedFromArchive,
            EdgeType::Unknown,
        ] {
            assert_eq!(EdgeType::from_alias(edge_type.as_str()), edge_type);
        }
        assert_eq!(EdgeType::from_alias("CONTAINS"), EdgeType::Unknown);
    }

    #[test]
    fn test_point_to_deduplicates() {
        let mut edge = Edge::new(EdgeType::Contains, "a", ["b"]);
        edge.point_to("c");
        edge.point_to("b");
        assert_eq!(edge.to, vec!["b", "c"]);
    }
}
