// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Element kinds, group kinds, kind masks and mesh dimension.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::{CodecError, Section};

/// One of the four mesh element kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Node,
    Edge,
    Face,
    Region,
}

impl ElementKind {
    pub const ALL: [ElementKind; 4] = [
        ElementKind::Node,
        ElementKind::Edge,
        ElementKind::Face,
        ElementKind::Region,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ElementKind::Node => "node",
            ElementKind::Edge => "edge",
            ElementKind::Face => "face",
            ElementKind::Region => "region",
        }
    }

    /// Code used by the binary record layout.
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    /// The mask bit for this kind.
    pub const fn mask(self) -> KindMask {
        match self {
            ElementKind::Node => KindMask::NODES,
            ElementKind::Edge => KindMask::EDGES,
            ElementKind::Face => KindMask::FACES,
            ElementKind::Region => KindMask::REGIONS,
        }
    }

    /// The group kind whose members are elements of this kind.
    pub const fn group_kind(self) -> GroupKind {
        match self {
            ElementKind::Node => GroupKind::Cloud,
            ElementKind::Edge => GroupKind::Line,
            ElementKind::Face => GroupKind::Surface,
            ElementKind::Region => GroupKind::Volume,
        }
    }

    pub const fn section(self) -> Section {
        match self {
            ElementKind::Node => Section::Nodes,
            ElementKind::Edge => Section::Edges,
            ElementKind::Face => Section::Faces,
            ElementKind::Region => Section::Regions,
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named grouping collection: Cloud (nodes), Line (edges), Surface (faces), Volume (regions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupKind {
    Cloud,
    Line,
    Surface,
    Volume,
}

impl GroupKind {
    pub const ALL: [GroupKind; 4] = [
        GroupKind::Cloud,
        GroupKind::Line,
        GroupKind::Surface,
        GroupKind::Volume,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            GroupKind::Cloud => "cloud",
            GroupKind::Line => "line",
            GroupKind::Surface => "surface",
            GroupKind::Volume => "volume",
        }
    }

    pub const fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    /// Kind of the elements this group holds.
    pub const fn element_kind(self) -> ElementKind {
        match self {
            GroupKind::Cloud => ElementKind::Node,
            GroupKind::Line => ElementKind::Edge,
            GroupKind::Surface => ElementKind::Face,
            GroupKind::Volume => ElementKind::Region,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn section(self) -> Section {
        match self {
            GroupKind::Cloud => Section::Clouds,
            GroupKind::Line => Section::Lines,
            GroupKind::Surface => Section::Surfaces,
            GroupKind::Volume => Section::Volumes,
        }
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

bitflags::bitflags! {
    /// A set of element kinds.
    ///
    /// Used both as a mesh capability set and as the caller's request mask
    /// for a read or write call. Group collections follow their element kind.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct KindMask: u8 {
        const NODES = 1 << 0;
        const EDGES = 1 << 1;
        const FACES = 1 << 2;
        const REGIONS = 1 << 3;
    }
}

impl KindMask {
    pub fn has(self, kind: ElementKind) -> bool {
        self.contains(kind.mask())
    }

    /// Kinds enabled for a pass: capability ∩ request, nodes always included.
    pub fn effective(capability: KindMask, requested: KindMask) -> KindMask {
        (capability & requested) | KindMask::NODES
    }

    /// Compact letter form, e.g. `NEF`.
    pub fn letters(self) -> String {
        [
            (KindMask::NODES, 'N'),
            (KindMask::EDGES, 'E'),
            (KindMask::FACES, 'F'),
            (KindMask::REGIONS, 'R'),
        ]
        .iter()
        .filter(|(flag, _)| self.contains(*flag))
        .map(|(_, c)| *c)
        .collect()
    }
}

impl FromStr for KindMask {
    type Err = CodecError;

    /// Parse a letter mask such as `NFR` (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut mask = KindMask::empty();
        for c in s.chars() {
            mask |= match c.to_ascii_uppercase() {
                'N' => KindMask::NODES,
                'E' => KindMask::EDGES,
                'F' => KindMask::FACES,
                'R' => KindMask::REGIONS,
                other => {
                    return Err(CodecError::invalid_config(format!(
                        "unknown element kind letter '{other}' in mask '{s}'"
                    )))
                }
            };
        }
        Ok(mask)
    }
}

/// Topological dimension of a mesh, stored in the file's global header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    D1,
    D2,
    D3,
}

impl Dimension {
    pub const fn as_u8(self) -> u8 {
        match self {
            Dimension::D1 => 1,
            Dimension::D2 => 2,
            Dimension::D3 => 3,
        }
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Dimension::D1),
            2 => Some(Dimension::D2),
            3 => Some(Dimension::D3),
            _ => None,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}D", self.as_u8())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_letters_round_trip() {
        let mask: KindMask = "nfr".parse().unwrap();
        assert_eq!(mask, KindMask::NODES | KindMask::FACES | KindMask::REGIONS);
        assert_eq!(mask.letters(), "NFR");
    }

    #[test]
    fn test_mask_rejects_unknown_letter() {
        let err = "NX".parse::<KindMask>().unwrap_err();
        assert!(matches!(err, CodecError::InvalidConfig { .. }));
    }

    #[test]
    fn test_effective_mask_keeps_nodes() {
        let capability = KindMask::NODES | KindMask::FACES;
        let requested = KindMask::EDGES | KindMask::FACES;
        assert_eq!(
            KindMask::effective(capability, requested),
            KindMask::NODES | KindMask::FACES
        );
    }

    #[test]
    fn test_kind_codes() {
        for kind in ElementKind::ALL {
            assert_eq!(ElementKind::from_code(kind.code()), Some(kind));
            assert_eq!(kind.group_kind().element_kind(), kind);
        }
        assert_eq!(ElementKind::from_code(4), None);
        assert_eq!(GroupKind::from_code(2), Some(GroupKind::Surface));
    }

    #[test]
    fn test_dimension_codes() {
        assert_eq!(Dimension::from_u8(2), Some(Dimension::D2));
        assert_eq!(Dimension::from_u8(0), None);
        assert_eq!(Dimension::D3.to_string(), "3D");
    }
}
