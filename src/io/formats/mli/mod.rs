// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Legacy `.mli` format.
//!
//! The whole file is one JSON [`LegacyDocument`]. The sink accumulates
//! records in memory and serializes the document at finish; the source
//! loads the document and replays it in chunks, so the codec sees the same
//! record stream as for the chunked format.

mod sink;
mod source;

pub use sink::LegacySink;
pub use source::LegacySource;

use serde::{Deserialize, Serialize};

use crate::io::records::{EdgeRecord, FileHeader, NodeRecord, SectionInfo};
use crate::{ElementKind, GroupKind};

/// Format tag stored in every legacy document.
pub const LEGACY_FORMAT_TAG: &str = "mli";

/// Current legacy document version.
pub const LEGACY_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacySection {
    pub kind: ElementKind,
    #[serde(flatten)]
    pub info: SectionInfo,
}

/// A face or region with its file id, connectivity and optional shape tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyCell {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<u8>,
    pub nodes: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyGroup {
    pub kind: GroupKind,
    pub name: String,
    pub size: u64,
    pub members: Vec<u64>,
}

/// In-memory image of a `.mli` file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyDocument {
    pub format: String,
    pub version: u32,
    pub header: FileHeader,
    #[serde(default)]
    pub sections: Vec<LegacySection>,
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
    #[serde(default)]
    pub faces: Vec<LegacyCell>,
    #[serde(default)]
    pub regions: Vec<LegacyCell>,
    #[serde(default)]
    pub groups: Vec<LegacyGroup>,
}

impl Default for LegacyDocument {
    fn default() -> Self {
        Self {
            format: LEGACY_FORMAT_TAG.to_string(),
            version: LEGACY_VERSION,
            header: FileHeader::default(),
            sections: Vec::new(),
            nodes: Vec::new(),
            edges: Vec::new(),
            faces: Vec::new(),
            regions: Vec::new(),
            groups: Vec::new(),
        }
    }
}

impl LegacyDocument {
    pub fn section(&self, kind: ElementKind) -> Option<SectionInfo> {
        self.sections
            .iter()
            .find(|section| section.kind == kind)
            .map(|section| section.info)
    }

    pub fn groups_of(&self, kind: GroupKind) -> impl Iterator<Item = &LegacyGroup> + '_ {
        self.groups.iter().filter(move |group| group.kind == kind)
    }
}
