// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

use super::arena::CellId;

/// A named collection of same-kind elements. Membership is additive only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    name: String,
    members: Vec<CellId>,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add(&mut self, id: CellId) {
        self.members.push(id);
    }

    pub fn extend(&mut self, ids: impl IntoIterator<Item = CellId>) {
        self.members.extend(ids);
    }

    pub fn members(&self) -> &[CellId] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
