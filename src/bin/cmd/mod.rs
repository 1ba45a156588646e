// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI subcommands.

mod convert;
mod info;
mod inspect;

pub use convert::ConvertCmd;
pub use info::InfoCmd;
pub use inspect::InspectCmd;
