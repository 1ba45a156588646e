// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types shared by the mesh container, the codec and the file formats.

pub mod error;
pub mod kind;

pub use error::{CodecError, Direction, Result, Section, Stage};
pub use kind::{Dimension, ElementKind, GroupKind, KindMask};
