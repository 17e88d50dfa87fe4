// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Quire page assembler.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an image entry.
///
/// Generated once at insertion time and never reused, even after the entry
/// is removed, so concurrent UI updates can never collide on a recycled key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(pub Uuid);

impl EntryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable reference-counted image bytes.
///
/// The original encoded bytes (JPEG, PNG, GIF, ...) are never mutated after
/// creation; cloning a source is a pointer copy, which is what makes store
/// snapshots cheap.
#[derive(Debug, Clone)]
pub struct ImageSource(Arc<[u8]>);

impl ImageSource {
    pub fn new(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for ImageSource {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes.into())
    }
}

/// Intrinsic pixel dimensions of a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelDimensions {
    pub width: u32,
    pub height: u32,
}

impl PixelDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// One user-added image: identity, bytes, and metadata.
///
/// Entries are never mutated in place. Reordering changes an entry's index
/// in the store, not the entry itself.
#[derive(Debug, Clone)]
pub struct ImageEntry {
    pub id: EntryId,
    /// Original encoded bytes, immutable for the entry's lifetime.
    pub source: ImageSource,
    /// Informational label, typically the source file name.
    pub display_name: String,
    pub added_at: DateTime<Utc>,
}

impl ImageEntry {
    pub fn new(source: ImageSource, display_name: impl Into<String>) -> Self {
        Self {
            id: EntryId::new(),
            source,
            display_name: display_name.into(),
            added_at: Utc::now(),
        }
    }
}

/// Direction for the store's adjacent-swap reorder primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    /// Swap with the previous neighbour (towards page 1).
    Earlier,
    /// Swap with the next neighbour (towards the last page).
    Later,
}

/// Standard paper sizes for the output document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PaperSize {
    A4,
    A3,
    A5,
    Letter,
    Legal,
    Custom { width_mm: f64, height_mm: f64 },
}

impl PaperSize {
    /// Dimensions in millimetres (width, height).
    pub fn dimensions_mm(&self) -> (f64, f64) {
        match self {
            Self::A4 => (210.0, 297.0),
            Self::A3 => (297.0, 420.0),
            Self::A5 => (148.0, 210.0),
            Self::Letter => (216.0, 279.0),
            Self::Legal => (216.0, 356.0),
            Self::Custom {
                width_mm,
                height_mm,
            } => (*width_mm, *height_mm),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_ids_are_unique() {
        let a = ImageEntry::new(ImageSource::new(vec![1u8, 2, 3]), "a.png");
        let b = ImageEntry::new(ImageSource::new(vec![1u8, 2, 3]), "b.png");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn source_clone_shares_bytes() {
        let src = ImageSource::new(vec![0u8; 64]);
        let copy = src.clone();
        assert_eq!(src.as_bytes().as_ptr(), copy.as_bytes().as_ptr());
        assert_eq!(copy.len(), 64);
    }

    #[test]
    fn paper_size_a4_matches_defaults() {
        assert_eq!(PaperSize::A4.dimensions_mm(), (210.0, 297.0));
    }
}
