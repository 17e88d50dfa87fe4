// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Quire.

use thiserror::Error;

use crate::types::EntryId;

/// Top-level error type for all Quire operations.
///
/// Store operations (`remove`, `move_entry`) never produce errors — absent
/// ids and boundary moves are defined as no-ops, so every variant here
/// belongs to dimension resolution, layout, or document writing.
#[derive(Debug, Error)]
pub enum QuireError {
    // -- Resolution errors --
    #[error("failed to decode image {id}: {reason}")]
    Decode { id: EntryId, reason: String },

    #[error("image {id} has invalid dimensions {width}x{height}")]
    InvalidImageDimensions {
        id: EntryId,
        width: u32,
        height: u32,
    },

    // -- Layout errors --
    #[error("page geometry leaves no usable content area: {0}")]
    InvalidPageGeometry(String),

    // -- Output errors --
    #[error("document writer failed: {0}")]
    Writer(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, QuireError>;
