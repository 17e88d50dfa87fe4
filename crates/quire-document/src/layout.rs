// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page layout engine — fit an image inside the page's content box while
// preserving aspect ratio, then centre it on the full page.
//
// Pure functions, no suspension, no hidden state: identical inputs always
// produce identical placements, so layouts are derived fresh per run and
// never cached.

use quire_core::config::PageGeometry;
use quire_core::error::QuireError;
use quire_core::types::{EntryId, PixelDimensions};
use thiserror::Error;

/// Placement rectangle for one image on one page, in millimetres.
///
/// `offset_x`/`offset_y` are measured from the page's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub width: f64,
    pub height: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

/// Layout failures, without entry attribution.
///
/// The layout engine does not know which entry it is placing; the assembler
/// attaches the offending id via [`LayoutError::for_entry`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum LayoutError {
    #[error("image dimensions {width}x{height} are not positive")]
    InvalidImageDimensions { width: u32, height: u32 },

    #[error("margin {margin_mm}mm leaves a {content_w_mm}x{content_h_mm}mm content box")]
    InvalidPageGeometry {
        margin_mm: f64,
        content_w_mm: f64,
        content_h_mm: f64,
    },
}

impl LayoutError {
    /// Convert to the crate-wide error, attributing image problems to the
    /// entry being placed.
    pub fn for_entry(self, id: EntryId) -> QuireError {
        match self {
            Self::InvalidImageDimensions { width, height } => {
                QuireError::InvalidImageDimensions { id, width, height }
            }
            Self::InvalidPageGeometry { .. } => QuireError::InvalidPageGeometry(self.to_string()),
        }
    }
}

/// Usable content area after subtracting the margin on all four sides.
///
/// Fails when the margin is too large for the page.
pub fn content_box(geometry: &PageGeometry) -> Result<(f64, f64), LayoutError> {
    let content_w = geometry.width_mm - 2.0 * geometry.margin_mm;
    let content_h = geometry.height_mm - 2.0 * geometry.margin_mm;
    if content_w <= 0.0 || content_h <= 0.0 {
        return Err(LayoutError::InvalidPageGeometry {
            margin_mm: geometry.margin_mm,
            content_w_mm: content_w,
            content_h_mm: content_h,
        });
    }
    Ok((content_w, content_h))
}

/// Compute the placement rectangle for an image of the given intrinsic
/// dimensions.
///
/// Width-fit first: span the full content width and derive the height from
/// the aspect ratio. If that height overflows the content box, fall back to
/// height-fit. Either way the result is centred on the full page, margins
/// included.
pub fn fit(dims: PixelDimensions, geometry: &PageGeometry) -> Result<PageLayout, LayoutError> {
    // Checked before any ratio computation so zero dimensions can never
    // turn into NaN or infinite page geometry.
    if dims.width == 0 || dims.height == 0 {
        return Err(LayoutError::InvalidImageDimensions {
            width: dims.width,
            height: dims.height,
        });
    }
    let (content_w, content_h) = content_box(geometry)?;

    let img_w = f64::from(dims.width);
    let img_h = f64::from(dims.height);

    let mut width = content_w;
    let mut height = img_h * width / img_w;
    if height > content_h {
        height = content_h;
        width = img_w * height / img_h;
    }

    Ok(PageLayout {
        width,
        height,
        offset_x: (geometry.width_mm - width) / 2.0,
        offset_y: (geometry.height_mm - height) / 2.0,
    })
}
