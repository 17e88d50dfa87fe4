// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document writer boundary.

use quire_core::error::Result;
use quire_core::types::ImageSource;

use crate::layout::PageLayout;

/// Opaque sink that serialises placed pages into the final output file.
///
/// The assembler drives a writer sequentially: `new_page` once per entry in
/// snapshot order, exactly one `place_image` per page, then `finalize` once
/// at the end. Implementations are append-only and never see a page out of
/// order. A writer that is dropped without `finalize` produces nothing —
/// that is how an aborted run discards its partial output.
pub trait DocumentWriter {
    /// Start the next page.
    fn new_page(&mut self) -> Result<()>;

    /// Place one image on the current page. The layout rectangle is in
    /// document-space millimetres, offsets measured from the top-left
    /// corner of the page.
    fn place_image(&mut self, source: &ImageSource, layout: &PageLayout) -> Result<()>;

    /// Finish the document and return its serialised bytes.
    fn finalize(self) -> Result<Vec<u8>>;
}
