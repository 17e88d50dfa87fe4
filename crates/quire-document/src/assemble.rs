// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document assembler — walk a store snapshot in order, resolve each image's
// dimensions, compute its placement, and emit one page per entry.
//
// The run is two-phase: every entry is resolved and laid out before the
// first page reaches the writer. Resolution is the only suspension point,
// and under the default abort policy a failure anywhere means the writer
// receives no pages at all, so a failed run can never leave a partial
// document behind. The phase split is also what would let resolution be
// parallelised later: placements are reassembled in snapshot order before
// emission because the writer is sequential and append-only.

use quire_core::config::{AssemblyConfig, FailurePolicy};
use quire_core::error::{QuireError, Result};
use quire_core::types::{EntryId, ImageEntry};
use tracing::{debug, info, instrument, warn};

use crate::layout::{self, PageLayout};
use crate::resolve::DimensionResolver;
use crate::store::StoreSnapshot;
use crate::writer::DocumentWriter;

/// Result of a completed assembly run.
#[derive(Debug)]
pub struct AssemblyOutput {
    /// The finalised document.
    pub bytes: Vec<u8>,
    /// Number of pages emitted. Equals the snapshot length unless entries
    /// were skipped.
    pub pages: usize,
    /// Entries dropped under [`FailurePolicy::Skip`], in snapshot order.
    /// Always empty under [`FailurePolicy::Abort`].
    pub skipped: Vec<EntryId>,
}

/// Assembles a store snapshot into a single paginated document.
#[derive(Debug)]
pub struct DocumentAssembler {
    config: AssemblyConfig,
}

impl DocumentAssembler {
    pub fn new(config: AssemblyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AssemblyConfig {
        &self.config
    }

    /// Run one assembly over an immutable snapshot.
    ///
    /// Page order strictly equals snapshot order. An empty snapshot yields
    /// a finalised zero-page document, not an error.
    #[instrument(skip_all, fields(entries = snapshot.len(), policy = ?self.config.failure_policy))]
    pub async fn assemble<R, W>(
        &self,
        snapshot: &StoreSnapshot,
        resolver: &R,
        mut writer: W,
    ) -> Result<AssemblyOutput>
    where
        R: DimensionResolver,
        W: DocumentWriter,
    {
        // Geometry problems abort before any decode work is spent.
        layout::content_box(&self.config.page)
            .map_err(|err| QuireError::InvalidPageGeometry(err.to_string()))?;

        let mut placed: Vec<(&ImageEntry, PageLayout)> = Vec::with_capacity(snapshot.len());
        let mut skipped: Vec<EntryId> = Vec::new();

        for entry in snapshot.iter() {
            match self.place_entry(entry, resolver).await {
                Ok(page_layout) => placed.push((entry, page_layout)),
                Err(err) => match self.config.failure_policy {
                    FailurePolicy::Abort => {
                        warn!(id = %entry.id, error = %err, "aborting run, no document produced");
                        return Err(err);
                    }
                    FailurePolicy::Skip => {
                        warn!(id = %entry.id, name = %entry.display_name, error = %err, "skipping entry");
                        skipped.push(entry.id);
                    }
                },
            }
        }

        for (index, (entry, page_layout)) in placed.iter().enumerate() {
            writer.new_page()?;
            writer.place_image(&entry.source, page_layout)?;
            debug!(page = index, id = %entry.id, name = %entry.display_name, "page emitted");
        }

        let pages = placed.len();
        let bytes = writer.finalize()?;
        info!(pages, skipped = skipped.len(), "assembly complete");
        Ok(AssemblyOutput {
            bytes,
            pages,
            skipped,
        })
    }

    /// Resolve one entry and compute its placement. The suspension point.
    async fn place_entry<R: DimensionResolver>(
        &self,
        entry: &ImageEntry,
        resolver: &R,
    ) -> Result<PageLayout> {
        let dims = resolver.resolve(entry).await?;
        layout::fit(dims, &self.config.page).map_err(|err| err.for_entry(entry.id))
    }
}
