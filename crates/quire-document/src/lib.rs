// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// quire-document — Page assembly for the Quire images-to-PDF tool.
//
// Provides the ordered image store, asynchronous dimension resolution, the
// pure page-layout engine (fit inside the content box preserving aspect
// ratio, then centre), the document assembler that walks a store snapshot,
// and a printpdf-backed document writer.

pub mod assemble;
pub mod layout;
pub mod pdf;
pub mod resolve;
pub mod store;
pub mod writer;

// Re-export the primary types so callers can use `quire_document::ImageStore` etc.
pub use assemble::{AssemblyOutput, DocumentAssembler};
pub use layout::{LayoutError, PageLayout};
pub use pdf::writer::PdfWriter;
pub use resolve::{DimensionResolver, ImageDimensionResolver};
pub use store::{ImageStore, StoreSnapshot};
pub use writer::DocumentWriter;
