// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF document writer built on `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`. Pages accumulate here until `finalize`.

use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, RawImage, RawImageData,
    RawImageFormat, XObjectTransform,
};
use quire_core::config::PageGeometry;
use quire_core::error::{QuireError, Result};
use quire_core::types::ImageSource;
use tracing::{debug, info, instrument};

use crate::layout::PageLayout;
use crate::writer::DocumentWriter;

/// Append-only PDF writer: one image per page at a computed placement.
pub struct PdfWriter {
    /// Page size and margin; every page uses the same geometry.
    geometry: PageGeometry,
    doc: PdfDocument,
    /// Pages already closed by a subsequent `new_page` or by `finalize`.
    pages: Vec<PdfPage>,
    /// Operations for the page currently being written, if one is open.
    current: Option<Vec<Op>>,
}

impl PdfWriter {
    /// Create a writer for the given geometry. The title lands in the PDF
    /// /Info dictionary.
    pub fn new(geometry: PageGeometry, title: Option<&str>) -> Self {
        Self {
            geometry,
            doc: PdfDocument::new(title.unwrap_or("Quire Document")),
            pages: Vec::new(),
            current: None,
        }
    }

    /// Page dimensions in printpdf's Mm units.
    fn page_dimensions(&self) -> (Mm, Mm) {
        (
            Mm(self.geometry.width_mm as f32),
            Mm(self.geometry.height_mm as f32),
        )
    }

    fn flush_page(&mut self) {
        if let Some(ops) = self.current.take() {
            let (page_w, page_h) = self.page_dimensions();
            self.pages.push(PdfPage::new(page_w, page_h, ops));
        }
    }
}

impl DocumentWriter for PdfWriter {
    fn new_page(&mut self) -> Result<()> {
        self.flush_page();
        self.current = Some(Vec::new());
        Ok(())
    }

    #[instrument(skip_all, fields(bytes_len = source.len()))]
    fn place_image(&mut self, source: &ImageSource, layout: &PageLayout) -> Result<()> {
        if self.current.is_none() {
            return Err(QuireError::Writer("place_image called before new_page".into()));
        }

        // Decode to pixel data; printpdf needs the raw RGB8 buffer.
        let dynamic = image::load_from_memory(source.as_bytes()).map_err(|err| {
            QuireError::Writer(format!("failed to decode image for PDF: {err}"))
        })?;
        let img_width = dynamic.width() as usize;
        let img_height = dynamic.height() as usize;
        let rgb = dynamic.to_rgb8();

        let raw = RawImage {
            pixels: RawImageData::U8(rgb.into_raw()),
            width: img_width,
            height: img_height,
            data_format: RawImageFormat::RGB8,
            tag: Vec::new(),
        };
        let xobject_id = self.doc.add_image(&raw);

        // At 72 dpi one pixel is one point, so the scale factors fall out of
        // the layout rectangle directly.
        let dpi: f32 = 72.0;
        let scale_x = Mm(layout.width as f32).into_pt().0 / img_width as f32;
        let scale_y = Mm(layout.height as f32).into_pt().0 / img_height as f32;

        // The layout offset is from the page's top-left corner; PDF places
        // from the bottom-left.
        let translate_x = Mm(layout.offset_x as f32).into_pt();
        let translate_y =
            Mm((self.geometry.height_mm - layout.offset_y - layout.height) as f32).into_pt();

        let ops = self
            .current
            .as_mut()
            .ok_or_else(|| QuireError::Writer("no open page".into()))?;
        ops.push(Op::UseXobject {
            id: xobject_id,
            transform: XObjectTransform {
                translate_x: Some(translate_x),
                translate_y: Some(translate_y),
                scale_x: Some(scale_x),
                scale_y: Some(scale_y),
                dpi: Some(dpi),
                rotate: None,
            },
        });

        debug!(
            img_width,
            img_height,
            placed_w_mm = layout.width,
            placed_h_mm = layout.height,
            "image placed on page"
        );
        Ok(())
    }

    fn finalize(mut self) -> Result<Vec<u8>> {
        self.flush_page();
        let page_count = self.pages.len();
        let pages = std::mem::take(&mut self.pages);
        self.doc.with_pages(pages);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let bytes = self.doc.save(&PdfSaveOptions::default(), &mut warnings);

        info!(pages = page_count, bytes = bytes.len(), "document finalised");
        Ok(bytes)
    }
}
