// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Dimension resolution — determine an image's intrinsic pixel size from its
// encoded bytes. This is the assembly pipeline's only suspension point.

use std::io::Cursor;

use quire_core::error::{QuireError, Result};
use quire_core::types::{ImageEntry, PixelDimensions};
use tracing::{debug, instrument};

/// Resolves an entry's intrinsic pixel dimensions.
///
/// One resolution per entry per assembly run; results are not cached.
/// Failures carry the offending entry's id so the assembler can report
/// exactly which page broke the run.
#[allow(async_fn_in_trait)]
pub trait DimensionResolver {
    async fn resolve(&self, entry: &ImageEntry) -> Result<PixelDimensions>;
}

/// Production resolver backed by the `image` crate.
///
/// Reads only the image header (`into_dimensions`), not the full pixel
/// data, and runs the probe on the blocking thread pool so decode latency
/// never stalls the async executor.
#[derive(Debug, Default)]
pub struct ImageDimensionResolver;

impl DimensionResolver for ImageDimensionResolver {
    #[instrument(skip_all, fields(id = %entry.id, name = %entry.display_name))]
    async fn resolve(&self, entry: &ImageEntry) -> Result<PixelDimensions> {
        let id = entry.id;
        let source = entry.source.clone();

        let (width, height) = tokio::task::spawn_blocking(move || {
            let reader = image::ImageReader::new(Cursor::new(source.as_bytes()))
                .with_guessed_format()
                .map_err(|err| QuireError::Decode {
                    id,
                    reason: format!("format detection failed: {err}"),
                })?;
            reader.into_dimensions().map_err(|err| QuireError::Decode {
                id,
                reason: err.to_string(),
            })
        })
        .await
        .map_err(|err| QuireError::Decode {
            id,
            reason: format!("decode task failed: {err}"),
        })??;

        if width == 0 || height == 0 {
            return Err(QuireError::InvalidImageDimensions { id, width, height });
        }

        debug!(width, height, "dimensions resolved");
        Ok(PixelDimensions::new(width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_core::types::ImageSource;

    /// Encode a small solid-colour PNG in memory.
    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbImage::from_pixel(width, height, image::Rgb([64, 128, 192]));
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .expect("encode png");
        buf
    }

    #[tokio::test]
    async fn resolves_png_dimensions() {
        let entry = ImageEntry::new(ImageSource::new(png_bytes(40, 30)), "tiny.png");
        let dims = ImageDimensionResolver
            .resolve(&entry)
            .await
            .expect("resolve");
        assert_eq!(dims, PixelDimensions::new(40, 30));
    }

    #[tokio::test]
    async fn resolves_jpeg_dimensions() {
        let img = image::RgbImage::from_pixel(16, 9, image::Rgb([200, 10, 10]));
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Jpeg)
            .expect("encode jpeg");

        let entry = ImageEntry::new(ImageSource::new(buf), "tiny.jpg");
        let dims = ImageDimensionResolver
            .resolve(&entry)
            .await
            .expect("resolve");
        assert_eq!(dims, PixelDimensions::new(16, 9));
    }

    #[tokio::test]
    async fn garbage_bytes_fail_with_the_entry_id() {
        let entry = ImageEntry::new(
            ImageSource::new(b"definitely not an image".to_vec()),
            "corrupt.bin",
        );
        let err = ImageDimensionResolver
            .resolve(&entry)
            .await
            .expect_err("must fail");
        match err {
            QuireError::Decode { id, .. } => assert_eq!(id, entry.id),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_bytes_fail_with_the_entry_id() {
        let entry = ImageEntry::new(ImageSource::new(Vec::new()), "empty.bin");
        let err = ImageDimensionResolver
            .resolve(&entry)
            .await
            .expect_err("must fail");
        assert!(matches!(err, QuireError::Decode { id, .. } if id == entry.id));
    }
}
