// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Assembly configuration.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::PaperSize;

/// Default file name for the finished document.
pub const DEFAULT_OUTPUT_NAME: &str = "images-to-pdf.pdf";

/// Fixed page geometry for an assembly run, in millimetres.
///
/// The margin is symmetric on all four sides and shrinks the usable content
/// box before fitting, not after.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width_mm: f64,
    pub height_mm: f64,
    pub margin_mm: f64,
}

impl PageGeometry {
    pub fn new(width_mm: f64, height_mm: f64, margin_mm: f64) -> Self {
        Self {
            width_mm,
            height_mm,
            margin_mm,
        }
    }

    /// Geometry for a standard paper size with the given margin.
    pub fn from_paper(paper: PaperSize, margin_mm: f64) -> Self {
        let (width_mm, height_mm) = paper.dimensions_mm();
        Self {
            width_mm,
            height_mm,
            margin_mm,
        }
    }
}

impl Default for PageGeometry {
    /// A4 portrait with a 10 mm margin on all sides.
    fn default() -> Self {
        Self {
            width_mm: 210.0,
            height_mm: 297.0,
            margin_mm: 10.0,
        }
    }
}

/// What the assembler does when one image fails to resolve.
///
/// The two policies are observably different: `Abort` discards the whole
/// run and produces no document, `Skip` omits the failing page and reports
/// which entries were dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailurePolicy {
    /// Abort the entire run on the first failure. No partial document is
    /// ever produced; the caller retries from an unmodified store.
    #[default]
    Abort,
    /// Skip the failing entry, continue with the rest, and report the
    /// skipped ids in the assembly output.
    Skip,
}

/// Settings for one assembly run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssemblyConfig {
    /// Page size and margin applied to every page.
    pub page: PageGeometry,
    /// Per-image failure handling.
    pub failure_policy: FailurePolicy,
    /// Title metadata embedded in the output document, if any.
    pub title: Option<String>,
    /// File name used when the caller saves the finished document.
    pub output_name: String,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            page: PageGeometry::default(),
            failure_policy: FailurePolicy::default(),
            title: None,
            output_name: DEFAULT_OUTPUT_NAME.to_string(),
        }
    }
}

impl AssemblyConfig {
    /// Load a configuration from a JSON file.
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Save the configuration as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let raw = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), raw)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_geometry_is_a4_with_10mm_margin() {
        let geom = PageGeometry::default();
        assert_eq!(geom.width_mm, 210.0);
        assert_eq!(geom.height_mm, 297.0);
        assert_eq!(geom.margin_mm, 10.0);
    }

    #[test]
    fn from_paper_uses_paper_dimensions() {
        let geom = PageGeometry::from_paper(PaperSize::Letter, 12.5);
        assert_eq!(geom.width_mm, 216.0);
        assert_eq!(geom.height_mm, 279.0);
        assert_eq!(geom.margin_mm, 12.5);
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = AssemblyConfig {
            failure_policy: FailurePolicy::Skip,
            title: Some("Holiday photos".into()),
            ..AssemblyConfig::default()
        };
        let json = serde_json::to_string(&config).expect("serialize");
        let back: AssemblyConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.failure_policy, FailurePolicy::Skip);
        assert_eq!(back.title.as_deref(), Some("Holiday photos"));
        assert_eq!(back.output_name, DEFAULT_OUTPUT_NAME);
    }

    #[test]
    fn default_policy_is_abort() {
        assert_eq!(FailurePolicy::default(), FailurePolicy::Abort);
    }
}
