use crate::error::{self, Result};
use log::info;
use printpdf::{BuiltinFont, Mm, PdfDocument, Pt};
use serde::{Deserialize, Serialize};
use snafu::ResultExt;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

/// Default name of the report written to the current working directory.
pub const DEFAULT_REPORT_PATH: &str = "abc.pdf";
/// Title line drawn at the top of the report.
pub const REPORT_TITLE: &str = "Subnet IDs are:";

const POINTS_PER_INCH: f64 = 72.0;

/// Layout and destination settings for the subnet report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportConfig {
    pub page_width_inches: f64,
    pub page_height_inches: f64,
    pub font_size_points: f64,
    pub left_margin_inches: f64,
    pub line_spacing_points: f64,
    pub output_path: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            page_width_inches: 8.5,
            page_height_inches: 11.0,
            font_size_points: 12.0,
            left_margin_inches: 1.0,
            line_spacing_points: 12.0,
            output_path: PathBuf::from(DEFAULT_REPORT_PATH),
        }
    }
}

impl ReportConfig {
    /// Baseline positions in points from the bottom edge: the title first,
    /// then one entry per line. The title sits one inch below the top edge
    /// and a double line spacing separates it from the first entry.
    fn baselines(&self, line_count: usize) -> Vec<f64> {
        let mut v = (self.page_height_inches - 1.0) * POINTS_PER_INCH;
        let mut baselines = vec![v];
        v -= 2.0 * self.line_spacing_points;
        for _ in 0..line_count {
            baselines.push(v);
            v -= self.line_spacing_points;
        }
        baselines
    }
}

/// Write a one-page PDF containing the title and one line per entry,
/// overwriting anything already at the configured output path.
///
/// There is no pagination: entries that exceed the page run off the bottom
/// edge.
pub fn render_report(config: &ReportConfig, lines: &[String]) -> Result<()> {
    info!(
        "Writing {} subnet ids to '{}'",
        lines.len(),
        config.output_path.display()
    );
    let (doc, page, layer) = PdfDocument::new(
        "Subnet report",
        Mm::from(Pt((config.page_width_inches * POINTS_PER_INCH) as f32)),
        Mm::from(Pt((config.page_height_inches * POINTS_PER_INCH) as f32)),
        "Layer 1",
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| {
            error::ReportRenderSnafu {
                message: e.to_string(),
            }
            .build()
        })?;
    let layer = doc.get_page(page).get_layer(layer);
    let x = Mm::from(Pt((config.left_margin_inches * POINTS_PER_INCH) as f32));
    let baselines = config.baselines(lines.len());
    layer.use_text(
        REPORT_TITLE,
        config.font_size_points as f32,
        x,
        Mm::from(Pt(baselines[0] as f32)),
        &font,
    );
    for (line, baseline) in lines.iter().zip(baselines[1..].iter()) {
        layer.use_text(
            line.as_str(),
            config.font_size_points as f32,
            x,
            Mm::from(Pt(*baseline as f32)),
            &font,
        );
    }
    let file = File::create(&config.output_path).context(error::ReportFileSnafu {
        path: &config.output_path,
    })?;
    doc.save(&mut BufWriter::new(file)).map_err(|e| {
        error::ReportRenderSnafu {
            message: e.to_string(),
        }
        .build()
    })?;
    Ok(())
}

#[test]
fn default_config_matches_the_fixed_layout() {
    let config = ReportConfig::default();
    assert_eq!(config.page_width_inches, 8.5);
    assert_eq!(config.page_height_inches, 11.0);
    assert_eq!(config.font_size_points, 12.0);
    assert_eq!(config.left_margin_inches, 1.0);
    assert_eq!(config.line_spacing_points, 12.0);
    assert_eq!(config.output_path, PathBuf::from("abc.pdf"));
}

#[test]
fn baselines_descend_by_a_fixed_increment() {
    let config = ReportConfig::default();
    assert_eq!(config.baselines(2), vec![720.0, 696.0, 684.0]);
}

#[test]
fn baselines_for_an_empty_report_hold_only_the_title() {
    let config = ReportConfig::default();
    assert_eq!(config.baselines(0), vec![720.0]);
}

#[test]
fn renders_a_pdf_for_zero_subnets() {
    let dir = tempfile::tempdir().unwrap();
    let config = ReportConfig {
        output_path: dir.path().join("report.pdf"),
        ..ReportConfig::default()
    };
    render_report(&config, &[]).unwrap();
    let bytes = std::fs::read(&config.output_path).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn overwrites_an_existing_report() {
    let dir = tempfile::tempdir().unwrap();
    let output_path = dir.path().join("report.pdf");
    std::fs::write(&output_path, "not a pdf").unwrap();
    let config = ReportConfig {
        output_path: output_path.clone(),
        ..ReportConfig::default()
    };
    let lines = vec!["subnet-1".to_string(), "subnet-2".to_string()];
    render_report(&config, &lines).unwrap();
    let bytes = std::fs::read(&output_path).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}
