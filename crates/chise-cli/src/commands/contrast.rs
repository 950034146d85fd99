//! Contrast command: pick icon colour for a stack of backgrounds.

use std::io::Write;

use anyhow::{Context, Result};
use chise_core::{Color, ContrastMonitor, ContrastSampler, ManualFrames, Point, ProbeHost, Rect};
use serde::Serialize;

use crate::Config;

/// Where the floating back/save cluster sits on the create page.
const CLUSTER: Rect = Rect::new(16.0, 16.0, 78.0, 35.0);

/// A straight chain of elements under the probe, innermost first, each with
/// the computed background colour given on the command line.
#[derive(Debug)]
struct ColorStack<'a> {
    layers: &'a [String],
}

impl ProbeHost for ColorStack<'_> {
    type Node = usize;

    fn set_overlay_hit_testing(&mut self, _enabled: bool) {}

    fn element_at(&self, _point: Point) -> Option<usize> {
        (!self.layers.is_empty()).then_some(0)
    }

    fn parent(&self, node: &usize) -> Option<usize> {
        let parent = node + 1;
        (parent < self.layers.len()).then_some(parent)
    }

    fn background_color(&self, node: &usize) -> Option<String> {
        self.layers.get(*node).cloned()
    }
}

#[derive(Debug, Serialize)]
struct LayerView<'a> {
    input: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    luminance: Option<f64>,
}

#[derive(Debug, Serialize)]
struct ContrastReport<'a> {
    probe: Point,
    layers: Vec<LayerView<'a>>,
    /// `None` when no layer had a usable background.
    light_icons: Option<bool>,
}

/// Runs the contrast command.
pub fn run<W: Write>(writer: &mut W, config: &Config, colors: &[String], json: bool) -> Result<()> {
    let mut host = ColorStack { layers: colors };
    let mut frames = ManualFrames::new();
    let mut monitor = ContrastMonitor::new(ContrastSampler::new(config.probe_margin_px));

    // One attach probe on the first frame, as on page load.
    monitor.attach(&mut frames);
    let mut sample = None;
    for token in frames.advance() {
        sample = monitor.on_frame(&token, &mut host, CLUSTER).or(sample);
    }
    monitor.detach(&mut frames);
    tracing::debug!(probes = monitor.probe_count(), "contrast probed");

    let report = ContrastReport {
        probe: chise_core::probe_point(CLUSTER, monitor.sampler().margin()),
        layers: colors
            .iter()
            .map(|input| {
                let color = input.parse::<Color>().ok();
                LayerView {
                    input,
                    color,
                    luminance: color.map(|c| c.luminance()),
                }
            })
            .collect(),
        light_icons: sample.map(|s| s.decision),
    };

    if json {
        serde_json::to_writer_pretty(&mut *writer, &report).context("failed to write JSON")?;
        writeln!(writer)?;
        return Ok(());
    }

    writeln!(writer, "Probe at ({}, {})", report.probe.x, report.probe.y)?;
    for (index, layer) in report.layers.iter().enumerate() {
        match (layer.color, layer.luminance) {
            (Some(color), _) if color.is_transparent() => {
                writeln!(writer, "  {index}: {color} transparent")?;
            }
            (Some(color), Some(luminance)) => {
                writeln!(writer, "  {index}: {color} luminance {luminance:.3}")?;
            }
            _ => writeln!(writer, "  {index}: {} unrecognised", layer.input)?,
        }
    }

    match sample {
        Some(sample) if sample.decision => writeln!(writer, "Icons: light")?,
        Some(_) => writeln!(writer, "Icons: dark")?,
        None => writeln!(writer, "Icons: unchanged (no opaque background)")?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;

    fn run_to_string(colors: &[&str]) -> String {
        let colors: Vec<String> = colors.iter().map(ToString::to_string).collect();
        let mut output = Vec::new();
        run(&mut output, &Config::default(), &colors, false).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn dark_section_behind_transparent_text() {
        assert_snapshot!(run_to_string(&["rgba(0, 0, 0, 0)", "rgb(17, 17, 17)", "rgb(255, 255, 255)"]), @r"
        Probe at (34, 34)
          0: rgba(0, 0, 0, 0) transparent
          1: rgb(17, 17, 17) luminance 0.006
          2: rgb(255, 255, 255) luminance 1.000
        Icons: light
        ");
    }

    #[test]
    fn unrecognised_layers_are_skipped() {
        assert_snapshot!(run_to_string(&["linear-gradient(red, blue)", "rgb(128, 128, 128)"]), @r"
        Probe at (34, 34)
          0: linear-gradient(red, blue) unrecognised
          1: rgb(128, 128, 128) luminance 0.216
        Icons: light
        ");
    }

    #[test]
    fn white_page_keeps_dark_icons() {
        assert_snapshot!(run_to_string(&["rgb(255, 255, 255)"]), @r"
        Probe at (34, 34)
          0: rgb(255, 255, 255) luminance 1.000
        Icons: dark
        ");
    }

    #[test]
    fn all_transparent_is_inconclusive() {
        let output = run_to_string(&["transparent", "rgba(255, 255, 255, 0)"]);
        assert!(output.ends_with("Icons: unchanged (no opaque background)\n"));
    }

    #[test]
    fn json_report_has_decision() {
        let colors = vec!["rgb(0, 0, 0)".to_string()];
        let mut output = Vec::new();
        run(&mut output, &Config::default(), &colors, true).unwrap();
        let report: serde_json::Value = serde_json::from_slice(&output).unwrap();

        assert_eq!(report["light_icons"], true);
        assert_eq!(report["layers"][0]["color"]["r"], 0);
        assert_eq!(report["probe"]["x"], 34.0);
    }
}
