//! Grid command: lay out partner sites for the landing page preview wall.

use std::io::Write;

use anyhow::{Context, Result};
use chise_core::{GridCell, GridLayout};
use serde::Serialize;

use crate::Config;

#[derive(Debug, Serialize)]
struct GridReport {
    #[serde(flatten)]
    layout: GridLayout,
    cells: Vec<GridCell>,
}

/// Runs the grid command. `cols`, `rows` and `screenshot` override the
/// configured layout.
pub fn run<W: Write>(
    writer: &mut W,
    config: &Config,
    urls: &[String],
    cols: Option<usize>,
    rows: Option<usize>,
    screenshot: bool,
    json: bool,
) -> Result<()> {
    let layout = GridLayout::new(
        cols.unwrap_or(config.grid.cols),
        rows.unwrap_or(config.grid.rows),
        config.grid.gap_px,
    )?;
    let use_screenshot = screenshot || config.grid.use_screenshot;
    let cells = layout.cells(urls, use_screenshot);

    if json {
        let report = GridReport { layout, cells };
        serde_json::to_writer_pretty(&mut *writer, &report).context("failed to write JSON")?;
        writeln!(writer)?;
        return Ok(());
    }

    writeln!(
        writer,
        "{}x{} grid, gap {}px",
        layout.cols(),
        layout.rows(),
        layout.gap_px()
    )?;
    for (index, cell) in cells.iter().enumerate() {
        let position = format!("r{}c{}", index / layout.cols() + 1, index % layout.cols() + 1);
        match cell {
            GridCell::Live { .. } => {
                writeln!(writer, "{position}  live  {}", cell.caption().unwrap_or_default())?;
            }
            GridCell::Screenshot { image_url, .. } => {
                writeln!(writer, "{position}  shot  {image_url}")?;
            }
            GridCell::Placeholder => writeln!(writer, "{position}  empty")?,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;

    fn urls(raw: &[&str]) -> Vec<String> {
        raw.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn small_grid_pads_with_placeholders() {
        let mut output = Vec::new();
        run(
            &mut output,
            &Config::default(),
            &urls(&["https://bakery.example/", "https://tea.example/menu/"]),
            Some(2),
            Some(2),
            false,
            false,
        )
        .unwrap();

        assert_snapshot!(String::from_utf8(output).unwrap(), @r"
        2x2 grid, gap 16px
        r1c1  live  bakery.example
        r1c2  live  tea.example/menu
        r2c1  empty
        r2c2  empty
        ");
    }

    #[test]
    fn screenshots_use_encoded_site_url() {
        let mut output = Vec::new();
        run(
            &mut output,
            &Config::default(),
            &urls(&["https://a.example/x", "https://b.example", "https://c.example"]),
            Some(2),
            Some(1),
            true,
            false,
        )
        .unwrap();

        assert_snapshot!(String::from_utf8(output).unwrap(), @r"
        2x1 grid, gap 16px
        r1c1  shot  https://s0.wp.com/mshots/v1/https%3A%2F%2Fa.example%2Fx?w=1200
        r1c2  shot  https://s0.wp.com/mshots/v1/https%3A%2F%2Fb.example?w=1200
        ");
    }

    #[test]
    fn default_layout_comes_from_config() {
        let mut output = Vec::new();
        run(&mut output, &Config::default(), &[], None, None, false, true).unwrap();
        let report: serde_json::Value = serde_json::from_slice(&output).unwrap();

        assert_eq!(report["cols"], 3);
        assert_eq!(report["rows"], 4);
        assert_eq!(report["cells"].as_array().unwrap().len(), 12);
        assert_eq!(report["cells"][0]["type"], "placeholder");
    }

    #[test]
    fn zero_columns_is_an_error() {
        let mut output = Vec::new();
        let result = run(&mut output, &Config::default(), &[], Some(0), None, false, false);
        assert!(result.is_err());
    }

    #[test]
    fn huge_grid_is_an_error() {
        let mut output = Vec::new();
        let err = run(
            &mut output,
            &Config::default(),
            &urls(&["https://a.example"]),
            Some(usize::MAX),
            Some(2),
            false,
            false,
        )
        .unwrap_err();
        assert!(err.to_string().contains("exceeds 1024 cells"));
        assert!(output.is_empty());
    }
}
