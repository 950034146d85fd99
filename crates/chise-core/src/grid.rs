//! Partner site grid on the landing page.
//!
//! Each cell shows a partner site either as a live, sandboxed preview or as a
//! screenshot from the mshots service. Live previews that have not loaded
//! within a few seconds fall back to the screenshot. Unused cells render as
//! placeholders so the grid keeps its shape.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::ValidationError;

/// Screenshot service used for static previews.
pub const SCREENSHOT_ENDPOINT: &str = "https://s0.wp.com/mshots/v1/";

/// Width requested from the screenshot service.
pub const SCREENSHOT_WIDTH: u32 = 1200;

/// How long a live preview may take to load before falling back.
pub const LIVE_PREVIEW_TIMEOUT: Duration = Duration::from_millis(3500);

/// Upper bound on `cols * rows`.
pub const MAX_GRID_CELLS: usize = 1024;

/// Grid dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridLayout {
    cols: usize,
    rows: usize,
    gap_px: u32,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            cols: 3,
            rows: 4,
            gap_px: 16,
        }
    }
}

impl GridLayout {
    pub fn new(cols: usize, rows: usize, gap_px: u32) -> Result<Self, ValidationError> {
        if cols == 0 || rows == 0 {
            return Err(ValidationError::EmptyGrid { cols, rows });
        }
        if cols.checked_mul(rows).is_none_or(|cells| cells > MAX_GRID_CELLS) {
            return Err(ValidationError::GridTooLarge {
                cols,
                rows,
                max: MAX_GRID_CELLS,
            });
        }
        Ok(Self { cols, rows, gap_px })
    }

    pub const fn cols(&self) -> usize {
        self.cols
    }

    pub const fn rows(&self) -> usize {
        self.rows
    }

    pub const fn gap_px(&self) -> u32 {
        self.gap_px
    }

    /// Number of cells. Bounded by [`MAX_GRID_CELLS`] even for layouts
    /// deserialized without validation.
    pub const fn capacity(&self) -> usize {
        let cells = self.cols.saturating_mul(self.rows);
        if cells > MAX_GRID_CELLS { MAX_GRID_CELLS } else { cells }
    }

    /// Lays out `urls` row by row. URLs beyond capacity are dropped; unused
    /// cells become placeholders.
    pub fn cells<S: AsRef<str>>(&self, urls: &[S], use_screenshot: bool) -> Vec<GridCell> {
        let capacity = self.capacity();
        if urls.len() > capacity {
            tracing::debug!(
                dropped = urls.len() - capacity,
                capacity,
                "grid is full, dropping extra sites"
            );
        }

        let mut cells: Vec<GridCell> = urls
            .iter()
            .take(capacity)
            .map(|url| {
                let url = url.as_ref().to_string();
                if use_screenshot {
                    GridCell::Screenshot {
                        image_url: screenshot_url(&url),
                        url,
                    }
                } else {
                    GridCell::Live { url }
                }
            })
            .collect();
        cells.resize(capacity, GridCell::Placeholder);
        cells
    }
}

/// One cell of the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GridCell {
    /// A sandboxed live preview of the site.
    Live { url: String },
    /// A static screenshot of the site.
    Screenshot { url: String, image_url: String },
    Placeholder,
}

impl GridCell {
    /// Caption shown in the corner of the cell.
    pub fn caption(&self) -> Option<String> {
        match self {
            Self::Live { url } | Self::Screenshot { url, .. } => Some(pretty_url(url)),
            Self::Placeholder => None,
        }
    }
}

/// Screenshot URL for `site`.
#[must_use]
pub fn screenshot_url(site: &str) -> String {
    format!(
        "{SCREENSHOT_ENDPOINT}{}?w={SCREENSHOT_WIDTH}",
        urlencoding::encode(site)
    )
}

/// Short form of a URL for captions: host plus path, without a trailing
/// slash. Falls back to the raw string when it is not an absolute URL.
#[must_use]
pub fn pretty_url(raw: &str) -> String {
    let Ok(parsed) = url::Url::parse(raw) else {
        return raw.to_string();
    };
    let host = parsed.host_str().unwrap_or_default();
    let path = parsed.path().strip_suffix('/').unwrap_or_else(|| parsed.path());
    let pretty = format!("{host}{path}");
    if pretty.is_empty() { raw.to_string() } else { pretty }
}

/// Load state of a live preview cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreviewState {
    Loading,
    Loaded,
    /// Gave up on the live preview; showing the screenshot instead.
    Fallback,
}

/// Live preview that falls back to a screenshot if it loads too slowly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LivePreview {
    state: PreviewState,
    timeout: Duration,
}

impl Default for LivePreview {
    fn default() -> Self {
        Self::new(LIVE_PREVIEW_TIMEOUT)
    }
}

impl LivePreview {
    pub const fn new(timeout: Duration) -> Self {
        Self {
            state: PreviewState::Loading,
            timeout,
        }
    }

    pub const fn state(&self) -> PreviewState {
        self.state
    }

    /// The frame reported a load. Ignored once the fallback is showing.
    pub fn mark_loaded(&mut self) {
        if self.state == PreviewState::Loading {
            self.state = PreviewState::Loaded;
        }
    }

    /// Advances the clock; switches to the fallback once `elapsed` reaches the
    /// timeout without a load.
    pub fn tick(&mut self, elapsed: Duration) -> PreviewState {
        if self.state == PreviewState::Loading && elapsed >= self.timeout {
            self.state = PreviewState::Fallback;
        }
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_is_three_by_four() {
        let layout = GridLayout::default();
        assert_eq!(layout.capacity(), 12);
        assert_eq!(layout.gap_px(), 16);
    }

    #[test]
    fn rejects_empty_dimensions() {
        assert_eq!(
            GridLayout::new(0, 4, 16),
            Err(ValidationError::EmptyGrid { cols: 0, rows: 4 })
        );
        assert!(GridLayout::new(2, 0, 16).is_err());
    }

    #[test]
    fn rejects_oversized_dimensions() {
        assert_eq!(
            GridLayout::new(usize::MAX, 2, 0),
            Err(ValidationError::GridTooLarge {
                cols: usize::MAX,
                rows: 2,
                max: MAX_GRID_CELLS
            })
        );
        assert!(GridLayout::new(MAX_GRID_CELLS + 1, 1, 0).is_err());

        let largest = GridLayout::new(MAX_GRID_CELLS, 1, 0).unwrap();
        assert_eq!(largest.cells(&["https://a.example"], false).len(), MAX_GRID_CELLS);
    }

    #[test]
    fn pads_with_placeholders() {
        let layout = GridLayout::new(2, 2, 8).unwrap();
        let cells = layout.cells(&["https://a.example"], false);
        assert_eq!(
            cells,
            vec![
                GridCell::Live {
                    url: "https://a.example".to_string()
                },
                GridCell::Placeholder,
                GridCell::Placeholder,
                GridCell::Placeholder,
            ]
        );
    }

    #[test]
    fn truncates_to_capacity() {
        let layout = GridLayout::new(2, 1, 8).unwrap();
        let urls = ["a", "b", "c"];
        let cells = layout.cells(&urls, false);
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[1], GridCell::Live { url: "b".to_string() });
    }

    #[test]
    fn screenshot_cells_encode_site_url() {
        let layout = GridLayout::new(1, 1, 0).unwrap();
        let cells = layout.cells(&["https://shop.example/menu?x=1"], true);
        assert_eq!(
            cells[0],
            GridCell::Screenshot {
                url: "https://shop.example/menu?x=1".to_string(),
                image_url:
                    "https://s0.wp.com/mshots/v1/https%3A%2F%2Fshop.example%2Fmenu%3Fx%3D1?w=1200"
                        .to_string(),
            }
        );
    }

    #[test]
    fn pretty_url_strips_scheme_and_trailing_slash() {
        assert_eq!(pretty_url("https://brand.example/"), "brand.example");
        assert_eq!(pretty_url("https://brand.example/shop/"), "brand.example/shop");
        assert_eq!(pretty_url("not a url"), "not a url");
    }

    #[test]
    fn captions() {
        assert_eq!(
            GridCell::Live {
                url: "https://x.example/a".to_string()
            }
            .caption()
            .as_deref(),
            Some("x.example/a")
        );
        assert_eq!(GridCell::Placeholder.caption(), None);
    }

    #[test]
    fn live_preview_falls_back_after_timeout() {
        let mut preview = LivePreview::default();
        assert_eq!(preview.tick(Duration::from_millis(3000)), PreviewState::Loading);
        assert_eq!(preview.tick(LIVE_PREVIEW_TIMEOUT), PreviewState::Fallback);

        preview.mark_loaded();
        assert_eq!(preview.state(), PreviewState::Fallback);
    }

    #[test]
    fn loaded_preview_never_falls_back() {
        let mut preview = LivePreview::default();
        preview.mark_loaded();
        assert_eq!(preview.tick(Duration::from_secs(60)), PreviewState::Loaded);
    }

    #[test]
    fn cells_serialize_with_type_tag() {
        let json = serde_json::to_string(&GridCell::Placeholder).unwrap();
        assert_eq!(json, r#"{"type":"placeholder"}"#);
    }
}
