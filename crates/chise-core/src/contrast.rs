//! Icon contrast for floating controls.
//!
//! The back/save cluster on the create page floats over arbitrary content. To
//! keep its icons readable, the sampler looks at whatever is painted behind the
//! cluster and decides between light and dark icons.
//!
//! # Algorithm
//!
//! 1. Take the probe point: the cluster's top-left corner, moved inward by a
//!    margin so it lands inside the cluster's footprint.
//! 2. Make the cluster invisible to hit-testing and find the topmost element
//!    under the point.
//! 3. Walk outward through ancestors until one has an opaque-enough
//!    background colour.
//! 4. Light icons if that colour's relative luminance is below 0.5.
//!
//! A probe that finds nothing is inconclusive and keeps the last decision.

use serde::{Deserialize, Serialize};

use crate::color::{Color, prefers_light_icons};
use crate::types::{Point, Rect};

/// Default inset from the cluster's top-left corner, in CSS pixels.
pub const DEFAULT_PROBE_MARGIN: f64 = 18.0;

/// Host capabilities the sampler needs from the rendering environment.
pub trait ProbeHost {
    /// Handle to a rendered element.
    type Node;

    /// Toggles whether the control cluster takes part in hit-testing.
    fn set_overlay_hit_testing(&mut self, enabled: bool);

    /// Topmost element at `point`, if any.
    fn element_at(&self, point: Point) -> Option<Self::Node>;

    /// Parent element, or `None` at the document root.
    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Computed `background-color` of `node`, as the host reports it.
    fn background_color(&self, node: &Self::Node) -> Option<String>;
}

/// Outcome of a conclusive probe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContrastSample {
    pub luminance: f64,
    /// `true` when the background is dark and icons should be light.
    pub decision: bool,
}

impl ContrastSample {
    pub fn from_color(color: Color) -> Self {
        let luminance = color.luminance();
        Self {
            luminance,
            decision: prefers_light_icons(luminance),
        }
    }
}

/// Probe point for a control cluster occupying `cluster`.
#[must_use]
pub fn probe_point(cluster: Rect, margin: f64) -> Point {
    Point::new(cluster.x + margin, cluster.y + margin)
}

/// Finds the first ancestor-or-self of the element under `point` with a
/// usable background colour.
///
/// Backgrounds that are transparent or not in `rgb()`/`rgba()` form are
/// skipped.
pub fn resolve_background<H: ProbeHost>(host: &mut H, point: Point) -> Option<Color> {
    host.set_overlay_hit_testing(false);
    let hit = host.element_at(point);
    host.set_overlay_hit_testing(true);

    let mut node = hit?;
    loop {
        if let Some(color) = host
            .background_color(&node)
            .and_then(|raw| raw.parse::<Color>().ok())
            .filter(|color| !color.is_transparent())
        {
            return Some(color);
        }
        node = host.parent(&node)?;
    }
}

/// Keeps the current icon decision for one floating cluster.
#[derive(Debug, Clone)]
pub struct ContrastSampler {
    margin: f64,
    last: Option<ContrastSample>,
}

impl Default for ContrastSampler {
    fn default() -> Self {
        Self::new(DEFAULT_PROBE_MARGIN)
    }
}

impl ContrastSampler {
    pub const fn new(margin: f64) -> Self {
        Self { margin, last: None }
    }

    pub const fn margin(&self) -> f64 {
        self.margin
    }

    /// Current decision. Dark icons until the first conclusive sample.
    pub fn decision(&self) -> bool {
        self.last.is_some_and(|sample| sample.decision)
    }

    pub const fn last_sample(&self) -> Option<ContrastSample> {
        self.last
    }

    /// Probes at an explicit point. Returns `None` if inconclusive, in which
    /// case the previous decision stays in effect.
    pub fn sample<H: ProbeHost>(&mut self, host: &mut H, point: Point) -> Option<ContrastSample> {
        let Some(color) = resolve_background(host, point) else {
            tracing::debug!(x = point.x, y = point.y, "contrast probe inconclusive");
            return None;
        };

        let sample = ContrastSample::from_color(color);
        if self.last.map(|last| last.decision) != Some(sample.decision) {
            tracing::debug!(%color, luminance = sample.luminance, light_icons = sample.decision, "icon contrast changed");
        }
        self.last = Some(sample);
        Some(sample)
    }

    /// Probes behind a cluster at its configured margin.
    pub fn sample_cluster<H: ProbeHost>(
        &mut self,
        host: &mut H,
        cluster: Rect,
    ) -> Option<ContrastSample> {
        self.sample(host, probe_point(cluster, self.margin))
    }
}
