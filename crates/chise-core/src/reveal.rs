//! Scroll-linked reveal of landing page sections.
//!
//! Sections fade in as soon as any part of them is inside the viewport and
//! fade back out when they leave. The viewport's bottom edge is pulled up by a
//! margin so sections reveal slightly after they first peek in. The threshold
//! does not decide the state; it only adds a notification point, the way an
//! intersection observer fires when a target crosses it.

use serde::{Deserialize, Serialize};

use crate::types::Rect;

/// Visible fraction at which a target is re-reported.
pub const DEFAULT_REVEAL_THRESHOLD: f64 = 0.2;

/// Fraction of the viewport height trimmed from the bottom edge.
pub const DEFAULT_BOTTOM_MARGIN: f64 = 0.10;

/// Visibility state of a revealed element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevealState {
    In,
    Out,
}

impl RevealState {
    /// CSS class applied for this state.
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::In => "reveal--in",
            Self::Out => "reveal--out",
        }
    }
}

/// Visible fraction of `target` (viewport coordinates) inside a viewport of
/// `viewport_height` with `bottom_margin` of its height trimmed off the bottom.
#[must_use]
pub fn reveal_ratio(target: Rect, viewport_height: f64, bottom_margin: f64) -> f64 {
    if target.height <= 0.0 {
        return 0.0;
    }
    let visible_bottom = viewport_height * (1.0 - bottom_margin);
    let overlap = target.bottom().min(visible_bottom) - target.y.max(0.0);
    (overlap / target.height).clamp(0.0, 1.0)
}

/// Tracks reveal state for a fixed set of observed targets.
#[derive(Debug, Clone)]
pub struct RevealTracker {
    threshold: f64,
    bottom_margin: f64,
    states: Vec<Option<Observation>>,
}

/// Last reported intersection of one target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Observation {
    state: RevealState,
    past_threshold: bool,
}

impl RevealTracker {
    /// Observes `targets` elements, all initially unknown.
    pub fn new(targets: usize) -> Self {
        Self {
            threshold: DEFAULT_REVEAL_THRESHOLD,
            bottom_margin: DEFAULT_BOTTOM_MARGIN,
            states: vec![None; targets],
        }
    }

    #[must_use]
    pub const fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn state(&self, target: usize) -> Option<RevealState> {
        self.states.get(target).copied().flatten().map(|seen| seen.state)
    }

    /// Updates `target` from its current bounds.
    ///
    /// A target is `In` while any part of it is visible. Returns the state
    /// whenever the target starts or stops intersecting or crosses the
    /// threshold, and on the first observation; otherwise `None`.
    pub fn observe(&mut self, target: usize, bounds: Rect, viewport_height: f64) -> Option<RevealState> {
        let ratio = reveal_ratio(bounds, viewport_height, self.bottom_margin);
        let next = Observation {
            state: if ratio > 0.0 {
                RevealState::In
            } else {
                RevealState::Out
            },
            past_threshold: ratio >= self.threshold,
        };

        let slot = self.states.get_mut(target)?;
        if *slot == Some(next) {
            return None;
        }
        *slot = Some(next);
        Some(next.state)
    }
}
