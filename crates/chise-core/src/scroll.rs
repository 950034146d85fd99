//! Smooth scrolling for the "scroll to explore" button and nav scroll state.

use std::time::Duration;

/// How long the scroll-to-explore animation takes.
pub const DEFAULT_SCROLL_DURATION: Duration = Duration::from_millis(900);

/// Space left above the target for the fixed top nav, in CSS pixels.
pub const DEFAULT_TOP_OFFSET: f64 = 72.0;

/// Scroll distance after which the nav bar turns frosted.
pub const NAV_SCROLLED_THRESHOLD: f64 = 2.0;

/// Cubic ease-in-out on `t` clamped to `[0, 1]`.
#[must_use]
pub fn ease_in_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0f64).mul_add(t, 2.0).powi(3) / 2.0
    }
}

/// Whether the top/side nav should switch to its scrolled style.
#[must_use]
pub fn nav_is_scrolled(scroll_y: f64) -> bool {
    scroll_y > NAV_SCROLLED_THRESHOLD
}

/// An eased scroll from one vertical offset to another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothScroll {
    start_y: f64,
    target_y: f64,
    duration: Duration,
}

impl SmoothScroll {
    /// Scroll from `start_y` so that an element whose document-relative top is
    /// `target_top` ends up `top_offset` pixels below the viewport top.
    #[must_use]
    pub fn towards(start_y: f64, target_top: f64, top_offset: f64) -> Self {
        Self {
            start_y,
            target_y: target_top - top_offset,
            duration: DEFAULT_SCROLL_DURATION,
        }
    }

    #[must_use]
    pub const fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub const fn target_y(&self) -> f64 {
        self.target_y
    }

    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Fraction of the animation elapsed, in `[0, 1]`.
    pub fn progress(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// Scroll offset `elapsed` into the animation.
    pub fn position_at(&self, elapsed: Duration) -> f64 {
        let eased = ease_in_out_cubic(self.progress(elapsed));
        (self.target_y - self.start_y).mul_add(eased, self.start_y)
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        self.progress(elapsed) >= 1.0
    }

    /// Positions at `steps + 1` evenly spaced instants from start to end.
    pub fn sample(&self, steps: u32) -> Vec<(Duration, f64)> {
        let steps = steps.max(1);
        (0..=steps)
            .map(|i| {
                let elapsed = self.duration.mul_f64(f64::from(i) / f64::from(steps));
                (elapsed, self.position_at(elapsed))
            })
            .collect()
    }
}
