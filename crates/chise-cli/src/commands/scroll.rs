//! Scroll command: sample the "scroll to explore" animation.

use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use chise_core::{SmoothScroll, nav_is_scrolled};

use crate::Config;

/// Runs the scroll command.
pub fn run<W: Write>(writer: &mut W, config: &Config, from: f64, to: f64, steps: u32) -> Result<()> {
    let scroll = SmoothScroll::towards(from, to, config.scroll.top_offset_px)
        .with_duration(Duration::from_millis(config.scroll.duration_ms));
    tracing::debug!(?scroll, "planned scroll");

    writeln!(
        writer,
        "Scrolling {from} -> {} over {}ms",
        scroll.target_y(),
        scroll.duration().as_millis()
    )?;
    for (elapsed, y) in scroll.sample(steps) {
        let marker = if nav_is_scrolled(y) { "" } else { "  (nav at rest)" };
        let millis = elapsed.as_secs_f64() * 1000.0;
        writeln!(writer, "t={millis:>5.0}ms  y={y:>8.1}{marker}")?;
    }

    Ok(())
}
