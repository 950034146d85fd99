//! Frame-coalesced scheduling.
//!
//! Scroll and resize events can fire many times per rendered frame. The
//! contrast probe only needs to run once per frame, so requests go through a
//! [`FrameCoalescer`]: a queue of depth one keyed to the frame clock. Asking
//! again while a frame is pending does nothing.

use serde::{Deserialize, Serialize};

use crate::contrast::{ContrastSample, ContrastSampler, ProbeHost};
use crate::types::Rect;

/// Request/cancel pair for "run on the next rendering frame".
pub trait FrameScheduler {
    type Token: PartialEq;

    fn request_frame(&mut self) -> Self::Token;

    fn cancel_frame(&mut self, token: Self::Token);
}

/// Holds at most one pending frame request.
#[derive(Debug)]
pub struct FrameCoalescer<T> {
    pending: Option<T>,
}

impl<T> Default for FrameCoalescer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FrameCoalescer<T> {
    pub const fn new() -> Self {
        Self { pending: None }
    }

    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl<T: PartialEq> FrameCoalescer<T> {
    /// Schedules a frame unless one is already pending. Returns whether a new
    /// frame was requested.
    pub fn request<S>(&mut self, scheduler: &mut S) -> bool
    where
        S: FrameScheduler<Token = T>,
    {
        if self.pending.is_some() {
            return false;
        }
        self.pending = Some(scheduler.request_frame());
        true
    }

    /// Consumes the pending request if `token` is the frame it scheduled.
    pub fn fire(&mut self, token: &T) -> bool {
        if self.pending.as_ref() == Some(token) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Cancels the pending frame, if any.
    pub fn cancel<S>(&mut self, scheduler: &mut S)
    where
        S: FrameScheduler<Token = T>,
    {
        if let Some(token) = self.pending.take() {
            scheduler.cancel_frame(token);
        }
    }
}

/// What invalidated the current contrast decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Invalidation {
    PageScroll,
    ContainerScroll,
    Resize,
}

/// Keeps a floating cluster's icon contrast current as the page moves.
#[derive(Debug)]
pub struct ContrastMonitor<T> {
    sampler: ContrastSampler,
    frame: FrameCoalescer<T>,
    active: bool,
    probes: u64,
}

impl<T: PartialEq> ContrastMonitor<T> {
    pub const fn new(sampler: ContrastSampler) -> Self {
        Self {
            sampler,
            frame: FrameCoalescer::new(),
            active: false,
            probes: 0,
        }
    }

    /// Starts listening and schedules the initial probe.
    pub fn attach<S>(&mut self, scheduler: &mut S)
    where
        S: FrameScheduler<Token = T>,
    {
        self.active = true;
        self.frame.request(scheduler);
    }

    /// Records an invalidating event. Returns whether a new frame was
    /// scheduled; `false` if one is already pending or the monitor is detached.
    pub fn notify<S>(&mut self, event: Invalidation, scheduler: &mut S) -> bool
    where
        S: FrameScheduler<Token = T>,
    {
        if !self.active {
            return false;
        }
        let scheduled = self.frame.request(scheduler);
        tracing::trace!(?event, scheduled, "contrast invalidated");
        scheduled
    }

    /// Runs the probe for frame `token`. Frames this monitor did not schedule
    /// are ignored.
    pub fn on_frame<H: ProbeHost>(
        &mut self,
        token: &T,
        host: &mut H,
        cluster: Rect,
    ) -> Option<ContrastSample> {
        if !self.frame.fire(token) {
            return None;
        }
        self.probes += 1;
        self.sampler.sample_cluster(host, cluster)
    }

    /// Stops listening and cancels any pending frame.
    pub fn detach<S>(&mut self, scheduler: &mut S)
    where
        S: FrameScheduler<Token = T>,
    {
        self.active = false;
        self.frame.cancel(scheduler);
    }

    pub fn decision(&self) -> bool {
        self.sampler.decision()
    }

    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Number of probes run so far.
    pub const fn probe_count(&self) -> u64 {
        self.probes
    }

    pub const fn sampler(&self) -> &ContrastSampler {
        &self.sampler
    }
}

/// Scheduler driven by hand: frames fire only when [`ManualFrames::advance`]
/// is called.
#[derive(Debug, Default)]
pub struct ManualFrames {
    next: u64,
    queued: Vec<u64>,
}

impl ManualFrames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of callbacks waiting for the next frame.
    pub fn queued(&self) -> usize {
        self.queued.len()
    }

    /// Ends the current frame and returns the tokens whose callbacks are due.
    pub fn advance(&mut self) -> Vec<u64> {
        std::mem::take(&mut self.queued)
    }
}

impl FrameScheduler for ManualFrames {
    type Token = u64;

    fn request_frame(&mut self) -> u64 {
        self.next += 1;
        self.queued.push(self.next);
        self.next
    }

    fn cancel_frame(&mut self, token: u64) {
        self.queued.retain(|queued| *queued != token);
    }
}
