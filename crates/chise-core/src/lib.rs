//! Core logic for the chise marketplace front-end.
//!
//! This crate contains the parts of the front-end with real behaviour:
//! - Media: the ordered collection behind the project uploader
//! - Contrast: picking light or dark icons for floating controls, coalesced
//!   to one probe per rendering frame
//! - Scroll, reveal and grid helpers for the landing page
//! - Onboarding: the brand menu templates form

pub mod color;
pub mod contrast;
pub mod frame;
pub mod grid;
pub mod media;
pub mod onboarding;
pub mod reveal;
pub mod scroll;
pub mod types;

pub use color::{Color, prefers_light_icons, relative_luminance};
pub use contrast::{ContrastSample, ContrastSampler, ProbeHost, probe_point};
pub use frame::{ContrastMonitor, FrameCoalescer, FrameScheduler, Invalidation, ManualFrames};
pub use grid::{GridCell, GridLayout, LivePreview, PreviewState};
pub use media::{
    MediaCollection, MediaEntry, MediaKind, ObjectUrlStore, PreviewStore, PreviewUri, RawFile,
    clamp_index,
};
pub use onboarding::{MenuField, MenuForm};
pub use reveal::{RevealState, RevealTracker};
pub use scroll::{SmoothScroll, ease_in_out_cubic, nav_is_scrolled};
pub use types::{MediaId, Point, Rect, ValidationError};
