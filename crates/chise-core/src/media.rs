//! Ordered media collection behind the project uploader.
//!
//! Files dropped or picked by the user are classified by MIME type, given a
//! fresh id and a preview handle, and appended to the collection. The user can
//! then remove entries or nudge them up and down the list.
//!
//! # Invariants
//!
//! - No two entries share an id.
//! - Order changes only through [`MediaCollection::move_by`].
//! - Every preview handle is released exactly once: on removal, on
//!   [`MediaCollection::clear`], or when the collection is dropped.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{MediaId, ValidationError};

/// Origin used for preview URIs when none is configured.
pub const DEFAULT_PREVIEW_ORIGIN: &str = "http://localhost:3000";

/// The kind of media an entry holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Audio,
}

impl MediaKind {
    /// Classifies a declared MIME type by its top-level prefix.
    ///
    /// MIME types are case-insensitive, so `Image/PNG` counts as an image.
    /// Anything outside `image/`, `video/` and `audio/` returns `None`.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let mime = mime.trim().to_ascii_lowercase();
        if mime.starts_with("image/") {
            Some(Self::Image)
        } else if mime.starts_with("video/") {
            Some(Self::Video)
        } else if mime.starts_with("audio/") {
            Some(Self::Audio)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Audio => "audio",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(Self::Image),
            "video" => Ok(Self::Video),
            "audio" => Ok(Self::Audio),
            _ => Err(ValidationError::UnknownMediaKind {
                value: s.to_string(),
            }),
        }
    }
}

/// A raw file handed over by a file picker or drop zone.
pub trait RawFile {
    /// Display name of the file.
    fn name(&self) -> &str;

    /// Declared MIME type, e.g. `image/png`. May be empty.
    fn mime_type(&self) -> &str;
}

/// A revocable display handle for an entry's content.
///
/// Not `Clone`: releasing a handle consumes it, so it cannot be released twice.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct PreviewUri(String);

impl PreviewUri {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PreviewUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Allocates and releases preview handles.
pub trait PreviewStore<F> {
    /// Creates a preview handle for `file`.
    fn create(&mut self, file: &F) -> PreviewUri;

    /// Releases a handle previously returned by [`PreviewStore::create`].
    fn release(&mut self, preview: PreviewUri);
}

/// In-memory store minting `blob:<origin>/<uuid>` URIs, the way a browser
/// mints object URLs.
#[derive(Debug)]
pub struct ObjectUrlStore {
    origin: String,
    live: HashSet<String>,
}

impl ObjectUrlStore {
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            live: HashSet::new(),
        }
    }

    /// Number of handles created and not yet released.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn is_live(&self, preview: &PreviewUri) -> bool {
        self.live.contains(preview.as_str())
    }
}

impl Default for ObjectUrlStore {
    fn default() -> Self {
        Self::new(DEFAULT_PREVIEW_ORIGIN)
    }
}

impl<F> PreviewStore<F> for ObjectUrlStore {
    fn create(&mut self, _file: &F) -> PreviewUri {
        let uri = format!("blob:{}/{}", self.origin, uuid::Uuid::new_v4());
        self.live.insert(uri.clone());
        PreviewUri(uri)
    }

    fn release(&mut self, preview: PreviewUri) {
        if !self.live.remove(preview.as_str()) {
            tracing::warn!(preview = %preview, "released a preview this store does not own");
        }
    }
}

/// A media item accepted at intake.
#[derive(Debug)]
pub struct MediaEntry<F> {
    id: MediaId,
    kind: MediaKind,
    source: F,
    preview: PreviewUri,
    added_at: DateTime<Utc>,
}

impl<F> MediaEntry<F> {
    pub const fn id(&self) -> &MediaId {
        &self.id
    }

    pub const fn kind(&self) -> MediaKind {
        self.kind
    }

    /// The underlying file handle.
    pub const fn source(&self) -> &F {
        &self.source
    }

    pub const fn preview(&self) -> &PreviewUri {
        &self.preview
    }

    pub const fn added_at(&self) -> DateTime<Utc> {
        self.added_at
    }
}

/// Target index for moving the element at `index` by `delta` in a list of
/// `len` elements, clamped to `[0, len - 1]`.
///
/// Returns 0 for an empty list.
#[must_use]
pub const fn clamp_index(index: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let target = index.saturating_add_signed(delta);
    if target > len - 1 { len - 1 } else { target }
}

/// Ordered collection of media entries.
#[derive(Debug)]
pub struct MediaCollection<F, S: PreviewStore<F>> {
    entries: Vec<MediaEntry<F>>,
    store: S,
    revision: u64,
}

impl<F, S: PreviewStore<F> + Default> Default for MediaCollection<F, S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<F, S: PreviewStore<F>> MediaCollection<F, S> {
    pub const fn new(store: S) -> Self {
        Self {
            entries: Vec::new(),
            store,
            revision: 0,
        }
    }

    /// Entries in display order.
    pub fn entries(&self) -> &[MediaEntry<F>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Counter bumped once per visible change. No-ops leave it untouched.
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub fn position(&self, id: &MediaId) -> Option<usize> {
        self.entries.iter().position(|entry| &entry.id == id)
    }

    pub fn get(&self, id: &MediaId) -> Option<&MediaEntry<F>> {
        self.entries.iter().find(|entry| &entry.id == id)
    }

    /// Removes the entry with `id` and releases its preview.
    ///
    /// Returns `false` without touching anything if the id is unknown, which
    /// happens when a remove button is pressed twice.
    pub fn remove(&mut self, id: &MediaId) -> bool {
        let Some(index) = self.position(id) else {
            tracing::debug!(%id, "remove ignored: unknown media id");
            return false;
        };

        let entry = self.entries.remove(index);
        self.store.release(entry.preview);
        self.revision += 1;
        true
    }

    /// Moves the entry with `id` by `delta` positions, clamped to the ends of
    /// the list. Entries in between shift by one; this is not a swap.
    ///
    /// Returns whether the order changed.
    pub fn move_by(&mut self, id: &MediaId, delta: isize) -> bool {
        let Some(index) = self.position(id) else {
            tracing::debug!(%id, delta, "move ignored: unknown media id");
            return false;
        };

        let target = clamp_index(index, delta, self.entries.len());
        if target == index {
            return false;
        }

        if target > index {
            self.entries[index..=target].rotate_left(1);
        } else {
            self.entries[target..=index].rotate_right(1);
        }
        self.revision += 1;
        true
    }

    /// Drops every entry, releasing all previews.
    pub fn clear(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        for entry in std::mem::take(&mut self.entries) {
            self.store.release(entry.preview);
        }
        self.revision += 1;
    }
}

impl<F: RawFile, S: PreviewStore<F>> MediaCollection<F, S> {
    /// Accepts a batch of files and appends the recognised ones in input order.
    ///
    /// Files whose MIME type is not image, video or audio are skipped. The
    /// whole batch lands in a single update; a batch with nothing recognised
    /// leaves the collection untouched. Returns the newly appended entries.
    pub fn intake<I>(&mut self, files: I) -> &[MediaEntry<F>]
    where
        I: IntoIterator<Item = F>,
    {
        let added_at = Utc::now();
        let mut accepted = Vec::new();

        for file in files {
            let Some(kind) = MediaKind::from_mime(file.mime_type()) else {
                tracing::debug!(
                    name = file.name(),
                    mime = file.mime_type(),
                    "skipping unsupported media type"
                );
                continue;
            };
            let preview = self.store.create(&file);
            accepted.push(MediaEntry {
                id: MediaId::generate(),
                kind,
                source: file,
                preview,
                added_at,
            });
        }

        let start = self.entries.len();
        if !accepted.is_empty() {
            self.entries.extend(accepted);
            self.revision += 1;
        }
        &self.entries[start..]
    }
}

impl<F, S: PreviewStore<F>> Drop for MediaCollection<F, S> {
    fn drop(&mut self) {
        for entry in self.entries.drain(..) {
            self.store.release(entry.preview);
        }
    }
}
