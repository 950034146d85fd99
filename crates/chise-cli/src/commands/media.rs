//! Media command: load files into the uploader's collection and edit it.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use chise_core::{MediaCollection, MediaEntry, MediaId, MediaKind, ObjectUrlStore, RawFile};
use serde::Serialize;

use crate::Config;

/// A file on disk offered to the uploader.
#[derive(Debug, Clone)]
pub struct DiskFile {
    path: PathBuf,
    name: String,
    mime_type: String,
    size: u64,
}

impl DiskFile {
    /// Reads metadata for `path` and guesses its MIME type from the extension.
    pub fn open(path: &Path) -> Result<Self> {
        let metadata = std::fs::metadata(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        if !metadata.is_file() {
            anyhow::bail!("not a file: {}", path.display());
        }

        let name = path.file_name().map_or_else(
            || path.display().to_string(),
            |name| name.to_string_lossy().into_owned(),
        );
        let mime_type = mime_guess::from_path(path)
            .first_raw()
            .unwrap_or_default()
            .to_string();

        Ok(Self {
            path: path.to_path_buf(),
            name,
            mime_type,
            size: metadata.len(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub const fn size(&self) -> u64 {
        self.size
    }
}

impl RawFile for DiskFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn mime_type(&self) -> &str {
        &self.mime_type
    }
}

/// An edit applied to the collection after intake. Entries are addressed by
/// file name; the first entry with that name wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaOp {
    Move { name: String, delta: isize },
    Remove { name: String },
}

impl MediaOp {
    fn name(&self) -> &str {
        match self {
            Self::Move { name, .. } | Self::Remove { name } => name,
        }
    }
}

impl FromStr for MediaOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(name) = s.strip_prefix("remove:") {
            if name.is_empty() {
                return Err("remove needs a file name".to_string());
            }
            return Ok(Self::Remove {
                name: name.to_string(),
            });
        }

        if let Some(rest) = s.strip_prefix("move:") {
            let (name, delta) = rest
                .rsplit_once(':')
                .ok_or_else(|| format!("expected move:NAME:DELTA, got `{s}`"))?;
            if name.is_empty() {
                return Err("move needs a file name".to_string());
            }
            let delta = delta
                .parse::<isize>()
                .map_err(|e| format!("invalid move delta `{delta}`: {e}"))?;
            return Ok(Self::Move {
                name: name.to_string(),
                delta,
            });
        }

        Err(format!("expected move:NAME:DELTA or remove:NAME, got `{s}`"))
    }
}

#[derive(Debug, Serialize)]
struct EntryView<'a> {
    id: &'a MediaId,
    kind: MediaKind,
    name: &'a str,
    path: &'a Path,
    mime_type: &'a str,
    size: u64,
    preview: &'a str,
    added_at: String,
}

impl<'a> From<&'a MediaEntry<DiskFile>> for EntryView<'a> {
    fn from(entry: &'a MediaEntry<DiskFile>) -> Self {
        Self {
            id: entry.id(),
            kind: entry.kind(),
            name: entry.source().name(),
            path: entry.source().path(),
            mime_type: entry.source().mime_type(),
            size: entry.source().size(),
            preview: entry.preview().as_str(),
            added_at: entry.added_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
struct MediaReport<'a> {
    offered: usize,
    accepted: usize,
    entries: Vec<EntryView<'a>>,
}

type DiskCollection = MediaCollection<DiskFile, ObjectUrlStore>;

fn find_by_name(collection: &DiskCollection, name: &str) -> Option<MediaId> {
    collection
        .entries()
        .iter()
        .find(|entry| entry.source().name() == name)
        .map(|entry| entry.id().clone())
}

fn apply(collection: &mut DiskCollection, op: &MediaOp) {
    let Some(id) = find_by_name(collection, op.name()) else {
        tracing::warn!(name = op.name(), "no media entry with that name");
        return;
    };

    let changed = match op {
        MediaOp::Move { delta, .. } => collection.move_by(&id, *delta),
        MediaOp::Remove { .. } => collection.remove(&id),
    };
    tracing::debug!(?op, changed, "applied media edit");
}

/// Runs the media command.
pub fn run<W: Write>(
    writer: &mut W,
    config: &Config,
    paths: &[PathBuf],
    ops: &[MediaOp],
    json: bool,
) -> Result<()> {
    let files = paths
        .iter()
        .map(|path| DiskFile::open(path))
        .collect::<Result<Vec<_>>>()?;
    let offered = files.len();

    let mut collection = MediaCollection::new(ObjectUrlStore::new(config.preview_origin.as_str()));
    let accepted = collection.intake(files).len();
    tracing::info!(offered, accepted, "media intake complete");

    for op in ops {
        apply(&mut collection, op);
    }

    if json {
        let report = MediaReport {
            offered,
            accepted,
            entries: collection.entries().iter().map(EntryView::from).collect(),
        };
        serde_json::to_writer_pretty(&mut *writer, &report).context("failed to write JSON")?;
        writeln!(writer)?;
        return Ok(());
    }

    writeln!(writer, "Accepted {accepted} of {offered} files.")?;
    if collection.is_empty() {
        writeln!(writer, "No media.")?;
        return Ok(());
    }
    for (index, entry) in collection.entries().iter().enumerate() {
        writeln!(
            writer,
            "{}. {:<5}  {} ({} bytes)",
            index + 1,
            entry.kind().as_str(),
            entry.source().name(),
            entry.source().size()
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;

    fn write_files(dir: &Path, files: &[(&str, &str)]) -> Vec<PathBuf> {
        files
            .iter()
            .map(|(name, contents)| {
                let path = dir.join(name);
                std::fs::write(&path, contents).unwrap();
                path
            })
            .collect()
    }

    fn run_to_string(paths: &[PathBuf], ops: &[MediaOp]) -> String {
        let mut output = Vec::new();
        run(&mut output, &Config::default(), paths, ops, false).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn parses_ops() {
        assert_eq!(
            "move:clip.mp4:-2".parse::<MediaOp>().unwrap(),
            MediaOp::Move {
                name: "clip.mp4".to_string(),
                delta: -2
            }
        );
        assert_eq!(
            "move:a:b.png:3".parse::<MediaOp>().unwrap(),
            MediaOp::Move {
                name: "a:b.png".to_string(),
                delta: 3
            }
        );
        assert_eq!(
            "remove:song.mp3".parse::<MediaOp>().unwrap(),
            MediaOp::Remove {
                name: "song.mp3".to_string()
            }
        );
        assert!("move:clip.mp4".parse::<MediaOp>().is_err());
        assert!("move:clip.mp4:up".parse::<MediaOp>().is_err());
        assert!("remove:".parse::<MediaOp>().is_err());
        assert!("swap:a:b".parse::<MediaOp>().is_err());
    }

    #[test]
    fn disk_file_guesses_mime_from_extension() {
        let temp = tempfile::tempdir().unwrap();
        let paths = write_files(temp.path(), &[("hero.PNG", "png"), ("notes.txt", "hi")]);

        let hero = DiskFile::open(&paths[0]).unwrap();
        assert_eq!(hero.mime_type(), "image/png");
        assert_eq!(hero.size(), 3);
        assert_eq!(DiskFile::open(&paths[1]).unwrap().mime_type(), "text/plain");
    }

    #[test]
    fn missing_file_is_an_error() {
        let temp = tempfile::tempdir().unwrap();
        let err = DiskFile::open(&temp.path().join("nope.png")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn media_command_filters_and_reorders() {
        let temp = tempfile::tempdir().unwrap();
        let paths = write_files(
            temp.path(),
            &[
                ("hero.png", "png"),
                ("brief.pdf", "pdf"),
                ("clip.mp4", "video"),
                ("song.mp3", "mp3"),
                ("logo.svg", "<svg/>"),
            ],
        );
        let ops = [
            "move:logo.svg:-999".parse().unwrap(),
            "remove:song.mp3".parse().unwrap(),
            "remove:song.mp3".parse().unwrap(),
            "move:missing.png:1".parse().unwrap(),
        ];

        assert_snapshot!(run_to_string(&paths, &ops), @r"
        Accepted 4 of 5 files.
        1. image  logo.svg (6 bytes)
        2. image  hero.png (3 bytes)
        3. video  clip.mp4 (5 bytes)
        ");
    }

    #[test]
    fn media_command_reports_empty_collection() {
        let temp = tempfile::tempdir().unwrap();
        let paths = write_files(temp.path(), &[("brief.pdf", "pdf")]);

        assert_snapshot!(run_to_string(&paths, &[]), @r"
        Accepted 0 of 1 files.
        No media.
        ");
    }

    #[test]
    fn media_command_json_lists_previews() {
        let temp = tempfile::tempdir().unwrap();
        let paths = write_files(temp.path(), &[("a.png", "a"), ("b.wav", "b")]);
        let config = Config {
            preview_origin: "https://chise.test".to_string(),
            ..Config::default()
        };

        let mut output = Vec::new();
        run(&mut output, &config, &paths, &[], true).unwrap();
        let report: serde_json::Value = serde_json::from_slice(&output).unwrap();

        assert_eq!(report["offered"], 2);
        assert_eq!(report["accepted"], 2);
        let entries = report["entries"].as_array().unwrap();
        assert_eq!(entries[0]["name"], "a.png");
        assert_eq!(entries[1]["kind"], "audio");
        assert!(
            entries[0]["preview"]
                .as_str()
                .unwrap()
                .starts_with("blob:https://chise.test/")
        );
        assert_ne!(entries[0]["id"], entries[1]["id"]);
    }
}
