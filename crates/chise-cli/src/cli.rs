//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::media::MediaOp;
use crate::commands::menu::FieldValue;

/// Marketplace front-end toolkit.
///
/// Drives the uploader's media collection, icon contrast decisions and the
/// landing page helpers from the command line.
#[derive(Debug, Parser)]
#[command(name = "chise", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Add files to a media collection, then apply edits in order.
    Media {
        /// Files to add. Types other than image, video and audio are skipped.
        files: Vec<PathBuf>,

        /// Edit to apply after intake: `move:NAME:DELTA` or `remove:NAME`.
        #[arg(long = "op", value_name = "OP")]
        ops: Vec<MediaOp>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Decide icon contrast for a stack of background colours.
    ///
    /// Colours are listed from the element under the probe outwards to the
    /// page root, as CSS `rgb()`/`rgba()` values.
    Contrast {
        #[arg(required = true)]
        colors: Vec<String>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Lay out partner sites in the preview grid.
    Grid {
        /// Site URLs, in display order.
        urls: Vec<String>,

        /// Number of columns (defaults to config).
        #[arg(long)]
        cols: Option<usize>,

        /// Number of rows (defaults to config).
        #[arg(long)]
        rows: Option<usize>,

        /// Use screenshots instead of live previews.
        #[arg(long)]
        screenshot: bool,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the eased positions of a scroll-to-section animation.
    Scroll {
        /// Current scroll offset.
        #[arg(long, default_value_t = 0.0)]
        from: f64,

        /// Document-relative top of the target section.
        #[arg(long)]
        to: f64,

        /// Number of intervals to sample.
        #[arg(long, default_value_t = 10)]
        steps: u32,
    },

    /// Fill in the brand menu templates form and print the submission.
    Menu {
        /// Uploaded file for a field, as `FIELD=NAME`.
        #[arg(long = "file", value_name = "FIELD=NAME")]
        files: Vec<FieldValue>,

        /// Notes for a field, as `FIELD=TEXT`.
        #[arg(long = "notes", value_name = "FIELD=TEXT")]
        notes: Vec<FieldValue>,

        /// List the form fields instead.
        #[arg(long)]
        list: bool,
    },
}
