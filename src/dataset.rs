// src/dataset.rs

//! Loading the discography table and filtering it down to a selection.
//!
//! The table is read once into a [`Dataset`], an immutable handle that is
//! cheap to clone and is passed explicitly to every recomputation.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use csv::{ReaderBuilder, Trim};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{DiscographError, Result};
use crate::selection::Selection;

pub const ALBUM_COLUMN: &str = "Album";
pub const ARTIST_COLUMN: &str = "Artist";

/// One fact: `artist` appears on `album`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Row {
    pub album: String,
    pub artist: String,
}

impl Row {
    pub fn new(album: impl Into<String>, artist: impl Into<String>) -> Self {
        Row {
            album: album.into(),
            artist: artist.into(),
        }
    }
}

/// Per-album line for the `albums` listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumSummary {
    pub name: String,
    /// Distinct artists credited on the album.
    pub artists: usize,
    /// Raw rows, duplicates included.
    pub rows: usize,
}

/// The full, unfiltered discography.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    rows: Arc<[Row]>,
}

impl Dataset {
    pub fn from_rows(rows: Vec<Row>) -> Self {
        Dataset { rows: rows.into() }
    }

    /// Reads a CSV file with at least an `Album` and an `Artist` column.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading discography from {}", path.display());
        let file = File::open(path)?;
        Self::from_reader(file, path)
    }

    /// Same as [`Dataset::load`] but for any reader. `source` only labels errors.
    pub fn from_reader<R: Read>(reader: R, source: &Path) -> Result<Self> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::Headers)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let column = |name: &'static str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| DiscographError::MissingColumn {
                    column: name,
                    path: PathBuf::from(source),
                })
        };
        let album_idx = column(ALBUM_COLUMN)?;
        let artist_idx = column(ARTIST_COLUMN)?;

        let mut rows = Vec::new();
        let mut skipped = 0usize;
        for record in rdr.records() {
            let record = record?;
            let album = record.get(album_idx).unwrap_or_default();
            let artist = record.get(artist_idx).unwrap_or_default();
            // Blank cells can't name a node.
            if album.is_empty() || artist.is_empty() {
                skipped += 1;
                continue;
            }
            rows.push(Row::new(album, artist));
        }

        if skipped > 0 {
            debug!("Skipped {} rows with a blank Album or Artist", skipped);
        }
        info!("Loaded {} rows from {}", rows.len(), source.display());
        Ok(Self::from_rows(rows))
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn contains_album(&self, album: &str) -> bool {
        self.rows.iter().any(|row| row.album == album)
    }

    /// Album titles in first-appearance order.
    pub fn album_names(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .filter(|row| seen.insert(row.album.as_str()))
            .map(|row| row.album.clone())
            .collect()
    }

    pub fn albums(&self) -> Vec<AlbumSummary> {
        let mut order: Vec<&str> = Vec::new();
        let mut stats: HashMap<&str, (HashSet<&str>, usize)> = HashMap::new();
        for row in self.rows.iter() {
            let entry = stats.entry(row.album.as_str()).or_insert_with(|| {
                order.push(row.album.as_str());
                (HashSet::new(), 0)
            });
            entry.0.insert(row.artist.as_str());
            entry.1 += 1;
        }

        order
            .into_iter()
            .map(|name| {
                let (artists, rows) = &stats[name];
                AlbumSummary {
                    name: name.to_string(),
                    artists: artists.len(),
                    rows: *rows,
                }
            })
            .collect()
    }

    /// Rows whose album is part of the selection, in dataset order.
    ///
    /// Selected albums that don't occur in the table are logged and otherwise
    /// ignored; an empty selection yields no rows.
    pub fn filter(&self, selection: &Selection) -> Vec<Row> {
        for album in selection.albums() {
            if !self.contains_album(album) {
                warn!("Album '{}' not present in dataset; ignoring", album);
            }
        }

        let filtered: Vec<Row> = self
            .rows
            .iter()
            .filter(|row| selection.includes(&row.album))
            .cloned()
            .collect();
        debug!(
            "Selection of {} albums kept {} of {} rows",
            selection.albums().len(),
            filtered.len(),
            self.rows.len()
        );
        filtered
    }
}
