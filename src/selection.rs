// src/selection.rs

//! The user-controlled inputs: which albums to draw and the layout spacing K.

use std::collections::BTreeSet;

use crate::dataset::Dataset;
use crate::error::{DiscographError, Result};

/// Albums shown when the user hasn't picked any.
pub const DEFAULT_ALBUMS: &[&str] = &["LP: Dash One", "LP: Iron Man"];

/// Spacing constant K used when none is given.
pub const DEFAULT_SPACING: f64 = 0.09;

/// Checks that `k` lies in the closed interval `[0, 1]`.
pub fn validate_spacing(k: f64) -> Result<f64> {
    if k.is_finite() && (0.0..=1.0).contains(&k) {
        Ok(k)
    } else {
        Err(DiscographError::InvalidSpacing(k))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    albums: BTreeSet<String>,
    spacing: f64,
}

impl Selection {
    pub fn new<I, S>(albums: I, spacing: f64) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Selection {
            albums: albums.into_iter().map(Into::into).collect(),
            spacing: validate_spacing(spacing)?,
        })
    }

    /// Every album in the dataset.
    pub fn all(dataset: &Dataset, spacing: f64) -> Result<Self> {
        Self::new(dataset.album_names(), spacing)
    }

    pub fn albums(&self) -> &BTreeSet<String> {
        &self.albums
    }

    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    pub fn includes(&self, album: &str) -> bool {
        self.albums.contains(album)
    }

    pub fn is_empty(&self) -> bool {
        self.albums.is_empty()
    }
}

impl Default for Selection {
    fn default() -> Self {
        Selection {
            albums: DEFAULT_ALBUMS.iter().map(|a| a.to_string()).collect(),
            spacing: DEFAULT_SPACING,
        }
    }
}
