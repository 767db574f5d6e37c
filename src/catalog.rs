//! The portfolio catalog persisted as `{"works": [...]}`.
//!
//! Records are keyed by their output filename and the file is always written
//! sorted descending by that key.

use crate::error::{PortfolioError, Result};
use crate::{verbose, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Photography,
    Painting,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Photography => "photography",
            Category::Painting => "painting",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = PortfolioError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "photography" => Ok(Category::Photography),
            "painting" => Ok(Category::Painting),
            _ => Err(PortfolioError::InvalidCategory(s.to_string())),
        }
    }
}

/// One portfolio entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Work {
    pub filename: String,
    pub title: String,
    pub category: Category,
    pub description: String,
    pub price: u64,
    /// Year and month the record was written, `YYYY-MM`.
    pub date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub works: Vec<Work>,
}

impl Catalog {
    /// Reads the catalog at `path`.
    ///
    /// A missing file yields an empty catalog. So does a file that is not valid
    /// catalog JSON; it is first copied next to itself with a `.bak` suffix.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                verbose!("No catalog at {:?}, starting empty", path);
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        // Invalid UTF-8 is a parse error here, same as any other malformed file.
        match serde_json::from_slice::<Catalog>(&bytes) {
            Ok(catalog) => {
                verbose!("Loaded {} works from {:?}", catalog.len(), path);
                Ok(catalog)
            }
            Err(e) => {
                let backup = path.with_extension("json.bak");
                fs::copy(path, &backup)?;
                warn!(
                    "Catalog {:?} is unreadable ({}); starting empty, original kept at {:?}",
                    path,
                    e,
                    backup
                );
                Ok(Self::default())
            }
        }
    }

    /// Sorts the catalog and writes it as indented UTF-8 JSON.
    ///
    /// The JSON goes to a sibling `.tmp` file first and is renamed over `path`,
    /// so the previous catalog stays whole until the new one is complete.
    pub fn save(&mut self, path: &Path) -> Result<()> {
        self.sort_descending();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|_| PortfolioError::DirectoryCreationFailed(parent.to_path_buf()))?;
        }

        let json = serde_json::to_string_pretty(self)?;
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, json)?;
        fs::rename(&staging, path)?;
        verbose!("Saved {} works to {:?}", self.len(), path);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.works.len()
    }

    pub fn is_empty(&self) -> bool {
        self.works.is_empty()
    }

    pub fn contains(&self, filename: &str) -> bool {
        self.works.iter().any(|w| w.filename == filename)
    }

    pub fn get(&self, filename: &str) -> Option<&Work> {
        self.works.iter().find(|w| w.filename == filename)
    }

    /// Replaces the record with the same filename, or appends.
    ///
    /// Returns `true` when an existing record was replaced.
    pub fn upsert(&mut self, work: Work) -> bool {
        match self.works.iter_mut().find(|w| w.filename == work.filename) {
            Some(existing) => {
                *existing = work;
                true
            }
            None => {
                self.works.push(work);
                false
            }
        }
    }

    /// Drops every record and upserts `works` in order.
    pub fn replace_all(&mut self, works: Vec<Work>) {
        self.works.clear();
        for work in works {
            self.upsert(work);
        }
    }

    pub fn sort_descending(&mut self) {
        self.works.sort_by(|a, b| b.filename.cmp(&a.filename));
    }

    /// Total bytes of the referenced files that exist in `output_dir`.
    pub fn total_output_size(&self, output_dir: &Path) -> u64 {
        self.works
            .iter()
            .filter_map(|w| fs::metadata(output_dir.join(&w.filename)).ok())
            .filter(|m| m.is_file())
            .map(|m| m.len())
            .sum()
    }
}
