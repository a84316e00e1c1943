// This file is part of swiss-tournament.
//
// swiss-tournament is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// swiss-tournament is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Where tournament snapshots live between two engine calls.
//!
//! The engine never uses a store itself. A caller loads a snapshot, applies
//! one edit, and saves the result.

use std::{
    collections::BTreeMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use log::debug;
use ron::ser::PrettyConfig;
use thiserror::Error;

use crate::tournament::{Tournament, slugify};

const EXTENSION: &str = "ron";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("RON: {path}: {source}")]
    Decode {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("RON: {0}")]
    Encode(#[from] ron::Error),
    #[error("store: {0}")]
    Io(#[from] std::io::Error),
    #[error("store: there is no tournament '{0}'")]
    NotFound(String),
}

pub trait TournamentStore {
    /// The slugs of every stored tournament, sorted.
    ///
    /// # Errors
    ///
    /// If the store can't be read.
    fn list(&self) -> Result<Vec<String>, StoreError>;

    /// # Errors
    ///
    /// If there is no tournament under `slug` or it can't be decoded.
    fn load(&self, slug: &str) -> Result<Tournament, StoreError>;

    /// Stores `tournament` under its slug, replacing what was there.
    ///
    /// # Errors
    ///
    /// If the tournament can't be encoded or written.
    fn save(&mut self, tournament: &Tournament) -> Result<(), StoreError>;

    /// # Errors
    ///
    /// If there is no tournament under `slug` or it can't be removed.
    fn delete(&mut self, slug: &str) -> Result<(), StoreError>;

    /// Whether something is stored under `slug`, readable or not.
    ///
    /// # Errors
    ///
    /// If the store can't tell, for example when a stored file can't be
    /// decoded.
    fn contains(&self, slug: &str) -> Result<bool, StoreError> {
        match self.load(slug) {
            Ok(_) => Ok(true),
            Err(StoreError::NotFound(_)) => Ok(false),
            Err(error) => Err(error),
        }
    }
}

/// One pretty printed `<slug>.ron` file per tournament.
#[derive(Clone, Debug)]
pub struct RonStore {
    dir: PathBuf,
}

impl RonStore {
    /// # Errors
    ///
    /// If the directory can't be created.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Only slugs that `slugify` could have produced map to a file.
    fn path(&self, slug: &str) -> Result<PathBuf, StoreError> {
        if slug.is_empty() || slugify(slug) != slug {
            return Err(StoreError::NotFound(slug.to_string()));
        }

        Ok(self.dir.join(format!("{slug}.{EXTENSION}")))
    }
}

impl TournamentStore for RonStore {
    fn list(&self) -> Result<Vec<String>, StoreError> {
        let mut slugs = Vec::new();

        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|extension| extension == EXTENSION)
                && let Some(stem) = path.file_stem().and_then(|stem| stem.to_str())
            {
                slugs.push(stem.to_string());
            }
        }

        slugs.sort_unstable();
        Ok(slugs)
    }

    fn load(&self, slug: &str) -> Result<Tournament, StoreError> {
        let path = self.path(slug)?;
        let string = match fs::read_to_string(&path) {
            Ok(string) => string,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                return Err(StoreError::NotFound(slug.to_string()));
            }
            Err(error) => return Err(error.into()),
        };

        ron::from_str(&string).map_err(|source| StoreError::Decode { path, source })
    }

    fn save(&mut self, tournament: &Tournament) -> Result<(), StoreError> {
        let path = self.path(&tournament.slug)?;
        let string = ron::ser::to_string_pretty(tournament, PrettyConfig::default())?;

        fs::write(&path, string)?;
        debug!("saved {}", path.display());
        Ok(())
    }

    fn contains(&self, slug: &str) -> Result<bool, StoreError> {
        match self.path(slug) {
            Ok(path) => Ok(path.try_exists()?),
            Err(StoreError::NotFound(_)) => Ok(false),
            Err(error) => Err(error),
        }
    }

    fn delete(&mut self, slug: &str) -> Result<(), StoreError> {
        let path = self.path(slug)?;

        match fs::remove_file(&path) {
            Ok(()) => {
                debug!("deleted {}", path.display());
                Ok(())
            }
            Err(error) if error.kind() == ErrorKind::NotFound => {
                Err(StoreError::NotFound(slug.to_string()))
            }
            Err(error) => Err(error.into()),
        }
    }
}

/// Keeps snapshots in memory, for tests and for embedding the engine.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(pub BTreeMap<String, Tournament>);

impl TournamentStore for MemoryStore {
    fn list(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.0.keys().cloned().collect())
    }

    fn load(&self, slug: &str) -> Result<Tournament, StoreError> {
        self.0
            .get(slug)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(slug.to_string()))
    }

    fn save(&mut self, tournament: &Tournament) -> Result<(), StoreError> {
        self.0.insert(tournament.slug.clone(), tournament.clone());
        Ok(())
    }

    fn contains(&self, slug: &str) -> Result<bool, StoreError> {
        Ok(self.0.contains_key(slug))
    }

    fn delete(&mut self, slug: &str) -> Result<(), StoreError> {
        self.0
            .remove(slug)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(slug.to_string()))
    }
}
