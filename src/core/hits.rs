//! Accumulated search hits
//!
//! A [`HitStore`] is a three-level ordered map: repository -> path ->
//! line number -> line text. Repositories and paths keep first-seen order.
//! Writing an existing (repository, path, line) key replaces its text, so the
//! most recently merged page wins.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Line number -> rendered line text, as returned by the snippet parser.
pub type Lines = IndexMap<String, String>;

/// Path -> lines for one repository.
pub type Files = IndexMap<String, Lines>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HitStore {
    repos: IndexMap<String, Files>,
}

/// Counters printed at the end of human output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub repositories: usize,
    pub files: usize,
    pub lines: usize,
}

impl HitStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure the repository and path groupings exist, without adding lines.
    pub fn ensure_file(&mut self, repository: &str, path: &str) -> &mut Lines {
        self.repos
            .entry(repository.to_string())
            .or_default()
            .entry(path.to_string())
            .or_default()
    }

    /// Insert or overwrite one line.
    pub fn add(
        &mut self,
        repository: &str,
        path: &str,
        line_number: impl Into<String>,
        text: impl Into<String>,
    ) {
        self.ensure_file(repository, path)
            .insert(line_number.into(), text.into());
    }

    /// Fold `other` into `self`, in `other`'s iteration order.
    pub fn merge(&mut self, other: HitStore) {
        for (repository, files) in other.repos {
            let target = self.repos.entry(repository).or_default();
            for (path, lines) in files {
                target.entry(path).or_default().extend(lines);
            }
        }
    }

    pub fn repositories(&self) -> impl Iterator<Item = (&String, &Files)> {
        self.repos.iter()
    }

    pub fn summary(&self) -> Summary {
        let mut summary = Summary {
            repositories: self.repos.len(),
            ..Summary::default()
        };
        for files in self.repos.values() {
            summary.files += files.len();
            summary.lines += files.values().map(IndexMap::len).sum::<usize>();
        }
        summary
    }
}

#[cfg(test)]
impl HitStore {
    pub fn get(&self, repository: &str, path: &str, line_number: &str) -> Option<&str> {
        self.repos
            .get(repository)?
            .get(path)?
            .get(line_number)
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.repos.is_empty()
    }
}
