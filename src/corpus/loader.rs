//! Corpus loading
//!
//! Resolves the caller's input list into an ordered corpus of text files and
//! reads each file as a whole.
//!
//! ```rust,ignore
//! let corpus = Corpus::discover(&[PathBuf::from("books/")], &[])?;
//! for path in corpus.paths() {
//!     let text = read_text(path)?;
//! }
//! ```

use ignore::WalkBuilder;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{AnalysisError, Result};

/// Extensions picked up from directories when none are configured
pub const DEFAULT_TEXT_EXTENSIONS: &[&str] = &["txt", "md", "rst", "text"];

/// Read a whole file as UTF-8 text
///
/// Missing files map to `FileNotFound`; every other failure, including
/// invalid UTF-8, maps to `ReadError`.
pub fn read_text(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => AnalysisError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => AnalysisError::ReadError {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    String::from_utf8(bytes).map_err(|e| AnalysisError::ReadError {
        path: path.to_path_buf(),
        source: std::io::Error::new(ErrorKind::InvalidData, e),
    })
}

/// Ordered, immutable list of files to analyze
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corpus {
    paths: Vec<PathBuf>,
}

impl Corpus {
    /// Build a corpus from explicit file paths
    ///
    /// Paths are kept verbatim; a path that cannot be read later contributes
    /// an empty result instead of failing the batch.
    pub fn from_paths(paths: Vec<PathBuf>) -> Result<Self> {
        if paths.is_empty() {
            return Err(AnalysisError::invalid("corpus must contain at least one file"));
        }
        Ok(Self { paths })
    }

    /// Build a corpus from files and directories
    ///
    /// Directories are walked (respecting .gitignore) and contribute the files
    /// whose extension is in `extensions`, or in `DEFAULT_TEXT_EXTENSIONS` when
    /// `extensions` is empty. Walked files are sorted by name.
    pub fn discover(inputs: &[PathBuf], extensions: &[String]) -> Result<Self> {
        let mut paths = Vec::new();

        for input in inputs {
            if !input.is_dir() {
                paths.push(input.clone());
                continue;
            }

            let walker = WalkBuilder::new(input)
                .hidden(true)
                .git_ignore(true)
                .git_global(true)
                .git_exclude(true)
                .sort_by_file_name(|a, b| a.cmp(b))
                .build();

            let before = paths.len();
            for entry in walker {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        tracing::warn!("Skipping unreadable entry under {}: {}", input.display(), e);
                        continue;
                    }
                };
                let path = entry.path();
                if !path.is_file() {
                    continue;
                }
                let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
                if should_include(ext, extensions) {
                    paths.push(path.to_path_buf());
                }
            }
            tracing::debug!(
                "Discovered {} text files under {}",
                paths.len() - before,
                input.display()
            );
        }

        Self::from_paths(paths)
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

fn should_include(ext: &str, extensions: &[String]) -> bool {
    if extensions.is_empty() {
        DEFAULT_TEXT_EXTENSIONS
            .iter()
            .any(|e| e.eq_ignore_ascii_case(ext))
    } else {
        extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }
}
