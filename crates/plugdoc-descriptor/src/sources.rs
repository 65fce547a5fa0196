//! Source discovery by include/exclude patterns.

use std::fs;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};

use crate::DescriptorError;

/// Version control directories never descended into.
const DEFAULT_EXCLUDED_DIRS: &[&str] = &[".git", ".svn", ".hg", "CVS"];

/// `*` stays within one path segment; `**` crosses segments.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Finds files under a base directory matching include patterns and none of
/// the exclude patterns.
///
/// Patterns are matched against `/`-separated paths relative to the base
/// directory, e.g. `**/*.java` or `**/*Test.java`.
#[derive(Debug)]
pub struct SourceScanner {
    basedir: PathBuf,
    includes: Vec<Pattern>,
    excludes: Vec<Pattern>,
}

impl SourceScanner {
    /// Create a scanner with include patterns.
    pub fn new<S: AsRef<str>>(
        basedir: impl Into<PathBuf>,
        includes: &[S],
    ) -> Result<Self, DescriptorError> {
        Ok(Self {
            basedir: basedir.into(),
            includes: compile(includes)?,
            excludes: Vec::new(),
        })
    }

    /// Add exclude patterns.
    pub fn with_excludes<S: AsRef<str>>(mut self, excludes: &[S]) -> Result<Self, DescriptorError> {
        self.excludes.extend(compile(excludes)?);
        Ok(self)
    }

    /// Walk the base directory and return matching relative paths, sorted.
    ///
    /// Returns an empty list if the base directory doesn't exist.
    pub fn scan(&self) -> Vec<String> {
        let mut found = Vec::new();
        if self.basedir.is_dir() {
            self.scan_directory(&self.basedir, "", &mut found);
        }
        found.sort();
        tracing::debug!(
            basedir = %self.basedir.display(),
            count = found.len(),
            "Source scan completed"
        );
        found
    }

    fn scan_directory(&self, dir_path: &Path, prefix: &str, found: &mut Vec<String>) {
        let Ok(entries) = fs::read_dir(dir_path) else {
            return;
        };

        for entry in entries.filter_map(Result::ok) {
            let name = entry.file_name().to_string_lossy().into_owned();
            let relative = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{prefix}/{name}")
            };

            let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());
            if is_dir {
                if !DEFAULT_EXCLUDED_DIRS.contains(&name.as_str()) {
                    self.scan_directory(&entry.path(), &relative, found);
                }
            } else if self.is_selected(&relative) {
                found.push(relative);
            }
        }
    }

    fn is_selected(&self, relative: &str) -> bool {
        let matches = |p: &Pattern| p.matches_with(relative, MATCH_OPTIONS);
        self.includes.iter().any(matches) && !self.excludes.iter().any(matches)
    }
}

fn compile<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<Pattern>, DescriptorError> {
    patterns
        .iter()
        .map(|p| Pattern::new(p.as_ref()).map_err(DescriptorError::from))
        .collect()
}

/// Find sources under `basedir` using comma-separated pattern lists.
///
/// An empty `excludes` string excludes nothing.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use plugdoc_descriptor::find_sources;
///
/// let files = find_sources(Path::new("src"), "**/*.txt", "**/*Excludes.txt")?;
/// # Ok::<(), plugdoc_descriptor::DescriptorError>(())
/// ```
pub fn find_sources(
    basedir: &Path,
    includes: &str,
    excludes: &str,
) -> Result<Vec<String>, DescriptorError> {
    let scanner =
        SourceScanner::new(basedir, &split_patterns(includes))?.with_excludes(&split_patterns(excludes))?;
    Ok(scanner.scan())
}

fn split_patterns(list: &str) -> Vec<&str> {
    list.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}
