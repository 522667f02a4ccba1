// ── File type filters ─────────────────────────────────────────────────────────
//
// Pure Rust: a filter is a display label plus an ordered list of glob
// patterns, normalized once at construction.  No Win32 imports; the platform
// layer only ever sees the `(display_label, pattern)` pairs produced here.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DialogError, Result};

/// The pattern that disables filtering.
pub const MATCH_ALL: &str = "*.*";

/// A named group of extension patterns shown in the dialog's type dropdown.
///
/// Immutable once built.  Tokens are normalized to the platform's glob form:
/// `"png"` and `".png"` become `"*.png"`; `""`, `"*"`, `"."` and `"*.*"` all
/// become `"*.*"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawFilter", into = "RawFilter")]
pub struct FileFilter {
    label: String,
    patterns: Vec<String>,
}

/// On-disk shape of a filter, validated through `FileFilter::new`.
#[derive(Serialize, Deserialize)]
struct RawFilter {
    label: String,
    extensions: Vec<String>,
}

impl FileFilter {
    /// Build a filter from a label and extension tokens.
    ///
    /// Fails with `DialogError::Configuration` if the label is blank or no
    /// tokens are given.
    pub fn new<I, S>(label: impl Into<String>, extensions: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let label = label.into();
        if label.trim().is_empty() {
            return Err(DialogError::Configuration { option: "filter.label", code: None });
        }
        let patterns: Vec<String> = extensions
            .into_iter()
            .map(|e| normalize_extension(e.as_ref().trim()))
            .collect();
        if patterns.is_empty() {
            return Err(DialogError::Configuration { option: "filter.extensions", code: None });
        }
        Ok(Self { label, patterns })
    }

    /// Parse a native filter spec such as `"*.png;*.jpg"`.
    pub fn from_spec(label: impl Into<String>, spec: &str) -> Result<Self> {
        Self::new(label, spec.split(';').filter(|t| !t.trim().is_empty()))
    }

    /// The label as supplied by the caller.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Normalized glob patterns, in caller order.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// `true` if this filter lets every file through.
    pub fn is_match_all(&self) -> bool {
        self.patterns.iter().any(|p| p == MATCH_ALL)
    }

    /// The pattern list in native form: `"*.png;*.jpg"`.
    pub fn spec(&self) -> String {
        self.patterns.join(";")
    }

    /// The label shown in the dropdown.
    ///
    /// Concrete filters list their extensions: `"Images (png, jpg)"`.
    /// A filter containing `*.*` shows the bare label.
    pub fn display_label(&self) -> String {
        if self.is_match_all() {
            return self.label.clone();
        }
        let exts: Vec<&str> = self
            .patterns
            .iter()
            .map(|p| p.trim_start_matches(['*', '.']))
            .collect();
        format!("{} ({})", self.label, exts.join(", "))
    }

    /// The first concrete extension without its glob prefix (`"png"`), used
    /// as the save dialog's default extension.  `None` for match-all filters.
    pub fn default_extension(&self) -> Option<&str> {
        self.patterns
            .iter()
            .find(|p| p.as_str() != MATCH_ALL)
            .map(|p| p.trim_start_matches(['*', '.']))
            .filter(|e| !e.is_empty() && !e.contains('*'))
    }

    /// Case-insensitive check whether `path` ends with one of the patterns.
    pub fn matches(&self, path: &Path) -> bool {
        if self.is_match_all() {
            return true;
        }
        let name = path.to_string_lossy().to_lowercase();
        self.patterns
            .iter()
            .map(|p| p.trim_start_matches('*').to_lowercase())
            .any(|suffix| name.ends_with(&suffix))
    }

    /// Return `path` unchanged if it matches, otherwise with the first
    /// extension appended (`"out"` → `"out.png"`).
    pub fn with_default_extension(&self, path: &Path) -> std::path::PathBuf {
        match self.default_extension() {
            Some(ext) if !self.matches(path) => {
                let mut s = path.as_os_str().to_owned();
                s.push(".");
                s.push(ext);
                s.into()
            }
            _ => path.to_path_buf(),
        }
    }
}

impl TryFrom<RawFilter> for FileFilter {
    type Error = DialogError;

    fn try_from(raw: RawFilter) -> Result<Self> {
        Self::new(raw.label, raw.extensions)
    }
}

impl From<FileFilter> for RawFilter {
    fn from(f: FileFilter) -> Self {
        Self { label: f.label, extensions: f.patterns }
    }
}

/// Normalize one extension token into the platform's glob form.
pub fn normalize_extension(token: &str) -> String {
    if matches!(token, "" | "*" | "." | MATCH_ALL) {
        return MATCH_ALL.to_owned();
    }
    let mut ext = token.to_owned();
    if ext.ends_with('.') {
        ext.push('*');
    }
    if ext.starts_with('.') {
        ext.insert(0, '*');
    }
    if !ext.starts_with('*') {
        ext.insert_str(0, "*.");
    }
    ext
}

// ── Tests ─────────────────────────────────────────────────────────────────────
