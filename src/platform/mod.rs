// ── Platform abstraction layer ────────────────────────────────────────────────
//
// This module defines the interface the invoker uses to drive a native
// dialog object.  No `unsafe` lives here; all Win32 FFI is confined to the
// `win32` sub-module and never leaks outward.
//
// A backend hands out one dialog object per call.  Dropping that object
// releases every native resource it acquired, so the invoker's early returns
// (cancel, `?` on any error) cannot leak.

use std::path::{Path, PathBuf};

use crate::{
    error::Result,
    filter::FileFilter,
    request::{DialogMode, DialogOptions},
};

#[cfg(windows)]
pub mod win32;

#[cfg(test)]
pub(crate) mod mock;

// ── Filter entries ────────────────────────────────────────────────────────────

/// One `(display-name, pattern-list)` pair as the platform receives it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileType {
    pub name: String,
    pub spec: String,
}

impl From<&FileFilter> for FileType {
    fn from(f: &FileFilter) -> Self {
        Self { name: f.display_label(), spec: f.spec() }
    }
}

// ── Show outcome ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowOutcome {
    Accepted,
    /// User cancel or OS-level dismissal.
    Cancelled,
}

// ── Traits ────────────────────────────────────────────────────────────────────

/// Factory for native dialog objects.
pub trait DialogBackend {
    type Dialog: NativeDialog;

    /// Acquire a dialog object for `mode`.
    ///
    /// Errors are `DialogError::Initialization`.
    fn create(&self, mode: DialogMode) -> Result<Self::Dialog>;
}

/// A live native dialog.  Released on drop.
///
/// Setters fail with `DialogError::Configuration`; `show` and `results` fail
/// with `DialogError::Platform`.
pub trait NativeDialog {
    fn options(&self) -> Result<DialogOptions>;
    fn set_options(&self, options: DialogOptions) -> Result<()>;
    fn set_file_types(&self, types: &[FileType]) -> Result<()>;
    /// 1-based.
    fn set_file_type_index(&self, index: u32) -> Result<()>;
    fn set_title(&self, title: &str) -> Result<()>;
    fn set_ok_button_label(&self, label: &str) -> Result<()>;
    fn set_file_name_label(&self, label: &str) -> Result<()>;
    fn set_file_name(&self, name: &str) -> Result<()>;
    fn set_default_extension(&self, ext: &str) -> Result<()>;
    fn set_folder(&self, dir: &Path) -> Result<()>;

    /// Block until the user accepts or dismisses the dialog.
    fn show(&self, owner: Option<isize>) -> Result<ShowOutcome>;

    /// Selected items as filesystem paths, in the order the platform reports
    /// them.  Only meaningful after `show` returned `Accepted`.
    fn results(&self) -> Result<Vec<PathBuf>>;
}
