// ── Dialog requests and results ───────────────────────────────────────────────
//
// Pure-Rust value types describing one dialog invocation.
// No Win32 imports; usable from any module and serializable into presets.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::filter::FileFilter;

// ── Mode ──────────────────────────────────────────────────────────────────────

/// Which native dialog to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogMode {
    /// Pick one existing file.
    #[default]
    Open,
    /// Pick one or more existing files.
    OpenMultiple,
    /// Pick a destination path (may not exist yet).
    Save,
    /// Pick a folder; file filters are suppressed.
    PickFolder,
}

impl DialogMode {
    /// `true` for modes backed by the native save dialog class.
    pub fn is_save(self) -> bool {
        matches!(self, Self::Save)
    }

    /// Options this mode always sets, before any caller extras.
    pub(crate) fn base_options(self, has_filters: bool) -> DialogOptions {
        let common = DialogOptions::FORCEFILESYSTEM | DialogOptions::PATHMUSTEXIST;
        match self {
            Self::Open => common | DialogOptions::FILEMUSTEXIST,
            Self::OpenMultiple => {
                common | DialogOptions::FILEMUSTEXIST | DialogOptions::ALLOWMULTISELECT
            }
            Self::Save if has_filters => {
                common | DialogOptions::OVERWRITEPROMPT | DialogOptions::STRICTFILETYPES
            }
            Self::Save => common | DialogOptions::OVERWRITEPROMPT,
            Self::PickFolder => common | DialogOptions::PICKFOLDERS,
        }
    }
}

// ── Options ───────────────────────────────────────────────────────────────────

/// Native `FOS_*` option bits.
///
/// Values match `FILEOPENDIALOGOPTIONS` so they pass straight through to
/// `IFileDialog::SetOptions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DialogOptions(u32);

impl DialogOptions {
    pub const NONE: Self = Self(0);
    pub const OVERWRITEPROMPT: Self = Self(0x2);
    pub const STRICTFILETYPES: Self = Self(0x4);
    pub const NOCHANGEDIR: Self = Self(0x8);
    pub const PICKFOLDERS: Self = Self(0x20);
    pub const FORCEFILESYSTEM: Self = Self(0x40);
    pub const ALLNONSTORAGEITEMS: Self = Self(0x80);
    pub const NOVALIDATE: Self = Self(0x100);
    pub const ALLOWMULTISELECT: Self = Self(0x200);
    pub const PATHMUSTEXIST: Self = Self(0x800);
    pub const FILEMUSTEXIST: Self = Self(0x1000);
    pub const CREATEPROMPT: Self = Self(0x2000);
    pub const SHAREAWARE: Self = Self(0x4000);
    pub const NOREADONLYRETURN: Self = Self(0x8000);
    pub const NOTESTFILECREATE: Self = Self(0x1_0000);
    pub const HIDEMRUPLACES: Self = Self(0x2_0000);
    pub const HIDEPINNEDPLACES: Self = Self(0x4_0000);
    pub const NODEREFERENCELINKS: Self = Self(0x10_0000);
    pub const OKBUTTONNEEDSINTERACTION: Self = Self(0x20_0000);
    pub const DONTADDTORECENT: Self = Self(0x200_0000);
    pub const FORCESHOWHIDDEN: Self = Self(0x1000_0000);
    pub const DEFAULTNOMINIMODE: Self = Self(0x2000_0000);
    pub const FORCEPREVIEWPANEON: Self = Self(0x4000_0000);
    pub const SUPPORTSTREAMABLEITEMS: Self = Self(0x8000_0000);

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for DialogOptions {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for DialogOptions {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

// ── Request ───────────────────────────────────────────────────────────────────

/// Full configuration for one dialog invocation.
///
/// Built with the `with_*` methods and handed to `DialogInvoker` by
/// reference; the invoker never mutates it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogRequest {
    pub title: Option<String>,
    /// Folder the dialog opens in.
    pub initial_dir: Option<PathBuf>,
    /// Dropdown entries, in the order the user will see them.
    pub filters: Vec<FileFilter>,
    pub mode: DialogMode,
    /// Pre-filled file name.  Only honored by the save dialog.
    pub default_filename: Option<String>,
    /// Replaces the text of the Open / Save button.
    pub ok_button_label: Option<String>,
    /// Replaces the "File name:" label next to the edit box.
    pub file_name_label: Option<String>,
    /// 1-based index of the initially selected filter.  `0` means the first.
    pub filter_index: u32,
    /// OR-ed into the mode's own options.
    pub extra_options: DialogOptions,
    /// Raw `HWND` value of the owner window.  Not persisted.
    #[serde(skip)]
    pub owner: Option<isize>,
}

impl DialogRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_initial_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.initial_dir = Some(dir.into());
        self
    }

    pub fn with_filter(mut self, filter: FileFilter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn with_filters<I: IntoIterator<Item = FileFilter>>(mut self, filters: I) -> Self {
        self.filters.extend(filters);
        self
    }

    pub fn with_mode(mut self, mode: DialogMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_default_filename(mut self, name: impl Into<String>) -> Self {
        self.default_filename = Some(name.into());
        self
    }

    pub fn with_ok_button_label(mut self, label: impl Into<String>) -> Self {
        self.ok_button_label = Some(label.into());
        self
    }

    pub fn with_file_name_label(mut self, label: impl Into<String>) -> Self {
        self.file_name_label = Some(label.into());
        self
    }

    pub fn with_filter_index(mut self, index: u32) -> Self {
        self.filter_index = index;
        self
    }

    pub fn with_options(mut self, options: DialogOptions) -> Self {
        self.extra_options |= options;
        self
    }

    pub fn with_owner(mut self, hwnd: isize) -> Self {
        self.owner = Some(hwnd);
        self
    }

    /// Filters that will actually be sent: none in folder mode.
    pub(crate) fn effective_filters(&self) -> &[FileFilter] {
        match self.mode {
            DialogMode::PickFolder => &[],
            _ => &self.filters,
        }
    }

    /// The selected filter as a 1-based index clamped into the filter list.
    pub(crate) fn effective_filter_index(&self) -> u32 {
        let count = self.effective_filters().len() as u32;
        self.filter_index.clamp(1, count.max(1))
    }
}

// ── Result ────────────────────────────────────────────────────────────────────

/// Outcome of one dialog invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogResult {
    /// The user dismissed the dialog (Cancel, Esc, Alt+F4, shutdown).
    Cancelled,
    /// Single-select, save and folder modes.
    Single(PathBuf),
    /// Multi-select mode, in the order the OS reported the items.
    Multiple(Vec<PathBuf>),
}

impl DialogResult {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// The first selected path, or `None` on cancel.
    pub fn into_path(self) -> Option<PathBuf> {
        match self {
            Self::Cancelled => None,
            Self::Single(p) => Some(p),
            Self::Multiple(v) => v.into_iter().next(),
        }
    }

    /// All selected paths; empty on cancel.
    pub fn into_paths(self) -> Vec<PathBuf> {
        match self {
            Self::Cancelled => Vec::new(),
            Self::Single(p) => vec![p],
            Self::Multiple(v) => v,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
