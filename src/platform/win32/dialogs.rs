// ── Common Item Dialog backend ─────────────────────────────────────────────────
//
// `IFileOpenDialog` / `IFileSaveDialog` behind the `NativeDialog` trait.
// Each `Win32Dialog` owns its COM apartment and interface pointer; dropping
// it releases the interface first, then uninitializes COM.
//
// This is inside `platform::win32` so `unsafe` is permitted per crate policy.

#![allow(unsafe_code)]

use std::{
    ffi::{c_void, OsString},
    os::windows::ffi::OsStringExt,
    path::{Path, PathBuf},
};

use windows::{
    core::{HRESULT, HSTRING, PCWSTR},
    Win32::{
        Foundation::{ERROR_CANCELLED, HWND, REGDB_E_CLASSNOTREG},
        System::Com::{CoCreateInstance, CoTaskMemFree, CLSCTX_INPROC_SERVER},
        UI::Shell::{
            Common::COMDLG_FILTERSPEC, FileOpenDialog, FileSaveDialog, IFileDialog,
            IFileOpenDialog, IFileSaveDialog, IShellItem, SHCreateItemFromParsingName,
            FILEOPENDIALOGOPTIONS, SIGDN_FILESYSPATH,
        },
    },
};

use crate::{
    error::{DialogError, Result},
    platform::{DialogBackend, FileType, NativeDialog, ShowOutcome},
    request::{DialogMode, DialogOptions},
};

use super::{com::Apartment, hresult};

// ── Backend ───────────────────────────────────────────────────────────────────

/// Creates Common Item Dialog objects (Windows Vista and later).
#[derive(Debug, Default, Clone, Copy)]
pub struct Win32Backend;

impl DialogBackend for Win32Backend {
    type Dialog = Win32Dialog;

    fn create(&self, mode: DialogMode) -> Result<Win32Dialog> {
        let apartment = Apartment::enter()?;

        // SAFETY: COM is initialized on this thread by `apartment`, which
        // outlives the returned interface (field order in `Win32Dialog`).
        let handle = unsafe {
            if mode.is_save() {
                CoCreateInstance::<_, IFileSaveDialog>(&FileSaveDialog, None, CLSCTX_INPROC_SERVER)
                    .map(Handle::Save)
            } else {
                CoCreateInstance::<_, IFileOpenDialog>(&FileOpenDialog, None, CLSCTX_INPROC_SERVER)
                    .map(Handle::Open)
            }
        }
        .map_err(|e| {
            if e.code() == REGDB_E_CLASSNOTREG {
                log::warn!("Common Item Dialog is not registered; Windows Vista or newer is required");
            }
            DialogError::Initialization { function: "CoCreateInstance", code: hresult(&e) }
        })?;

        Ok(Win32Dialog { handle, _apartment: apartment })
    }
}

// ── Dialog object ─────────────────────────────────────────────────────────────

enum Handle {
    Open(IFileOpenDialog),
    Save(IFileSaveDialog),
}

impl Handle {
    fn base(&self) -> &IFileDialog {
        match self {
            Self::Open(d) => d,
            Self::Save(d) => d,
        }
    }
}

/// One live native dialog.
///
/// Field order matters: `handle` is released before `_apartment`
/// uninitializes COM.
pub struct Win32Dialog {
    handle: Handle,
    _apartment: Apartment,
}

/// Map a setter failure to a configuration error for `option`.
fn rejected(option: &'static str) -> impl FnOnce(windows::core::Error) -> DialogError {
    move |e| DialogError::Configuration { option, code: Some(hresult(&e)) }
}

fn failed(function: &'static str) -> impl FnOnce(windows::core::Error) -> DialogError {
    move |e| DialogError::Platform { function, code: hresult(&e) }
}

impl NativeDialog for Win32Dialog {
    fn options(&self) -> Result<DialogOptions> {
        // SAFETY: `handle` is a live interface on this thread's apartment.
        let opts = unsafe { self.handle.base().GetOptions() }.map_err(rejected("options"))?;
        Ok(DialogOptions::from_bits(opts.0 as u32))
    }

    fn set_options(&self, options: DialogOptions) -> Result<()> {
        // SAFETY: as above; the value is a plain bit set.
        unsafe { self.handle.base().SetOptions(FILEOPENDIALOGOPTIONS(options.bits() as _)) }
            .map_err(rejected("options"))
    }

    fn set_file_types(&self, types: &[FileType]) -> Result<()> {
        // The HSTRINGs own the UTF-16 buffers the filter specs point into and
        // must outlive the SetFileTypes call.
        let strings: Vec<(HSTRING, HSTRING)> = types
            .iter()
            .map(|t| (HSTRING::from(t.name.as_str()), HSTRING::from(t.spec.as_str())))
            .collect();
        let specs: Vec<COMDLG_FILTERSPEC> = strings
            .iter()
            .map(|(name, spec)| COMDLG_FILTERSPEC {
                pszName: PCWSTR(name.as_ptr()),
                pszSpec: PCWSTR(spec.as_ptr()),
            })
            .collect();

        // SAFETY: every pointer in `specs` borrows from `strings`, which is
        // alive for the duration of the call.  The dialog copies the strings.
        unsafe { self.handle.base().SetFileTypes(&specs) }.map_err(rejected("filters"))
    }

    fn set_file_type_index(&self, index: u32) -> Result<()> {
        // SAFETY: live interface; index is 1-based per the API contract.
        unsafe { self.handle.base().SetFileTypeIndex(index) }.map_err(rejected("filter_index"))
    }

    fn set_title(&self, title: &str) -> Result<()> {
        // SAFETY: the temporary HSTRING lives until the call returns.
        unsafe { self.handle.base().SetTitle(&HSTRING::from(title)) }.map_err(rejected("title"))
    }

    fn set_ok_button_label(&self, label: &str) -> Result<()> {
        // SAFETY: same invariants as set_title.
        unsafe { self.handle.base().SetOkButtonLabel(&HSTRING::from(label)) }
            .map_err(rejected("ok_button_label"))
    }

    fn set_file_name_label(&self, label: &str) -> Result<()> {
        // SAFETY: same invariants as set_title.
        unsafe { self.handle.base().SetFileNameLabel(&HSTRING::from(label)) }
            .map_err(rejected("file_name_label"))
    }

    fn set_file_name(&self, name: &str) -> Result<()> {
        // SAFETY: same invariants as set_title.
        unsafe { self.handle.base().SetFileName(&HSTRING::from(name)) }
            .map_err(rejected("default_filename"))
    }

    fn set_default_extension(&self, ext: &str) -> Result<()> {
        // SAFETY: same invariants as set_title.
        unsafe { self.handle.base().SetDefaultExtension(&HSTRING::from(ext)) }
            .map_err(rejected("default_extension"))
    }

    fn set_folder(&self, dir: &Path) -> Result<()> {
        // SAFETY: the path HSTRING lives until the call returns; no bind
        // context is supplied.
        let item: IShellItem =
            unsafe { SHCreateItemFromParsingName(&HSTRING::from(dir.as_os_str()), None) }
                .map_err(rejected("initial_dir"))?;
        // SAFETY: `item` is a live shell item; the dialog AddRefs it.
        unsafe { self.handle.base().SetFolder(&item) }.map_err(rejected("initial_dir"))
    }

    fn show(&self, owner: Option<isize>) -> Result<ShowOutcome> {
        let hwnd = owner.map_or_else(HWND::default, |raw| HWND(raw as *mut c_void));

        // SAFETY: `hwnd` is either null (no owner) or a window handle the
        // caller vouched for.  Show runs a nested modal message loop on this
        // thread and returns once the dialog is dismissed.
        match unsafe { self.handle.base().Show(hwnd) } {
            Ok(()) => Ok(ShowOutcome::Accepted),
            Err(e) if e.code() == HRESULT::from_win32(ERROR_CANCELLED.0) => Ok(ShowOutcome::Cancelled),
            Err(e) => Err(failed("IFileDialog::Show")(e)),
        }
    }

    fn results(&self) -> Result<Vec<PathBuf>> {
        match &self.handle {
            Handle::Open(dialog) => {
                // SAFETY: called after a successful Show on a live dialog.
                let items = unsafe { dialog.GetResults() }.map_err(failed("IFileOpenDialog::GetResults"))?;
                // SAFETY: `items` is a live IShellItemArray.
                let count = unsafe { items.GetCount() }.map_err(failed("IShellItemArray::GetCount"))?;
                let mut paths = Vec::with_capacity(count as usize);
                for i in 0..count {
                    // SAFETY: `i < count`.
                    let item = unsafe { items.GetItemAt(i) }.map_err(failed("IShellItemArray::GetItemAt"))?;
                    paths.push(filesystem_path(&item)?);
                }
                Ok(paths)
            }
            Handle::Save(dialog) => {
                // SAFETY: called after a successful Show on a live dialog.
                let item = unsafe { dialog.GetResult() }.map_err(failed("IFileDialog::GetResult"))?;
                Ok(vec![filesystem_path(&item)?])
            }
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// The item's filesystem path, exactly as the shell reports it.
fn filesystem_path(item: &IShellItem) -> Result<PathBuf> {
    // SAFETY: `item` is live.  On success the shell allocates the string with
    // the COM task allocator; we copy it out and free it exactly once.
    let path = unsafe {
        let name = item
            .GetDisplayName(SIGDN_FILESYSPATH)
            .map_err(failed("IShellItem::GetDisplayName"))?;
        let path = PathBuf::from(OsString::from_wide(name.as_wide()));
        CoTaskMemFree(Some(name.0 as *const c_void));
        path
    };
    log::trace!("selected {}", path.display());
    Ok(path)
}
