// ── Dialog invoker ────────────────────────────────────────────────────────────
//
// One entry point per dialog variant, all sharing `show`:
//   acquire → configure → show → read result → release.
//
// Every call blocks the calling thread until the user accepts or dismisses
// the dialog.  There is no timeout and no way to cancel a dialog from code;
// callers on an async runtime must move the call onto a blocking thread.

use std::path::PathBuf;

use crate::{
    error::Result,
    platform::{DialogBackend, FileType, NativeDialog, ShowOutcome},
    request::{DialogMode, DialogRequest, DialogResult},
};

#[cfg(windows)]
use crate::platform::win32::dialogs::Win32Backend;

/// Shows native dialogs through a `DialogBackend`.
///
/// Stateless between calls: each call acquires its own native object and
/// releases it before returning, whatever the outcome.
#[derive(Debug, Default, Clone)]
pub struct DialogInvoker<B> {
    backend: B,
}

#[cfg(windows)]
impl DialogInvoker<Win32Backend> {
    /// An invoker backed by the Common Item Dialog.
    pub fn new() -> Self {
        Self { backend: Win32Backend }
    }
}

impl<B: DialogBackend> DialogInvoker<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    // ── Per-mode entry points ─────────────────────────────────────────────────

    /// Single-file open dialog.  `None` if the user cancelled.
    pub fn get_file(&self, request: &DialogRequest) -> Result<Option<PathBuf>> {
        self.show_as(request, DialogMode::Open).map(DialogResult::into_path)
    }

    /// Multi-file open dialog.  Empty if the user cancelled; otherwise the
    /// paths in the order the OS reported them.
    pub fn get_files(&self, request: &DialogRequest) -> Result<Vec<PathBuf>> {
        self.show_as(request, DialogMode::OpenMultiple).map(DialogResult::into_paths)
    }

    /// Save dialog.  The returned path may not exist yet; nothing is written.
    pub fn set_file(&self, request: &DialogRequest) -> Result<Option<PathBuf>> {
        self.show_as(request, DialogMode::Save).map(DialogResult::into_path)
    }

    /// Folder picker.  Any filters on `request` are ignored.
    pub fn get_dir(&self, request: &DialogRequest) -> Result<Option<PathBuf>> {
        self.show_as(request, DialogMode::PickFolder).map(DialogResult::into_path)
    }

    fn show_as(&self, request: &DialogRequest, mode: DialogMode) -> Result<DialogResult> {
        if request.mode == mode {
            return self.show(request);
        }
        let forced = DialogRequest { mode, ..request.clone() };
        self.show(&forced)
    }

    // ── Shared routine ────────────────────────────────────────────────────────

    /// Show the dialog described by `request`, honoring `request.mode`.
    pub fn show(&self, request: &DialogRequest) -> Result<DialogResult> {
        log::debug!(
            "showing {:?} dialog (title: {:?}, {} filter(s))",
            request.mode,
            request.title,
            request.effective_filters().len()
        );

        // Dropped on every return below, which releases the native object.
        let dialog = self.backend.create(request.mode).inspect_err(|e| log::warn!("{e}"))?;

        configure(&dialog, request).inspect_err(|e| log::warn!("{e}"))?;

        match dialog.show(request.owner).inspect_err(|e| log::warn!("{e}"))? {
            ShowOutcome::Cancelled => {
                log::debug!("{:?} dialog cancelled", request.mode);
                return Ok(DialogResult::Cancelled);
            }
            ShowOutcome::Accepted => {}
        }

        let paths = dialog.results().inspect_err(|e| log::warn!("{e}"))?;
        log::debug!("{:?} dialog accepted with {} item(s)", request.mode, paths.len());

        let result = match (request.mode, paths.is_empty()) {
            (_, true) => DialogResult::Cancelled,
            (DialogMode::OpenMultiple, false) => DialogResult::Multiple(paths),
            (_, false) => paths.into_iter().next().map_or(DialogResult::Cancelled, DialogResult::Single),
        };
        Ok(result)
    }
}

/// Apply `request` to a freshly acquired dialog.
///
/// Any rejected option aborts before the dialog is shown.
fn configure<D: NativeDialog>(dialog: &D, request: &DialogRequest) -> Result<()> {
    let mode = request.mode;
    let filters = request.effective_filters();

    let options = dialog.options()? | mode.base_options(!filters.is_empty()) | request.extra_options;
    dialog.set_options(options)?;

    if !filters.is_empty() {
        let types: Vec<FileType> = filters.iter().map(FileType::from).collect();
        dialog.set_file_types(&types)?;
        dialog.set_file_type_index(request.effective_filter_index())?;
    }

    if let Some(title) = non_empty(&request.title) {
        dialog.set_title(title)?;
    }
    if let Some(label) = non_empty(&request.ok_button_label) {
        dialog.set_ok_button_label(label)?;
    }
    if let Some(label) = non_empty(&request.file_name_label) {
        dialog.set_file_name_label(label)?;
    }

    if mode.is_save() {
        if let Some(name) = non_empty(&request.default_filename) {
            dialog.set_file_name(name)?;
        }
        let selected = filters.get(request.effective_filter_index() as usize - 1);
        if let Some(ext) = selected.and_then(|f| f.default_extension()) {
            dialog.set_default_extension(ext)?;
        }
    }

    if let Some(dir) = &request.initial_dir {
        dialog.set_folder(dir)?;
    }

    Ok(())
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::{
        catalog::CommonFilter,
        error::DialogError,
        filter::FileFilter,
        platform::mock::{MockBackend, Script, CLASS_NOT_REGISTERED, E_FAIL, E_INVALIDARG},
        request::DialogOptions,
    };

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn invoker(script: Script) -> DialogInvoker<MockBackend> {
        init_logging();
        DialogInvoker::with_backend(MockBackend::new(script))
    }

    fn assert_balanced(inv: &DialogInvoker<MockBackend>) {
        let log = inv.backend().log.borrow();
        assert_eq!(log.acquired, log.released, "native dialog leaked");
    }

    fn accept(paths: &[&str]) -> Script {
        Script::Accept(paths.iter().map(PathBuf::from).collect())
    }

    #[test]
    fn get_file_returns_selected_path() {
        let inv = invoker(accept(&[r"C:\data\report.txt"]));
        let req = DialogRequest::new().with_title("Select a file");

        let path = inv.get_file(&req).unwrap();

        assert_eq!(path, Some(PathBuf::from(r"C:\data\report.txt")));
        let log = inv.backend().log.borrow();
        assert_eq!(log.title.as_deref(), Some("Select a file"));
        assert_eq!(log.mode, Some(DialogMode::Open));
        assert!(log.file_types.is_empty(), "no filters means all files");
        assert_eq!(log.file_type_index, None);
        drop(log);
        assert_balanced(&inv);
    }

    #[test]
    fn get_file_forces_open_mode() {
        let inv = invoker(accept(&[r"C:\a.txt"]));
        let req = DialogRequest::new().with_mode(DialogMode::Save);
        inv.get_file(&req).unwrap();
        let log = inv.backend().log.borrow();
        assert_eq!(log.mode, Some(DialogMode::Open));
        assert!(log.options.contains(DialogOptions::FILEMUSTEXIST));
        assert!(!log.options.contains(DialogOptions::OVERWRITEPROMPT));
    }

    #[test]
    fn cancel_is_never_an_error() {
        let req = DialogRequest::new().with_filter(CommonFilter::Png.filter().clone());

        let inv = invoker(Script::Cancel);
        assert_eq!(inv.get_file(&req).unwrap(), None);
        assert_eq!(inv.get_files(&req).unwrap(), Vec::<PathBuf>::new());
        assert_eq!(inv.set_file(&req).unwrap(), None);
        assert_eq!(inv.get_dir(&req).unwrap(), None);
        assert!(inv.show(&req).unwrap().is_cancelled());

        let log = inv.backend().log.borrow();
        assert_eq!(log.acquired, 5);
        assert_eq!(log.released, 5);
        assert_eq!(log.shown, 5);
    }

    #[test]
    fn get_files_preserves_platform_order() {
        let inv = invoker(accept(&[r"C:\z.png", r"C:\a.png", r"C:\m.png"]));
        let files = inv.get_files(&DialogRequest::new()).unwrap();
        assert_eq!(
            files,
            vec![PathBuf::from(r"C:\z.png"), PathBuf::from(r"C:\a.png"), PathBuf::from(r"C:\m.png")]
        );
        assert!(inv
            .backend()
            .log
            .borrow()
            .options
            .contains(DialogOptions::ALLOWMULTISELECT));
        assert_balanced(&inv);
    }

    #[test]
    fn get_files_with_single_selection_is_a_one_element_vec() {
        let inv = invoker(accept(&[r"C:\only.txt"]));
        assert_eq!(inv.get_files(&DialogRequest::new()).unwrap(), vec![PathBuf::from(r"C:\only.txt")]);
    }

    #[test]
    fn filter_order_matches_caller_order() {
        let inv = invoker(accept(&[r"C:\x.csv"]));
        let req = DialogRequest::new().with_filters([
            CommonFilter::Csv.filter().clone(),
            FileFilter::new("Spreadsheets", ["xlsx", "ods"]).unwrap(),
            CommonFilter::All.filter().clone(),
        ]);

        inv.get_file(&req).unwrap();

        let log = inv.backend().log.borrow();
        let sent: Vec<(&str, &str)> =
            log.file_types.iter().map(|t| (t.name.as_str(), t.spec.as_str())).collect();
        assert_eq!(
            sent,
            [
                ("CSV files (csv)", "*.csv"),
                ("Spreadsheets (xlsx, ods)", "*.xlsx;*.ods"),
                ("All files", "*.*"),
            ]
        );
        assert_eq!(log.file_type_index, Some(1));
    }

    #[test]
    fn set_file_cancel_writes_nothing() {
        let dir = std::env::temp_dir().join(format!("nativedialog-save-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let inv = invoker(Script::Cancel);
        let req = DialogRequest::new()
            .with_initial_dir(&dir)
            .with_default_filename("output.csv");

        assert_eq!(inv.set_file(&req).unwrap(), None);

        assert!(!dir.join("output.csv").exists());
        assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 0);
        let log = inv.backend().log.borrow();
        assert_eq!(log.file_name.as_deref(), Some("output.csv"));
        assert_eq!(log.folder.as_deref(), Some(dir.as_path()));
        drop(log);
        assert_balanced(&inv);
        std::fs::remove_dir(&dir).unwrap();
    }

    #[test]
    fn set_file_returns_confirmed_path_unchanged() {
        let inv = invoker(accept(&[r"C:\out\new file"]));
        let req = DialogRequest::new()
            .with_default_filename("new file")
            .with_filter(CommonFilter::Csv.filter().clone());

        let path = inv.set_file(&req).unwrap();

        assert_eq!(path, Some(PathBuf::from(r"C:\out\new file")));
        let log = inv.backend().log.borrow();
        assert_eq!(log.default_extension.as_deref(), Some("csv"));
        assert!(log.options.contains(DialogOptions::OVERWRITEPROMPT));
        assert!(log.options.contains(DialogOptions::STRICTFILETYPES));
    }

    #[test]
    fn default_filename_is_ignored_outside_save() {
        let inv = invoker(accept(&[r"C:\a.txt"]));
        inv.get_file(&DialogRequest::new().with_default_filename("a.txt")).unwrap();
        assert_eq!(inv.backend().log.borrow().file_name, None);
    }

    #[test]
    fn get_dir_suppresses_filters() {
        let inv = invoker(accept(&[r"C:\Users\me\Documents"]));
        let req = DialogRequest::new()
            .with_title("Select folder")
            .with_filter(CommonFilter::ImageAll.filter().clone());

        let dir = inv.get_dir(&req).unwrap();

        assert_eq!(dir, Some(PathBuf::from(r"C:\Users\me\Documents")));
        let log = inv.backend().log.borrow();
        assert!(log.file_types.is_empty());
        assert!(log.options.contains(DialogOptions::PICKFOLDERS));
        assert_eq!(log.title.as_deref(), Some("Select folder"));
    }

    #[test]
    fn platform_options_are_preserved() {
        init_logging();
        let backend = MockBackend::new(accept(&[r"C:\a"])).with_initial_options(DialogOptions::NOCHANGEDIR);
        let inv = DialogInvoker::with_backend(backend);
        inv.get_file(&DialogRequest::new().with_options(DialogOptions::FORCESHOWHIDDEN)).unwrap();
        let opts = inv.backend().log.borrow().options;
        assert!(opts.contains(DialogOptions::NOCHANGEDIR));
        assert!(opts.contains(DialogOptions::FORCESHOWHIDDEN));
        assert!(opts.contains(DialogOptions::FORCEFILESYSTEM));
    }

    #[test]
    fn labels_and_owner_reach_the_platform() {
        let inv = invoker(accept(&[r"C:\a"]));
        let req = DialogRequest::new()
            .with_ok_button_label("Import")
            .with_file_name_label("Track:")
            .with_title("")
            .with_owner(0x42);
        inv.get_file(&req).unwrap();
        let log = inv.backend().log.borrow();
        assert_eq!(log.ok_button_label.as_deref(), Some("Import"));
        assert_eq!(log.file_name_label.as_deref(), Some("Track:"));
        assert_eq!(log.title, None, "empty title is not sent");
        assert_eq!(log.owner, Some(0x42));
    }

    #[test]
    fn creation_failure_is_initialization_error() {
        let inv = invoker(Script::FailCreate(CLASS_NOT_REGISTERED));
        let err = inv.get_file(&DialogRequest::new()).unwrap_err();
        assert!(err.is_fatal());
        assert_eq!(err.code(), Some(CLASS_NOT_REGISTERED));
        let log = inv.backend().log.borrow();
        assert_eq!(log.acquired, 0);
        assert_eq!(log.released, 0);
    }

    #[test]
    fn rejected_folder_fails_before_show() {
        let inv = invoker(Script::Reject("initial_dir"));
        let req = DialogRequest::new().with_initial_dir(r"C:\nope\<bad>");
        let err = inv.get_file(&req).unwrap_err();
        assert!(matches!(
            err,
            DialogError::Configuration { option: "initial_dir", code: Some(E_INVALIDARG) }
        ));
        assert_eq!(inv.backend().log.borrow().shown, 0, "no partial UI");
        assert_balanced(&inv);
    }

    #[test]
    fn rejected_filters_fail_before_show() {
        let inv = invoker(Script::Reject("filters"));
        let req = DialogRequest::new().with_filter(CommonFilter::Pdf.filter().clone());
        assert!(inv.set_file(&req).is_err());
        assert_eq!(inv.backend().log.borrow().shown, 0);
        assert_balanced(&inv);
    }

    #[test]
    fn show_failure_carries_status_code() {
        let inv = invoker(Script::FailShow(E_FAIL));
        let err = inv.get_files(&DialogRequest::new()).unwrap_err();
        assert!(matches!(err, DialogError::Platform { code: E_FAIL, .. }));
        assert_balanced(&inv);
    }

    #[test]
    fn result_read_failure_releases_dialog() {
        let inv = invoker(Script::FailResults(E_FAIL));
        assert!(inv.get_dir(&DialogRequest::new()).is_err());
        assert_balanced(&inv);
    }

    #[test]
    fn accept_with_no_items_is_treated_as_cancel() {
        let inv = invoker(Script::Accept(Vec::new()));
        assert_eq!(inv.get_file(&DialogRequest::new()).unwrap(), None);
        assert!(inv.get_files(&DialogRequest::new()).unwrap().is_empty());
    }

    #[test]
    fn paths_are_not_normalized() {
        let raw = r"c:\Data\..\report.TXT";
        let inv = invoker(accept(&[raw]));
        assert_eq!(inv.get_file(&DialogRequest::new()).unwrap().as_deref(), Some(Path::new(raw)));
    }
}
