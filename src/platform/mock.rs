// ── Recording backend for tests ───────────────────────────────────────────────
//
// Plays back a scripted user action and records every configuration call,
// plus acquire / release counts so tests can assert nothing leaks.

use std::{
    cell::RefCell,
    path::{Path, PathBuf},
    rc::Rc,
};

use crate::{
    error::{DialogError, Result},
    request::{DialogMode, DialogOptions},
};

use super::{DialogBackend, FileType, NativeDialog, ShowOutcome};

/// E_FAIL
pub(crate) const E_FAIL: u32 = 0x8000_4005;
/// E_INVALIDARG
pub(crate) const E_INVALIDARG: u32 = 0x8007_0057;
/// REGDB_E_CLASSNOTREG
pub(crate) const CLASS_NOT_REGISTERED: u32 = 0x8004_0154;

/// What the simulated user (or platform) does.
#[derive(Debug, Clone)]
pub(crate) enum Script {
    Accept(Vec<PathBuf>),
    Cancel,
    FailCreate(u32),
    FailShow(u32),
    FailResults(u32),
    /// Reject the named setter with `E_INVALIDARG`.
    Reject(&'static str),
}

/// Everything the invoker did to the dialog.
#[derive(Debug, Default)]
pub(crate) struct MockLog {
    pub(crate) acquired: usize,
    pub(crate) released: usize,
    pub(crate) mode: Option<DialogMode>,
    pub(crate) options: DialogOptions,
    pub(crate) file_types: Vec<FileType>,
    pub(crate) file_type_index: Option<u32>,
    pub(crate) title: Option<String>,
    pub(crate) ok_button_label: Option<String>,
    pub(crate) file_name_label: Option<String>,
    pub(crate) file_name: Option<String>,
    pub(crate) default_extension: Option<String>,
    pub(crate) folder: Option<PathBuf>,
    pub(crate) owner: Option<isize>,
    pub(crate) shown: usize,
}

pub(crate) struct MockBackend {
    pub(crate) log: Rc<RefCell<MockLog>>,
    script: Script,
    /// Options the native object reports before configuration.
    initial_options: DialogOptions,
}

impl MockBackend {
    pub(crate) fn new(script: Script) -> Self {
        Self {
            log: Rc::default(),
            script,
            initial_options: DialogOptions::NONE,
        }
    }

    pub(crate) fn with_initial_options(mut self, options: DialogOptions) -> Self {
        self.initial_options = options;
        self
    }
}

impl DialogBackend for MockBackend {
    type Dialog = MockDialog;

    fn create(&self, mode: DialogMode) -> Result<MockDialog> {
        if let Script::FailCreate(code) = self.script {
            return Err(DialogError::Initialization { function: "CoCreateInstance", code });
        }
        let mut log = self.log.borrow_mut();
        log.acquired += 1;
        log.mode = Some(mode);
        log.options = self.initial_options;
        Ok(MockDialog { log: Rc::clone(&self.log), script: self.script.clone() })
    }
}

pub(crate) struct MockDialog {
    log: Rc<RefCell<MockLog>>,
    script: Script,
}

impl MockDialog {
    fn check(&self, option: &'static str) -> Result<()> {
        match self.script {
            Script::Reject(name) if name == option => {
                Err(DialogError::Configuration { option, code: Some(E_INVALIDARG) })
            }
            _ => Ok(()),
        }
    }
}

impl Drop for MockDialog {
    fn drop(&mut self) {
        self.log.borrow_mut().released += 1;
    }
}

impl NativeDialog for MockDialog {
    fn options(&self) -> Result<DialogOptions> {
        Ok(self.log.borrow().options)
    }

    fn set_options(&self, options: DialogOptions) -> Result<()> {
        self.check("options")?;
        self.log.borrow_mut().options = options;
        Ok(())
    }

    fn set_file_types(&self, types: &[FileType]) -> Result<()> {
        self.check("filters")?;
        self.log.borrow_mut().file_types = types.to_vec();
        Ok(())
    }

    fn set_file_type_index(&self, index: u32) -> Result<()> {
        self.check("filter_index")?;
        self.log.borrow_mut().file_type_index = Some(index);
        Ok(())
    }

    fn set_title(&self, title: &str) -> Result<()> {
        self.check("title")?;
        self.log.borrow_mut().title = Some(title.to_owned());
        Ok(())
    }

    fn set_ok_button_label(&self, label: &str) -> Result<()> {
        self.check("ok_button_label")?;
        self.log.borrow_mut().ok_button_label = Some(label.to_owned());
        Ok(())
    }

    fn set_file_name_label(&self, label: &str) -> Result<()> {
        self.check("file_name_label")?;
        self.log.borrow_mut().file_name_label = Some(label.to_owned());
        Ok(())
    }

    fn set_file_name(&self, name: &str) -> Result<()> {
        self.check("default_filename")?;
        self.log.borrow_mut().file_name = Some(name.to_owned());
        Ok(())
    }

    fn set_default_extension(&self, ext: &str) -> Result<()> {
        self.check("default_extension")?;
        self.log.borrow_mut().default_extension = Some(ext.to_owned());
        Ok(())
    }

    fn set_folder(&self, dir: &Path) -> Result<()> {
        self.check("initial_dir")?;
        self.log.borrow_mut().folder = Some(dir.to_path_buf());
        Ok(())
    }

    fn show(&self, owner: Option<isize>) -> Result<ShowOutcome> {
        let mut log = self.log.borrow_mut();
        log.shown += 1;
        log.owner = owner;
        match self.script {
            Script::Cancel => Ok(ShowOutcome::Cancelled),
            Script::FailShow(code) => Err(DialogError::Platform { function: "IFileDialog::Show", code }),
            _ => Ok(ShowOutcome::Accepted),
        }
    }

    fn results(&self) -> Result<Vec<PathBuf>> {
        match &self.script {
            Script::Accept(paths) => Ok(paths.clone()),
            Script::FailResults(code) => {
                Err(DialogError::Platform { function: "IFileOpenDialog::GetResults", code: *code })
            }
            _ => Ok(Vec::new()),
        }
    }
}
