//! Native Windows file open, save and folder dialogs.
//!
//! Wraps the Common Item Dialog (`IFileOpenDialog` / `IFileSaveDialog`,
//! Windows Vista and later).  Build a [`DialogRequest`], hand it to a
//! [`DialogInvoker`], read back the path(s):
//!
//! ```no_run
//! # #[cfg(not(windows))] fn main() {}
//! # #[cfg(windows)] fn main() {
//! use nativedialog::{CommonFilter, DialogInvoker, DialogRequest};
//!
//! let request = DialogRequest::new()
//!     .with_title("Open image")
//!     .with_filter(CommonFilter::ImageAll.filter().clone())
//!     .with_filter(CommonFilter::All.filter().clone());
//!
//! match DialogInvoker::new().get_file(&request) {
//!     Ok(Some(path)) => println!("{}", path.display()),
//!     Ok(None) => println!("cancelled"),
//!     Err(e) => eprintln!("{e}"),
//! }
//! # }
//! ```
//!
//! Every call is modal and blocks the calling thread until the user is done.
//! Cancelling is not an error.

// ── Safety policy ────────────────────────────────────────────────────────────
// Unsafe code is forbidden everywhere except `platform::win32` (COM FFI).
// Each unsafe block in that module MUST carry a `// SAFETY:` comment.
#![deny(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod filter;
pub mod invoker;
pub mod platform;
pub mod presets;
pub mod request;

pub use catalog::CommonFilter;
pub use error::{DialogError, Result};
pub use filter::FileFilter;
pub use invoker::DialogInvoker;
pub use request::{DialogMode, DialogOptions, DialogRequest, DialogResult};

#[cfg(windows)]
pub use platform::win32::dialogs::Win32Backend;
