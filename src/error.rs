// ── Central error type ────────────────────────────────────────────────────────
//
// All fallible operations return `error::Result<T>`.  User cancellation is
// NOT an error: it surfaces as `DialogResult::Cancelled` (or `None` / an empty
// `Vec` from the per-mode entry points).

/// Every error the dialog layer can produce.
#[derive(Debug)]
pub enum DialogError {
    /// The native dialog object (or the COM apartment it lives in) could not
    /// be created.  Typically an unsupported OS or a broken COM install.
    Initialization {
        /// The name of the failing function, for display purposes.
        function: &'static str,
        /// The raw HRESULT, reinterpreted as `u32`.
        code: u32,
    },

    /// A configuration value was rejected before the dialog was shown.
    Configuration {
        /// Which option was rejected (`"title"`, `"initial_dir"`, …).
        option: &'static str,
        /// The HRESULT when the platform rejected it; `None` when local
        /// validation did.
        code: Option<u32>,
    },

    /// Showing the dialog or reading its result failed for a reason other
    /// than cancellation.
    Platform {
        function: &'static str,
        code: u32,
    },

    /// A preset file could not be read.
    Io(std::io::Error),

    /// A preset file was not valid JSON, or did not describe valid requests.
    Preset(serde_json::Error),
}

impl DialogError {
    /// The native status code attached to this error, if any.
    pub fn code(&self) -> Option<u32> {
        match self {
            Self::Initialization { code, .. } | Self::Platform { code, .. } => Some(*code),
            Self::Configuration { code, .. } => *code,
            Self::Io(_) | Self::Preset(_) => None,
        }
    }

    /// `true` for errors a caller should present as "unsupported platform"
    /// rather than "dialog could not be opened".
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Initialization { .. })
    }
}

impl std::fmt::Display for DialogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Initialization { function, code } => {
                write!(f, "could not create file dialog: {function} failed (error {code:#010x})")
            }
            Self::Configuration { option, code: Some(code) } => {
                write!(f, "dialog option `{option}` rejected by the platform (error {code:#010x})")
            }
            Self::Configuration { option, code: None } => {
                write!(f, "dialog option `{option}` is invalid")
            }
            Self::Platform { function, code } => {
                write!(f, "{function} failed (error {code:#010x})")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Preset(e) => write!(f, "invalid dialog preset: {e}"),
        }
    }
}

impl std::error::Error for DialogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Preset(e) => Some(e),
            Self::Initialization { .. } | Self::Configuration { .. } | Self::Platform { .. } => None,
        }
    }
}

impl From<std::io::Error> for DialogError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for DialogError {
    fn from(e: serde_json::Error) -> Self {
        Self::Preset(e)
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DialogError>;

// ── Tests ─────────────────────────────────────────────────────────────────────
