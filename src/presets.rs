// ── Dialog presets ────────────────────────────────────────────────────────────
//
// Named `DialogRequest`s kept in a JSON file, so applications can describe
// their dialogs as data:
//
//   { "version": 1,
//     "presets": { "import": { "title": "Import", "filters": [...] } } }
//
// No `unsafe`: pure safe Rust + serde_json.

use std::{collections::BTreeMap, fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    error::{DialogError, Result},
    request::DialogRequest,
};

// ── Format version ────────────────────────────────────────────────────────────

pub const PRESET_VERSION: u32 = 1;

// ── On-disk types ─────────────────────────────────────────────────────────────

/// Root of a preset file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetFile {
    pub version: u32,
    #[serde(default)]
    pub presets: BTreeMap<String, DialogRequest>,
}

impl Default for PresetFile {
    fn default() -> Self {
        Self { version: PRESET_VERSION, presets: BTreeMap::new() }
    }
}

impl PresetFile {
    /// A copy of the named request, ready to hand to the invoker.
    pub fn request(&self, name: &str) -> Option<DialogRequest> {
        self.presets.get(name).cloned()
    }

    pub fn insert(&mut self, name: impl Into<String>, request: DialogRequest) {
        self.presets.insert(name.into(), request);
    }

    /// Parse preset JSON.  Filters are validated as they deserialize.
    pub fn from_json(data: &[u8]) -> Result<Self> {
        let file: PresetFile = serde_json::from_slice(data)?;
        if file.version != PRESET_VERSION {
            return Err(DialogError::Configuration { option: "preset.version", code: None });
        }
        Ok(file)
    }
}

// ── Load / save ───────────────────────────────────────────────────────────────

/// Read and validate a preset file.
pub fn load(path: &Path) -> Result<PresetFile> {
    let data = fs::read(path)?;
    let file = PresetFile::from_json(&data)?;
    log::debug!("loaded {} dialog preset(s) from {}", file.presets.len(), path.display());
    Ok(file)
}

/// Write `file` to `path`, creating the parent directory if needed.
pub fn save(path: &Path, file: &PresetFile) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let out = fs::File::create(path)?;
    serde_json::to_writer_pretty(out, file)?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
