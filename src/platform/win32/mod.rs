// ── Win32 platform implementation ─────────────────────────────────────────────
//
// This is the only module in the crate where `unsafe` code is permitted.
// Every `unsafe` block MUST carry a `// SAFETY:` comment that states:
//   • which invariant makes the operation sound, and
//   • what the caller is responsible for maintaining.
//
// Nothing in this module is `pub` beyond what callers genuinely need; keep the
// unsafe surface as small as possible.

#![allow(unsafe_code)]

// ── Sub-modules ───────────────────────────────────────────────────────────────

pub mod dialogs; // Common Item Dialog backend

pub(crate) mod com; // per-call COM apartment

/// Reinterpret a windows-crate error's HRESULT bits as `u32` for display.
/// Win32 errors appear as 0x8007xxxx HRESULTs.
pub(crate) fn hresult(e: &windows::core::Error) -> u32 {
    e.code().0 as u32
}
