#![allow(unsafe_code)]

use std::marker::PhantomData;

use windows::Win32::{
    Foundation::RPC_E_CHANGED_MODE,
    System::Com::{CoInitializeEx, CoUninitialize, COINIT_APARTMENTTHREADED, COINIT_DISABLE_OLE1DDE},
};

use crate::error::{DialogError, Result};

use super::hresult;

/// COM initialization for the current thread, undone on drop.
///
/// MUST be dropped on the thread that created it, after every interface
/// pointer obtained under it has been released.
pub(crate) struct Apartment {
    /// `false` when the thread was already initialized with another
    /// concurrency model; that initialization is not ours to undo.
    owned: bool,
    /// COM initialization is per thread.
    _not_send: PhantomData<*const ()>,
}

impl Apartment {
    pub(crate) fn enter() -> Result<Self> {
        // SAFETY: no reserved pointer is passed.  Every successful call
        // (S_OK or S_FALSE) is balanced by CoUninitialize in Drop.
        let hr = unsafe { CoInitializeEx(None, COINIT_APARTMENTTHREADED | COINIT_DISABLE_OLE1DDE) };
        if hr == RPC_E_CHANGED_MODE {
            log::debug!("thread already in a multithreaded apartment; reusing it");
            return Ok(Self { owned: false, _not_send: PhantomData });
        }
        hr.ok().map_err(|e| DialogError::Initialization {
            function: "CoInitializeEx",
            code: hresult(&e),
        })?;
        Ok(Self { owned: true, _not_send: PhantomData })
    }
}

impl Drop for Apartment {
    fn drop(&mut self) {
        if self.owned {
            // SAFETY: balances the successful CoInitializeEx in `enter` on
            // the same thread (`Apartment` is `!Send`).
            unsafe { CoUninitialize() };
        }
    }
}
