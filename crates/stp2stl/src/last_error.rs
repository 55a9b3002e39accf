//! Per-thread diagnostic slot for the most recent failure.
//!
//! Each thread owns its own slot. A conversion call clears it on entry and
//! overwrites it on failure; nothing else writes to it.

use std::cell::RefCell;
use std::ffi::{c_char, CString};

thread_local! {
    static LAST_ERROR: RefCell<CString> = RefCell::new(CString::default());
}

/// The diagnostic recorded by the last failing conversion on this thread.
///
/// Empty if the most recent call on this thread succeeded, or if no call
/// has been made yet.
pub fn last_error() -> String {
    LAST_ERROR.with(|slot| slot.borrow().to_string_lossy().into_owned())
}

pub(crate) fn clear() {
    LAST_ERROR.with(|slot| *slot.borrow_mut() = CString::default());
}

pub(crate) fn set(message: &str) {
    let bytes: Vec<u8> = message.bytes().filter(|&b| b != 0).collect();
    // No interior NUL is left, so this cannot fail.
    let message = CString::new(bytes).unwrap_or_default();
    LAST_ERROR.with(|slot| *slot.borrow_mut() = message);
}

/// Pointer to this thread's NUL-terminated diagnostic.
///
/// Valid until the next conversion call on the same thread.
pub(crate) fn as_ptr() -> *const c_char {
    LAST_ERROR.with(|slot| slot.borrow().as_ptr())
}
