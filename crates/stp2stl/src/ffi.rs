//! C ABI.
//!
//! ```c
//! typedef struct stp2stl_options {
//!   double linear_deflection;
//!   double angular_deflection_deg;
//!   int relative_deflection;
//!   int binary;
//!   double scale;
//!   int parallel;
//! } stp2stl_options;
//!
//! void stp2stl_default_options(stp2stl_options*);
//! int stp2stl_convert_utf8(const char*, const char*, const stp2stl_options*);
//! const char* stp2stl_last_error_utf8(void);
//! const char* stp2stl_version(void);
//! ```
//!
//! Paths must be NUL-terminated UTF-8. Platform-specific argument encodings
//! (Windows wide strings) are the caller's business.

#![allow(non_camel_case_types)]

use std::ffi::{c_char, c_int, CStr};

use crate::options::ConversionOptions;
use crate::{last_error, VERSION_NUL};

/// C mirror of [`ConversionOptions`]. Booleans are `int`, nonzero = true.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct stp2stl_options {
    /// See [`ConversionOptions::linear_deflection`].
    pub linear_deflection: f64,
    /// See [`ConversionOptions::angular_deflection`].
    pub angular_deflection_deg: f64,
    /// See [`ConversionOptions::relative_deflection`].
    pub relative_deflection: c_int,
    /// See [`ConversionOptions::binary_output`].
    pub binary: c_int,
    /// See [`ConversionOptions::scale`].
    pub scale: f64,
    /// See [`ConversionOptions::parallel`].
    pub parallel: c_int,
}

impl From<ConversionOptions> for stp2stl_options {
    fn from(o: ConversionOptions) -> Self {
        Self {
            linear_deflection: o.linear_deflection,
            angular_deflection_deg: o.angular_deflection,
            relative_deflection: o.relative_deflection.into(),
            binary: o.binary_output.into(),
            scale: o.scale,
            parallel: o.parallel.into(),
        }
    }
}

impl From<stp2stl_options> for ConversionOptions {
    fn from(o: stp2stl_options) -> Self {
        Self {
            linear_deflection: o.linear_deflection,
            angular_deflection: o.angular_deflection_deg,
            relative_deflection: o.relative_deflection != 0,
            binary_output: o.binary != 0,
            scale: o.scale,
            parallel: o.parallel != 0,
        }
    }
}

/// Fill `*opt` with the defaults. Does nothing if `opt` is null.
///
/// # Safety
///
/// `opt` must be null or point to writable memory for one `stp2stl_options`.
#[no_mangle]
pub unsafe extern "C" fn stp2stl_default_options(opt: *mut stp2stl_options) {
    // SAFETY: caller guarantees `opt` is null or valid for writes.
    if let Some(opt) = unsafe { opt.as_mut() } {
        *opt = ConversionOptions::default().into();
    }
}

/// Convert a STEP file to STL. Returns a status code, 0 on success.
///
/// A null `opt` selects the defaults. On failure the diagnostic is
/// available from [`stp2stl_last_error_utf8`] on the same thread.
///
/// # Safety
///
/// `step_path` and `stl_path` must each be null or point to a NUL-terminated
/// string; `opt` must be null or point to a valid `stp2stl_options`.
#[no_mangle]
pub unsafe extern "C" fn stp2stl_convert_utf8(
    step_path: *const c_char,
    stl_path: *const c_char,
    opt: *const stp2stl_options,
) -> c_int {
    // SAFETY: caller guarantees each pointer is null or valid as documented.
    let (input, output, options) = unsafe {
        (
            c_bytes(step_path),
            c_bytes(stl_path),
            opt.as_ref().map(|o| ConversionOptions::from(*o)),
        )
    };
    crate::convert_utf8(input, output, options.as_ref()).as_i32()
}

/// The calling thread's last diagnostic, empty after a successful call.
///
/// The pointer stays valid until the next conversion call on this thread.
#[no_mangle]
pub extern "C" fn stp2stl_last_error_utf8() -> *const c_char {
    last_error::as_ptr()
}

/// Static library/kernel identification string.
#[no_mangle]
pub extern "C" fn stp2stl_version() -> *const c_char {
    VERSION_NUL.as_ptr().cast()
}

/// # Safety
///
/// `p` must be null or point to a NUL-terminated string that outlives `'a`.
unsafe fn c_bytes<'a>(p: *const c_char) -> Option<&'a [u8]> {
    if p.is_null() {
        None
    } else {
        // SAFETY: non-null and NUL-terminated per the caller's contract.
        Some(unsafe { CStr::from_ptr(p) }.to_bytes())
    }
}
