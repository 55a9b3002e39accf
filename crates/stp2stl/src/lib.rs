#![warn(missing_docs)]

//! STEP to STL conversion.
//!
//! Loads a B-rep solid from a STEP file, optionally scales it about the
//! origin, tessellates it under deflection tolerances and writes the mesh as
//! binary or ASCII STL. Geometry is delegated to a [`Kernel`] backend; this
//! crate owns the option model, the UTF-8 path contract and the status codes.
//!
//! The same pipeline is exposed three ways:
//! - [`Converter`], generic over any [`Kernel`];
//! - [`convert`] / [`convert_utf8`], using the [`DefaultKernel`];
//! - a C ABI (`stp2stl_convert_utf8` and friends) for non-Rust callers.
//!
//! # Example
//!
//! ```no_run
//! use stp2stl::{convert, default_options, last_error, ConversionOptions};
//!
//! let opts = ConversionOptions {
//!     binary_output: false,
//!     ..default_options()
//! };
//! if let Err(e) = convert("bracket.step", "bracket.stl", &opts) {
//!     eprintln!("failed ({}): {}", e.status().as_i32(), last_error());
//! }
//! ```

pub mod error;
pub mod ffi;
pub mod kernel;
mod last_error;
pub mod mesh;
pub mod options;
mod pipeline;
pub mod stl;
pub mod utf8;

pub use error::{ConvertError, Status};
pub use kernel::{DefaultKernel, Kernel, KernelError, MeshParams, UnavailableKernel};
pub use last_error::last_error;
pub use mesh::TriangleMesh;
pub use options::{default_options, ConversionOptions};
pub use pipeline::Converter;
pub use stl::StlFormat;
pub use utf8::is_valid_utf8;

#[cfg(feature = "occt")]
pub use kernel::OcctKernel;

#[cfg(feature = "occt")]
const VERSION_NUL: &str = concat!("stp2stl/", env!("CARGO_PKG_VERSION"), " (OCCT)\0");
#[cfg(not(feature = "occt"))]
const VERSION_NUL: &str = concat!("stp2stl/", env!("CARGO_PKG_VERSION"), " (no kernel)\0");

/// Library and kernel identification, e.g. `stp2stl/0.1.0 (OCCT)`.
///
/// Fixed at compile time; needs no initialization.
pub fn version() -> &'static str {
    &VERSION_NUL[..VERSION_NUL.len() - 1]
}

/// Convert `input` (STEP) to `output` (STL) with the [`DefaultKernel`].
///
/// On failure the diagnostic is also available from [`last_error`] on the
/// calling thread.
pub fn convert(input: &str, output: &str, options: &ConversionOptions) -> error::Result<()> {
    Converter::new(DefaultKernel::default()).convert(input, output, options)
}

/// Boundary form of [`convert`]: raw UTF-8 byte paths, `None` for null.
pub fn convert_utf8(
    input: Option<&[u8]>,
    output: Option<&[u8]>,
    options: Option<&ConversionOptions>,
) -> Status {
    Converter::new(DefaultKernel::default()).convert_status(input, output, options)
}
