//! Capability interface to the B-rep geometry kernel.
//!
//! The conversion pipeline never touches geometry itself. Loading a STEP
//! model, transforming it, tessellating it and serializing the mesh are all
//! calls through [`Kernel`], so a backend can be swapped (or scripted in
//! tests) without touching pipeline logic.
//!
//! Backends:
//! - [`OcctKernel`] (feature `occt`): OpenCASCADE via the `opencascade` crate.
//! - [`UnavailableKernel`]: placeholder used when no backend is compiled in.

#[cfg(feature = "occt")]
mod occt;

use std::fs::File;
use std::path::Path;

use thiserror::Error;

use crate::stl::StlFormat;

#[cfg(feature = "occt")]
pub use occt::{OcctKernel, OcctShape};

/// The backend used by [`crate::convert`] and the C ABI.
#[cfg(feature = "occt")]
pub type DefaultKernel = OcctKernel;

/// The backend used by [`crate::convert`] and the C ABI.
#[cfg(not(feature = "occt"))]
pub type DefaultKernel = UnavailableKernel;

/// Fallback text for a kernel failure that carries no message.
pub const FAILURE_FALLBACK: &str = "kernel failure";

/// Errors reported by a [`Kernel`] backend.
///
/// The three load variants map to distinct status codes. Every other
/// backend failure is either a recognized kernel failure ([`Failure`]) or
/// something the backend cannot classify ([`Other`]).
///
/// [`Failure`]: KernelError::Failure
/// [`Other`]: KernelError::Other
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KernelError {
    /// The input file could not be read.
    #[error("{0}")]
    Read(String),

    /// The file was read but its root entities could not be transferred.
    #[error("{0}")]
    Transfer(String),

    /// The transferred shape is null.
    #[error("resulting shape is null")]
    NullShape,

    /// The kernel raised a failure, with its message when it provided one.
    #[error("{}", .0.as_deref().unwrap_or(FAILURE_FALLBACK))]
    Failure(Option<String>),

    /// A failure the backend does not recognize as its own.
    #[error("{0}")]
    Other(String),
}

impl KernelError {
    /// Shorthand for a kernel failure with a message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure(Some(message.into()))
    }
}

impl From<std::io::Error> for KernelError {
    fn from(err: std::io::Error) -> Self {
        Self::Failure(Some(err.to_string()))
    }
}

/// Tessellation controls handed to [`Kernel::tessellate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshParams {
    /// Maximum distance between the surface and its mesh.
    pub linear_deflection: f64,
    /// Maximum angle between adjacent facet normals, in radians.
    pub angular_deflection: f64,
    /// Interpret `linear_deflection` relative to each entity's size.
    pub relative: bool,
    /// Allow the kernel to mesh on several threads.
    pub parallel: bool,
}

/// Narrow interface to a B-rep kernel.
///
/// Shapes and meshes are owned values. The pipeline holds them for exactly
/// one conversion and drops them on every exit path.
pub trait Kernel {
    /// A loaded (and possibly transformed) solid model.
    type Shape;
    /// A tessellated shape ready to be written.
    type Mesh;

    /// Read a STEP file and transfer its roots into a single shape.
    fn load(&self, path: &Path) -> Result<Self::Shape, KernelError>;

    /// Apply a uniform scale about the origin, preserving topology.
    fn scale(&self, shape: Self::Shape, factor: f64) -> Result<Self::Shape, KernelError>;

    /// Triangulate `shape` under the given deflection controls.
    fn tessellate(&self, shape: Self::Shape, params: &MeshParams) -> Result<Self::Mesh, KernelError>;

    /// Serialize `mesh` to `path` as STL.
    fn write_stl(&self, mesh: &Self::Mesh, path: &Path, format: StlFormat) -> Result<(), KernelError>;
}

/// Backend used when the crate is built without a geometry kernel.
///
/// The input is still opened so that a missing file reports a read failure;
/// anything readable fails with a kernel failure naming the missing feature.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableKernel;

impl UnavailableKernel {
    const MESSAGE: &'static str =
        "no geometry kernel linked into this build (enable the `occt` feature)";
}

impl Kernel for UnavailableKernel {
    type Shape = ();
    type Mesh = ();

    fn load(&self, path: &Path) -> Result<(), KernelError> {
        File::open(path).map_err(|e| KernelError::Read(format!("{}: {e}", path.display())))?;
        Err(KernelError::failure(Self::MESSAGE))
    }

    fn scale(&self, _shape: (), _factor: f64) -> Result<(), KernelError> {
        Err(KernelError::failure(Self::MESSAGE))
    }

    fn tessellate(&self, _shape: (), _params: &MeshParams) -> Result<(), KernelError> {
        Err(KernelError::failure(Self::MESSAGE))
    }

    fn write_stl(&self, _mesh: &(), _path: &Path, _format: StlFormat) -> Result<(), KernelError> {
        Err(KernelError::failure(Self::MESSAGE))
    }
}
