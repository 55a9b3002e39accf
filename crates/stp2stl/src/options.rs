//! Conversion parameters.

use serde::{Deserialize, Serialize};

use crate::error::ConvertError;
use crate::kernel::MeshParams;
use crate::stl::StlFormat;

/// Parameters for one conversion call.
///
/// A plain value: it is copied into every call and never shared. Override
/// individual fields with struct update syntax over [`default_options`].
///
/// ```
/// use stp2stl::{default_options, ConversionOptions};
///
/// let opts = ConversionOptions {
///     scale: 25.4,
///     binary_output: false,
///     ..default_options()
/// };
/// assert_eq!(opts.linear_deflection, 0.001);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionOptions {
    /// Maximum distance between the true surface and its mesh.
    pub linear_deflection: f64,
    /// Maximum angle between adjacent facet normals, in degrees.
    pub angular_deflection: f64,
    /// Interpret `linear_deflection` relative to each entity's size.
    pub relative_deflection: bool,
    /// Write binary STL (`true`) or ASCII STL (`false`).
    pub binary_output: bool,
    /// Uniform scale about the origin applied before tessellation.
    pub scale: f64,
    /// Allow the kernel to tessellate on several threads.
    pub parallel: bool,
}

/// The documented defaults.
pub fn default_options() -> ConversionOptions {
    ConversionOptions {
        linear_deflection: 0.001,
        angular_deflection: 20.0,
        relative_deflection: true,
        binary_output: true,
        scale: 1.0,
        parallel: false,
    }
}

impl Default for ConversionOptions {
    fn default() -> Self {
        default_options()
    }
}

fn check_positive(name: &str, value: f64) -> Result<(), ConvertError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConvertError::InvalidOption(format!(
            "{name} must be a positive number, got {value}"
        )))
    }
}

impl ConversionOptions {
    /// Reject zero, negative and non-finite numeric fields.
    pub fn validate(&self) -> Result<(), ConvertError> {
        check_positive("linear_deflection", self.linear_deflection)?;
        check_positive("angular_deflection", self.angular_deflection)?;
        check_positive("scale", self.scale)?;
        Ok(())
    }

    /// Kernel tessellation controls, with the angle converted to radians.
    pub fn mesh_params(&self) -> MeshParams {
        MeshParams {
            linear_deflection: self.linear_deflection,
            angular_deflection: self.angular_deflection.to_radians(),
            relative: self.relative_deflection,
            parallel: self.parallel,
        }
    }

    /// Output flavor selected by `binary_output`.
    pub fn stl_format(&self) -> StlFormat {
        StlFormat::from_binary_flag(self.binary_output)
    }

    /// `true` when the scale step has to run.
    pub fn needs_scale(&self) -> bool {
        self.scale != 1.0
    }
}
