//! OpenCASCADE backend through the `opencascade` crate.
//!
//! Loading goes through `opencascade-sys` directly so that the read status,
//! the root transfer and the null-shape check each report their own error.
//! Meshing uses the high-level binding, which takes one absolute linear
//! tolerance. Controls it does not expose are approximated:
//! - uniform scale is applied to the mesh vertices after tessellation, with
//!   an absolute tolerance divided by the factor so the deviation bound holds
//!   in output units;
//! - relative deflection is taken against the largest bounding-box side of a
//!   coarse pre-mesh of the whole shape, not per entity;
//! - the angular limit and the parallel hint are not forwarded.

use std::path::Path;

use log::debug;
use opencascade::mesh::Mesh;
use opencascade::primitives::Shape;
use opencascade_sys::ffi;

use super::{Kernel, KernelError, MeshParams};
use crate::mesh::TriangleMesh;
use crate::stl::{self, StlFormat};

/// Absolute tolerance of the pre-mesh used to size relative deflection.
const COARSE_TOLERANCE: f64 = 1.0;

/// OpenCASCADE-backed [`Kernel`].
#[derive(Debug, Clone, Copy, Default)]
pub struct OcctKernel;

/// A loaded STEP model plus the pending uniform scale.
pub struct OcctShape {
    shape: Shape,
    scale: f64,
}

fn to_triangle_mesh(occ: &Mesh) -> TriangleMesh {
    let mut mesh = TriangleMesh::new();
    mesh.vertices.reserve(occ.vertices.len() * 3);
    for v in &occ.vertices {
        mesh.push_vertex([v.x as f32, v.y as f32, v.z as f32]);
    }
    mesh.indices = occ.indices.iter().map(|&i| i as u32).collect();
    mesh
}

/// Absolute tolerance for `relative` deflection on a shape of `extent`.
fn relative_tolerance(relative: f64, extent: f64) -> Option<f64> {
    let tolerance = relative * extent;
    (tolerance.is_finite() && tolerance > 0.0).then_some(tolerance)
}

impl OcctKernel {
    fn mesh(&self, shape: &Shape, tolerance: f64) -> Result<TriangleMesh, KernelError> {
        let occ = shape
            .mesh_with_tolerance(tolerance)
            .map_err(|e| KernelError::failure(format!("BRepMesh_IncrementalMesh: {e:?}")))?;
        Ok(to_triangle_mesh(&occ))
    }
}

impl Kernel for OcctKernel {
    type Shape = OcctShape;
    type Mesh = TriangleMesh;

    fn load(&self, path: &Path) -> Result<OcctShape, KernelError> {
        if !path.is_file() {
            return Err(KernelError::Read(format!(
                "ReadFile returned non-success status ({} is not a readable file)",
                path.display()
            )));
        }

        let mut reader = ffi::STEPControl_Reader_ctor();
        let status = ffi::read_step(reader.pin_mut(), path.to_string_lossy().into_owned());
        if status != ffi::IFSelect_ReturnStatus::IFSelect_RetDone {
            return Err(KernelError::Read(
                "ReadFile returned non-success status".to_string(),
            ));
        }

        let progress = ffi::Message_ProgressRange_ctor();
        let roots = reader.pin_mut().TransferRoots(&progress);
        if roots <= 0 {
            return Err(KernelError::Transfer(
                "TransferRoots transferred no roots".to_string(),
            ));
        }

        let shape = ffi::one_shape(&reader);
        if shape.IsNull() {
            return Err(KernelError::NullShape);
        }
        debug!("transferred {roots} root(s) from {}", path.display());

        Ok(OcctShape {
            shape: Shape::from_shape(&shape),
            scale: 1.0,
        })
    }

    fn scale(&self, mut shape: OcctShape, factor: f64) -> Result<OcctShape, KernelError> {
        shape.scale *= factor;
        Ok(shape)
    }

    fn tessellate(&self, shape: OcctShape, params: &MeshParams) -> Result<TriangleMesh, KernelError> {
        debug!(
            "angular deflection {:.4}rad and parallel={} are not forwarded by the opencascade binding",
            params.angular_deflection, params.parallel
        );

        // Relative deflection scales with the model, so it needs no
        // correction for the pending scale factor.
        let tolerance = if params.relative {
            let extent = self.mesh(&shape.shape, COARSE_TOLERANCE)?.max_extent();
            relative_tolerance(params.linear_deflection, extent).ok_or_else(|| {
                KernelError::failure(format!("cannot size relative deflection (extent {extent})"))
            })?
        } else {
            params.linear_deflection / shape.scale
        };
        debug!("meshing with absolute tolerance {tolerance}");

        let mut mesh = self.mesh(&shape.shape, tolerance)?;
        if mesh.is_empty() {
            return Err(KernelError::failure("BRepMesh_IncrementalMesh produced no triangles"));
        }
        if shape.scale != 1.0 {
            mesh.scale_uniform(shape.scale as f32);
        }
        debug!("tessellated {} triangles", mesh.num_triangles());
        Ok(mesh)
    }

    fn write_stl(&self, mesh: &TriangleMesh, path: &Path, format: StlFormat) -> Result<(), KernelError> {
        stl::save_stl(mesh, path, format)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_tolerance() {
        assert_eq!(relative_tolerance(0.5, 4.0), Some(2.0));
        assert_eq!(relative_tolerance(0.001, 0.0), None);
        assert_eq!(relative_tolerance(0.001, f64::INFINITY), None);
    }
}
