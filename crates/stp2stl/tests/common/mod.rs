//! Scripted kernel for pipeline tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use stp2stl::stl::{self, StlFormat};
use stp2stl::{Kernel, KernelError, MeshParams, TriangleMesh};

/// One recorded kernel call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Load,
    Scale(f64),
    Tessellate(MeshParams),
    Write(StlFormat),
}

/// Kernel that "loads" STEP text by looking for section markers and always
/// produces a unit tetrahedron.
#[derive(Default)]
pub struct MockKernel {
    pub calls: RefCell<Vec<Call>>,
    pub fail_scale: bool,
    pub tessellate_error: Option<KernelError>,
    pub panic_in_tessellate: bool,
    pub skip_write: bool,
}

impl MockKernel {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

pub fn tetrahedron() -> TriangleMesh {
    let mut mesh = TriangleMesh::new();
    let o = mesh.push_vertex([0.0, 0.0, 0.0]);
    let x = mesh.push_vertex([1.0, 0.0, 0.0]);
    let y = mesh.push_vertex([0.0, 1.0, 0.0]);
    let z = mesh.push_vertex([0.0, 0.0, 1.0]);
    mesh.push_triangle(o, y, x);
    mesh.push_triangle(o, x, z);
    mesh.push_triangle(o, z, y);
    mesh.push_triangle(x, y, z);
    mesh
}

impl Kernel for MockKernel {
    type Shape = TriangleMesh;
    type Mesh = TriangleMesh;

    fn load(&self, path: &Path) -> Result<TriangleMesh, KernelError> {
        self.record(Call::Load);
        let text = fs::read_to_string(path)
            .map_err(|e| KernelError::Read(format!("{}: {e}", path.display())))?;
        if !text.starts_with("ISO-10303-21;") {
            return Err(KernelError::Read("ReadFile returned non-success status".into()));
        }
        if !text.contains("DATA;") {
            return Err(KernelError::Transfer("TransferRoots failed".into()));
        }
        if !text.contains("MANIFOLD_SOLID_BREP") {
            return Err(KernelError::NullShape);
        }
        Ok(tetrahedron())
    }

    fn scale(&self, mut shape: TriangleMesh, factor: f64) -> Result<TriangleMesh, KernelError> {
        self.record(Call::Scale(factor));
        if self.fail_scale {
            return Err(KernelError::failure("BRepBuilderAPI_Transform: not done"));
        }
        shape.scale_uniform(factor as f32);
        Ok(shape)
    }

    fn tessellate(&self, shape: TriangleMesh, params: &MeshParams) -> Result<TriangleMesh, KernelError> {
        self.record(Call::Tessellate(*params));
        if self.panic_in_tessellate {
            panic!("BRepMesh: face 3 has no triangulation");
        }
        if let Some(e) = &self.tessellate_error {
            return Err(e.clone());
        }
        Ok(shape)
    }

    fn write_stl(&self, mesh: &TriangleMesh, path: &Path, format: StlFormat) -> Result<(), KernelError> {
        self.record(Call::Write(format));
        if self.skip_write {
            return Ok(());
        }
        stl::save_stl(mesh, path, format)?;
        Ok(())
    }
}

pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

pub fn path_str(p: &Path) -> &str {
    p.to_str().expect("test paths are UTF-8")
}
