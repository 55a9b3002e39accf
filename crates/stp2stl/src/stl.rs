//! STL serialization (binary and ASCII).

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use nalgebra::Vector3;

use crate::mesh::TriangleMesh;

/// STL flavor to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StlFormat {
    /// 80-byte header, triangle count, 50 bytes per facet.
    #[default]
    Binary,
    /// `solid ... endsolid` text.
    Ascii,
}

impl StlFormat {
    /// Pick the format from the `binary_output` option.
    pub fn from_binary_flag(binary: bool) -> Self {
        if binary {
            Self::Binary
        } else {
            Self::Ascii
        }
    }
}

const HEADER: &[u8] = b"stp2stl binary STL export";
const _: () = assert!(HEADER.len() <= 80);

/// Name used for the ASCII `solid` record.
const SOLID_NAME: &str = "stp2stl";

/// Unit facet normal from the winding of `tri`, `+Z` for degenerate facets.
fn facet_normal(tri: &[[f32; 3]; 3]) -> Vector3<f32> {
    let a = Vector3::from(tri[0]);
    let b = Vector3::from(tri[1]);
    let c = Vector3::from(tri[2]);
    let n = (b - a).cross(&(c - a));
    let len = n.norm();
    if len > 1e-10 {
        n / len
    } else {
        Vector3::z()
    }
}

/// Write `mesh` as binary STL.
pub fn write_binary<W: Write>(mesh: &TriangleMesh, out: &mut W) -> io::Result<()> {
    let mut out = BufWriter::new(out);
    out.write_all(HEADER)?;
    out.write_all(&[0u8; 80 - HEADER.len()])?;
    out.write_all(&(mesh.num_triangles() as u32).to_le_bytes())?;
    for tri in mesh.triangles() {
        let n = facet_normal(&tri);
        for p in n.iter() {
            out.write_all(&p.to_le_bytes())?;
        }
        for v in &tri {
            for p in v {
                out.write_all(&p.to_le_bytes())?;
            }
        }
        out.write_all(&0u16.to_le_bytes())?; // attribute byte count
    }
    out.flush()
}

/// Write `mesh` as ASCII STL.
pub fn write_ascii<W: Write>(mesh: &TriangleMesh, out: &mut W) -> io::Result<()> {
    let mut out = BufWriter::new(out);
    writeln!(out, "solid {SOLID_NAME}")?;
    for tri in mesh.triangles() {
        let n = facet_normal(&tri);
        writeln!(out, "  facet normal {:.6e} {:.6e} {:.6e}", n.x, n.y, n.z)?;
        writeln!(out, "    outer loop")?;
        for v in &tri {
            writeln!(out, "      vertex {:.6e} {:.6e} {:.6e}", v[0], v[1], v[2])?;
        }
        writeln!(out, "    endloop")?;
        writeln!(out, "  endfacet")?;
    }
    writeln!(out, "endsolid {SOLID_NAME}")?;
    out.flush()
}

/// Write `mesh` in the given format.
pub fn write_stl<W: Write>(mesh: &TriangleMesh, out: &mut W, format: StlFormat) -> io::Result<()> {
    match format {
        StlFormat::Binary => write_binary(mesh, out),
        StlFormat::Ascii => write_ascii(mesh, out),
    }
}

/// Create (or truncate) `path` and write `mesh` to it.
pub fn save_stl(mesh: &TriangleMesh, path: &Path, format: StlFormat) -> io::Result<()> {
    let mut file = File::create(path)?;
    write_stl(mesh, &mut file, format)
}
