//! STL import for `Linked` groups (`spec.md` §6.3): an 80-byte header, a
//! 4-byte triangle count, then per-triangle 12 floats + a 2-byte attribute
//! whose top bit encodes a 15-bit RGB color. Grounded on
//! `solvcad_polymesh::stl`'s reader/`FromIterator<STLFace>` pair; this
//! module is the thin adapter that turns its `Result`-per-face iterator
//! into one `Result`-wrapped mesh for a linked group to transform and
//! combine.

use std::io::Read;

use solvcad_polymesh::stl::{STLReader, STLType};
use solvcad_polymesh::PolygonMesh;

use crate::IoError;

/// Reads every triangle off `reader` (auto-detecting ASCII vs. binary, per
/// `STLType::Automatic`) into one [`PolygonMesh`], ready for a `Linked`
/// group to scale/translate/rotate and combine with the running assembly.
pub fn read_linked_mesh<R: Read>(reader: R) -> Result<PolygonMesh, IoError> {
    let faces: Result<Vec<_>, _> = STLReader::new(reader, STLType::Automatic)?.collect();
    Ok(faces?.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ascii_triangle() -> &'static str {
        "solid test\n\
         facet normal 0 0 1\n\
         outer loop\n\
         vertex 0 0 0\n\
         vertex 1 0 0\n\
         vertex 0 1 0\n\
         endloop\n\
         endfacet\n\
         endsolid test\n"
    }

    #[test]
    fn reads_a_single_ascii_triangle() {
        let mesh = read_linked_mesh(ascii_triangle().as_bytes()).unwrap();
        assert_eq!(mesh.tri_faces().len(), 1);
    }
}
