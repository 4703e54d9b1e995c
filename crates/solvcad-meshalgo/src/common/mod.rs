use crate::*;

mod face_adjacency;
mod face_normal;
mod space_division;
mod triangle_iter;
pub(super) use face_adjacency::FaceAdjacency;
pub(super) use face_normal::FaceNormal;
pub(super) use space_division::HashedPointCloud;
pub(super) use triangle_iter::Triangulate;
