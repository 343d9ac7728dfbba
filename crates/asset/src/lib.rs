//! Asset loading/parsers for Wavefront models.
//! OBJ text + material libraries -> flat per-corner buffers for the renderer.
//! Texture images are carried as decoded RGBA8 once their loads complete.

pub mod error;
pub mod flatten;
pub mod mesh;
pub mod mtl;
pub mod obj;
pub mod readiness;
pub mod report;
pub mod scanner;
pub mod texture;
pub mod triangulate;

pub use error::{FaceError, ObjError, ObjResult, ScanError};
pub use mesh::{Attribute, FlattenedMesh};
pub use mtl::{Material, MaterialLibrary};
pub use obj::{Corner, Face, Group, ObjModel, ParseOptions};
pub use readiness::{Completion, LoadRequest, RequestId, ResourceKind, ResourceState};
pub use report::{LineIssue, LineIssueKind, ParseReport};
pub use texture::TextureData;
