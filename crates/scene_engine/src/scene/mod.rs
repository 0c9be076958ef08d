//! Scene management system
//!
//! A [`Scene`] owns a table of top-level [`SceneObject`] trees, the animators that
//! drive them and the shader program they are drawn with.
//!
//! ## Ownership
//!
//! ```text
//! Scene
//!  ├── ObjectTable (slot map, ObjectKey -> SceneObject)
//!  │     └── SceneObject ── children: Vec<SceneObject> ── ...
//!  ├── Vec<Animator> ── Vec<Animation> ── ObjectRef (key + child path)
//!  └── ShaderProgram
//! ```
//!
//! Objects are moved into the scene and never aliased. Animations refer to their
//! target through an [`ObjectRef`], which resolves against the table on every tick
//! and reports [`SceneError`] once its target is gone.

mod object;
#[allow(clippy::module_inception)]
mod scene;
mod transform;

pub use object::{ObjectRef, SceneObject, Surface};
pub use scene::{ObjectKey, ObjectTable, Scene};
pub use transform::Transform;

use thiserror::Error;

/// Errors resolving references into the scene
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// The top-level object was removed from the scene
    #[error("Object {0:?} no longer exists")]
    ObjectDestroyed(ObjectKey),

    /// A child path step points past the end of a children list
    #[error("Child index {index} out of range ({len} children)")]
    ChildOutOfRange {
        /// Requested index
        index: usize,
        /// Number of children at that level
        len: usize,
    },
}
