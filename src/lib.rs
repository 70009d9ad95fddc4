//! lumen-ngin
//!
//! A small rendering playground built on wgpu. The crate grew out of a series
//! of incremental demos (see `demos/`): a first triangle, a colored cube, a
//! Cornell box loaded from glTF, progressively richer lighting models, normal
//! mapping, a stencil-masked planar mirror and point-light shadows from a
//! depth cubemap. The library collects the parts those demos share: the GPU
//! context, a camera, flat scene extraction from a glTF node tree, the
//! reflection and shadow math, and one pipeline module per technique.
//!
//! High-level modules
//! - `camera`: camera types, controller and uniforms for view/projection
//! - `context`: central GPU and window context that owns device/queue
//! - `data_structures`: engine data models (meshes, instances, flat scenes)
//! - `app`: the window event loop and the [`app::Demo`] trait demos implement
//! - `pipelines`: one module per render technique (flat, shaded, mirror, ...)
//! - `reflect`: planar reflection math for the mirror pass
//! - `resources`: glTF import and scene flattening
//! - `render`: render pass construction helpers shared by the demos
//!

pub mod app;
pub mod camera;
pub mod context;
pub mod data_structures;
pub mod pipelines;
pub mod reflect;
pub mod render;
pub mod resources;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::*;
pub use winit::dpi::PhysicalPosition;
pub use winit::event::DeviceEvent;
pub use winit::event::WindowEvent;
pub use wgpu::*;
