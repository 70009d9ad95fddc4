//! Engine data structures: models, textures, flat scenes, and instances.
//!
//! This module contains the core data types for scene representation:
//!
//! - `model` contains mesh and material definitions, GPU resources for 3D models
//! - `texture` contains GPU texture wrapper and creation utilities
//! - `instance` holds per-instance transformation and attribute data
//! - `scene` is the flat, parallel-array scene extracted from a glTF node tree

pub mod instance;
pub mod model;
pub mod scene;
pub mod texture;
