//! Repository layer: one unit struct per table, async functions taking
//! the pool explicitly.

pub mod scene_repo;

pub use scene_repo::SceneRepo;
