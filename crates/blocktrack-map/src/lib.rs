//! The blocktrack map data model.
//!
//! # Blocks
//!
//! The map is partitioned into fixed-size blocks of voxels, each identified by a [`BlockIndex`]. When a block's voxels change,
//! every downstream stage that derives data from it (distance field, mesh, freespace, streaming) has to reprocess it.
//!
//! # Dirty Tracking
//!
//! [`BlocksToUpdateTracker`] keeps one dirty set per [`ConsumerClass`]. Producers add and remove blocks in all sets at once.
//! Consumers read and clear only their own set, on their own schedule. Mutations are applied asynchronously but in call order,
//! and queries always observe every mutation issued before them.
//!
//! The freespace set is only populated when the map has a freespace layer, which is decided by the
//! [`ProjectiveLayerType`] in the [`TrackerConfig`].

mod config;
mod consumer;
mod dirty_sets;
mod tracker;

pub use config::*;
pub use consumer::*;
pub use dirty_sets::*;
pub use tracker::*;

pub use blocktrack_core::glam;

/// Identifies a fixed-size block of voxels in the map grid. The tracker only uses it as a key.
pub type BlockIndex = glam::IVec3;
