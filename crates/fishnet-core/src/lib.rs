//! `fishnet-core` is the core library of `fishnet`, which prepares river-barrier
//! sampling grids for an object-detection dataset.
//!
//! This crate includes:
//! - **Quota sampling**: seeded per-cell draws bounded by a (dataset, category) quota.
//! - **Gap-filling**: residual quotas computed from a reviewed selection.
//! - **Projection**: Web Mercator reprojection and square footprints.
//! - **Export**: renumbered CSV table plus point and footprint `GeoJSON` files.
//!
//! The [`operations`] module exposes the end-to-end pipeline consumed by the CLI.

pub mod config;
pub mod deficit;
pub mod error;
pub mod export;
pub mod operations;
pub mod projection;
pub mod quota;
pub mod sampler;
pub mod source;
pub mod types;
