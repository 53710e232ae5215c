//! Evejump library entry points.
//!
//! This crate exposes helpers to load the EVE Online jump-connectivity
//! dataset, build the in-memory starmap, compute effective jump ranges, and
//! plan constrained multi-waypoint jump routes. Higher-level consumers (the
//! CLI, embedding applications) should only depend on the functions exported
//! here instead of reimplementing behavior.

#![deny(warnings)]

pub mod dataset;
pub mod error;
pub mod path;
pub mod range;
pub mod routing;
pub mod starmap;

pub use dataset::{
    default_dataset_dir, load_connections, load_starmap, load_system_records, DogmaAttributes,
    JUMPMAP_FILENAME, UNIVERSE_DB_FILENAME,
};
pub use error::{Error, Result};
pub use path::{
    find_jump_path, JumpCost, PathResult, PathSegment, SearchConstraints, SearchLimits,
    MAX_ROUTABLE_SECURITY,
};
pub use range::{
    max_jump_range, AttributeId, AttributeProvider, TypeId, DEFAULT_BASE_JUMP_RANGE_LY,
    JUMP_CALIBRATION_BONUS_PER_LEVEL, JUMP_DRIVE_RANGE_ATTRIBUTE_ID,
};
pub use routing::{plan_jump_route, JumpRouteRequest};
pub use starmap::{ConnectionRecord, JumpConnection, Starmap, SystemId, SystemRecord};
