//! Weather snapshot, wire-shape validation and ticker message formatting

pub mod message;
pub mod report;
pub mod snapshot;

pub use message::{MessageLine, INITIAL_MESSAGE, PLACEHOLDER_MESSAGE};
pub use report::{RawClouds, RawCondition, RawMain, RawReport, RawSys, RawWind};
pub use snapshot::{
    Readings, Snapshot, ValidationError, DEFAULT_ICON, MAX_DESCRIPTION_LEN, MAX_ICON_LEN,
};
