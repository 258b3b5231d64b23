//! Snap-point geometry for Snapsheet.
//!
//! This crate holds the pure, host-independent parts of the bottom sheet:
//! snap-point values and unit conversion, the resolved snap-point table,
//! rubberband overscroll damping, and the configuration surface. Everything
//! here is synchronous and side-effect free; gesture handling and transition
//! orchestration live in `snapsheet-foundation` and `snapsheet-ui`.

pub mod config;
pub mod error;
pub mod rubberband;
pub mod snap_points;
pub mod units;

pub use config::SheetConfig;
pub use error::ConfigurationError;
pub use rubberband::{rubberband_if_out_of_bounds, DEFAULT_RUBBERBAND_CONSTANT};
pub use snap_points::SnapPointTable;
pub use units::SnapPoint;
