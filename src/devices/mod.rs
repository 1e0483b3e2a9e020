//! Devices Page
//!
//! Today's per-app screen time and the advisory per-category limits.
//! Limits are display state only: nothing here compares usage with a limit
//! or locks a device.

pub mod limits;
pub mod usage;

pub use limits::{default_limits, DeviceLimits, LimitCategory, LimitMap, LimitRange, LimitView};
pub use usage::{mock_usage, total_hours, usage_by_app, usage_by_category, AppUsage};
