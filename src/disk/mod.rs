pub mod units;
pub mod usage;

pub use units::human_readable;
pub use usage::{disk_usage, DiskUsage};
