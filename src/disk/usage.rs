use crate::error::{Result, ToolError};
use nix::sys::statvfs::statvfs;
use serde::Serialize;
use std::io;
use std::path::Path;
use tracing::debug;

/// Space figures, in bytes, for the filesystem holding one path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiskUsage {
    pub total: u64,
    /// Space available to unprivileged users.
    pub free: u64,
    pub used: u64,
}

impl DiskUsage {
    pub fn from_blocks(fragment_size: u64, blocks: u64, blocks_free: u64, blocks_available: u64) -> Self {
        Self {
            total: blocks.saturating_mul(fragment_size),
            free: blocks_available.saturating_mul(fragment_size),
            used: blocks.saturating_sub(blocks_free).saturating_mul(fragment_size),
        }
    }
}

/// Query the volume containing `path`.
pub fn disk_usage<P: AsRef<Path>>(path: P) -> Result<DiskUsage> {
    let path = path.as_ref();

    let stat = statvfs(path).map_err(|errno| ToolError::from_io(path, io::Error::from(errno)))?;

    let usage = DiskUsage::from_blocks(
        u64::from(stat.fragment_size()),
        u64::from(stat.blocks()),
        u64::from(stat.blocks_free()),
        u64::from(stat.blocks_available()),
    );

    debug!(
        path = %path.display(),
        total = usage.total,
        free = usage.free,
        used = usage.used,
        "statvfs"
    );

    Ok(usage)
}
