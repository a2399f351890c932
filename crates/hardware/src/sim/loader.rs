//! Program image loader.
//!
//! Images are flat little-endian RV32I binaries (e.g. `objcopy -O binary`
//! output), copied byte for byte to the start of RAM.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::common::error::SimError;
use crate::soc::memory::Memory;

/// Reads the image at `path` into `memory` starting at `base`.
///
/// Returns the number of bytes loaded.
///
/// # Errors
///
/// * [`SimError::Io`] - the file cannot be read.
/// * [`SimError::Memory`] - the image does not fit in memory.
pub fn load_binary(path: &Path, memory: &mut Memory, base: u32) -> Result<usize, SimError> {
    let image = fs::read(path)?;
    memory.load(base, &image)?;
    info!(
        path = %path.display(),
        bytes = image.len(),
        "loaded image at {base:#x}"
    );
    Ok(image.len())
}
