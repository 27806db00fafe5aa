//! RLE files on disk.
//!
//! The file contents are the raw RLE stream, with nothing added.

use std::fs::File;
use std::io::{Read,Write};
use std::path::Path;

use crate::{RleError,RleResult};

/// Load an RLE stream from a file.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
///
/// let rle = rlelib::load_rle(Path::new("ex.rle"));
/// ```
pub fn load_rle(filename: &Path)
        -> RleResult<Vec<u8>> {
    if !filename.exists() {
        return Err(RleError::NoFile);
    } else if !filename.is_file() {
        return Err(RleError::NotARegularFile);
    }

    let mut file = File::open(filename)?;
    let mut buf = Vec::new();
    file.read_to_end(&mut buf)?;

    debug!("loaded {} bytes from {}", buf.len(), filename.display());

    Ok(buf)
}

/// Save an RLE stream to a file.
///
/// An existing file is only replaced if `overwrite` is set.
pub fn save_rle(filename: &Path, data: &[u8], overwrite: bool)
        -> RleResult<()> {
    if filename.exists() {
        if !overwrite {
            return Err(RleError::AlreadyExists);
        } else if !filename.is_file() {
            return Err(RleError::NotARegularFile);
        }
    }

    let mut file = File::create(filename)?;
    file.write_all(data)?;

    debug!("saved {} bytes to {}", data.len(), filename.display());

    Ok(())
}
