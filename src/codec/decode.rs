//! RLE decoder.

use crate::{NUM_CHANNELS,RasterMut,RleError,RleResult};
use crate::format::{RunRecords,read_rle_header};
use crate::raster::RgbImage;

/// Decode an RLE stream into a new image.
///
/// # Examples
///
/// ```
/// let src = [
///     0x00, 0x02, 0x00, 0x01,
///     0x00, 0x00, 0xC8, 0x01 ];
///
/// let img = rlelib::decode_rle(&src).unwrap();
/// assert_eq!(img.as_bytes(), &[200, 0, 0, 200, 0, 0][..]);
/// ```
pub fn decode_rle(src: &[u8])
        -> RleResult<RgbImage> {
    let hdr = read_rle_header(src)?;

    // Check the runs before allocating for the declared size.
    if count_pixels(src)? != hdr.w as usize * hdr.h as usize {
        return Err(RleError::Corrupted);
    }

    let mut img = RgbImage::new(hdr.w as usize, hdr.h as usize);
    decode_rle_into(src, &mut img.as_raster_mut())?;

    debug!("decoded {}x{} raster from {} bytes", hdr.w, hdr.h, src.len());

    Ok(img)
}

/// Decode an RLE stream into an existing raster.
///
/// The raster must have the same dimensions as the stream.  The runs
/// are checked against the dimensions before the raster is modified,
/// so on error the raster is left untouched.
pub fn decode_rle_into(src: &[u8], dst: &mut RasterMut)
        -> RleResult<()> {
    let hdr = read_rle_header(src)?;
    if hdr.w as usize != dst.width() || hdr.h as usize != dst.height() {
        return Err(RleError::WrongResolution);
    }

    let expected = dst.width() * dst.height();
    if count_pixels(src)? != expected {
        return Err(RleError::Corrupted);
    } else if expected == 0 {
        return Ok(());
    }

    let mut runs = RunRecords::new(src)?;
    let mut color = [0; NUM_CHANNELS];
    let mut remaining = 0;

    for row in dst.rows_mut() {
        for px in row.chunks_mut(NUM_CHANNELS) {
            if remaining == 0 {
                let run = match runs.next() {
                    Some(run) => run?,
                    None => return Err(RleError::Corrupted),
                };
                color = run.color;
                remaining = run.len;
            }

            px.copy_from_slice(&color);
            remaining = remaining - 1;
        }
    }

    Ok(())
}

/// Total number of pixels described by the runs of an RLE stream.
pub fn count_pixels(src: &[u8])
        -> RleResult<usize> {
    let mut total = 0;
    for run in RunRecords::new(src)? {
        total = total + run?.len;
    }

    Ok(total)
}
