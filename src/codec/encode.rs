//! RLE encoder.

use std::cmp::min;
use std::io::{Cursor,Seek,SeekFrom,Write};

use crate::{Raster,RleError,RleResult};
use crate::color::{Rgb,parse_color};
use crate::format::{MAX_DIMENSION,MAX_RUN_LENGTH,RleHeader,RunRecord,SIZE_OF_RLE_HEADER,SIZE_OF_RUN,write_rle_header,write_run};
use super::{Group,GroupByTolerance};

/// RLE encoder settings.
///
/// # Examples
///
/// ```
/// let buf = [
///     10, 10, 10,  10, 10, 10,  200, 0, 0 ];
/// let raster = rlelib::Raster::new(3, 1, &buf);
///
/// let enc = rlelib::RleEncoder::new(5.0).unwrap();
/// let rle = enc.encode_to_vec(&raster).unwrap();
/// assert_eq!(rle.len(), 4 + 2 * 4);
/// ```
#[derive(Clone,Copy,Debug,PartialEq)]
pub struct RleEncoder {
    tolerance: f64,
    transparent: Option<Rgb>,
}

impl RleEncoder {
    /// Create an encoder with the given maximum MSE in a run.
    ///
    /// The tolerance must be a non-negative number.
    pub fn new(tolerance: f64)
            -> RleResult<Self> {
        if !(tolerance >= 0.0) {
            return Err(RleError::InvalidTolerance);
        }

        Ok(RleEncoder {
            tolerance: tolerance,
            transparent: None,
        })
    }

    /// Create an encoder that only merges identical pixels.
    pub fn lossless() -> Self {
        RleEncoder {
            tolerance: 0.0,
            transparent: None,
        }
    }

    /// Never blend the given color with any other color.
    pub fn with_transparent(mut self, color: Option<Rgb>) -> Self {
        self.transparent = color;
        self
    }

    /// Never blend the color given as a "RRGGBB" code.
    pub fn with_transparent_code(self, code: &str)
            -> RleResult<Self> {
        let color = parse_color(code)?;
        Ok(self.with_transparent(Some(color)))
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn transparent(&self) -> Option<Rgb> {
        self.transparent
    }

    /// Encode a raster into an RLE stream.
    ///
    /// Returns the number of bytes written.
    pub fn encode<W: Write + Seek>(&self, src: &Raster, w: &mut W)
            -> RleResult<usize> {
        if src.width() == 0 || src.width() > MAX_DIMENSION
                || src.height() == 0 || src.height() > MAX_DIMENSION {
            return Err(RleError::WrongResolution);
        }

        let pos0 = w.seek(SeekFrom::Current(0))?;

        let hdr = RleHeader {
            w: src.width() as u16,
            h: src.height() as u16,
        };
        write_rle_header(&hdr, w)?;

        let mut count = 0;
        for row in src.rows() {
            for g in GroupByTolerance::new(row, self.tolerance, self.transparent) {
                count = write_group(g, count, w)?;
            }
        }

        let pos1 = w.seek(SeekFrom::Current(0))?;
        let size = (pos1 - pos0) as usize;
        assert_eq!(size, SIZE_OF_RLE_HEADER + SIZE_OF_RUN * count);

        debug!("encoded {}x{} raster into {} runs, {} bytes",
                hdr.w, hdr.h, count, size);

        Ok(size)
    }

    /// Encode a raster into a new RLE stream.
    pub fn encode_to_vec(&self, src: &Raster)
            -> RleResult<Vec<u8>> {
        let mut enc: Cursor<Vec<u8>> = Cursor::new(Vec::new());
        self.encode(src, &mut enc)?;
        Ok(enc.into_inner())
    }
}

/// Encode a raster with the given tolerance and optional transparent
/// color.
///
/// # Examples
///
/// ```
/// let buf = [ 255, 0, 255 ];
/// let raster = rlelib::Raster::new(1, 1, &buf);
///
/// let rle = rlelib::encode_rle(&raster, 20.0, Some([0xFF, 0x00, 0xFF])).unwrap();
/// assert_eq!(&rle[..], &[0x00, 0x01, 0x00, 0x01, 0xFF, 0x00, 0xFF, 0x00][..]);
/// ```
pub fn encode_rle(src: &Raster, tolerance: f64, transparent: Option<Rgb>)
        -> RleResult<Vec<u8>> {
    RleEncoder::new(tolerance)?
        .with_transparent(transparent)
        .encode_to_vec(src)
}

/// Write a group as one or more run records, splitting it into
/// MAX_RUN_LENGTH pieces.  Returns the updated record count.
fn write_group<W: Write>(
        g: Group, count: usize, w: &mut W)
        -> RleResult<usize> {
    let mut count = count;
    let mut len = g.len;
    while len > 0 {
        let l = min(len, MAX_RUN_LENGTH);
        write_run(&RunRecord { color: g.color, len: l }, w)?;

        len = len - l;
        count = count + 1;
    }

    Ok(count)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use crate::{Raster,RleError};
    use super::*;

    #[test]
    fn test_encode_rle() {
        let buf = [
            10, 10, 10,  10, 10, 10,  200, 0, 0 ];

        let expected = [
            0x00, 0x03,     // width 3
            0x00, 0x01,     // height 1
            10, 10, 10, 1,  // length 2
            0, 0, 200, 0 ]; // length 1

        let raster = Raster::new(3, 1, &buf);
        let res = encode_rle(&raster, 5.0, None);
        assert_eq!(&res.expect("rle")[..], &expected[..]);
    }

    #[test]
    fn test_encode_rle_split_long_run() {
        const SCREEN_W: usize = 300;
        let mut buf = [0; 3 * SCREEN_W];
        for px in buf.chunks_mut(3) {
            px.copy_from_slice(&[0xFF, 0x00, 0xFF]);
        }

        let expected = [
            0x01, 0x2C, 0x00, 0x01,     // 300x1
            0xFF, 0x00, 0xFF, 0xFF,     // length 256
            0xFF, 0x00, 0xFF, 43 ];     // length 44

        let raster = Raster::new(SCREEN_W, 1, &buf);
        let res = encode_rle(&raster, 20.0, Some([0xFF, 0x00, 0xFF]));
        assert_eq!(&res.expect("rle")[..], &expected[..]);
    }

    #[test]
    fn test_encode_rle_rows_not_merged() {
        let buf = [ 7; 3 * 2 * 2 ];

        let expected = [
            0x00, 0x02, 0x00, 0x02,
            7, 7, 7, 1,
            7, 7, 7, 1 ];

        let raster = Raster::new(2, 2, &buf);
        let res = encode_rle(&raster, 0.0, None);
        assert_eq!(&res.expect("rle")[..], &expected[..]);
    }

    #[test]
    fn test_encode_rle_rounds_mean() {
        // Red mean is 100.5, rounded to the even 100.  Green mean is
        // 101.5, rounded to 102.
        let buf = [
            100, 101, 0,  101, 102, 0 ];

        let raster = Raster::new(2, 1, &buf);
        let res = encode_rle(&raster, 1.0, None).expect("rle");
        assert_eq!(&res[4..], &[0, 102, 100, 1][..]);
    }

    #[test]
    fn test_encode_with_offset() {
        const SCREEN_W: usize = 4;
        let mut buf = [0; 3 * SCREEN_W * 2];
        for e in &mut buf[3 * SCREEN_W..] {
            *e = 9;
        }

        let raster = Raster::with_offset(1, 1, 2, 1, SCREEN_W, &buf);
        let mut enc = Cursor::new(Vec::new());
        let size = RleEncoder::lossless().encode(&raster, &mut enc).expect("size");
        assert_eq!(size, 8);
        assert_eq!(&enc.get_ref()[..], &[0x00, 0x02, 0x00, 0x01, 9, 9, 9, 1][..]);
    }

    #[test]
    fn test_invalid_tolerance() {
        for &t in &[-1.0, ::std::f64::NAN] {
            match RleEncoder::new(t) {
                Err(RleError::InvalidTolerance) => (),
                _ => panic!("tolerance {} should be rejected", t),
            }
        }
    }

    #[test]
    fn test_invalid_transparent_code() {
        match RleEncoder::lossless().with_transparent_code("xyz") {
            Err(RleError::InvalidColor(_)) => (),
            _ => panic!("expected InvalidColor"),
        }

        let enc = RleEncoder::lossless().with_transparent_code("00ff00").expect("enc");
        assert_eq!(enc.transparent(), Some([0x00, 0xFF, 0x00]));
    }

    #[test]
    fn test_empty_raster() {
        let buf: [u8; 0] = [];
        let raster = Raster::new(0, 0, &buf);
        match encode_rle(&raster, 0.0, None) {
            Err(RleError::WrongResolution) => (),
            _ => panic!("expected WrongResolution"),
        }
    }
}
