//! RLE stream layout.
//!
//! An RLE stream is a 4-byte header followed by a sequence of 4-byte
//! run records.  All lengths and offsets are in bytes.  There is no
//! magic number, version or checksum.
//!
//!   Offset  | Length |  Name  | Description
//!   -------:| ------:|:------:| -------------------------------------
//!         0 |      2 |  width | Image width in pixels, big endian.
//!         2 |      2 | height | Image height in pixels, big endian.
//!   4 + 4*i |      4 |  run i | Blue, green, red, then run length minus one.
//!
//! Runs are stored in row-major order and never cross a row boundary.

use std::io::{Cursor,Read,Write};
use byteorder::BigEndian as BE;
use byteorder::{ReadBytesExt,WriteBytesExt};

use crate::{NUM_CHANNELS,RleError,RleResult};
use crate::color::Rgb;

/// Size of the RLE stream header.
pub const SIZE_OF_RLE_HEADER: usize = 4;

/// Size of a run record.
pub const SIZE_OF_RUN: usize = 4;

/// Maximum number of pixels in a run.  The record stores the length
/// minus one in a single byte.
pub const MAX_RUN_LENGTH: usize = 256;

/// Maximum width or height of an image.
pub const MAX_DIMENSION: usize = ::std::u16::MAX as usize;

/// RLE stream header.
#[derive(Clone,Copy,Debug,Eq,PartialEq)]
pub struct RleHeader {
    pub w: u16,
    pub h: u16,
}

/// A run of identical pixels, in logical R, G, B order.
#[derive(Clone,Copy,Debug,Eq,PartialEq)]
pub struct RunRecord {
    pub color: Rgb,
    pub len: usize,
}

/// Get the shape of an RLE image without decoding the runs.
///
/// Returns (height, width, channels), where channels is always 3.
///
/// # Examples
///
/// ```
/// let src = [ 0x01, 0x40, 0x00, 0xC8 ];
/// assert_eq!(rlelib::rle_shape(&src).ok(), Some((200, 320, 3)));
/// ```
pub fn rle_shape(src: &[u8])
        -> RleResult<(usize, usize, usize)> {
    let hdr = read_rle_header(src)?;
    Ok((hdr.h as usize, hdr.w as usize, NUM_CHANNELS))
}

/// Read the RLE stream header.
pub fn read_rle_header(src: &[u8])
        -> RleResult<RleHeader> {
    if src.len() < SIZE_OF_RLE_HEADER {
        return Err(RleError::Corrupted);
    }

    let mut r = Cursor::new(&src[0..SIZE_OF_RLE_HEADER]);
    let w = r.read_u16::<BE>()?;
    let h = r.read_u16::<BE>()?;

    Ok(RleHeader { w: w, h: h })
}

/// Write the RLE stream header.
pub fn write_rle_header<W: Write>(
        hdr: &RleHeader, w: &mut W)
        -> RleResult<()> {
    w.write_u16::<BE>(hdr.w)?;
    w.write_u16::<BE>(hdr.h)?;
    Ok(())
}

/// Read a run record, converting from the stored blue, green, red
/// order.
pub fn read_run<R: Read>(r: &mut R)
        -> RleResult<RunRecord> {
    let mut rec = [0; SIZE_OF_RUN];
    r.read_exact(&mut rec)?;

    Ok(RunRecord {
        color: [rec[2], rec[1], rec[0]],
        len: rec[3] as usize + 1,
    })
}

/// Write a run record.  The run length must be in 1..=256.
pub fn write_run<W: Write>(
        run: &RunRecord, w: &mut W)
        -> RleResult<()> {
    assert!(1 <= run.len && run.len <= MAX_RUN_LENGTH);

    let [r, g, b] = run.color;
    w.write_all(&[b, g, r, (run.len - 1) as u8])?;
    Ok(())
}

/// Iterator over the run records following the header.
///
/// A trailing partial record is reported as `Corrupted`.
pub struct RunRecords<'a> {
    data: &'a [u8],
}

impl<'a> RunRecords<'a> {
    /// Create an iterator over the runs of an RLE stream.
    pub fn new(src: &'a [u8]) -> RleResult<Self> {
        if src.len() < SIZE_OF_RLE_HEADER {
            return Err(RleError::Corrupted);
        }

        Ok(RunRecords {
            data: &src[SIZE_OF_RLE_HEADER..],
        })
    }
}

impl<'a> Iterator for RunRecords<'a> {
    type Item = RleResult<RunRecord>;

    fn next(&mut self) -> Option<RleResult<RunRecord>> {
        if self.data.is_empty() {
            None
        } else if self.data.len() < SIZE_OF_RUN {
            self.data = &[];
            Some(Err(RleError::Corrupted))
        } else {
            let (rec, rest) = self.data.split_at(SIZE_OF_RUN);
            self.data = rest;
            Some(read_run(&mut Cursor::new(rec)))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use crate::RleError;
    use super::*;

    #[test]
    fn test_rle_shape() {
        // Run data is not examined.
        let src = [ 0x00, 0x03, 0x00, 0x01, 0xFF, 0xFF ];
        assert_eq!(rle_shape(&src).ok(), Some((1, 3, 3)));
    }

    #[test]
    fn test_rle_shape_truncated() {
        match rle_shape(&[0x00, 0x03, 0x00]) {
            Err(RleError::Corrupted) => (),
            _ => panic!("expected Corrupted"),
        }
    }

    #[test]
    fn test_write_rle_header() {
        let mut w = Cursor::new(Vec::new());
        write_rle_header(&RleHeader { w: 0x1234, h: 0x0201 }, &mut w).expect("header");
        assert_eq!(&w.get_ref()[..], &[0x12, 0x34, 0x02, 0x01][..]);
    }

    #[test]
    fn test_write_run_bgr_order() {
        let mut w = Cursor::new(Vec::new());
        let run = RunRecord { color: [0xAA, 0xBB, 0xCC], len: 256 };
        write_run(&run, &mut w).expect("run");
        assert_eq!(&w.get_ref()[..], &[0xCC, 0xBB, 0xAA, 0xFF][..]);
    }

    #[test]
    fn test_run_records() {
        let src = [
            0x00, 0x02, 0x00, 0x02,
            0x00, 0x00, 0xC8, 0x02, // red, length 3
            0x0A, 0x0A, 0x0A, 0x00, // grey, length 1
            0x01 ];                 // trailing garbage

        let mut runs = RunRecords::new(&src).expect("runs");
        assert_eq!(runs.next().unwrap().ok(), Some(RunRecord { color: [200, 0, 0], len: 3 }));
        assert_eq!(runs.next().unwrap().ok(), Some(RunRecord { color: [10, 10, 10], len: 1 }));
        match runs.next() {
            Some(Err(RleError::Corrupted)) => (),
            _ => panic!("expected Corrupted"),
        }
        assert!(runs.next().is_none());
    }
}
