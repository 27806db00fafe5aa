//! Foreign function interface.
//!
//! All functions return 0 on success and 1 on failure.  The encoder
//! returns 2 if the output buffer is too small, in which case the
//! required size is still written to `out_len`.

use std::io::Cursor;
use std::ptr;
use std::slice;
use libc::{c_double,c_uint,size_t};

use crate::{NUM_CHANNELS,Raster,RasterMut,RleError,RleResult};
use crate::codec::*;
use crate::color::Rgb;
use crate::format::rle_shape;

// Log with "file:line - " prefix, for more informative error messages.
macro_rules! logerrorln {
    ($e:expr) => {
        error!("{}:{} - {}", file!(), line!(), $e);
    };
}

fn run_decoder<F>(file: &'static str, line: u32,
        decoder: F,
        src: *const u8, src_len: size_t)
        -> c_uint
        where F: FnOnce(&[u8]) -> RleResult<()> {
    let src_slice = unsafe{ slice::from_raw_parts(src, src_len) };
    match decoder(src_slice) {
        Ok(_) => return 0,
        Err(e) => {
            error!("{}:{} - {}", file, line, e);
            return 1;
        },
    }
}

fn run_encoder<F>(file: &'static str, line: u32,
        encoder: F,
        out_buf: *mut u8, max_len: size_t, out_len: *mut size_t)
        -> c_uint
        where F: FnOnce(&mut Cursor<Vec<u8>>) -> RleResult<usize> {
    let mut buf: Cursor<Vec<u8>> = Cursor::new(Vec::new());
    match encoder(&mut buf) {
        Ok(len) => {
            unsafe{ ptr::write(out_len, len) };
            if len <= max_len {
                assert_eq!(len, buf.get_ref().len());
                let dst_slice = unsafe{ slice::from_raw_parts_mut(out_buf, max_len) };
                dst_slice[0..len].copy_from_slice(&buf.get_ref()[..]);
                return 0;
            } else {
                error!("{}:{} - output buffer too small", file, line);
                return 2;
            }
        },
        Err(e) => {
            error!("{}:{} - {}", file, line, e);
            return 1;
        },
    }
}

/*--------------------------------------------------------------*/
/* Codecs                                                       */
/*--------------------------------------------------------------*/

/// Encode a w x h RGB buffer into an RLE stream.
///
/// `transparent` is either null or points to 3 bytes (R, G, B).
#[no_mangle]
pub extern "C" fn rlers_encode(
        src: *const u8, w: size_t, h: size_t,
        tolerance: c_double, transparent: *const u8,
        out_buf: *mut u8, max_len: size_t, out_len: *mut size_t)
        -> c_uint {
    if src.is_null() || out_buf.is_null() || out_len.is_null() {
        logerrorln!("bad input parameters");
        return 1;
    }

    let transparent: Option<Rgb> = if transparent.is_null() {
        None
    } else {
        let c = unsafe{ slice::from_raw_parts(transparent, NUM_CHANNELS) };
        Some([c[0], c[1], c[2]])
    };

    let src_len = match w.checked_mul(h).and_then(|n| n.checked_mul(NUM_CHANNELS)) {
        Some(n) => n,
        None => {
            logerrorln!("image too large");
            return 1;
        },
    };

    let src_slice = unsafe{ slice::from_raw_parts(src, src_len) };

    run_encoder(file!(), line!(),
            |out| {
                let enc = RleEncoder::new(tolerance)?.with_transparent(transparent);
                enc.encode(&Raster::new(w, h, src_slice), out)
            },
            out_buf, max_len, out_len)
}

/// Decode an RLE stream into a w x h RGB buffer of dst_len bytes.
///
/// Use `rlers_shape` to find w and h.
#[no_mangle]
pub extern "C" fn rlers_decode(
        src: *const u8, src_len: size_t, dst: *mut u8, dst_len: size_t)
        -> c_uint {
    if src.is_null() || dst.is_null() {
        logerrorln!("bad input parameters");
        return 1;
    }

    run_decoder(file!(), line!(),
            |src| {
                let (h, w, _) = rle_shape(src)?;
                if w.checked_mul(h).and_then(|n| n.checked_mul(NUM_CHANNELS)) != Some(dst_len) {
                    return Err(RleError::WrongResolution);
                }

                let dst_slice = unsafe{ slice::from_raw_parts_mut(dst, dst_len) };
                decode_rle_into(src, &mut RasterMut::new(w, h, dst_slice))
            },
            src, src_len)
}

/// Get the height and width of an RLE stream.
#[no_mangle]
pub extern "C" fn rlers_shape(
        src: *const u8, src_len: size_t,
        out_h: *mut size_t, out_w: *mut size_t)
        -> c_uint {
    if src.is_null() || out_h.is_null() || out_w.is_null() {
        logerrorln!("bad input parameters");
        return 1;
    }

    run_decoder(file!(), line!(),
            |src| {
                let (h, w, _) = rle_shape(src)?;
                unsafe {
                    ptr::write(out_h, h);
                    ptr::write(out_w, w);
                }
                Ok(())
            },
            src, src_len)
}

#[cfg(test)]
mod tests {
    use std::ptr;
    use super::*;

    #[test]
    fn test_rlers_encode_decode() {
        let src = [
            10, 10, 10,  10, 10, 10,  200, 0, 0 ];
        let mut out = [0; 64];
        let mut out_len = 0;

        let res = rlers_encode(src.as_ptr(), 3, 1, 5.0, ptr::null(),
                out.as_mut_ptr(), out.len(), &mut out_len);
        assert_eq!(res, 0);
        assert_eq!(out_len, 12);

        let mut h = 0;
        let mut w = 0;
        assert_eq!(rlers_shape(out.as_ptr(), out_len, &mut h, &mut w), 0);
        assert_eq!((h, w), (1, 3));

        let mut dst = [0; 9];
        assert_eq!(rlers_decode(out.as_ptr(), out_len, dst.as_mut_ptr(), dst.len()), 0);
        assert_eq!(dst, src);
    }

    #[test]
    fn test_rlers_encode_small_buffer() {
        let src = [ 1, 2, 3,  4, 5, 6 ];
        let transparent = [ 1, 2, 3 ];
        let mut out = [0; 4];
        let mut out_len = 0;

        let res = rlers_encode(src.as_ptr(), 2, 1, 1000.0, transparent.as_ptr(),
                out.as_mut_ptr(), out.len(), &mut out_len);
        assert_eq!(res, 2);
        assert_eq!(out_len, 12);
    }

    #[test]
    fn test_rlers_encode_too_large() {
        let src = [ 1, 2, 3 ];
        let mut out = [0; 16];
        let mut out_len = 0;

        let res = rlers_encode(src.as_ptr(), usize::MAX, 2, 0.0, ptr::null(),
                out.as_mut_ptr(), out.len(), &mut out_len);
        assert_eq!(res, 1);
        assert_eq!(out_len, 0);
    }

    #[test]
    fn test_rlers_decode_corrupted() {
        let src = [
            0x00, 0x02, 0x00, 0x01,
            0x01, 0x02, 0x03, 0x00 ];
        let mut dst = [0; 6];

        assert_eq!(rlers_decode(src.as_ptr(), src.len(), dst.as_mut_ptr(), dst.len()), 1);
        assert_eq!(rlers_decode(ptr::null(), 0, dst.as_mut_ptr(), dst.len()), 1);
    }
}
