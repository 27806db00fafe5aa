//! This crate provides routines for encoding and decoding RGB raster
//! images to and from a lossy run-length encoded byte stream.
//!
//! Runs are built along each image row and absorb neighbouring pixels
//! while the mean squared error against the run's average color stays
//! below a tolerance.  A tolerance of zero gives lossless output.  An
//! optional transparent color is never blended with other colors.

#[macro_use]
extern crate log;
#[macro_use]
extern crate quick_error;

pub use crate::codec::{RleEncoder,decode_rle,decode_rle_into,encode_rle};
pub use crate::color::{Rgb,parse_color};
pub use crate::errcode::{RleError,RleResult};
pub use crate::format::rle_shape;
pub use crate::raster::RgbImage;
pub use crate::rlefile::{load_rle,save_rle};

pub mod codec;
pub mod color;
pub mod errcode;
pub mod ffi;
pub mod format;
pub mod raster;
pub mod rlefile;

/// Number of bytes per pixel in a raster buffer.
pub const NUM_CHANNELS: usize = 3;

/// Raster, for encoding.
///
/// Pixels are stored row-major as R, G, B bytes.  The offset, width,
/// height and stride are all measured in pixels.
pub struct Raster<'a> {
    x: usize,
    y: usize,
    w: usize,
    h: usize,
    stride: usize,
    buf: &'a [u8],
}

/// Raster, for decoding.
pub struct RasterMut<'a> {
    x: usize,
    y: usize,
    w: usize,
    h: usize,
    stride: usize,
    buf: &'a mut [u8],
}
