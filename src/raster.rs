//! Raster implementation.

use std::cmp::max;
use crate::{NUM_CHANNELS,Raster,RasterMut,RleError,RleResult};
use crate::color::Rgb;

/// Owned RGB image, as produced by the decoder.
#[derive(Clone,Debug,Eq,PartialEq)]
pub struct RgbImage {
    w: usize,
    h: usize,
    buf: Vec<u8>,
}

impl<'a> Raster<'a> {
    /// Allocate a new raster for the given RGB buffer.
    ///
    /// # Examples
    ///
    /// ```
    /// const SCREEN_W: usize = 320;
    /// const SCREEN_H: usize = 200;
    /// let buf = [0; 3 * SCREEN_W * SCREEN_H];
    ///
    /// rlelib::Raster::new(SCREEN_W, SCREEN_H, &buf);
    /// ```
    pub fn new(w: usize, h: usize, buf: &'a [u8])
            -> Self {
        Self::with_offset(0, 0, w, h, w, buf)
    }

    /// Allocate a new raster for the given RGB buffer, with an offset
    /// and stride.
    ///
    /// # Examples
    ///
    /// ```
    /// const SCREEN_W: usize = 320;
    /// const SCREEN_H: usize = 200;
    /// let buf = [0; 3 * SCREEN_W * SCREEN_H];
    ///
    /// rlelib::Raster::with_offset(8, 8, 100, 50, SCREEN_W, &buf);
    /// ```
    pub fn with_offset(
            x: usize, y: usize, w: usize, h: usize, stride: usize,
            buf: &'a [u8])
            -> Self {
        assert!(x + w <= stride);
        assert!(NUM_CHANNELS * stride * (y + h) <= buf.len());

        Raster {
            x: x,
            y: y,
            w: w,
            h: h,
            stride: stride,
            buf: buf,
        }
    }

    /// Get the raster width.
    pub fn width(&self) -> usize {
        self.w
    }

    /// Get the raster height.
    pub fn height(&self) -> usize {
        self.h
    }

    /// Iterate over the rows, each row being 3 * width bytes.
    pub fn rows(&self) -> impl Iterator<Item = &'a [u8]> + 'a {
        let start = NUM_CHANNELS * self.stride * self.y;
        let end = NUM_CHANNELS * self.stride * (self.y + self.h);
        let x0 = NUM_CHANNELS * self.x;
        let x1 = NUM_CHANNELS * (self.x + self.w);
        let buf: &'a [u8] = self.buf;
        buf[start..end]
            .chunks(max(NUM_CHANNELS * self.stride, 1))
            .map(move |row| &row[x0..x1])
    }
}

impl<'a> RasterMut<'a> {
    /// Allocate a new raster for the given RGB buffer.
    ///
    /// # Examples
    ///
    /// ```
    /// const SCREEN_W: usize = 320;
    /// const SCREEN_H: usize = 200;
    /// let mut buf = [0; 3 * SCREEN_W * SCREEN_H];
    ///
    /// rlelib::RasterMut::new(SCREEN_W, SCREEN_H, &mut buf);
    /// ```
    pub fn new(w: usize, h: usize, buf: &'a mut [u8])
            -> Self {
        Self::with_offset(0, 0, w, h, w, buf)
    }

    /// Allocate a new raster for the given RGB buffer, with an offset
    /// and stride.
    pub fn with_offset(
            x: usize, y: usize, w: usize, h: usize, stride: usize,
            buf: &'a mut [u8])
            -> Self {
        assert!(x + w <= stride);
        assert!(NUM_CHANNELS * stride * (y + h) <= buf.len());

        RasterMut {
            x: x,
            y: y,
            w: w,
            h: h,
            stride: stride,
            buf: buf,
        }
    }

    /// Get the raster width.
    pub fn width(&self) -> usize {
        self.w
    }

    /// Get the raster height.
    pub fn height(&self) -> usize {
        self.h
    }

    /// Iterate over the rows, each row being 3 * width bytes.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [u8]> {
        let start = NUM_CHANNELS * self.stride * self.y;
        let end = NUM_CHANNELS * self.stride * (self.y + self.h);
        let x0 = NUM_CHANNELS * self.x;
        let x1 = NUM_CHANNELS * (self.x + self.w);
        self.buf[start..end]
            .chunks_mut(max(NUM_CHANNELS * self.stride, 1))
            .map(move |row| &mut row[x0..x1])
    }
}

impl RgbImage {
    /// Allocate a black image.
    pub fn new(w: usize, h: usize) -> Self {
        RgbImage {
            w: w,
            h: h,
            buf: vec![0; NUM_CHANNELS * w * h],
        }
    }

    /// Wrap an existing RGB buffer.
    ///
    /// Returns `WrongResolution` if the buffer is not 3 * w * h bytes.
    pub fn from_raw(w: usize, h: usize, buf: Vec<u8>)
            -> RleResult<Self> {
        if buf.len() != NUM_CHANNELS * w * h {
            return Err(RleError::WrongResolution);
        }

        Ok(RgbImage { w: w, h: h, buf: buf })
    }

    /// Build an RGB image from interleaved 8-bit samples with the
    /// given number of channels.
    ///
    /// RGBA input has its alpha channel discarded.  Any other channel
    /// count is rejected.
    pub fn from_channels(w: usize, h: usize, channels: usize, data: &[u8])
            -> RleResult<Self> {
        if channels != 3 && channels != 4 {
            return Err(RleError::UnsupportedRaster(channels));
        }
        if data.len() != channels * w * h {
            return Err(RleError::WrongResolution);
        }

        if channels == 4 {
            warn!("input image is RGBA, discarding alpha channel");
            let buf = data.chunks(4)
                .flat_map(|px| px[0..NUM_CHANNELS].iter().cloned())
                .collect();
            Ok(RgbImage { w: w, h: h, buf: buf })
        } else {
            Ok(RgbImage { w: w, h: h, buf: data.to_vec() })
        }
    }

    /// Get the image width.
    pub fn width(&self) -> usize {
        self.w
    }

    /// Get the image height.
    pub fn height(&self) -> usize {
        self.h
    }

    /// Get the (height, width, channels) triple.
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.h, self.w, NUM_CHANNELS)
    }

    /// Get the color of the pixel at (x, y).
    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        assert!(x < self.w && y < self.h);
        let i = NUM_CHANNELS * (self.w * y + x);
        [self.buf[i], self.buf[i + 1], self.buf[i + 2]]
    }

    /// Borrow the raw RGB bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Take the raw RGB bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.buf
    }

    pub fn as_raster(&self) -> Raster {
        Raster::new(self.w, self.h, &self.buf)
    }

    pub fn as_raster_mut(&mut self) -> RasterMut {
        RasterMut::new(self.w, self.h, &mut self.buf)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Raster,RasterMut,RleError};
    use super::RgbImage;

    #[test]
    fn test_raster_rows_zero_width() {
        let buf: [u8; 0] = [];
        assert_eq!(Raster::new(0, 3, &buf).rows().count(), 0);

        let mut buf: [u8; 0] = [];
        assert_eq!(RasterMut::new(0, 3, &mut buf).rows_mut().count(), 0);
    }

    #[test]
    fn test_raster_rows_with_offset() {
        // 3x2 buffer, view the 2x1 region at (1, 1).
        let buf = [
            0, 0, 0,  1, 1, 1,  2, 2, 2,
            3, 3, 3,  4, 4, 4,  5, 5, 5 ];

        let raster = Raster::with_offset(1, 1, 2, 1, 3, &buf);
        let rows: Vec<&[u8]> = raster.rows().collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0], &[4, 4, 4, 5, 5, 5][..]);
    }

    #[test]
    fn test_from_channels_rgba() {
        let data = [
            1, 2, 3, 255,
            4, 5, 6, 0 ];

        let img = RgbImage::from_channels(2, 1, 4, &data).expect("rgba");
        assert_eq!(img.as_bytes(), &[1, 2, 3, 4, 5, 6][..]);
        assert_eq!(img.pixel(1, 0), [4, 5, 6]);
    }

    #[test]
    fn test_from_channels_rejects_gray() {
        match RgbImage::from_channels(2, 2, 1, &[0; 4]) {
            Err(RleError::UnsupportedRaster(1)) => (),
            _ => panic!("grayscale should be rejected"),
        }
    }

    #[test]
    fn test_from_raw_wrong_size() {
        assert!(RgbImage::from_raw(2, 2, vec![0; 11]).is_err());
        assert_eq!(RgbImage::from_raw(2, 2, vec![0; 12]).expect("img").shape(), (2, 2, 3));
    }
}
