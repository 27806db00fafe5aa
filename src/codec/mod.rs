//! RLE encoding and decoding subroutines.

macro_rules! module {
    ($e:ident) => {
        pub use self::$e::*;
        mod $e;
    };
}

use crate::NUM_CHANNELS;
use crate::color::Rgb;

module!(decode);
module!(encode);

/*--------------------------------------------------------------*/

/// Result of a GroupByTolerance operation: start index and length
/// (in pixels) and the rounded mean color of the group.
///
/// The length is not limited to MAX_RUN_LENGTH; the writer splits
/// long groups into several records.
#[derive(Clone,Copy,Debug,Eq,PartialEq)]
struct Group {
    start: usize,
    len: usize,
    color: Rgb,
}

/// Running statistics of the pixels in a group.
#[derive(Clone,Copy,Debug)]
struct GroupStats {
    len: u64,
    sum: [u64; NUM_CHANNELS],
    sum_sq: [u64; NUM_CHANNELS],
    transparent: bool,
}

/// An iterator that groups a row of RGB pixels into runs whose mean
/// squared error, against the run's average color, stays below the
/// tolerance.
///
/// Pixels matching the transparent color are only ever grouped with
/// other transparent pixels, regardless of the tolerance.
struct GroupByTolerance<'a> {
    row: &'a [u8],
    idx: usize,
    tolerance: f64,
    transparent: Option<Rgb>,
}

/*--------------------------------------------------------------*/

impl GroupStats {
    fn new(px: Rgb, transparent: bool) -> Self {
        let mut s = GroupStats {
            len: 0,
            sum: [0; NUM_CHANNELS],
            sum_sq: [0; NUM_CHANNELS],
            transparent: transparent,
        };
        s.push(px);
        s
    }

    fn push(&mut self, px: Rgb) {
        for c in 0..NUM_CHANNELS {
            let v = px[c] as u64;
            self.sum[c] = self.sum[c] + v;
            self.sum_sq[c] = self.sum_sq[c] + v * v;
        }
        self.len = self.len + 1;
    }

    /// Mean squared error of the group with px appended, measured
    /// against the mean of the group without px, averaged over all
    /// channels.
    ///
    /// Returns the error scaled by len^2 as an exact integer, and the
    /// divisor that turns it into the MSE.
    fn candidate_error(&self, px: Rgb) -> (i128, i128) {
        let n = self.len as i128;
        let mut scaled = 0;

        // n^2 * sum((v - S/n)^2) = n^2 Q' - 2 n S S' + (n + 1) S^2
        for c in 0..NUM_CHANNELS {
            let v = px[c] as i128;
            let s = self.sum[c] as i128;
            let s2 = s + v;
            let q2 = self.sum_sq[c] as i128 + v * v;
            scaled = scaled + n * n * q2 - 2 * n * s * s2 + (n + 1) * s * s;
        }

        (scaled, n * n * (n + 1) * NUM_CHANNELS as i128)
    }

    /// Returns true if px can be appended without reaching the
    /// tolerance.  A tolerance of zero only accepts exact repeats.
    fn accepts(&self, px: Rgb, tolerance: f64) -> bool {
        let (scaled, divisor) = self.candidate_error(px);
        // A literal "< 0" test would never merge any pixels.
        if tolerance == 0.0 {
            scaled == 0
        } else {
            (scaled as f64) / (divisor as f64) < tolerance
        }
    }

    /// Mean color, each channel rounded to the nearest integer with
    /// ties going to the even value.
    fn mean(&self) -> Rgb {
        let mut c = [0; NUM_CHANNELS];
        for (i, e) in c.iter_mut().enumerate() {
            *e = round_half_even(self.sum[i], self.len);
        }
        c
    }
}

fn round_half_even(num: u64, den: u64) -> u8 {
    let q = num / den;
    let r2 = 2 * (num % den);
    let q = if r2 > den || (r2 == den && q % 2 == 1) {
        q + 1
    } else {
        q
    };

    q as u8
}

fn pixel_at(row: &[u8], i: usize) -> Rgb {
    let j = NUM_CHANNELS * i;
    [row[j], row[j + 1], row[j + 2]]
}

impl<'a> GroupByTolerance<'a> {
    /// Create a new GroupByTolerance iterator over a row of
    /// 3 * width bytes.
    fn new(row: &'a [u8], tolerance: f64, transparent: Option<Rgb>) -> Self {
        assert_eq!(row.len() % NUM_CHANNELS, 0);
        GroupByTolerance {
            row: row,
            idx: 0,
            tolerance: tolerance,
            transparent: transparent,
        }
    }

    fn is_transparent(&self, px: Rgb) -> bool {
        self.transparent == Some(px)
    }
}

impl<'a> Iterator for GroupByTolerance<'a> {
    type Item = Group;

    /// Advances the iterator and returns the next value.
    fn next(&mut self) -> Option<Group> {
        let len = self.row.len() / NUM_CHANNELS;
        let start = self.idx;

        if start >= len {
            return None;
        }

        let px = pixel_at(self.row, start);
        let mut stats = GroupStats::new(px, self.is_transparent(px));
        let mut i = start + 1;

        while i < len {
            let px = pixel_at(self.row, i);
            let transparent = self.is_transparent(px);

            let accept = if transparent != stats.transparent {
                false
            } else if transparent {
                true
            } else {
                stats.accepts(px, self.tolerance)
            };

            if !accept {
                break;
            }

            stats.push(px);
            i = i + 1;
        }

        self.idx = i;
        Some(Group {
            start: start,
            len: i - start,
            color: stats.mean(),
        })
    }
}
