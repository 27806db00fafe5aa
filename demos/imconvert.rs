//! Convert an image to an RLE image and vice versa.

extern crate clap;
extern crate image;
extern crate rlelib;

use std::path::{Path,PathBuf};
use std::process;
use clap::Parser;
use image::{ColorType,DynamicImage};
use rlelib::{RgbImage,RleEncoder,RleError,decode_rle,load_rle,save_rle};
use rlelib::color::{DEFAULT_TOLERANCE,DEFAULT_TRANSPARENT_COLOR};

#[derive(Parser, Debug)]
#[command(name = "imconvert",
        about = "Converts an image to an RLE image and vice versa")]
struct Args {
    /// Source file name
    source: PathBuf,

    /// Target file name
    target: PathBuf,

    /// Maximum MSE in a run.  0 means lossless encoding.  Ignored with --rle
    #[arg(default_value_t = DEFAULT_TOLERANCE)]
    threshold: f64,

    /// Source image is RLE
    #[arg(short, long)]
    rle: bool,

    /// Force overwriting if target exists
    #[arg(short, long)]
    force: bool,

    /// Transparent color (hex string).  Without a value, ff00ff is used
    #[arg(short, long, num_args = 0..=1)]
    transparency: Option<Option<String>>,
}

fn main() {
    let args = Args::parse();

    if !args.source.exists() {
        eprintln!("The input file \"{}\" does not exist.", args.source.display());
        process::exit(1);
    }
    if !args.force && args.target.exists() {
        eprintln!("The output file \"{}\" already exists. Use -f to force overwriting.",
                args.target.display());
        process::exit(1);
    }

    let res = if args.rle {
        rle_to_image(&args.source, &args.target)
    } else {
        image_to_rle(&args)
    };

    if let Err(e) = res {
        eprintln!("Error occurred - {}", e);
        process::exit(1);
    }
}

fn image_to_rle(args: &Args)
        -> Result<(), Box<dyn std::error::Error>> {
    let src = image::open(&args.source)?;
    let img = load_rgb(&src)?;

    let enc = match args.transparency {
        Some(Some(ref code)) => RleEncoder::new(args.threshold)?.with_transparent_code(code)?,
        Some(None) => RleEncoder::new(args.threshold)?.with_transparent(Some(DEFAULT_TRANSPARENT_COLOR)),
        None => RleEncoder::new(args.threshold)?,
    };

    let rle = enc.encode_to_vec(&img.as_raster())?;
    save_rle(&args.target, &rle, true)?;

    println!("RLE SIZE: {} BYTES.", rle.len());

    Ok(())
}

/// Accept 8-bit RGB or RGBA images only; RGBA loses its alpha channel.
fn load_rgb(src: &DynamicImage)
        -> Result<RgbImage, Box<dyn std::error::Error>> {
    let w = src.width() as usize;
    let h = src.height() as usize;
    let channels = src.color().channel_count() as usize;

    match src.color() {
        ColorType::Rgb8 | ColorType::Rgba8 =>
            Ok(RgbImage::from_channels(w, h, channels, src.as_bytes())?),
        _ if channels != 3 && channels != 4 =>
            Err(RleError::UnsupportedRaster(channels).into()),
        _ => Err("Images must be in 8-bit per channel format".into()),
    }
}

fn rle_to_image(source: &Path, target: &Path)
        -> Result<(), Box<dyn std::error::Error>> {
    let rle = load_rle(source)?;
    let img = decode_rle(&rle)?;
    let (h, w, _) = img.shape();

    let out = image::RgbImage::from_raw(w as u32, h as u32, img.into_raw())
        .ok_or("decoded buffer does not match its dimensions")?;
    out.save(target)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use image::{DynamicImage,GrayImage,ImageBuffer,Rgb,RgbaImage};
    use rlelib::RleError;
    use super::load_rgb;

    #[test]
    fn test_load_rgb_rejects_gray() {
        let src = DynamicImage::ImageLuma8(GrayImage::new(2, 2));
        let err = load_rgb(&src).expect_err("grayscale accepted");
        match err.downcast_ref::<RleError>() {
            Some(&RleError::UnsupportedRaster(1)) => (),
            _ => panic!("expected UnsupportedRaster, got {}", err),
        }
    }

    #[test]
    fn test_load_rgb_rejects_16_bit() {
        let buf: ImageBuffer<Rgb<u16>, Vec<u16>> = ImageBuffer::new(2, 2);
        assert!(load_rgb(&DynamicImage::ImageRgb16(buf)).is_err());
    }

    #[test]
    fn test_load_rgb_drops_alpha() {
        let mut buf = RgbaImage::new(1, 1);
        buf.put_pixel(0, 0, image::Rgba([1, 2, 3, 4]));

        let img = load_rgb(&DynamicImage::ImageRgba8(buf)).expect("rgba");
        assert_eq!(img.as_bytes(), &[1, 2, 3][..]);
    }
}
