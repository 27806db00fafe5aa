//! Print the shape and run statistics of RLE files.

extern crate rlelib;

use std::env;
use std::path::Path;
use rlelib::{RleResult,load_rle,rle_shape};
use rlelib::format::RunRecords;

fn main() {
    if env::args().count() <= 1 {
        usage();
        return;
    }

    for filename in env::args().skip(1) {
        match print_info(Path::new(&filename)) {
            Ok(_) => (),
            Err(e) => {
                println!("Error reading {} - {}", filename, e);
                continue;
            },
        }
    }
}

fn usage() {
    println!("Usage: rleinfo <RLE files>");
}

fn print_info(filepath: &Path)
        -> RleResult<()> {
    let rle = load_rle(filepath)?;
    let (h, w, c) = rle_shape(&rle)?;

    let mut runs = 0;
    let mut pixels = 0;
    let mut longest = 0;
    for run in RunRecords::new(&rle)? {
        let run = run?;
        runs = runs + 1;
        pixels = pixels + run.len;
        if run.len > longest {
            longest = run.len;
        }
    }

    println!("{}: {}x{}x{}, {} bytes", filepath.display(), h, w, c, rle.len());
    println!("  runs: {}, longest: {}, pixels: {}{}",
            runs, longest, pixels,
            if pixels == w * h { "" } else { " (corrupt)" });
    if runs > 0 {
        println!("  ratio: {:.2}:1",
                (3 * w * h) as f64 / rle.len() as f64);
    }

    Ok(())
}
