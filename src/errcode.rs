//! RLE error codes.

use std::io;

pub type RleResult<T> = Result<T, RleError>;

quick_error! {
    #[derive(Debug)]
    pub enum RleError {
        /// The transparent color is not a 6 digit hex code.
        InvalidColor(code: String) {
            description("Invalid color code")
            display("{} is not a valid color code", code)
        }

        /// The tolerance is negative or not a number.
        InvalidTolerance {
            description("Invalid tolerance")
            display("Invalid tolerance")
        }

        /// The source image does not have 3 (or 4) channels.
        UnsupportedRaster(channels: usize) {
            description("Unsupported raster")
            display("Only RGB images allowed, got {} channels", channels)
        }

        /// Raster is empty or does not fit in the header.
        WrongResolution {
            description("Wrong resolution")
            display("Wrong resolution")
        }

        /// The stream's runs do not match the declared dimensions.
        Corrupted {
            description("Corrupted")
            display("Corrupted")
        }

        NoFile {
            description("No file")
            display("File not found")
        }

        NotARegularFile {
            description("Not a regular file")
            display("Not a regular file")
        }

        AlreadyExists {
            description("Already exists")
            display("File already exists")
        }

        Io(err: io::Error) {
            from()
            display("IO error: {}", err)
            cause(err)
        }
    }
}
