//! A library for converting bitmaps into multi-resolution ICO files.
//!
//! Each requested size is resampled from the source image with a
//! high-quality filter, compressed as a 32-bit RGBA PNG, and embedded in
//! the ICO container as its own directory entry.
//!
//! ```no_run
//! use std::fs::File;
//!
//! let file = File::open("logo.png")?;
//! let image = icoforge::RgbaImage::read_png(file)?;
//! let options =
//!     icoforge::IconOptions::default().with_sizes(vec![16, 32, 256]);
//! let encoder = icoforge::IcoEncoder::new(options);
//! encoder.encode(&image, File::create("logo.ico")?)?;
//! # Ok::<(), icoforge::Error>(())
//! ```

#![warn(missing_docs)]

#[macro_use]
mod macros;

mod codec;
mod encoder;
mod error;
mod icondir;
mod image;
mod options;
mod resample;

pub use crate::codec::{ImageCodec, PngCodec};
pub use crate::encoder::IcoEncoder;
pub use crate::error::{Error, Result};
pub use crate::icondir::{
    IconDir, IconDirEntry, ENTRY_LEN, HEADER_LEN, MAX_SIZE,
};
pub use crate::image::{Bitmap, RgbaImage};
pub use crate::options::IconOptions;
pub use crate::resample::{Filter, Resampler};

use std::fs::{self, File};
use std::io::{BufReader, Read, Write};
use std::path::Path;

//===========================================================================//

/// Writes `source` to `writer` as an ICO file holding a single 256x256
/// image.
pub fn convert_to_icon<W: Write>(
    source: &dyn Bitmap,
    writer: W,
) -> Result<()> {
    IcoEncoder::new(IconOptions::default()).encode(source, writer)
}

/// Decodes a PNG image from `reader` and writes it to `writer` as an ICO
/// file holding a single 256x256 image.
pub fn convert_reader_to_icon<R: Read, W: Write>(
    reader: R,
    writer: W,
) -> Result<()> {
    IcoEncoder::new(IconOptions::default()).encode_reader(reader, writer)
}

/// Converts the PNG file at `input` into an ICO file at `output` using the
/// given options.  The icon is fully encoded in memory first, so the output
/// file is only created (or truncated) once encoding has succeeded.
pub fn convert_file_to_icon<P, Q>(
    input: P,
    output: Q,
    options: IconOptions,
) -> Result<()>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let encoder = IcoEncoder::new(options);
    let mut reader = BufReader::new(File::open(input.as_ref())?);
    let source = encoder.codec().decode(&mut reader)?;
    let data = encoder.encode_to_vec(&source)?;
    fs::write(output.as_ref(), data)?;
    Ok(())
}

//===========================================================================//
