use crate::error::{Error, Result};
use std::io::{Read, Write};

//===========================================================================//

// Size limits for decoded images:
const MIN_WIDTH: u32 = 1;
const MIN_HEIGHT: u32 = 1;

//===========================================================================//

/// A decoded bitmap that can be sampled one RGBA pixel at a time.
///
/// This is the only view of a source image that the resampler and encoder
/// need, so images owned by other libraries can be converted without first
/// being copied into an [`RgbaImage`].
pub trait Bitmap {
    /// Returns the width of the bitmap, in pixels.
    fn width(&self) -> u32;

    /// Returns the height of the bitmap, in pixels.
    fn height(&self) -> u32;

    /// Returns the `[red, green, blue, alpha]` value of the pixel at column
    /// `x` and row `y` (counted from the top).  Only called with `x <
    /// self.width()` and `y < self.height()`.
    fn pixel(&self, x: u32, y: u32) -> [u8; 4];

    /// Returns true if the bitmap has no pixels at all.
    fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

//===========================================================================//

/// A decoded 32-bit RGBA image.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RgbaImage {
    width: u32,
    height: u32,
    rgba_data: Vec<u8>,
}

impl RgbaImage {
    /// Creates a new image with the given dimensions and RGBA data.  The
    /// `width` and `height` must be nonzero, and `rgba_data` must have `4 *
    /// width * height` bytes and be in row-major order from top to bottom.
    /// Returns an error if the dimensions are out of range or if `rgba_data`
    /// is the wrong length.
    pub fn from_rgba_data(
        width: u32,
        height: u32,
        rgba_data: Vec<u8>,
    ) -> Result<RgbaImage> {
        if width < MIN_WIDTH {
            invalid_input!(
                "Invalid width (was {}, but must be at least {})",
                width,
                MIN_WIDTH
            );
        }
        if height < MIN_HEIGHT {
            invalid_input!(
                "Invalid height (was {}, but must be at least {})",
                height,
                MIN_HEIGHT
            );
        }
        let expected_data_len = (width as u64) * (height as u64) * 4;
        if (rgba_data.len() as u64) != expected_data_len {
            invalid_input!(
                "Invalid data length (was {}, but must be {} for {}x{} image)",
                rgba_data.len(),
                expected_data_len,
                width,
                height
            );
        }
        Ok(RgbaImage { width, height, rgba_data })
    }

    /// Creates a new image by calling `pixel(x, y)` for every pixel, row by
    /// row from the top.
    pub fn from_fn<F>(
        width: u32,
        height: u32,
        mut pixel: F,
    ) -> Result<RgbaImage>
    where
        F: FnMut(u32, u32) -> [u8; 4],
    {
        let mut rgba_data =
            Vec::with_capacity((width as usize) * (height as usize) * 4);
        for y in 0..height {
            for x in 0..width {
                rgba_data.extend_from_slice(&pixel(x, y));
            }
        }
        RgbaImage::from_rgba_data(width, height, rgba_data)
    }

    /// Copies any bitmap into a new image.  Returns an error if the bitmap
    /// is empty.
    pub fn from_bitmap<B: Bitmap + ?Sized>(bitmap: &B) -> Result<RgbaImage> {
        if bitmap.is_empty() {
            invalid_input!(
                "Can't copy an empty {}x{} bitmap",
                bitmap.width(),
                bitmap.height()
            );
        }
        RgbaImage::from_fn(bitmap.width(), bitmap.height(), |x, y| {
            bitmap.pixel(x, y)
        })
    }

    /// Decodes an image from a PNG file.  Returns an error if the PNG data is
    /// malformed or can't be decoded.
    pub fn read_png<R: Read>(reader: R) -> Result<RgbaImage> {
        let mut decoder = png::Decoder::new(reader);
        // Palettes and sub-byte depths are expanded and 16-bit channels are
        // stripped, so only 8-bit gray/RGB layouts remain below.
        decoder.set_transformations(
            png::Transformations::EXPAND | png::Transformations::STRIP_16,
        );
        let mut png_reader = match decoder.read_info() {
            Ok(png_reader) => png_reader,
            Err(error) => invalid_input!("Malformed PNG data: {}", error),
        };
        let mut buffer = vec![0u8; png_reader.output_buffer_size()];
        let frame = match png_reader.next_frame(&mut buffer) {
            Ok(frame) => frame,
            Err(error) => invalid_input!("Malformed PNG data: {}", error),
        };
        buffer.truncate(frame.buffer_size());
        if frame.bit_depth != png::BitDepth::Eight {
            invalid_input!("Unsupported PNG bit depth: {:?}", frame.bit_depth);
        }
        let rgba_data = match frame.color_type {
            png::ColorType::Rgba => buffer,
            png::ColorType::Rgb => {
                let num_pixels = buffer.len() / 3;
                let mut rgba = Vec::with_capacity(num_pixels * 4);
                for i in 0..num_pixels {
                    rgba.extend_from_slice(&buffer[(3 * i)..][..3]);
                    rgba.push(u8::MAX);
                }
                rgba
            }
            png::ColorType::GrayscaleAlpha => {
                let num_pixels = buffer.len() / 2;
                let mut rgba = Vec::with_capacity(num_pixels * 4);
                for i in 0..num_pixels {
                    let gray = buffer[2 * i];
                    let alpha = buffer[2 * i + 1];
                    rgba.extend_from_slice(&[gray, gray, gray, alpha]);
                }
                rgba
            }
            png::ColorType::Grayscale => {
                let mut rgba = Vec::with_capacity(buffer.len() * 4);
                for value in buffer.into_iter() {
                    rgba.extend_from_slice(&[value, value, value, u8::MAX]);
                }
                rgba
            }
            png::ColorType::Indexed => {
                invalid_input!("PNG palette was not expanded")
            }
        };
        RgbaImage::from_rgba_data(frame.width, frame.height, rgba_data)
    }

    /// Encodes the image as an 8-bit-per-channel RGBA PNG file.  The alpha
    /// channel is always kept, even for fully opaque images.
    pub fn write_png<W: Write>(&self, writer: W) -> Result<()> {
        match self.write_png_enc(writer) {
            Ok(()) => Ok(()),
            Err(png::EncodingError::IoError(error)) => Err(Error::Sink(error)),
            Err(png::EncodingError::Format(error)) => {
                Err(Error::Encode(format!("PNG format error: {}", error)))
            }
            Err(png::EncodingError::LimitsExceeded) => {
                Err(Error::Encode("PNG limits exceeded".to_string()))
            }
            Err(png::EncodingError::Parameter(error)) => {
                Err(Error::Encode(format!("PNG parameter error: {}", error)))
            }
        }
    }

    fn write_png_enc<W: Write>(
        &self,
        writer: W,
    ) -> std::result::Result<(), png::EncodingError> {
        let mut encoder = png::Encoder::new(writer, self.width, self.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&self.rgba_data)?;
        writer.finish()
    }

    /// Returns the width of the image, in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the image, in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the RGBA data for this image, in row-major order from top to
    /// bottom.
    pub fn rgba_data(&self) -> &[u8] {
        &self.rgba_data
    }

    /// Consumes the image, returning its RGBA data.
    pub fn into_rgba_data(self) -> Vec<u8> {
        self.rgba_data
    }
}

impl Bitmap for RgbaImage {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let start = 4 * ((y as usize) * (self.width as usize) + (x as usize));
        let mut rgba = [0u8; 4];
        rgba.copy_from_slice(&self.rgba_data[start..][..4]);
        rgba
    }
}

//===========================================================================//


//===========================================================================//
