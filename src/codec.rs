use crate::error::Result;
use crate::image::{Bitmap, RgbaImage};
use crate::resample::{Filter, Resampler};
use std::io::Read;

//===========================================================================//

/// The image-processing capability that the ICO encoder depends on.
///
/// Everything platform- or library-specific about turning a bitmap into an
/// icon payload lives behind this trait, so the header/directory logic can
/// be exercised with a stand-in codec.
pub trait ImageCodec {
    /// Decodes an encoded image (e.g. a PNG file) into RGBA pixels.
    fn decode(&self, reader: &mut dyn Read) -> Result<RgbaImage>;

    /// Compresses an image into the bytes stored as one ICO payload.  The
    /// payload must keep all four 8-bit channels.
    fn encode(&self, image: &RgbaImage) -> Result<Vec<u8>>;

    /// Produces a `width` by `height` copy of `source`.
    fn resample(
        &self,
        source: &dyn Bitmap,
        width: u32,
        height: u32,
    ) -> Result<RgbaImage>;
}

//===========================================================================//

/// The default codec: PNG payloads and the built-in [`Resampler`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PngCodec {
    resampler: Resampler,
}

impl PngCodec {
    /// Creates a PNG codec that resizes images with the given filter.
    pub fn new(filter: Filter) -> PngCodec {
        PngCodec { resampler: Resampler::new(filter) }
    }

    /// Returns the resampler used by this codec.
    pub fn resampler(&self) -> &Resampler {
        &self.resampler
    }
}

impl ImageCodec for PngCodec {
    fn decode(&self, reader: &mut dyn Read) -> Result<RgbaImage> {
        RgbaImage::read_png(reader)
    }

    fn encode(&self, image: &RgbaImage) -> Result<Vec<u8>> {
        let mut data = Vec::new();
        image.write_png(&mut data)?;
        Ok(data)
    }

    fn resample(
        &self,
        source: &dyn Bitmap,
        width: u32,
        height: u32,
    ) -> Result<RgbaImage> {
        self.resampler.resample(source, width, height)
    }
}

//===========================================================================//


//===========================================================================//
