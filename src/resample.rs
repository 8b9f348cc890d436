use crate::error::Result;
use crate::image::{Bitmap, RgbaImage};
use fast_image_resize as fr;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

//===========================================================================//

/// The interpolation kernel used when resizing an image.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub enum Filter {
    /// Linear interpolation.
    Triangle,
    /// Catmull-Rom cubic interpolation.  The default.
    #[default]
    Bicubic,
    /// Lanczos windowed sinc with three lobes; the sharpest of the three.
    Lanczos3,
}

impl Filter {
    fn to_fast_filter(self) -> fr::FilterType {
        match self {
            Filter::Triangle => fr::FilterType::Bilinear,
            Filter::Bicubic => fr::FilterType::CatmullRom,
            Filter::Lanczos3 => fr::FilterType::Lanczos3,
        }
    }
}

//===========================================================================//

/// Resizes bitmaps with a separable convolution filter.
///
/// Colour is filtered premultiplied by alpha, so fully transparent pixels
/// never bleed into their neighbours.  Near the borders the kernel only
/// covers pixels inside the source and is renormalized over them.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Resampler {
    filter: Filter,
}

impl Resampler {
    /// Creates a resampler that uses the given filter.
    pub fn new(filter: Filter) -> Resampler {
        Resampler { filter }
    }

    /// Returns the filter used by this resampler.
    pub fn filter(&self) -> Filter {
        self.filter
    }

    /// Produces a new `width` by `height` image from `source`.  The aspect
    /// ratio is not preserved; both dimensions are honored as given.
    /// Returns an error if the source is empty, if either requested
    /// dimension is zero, or if the output would be too large to allocate.
    pub fn resample<B: Bitmap + ?Sized>(
        &self,
        source: &B,
        width: u32,
        height: u32,
    ) -> Result<RgbaImage> {
        if source.is_empty() {
            invalid_input!(
                "Can't resample an empty {}x{} source image",
                source.width(),
                source.height()
            );
        }
        if width == 0 || height == 0 {
            invalid_input!(
                "Invalid target size (was {}x{}, but both dimensions must \
                 be at least 1)",
                width,
                height
            );
        }
        if (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(4))
            .is_none()
        {
            resize_failure!("Output image {}x{} is too large", width, height);
        }
        let copy = RgbaImage::from_bitmap(source)?;
        if (copy.width(), copy.height()) == (width, height) {
            return Ok(copy);
        }

        let (src_width, src_height) = (copy.width(), copy.height());
        let src_image = match fr::images::Image::from_vec_u8(
            src_width,
            src_height,
            copy.into_rgba_data(),
            fr::PixelType::U8x4,
        ) {
            Ok(src_image) => src_image,
            Err(error) => {
                resize_failure!("Can't wrap source pixels: {}", error)
            }
        };
        let mut dst_image =
            fr::images::Image::new(width, height, fr::PixelType::U8x4);
        let options = fr::ResizeOptions::new().resize_alg(
            fr::ResizeAlg::Convolution(self.filter.to_fast_filter()),
        );
        let mut resizer = fr::Resizer::new();
        if let Err(error) =
            resizer.resize(&src_image, &mut dst_image, Some(&options))
        {
            resize_failure!(
                "Resizing {}x{} to {}x{} failed: {}",
                src_width,
                src_height,
                width,
                height,
                error
            );
        }
        RgbaImage::from_rgba_data(width, height, dst_image.into_vec())
    }
}

//===========================================================================//


//===========================================================================//
