use crate::codec::{ImageCodec, PngCodec};
use crate::error::{Error, Result};
use crate::icondir::{IconDir, IconDirEntry};
use crate::image::Bitmap;
use crate::options::IconOptions;
use std::io::{Read, Write};

//===========================================================================//

/// Converts bitmaps into ICO files with one PNG-embedded entry per
/// configured size.
#[derive(Clone, Debug)]
pub struct IcoEncoder<C = PngCodec> {
    options: IconOptions,
    codec: C,
}

impl IcoEncoder<PngCodec> {
    /// Creates an encoder that resizes with `options.filter` and embeds PNG
    /// payloads.
    pub fn new(options: IconOptions) -> IcoEncoder<PngCodec> {
        let codec = PngCodec::new(options.filter);
        IcoEncoder { options, codec }
    }
}

impl Default for IcoEncoder<PngCodec> {
    fn default() -> IcoEncoder<PngCodec> {
        IcoEncoder::new(IconOptions::default())
    }
}

impl<C: ImageCodec> IcoEncoder<C> {
    /// Creates an encoder that uses `codec` for resizing and payload
    /// encoding.  `options.filter` is ignored.
    pub fn with_codec(options: IconOptions, codec: C) -> IcoEncoder<C> {
        IcoEncoder { options, codec }
    }

    /// Returns the options this encoder was created with.
    pub fn options(&self) -> &IconOptions {
        &self.options
    }

    /// Returns the codec used by this encoder.
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Resizes and encodes `source` once per configured size and collects
    /// the payloads into a directory, without writing anything.
    pub fn build(&self, source: &dyn Bitmap) -> Result<IconDir> {
        if source.is_empty() {
            invalid_input!(
                "Source image is empty ({}x{})",
                source.width(),
                source.height()
            );
        }
        self.options.validate()?;
        let mut icondir = IconDir::new();
        for &size in self.options.sizes.iter() {
            let resized = self.codec.resample(source, size, size)?;
            if resized.width() != size || resized.height() != size {
                return Err(Error::Resize(format!(
                    "Resampler returned a {}x{} image (expected {}x{})",
                    resized.width(),
                    resized.height(),
                    size,
                    size
                )));
            }
            let data = self.codec.encode(&resized)?;
            log::debug!(
                "encoded {}x{} icon entry ({} bytes)",
                size,
                size,
                data.len()
            );
            icondir.add_entry(IconDirEntry::new(size, size, data)?);
        }
        // Fails on oversized files before the caller's sink sees any bytes.
        icondir.update_offsets()?;
        Ok(icondir)
    }

    /// Writes a complete ICO file for `source` to `writer`.  Nothing is
    /// written unless every size was resized and encoded successfully; if
    /// the writer itself fails part way, what it already received is left
    /// as is.
    pub fn encode<W: Write>(
        &self,
        source: &dyn Bitmap,
        writer: W,
    ) -> Result<()> {
        let icondir = match self.build(source) {
            Ok(icondir) => icondir,
            Err(error) => {
                log::warn!("icon conversion rejected: {}", error);
                return Err(error);
            }
        };
        icondir.write(writer)?;
        log::info!(
            "wrote ICO file with {} entries ({} bytes)",
            icondir.entries().len(),
            icondir.file_len()
        );
        Ok(())
    }

    /// Returns a complete ICO file for `source` as bytes.
    pub fn encode_to_vec(&self, source: &dyn Bitmap) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        self.encode(source, &mut output)?;
        Ok(output)
    }

    /// Decodes an image from `reader` with the codec and writes it to
    /// `writer` as an ICO file.
    pub fn encode_reader<R: Read, W: Write>(
        &self,
        mut reader: R,
        writer: W,
    ) -> Result<()> {
        let source = self.codec.decode(&mut reader)?;
        self.encode(&source, writer)
    }
}

//===========================================================================//


//===========================================================================//
