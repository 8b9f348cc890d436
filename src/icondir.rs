use crate::error::Result;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Seek, SeekFrom, Write};

//===========================================================================//

// The value of the ICONDIR type field for icon (rather than cursor) files.
const ICON_RESOURCE_TYPE: u16 = 1;

/// The size of the ICONDIR header, in bytes.
pub const HEADER_LEN: u32 = 6;

/// The size of one ICONDIRENTRY record, in bytes.
pub const ENTRY_LEN: u32 = 16;

/// The largest width or height an entry may declare.  A size of 256 is
/// stored as a zero byte in the directory.
pub const MAX_SIZE: u32 = 256;

// Every entry holds 8-bit RGBA data.
const BITS_PER_PIXEL: u16 = 32;

// The signature that all PNG files start with.
const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G'];

//===========================================================================//

/// A collection of images; the contents of a single ICO file.
#[derive(Clone, Debug, Default)]
pub struct IconDir {
    entries: Vec<IconDirEntry>,
}

impl IconDir {
    /// Creates a new, empty collection of icons.
    pub fn new() -> IconDir {
        IconDir { entries: Vec::new() }
    }

    /// Returns the entries in this collection.
    pub fn entries(&self) -> &[IconDirEntry] {
        &self.entries
    }

    /// Adds an entry to the end of the collection.
    pub fn add_entry(&mut self, entry: IconDirEntry) {
        self.entries.push(entry);
    }

    /// Returns the file offset of each entry's payload, in directory order.
    /// Returns an error if there are more entries than the header can count
    /// or if the file would be too large for 32-bit offsets.
    pub fn data_offsets(&self) -> Result<Vec<u32>> {
        if self.entries.len() > (u16::MAX as usize) {
            invalid_input!(
                "Too many entries in IconDir (was {}, but max is {})",
                self.entries.len(),
                u16::MAX
            );
        }
        let mut offsets = Vec::with_capacity(self.entries.len());
        let mut data_offset = (HEADER_LEN as u64)
            + (ENTRY_LEN as u64) * (self.entries.len() as u64);
        for entry in self.entries.iter() {
            if data_offset > (u32::MAX as u64) {
                invalid_input!("ICO file too large for 32-bit offsets");
            }
            offsets.push(data_offset as u32);
            data_offset += entry.data.len() as u64;
        }
        if data_offset > (u32::MAX as u64) {
            invalid_input!("ICO file too large for 32-bit offsets");
        }
        Ok(offsets)
    }

    /// Records each entry's payload offset (see
    /// [`IconDirEntry::data_offset`]) as [`IconDir::write`] will lay them
    /// out.
    pub fn update_offsets(&mut self) -> Result<()> {
        let offsets = self.data_offsets()?;
        for (entry, offset) in self.entries.iter_mut().zip(offsets) {
            entry.data_offset = offset;
        }
        Ok(())
    }

    /// Returns the total size of the ICO file this collection serializes to.
    pub fn file_len(&self) -> u64 {
        let payloads: u64 =
            self.entries.iter().map(|entry| entry.data.len() as u64).sum();
        (HEADER_LEN as u64)
            + (ENTRY_LEN as u64) * (self.entries.len() as u64)
            + payloads
    }

    /// Parses an ICO file's header and directory and loads each entry's raw
    /// payload bytes.  Payloads are not decoded.
    pub fn read<R: Read + Seek>(mut reader: R) -> Result<IconDir> {
        let reserved = reader.read_u16::<LittleEndian>()?;
        if reserved != 0 {
            invalid_data!(
                "Invalid reserved field value in ICONDIR \
                 (was {}, but must be 0)",
                reserved
            );
        }
        let restype = reader.read_u16::<LittleEndian>()?;
        if restype != ICON_RESOURCE_TYPE {
            invalid_data!(
                "Unsupported resource type (was {}, but must be {})",
                restype,
                ICON_RESOURCE_TYPE
            );
        }
        let num_entries = reader.read_u16::<LittleEndian>()? as usize;
        let mut entries = Vec::<IconDirEntry>::with_capacity(num_entries);
        let mut spans = Vec::<(u32, u32)>::with_capacity(num_entries);
        for _ in 0..num_entries {
            let width_byte = reader.read_u8()?;
            let height_byte = reader.read_u8()?;
            let num_colors = reader.read_u8()?;
            let reserved = reader.read_u8()?;
            if reserved != 0 {
                invalid_data!(
                    "Invalid reserved field value in ICONDIRENTRY \
                     (was {}, but must be 0)",
                    reserved
                );
            }
            let color_planes = reader.read_u16::<LittleEndian>()?;
            let bits_per_pixel = reader.read_u16::<LittleEndian>()?;
            let data_size = reader.read_u32::<LittleEndian>()?;
            let data_offset = reader.read_u32::<LittleEndian>()?;
            // A width/height byte of zero stands for 256.
            let width =
                if width_byte == 0 { MAX_SIZE } else { width_byte as u32 };
            let height =
                if height_byte == 0 { MAX_SIZE } else { height_byte as u32 };
            spans.push((data_offset, data_size));
            entries.push(IconDirEntry {
                width,
                height,
                num_colors,
                color_planes,
                bits_per_pixel,
                data_offset,
                data: Vec::new(),
            });
        }
        for (index, &(data_offset, data_size)) in spans.iter().enumerate() {
            reader.seek(SeekFrom::Start(data_offset as u64))?;
            let mut data = Vec::new();
            (&mut reader).take(data_size as u64).read_to_end(&mut data)?;
            if data.len() != data_size as usize {
                invalid_data!(
                    "Truncated image data for entry {} \
                     (was {} bytes, but directory says {})",
                    index,
                    data.len(),
                    data_size
                );
            }
            entries[index].data = data;
        }
        Ok(IconDir { entries })
    }

    /// Writes the ICO file: header, directory, then every payload in
    /// directory order.
    pub fn write<W: Write>(&self, mut writer: W) -> Result<()> {
        let offsets = self.data_offsets()?;
        writer.write_u16::<LittleEndian>(0)?; // reserved
        writer.write_u16::<LittleEndian>(ICON_RESOURCE_TYPE)?;
        writer.write_u16::<LittleEndian>(self.entries.len() as u16)?;
        for (entry, &data_offset) in self.entries.iter().zip(offsets.iter()) {
            // Only the low byte is stored, so 256 becomes zero.
            writer.write_u8((entry.width % 256) as u8)?;
            writer.write_u8((entry.height % 256) as u8)?;
            writer.write_u8(entry.num_colors)?;
            writer.write_u8(0)?; // reserved
            writer.write_u16::<LittleEndian>(entry.color_planes)?;
            writer.write_u16::<LittleEndian>(entry.bits_per_pixel)?;
            writer.write_u32::<LittleEndian>(entry.data.len() as u32)?;
            writer.write_u32::<LittleEndian>(data_offset)?;
        }
        for entry in self.entries.iter() {
            writer.write_all(&entry.data)?;
        }
        writer.flush()?;
        Ok(())
    }
}

//===========================================================================//

/// One entry in an ICO file; a single square or rectangular image.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IconDirEntry {
    width: u32,
    height: u32,
    num_colors: u8,
    color_planes: u16,
    bits_per_pixel: u16,
    data_offset: u32,
    data: Vec<u8>,
}

impl IconDirEntry {
    /// Creates an entry for a 32-bit PNG-embedded image of the given size.
    /// Returns an error if either dimension is outside `1..=256`.
    pub fn new(
        width: u32,
        height: u32,
        data: Vec<u8>,
    ) -> Result<IconDirEntry> {
        for &(name, value) in &[("width", width), ("height", height)] {
            if value == 0 || value > MAX_SIZE {
                invalid_input!(
                    "Invalid icon {} (was {}, but must be between 1 and {})",
                    name,
                    value,
                    MAX_SIZE
                );
            }
        }
        Ok(IconDirEntry {
            width,
            height,
            num_colors: 0,
            color_planes: 0,
            bits_per_pixel: BITS_PER_PIXEL,
            data_offset: 0,
            data,
        })
    }

    /// Returns the width of the image, in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the image, in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the number of palette colors (always 0 for entries created
    /// by this crate).
    pub fn num_colors(&self) -> u8 {
        self.num_colors
    }

    /// Returns the color-planes field.
    pub fn color_planes(&self) -> u16 {
        self.color_planes
    }

    /// Returns the bits-per-pixel (color depth) of the image.
    pub fn bits_per_pixel(&self) -> u16 {
        self.bits_per_pixel
    }

    /// Returns the payload offset from the start of the file.  Set by
    /// [`IconDir::read`] and [`IconDir::update_offsets`] (which the encoder
    /// calls); zero for a fresh entry.
    pub fn data_offset(&self) -> u32 {
        self.data_offset
    }

    /// Returns true if the payload is a PNG stream.
    pub fn is_png(&self) -> bool {
        self.data.starts_with(PNG_SIGNATURE)
    }

    /// Returns the raw, encoded image data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

//===========================================================================//


//===========================================================================//
