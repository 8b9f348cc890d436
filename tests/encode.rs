extern crate icoforge;

use icoforge::{Bitmap, Error, IconDir, IconOptions, IcoEncoder, RgbaImage};
use std::io::{self, Cursor, Write};

//===========================================================================//

/// A bitmap whose pixels were never loaded.
struct Unloaded;

impl Bitmap for Unloaded {
    fn width(&self) -> u32 {
        0
    }

    fn height(&self) -> u32 {
        0
    }

    fn pixel(&self, _x: u32, _y: u32) -> [u8; 4] {
        panic!("Unloaded bitmap has no pixels")
    }
}

/// A sink that counts the bytes it is given.
#[derive(Default)]
struct CountingSink {
    bytes: usize,
}

impl Write for CountingSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes += buf.len();
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A sink that rejects every write.
struct FullDisk;

impl Write for FullDisk {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::Other, "no space left on device"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn red_square() -> RgbaImage {
    RgbaImage::from_fn(16, 16, |_, _| [255, 0, 0, 255]).unwrap()
}

/// Left half fully transparent, right half opaque green.
fn half_transparent(size: u32) -> RgbaImage {
    RgbaImage::from_fn(size, size, |x, _| {
        if x < size / 2 {
            [0, 0, 0, 0]
        } else {
            [0, 255, 0, 255]
        }
    })
    .unwrap()
}

//===========================================================================//

#[test]
fn red_square_becomes_single_256_entry() {
    let source = red_square();
    let encoder = IcoEncoder::new(IconOptions::default());
    let output = encoder.encode_to_vec(&source).unwrap();

    let resized =
        icoforge::Resampler::default().resample(&source, 256, 256).unwrap();
    let mut png_data = Vec::new();
    resized.write_png(&mut png_data).unwrap();

    assert_eq!(output.len(), 6 + 16 + png_data.len());
    assert_eq!(&output[0..6], b"\x00\x00\x01\x00\x01\x00");
    // Width and height bytes of 256 are truncated to zero.
    assert_eq!(output[6], 0);
    assert_eq!(output[7], 0);
    assert_eq!(&output[8..10], b"\x00\x00");
    assert_eq!(&output[10..12], b"\x00\x00");
    assert_eq!(&output[12..14], b"\x20\x00");
    assert_eq!(&output[14..18], &(png_data.len() as u32).to_le_bytes());
    assert_eq!(&output[18..22], b"\x16\x00\x00\x00");
    assert_eq!(&output[22..], png_data.as_slice());

    let decoded = RgbaImage::read_png(&output[22..]).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (256, 256));
    for chunk in decoded.rgba_data().chunks(4) {
        assert_eq!(chunk, &[255, 0, 0, 255]);
    }
}

#[test]
fn convert_to_icon_uses_default_options() {
    let mut output = Vec::new();
    icoforge::convert_to_icon(&red_square(), &mut output).unwrap();
    let icondir = IconDir::read(Cursor::new(&output)).unwrap();
    assert_eq!(icondir.entries().len(), 1);
    assert_eq!(icondir.entries()[0].width(), 256);
    assert!(icondir.entries()[0].is_png());
}

#[test]
fn payloads_decode_to_requested_sizes() {
    let sizes = vec![16, 24, 32, 48, 64, 128, 256];
    let options = IconOptions::default().with_sizes(sizes.clone());
    let output =
        IcoEncoder::new(options).encode_to_vec(&half_transparent(40)).unwrap();
    let icondir = IconDir::read(Cursor::new(&output)).unwrap();
    assert_eq!(icondir.entries().len(), sizes.len());
    for (entry, &size) in icondir.entries().iter().zip(sizes.iter()) {
        assert_eq!((entry.width(), entry.height()), (size, size));
        assert_eq!(entry.bits_per_pixel(), 32);
        let image = RgbaImage::read_png(entry.data()).unwrap();
        assert_eq!((image.width(), image.height()), (size, size));
        // The outer corners are far from the edge between the two halves.
        assert_eq!(image.pixel(0, 0), [0, 0, 0, 0]);
        assert_eq!(image.pixel(size - 1, size - 1), [0, 255, 0, 255]);
    }
}

#[test]
fn same_size_entry_keeps_pixels_exactly() {
    let source = half_transparent(8);
    let options = IconOptions::default().with_sizes(vec![8]);
    let output = IcoEncoder::new(options).encode_to_vec(&source).unwrap();
    let icondir = IconDir::read(Cursor::new(&output)).unwrap();
    let image = RgbaImage::read_png(icondir.entries()[0].data()).unwrap();
    assert_eq!(image, source);
}

#[test]
fn offsets_match_reparsed_payloads() {
    let options = IconOptions::default().with_sizes(vec![256, 1, 48, 255]);
    let output =
        IcoEncoder::new(options).encode_to_vec(&half_transparent(20)).unwrap();
    let icondir = IconDir::read(Cursor::new(&output)).unwrap();
    let count = icondir.entries().len() as u32;
    let mut expected_offset = 6 + 16 * count;
    for entry in icondir.entries() {
        assert_eq!(entry.data_offset(), expected_offset);
        expected_offset += entry.data().len() as u32;
    }
    assert_eq!(output.len() as u32, expected_offset);
}

#[test]
fn empty_source_fails_without_writing() {
    let mut sink = CountingSink::default();
    let encoder = IcoEncoder::new(IconOptions::default());
    let result = encoder.encode(&Unloaded, &mut sink);
    assert!(matches!(result, Err(Error::InvalidInput(_))));
    assert_eq!(sink.bytes, 0);
}

#[test]
fn failing_sink_is_reported() {
    let encoder = IcoEncoder::new(IconOptions::default());
    let result = encoder.encode(&red_square(), FullDisk);
    match result {
        Err(Error::Sink(error)) => {
            assert_eq!(error.kind(), io::ErrorKind::Other)
        }
        other => panic!("expected a sink failure, got {:?}", other),
    }
}

#[test]
fn encoding_is_deterministic() {
    let source = half_transparent(33);
    let options = IconOptions::default().with_sizes(vec![16, 32, 256]);
    let encoder = IcoEncoder::new(options);
    let first = encoder.encode_to_vec(&source).unwrap();
    let second = encoder.encode_to_vec(&source).unwrap();
    assert_eq!(first, second);
}

#[test]
fn convert_reader_decodes_png() {
    let mut png_data = Vec::new();
    red_square().write_png(&mut png_data).unwrap();
    let mut output = Vec::new();
    icoforge::convert_reader_to_icon(png_data.as_slice(), &mut output)
        .unwrap();
    let encoder = IcoEncoder::new(IconOptions::default());
    let expected = encoder.encode_to_vec(&red_square()).unwrap();
    assert_eq!(output, expected);
}

#[test]
fn convert_reader_rejects_garbage() {
    let mut output = Vec::new();
    let result =
        icoforge::convert_reader_to_icon(&b"GIF89a"[..], &mut output);
    assert!(matches!(result, Err(Error::InvalidInput(_))));
    assert!(output.is_empty());
}

#[test]
fn convert_file_writes_icon() {
    let dir = std::env::temp_dir()
        .join(format!("icoforge-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let in_path = dir.join("input.png");
    let out_path = dir.join("output.ico");
    let mut png_file = std::fs::File::create(&in_path).unwrap();
    half_transparent(10).write_png(&mut png_file).unwrap();
    drop(png_file);

    let options = IconOptions::default().with_sizes(vec![32, 16]);
    icoforge::convert_file_to_icon(&in_path, &out_path, options).unwrap();
    let icondir =
        IconDir::read(std::fs::File::open(&out_path).unwrap()).unwrap();
    let sizes: Vec<u32> =
        icondir.entries().iter().map(|entry| entry.width()).collect();
    assert_eq!(sizes, vec![32, 16]);

    // A bad size leaves any previous output untouched.
    let options = IconOptions::default().with_sizes(vec![1000]);
    let before = std::fs::read(&out_path).unwrap();
    let result = icoforge::convert_file_to_icon(&in_path, &out_path, options);
    assert!(matches!(result, Err(Error::InvalidInput(_))));
    assert_eq!(std::fs::read(&out_path).unwrap(), before);

    std::fs::remove_dir_all(&dir).unwrap();
}

//===========================================================================//
