use clap::{App, Arg, SubCommand};
use std::fs;
use std::path::PathBuf;

//===========================================================================//

fn main() {
    env_logger::init();
    let matches = App::new("icotool")
        .version("0.1")
        .about("Converts PNG images into ICO files")
        .subcommand(
            SubCommand::with_name("create")
                .about("Creates an ICO file from a PNG file")
                .arg(
                    Arg::with_name("output")
                        .takes_value(true)
                        .value_name("PATH")
                        .short("o")
                        .long("output")
                        .help("Sets output path"),
                )
                .arg(
                    Arg::with_name("size")
                        .takes_value(true)
                        .multiple(true)
                        .number_of_values(1)
                        .value_name("PIXELS")
                        .short("s")
                        .long("size")
                        .help("Adds an image size (default: 256)"),
                )
                .arg(
                    Arg::with_name("filter")
                        .takes_value(true)
                        .possible_values(&["triangle", "bicubic", "lanczos3"])
                        .short("f")
                        .long("filter")
                        .help("Sets the resampling filter"),
                )
                .arg(Arg::with_name("image").required(true)),
        )
        .subcommand(
            SubCommand::with_name("list")
                .about("Lists icons in an ICO file")
                .arg(Arg::with_name("ico").required(true)),
        )
        .get_matches();
    if let Some(submatches) = matches.subcommand_matches("create") {
        let in_path = PathBuf::from(submatches.value_of("image").unwrap());
        let out_path = if let Some(path) = submatches.value_of("output") {
            PathBuf::from(path)
        } else {
            in_path.with_extension("ico")
        };
        let mut options = icoforge::IconOptions::default();
        if let Some(sizes) = submatches.values_of("size") {
            options = options.with_sizes(
                sizes.map(|size| size.parse::<u32>().unwrap()),
            );
        }
        options = options.with_filter(match submatches.value_of("filter") {
            Some("triangle") => icoforge::Filter::Triangle,
            Some("lanczos3") => icoforge::Filter::Lanczos3,
            _ => icoforge::Filter::Bicubic,
        });
        println!("Converting {:?} -> {:?}", in_path, out_path);
        icoforge::convert_file_to_icon(&in_path, &out_path, options).unwrap();
    } else if let Some(submatches) = matches.subcommand_matches("list") {
        let path = submatches.value_of("ico").unwrap();
        let file = fs::File::open(path).unwrap();
        let icondir = icoforge::IconDir::read(file).unwrap();
        for (index, entry) in icondir.entries().iter().enumerate() {
            let kind = if entry.is_png() { "PNG" } else { "BMP" };
            println!(
                "{:5}: {}x{} {}, {} bpp, {} bytes at offset {}",
                index,
                entry.width(),
                entry.height(),
                kind,
                entry.bits_per_pixel(),
                entry.data().len(),
                entry.data_offset()
            );
        }
    }
}

//===========================================================================//
