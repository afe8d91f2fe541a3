//! Packs a logo image into a firmware-ready byte array.
//!
//! The image is fitted to the target canvas, binarized, packed 8 pixels
//! per byte and written out as a C array literal with the final
//! dimensions recorded in a trailing comment.

use std::path::PathBuf;

use clap::Parser;
use image::GenericImageView;
use watsan_print::{Error, LogoBitmap};

#[derive(Parser, Debug)]
#[command(name = "makelogo", about = "Generate a firmware logo array from an image")]
struct Args {
    /// Source image (PNG, BMP, ...)
    input: PathBuf,
    /// Canvas width in pixels, must be a multiple of 8
    #[arg(long, default_value_t = 256)]
    width: u32,
    /// Maximum height in pixels
    #[arg(long, default_value_t = 96)]
    height: u32,
    /// Array name in the generated source
    #[arg(long, default_value = "logo")]
    name: String,
    /// Output file
    #[arg(long, default_value = "output.txt")]
    out: PathBuf
}

fn run(args: Args) -> Result<(), Error> {
    let source = image::open(&args.input).map_err(Error::ImageError)?;
    let (orig_width, orig_height) = source.dimensions();

    let logo = LogoBitmap::pack(&source, args.width, args.height)?;

    let mut rendered = logo.to_progmem(&args.name);
    rendered += &format!(
        "// source={} original={}x{} final={}x{}\n",
        args.input.display(), orig_width, orig_height, logo.width(), logo.height()
    );
    std::fs::write(&args.out, rendered).map_err(Error::IoError)?;

    println!(
        "Wrote logo array to {} (width={} height={})",
        args.out.display(), logo.width(), logo.height()
    );
    Ok(())
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
