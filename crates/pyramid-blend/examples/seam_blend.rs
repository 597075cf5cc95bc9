//! Demo: seam-blend two grayscale images and time each stage.
//!
//! Both inputs are decoded as 8-bit luma and must have the same size. Each
//! image's pyramid round trip is reported before blending, then the blended
//! result is written as a PNG next to the left input.
//!
//! Run from the workspace root:
//!   cargo run -p pyramid-blend --example seam_blend -- --help
//!   cargo run -p pyramid-blend --example seam_blend -- --left a.png --right b.png

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;
use image::{GrayImage, ImageReader};
use pyramid_blend::{Image, PyramidConfig, blend_pyramids_u8, validate_roundtrip};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(about = "Blend two grayscale images along a vertical seam")]
struct Args {
    /// Image shown left of the seam
    #[arg(long)]
    left: PathBuf,

    /// Image shown right of the seam
    #[arg(long)]
    right: PathBuf,

    /// Number of pyramid levels, residual included
    #[arg(long, default_value_t = 5)]
    levels: usize,

    /// Per-level scale factor in (0, 1)
    #[arg(long, default_value_t = 0.5)]
    ratio: f32,

    /// Output PNG (default: <left stem>_blend.png next to the left input)
    #[arg(long)]
    out: Option<PathBuf>,
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn load_gray(path: &Path) -> Result<Image<u8>> {
    let gray = ImageReader::open(path)
        .with_context(|| format!("opening {}", path.display()))?
        .decode()
        .with_context(|| format!("decoding {}", path.display()))?
        .into_luma8();
    let (w, h) = (gray.width() as usize, gray.height() as usize);
    Image::from_vec(w, h, gray.into_raw()).context("building Image from luma buffer")
}

fn default_out(left: &Path) -> PathBuf {
    let stem = left.file_stem().unwrap_or_default().to_string_lossy();
    let dir = left.parent().unwrap_or(Path::new("."));
    dir.join(format!("{stem}_blend.png"))
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    let out_path = args.out.clone().unwrap_or_else(|| default_out(&args.left));

    let left = load_gray(&args.left)?;
    let right = load_gray(&args.right)?;
    if left.shape() != right.shape() {
        bail!(
            "input sizes differ: {:?} vs {:?}",
            left.shape(),
            right.shape()
        );
    }
    println!(
        "loaded {} and {}: {}x{}",
        args.left.display(),
        args.right.display(),
        left.width(),
        left.height()
    );

    let cfg = PyramidConfig {
        levels: args.levels,
        resize_ratio: args.ratio,
        ..PyramidConfig::default()
    };

    for (name, img) in [("left", &left), ("right", &right)] {
        let rt = validate_roundtrip(&img.as_view(), &cfg).context("round trip")?;
        println!("  {name}: round-trip mse {:.6}", rt.report.mse);
    }

    let t0 = Instant::now();
    let result = blend_pyramids_u8(&left.as_view(), &right.as_view(), &cfg).context("blending")?;
    let blended = result.reconstruct();
    let elapsed_ms = t0.elapsed().as_secs_f64() * 1e3;
    println!("blend + reconstruct: {elapsed_ms:.2} ms");

    let (w, h) = blended.shape();
    let out = GrayImage::from_raw(w as u32, h as u32, blended.into_vec())
        .context("building output buffer")?;
    out.save(&out_path)
        .with_context(|| format!("writing {}", out_path.display()))?;
    println!("result written to {}", out_path.display());
    Ok(())
}
