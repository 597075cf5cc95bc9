use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use image::GrayImage;
use pyramid_blend::{
    Downsample, Image, LaplacianPyramid, PyramidConfig, blend_pyramids_u8, mask_for_level,
    seam_band, to_u8_saturating, validate_roundtrip,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pyrblend")]
#[command(about = "Laplacian pyramid round trips and seam blending of grayscale images")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build and collapse a pyramid, reporting the reconstruction error
    #[command(name = "roundtrip")]
    RoundTrip(RoundTripArgs),
    /// Blend two same-sized images along a vertical seam
    #[command(name = "blend")]
    Blend(BlendArgs),
    /// Write the seam mask of one pyramid level as an 8-bit image
    #[command(name = "mask")]
    Mask(MaskArgs),
}

#[derive(Args, Debug, Clone)]
struct PyramidArgs {
    /// JSON file with a (partial) pyramid configuration
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of pyramid levels, residual included
    #[arg(long)]
    levels: Option<usize>,
    /// Per-level scale factor in (0, 1)
    #[arg(long)]
    ratio: Option<f32>,
    #[arg(long, value_enum)]
    downsample: Option<DownsampleArg>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum DownsampleArg {
    Bilinear,
    Area,
}

impl From<DownsampleArg> for Downsample {
    fn from(arg: DownsampleArg) -> Self {
        match arg {
            DownsampleArg::Bilinear => Downsample::Bilinear,
            DownsampleArg::Area => Downsample::Area,
        }
    }
}

#[derive(Args, Debug, Clone)]
struct RoundTripArgs {
    #[arg(long, required = true)]
    input: PathBuf,
    #[arg(long, default_value = "out/roundtrip")]
    out: PathBuf,
    #[command(flatten)]
    pyramid: PyramidArgs,
}

#[derive(Args, Debug, Clone)]
struct BlendArgs {
    /// Image kept left of the seam
    #[arg(long, required = true)]
    left: PathBuf,
    /// Image kept right of the seam
    #[arg(long, required = true)]
    right: PathBuf,
    #[arg(long, required = true)]
    out: PathBuf,
    /// Write every level of both input pyramids and the blend to this directory
    #[arg(long)]
    dump_levels: Option<PathBuf>,
    /// Report the round-trip error of both inputs before blending
    #[arg(long, default_value_t = false)]
    validate: bool,
    #[command(flatten)]
    pyramid: PyramidArgs,
}

#[derive(Args, Debug, Clone)]
struct MaskArgs {
    #[arg(long, required = true)]
    width: usize,
    #[arg(long, required = true)]
    height: usize,
    #[arg(long, default_value_t = 0)]
    level: usize,
    #[arg(long, required = true)]
    out: PathBuf,
}

#[derive(Debug, Clone, Serialize)]
struct MetaLevels {
    levels: usize,
    resize_ratio: f32,
    level_sizes: Vec<[usize; 2]>,
    visualization: &'static str,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.cmd {
        Command::RoundTrip(args) => run_roundtrip(args),
        Command::Blend(args) => run_blend(args),
        Command::Mask(args) => run_mask(args),
    }
}

fn run_roundtrip(args: RoundTripArgs) -> Result<()> {
    let cfg = resolve_config(&args.pyramid)?;
    let img = load_input_u8(&args.input)?;
    fs::create_dir_all(&args.out)
        .with_context(|| format!("creating output directory {}", args.out.display()))?;

    let rt = validate_roundtrip(&img.as_view(), &cfg)
        .with_context(|| format!("round trip of {}", args.input.display()))?;
    match rt.report.psnr_db {
        Some(psnr_db) => info!(mse = rt.report.mse, psnr_db, "reconstruction error"),
        None => info!(mse = rt.report.mse, "lossless reconstruction"),
    }

    save_u8_image(args.out.join("restored.png"), &rt.restored)?;
    write_json(args.out.join("report.json"), &rt.report)?;
    info!(out = %args.out.display(), "round trip written");
    Ok(())
}

fn run_blend(args: BlendArgs) -> Result<()> {
    let cfg = resolve_config(&args.pyramid)?;
    let left = load_input_u8(&args.left)?;
    let right = load_input_u8(&args.right)?;
    if left.shape() != right.shape() {
        bail!(
            "input dimensions differ: left is {}x{}, right is {}x{}.",
            left.width(),
            left.height(),
            right.width(),
            right.height()
        );
    }

    if args.validate {
        for (name, img) in [("left", &left), ("right", &right)] {
            let rt = validate_roundtrip(&img.as_view(), &cfg)
                .with_context(|| format!("round trip of {name} input"))?;
            info!(input = name, mse = rt.report.mse, "round-trip fidelity");
        }
    }

    let result = blend_pyramids_u8(&left.as_view(), &right.as_view(), &cfg)
        .context("blending input pyramids")?;

    if let Some(dir) = &args.dump_levels {
        for (name, pyr) in [
            ("left", &result.left),
            ("right", &result.right),
            ("blended", &result.blended),
        ] {
            dump_levels(&dir.join(name), pyr)?;
        }
        info!(dir = %dir.display(), "pyramid levels written");
    }

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating output directory {}", parent.display()))?;
    }
    save_u8_image(args.out.clone(), &result.reconstruct())?;
    info!(out = %args.out.display(), "blended image written");
    Ok(())
}

fn run_mask(args: MaskArgs) -> Result<()> {
    if args.width == 0 || args.height == 0 {
        bail!("mask size must be non-zero, got {}x{}.", args.width, args.height);
    }
    let band = seam_band(args.width, args.level);
    if band.start < 0 || band.end() > args.width as isize {
        warn!(
            level = args.level,
            start = band.start,
            end = band.end(),
            "seam band extends past the image and is clipped"
        );
    }

    let mask = mask_for_level(args.width, args.height, args.level);
    let scaled = mask.map(|&w| w * 255.0);
    save_u8_image(args.out.clone(), &to_u8_saturating(&scaled.as_view()))?;
    info!(out = %args.out.display(), level = args.level, "mask written");
    Ok(())
}

/// File values first, then explicit flags on top.
fn resolve_config(args: &PyramidArgs) -> Result<PyramidConfig> {
    let mut cfg = match &args.config {
        Some(path) => {
            ensure_file_exists(path, "config")?;
            read_json(path)?
        }
        None => PyramidConfig::default(),
    };
    if let Some(levels) = args.levels {
        cfg.levels = levels;
    }
    if let Some(ratio) = args.ratio {
        cfg.resize_ratio = ratio;
    }
    if let Some(downsample) = args.downsample {
        cfg.downsample = downsample.into();
    }
    cfg.validate().context("invalid pyramid configuration")?;
    Ok(cfg)
}

fn dump_levels(dir: &Path, pyr: &LaplacianPyramid) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("creating output directory {}", dir.display()))?;

    let mut sizes = Vec::with_capacity(pyr.num_levels());
    for (i, level) in pyr.levels().iter().enumerate() {
        sizes.push([level.width(), level.height()]);
        let vis = f32_to_u8_vis(level.data());
        save_luma_raw(
            dir.join(format!("level_{i}.png")),
            level.width(),
            level.height(),
            vis,
        )?;
    }

    write_json(
        dir.join("meta.json"),
        &MetaLevels {
            levels: pyr.num_levels(),
            resize_ratio: pyr.resize_ratio(),
            level_sizes: sizes,
            visualization: "per-level min/max normalized to 0..255",
        },
    )
}

fn load_input_u8(path: &Path) -> Result<Image<u8>> {
    ensure_file_exists(path, "input")?;
    let dyn_img =
        image::open(path).with_context(|| format!("opening input image {}", path.display()))?;
    let luma = dyn_img.to_luma8();
    let (w, h) = luma.dimensions();
    let data = luma.into_raw();

    Image::from_vec(w as usize, h as usize, data)
        .with_context(|| format!("constructing image from {}", path.display()))
}

fn save_u8_image(path: PathBuf, img: &Image<u8>) -> Result<()> {
    save_luma_raw(path, img.width(), img.height(), img.data().to_vec())
}

fn save_luma_raw(path: PathBuf, width: usize, height: usize, data: Vec<u8>) -> Result<()> {
    let gray = GrayImage::from_raw(width as u32, height as u32, data)
        .context("constructing GrayImage from raw bytes")?;
    gray.save(&path)
        .with_context(|| format!("saving image {}", path.display()))
}

/// Band-pass levels are signed, so every level is stretched to its own range.
fn f32_to_u8_vis(data: &[f32]) -> Vec<u8> {
    if data.is_empty() {
        return Vec::new();
    }

    let mut min_v = f32::INFINITY;
    let mut max_v = f32::NEG_INFINITY;
    for &v in data {
        min_v = min_v.min(v);
        max_v = max_v.max(v);
    }

    if (max_v - min_v).abs() < 1e-12 {
        return vec![0u8; data.len()];
    }

    let scale = 255.0 / (max_v - min_v);
    data.iter()
        .map(|&v| ((v - min_v) * scale).round().clamp(0.0, 255.0) as u8)
        .collect()
}

fn write_json(path: PathBuf, value: &impl Serialize) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("serializing json")?;
    fs::write(&path, bytes).with_context(|| format!("writing json {}", path.display()))
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&data).with_context(|| format!("parsing json {}", path.display()))
}

fn ensure_file_exists(path: &Path, what: &str) -> Result<()> {
    if !path.exists() {
        bail!("{} file does not exist: {}", what, path.display());
    }
    if !path.is_file() {
        bail!("{} path is not a file: {}", what, path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Cli, Command, PyramidArgs, f32_to_u8_vis, resolve_config};

    #[test]
    fn vis_stretches_signed_levels() {
        assert_eq!(f32_to_u8_vis(&[-10.0, 0.0, 10.0]), vec![0, 128, 255]);
        assert_eq!(f32_to_u8_vis(&[3.0, 3.0]), vec![0, 0]);
        assert!(f32_to_u8_vis(&[]).is_empty());
    }

    #[test]
    fn flags_override_defaults() {
        let args = PyramidArgs {
            config: None,
            levels: Some(3),
            ratio: Some(0.6),
            downsample: None,
        };
        let cfg = resolve_config(&args).expect("valid config");
        assert_eq!(cfg.levels, 3);
        assert_eq!(cfg.resize_ratio, 0.6);

        let bad = PyramidArgs {
            levels: Some(0),
            ..args
        };
        assert!(resolve_config(&bad).is_err());
    }

    #[test]
    fn blend_command_parses() {
        let argv = "pyrblend blend --left a.png --right b.png --out c.png --levels 4 --downsample area --validate";
        let cli = Cli::try_parse_from(argv.split_whitespace()).expect("valid arguments");
        let Command::Blend(args) = cli.cmd else {
            panic!("expected blend subcommand");
        };
        assert!(args.validate);
        assert_eq!(args.pyramid.levels, Some(4));
        assert!(args.dump_levels.is_none());
    }
}
