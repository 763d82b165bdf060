use std::env;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chain_dp::problems::stereo::{
    BoundaryPolicy, DisparityMap, ImageView, ScanlineStereo, StereoParameters,
};
use chain_dp::{Algorithm, StereoError};
use image::{GrayImage, ImageBuffer, Luma};

fn main() {
    let options = match Options::parse(env::args().skip(1)) {
        Ok(opts) => opts,
        Err(err) => {
            eprintln!("scanline_stereo: {err}");
            Options::print_help();
            std::process::exit(2);
        }
    };

    #[cfg(feature = "tracing")]
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(&options) {
        eprintln!("scanline_stereo: {err}");
        std::process::exit(1);
    }
}

#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error("{}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error(transparent)]
    Stereo(#[from] StereoError),
    #[error("image dimensions {0}x{1} exceed the output format")]
    Dimensions(usize, usize),
}

fn run(options: &Options) -> Result<(), RunError> {
    let left = load(&options.left)?;
    let right = load(&options.right)?;

    let params = StereoParameters::new(options.max_disparity, options.smoothness)
        .with_boundary(options.boundary)
        .with_algorithm(options.algorithm);
    let stereo = ScanlineStereo::<u16>::new(params)?;

    let (width, height) = (left.width() as usize, left.height() as usize);
    let left_view = ImageView::new(width, height, left.as_raw())?;
    let right_view = ImageView::new(
        right.width() as usize,
        right.height() as usize,
        right.as_raw(),
    )?;

    let start = Instant::now();
    let map = stereo.compute(&left_view, &right_view)?;
    let elapsed = start.elapsed().as_secs_f64();
    eprintln!(
        "scanline_stereo: {width}x{height}, disparities 0..={}, {} in {elapsed:.3}s",
        options.max_disparity, options.algorithm
    );

    save(&map, options)
}

fn load(path: &Path) -> Result<GrayImage, RunError> {
    image::open(path)
        .map(|img| img.to_luma8())
        .map_err(|source| RunError::Image {
            path: path.to_path_buf(),
            source,
        })
}

fn save(map: &DisparityMap<u16>, options: &Options) -> Result<(), RunError> {
    let (width, height) = (map.width(), map.height());
    let dims = u32::try_from(width)
        .ok()
        .zip(u32::try_from(height).ok())
        .ok_or(RunError::Dimensions(width, height))?;
    let result = if options.stretch || options.max_disparity <= usize::from(u8::MAX) {
        let samples = if options.stretch {
            map.to_u8_stretched(options.max_disparity)
        } else {
            map.to_u8_levels()
        };
        GrayImage::from_raw(dims.0, dims.1, samples)
            .ok_or(RunError::Dimensions(width, height))?
            .save(&options.output)
    } else {
        ImageBuffer::<Luma<u16>, Vec<u16>>::from_raw(dims.0, dims.1, map.to_u16_levels())
            .ok_or(RunError::Dimensions(width, height))?
            .save(&options.output)
    };
    result.map_err(|source| RunError::Image {
        path: options.output.clone(),
        source,
    })
}

struct Options {
    left: PathBuf,
    right: PathBuf,
    output: PathBuf,
    max_disparity: usize,
    smoothness: f32,
    algorithm: Algorithm,
    boundary: BoundaryPolicy,
    stretch: bool,
}

impl Options {
    fn parse<I, T>(args: I) -> Result<Self, String>
    where
        I: Iterator<Item = T>,
        T: Into<String>,
    {
        let mut positional = Vec::new();
        let mut boundary = BoundaryPolicy::default();
        let mut stretch = false;

        let mut args = args.map(Into::<String>::into);
        while let Some(arg) = args.next() {
            if arg == "--help" || arg == "-h" {
                Options::print_help();
                std::process::exit(0);
            } else if let Some(value) = arg.strip_prefix("--boundary=") {
                boundary = parse_boundary(value)?;
            } else if arg == "--boundary" {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value after --boundary".to_string())?;
                boundary = parse_boundary(&value)?;
            } else if arg == "--stretch" {
                stretch = true;
            } else if arg.starts_with("--") {
                return Err(format!("unrecognized argument '{arg}'"));
            } else {
                positional.push(arg);
            }
        }

        let [left, right, output, max_disparity, smoothness, algorithm]: [String; 6] = positional
            .try_into()
            .map_err(|found: Vec<String>| {
                format!("expected 6 positional arguments but {} provided", found.len())
            })?;

        Ok(Self {
            left: left.into(),
            right: right.into(),
            output: output.into(),
            max_disparity: max_disparity
                .parse()
                .map_err(|_| "max disparity must be a positive integer".to_string())?,
            smoothness: smoothness
                .parse()
                .map_err(|_| "smoothness must be a non-negative number".to_string())?,
            algorithm: algorithm.parse()?,
            boundary,
            stretch,
        })
    }

    fn print_help() {
        println!(
            "\
Usage: scanline_stereo [options] <left> <right> <output> <max-disparity> <smoothness> <compact|fast>

Computes a disparity map for a rectified grayscale pair, one scanline at a time.
Disparities up to 255 are written as 8-bit levels, larger ranges as 16-bit.

Options:
  --boundary <forbid|penalty=<c>|replicate>
                                Cost of disparities reaching past the right image (default: forbid)
  --stretch                     Scale disparities to the full 8-bit range for viewing
  -h, --help                    Print this help message

Examples:
  scanline_stereo left.png right.png disp.png 16 20 fast
  scanline_stereo --boundary penalty=40 --stretch left.png right.png disp.png 64 8 compact
"
        );
    }
}

fn parse_boundary(value: &str) -> Result<BoundaryPolicy, String> {
    match value {
        "forbid" => Ok(BoundaryPolicy::Forbid),
        "replicate" => Ok(BoundaryPolicy::Replicate),
        other => other
            .strip_prefix("penalty=")
            .and_then(|cost| cost.parse().ok())
            .map(BoundaryPolicy::Penalty)
            .ok_or_else(|| {
                format!("the boundary must be one of 'forbid', 'penalty=<c>' or 'replicate' but '{other}' provided")
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Options, String> {
        Options::parse(args.iter().copied())
    }

    #[test]
    fn parses_positionals_and_flags() {
        let options = parse(&[
            "--boundary",
            "penalty=12.5",
            "l.png",
            "r.png",
            "out.png",
            "300",
            "0.5",
            "compact",
            "--stretch",
        ])
        .unwrap();
        assert_eq!(options.left, PathBuf::from("l.png"));
        assert_eq!(options.output, PathBuf::from("out.png"));
        assert_eq!(options.max_disparity, 300);
        assert_eq!(options.smoothness, 0.5);
        assert_eq!(options.algorithm, Algorithm::Compact);
        assert_eq!(options.boundary, BoundaryPolicy::Penalty(12.5));
        assert!(options.stretch);
    }

    #[test]
    fn rejects_bad_usage() {
        assert!(parse(&["l.png", "r.png", "out.png", "16", "1.0"]).is_err());
        assert!(parse(&["l.png", "r.png", "out.png", "-3", "1.0", "fast"]).is_err());
        assert!(parse(&["l.png", "r.png", "out.png", "16", "1.0", "slow"]).is_err());
        assert!(parse(&["--verbose"]).is_err());
        assert!(parse_boundary("penalty=").is_err());
        assert_eq!(parse_boundary("replicate"), Ok(BoundaryPolicy::Replicate));
    }
}
