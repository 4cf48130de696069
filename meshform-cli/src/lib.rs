//! Command-line front end: parse transform parameters and apply them to a mesh.
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use meshform_core::{TransformParams, Vector3};

pub mod report;

pub use report::write_report;

pub const USAGE: &str = "\
Usage: meshform [OPTIONS]

Options:
  --scale X,Y,Z       per-axis scaling factors (default 1,1,1)
  --rotate X,Y,Z      rotation angles in degrees (default 1,1,1 = no rotation)
  --translate X,Y,Z   translation offsets (default 0,0,0)
  --params FILE       JSON file with \"scaling\", \"rotation\", \"translation\" arrays
  --size S            edge length of the cube to transform (default 2)
  -h, --help          print this message";

/// Parsed command line.
#[derive(Debug, Clone, PartialEq)]
pub struct CliArgs {
    pub scale: Option<Vector3>,
    pub rotate: Option<Vector3>,
    pub translate: Option<Vector3>,
    pub params_file: Option<PathBuf>,
    pub size: f32,
    pub help: bool,
}

impl Default for CliArgs {
    fn default() -> Self {
        Self {
            scale: None,
            rotate: None,
            translate: None,
            params_file: None,
            size: 2.0,
            help: false,
        }
    }
}

/// Parse arguments, excluding the program name.
pub fn parse_args<I>(args: I) -> Result<CliArgs>
where
    I: IntoIterator<Item = String>,
{
    let mut parsed = CliArgs::default();
    let mut args = args.into_iter();

    while let Some(flag) = args.next() {
        if flag == "-h" || flag == "--help" {
            parsed.help = true;
            continue;
        }

        let value = args
            .next()
            .with_context(|| format!("missing value for {flag}"))?;
        match flag.as_str() {
            "--scale" => parsed.scale = Some(parse_vector(&value, &flag)?),
            "--rotate" => parsed.rotate = Some(parse_vector(&value, &flag)?),
            "--translate" => parsed.translate = Some(parse_vector(&value, &flag)?),
            "--params" => parsed.params_file = Some(PathBuf::from(value)),
            "--size" => {
                parsed.size = value
                    .parse()
                    .with_context(|| format!("invalid cube size {value:?}"))?;
                if !(parsed.size.is_finite() && parsed.size > 0.0) {
                    bail!("cube size must be a positive number, got {value}");
                }
            }
            _ => bail!("unknown option {flag}\n\n{USAGE}"),
        }
    }

    Ok(parsed)
}

/// Parse "x,y,z" into a vector.
pub fn parse_vector(value: &str, flag: &str) -> Result<Vector3> {
    let components = value
        .split(',')
        .map(|c| c.trim().parse::<f32>())
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("invalid number in {flag} {value:?}"))?;
    let vector = Vector3::from_slice(&components).with_context(|| format!("{flag} {value:?}"))?;
    if !vector.is_finite() {
        bail!("{flag} components must be finite, got {value:?}");
    }
    Ok(vector)
}

/// Load transform parameters from a JSON file.
pub fn load_params(path: &Path) -> Result<TransformParams> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read params file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("failed to parse params file {}", path.display()))
}

/// Combine the params file (if any) with command-line overrides.
pub fn resolve_params(args: &CliArgs) -> Result<TransformParams> {
    let mut params = match &args.params_file {
        Some(path) => {
            let params = load_params(path)?;
            log::debug!("loaded {params:?} from {}", path.display());
            params
        }
        None => TransformParams::default(),
    };

    if let Some(scale) = args.scale {
        params.scaling = scale;
    }
    if let Some(rotate) = args.rotate {
        params.rotation = rotate;
    }
    if let Some(translate) = args.translate {
        params.translation = translate;
    }

    Ok(params)
}
