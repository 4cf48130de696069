//! meshform - apply scale, rotation and translation to a cube and print the result
//!
//! Logging is controlled with MESHFORM_LOG (default "info") and
//! MESHFORM_LOG_STYLE.

use std::env;
use std::io::{self, Write};

use anyhow::Result;
use meshform_cli::{parse_args, resolve_params, write_report, USAGE};
use meshform_core::{model_transform, Mesh};

fn main() -> Result<()> {
    let env = env_logger::Env::default()
        .filter_or("MESHFORM_LOG", "info")
        .write_style_or("MESHFORM_LOG_STYLE", "auto");
    env_logger::init_from_env(env);

    let args = parse_args(env::args().skip(1))?;
    if args.help {
        println!("{USAGE}");
        return Ok(());
    }

    let params = resolve_params(&args)?;
    let mesh = Mesh::cube(args.size);
    log::info!(
        "Transforming cube of size {} ({} vertices, {} normals)",
        args.size,
        mesh.vertices.len(),
        mesh.normals.len()
    );

    let transformed = model_transform(&mesh, &params);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, &params, &mesh, &transformed)?;
    out.flush()?;

    Ok(())
}
