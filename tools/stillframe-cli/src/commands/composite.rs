//! Composite raw tiles onto a zeroed canvas and encode the result.

use std::path::PathBuf;
use std::sync::Arc;

use stillframe_common::config::AppConfig;
use stillframe_encode::TokioWorkerPool;
use stillframe_raster::PixelFormat;
use stillframe_stacks::FixedCanvas;

/// One `PATH:X:Y:W:H` tile argument.
struct TileSpec {
    path: PathBuf,
    x: i32,
    y: i32,
    w: i32,
    h: i32,
}

fn parse_tile(spec: &str) -> anyhow::Result<TileSpec> {
    let parts: Vec<&str> = spec.rsplitn(5, ':').collect();
    if parts.len() != 5 {
        anyhow::bail!("Tile must be PATH:X:Y:W:H, got '{spec}'");
    }
    // rsplitn yields fields in reverse, so the path (which may itself
    // contain colons on some platforms) is the final element.
    Ok(TileSpec {
        path: PathBuf::from(parts[4]),
        x: parts[3].parse()?,
        y: parts[2].parse()?,
        w: parts[1].parse()?,
        h: parts[0].parse()?,
    })
}

pub fn run(
    config: &AppConfig,
    tiles: Vec<String>,
    width: u32,
    height: u32,
    format: String,
    quality: Option<i32>,
    output: PathBuf,
) -> anyhow::Result<()> {
    let format: PixelFormat = format.parse()?;
    let pool = Arc::new(TokioWorkerPool::current()?);

    let canvas = FixedCanvas::new(width, height, format, pool)?;
    canvas.set_quality(quality.unwrap_or(i32::from(config.encoder.quality)))?;

    for spec in &tiles {
        let tile = parse_tile(spec)?;
        let buffer = std::fs::read(&tile.path)?;
        canvas.push(&buffer, tile.x, tile.y, tile.w, tile.h)?;
        tracing::debug!(
            path = %tile.path.display(),
            x = tile.x,
            y = tile.y,
            w = tile.w,
            h = tile.h,
            "Composited tile"
        );
    }

    let bytes = canvas.encode_sync()?;
    std::fs::write(&output, &bytes)?;

    println!(
        "Composited {} tile(s) onto {}x{} canvas, wrote {} ({} bytes)",
        tiles.len(),
        width,
        height,
        output.display(),
        bytes.len()
    );
    Ok(())
}
