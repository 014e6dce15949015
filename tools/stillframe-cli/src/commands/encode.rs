//! Encode a single raw pixel buffer to JPEG.

use std::path::PathBuf;
use std::sync::Arc;

use stillframe_common::config::AppConfig;
use stillframe_encode::TokioWorkerPool;
use stillframe_raster::PixelFormat;
use stillframe_stacks::StillImage;

#[allow(clippy::too_many_arguments)]
pub fn run(
    config: &AppConfig,
    input: PathBuf,
    width: u32,
    height: u32,
    format: String,
    quality: Option<i32>,
    smoothing: Option<i32>,
    output: PathBuf,
) -> anyhow::Result<()> {
    let format: PixelFormat = format.parse()?;
    let buffer = std::fs::read(&input)?;

    let pool = Arc::new(TokioWorkerPool::current()?);
    let image = StillImage::new(&buffer, width, height, format, pool)?;

    image.set_quality(quality.unwrap_or(i32::from(config.encoder.quality)))?;
    if let Some(s) = smoothing.or(config.encoder.smoothing.map(i32::from)) {
        image.set_smoothing(s)?;
    }

    let bytes = image.encode_sync()?;
    std::fs::write(&output, &bytes)?;

    println!(
        "Encoded {}x{} {} buffer to {} ({} bytes)",
        width,
        height,
        format,
        output.display(),
        bytes.len()
    );
    Ok(())
}
