//! Example: Dither synthetic test images.
//!
//! Generates a gradient, colour bars and noise, runs them through the Bayer
//! dither on the best available backend and writes PNGs next to each other.
//!
//! Run with:
//!     cargo run --example dither_synthetic --features tokio

use anyhow::Context;
use rts_filters::filters::{
    BayerDitherParams, DitherMatrix, DynamicProcessor, FilterParams, FrameProcess,
};
use rts_filters::frame::synth::{
    generate_color_bars, generate_horizontal_gradient, generate_noise,
};
use rts_filters::frame::save_image;
use rts_filters::gpu::GpuContext;
use std::path::Path;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("RTS Filters - Synthetic Dither Example");
    println!("======================================\n");

    let width = 512;
    let height = 128;

    let sources = [
        ("gradient", generate_horizontal_gradient(width, height)),
        ("color_bars", generate_color_bars(width, height)),
        ("noise", generate_noise(width, height, 7)),
    ];

    let ctx = GpuContext::new().await.ok();
    let mut processor = DynamicProcessor::gpu_with_fallback(ctx);
    println!("Backend: {}\n", processor.backend_name());

    let variants = [
        ("extended", DitherMatrix::Extended, 2),
        ("bayer8", DitherMatrix::Bayer8, 2),
        ("bayer4_4lvl", DitherMatrix::Bayer4, 4),
    ];

    let out_dir = Path::new("dither_output");
    std::fs::create_dir_all(out_dir).context("creating output directory")?;

    for (source_name, frame) in &sources {
        for (variant_name, matrix, levels) in variants {
            let params = FilterParams::BayerDither(BayerDitherParams {
                matrix,
                levels,
                ..Default::default()
            });
            let start = std::time::Instant::now();
            let dithered = processor.apply(frame, &params)?;
            let elapsed = start.elapsed();

            let path = out_dir.join(format!("{}_{}.png", source_name, variant_name));
            save_image(&dithered, &path)
                .with_context(|| format!("writing {}", path.display()))?;
            println!(
                "  {:<10} {:<12} {:>8.2?}  -> {}",
                source_name,
                variant_name,
                elapsed,
                path.display()
            );
        }
    }

    println!("\nDone.");
    Ok(())
}
