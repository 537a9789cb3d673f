use std::process;

use clap::Parser;
use tracing::error;

use etch_a_sketch::{logging, EtchASketch, RenderStrategy, SketchConfig};

/// Turn the knobs to draw, drag the frame and let go to shake it clean.
#[derive(Parser, Debug)]
#[command(name = "etch-a-sketch", version, about)]
struct Args {
    /// Drawing surface width in pixels
    #[arg(long, default_value_t = 300)]
    width: usize,

    /// Drawing surface height in pixels
    #[arg(long, default_value_t = 300)]
    height: usize,

    /// Distance the pen keeps from the surface edges
    #[arg(long, default_value_t = 10.0)]
    padding: f64,

    /// Pixels moved per dial step
    #[arg(long, default_value_t = 2.0)]
    step: f64,

    /// How strokes are kept on screen: direct, buffered or replay
    #[arg(long, default_value_t = RenderStrategy::Buffered)]
    strategy: RenderStrategy,

    /// Enable debug logging (RUST_LOG is honoured)
    #[arg(long)]
    debug: bool,
}

fn main() {
    let args = Args::parse();
    logging::init(args.debug);

    let config = SketchConfig::builder()
        .surface_width(args.width)
        .surface_height(args.height)
        .padding(args.padding)
        .step(args.step)
        .strategy(args.strategy)
        .build();

    let result = EtchASketch::new(config).and_then(EtchASketch::show);
    if let Err(err) = result {
        error!(%err, "etch-a-sketch stopped");
        process::exit(1);
    }
}
