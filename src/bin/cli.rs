use anyhow::Result;
use clap::Parser;

use rs_faceswap_pipeline::config::config::{FaceDetectionConfig, LandmarkModelConfig, SwapConfig};
use rs_faceswap_pipeline::pipeline::pipeline::FaceSwapPipeline;

/// Swap the face from one photograph onto the body in another.
#[derive(Parser, Debug)]
#[command(name = "faceswap")]
struct Args {
    /// Image providing the face
    face: String,
    /// Image providing the body
    body: String,
    /// Output image path
    output: String,
    /// Haar cascade model file
    #[arg(long, default_value = "haarcascade_frontalface_default.xml")]
    cascade: String,
    /// LBF facemark model file
    #[arg(long, default_value = "lbfmodel.yaml")]
    landmark_model: String,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let detection = FaceDetectionConfig::new(&args.cascade);
    let landmark = LandmarkModelConfig::new(&args.landmark_model);
    let mut pipeline = FaceSwapPipeline::new(detection, landmark, SwapConfig::new())?;
    pipeline.swap_files(&args.face, &args.body, &args.output)?;
    Ok(())
}
