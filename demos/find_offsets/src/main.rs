use argh::FromArgs;
use std::path::PathBuf;

use pose_offset::{find_consistent_offsets, OffsetFinderParams, OffsetQuantization};
use pose_offset_io as pio;
use pose_offset_io::OffsetSink;

#[derive(FromArgs)]
/// Find the translation that aligns a model pose set onto a space pose set
struct Args {
    /// path to the model poses
    #[argh(option, default = "PathBuf::from(\"model.json\")")]
    model_path: PathBuf,

    /// path to the space poses
    #[argh(option, default = "PathBuf::from(\"space.json\")")]
    space_path: PathBuf,

    /// path of the exported offsets
    #[argh(option, default = "PathBuf::from(\"Results/offsets.json\")")]
    output_path: PathBuf,

    /// optional JSON file with the search parameters
    #[argh(option)]
    config: Option<PathBuf>,

    /// absolute tolerance on the orientation/scale block
    #[argh(option)]
    epsilon: Option<f64>,

    /// grid resolution used to compare offsets
    #[argh(option)]
    resolution: Option<f64>,

    /// compare offsets bit-exactly instead of on a grid
    #[argh(switch)]
    exact: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let mut params = match &args.config {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => OffsetFinderParams::default(),
    };
    if let Some(epsilon) = args.epsilon {
        params = params.with_epsilon(epsilon);
    }
    if let Some(resolution) = args.resolution {
        params = params.with_quantization(OffsetQuantization::Grid(resolution));
    }
    if args.exact {
        params = params.with_quantization(OffsetQuantization::Exact);
    }
    log::debug!("Search parameters: {:?}", params);

    let model = pio::read_poses_json_or_empty(&args.model_path);
    println!("Model: #{} poses", model.len());

    let space = pio::read_poses_json_or_empty(&args.space_path);
    println!("Space: #{} poses", space.len());

    let result = find_consistent_offsets(&model, &space, &params)?;
    println!(
        "Found {} consistent offsets after {} model poses",
        result.candidates.len(),
        result.num_poses_processed
    );
    for offset in result.offsets() {
        println!("  ({}, {}, {})", offset.x, offset.y, offset.z);
    }

    pio::JsonOffsetFile::new(&args.output_path).write(&result.offsets())?;

    Ok(())
}
