use pose_offset::{find_consistent_offsets, Offset, OffsetFinderParams, Pose, PoseSet};
use pose_offset_io::{
    read_poses_json, read_poses_json_or_empty, write_offsets_json, write_poses_json,
    JsonOffsetFile, JsonPoseFile, OffsetSink, PoseSource,
};
use tempfile::TempDir;

fn rotation_z(angle: f64, translation: &[f64; 3]) -> Pose {
    let (s, c) = angle.sin_cos();
    Pose::from_parts(&[[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]], translation)
}

#[test]
fn test_load_search_export() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let model_path = dir.path().join("model.json");
    let space_path = dir.path().join("space.json");
    let output_path = dir.path().join("Results").join("offsets.json");

    let offset = [0.7, -1.3, 2.9];
    let model = PoseSet::new(vec![
        rotation_z(0.3, &[0.0, 0.0, 0.0]),
        rotation_z(1.1, &[1.0, 2.0, 3.0]),
        Pose::from_translation(&[-4.0, 0.5, 0.25]),
    ]);
    let space = model
        .iter()
        .map(|p| {
            let t = p.translation();
            p.with_translation(&[t[0] + offset[0], t[1] + offset[1], t[2] + offset[2]])
        })
        .chain([rotation_z(2.0, &[9.0, 9.0, 9.0])])
        .collect::<PoseSet>();

    write_poses_json(&model_path, &model)?;
    write_poses_json(&space_path, &space)?;

    let model = JsonPoseFile::new(&model_path).load()?;
    let space = read_poses_json(&space_path)?;
    assert_eq!(model.len(), 3);
    assert_eq!(space.len(), 4);

    let result = find_consistent_offsets(&model, &space, &OffsetFinderParams::default())?;
    JsonOffsetFile::new(&output_path).write(&result.offsets())?;

    let exported: Vec<Offset> = serde_json::from_str(&std::fs::read_to_string(&output_path)?)?;
    assert_eq!(exported.len(), 1);
    approx::assert_abs_diff_eq!(exported[0].x, offset[0], epsilon = 1e-9);
    approx::assert_abs_diff_eq!(exported[0].y, offset[1], epsilon = 1e-9);
    approx::assert_abs_diff_eq!(exported[0].z, offset[2], epsilon = 1e-9);
    Ok(())
}

#[test]
fn test_missing_source_yields_empty_export() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let output_path = dir.path().join("offsets.json");

    let model = read_poses_json_or_empty(dir.path().join("missing.json"));
    let space = PoseSet::new(vec![Pose::identity()]);

    let result = find_consistent_offsets(&model, &space, &OffsetFinderParams::default())?;
    write_offsets_json(&output_path, &result.offsets())?;

    let exported: Vec<Offset> = serde_json::from_str(&std::fs::read_to_string(&output_path)?)?;
    assert!(exported.is_empty());
    Ok(())
}
