use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use pose_offset::{Offset, Pose, PoseSet};

use crate::{record::PoseRecord, PoseIoError};

/// A collaborator that supplies a pose set.
pub trait PoseSource {
    /// Load the poses.
    fn load(&self) -> Result<PoseSet, PoseIoError>;
}

/// A collaborator that consumes the consistent offsets.
pub trait OffsetSink {
    /// Store the offsets.
    fn write(&mut self, offsets: &[Offset]) -> Result<(), PoseIoError>;
}

/// A JSON document with a list of pose records.
#[derive(Debug, Clone)]
pub struct JsonPoseFile {
    path: PathBuf,
}

impl JsonPoseFile {
    /// Create a pose source reading from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PoseSource for JsonPoseFile {
    fn load(&self) -> Result<PoseSet, PoseIoError> {
        read_poses_json(&self.path)
    }
}

/// A JSON document receiving the list of offsets.
#[derive(Debug, Clone)]
pub struct JsonOffsetFile {
    path: PathBuf,
}

impl JsonOffsetFile {
    /// Create an offset sink writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl OffsetSink for JsonOffsetFile {
    fn write(&mut self, offsets: &[Offset]) -> Result<(), PoseIoError> {
        write_offsets_json(&self.path, offsets)
    }
}

/// Parse a JSON list of pose records.
///
/// A `null` document is read as an empty pose set.
pub fn parse_poses_json(text: &str) -> Result<PoseSet, PoseIoError> {
    Ok(into_pose_set(serde_json::from_str(text)?))
}

/// Read a JSON list of pose records from a file.
///
/// # Arguments
///
/// * `path` - The path to the JSON document.
///
/// # Returns
///
/// The poses in document order, or [`PoseIoError::SourceUnavailable`] if the file
/// does not exist.
pub fn read_poses_json(path: impl AsRef<Path>) -> Result<PoseSet, PoseIoError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| match err.kind() {
        std::io::ErrorKind::NotFound => PoseIoError::SourceUnavailable(path.to_path_buf()),
        _ => PoseIoError::Io(err),
    })?;

    let poses = into_pose_set(serde_json::from_reader(BufReader::new(file))?);

    log::info!("Loaded {} poses from {}", poses.len(), path.display());

    Ok(poses)
}

// a `null` document deserializes to `None`
fn into_pose_set(records: Option<Vec<PoseRecord>>) -> PoseSet {
    records
        .unwrap_or_default()
        .into_iter()
        .map(Pose::from)
        .collect()
}

/// Read a JSON list of pose records, substituting an empty set on failure.
///
/// The failure is logged at error level.
pub fn read_poses_json_or_empty(path: impl AsRef<Path>) -> PoseSet {
    let path = path.as_ref();
    match read_poses_json(path) {
        Ok(poses) => poses,
        Err(err) => {
            log::error!("Cannot load poses from {}: {}", path.display(), err);
            PoseSet::empty()
        }
    }
}

/// Write a pose set as a JSON list of pose records.
pub fn write_poses_json(path: impl AsRef<Path>, poses: &PoseSet) -> Result<(), PoseIoError> {
    let records = poses.iter().map(PoseRecord::from).collect::<Vec<_>>();
    write_json(path.as_ref(), &records)
}

/// Write the offsets as a pretty-printed JSON list of `{"x", "y", "z"}` objects.
///
/// Missing parent directories are created.
pub fn write_offsets_json(path: impl AsRef<Path>, offsets: &[Offset]) -> Result<(), PoseIoError> {
    let path = path.as_ref();
    write_json(path, offsets)?;
    log::info!("Exported {} offsets to {}", offsets.len(), path.display());
    Ok(())
}

fn write_json<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), PoseIoError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;

    Ok(())
}
