use pose_offset::Pose;
use serde::{Deserialize, Serialize};

/// A pose as sixteen named components of a row-major 4x4 matrix.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct PoseRecord {
    pub m00: f64,
    pub m01: f64,
    pub m02: f64,
    pub m03: f64,
    pub m10: f64,
    pub m11: f64,
    pub m12: f64,
    pub m13: f64,
    pub m20: f64,
    pub m21: f64,
    pub m22: f64,
    pub m23: f64,
    pub m30: f64,
    pub m31: f64,
    pub m32: f64,
    pub m33: f64,
}

impl From<PoseRecord> for Pose {
    fn from(r: PoseRecord) -> Self {
        Pose::new([
            [r.m00, r.m01, r.m02, r.m03],
            [r.m10, r.m11, r.m12, r.m13],
            [r.m20, r.m21, r.m22, r.m23],
            [r.m30, r.m31, r.m32, r.m33],
        ])
    }
}

impl From<&Pose> for PoseRecord {
    fn from(pose: &Pose) -> Self {
        let [[m00, m01, m02, m03], [m10, m11, m12, m13], [m20, m21, m22, m23], [m30, m31, m32, m33]] =
            *pose.rows();
        Self {
            m00,
            m01,
            m02,
            m03,
            m10,
            m11,
            m12,
            m13,
            m20,
            m21,
            m22,
            m23,
            m30,
            m31,
            m32,
            m33,
        }
    }
}
