use crate::pose::Pose;

/// Default absolute tolerance used to compare orientation/scale blocks.
pub const DEFAULT_EPSILON: f64 = 1e-4;

/// Check whether two poses share the same orientation/scale block.
///
/// Only the upper-left 3x3 block is compared, the translation column is ignored.
/// The tolerance is absolute and is not rescaled by the magnitude of the matrix.
///
/// # Arguments
///
/// * `a` - The first pose.
/// * `b` - The second pose.
/// * `epsilon` - The absolute tolerance per component.
///
/// # Returns
///
/// `true` iff all nine block components differ by strictly less than `epsilon`.
///
/// Example:
///
/// ```
/// use pose_offset::matcher::orientation_blocks_match;
/// use pose_offset::pose::Pose;
///
/// let a = Pose::from_translation(&[1.0, 2.0, 3.0]);
/// let b = Pose::from_translation(&[-4.0, 0.0, 9.0]);
/// assert!(orientation_blocks_match(&a, &b, 1e-4));
/// ```
pub fn orientation_blocks_match(a: &Pose, b: &Pose, epsilon: f64) -> bool {
    // NOTE: written as `< epsilon` so that NaN components never match
    a.rows()
        .iter()
        .zip(b.rows().iter())
        .take(3)
        .all(|(ra, rb)| {
            ra.iter()
                .zip(rb.iter())
                .take(3)
                .all(|(va, vb)| (va - vb).abs() < epsilon)
        })
}
