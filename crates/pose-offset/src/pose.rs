/// A 4x4 pose matrix stored in row-major order.
///
/// The upper-left 3x3 block holds orientation and scale, rows 0..3 of the last
/// column hold the translation. The matrix is not required to be a valid rigid
/// transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    // The rows of the matrix.
    rows: [[f64; 4]; 4],
}

impl Pose {
    /// Create a new pose from the rows of a 4x4 matrix.
    pub fn new(rows: [[f64; 4]; 4]) -> Self {
        Self { rows }
    }

    /// Create a new pose from sixteen scalars in row-major order (m00, m01, .., m33).
    pub fn from_row_major(values: &[f64; 16]) -> Self {
        let mut rows = [[0.0; 4]; 4];
        for (i, row) in rows.iter_mut().enumerate() {
            row.copy_from_slice(&values[i * 4..i * 4 + 4]);
        }
        Self { rows }
    }

    /// The identity pose.
    pub fn identity() -> Self {
        Self::from_parts(&[[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]], &[0.0; 3])
    }

    /// Create a pose from an orientation/scale block and a translation vector.
    ///
    /// # Arguments
    ///
    /// * `block` - The 3x3 orientation and scale block.
    /// * `translation` - The translation vector.
    pub fn from_parts(block: &[[f64; 3]; 3], translation: &[f64; 3]) -> Self {
        let mut rows = [[0.0; 4]; 4];
        rows[3][3] = 1.0;
        for ((row, b), t) in rows.iter_mut().zip(block.iter()).zip(translation.iter()) {
            row[..3].copy_from_slice(b);
            row[3] = *t;
        }
        Self { rows }
    }

    /// Create an identity-oriented pose with the given translation.
    pub fn from_translation(translation: &[f64; 3]) -> Self {
        Self::identity().with_translation(translation)
    }

    /// Return a copy of this pose with its translation replaced.
    pub fn with_translation(mut self, translation: &[f64; 3]) -> Self {
        for (row, t) in self.rows.iter_mut().zip(translation.iter()) {
            row[3] = *t;
        }
        self
    }

    /// Get as reference the rows of the matrix.
    #[inline]
    pub fn rows(&self) -> &[[f64; 4]; 4] {
        &self.rows
    }

    /// Get the sixteen matrix components in row-major order.
    pub fn to_row_major(&self) -> [f64; 16] {
        let mut values = [0.0; 16];
        for (i, row) in self.rows.iter().enumerate() {
            values[i * 4..i * 4 + 4].copy_from_slice(row);
        }
        values
    }

    /// Get the orientation/scale block (rows 0..3, columns 0..3).
    pub fn orientation_block(&self) -> [[f64; 3]; 3] {
        let mut block = [[0.0; 3]; 3];
        for (dst, src) in block.iter_mut().zip(self.rows.iter()) {
            dst.copy_from_slice(&src[..3]);
        }
        block
    }

    /// Get the translation vector (rows 0..3 of the last column).
    #[inline]
    pub fn translation(&self) -> [f64; 3] {
        [self.rows[0][3], self.rows[1][3], self.rows[2][3]]
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

/// An ordered, immutable sequence of poses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PoseSet {
    // The poses in the set, in the order they were supplied.
    poses: Vec<Pose>,
}

impl PoseSet {
    /// Create a new pose set from a vector of poses.
    pub fn new(poses: Vec<Pose>) -> Self {
        Self { poses }
    }

    /// Create an empty pose set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Get the number of poses in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.poses.len()
    }

    /// Check if the pose set is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }

    /// Get as reference the poses in the set.
    pub fn poses(&self) -> &[Pose] {
        &self.poses
    }

    /// Iterate over the poses in sequence order.
    pub fn iter(&self) -> std::slice::Iter<'_, Pose> {
        self.poses.iter()
    }

    /// Get the translation of every pose, in sequence order.
    pub fn translations(&self) -> Vec<[f64; 3]> {
        self.poses.iter().map(Pose::translation).collect()
    }
}

impl From<Vec<Pose>> for PoseSet {
    fn from(poses: Vec<Pose>) -> Self {
        Self::new(poses)
    }
}

impl FromIterator<Pose> for PoseSet {
    fn from_iter<I: IntoIterator<Item = Pose>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a PoseSet {
    type Item = &'a Pose;
    type IntoIter = std::slice::Iter<'a, Pose>;

    fn into_iter(self) -> Self::IntoIter {
        self.poses.iter()
    }
}
