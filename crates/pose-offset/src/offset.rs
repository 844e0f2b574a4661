use serde::{Deserialize, Serialize};

use crate::pose::Pose;

/// A translation difference between a space pose and a model pose.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    /// Displacement along x.
    pub x: f64,
    /// Displacement along y.
    pub y: f64,
    /// Displacement along z.
    pub z: f64,
}

impl Offset {
    /// Create a new offset from its components.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Compute the offset `space.translation - model.translation`.
    pub fn between(model: &Pose, space: &Pose) -> Self {
        let tm = model.translation();
        let ts = space.translation();
        Self::new(ts[0] - tm[0], ts[1] - tm[1], ts[2] - tm[2])
    }

    /// Get the offset as an array.
    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Return the lexicographically smaller of two offsets under `f64::total_cmp`.
    ///
    /// Used to pick the reported value of a key independently of the input order.
    pub fn min_total(self, other: Self) -> Self {
        let ordering = self
            .x
            .total_cmp(&other.x)
            .then(self.y.total_cmp(&other.y))
            .then(self.z.total_cmp(&other.z));
        match ordering.is_le() {
            true => self,
            false => other,
        }
    }
}

impl From<[f64; 3]> for Offset {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

/// How offsets are turned into set keys for deduplication and intersection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OffsetQuantization {
    /// Bit-exact equality of the raw offset components.
    Exact,
    /// Snap every component to a grid with the given cell size.
    Grid(f64),
}

impl Default for OffsetQuantization {
    fn default() -> Self {
        OffsetQuantization::Grid(crate::matcher::DEFAULT_EPSILON)
    }
}

/// The identity of an offset under a given quantization.
///
/// Two offsets are considered the same candidate iff their keys are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OffsetKey([i64; 3]);

impl OffsetKey {
    /// Compute the key of an offset.
    ///
    /// Grid keys are the rounded cell indices stored as ordered `f64` bit patterns, so
    /// offsets of any finite magnitude keep distinct keys. A cell index that overflows
    /// `f64` falls back to the exact value.
    ///
    /// PRECONDITION: a grid resolution is finite and strictly positive.
    pub fn new(offset: &Offset, quantization: OffsetQuantization) -> Self {
        let quantize = |v: f64| -> i64 {
            match quantization {
                OffsetQuantization::Exact => ordered_bits(v),
                OffsetQuantization::Grid(resolution) => {
                    let cell = (v / resolution).round();
                    match cell.is_finite() || !v.is_finite() {
                        true => ordered_bits(cell),
                        false => ordered_bits(v),
                    }
                }
            }
        };
        Self([quantize(offset.x), quantize(offset.y), quantize(offset.z)])
    }

    /// Get the raw key components.
    pub fn components(&self) -> [i64; 3] {
        self.0
    }
}

// Map a float to an integer whose order matches `f64::total_cmp`.
// Adding zero folds -0.0 into 0.0.
fn ordered_bits(v: f64) -> i64 {
    let bits = (v + 0.0).to_bits() as i64;
    bits ^ (((bits >> 63) as u64) >> 1) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_between() {
        let model = Pose::from_translation(&[1.0, 1.0, 1.0]);
        let space = Pose::from_translation(&[2.0, 3.0, 4.0]);
        assert_eq!(Offset::between(&model, &space), Offset::new(1.0, 2.0, 3.0));
        assert_eq!(Offset::between(&space, &model), Offset::new(-1.0, -2.0, -3.0));
    }

    #[test]
    fn test_min_total_is_symmetric() {
        let a = Offset::new(0.1 + 0.2, 0.0, 0.0);
        let b = Offset::new(0.3, 0.0, 0.0);
        assert_eq!(a.min_total(b), b);
        assert_eq!(b.min_total(a), b);
        assert_eq!(
            Offset::new(1.0, 2.0, 3.0).min_total(Offset::new(1.0, 1.0, 9.0)),
            Offset::new(1.0, 1.0, 9.0)
        );
    }

    #[test]
    fn test_grid_key_absorbs_rounding_error() {
        let grid = OffsetQuantization::Grid(1e-4);
        let a = Offset::new(0.1 + 0.2, 0.0, 0.0);
        let b = Offset::new(0.3, 0.0, 0.0);
        assert_ne!(a, b);
        assert_eq!(OffsetKey::new(&a, grid), OffsetKey::new(&b, grid));
        assert_ne!(
            OffsetKey::new(&a, OffsetQuantization::Exact),
            OffsetKey::new(&b, OffsetQuantization::Exact)
        );
    }

    #[test]
    fn test_grid_key_separates_cells() {
        let grid = OffsetQuantization::Grid(1e-4);
        let a = Offset::new(1.0, 0.0, 0.0);
        let b = Offset::new(1.0003, 0.0, 0.0);
        assert_ne!(OffsetKey::new(&a, grid), OffsetKey::new(&b, grid));
        assert_eq!(
            OffsetKey::new(&a, grid),
            OffsetKey::new(&Offset::new(1.00004, 0.0, 0.0), grid)
        );
    }

    #[test]
    fn test_grid_key_large_offsets_stay_distinct() {
        let grid = OffsetQuantization::Grid(1e-4);
        let a = OffsetKey::new(&Offset::new(1e15, 0.0, 0.0), grid);
        let b = OffsetKey::new(&Offset::new(2e15, 0.0, 0.0), grid);
        assert_ne!(a, b);
        assert!(a < b);

        // cell indices beyond the f64 range fall back to the raw value
        let c = OffsetKey::new(&Offset::new(f64::MAX, 0.0, 0.0), grid);
        let d = OffsetKey::new(&Offset::new(f64::MAX / 2.0, 0.0, 0.0), grid);
        assert_ne!(c, d);
    }

    #[test]
    fn test_grid_key_nan_is_not_zero() {
        let grid = OffsetQuantization::Grid(1e-4);
        let zero = OffsetKey::new(&Offset::new(0.0, 0.0, 0.0), grid);
        let nan = OffsetKey::new(&Offset::new(f64::NAN, 0.0, 0.0), grid);
        assert_ne!(zero, nan);
    }

    #[test]
    fn test_key_order_follows_values() {
        let grid = OffsetQuantization::Grid(1e-4);
        let keys = [-2.0, -1.0, -0.0, 0.5, 3.0]
            .iter()
            .map(|&x| OffsetKey::new(&Offset::new(x, 0.0, 0.0), grid))
            .collect::<Vec<_>>();
        assert!(keys.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_exact_key_folds_negative_zero() {
        let a = Offset::new(-0.0, 1.0, 2.0);
        let b = Offset::new(0.0, 1.0, 2.0);
        assert_eq!(
            OffsetKey::new(&a, OffsetQuantization::Exact),
            OffsetKey::new(&b, OffsetQuantization::Exact)
        );
    }

    #[test]
    fn test_offset_serde_layout() -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string(&Offset::new(1.0, 2.5, -3.0))?;
        assert_eq!(json, r#"{"x":1.0,"y":2.5,"z":-3.0}"#);

        let quantization: OffsetQuantization = serde_json::from_str(r#"{"grid":0.001}"#)?;
        assert_eq!(quantization, OffsetQuantization::Grid(0.001));
        Ok(())
    }
}
