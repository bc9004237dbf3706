use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use serde::Serialize;

/// A finite swept parameter value (gamma, epsilon, beta...) usable as a map key.
///
/// Equality and hashing operate on the bit pattern, with `-0.0` folded into `0.0`,
/// so that two records printing the same parameter always share a group.
/// Ordering follows [`f64::total_cmp`].
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(transparent)]
pub struct SweepValue(f64);

impl SweepValue {
    /// Creates a new [`SweepValue`], returning [`None`] for NaN and infinities.
    pub fn new(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }

        // Fold negative zero.
        Some(Self(if value == 0.0 { 0.0 } else { value }))
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl PartialEq for SweepValue {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for SweepValue {}

impl Hash for SweepValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl PartialOrd for SweepValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SweepValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for SweepValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single component of a [`GroupKey`].
///
/// [`GroupKey`]: crate::records::group_key::GroupKey
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum KeyPart {
    Int(i64),
    Float(SweepValue),
}

impl KeyPart {
    /// Returns the key part as a plot coordinate.
    pub fn as_f64(&self) -> f64 {
        match self {
            KeyPart::Int(value) => *value as f64,
            KeyPart::Float(value) => value.get(),
        }
    }

    /// Convenience constructor for float parts; [`None`] if `value` is not finite.
    pub fn float(value: f64) -> Option<Self> {
        SweepValue::new(value).map(KeyPart::Float)
    }
}

impl fmt::Display for KeyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyPart::Int(value) => write!(f, "{}", value),
            KeyPart::Float(value) => write!(f, "{}", value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashbrown::HashSet;

    #[test]
    fn rejects_non_finite_values() {
        assert!(SweepValue::new(f64::NAN).is_none());
        assert!(SweepValue::new(f64::INFINITY).is_none());
        assert!(SweepValue::new(f64::NEG_INFINITY).is_none());
        assert!(SweepValue::new(0.99).is_some());
    }

    #[test]
    fn negative_zero_shares_a_key_with_zero() {
        let mut set = HashSet::new();
        set.insert(SweepValue::new(0.0).unwrap());
        set.insert(SweepValue::new(-0.0).unwrap());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn orders_ascending() {
        let mut values: Vec<SweepValue> = [0.9, 0.0, 0.99, 0.1, -0.1]
            .into_iter()
            .filter_map(SweepValue::new)
            .collect();
        values.sort();

        let sorted: Vec<f64> = values.into_iter().map(SweepValue::get).collect();
        assert_eq!(sorted, vec![-0.1, 0.0, 0.1, 0.9, 0.99]);
    }

    #[test]
    fn displays_like_source_text() {
        assert_eq!(KeyPart::Int(20).to_string(), "20");
        assert_eq!(KeyPart::float(0.1).unwrap().to_string(), "0.1");
    }
}
