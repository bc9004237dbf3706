use super::key_part::KeyPart;
use core::fmt;
use derive_new::new;
use serde::Serialize;

/// Composite identifier used to bucket observations, e.g. (sample count, gamma).
///
/// Keys order by the outer condition first and by the swept (inner) parameter
/// second, which is also the order series are plotted in.
#[derive(new, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct GroupKey {
    /// Outer condition, e.g. number of samples or trajectories. Absent for
    /// single-key variants.
    pub outer: Option<KeyPart>,

    /// Swept parameter plotted along the X axis.
    pub inner: KeyPart,
}

impl GroupKey {
    /// Creates a key without an outer condition.
    pub fn single(inner: KeyPart) -> Self {
        Self { outer: None, inner }
    }

    /// Creates a key with both components present.
    pub fn pair(outer: KeyPart, inner: KeyPart) -> Self {
        Self {
            outer: Some(outer),
            inner,
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outer {
            Some(outer) => write!(f, "({}, {})", outer, self.inner),
            None => write!(f, "({})", self.inner),
        }
    }
}
