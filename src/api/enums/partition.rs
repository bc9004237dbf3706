use core::fmt;
use serde::Serialize;

/// Which of the parallel group sets a record is routed into.
///
/// Records of a variant without a split column all land in [`Partition::All`].
/// Records with a split column are routed into [`Partition::Training`] when the
/// flag is `0`, and into [`Partition::Testing`] for any other value.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Partition {
    /// No split column is present.
    All,

    /// Split flag was `0`.
    Training,

    /// Split flag was non-zero.
    Testing,
}

impl Partition {
    /// Maps a raw split flag onto its partition.
    pub fn from_split_flag(flag: i64) -> Self {
        if flag == 0 {
            Partition::Training
        } else {
            Partition::Testing
        }
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Partition::All => write!(f, "all"),
            Partition::Training => write!(f, "training"),
            Partition::Testing => write!(f, "testing"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, Partition::Training)]
    #[case(1, Partition::Testing)]
    #[case(-1, Partition::Testing)]
    #[case(2, Partition::Testing)]
    fn split_flag_routes_to_partition(#[case] flag: i64, #[case] expected: Partition) {
        assert_eq!(Partition::from_split_flag(flag), expected);
    }
}
