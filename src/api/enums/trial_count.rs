use core::num::NonZeroU32;

/// The `N` used when turning a standard deviation into a confidence half-width.
///
/// The sweep scripts always assumed every group held the full number of trials,
/// even when some runs failed and produced no output. [`TrialCount::Fixed`] keeps
/// that behaviour; [`TrialCount::Observed`] uses the real group size instead.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TrialCount {
    /// Use the same number of trials for every group.
    Fixed(NonZeroU32),

    /// Use the number of values actually present in each group.
    Observed,
}

impl TrialCount {
    /// Resolves the trial count for a group containing `group_size` values.
    pub fn resolve(&self, group_size: usize) -> u32 {
        match self {
            TrialCount::Fixed(count) => count.get(),
            TrialCount::Observed => group_size.min(u32::MAX as usize) as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_ignores_group_size() {
        let count = TrialCount::Fixed(NonZeroU32::new(1000).unwrap());
        assert_eq!(count.resolve(3), 1000);
        assert_eq!(count.resolve(1000), 1000);
    }

    #[test]
    fn observed_uses_group_size() {
        assert_eq!(TrialCount::Observed.resolve(17), 17);
    }
}
