use crate::fd_parser::ParseMode;

/// Knobs for one analysis run and its text report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// How malformed dependency lines are handled.
    pub mode: ParseMode,
    /// Report a `3NF+` result as BCNF. Display only.
    pub claim_bcnf: bool,
    /// Wrap suggested tables to fit this many columns.
    pub max_width: Option<usize>,
}

impl AnalysisOptions {
    /// Skips malformed lines instead of failing.
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            mode: ParseMode::Lenient,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: ParseMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_bcnf_claim(mut self, claim_bcnf: bool) -> Self {
        self.claim_bcnf = claim_bcnf;
        self
    }

    #[must_use]
    pub fn with_max_width(mut self, max_width: Option<usize>) -> Self {
        self.max_width = max_width;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_strict() {
        let opts = AnalysisOptions::default();
        assert_eq!(opts.mode, ParseMode::Strict);
        assert!(!opts.claim_bcnf);
        assert_eq!(opts.max_width, None);
    }

    #[test]
    fn builders_compose() {
        let opts = AnalysisOptions::lenient()
            .with_bcnf_claim(true)
            .with_max_width(Some(80));
        assert_eq!(opts.mode, ParseMode::Lenient);
        assert!(opts.claim_bcnf);
        assert_eq!(opts.max_width, Some(80));
        assert_eq!(opts.with_mode(ParseMode::Strict).mode, ParseMode::Strict);
    }
}
