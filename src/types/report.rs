use std::fmt;
use std::time::Duration;

use super::verdict::{SegmentResults, Verdict};
use crate::SegmentError;

/// The result of one rule in a collect-all batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    name: String,
    result: Result<bool, SegmentError>,
}

impl Outcome {
    pub(crate) fn new(name: impl Into<String>, result: Result<bool, SegmentError>) -> Self {
        Self {
            name: name.into(),
            result,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn result(&self) -> &Result<bool, SegmentError> {
        &self.result
    }
}

/// Report returned by [`BatchRunner::run_all()`](crate::BatchRunner::run_all).
///
/// Holds one [`Outcome`] per rule in input order, whether or not earlier
/// rules failed, plus the wall-clock duration of the batch.
#[derive(Debug, Clone)]
#[must_use]
pub struct BatchReport {
    outcomes: Vec<Outcome>,
    duration: Duration,
}

impl BatchReport {
    pub(crate) fn new(outcomes: Vec<Outcome>, duration: Duration) -> Self {
        Self { outcomes, duration }
    }

    #[must_use]
    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    /// Names of rules that evaluated to `true`, in input order.
    #[must_use]
    pub fn matched(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| o.result == Ok(true))
            .map(Outcome::name)
            .collect()
    }

    /// Every per-rule failure, in input order.
    #[must_use]
    pub fn errors(&self) -> Vec<&SegmentError> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err())
            .collect()
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }

    /// Wall-clock duration of the batch.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Collapse into the fail-fast view: all verdicts, or the first error.
    ///
    /// # Errors
    ///
    /// Returns the first [`SegmentError`] in input order.
    pub fn into_results(self) -> Result<SegmentResults, SegmentError> {
        self.outcomes
            .into_iter()
            .map(|o| o.result.map(|matched| Verdict::new(o.name, matched)))
            .collect()
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "matched: [{}]", self.matched().join(", "))?;
        write!(f, ", errors: {}", self.errors().len())?;
        write!(f, ", duration: {:?}", self.duration)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EvalError;

    fn unknown(rule: &str) -> SegmentError {
        SegmentError::new(
            rule,
            EvalError::UnknownField {
                field: "bogus".into(),
            },
        )
    }

    fn report() -> BatchReport {
        BatchReport::new(
            vec![
                Outcome::new("a", Ok(true)),
                Outcome::new("b", Err(unknown("b"))),
                Outcome::new("c", Ok(false)),
                Outcome::new("d", Ok(true)),
            ],
            Duration::from_nanos(500),
        )
    }

    #[test]
    fn report_accessors() {
        let report = report();
        assert_eq!(report.outcomes().len(), 4);
        assert_eq!(report.matched(), vec!["a", "d"]);
        assert_eq!(report.errors(), vec![&unknown("b")]);
        assert!(!report.is_success());
        assert_eq!(report.duration(), Duration::from_nanos(500));
    }

    #[test]
    fn into_results_yields_first_error() {
        let err = report().into_results().unwrap_err();
        assert_eq!(err.rule(), "b");
    }

    #[test]
    fn into_results_success() {
        let report = BatchReport::new(
            vec![Outcome::new("a", Ok(true)), Outcome::new("b", Ok(false))],
            Duration::ZERO,
        );
        assert!(report.is_success());
        let results = report.into_results().unwrap();
        assert_eq!(results.get("a"), Some(true));
        assert_eq!(results.get("b"), Some(false));
    }

    #[test]
    fn report_display() {
        let s = report().to_string();
        assert!(s.contains("matched: [a, d]"));
        assert!(s.contains("errors: 1"));
    }
}
