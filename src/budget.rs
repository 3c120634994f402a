//! Bounded-use wrapper around the translation engine.
//!
//! Every submission consumes one attempt, including malformed input. The
//! submission that spends the last attempt is still processed; only the ones
//! after it are rejected, until [`AttemptBudget::reset`].

use log::{debug, info};

use crate::error::Rejected;
use crate::translation::{InvalidReason, TranslationEngine, TranslationResult};

/// Parse raw user input into a candidate logical address.
///
/// Surrounding whitespace is ignored; what remains must be a non-empty run of
/// ASCII digits. Digit strings too large for an `i64` are out of range.
pub fn parse_logical_address(raw_input: &str) -> Result<i64, InvalidReason> {
    let trimmed = raw_input.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InvalidReason::NotANumber);
    }
    trimmed.parse().map_err(|_| InvalidReason::OutOfRange)
}

#[derive(Debug, Clone)]
pub struct AttemptBudget {
    engine: TranslationEngine,
    max_attempts: usize,
    used: usize,
}

impl AttemptBudget {
    pub fn new(engine: TranslationEngine, max_attempts: usize) -> Self {
        AttemptBudget { engine, max_attempts, used: 0 }
    }

    /// Spend one attempt on `raw_input`
    pub fn submit(&mut self, raw_input: &str) -> Result<TranslationResult, Rejected> {
        if self.is_exhausted() {
            debug!("submission rejected: {} of {} attempts used", self.used, self.max_attempts);
            return Err(Rejected { max_attempts: self.max_attempts });
        }
        self.used += 1;

        let result = match parse_logical_address(raw_input) {
            Ok(logical) => self.engine.translate(logical),
            Err(reason) => TranslationResult::InvalidAddress {
                raw_input: raw_input.trim().to_string(),
                reason,
            },
        };

        if self.is_exhausted() {
            info!("attempt budget of {} exhausted", self.max_attempts);
        }
        Ok(result)
    }

    #[inline]
    pub fn used(&self) -> usize {
        self.used
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.max_attempts.saturating_sub(self.used)
    }

    #[inline]
    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.used >= self.max_attempts
    }

    pub fn engine(&self) -> &TranslationEngine {
        &self.engine
    }

    /// Zero the counter and reset the wrapped engine
    pub fn reset(&mut self) {
        self.used = 0;
        self.engine.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AddressSpaceConfig;

    fn reference_budget() -> AttemptBudget {
        AttemptBudget::new(TranslationEngine::new(AddressSpaceConfig::default()), 10)
    }

    #[test]
    fn test_parse_accepts_digits() {
        assert_eq!(parse_logical_address("0"), Ok(0));
        assert_eq!(parse_logical_address("8191"), Ok(8191));
        assert_eq!(parse_logical_address("  42\n"), Ok(42));
        assert_eq!(parse_logical_address("007"), Ok(7));
    }

    #[test]
    fn test_parse_rejects_non_digits() {
        for input in ["", "   ", "-1", "+5", "1.5", "12a", "0x10", "1 2"] {
            assert_eq!(
                parse_logical_address(input),
                Err(InvalidReason::NotANumber),
                "input {:?}",
                input
            );
        }
    }

    #[test]
    fn test_parse_huge_number_out_of_range() {
        assert_eq!(
            parse_logical_address("99999999999999999999999"),
            Err(InvalidReason::OutOfRange)
        );
    }

    #[test]
    fn test_submit_delegates_to_engine() {
        let mut budget = reference_budget();
        let result = budget.submit("1024").unwrap();
        assert!(matches!(result, TranslationResult::FaultLoaded { frame: 0, physical: 0, .. }));
        assert_eq!(budget.used(), 1);
        assert_eq!(budget.remaining(), 9);
    }

    #[test]
    fn test_malformed_input_consumes_attempt() {
        let mut budget = reference_budget();
        let result = budget.submit("abc").unwrap();
        assert_eq!(
            result,
            TranslationResult::InvalidAddress {
                raw_input: "abc".to_string(),
                reason: InvalidReason::NotANumber,
            }
        );
        assert_eq!(budget.used(), 1);
        assert_eq!(budget.engine().frames().occupied_count(), 0);
    }

    #[test]
    fn test_out_of_range_consumes_attempt() {
        let mut budget = reference_budget();
        let result = budget.submit("8192").unwrap();
        assert!(matches!(
            result,
            TranslationResult::InvalidAddress { reason: InvalidReason::OutOfRange, .. }
        ));
        assert_eq!(budget.remaining(), 9);
    }

    #[test]
    fn test_last_attempt_processed_then_locked() {
        let mut budget = reference_budget();
        for i in 0..9 {
            budget.submit(&(i * 100).to_string()).unwrap();
        }
        assert!(!budget.is_exhausted());

        // The 10th call is still translated
        let tenth = budget.submit("4096").unwrap();
        assert!(matches!(tenth, TranslationResult::FaultLoaded { .. }));
        assert!(budget.is_exhausted());
        assert_eq!(budget.remaining(), 0);

        let frames_before = budget.engine().frame_snapshot();
        assert_eq!(budget.submit("5000"), Err(Rejected { max_attempts: 10 }));
        assert_eq!(budget.submit("junk"), Err(Rejected { max_attempts: 10 }));
        assert_eq!(budget.used(), 10);
        assert_eq!(budget.engine().frame_snapshot(), frames_before);
    }

    #[test]
    fn test_reset_restores_budget_and_engine() {
        let mut budget = AttemptBudget::new(
            TranslationEngine::new(AddressSpaceConfig::default()),
            2,
        );
        budget.submit("0").unwrap();
        budget.submit("2048").unwrap();
        assert!(budget.submit("0").is_err());

        budget.reset();
        assert_eq!(budget.used(), 0);
        assert_eq!(budget.remaining(), 2);
        assert_eq!(budget.engine().frames().occupied_count(), 0);

        let result = budget.submit("2048").unwrap();
        assert_eq!(result.frame(), Some(0));
    }
}
