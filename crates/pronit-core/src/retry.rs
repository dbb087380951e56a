use crate::error::{PronitError, Result};

/// How many times an interactive question may be re-asked before giving up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: Option<u32>,
}

impl RetryPolicy {
    pub fn new(max_attempts: Option<u32>) -> Self {
        Self { max_attempts }
    }

    pub fn unbounded() -> Self {
        Self { max_attempts: None }
    }

    pub fn bounded(max_attempts: u32) -> Self {
        Self {
            max_attempts: Some(max_attempts),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.max_attempts.is_none()
    }

    /// Start counting attempts for one question.
    pub fn start(&self, what: &str) -> Attempts {
        Attempts {
            policy: *self,
            what: what.to_string(),
            used: 0,
        }
    }
}

/// Attempt counter handed out by [`RetryPolicy::start`].
#[derive(Debug)]
pub struct Attempts {
    policy: RetryPolicy,
    what: String,
    used: u32,
}

impl Attempts {
    /// Record one more attempt. Fails once the policy's bound is exceeded.
    pub fn attempt(&mut self) -> Result<u32> {
        if let Some(max) = self.policy.max_attempts {
            if self.used >= max {
                return Err(PronitError::AttemptsExhausted {
                    what: self.what.clone(),
                    attempts: max,
                });
            }
        }
        self.used += 1;
        Ok(self.used)
    }

    pub fn used(&self) -> u32 {
        self.used
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_policy_stops_after_max() {
        let mut attempts = RetryPolicy::bounded(2).start("token");
        assert_eq!(attempts.attempt().unwrap(), 1);
        assert_eq!(attempts.attempt().unwrap(), 2);
        let err = attempts.attempt().unwrap_err();
        assert!(matches!(
            err,
            PronitError::AttemptsExhausted { attempts: 2, .. }
        ));
    }

    #[test]
    fn unbounded_policy_keeps_going() {
        let mut attempts = RetryPolicy::unbounded().start("name");
        for _ in 0..1000 {
            attempts.attempt().unwrap();
        }
        assert_eq!(attempts.used(), 1000);
    }
}
