//! Retry loop for labeling attempts.
//!
//! A whole attempt (prompt assembly through response parsing) is retried as
//! one unit. The policy is an explicit object so a deployment can bound the
//! number of attempts without changing call sites; the default retries
//! forever with a fixed delay.

use std::time::Duration;

/// Why an attempt failed, and whether retrying can help.
#[derive(Debug)]
pub enum AttemptFailure {
    /// Configuration is wrong; no number of retries will fix it.
    Fatal(anyhow::Error),
    /// Transport or response trouble; retry after the policy delay.
    Transient(anyhow::Error),
}

impl AttemptFailure {
    pub fn into_error(self) -> anyhow::Error {
        match self {
            AttemptFailure::Fatal(e) | AttemptFailure::Transient(e) => e,
        }
    }
}

/// Fixed-delay retry policy with an optional attempt ceiling.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts; `None` retries forever.
    pub max_attempts: Option<u32>,
    /// Delay between attempts.
    pub delay: Duration,
}

impl RetryPolicy {
    /// Retry forever with a fixed delay between attempts.
    pub fn unbounded(delay: Duration) -> Self {
        Self {
            max_attempts: None,
            delay,
        }
    }

    /// Give up after `max_attempts` attempts.
    pub fn with_ceiling(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: Some(max_attempts),
            delay,
        }
    }

    /// Run `attempt` until it succeeds, fails fatally, or exhausts the
    /// ceiling. The closure receives the 1-based attempt number.
    pub fn run<T, F>(&self, mut attempt: F) -> anyhow::Result<T>
    where
        F: FnMut(u32) -> Result<T, AttemptFailure>,
    {
        let mut attempts = 0u32;
        loop {
            attempts += 1;
            match attempt(attempts) {
                Ok(value) => return Ok(value),
                Err(AttemptFailure::Fatal(e)) => return Err(e),
                Err(AttemptFailure::Transient(e)) => {
                    if let Some(max) = self.max_attempts
                        && attempts >= max
                    {
                        return Err(e.context(format!("giving up after {attempts} attempts")));
                    }
                    std::thread::sleep(self.delay);
                }
            }
        }
    }
}
