//! Host side of the handshake
//!
//! The host opens the link by sending the username challenge, accepts the
//! device if its reply contains the expected username, and answers with
//! `AUTH_SUCCESS`. A silent or wrong device is retried a bounded number of
//! times with a pause between attempts.
//!
//! The machine is driven with caller-supplied millisecond timestamps so it
//! runs the same on a desktop host and in tests.

use crate::messages::{AUTH_SUCCESS, USERNAME_REQUEST};

/// Host retry and timeout settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HostSettings {
    /// How long to wait for the username reply
    pub response_timeout_ms: u64,
    /// Attempts before giving up
    pub max_attempts: u8,
    /// Pause between a failed attempt and the next one
    pub retry_delay_ms: u64,
}

impl Default for HostSettings {
    fn default() -> Self {
        Self {
            response_timeout_ms: 1000,
            max_attempts: 3,
            retry_delay_ms: 3000,
        }
    }
}

/// What the host should do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostStep {
    /// Nothing to do yet
    Pending,
    /// Username accepted; write [`AUTH_SUCCESS`]
    Grant,
    /// Reply did not contain the expected username
    Rejected,
    /// No reply within the response window
    TimedOut,
    /// Retry delay elapsed; call [`HostHandshake::start`] again
    Retry,
    /// All attempts used up
    Exhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    AwaitingUsername { since_ms: u64 },
    Backoff { until_ms: u64 },
    Authenticated,
    Failed,
}

/// Host-side handshake state machine
#[derive(Debug, Clone)]
pub struct HostHandshake<'a> {
    expected_username: &'a str,
    settings: HostSettings,
    phase: Phase,
    attempts: u8,
}

impl<'a> HostHandshake<'a> {
    /// Create a handshake expecting `expected_username`
    pub fn new(expected_username: &'a str, settings: HostSettings) -> Self {
        Self {
            expected_username,
            settings,
            phase: Phase::Idle,
            attempts: 0,
        }
    }

    /// Begin an attempt
    ///
    /// Returns the challenge line to write, or `None` if the handshake has
    /// already succeeded or used up its attempts.
    pub fn start(&mut self, now_ms: u64) -> Option<&'static str> {
        match self.phase {
            Phase::Authenticated | Phase::Failed => None,
            _ if self.attempts >= self.settings.max_attempts => {
                self.phase = Phase::Failed;
                None
            }
            _ => {
                self.attempts += 1;
                self.phase = Phase::AwaitingUsername { since_ms: now_ms };
                Some(USERNAME_REQUEST)
            }
        }
    }

    /// Handle a line received from the device
    ///
    /// Matching is by containment, so a reply wrapped in extra text is still
    /// accepted.
    pub fn on_line(&mut self, line: &str, now_ms: u64) -> HostStep {
        if !matches!(self.phase, Phase::AwaitingUsername { .. }) {
            return HostStep::Pending;
        }

        if line.contains(self.expected_username) {
            self.phase = Phase::Authenticated;
            HostStep::Grant
        } else {
            self.fail_attempt(now_ms);
            HostStep::Rejected
        }
    }

    /// Advance timers
    pub fn poll(&mut self, now_ms: u64) -> HostStep {
        match self.phase {
            Phase::AwaitingUsername { since_ms }
                if now_ms.saturating_sub(since_ms) >= self.settings.response_timeout_ms =>
            {
                self.fail_attempt(now_ms);
                HostStep::TimedOut
            }
            Phase::Backoff { until_ms } if now_ms >= until_ms => {
                if self.attempts < self.settings.max_attempts {
                    self.phase = Phase::Idle;
                    HostStep::Retry
                } else {
                    self.phase = Phase::Failed;
                    HostStep::Exhausted
                }
            }
            Phase::Failed => HostStep::Exhausted,
            _ => HostStep::Pending,
        }
    }

    /// Earliest time the next attempt may start, if another is allowed
    pub fn next_attempt(&self) -> Option<u64> {
        match self.phase {
            Phase::Backoff { until_ms } if self.attempts < self.settings.max_attempts => {
                Some(until_ms)
            }
            _ => None,
        }
    }

    /// The grant line to write after [`HostStep::Grant`]
    pub fn grant_line(&self) -> Option<&'static str> {
        self.is_authenticated().then_some(AUTH_SUCCESS)
    }

    /// Check if the device has been accepted
    pub fn is_authenticated(&self) -> bool {
        self.phase == Phase::Authenticated
    }

    /// Attempts made so far
    pub fn attempts(&self) -> u8 {
        self.attempts
    }

    fn fail_attempt(&mut self, now_ms: u64) {
        self.phase = Phase::Backoff {
            until_ms: now_ms.saturating_add(self.settings.retry_delay_ms),
        };
    }
}
