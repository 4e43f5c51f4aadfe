use std::fmt::Display;

use crate::config::GeneratorConfig;
use crate::error::ConfigError;
use crate::request::GenerationRequest;
use crate::result::GenerationResult;

/// A dispatched request tagged with its submission sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub seq: u64,
    pub request: GenerationRequest,
}

/// Single owner of the configuration, the last result and the last error.
///
/// All mutations are synchronous. Responses are matched against the most
/// recent submission; anything older is discarded (last submit wins).
#[derive(Debug, Clone, Default)]
pub struct Session {
    config: GeneratorConfig,
    result: Option<GenerationResult>,
    error: Option<String>,
    latest_seq: u64,
    in_flight: Option<u64>,
}

impl Session {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut GeneratorConfig {
        &mut self.config
    }

    pub fn result(&self) -> Option<&GenerationResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    /// Validate the configuration and start a new submission.
    ///
    /// Clears the previous result and error before the request is handed to
    /// the transport. Configuration errors leave the session untouched.
    pub fn submit(&mut self) -> Result<Submission, ConfigError> {
        if let Err(err) = self.config.validate() {
            tracing::debug!(event = "submit_blocked", field = ?err.field(), error = %err);
            return Err(err);
        }

        self.result = None;
        self.error = None;
        self.latest_seq += 1;
        self.in_flight = Some(self.latest_seq);

        let request = self.config.build_request();
        tracing::info!(
            event = "submit",
            seq = self.latest_seq,
            domain = %request.domain,
            entity = %request.entity,
            count = request.count,
        );

        Ok(Submission {
            seq: self.latest_seq,
            request,
        })
    }

    /// Record the outcome of submission `seq`.
    ///
    /// Returns `false` when `seq` is not the pending submission (superseded,
    /// already completed, or never issued) and the outcome was ignored.
    pub fn complete<E: Display>(&mut self, seq: u64, outcome: Result<GenerationResult, E>) -> bool {
        if seq != self.latest_seq || self.in_flight != Some(seq) {
            tracing::debug!(event = "stale_response_ignored", seq, latest = self.latest_seq);
            return false;
        }

        self.in_flight = None;
        match outcome {
            Ok(result) => {
                tracing::info!(
                    event = "result_received",
                    seq,
                    success = result.success,
                    records = result.record_count,
                );
                if !result.success {
                    self.error = result.error.clone();
                }
                self.result = Some(result);
            }
            Err(err) => {
                let message = err.to_string();
                tracing::warn!(event = "transport_failed", seq, error = %message);
                self.error = Some(message);
            }
        }
        true
    }

    /// Drop the current result and error without touching the configuration.
    pub fn clear_result(&mut self) {
        self.result = None;
        self.error = None;
    }
}
