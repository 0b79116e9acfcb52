// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The transfer screen: field state, continuous validation and submission.

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{info, warn};

use crate::client::BeneficioApi;
use crate::error::ClientError;
use crate::models::TransferRequest;
use crate::validation::{TransferPool, ValidTransfer, ValidationResult, Violation, validate_transfer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferState {
    /// Nothing entered yet, or back here after a failed submission.
    Idle,
    Validating,
    Submitting,
    /// Terminal; the caller should close the screen and reload.
    Succeeded,
}

#[derive(Debug, Error)]
pub enum SessionError {
    /// Guards against re-entering `submit` while a request is in flight.
    #[error("A transfer is already in flight")]
    Busy,
    #[error("This transfer was already completed")]
    Closed,
    #[error("{}", join_violations(.0))]
    Invalid(Vec<Violation>),
    #[error(transparent)]
    Rejected(#[from] ClientError),
}

fn join_violations(v: &[Violation]) -> String {
    v.iter().map(|x| x.to_string()).collect::<Vec<_>>().join("; ")
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransferOutcome {
    pub transfer: ValidTransfer,
    /// Whether backend state changed, i.e. whether the caller must reload.
    pub did_mutate: bool,
}

#[derive(Debug)]
pub struct TransferSession {
    pool: TransferPool,
    from: Option<i64>,
    to: Option<i64>,
    amount: Option<Decimal>,
    validation: ValidationResult,
    state: TransferState,
    loading: bool,
    last_error: Option<String>,
}

impl TransferSession {
    /// Opens the screen over a snapshot of the eligible accounts.
    pub fn open(pool: TransferPool) -> Self {
        let validation = validate_transfer(&pool, None, None, None);
        Self {
            pool,
            from: None,
            to: None,
            amount: None,
            validation,
            state: TransferState::Idle,
            loading: false,
            last_error: None,
        }
    }

    pub fn state(&self) -> TransferState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn validation(&self) -> &ValidationResult {
        &self.validation
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn values(&self) -> (Option<i64>, Option<i64>, Option<Decimal>) {
        (self.from, self.to, self.amount)
    }

    pub fn set_from(&mut self, id: Option<i64>) -> &ValidationResult {
        self.from = id;
        self.revalidate()
    }

    pub fn set_to(&mut self, id: Option<i64>) -> &ValidationResult {
        self.to = id;
        self.revalidate()
    }

    pub fn set_amount(&mut self, amount: Option<Decimal>) -> &ValidationResult {
        self.amount = amount;
        self.revalidate()
    }

    fn revalidate(&mut self) -> &ValidationResult {
        self.validation = validate_transfer(&self.pool, self.from, self.to, self.amount);
        if matches!(self.state, TransferState::Idle) {
            self.state = TransferState::Validating;
        }
        &self.validation
    }

    /// Sends the transfer if the current values validate.
    ///
    /// One call, no retry, no local balance change. On failure the screen
    /// returns to `Idle` with the entered values intact.
    pub fn submit(&mut self, api: &dyn BeneficioApi) -> Result<TransferOutcome, SessionError> {
        match self.state {
            TransferState::Succeeded => return Err(SessionError::Closed),
            _ if self.loading => return Err(SessionError::Busy),
            _ => {}
        }
        self.revalidate();
        let transfer = match &self.validation {
            ValidationResult::Valid(t) => t.clone(),
            ValidationResult::Invalid(v) => return Err(SessionError::Invalid(v.clone())),
        };

        let req = TransferRequest {
            from_id: transfer.from.id,
            to_id: transfer.to.id,
            amount: transfer.amount,
        };
        self.loading = true;
        self.state = TransferState::Submitting;
        self.last_error = None;

        let result = api.transfer(&req);
        self.loading = false;
        match result {
            Ok(()) => {
                info!(from = req.from_id, to = req.to_id, amount = %req.amount, "transfer accepted");
                self.state = TransferState::Succeeded;
                Ok(TransferOutcome {
                    transfer,
                    did_mutate: true,
                })
            }
            Err(e) => {
                warn!(from = req.from_id, to = req.to_id, error = %e, "transfer failed");
                self.state = TransferState::Idle;
                self.last_error = Some(e.to_string());
                Err(SessionError::Rejected(e))
            }
        }
    }

    /// Closes the screen, reporting whether the caller must reload.
    pub fn close(self) -> bool {
        self.state == TransferState::Succeeded
    }
}
