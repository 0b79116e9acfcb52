// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! In-process stand-in for the backend, mirroring its business rules.

use std::cell::RefCell;

use reqwest::StatusCode;
use rust_decimal::Decimal;

use super::BeneficioApi;
use crate::error::ClientError;
use crate::models::{Account, AccountRequest, ApiError, TransferRequest};

#[derive(Debug, Default)]
struct State {
    accounts: Vec<Account>,
    next_id: i64,
    pending_rejection: Option<(StatusCode, String)>,
    pending_transfer_rejection: Option<(StatusCode, String)>,
    list_calls: usize,
    transfer_calls: usize,
}

#[derive(Debug, Default)]
pub struct InMemoryApi {
    state: RefCell<State>,
}

impl InMemoryApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_accounts(accounts: Vec<Account>) -> Self {
        let next_id = accounts.iter().map(|a| a.id).max().unwrap_or(0);
        Self {
            state: RefCell::new(State {
                accounts,
                next_id,
                ..Default::default()
            }),
        }
    }

    /// Makes the next call fail with an error envelope carrying `message`.
    pub fn reject_next(&self, status: StatusCode, message: &str) {
        self.state.borrow_mut().pending_rejection = Some((status, message.to_string()));
    }

    /// Like `reject_next`, but only the next transfer call fails.
    pub fn reject_next_transfer(&self, status: StatusCode, message: &str) {
        self.state.borrow_mut().pending_transfer_rejection = Some((status, message.to_string()));
    }

    pub fn accounts(&self) -> Vec<Account> {
        self.state.borrow().accounts.clone()
    }

    pub fn list_calls(&self) -> usize {
        self.state.borrow().list_calls
    }

    pub fn transfer_calls(&self) -> usize {
        self.state.borrow().transfer_calls
    }

    fn take_rejection(&self) -> Result<(), ClientError> {
        match self.state.borrow_mut().pending_rejection.take() {
            Some((status, message)) => Err(rejection(status, &message)),
            None => Ok(()),
        }
    }
}

fn rejection(status: StatusCode, message: &str) -> ClientError {
    ClientError::Api {
        status,
        envelope: ApiError {
            timestamp: None,
            status: Some(status.as_u16()),
            error: status.canonical_reason().map(str::to_string),
            message: Some(message.to_string()),
            errors: None,
        },
    }
}

fn not_found(id: i64) -> ClientError {
    rejection(StatusCode::NOT_FOUND, &format!("Beneficio not found: {id}"))
}

fn business(message: &str) -> ClientError {
    rejection(StatusCode::BAD_REQUEST, message)
}

impl BeneficioApi for InMemoryApi {
    fn list(&self) -> Result<Vec<Account>, ClientError> {
        self.state.borrow_mut().list_calls += 1;
        self.take_rejection()?;
        Ok(self.state.borrow().accounts.clone())
    }

    fn get(&self, id: i64) -> Result<Account, ClientError> {
        self.take_rejection()?;
        self.state
            .borrow()
            .accounts
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    fn create(&self, req: &AccountRequest) -> Result<Account, ClientError> {
        self.take_rejection()?;
        let mut st = self.state.borrow_mut();
        st.next_id += 1;
        let acct = Account {
            id: st.next_id,
            name: req.name.clone(),
            description: req.description.clone(),
            balance: req.balance,
            active: req.active.unwrap_or(true),
        };
        st.accounts.push(acct.clone());
        Ok(acct)
    }

    fn update(&self, id: i64, req: &AccountRequest) -> Result<Account, ClientError> {
        self.take_rejection()?;
        let mut st = self.state.borrow_mut();
        let acct = st
            .accounts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| not_found(id))?;
        acct.name = req.name.clone();
        acct.description = req.description.clone();
        acct.balance = req.balance;
        acct.active = req.active.unwrap_or(true);
        Ok(acct.clone())
    }

    fn delete(&self, id: i64) -> Result<(), ClientError> {
        self.take_rejection()?;
        let mut st = self.state.borrow_mut();
        let acct = st
            .accounts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| not_found(id))?;
        acct.active = false;
        Ok(())
    }

    fn transfer(&self, req: &TransferRequest) -> Result<(), ClientError> {
        self.state.borrow_mut().transfer_calls += 1;
        self.take_rejection()?;
        let armed = self.state.borrow_mut().pending_transfer_rejection.take();
        if let Some((status, message)) = armed {
            return Err(rejection(status, &message));
        }
        if req.from_id == req.to_id {
            return Err(business("Source and destination must be different"));
        }
        if req.amount <= Decimal::ZERO {
            return Err(business("Transfer amount must be greater than zero"));
        }
        let mut st = self.state.borrow_mut();
        let from_idx = st
            .accounts
            .iter()
            .position(|a| a.id == req.from_id)
            .ok_or_else(|| not_found(req.from_id))?;
        let to_idx = st
            .accounts
            .iter()
            .position(|a| a.id == req.to_id)
            .ok_or_else(|| not_found(req.to_id))?;
        if !st.accounts[from_idx].active || !st.accounts[to_idx].active {
            return Err(business("Inactive beneficios cannot take part in transfers"));
        }
        if st.accounts[from_idx].balance < req.amount {
            return Err(business("Insufficient balance for transfer"));
        }
        st.accounts[from_idx].balance -= req.amount;
        st.accounts[to_idx].balance += req.amount;
        Ok(())
    }
}
