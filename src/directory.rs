// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use tracing::info;

use crate::client::BeneficioApi;
use crate::error::ClientError;
use crate::models::Account;
use crate::validation::TransferPool;

/// Every account the backend knows about, inactive ones included.
///
/// Each load is a full refetch; nothing is cached between loads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountDirectory {
    accounts: Vec<Account>,
}

impl AccountDirectory {
    pub fn load(api: &dyn BeneficioApi) -> Result<Self, ClientError> {
        let accounts = api.list()?;
        info!(count = accounts.len(), "loaded beneficios");
        Ok(Self { accounts })
    }

    /// Replaces the snapshot with a fresh one. On failure the old
    /// snapshot is kept.
    pub fn reload(&mut self, api: &dyn BeneficioApi) -> Result<(), ClientError> {
        *self = Self::load(api)?;
        Ok(())
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn find(&self, id: i64) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    pub fn transfer_pool(&self) -> TransferPool {
        TransferPool::from_accounts(&self.accounts)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl From<Vec<Account>> for AccountDirectory {
    fn from(accounts: Vec<Account>) -> Self {
        Self { accounts }
    }
}
