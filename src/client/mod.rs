// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod http;
pub mod memory;

use crate::error::ClientError;
use crate::models::{Account, AccountRequest, TransferRequest};

pub use http::HttpApi;
pub use memory::InMemoryApi;

/// Operations the backend exposes under `/beneficios`.
///
/// Commands and the transfer session only see this trait, so any
/// implementation can stand in for the real server.
pub trait BeneficioApi {
    fn list(&self) -> Result<Vec<Account>, ClientError>;
    fn get(&self, id: i64) -> Result<Account, ClientError>;
    fn create(&self, req: &AccountRequest) -> Result<Account, ClientError>;
    fn update(&self, id: i64, req: &AccountRequest) -> Result<Account, ClientError>;
    /// Soft delete: the backend flips `ativo` to false.
    fn delete(&self, id: i64) -> Result<(), ClientError>;
    fn transfer(&self, req: &TransferRequest) -> Result<(), ClientError>;
}
