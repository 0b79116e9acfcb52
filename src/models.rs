// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A benefit account as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "valor", with = "rust_decimal::serde::float")]
    pub balance: Decimal,
    #[serde(rename = "ativo", default = "default_active")]
    pub active: bool,
}

/// Body of create and update calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountRequest {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "valor", with = "rust_decimal::serde::float")]
    pub balance: Decimal,
    #[serde(rename = "ativo", default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub from_id: i64,
    pub to_id: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

/// Failure envelope the backend sends with non-2xx responses.
///
/// Every field is optional on decode; proxies and older handlers send
/// partial bodies such as `{"message": "..."}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Option<BTreeMap<String, String>>,
}

fn default_active() -> bool {
    true
}

impl Account {
    pub fn status_label(&self) -> &'static str {
        if self.active { "active" } else { "inactive" }
    }
}

impl ApiError {
    /// Non-empty server message, if any.
    pub fn message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
    }

    /// Field errors sorted by field name.
    pub fn field_errors(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors
            .iter()
            .flat_map(|m| m.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }

    /// Parses `timestamp`, accepting both RFC 3339 and the zone-less
    /// ISO form Spring emits for `LocalDateTime`.
    pub fn occurred_at(&self) -> Option<NaiveDateTime> {
        let raw = self.timestamp.as_deref()?.trim();
        if let Ok(dt) = DateTime::<FixedOffset>::parse_from_rfc3339(raw) {
            return Some(dt.naive_local());
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn account_decodes_backend_field_names() {
        let acct: Account = serde_json::from_value(json!({
            "id": 7,
            "nome": "Vale Refeição",
            "descricao": null,
            "valor": 150.25,
            "ativo": false
        }))
        .unwrap();
        assert_eq!(acct.id, 7);
        assert_eq!(acct.name, "Vale Refeição");
        assert_eq!(acct.description, None);
        assert_eq!(acct.balance, Decimal::new(15025, 2));
        assert!(!acct.active);
    }

    #[test]
    fn transfer_request_uses_camel_case_numbers() {
        let req = TransferRequest {
            from_id: 1,
            to_id: 2,
            amount: Decimal::new(3050, 2),
        };
        let v = serde_json::to_value(req).unwrap();
        assert_eq!(v, json!({"fromId": 1, "toId": 2, "amount": 30.5}));
    }

    #[test]
    fn account_request_omits_absent_optionals() {
        let req = AccountRequest {
            name: "Saúde".into(),
            description: None,
            balance: Decimal::ZERO,
            active: None,
        };
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v, json!({"nome": "Saúde", "valor": 0.0}));
    }

    #[test]
    fn api_error_tolerates_partial_envelope() {
        let e: ApiError = serde_json::from_str(r#"{"message":"Invalid transfer"}"#).unwrap();
        assert_eq!(e.message(), Some("Invalid transfer"));
        assert_eq!(e.status, None);
        assert_eq!(e.field_errors().count(), 0);
    }

    #[test]
    fn api_error_timestamp_forms() {
        let spring = ApiError {
            timestamp: Some("2025-03-04T10:11:12.345".into()),
            ..Default::default()
        };
        assert_eq!(
            spring.occurred_at().unwrap().to_string(),
            "2025-03-04 10:11:12.345"
        );
        let rfc = ApiError {
            timestamp: Some("2025-03-04T10:11:12Z".into()),
            ..Default::default()
        };
        assert!(rfc.occurred_at().is_some());
        let junk = ApiError {
            timestamp: Some("yesterday".into()),
            ..Default::default()
        };
        assert!(junk.occurred_at().is_none());
    }
}
