// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use reqwest::Url;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::BeneficioApi;
use crate::error::ClientError;
use crate::models::{Account, AccountRequest, TransferRequest};
use crate::utils::http_client;

/// `BeneficioApi` over HTTP. No retries; every call is a single request.
pub struct HttpApi {
    client: Client,
    base: Url,
}

impl HttpApi {
    pub fn new(api_url: &str) -> Result<Self, ClientError> {
        let client = http_client()?;
        Ok(Self::with_client(client, parse_base(api_url)?))
    }

    pub fn with_client(client: Client, base: Url) -> Self {
        Self { client, base }
    }

    fn url(&self, tail: &str) -> Result<Url, ClientError> {
        endpoint(&self.base, tail)
    }

    fn send(&self, method: &str, rb: RequestBuilder) -> Result<Response, ClientError> {
        let req = rb.build()?;
        let path = req.url().path().to_string();
        let resp = self.client.execute(req).map_err(|e| {
            warn!(method, %path, error = %e, "request failed");
            ClientError::Transport(e)
        })?;
        let status = resp.status();
        debug!(method, %path, status = status.as_u16(), "response");
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().unwrap_or_else(|e| {
            warn!(method, %path, error = %e, "could not read error body");
            String::new()
        });
        let err = ClientError::from_response(status, &body);
        warn!(method, %path, status = status.as_u16(), error = %err, "request rejected");
        Err(err)
    }

    fn json<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
        let bytes = resp.bytes()?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl BeneficioApi for HttpApi {
    fn list(&self) -> Result<Vec<Account>, ClientError> {
        let url = self.url("beneficios")?;
        let resp = self.send("GET", self.client.get(url))?;
        Self::json(resp)
    }

    fn get(&self, id: i64) -> Result<Account, ClientError> {
        let url = self.url(&format!("beneficios/{id}"))?;
        let resp = self.send("GET", self.client.get(url))?;
        Self::json(resp)
    }

    fn create(&self, req: &AccountRequest) -> Result<Account, ClientError> {
        let url = self.url("beneficios")?;
        let resp = self.send("POST", self.client.post(url).json(req))?;
        Self::json(resp)
    }

    fn update(&self, id: i64, req: &AccountRequest) -> Result<Account, ClientError> {
        let url = self.url(&format!("beneficios/{id}"))?;
        let resp = self.send("PUT", self.client.put(url).json(req))?;
        Self::json(resp)
    }

    fn delete(&self, id: i64) -> Result<(), ClientError> {
        let url = self.url(&format!("beneficios/{id}"))?;
        self.send("DELETE", self.client.delete(url))?;
        Ok(())
    }

    fn transfer(&self, req: &TransferRequest) -> Result<(), ClientError> {
        let url = self.url("beneficios/transfer")?;
        self.send("POST", self.client.post(url).json(req))?;
        Ok(())
    }
}

/// Parses the configured base URL. A trailing slash is added so that
/// relative joins keep the last path segment (`/api/v1` + `beneficios`).
pub fn parse_base(api_url: &str) -> Result<Url, ClientError> {
    let trimmed = api_url.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    let url = Url::parse(&with_slash).map_err(|_| ClientError::InvalidUrl(api_url.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ClientError::InvalidUrl(api_url.to_string()));
    }
    Ok(url)
}

pub fn endpoint(base: &Url, tail: &str) -> Result<Url, ClientError> {
    base.join(tail)
        .map_err(|_| ClientError::InvalidUrl(format!("{base}{tail}")))
}
