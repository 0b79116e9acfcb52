// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use serde_json::json;

use super::required;
use crate::client::BeneficioApi;
use crate::directory::AccountDirectory;

pub fn handle(api: &dyn BeneficioApi, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = required::<String>(sub, "format")?.to_lowercase();
    let out = required::<String>(sub, "out")?;

    let dir = AccountDirectory::load(api).context("Failed to load beneficios")?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)
                .with_context(|| format!("Cannot write {}", out))?;
            wtr.write_record(["id", "name", "description", "balance", "active"])?;
            for a in dir.accounts() {
                wtr.write_record([
                    a.id.to_string(),
                    a.name.clone(),
                    a.description.clone().unwrap_or_default(),
                    a.balance.to_string(),
                    a.active.to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<_> = dir
                .accounts()
                .iter()
                .map(|a| {
                    json!({
                        "id": a.id, "name": a.name, "description": a.description,
                        "balance": a.balance.to_string(), "active": a.active
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)
                .with_context(|| format!("Cannot write {}", out))?;
        }
        other => anyhow::bail!("Unknown format: {} (use csv|json)", other),
    }
    println!("Exported {} beneficios to {}", dir.len(), out);
    Ok(())
}
