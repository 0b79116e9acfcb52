// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::io;

use anyhow::{Context, Result};

use super::{print_directory, report_field_errors, required, violations_error};
use crate::client::BeneficioApi;
use crate::directory::AccountDirectory;
use crate::models::{Account, AccountRequest};
use crate::utils::{confirm, fmt_brl, maybe_print_json, parse_decimal, pretty_table};
use crate::validation::validate_account_form;

pub fn list(api: &dyn BeneficioApi, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(api, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        print_directory(&AccountDirectory::from(data), false);
    }
    Ok(())
}

pub fn query_rows(api: &dyn BeneficioApi, sub: &clap::ArgMatches) -> Result<Vec<Account>> {
    let dir = AccountDirectory::load(api).context("Failed to load beneficios")?;
    let active_only = sub.get_flag("active_only");
    Ok(dir
        .accounts()
        .iter()
        .filter(|a| !active_only || a.active)
        .cloned()
        .collect())
}

pub fn show(api: &dyn BeneficioApi, sub: &clap::ArgMatches) -> Result<()> {
    let id = *required::<i64>(sub, "id")?;
    let acct = api
        .get(id)
        .with_context(|| format!("Failed to load beneficio #{}", id))?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &acct)? {
        let rows = vec![
            vec!["Id".into(), acct.id.to_string()],
            vec!["Name".into(), acct.name.clone()],
            vec![
                "Description".into(),
                acct.description.clone().unwrap_or_default(),
            ],
            vec!["Balance".into(), fmt_brl(&acct.balance)],
            vec!["Status".into(), acct.status_label().into()],
        ];
        println!("{}", pretty_table(&["Field", "Value"], rows));
    }
    Ok(())
}

/// Reads and validates the shared create/update fields.
pub fn form_request(
    sub: &clap::ArgMatches,
    description: Option<&str>,
    active: Option<bool>,
) -> Result<AccountRequest> {
    let name = required::<String>(sub, "name")?;
    let balance = parse_decimal(required::<String>(sub, "balance")?)?;
    validate_account_form(name, description, Some(balance), active)
        .map_err(|v| violations_error("Beneficio", &v))
}

pub fn create(api: &dyn BeneficioApi, sub: &clap::ArgMatches) -> Result<()> {
    let active = sub.get_flag("inactive").then_some(false);
    let description = sub.get_one::<String>("description").map(String::as_str);
    let req = form_request(sub, description, active)?;
    let created = api
        .create(&req)
        .inspect_err(report_field_errors)
        .context("Failed to create beneficio")?;
    println!(
        "Created beneficio #{} '{}' ({})",
        created.id,
        created.name,
        fmt_brl(&created.balance)
    );
    refresh(api)
}

pub fn update(api: &dyn BeneficioApi, sub: &clap::ArgMatches) -> Result<()> {
    let id = *required::<i64>(sub, "id")?;
    // The backend treats an absent flag as active and an absent description
    // as cleared, so omitted options keep the stored values.
    let current = api
        .get(id)
        .with_context(|| format!("Failed to load beneficio #{}", id))?;
    let active = sub
        .get_one::<bool>("active")
        .copied()
        .unwrap_or(current.active);
    let description = sub
        .get_one::<String>("description")
        .map(String::as_str)
        .or(current.description.as_deref());
    let req = form_request(sub, description, Some(active))?;
    let updated = api
        .update(id, &req)
        .inspect_err(report_field_errors)
        .with_context(|| format!("Failed to update beneficio #{}", id))?;
    println!("Updated beneficio #{} '{}'", updated.id, updated.name);
    refresh(api)
}

pub fn delete(api: &dyn BeneficioApi, sub: &clap::ArgMatches) -> Result<()> {
    let id = *required::<i64>(sub, "id")?;
    if !sub.get_flag("yes") {
        let acct = api
            .get(id)
            .with_context(|| format!("Failed to load beneficio #{}", id))?;
        let question = format!("Deactivate beneficio '{}'?", acct.name);
        if !confirm(&mut io::stdin().lock(), &mut io::stdout(), &question)? {
            println!("Cancelled");
            return Ok(());
        }
    }
    api.delete(id)
        .with_context(|| format!("Failed to deactivate beneficio #{}", id))?;
    println!("Deactivated beneficio #{}", id);
    refresh(api)
}

fn refresh(api: &dyn BeneficioApi) -> Result<()> {
    let dir = AccountDirectory::load(api).context("Failed to reload beneficios")?;
    print_directory(&dir, false);
    Ok(())
}
