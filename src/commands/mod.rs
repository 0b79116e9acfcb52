// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod accounts;
pub mod exporter;
pub mod settings;
pub mod transfer;

use anyhow::{Context, Result};
use tracing::debug;

use crate::directory::AccountDirectory;
use crate::error::ClientError;
use crate::utils::{fmt_brl, pretty_table};
use crate::validation::Violation;

/// Fetches an argument clap already marked as required.
pub(crate) fn required<'a, T>(m: &'a clap::ArgMatches, name: &str) -> Result<&'a T>
where
    T: std::any::Any + Clone + Send + Sync + 'static,
{
    m.get_one::<T>(name)
        .with_context(|| format!("Missing --{}", name.replace('_', "-")))
}

pub(crate) fn violations_error(what: &str, violations: &[Violation]) -> anyhow::Error {
    let lines: Vec<String> = violations.iter().map(|v| format!("  - {}", v)).collect();
    anyhow::anyhow!("{} is invalid:\n{}", what, lines.join("\n"))
}

pub(crate) fn print_directory(dir: &AccountDirectory, active_only: bool) {
    let rows: Vec<Vec<String>> = dir
        .accounts()
        .iter()
        .filter(|a| !active_only || a.active)
        .map(|a| {
            vec![
                a.id.to_string(),
                a.name.clone(),
                a.description.clone().unwrap_or_default(),
                fmt_brl(&a.balance),
                a.status_label().to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Id", "Name", "Description", "Balance", "Status"], rows)
    );
}

/// Prints the per-field errors of a server validation failure to stderr.
pub(crate) fn report_field_errors(err: &ClientError) {
    let Some(envelope) = err.envelope() else {
        return;
    };
    for (field, msg) in envelope.field_errors() {
        eprintln!("  {}: {}", field, msg);
    }
    if let Some(at) = envelope.occurred_at() {
        debug!(%at, "server reported error");
    }
}
