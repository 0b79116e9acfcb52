// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};

use super::{print_directory, report_field_errors, required, violations_error};
use crate::client::BeneficioApi;
use crate::directory::AccountDirectory;
use crate::session::{SessionError, TransferSession};
use crate::utils::{fmt_brl, parse_decimal, pretty_table};
use crate::validation::{ValidTransfer, ValidationResult};

pub fn handle(api: &dyn BeneficioApi, sub: &clap::ArgMatches) -> Result<()> {
    let from = *required::<i64>(sub, "from")?;
    let to = *required::<i64>(sub, "to")?;
    let amount = parse_decimal(required::<String>(sub, "amount")?)?;

    let mut directory = AccountDirectory::load(api).context("Failed to load beneficios")?;
    let mut session = TransferSession::open(directory.transfer_pool());
    session.set_from(Some(from));
    session.set_to(Some(to));
    let validation = session.set_amount(Some(amount));

    if sub.get_flag("check") {
        return match validation {
            ValidationResult::Valid(t) => {
                print_summary(t);
                println!("Transfer is valid (not submitted)");
                Ok(())
            }
            ValidationResult::Invalid(v) => Err(violations_error("Transfer", v)),
        };
    }

    let outcome = match session.submit(api) {
        Ok(outcome) => outcome,
        Err(SessionError::Invalid(v)) => return Err(violations_error("Transfer", &v)),
        Err(e) => {
            if let SessionError::Rejected(ce) = &e {
                report_field_errors(ce);
            }
            return Err(e).context("Transfer failed");
        }
    };
    print_summary(&outcome.transfer);
    println!("Transfer completed");

    if session.close() {
        directory
            .reload(api)
            .context("Transfer completed but reloading beneficios failed")?;
        print_directory(&directory, false);
    }
    Ok(())
}

fn print_summary(t: &ValidTransfer) {
    let rows = vec![
        vec![
            "From".to_string(),
            format!("#{} {}", t.from.id, t.from.name),
            fmt_brl(&t.from.balance),
        ],
        vec![
            "To".to_string(),
            format!("#{} {}", t.to.id, t.to.name),
            fmt_brl(&t.to.balance),
        ],
        vec!["Amount".to_string(), String::new(), fmt_brl(&t.amount)],
    ];
    println!("{}", pretty_table(&["", "Beneficio", "Balance"], rows));
}
