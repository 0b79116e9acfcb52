// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use beneficios::client::InMemoryApi;
use beneficios::{cli, commands::exporter, models::Account};
use rust_decimal::Decimal;
use serde_json::json;
use tempfile::tempdir;

fn api() -> InMemoryApi {
    InMemoryApi::with_accounts(vec![
        Account {
            id: 1,
            name: "Alimentação".into(),
            description: Some("Vale, mensal".into()),
            balance: Decimal::new(123456, 2),
            active: true,
        },
        Account {
            id: 2,
            name: "Cultura".into(),
            description: None,
            balance: Decimal::ZERO,
            active: false,
        },
    ])
}

fn run(format: &str, out: &str) {
    let matches =
        cli::build_cli().get_matches_from(["beneficios", "export", "--format", format, "--out", out]);
    if let Some(("export", sub)) = matches.subcommand() {
        exporter::handle(&api(), sub).unwrap();
    } else {
        panic!("export command not parsed");
    }
}

#[test]
fn export_csv_keeps_inactive_and_quotes() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("beneficios.csv");
    run("csv", &out.to_string_lossy());

    let body = std::fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(lines[0], "id,name,description,balance,active");
    assert_eq!(lines[1], "1,Alimentação,\"Vale, mensal\",1234.56,true");
    assert_eq!(lines[2], "2,Cultura,,0,false");
}

#[test]
fn export_json_uses_plain_field_names() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("beneficios.json");
    run("json", &out.to_string_lossy());

    let v: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(
        v[0],
        json!({"id": 1, "name": "Alimentação", "description": "Vale, mensal", "balance": "1234.56", "active": true})
    );
    assert_eq!(v[1]["description"], serde_json::Value::Null);
    assert_eq!(v.as_array().unwrap().len(), 2);
}
