// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path;

use anyhow::Result;

use super::required;
use crate::config::{self, Settings, UrlSource};
use crate::utils::pretty_table;

/// `config` subcommands. `effective` is the URL this invocation resolved.
pub fn handle(
    m: &clap::ArgMatches,
    path: &Path,
    effective: (&str, UrlSource),
) -> Result<()> {
    match m.subcommand() {
        Some(("set-api-url", sub)) => {
            let url = config::validate_api_url(required::<String>(sub, "url")?)?;
            let mut settings = config::load_from(path).unwrap_or_default();
            settings.api_url = Some(url.clone());
            config::save_to(path, &settings)?;
            println!("API URL set to {}", url);
        }
        Some(("reset", _)) => {
            if config::reset(path)? {
                println!("Removed {}", path.display());
            } else {
                println!("No saved settings at {}", path.display());
            }
        }
        _ => show(path, effective),
    }
    Ok(())
}

fn show(path: &Path, (url, source): (&str, UrlSource)) {
    let saved = config::load_from(path)
        .ok()
        .and_then(|s: Settings| s.api_url)
        .unwrap_or_else(|| "-".to_string());
    let rows = vec![
        vec!["api_url".to_string(), url.to_string(), source.to_string()],
        vec![
            "saved api_url".to_string(),
            saved,
            path.display().to_string(),
        ],
    ];
    println!("{}", pretty_table(&["Setting", "Value", "Source"], rows));
}
