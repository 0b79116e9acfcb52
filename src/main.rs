// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use clap::parser::ValueSource;
use tracing::debug;

use beneficios::client::HttpApi;
use beneficios::config::{self, UrlSource};
use beneficios::{cli, commands, logging};

fn main() -> Result<()> {
    let matches = cli::build_cli().get_matches();
    logging::init_logging(matches.get_count("verbose"));

    let cfg_path = config::config_path();
    let settings = config::load_or_default(cfg_path.as_deref().ok());
    let explicit = matches.get_one::<String>("api_url").map(|u| {
        let source = match matches.value_source("api_url") {
            Some(ValueSource::EnvVariable) => UrlSource::Environment,
            _ => UrlSource::CommandLine,
        };
        (u.as_str(), source)
    });
    let (api_url, source) = config::resolve_api_url(explicit, &settings);
    debug!(%api_url, %source, "resolved API URL");

    if let Some(("config", sub)) = matches.subcommand() {
        let cfg_path = cfg_path?;
        return commands::settings::handle(sub, &cfg_path, (api_url.as_str(), source));
    }

    let api = HttpApi::new(&api_url)
        .with_context(|| format!("Cannot use API URL '{}' (from {})", api_url, source))?;

    match matches.subcommand() {
        Some(("list", sub)) => commands::accounts::list(&api, sub)?,
        Some(("show", sub)) => commands::accounts::show(&api, sub)?,
        Some(("create", sub)) => commands::accounts::create(&api, sub)?,
        Some(("update", sub)) => commands::accounts::update(&api, sub)?,
        Some(("delete", sub)) => commands::accounts::delete(&api, sub)?,
        Some(("transfer", sub)) => commands::transfer::handle(&api, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&api, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
