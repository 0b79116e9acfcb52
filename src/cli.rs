// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, command, value_parser};

use crate::config::API_URL_ENV;

fn id_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .required(true)
        .value_parser(value_parser!(i64))
        .help(help)
}

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

fn account_fields(cmd: Command) -> Command {
    cmd.arg(Arg::new("name").long("name").required(true).help("Name (max 100 chars)"))
        .arg(
            Arg::new("description")
                .long("description")
                .help("Description (max 255 chars); on update, keeps the current one if omitted"),
        )
        .arg(
            Arg::new("balance")
                .long("balance")
                .required(true)
                .allow_negative_numbers(true)
                .help("Balance, zero or greater (e.g. 150.00 or 150,00)"),
        )
}

pub fn build_cli() -> Command {
    command!()
        .name("beneficios")
        .about("Manage benefit accounts and transfer balances between them")
        .arg(
            Arg::new("api_url")
                .long("api-url")
                .global(true)
                .env(API_URL_ENV)
                .help("API base URL, e.g. http://localhost:8080/api/v1"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("More logging on stderr (-v info, -vv debug)"),
        )
        .subcommand(json_flags(
            Command::new("list")
                .about("List every beneficio, inactive ones included")
                .arg(
                    Arg::new("active_only")
                        .long("active-only")
                        .action(ArgAction::SetTrue)
                        .help("Hide deactivated beneficios"),
                ),
        ))
        .subcommand(json_flags(
            Command::new("show")
                .about("Show a single beneficio")
                .arg(id_arg("id", "Beneficio id")),
        ))
        .subcommand(account_fields(
            Command::new("create").about("Create a beneficio").arg(
                Arg::new("inactive")
                    .long("inactive")
                    .action(ArgAction::SetTrue)
                    .help("Create it already deactivated"),
            ),
        ))
        .subcommand(account_fields(
            Command::new("update")
                .about("Edit a beneficio")
                .arg(id_arg("id", "Beneficio id"))
                .arg(
                    Arg::new("active")
                        .long("active")
                        .value_parser(value_parser!(bool))
                        .help("Set the active flag (true|false); keeps the current value if omitted"),
                ),
        ))
        .subcommand(
            Command::new("delete")
                .about("Deactivate a beneficio (soft delete)")
                .arg(id_arg("id", "Beneficio id"))
                .arg(
                    Arg::new("yes")
                        .long("yes")
                        .short('y')
                        .action(ArgAction::SetTrue)
                        .help("Skip the confirmation prompt"),
                ),
        )
        .subcommand(
            Command::new("transfer")
                .about("Move balance from one active beneficio to another")
                .arg(id_arg("from", "Source beneficio id"))
                .arg(id_arg("to", "Destination beneficio id"))
                .arg(
                    Arg::new("amount")
                        .long("amount")
                        .required(true)
                        .allow_negative_numbers(true)
                        .help("Amount to move, greater than zero"),
                )
                .arg(
                    Arg::new("check")
                        .long("check")
                        .action(ArgAction::SetTrue)
                        .help("Only validate; do not submit"),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export the current directory to a file")
                .arg(
                    Arg::new("format")
                        .long("format")
                        .default_value("csv")
                        .value_parser(["csv", "json"])
                        .help("csv|json"),
                )
                .arg(Arg::new("out").long("out").required(true).help("Output path")),
        )
        .subcommand(
            Command::new("config")
                .about("Show or change client settings")
                .subcommand(Command::new("show").about("Print the effective API URL"))
                .subcommand(
                    Command::new("set-api-url")
                        .about("Persist the API base URL")
                        .arg(Arg::new("url").required(true)),
                )
                .subcommand(Command::new("reset").about("Remove saved settings")),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_well_formed() {
        build_cli().debug_assert();
    }

    #[test]
    fn global_flags_after_subcommand() {
        let m = build_cli().get_matches_from([
            "beneficios",
            "list",
            "--api-url",
            "http://h/api/v1",
            "-vv",
        ]);
        assert_eq!(
            m.get_one::<String>("api_url").map(String::as_str),
            Some("http://h/api/v1")
        );
        assert_eq!(m.get_count("verbose"), 2);
    }

    #[test]
    fn transfer_accepts_negative_amount_for_validation() {
        let m = build_cli().get_matches_from([
            "beneficios", "transfer", "--from", "1", "--to", "2", "--amount", "-5",
        ]);
        let (_, sub) = m.subcommand().unwrap();
        assert_eq!(sub.get_one::<String>("amount").map(String::as_str), Some("-5"));
        assert_eq!(sub.get_one::<i64>("from"), Some(&1));
    }
}
