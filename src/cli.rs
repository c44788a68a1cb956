// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn period_arg() -> Arg {
    Arg::new("period")
        .long("period")
        .short('p')
        .required(true)
        .help("Period id or name")
}

fn today_arg() -> Arg {
    Arg::new("today")
        .long("today")
        .help("Override today's date (YYYY-MM-DD)")
}

fn id_arg() -> Arg {
    Arg::new("id").long("id").required(true)
}

/// Negative values must reach the amount parser so they fail as amounts,
/// not as unknown flags.
fn amount_arg(required: bool) -> Arg {
    Arg::new("amount")
        .long("amount")
        .required(required)
        .allow_negative_numbers(true)
}

fn named_item(name: &'static str, about: &'static str) -> Command {
    Command::new(name)
        .about(about)
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .about("Add an item to a period")
                .arg(period_arg())
                .arg(Arg::new("name").long("name").required(true))
                .arg(amount_arg(true)),
        )
        .subcommand(json_args(
            Command::new("list")
                .about("List the items of a period")
                .arg(period_arg()),
        ))
        .subcommand(
            Command::new("edit")
                .about("Change the name or amount of an item")
                .arg(id_arg())
                .arg(Arg::new("name").long("name"))
                .arg(amount_arg(false)),
        )
        .subcommand(Command::new("rm").about("Remove an item").arg(id_arg()))
}

pub fn build_cli() -> Command {
    Command::new("moneyflow")
        .version(crate_version!())
        .about("Period-based personal finance tracker with a daily safe-to-spend budget")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .help("Path to the SQLite database (overrides MONEYFLOW_DB)"),
        )
        .subcommand(Command::new("init").about("Create the database if missing"))
        .subcommand(
            Command::new("period")
                .about("Accounting periods")
                .subcommand_required(true)
                .subcommand(
                    Command::new("create")
                        .about("Create a period, seeded from the template")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("start")
                                .long("start")
                                .help("First day (default: first day of this month)"),
                        )
                        .arg(
                            Arg::new("end")
                                .long("end")
                                .help("Last day (default: last day of the start month)"),
                        )
                        .arg(
                            Arg::new("investment")
                                .long("investment")
                                .help("Percent of income set aside (0-100)"),
                        )
                        .arg(
                            Arg::new("no_template")
                                .long("no-template")
                                .action(ArgAction::SetTrue)
                                .help("Do not copy template items"),
                        ),
                )
                .subcommand(json_args(Command::new("list").about("List periods")))
                .subcommand(json_args(
                    Command::new("show")
                        .about("Summary and daily budget of a period")
                        .arg(period_arg())
                        .arg(today_arg()),
                ))
                .subcommand(
                    Command::new("rename")
                        .arg(period_arg())
                        .arg(Arg::new("name").long("name").required(true)),
                )
                .subcommand(
                    Command::new("invest")
                        .about("Set the investment percentage (clamped to 0-100)")
                        .arg(period_arg())
                        .arg(
                            Arg::new("percent")
                                .long("percent")
                                .required(true)
                                .allow_negative_numbers(true),
                        ),
                )
                .subcommand(Command::new("close").arg(period_arg()))
                .subcommand(Command::new("reopen").arg(period_arg()))
                .subcommand(
                    Command::new("rm")
                        .about("Delete a period and all of its transactions")
                        .arg(period_arg()),
                )
                .subcommand(json_args(
                    Command::new("missed")
                        .about("Past days of the period without any transaction")
                        .arg(period_arg())
                        .arg(today_arg()),
                )),
        )
        .subcommand(named_item("entry", "Income entries"))
        .subcommand(named_item("fixed", "Fixed expenses"))
        .subcommand(
            Command::new("tx")
                .about("Variable expenses")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add")
                        .arg(period_arg())
                        .arg(amount_arg(true))
                        .arg(
                            Arg::new("description")
                                .long("description")
                                .short('d')
                                .default_value(""),
                        )
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .help("Day of the expense (default: today)"),
                        ),
                )
                .subcommand(json_args(
                    Command::new("list")
                        .arg(period_arg())
                        .arg(
                            Arg::new("match")
                                .long("match")
                                .help("Regex filter on the description"),
                        )
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("edit")
                        .arg(id_arg())
                        .arg(amount_arg(false))
                        .arg(Arg::new("description").long("description").short('d'))
                        .arg(Arg::new("date").long("date")),
                )
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("template")
                .about("Default items copied into new periods")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add-entry")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(amount_arg(true)),
                )
                .subcommand(
                    Command::new("add-fixed")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(amount_arg(true)),
                )
                .subcommand(json_args(Command::new("list")))
                .subcommand(Command::new("rm").arg(id_arg()))
                .subcommand(Command::new("clear")),
        )
        .subcommand(
            Command::new("export")
                .about("Write a backup (json) or the transactions (csv)")
                .arg(Arg::new("out").long("out").required(true))
                .arg(Arg::new("format").long("format").default_value("json")),
        )
        .subcommand(
            Command::new("import")
                .about("Replace all data with a JSON backup")
                .arg(Arg::new("path").long("path").required(true)),
        )
        .subcommand(
            Command::new("config")
                .subcommand_required(true)
                .subcommand(Command::new("show"))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("key").long("key").required(true))
                        .arg(
                            Arg::new("value")
                                .long("value")
                                .required(true)
                                .allow_negative_numbers(true),
                        ),
                ),
        )
}
