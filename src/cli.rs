// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{arg, crate_version, Command};

pub fn build_cli() -> Command {
    Command::new("paycycle")
        .about("Salary-cycle budgeting, 60/40 allocation, and cash-ledger CLI")
        .version(crate_version!())
        .subcommand(Command::new("init").about("Initialize the local database"))
        .subcommand(
            Command::new("profile")
                .about("Manage the cycle configuration")
                .subcommand(
                    Command::new("setup")
                        .about("Create the profile and open the first cycle")
                        .arg(arg!(--name <NAME> "Employee name").required(true))
                        .arg(arg!(--salary <AMOUNT> "Planned monthly salary").required(true))
                        .arg(arg!(--"opening-balance" <AMOUNT> "Carried-over balance"))
                        .arg(arg!(--"start-date" <DATE> "Cycle start date (YYYY-MM-DD)"))
                        .arg(arg!(--pan <PAN> "PAN number"))
                        .arg(arg!(--pf <PF> "PF number"))
                        .arg(arg!(--uan <UAN> "UAN number"))
                        .arg(arg!(--gross <AMOUNT> "Gross salary"))
                        .arg(arg!(--net <AMOUNT> "Net salary")),
                )
                .subcommand(
                    Command::new("update")
                        .about("Update profile fields")
                        .arg(arg!(--name <NAME> "Employee name"))
                        .arg(arg!(--salary <AMOUNT> "Planned monthly salary"))
                        .arg(arg!(--"opening-balance" <AMOUNT> "Carried-over balance"))
                        .arg(arg!(--"start-date" <DATE> "Cycle start date (YYYY-MM-DD)"))
                        .arg(arg!(--pan <PAN> "PAN number"))
                        .arg(arg!(--pf <PF> "PF number"))
                        .arg(arg!(--uan <UAN> "UAN number"))
                        .arg(arg!(--gross <AMOUNT> "Gross salary"))
                        .arg(arg!(--net <AMOUNT> "Net salary")),
                )
                .subcommand(
                    Command::new("show")
                        .about("Show the profile")
                        .arg(arg!(--json "Print JSON")),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Ledger transactions")
                .subcommand(
                    Command::new("log")
                        .about("Append a transaction to the ledger")
                        .arg(arg!(--amount <AMOUNT> "Positive amount").required(true))
                        .arg(arg!(--type <TYPE> "debit or credit").required(true))
                        .arg(arg!(--category <CATEGORY> "Category label (rules may infer it)"))
                        .arg(arg!(--"sub-category" <SUB> "Sub-category label"))
                        .arg(arg!(--date <DATE> "Transaction date (default today)"))
                        .arg(arg!(--entity <ENTITY> "Counterparty (person or ticker)"))
                        .arg(arg!(--mode <MODE> "Payment mode"))
                        .arg(arg!(--notes <NOTES> "Free-form notes"))
                        .arg(arg!(--symbol <SYMBOL> "Share symbol (Share Investment only)"))
                        .arg(arg!(--units <UNITS> "Units bought (Share Investment only)"))
                        .arg(arg!(--price <PRICE> "Average buy price (Share Investment only)")),
                )
                .subcommand(
                    Command::new("list")
                        .about("List ledger transactions")
                        .arg(arg!(--cycle <CYCLE> "Cycle tag filter (YYYY-MM)"))
                        .arg(arg!(--category <CATEGORY> "Category filter"))
                        .arg(arg!(--entity <ENTITY> "Entity filter"))
                        .arg(
                            arg!(--limit <N> "Max rows")
                                .value_parser(clap::value_parser!(usize)),
                        )
                        .arg(arg!(--json "Print JSON"))
                        .arg(arg!(--jsonl "Print JSON Lines")),
                ),
        )
        .subcommand(
            Command::new("dashboard")
                .about("Cycle goals, progress and wallet state")
                .arg(arg!(--json "Print JSON")),
        )
        .subcommand(
            Command::new("cycle")
                .about("Cycle rollover and archive")
                .subcommand(
                    Command::new("close")
                        .about("Close the cycle: archive a summary and roll the balance over")
                        .arg(arg!(--date <DATE> "Rollover date (default today)"))
                        .arg(arg!(--json "Print JSON")),
                )
                .subcommand(
                    Command::new("list")
                        .about("List archived cycles")
                        .arg(arg!(--json "Print JSON"))
                        .arg(arg!(--jsonl "Print JSON Lines")),
                ),
        )
        .subcommand(
            Command::new("history")
                .about("Range-filtered transactions with a per-category debit summary")
                .arg(arg!(--range <RANGE> "1d, 1w, 1m (cycle) or all").default_value("all"))
                .arg(arg!(--json "Print JSON")),
        )
        .subcommand(
            Command::new("portfolio")
                .about("Share investments")
                .subcommand(
                    Command::new("add")
                        .about("Record an investment lot")
                        .arg(arg!(--date <DATE> "Date invested").required(true))
                        .arg(arg!(--symbol <SYMBOL> "Share symbol").required(true))
                        .arg(arg!(--units <UNITS> "Units bought").required(true))
                        .arg(arg!(--price <PRICE> "Average buy price").required(true)),
                )
                .subcommand(
                    Command::new("list")
                        .about("List investment lots")
                        .arg(arg!(--json "Print JSON"))
                        .arg(arg!(--jsonl "Print JSON Lines")),
                )
                .subcommand(
                    Command::new("value")
                        .about("Portfolio value per symbol")
                        .arg(arg!(--live "Refresh quotes before valuing")),
                )
                .subcommand(Command::new("fetch").about("Refresh current prices from Yahoo")),
        )
        .subcommand(
            Command::new("document")
                .about("Document locker")
                .subcommand(
                    Command::new("add")
                        .about("Add a document record")
                        .arg(arg!(--name <NAME> "Full name on the document").required(true))
                        .arg(arg!(--type <TYPE> "Document type").required(true))
                        .arg(arg!(--number <NUMBER> "Document number").required(true))
                        .arg(arg!(--issued <DATE> "Issued date"))
                        .arg(arg!(--expiry <DATE> "Expiry date"))
                        .arg(arg!(--link <URL> "Drive link")),
                )
                .subcommand(
                    Command::new("list")
                        .about("List documents")
                        .arg(arg!(--json "Print JSON"))
                        .arg(arg!(--jsonl "Print JSON Lines")),
                ),
        )
        .subcommand(
            Command::new("rules")
                .about("Auto-categorization rules")
                .subcommand(
                    Command::new("add")
                        .about("Add a rule matching entity/notes")
                        .arg(arg!(--pattern <REGEX> "Pattern to match").required(true))
                        .arg(arg!(--category <CATEGORY> "Category to assign"))
                        .arg(arg!(--"sub-category" <SUB> "Sub-category to assign")),
                )
                .subcommand(Command::new("list").about("List rules"))
                .subcommand(
                    Command::new("rm")
                        .about("Remove a rule")
                        .arg(arg!(--id <ID> "Rule id").required(true)),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export data to a file")
                .subcommand(
                    Command::new("transactions")
                        .about("Export the ledger")
                        .arg(arg!(--format <FORMAT> "csv or json").default_value("csv"))
                        .arg(arg!(--out <PATH> "Output path").required(true)),
                ),
        )
        .subcommand(Command::new("doctor").about("Ledger integrity report"))
}
