// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::{self, Allocation, CycleTotals};
use crate::utils::{fmt_money, get_config, load_transactions, maybe_print_json, pretty_table};
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Serialize)]
pub struct ConfigSummary {
    pub emp_name: String,
    pub cycle_start_date: Option<NaiveDate>,
    pub opening_balance: Decimal,
}

/// The full tracker state: what the original dashboard request returned.
#[derive(Serialize)]
pub struct TrackerData {
    pub config: ConfigSummary,
    pub actuals: CycleTotals,
    #[serde(flatten)]
    pub allocation: Allocation,
}

/// Recompute the tracker state from a fresh ledger scan. A missing profile
/// yields a zeroed state so an empty dashboard can still render.
pub fn tracker_data(conn: &Connection) -> Result<TrackerData> {
    let Some(config) = get_config(conn)? else {
        let totals = CycleTotals::default();
        let allocation = engine::allocate(&totals, Decimal::ZERO, Decimal::ZERO);
        return Ok(TrackerData {
            config: ConfigSummary {
                emp_name: String::new(),
                cycle_start_date: None,
                opening_balance: Decimal::ZERO,
            },
            actuals: totals,
            allocation,
        });
    };

    let rows = load_transactions(conn)?;
    let totals = engine::aggregate(&rows, config.cycle_start_date);
    let allocation = engine::allocate(&totals, config.salary_plan, config.opening_balance);
    Ok(TrackerData {
        config: ConfigSummary {
            emp_name: config.emp_name,
            cycle_start_date: config.cycle_start_date,
            opening_balance: config.opening_balance,
        },
        actuals: totals,
        allocation,
    })
}

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let data = tracker_data(conn)?;
    if maybe_print_json(json_flag, false, &data)? {
        return Ok(());
    }

    let start = data
        .config
        .cycle_start_date
        .map(|d| d.to_string())
        .unwrap_or_else(|| "not set".into());
    println!("Cycle since {} ({})", start, data.config.emp_name);
    println!(
        "Opening {}  Salary {}  Other income {}",
        fmt_money(&data.config.opening_balance),
        fmt_money(&data.actuals.salary),
        fmt_money(&data.actuals.other_income),
    );

    let goals = &data.allocation.goals;
    let rows = vec![
        goal_row("Family (60%)", data.actuals.family, goals.family),
        goal_row("Shares (25% of pool)", data.actuals.shares, goals.shares),
        goal_row("Savings (25% of pool)", data.actuals.savings, goals.savings),
        goal_row(
            "Wallet (50% of pool)",
            data.allocation.wallet.total_spent,
            goals.wallet,
        ),
    ];
    println!(
        "{}",
        pretty_table(&["Goal", "Actual", "Target", "Pending", "Progress"], rows)
    );

    let wallet = &data.allocation.wallet;
    println!(
        "Wallet balance {}  (available {}, spent {})",
        fmt_money(&wallet.balance),
        fmt_money(&wallet.total_available),
        fmt_money(&wallet.total_spent),
    );
    if !data.actuals.other_debit.is_zero() {
        println!("Uncategorized debits {}", fmt_money(&data.actuals.other_debit));
    }
    println!(
        "Net P2P {}  Approx bank balance {}",
        fmt_money(&data.allocation.p2p_net),
        fmt_money(&wallet.approx_bank_balance),
    );
    Ok(())
}

fn goal_row(name: &str, actual: Decimal, goal: Decimal) -> Vec<String> {
    let pending = (goal - actual).max(Decimal::ZERO);
    // Display clamps to [0, 100]; the raw percentage is not stored.
    let pct = engine::percent_complete(actual.max(Decimal::ZERO), goal)
        .min(Decimal::ONE_HUNDRED)
        .round_dp(1);
    vec![
        name.to_string(),
        fmt_money(&actual),
        fmt_money(&goal),
        fmt_money(&pending),
        format!("{}%", pct),
    ]
}
