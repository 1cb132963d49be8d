// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{fmt_money, get_config, get_config_required, maybe_print_json, parse_date, parse_decimal, today};
use anyhow::{anyhow, Result};
use rusqlite::{params, Connection};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("setup", sub)) => setup(conn, sub)?,
        Some(("update", sub)) => update(conn, sub)?,
        Some(("show", sub)) => show(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn setup(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap().trim().to_string();
    let salary = parse_decimal(sub.get_one::<String>("salary").unwrap().trim())?;
    let opening = match sub.get_one::<String>("opening-balance") {
        Some(raw) => parse_decimal(raw.trim())?,
        None => rust_decimal::Decimal::ZERO,
    };
    let start = match sub.get_one::<String>("start-date") {
        Some(raw) => parse_date(raw.trim())?,
        None => today(),
    };

    conn.execute(
        "INSERT INTO config(id, emp_name, salary_plan, opening_balance, cycle_start_date,
                            pan_number, pf_number, uan_number, gross_salary, net_salary)
         VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
         ON CONFLICT(id) DO UPDATE SET
            emp_name=excluded.emp_name,
            salary_plan=excluded.salary_plan,
            opening_balance=excluded.opening_balance,
            cycle_start_date=excluded.cycle_start_date,
            pan_number=excluded.pan_number,
            pf_number=excluded.pf_number,
            uan_number=excluded.uan_number,
            gross_salary=excluded.gross_salary,
            net_salary=excluded.net_salary,
            updated_at=datetime('now')",
        params![
            name,
            salary.to_string(),
            opening.to_string(),
            start.to_string(),
            sub.get_one::<String>("pan").map(|s| s.trim().to_string()),
            sub.get_one::<String>("pf").map(|s| s.trim().to_string()),
            sub.get_one::<String>("uan").map(|s| s.trim().to_string()),
            opt_decimal(sub, "gross")?,
            opt_decimal(sub, "net")?,
        ],
    )?;
    println!(
        "Profile saved for {}; cycle starts {} with opening balance {}",
        name,
        start,
        fmt_money(&opening)
    );
    Ok(())
}

fn opt_decimal(sub: &clap::ArgMatches, key: &str) -> Result<Option<String>> {
    match sub.get_one::<String>(key) {
        Some(raw) => Ok(Some(parse_decimal(raw.trim())?.to_string())),
        None => Ok(None),
    }
}

fn update(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    // Precondition: the singleton must exist before partial updates.
    get_config_required(conn)?;

    let mut sets: Vec<String> = Vec::new();
    let mut params_vec: Vec<String> = Vec::new();

    if let Some(name) = sub.get_one::<String>("name") {
        sets.push("emp_name=?".into());
        params_vec.push(name.trim().to_string());
    }
    if let Some(raw) = sub.get_one::<String>("salary") {
        sets.push("salary_plan=?".into());
        params_vec.push(parse_decimal(raw.trim())?.to_string());
    }
    if let Some(raw) = sub.get_one::<String>("opening-balance") {
        sets.push("opening_balance=?".into());
        params_vec.push(parse_decimal(raw.trim())?.to_string());
    }
    if let Some(raw) = sub.get_one::<String>("start-date") {
        sets.push("cycle_start_date=?".into());
        params_vec.push(parse_date(raw.trim())?.to_string());
    }
    for (arg, col) in [
        ("pan", "pan_number"),
        ("pf", "pf_number"),
        ("uan", "uan_number"),
    ] {
        if let Some(v) = sub.get_one::<String>(arg) {
            sets.push(format!("{}=?", col));
            params_vec.push(v.trim().to_string());
        }
    }
    if let Some(raw) = sub.get_one::<String>("gross") {
        sets.push("gross_salary=?".into());
        params_vec.push(parse_decimal(raw.trim())?.to_string());
    }
    if let Some(raw) = sub.get_one::<String>("net") {
        sets.push("net_salary=?".into());
        params_vec.push(parse_decimal(raw.trim())?.to_string());
    }

    if sets.is_empty() {
        return Err(anyhow!("Nothing to update"));
    }

    let sql = format!(
        "UPDATE config SET {}, updated_at=datetime('now') WHERE id=1",
        sets.join(", ")
    );
    let params: Vec<&dyn rusqlite::ToSql> = params_vec
        .iter()
        .map(|s| s as &dyn rusqlite::ToSql)
        .collect();
    conn.execute(&sql, rusqlite::params_from_iter(params))?;
    println!("Profile updated");
    Ok(())
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let Some(config) = get_config(conn)? else {
        println!("No profile yet; run 'paycycle profile setup'");
        return Ok(());
    };
    if maybe_print_json(json_flag, false, &config)? {
        return Ok(());
    }
    println!("Name             {}", config.emp_name);
    println!("Salary plan      {}", fmt_money(&config.salary_plan));
    println!("Opening balance  {}", fmt_money(&config.opening_balance));
    println!(
        "Cycle start      {}",
        config
            .cycle_start_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "not set".into())
    );
    if let Some(pan) = &config.pan_number {
        println!("PAN              {}", pan);
    }
    if let Some(pf) = &config.pf_number {
        println!("PF               {}", pf);
    }
    if let Some(uan) = &config.uan_number {
        println!("UAN              {}", uan);
    }
    Ok(())
}
