// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::ids::{IdGenerator, UuidGenerator};
use crate::models::Transaction;
use crate::utils::{
    fmt_money, id_for_period, maybe_print_json, parse_amount, parse_date, pretty_table, today_or,
};
use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use regex::Regex;
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => remove(conn, sub)?,
        _ => {}
    }
    Ok(())
}

/// Record a variable expense. Dates outside the period are accepted but logged.
pub fn record<G: IdGenerator>(
    conn: &Connection,
    period_id: &str,
    date: NaiveDate,
    amount: Decimal,
    description: &str,
    ids: &mut G,
) -> Result<Transaction> {
    let period = db::load_period(conn, period_id)?;
    if date < period.start_date || date > period.end_date {
        warn!(
            %date,
            start = %period.start_date,
            end = %period.end_date,
            "transaction dated outside its period"
        );
    }
    let t = Transaction {
        id: ids.next_id(),
        period_id: period.id,
        amount,
        description: description.to_string(),
        date,
    };
    db::insert_transaction(conn, &t)?;
    info!(id = %t.id, period = %t.period_id, "transaction recorded");
    Ok(t)
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let period_id = id_for_period(conn, sub.get_one::<String>("period").unwrap())?;
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let description = sub.get_one::<String>("description").unwrap().trim();
    let date = today_or(sub.get_one::<String>("date"))?;
    let t = record(conn, &period_id, date, amount, description, &mut UuidGenerator)?;
    println!("Recorded {} on {} '{}' (id {})", t.amount, t.date, t.description, t.id);
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub amount: String,
    pub description: String,
}

/// Transactions of the selected period, newest first, filtered by `--match`
/// and capped by `--limit`.
pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let period_id = id_for_period(conn, sub.get_one::<String>("period").unwrap())?;
    let pattern = sub
        .get_one::<String>("match")
        .map(|p| Regex::new(p.trim()).with_context(|| format!("Invalid regex pattern '{}'", p)))
        .transpose()?;
    let limit = sub.get_one::<usize>("limit").copied();

    let mut txs = db::load_transactions(conn, &period_id)?;
    txs.reverse();
    let data = txs
        .into_iter()
        .filter(|t| pattern.as_ref().is_none_or(|re| re.is_match(&t.description)))
        .take(limit.unwrap_or(usize::MAX))
        .map(|t| TransactionRow {
            id: t.id,
            date: t.date.to_string(),
            amount: fmt_money(&t.amount),
            description: t.description,
        })
        .collect();
    Ok(data)
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|r| {
                vec![
                    r.id.clone(),
                    r.date.clone(),
                    r.amount.clone(),
                    r.description.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Date", "Amount", "Description"], rows)
        );
    }
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap().trim();
    let amount = sub
        .get_one::<String>("amount")
        .map(|s| parse_amount(s))
        .transpose()?
        .map(|d| d.to_string());
    let description = sub
        .get_one::<String>("description")
        .map(|s| s.trim().to_string());
    let date = sub
        .get_one::<String>("date")
        .map(|s| parse_date(s))
        .transpose()?;
    let n = conn.execute(
        "UPDATE transactions SET amount=COALESCE(?2, amount),
             description=COALESCE(?3, description), date=COALESCE(?4, date)
         WHERE id=?1",
        params![id, amount, description, date],
    )?;
    if n == 0 {
        return Err(anyhow!("No transaction with id '{}'", id));
    }
    println!("Updated transaction {}", id);
    Ok(())
}

fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap().trim();
    let n = conn.execute("DELETE FROM transactions WHERE id=?1", params![id])?;
    if n == 0 {
        return Err(anyhow!("No transaction with id '{}'", id));
    }
    println!("Removed transaction {}", id);
    Ok(())
}
