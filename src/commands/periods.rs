// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::daily::{DailyAllocation, allocate, days_without_transactions};
use crate::db;
use crate::error::MoneyflowError;
use crate::ids::{IdGenerator, UuidGenerator};
use crate::models::{AccountingPeriod, PeriodSummary};
use crate::summary::{Health, compute_summary};
use crate::template::apply_template;
use crate::utils::{
    fmt_money, get_default_investment, id_for_period, maybe_print_json, month_end, month_start,
    parse_date, parse_percentage, pretty_table, today_or,
};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info};

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("create", sub)) => create(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("show", sub)) => show(conn, sub)?,
        Some(("rename", sub)) => rename(conn, sub)?,
        Some(("invest", sub)) => invest(conn, sub)?,
        Some(("close", sub)) => set_open(conn, sub, false)?,
        Some(("reopen", sub)) => set_open(conn, sub, true)?,
        Some(("rm", sub)) => remove(conn, sub)?,
        Some(("missed", sub)) => missed(conn, sub)?,
        _ => {}
    }
    Ok(())
}

pub struct NewPeriod {
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub investment_percentage: Decimal,
    pub use_template: bool,
}

/// Store a new period, copying the template items in when requested.
pub fn create_period<G: IdGenerator>(
    conn: &mut Connection,
    new: NewPeriod,
    ids: &mut G,
) -> Result<AccountingPeriod> {
    if new.start > new.end {
        return Err(MoneyflowError::InvalidDateRange {
            start: new.start,
            end: new.end,
        }
        .into());
    }
    let mut period = AccountingPeriod::blank(ids.next_id(), new.name, new.start, new.end);
    period.investment_percentage = new.investment_percentage;
    if new.use_template {
        let template = db::load_template(conn)?;
        period = apply_template(&period, &template, ids);
    }

    let tx = conn.transaction()?;
    db::insert_period(&tx, &period)?;
    tx.commit()?;
    info!(
        id = %period.id,
        entries = period.entries.len(),
        fixed = period.fixed_expenses.len(),
        "period created"
    );
    Ok(period)
}

fn create(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap().trim().to_string();
    let start = match sub.get_one::<String>("start") {
        Some(s) => parse_date(s)?,
        None => month_start(Local::now().date_naive()),
    };
    let end = match sub.get_one::<String>("end") {
        Some(s) => parse_date(s)?,
        None => month_end(start),
    };
    let investment_percentage = match sub.get_one::<String>("investment") {
        Some(s) => parse_percentage(s)?,
        None => get_default_investment(conn)?,
    };
    let period = create_period(
        conn,
        NewPeriod {
            name,
            start,
            end,
            investment_percentage,
            use_template: !sub.get_flag("no_template"),
        },
        &mut UuidGenerator,
    )?;
    println!(
        "Created period '{}' ({} .. {}) id={} with {} entries, {} fixed expenses",
        period.name,
        period.start_date,
        period.end_date,
        period.id,
        period.entries.len(),
        period.fixed_expenses.len()
    );
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodRow {
    pub id: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_open: bool,
    pub investment_percentage: Decimal,
    pub total_entries: Decimal,
    pub current_variable_balance: Decimal,
}

pub fn list_rows(conn: &Connection) -> Result<Vec<PeriodRow>> {
    let mut out = Vec::new();
    for p in db::load_periods(conn)? {
        let txs = db::load_transactions(conn, &p.id)?;
        let s = compute_summary(&p, &txs);
        out.push(PeriodRow {
            id: p.id,
            name: p.name,
            start_date: p.start_date,
            end_date: p.end_date,
            is_open: p.is_open,
            investment_percentage: p.investment_percentage,
            total_entries: s.total_entries,
            current_variable_balance: s.current_variable_balance,
        });
    }
    Ok(out)
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let data = list_rows(conn)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|r| {
                vec![
                    r.id.clone(),
                    r.name.clone(),
                    r.start_date.to_string(),
                    r.end_date.to_string(),
                    if r.is_open { "open" } else { "closed" }.to_string(),
                    format!("{}%", r.investment_percentage),
                    fmt_money(&r.total_entries),
                    fmt_money(&r.current_variable_balance),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Name", "Start", "End", "Status", "Invest", "Income", "Safe to spend"],
                rows
            )
        );
    }
    Ok(())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodReport {
    pub id: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_open: bool,
    pub investment_percentage: Decimal,
    pub summary: PeriodSummary,
    pub allocation: DailyAllocation,
    pub commitment_rate: Decimal,
    pub variable_usage: Decimal,
    pub over_budget: bool,
    pub health: Health,
}

pub fn period_report(conn: &Connection, period_id: &str, today: NaiveDate) -> Result<PeriodReport> {
    let period = db::load_period(conn, period_id)?;
    let txs = db::load_transactions(conn, period_id)?;
    let summary = compute_summary(&period, &txs);
    let allocation = allocate(&summary, &period, &txs, today);
    debug!(period = %period.id, open_days = allocation.open_days, "daily budget computed");
    Ok(PeriodReport {
        commitment_rate: summary.commitment_rate(),
        variable_usage: summary.variable_usage(),
        over_budget: summary.is_over_budget(),
        health: summary.health(),
        id: period.id,
        name: period.name,
        start_date: period.start_date,
        end_date: period.end_date,
        is_open: period.is_open,
        investment_percentage: period.investment_percentage,
        summary,
        allocation,
    })
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = id_for_period(conn, sub.get_one::<String>("period").unwrap())?;
    let today = today_or(sub.get_one::<String>("today"))?;
    let r = period_report(conn, &id, today)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &r)? {
        return Ok(());
    }
    let s = &r.summary;
    let rows = vec![
        vec!["Income".into(), fmt_money(&s.total_entries)],
        vec!["Fixed expenses".into(), fmt_money(&s.fixed_expenses)],
        vec!["Variable expenses".into(), fmt_money(&s.variable_expenses)],
        vec!["Total expenses".into(), fmt_money(&s.total_expenses)],
        vec!["Balance".into(), fmt_money(&s.balance)],
        vec![
            format!("Investment ({}%)", r.investment_percentage),
            fmt_money(&s.investment_amount),
        ],
        vec!["Projected variable".into(), fmt_money(&s.projected_variable_balance)],
        vec!["Safe to spend".into(), fmt_money(&s.current_variable_balance)],
        vec![
            "Open days left".into(),
            format!(
                "{} ({} closed)",
                r.allocation.open_days, r.allocation.closed_days
            ),
        ],
        vec!["Daily budget".into(), fmt_money(&r.allocation.daily_budget)],
        vec![
            "Commitment".into(),
            format!("{:.1}% ({})", r.commitment_rate, r.health),
        ],
        vec!["Variable used".into(), format!("{:.1}%", r.variable_usage)],
    ];
    println!(
        "{} ({} .. {}){}",
        r.name,
        r.start_date,
        r.end_date,
        if r.is_open { "" } else { " [closed]" }
    );
    println!("{}", pretty_table(&["", "Amount"], rows));
    if r.over_budget {
        println!("Over budget by {}", fmt_money(&-s.current_variable_balance));
    }
    Ok(())
}

fn update_period(conn: &Connection, sql: &str, id: &str, value: &dyn rusqlite::ToSql) -> Result<()> {
    let n = conn.execute(sql, params![id, value])?;
    if n == 0 {
        return Err(MoneyflowError::PeriodNotFound(id.to_string()).into());
    }
    Ok(())
}

fn rename(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = id_for_period(conn, sub.get_one::<String>("period").unwrap())?;
    let name = sub.get_one::<String>("name").unwrap().trim().to_string();
    update_period(conn, "UPDATE periods SET name=?2 WHERE id=?1", &id, &name)?;
    println!("Renamed period {} to '{}'", id, name);
    Ok(())
}

fn invest(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = id_for_period(conn, sub.get_one::<String>("period").unwrap())?;
    let pct = parse_percentage(sub.get_one::<String>("percent").unwrap())?;
    update_period(
        conn,
        "UPDATE periods SET investment_percentage=?2 WHERE id=?1",
        &id,
        &pct.to_string(),
    )?;
    println!("Investment for {} set to {}%", id, pct);
    Ok(())
}

fn set_open(conn: &Connection, sub: &clap::ArgMatches, open: bool) -> Result<()> {
    let id = id_for_period(conn, sub.get_one::<String>("period").unwrap())?;
    update_period(conn, "UPDATE periods SET is_open=?2 WHERE id=?1", &id, &open)?;
    println!(
        "Period {} {}",
        id,
        if open { "reopened" } else { "closed" }
    );
    Ok(())
}

fn remove(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = id_for_period(conn, sub.get_one::<String>("period").unwrap())?;
    let tx = conn.transaction()?;
    let removed: i64 = tx.query_row(
        "SELECT COUNT(*) FROM transactions WHERE period_id=?1",
        params![id],
        |r| r.get(0),
    )?;
    db::delete_period(&tx, &id)?;
    tx.commit()?;
    info!(period = %id, transactions = removed, "period deleted");
    println!("Removed period {} and {} transactions", id, removed);
    Ok(())
}

fn missed(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = id_for_period(conn, sub.get_one::<String>("period").unwrap())?;
    let today = today_or(sub.get_one::<String>("today"))?;
    let period = db::load_period(conn, &id)?;
    let txs = db::load_transactions(conn, &id)?;
    let days = days_without_transactions(period.start_date, period.end_date, &txs, today);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &days)? {
        let rows = days.iter().map(|d| vec![d.to_string()]).collect();
        println!("{}", pretty_table(&["Day without transactions"], rows));
    }
    Ok(())
}
