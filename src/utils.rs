// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::MoneyflowError;
use crate::summary::clamp_percentage;
use anyhow::{Context, Result};
use chrono::{Datelike, Local, NaiveDate};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;
use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the stderr tracing subscriber. `RUST_LOG` overrides the default level.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("moneyflow=warn"));
        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    });
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// Parse a money amount, rejecting negatives.
pub fn parse_amount(s: &str) -> Result<Decimal> {
    let d = parse_decimal(s)?;
    if d.is_sign_negative() && !d.is_zero() {
        return Err(MoneyflowError::NegativeAmount(d).into());
    }
    Ok(d)
}

/// Parse a percentage and clamp it into `[0, 100]`.
pub fn parse_percentage(s: &str) -> Result<Decimal> {
    Ok(clamp_percentage(parse_decimal(s)?))
}

/// "Today" for budgeting: the explicit `--today` value, else the local date.
pub fn today_or(arg: Option<&String>) -> Result<NaiveDate> {
    match arg {
        Some(s) => parse_date(s),
        None => Ok(Local::now().date_naive()),
    }
}

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn month_end(date: NaiveDate) -> NaiveDate {
    let (y, m) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1)
        .and_then(|d| d.pred_opt())
        .unwrap_or(date)
}

pub fn fmt_money(d: &Decimal) -> String {
    format!("{:.2}", d.round_dp(2))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // arrays stream one element per line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

/// Resolve a period reference given either its id or its exact name.
/// Ids win over names; among equal names the most recent period is picked.
pub fn id_for_period(conn: &Connection, reference: &str) -> Result<String> {
    let reference = reference.trim();
    let by_id: Option<String> = conn
        .query_row(
            "SELECT id FROM periods WHERE id=?1",
            params![reference],
            |r| r.get(0),
        )
        .optional()?;
    if let Some(id) = by_id {
        return Ok(id);
    }
    let by_name: Option<String> = conn
        .query_row(
            "SELECT id FROM periods WHERE name=?1 ORDER BY start_date DESC, created_at DESC LIMIT 1",
            params![reference],
            |r| r.get(0),
        )
        .optional()?;
    by_name.ok_or_else(|| MoneyflowError::PeriodNotFound(reference.to_string()).into())
}

// Settings
pub const SETTING_DEFAULT_INVESTMENT: &str = "default_investment";
pub const KNOWN_SETTINGS: &[&str] = &[SETTING_DEFAULT_INVESTMENT];

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    if !KNOWN_SETTINGS.contains(&key) {
        return Err(MoneyflowError::UnknownSetting(key.to_string()).into());
    }
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

pub fn get_default_investment(conn: &Connection) -> Result<Decimal> {
    match get_setting(conn, SETTING_DEFAULT_INVESTMENT)? {
        Some(s) => parse_percentage(&s)
            .with_context(|| format!("Invalid {} setting '{}'", SETTING_DEFAULT_INVESTMENT, s)),
        None => Ok(Decimal::ZERO),
    }
}
