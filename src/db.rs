// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::MoneyflowError;
use crate::models::{
    AccountingPeriod, Entry, FixedExpense, Template, TemplateEntry, TemplateFixedExpense,
    Transaction,
};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.moneyflow", "Moneyflow", "moneyflow"));

pub const DB_ENV: &str = "MONEYFLOW_DB";

/// Location of the database: `MONEYFLOW_DB` if set, else the platform data dir.
pub fn db_path() -> Result<PathBuf> {
    if let Some(p) = std::env::var_os(DB_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(p));
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("moneyflow.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    open_at(&db_path()?)
}

pub fn open_at(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let mut conn =
        Connection::open(path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
    debug!(path = %path.display(), "database ready");
    Ok(conn)
}

pub fn init_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS periods(
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        start_date TEXT NOT NULL,
        end_date TEXT NOT NULL,
        is_open INTEGER NOT NULL DEFAULT 1,
        investment_percentage TEXT NOT NULL DEFAULT '0',
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE IF NOT EXISTS entries(
        id TEXT PRIMARY KEY,
        period_id TEXT NOT NULL,
        name TEXT NOT NULL,
        amount TEXT NOT NULL,
        position INTEGER NOT NULL DEFAULT 0,
        FOREIGN KEY(period_id) REFERENCES periods(id) ON DELETE CASCADE
    );

    CREATE TABLE IF NOT EXISTS fixed_expenses(
        id TEXT PRIMARY KEY,
        period_id TEXT NOT NULL,
        name TEXT NOT NULL,
        amount TEXT NOT NULL,
        position INTEGER NOT NULL DEFAULT 0,
        FOREIGN KEY(period_id) REFERENCES periods(id) ON DELETE CASCADE
    );

    CREATE TABLE IF NOT EXISTS transactions(
        id TEXT PRIMARY KEY,
        period_id TEXT NOT NULL,
        date TEXT NOT NULL,
        amount TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        FOREIGN KEY(period_id) REFERENCES periods(id) ON DELETE CASCADE
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_period ON transactions(period_id, date);

    -- singleton template, applied when a period is created
    CREATE TABLE IF NOT EXISTS template_entries(
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        amount TEXT NOT NULL,
        position INTEGER NOT NULL DEFAULT 0
    );

    CREATE TABLE IF NOT EXISTS template_fixed_expenses(
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        amount TEXT NOT NULL,
        position INTEGER NOT NULL DEFAULT 0
    );
    "#,
    )?;
    Ok(())
}

fn decimal_col(r: &Row, idx: usize) -> rusqlite::Result<Decimal> {
    let s: String = r.get(idx)?;
    s.parse::<Decimal>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn next_position(conn: &Connection, table: &str, period_id: Option<&str>) -> Result<i64> {
    let pos: i64 = match period_id {
        Some(pid) => conn.query_row(
            &format!("SELECT IFNULL(MAX(position), -1) + 1 FROM {table} WHERE period_id=?1"),
            params![pid],
            |r| r.get(0),
        )?,
        None => conn.query_row(
            &format!("SELECT IFNULL(MAX(position), -1) + 1 FROM {table}"),
            [],
            |r| r.get(0),
        )?,
    };
    Ok(pos)
}

fn load_children(conn: &Connection, period: &mut AccountingPeriod) -> Result<()> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, period_id, name, amount FROM entries WHERE period_id=?1 ORDER BY position, rowid",
    )?;
    let rows = stmt.query_map(params![period.id], |r| {
        Ok(Entry {
            id: r.get(0)?,
            period_id: r.get(1)?,
            name: r.get(2)?,
            amount: decimal_col(r, 3)?,
        })
    })?;
    period.entries = rows.collect::<rusqlite::Result<_>>()?;

    let mut stmt = conn.prepare_cached(
        "SELECT id, period_id, name, amount FROM fixed_expenses WHERE period_id=?1 ORDER BY position, rowid",
    )?;
    let rows = stmt.query_map(params![period.id], |r| {
        Ok(FixedExpense {
            id: r.get(0)?,
            period_id: r.get(1)?,
            name: r.get(2)?,
            amount: decimal_col(r, 3)?,
        })
    })?;
    period.fixed_expenses = rows.collect::<rusqlite::Result<_>>()?;
    Ok(())
}

fn period_from_row(r: &Row) -> rusqlite::Result<AccountingPeriod> {
    Ok(AccountingPeriod {
        id: r.get(0)?,
        name: r.get(1)?,
        start_date: r.get(2)?,
        end_date: r.get(3)?,
        is_open: r.get(4)?,
        investment_percentage: decimal_col(r, 5)?,
        fixed_expenses: Vec::new(),
        entries: Vec::new(),
    })
}

const PERIOD_COLS: &str = "id, name, start_date, end_date, is_open, investment_percentage";

/// All periods with their entries and fixed expenses, newest start first.
pub fn load_periods(conn: &Connection) -> Result<Vec<AccountingPeriod>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {PERIOD_COLS} FROM periods ORDER BY start_date DESC, created_at DESC"
    ))?;
    let mut periods = stmt
        .query_map([], period_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    for p in periods.iter_mut() {
        load_children(conn, p)?;
    }
    Ok(periods)
}

pub fn load_period(conn: &Connection, id: &str) -> Result<AccountingPeriod> {
    let mut period = conn
        .query_row(
            &format!("SELECT {PERIOD_COLS} FROM periods WHERE id=?1"),
            params![id],
            period_from_row,
        )
        .optional()?
        .ok_or_else(|| MoneyflowError::PeriodNotFound(id.to_string()))?;
    load_children(conn, &mut period)?;
    Ok(period)
}

fn transaction_from_row(r: &Row) -> rusqlite::Result<Transaction> {
    Ok(Transaction {
        id: r.get(0)?,
        period_id: r.get(1)?,
        date: r.get(2)?,
        amount: decimal_col(r, 3)?,
        description: r.get(4)?,
    })
}

/// Transactions of one period, oldest first.
pub fn load_transactions(conn: &Connection, period_id: &str) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, period_id, date, amount, description FROM transactions
         WHERE period_id=?1 ORDER BY date, rowid",
    )?;
    let rows = stmt.query_map(params![period_id], transaction_from_row)?;
    Ok(rows.collect::<rusqlite::Result<_>>()?)
}

pub fn load_all_transactions(conn: &Connection) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(
        "SELECT id, period_id, date, amount, description FROM transactions ORDER BY date, rowid",
    )?;
    let rows = stmt.query_map([], transaction_from_row)?;
    Ok(rows.collect::<rusqlite::Result<_>>()?)
}

pub fn load_template(conn: &Connection) -> Result<Template> {
    let mut stmt =
        conn.prepare("SELECT id, name, amount FROM template_entries ORDER BY position, rowid")?;
    let entries = stmt
        .query_map([], |r| {
            Ok(TemplateEntry {
                id: r.get(0)?,
                name: r.get(1)?,
                amount: decimal_col(r, 2)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    let mut stmt = conn
        .prepare("SELECT id, name, amount FROM template_fixed_expenses ORDER BY position, rowid")?;
    let fixed_expenses = stmt
        .query_map([], |r| {
            Ok(TemplateFixedExpense {
                id: r.get(0)?,
                name: r.get(1)?,
                amount: decimal_col(r, 2)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(Template {
        entries,
        fixed_expenses,
    })
}

pub fn insert_entry(conn: &Connection, e: &Entry) -> Result<()> {
    let pos = next_position(conn, "entries", Some(&e.period_id))?;
    conn.execute(
        "INSERT INTO entries(id, period_id, name, amount, position) VALUES (?1,?2,?3,?4,?5)",
        params![e.id, e.period_id, e.name, e.amount.to_string(), pos],
    )?;
    Ok(())
}

pub fn insert_fixed_expense(conn: &Connection, f: &FixedExpense) -> Result<()> {
    let pos = next_position(conn, "fixed_expenses", Some(&f.period_id))?;
    conn.execute(
        "INSERT INTO fixed_expenses(id, period_id, name, amount, position) VALUES (?1,?2,?3,?4,?5)",
        params![f.id, f.period_id, f.name, f.amount.to_string(), pos],
    )?;
    Ok(())
}

pub fn insert_transaction(conn: &Connection, t: &Transaction) -> Result<()> {
    conn.execute(
        "INSERT INTO transactions(id, period_id, date, amount, description) VALUES (?1,?2,?3,?4,?5)",
        params![t.id, t.period_id, t.date, t.amount.to_string(), t.description],
    )?;
    Ok(())
}

/// Insert a period row together with its entries and fixed expenses.
pub fn insert_period(conn: &Connection, p: &AccountingPeriod) -> Result<()> {
    conn.execute(
        "INSERT INTO periods(id, name, start_date, end_date, is_open, investment_percentage)
         VALUES (?1,?2,?3,?4,?5,?6)",
        params![
            p.id,
            p.name,
            p.start_date,
            p.end_date,
            p.is_open,
            p.investment_percentage.to_string()
        ],
    )
    .with_context(|| format!("Insert period '{}'", p.name))?;
    for e in &p.entries {
        insert_entry(conn, e)?;
    }
    for f in &p.fixed_expenses {
        insert_fixed_expense(conn, f)?;
    }
    Ok(())
}

pub fn insert_template_entry(conn: &Connection, e: &TemplateEntry) -> Result<()> {
    let pos = next_position(conn, "template_entries", None)?;
    conn.execute(
        "INSERT INTO template_entries(id, name, amount, position) VALUES (?1,?2,?3,?4)",
        params![e.id, e.name, e.amount.to_string(), pos],
    )?;
    Ok(())
}

pub fn insert_template_fixed_expense(conn: &Connection, f: &TemplateFixedExpense) -> Result<()> {
    let pos = next_position(conn, "template_fixed_expenses", None)?;
    conn.execute(
        "INSERT INTO template_fixed_expenses(id, name, amount, position) VALUES (?1,?2,?3,?4)",
        params![f.id, f.name, f.amount.to_string(), pos],
    )?;
    Ok(())
}

/// Delete a period with its entries, fixed expenses and transactions.
pub fn delete_period(conn: &Connection, id: &str) -> Result<bool> {
    for table in ["transactions", "entries", "fixed_expenses"] {
        conn.execute(&format!("DELETE FROM {table} WHERE period_id=?1"), params![id])?;
    }
    let n = conn.execute("DELETE FROM periods WHERE id=?1", params![id])?;
    Ok(n > 0)
}

/// Replace every stored period, transaction and template item.
pub fn replace_all(
    conn: &mut Connection,
    periods: &[AccountingPeriod],
    transactions: &[Transaction],
    template: &Template,
) -> Result<()> {
    let tx = conn.transaction()?;
    tx.execute_batch(
        "DELETE FROM transactions;
         DELETE FROM entries;
         DELETE FROM fixed_expenses;
         DELETE FROM periods;
         DELETE FROM template_entries;
         DELETE FROM template_fixed_expenses;",
    )?;
    for p in periods {
        insert_period(&tx, p)?;
    }
    for t in transactions {
        insert_transaction(&tx, t)
            .with_context(|| format!("Insert transaction '{}' for period '{}'", t.id, t.period_id))?;
    }
    for e in &template.entries {
        insert_template_entry(&tx, e)?;
    }
    for f in &template.fixed_expenses {
        insert_template_fixed_expense(&tx, f)?;
    }
    tx.commit()?;
    debug!(
        periods = periods.len(),
        transactions = transactions.len(),
        "store replaced"
    );
    Ok(())
}
