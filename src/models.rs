// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// Money and percentages travel as JSON numbers in backups. Strings are
// still accepted on read.

fn default_open() -> bool {
    true
}

/// A bounded date range over which income and expenses are tracked.
///
/// The period owns its entries and fixed expenses. Transactions are held
/// separately and joined by `period_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountingPeriod {
    pub id: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default = "default_open")]
    pub is_open: bool,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub investment_percentage: Decimal, // 0..=100
    #[serde(default)]
    pub fixed_expenses: Vec<FixedExpense>,
    #[serde(default)]
    pub entries: Vec<Entry>,
}

impl AccountingPeriod {
    /// A period with no entries or fixed expenses yet.
    pub fn blank(
        id: impl Into<String>,
        name: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            start_date: start,
            end_date: end,
            is_open: true,
            investment_percentage: Decimal::ZERO,
            fixed_expenses: Vec::new(),
            entries: Vec::new(),
        }
    }
}

/// Income item attached to a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: String,
    pub period_id: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

/// Recurring cost attached to a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedExpense {
    pub id: String,
    pub period_id: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

/// A dated variable expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub period_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateEntry {
    pub id: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateFixedExpense {
    pub id: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

/// Defaults copied into every newly created period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    #[serde(default)]
    pub entries: Vec<TemplateEntry>,
    #[serde(default)]
    pub fixed_expenses: Vec<TemplateFixedExpense>,
}

impl Template {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.fixed_expenses.is_empty()
    }
}

/// Derived totals for one period. Recomputed on every read, never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSummary {
    pub total_entries: Decimal,
    pub fixed_expenses: Decimal,
    pub variable_expenses: Decimal,
    pub total_expenses: Decimal,
    pub balance: Decimal,
    pub investment_amount: Decimal,
    pub projected_variable_balance: Decimal,
    pub current_variable_balance: Decimal,
}
