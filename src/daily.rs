// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Daily spending allocator.
//!
//! A day with at least one recorded transaction is "closed": its spend is
//! already decided. The remaining discretionary balance is spread evenly
//! over the open days between today and the end of the period, inclusive.

use crate::models::{AccountingPeriod, PeriodSummary, Transaction};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashSet;

fn transaction_dates(transactions: &[Transaction]) -> HashSet<NaiveDate> {
    transactions.iter().map(|t| t.date).collect()
}

/// Days in `[today, end_date]` that have no transaction yet.
pub fn remaining_open_days(end_date: NaiveDate, transactions: &[Transaction], today: NaiveDate) -> u32 {
    if today > end_date {
        return 0;
    }
    let used = transaction_dates(transactions);
    let open = today
        .iter_days()
        .take_while(|d| *d <= end_date)
        .filter(|d| !used.contains(d))
        .count();
    u32::try_from(open).unwrap_or(u32::MAX)
}

/// Suggested spend per open day. Zero when no open day remains; a negative
/// balance yields a negative figure.
pub fn daily_budget(
    current_variable_balance: Decimal,
    end_date: NaiveDate,
    transactions: &[Transaction],
    today: NaiveDate,
) -> Decimal {
    spread(
        current_variable_balance,
        remaining_open_days(end_date, transactions, today),
    )
}

fn spread(balance: Decimal, open_days: u32) -> Decimal {
    if open_days == 0 {
        return Decimal::ZERO;
    }
    balance / Decimal::from(open_days)
}

/// Every calendar day from `start` to `end`, inclusive.
pub fn period_days_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|d| *d <= end).collect()
}

/// Past (or current) days of the period with nothing logged.
pub fn days_without_transactions(
    start: NaiveDate,
    end: NaiveDate,
    transactions: &[Transaction],
    today: NaiveDate,
) -> Vec<NaiveDate> {
    let used = transaction_dates(transactions);
    period_days_range(start, end)
        .into_iter()
        .take_while(|d| *d <= today)
        .filter(|d| !used.contains(d))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyAllocation {
    pub today: NaiveDate,
    pub open_days: u32,
    pub closed_days: u32,
    pub daily_budget: Decimal,
}

pub fn allocate(
    summary: &PeriodSummary,
    period: &AccountingPeriod,
    transactions: &[Transaction],
    today: NaiveDate,
) -> DailyAllocation {
    let open_days = remaining_open_days(period.end_date, transactions, today);
    let window = if today > period.end_date {
        0
    } else {
        u32::try_from((period.end_date - today).num_days())
            .map_or(u32::MAX, |days| days.saturating_add(1))
    };
    DailyAllocation {
        today,
        open_days,
        closed_days: window.saturating_sub(open_days),
        daily_budget: spread(summary.current_variable_balance, open_days),
    }
}
