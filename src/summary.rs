// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Period totals and the discretionary ("safe-to-spend") balance.

use crate::models::{AccountingPeriod, PeriodSummary, Transaction};
use rust_decimal::Decimal;
use serde::Serialize;

/// Clamp an investment percentage into `[0, 100]`.
pub fn clamp_percentage(pct: Decimal) -> Decimal {
    pct.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}

/// Summarize a period given the variable transactions that belong to it.
///
/// Callers pass only the period's own transactions; no filtering by
/// `period_id` happens here.
pub fn compute_summary(period: &AccountingPeriod, transactions: &[Transaction]) -> PeriodSummary {
    let total_entries: Decimal = period.entries.iter().map(|e| e.amount).sum();
    let fixed_expenses: Decimal = period.fixed_expenses.iter().map(|f| f.amount).sum();
    let variable_expenses: Decimal = transactions.iter().map(|t| t.amount).sum();

    let total_expenses = variable_expenses + fixed_expenses;
    let investment_amount =
        total_entries * clamp_percentage(period.investment_percentage) / Decimal::ONE_HUNDRED;
    let projected_variable_balance = total_entries - investment_amount - fixed_expenses;
    let current_variable_balance = projected_variable_balance - variable_expenses;

    PeriodSummary {
        total_entries,
        fixed_expenses,
        variable_expenses,
        total_expenses,
        balance: total_entries - total_expenses,
        investment_amount,
        projected_variable_balance,
        current_variable_balance,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Health {
    Healthy,
    Warning,
    Critical,
}

impl std::fmt::Display for Health {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Health::Healthy => "healthy",
            Health::Warning => "warning",
            Health::Critical => "critical",
        };
        f.write_str(s)
    }
}

impl PeriodSummary {
    /// Share of income already committed to expenses, in percent.
    pub fn commitment_rate(&self) -> Decimal {
        if self.total_entries <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        self.total_expenses / self.total_entries * Decimal::ONE_HUNDRED
    }

    /// Share of the projected discretionary balance already spent, in percent.
    /// Exceeds 100 when overspent.
    pub fn variable_usage(&self) -> Decimal {
        if self.projected_variable_balance <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        (self.projected_variable_balance - self.current_variable_balance)
            / self.projected_variable_balance
            * Decimal::ONE_HUNDRED
    }

    pub fn variable_usage_clamped(&self) -> Decimal {
        clamp_percentage(self.variable_usage())
    }

    pub fn is_over_budget(&self) -> bool {
        self.current_variable_balance < Decimal::ZERO
    }

    pub fn health(&self) -> Health {
        let rate = self.commitment_rate();
        if rate > Decimal::from(80) {
            Health::Critical
        } else if rate > Decimal::from(50) {
            Health::Warning
        } else {
            Health::Healthy
        }
    }
}
