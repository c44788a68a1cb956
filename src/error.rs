// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MoneyflowError {
    #[error("Period '{0}' not found")]
    PeriodNotFound(String),
    #[error("Invalid period range: start {start} is after end {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
    #[error("Amount must not be negative, got {0}")]
    NegativeAmount(Decimal),
    #[error("Invalid export file: {0}")]
    InvalidExport(String),
    #[error("Unsupported export version {found} (this build reads up to {supported})")]
    UnsupportedExportVersion { found: u32, supported: u32 },
    #[error("Unknown format: {0} (use csv|json)")]
    UnknownFormat(String),
    #[error("Unknown setting '{0}'")]
    UnknownSetting(String),
}
