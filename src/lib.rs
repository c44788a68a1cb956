// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cli;
pub mod db;
pub mod error;
pub mod models;
pub mod ids;
pub mod summary;
pub mod daily;
pub mod template;
pub mod utils;
pub mod commands;

pub use daily::{daily_budget, days_without_transactions, period_days_range, remaining_open_days};
pub use summary::compute_summary;
pub use template::apply_template;
