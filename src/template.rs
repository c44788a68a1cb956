// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ids::IdGenerator;
use crate::models::{AccountingPeriod, Entry, FixedExpense, Template};

/// Seed a period with copies of the template's entries and fixed expenses.
///
/// Copies get fresh ids and the period's id, and are appended after any
/// items the period already carries. The template is left untouched.
pub fn apply_template<G: IdGenerator + ?Sized>(
    period: &AccountingPeriod,
    template: &Template,
    ids: &mut G,
) -> AccountingPeriod {
    let mut out = period.clone();

    out.fixed_expenses
        .extend(template.fixed_expenses.iter().map(|t| FixedExpense {
            id: ids.next_id(),
            period_id: period.id.clone(),
            name: t.name.clone(),
            amount: t.amount,
        }));
    out.entries.extend(template.entries.iter().map(|t| Entry {
        id: ids.next_id(),
        period_id: period.id.clone(),
        name: t.name.clone(),
        amount: t.amount,
    }));
    out
}
