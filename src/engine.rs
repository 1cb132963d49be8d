// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Category, TransactionRecord};

/// Per-bucket debit/credit sums for the active cycle. Derived on every
/// read from a full ledger scan; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CycleTotals {
    pub family: Decimal,
    pub shares: Decimal,
    pub savings: Decimal,
    pub personal: Decimal,
    pub household: Decimal,
    pub salary: Decimal,
    pub other_income: Decimal,
    pub other_debit: Decimal,
    pub p2p_in: Decimal,
    pub p2p_out: Decimal,
}

impl CycleTotals {
    pub fn wallet_spent(&self) -> Decimal {
        self.personal + self.household
    }

    pub fn p2p_net(&self) -> Decimal {
        self.p2p_in - self.p2p_out
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Goals {
    pub family: Decimal,
    pub shares: Decimal,
    pub savings: Decimal,
    pub wallet: Decimal,
    pub pool: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct WalletSummary {
    /// Safe-to-spend; negative means overspend and is surfaced as-is.
    pub balance: Decimal,
    pub total_available: Decimal,
    pub total_spent: Decimal,
    pub approx_bank_balance: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct Allocation {
    pub salary_base: Decimal,
    pub opening_balance: Decimal,
    pub goals: Goals,
    pub wallet: WalletSummary,
    pub p2p_net: Decimal,
    pub pending_family: Decimal,
    pub pending_shares: Decimal,
    pub pending_savings: Decimal,
}

/// Sum ledger rows on/after the cycle start date into buckets. A missing
/// start date yields all-zero totals. Unrecognized category labels keep
/// their money visible in the other_debit/other_income buckets but never
/// feed a goal.
pub fn aggregate<'a, I>(rows: I, cycle_start: Option<NaiveDate>) -> CycleTotals
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    let mut totals = CycleTotals::default();
    let Some(start) = cycle_start else {
        return totals;
    };
    for row in rows {
        if row.date < start {
            continue;
        }
        let dr = row.amount_dr;
        let cr = row.amount_cr;
        match Category::from_label(&row.category) {
            Some(Category::Salary) => totals.salary += cr,
            Some(Category::FamilySupport) => {
                // Money held on our behalf; counts as income and as an
                // inbound peer-to-peer balance.
                totals.p2p_in += cr;
                totals.other_income += cr;
            }
            Some(Category::FamilyTransfer) => {
                totals.family += dr;
                totals.p2p_out += dr;
            }
            Some(Category::ShareInvestment) => totals.shares += dr,
            Some(Category::SavingsTransfer) => totals.savings += dr,
            Some(Category::PersonalSpending) => totals.personal += dr,
            Some(Category::HouseholdSpending) => totals.household += dr,
            Some(Category::GiftFromFriend) | Some(Category::OtherIncome) => {
                totals.other_income += cr
            }
            None => {
                totals.other_debit += dr;
                totals.other_income += cr;
            }
        }
    }
    totals
}

/// The 60/40 split. Family gets 60% of the salary base; the remaining 40%
/// plus the rollover balance forms the pool, split 25/25/50 into shares,
/// savings and the spending wallet.
///
/// The salary base is the actual salary credited this cycle when positive,
/// falling back to the configured plan figure; the two are never blended.
pub fn allocate(totals: &CycleTotals, salary_plan: Decimal, opening_balance: Decimal) -> Allocation {
    let salary_base = if totals.salary > Decimal::ZERO {
        totals.salary
    } else {
        salary_plan
    };

    let family_goal = salary_base * Decimal::new(60, 2);
    let pool = salary_base * Decimal::new(40, 2) + opening_balance;
    let shares_goal = pool * Decimal::new(25, 2);
    let savings_goal = pool * Decimal::new(25, 2);
    let wallet_goal = pool * Decimal::new(50, 2);

    let total_spent = totals.wallet_spent();
    let balance = wallet_goal - total_spent;
    let p2p_net = totals.p2p_net();

    let pending_family = (family_goal - totals.family).max(Decimal::ZERO);
    let pending_shares = (shares_goal - totals.shares).max(Decimal::ZERO);
    let pending_savings = (savings_goal - totals.savings).max(Decimal::ZERO);

    // Money not yet moved toward a goal, plus the net fronted to/by family,
    // is still sitting in the bank account even though it is earmarked.
    let approx_bank_balance =
        balance + pending_family + pending_shares + pending_savings + p2p_net;

    Allocation {
        salary_base,
        opening_balance,
        goals: Goals {
            family: family_goal,
            shares: shares_goal,
            savings: savings_goal,
            wallet: wallet_goal,
            pool,
        },
        wallet: WalletSummary {
            balance,
            total_available: wallet_goal,
            total_spent,
            approx_bank_balance,
        },
        p2p_net,
        pending_family,
        pending_shares,
        pending_savings,
    }
}

/// Goal progress in percent. A zero or negative goal reads as 0%, never a
/// division error. Callers clamp for display; the raw value may exceed 100.
pub fn percent_complete(actual: Decimal, goal: Decimal) -> Decimal {
    if goal <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    actual / goal * Decimal::ONE_HUNDRED
}

/// Closing balance at cycle end: what is left of the wallet goal.
pub fn closing_balance(
    totals: &CycleTotals,
    salary_plan: Decimal,
    opening_balance: Decimal,
) -> Decimal {
    allocate(totals, salary_plan, opening_balance).wallet.balance
}
