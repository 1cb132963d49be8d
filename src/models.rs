// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The closed set of ledger category labels the aggregator understands.
/// Labels outside this set are still accepted into the ledger; they fold
/// into the uncategorized buckets instead of a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Salary,
    FamilySupport,
    FamilyTransfer,
    ShareInvestment,
    SavingsTransfer,
    PersonalSpending,
    HouseholdSpending,
    GiftFromFriend,
    OtherIncome,
}

impl Category {
    pub fn from_label(label: &str) -> Option<Category> {
        match label {
            "Salary" => Some(Category::Salary),
            "Family Support" => Some(Category::FamilySupport),
            "Family Transfer" => Some(Category::FamilyTransfer),
            "Share Investment" => Some(Category::ShareInvestment),
            "Savings Transfer" => Some(Category::SavingsTransfer),
            "Personal Spending" => Some(Category::PersonalSpending),
            "Household Spending" => Some(Category::HouseholdSpending),
            "Gift / From Friend" => Some(Category::GiftFromFriend),
            "Other Income" => Some(Category::OtherIncome),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Salary => "Salary",
            Category::FamilySupport => "Family Support",
            Category::FamilyTransfer => "Family Transfer",
            Category::ShareInvestment => "Share Investment",
            Category::SavingsTransfer => "Savings Transfer",
            Category::PersonalSpending => "Personal Spending",
            Category::HouseholdSpending => "Household Spending",
            Category::GiftFromFriend => "Gift / From Friend",
            Category::OtherIncome => "Other Income",
        }
    }
}

/// One append-only ledger row. Immutable once logged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: i64,
    pub date: NaiveDate,
    pub category: String,
    pub sub_category: Option<String>,
    pub amount_dr: Decimal,
    pub amount_cr: Decimal,
    pub entity: String,
    pub notes: Option<String>,
    pub payment_mode: Option<String>,
    pub cycle_id: String,
}

/// The singleton cycle configuration. `salary_plan` is the fallback salary
/// base when no salary credit has been logged yet this cycle; the identity
/// fields never enter the allocation math.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigRecord {
    pub emp_name: String,
    pub salary_plan: Decimal,
    pub opening_balance: Decimal,
    pub cycle_start_date: Option<NaiveDate>,
    pub pan_number: Option<String>,
    pub pf_number: Option<String>,
    pub uan_number: Option<String>,
    pub gross_salary: Option<Decimal>,
    pub net_salary: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveRecord {
    pub id: i64,
    pub month_year: String,
    pub opening_balance: Decimal,
    pub salary_received: Decimal,
    pub family_sent: Decimal,
    pub shares_invested: Decimal,
    pub savings_moved: Decimal,
    pub wallet_spent: Decimal,
    pub other_income: Decimal,
    pub closing_balance: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentRecord {
    pub id: i64,
    pub date_invested: NaiveDate,
    pub symbol: String,
    pub units: Decimal,
    pub buy_price: Decimal,
    pub current_price: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: i64,
    pub full_name: String,
    pub doc_type: String,
    pub doc_number: String,
    pub issued_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    pub drive_link: Option<String>,
}

/// Boundary validation and precondition failures. Store-layer errors stay
/// on the anyhow path with context.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("amount must be a positive number, got '{0}'")]
    InvalidAmount(String),
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("transaction type must be 'debit' or 'credit', got '{0}'")]
    InvalidKind(String),
    #[error("profile is not configured yet; run 'paycycle profile setup' first")]
    MissingConfig,
}
