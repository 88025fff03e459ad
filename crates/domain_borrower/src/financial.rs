//! Borrower financial position
//!
//! Summarizes a borrower's assets, liabilities and monthly cash flow.
//! `other_income` is treated as a monthly figure and added to one twelfth of
//! `annual_income`.

use core_kernel::json::{decimal_from, text_from};
use core_kernel::validation::field_label;
use core_kernel::{checked_sum, round_cents, FieldErrors};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::choices::{AssetType, LiabilityType};
use crate::company::NON_FIELD_ERRORS;
use crate::individual::{present, IndividualBorrowerValidator};

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// An asset held by a borrower
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub asset_type: AssetType,
    pub value: Option<Decimal>,
    pub description: Option<String>,
}

/// A liability owed by a borrower
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Liability {
    pub liability_type: LiabilityType,
    pub amount: Decimal,
    pub monthly_payment: Option<Decimal>,
    pub lender: Option<String>,
    pub description: Option<String>,
}

/// Income, expenses, assets and liabilities of a borrower
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialProfile {
    pub annual_income: Option<Decimal>,
    pub other_income: Option<Decimal>,
    pub monthly_expenses: Option<Decimal>,
    pub assets: Vec<Asset>,
    pub liabilities: Vec<Liability>,
}

impl FinancialProfile {
    /// Validates and reads a financial profile from a JSON payload
    ///
    /// Values are read with the same coercion the validator applies, so a
    /// payload that validates always produces a profile. A blank asset type
    /// reads as `other`.
    pub fn from_json(payload: &Value) -> Result<Self, FieldErrors> {
        IndividualBorrowerValidator::validate_financials(payload).into_result(())?;
        let Some(borrower) = payload.as_object() else {
            return Err(FieldErrors::new().with(NON_FIELD_ERRORS, "Borrower data must be an object"));
        };

        let mut liabilities = Vec::new();
        for liability in objects(borrower, "liabilities") {
            let (Some(liability_type), Some(amount)) = (
                choice::<LiabilityType>(liability, "liability_type"),
                decimal_field(liability, "amount"),
            ) else {
                continue;
            };
            liabilities.push(Liability {
                liability_type,
                amount,
                monthly_payment: decimal_field(liability, "monthly_payment"),
                lender: text(liability, "lender"),
                description: text(liability, "description"),
            });
        }

        Ok(Self {
            annual_income: decimal_field(borrower, "annual_income"),
            other_income: decimal_field(borrower, "other_income"),
            monthly_expenses: decimal_field(borrower, "monthly_expenses"),
            assets: objects(borrower, "assets")
                .map(|asset| Asset {
                    asset_type: choice(asset, "asset_type").unwrap_or(AssetType::Other),
                    value: decimal_field(asset, "value"),
                    description: text(asset, "description"),
                })
                .collect(),
            liabilities,
        })
    }

    /// Computes the financial summary for this profile
    ///
    /// Totals too large to represent are reported under `non_field_errors`.
    pub fn summarize(&self) -> Result<FinancialSummary, FieldErrors> {
        self.totals().ok_or_else(|| {
            FieldErrors::new().with(NON_FIELD_ERRORS, "Financial totals are too large to summarize")
        })
    }

    /// Sum of the monthly payments across all liabilities
    pub fn monthly_debt_payments(&self) -> Option<Decimal> {
        checked_sum(self.liabilities.iter().filter_map(|l| l.monthly_payment))
    }

    fn totals(&self) -> Option<FinancialSummary> {
        let total_assets = checked_sum(self.assets.iter().filter_map(|a| a.value))?;
        let total_liabilities = checked_sum(self.liabilities.iter().map(|l| l.amount))?;

        let monthly_income = self
            .annual_income
            .unwrap_or_default()
            .checked_div(MONTHS_PER_YEAR)?
            .checked_add(self.other_income.unwrap_or_default())?;
        let monthly_debt = self.monthly_debt_payments()?;
        let monthly_expenses = self.monthly_expenses.unwrap_or_default().checked_add(monthly_debt)?;

        Some(FinancialSummary {
            total_assets: round_cents(total_assets),
            total_liabilities: round_cents(total_liabilities),
            net_worth: round_cents(total_assets.checked_sub(total_liabilities)?),
            monthly_income: round_cents(monthly_income),
            monthly_expenses: round_cents(monthly_expenses),
            monthly_debt_payments: round_cents(monthly_debt),
            disposable_income: round_cents(monthly_income.checked_sub(monthly_expenses)?),
            asset_breakdown: self
                .assets
                .iter()
                .map(|asset| AssetLine {
                    asset_type: asset.asset_type,
                    label: field_label(asset.asset_type.code()),
                    value: asset.value,
                    description: asset.description.clone(),
                })
                .collect(),
            liability_breakdown: self
                .liabilities
                .iter()
                .map(|liability| LiabilityLine {
                    liability_type: liability.liability_type,
                    label: field_label(liability.liability_type.code()),
                    amount: liability.amount,
                    monthly_payment: liability.monthly_payment,
                    description: liability.description.clone(),
                })
                .collect(),
        })
    }
}

fn decimal_field(object: &Map<String, Value>, field: &str) -> Option<Decimal> {
    present(object, field).and_then(|value| decimal_from(value).ok())
}

fn choice<T: std::str::FromStr>(object: &Map<String, Value>, field: &str) -> Option<T> {
    present(object, field)
        .and_then(Value::as_str)
        .and_then(|code| code.parse().ok())
}

fn text(object: &Map<String, Value>, field: &str) -> Option<String> {
    present(object, field).and_then(text_from)
}

fn objects<'a>(
    object: &'a Map<String, Value>,
    field: &str,
) -> impl Iterator<Item = &'a Map<String, Value>> {
    present(object, field)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_object)
}

/// One row of the asset breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetLine {
    pub asset_type: AssetType,
    pub label: String,
    pub value: Option<Decimal>,
    pub description: Option<String>,
}

/// One row of the liability breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiabilityLine {
    pub liability_type: LiabilityType,
    pub label: String,
    pub amount: Decimal,
    pub monthly_payment: Option<Decimal>,
    pub description: Option<String>,
}

/// Summary of a borrower's financial position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub total_assets: Decimal,
    pub total_liabilities: Decimal,
    pub net_worth: Decimal,
    pub monthly_income: Decimal,
    /// Living expenses plus liability repayments
    pub monthly_expenses: Decimal,
    /// Liability repayments alone
    pub monthly_debt_payments: Decimal,
    pub disposable_income: Decimal,
    pub asset_breakdown: Vec<AssetLine>,
    pub liability_breakdown: Vec<LiabilityLine>,
}
