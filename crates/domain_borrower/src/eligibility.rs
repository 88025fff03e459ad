//! Borrower eligibility
//!
//! Assesses whether the borrowers on an application can carry a loan, using
//! their combined financial summaries and the loan's estimated repayment.
//!
//! | Check          | Rule                                           | Affects eligibility |
//! |----------------|------------------------------------------------|---------------------|
//! | debt-to-income | monthly debt / monthly income ≤ 0.43           | yes                 |
//! | serviceability | disposable income / monthly repayment ≥ 1.2    | yes                 |
//! | loan-to-value  | principal / security value ≤ 80%               | no, reason only     |

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{checked_sum, round_cents, FieldErrors};

use crate::company::NON_FIELD_ERRORS;
use crate::financial::FinancialSummary;

/// Highest acceptable share of income spent on debt repayments
pub const MAX_DEBT_TO_INCOME: Decimal = dec!(0.43);

/// Lowest acceptable multiple of the repayment left over as disposable income
pub const MIN_SERVICEABILITY: Decimal = dec!(1.2);

/// Loan-to-value percentage above which a reason is recorded
pub const MAX_LOAN_TO_VALUE_PERCENT: Decimal = dec!(80);

/// The loan an assessment is made against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanServicing {
    pub loan_amount: Decimal,
    pub monthly_repayment: Decimal,
    pub security_value: Option<Decimal>,
}

/// Result of an eligibility assessment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityAssessment {
    pub is_eligible: bool,
    /// `None` when the borrowers declare no income
    pub debt_to_income_ratio: Option<Decimal>,
    /// `None` when the loan has no repayment
    pub serviceability_ratio: Option<Decimal>,
    pub disposable_income: Decimal,
    pub estimated_monthly_repayment: Decimal,
    pub loan_to_value_ratio: Option<Decimal>,
    pub reasons: Vec<String>,
}

/// Assesses the combined borrowers of an application against a loan
pub fn assess_eligibility(
    borrowers: &[FinancialSummary],
    loan: &LoanServicing,
) -> Result<EligibilityAssessment, FieldErrors> {
    if borrowers.is_empty() {
        return Ok(EligibilityAssessment {
            is_eligible: false,
            debt_to_income_ratio: None,
            serviceability_ratio: None,
            disposable_income: Decimal::ZERO,
            estimated_monthly_repayment: round_cents(loan.monthly_repayment),
            loan_to_value_ratio: None,
            reasons: vec!["No borrowers associated with this application".to_string()],
        });
    }

    assess(borrowers, loan).ok_or_else(|| {
        FieldErrors::new().with(NON_FIELD_ERRORS, "Borrower finances are too large to assess")
    })
}

fn assess(borrowers: &[FinancialSummary], loan: &LoanServicing) -> Option<EligibilityAssessment> {
    let income = checked_sum(borrowers.iter().map(|b| b.monthly_income))?;
    let debt = checked_sum(borrowers.iter().map(|b| b.monthly_debt_payments))?;
    let disposable = checked_sum(borrowers.iter().map(|b| b.disposable_income))?;

    let debt_to_income = if income > Decimal::ZERO {
        Some(debt.checked_div(income)?)
    } else {
        None
    };
    let serviceability = if loan.monthly_repayment > Decimal::ZERO {
        Some(disposable.checked_div(loan.monthly_repayment)?)
    } else {
        None
    };
    let loan_to_value = match loan.security_value {
        Some(security) if security > Decimal::ZERO && loan.loan_amount > Decimal::ZERO => {
            Some(loan.loan_amount.checked_mul(dec!(100))?.checked_div(security)?)
        }
        _ => None,
    };

    let mut is_eligible = true;
    let mut reasons = Vec::new();

    match debt_to_income {
        Some(ratio) if ratio > MAX_DEBT_TO_INCOME => {
            is_eligible = false;
            reasons.push(format!("Debt-to-income ratio too high: {:.2}", round_cents(ratio)));
        }
        Some(_) => {}
        None => {
            is_eligible = false;
            reasons.push("Debt-to-income ratio too high: no monthly income".to_string());
        }
    }

    if let Some(ratio) = serviceability.filter(|ratio| *ratio < MIN_SERVICEABILITY) {
        is_eligible = false;
        reasons.push(format!("Insufficient income to service the loan: {:.2}", round_cents(ratio)));
    }

    if let Some(ratio) = loan_to_value.filter(|ratio| *ratio > MAX_LOAN_TO_VALUE_PERCENT) {
        reasons.push(format!("Loan-to-value ratio above 80%: {:.2}%", round_cents(ratio)));
    }

    Some(EligibilityAssessment {
        is_eligible,
        debt_to_income_ratio: debt_to_income.map(round_cents),
        serviceability_ratio: serviceability.map(round_cents),
        disposable_income: round_cents(disposable),
        estimated_monthly_repayment: round_cents(loan.monthly_repayment),
        loan_to_value_ratio: loan_to_value.map(round_cents),
        reasons,
    })
}
