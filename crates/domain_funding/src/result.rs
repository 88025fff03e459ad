//! Funding calculation result

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Itemized fee breakdown and net funds available, all in whole cents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundingResult {
    pub establishment_fee: Decimal,
    pub capped_interest: Decimal,
    pub line_fee: Decimal,
    pub brokerage_fee: Decimal,
    /// Legal fee including GST
    pub legal_fee: Decimal,
    /// GST portion of `legal_fee`
    pub legal_fee_gst: Decimal,
    pub application_fee: Decimal,
    pub due_diligence_fee: Decimal,
    pub valuation_fee: Decimal,
    /// Monthly account fee over the capped interest period
    pub account_fees: Decimal,
    pub working_fee: Decimal,
    pub total_fees: Decimal,
    pub funds_available: Decimal,
}

impl FundingResult {
    /// Fee components that make up `total_fees`, in display order
    pub fn components(&self) -> [(&'static str, Decimal); 10] {
        [
            ("establishment_fee", self.establishment_fee),
            ("capped_interest", self.capped_interest),
            ("line_fee", self.line_fee),
            ("brokerage_fee", self.brokerage_fee),
            ("legal_fee", self.legal_fee),
            ("application_fee", self.application_fee),
            ("due_diligence_fee", self.due_diligence_fee),
            ("valuation_fee", self.valuation_fee),
            ("account_fees", self.account_fees),
            ("working_fee", self.working_fee),
        ]
    }

    /// Returns true when the fees exceed the principal
    pub fn is_shortfall(&self) -> bool {
        self.funds_available < Decimal::ZERO
    }
}
