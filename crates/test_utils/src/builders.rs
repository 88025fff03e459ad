//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

use core_kernel::ApplicationId;
use domain_funding::{FundingResult, LoanApplication};

use crate::fixtures::{BorrowerFixtures, FundingFixtures};

/// Builder for loan applications
pub struct TestApplicationBuilder {
    application: LoanApplication,
}

impl Default for TestApplicationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestApplicationBuilder {
    /// Creates a builder seeded with the reference application terms
    pub fn new() -> Self {
        let reference = format!("APP-TEST-{:06}", (0..1_000_000u32).fake::<u32>());
        Self {
            application: LoanApplication::new(reference).with_loan(dec!(1000000), 12, dec!(8)),
        }
    }

    /// Sets the application ID
    pub fn with_id(mut self, id: ApplicationId) -> Self {
        self.application.id = id;
        self
    }

    /// Sets the reference number
    pub fn with_reference_number(mut self, reference: impl Into<String>) -> Self {
        self.application.reference_number = reference.into();
        self
    }

    /// Sets the loan amount
    pub fn with_loan_amount(mut self, amount: Decimal) -> Self {
        self.application.loan_amount = Some(amount);
        self
    }

    /// Sets the loan term in months
    pub fn with_loan_term(mut self, months: u32) -> Self {
        self.application.loan_term = Some(months);
        self
    }

    /// Sets the annual interest rate
    pub fn with_interest_rate(mut self, rate: Decimal) -> Self {
        self.application.interest_rate = Some(rate);
        self
    }

    /// Sets the value of the security property
    pub fn with_security_value(mut self, value: Decimal) -> Self {
        self.application.security_value = Some(value);
        self
    }

    /// Clears all loan terms
    pub fn without_terms(mut self) -> Self {
        self.application.loan_amount = None;
        self.application.loan_term = None;
        self.application.interest_rate = None;
        self
    }

    /// Sets a cached funding result
    pub fn with_funding_result(mut self, result: FundingResult) -> Self {
        self.application.funding_result = Some(result);
        self
    }

    /// Builds the application
    pub fn build(self) -> LoanApplication {
        self.application
    }
}

/// Builder for manual funding input payloads
///
/// Starts from [`FundingFixtures::reference_payload`].
pub struct FundingPayloadBuilder {
    payload: Value,
}

impl Default for FundingPayloadBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FundingPayloadBuilder {
    /// Creates a builder with the reference inputs
    pub fn new() -> Self {
        Self {
            payload: FundingFixtures::reference_payload(),
        }
    }

    /// Sets any field to an arbitrary JSON value
    pub fn set(mut self, field: &str, value: Value) -> Self {
        self.payload[field] = value;
        self
    }

    /// Removes a field
    pub fn without(mut self, field: &str) -> Self {
        if let Some(fields) = self.payload.as_object_mut() {
            fields.remove(field);
        }
        self
    }

    /// Sets the establishment fee rate
    pub fn with_establishment_fee_rate(self, rate: Decimal) -> Self {
        self.set("establishment_fee_rate", json!(rate.to_string()))
    }

    /// Sets the capped interest months
    pub fn with_capped_interest_months(self, months: u32) -> Self {
        self.set("capped_interest_months", json!(months))
    }

    /// Sets the working fee
    pub fn with_working_fee(self, fee: Decimal) -> Self {
        self.set("working_fee", json!(fee.to_string()))
    }

    /// Builds the payload
    pub fn build(self) -> Value {
        self.payload
    }
}

/// Builder for company borrower payloads
///
/// Starts from [`BorrowerFixtures::valid_company`] with a random company name
/// and director.
pub struct CompanyBorrowerBuilder {
    payload: Value,
}

impl Default for CompanyBorrowerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CompanyBorrowerBuilder {
    /// Creates a builder for a valid company
    pub fn new() -> Self {
        let mut payload = BorrowerFixtures::valid_company();
        payload["company_name"] = json!(CompanyName().fake::<String>());
        payload["directors"] = json!([random_person()]);
        Self { payload }
    }

    /// Sets any top-level field
    pub fn set(mut self, field: &str, value: Value) -> Self {
        self.payload[field] = value;
        self
    }

    /// Removes a top-level field
    pub fn without(mut self, field: &str) -> Self {
        if let Some(fields) = self.payload.as_object_mut() {
            fields.remove(field);
        }
        self
    }

    /// Sets the ABN
    pub fn with_abn(self, abn: &str) -> Self {
        self.set("abn", json!(abn))
    }

    /// Sets the ACN
    pub fn with_acn(self, acn: &str) -> Self {
        self.set("acn", json!(acn))
    }

    /// Sets a registered address field
    pub fn with_address_field(mut self, field: &str, value: Value) -> Self {
        self.payload["registered_address"][field] = value;
        self
    }

    /// Sets a financial info field
    pub fn with_financial_field(mut self, field: &str, value: Value) -> Self {
        self.payload["financial_info"][field] = value;
        self
    }

    /// Appends a director
    pub fn with_director(mut self, director: Value) -> Self {
        if let Some(directors) = self.payload["directors"].as_array_mut() {
            directors.push(director);
        }
        self
    }

    /// Builds the payload
    pub fn build(self) -> Value {
        self.payload
    }
}

/// Builder for individual borrower payloads
///
/// Starts from [`BorrowerFixtures::valid_individual`] with a random name and
/// email.
pub struct IndividualBorrowerBuilder {
    payload: Value,
}

impl Default for IndividualBorrowerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl IndividualBorrowerBuilder {
    /// Creates a builder for a valid individual
    pub fn new() -> Self {
        let mut payload = BorrowerFixtures::valid_individual();
        payload["first_name"] = json!(FirstName().fake::<String>());
        payload["last_name"] = json!(LastName().fake::<String>());
        payload["email"] = json!(SafeEmail().fake::<String>());
        Self { payload }
    }

    /// Sets any top-level field
    pub fn set(mut self, field: &str, value: Value) -> Self {
        self.payload[field] = value;
        self
    }

    /// Removes a top-level field
    pub fn without(mut self, field: &str) -> Self {
        if let Some(fields) = self.payload.as_object_mut() {
            fields.remove(field);
        }
        self
    }

    /// Sets the date of birth
    pub fn with_date_of_birth(self, date: &str) -> Self {
        self.set("date_of_birth", json!(date))
    }

    /// Sets the phone number
    pub fn with_phone(self, phone: &str) -> Self {
        self.set("phone", json!(phone))
    }

    /// Replaces the assets list
    pub fn with_assets(self, assets: Value) -> Self {
        self.set("assets", assets)
    }

    /// Replaces the liabilities list
    pub fn with_liabilities(self, liabilities: Value) -> Self {
        self.set("liabilities", liabilities)
    }

    /// Builds the payload
    pub fn build(self) -> Value {
        self.payload
    }
}

fn random_person() -> Value {
    json!({
        "first_name": FirstName().fake::<String>(),
        "last_name": LastName().fake::<String>(),
        "email": SafeEmail().fake::<String>(),
    })
}
