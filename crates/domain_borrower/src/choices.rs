//! Closed choice lists used by borrower records
//!
//! Each choice serializes as its snake_case code and parses from it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! define_choice {
    ($(#[$meta:meta])* $name:ident, $label:literal { $($variant:ident => $code:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every allowed value
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire code of the choice
            pub fn code(&self) -> &'static str {
                match self {
                    $($name::$variant => $code),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.code())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($code => Ok($name::$variant),)+
                    _ => Err(format!("unknown {}: {}", $label, s)),
                }
            }
        }
    };
}

define_choice!(
    /// Residency status of an individual borrower
    ResidencyStatus, "residency status" {
        Citizen => "citizen",
        PermanentResident => "permanent_resident",
        TemporaryResident => "temporary_resident",
        ForeignInvestor => "foreign_investor",
    }
);

define_choice!(
    /// Marital status of an individual borrower
    MaritalStatus, "marital status" {
        Single => "single",
        Married => "married",
        DeFacto => "de_facto",
        Divorced => "divorced",
        Widowed => "widowed",
    }
);

define_choice!(
    /// Employment arrangement of an individual borrower
    EmploymentType, "employment type" {
        FullTime => "full_time",
        PartTime => "part_time",
        Casual => "casual",
        SelfEmployed => "self_employed",
        Contractor => "contractor",
        Unemployed => "unemployed",
        Retired => "retired",
    }
);

define_choice!(
    /// Kind of asset held by a borrower
    AssetType, "asset type" {
        Property => "property",
        Vehicle => "vehicle",
        Savings => "savings",
        Investment => "investment",
        Superannuation => "superannuation",
        Other => "other",
    }
);

define_choice!(
    /// Kind of liability owed by a borrower
    LiabilityType, "liability type" {
        Mortgage => "mortgage",
        PersonalLoan => "personal_loan",
        CarLoan => "car_loan",
        CreditCard => "credit_card",
        TaxDebt => "tax_debt",
        Other => "other",
    }
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_parse_back() {
        for status in ResidencyStatus::ALL {
            assert_eq!(status.code().parse::<ResidencyStatus>().as_ref(), Ok(status));
        }
        for liability in LiabilityType::ALL {
            assert_eq!(liability.code().parse::<LiabilityType>().as_ref(), Ok(liability));
        }
    }

    #[test]
    fn test_serde_uses_codes() {
        let json = serde_json::to_value(EmploymentType::SelfEmployed).unwrap();
        assert_eq!(json, serde_json::json!("self_employed"));
        assert_eq!(MaritalStatus::DeFacto.to_string(), "de_facto");
    }

    #[test]
    fn test_unknown_code() {
        let err = "yacht".parse::<AssetType>().unwrap_err();
        assert!(err.contains("asset type"));
    }
}
