//! Sensitive field categories

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Kind of sensitive span.
///
/// Declaration order doubles as priority when two detections cover the
/// same text: earlier variants win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    PersonName,
    Organization,
    HealthcareFacility,
    StreetAddress,
    PhoneNumber,
    EmailAddress,
    AccountNumber,
    IdentificationNumber,
    Medication,
    Dosage,
    MonetaryAmount,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::PersonName,
        Category::Organization,
        Category::HealthcareFacility,
        Category::StreetAddress,
        Category::PhoneNumber,
        Category::EmailAddress,
        Category::AccountNumber,
        Category::IdentificationNumber,
        Category::Medication,
        Category::Dosage,
        Category::MonetaryAmount,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::PersonName => "person_name",
            Category::Organization => "organization",
            Category::HealthcareFacility => "healthcare_facility",
            Category::StreetAddress => "street_address",
            Category::PhoneNumber => "phone_number",
            Category::EmailAddress => "email_address",
            Category::AccountNumber => "account_number",
            Category::IdentificationNumber => "identification_number",
            Category::Medication => "medication",
            Category::Dosage => "dosage",
            Category::MonetaryAmount => "monetary_amount",
        }
    }

    /// One-line description used when instructing an external model
    pub fn description(&self) -> &'static str {
        match self {
            Category::PersonName => {
                "names of people, including honorifics (patients, physicians, parties, witnesses)"
            }
            Category::Organization => "companies, insurers, law firms and other named organizations",
            Category::HealthcareFacility => "hospitals, clinics, pharmacies and medical centers",
            Category::StreetAddress => "street addresses, with unit, city, state and ZIP if present",
            Category::PhoneNumber => "telephone and fax numbers",
            Category::EmailAddress => "email addresses",
            Category::AccountNumber => "account, policy, member, claim and group numbers",
            Category::IdentificationNumber => "SSNs, medical record numbers, NPIs and license numbers",
            Category::Medication => "brand or generic drug names",
            Category::Dosage => "drug strengths and doses such as '20 mg' or '0.5 mL'",
            Category::MonetaryAmount => "dollar amounts, including rates such as '$150/month'",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        let category = match normalized.as_str() {
            "person_name" | "person" | "name" => Category::PersonName,
            "organization" | "organisation" | "company" | "insurer" => Category::Organization,
            "healthcare_facility" | "facility" | "hospital" => Category::HealthcareFacility,
            "street_address" | "address" => Category::StreetAddress,
            "phone_number" | "phone" | "fax" => Category::PhoneNumber,
            "email_address" | "email" => Category::EmailAddress,
            "account_number" | "account" | "policy_number" => Category::AccountNumber,
            "identification_number" | "id_number" | "ssn" | "mrn" => {
                Category::IdentificationNumber
            }
            "medication" | "drug" => Category::Medication,
            "dosage" | "dose" => Category::Dosage,
            "monetary_amount" | "money" | "amount" => Category::MonetaryAmount,
            _ => return Err(Error::UnknownCategory(s.to_string())),
        };
        Ok(category)
    }
}
