// Cost relevant view of a user.
//
// Purpose
// - Carry the contract terms that drive the cost formula and the language that drives formatting.
//
// Boundaries
// - Framework free. Credentials, e-mail and names live with the surrounding user management.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractType {
    /// Salaried employment: monthly gross rate divided by the standard hours.
    Uop,
    /// Contractor billed at a flat hourly net rate.
    B2b,
}
crate::string_enum!(ContractType, "contract type", { Uop => "UOP", B2b => "B2B" });

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Pl,
    En,
    Ua,
}
crate::string_enum!(Language, "language", { Pl => "PL", En => "EN", Ua => "UA" });

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Employee,
    Manager,
    Director,
}
crate::string_enum!(Role, "role", {
    Employee => "EMPLOYEE",
    Manager => "MANAGER",
    Director => "DIRECTOR",
});

impl Role {
    pub fn can_review_entries(&self) -> bool {
        matches!(self, Role::Manager | Role::Director)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub role: Role,
    pub contract_type: ContractType,
    #[serde(default)]
    pub uop_gross_rate: Option<Decimal>,
    #[serde(default)]
    pub b2b_hourly_net_rate: Option<Decimal>,
    pub language: Language,
}
