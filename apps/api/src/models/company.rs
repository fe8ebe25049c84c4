use serde::{Deserialize, Serialize};

/// The supplier's own details, printed in every document header and used
/// to bind the supplier placeholders in the agreement clauses.
///
/// Loaded once at startup and shared read-only between builds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub name: String,
    pub org_nr: String,
    pub address: String,
    pub postal: String,
    pub phone: String,
    pub email: String,
    /// Person who signs agreements on the supplier's behalf.
    pub representative: String,
}

impl Default for CompanyProfile {
    fn default() -> Self {
        CompanyProfile {
            name: "Tretec Larm AB".to_string(),
            org_nr: "556123-4567".to_string(),
            address: "Exempelgatan 123".to_string(),
            postal: "123 45 Stockholm".to_string(),
            phone: "08-123 45 67".to_string(),
            email: "info@treteclarm.se".to_string(),
            representative: "Behörig firmatecknare".to_string(),
        }
    }
}
