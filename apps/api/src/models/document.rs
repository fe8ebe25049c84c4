use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The two document kinds the composer can build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    #[default]
    Quote,
    Agreement,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Quote => "quote",
            DocumentKind::Agreement => "agreement",
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Party
// ────────────────────────────────────────────────────────────────────────────

/// A customer as supplied by the caller. Every field may be absent; absent
/// and blank values are both treated as missing and printed as a sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Party {
    pub name: Option<String>,
    #[serde(alias = "org_number")]
    pub organization_id: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// The printable fields of a party, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartyField {
    Name,
    OrganizationId,
    Address,
    Email,
    Phone,
}

impl PartyField {
    pub const ALL: [PartyField; 5] = [
        PartyField::Name,
        PartyField::OrganizationId,
        PartyField::Address,
        PartyField::Email,
        PartyField::Phone,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PartyField::Name => "Namn",
            PartyField::OrganizationId => "Organisationsnummer",
            PartyField::Address => "Adress",
            PartyField::Email => "E-post",
            PartyField::Phone => "Telefon",
        }
    }
}

impl Party {
    /// Returns the trimmed field value, or `None` when absent or blank.
    pub fn field(&self, field: PartyField) -> Option<&str> {
        let value = match field {
            PartyField::Name => &self.name,
            PartyField::OrganizationId => &self.organization_id,
            PartyField::Address => &self.address,
            PartyField::Email => &self.email,
            PartyField::Phone => &self.phone,
        };
        value.as_deref().map(str::trim).filter(|v| !v.is_empty())
    }

    pub fn missing_fields(&self) -> Vec<PartyField> {
        PartyField::ALL
            .into_iter()
            .filter(|f| self.field(*f).is_none())
            .collect()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Request records
// ────────────────────────────────────────────────────────────────────────────

/// A line item as it arrives on the wire. Validated by `LineItem::from_input`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItemInput {
    pub name: String,
    pub quantity: Decimal,
    #[serde(alias = "price")]
    pub unit_price: Decimal,
    #[serde(alias = "discount", default)]
    pub discount_percent: Decimal,
}

/// Everything the composer needs for one document build.
///
/// `date` is the issue date. When absent the HTTP layer injects today's date
/// before composing; the composer itself never reads the clock.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentRequest {
    #[serde(rename = "type")]
    pub kind: DocumentKind,
    pub customer: Party,
    pub items: Vec<LineItemInput>,
    pub notes: Option<String>,
    /// Replaces the standard quote terms when present.
    #[serde(alias = "agreement_text")]
    pub terms: Option<String>,
    pub date: Option<NaiveDate>,
    pub quote_number: Option<String>,
    pub valid_until: Option<NaiveDate>,
    pub agreement_number: Option<String>,
    pub payment_plan_key: Option<String>,
    pub warranty_key: Option<String>,
    pub service_level_key: Option<String>,
    pub contract_period: Option<String>,
    pub installation_date: Option<String>,
    pub first_payment_date: Option<String>,
    pub special_terms: Option<String>,
}

/// Trims an optional text field and drops it when blank.
pub fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
