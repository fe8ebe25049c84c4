//! Enumerated clause variants selectable per agreement.
//!
//! Each family has a default that is used whenever the caller omits the key
//! or sends one that is not listed here.

use serde::{Deserialize, Serialize};

/// A family of interchangeable clause templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantSet {
    PaymentPlan,
    Warranty,
    ServiceLevel,
}

impl VariantSet {
    pub fn as_str(&self) -> &'static str {
        match self {
            VariantSet::PaymentPlan => "payment_plan",
            VariantSet::Warranty => "warranty",
            VariantSet::ServiceLevel => "service_level",
        }
    }

    pub fn default_key(&self) -> &'static str {
        match self {
            VariantSet::PaymentPlan => PaymentPlan::default().key(),
            VariantSet::Warranty => WarrantyPeriod::default().key(),
            VariantSet::ServiceLevel => ServiceLevel::default().key(),
        }
    }

    /// Every `(key, template)` pair of the family.
    pub fn entries(&self) -> Vec<(&'static str, &'static str)> {
        match self {
            VariantSet::PaymentPlan => PaymentPlan::ALL
                .iter()
                .map(|v| (v.key(), v.template()))
                .collect(),
            VariantSet::Warranty => WarrantyPeriod::ALL
                .iter()
                .map(|v| (v.key(), v.template()))
                .collect(),
            VariantSet::ServiceLevel => ServiceLevel::ALL
                .iter()
                .map(|v| (v.key(), v.template()))
                .collect(),
        }
    }
}

impl std::fmt::Display for VariantSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Payment plans
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PaymentPlan {
    FullPayment,
    #[default]
    Split5050,
    Split3070,
    Installments3,
    Installments4,
    /// Binds `{first_payment_date}` and `{contract_period}`.
    Monthly,
}

impl PaymentPlan {
    pub const ALL: [PaymentPlan; 6] = [
        PaymentPlan::FullPayment,
        PaymentPlan::Split5050,
        PaymentPlan::Split3070,
        PaymentPlan::Installments3,
        PaymentPlan::Installments4,
        PaymentPlan::Monthly,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            PaymentPlan::FullPayment => "full_payment",
            PaymentPlan::Split5050 => "split_50_50",
            PaymentPlan::Split3070 => "split_30_70",
            PaymentPlan::Installments3 => "installments_3",
            PaymentPlan::Installments4 => "installments_4",
            PaymentPlan::Monthly => "monthly",
        }
    }

    pub fn template(&self) -> &'static str {
        match self {
            PaymentPlan::FullPayment => "100% vid leverans",
            PaymentPlan::Split5050 => {
                "50% förskottsbetalning vid avtalsundertecknande\n\
                 50% vid färdigställd installation och driftsättning"
            }
            PaymentPlan::Split3070 => {
                "30% förskottsbetalning vid avtalsundertecknande\n\
                 70% vid färdigställd installation och driftsättning"
            }
            PaymentPlan::Installments3 => {
                "40% förskottsbetalning vid avtalsundertecknande\n\
                 30% vid påbörjad installation\n\
                 30% vid färdigställd installation och driftsättning"
            }
            PaymentPlan::Installments4 => {
                "30% förskottsbetalning vid avtalsundertecknande\n\
                 25% vid leverans av material\n\
                 25% vid påbörjad installation\n\
                 20% vid färdigställd installation och driftsättning"
            }
            PaymentPlan::Monthly => {
                "Månadsvis betalning enligt särskild betalningsplan\n\
                 Första betalning förfaller {first_payment_date}\n\
                 Därefter månatligen under {contract_period}"
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Warranty periods
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WarrantyPeriod {
    #[default]
    Standard,
    Extended,
    Premium,
}

impl WarrantyPeriod {
    pub const ALL: [WarrantyPeriod; 3] = [
        WarrantyPeriod::Standard,
        WarrantyPeriod::Extended,
        WarrantyPeriod::Premium,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            WarrantyPeriod::Standard => "standard",
            WarrantyPeriod::Extended => "extended",
            WarrantyPeriod::Premium => "premium",
        }
    }

    pub fn template(&self) -> &'static str {
        match self {
            WarrantyPeriod::Standard => "24 månader",
            WarrantyPeriod::Extended => "36 månader",
            WarrantyPeriod::Premium => "60 månader",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Service levels
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ServiceLevel {
    Basic,
    #[default]
    Standard,
    Premium,
}

impl ServiceLevel {
    pub const ALL: [ServiceLevel; 3] = [
        ServiceLevel::Basic,
        ServiceLevel::Standard,
        ServiceLevel::Premium,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ServiceLevel::Basic => "basic",
            ServiceLevel::Standard => "standard",
            ServiceLevel::Premium => "premium",
        }
    }

    pub fn template(&self) -> &'static str {
        match self {
            ServiceLevel::Basic => {
                "Bas: Teknisk support under kontorstid\n\
                 Inställelsetid: 2 arbetsdagar\n\
                 Supporttider: Vardagar 08:00-17:00"
            }
            ServiceLevel::Standard => {
                "Standard: Utökad support och årlig service\n\
                 Inställelsetid: 1 arbetsdag\n\
                 Supporttider: Vardagar 07:00-19:00"
            }
            ServiceLevel::Premium => {
                "Premium: 24/7 support och prioriterad service\n\
                 Inställelsetid: 4 timmar\n\
                 Supporttider: 24/7 alla dagar"
            }
        }
    }
}
