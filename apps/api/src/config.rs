use std::str::FromStr;

use anyhow::{anyhow, ensure, Result};
use rust_decimal::Decimal;

use crate::layout::plan::PageGeometry;
use crate::models::company::CompanyProfile;
use crate::pricing::AmountFormat;

/// Application configuration loaded from environment variables.
/// Every key is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub composer: ComposerSettings,
    pub company: CompanyProfile,
}

/// Policy knobs for document builds.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposerSettings {
    /// VAT as a fraction, 0..=1.
    pub tax_rate: Decimal,
    pub amount_format: AmountFormat,
    /// Printed in place of absent customer data.
    pub missing_sentinel: String,
    /// Special-terms value that means "no special terms".
    pub special_terms_none: String,
    pub quote_validity_days: u32,
    pub quote_requires_items: bool,
    pub agreement_requires_items: bool,
    pub page: PageGeometry,
}

impl Default for ComposerSettings {
    fn default() -> Self {
        ComposerSettings {
            tax_rate: Decimal::new(25, 2),
            amount_format: AmountFormat::TwoDecimals,
            missing_sentinel: "SAKNAS".to_string(),
            special_terms_none: "Inga".to_string(),
            quote_validity_days: 30,
            quote_requires_items: false,
            agreement_requires_items: true,
            page: PageGeometry::a4(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Config::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = ComposerSettings::default();
        let company_defaults = CompanyProfile::default();
        let text = |key: &str, default: String| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
        };

        let tax_rate: Decimal = parse_or(&lookup, "TAX_RATE", defaults.tax_rate)?;
        ensure!(
            (Decimal::ZERO..=Decimal::ONE).contains(&tax_rate),
            "TAX_RATE must be a fraction between 0 and 1, got {tax_rate}"
        );

        let composer = ComposerSettings {
            tax_rate,
            amount_format: parse_or(&lookup, "AMOUNT_FORMAT", defaults.amount_format)?,
            missing_sentinel: text("MISSING_SENTINEL", defaults.missing_sentinel),
            special_terms_none: text("SPECIAL_TERMS_NONE", defaults.special_terms_none),
            quote_validity_days: parse_or(
                &lookup,
                "QUOTE_VALIDITY_DAYS",
                defaults.quote_validity_days,
            )?,
            quote_requires_items: parse_or(
                &lookup,
                "QUOTE_REQUIRES_ITEMS",
                defaults.quote_requires_items,
            )?,
            agreement_requires_items: parse_or(
                &lookup,
                "AGREEMENT_REQUIRES_ITEMS",
                defaults.agreement_requires_items,
            )?,
            page: defaults.page,
        };

        let company = CompanyProfile {
            name: text("COMPANY_NAME", company_defaults.name),
            org_nr: text("COMPANY_ORG_NR", company_defaults.org_nr),
            address: text("COMPANY_ADDRESS", company_defaults.address),
            postal: text("COMPANY_POSTAL", company_defaults.postal),
            phone: text("COMPANY_PHONE", company_defaults.phone),
            email: text("COMPANY_EMAIL", company_defaults.email),
            representative: text("COMPANY_REPRESENTATIVE", company_defaults.representative),
        };

        Ok(Config {
            port: parse_or(&lookup, "PORT", 8080)?,
            rust_log: text("RUST_LOG", "info".to_string()),
            composer,
            company,
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key).map(|v| v.trim().to_string()) {
        Some(raw) if !raw.is_empty() => raw
            .parse::<T>()
            .map_err(|e| anyhow!("{key} has an invalid value '{raw}': {e}")),
        _ => Ok(default),
    }
}
