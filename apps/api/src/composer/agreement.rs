use chrono::{Months, NaiveDate};
use tracing::debug;

use crate::composer::common::{self, BuildContext, DATE_FORMAT};
use crate::layout::blocks::{ContentBlock, TextStyle};
use crate::models::document::{non_blank, PartyField};
use crate::templates::agreement_terms::{
    AGREEMENT_SUBTITLE, AGREEMENT_TITLE, INTRODUCTION, SIGNATURES_SECTION, SPECIAL_TERMS_SECTION,
    STANDARD_SECTIONS,
};
use crate::templates::{parse_section, Bindings, VariantSet};

pub const DEFAULT_CONTRACT_PERIOD: &str = "12 månader";

pub fn blocks(ctx: &BuildContext<'_>) -> Vec<ContentBlock> {
    let (blocks, missing) = build(ctx);
    if !missing.is_empty() {
        debug!(missing = ?missing, "Agreement has unbound placeholders");
    }
    blocks
}

/// The agreement blocks and the sorted keys of every unbound placeholder.
fn build(ctx: &BuildContext<'_>) -> (Vec<ContentBlock>, Vec<String>) {
    let request = ctx.request;
    let (values, mut missing) = bindings(ctx);
    let resolve = |template: &str| ctx.resolver.resolve_text(template, &values);

    let mut blocks = common::supplier_header(ctx.company);
    blocks.push(common::title(AGREEMENT_TITLE));
    blocks.push(common::title(AGREEMENT_SUBTITLE));
    blocks.push(common::gap());

    blocks.push(common::key_values(vec![
        common::entry_or_sentinel(
            "Avtalsnummer",
            non_blank(&request.agreement_number),
            ctx.sentinel(),
        ),
        common::entry("Datum", ctx.date_text()),
        common::entry("Avtalsperiod", contract_period(ctx)),
    ]));
    blocks.push(common::gap());

    let intro = resolve(INTRODUCTION);
    missing.extend(intro.missing);
    blocks.push(ContentBlock::paragraph(intro.text, TextStyle::BODY));
    blocks.push(common::gap());

    blocks.push(common::heading("PARTER"));
    blocks.push(ContentBlock::text("Leverantör", TextStyle::SUBHEADING));
    blocks.push(common::company(ctx.company));
    blocks.push(ContentBlock::spacer(6.0));
    blocks.push(ContentBlock::text("Kund", TextStyle::SUBHEADING));
    blocks.extend(common::party(&request.customer, ctx.sentinel()));
    blocks.push(common::gap());

    blocks.extend(common::pricing("Avtalsspecifikation", ctx));
    blocks.extend(common::notes(ctx));

    for (i, raw) in sections(ctx).into_iter().enumerate() {
        let section = parse_section(raw);
        let body = resolve(&section.body);
        missing.extend(body.missing);
        let heading = format!("§{} {}", i + 1, section.title);
        if raw == SPECIAL_TERMS_SECTION {
            blocks.extend(common::free_section(&heading, &body.text));
        } else {
            blocks.extend(common::section(&heading, &body.text));
        }
    }

    let signatures = parse_section(SIGNATURES_SECTION);
    let body = resolve(&signatures.body);
    missing.extend(body.missing);
    blocks.extend(common::section(&signatures.title, &body.text));
    blocks.push(signature_block(ctx));

    missing.sort();
    missing.dedup();
    (blocks, missing)
}

/// The numbered sections in print order.
fn sections(ctx: &BuildContext<'_>) -> Vec<&'static str> {
    let mut sections = STANDARD_SECTIONS.to_vec();
    if special_terms(ctx).is_some() {
        sections.push(SPECIAL_TERMS_SECTION);
    }
    sections
}

/// Special terms worth printing: non-blank and not the configured "none" value.
fn special_terms<'a>(ctx: &BuildContext<'a>) -> Option<&'a str> {
    non_blank(&ctx.request.special_terms)
        .filter(|t| t.to_lowercase() != ctx.settings.special_terms_none.trim().to_lowercase())
}

fn contract_period(ctx: &BuildContext<'_>) -> String {
    non_blank(&ctx.request.contract_period)
        .unwrap_or(DEFAULT_CONTRACT_PERIOD)
        .to_string()
}

/// Number of months a period like `12 månader` or `2 år` spans.
fn period_months(period: &str) -> Option<u32> {
    let period = period.trim();
    let digits: String = period.chars().take_while(char::is_ascii_digit).collect();
    let count: u32 = digits.parse().ok()?;
    let unit = period[digits.len()..].trim().to_lowercase();
    if unit.starts_with("år") {
        count.checked_mul(12)
    } else {
        Some(count)
    }
}

fn contract_end(start: NaiveDate, period: &str) -> Option<NaiveDate> {
    start.checked_add_months(Months::new(period_months(period)?))
}

/// Placeholder values for every agreement template, plus the keys the
/// payment-plan variant left unbound while being resolved.
fn bindings(ctx: &BuildContext<'_>) -> (Bindings, Vec<String>) {
    let request = ctx.request;
    let customer = &request.customer;
    let company = ctx.company;
    let period = contract_period(ctx);
    let start = ctx.date;

    let mut plan_bindings = Bindings::new();
    plan_bindings
        .insert_opt("first_payment_date", non_blank(&request.first_payment_date))
        .insert("contract_period", period.clone());
    let payment_plan = ctx.resolver.resolve(
        VariantSet::PaymentPlan,
        request.payment_plan_key.as_deref(),
        &plan_bindings,
    );

    let mut b = Bindings::new();
    b.insert("company_name", &company.name)
        .insert("company_org_nr", &company.org_nr)
        .insert("company_address", &company.address)
        .insert("company_postal", &company.postal)
        .insert("company_phone", &company.phone)
        .insert("company_email", &company.email)
        .insert("company_representative", &company.representative)
        .insert_opt("customer_name", customer.field(PartyField::Name))
        .insert_opt("customer_org_nr", customer.field(PartyField::OrganizationId))
        .insert_opt("customer_address", customer.field(PartyField::Address))
        .insert_opt("customer_email", customer.field(PartyField::Email))
        .insert_opt("customer_phone", customer.field(PartyField::Phone))
        .insert_opt("installation_date", non_blank(&request.installation_date))
        .insert("total_amount", ctx.money(ctx.priced.totals.subtotal))
        .insert("tax_percent", common::tax_percent(ctx.priced.totals.tax_rate))
        .insert("payment_plan", &payment_plan.text)
        .insert("contract_period", period.clone())
        .insert("contract_start_date", start.format(DATE_FORMAT).to_string())
        .insert(
            "warranty_period",
            ctx.resolver
                .select(VariantSet::Warranty, request.warranty_key.as_deref()),
        )
        .insert(
            "service_level",
            ctx.resolver
                .select(VariantSet::ServiceLevel, request.service_level_key.as_deref()),
        )
        .insert_opt("special_terms", special_terms(ctx))
        .insert("contract_date", ctx.date_text());

    if let Some(end) = contract_end(start, &period) {
        b.insert("contract_end_date", end.format(DATE_FORMAT).to_string());
    }
    (b, payment_plan.missing)
}

fn signature_block(ctx: &BuildContext<'_>) -> ContentBlock {
    let customer = &ctx.request.customer;
    let customer_name = customer.field(PartyField::Name);

    let lines = |printed: Option<&str>| {
        vec![
            common::signature_line("Underskrift", printed),
            common::signature_line("Namnförtydligande", None),
            common::signature_line("Ort och datum", None),
        ]
    };

    common::signatures(vec![
        common::signature_party(
            format!("För {}", ctx.company.name),
            lines(Some(ctx.company.representative.as_str())),
        ),
        common::signature_party(
            format!("För {}", customer_name.unwrap_or(ctx.sentinel())),
            lines(customer_name),
        ),
    ])
}
