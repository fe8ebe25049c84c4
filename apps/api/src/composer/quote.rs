use chrono::Days;

use crate::composer::common::{self, BuildContext, DATE_FORMAT};
use crate::layout::blocks::ContentBlock;
use crate::models::document::non_blank;
use crate::templates::agreement_terms::{QUOTE_STANDARD_TERMS, QUOTE_TITLE};
use crate::templates::Bindings;

/// Shown instead of a quote number for quotes that have not been numbered yet.
pub const DRAFT_NUMBER: &str = "UTKAST";

pub fn blocks(ctx: &BuildContext<'_>) -> Vec<ContentBlock> {
    let request = ctx.request;
    let mut blocks = common::supplier_header(ctx.company);

    blocks.push(common::title(QUOTE_TITLE));
    blocks.push(common::gap());
    blocks.push(common::key_values(vec![
        common::entry(
            "Offertnummer",
            non_blank(&request.quote_number).unwrap_or(DRAFT_NUMBER),
        ),
        common::entry("Datum", ctx.date_text()),
        common::entry("Giltig till", valid_until(ctx)),
    ]));
    blocks.push(common::gap());

    blocks.push(common::heading("Kunduppgifter"));
    blocks.extend(common::party(&request.customer, ctx.sentinel()));
    blocks.push(common::gap());

    blocks.extend(common::pricing("Produkter och tjänster", ctx));
    blocks.extend(common::notes(ctx));
    blocks.extend(common::section("Villkor", &terms(ctx)));

    blocks.push(common::signatures(vec![common::signature_party(
        "Kundens godkännande".to_string(),
        vec![
            common::signature_line("Underskrift", None),
            common::signature_line("Namnförtydligande", None),
            common::signature_line("Datum", None),
        ],
    )]));

    blocks
}

/// The request's date, or the issue date plus the configured validity.
fn valid_until(ctx: &BuildContext<'_>) -> String {
    let date = ctx.request.valid_until.or_else(|| {
        ctx.date
            .checked_add_days(Days::new(u64::from(ctx.settings.quote_validity_days)))
    });
    match date {
        Some(d) => d.format(DATE_FORMAT).to_string(),
        None => ctx.sentinel().to_string(),
    }
}

/// The request's own terms verbatim, or the standard terms.
fn terms(ctx: &BuildContext<'_>) -> String {
    if let Some(custom) = non_blank(&ctx.request.terms) {
        return custom.to_string();
    }
    let mut bindings = Bindings::new();
    bindings.insert("validity_days", ctx.settings.quote_validity_days.to_string());
    ctx.resolver.resolve_text(QUOTE_STANDARD_TERMS, &bindings).text
}
