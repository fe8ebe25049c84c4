//! Block builders shared by quotes and agreements.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::ComposerSettings;
use crate::layout::blocks::{
    Align, ContentBlock, KeyValueBlock, KeyValueEntry, Paragraph, SignatureBlock, SignatureLine,
    SignatureParty, Table, TableColumn, TextLine, TextStyle,
};
use crate::layout::plan::mm;
use crate::models::company::CompanyProfile;
use crate::models::document::{non_blank, DocumentRequest, Party, PartyField};
use crate::pricing::{format_decimal, Money, PricedItems, PricedRow, Totals};
use crate::templates::{body_to_blocks, free_text_to_blocks, TemplateResolver};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

const SECTION_GAP_PT: f32 = 12.0;
const LABEL_WIDTH_PT: f32 = 120.0;
const SIGNATURE_GAP_PT: f32 = 26.0;

/// Everything one build reads. Borrowed for the duration of the build only.
pub struct BuildContext<'a> {
    pub request: &'a DocumentRequest,
    pub priced: &'a PricedItems,
    /// Issue date of the document.
    pub date: NaiveDate,
    pub settings: &'a ComposerSettings,
    pub company: &'a CompanyProfile,
    pub resolver: &'a TemplateResolver,
}

impl BuildContext<'_> {
    pub fn money(&self, amount: Money) -> String {
        amount.format(self.settings.amount_format)
    }

    pub fn sentinel(&self) -> &str {
        &self.settings.missing_sentinel
    }

    pub fn date_text(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Headings and text
// ────────────────────────────────────────────────────────────────────────────

pub fn title(text: &str) -> ContentBlock {
    ContentBlock::TextLine(TextLine {
        text: text.to_string(),
        style: TextStyle::DOCUMENT_TITLE,
        align: Align::Center,
        alert: false,
    })
}

pub fn heading(text: &str) -> ContentBlock {
    ContentBlock::text(text, TextStyle::HEADING)
}

pub fn gap() -> ContentBlock {
    ContentBlock::spacer(SECTION_GAP_PT)
}

/// The supplier's letterhead: name and contact lines.
pub fn supplier_header(company: &CompanyProfile) -> Vec<ContentBlock> {
    vec![
        ContentBlock::text(&company.name, TextStyle::TITLE),
        ContentBlock::text(
            format!("{}, {}", company.address, company.postal),
            TextStyle::SMALL,
        ),
        ContentBlock::text(
            format!("Tel: {}  E-post: {}", company.phone, company.email),
            TextStyle::SMALL,
        ),
        ContentBlock::text(format!("Org.nr: {}", company.org_nr), TextStyle::SMALL),
        gap(),
    ]
}

/// A heading followed by the body split into blocks.
pub fn section(heading_text: &str, body: &str) -> Vec<ContentBlock> {
    let mut blocks = vec![heading(heading_text)];
    blocks.extend(body_to_blocks(body));
    blocks.push(gap());
    blocks
}

/// A heading followed by user-written text as plain paragraphs.
pub fn free_section(heading_text: &str, text: &str) -> Vec<ContentBlock> {
    let mut blocks = vec![heading(heading_text)];
    blocks.extend(free_text_to_blocks(text));
    blocks.push(gap());
    blocks
}

pub fn notes(ctx: &BuildContext<'_>) -> Vec<ContentBlock> {
    match non_blank(&ctx.request.notes) {
        Some(text) => free_section("Anteckningar", text),
        None => Vec::new(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Key/value blocks
// ────────────────────────────────────────────────────────────────────────────

pub fn key_values(entries: Vec<KeyValueEntry>) -> ContentBlock {
    ContentBlock::KeyValue(KeyValueBlock {
        entries,
        label_width_pt: LABEL_WIDTH_PT,
        indent_pt: 0.0,
        label_style: TextStyle::BODY_BOLD,
        value_style: TextStyle::BODY,
    })
}

pub fn entry(label: &str, value: impl Into<String>) -> KeyValueEntry {
    KeyValueEntry {
        label: label.to_string(),
        value: value.into(),
        missing: false,
    }
}

/// An entry for optional data: the sentinel, flagged, when absent.
pub fn entry_or_sentinel(label: &str, value: Option<&str>, sentinel: &str) -> KeyValueEntry {
    match value {
        Some(v) => entry(label, v),
        None => KeyValueEntry {
            label: label.to_string(),
            value: sentinel.to_string(),
            missing: true,
        },
    }
}

/// Customer fields, with the sentinel for each absent one and an alert line
/// naming them.
pub fn party(party: &Party, sentinel: &str) -> Vec<ContentBlock> {
    let entries = PartyField::ALL
        .iter()
        .map(|f| entry_or_sentinel(f.label(), party.field(*f), sentinel))
        .collect();
    let mut blocks = vec![key_values(entries)];

    let missing = party.missing_fields();
    if !missing.is_empty() {
        let labels: Vec<&str> = missing.iter().map(PartyField::label).collect();
        blocks.push(ContentBlock::Paragraph(Paragraph {
            text: format!("OBS! Följande uppgifter saknas: {}", labels.join(", ")),
            style: TextStyle::BODY_BOLD,
            indent_pt: 0.0,
            alert: true,
        }));
    }
    blocks
}

pub fn company(company: &CompanyProfile) -> ContentBlock {
    key_values(vec![
        entry("Namn", &company.name),
        entry("Organisationsnummer", &company.org_nr),
        entry("Adress", format!("{}, {}", company.address, company.postal)),
        entry("E-post", &company.email),
        entry("Telefon", &company.phone),
    ])
}

// ────────────────────────────────────────────────────────────────────────────
// Pricing blocks
// ────────────────────────────────────────────────────────────────────────────

pub fn items_table(rows: &[PricedRow], ctx: &BuildContext<'_>) -> ContentBlock {
    let column = |title: &str, width_mm: f32, align: Align| TableColumn {
        title: title.to_string(),
        width_pt: mm(width_mm),
        align,
    };

    ContentBlock::Table(Table {
        columns: vec![
            column("Beskrivning", 70.0, Align::Left),
            column("Antal", 20.0, Align::Right),
            column("Á-pris", 25.0, Align::Right),
            column("Rabatt", 25.0, Align::Right),
            column("Summa", 30.0, Align::Right),
        ],
        rows: rows
            .iter()
            .map(|row| {
                vec![
                    row.name.clone(),
                    format_decimal(row.quantity),
                    ctx.money(row.unit_price),
                    discount_text(row.discount_percent),
                    ctx.money(row.line_total),
                ]
            })
            .collect(),
        header_style: TextStyle::BODY_BOLD,
        body_style: TextStyle::BODY,
        cell_padding_pt: 3.5,
        continued: false,
    })
}

fn discount_text(percent: Decimal) -> String {
    if percent.is_zero() {
        "-".to_string()
    } else {
        format!("{}%", format_decimal(percent))
    }
}

/// `0.25` → `25%`
pub fn tax_percent(rate: Decimal) -> String {
    format!("{}%", format_decimal(rate * Decimal::ONE_HUNDRED))
}

pub fn totals(totals: &Totals, ctx: &BuildContext<'_>) -> ContentBlock {
    ContentBlock::KeyValue(KeyValueBlock {
        entries: vec![
            entry("Summa exkl. moms", ctx.money(totals.subtotal)),
            entry(
                &format!("Moms ({})", tax_percent(totals.tax_rate)),
                ctx.money(totals.tax),
            ),
            entry("Totalt inkl. moms", ctx.money(totals.grand_total)),
        ],
        label_width_pt: mm(45.0),
        indent_pt: mm(90.0),
        label_style: TextStyle::BODY_BOLD,
        value_style: TextStyle::BODY_BOLD,
    })
}

/// Items table and totals, or nothing when there are no items.
pub fn pricing(heading_text: &str, ctx: &BuildContext<'_>) -> Vec<ContentBlock> {
    if ctx.priced.rows.is_empty() {
        return Vec::new();
    }
    vec![
        heading(heading_text),
        items_table(&ctx.priced.rows, ctx),
        ContentBlock::spacer(6.0),
        totals(&ctx.priced.totals, ctx),
        gap(),
    ]
}

// ────────────────────────────────────────────────────────────────────────────
// Signatures
// ────────────────────────────────────────────────────────────────────────────

pub fn signature_line(caption: &str, printed: Option<&str>) -> SignatureLine {
    SignatureLine {
        caption: caption.to_string(),
        printed: printed.map(str::to_string),
    }
}

pub fn signature_party(heading: String, lines: Vec<SignatureLine>) -> SignatureParty {
    SignatureParty { heading, lines }
}

pub fn signatures(parties: Vec<SignatureParty>) -> ContentBlock {
    ContentBlock::Signature(SignatureBlock {
        parties,
        line_gap_pt: SIGNATURE_GAP_PT,
        style: TextStyle::BODY,
    })
}
