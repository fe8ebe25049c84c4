// Composer: turns a document request into priced rows and a paginated
// render plan. One call is one build; builds share only immutable state.

pub mod agreement;
pub mod common;
pub mod handlers;
pub mod quote;

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::composer::common::BuildContext;
use crate::config::ComposerSettings;
use crate::errors::DocumentError;
use crate::layout::blocks::ContentBlock;
use crate::layout::{LayoutEngine, RenderPlan};
use crate::models::company::CompanyProfile;
use crate::models::document::{DocumentKind, DocumentRequest};
use crate::pricing::{price, LineItem, Totals};
use crate::templates::TemplateResolver;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComposedDocument {
    pub kind: DocumentKind,
    pub plan: RenderPlan,
    pub totals: Totals,
    /// Download name without extension, e.g. `tretec_quote_20261019`.
    pub file_stem: String,
}

#[derive(Debug, Clone)]
pub struct DocumentComposer {
    settings: ComposerSettings,
    company: Arc<CompanyProfile>,
    resolver: TemplateResolver,
    engine: LayoutEngine,
}

impl DocumentComposer {
    pub fn new(settings: ComposerSettings, company: Arc<CompanyProfile>) -> Self {
        DocumentComposer {
            resolver: TemplateResolver::standard(settings.missing_sentinel.clone()),
            engine: LayoutEngine::new(settings.page),
            settings,
            company,
        }
    }

    /// Replaces the layout engine, e.g. with one sized for a specific renderer.
    pub fn with_engine(mut self, engine: LayoutEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Builds one document. `today` is the issue date used when the request
    /// carries none.
    ///
    /// Pricing errors abort before layout. Missing optional data never fails
    /// the build; it is printed as the configured sentinel.
    pub fn compose(
        &self,
        request: &DocumentRequest,
        today: NaiveDate,
    ) -> Result<ComposedDocument, DocumentError> {
        let kind = request.kind;
        let date = request.date.unwrap_or(today);

        let items = request
            .items
            .iter()
            .map(LineItem::from_input)
            .collect::<Result<Vec<_>, _>>()?;
        let require_items = match kind {
            DocumentKind::Quote => self.settings.quote_requires_items,
            DocumentKind::Agreement => self.settings.agreement_requires_items,
        };
        let priced =
            price(&items, self.settings.tax_rate, require_items).map_err(|err| match err {
                DocumentError::EmptyItemSet => DocumentError::NoItems { kind },
                other => other,
            })?;

        let ctx = BuildContext {
            request,
            priced: &priced,
            date,
            settings: &self.settings,
            company: &self.company,
            resolver: &self.resolver,
        };
        let blocks: Vec<ContentBlock> = match kind {
            DocumentKind::Quote => quote::blocks(&ctx),
            DocumentKind::Agreement => agreement::blocks(&ctx),
        };
        let plan = self.engine.paginate(&blocks)?;

        info!(
            kind = %kind,
            items = priced.rows.len(),
            blocks = blocks.len(),
            pages = plan.page_count(),
            "Document composed"
        );

        Ok(ComposedDocument {
            kind,
            plan,
            totals: priced.totals,
            file_stem: format!("tretec_{}_{}", kind, date.format("%Y%m%d")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::blocks::{KeyValueEntry, TextStyle};
    use crate::layout::plan::PlacedBlock;
    use crate::layout::{render, TextRenderer};
    use crate::models::document::{LineItemInput, Party};
    use crate::pricing::Money;
    use rust_decimal::Decimal;

    fn composer() -> DocumentComposer {
        DocumentComposer::new(
            ComposerSettings::default(),
            Arc::new(CompanyProfile::default()),
        )
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn item(name: &str, quantity: i64, price: i64, discount: i64) -> LineItemInput {
        LineItemInput {
            name: name.to_string(),
            quantity: Decimal::new(quantity, 0),
            unit_price: Decimal::new(price, 0),
            discount_percent: Decimal::new(discount, 0),
        }
    }

    fn full_customer() -> Party {
        Party {
            name: Some("Bo Bygg AB".to_string()),
            organization_id: Some("556000-0000".to_string()),
            address: Some("Storgatan 1, 123 45 Stockholm".to_string()),
            email: Some("bo@example.se".to_string()),
            phone: Some("070-000 00 00".to_string()),
        }
    }

    fn request(kind: DocumentKind) -> DocumentRequest {
        DocumentRequest {
            kind,
            customer: full_customer(),
            items: vec![
                item("Larmsystem Basic", 2, 1000, 0),
                item("Kamera", 1, 1200, 10),
                item("Kabel", 5, 100, 0),
            ],
            installation_date: Some("2026-11-15".to_string()),
            agreement_number: Some("AV-2026-001".to_string()),
            ..DocumentRequest::default()
        }
    }

    fn placed(doc: &ComposedDocument) -> impl Iterator<Item = &PlacedBlock> {
        doc.plan.pages.iter().flat_map(|p| p.blocks.iter())
    }

    /// Every visible string of the plan, one per line, paragraph or cell.
    fn texts(doc: &ComposedDocument) -> Vec<String> {
        let mut out = Vec::new();
        for placed in placed(doc) {
            match &placed.block {
                ContentBlock::TextLine(l) => out.push(l.text.clone()),
                ContentBlock::Paragraph(p) => out.push(p.text.clone()),
                ContentBlock::KeyValue(kv) => {
                    out.extend(kv.entries.iter().map(|e| e.value.clone()))
                }
                ContentBlock::Table(t) => out.extend(t.rows.iter().flatten().cloned()),
                ContentBlock::Signature(s) => {
                    for party in &s.parties {
                        out.push(party.heading.clone());
                        out.extend(party.lines.iter().filter_map(|l| l.printed.clone()));
                    }
                }
                ContentBlock::Spacer { .. } | ContentBlock::PageBreak => {}
            }
        }
        out
    }

    fn entries(doc: &ComposedDocument) -> Vec<KeyValueEntry> {
        placed(doc)
            .filter_map(|p| match &p.block {
                ContentBlock::KeyValue(kv) => Some(kv.entries.clone()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    // ── pricing ──

    #[test]
    fn test_quote_totals() {
        let doc = composer()
            .compose(&request(DocumentKind::Quote), today())
            .unwrap();
        assert_eq!(doc.totals.subtotal, Money::from_minor_units(358_000));
        assert_eq!(doc.totals.tax, Money::from_minor_units(89_500));
        assert_eq!(doc.totals.grand_total, Money::from_minor_units(447_500));

        let all = texts(&doc);
        assert!(all.iter().any(|t| t == "3 580,00 kr"));
        assert!(all.iter().any(|t| t == "4 475,00 kr"));
    }

    /// `"1 234,50 kr"` → 1234.50
    fn printed_amount(text: &str) -> Decimal {
        text.trim_end_matches(" kr")
            .replace(' ', "")
            .replace(',', ".")
            .parse()
            .unwrap()
    }

    #[test]
    fn test_printed_rows_add_up_to_printed_subtotal() {
        let mut req = request(DocumentKind::Quote);
        req.items = (0..3)
            .map(|i| LineItemInput {
                name: format!("Skruv {i}"),
                quantity: Decimal::ONE,
                unit_price: Decimal::new(50, 2),
                discount_percent: Decimal::ZERO,
            })
            .chain([LineItemInput {
                name: "Kabel".to_string(),
                quantity: Decimal::new(3, 0),
                unit_price: Decimal::new(333, 2),
                discount_percent: Decimal::new(15, 0),
            }])
            .collect();
        let doc = composer().compose(&req, today()).unwrap();

        let row_sum: Decimal = placed(&doc)
            .filter_map(|p| match &p.block {
                ContentBlock::Table(t) => Some(t.rows.clone()),
                _ => None,
            })
            .flatten()
            .map(|row| printed_amount(row.last().unwrap()))
            .sum();
        let subtotal = entries(&doc)
            .into_iter()
            .find(|e| e.label == "Summa exkl. moms")
            .unwrap();
        assert_eq!(row_sum, printed_amount(&subtotal.value));
        assert_eq!(subtotal.value, "9,99 kr");
    }

    #[test]
    fn test_numbered_notes_line_wraps_as_body_text() {
        let mut req = request(DocumentKind::Quote);
        let note = "1.5 timmar installation ingår. Ytterligare arbete debiteras enligt \
                    gällande timpris och resekostnader tillkommer för adresser utanför \
                    Stockholms län samt för arbete som utförs på kvällar och helger.";
        req.notes = Some(note.to_string());
        let doc = composer().compose(&req, today()).unwrap();

        let placed_note = placed(&doc)
            .find(|p| match &p.block {
                ContentBlock::Paragraph(para) => para.text == note,
                _ => false,
            })
            .expect("note should be a paragraph");
        let ContentBlock::Paragraph(para) = &placed_note.block else {
            unreachable!();
        };
        assert_eq!(para.style, TextStyle::BODY);
        let width = doc.plan.geometry.content_width();
        assert!(para.lines(width).len() > 1);
        assert_eq!(placed_note.height, placed_note.block.measure(width));
        assert!(placed_note.height > TextStyle::BODY.leading_pt);
    }

    #[test]
    fn test_invalid_amount_aborts_build() {
        let mut req = request(DocumentKind::Quote);
        req.items[0].discount_percent = Decimal::new(101, 0);
        let err = composer().compose(&req, today()).unwrap_err();
        assert!(matches!(err, DocumentError::InvalidAmount { .. }));
    }

    // ── item policy ──

    #[test]
    fn test_agreement_without_items_fails() {
        let mut req = request(DocumentKind::Agreement);
        req.items.clear();
        let err = composer().compose(&req, today()).unwrap_err();
        assert_eq!(
            err,
            DocumentError::NoItems {
                kind: DocumentKind::Agreement
            }
        );
    }

    #[test]
    fn test_quote_without_items_builds_by_default() {
        let mut req = request(DocumentKind::Quote);
        req.items.clear();
        let doc = composer().compose(&req, today()).unwrap();
        assert_eq!(doc.totals.grand_total, Money::ZERO);
        assert!(placed(&doc).all(|p| !matches!(p.block, ContentBlock::Table(_))));
    }

    #[test]
    fn test_quote_without_items_fails_when_required() {
        let settings = ComposerSettings {
            quote_requires_items: true,
            ..ComposerSettings::default()
        };
        let composer = DocumentComposer::new(settings, Arc::new(CompanyProfile::default()));
        let mut req = request(DocumentKind::Quote);
        req.items.clear();
        assert_eq!(
            composer.compose(&req, today()).unwrap_err(),
            DocumentError::NoItems {
                kind: DocumentKind::Quote
            }
        );
    }

    // ── missing data ──

    #[test]
    fn test_missing_phone_and_email_show_sentinel_only_there() {
        let mut req = request(DocumentKind::Quote);
        req.customer.phone = None;
        req.customer.email = None;
        let doc = composer().compose(&req, today()).unwrap();

        let flagged: Vec<String> = entries(&doc)
            .into_iter()
            .filter(|e| e.missing)
            .map(|e| e.label)
            .collect();
        assert_eq!(flagged, vec!["E-post", "Telefon"]);

        let sentinels = texts(&doc).iter().filter(|t| t.contains("SAKNAS")).count();
        assert_eq!(sentinels, 2);

        let all = texts(&doc);
        assert!(all.contains(&"Bo Bygg AB".to_string()));
        assert!(all.contains(&"556000-0000".to_string()));
        assert!(all.contains(&"OBS! Följande uppgifter saknas: E-post, Telefon".to_string()));
    }

    #[test]
    fn test_fully_bound_quote_has_no_sentinel() {
        let mut req = request(DocumentKind::Quote);
        req.quote_number = Some("OF-1001".to_string());
        let doc = composer().compose(&req, today()).unwrap();
        assert!(texts(&doc).iter().all(|t| !t.contains("SAKNAS")));
    }

    #[test]
    fn test_quote_defaults_number_and_validity() {
        let doc = composer()
            .compose(&request(DocumentKind::Quote), today())
            .unwrap();
        let all = entries(&doc);
        let value = |label: &str| {
            all.iter()
                .find(|e| e.label == label)
                .map(|e| e.value.clone())
                .unwrap()
        };
        assert_eq!(value("Offertnummer"), "UTKAST");
        assert_eq!(value("Datum"), "2026-10-19");
        assert_eq!(value("Giltig till"), "2026-11-18");
    }

    // ── agreement sections ──

    fn section_headings(doc: &ComposedDocument) -> Vec<String> {
        texts(doc)
            .into_iter()
            .filter(|t| t.starts_with('§'))
            .collect()
    }

    #[test]
    fn test_agreement_without_special_terms_has_ten_sections() {
        let doc = composer()
            .compose(&request(DocumentKind::Agreement), today())
            .unwrap();
        let headings = section_headings(&doc);
        assert_eq!(headings.len(), 10);
        assert_eq!(headings[0], "§1 AVTALETS OMFATTNING");
        assert_eq!(headings[9], "§10 TVISTER");
        assert!(texts(&doc).iter().all(|t| !t.contains("§11")));
    }

    #[test]
    fn test_special_terms_none_value_is_excluded() {
        let mut req = request(DocumentKind::Agreement);
        req.special_terms = Some(" inga ".to_string());
        let doc = composer().compose(&req, today()).unwrap();
        assert_eq!(section_headings(&doc).len(), 10);
    }

    #[test]
    fn test_special_terms_add_section_eleven() {
        let mut req = request(DocumentKind::Agreement);
        req.special_terms = Some("Nyckelhantering sköts av Kunden.".to_string());
        let doc = composer().compose(&req, today()).unwrap();
        let headings = section_headings(&doc);
        assert_eq!(headings.len(), 11);
        assert_eq!(headings[10], "§11 SÄRSKILDA VILLKOR");
        assert!(texts(&doc).contains(&"Nyckelhantering sköts av Kunden.".to_string()));
    }

    #[test]
    fn test_agreement_binds_variants_and_dates() {
        let mut req = request(DocumentKind::Agreement);
        req.payment_plan_key = Some("monthly".to_string());
        req.first_payment_date = Some("2026-12-01".to_string());
        req.warranty_key = Some("premium".to_string());
        req.contract_period = Some("24 månader".to_string());
        let doc = composer().compose(&req, today()).unwrap();
        let all = texts(&doc);

        assert!(all.contains(&"Första betalning förfaller 2026-12-01".to_string()));
        assert!(all.contains(&"Därefter månatligen under 24 månader".to_string()));
        assert!(all
            .iter()
            .any(|t| t.contains("från 2026-10-19 till 2028-10-19 (24 månader)")));
        assert!(all.iter().any(|t| t.contains("under en period av 60 månader")));
        assert!(all.iter().any(|t| t.contains("3 580,00 kr exkl. moms")));
        assert!(all.iter().any(|t| t.contains("(f.n. 25%)")));
        assert!(all.iter().all(|t| !t.contains("SAKNAS")));
    }

    #[test]
    fn test_unknown_variant_key_uses_default() {
        let mut req = request(DocumentKind::Agreement);
        req.payment_plan_key = Some("weekly".to_string());
        let doc = composer().compose(&req, today()).unwrap();
        assert!(texts(&doc)
            .contains(&"50% förskottsbetalning vid avtalsundertecknande".to_string()));
    }

    #[test]
    fn test_agreement_has_two_signature_columns() {
        let doc = composer()
            .compose(&request(DocumentKind::Agreement), today())
            .unwrap();
        let last = doc.plan.pages.last().unwrap().blocks.last().unwrap();
        let ContentBlock::Signature(sig) = &last.block else {
            panic!("agreement should end with signatures");
        };
        assert_eq!(sig.parties.len(), 2);
        assert_eq!(sig.parties[0].heading, "För Tretec Larm AB");
        assert_eq!(sig.parties[1].heading, "För Bo Bygg AB");
    }

    #[test]
    fn test_missing_installation_date_is_visible() {
        let mut req = request(DocumentKind::Agreement);
        req.installation_date = None;
        let doc = composer().compose(&req, today()).unwrap();
        assert!(texts(&doc)
            .iter()
            .any(|t| t.contains("senast [SAKNAS: installation_date]")));
    }

    // ── output ──

    #[test]
    fn test_identical_requests_yield_identical_plans() {
        let req = request(DocumentKind::Agreement);
        let a = serde_json::to_vec(&composer().compose(&req, today()).unwrap()).unwrap();
        let b = serde_json::to_vec(&composer().compose(&req, today()).unwrap()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_file_stem_uses_request_date() {
        let mut req = request(DocumentKind::Agreement);
        req.date = NaiveDate::from_ymd_opt(2026, 1, 5);
        let doc = composer().compose(&req, today()).unwrap();
        assert_eq!(doc.file_stem, "tretec_agreement_20260105");
    }

    #[test]
    fn test_long_item_list_paginates_with_continued_table() {
        let mut req = request(DocumentKind::Quote);
        req.items = (0..80).map(|i| item(&format!("Detektor {i}"), 1, 450, 0)).collect();
        let doc = composer().compose(&req, today()).unwrap();
        assert!(doc.plan.page_count() >= 2);

        let usable = doc.plan.geometry.usable_height();
        assert!(doc.plan.pages.iter().all(|p| p.used_height() <= usable + 1e-3));

        let continued = placed(&doc)
            .filter(|p| matches!(&p.block, ContentBlock::Table(t) if t.continued))
            .count();
        assert!(continued >= 1);

        let preview = render(&doc.plan, TextRenderer::new(doc.plan.geometry));
        assert!(preview.contains(&format!("Sida 1 av {}", doc.plan.page_count())));
    }
}
