//! Placeholder substitution and clause-variant selection.
//!
//! Substitution is a single left-to-right pass: text that comes out of a
//! binding is never scanned again, so a value containing `{...}` is printed
//! as-is. A placeholder without a usable binding is replaced by a visible
//! `[<sentinel>: <key>]` marker and reported in `ResolvedText::missing`.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::layout::blocks::{ContentBlock, Paragraph, TextStyle};
use crate::templates::variants::VariantSet;

/// Height of the spacer a blank template line turns into.
pub const BLANK_LINE_SPACER_PT: f32 = 6.0;
/// Indent of bullet lines.
pub const BULLET_INDENT_PT: f32 = 12.0;

// ────────────────────────────────────────────────────────────────────────────
// Bindings
// ────────────────────────────────────────────────────────────────────────────

/// Placeholder values for one build. Blank values count as unbound.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings(BTreeMap<String, String>);

impl Bindings {
    pub fn new() -> Self {
        Bindings::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Binds `key` only when `value` is present.
    pub fn insert_opt(&mut self, key: impl Into<String>, value: Option<&str>) -> &mut Self {
        if let Some(value) = value {
            self.insert(key, value);
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Bindings(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedText {
    pub text: String,
    /// Placeholder keys that had no binding, in first-seen order.
    pub missing: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Resolver
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct VariantTable {
    default_key: &'static str,
    templates: BTreeMap<&'static str, &'static str>,
}

impl VariantTable {
    fn for_set(set: VariantSet) -> Self {
        VariantTable {
            default_key: set.default_key(),
            templates: set.entries().into_iter().collect(),
        }
    }
}

/// Immutable after construction; shared across builds.
#[derive(Debug, Clone)]
pub struct TemplateResolver {
    sentinel: String,
    payment_plans: VariantTable,
    warranties: VariantTable,
    service_levels: VariantTable,
}

impl TemplateResolver {
    /// The built-in variant families, marking unbound placeholders with `sentinel`.
    pub fn standard(sentinel: impl Into<String>) -> Self {
        TemplateResolver {
            sentinel: sentinel.into(),
            payment_plans: VariantTable::for_set(VariantSet::PaymentPlan),
            warranties: VariantTable::for_set(VariantSet::Warranty),
            service_levels: VariantTable::for_set(VariantSet::ServiceLevel),
        }
    }

    fn table(&self, set: VariantSet) -> &VariantTable {
        match set {
            VariantSet::PaymentPlan => &self.payment_plans,
            VariantSet::Warranty => &self.warranties,
            VariantSet::ServiceLevel => &self.service_levels,
        }
    }

    /// Returns the raw template for `key`, falling back to the set's default
    /// when the key is absent or unknown.
    pub fn select(&self, set: VariantSet, key: Option<&str>) -> &'static str {
        let table = self.table(set);
        let requested = key.map(|k| k.trim().to_ascii_lowercase());

        match requested.as_deref() {
            Some(k) if !k.is_empty() => {
                if let Some(template) = table.templates.get(k).copied() {
                    return template;
                }
                warn!(
                    variant_set = %set,
                    requested = k,
                    fallback = table.default_key,
                    "Unknown variant key, using default"
                );
            }
            _ => debug!(
                variant_set = %set,
                fallback = table.default_key,
                "No variant key given, using default"
            ),
        }

        table
            .templates
            .get(table.default_key)
            .copied()
            .unwrap_or_default()
    }

    /// Selects a variant and substitutes its placeholders.
    pub fn resolve(&self, set: VariantSet, key: Option<&str>, bindings: &Bindings) -> ResolvedText {
        self.resolve_text(self.select(set, key), bindings)
    }

    /// Replaces every `{key}` in `template` in one pass.
    pub fn resolve_text(&self, template: &str, bindings: &Bindings) -> ResolvedText {
        let mut text = String::with_capacity(template.len());
        let mut missing: Vec<String> = Vec::new();
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            text.push_str(&rest[..open]);
            let after = &rest[open + 1..];

            match after.find('}') {
                Some(close) if is_placeholder_key(&after[..close]) => {
                    let key = &after[..close];
                    match bindings.get(key) {
                        Some(value) => text.push_str(value),
                        None => {
                            text.push_str(&format!("[{}: {key}]", self.sentinel));
                            if !missing.iter().any(|m| m == key) {
                                missing.push(key.to_string());
                            }
                        }
                    }
                    rest = &after[close + 1..];
                }
                _ => {
                    text.push('{');
                    rest = after;
                }
            }
        }
        text.push_str(rest);

        ResolvedText { text, missing }
    }
}

fn is_placeholder_key(candidate: &str) -> bool {
    !candidate.is_empty()
        && candidate
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

// ────────────────────────────────────────────────────────────────────────────
// Sections and body text
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Header without its `§<n>` marker.
    pub title: String,
    pub body: String,
}

/// Splits a section template into its header line and body.
pub fn parse_section(raw: &str) -> Section {
    let mut lines = raw.trim().lines();
    let header = lines.next().unwrap_or_default().trim();
    let body = lines.collect::<Vec<_>>().join("\n");

    Section {
        title: strip_section_marker(header).to_string(),
        body: body.trim().to_string(),
    }
}

fn strip_section_marker(header: &str) -> &str {
    match header.strip_prefix('§') {
        Some(rest) => rest
            .trim_start()
            .trim_start_matches(|c: char| c.is_ascii_digit())
            .trim_start(),
        None => header,
    }
}

/// Turns resolved body text into layout blocks, one block per source line.
///
/// Sub-clause headings are bold paragraphs so that a long line still wraps.
pub fn body_to_blocks(body: &str) -> Vec<ContentBlock> {
    body.lines()
        .map(str::trim)
        .map(|line| {
            if line.is_empty() {
                ContentBlock::spacer(BLANK_LINE_SPACER_PT)
            } else if is_subclause_heading(line) {
                ContentBlock::paragraph(line, TextStyle::SUBHEADING)
            } else if line.starts_with('•') {
                ContentBlock::Paragraph(Paragraph {
                    text: line.to_string(),
                    style: TextStyle::BODY,
                    indent_pt: BULLET_INDENT_PT,
                    alert: false,
                })
            } else {
                ContentBlock::paragraph(line, TextStyle::BODY)
            }
        })
        .collect()
}

/// Turns user-written text into plain paragraphs, one per source line.
/// No heading or bullet rules apply.
pub fn free_text_to_blocks(text: &str) -> Vec<ContentBlock> {
    text.lines()
        .map(str::trim)
        .map(|line| {
            if line.is_empty() {
                ContentBlock::spacer(BLANK_LINE_SPACER_PT)
            } else {
                ContentBlock::paragraph(line, TextStyle::BODY)
            }
        })
        .collect()
}

/// `3.2 Betalningsplan`
fn is_subclause_heading(line: &str) -> bool {
    let Some((number, title)) = line.split_once(char::is_whitespace) else {
        return false;
    };
    let Some((major, minor)) = number.split_once('.') else {
        return false;
    };
    let digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    digits(major) && digits(minor) && !title.trim().is_empty()
}
