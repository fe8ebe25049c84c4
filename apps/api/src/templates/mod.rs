// Templates: clause texts, variant families and placeholder resolution.

pub mod agreement_terms;
pub mod resolver;
pub mod variants;

pub use resolver::{body_to_blocks, free_text_to_blocks, parse_section, Bindings, TemplateResolver};
pub use variants::VariantSet;
