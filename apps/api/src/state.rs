use std::sync::Arc;

use crate::composer::DocumentComposer;
use crate::config::Config;
use crate::layout::{LayoutEngine, TextRenderer};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Immutable after startup; every request builds through the same composer.
    pub composer: Arc<DocumentComposer>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        // Plans are laid out for the page the preview renderer draws on.
        let renderer = TextRenderer::new(config.composer.page);
        let composer = DocumentComposer::new(
            config.composer.clone(),
            Arc::new(config.company.clone()),
        )
        .with_engine(LayoutEngine::for_renderer(&renderer));
        AppState {
            composer: Arc::new(composer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::layout::plan::PageGeometry;
    use crate::models::document::DocumentRequest;

    #[test]
    fn test_plans_use_the_preview_page_size() {
        let mut config = Config::from_lookup(|_| None).unwrap();
        config.composer.page = PageGeometry {
            width: 420.0,
            ..PageGeometry::a4()
        };
        let state = AppState::new(&config);
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let doc = state
            .composer
            .compose(&DocumentRequest::default(), today)
            .unwrap();
        assert_eq!(doc.plan.geometry, config.composer.page);
    }
}
