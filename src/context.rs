use std::sync::Arc;

use crate::services::{LanguageModelService, PdfLoader};

#[derive(Clone)]
pub struct AppContext {
    pub pdf_loader: Arc<dyn PdfLoader>,
    pub language_model: Arc<dyn LanguageModelService>,
}

impl AppContext {
    pub fn new(
        pdf_loader: Arc<dyn PdfLoader>,
        language_model: Arc<dyn LanguageModelService>,
    ) -> Self {
        Self {
            pdf_loader,
            language_model,
        }
    }
}
