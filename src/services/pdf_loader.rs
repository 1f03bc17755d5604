use std::path::Path;

use crate::domain::document::PageText;
use crate::services::ServiceError;

pub trait PdfLoader: Send + Sync {
    /// Loads every page of the document at `path`, in page order.
    fn load_pages(&self, path: &Path) -> Result<Vec<PageText>, ServiceError>;
}
