use std::path::Path;

use tracing::{debug, info};

use crate::domain::document::join_pages;
use crate::error::{AppError, AppResult};
use crate::services::PdfLoader;

/// Extracts the full text of the PDF at `path`, pages joined by `\n`.
pub fn extract_text_from_pdf(loader: &dyn PdfLoader, path: &Path) -> AppResult<String> {
    if !path.is_file() {
        return Err(AppError::DocumentNotFound(path.to_path_buf()));
    }

    let pages = loader.load_pages(path).map_err(|err| {
        AppError::DocumentProcessing(format!(
            "an error occurred while loading or processing the PDF: {err}"
        ))
    })?;

    for page in &pages {
        debug!(page = page.number, chars = page.text.chars().count(), "page text");
    }

    let text = join_pages(&pages);
    info!(
        path = %path.display(),
        pages = pages.len(),
        chars = text.chars().count(),
        "extracted document text"
    );
    Ok(text)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::domain::document::PageText;
    use crate::infra::pdf::LopdfLoader;
    use crate::infra::pdf::fixtures::write_pdf;
    use crate::services::ServiceError;

    enum Behaviour {
        Pages(Vec<PageText>),
        Fail(&'static str),
    }

    struct StubLoader {
        behaviour: Behaviour,
        calls: AtomicUsize,
    }

    impl StubLoader {
        fn new(behaviour: Behaviour) -> Self {
            Self {
                behaviour,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl PdfLoader for StubLoader {
        fn load_pages(&self, _path: &Path) -> Result<Vec<PageText>, ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.behaviour {
                Behaviour::Pages(pages) => Ok(pages.clone()),
                Behaviour::Fail(message) => Err((*message).into()),
            }
        }
    }

    fn existing_file() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.pdf");
        fs::write(&path, b"%PDF-1.5").unwrap();
        (dir, path)
    }

    #[test]
    fn missing_file_fails_before_loading() {
        let loader = StubLoader::new(Behaviour::Pages(vec![]));
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.pdf");

        let err = extract_text_from_pdf(&loader, &path).unwrap_err();

        assert!(matches!(err, AppError::DocumentNotFound(ref p) if *p == path));
        assert!(err.to_string().contains("missing.pdf"));
        assert_eq!(loader.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn directory_counts_as_missing() {
        let loader = StubLoader::new(Behaviour::Pages(vec![]));
        let dir = tempfile::tempdir().unwrap();

        let err = extract_text_from_pdf(&loader, dir.path()).unwrap_err();

        assert!(matches!(err, AppError::DocumentNotFound(_)));
        assert_eq!(loader.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn joins_loaded_pages_with_newlines() {
        let loader = StubLoader::new(Behaviour::Pages(vec![
            PageText::new(1, "Overview"),
            PageText::new(2, "Users must be able to log in using email and password."),
        ]));
        let (_dir, path) = existing_file();

        let text = extract_text_from_pdf(&loader, &path).unwrap();

        assert_eq!(
            text,
            "Overview\nUsers must be able to log in using email and password."
        );
        assert_eq!(loader.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn wraps_loader_failures_with_original_message() {
        let loader = StubLoader::new(Behaviour::Fail("xref table is corrupt"));
        let (_dir, path) = existing_file();

        let err = extract_text_from_pdf(&loader, &path).unwrap_err();

        assert!(matches!(err, AppError::DocumentProcessing(_)));
        assert!(err.to_string().contains("xref table is corrupt"));
    }

    #[test]
    fn extracts_real_multi_page_document_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("TodoList Application.pdf");
        write_pdf(&path, &["First page", "Second page", "Third page"]);
        let loader = LopdfLoader::new();

        let text = extract_text_from_pdf(&loader, &path).unwrap();
        let pages = loader.load_pages(&path).unwrap();

        let first = text.find("First page").unwrap();
        let second = text.find("Second page").unwrap();
        let third = text.find("Third page").unwrap();
        assert!(first < second && second < third);
        assert_eq!(text, join_pages(&pages));
    }

    #[test]
    fn extraction_is_repeatable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("requirements.pdf");
        write_pdf(&path, &["Users must be able to log in using email and password."]);
        let loader = LopdfLoader::new();

        let first = extract_text_from_pdf(&loader, &path).unwrap();
        let second = extract_text_from_pdf(&loader, &path).unwrap();

        assert_eq!(first, second);
        assert!(first.contains("log in using email and password"));
    }

    #[test]
    fn malformed_pdf_is_a_processing_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        fs::write(&path, "definitely not a pdf").unwrap();

        let err = extract_text_from_pdf(&LopdfLoader::new(), &path).unwrap_err();

        assert!(matches!(err, AppError::DocumentProcessing(_)));
        assert!(err.to_string().contains("failed to load PDF"));
    }
}
