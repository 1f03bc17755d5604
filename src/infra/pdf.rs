use std::path::Path;

use lopdf::Document;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::document::PageText;
use crate::services::{PdfLoader, ServiceError};

#[derive(Debug, Error)]
enum LopdfError {
    #[error("failed to load PDF: {0}")]
    Load(String),
    #[error("failed to extract text from page {page}: {message}")]
    Page { page: u32, message: String },
}

/// Page-by-page text extraction backed by `lopdf`.
#[derive(Default)]
pub struct LopdfLoader;

impl LopdfLoader {
    pub fn new() -> Self {
        Self
    }
}

impl PdfLoader for LopdfLoader {
    fn load_pages(&self, path: &Path) -> Result<Vec<PageText>, ServiceError> {
        let document = Document::load(path).map_err(|err| LopdfError::Load(err.to_string()))?;

        let page_numbers: Vec<u32> = document.get_pages().into_keys().collect();
        debug!(path = %path.display(), pages = page_numbers.len(), "loaded PDF");

        let mut pages = Vec::with_capacity(page_numbers.len());
        for page in page_numbers {
            let text = document
                .extract_text(&[page])
                .map_err(|err| LopdfError::Page {
                    page,
                    message: err.to_string(),
                })?;
            pages.push(PageText::new(page, text));
        }

        if pages.iter().all(|page| page.text.trim().is_empty()) {
            warn!(
                path = %path.display(),
                "PDF contains no extractable text; it may be scanned or image-only"
            );
        }

        Ok(pages)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::path::Path;

    use lopdf::content::{Content, Operation};
    use lopdf::{Document, Object, Stream, dictionary};

    /// Writes a PDF with one page per entry of `page_texts`.
    pub fn write_pdf(path: &Path, page_texts: &[&str]) {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in page_texts {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 24.into()]),
                    Operation::new("Td", vec![72.into(), 700.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.save(path).unwrap();
    }
}
