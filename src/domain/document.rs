/// Text of a single loaded page, in the order the loader produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    pub number: u32,
    pub text: String,
}

impl PageText {
    pub fn new(number: u32, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }
}

/// Joins page texts with exactly one newline per page boundary. Page content
/// is left untouched.
pub fn join_pages(pages: &[PageText]) -> String {
    pages
        .iter()
        .map(|page| page.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_pages_in_order_with_single_newline() {
        let pages = vec![
            PageText::new(1, "Introduction"),
            PageText::new(2, "Requirements"),
            PageText::new(3, "Appendix"),
        ];
        assert_eq!(join_pages(&pages), "Introduction\nRequirements\nAppendix");
    }

    #[test]
    fn keeps_page_content_verbatim() {
        let pages = vec![
            PageText::new(1, "  leading\n"),
            PageText::new(2, ""),
            PageText::new(3, "trailing  "),
        ];
        assert_eq!(join_pages(&pages), "  leading\n\n\ntrailing  ");
    }

    #[test]
    fn empty_document_yields_empty_text() {
        assert_eq!(join_pages(&[]), "");
    }
}
