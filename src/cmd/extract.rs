use std::path::PathBuf;

use crate::error::AppResult;
use crate::services::PdfLoader;
use crate::workflow::extract::extract_text_from_pdf;

#[derive(Debug, Clone)]
pub struct ExtractCommandArgs {
    pub path: PathBuf,
}

pub fn run(loader: &dyn PdfLoader, args: ExtractCommandArgs) -> AppResult<String> {
    extract_text_from_pdf(loader, &args.path)
}
