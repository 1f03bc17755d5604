pub mod language_model;
pub mod pdf_loader;

pub use language_model::LanguageModelService;
pub use pdf_loader::PdfLoader;

/// Failure raised by an external collaborator, before the calling stage
/// wraps it into an [`AppError`](crate::error::AppError).
pub type ServiceError = Box<dyn std::error::Error + Send + Sync>;
