use tracing::info;

use crate::domain::prompt::Prompt;
use crate::error::{AppError, AppResult};
use crate::services::LanguageModelService;

/// Asks the model for project tickets describing `extracted_text` and returns
/// its reply with surrounding whitespace trimmed. The reply is expected to be
/// a JSON array but is returned as-is.
pub async fn generate_project_tickets(
    model: &dyn LanguageModelService,
    extracted_text: &str,
) -> AppResult<String> {
    if extracted_text.is_empty() {
        return Err(AppError::InvalidInput(
            "extracted text must be a non-empty string".to_string(),
        ));
    }

    let prompt = Prompt::for_tickets(extracted_text);
    let response = model.complete(&prompt).await.map_err(|err| {
        AppError::LanguageModel(format!(
            "failed to generate tickets with {}: {err}",
            model.model()
        ))
    })?;

    let tickets = response.trim().to_string();
    info!(
        model = model.model(),
        chars = tickets.chars().count(),
        "generated tickets"
    );
    Ok(tickets)
}
