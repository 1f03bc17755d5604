use async_trait::async_trait;

use crate::domain::prompt::Prompt;
use crate::services::ServiceError;

#[async_trait]
pub trait LanguageModelService: Send + Sync {
    /// Model identifier, for logging.
    fn model(&self) -> &str;

    /// Sends the prompt and returns the response text as produced by the model.
    async fn complete(&self, prompt: &Prompt) -> Result<String, ServiceError>;
}
