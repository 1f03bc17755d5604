use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::context::AppContext;
use crate::domain::ticket::{TicketReport, parse_tickets};
use crate::error::AppResult;
use crate::infra::llm::{GeminiClient, GeminiSettings};
use crate::infra::pdf::LopdfLoader;
use crate::workflow::extract::extract_text_from_pdf;
use crate::workflow::tickets::generate_project_tickets;

#[derive(Debug, Clone)]
pub struct TicketsCommandArgs {
    pub path: PathBuf,
    pub inspect: bool,
}

/// Checks the API key before touching the document, then wires the lopdf
/// loader and Gemini client and runs the command.
pub async fn run_with_config(config: AppConfig, args: TicketsCommandArgs) -> AppResult<String> {
    let api_key = config.require_api_key()?.to_string();
    let settings = GeminiSettings::new(api_key, config.gemini_model, config.gemini_base_url);
    let context = AppContext::new(
        Arc::new(LopdfLoader::new()),
        Arc::new(GeminiClient::new(settings)),
    );

    run(&context, args).await
}

/// Extracts the document and returns the generated tickets exactly as the
/// generator produced them.
pub async fn run(ctx: &AppContext, args: TicketsCommandArgs) -> AppResult<String> {
    let text = extract_text_from_pdf(ctx.pdf_loader.as_ref(), &args.path)?;
    let tickets = generate_project_tickets(ctx.language_model.as_ref(), &text).await?;

    if args.inspect {
        inspect(&tickets);
    }

    Ok(tickets)
}

fn inspect(response: &str) {
    match parse_tickets(response) {
        Ok(tickets) => {
            let report = TicketReport::from_tickets(&tickets);
            info!(
                total = report.total,
                features = report.features,
                tasks = report.tasks,
                bugs = report.bugs,
                high = report.high,
                medium = report.medium,
                low = report.low,
                "response is a well-formed ticket list"
            );
            for ticket in &tickets {
                debug!(
                    title = %ticket.title,
                    ticket_type = ticket.ticket_type.as_str(),
                    priority = ticket.priority.as_str(),
                    description_chars = ticket.description.chars().count(),
                    "ticket"
                );
            }
        }
        Err(err) => warn!(error = %err, "response is not a well-formed ticket list"),
    }
}
