use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum TicketType {
    Feature,
    Task,
    Bug,
}

impl TicketType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketType::Feature => "Feature",
            TicketType::Task => "Task",
            TicketType::Bug => "Bug",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

/// Typed view of one generated ticket. Only used to report on the shape of
/// a model response; the response text itself is never rewritten.
#[derive(Debug, Clone, Deserialize)]
pub struct Ticket {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub ticket_type: TicketType,
    pub priority: Priority,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct TicketReport {
    pub total: usize,
    pub features: usize,
    pub tasks: usize,
    pub bugs: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl TicketReport {
    pub fn from_tickets(tickets: &[Ticket]) -> Self {
        let mut report = Self {
            total: tickets.len(),
            ..Self::default()
        };
        for ticket in tickets {
            match ticket.ticket_type {
                TicketType::Feature => report.features += 1,
                TicketType::Task => report.tasks += 1,
                TicketType::Bug => report.bugs += 1,
            }
            match ticket.priority {
                Priority::High => report.high += 1,
                Priority::Medium => report.medium += 1,
                Priority::Low => report.low += 1,
            }
        }
        report
    }
}

/// Reads a model response as a JSON array of tickets. Models often wrap JSON
/// in a Markdown code fence, so one surrounding fence is ignored.
pub fn parse_tickets(response: &str) -> Result<Vec<Ticket>, serde_json::Error> {
    serde_json::from_str(strip_code_fence(response))
}

fn strip_code_fence(response: &str) -> &str {
    let trimmed = response.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. `json`) on the opening fence line.
    match body.split_once('\n') {
        Some((_, content)) => content.trim(),
        None => body.trim(),
    }
}
