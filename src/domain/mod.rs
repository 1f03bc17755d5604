pub mod document;
pub mod prompt;
pub mod ticket;
