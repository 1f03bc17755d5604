pub mod extract;
pub mod tickets;
