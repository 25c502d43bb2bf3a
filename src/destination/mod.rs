//! Destination input: text parsing and the resolver that owns the target

pub mod parser;
pub mod resolver;

pub use parser::{parse_destination, parse_destination_in_range, DestinationError};
pub use resolver::{DestinationResolver, PendingFit};
