pub mod availability;
pub mod outcome;

pub use availability::AvailabilityState;
pub use outcome::{LoadOutcome, PingOutcome, WriteOutcome};
