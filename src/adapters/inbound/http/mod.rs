pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use dto::*;
pub use error::ApiError;
pub use router::*;
