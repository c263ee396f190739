pub mod debug_handlers;
pub mod storage_handlers;

pub use debug_handlers::*;
pub use storage_handlers::*;
