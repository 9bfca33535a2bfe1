pub mod extract_handlers;
pub mod system_handlers;

pub use extract_handlers::*;
pub use system_handlers::*;
