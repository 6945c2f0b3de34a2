pub mod catch_panic;
pub mod logging;
pub mod request_id;

pub use catch_panic::*;
pub use logging::*;
pub use request_id::*;
