pub mod business_date;
pub mod config;
pub mod health;
pub mod holidays;

pub use business_date::*;
pub use config::*;
pub use health::*;
pub use holidays::*;
