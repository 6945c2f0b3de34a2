pub mod business_time;
pub mod holiday;
