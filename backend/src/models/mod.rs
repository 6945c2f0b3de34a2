pub mod business_date;
pub mod calendar;
pub mod holiday;
