pub mod chart;
pub mod record;
pub mod request;
