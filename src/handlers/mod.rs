pub mod donor_handler;
pub mod health_handler;
