/// Database configuration helpers.
pub mod database;
