pub mod donor_schema;

pub use donor_schema::DonorStoreRequestSchema;
