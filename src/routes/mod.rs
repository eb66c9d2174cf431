pub mod donor_routes;
