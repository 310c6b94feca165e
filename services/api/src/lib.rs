//! Field-service backend: technician authentication, service orders with
//! their dependent records (photos, replaced parts, customer signature),
//! a client directory, and printable service reports.

pub mod error;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod report;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod validation;
