//! Repositories for database operations
//!
//! Every repository is a thin `Clone`-able wrapper over the shared pool.
//! Ownership scoping lives in the SQL itself: order lookups always filter
//! by the calling technician's id.

pub mod client;
pub mod order;
pub mod part;
pub mod photo;
pub mod signature;
pub mod technician;

pub use client::ClientRepository;
pub use order::OrderRepository;
pub use part::PartRepository;
pub use photo::PhotoRepository;
pub use signature::SignatureRepository;
pub use technician::TechnicianRepository;
