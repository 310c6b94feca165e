//! Entities and request/response payloads

pub mod client;
pub mod order;
pub mod part;
pub mod patch;
pub mod photo;
pub mod signature;
pub mod technician;

pub use client::{Client, ClientPatch, ClientQuery, CreateClientRequest, NewClient};
pub use order::{CreateOrderRequest, NewOrder, OrderPatch, OrderStatus, ServiceOrder};
pub use part::{CreatePartRequest, NewPart, ReplacedPart, parts_total};
pub use photo::{CreatePhotoRequest, MediaType, NewPhoto, OrderPhoto, PhotoType};
pub use signature::{OrderSignature, UpsertSignatureRequest};
pub use technician::{
    LoginRequest, NewTechnician, ProfilePatch, SignupRequest, Technician, TechnicianResponse,
};
