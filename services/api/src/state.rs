//! Application state shared across handlers

use sqlx::PgPool;

use crate::jwt::JwtService;
use crate::repositories::{
    ClientRepository, OrderRepository, PartRepository, PhotoRepository, SignatureRepository,
    TechnicianRepository,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_service: JwtService,
    pub technician_repository: TechnicianRepository,
    pub client_repository: ClientRepository,
    pub order_repository: OrderRepository,
    pub photo_repository: PhotoRepository,
    pub part_repository: PartRepository,
    pub signature_repository: SignatureRepository,
}

impl AppState {
    /// Wire the repositories over one shared pool.
    pub fn new(pool: PgPool, jwt_service: JwtService) -> Self {
        Self {
            jwt_service,
            technician_repository: TechnicianRepository::new(pool.clone()),
            client_repository: ClientRepository::new(pool.clone()),
            order_repository: OrderRepository::new(pool.clone()),
            photo_repository: PhotoRepository::new(pool.clone()),
            part_repository: PartRepository::new(pool.clone()),
            signature_repository: SignatureRepository::new(pool.clone()),
            db_pool: pool,
        }
    }
}
