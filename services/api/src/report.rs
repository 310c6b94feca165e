//! Service report assembly
//!
//! Read-side only: an order and its dependent records are fetched and
//! folded into one printable document structure. The fold is a pure
//! function, so assembling the same unchanged order twice yields identical
//! documents apart from the generation timestamp.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{
    MediaType, OrderPhoto, OrderSignature, OrderStatus, PhotoType, ReplacedPart, ServiceOrder,
    Technician, parts_total,
};

/// Printable service report
#[derive(Debug, Clone, Serialize)]
pub struct ReportDocument {
    pub header: ReportHeader,
    pub client: ClientBlock,
    pub technician: TechnicianBlock,
    pub problem_description: String,
    pub service_description: Option<String>,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub parts: Vec<ReportPart>,
    pub parts_total: Decimal,
    pub photos: Vec<ReportPhoto>,
    pub signature: Option<ReportSignature>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportHeader {
    pub os_number: i64,
    pub status: OrderStatus,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClientBlock {
    pub client_name: String,
    pub location: String,
    pub contact_name: String,
    pub contact_phone: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TechnicianBlock {
    pub name: Option<String>,
    pub email: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportPart {
    pub old_part: String,
    pub new_part: String,
    pub part_value: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportPhoto {
    pub media_url: String,
    pub photo_type: PhotoType,
    pub media_type: MediaType,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportSignature {
    pub signature_data: String,
    pub signed_at: DateTime<Utc>,
}

/// Fold an order and its dependents into one report document. Any of the
/// dependent collections may be empty. Internal notes stay internal and
/// never reach the document.
pub fn fold(
    order: &ServiceOrder,
    technician: &Technician,
    photos: &[OrderPhoto],
    parts: &[ReplacedPart],
    signature: Option<&OrderSignature>,
    generated_at: DateTime<Utc>,
) -> ReportDocument {
    ReportDocument {
        header: ReportHeader {
            os_number: order.os_number,
            status: order.status,
            generated_at,
        },
        client: ClientBlock {
            client_name: order.client_name.clone(),
            location: order.location.clone(),
            contact_name: order.contact_name.clone(),
            contact_phone: order.contact_phone.clone(),
        },
        technician: TechnicianBlock {
            name: technician.name.clone(),
            email: technician.email.clone(),
            phone: technician.phone.clone(),
        },
        problem_description: order.problem_description.clone(),
        service_description: order.service_description.clone(),
        started_at: order.start_datetime,
        completed_at: order.completion_datetime,
        parts: parts
            .iter()
            .map(|p| ReportPart {
                old_part: p.old_part.clone(),
                new_part: p.new_part.clone(),
                part_value: p.part_value,
            })
            .collect(),
        parts_total: parts_total(parts),
        photos: photos
            .iter()
            .map(|p| ReportPhoto {
                media_url: p.media_url.clone(),
                photo_type: p.photo_type,
                media_type: p.media_type,
            })
            .collect(),
        signature: signature.map(|s| ReportSignature {
            signature_data: s.signature_data.clone(),
            signed_at: s.signed_at,
        }),
    }
}
