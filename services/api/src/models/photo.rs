//! Order photo/video model and upload payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

use crate::validation::{require, validate_video_duration};

/// What the shot documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "photo_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PhotoType {
    Problem,
    Solution,
}

impl FromStr for PhotoType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "problem" => Ok(PhotoType::Problem),
            "solution" => Ok(PhotoType::Solution),
            other => Err(format!("unknown photo_type: {other}")),
        }
    }
}

/// Still image or a short video clip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "media_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
}

impl FromStr for MediaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(MediaType::Image),
            "video" => Ok(MediaType::Video),
            other => Err(format!("unknown media_type: {other}")),
        }
    }
}

/// Photo entity, reachable only through its owning order
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderPhoto {
    pub id: Uuid,
    pub order_id: Uuid,
    pub media_url: String,
    pub photo_type: PhotoType,
    pub media_type: MediaType,
    pub duration_seconds: Option<i32>,
    pub uploaded_at: DateTime<Utc>,
}

/// Validated upload payload
#[derive(Debug, Clone)]
pub struct NewPhoto {
    pub media_url: String,
    pub photo_type: PhotoType,
    pub media_type: MediaType,
    pub duration_seconds: Option<i32>,
}

/// Upload request body
#[derive(Debug, Deserialize)]
pub struct CreatePhotoRequest {
    pub media_url: Option<String>,
    pub photo_type: Option<String>,
    pub media_type: Option<String>,
    pub duration_seconds: Option<i32>,
}

impl CreatePhotoRequest {
    /// Validate the upload at the boundary: url and photo type are
    /// mandatory, videos are capped at one minute, images carry no
    /// duration.
    pub fn validate(self) -> Result<NewPhoto, String> {
        let media_url = require("media_url", self.media_url)?;
        let photo_type = require("photo_type", self.photo_type)?.parse::<PhotoType>()?;
        let media_type = match self.media_type {
            Some(raw) => raw.parse::<MediaType>()?,
            None => MediaType::Image,
        };

        let duration_seconds = match media_type {
            MediaType::Video => {
                validate_video_duration(self.duration_seconds)?;
                self.duration_seconds
            }
            MediaType::Image => None,
        };

        Ok(NewPhoto {
            media_url,
            photo_type,
            media_type,
            duration_seconds,
        })
    }
}
