//! Replaced-part model and the derived order total

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::validation::require;

/// Part swapped during a repair, reachable only through its owning order
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReplacedPart {
    pub id: Uuid,
    pub order_id: Uuid,
    pub old_part: String,
    pub new_part: String,
    pub part_value: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

/// Validated part payload
#[derive(Debug, Clone)]
pub struct NewPart {
    pub old_part: String,
    pub new_part: String,
    pub part_value: Option<Decimal>,
}

/// Part creation request body
#[derive(Debug, Deserialize)]
pub struct CreatePartRequest {
    pub old_part: Option<String>,
    pub new_part: Option<String>,
    pub part_value: Option<Decimal>,
}

impl CreatePartRequest {
    pub fn validate(self) -> Result<NewPart, String> {
        Ok(NewPart {
            old_part: require("old_part", self.old_part)?,
            new_part: require("new_part", self.new_part)?,
            part_value: self.part_value,
        })
    }
}

/// Sum of the part values for one order. Parts without a recorded value
/// count as zero. This is the figure callers persist back onto the order's
/// `total_value`.
pub fn parts_total(parts: &[ReplacedPart]) -> Decimal {
    parts.iter().filter_map(|p| p.part_value).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn part(value: Option<Decimal>) -> ReplacedPart {
        ReplacedPart {
            id: Uuid::new_v4(),
            order_id: Uuid::new_v4(),
            old_part: "compressor".into(),
            new_part: "compressor embraco".into(),
            part_value: value,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn total_sums_part_values() {
        let parts = vec![part(Some(dec!(50.00))), part(Some(dec!(25.50)))];
        assert_eq!(parts_total(&parts), dec!(75.50));
    }

    #[test]
    fn missing_values_count_as_zero() {
        let parts = vec![part(Some(dec!(10.00))), part(None)];
        assert_eq!(parts_total(&parts), dec!(10.00));
        assert_eq!(parts_total(&[]), Decimal::ZERO);
    }

    #[test]
    fn both_part_names_are_mandatory() {
        let missing = CreatePartRequest {
            old_part: Some("relay".into()),
            new_part: None,
            part_value: None,
        };
        assert_eq!(missing.validate().unwrap_err(), "new_part is required");
    }
}
