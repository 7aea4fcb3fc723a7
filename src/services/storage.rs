use chrono::{DateTime, Utc};
use sqlx::Row;
use tracing::{info, warn};

use crate::{
    db::DbPool,
    error::AppError,
    models::custom_trip::{storage_key, CustomTrip},
};

const MAX_INSERT_ATTEMPTS: i64 = 16;

/// Custom trip documents, one JSON blob per `customTrip-<id>` key.
#[derive(Clone)]
pub struct StorageService {
    db: DbPool,
}

impl StorageService {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    pub fn next_trip_id(now: DateTime<Utc>) -> i64 {
        now.timestamp_millis()
    }

    /// Stores the trip, moving its id forward a millisecond at a time if the key is taken.
    pub async fn save_custom_trip(&self, mut trip: CustomTrip) -> Result<CustomTrip, AppError> {
        let created_at = Utc::now().to_rfc3339();
        for _ in 0..MAX_INSERT_ATTEMPTS {
            let document = serde_json::to_string(&trip)?;
            let result = sqlx::query(
                "INSERT OR IGNORE INTO custom_trips (storage_key, trip_id, document, created_at) VALUES (?1, ?2, ?3, ?4)",
            )
            .bind(trip.storage_key())
            .bind(trip.id.to_string())
            .bind(&document)
            .bind(&created_at)
            .execute(&self.db)
            .await?;

            if result.rows_affected() == 1 {
                info!(
                    trip_id = trip.id,
                    locations = trip.locations.len(),
                    campgrounds = trip.campgrounds.len(),
                    "custom trip stored"
                );
                return Ok(trip);
            }
            trip.id += 1;
        }
        Err(AppError::Other(anyhow::anyhow!(
            "no free custom trip id near {}",
            trip.id - MAX_INSERT_ATTEMPTS
        )))
    }

    pub async fn load_custom_trip(&self, trip_id: i64) -> Result<Option<CustomTrip>, AppError> {
        let row = sqlx::query("SELECT document FROM custom_trips WHERE storage_key = ?1")
            .bind(storage_key(trip_id))
            .fetch_optional(&self.db)
            .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        let document: String = row.get("document");
        match serde_json::from_str(&document) {
            Ok(trip) => Ok(Some(trip)),
            Err(err) => {
                warn!(trip_id, "stored custom trip is unreadable: {err}");
                Ok(None)
            }
        }
    }

    pub async fn count_custom_trips(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM custom_trips")
            .fetch_one(&self.db)
            .await?;
        Ok(count)
    }
}
