use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A shared ski property. Coordinates are optional; without them the house
/// has no snow report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct House {
    pub house_id: String,
    pub name: String,
    pub owner_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,

    pub created_at: DateTime<Utc>,
}

impl House {
    pub fn new(house_id: String, name: String, owner_id: String) -> Self {
        Self {
            house_id,
            name,
            owner_id,
            latitude: None,
            longitude: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }
}
