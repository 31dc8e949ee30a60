//! Practice locations

use serde::{Deserialize, Serialize};

/// Location row. The seeder looks it up by `name` and creates it once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationFixture {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line1: Option<String>,
    pub city: String,
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    pub country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// 1 = studio
    pub location_type: u8,
}
