use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A stored donor record. `id` and `created_at` are assigned by the database
/// at insert time; records are never updated afterwards.
#[derive(sqlx::FromRow, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Donor {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub email: String,
    pub blood_group: String,
    pub phone_number: Option<String>,
    pub facebook_profile_url: Option<String>,
    pub last_donated_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}
