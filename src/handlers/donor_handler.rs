use axum::{Extension, Json, extract::Query, http::StatusCode};
use serde::Deserialize;
use sqlx::MySqlPool;

use crate::models::donor::Donor;
use crate::schemas::DonorStoreRequestSchema;
use crate::utils::handler::HandlerResult;
use crate::utils::response::{ErrorResponse, MessageResponse};
use crate::utils::validation::validate_payload;

const DUPLICATE_EMAIL_MESSAGE: &str = "This email is already registered";

const SELECT_DONOR: &str = r#"
    SELECT id, name, location, email, blood_group,
           phone_number, facebook_profile_url, last_donated_date, created_at
    FROM donors
"#;

/// Handler for donor registration: validate, reject duplicate emails, insert,
/// return the stored record.
pub async fn store(
    Extension(db_pool): Extension<MySqlPool>,
    Json(payload): Json<DonorStoreRequestSchema>,
) -> HandlerResult<Donor> {
    validate_payload(&payload)?;

    // Normalize email for consistent duplicate checks and storage
    let email = payload.normalized_email();

    // Check if the email already exists to avoid duplicate registrations
    let existing_count: i64 =
        match sqlx::query_scalar("SELECT COUNT(1) FROM donors WHERE email = ?")
            .bind(&email)
            .fetch_one(&db_pool)
            .await
        {
            Ok(cnt) => cnt,
            Err(e) => {
                tracing::error!("Failed to check existing donor: {}", e);
                let response = ErrorResponse::new("Failed to register donor");
                return Err((StatusCode::INTERNAL_SERVER_ERROR, Json(response)));
            }
        };

    if existing_count > 0 {
        let response = ErrorResponse::new(DUPLICATE_EMAIL_MESSAGE);
        return Err((StatusCode::BAD_REQUEST, Json(response)));
    }

    // Insert the new donor; id and created_at are assigned by the database
    let result = sqlx::query(
        r#"
        INSERT INTO donors (name, location, email, blood_group,
                            phone_number, facebook_profile_url, last_donated_date)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(payload.name())
    .bind(payload.location())
    .bind(&email)
    .bind(&payload.blood_group)
    .bind(payload.phone_number())
    .bind(payload.facebook_profile_url())
    .bind(payload.last_donated_date())
    .execute(&db_pool)
    .await;

    let donor_id = match result {
        Ok(res) => res.last_insert_id() as i64,
        Err(e) => {
            // If a concurrent request inserted the same email in the meantime,
            // the unique index rejects the insert (MySQL error 1062)
            if is_duplicate_key(&e) {
                let response = ErrorResponse::new(DUPLICATE_EMAIL_MESSAGE);
                return Err((StatusCode::BAD_REQUEST, Json(response)));
            }
            tracing::error!("Failed to insert donor: {}", e);
            let response = ErrorResponse::new("Failed to register donor");
            return Err((StatusCode::INTERNAL_SERVER_ERROR, Json(response)));
        }
    };

    // Fetch the newly created record so the response carries the
    // store-assigned id and created_at
    let donor = match sqlx::query_as::<_, Donor>(&format!("{} WHERE id = ?", SELECT_DONOR))
        .bind(donor_id)
        .fetch_one(&db_pool)
        .await
    {
        Ok(donor) => donor,
        Err(e) => {
            tracing::error!("Failed to fetch registered donor: {}", e);
            let response = ErrorResponse::new("Failed to register donor");
            return Err((StatusCode::INTERNAL_SERVER_ERROR, Json(response)));
        }
    };

    Ok((StatusCode::CREATED, Json(donor)))
}

#[derive(Debug, Deserialize)]
pub struct ListDonorsQuery {
    #[serde(rename = "bloodGroup")]
    pub blood_group: Option<String>,
}

/// List donors, newest first, optionally restricted to one blood group.
/// `bloodGroup=All` (or no parameter) means no filter.
pub async fn index(
    Extension(db_pool): Extension<MySqlPool>,
    Query(params): Query<ListDonorsQuery>,
) -> HandlerResult<Vec<Donor>> {
    let filter = params
        .blood_group
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != "All");

    let donors_result = match filter {
        Some(group) => {
            sqlx::query_as::<_, Donor>(&format!(
                "{} WHERE blood_group = ? ORDER BY created_at DESC, id DESC",
                SELECT_DONOR
            ))
            .bind(group)
            .fetch_all(&db_pool)
            .await
        }
        None => {
            sqlx::query_as::<_, Donor>(&format!(
                "{} ORDER BY created_at DESC, id DESC",
                SELECT_DONOR
            ))
            .fetch_all(&db_pool)
            .await
        }
    };

    match donors_result {
        Ok(donors) => Ok((StatusCode::OK, Json(donors))),
        Err(e) => {
            tracing::error!("Failed to fetch donors: {}", e);
            let response = ErrorResponse::new("Failed to fetch donors");
            Err((StatusCode::INTERNAL_SERVER_ERROR, Json(response)))
        }
    }
}

/// Maintenance operation: remove every donor record. Not part of the normal
/// registration flow.
pub async fn clear(Extension(db_pool): Extension<MySqlPool>) -> HandlerResult<MessageResponse> {
    match sqlx::query("DELETE FROM donors").execute(&db_pool).await {
        Ok(_) => {
            let response = MessageResponse::new("All donor data cleared successfully");
            Ok((StatusCode::OK, Json(response)))
        }
        Err(e) => {
            tracing::error!("Failed to clear donors: {}", e);
            let response = ErrorResponse::new("Failed to clear donors");
            Err((StatusCode::INTERNAL_SERVER_ERROR, Json(response)))
        }
    }
}

fn is_duplicate_key(e: &sqlx::Error) -> bool {
    if let sqlx::Error::Database(db_err) = e {
        if db_err.code().as_deref() == Some("1062") {
            return true;
        }
        if db_err.message().to_lowercase().contains("duplicate") {
            return true;
        }
    }
    false
}
