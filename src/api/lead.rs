use actix_web::{HttpResponse, Responder, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{MySqlPool, prelude::FromRow};
use std::str::FromStr;
use utoipa::{IntoParams, ToSchema};

use crate::model::lead::LeadStatus;

#[derive(Deserialize, ToSchema)]
pub struct CreateLead {
    #[schema(example = 1)]
    pub branch_id: u64,
    #[schema(example = "Priya Sharma")]
    pub name: String,
    #[schema(example = "+919812345678")]
    pub phone: String,
    #[schema(example = "priya@example.com", nullable = true)]
    pub email: Option<String>,
    #[schema(example = "Class 11 Science")]
    pub course: String,
    #[schema(example = "walk-in", nullable = true)]
    pub source: Option<String>,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct LeadFilter {
    /// Filter by branch/campus
    #[schema(example = 1)]
    pub branch_id: Option<u64>,
    /// Filter by pipeline status
    #[schema(example = "new")]
    pub status: Option<String>,
    /// Pagination page number (start with 1)
    #[schema(example = 1)]
    pub page: Option<u64>,
    /// Pagination per page number
    #[schema(example = 10)]
    pub per_page: Option<u64>,
}

// Helper enum for typed SQLx binding
enum FilterValue<'a> {
    U64(u64),
    Str(&'a str),
}

#[derive(Serialize, Deserialize, FromRow, ToSchema)]
pub struct LeadResponse {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = 1)]
    pub branch_id: u64,
    #[schema(example = "Priya Sharma")]
    pub name: String,
    #[schema(example = "+919812345678")]
    pub phone: String,
    #[schema(example = "priya@example.com", nullable = true)]
    pub email: Option<String>,
    #[schema(example = "Class 11 Science")]
    pub course: String,
    #[schema(example = "walk-in", nullable = true)]
    pub source: Option<String>,
    #[schema(example = "new", value_type = String)]
    pub status: String,
    #[schema(example = "2026-01-01T00:00:00Z", format = "date-time", value_type = String)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, ToSchema)]
pub struct LeadListResponse {
    pub data: Vec<LeadResponse>,
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 10)]
    pub per_page: u32,
    #[schema(example = 1)]
    pub total: i64,
}

/* =========================
Create admission lead
========================= */
#[utoipa::path(
    post,
    path = "/api/v1/lead",
    request_body(
        content = CreateLead,
        description = "Admission lead payload",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Lead recorded successfully",
         body = Object,
         example = json!({
            "message": "Lead recorded",
            "status": "new"
         })
        ),
        (status = 400, description = "Bad request")
    ),
    tag = "Lead"
)]
pub async fn create_lead(
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateLead>,
) -> actix_web::Result<impl Responder> {
    if payload.name.trim().is_empty() || payload.phone.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": "name and phone are required"
        })));
    }

    sqlx::query(
        r#"
        INSERT INTO leads
            (branch_id, name, phone, email, course, source, status)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(payload.branch_id)
    .bind(payload.name.trim())
    .bind(payload.phone.trim())
    .bind(&payload.email)
    .bind(&payload.course)
    .bind(&payload.source)
    .bind(LeadStatus::New.to_string())
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "Failed to create lead");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Lead recorded",
        "status": LeadStatus::New.to_string()
    })))
}

/// Move an open lead to a terminal state. Only `new` and `contacted` leads
/// can still be closed.
async fn close_lead(
    pool: &MySqlPool,
    lead_id: u64,
    outcome: LeadStatus,
) -> actix_web::Result<u64> {
    let result = sqlx::query(
        r#"
        UPDATE leads
        SET status = ?
        WHERE id = ?
        AND status IN ('new', 'contacted')
        "#,
    )
    .bind(outcome.to_string())
    .bind(lead_id)
    .execute(pool)
    .await
    .map_err(|e| {
        tracing::error!(error = %e, lead_id, outcome = %outcome, "Close lead failed");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(result.rows_affected())
}

/* =========================
Mark lead won (admission confirmed)
========================= */
#[utoipa::path(
    put,
    path = "/api/v1/lead/{lead_id}/won",
    params(
        ("lead_id" = u64, Path, description = "ID of the lead to mark won")
    ),
    responses(
        (status = 200, description = "Lead marked won", body = Object, example = json!({
            "message": "Lead marked won"
        })),
        (status = 400, description = "Lead not found or already closed", body = Object, example = json!({
            "message": "Lead not found or already closed"
        }))
    ),
    tag = "Lead"
)]
pub async fn mark_won(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let lead_id = path.into_inner();

    if close_lead(pool.get_ref(), lead_id, LeadStatus::Won).await? == 0 {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": "Lead not found or already closed"
        })));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Lead marked won"
    })))
}

/* =========================
Mark lead lost
========================= */
#[utoipa::path(
    put,
    path = "/api/v1/lead/{lead_id}/lost",
    params(
        ("lead_id" = u64, Path, description = "ID of the lead to mark lost")
    ),
    responses(
        (status = 200, description = "Lead marked lost", body = Object, example = json!({
            "message": "Lead marked lost"
        })),
        (status = 400, description = "Lead not found or already closed", body = Object, example = json!({
            "message": "Lead not found or already closed"
        }))
    ),
    tag = "Lead"
)]
pub async fn mark_lost(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let lead_id = path.into_inner();

    if close_lead(pool.get_ref(), lead_id, LeadStatus::Lost).await? == 0 {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": "Lead not found or already closed"
        })));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Lead marked lost"
    })))
}

/// for getting a single lead's details
#[utoipa::path(
    get,
    path = "/api/v1/lead/{lead_id}",
    params(
        ("lead_id" = u64, Path, description = "ID of the lead to fetch")
    ),
    responses(
        (status = 200, description = "Lead found", body = LeadResponse),
        (status = 404, description = "Lead not found", body = Object, example = json!({
            "message": "Lead not found"
        }))
    ),
    tag = "Lead"
)]
pub async fn get_lead(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let lead_id = path.into_inner();

    let lead = sqlx::query_as::<_, LeadResponse>(
        r#"
        SELECT id, branch_id, name, phone, email, course, source, status, created_at
        FROM leads
        WHERE id = ?
        "#,
    )
    .bind(lead_id)
    .fetch_optional(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, lead_id, "Failed to fetch lead");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    match lead {
        Some(data) => Ok(HttpResponse::Ok().json(data)),
        None => Ok(HttpResponse::NotFound().json(serde_json::json!({
            "message": "Lead not found"
        }))),
    }
}

/// for getting the lead pipeline
#[utoipa::path(
    get,
    path = "/api/v1/lead",
    params(LeadFilter),
    responses(
        (status = 200, description = "Paginated lead list", body = LeadListResponse),
        (status = 400, description = "Invalid status filter")
    ),
    tag = "Lead"
)]
pub async fn lead_list(
    pool: web::Data<MySqlPool>,
    query: web::Query<LeadFilter>,
) -> actix_web::Result<impl Responder> {
    // -------------------------
    // Pagination
    // -------------------------
    let per_page = query.per_page.unwrap_or(10).min(100);
    let page = query.page.unwrap_or(1).max(1);
    let offset = (page - 1) * per_page;

    // -------------------------
    // WHERE clause
    // -------------------------
    let mut where_sql = String::from(" WHERE 1=1");
    let mut args: Vec<FilterValue> = Vec::new();

    if let Some(branch_id) = query.branch_id {
        where_sql.push_str(" AND branch_id = ?");
        args.push(FilterValue::U64(branch_id));
    }

    if let Some(status) = query.status.as_deref() {
        if LeadStatus::from_str(status).is_err() {
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "message": "Invalid status. Allowed: new, contacted, won, lost"
            })));
        }
        where_sql.push_str(" AND status = ?");
        args.push(FilterValue::Str(status));
    }

    // -------------------------
    // COUNT query
    // -------------------------
    let count_sql = format!("SELECT COUNT(*) FROM leads{}", where_sql);

    let mut count_q = sqlx::query_scalar::<_, i64>(&count_sql);
    for arg in &args {
        count_q = match arg {
            FilterValue::U64(v) => count_q.bind(*v),
            FilterValue::Str(s) => count_q.bind(*s),
        };
    }

    let total = count_q.fetch_one(pool.get_ref()).await.map_err(|e| {
        tracing::error!(error=%e, "Failed to count leads");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    // -------------------------
    // DATA query
    // -------------------------
    let data_sql = format!(
        r#"
        SELECT id, branch_id, name, phone, email, course, source, status, created_at
        FROM leads
        {}
        ORDER BY created_at DESC
        LIMIT ? OFFSET ?
        "#,
        where_sql
    );

    let mut data_q = sqlx::query_as::<_, LeadResponse>(&data_sql);
    for arg in args {
        data_q = match arg {
            FilterValue::U64(v) => data_q.bind(v),
            FilterValue::Str(s) => data_q.bind(s),
        };
    }

    let leads = data_q
        .bind(per_page)
        .bind(offset)
        .fetch_all(pool.get_ref())
        .await
        .map_err(|e| {
            tracing::error!(error=%e, "Failed to fetch lead list");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    // -------------------------
    // Response
    // -------------------------
    let response = LeadListResponse {
        data: leads,
        page: page as u32,
        per_page: per_page as u32,
        total,
    };

    Ok(HttpResponse::Ok().json(response))
}
