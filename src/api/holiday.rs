use actix_web::{HttpResponse, Responder, web};
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use sqlx::MySqlPool;
use utoipa::{IntoParams, ToSchema};

use crate::{model::holiday::Holiday, utils::db_utils::is_duplicate_key, utils::holiday_cache};

#[derive(Deserialize, ToSchema)]
pub struct CreateHoliday {
    #[schema(example = "2026-08-15", value_type = String, format = "date")]
    pub date: NaiveDate,
    #[schema(example = "Independence Day")]
    pub name: String,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct HolidayQuery {
    #[schema(example = 2026)]
    pub year: Option<i32>,
}

/// Declare a holiday
#[utoipa::path(
    post,
    path = "/api/v1/holiday",
    request_body = CreateHoliday,
    responses(
        (status = 201, description = "Holiday declared"),
        (status = 400, description = "Date already declared"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Holiday"
)]
pub async fn create_holiday(
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateHoliday>,
) -> actix_web::Result<impl Responder> {
    let result = sqlx::query("INSERT INTO holidays (date, name) VALUES (?, ?)")
        .bind(payload.date)
        .bind(&payload.name)
        .execute(pool.get_ref())
        .await;

    match result {
        Ok(_) => {
            holiday_cache::mark_holiday(payload.date).await;
            Ok(HttpResponse::Created().json(serde_json::json!({
                "message": "Holiday declared"
            })))
        }
        Err(e) => {
            if let sqlx::Error::Database(db_err) = &e {
                if is_duplicate_key(db_err.as_ref()) {
                    return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                        "message": "Date already declared as holiday"
                    })));
                }
            }

            tracing::error!(error = %e, "Failed to declare holiday");
            Err(actix_web::error::ErrorInternalServerError(
                "Internal Server Error",
            ))
        }
    }
}

/// Holiday calendar, optionally scoped to a year
#[utoipa::path(
    get,
    path = "/api/v1/holiday",
    params(HolidayQuery),
    responses(
        (status = 200, description = "Holiday list"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Holiday"
)]
pub async fn list_holidays(
    pool: web::Data<MySqlPool>,
    query: web::Query<HolidayQuery>,
) -> actix_web::Result<impl Responder> {
    let holidays = sqlx::query_as::<_, Holiday>("SELECT * FROM holidays ORDER BY date")
        .fetch_all(pool.get_ref())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to fetch holidays");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    let holidays: Vec<Holiday> = match query.year {
        Some(year) => holidays.into_iter().filter(|h| h.date.year() == year).collect(),
        None => holidays,
    };

    Ok(HttpResponse::Ok().json(holidays))
}
