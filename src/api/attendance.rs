use crate::{
    config::Config,
    engine::day_status::{DayStatus, classify_day},
    model::attendance::Attendance,
    utils::db_utils::is_duplicate_key,
    utils::holiday_cache,
};
use actix_web::{HttpResponse, Responder, error::ErrorInternalServerError, web};
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use sqlx::MySqlPool;
use utoipa::ToSchema;

/// Check-in endpoint
#[utoipa::path(
    post,
    path = "/api/v1/attendance/{employee_id}/check-in",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Checked in successfully", body = Object, example = json!({
            "message": "Checked in successfully"
        })),
        (status = 400, description = "Already checked in today", body = Object, example = json!({
            "message": "Already checked in today"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn check_in(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let employee_id = path.into_inner();

    let result = sqlx::query(
        r#"
        INSERT INTO attendance (employee_id, date, check_in)
        VALUES (?, CURDATE(), CURTIME())
        "#,
    )
    .bind(employee_id)
    .execute(pool.get_ref())
    .await;

    match result {
        Ok(_) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "message": "Checked in successfully"
        }))),

        Err(e) => {
            // Duplicate check-in for same day
            if let sqlx::Error::Database(db_err) = &e {
                if is_duplicate_key(db_err.as_ref()) {
                    return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                        "message": "Already checked in today"
                    })));
                }
            }

            tracing::error!(error = %e, employee_id, "Check-in failed");
            Err(ErrorInternalServerError("Internal Server Error"))
        }
    }
}

/// Check-out endpoint
#[utoipa::path(
    put,
    path = "/api/v1/attendance/{employee_id}/check-out",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Checked out successfully", body = Object, example = json!({
            "message": "Checked out successfully"
        })),
        (status = 400, description = "No active check-in found for today", body = Object, example = json!({
            "message": "No active check-in found for today"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn check_out(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let employee_id = path.into_inner();

    let result = sqlx::query(
        r#"
        UPDATE attendance
        SET check_out = CURTIME()
        WHERE employee_id = ?
        AND date = CURDATE()
        AND check_out IS NULL
        "#,
    )
    .bind(employee_id)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, employee_id, "Check-out failed");
        ErrorInternalServerError("Internal Server Error")
    })?;

    if result.rows_affected() == 0 {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": "No active check-in found for today"
        })));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Checked out successfully"
    })))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CalendarQuery {
    #[schema(example = 2026)]
    pub year: i32,
    #[schema(example = 3)]
    pub month: u32,
}

#[derive(Serialize, ToSchema)]
pub struct CalendarDay {
    #[schema(example = "2026-03-18", value_type = String, format = "date")]
    pub date: NaiveDate,
    pub status: DayStatus,
}

#[derive(Serialize, ToSchema)]
pub struct CalendarResponse {
    pub employee_id: u64,
    pub days: Vec<CalendarDay>,
}

fn month_days(year: i32, month: u32) -> Option<Vec<NaiveDate>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let mut days = Vec::with_capacity(31);
    let mut day = first;
    while day.month() == month {
        days.push(day);
        day = day.succ_opt()?;
    }
    Some(days)
}

/// Classified month view: one status per calendar day
#[utoipa::path(
    get,
    path = "/api/v1/attendance/{employee_id}/calendar",
    params(
        ("employee_id", Path, description = "Employee ID"),
        ("year", Query, description = "Calendar year"),
        ("month", Query, description = "Calendar month (1-12)")
    ),
    responses(
        (status = 200, description = "Day-by-day statuses for the month", body = CalendarResponse),
        (status = 400, description = "Invalid year/month"),
        (status = 404, description = "Employee not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn month_calendar(
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
    path: web::Path<u64>,
    query: web::Query<CalendarQuery>,
) -> actix_web::Result<impl Responder> {
    let employee_id = path.into_inner();

    let Some(days) = month_days(query.year, query.month) else {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": "Invalid year/month"
        })));
    };

    let join_date =
        sqlx::query_scalar::<_, NaiveDate>("SELECT join_date FROM employees WHERE id = ?")
            .bind(employee_id)
            .fetch_optional(pool.get_ref())
            .await
            .map_err(|e| {
                tracing::error!(error = %e, employee_id, "Failed to fetch join date");
                ErrorInternalServerError("Internal Server Error")
            })?;

    let Some(join_date) = join_date else {
        return Ok(HttpResponse::NotFound().json(serde_json::json!({
            "message": "Employee not found"
        })));
    };

    let records = sqlx::query_as::<_, Attendance>(
        "SELECT * FROM attendance WHERE employee_id = ? AND date BETWEEN ? AND ?",
    )
    .bind(employee_id)
    .bind(days[0])
    .bind(days[days.len() - 1])
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, employee_id, "Failed to fetch attendance records");
        ErrorInternalServerError("Internal Server Error")
    })?;

    let mut holidays = Vec::new();
    let mut unknown = Vec::new();
    for day in &days {
        match holiday_cache::lookup(*day).await {
            Some(true) => holidays.push(*day),
            Some(false) => {}
            None => unknown.push(*day),
        }
    }

    // Cache misses (cold start, expired entries) fall back to the table,
    // and the answer is remembered either way.
    if !unknown.is_empty() {
        let declared = sqlx::query_scalar::<_, NaiveDate>(
            "SELECT date FROM holidays WHERE date BETWEEN ? AND ?",
        )
        .bind(days[0])
        .bind(days[days.len() - 1])
        .fetch_all(pool.get_ref())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, employee_id, "Failed to fetch holidays");
            ErrorInternalServerError("Internal Server Error")
        })?;

        for day in unknown {
            let is_holiday = declared.contains(&day);
            holiday_cache::remember(day, is_holiday).await;
            if is_holiday {
                holidays.push(day);
            }
        }
    }

    let today = Local::now().date_naive();
    let calendar = days
        .into_iter()
        .map(|date| CalendarDay {
            date,
            status: classify_day(
                date,
                today,
                join_date,
                &records,
                &holidays,
                &config.work_week,
            ),
        })
        .collect();

    Ok(HttpResponse::Ok().json(CalendarResponse {
        employee_id,
        days: calendar,
    }))
}
