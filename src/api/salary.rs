use crate::{
    engine::salary::{breakdown_from_gross, reaggregate},
    model::salary::SalaryStructureEntry,
};
use actix_web::{HttpResponse, Responder, error::ErrorInternalServerError, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::MySqlPool;
use tracing::error;
use utoipa::ToSchema;

/// One stored row of an employee's salary history. Row id doubles as the
/// history order: entries are listed in insertion order, never re-sorted by
/// effective date.
#[derive(Serialize, sqlx::FromRow, ToSchema)]
pub struct SalaryStructureRow {
    pub id: u64,
    pub employee_id: u64,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub entry: SalaryStructureEntry,
}

#[derive(Deserialize, ToSchema)]
pub struct AddSalaryEntry {
    #[schema(example = "2026-04-01", format = "date", value_type = String)]
    pub effective_date: NaiveDate,

    /// Gross monthly salary; the full breakdown is derived from this figure.
    #[schema(example = 20000.0)]
    pub gross: f64,
}

/// Manual component edit. Omitted fields keep their stored value; totals and
/// statutory deductions are recomputed from whatever results.
#[derive(Deserialize, ToSchema)]
pub struct EditSalaryEntry {
    #[schema(example = "2026-04-01", format = "date", value_type = String, nullable = true)]
    pub effective_date: Option<NaiveDate>,
    pub basic: Option<f64>,
    pub conveyance: Option<f64>,
    pub hra: Option<f64>,
    pub special_allowance: Option<f64>,
    pub tds: Option<f64>,
    pub loss_of_pay: Option<f64>,
    pub adjustment: Option<f64>,
}

async fn employee_exists(pool: &MySqlPool, employee_id: u64) -> Result<bool, sqlx::Error> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees WHERE id = ?")
        .bind(employee_id)
        .fetch_one(pool)
        .await?;
    Ok(count > 0)
}

/// Append a salary snapshot derived from a gross figure
#[utoipa::path(
    post,
    path = "/api/v1/employees/{employee_id}/salary",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    request_body = AddSalaryEntry,
    responses(
        (status = 201, description = "Snapshot appended", body = SalaryStructureRow),
        (status = 404, description = "Employee not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Salary"
)]
pub async fn add_salary_entry(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    payload: web::Json<AddSalaryEntry>,
) -> actix_web::Result<impl Responder> {
    let employee_id = path.into_inner();

    let exists = employee_exists(pool.get_ref(), employee_id)
        .await
        .map_err(|e| {
            error!(error = %e, employee_id, "Failed to verify employee");
            ErrorInternalServerError("Internal Server Error")
        })?;
    if !exists {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Employee not found"
        })));
    }

    let entry = breakdown_from_gross(payload.effective_date, payload.gross);

    let result = sqlx::query(
        r#"
        INSERT INTO salary_structures
        (employee_id, effective_date, basic, conveyance, hra, special_allowance,
         pf, esi, p_tax, tds, loss_of_pay, adjustment,
         total_earnings, total_deductions, net_salary, amount)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(employee_id)
    .bind(entry.effective_date)
    .bind(entry.basic)
    .bind(entry.conveyance)
    .bind(entry.hra)
    .bind(entry.special_allowance)
    .bind(entry.pf)
    .bind(entry.esi)
    .bind(entry.p_tax)
    .bind(entry.tds)
    .bind(entry.loss_of_pay)
    .bind(entry.adjustment)
    .bind(entry.total_earnings)
    .bind(entry.total_deductions)
    .bind(entry.net_salary)
    .bind(entry.amount)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, employee_id, "Failed to insert salary snapshot");
        ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Created().json(SalaryStructureRow {
        id: result.last_insert_id(),
        employee_id,
        entry,
    }))
}

/// Edit components of an existing snapshot
///
/// The edited earnings fields are taken as typed; totals and statutory
/// deductions are re-derived through the reverse aggregation path.
#[utoipa::path(
    put,
    path = "/api/v1/employees/{employee_id}/salary/{entry_id}",
    params(
        ("employee_id", Path, description = "Employee ID"),
        ("entry_id", Path, description = "Salary snapshot ID")
    ),
    request_body = EditSalaryEntry,
    responses(
        (status = 200, description = "Snapshot recomputed", body = SalaryStructureRow),
        (status = 404, description = "Snapshot not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Salary"
)]
pub async fn update_salary_entry(
    pool: web::Data<MySqlPool>,
    path: web::Path<(u64, u64)>,
    payload: web::Json<EditSalaryEntry>,
) -> actix_web::Result<impl Responder> {
    let (employee_id, entry_id) = path.into_inner();

    let current = sqlx::query_as::<_, SalaryStructureRow>(
        "SELECT * FROM salary_structures WHERE id = ? AND employee_id = ?",
    )
    .bind(entry_id)
    .bind(employee_id)
    .fetch_optional(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, employee_id, entry_id, "Failed to fetch salary snapshot");
        ErrorInternalServerError("Internal Server Error")
    })?;

    let Some(current) = current else {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Salary snapshot not found"
        })));
    };

    let mut draft = current.entry.clone();
    if let Some(d) = payload.effective_date {
        draft.effective_date = d;
    }
    if let Some(v) = payload.basic {
        draft.basic = v;
    }
    if let Some(v) = payload.conveyance {
        draft.conveyance = v;
    }
    if let Some(v) = payload.hra {
        draft.hra = v;
    }
    if let Some(v) = payload.special_allowance {
        draft.special_allowance = v;
    }
    if let Some(v) = payload.tds {
        draft.tds = v;
    }
    if let Some(v) = payload.loss_of_pay {
        draft.loss_of_pay = v;
    }
    if let Some(v) = payload.adjustment {
        draft.adjustment = v;
    }

    let entry = reaggregate(&draft);

    sqlx::query(
        r#"
        UPDATE salary_structures SET
            effective_date = ?, basic = ?, conveyance = ?, hra = ?, special_allowance = ?,
            pf = ?, esi = ?, p_tax = ?, tds = ?, loss_of_pay = ?, adjustment = ?,
            total_earnings = ?, total_deductions = ?, net_salary = ?, amount = ?
        WHERE id = ? AND employee_id = ?
        "#,
    )
    .bind(entry.effective_date)
    .bind(entry.basic)
    .bind(entry.conveyance)
    .bind(entry.hra)
    .bind(entry.special_allowance)
    .bind(entry.pf)
    .bind(entry.esi)
    .bind(entry.p_tax)
    .bind(entry.tds)
    .bind(entry.loss_of_pay)
    .bind(entry.adjustment)
    .bind(entry.total_earnings)
    .bind(entry.total_deductions)
    .bind(entry.net_salary)
    .bind(entry.amount)
    .bind(entry_id)
    .bind(employee_id)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, employee_id, entry_id, "Failed to update salary snapshot");
        ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(SalaryStructureRow {
        id: entry_id,
        employee_id,
        entry,
    }))
}

/// Salary history in insertion order
#[utoipa::path(
    get,
    path = "/api/v1/employees/{employee_id}/salary",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Salary history", body = [SalaryStructureRow]),
        (status = 404, description = "Employee not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Salary"
)]
pub async fn list_salary_history(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let employee_id = path.into_inner();

    let exists = employee_exists(pool.get_ref(), employee_id)
        .await
        .map_err(|e| {
            error!(error = %e, employee_id, "Failed to verify employee");
            ErrorInternalServerError("Internal Server Error")
        })?;
    if !exists {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Employee not found"
        })));
    }

    let rows = sqlx::query_as::<_, SalaryStructureRow>(
        "SELECT * FROM salary_structures WHERE employee_id = ? ORDER BY id",
    )
    .bind(employee_id)
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, employee_id, "Failed to fetch salary history");
        ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(rows))
}
