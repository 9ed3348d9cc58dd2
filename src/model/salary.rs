use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One dated salary-structure snapshot. `amount` mirrors `total_earnings`
/// for callers that only track gross.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "effective_date": "2026-01-01",
        "basic": 10000.0,
        "conveyance": 2500.0,
        "hra": 5000.0,
        "special_allowance": 2500.0,
        "pf": 1200.0,
        "esi": 150.0,
        "p_tax": 130.0,
        "tds": 0.0,
        "loss_of_pay": 0.0,
        "adjustment": 0.0,
        "total_earnings": 20000.0,
        "total_deductions": 1480.0,
        "net_salary": 18520.0,
        "amount": 20000.0
    })
)]
pub struct SalaryStructureEntry {
    #[schema(example = "2026-01-01", value_type = String, format = "date")]
    pub effective_date: NaiveDate,

    // earnings
    pub basic: f64,
    pub conveyance: f64,
    pub hra: f64,
    pub special_allowance: f64,

    // deductions (adjustment may be signed)
    pub pf: f64,
    pub esi: f64,
    pub p_tax: f64,
    pub tds: f64,
    pub loss_of_pay: f64,
    pub adjustment: f64,

    pub total_earnings: f64,
    pub total_deductions: f64,
    pub net_salary: f64,
    pub amount: f64,
}
