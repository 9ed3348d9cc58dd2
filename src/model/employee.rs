use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "employee_code": "EMP-001",
        "first_name": "John",
        "last_name": "Doe",
        "email": "john.doe@school.edu",
        "phone": "+919812345678",
        "branch_id": 10,
        "designation_id": 3,
        "join_date": "2024-01-01",
        "status": "active"
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "EMP-001")]
    pub employee_code: String,

    #[schema(example = "John")]
    pub first_name: String,

    #[schema(example = "Doe")]
    pub last_name: String,

    #[schema(example = "john.doe@school.edu")]
    pub email: String,

    #[schema(example = "+919812345678", nullable = true)]
    pub phone: Option<String>,

    /// Campus/branch the employee is posted at
    #[schema(example = 10)]
    pub branch_id: u64,

    #[schema(example = 3)]
    pub designation_id: u64,

    #[schema(
        example = "2024-01-01",
        value_type = String,
        format = "date"
    )]
    pub join_date: NaiveDate,

    #[schema(example = "active")]
    pub status: String,
}
