use crate::api::attendance::{CalendarDay, CalendarQuery, CalendarResponse};
use crate::api::employee::{CreateEmployee, EmployeeListResponse, EmployeeQuery};
use crate::api::holiday::{CreateHoliday, HolidayQuery};
use crate::api::lead::{CreateLead, LeadFilter, LeadListResponse, LeadResponse};
use crate::api::payroll::{
    CreatePayroll, PaginatedPayrollResponse, PayrollQuery, PayrollResponse, UpdatePayroll,
};
use crate::api::salary::{AddSalaryEntry, EditSalaryEntry, SalaryStructureRow};
use crate::engine::day_status::{DayStatus, WorkedStatus};
use crate::model::employee::Employee;
use crate::model::lead::LeadStatus;
use crate::model::salary::SalaryStructureEntry;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "EduERP API",
        version = "1.0.0",
        description = r#"
## ERP backend for an educational institution chain

This API powers the HR, attendance, admissions and payroll operations of a
multi-branch educational institution.

### 🔹 Key Features
- **Employee Management**
  - Create, update, list, and view employee profiles across branches
- **Salary Structures**
  - Dated salary-breakdown snapshots derived from a gross figure, with
    component-level manual edits recomputed server side
- **Attendance Management**
  - Daily check-in/check-out tracking and a classified month calendar
- **Lead Management**
  - Admission lead pipeline: record, track, win or lose
- **Payroll**
  - Monthly payroll records derived from the salary breakdown engine

### 📦 Response Format
- JSON-based RESTful responses
- Pagination supported for list endpoints

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::employee::create_employee,
        crate::api::employee::get_employee,
        crate::api::employee::list_employees,
        crate::api::employee::update_employee,
        crate::api::employee::delete_employee,

        crate::api::salary::add_salary_entry,
        crate::api::salary::update_salary_entry,
        crate::api::salary::list_salary_history,

        crate::api::attendance::check_in,
        crate::api::attendance::check_out,
        crate::api::attendance::month_calendar,

        crate::api::lead::create_lead,
        crate::api::lead::get_lead,
        crate::api::lead::lead_list,
        crate::api::lead::mark_won,
        crate::api::lead::mark_lost,

        crate::api::payroll::create_payroll,
        crate::api::payroll::update_payroll,
        crate::api::payroll::get_payroll,
        crate::api::payroll::list_payrolls,

        crate::api::holiday::create_holiday,
        crate::api::holiday::list_holidays
    ),
    components(
        schemas(
            Employee,
            CreateEmployee,
            EmployeeQuery,
            EmployeeListResponse,
            SalaryStructureEntry,
            SalaryStructureRow,
            AddSalaryEntry,
            EditSalaryEntry,
            CalendarQuery,
            CalendarDay,
            CalendarResponse,
            DayStatus,
            WorkedStatus,
            CreateLead,
            LeadFilter,
            LeadResponse,
            LeadListResponse,
            LeadStatus,
            CreatePayroll,
            UpdatePayroll,
            PayrollResponse,
            PayrollQuery,
            PaginatedPayrollResponse,
            CreateHoliday,
            HolidayQuery
        )
    ),
    tags(
        (name = "Employee", description = "Employee management APIs"),
        (name = "Salary", description = "Salary structure history APIs"),
        (name = "Attendance", description = "Attendance management APIs"),
        (name = "Lead", description = "Admission lead pipeline APIs"),
        (name = "Payroll", description = "Payroll management APIs"),
        (name = "Holiday", description = "Holiday calendar APIs"),
    )
)]
pub struct ApiDoc;
