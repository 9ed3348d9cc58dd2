pub mod day_status;
pub mod salary;
