pub mod attendance;
pub mod employee;
pub mod holiday;
pub mod lead;
pub mod salary;
