//! Domain aggregates exposed by the service layer.

pub mod branch;
pub mod course;
pub mod course_group;
pub mod employee;
pub mod lecture;
pub mod lecturer;
pub mod lookup;
pub mod message;
pub mod receipt;
pub mod schedule;
pub mod student;
pub mod types;
