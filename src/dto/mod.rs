//! DTO modules that bridge services with templates.

pub mod course_groups;
pub mod lectures;
pub mod main;
pub mod receipts;
pub mod schedule;
pub mod students;
