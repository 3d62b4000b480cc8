use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use crate::domain::schedule::ScheduleDay;

/// One group occurrence placed into the weekly grid.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub group_id: i32,
    pub group_code: String,
    pub lab_id: Option<i32>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

/// One day column of the weekly calendar, entries ordered by start time.
#[derive(Debug, Serialize)]
pub struct DayColumn {
    pub date: NaiveDate,
    pub day: ScheduleDay,
    pub entries: Vec<ScheduleEntry>,
}

/// The weekly calendar rendered by the schedule view.
#[derive(Debug, Serialize)]
pub struct WeekView {
    pub week_start: NaiveDate,
    pub days: Vec<DayColumn>,
}
