/// Tenant-scoped counters shown on the dashboard.
#[derive(Debug, Default)]
pub struct DashboardData {
    pub students_total: usize,
    pub lecturers_total: usize,
    pub groups_total: usize,
    pub courses_total: usize,
}
