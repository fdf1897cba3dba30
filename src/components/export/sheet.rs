use super::csv::day_heading;
use super::models::{ExportSettings, FontSize};
use crate::components::roster::{find_by_name, Employee};
use crate::components::schedule::{EmployeeSchedule, ScheduleData};
use crate::utils::time::{format_hours, week_date_range};
use std::fmt::Write;

const MISSING_ROLE: &str = "N/A";

/// One line of a printed schedule
#[derive(Debug, Clone, PartialEq)]
pub struct SheetRow {
    /// `<day label> (<DD/MM>)`
    pub day: String,
    pub shift_description: String,
    pub hours: f64,
}

/// Printable weekly schedule page of one employee
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeSheet {
    pub institution_name: String,
    pub title: String,
    pub role: String,
    pub date_range: String,
    pub rows: Vec<SheetRow>,
    pub total_hours: f64,
    pub manager_name: String,
    pub font_size: FontSize,
}

/// Build the page of one schedule row; the role comes from the employee
/// whose full name matches the row
fn build_sheet(
    row: &EmployeeSchedule,
    employees: &[Employee],
    settings: &ExportSettings,
) -> EmployeeSheet {
    let (start, end) = week_date_range(&settings.week_start_date);
    let role = find_by_name(employees, &row.employee_name)
        .map(|employee| employee.role.clone())
        .unwrap_or_else(|| MISSING_ROLE.to_string());

    EmployeeSheet {
        institution_name: settings.institution_name.clone(),
        title: format!("جدول العمل الأسبوعي - {}", row.employee_name),
        role,
        date_range: format!("للأسبوع من {} إلى {}", start, end),
        rows: row
            .schedule
            .iter()
            .map(|(day, entry)| SheetRow {
                day: day_heading(day, &settings.week_start_date),
                shift_description: entry.shift_description.clone(),
                hours: entry.hours,
            })
            .collect(),
        total_hours: row.total_hours,
        manager_name: settings.manager_name.clone(),
        font_size: settings.font_size,
    }
}

/// Build one printable page per employee in schedule order
pub fn build_sheets(
    schedule: &ScheduleData,
    employees: &[Employee],
    settings: &ExportSettings,
) -> Vec<EmployeeSheet> {
    schedule
        .employees
        .iter()
        .map(|row| build_sheet(row, employees, settings))
        .collect()
}

impl EmployeeSheet {
    /// Render the page as plain text for terminal printing
    pub fn render_text(&self) -> String {
        let day_width = self.rows.iter().map(|r| r.day.chars().count()).max().unwrap_or(0);

        let mut out = String::new();
        let _ = writeln!(out, "{}", self.institution_name);
        let _ = writeln!(out, "{}", self.title);
        let _ = writeln!(out, "الدور الوظيفي: {}", self.role);
        let _ = writeln!(out, "{}", self.date_range);
        let _ = writeln!(out);
        for row in &self.rows {
            let padding = day_width - row.day.chars().count();
            let _ = writeln!(
                out,
                "{}{}  {}  {} س",
                row.day,
                " ".repeat(padding),
                row.shift_description,
                format_hours(row.hours)
            );
        }
        let _ = writeln!(out, "المجموع: {} س", format_hours(self.total_hours));
        let _ = writeln!(out);
        let _ = writeln!(out, "المدير: {}", self.manager_name);
        let _ = writeln!(out, "الختم:");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::roster::default_employees;
    use crate::components::schedule::{resolve_shift, ShiftKey, ShiftTimes, WeekSchedule};

    fn schedule(names: &[&str]) -> ScheduleData {
        let times = ShiftTimes::default();
        let employees = names
            .iter()
            .map(|name| {
                let mut week = WeekSchedule::default();
                week.tuesday = resolve_shift(ShiftKey::MonThuEvening, &times);
                let mut row = EmployeeSchedule {
                    employee_name: name.to_string(),
                    total_hours: 0.0,
                    schedule: week,
                };
                row.recompute_total();
                row
            })
            .collect();
        ScheduleData { employees }
    }

    fn settings() -> ExportSettings {
        ExportSettings {
            week_start_date: "2024-03-04".to_string(),
            ..ExportSettings::default()
        }
    }

    #[test]
    fn test_sheet_per_employee() {
        let employees = default_employees();
        let sheets = build_sheets(&schedule(&["الموظف 1", "Ghost Worker"]), &employees, &settings());

        assert_eq!(sheets.len(), 2);
        assert_eq!(sheets[0].role, "عضو فريق");
        assert_eq!(sheets[1].role, "N/A");
        assert_eq!(sheets[0].title, "جدول العمل الأسبوعي - الموظف 1");
        assert_eq!(sheets[0].date_range, "للأسبوع من 04/03/2024 إلى 09/03/2024");
        assert_eq!(sheets[0].rows.len(), 6);
        assert_eq!(sheets[0].rows[1].day, "الثلاثاء (05/03)");
        assert_eq!(sheets[0].rows[1].hours, 3.5);
        assert_eq!(sheets[0].total_hours, 3.5);
    }

    #[test]
    fn test_render_text() {
        let sheets = build_sheets(&schedule(&["الموظف 2"]), &default_employees(), &settings());
        let text = sheets[0].render_text();
        assert!(text.starts_with("اسم المؤسسة\n"));
        assert!(text.contains("مسائية: 13:45-17:15  3.5 س"));
        assert!(text.contains("المجموع: 3.5 س"));
        assert!(text.contains("المدير: اسم المدير"));
    }
}
