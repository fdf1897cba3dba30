use super::models::ExportSettings;
use crate::components::schedule::{ScheduleData, Weekday};
use crate::utils::time::{day_date, format_hours, week_date_range};

/// Byte order mark so spreadsheet tools detect UTF-8
const BOM: char = '\u{FEFF}';
const LINE_END: &str = "\r\n";

/// Quote a CSV field, doubling embedded quotes
fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Quote a CSV field only when it needs it
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\r', '\n']) {
        quote(field)
    } else {
        field.to_string()
    }
}

/// Header cell of a day column: `<label> (<DD/MM>)`
pub fn day_heading(day: Weekday, week_start: &str) -> String {
    format!("{} ({})", day.label(), day_date(week_start, day.index()))
}

/// Render a schedule as CSV text: institution and week title lines, a blank
/// line, the header row and one row per employee.
pub fn schedule_to_csv(schedule: &ScheduleData, settings: &ExportSettings) -> String {
    let (start, end) = week_date_range(&settings.week_start_date);

    let mut csv = String::new();
    csv.push(BOM);
    csv.push_str(&quote(&settings.institution_name));
    csv.push_str(LINE_END);
    csv.push_str(&quote(&format!("جدول العمل للأسبوع من {} إلى {}", start, end)));
    csv.push_str(LINE_END);
    csv.push_str(LINE_END);

    let mut headers = vec!["الموظف".to_string()];
    headers.extend(
        Weekday::ALL
            .into_iter()
            .map(|day| escape(&day_heading(day, &settings.week_start_date))),
    );
    headers.push("مجموع الساعات".to_string());
    csv.push_str(&headers.join(","));
    csv.push_str(LINE_END);

    for employee in &schedule.employees {
        let mut row = vec![escape(&employee.employee_name)];
        row.extend(employee.schedule.iter().map(|(_, entry)| {
            quote(&format!(
                "{} ({}h)",
                entry.shift_description,
                format_hours(entry.hours)
            ))
        }));
        row.push(format_hours(employee.total_hours));
        csv.push_str(&row.join(","));
        csv.push_str(LINE_END);
    }

    csv
}
