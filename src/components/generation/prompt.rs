use crate::components::roster::Employee;
use crate::components::schedule::catalog::{EVENING_MARKER, FULL_DAY_MARKER, MORNING_MARKER};
use crate::components::schedule::models::REST_LABEL;
use crate::components::schedule::ShiftTimes;
use crate::utils::time::format_hours;

/// Per-employee constraint block of the prompt
fn employee_constraints(employees: &[Employee]) -> String {
    employees
        .iter()
        .map(|employee| {
            format!(
                "
- **الموظف: {name}**
  - **الدور الوظيفي:** {role}
  - **ساعات العمل المستهدفة:** {target} ساعة أسبوعيًا. حاول تحقيق هذا الرقم قدر الإمكان.
  - **الراحة المفضلة:** {rest}. إذا كان ذلك ممكنًا، قم بجدولة راحته حسب هذا التفضيل.
",
                name = employee.full_name(),
                role = employee.role,
                target = format_hours(employee.target_hours),
                rest = employee.preferred_day_off.label(),
            )
        })
        .collect()
}

/// Build the scheduling prompt for the model.
///
/// The description templates given to the model are the same ones the shift
/// catalog produces, so inference can map the answer back to shift keys.
pub fn build_prompt(employees: &[Employee], shift_times: &ShiftTimes) -> String {
    let ShiftTimes {
        mon_thu_morning_start: m_start,
        mon_thu_morning_end: m_end,
        mon_thu_evening_start: e_start,
        mon_thu_evening_end: e_end,
        fri_sat_morning_start: f_start,
        fri_sat_morning_end: f_end,
    } = shift_times;
    let hours = shift_times.hours();
    let count = employees.len();
    let example_name = employees
        .first()
        .map(Employee::full_name)
        .unwrap_or_default();

    format!(
        "
You are an expert scheduler creating a weekly work schedule for {count} employees based on user-defined times and individual constraints.
Your output must be a valid JSON object that adheres to the provided schema.

Here are the strict rules and constraints you MUST follow:

1.  **Team & Individual Constraints**: There are exactly {count} employees. You MUST use their full names ('firstName lastName') as provided in the `employeeName` field of the output JSON. Here are their details and constraints:
{constraints}

2.  **Working Week**: The work week is from Monday to Saturday. Sunday is a day off for everyone.

3.  **Shift Structure (based on user input)**:
    *   **Monday to Thursday**: Two shifts: Morning ({m_start} - {m_end}, {morning_hours}h) and Evening ({e_start} - {e_end}, {evening_hours}h). Full day is {full_hours}h.
    *   **Friday and Saturday**: One shift: Morning ({f_start} - {f_end}, {weekend_hours}h).

4.  **Daily Assignments & Descriptions**:
    *   For Mon-Thu, assign: 'Full Day', 'Morning Shift only', 'Evening Shift only', or 'Day Off'.
    *   For Fri-Sat, assign 'Work' or 'Day Off'.
    *   You MUST use these exact Arabic descriptions for `shiftDescription`:
        *   Full Day (Mon-Thu): \"{full}: {m_start}-{m_end} و {e_start}-{e_end}\"
        *   Morning Only (Mon-Thu): \"{morning}: {m_start}-{m_end}\"
        *   Morning Only (Fri-Sat): \"{morning}: {f_start}-{f_end}\"
        *   Evening Only (Mon-Thu): \"{evening}: {e_start}-{e_end}\"
        *   Day Off: \"{rest}\"

5.  **Staffing & Fairness**:
    *   **Minimum Staff**: Strive to have at least 3 employees working during any given shift, but this may not be possible on all shifts if many employees have rest days. Ensure adequate coverage based on the number of available employees. Never leave a shift with zero employees.
    *   **Maximum Weekly Hours**: The total weekly hours for any employee MUST NOT exceed 40, even if their target is higher. Stay as close to their target hours as possible.
    *   **Fairness & Constraints**: Distribute hours and days off fairly, BUT you MUST prioritize and respect the individual employee constraints (target hours and preferred rest) listed in rule #1.
    *   **Preferred Rest Details**: An employee might prefer a full day off, or just a morning/evening off on a specific day from Monday to Thursday.
        *   If the preference is for a morning off (e.g., 'الإثنين (الفترة الصباحية)'), they should work only the evening shift on that day.
        *   If the preference is for an evening off (e.g., 'الثلاثاء (الفترة المسائية)'), they should work only the morning shift on that day.
        *   A 'يوم كامل' preference means a full day off.
        *   Friday & Saturday only have one shift, so a request for rest on these days is always for a 'يوم كامل'.

6.  **JSON Output Rules**:
    *   If working, `status` is 'Work', and `hours` are calculated accurately.
    *   If not working, `status` is 'Off', `hours` is 0, and `shiftDescription` is \"{rest}\".
    *   Calculate 'totalHours' by summing daily hours.
    *   Use the full name of the employee (e.g., \"{example_name}\") for the `employeeName` field.

Generate a complete and valid schedule that meets all of these requirements.
",
        constraints = employee_constraints(employees),
        morning_hours = format_hours(hours.mon_thu_morning),
        evening_hours = format_hours(hours.mon_thu_evening),
        full_hours = format_hours(hours.mon_thu_full),
        weekend_hours = format_hours(hours.fri_sat),
        full = FULL_DAY_MARKER,
        morning = MORNING_MARKER,
        evening = EVENING_MARKER,
        rest = REST_LABEL,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::roster::{default_employees, DayPart, PreferredDayOff};
    use crate::components::schedule::{resolve_shift, ShiftKey, Weekday};

    #[test]
    fn test_prompt_mentions_every_employee() {
        let mut employees = default_employees();
        employees[1].role = "Pharmacist".to_string();
        employees[1].preferred_day_off = PreferredDayOff::Day(Weekday::Monday, DayPart::Morning);
        employees[2].target_hours = 24.5;

        let prompt = build_prompt(&employees, &ShiftTimes::default());
        assert!(prompt.contains("weekly work schedule for 3 employees"));
        for employee in &employees {
            assert!(prompt.contains(&format!("**الموظف: {}**", employee.full_name())));
        }
        assert!(prompt.contains("**الدور الوظيفي:** Pharmacist"));
        assert!(prompt.contains("**الراحة المفضلة:** الإثنين (الفترة الصباحية)."));
        assert!(prompt.contains("**ساعات العمل المستهدفة:** 24.5 ساعة"));
        assert!(prompt.contains("(e.g., \"الموظف 1\")"));
    }

    #[test]
    fn test_prompt_shift_windows() {
        let prompt = build_prompt(&default_employees(), &ShiftTimes::default());
        assert!(prompt.contains("Morning (07:45 - 12:15, 4.5h) and Evening (13:45 - 17:15, 3.5h). Full day is 8h."));
        assert!(prompt.contains("One shift: Morning (07:45 - 12:15, 4.5h)."));
    }

    #[test]
    fn test_prompt_templates_match_catalog() {
        let times = ShiftTimes {
            fri_sat_morning_start: "09:00".to_string(),
            fri_sat_morning_end: "13:00".to_string(),
            ..ShiftTimes::default()
        };
        let prompt = build_prompt(&default_employees(), &times);
        for key in ShiftKey::ALL {
            let description = resolve_shift(key, &times).shift_description;
            assert!(
                prompt.contains(&format!("\"{}\"", description)),
                "prompt lacks template for {}",
                key
            );
        }
    }
}
