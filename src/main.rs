use clap::{Parser, Subcommand};
use shift_planner::app::AppState;
use shift_planner::components::export::{ExportSettings, FontSize};
use shift_planner::components::roster::PreferredDayOff;
use shift_planner::components::schedule::{ShiftField, ShiftKey, Weekday};
use shift_planner::startup;
use shift_planner::utils::time::format_hours;
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "shift_planner")]
#[command(version)]
#[command(about = "Weekly shift schedule planner backed by a text-generation model", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the team
    Employees {
        #[command(subcommand)]
        command: EmployeeCommands,
    },
    /// Show or change the shift times
    Times {
        #[command(subcommand)]
        command: TimeCommands,
    },
    /// Show or change the export settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },
    /// Generate a new weekly schedule
    Generate,
    /// Show the current schedule
    Show,
    /// Assign a shift to one employee's day and save it
    Edit {
        /// Employee number as listed by `show` (1-based)
        employee: usize,
        /// Day, e.g. `monday`
        day: Weekday,
        /// Shift key, e.g. `mon-thu-full`, `fri-sat-work` or `off`
        shift: ShiftKey,
    },
    /// Export the schedule as CSV
    Export {
        /// Output file; printed to stdout when missing
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Print one schedule sheet per employee
    Print,
}

#[derive(Subcommand)]
enum EmployeeCommands {
    /// List the team
    List,
    /// Add a placeholder employee
    Add,
    /// Remove an employee
    Remove { id: String },
    /// Change an employee's details
    Set {
        id: String,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        role: Option<String>,
        /// `any`, or `<day>-<full|morning|evening>`
        #[arg(long)]
        day_off: Option<PreferredDayOff>,
        #[arg(long)]
        target_hours: Option<f64>,
    },
}

#[derive(Subcommand)]
enum TimeCommands {
    /// Show the shift times and their hours
    Show,
    /// Set one time, e.g. `mon-thu-morning-end 12:30`
    Set { field: ShiftField, value: String },
}

#[derive(Subcommand)]
enum SettingsCommands {
    /// Show the export settings
    Show,
    /// Change the export settings
    Set {
        #[arg(long)]
        institution: Option<String>,
        #[arg(long)]
        manager: Option<String>,
        #[arg(long)]
        font_size: Option<FontSize>,
        /// Monday of the exported week, `YYYY-MM-DD`
        #[arg(long)]
        week_start: Option<String>,
    },
}

fn print_employees(state: &AppState) {
    for employee in state.employees() {
        println!(
            "{}  {}  {}  {}  {}h",
            employee.id,
            employee.full_name(),
            employee.role,
            employee.preferred_day_off,
            format_hours(employee.target_hours)
        );
    }
}

fn print_times(state: &AppState) {
    let times = state.shift_times();
    for field in ShiftField::ALL {
        println!("{}: {}", field, times.get(field));
    }
    let hours = times.hours();
    println!(
        "mon-thu: morning {}h, evening {}h, full {}h; fri-sat: {}h",
        format_hours(hours.mon_thu_morning),
        format_hours(hours.mon_thu_evening),
        format_hours(hours.mon_thu_full),
        format_hours(hours.fri_sat)
    );
}

fn print_settings(settings: &ExportSettings) {
    println!("institution: {}", settings.institution_name);
    println!("manager: {}", settings.manager_name);
    println!("font size: {}", settings.font_size);
    println!("week start: {}", settings.week_start_date);
}

fn print_schedule(state: &AppState) -> miette::Result<()> {
    let schedule = state.require_schedule()?;
    for (index, row) in schedule.employees.iter().enumerate() {
        println!("{}. {} ({}h)", index + 1, row.employee_name, format_hours(row.total_hours));
        for (day, entry) in row.schedule.iter() {
            println!(
                "   {:<9} {} ({}h)",
                day.as_str(),
                entry.shift_description,
                format_hours(entry.hours)
            );
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    let cli = Cli::parse();
    let config = startup::load_config()?;
    let mut state = startup::load_state(&config)?;

    match cli.command {
        Commands::Employees { command } => match command {
            EmployeeCommands::List => print_employees(&state),
            EmployeeCommands::Add => {
                let employee = state.add_employee()?;
                println!("{}", employee.id);
            }
            EmployeeCommands::Remove { id } => state.remove_employee(&id)?,
            EmployeeCommands::Set {
                id,
                first_name,
                last_name,
                role,
                day_off,
                target_hours,
            } => state.update_employee(&id, |employee| {
                if let Some(first_name) = first_name {
                    employee.first_name = first_name;
                }
                if let Some(last_name) = last_name {
                    employee.last_name = last_name;
                }
                if let Some(role) = role {
                    employee.role = role;
                }
                if let Some(day_off) = day_off {
                    employee.preferred_day_off = day_off;
                }
                if let Some(target_hours) = target_hours {
                    employee.target_hours = target_hours;
                }
            })?,
        },
        Commands::Times { command } => match command {
            TimeCommands::Show => print_times(&state),
            TimeCommands::Set { field, value } => {
                state.set_shift_time(field, &value)?;
                print_times(&state);
            }
        },
        Commands::Settings { command } => match command {
            SettingsCommands::Show => print_settings(state.export_settings()),
            SettingsCommands::Set {
                institution,
                manager,
                font_size,
                week_start,
            } => {
                let mut settings = state.export_settings().clone();
                if let Some(institution) = institution {
                    settings.institution_name = institution;
                }
                if let Some(manager) = manager {
                    settings.manager_name = manager;
                }
                if let Some(font_size) = font_size {
                    settings.font_size = font_size;
                }
                if let Some(week_start) = week_start {
                    settings.week_start_date = week_start;
                }
                state.set_export_settings(settings)?;
                print_settings(state.export_settings());
            }
        },
        Commands::Generate => {
            let generator = startup::start_generation(&config);
            let result = state.generate(&generator).await;
            generator.shutdown().await?;
            result?;
            print_schedule(&state)?;
        }
        Commands::Show => print_schedule(&state)?,
        Commands::Edit {
            employee,
            day,
            shift,
        } => {
            state.start_edit()?;
            let index = employee.wrapping_sub(1);
            if let Err(e) = state.change_shift(index, day, shift) {
                state.cancel_edits()?;
                return Err(e.into());
            }
            state.save_edits()?;
            print_schedule(&state)?;
        }
        Commands::Export { out } => {
            let csv = state.export_csv()?;
            match out {
                Some(path) => {
                    fs::write(&path, csv).map_err(shift_planner::error::Error::from)?;
                    info!("Wrote {}", path.display());
                }
                None => print!("{}", csv),
            }
        }
        Commands::Print => {
            for sheet in state.sheets()? {
                println!("{}", sheet.render_text());
            }
        }
    }

    Ok(())
}
