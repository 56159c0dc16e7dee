//! CLI entry point for the campus portal.
//!
//! Provides subcommands for the dashboard, GPA and attendance summaries,
//! filtered listings of every record type, and CSV export.

use anyhow::{Result, bail};
use campus_portal::aggregators::AttendanceSummary;
use campus_portal::config::{BackendKind, PortalConfig};
use campus_portal::filters::announcements::{AnnouncementFilter, CourseScope};
use campus_portal::filters::courses::{CourseQuery, CourseSort};
use campus_portal::filters::grades::{GradeQuery, GradeSort};
use campus_portal::filters::{assignments::upcoming, attendance};
use campus_portal::models::{EnrollmentStatus, Priority, RecordId};
use campus_portal::output::{OutputFormat, render, write_csv};
use campus_portal::portal::{Portal, or_empty};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::ffi::OsStr;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "campus_portal")]
#[command(about = "Courses, grades, attendance and announcements for a student portal", long_about = None)]
struct Cli {
    /// Record backend, overrides PORTAL_BACKEND
    #[arg(long, global = true, value_enum)]
    backend: Option<BackendKind>,

    /// Directory holding the JSON fixture files, overrides PORTAL_FIXTURES_DIR
    #[arg(long, global = true)]
    fixtures_dir: Option<PathBuf>,

    /// Disable the simulated network delay of the fixture backend
    #[arg(long, global = true, default_value_t = false)]
    no_latency: bool,

    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Pretty)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// GPA, attendance, upcoming work and recent announcements at a glance
    Dashboard,
    /// Credit-weighted GPA with a per-course breakdown
    Gpa,
    /// Attendance summary, per-course breakdown or records in a date range
    Attendance {
        #[arg(long)]
        course: Option<RecordId>,

        /// Show one summary per course
        #[arg(long, default_value_t = false, conflicts_with_all = ["from", "to", "recent"])]
        by_course: bool,

        /// First day of the range (YYYY-MM-DD)
        #[arg(long, requires = "to")]
        from: Option<NaiveDate>,

        /// Last day of the range (YYYY-MM-DD)
        #[arg(long, requires = "from")]
        to: Option<NaiveDate>,

        /// Show the N most recent records
        #[arg(long)]
        recent: Option<usize>,
    },
    /// List courses
    Courses {
        /// Matched against name, code and professor
        #[arg(short, long)]
        query: Option<String>,

        #[arg(long)]
        department: Option<String>,

        #[arg(long, value_enum)]
        status: Option<EnrollmentStatus>,

        #[arg(long, value_enum)]
        sort: Option<CourseSort>,
    },
    /// List grades
    Grades {
        #[arg(long)]
        course: Option<RecordId>,

        #[arg(long, value_enum, default_value_t = GradeSort::Recent)]
        sort: GradeSort,

        /// Keep only the first N rows after sorting
        #[arg(long)]
        limit: Option<usize>,
    },
    /// List announcements, newest first
    Announcements {
        /// Matched against title, content and author
        #[arg(short, long)]
        query: Option<String>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long, value_enum)]
        priority: Option<Priority>,

        /// A course id (general announcements included) or "general"
        #[arg(long, value_parser = parse_scope)]
        course: Option<CourseScope>,

        /// Keep only the N newest
        #[arg(long)]
        recent: Option<usize>,
    },
    /// List assignments
    Assignments {
        #[arg(long)]
        course: Option<RecordId>,

        /// Only assignments that are due later and not yet submitted
        #[arg(long, default_value_t = false)]
        upcoming: bool,
    },
    /// Mark an assignment as submitted
    Submit {
        #[arg(value_name = "ASSIGNMENT_ID")]
        id: RecordId,
    },
    /// Export a record collection to CSV
    Export {
        #[arg(value_enum)]
        table: ExportTable,

        /// CSV file to write
        #[arg(short, long)]
        output: PathBuf,

        /// Append rows instead of replacing the file
        #[arg(long, default_value_t = false)]
        append: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ExportTable {
    Courses,
    Grades,
    Attendance,
    Announcements,
    Assignments,
}

fn parse_scope(value: &str) -> Result<CourseScope, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "general" => Ok(CourseScope::General),
        "any" | "all" => Ok(CourseScope::Any),
        other => other
            .parse::<RecordId>()
            .map(CourseScope::Course)
            .map_err(|_| format!("expected a course id or 'general', got '{value}'")),
    }
}

fn print<T: Serialize + Debug>(value: &T, format: OutputFormat) -> Result<()> {
    println!("{}", render(value, format)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/campus_portal.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("campus_portal.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let mut config = PortalConfig::from_env()?;
    if let Some(backend) = cli.backend {
        config.backend = backend;
    }
    if let Some(dir) = cli.fixtures_dir {
        config.fixtures_dir = dir;
    }
    if cli.no_latency {
        config.latency = None;
    }

    let portal = Portal::from_config(&config)?;
    let format = cli.format;

    match cli.command {
        Commands::Dashboard => print(&portal.dashboard(Utc::now()).await, format)?,
        Commands::Gpa => print(&portal.gpa_report().await, format)?,
        Commands::Attendance {
            course,
            by_course,
            from,
            to,
            recent,
        } => {
            if by_course {
                print(&portal.attendance_by_course().await, format)?;
            } else if let (Some(from), Some(to)) = (from, to) {
                if from > to {
                    bail!("--from {from} is after --to {to}");
                }
                let records = or_empty(
                    portal.attendance.get_by_date_range(from, to, course).await,
                    "attendance",
                );
                print(&records, format)?;
            } else if let Some(limit) = recent {
                let records = match course {
                    Some(id) => portal.attendance.get_by_course(id).await,
                    None => portal.attendance.get_all().await,
                };
                print(&attendance::recent(&or_empty(records, "attendance"), limit), format)?;
            } else {
                let summary = portal.attendance.stats(course).await.unwrap_or_else(|e| {
                    error!(error = %e, collection = "attendance", "Failed to load data");
                    AttendanceSummary::default()
                });
                print(&summary, format)?;
            }
        }
        Commands::Courses {
            query,
            department,
            status,
            sort,
        } => {
            let courses = or_empty(portal.courses.get_all().await, "courses");
            let filter = CourseQuery {
                text: query,
                department,
                status,
                sort: Some(sort.unwrap_or_default()),
            };
            print(&filter.apply(&courses), format)?;
        }
        Commands::Grades {
            course,
            sort,
            limit,
        } => {
            let (grades, courses) = tokio::join!(portal.grades.get_all(), portal.courses.get_all());
            let mut grades = GradeQuery { course, sort }.apply(
                &or_empty(grades, "grades"),
                &or_empty(courses, "courses"),
            );
            if let Some(limit) = limit {
                grades.truncate(limit);
            }
            print(&grades, format)?;
        }
        Commands::Announcements {
            query,
            category,
            priority,
            course,
            recent,
        } => {
            let filter = AnnouncementFilter {
                text: None,
                category,
                priority,
                scope: course.unwrap_or_default(),
            };
            let mut announcements = or_empty(
                portal
                    .announcements
                    .search(query.as_deref().unwrap_or_default(), filter)
                    .await,
                "announcements",
            );
            if let Some(limit) = recent {
                announcements.truncate(limit);
            }
            print(&announcements, format)?;
        }
        Commands::Assignments { course, upcoming: only_upcoming } => {
            let assignments = match course {
                Some(id) => portal.assignments.get_by_course(id).await,
                None => portal.assignments.get_all().await,
            };
            let mut assignments = or_empty(assignments, "assignments");
            if only_upcoming {
                assignments = upcoming(&assignments, Utc::now());
            }
            print(&assignments, format)?;
        }
        Commands::Submit { id } => match portal.assignments.submit(id).await? {
            Some(assignment) => print(&assignment, format)?,
            None => bail!("no assignment with id {id}"),
        },
        Commands::Export {
            table,
            output,
            append,
        } => {
            let rows = match table {
                ExportTable::Courses => write_csv(&output, &portal.courses.get_all().await?, append)?,
                ExportTable::Grades => write_csv(&output, &portal.grades.get_all().await?, append)?,
                ExportTable::Attendance => {
                    write_csv(&output, &portal.attendance.get_all().await?, append)?
                }
                ExportTable::Announcements => {
                    write_csv(&output, &portal.announcements.get_all().await?, append)?
                }
                ExportTable::Assignments => {
                    write_csv(&output, &portal.assignments.get_all().await?, append)?
                }
            };
            info!(?table, rows, path = %output.display(), "Export complete");
        }
    }

    Ok(())
}
