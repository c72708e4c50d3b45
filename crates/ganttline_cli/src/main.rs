//! Terminal entry point for Ganttline.
//!
//! # Responsibility
//! - Edit the stored plan one command at a time.
//! - Render the plan against a month window as a text timeline.
//!
//! # Invariants
//! - Destructive commands run only with `--yes`.
//! - Every edit goes through `PlanService`, so it is persisted immediately.

mod render;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use ganttline_core::db::open_db;
use ganttline_core::{
    default_log_level, encode_plan, generate_window, init_logging, normalize_hex_color,
    PlanService, SqlitePlanRepository, SystemClock, TaskPatch,
};
use log::info;
use std::path::PathBuf;
use std::process::ExitCode;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "ganttline")]
#[command(about = "Local timeline planner: phases, tasks and a month grid")]
struct Cli {
    /// SQLite file holding the plan snapshot.
    #[arg(long, global = true, default_value = "ganttline.sqlite3")]
    db: PathBuf,
    /// Absolute directory for rolling log files; logging is off when unset.
    #[arg(long, global = true)]
    log_dir: Option<String>,
    #[arg(long, global = true)]
    log_level: Option<String>,
    /// Number of visible months, starting at the current month.
    #[arg(long, global = true, default_value_t = 2)]
    months: usize,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Prints core linkage information.
    Ping,
    /// Prints the stored plan as JSON.
    Show,
    /// Draws the plan as a text timeline.
    Render {
        /// Characters per day column (1 to 16).
        #[arg(long, default_value_t = 1)]
        scale: usize,
    },
    AddPhase,
    AddTask {
        #[arg(long)]
        phase: Uuid,
    },
    RenamePhase {
        #[arg(long)]
        phase: Uuid,
        #[arg(long)]
        name: String,
    },
    RecolorPhase {
        #[arg(long)]
        phase: Uuid,
        /// `#RGB` or `#RRGGBB`.
        #[arg(long)]
        color: String,
    },
    UpdateTask {
        #[arg(long)]
        phase: Uuid,
        #[arg(long)]
        task: Uuid,
        #[arg(long)]
        name: Option<String>,
        /// `YYYY-MM-DD`.
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Raw duration text; non-numeric input is stored as not-a-number.
        #[arg(long)]
        duration: Option<String>,
    },
    RemovePhase {
        #[arg(long)]
        phase: Uuid,
        /// Confirms deleting the phase and all of its tasks.
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
    RemoveTask {
        #[arg(long)]
        phase: Uuid,
        #[arg(long)]
        task: Uuid,
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir)?;
    }

    if let Command::Ping = cli.command {
        println!("ganttline_core ping={}", ganttline_core::ping());
        println!("ganttline_core version={}", ganttline_core::core_version());
        return Ok(());
    }

    let conn = open_db(&cli.db).map_err(|err| format!("failed to open `{}`: {err}", cli.db.display()))?;
    let mut service = PlanService::new(SqlitePlanRepository::new(&conn), SystemClock);

    match cli.command {
        Command::Ping => {}
        Command::Show => {
            let json = encode_plan(service.plan()).map_err(|err| err.to_string())?;
            println!("{json}");
        }
        Command::Render { scale } => {
            let window = generate_window(&SystemClock, cli.months);
            print!("{}", render::render_timeline(&window, service.plan(), scale));
        }
        Command::AddPhase => {
            let phase_id = service.add_phase().map_err(|err| err.to_string())?;
            println!("{phase_id}");
        }
        Command::AddTask { phase } => match service.add_task(phase).map_err(|err| err.to_string())? {
            Some(task_id) => println!("{task_id}"),
            None => println!("no phase {phase}; nothing added"),
        },
        Command::RenamePhase { phase, name } => {
            service
                .rename_phase(phase, name)
                .map_err(|err| err.to_string())?;
        }
        Command::RecolorPhase { phase, color } => {
            let normalized =
                normalize_hex_color(&color).ok_or_else(|| format!("invalid color `{color}`"))?;
            service
                .recolor_phase(phase, normalized)
                .map_err(|err| err.to_string())?;
        }
        Command::UpdateTask {
            phase,
            task,
            name,
            start,
            duration,
        } => {
            let mut patch = TaskPatch::default();
            if let Some(name) = name {
                patch = patch.with_name(name);
            }
            if let Some(start) = start {
                patch = patch.with_start_date(start);
            }
            if let Some(raw) = duration.as_deref() {
                patch = patch.with_duration_text(raw);
            }
            if patch.is_empty() {
                return Err("update-task needs at least one of --name, --start, --duration".into());
            }
            service
                .update_task(phase, task, &patch)
                .map_err(|err| err.to_string())?;
        }
        Command::RemovePhase { phase, yes } => {
            confirm(yes, "remove-phase")?;
            service.remove_phase(phase).map_err(|err| err.to_string())?;
        }
        Command::RemoveTask { phase, task, yes } => {
            confirm(yes, "remove-task")?;
            service
                .remove_task(phase, task)
                .map_err(|err| err.to_string())?;
        }
    }

    info!(
        "event=cli_command module=cli status=ok phases={} tasks={}",
        service.plan().len(),
        service.plan().task_count()
    );
    Ok(())
}

fn confirm(yes: bool, command: &str) -> Result<(), String> {
    if yes {
        Ok(())
    } else {
        Err(format!("{command} deletes data; re-run with --yes to confirm"))
    }
}
