//! `cleandar` command-line front end.
//!
//! # Responsibility
//! - Translate subcommands into journal mutation intents and view queries.
//! - Surface load and save failures as warnings without failing the command.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cleandar_core::db::open_db;
use cleandar_core::{
    export_to_dir, init_logging, AppConfig, Clock, ConfigOverrides, DateKey, DayEdit, DayRecord,
    GridSlot, JournalService, JsonFileSnapshotRepository, PersistError, SnapshotRepository,
    SqliteSnapshotRepository, StorageBackend, SystemClock, TagColor, TaskTab,
};
use log::info;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cleandar")]
#[command(about = "Day-by-day calendar journal")]
#[command(version)]
struct Cli {
    /// Absolute data directory (default: $CLEANDAR_DATA_DIR or ~/.cleandar)
    #[arg(long, global = true)]
    data_dir: Option<String>,

    /// trace|debug|info|warn|error
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// sqlite|json
    #[arg(long, global = true)]
    storage: Option<String>,

    /// Treat this date as today (YYYY-MM-DD)
    #[arg(long, global = true)]
    today: Option<DateKey>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Tag a day with a color and/or note, replacing any previous record
    Mark {
        date: DateKey,
        /// Palette name or #RRGGBB
        #[arg(long)]
        color: Option<TagColor>,
        #[arg(long, default_value = "")]
        note: String,
    },
    /// Remove a day's record
    Clear { date: DateKey },
    /// Flip a day's completion state
    Toggle { date: DateKey },
    /// Print one day's record
    Show { date: DateKey },
    /// List pending or completed tasks
    Tasks {
        #[arg(long, default_value = "pending")]
        tab: TaskTab,
        #[arg(long, default_value = "")]
        query: String,
    },
    /// Search notes and dates across both task lists
    Search { query: String },
    /// Render the year grid
    Grid {
        #[arg(long)]
        year: Option<i32>,
    },
    /// Write a CSV export
    Export {
        /// Target directory (default: <data-dir>/exports)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Replace unreadable saved state with an empty journal
    ResetStorage {
        /// Required; the unreadable state is discarded
        #[arg(long)]
        confirm: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::resolve(&ConfigOverrides {
        data_dir: cli.data_dir.clone(),
        log_level: cli.log_level.clone(),
        storage: cli.storage.clone(),
    })
    .map_err(anyhow::Error::msg)?;

    if let Err(err) = init_logging(config.log_level, config.log_dir()) {
        eprintln!("warning: logging disabled: {err}");
    }

    std::fs::create_dir_all(&config.data_dir).with_context(|| {
        format!(
            "failed to create data directory `{}`",
            config.data_dir.display()
        )
    })?;

    let conn;
    let repo: Box<dyn SnapshotRepository + '_> = match config.storage {
        StorageBackend::Sqlite => {
            conn = open_db(config.storage_path()).context("failed to open journal database")?;
            Box::new(SqliteSnapshotRepository::new(&conn))
        }
        StorageBackend::Json => Box::new(JsonFileSnapshotRepository::new(config.storage_path())),
    };

    let (mut journal, load_error) = JournalService::open(repo, SystemClock);
    if let Some(err) = load_error {
        eprintln!(
            "warning: saved journal could not be read ({err}); starting empty, changes will not \
             be saved until `cleandar reset-storage --confirm`"
        );
    }
    let today = cli.today.unwrap_or_else(|| journal.today());
    info!(
        "event=cli_command module=cli status=start backend={} today={}",
        config.storage, today
    );

    run(cli.command, &mut journal, &today, &config)
}

fn run<R: SnapshotRepository>(
    command: Command,
    journal: &mut JournalService<R, SystemClock>,
    today: &DateKey,
    config: &AppConfig,
) -> Result<()> {
    match command {
        Command::Mark { date, color, note } => {
            let outcome = journal.edit_day(date, color, &note);
            match warn_unsaved(outcome) {
                Some(DayEdit::Saved) => println!("saved {date}"),
                Some(DayEdit::Cleared) => println!("cleared {date} (blank edit)"),
                Some(DayEdit::Unchanged) => println!("nothing to save for {date}"),
                None => {}
            }
        }
        Command::Clear { date } => {
            let existed = journal.get(&date).is_some();
            warn_unsaved(journal.remove(&date));
            if existed {
                println!("cleared {date}");
            } else {
                println!("no record for {date}");
            }
        }
        Command::Toggle { date } => {
            warn_unsaved(journal.toggle_completion(&date));
            match journal.get(&date) {
                Some(record) if record.is_completed() => println!("{date} completed"),
                Some(_) => println!("{date} pending"),
                None => println!("no record for {date}"),
            }
        }
        Command::Show { date } => match journal.get(&date) {
            Some(record) => println!("{}", describe(record)),
            None => println!("no record for {date}"),
        },
        Command::Tasks { tab, query } => {
            let tasks = journal.tasks(today, tab, &query);
            if tasks.is_empty() {
                println!("no {tab} tasks");
            }
            for record in tasks {
                println!("{}", describe(record));
            }
        }
        Command::Search { query } => {
            for record in journal.search(&query) {
                println!("{}", describe(record));
            }
        }
        Command::Grid { year } => {
            let year = year.unwrap_or_else(|| today.year());
            let grid = journal
                .year_grid(year)
                .with_context(|| format!("year {year} is out of range"))?;
            println!("{year}");
            println!("    J F M A M J J A S O N D");
            for (index, row) in grid.rows().enumerate() {
                let cells = row.iter().map(grid_glyph).collect::<Vec<_>>().join(" ");
                println!("{:>2}  {cells}", index + 1);
            }
            println!("legend: # tagged  o noted  . empty");
        }
        Command::Export { out } => {
            let dir = out.unwrap_or_else(|| config.export_dir());
            let path = export_to_dir(&journal.snapshot(), &dir, &journal.clock().now())
                .context("export failed")?;
            println!("exported {}", path.display());
        }
        Command::ResetStorage { confirm } => {
            if !confirm {
                anyhow::bail!("reset-storage discards saved state; pass --confirm to proceed");
            }
            if !journal.is_storage_unreadable() {
                println!("saved journal is readable; nothing to reset");
                return Ok(());
            }
            if warn_unsaved(journal.reset_storage()).is_some() {
                println!("storage reset");
            }
        }
    }
    Ok(())
}

fn warn_unsaved<T>(outcome: Result<T, PersistError>) -> Option<T> {
    match outcome {
        Ok(value) => Some(value),
        Err(err) => {
            eprintln!("warning: {err}");
            None
        }
    }
}

fn describe(record: &DayRecord) -> String {
    let mut line = format!(
        "{} [{}]",
        record.date,
        if record.is_completed() { "x" } else { " " }
    );
    if let Some(color) = &record.color {
        line.push_str(&format!(" {color}"));
    }
    if let Some(note) = record.note.as_deref().filter(|n| !n.is_empty()) {
        line.push_str(&format!(" {note}"));
    }
    if let Some(at) = record.completed_at() {
        line.push_str(&format!(" (done {})", at.format("%Y-%m-%d %H:%M")));
    }
    line
}

fn grid_glyph(slot: &GridSlot<'_>) -> &'static str {
    match slot {
        GridSlot::Missing => " ",
        GridSlot::Day { record: None, .. } => ".",
        slot if slot.is_marked() => "#",
        GridSlot::Day { record: Some(record), .. } if record.is_blank() => ".",
        GridSlot::Day { .. } => "o",
    }
}
