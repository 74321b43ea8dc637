use ckd_core::catalog::{DISCLAIMER, SAFETY_TIPS};
use ckd_core::*;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

const BAR_WIDTH: usize = 20;

#[derive(Parser)]
#[command(name = "ckd")]
#[command(about = "Daily exercise checklist for kidney health", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Treat this date (YYYY-MM-DD) as today instead of the local calendar day
    #[arg(long, global = true)]
    today: Option<DateKey>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show streak, progress and today's checklist (default)
    Status,

    /// Mark an exercise done, or undo it if already done
    Toggle {
        /// Exercise ID (see `ckd list`)
        id: String,

        /// Day to toggle (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<DateKey>,
    },

    /// Show activity for the last 7 days
    Week,

    /// List exercise IDs by phase
    List {
        /// Only show one phase (warm_up, main, cool_down)
        #[arg(long)]
        phase: Option<Phase>,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    ckd_core::logging::init();

    let cli = Cli::parse();

    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let today = cli.today.unwrap_or_else(DateKey::today);
    tracing::debug!("Using data dir {:?}, today is {}", data_dir, today);

    let catalog = default_catalog();
    let errors = catalog.validate();
    if !errors.is_empty() {
        eprintln!("Catalog validation errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::CatalogValidation("Invalid catalog".into()));
    }

    match cli.command {
        Some(Commands::Toggle { id, date }) => {
            cmd_toggle(&data_dir, today, date.unwrap_or(today), &id)
        }
        Some(Commands::Week) => cmd_week(&data_dir, today),
        Some(Commands::List { phase }) => {
            cmd_list(catalog, phase);
            Ok(())
        }
        Some(Commands::Status) | None => cmd_status(&data_dir, today, &config),
    }
}

fn open_tracker(data_dir: &std::path::Path) -> Result<Tracker<JsonFileStorage>> {
    Tracker::open(JsonFileStorage::in_data_dir(data_dir))
}

fn cmd_status(data_dir: &std::path::Path, today: DateKey, config: &Config) -> Result<()> {
    let tracker = open_tracker(data_dir)?;
    let summary = tracker.summary(today);

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  CKD Active · Slow & Steady Wins.");
    println!("╰─────────────────────────────────────────╯");
    println!();
    display_streak(&summary);
    display_progress(&summary);

    for phase in Phase::all() {
        println!();
        println!("{}", phase);
        for exercise in tracker.catalog().by_phase(*phase) {
            let mark = if summary.completed.contains(&exercise.id) {
                "✓"
            } else {
                " "
            };
            println!(
                "  [{}] {:<34} {:<20} {}",
                mark, exercise.label, exercise.duration, exercise.id
            );
        }
    }

    println!();
    display_week(&summary.week);

    if config.display.show_safety_tips {
        println!();
        println!("Safety First");
        for (title, tip) in SAFETY_TIPS {
            println!("  • {}: {}", title, tip);
        }
        println!();
        println!("ℹ Disclaimer: {}", DISCLAIMER);
    }

    println!();
    Ok(())
}

fn cmd_toggle(data_dir: &std::path::Path, today: DateKey, date: DateKey, id: &str) -> Result<()> {
    let mut tracker = open_tracker(data_dir)?;

    let done = match tracker.toggle(date, id) {
        Ok(done) => done,
        Err(Error::UnknownExercise(id)) => {
            eprintln!("Unknown exercise ID: {}. Run `ckd list` to see valid IDs.", id);
            return Err(Error::UnknownExercise(id));
        }
        Err(e) => return Err(e),
    };

    let label = tracker
        .catalog()
        .get(id)
        .map_or(id, |exercise| exercise.label.as_str());

    if done {
        println!("\n✓ {} done for {}", label, date);
    } else {
        println!("\n○ {} unmarked for {}", label, date);
    }

    let summary = tracker.summary(today);
    println!();
    display_streak(&summary);
    display_progress(&summary);
    println!();
    Ok(())
}

fn cmd_week(data_dir: &std::path::Path, today: DateKey) -> Result<()> {
    let tracker = open_tracker(data_dir)?;
    let summary = tracker.summary(today);

    println!();
    display_week(&summary.week);
    println!();
    display_streak(&summary);
    println!();
    Ok(())
}

fn cmd_list(catalog: &Catalog, only: Option<Phase>) {
    for phase in Phase::all() {
        if only.is_some_and(|p| p != *phase) {
            continue;
        }
        println!("{}", phase);
        for exercise in catalog.by_phase(*phase) {
            println!("  {:<18} {}", exercise.id, exercise.label);
        }
    }
}

fn display_streak(summary: &DaySummary) {
    let flame = if summary.streak > 0 { "🔥" } else { "·" };
    println!("  {} {} Day Streak    ({})", flame, summary.streak, summary.date);

    if summary.anchor == StreakAnchor::GraceDay {
        println!("  Log an exercise today to keep your streak going.");
    }
}

fn display_progress(summary: &DaySummary) {
    let filled = usize::from(summary.progress) * BAR_WIDTH / 100;
    println!(
        "  [{}{}] {:>3}%  ({}/{})",
        "█".repeat(filled),
        "░".repeat(BAR_WIDTH - filled),
        summary.progress,
        summary.completed.len().min(summary.total),
        summary.total
    );
}

fn display_week(week: &[DayCell]) {
    println!("Last 7 Days");

    let initials: Vec<String> = week
        .iter()
        .map(|cell| format!(" {} ", cell.date.weekday_initial()))
        .collect();
    println!("  {}", initials.join(""));

    let marks: Vec<String> = week
        .iter()
        .map(|cell| {
            let mark = if cell.has_activity { "✓" } else { "·" };
            if cell.is_today {
                format!("[{}]", mark)
            } else {
                format!(" {} ", mark)
            }
        })
        .collect();
    println!("  {}", marks.join(""));
}
