//! Maintenance CLI for the workout database.
//!
//! Thin wrapper over the repository layer, useful for inspecting and
//! repairing a database file outside the app.

use clap::{Parser, Subcommand};
use miette::Result;
use tracing_subscriber::EnvFilter;

use crate::db::{
    CollectionRepository, Database, ExerciseRepository, HistoryRepository, SplitRepository,
    SqliteDatabase,
};
use crate::units::format_weight;

#[derive(Parser)]
#[command(name = "unord")]
#[command(author, version, about = "Workout database CLI", long_about = None)]
pub struct Cli {
    /// Database file (default: UNORDINARY_DB env or unordinary.db)
    #[arg(long, global = true)]
    pub db: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split management commands
    Split {
        #[command(subcommand)]
        command: SplitCommands,
    },
    /// Exercise management commands
    Exercise {
        #[command(subcommand)]
        command: ExerciseCommands,
    },
    /// Collection management commands
    Collection {
        #[command(subcommand)]
        command: CollectionCommands,
    },
    /// Workout history commands
    History {
        #[command(subcommand)]
        command: HistoryCommands,
    },
    /// Drop and recreate all tables (destructive)
    Reset {
        /// Confirm the irreversible wipe
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum SplitCommands {
    /// List splits in display order
    List,
    /// Create a split
    Add { name: String },
    /// Show a split with its days and exercises
    Show { id: i64 },
    /// Make a split the default
    SetDefault { id: i64 },
    /// Toggle a split's favorite flag
    Favorite { id: i64 },
    /// Delete a split and its days
    Delete { id: i64 },
}

#[derive(Subcommand)]
enum ExerciseCommands {
    /// List exercises
    List,
    /// Create an exercise
    Add { name: String },
}

#[derive(Subcommand)]
enum CollectionCommands {
    /// List collections
    List,
    /// Create a collection
    Add { name: String },
}

#[derive(Subcommand)]
enum HistoryCommands {
    /// Show the logged workout for a date and split
    Show {
        /// Calendar date, YYYY-MM-DD
        date: String,
        /// Split id the workout was logged against
        split_id: i64,
        /// Weekday (0 = Monday .. 6 = Sunday)
        day_of_week: i64,
    },
    /// Delete all logged history
    Clear,
}

fn db_path(cli: &Cli) -> String {
    cli.db
        .clone()
        .or_else(|| std::env::var("UNORDINARY_DB").ok())
        .unwrap_or_else(|| "unordinary.db".to_string())
}

pub async fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let db = SqliteDatabase::open(db_path(&cli)).await?;
    db.migrate().await?;

    match cli.command {
        Commands::Split { command } => match command {
            SplitCommands::List => {
                for split in db.splits().list().await? {
                    let mut flags = String::new();
                    if split.is_default {
                        flags.push_str(" [default]");
                    }
                    if split.is_favorite {
                        flags.push_str(" [favorite]");
                    }
                    println!("{:>4}  {}{}", split.id, split.name, flags);
                }
            }
            SplitCommands::Add { name } => {
                let id = db.splits().add(&name).await?;
                println!("Created split {}", id);
            }
            SplitCommands::Show { id } => {
                let split = db.splits().get_with_days(id).await?;
                println!("{} (#{})", split.name, split.id);
                const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
                for day in &split.days {
                    let label = WEEKDAYS
                        .get(day.day_of_week as usize)
                        .copied()
                        .unwrap_or("???");
                    println!("  {} {}", label, day.name);
                    for exercise in &day.exercises {
                        println!("    {:>2}. {}", exercise.order_index, exercise.name);
                    }
                }
            }
            SplitCommands::SetDefault { id } => {
                if db.splits().set_default(id, true).await? {
                    println!("Split {} is now the default", id);
                } else {
                    println!("No split with id {}", id);
                }
            }
            SplitCommands::Favorite { id } => {
                if db.splits().toggle_favorite(id).await? {
                    println!("Toggled favorite on split {}", id);
                } else {
                    println!("No split with id {}", id);
                }
            }
            SplitCommands::Delete { id } => {
                if db.splits().delete(id).await? {
                    println!("Deleted split {}", id);
                } else {
                    println!("No split with id {}", id);
                }
            }
        },
        Commands::Exercise { command } => match command {
            ExerciseCommands::List => {
                for exercise in db.exercises().list().await? {
                    println!("{:>4}  {}", exercise.id, exercise.name);
                }
            }
            ExerciseCommands::Add { name } => {
                let id = db.exercises().add(&name).await?;
                println!("Created exercise {}", id);
            }
        },
        Commands::Collection { command } => match command {
            CollectionCommands::List => {
                for collection in db.collections().list().await? {
                    println!("{:>4}  {}", collection.id, collection.name);
                }
            }
            CollectionCommands::Add { name } => {
                let id = db.collections().add(&name).await?;
                println!("Created collection {}", id);
            }
        },
        Commands::History { command } => match command {
            HistoryCommands::Show {
                date,
                split_id,
                day_of_week,
            } => match db.history().get(&date, split_id, day_of_week).await? {
                Some(record) => {
                    println!("{} (split {})", record.date, record.split_id);
                    for exercise in &record.exercises {
                        println!("  {}", exercise.name);
                        for set in &exercise.sets {
                            let weight: f64 = set.weight.parse().unwrap_or(0.0);
                            println!(
                                "    {} x {} reps",
                                format_weight(weight, record.use_metric),
                                set.reps
                            );
                        }
                    }
                }
                None => println!("No workout logged for {} on that day", date),
            },
            HistoryCommands::Clear => {
                db.history().clear().await?;
                println!("Cleared workout history");
            }
        },
        Commands::Reset { yes } => {
            if !yes {
                println!("Refusing to wipe the database without --yes");
                return Ok(());
            }
            db.reset().await?;
            println!("Database reset");
        }
    }

    Ok(())
}
