use clap::{Parser, Subcommand, ValueEnum};
use mindful_core::analytics::{self, MoodTrend};
use mindful_core::inference::{engine_from_config, InferenceEngine};
use mindful_core::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mindful")]
#[command(about = "Wellness journal, streaks and recommendations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// User to act for (defaults to the configured user)
    #[arg(long, global = true)]
    user: Option<u32>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a journal entry
    Journal {
        /// Mood score (1-10)
        #[arg(long, value_parser = clap::value_parser!(i32).range(1..=10))]
        mood: i32,

        /// Stress level (1-10)
        #[arg(long, value_parser = clap::value_parser!(i32).range(1..=10))]
        stress: i32,

        /// Hours slept last night (0-24)
        #[arg(long)]
        sleep: f64,

        /// Free-text note
        #[arg(long, default_value = "")]
        content: String,
    },

    /// Log a meditation session
    Meditate {
        /// Duration in minutes (1-120)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=120))]
        minutes: u32,

        /// Quality rating (1-5)
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
        quality: u8,

        /// Meditation type
        #[arg(long, default_value = "Breathing")]
        kind: String,
    },

    /// Show current and best streak
    Streak {
        #[arg(long, value_enum, default_value_t = StreakKind::Journal)]
        kind: StreakKind,
    },

    /// Show overall averages
    Stats,

    /// Print the weekly wellness report
    Weekly,

    /// Classify a mood change (defaults to this week against last week)
    Trend {
        #[arg(long, requires = "previous")]
        current: Option<f64>,

        #[arg(long, requires = "current")]
        previous: Option<f64>,
    },

    /// Recommend an activity based on the latest journal entry
    Recommend {
        /// Skip the external inference process
        #[arg(long)]
        no_external: bool,

        /// Also list every history-aware recommendation
        #[arg(long)]
        all: bool,
    },

    /// Export journal entries to CSV
    Export {
        #[arg(long)]
        out: PathBuf,
    },

    /// Grounding exercise and breathing pace
    Calm {
        /// Breaths per minute
        #[arg(long, default_value_t = mindful_core::calm::DEFAULT_BREATHS_PER_MINUTE)]
        bpm: i32,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum StreakKind {
    Journal,
    Meditation,
}

impl From<StreakKind> for ActivityKind {
    fn from(kind: StreakKind) -> Self {
        match kind {
            StreakKind::Journal => ActivityKind::Journal,
            StreakKind::Meditation => ActivityKind::Meditation,
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    mindful_core::logging::init();

    let cli = Cli::parse();

    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let user = cli.user.map(UserId).unwrap_or(config.user.default_user_id);
    let store = JsonlStore::new(&data_dir);

    match cli.command {
        Commands::Journal {
            mood,
            stress,
            sleep,
            content,
        } => cmd_journal(&store, user, mood, stress, sleep, content),
        Commands::Meditate {
            minutes,
            quality,
            kind,
        } => cmd_meditate(&store, user, minutes, quality, kind),
        Commands::Streak { kind } => {
            let insights = Insights::new(store, DisabledInference, SystemClock);
            cmd_streak(&insights, user, kind.into())
        }
        Commands::Stats => {
            let insights = Insights::new(store, DisabledInference, SystemClock);
            cmd_stats(&insights, user)
        }
        Commands::Weekly => {
            let insights = Insights::new(store, DisabledInference, SystemClock);
            println!("{}", insights.weekly_report(user)?);
            Ok(())
        }
        Commands::Trend { current, previous } => {
            let trend = match (current, previous) {
                (Some(current), Some(previous)) => analytics::mood_trend(current, previous),
                _ => Insights::new(store, DisabledInference, SystemClock).weekly_mood_trend(user)?,
            };
            print_trend(trend);
            Ok(())
        }
        Commands::Recommend { no_external, all } => {
            let engine: Box<dyn InferenceEngine> = if no_external {
                Box::new(DisabledInference)
            } else {
                engine_from_config(&config.inference)
            };
            let insights = Insights::new(store, engine, SystemClock);
            cmd_recommend(&insights, user, all)
        }
        Commands::Export { out } => {
            let entries = store.journal_entries(user)?;
            let count = export_journal_csv(&entries, &out)?;
            println!("✓ Exported {} journal entries", count);
            println!("  CSV: {}", out.display());
            Ok(())
        }
        Commands::Calm { bpm } => {
            cmd_calm(bpm);
            Ok(())
        }
    }
}

fn cmd_journal(
    store: &JsonlStore,
    user: UserId,
    mood: i32,
    stress: i32,
    sleep: f64,
    content: String,
) -> Result<()> {
    let entry = JournalEntry::new(user, chrono::Utc::now(), content, mood, stress, sleep)?;
    store.append_journal_entry(&entry)?;

    println!("✓ Journal entry logged!");
    println!("  Mood: {}/10 ({})", entry.mood, entry.mood_description());
    Ok(())
}

fn cmd_meditate(
    store: &JsonlStore,
    user: UserId,
    minutes: u32,
    quality: u8,
    kind: String,
) -> Result<()> {
    let session = MeditationSession::new(user, chrono::Utc::now(), minutes, kind, quality)?;
    store.append_meditation_session(&session)?;

    println!("✓ Meditation session logged!");
    println!("  {} for {} min", session.kind, session.duration_minutes);
    Ok(())
}

fn cmd_streak<I: InferenceEngine>(
    insights: &Insights<JsonlStore, I, SystemClock>,
    user: UserId,
    kind: ActivityKind,
) -> Result<()> {
    let streak = insights.compute_streak(user, kind)?;

    println!("Current streak: {} day(s)", streak.current);
    println!("Best streak:    {} day(s)", streak.best);
    match streak.last_activity {
        Some(at) => println!(
            "Last activity:  {}",
            at.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M")
        ),
        None => println!("Last activity:  never"),
    }
    Ok(())
}

fn cmd_stats<I: InferenceEngine>(
    insights: &Insights<JsonlStore, I, SystemClock>,
    user: UserId,
) -> Result<()> {
    let stats = insights.compute_analytics(user)?;

    println!("Average Mood:   {:.1}/10", stats.average_mood);
    println!("Average Sleep:  {:.1} hours", stats.average_sleep);
    println!("Total Entries:  {}", stats.total_entries);
    Ok(())
}

fn cmd_recommend<I: InferenceEngine>(
    insights: &Insights<JsonlStore, I, SystemClock>,
    user: UserId,
    all: bool,
) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let recommendation = runtime.block_on(insights.resolve_recommendation(user))?;
    tracing::debug!("Recommendation source: {:?}", recommendation.source);

    println!("💡 {}", recommendation);

    if all {
        for extra in insights.history_recommendations(user)? {
            println!("  → {}", extra);
        }
    }
    Ok(())
}

fn print_trend(trend: MoodTrend) {
    println!("Mood trend: {}", trend);
}

fn cmd_calm(bpm: i32) {
    println!("Grounding (5-4-3-2-1):");
    for (i, step) in mindful_core::calm::GROUNDING_STEPS.iter().enumerate() {
        println!("  {}. {}", i + 1, step);
    }
    println!();
    println!(
        "Breathe at {} ms per breath.",
        mindful_core::calm::millis_per_breath(bpm)
    );
    for phrase in mindful_core::calm::CALMING_PHRASES {
        println!("  {}", phrase);
    }
}
