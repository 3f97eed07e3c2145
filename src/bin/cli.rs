//! Contest Hive CLI
//!
//! Local execution entry point.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use clap::{Parser, Subcommand};
use contest_hive::{
    error::{AppError, Result},
    models::{Config, FilterOptions, Platform},
    pipeline::{
        Action, AdminView, ContestCard, Controller, CountdownRefresher, NotificationLevel,
        PlatformSelection,
    },
    services::ContestAggregator,
    storage::LocalStorage,
    utils::{time, url::VideoUrlMatcher},
};

/// Contest Hive - Programming Contest Aggregator
#[derive(Parser, Debug)]
#[command(
    name = "contest-hive",
    version,
    about = "Upcoming and past contests from Codeforces, CodeChef and LeetCode"
)]
struct Cli {
    /// Path to storage directory containing config and bookmarks
    #[arg(short, long, default_value = "storage")]
    storage_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Use built-in sample contests instead of the live APIs
    #[arg(long, global = true)]
    mock: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List contests, upcoming first
    List {
        /// Only show these platforms (codeforces, codechef, leetcode)
        #[arg(short, long = "platform")]
        platforms: Vec<Platform>,

        /// Hide upcoming contests
        #[arg(long)]
        no_upcoming: bool,

        /// Hide past contests
        #[arg(long)]
        no_past: bool,

        /// Only show bookmarked contests
        #[arg(long)]
        bookmarked: bool,

        /// Print the listing as JSON
        #[arg(long)]
        json: bool,
    },

    /// Toggle the bookmark on a contest ID, e.g. cf-2050
    Bookmark { id: String },

    /// Show bookmarked contests
    Bookmarks,

    /// Review past contests and attach solution links
    Admin {
        /// Platform to show, or "all"
        #[arg(short, long, default_value = "all")]
        platform: PlatformSelection,

        /// Contest to attach a solution link to
        #[arg(long, requires = "url")]
        contest: Option<String>,

        /// Solution video link
        #[arg(long, requires = "contest")]
        url: Option<String>,
    },

    /// Keep countdowns of upcoming contests refreshed until Ctrl-C
    Watch,

    /// Validate configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn build_aggregator(config: &Config, mock: bool) -> Result<Arc<ContestAggregator>> {
    let aggregator = if mock {
        log::info!("Using sample contests");
        ContestAggregator::mock(
            Utc::now(),
            Duration::from_secs(config.fetcher.timeout_secs),
        )
    } else {
        ContestAggregator::from_config(config)?
    };
    Ok(Arc::new(aggregator))
}

fn print_cards(cards: &[ContestCard]) {
    if cards.is_empty() {
        println!("No contests found. Try adjusting your filters.");
        return;
    }

    for card in cards {
        let contest = &card.contest;
        let marker = if card.bookmarked { "*" } else { " " };
        let timing = card.time_remaining.as_deref().unwrap_or("");
        println!(
            "{marker} [{:<10}] {:<9} {:<40} {}  ({})  {}",
            contest.platform.display_name(),
            card.status.to_string(),
            contest.name,
            card.start_label,
            card.duration_label,
            timing,
        );
        println!("    {}  id={}", contest.url, contest.id);
        if card.shows_solution() {
            if let Some(solution) = &contest.solution_url {
                println!("    solution: {solution}");
            }
        }
    }
}

fn report_notifications<S>(controller: &Controller<S>)
where
    S: contest_hive::storage::BookmarkStorage,
{
    for notification in &controller.state().notifications {
        match notification.level {
            NotificationLevel::Info => {
                log::info!("{}: {}", notification.title, notification.message)
            }
            NotificationLevel::Error => {
                log::error!("{}: {}", notification.title, notification.message)
            }
        }
    }
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    log::debug!("Contest Hive starting...");

    let config_path = cli.storage_dir.join("config.toml");
    let config = Config::load_or_default(&config_path);

    let storage = LocalStorage::with_bookmarks_key(&cli.storage_dir, &config.storage.bookmarks_file);
    log::debug!("Bookmarks at {}", config.bookmarks_path(&cli.storage_dir).display());

    match cli.command {
        Command::List {
            platforms,
            no_upcoming,
            no_past,
            bookmarked,
            json,
        } => {
            let mut controller = Controller::start(storage).await?;
            controller.load(build_aggregator(&config, cli.mock)?).await?;
            report_notifications(&controller);

            let mut filters = FilterOptions {
                show_upcoming: !no_upcoming,
                show_past: !no_past,
                bookmarked_only: bookmarked,
                ..FilterOptions::default()
            };
            if !platforms.is_empty() {
                filters = filters.with_platforms(platforms);
            }
            controller.dispatch(Action::SetFilters(filters), Utc::now()).await?;

            let cards = controller.state().view(Utc::now());
            if json {
                println!("{}", serde_json::to_string_pretty(&cards)?);
            } else {
                let active = controller.state().filters.active_count();
                if active > 0 {
                    println!("{active} filter(s) active");
                }
                print_cards(&cards);
            }
        }

        Command::Bookmark { id } => {
            let mut controller = Controller::start(storage).await?;
            controller
                .dispatch(Action::ToggleBookmark(id), Utc::now())
                .await?;
            report_notifications(&controller);
        }

        Command::Bookmarks => {
            let mut controller = Controller::start(storage).await?;
            if controller.state().bookmarks.is_empty() {
                println!("No bookmarks yet. Use `contest-hive bookmark <id>` to add one.");
                return Ok(());
            }

            controller.load(build_aggregator(&config, cli.mock)?).await?;
            let filters = FilterOptions {
                bookmarked_only: true,
                ..FilterOptions::default()
            };
            controller.dispatch(Action::SetFilters(filters), Utc::now()).await?;

            let state = controller.state();
            let cards = state.view(Utc::now());
            print_cards(&cards);

            for id in state.bookmarks.ids() {
                if !state.contests.iter().any(|c| &c.id == id) {
                    log::warn!("Bookmarked contest {id} is no longer listed by its platform");
                }
            }
        }

        Command::Admin {
            platform,
            contest,
            url,
        } => {
            let aggregator = build_aggregator(&config, cli.mock)?;
            let report = aggregator.fetch_with_report().await;
            if report.failure_count() > 0 {
                log::warn!(
                    "{} of {} sources failed, listing may be incomplete",
                    report.failure_count(),
                    report.sources.len()
                );
            }
            let contests = report.contests;
            let matcher = VideoUrlMatcher::new(&config.admin.video_hosts)?;

            let mut view = AdminView::from_contests(&contests, Utc::now(), matcher).select(platform);

            if contest.is_some() || url.is_some() {
                view = match view.submit_solution(contest.as_deref(), url.as_deref()) {
                    Ok(updated) => {
                        log::info!("Solution link added successfully.");
                        updated
                    }
                    Err(e) => {
                        log::error!("{e}");
                        return Err(e);
                    }
                };
            }

            println!("Past contests ({})", view.selection());
            for row in view.visible() {
                let solution = row.contest.solution_url.as_deref().unwrap_or("No solution");
                println!(
                    "  {:<24} {:<40} {}  {}",
                    row.contest.id,
                    row.contest.name,
                    time::format_date(row.contest.end_time),
                    solution,
                );
            }
        }

        Command::Watch => {
            let mut controller = Controller::start(storage).await?;
            controller.load(build_aggregator(&config, cli.mock)?).await?;
            report_notifications(&controller);

            let now = Utc::now();
            let targets: Vec<_> = controller
                .state()
                .contests
                .iter()
                .filter(|c| c.is_upcoming(now))
                .map(|c| (c.id.clone(), c.start_time))
                .collect();
            print_cards(&controller.state().view(now));

            let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
            let refresher =
                CountdownRefresher::new(Duration::from_secs(config.refresh.interval_secs));
            let handle = refresher.start(targets, move |labels| {
                let _ = tx.send(labels);
            });

            loop {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {
                        log::info!("Stopping countdowns");
                        break;
                    }
                    tick = rx.recv() => match tick {
                        Some(labels) => {
                            for label in labels {
                                println!("{:<32} {}", label.contest_id, label.label);
                            }
                            println!();
                        }
                        None => break,
                    }
                }
            }
            handle.stop().await;
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            VideoUrlMatcher::new(&config.admin.video_hosts)
                .map_err(|e| AppError::validation(format!("admin.video_hosts: {e}")))?;
            log::info!("✓ Config OK (fetcher, sources, storage, refresh and admin)");

            log::info!("All validations passed!");
        }
    }

    Ok(())
}
