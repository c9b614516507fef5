use chrono::{NaiveDate, Utc};
use clap::Parser;
use okr_score::analyze::checkin::CheckinAnalyzer;
use okr_score::analyze::{self, RunSettings};
use okr_score::error::OkrError;
use okr_score::report::points::PointsTable;
use okr_score::store::{JsonFileSnapshotStore, SnapshotKey, SnapshotStore};
use okr_score::types::window::DateWindow;
use okr_score::{cli, config, logging, report, sources};

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const WARNINGS: i32 = 1;
    pub const INVALID_INPUT: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn run(cli: cli::Cli) -> Result<i32, OkrError> {
    let today = Utc::now().date_naive();
    match cli.command {
        cli::Commands::Score(cmd) => {
            let window = DateWindow::resolve(cmd.window.start, cmd.window.end, today)?;
            let run = config::resolve(
                &cmd.data_dir,
                &config::Overrides {
                    store: cmd.store.clone(),
                },
            )?;
            let cfg = &run.config;

            let settings = RunSettings {
                window,
                as_of: cmd.as_of.unwrap_or(today),
                min_distinct_weeks: cfg.min_distinct_weeks(),
            };
            tracing::info!(
                start = %settings.window.start,
                end = %settings.window.end,
                as_of = %settings.as_of,
                store = %run.store_path.display(),
                "starting scoring run"
            );

            let (records, warnings) = sources::load(&run.data_dir, &cfg.source_files());
            let store = JsonFileSnapshotStore::new(run.store_path.clone());
            let run_report = analyze::evaluate(&records, &settings, &store, warnings);

            let output_format = match cmd.format {
                cli::ReportFormat::Json => report::OutputFormat::Json,
                cli::ReportFormat::Md => report::OutputFormat::Md,
            };
            let points = PointsTable::from_config(cfg.movement_points());
            let rendered = report::render(&run_report, output_format, &points)?;
            println!("{rendered}");

            if run_report.warnings.is_empty() {
                Ok(exit_code::SUCCESS)
            } else {
                Ok(exit_code::WARNINGS)
            }
        }
        cli::Commands::Checkins(cmd) => {
            let window = DateWindow::resolve(cmd.window.start, cmd.window.end, today)?;
            let run = config::resolve(&cmd.data_dir, &config::Overrides::default())?;
            let cfg = &run.config;
            let (records, warnings) = sources::load(&run.data_dir, &cfg.source_files());

            let users =
                analyze::aggregate::aggregate_users(&records.accounts, &records.key_results);
            let analyzer = CheckinAnalyzer::new(&records.checkins, cfg.min_distinct_weeks());

            println!(
                "check-ins {} to {} (need {} distinct weeks):",
                format_day(window.start),
                format_day(window.end),
                cfg.min_distinct_weeks()
            );
            if users.is_empty() {
                println!("- no users");
            }
            for user in users.values() {
                let weeks = analyzer.distinct_weeks(&user.user_id, &window);
                let verdict = if analyzer.has_weekly_checkins(&user.user_id, &window) {
                    "pass"
                } else {
                    "fail"
                };
                println!(
                    "- {} ({}): {} week(s) [{}]",
                    user.name, user.user_id, weeks, verdict
                );
            }

            if warnings.is_empty() {
                Ok(exit_code::SUCCESS)
            } else {
                Ok(exit_code::WARNINGS)
            }
        }
        cli::Commands::Snapshot(cli::SnapshotCommand::Get(args)) => {
            let key = SnapshotKey::new(args.user_id, args.year, args.month)?;
            let store = JsonFileSnapshotStore::new(args.store);
            match store.get(&key)? {
                Some(value) => println!(
                    "{} {}-{:02}: {}",
                    key.user_id, key.year, key.month, value
                ),
                None => println!("{} {}-{:02}: absent", key.user_id, key.year, key.month),
            }
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Snapshot(cli::SnapshotCommand::Set(args)) => {
            let key = SnapshotKey::new(args.user_id, args.year, args.month)?;
            let store = JsonFileSnapshotStore::new(args.store);
            store.upsert(&key, args.value)?;
            println!(
                "saved {} {}-{:02} = {}",
                key.user_id, key.year, key.month, args.value
            );
            Ok(exit_code::SUCCESS)
        }
    }
}

fn format_day(day: NaiveDate) -> String {
    day.format("%d/%m/%Y").to_string()
}

fn main() {
    let cli = cli::Cli::parse();
    logging::init(cli.verbose, cli.quiet);
    match run(cli) {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            if e.is_invalid_input() {
                std::process::exit(exit_code::INVALID_INPUT);
            }
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
