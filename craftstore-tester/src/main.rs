mod reports;
mod runner;
mod scenarios;
mod util;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use runner::{RunDays, ScenarioResult, ScenarioRunner};
use scenarios::{Scenario, list_scenarios};
use util::{iso_day, report_timestamp, split_csv};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Console,
    Json,
    Markdown,
}

#[derive(Debug, Parser)]
#[command(name = "craftstore-tester", version)]
#[command(about = "Automated QA scenarios for the CraftStore storefront logic")]
struct Args {
    /// Scenarios to run (comma-separated, or "all")
    #[arg(long, default_value = "smoke")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Number of iterations per scenario
    #[arg(long, default_value_t = 1)]
    iterations: usize,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_scenarios(&args)? {
        return Ok(());
    }

    announce_banner();

    let start_time = Instant::now();
    let (scenarios, unknown) = expand_scenarios(&args.scenarios);
    for name in &unknown {
        eprintln!("⚠️  Unknown scenario: {}", name.yellow());
    }

    let runner = ScenarioRunner::new(run_days(Utc::now()), args.verbose);
    let results = run_scenarios(&runner, &scenarios, args.iterations).await;

    write_reports(&args, &results, start_time, Utc::now())?;

    if results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }
    Ok(())
}

fn maybe_list_scenarios(args: &Args) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available scenarios:")?;
    for (key, description) in list_scenarios() {
        writeln!(output_target.writer(), "  {key:20} - {description}")?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "🛒 CraftStore Scenario Tester".bright_cyan().bold());
    println!("{}", "=============================".cyan());
}

/// Resolve the scenario list, returning unknown names separately.
fn expand_scenarios(scenarios_arg: &str) -> (Vec<Scenario>, Vec<String>) {
    let mut selected = Vec::new();
    let mut unknown = Vec::new();
    for name in split_csv(scenarios_arg) {
        if name == "all" {
            selected.extend(Scenario::ALL);
        } else if let Some(scenario) = Scenario::from_key(&name) {
            selected.push(scenario);
        } else {
            unknown.push(name);
        }
    }
    let mut seen = Vec::new();
    selected.retain(|s| {
        let fresh = !seen.contains(s);
        seen.push(*s);
        fresh
    });
    (selected, unknown)
}

fn run_days(now: DateTime<Utc>) -> RunDays {
    RunDays {
        today: iso_day(now),
        yesterday: iso_day(now - chrono::Duration::days(1)),
    }
}

async fn run_scenarios(
    runner: &ScenarioRunner,
    scenarios: &[Scenario],
    iterations: usize,
) -> Vec<ScenarioResult> {
    let mut results = Vec::with_capacity(scenarios.len());
    for scenario in scenarios {
        let result = runner.run_scenario(*scenario, iterations).await;
        let label = if result.passed { "✅" } else { "❌" };
        log::info!(
            "{label} {} ({}/{})",
            result.scenario_name,
            result.successful_iterations,
            result.iterations_run
        );
        results.push(result);
    }
    results
}

fn write_reports(
    args: &Args,
    results: &[ScenarioResult],
    start_time: Instant,
    now: DateTime<Utc>,
) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report {
        ReportFormat::Json => {
            if results.is_empty() {
                writeln!(&mut output_target, "[]")?;
            } else {
                reports::generate_json_report(&mut output_target, results)?;
            }
        }
        ReportFormat::Markdown => {
            if results.is_empty() {
                writeln!(
                    &mut output_target,
                    "# CraftStore Scenario Results\n\n_No scenarios executed._"
                )?;
            } else {
                reports::generate_markdown_report(
                    &mut output_target,
                    results,
                    &report_timestamp(now),
                )?;
            }
        }
        ReportFormat::Console => {
            if results.is_empty() {
                writeln!(&mut output_target, "No scenarios executed.")?;
            } else {
                reports::generate_console_report(
                    &mut output_target,
                    results,
                    start_time.elapsed(),
                )?;
            }
            writeln!(&mut output_target)?;
            writeln!(&mut output_target, "🏁 Total time: {:?}", start_time.elapsed())?;
        }
    }

    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn base_args() -> Args {
        Args {
            scenarios: "smoke".to_string(),
            list_scenarios: false,
            iterations: 1,
            report: ReportFormat::Json,
            verbose: false,
            output: None,
        }
    }

    fn temp_path(label: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "craftstore-{label}-{}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        ))
    }

    #[test]
    fn expands_all_keyword_without_duplicates() {
        let (scenarios, unknown) = expand_scenarios("smoke,all");
        assert_eq!(scenarios.len(), Scenario::ALL.len());
        assert_eq!(scenarios[0], Scenario::Smoke);
        assert!(unknown.is_empty());
    }

    #[test]
    fn expand_scenarios_reports_unknown_names() {
        let (scenarios, unknown) = expand_scenarios("free-item, bogus ,smoke");
        assert_eq!(scenarios, vec![Scenario::FreeItem, Scenario::Smoke]);
        assert_eq!(unknown, vec!["bogus".to_string()]);
    }

    #[test]
    fn run_days_are_consecutive() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 0, 30, 0).unwrap();
        let days = run_days(now);
        assert_eq!(days.today, "2025-03-01");
        assert_eq!(days.yesterday, "2025-02-28");
    }

    #[test]
    fn run_scenarios_collects_one_result_each() {
        let runner = ScenarioRunner::new(run_days(Utc::now()), false);
        let results = tokio_test::block_on(run_scenarios(
            &runner,
            &[Scenario::Smoke, Scenario::StatsAggregation],
            1,
        ));
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.passed), "{results:?}");
    }

    #[test]
    fn maybe_list_scenarios_writes_output() {
        let temp = temp_path("scenarios.txt");
        let args = Args {
            list_scenarios: true,
            output: Some(temp.clone()),
            ..base_args()
        };
        assert!(maybe_list_scenarios(&args).unwrap());
        let content = std::fs::read_to_string(temp).unwrap();
        assert!(content.contains("Available scenarios"));
        assert!(content.contains("offline-checkout"));
    }

    #[test]
    fn maybe_list_scenarios_returns_false_when_disabled() {
        assert!(!maybe_list_scenarios(&base_args()).unwrap());
    }

    #[test]
    fn write_reports_emits_empty_json_array() {
        let temp = temp_path("report.json");
        let args = Args {
            output: Some(temp.clone()),
            ..base_args()
        };
        write_reports(&args, &[], Instant::now(), Utc::now()).unwrap();
        let content = std::fs::read_to_string(temp).unwrap();
        assert_eq!(content.trim(), "[]");
    }

    #[test]
    fn write_reports_markdown_empty_results() {
        let temp = temp_path("report.md");
        let args = Args {
            report: ReportFormat::Markdown,
            output: Some(temp.clone()),
            ..base_args()
        };
        write_reports(&args, &[], Instant::now(), Utc::now()).unwrap();
        let content = std::fs::read_to_string(temp).unwrap();
        assert!(content.contains("No scenarios executed"));
    }

    #[test]
    fn write_reports_console_includes_total_time() {
        let temp = temp_path("report.txt");
        let args = Args {
            report: ReportFormat::Console,
            output: Some(temp.clone()),
            ..base_args()
        };
        let runner = ScenarioRunner::new(run_days(Utc::now()), false);
        let results = tokio_test::block_on(run_scenarios(&runner, &[Scenario::AuthForms], 1));
        write_reports(&args, &results, Instant::now(), Utc::now()).unwrap();
        let content = std::fs::read_to_string(temp).unwrap();
        assert!(content.contains("auth-forms"));
        assert!(content.contains("Total time"));
    }

    #[test]
    fn output_target_stdout_writes() {
        let mut target = OutputTarget::new(None).unwrap();
        target.write_all(b"ok").unwrap();
        target.flush().unwrap();
    }
}
