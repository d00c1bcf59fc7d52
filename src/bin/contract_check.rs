use clap::{Arg, ArgAction, Command};
use log::info;
use maps_bridge_contract::{
    IterationDataset, IterationReport, IterationRunner, RecordedTransport, ValidatorConfig,
};
use std::fmt::Write;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = Command::new("contract-check")
        .version(maps_bridge_contract::VERSION)
        .about("Replay a Maps Bridge iteration dataset against recorded responses")
        .arg(
            Arg::new("dataset")
                .short('d')
                .long("dataset")
                .value_name("FILE")
                .help("Iteration data file (JSON array of records)")
                .required(true),
        )
        .arg(
            Arg::new("recordings")
                .short('r')
                .long("recordings")
                .value_name("FILE")
                .help("Recorded responses ([{input, status, latencyMs, body}])")
                .required(true),
        )
        .arg(
            Arg::new("latency-ceiling-ms")
                .long("latency-ceiling-ms")
                .value_name("MS")
                .help("Override the response time ceiling")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .help("Require every provider link to embed the coordinates")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print reports as JSON")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let dataset_path = matches
        .get_one::<String>("dataset")
        .ok_or_else(|| anyhow::anyhow!("--dataset is required"))?;
    let recordings_path = matches
        .get_one::<String>("recordings")
        .ok_or_else(|| anyhow::anyhow!("--recordings is required"))?;

    let mut config = if matches.get_flag("strict") {
        ValidatorConfig::strict()
    } else {
        ValidatorConfig::default()
    };
    if let Some(ceiling) = matches.get_one::<u64>("latency-ceiling-ms") {
        config = config.with_latency_ceiling(Duration::from_millis(*ceiling));
    }

    let dataset = IterationDataset::from_file(dataset_path).await?;
    let transport = RecordedTransport::from_file(recordings_path).await?;
    info!(
        "Replaying {} records against {} recordings",
        dataset.len(),
        transport.len()
    );

    let mut runner = IterationRunner::new(transport, config)?;
    let reports = runner.run_dataset(&dataset).await;

    let json = matches.get_flag("json");
    print!("{}", render_reports(&reports, json)?);

    // Keep stdout a single JSON document in --json mode
    let totals = totals_line(&reports);
    if json {
        eprintln!("{}", totals);
    } else {
        println!("{}", totals);
    }

    if reports.iter().any(|report| !report.passed()) {
        std::process::exit(1);
    }
    Ok(())
}

fn render_reports(reports: &[IterationReport], json: bool) -> anyhow::Result<String> {
    if json {
        return Ok(format!("{}\n", serde_json::to_string_pretty(reports)?));
    }
    Ok(reports.iter().map(format_report).collect())
}

fn totals_line(reports: &[IterationReport]) -> String {
    let failed = reports.iter().filter(|report| !report.passed()).count();
    format!(
        "{} iterations, {} passed, {} failed",
        reports.len(),
        reports.len() - failed,
        failed
    )
}

fn format_report(report: &IterationReport) -> String {
    let mut out = String::new();
    if let Some(reason) = &report.aborted {
        let _ = writeln!(out, "ABORT [{}] {}", report.description, reason);
        return out;
    }
    for entry in &report.entries {
        let label = match (entry.passed, entry.skipped) {
            (false, _) => "FAIL",
            (true, true) => "SKIP",
            (true, false) => "PASS",
        };
        let _ = match &entry.message {
            Some(message) => writeln!(out, "{} {}: {}", label, entry.check_name, message),
            None => writeln!(out, "{} {}", label, entry.check_name),
        };
    }
    for line in &report.log_lines {
        let _ = writeln!(out, "    {}", line);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use maps_bridge_contract::{CheckResult, ContractError, Reporter};

    fn sample_reports() -> Vec<IterationReport> {
        let mut passing = Reporter::new("Eiffel Tower");
        passing.record(CheckResult::pass("Status code is 200"));
        passing.record(CheckResult::skip("Name field validation", "name validation disabled"));

        let mut aborted = Reporter::new("record without input");
        aborted.abort(&ContractError::MissingInput("record without input".to_string()));

        vec![passing.finish(), aborted.finish()]
    }

    #[test]
    fn test_json_output_is_a_single_document() {
        let reports = sample_reports();
        let rendered = render_reports(&reports, true).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed.as_array().map(Vec::len), Some(2));
        assert!(!rendered.contains("iterations,"));
    }

    #[test]
    fn test_text_output_labels_entries() {
        let rendered = render_reports(&sample_reports(), false).unwrap();

        assert!(rendered.contains("PASS [Eiffel Tower] Status code is 200\n"));
        assert!(rendered.contains("SKIP [Eiffel Tower] Name field validation: name validation disabled\n"));
        assert!(rendered.contains("ABORT [record without input] Input URL is required"));
    }

    #[test]
    fn test_totals_line_counts_aborted_as_failed() {
        assert_eq!(totals_line(&sample_reports()), "2 iterations, 1 passed, 1 failed");
    }
}
