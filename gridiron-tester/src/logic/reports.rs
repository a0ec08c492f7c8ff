use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::io::Write;
use std::time::Duration;

use super::ScenarioResult;

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: &'a str,
    passed: usize,
    failed: usize,
    results: &'a [ScenarioResult],
}

fn tally(results: &[ScenarioResult]) -> (usize, usize) {
    let passed = results.iter().filter(|r| r.passed).count();
    (passed, results.len() - passed)
}

#[allow(clippy::cast_precision_loss)]
fn success_rate(results: &[ScenarioResult]) -> f64 {
    let (passed, _) = tally(results);
    if results.is_empty() {
        0.0
    } else {
        passed as f64 / results.len() as f64 * 100.0
    }
}

pub fn generate_console_report(
    writer: &mut dyn Write,
    results: &[ScenarioResult],
    total_duration: Duration,
) -> Result<()> {
    let (passed, failed) = tally(results);
    writeln!(writer)?;
    writeln!(writer, "{}", "📊 Logic Test Results Summary".bright_cyan().bold())?;
    writeln!(writer, "{}", "==============================".cyan())?;
    writeln!(writer, "Total scenarios: {}", results.len())?;
    writeln!(writer, "Passed: {}", passed.to_string().green())?;
    writeln!(writer, "Failed: {}", failed.to_string().red())?;
    writeln!(writer, "Success rate: {:.1}%", success_rate(results))?;
    writeln!(writer, "Total time: {total_duration:?}")?;
    writeln!(writer)?;

    for result in results {
        let status = if result.passed {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };
        writeln!(
            writer,
            "{} {} (seed {})",
            status,
            result.scenario_name.bold(),
            result.seed
        )?;
        writeln!(
            writer,
            "   Iterations: {}/{} successful",
            result.successful_iterations, result.iterations_run
        )?;
        writeln!(writer, "   Average time: {:?}", result.average_duration)?;
        if let Some(fingerprint) = result.fingerprints.first() {
            writeln!(writer, "   Fingerprint: {fingerprint}")?;
        }
        if !result.failures.is_empty() {
            writeln!(writer, "   Failures:")?;
            for failure in &result.failures {
                writeln!(writer, "     • {}", failure.red())?;
            }
        }
        writeln!(writer)?;
    }

    let fastest = results.iter().min_by_key(|r| r.average_duration);
    let slowest = results.iter().max_by_key(|r| r.average_duration);
    if let (Some(fastest), Some(slowest)) = (fastest, slowest) {
        writeln!(writer, "{}", "⚡ Performance Summary".bright_yellow().bold())?;
        writeln!(writer, "{}", "=====================".yellow())?;
        writeln!(
            writer,
            "Fastest: {} ({:?})",
            fastest.scenario_name.green(),
            fastest.average_duration
        )?;
        writeln!(
            writer,
            "Slowest: {} ({:?})",
            slowest.scenario_name.yellow(),
            slowest.average_duration
        )?;
    }
    Ok(())
}

pub fn generate_json_report(
    writer: &mut dyn Write,
    results: &[ScenarioResult],
    generated_at: &str,
) -> Result<()> {
    let (passed, failed) = tally(results);
    let report = JsonReport {
        generated_at,
        passed,
        failed,
        results,
    };
    serde_json::to_writer_pretty(&mut *writer, &report)?;
    writeln!(writer)?;
    Ok(())
}

pub fn generate_markdown_report(
    writer: &mut dyn Write,
    results: &[ScenarioResult],
    generated_at: &str,
) -> Result<()> {
    let (passed, failed) = tally(results);
    writeln!(writer, "# Gridiron Logic Test Results\n")?;
    writeln!(writer, "_Generated {generated_at}_\n")?;
    writeln!(writer, "## Summary\n")?;
    writeln!(writer, "- **Total scenarios**: {}", results.len())?;
    writeln!(writer, "- **Passed**: {passed}")?;
    writeln!(writer, "- **Failed**: {failed}")?;
    writeln!(writer, "- **Success rate**: {:.1}%\n", success_rate(results))?;
    writeln!(writer, "## Detailed Results\n")?;

    for result in results {
        let status = if result.passed { "✅" } else { "❌" };
        writeln!(
            writer,
            "### {} {} (seed {})\n",
            status, result.scenario_name, result.seed
        )?;
        writeln!(
            writer,
            "- **Iterations**: {}/{} successful",
            result.successful_iterations, result.iterations_run
        )?;
        writeln!(writer, "- **Average time**: {:?}", result.average_duration)?;
        if let Some(fingerprint) = result.fingerprints.first() {
            writeln!(writer, "- **Fingerprint**: `{fingerprint}`")?;
        }
        if !result.failures.is_empty() {
            writeln!(writer, "- **Failures**:")?;
            for failure in &result.failures {
                writeln!(writer, "  - {failure}")?;
            }
        }
        writeln!(writer)?;
    }
    Ok(())
}
