use crate::eval::{DecisionResult, EvaluationInput};
use std::io::Write;
use std::path::Path;

/// Environment variable selecting the diagnostic log level.
pub const LOG_LEVEL_ENV: &str = "COMMITMENT_GATE_LOG";

/// Route the `log` facade to stderr at the level named by `COMMITMENT_GATE_LOG`
/// (default `warn`). Safe to call more than once; later calls are no-ops.
pub fn init_diagnostics() {
    let level = std::env::var(LOG_LEVEL_ENV)
        .ok()
        .and_then(|v| v.trim().parse::<log::LevelFilter>().ok())
        .unwrap_or(log::LevelFilter::Warn);
    let _ = simplelog::WriteLogger::init(
        level,
        simplelog::Config::default(),
        std::io::stderr(),
    );
}

/// Append a decision record to the decision log at `path`.
/// Best-effort: failures are silently ignored (logging must never block a decision).
pub fn log_decision(path: &Path, input: &EvaluationInput, result: &DecisionResult) {
    if let Some(dir) = path.parent() {
        let _ = std::fs::create_dir_all(dir);
    }
    let Ok(mut file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
    else {
        return;
    };

    let _ = writeln!(file, "{}", format_record(&timestamp_now(), input, result));
}

/// One tab-separated line: timestamp, verdict, role, intent, energy, template, reasons.
fn format_record(ts: &str, input: &EvaluationInput, result: &DecisionResult) -> String {
    // Hard rules are user text; keep the record on one line.
    let reasons = result
        .reason_strings()
        .join(",")
        .replace(['\n', '\t'], " ");
    format!(
        "{ts}\t{verdict}\t{role}\t{intent}\t{energy}\t{template}\t{reasons}",
        verdict = result.result,
        role = input.user_profile.primary_role.as_str(),
        intent = input.parsed_request.intent.as_str(),
        energy = input.dynamic_state.energy_level.as_str(),
        template = result.template_key,
    )
}

/// UTC timestamp, second precision.
fn timestamp_now() -> String {
    let secs = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format_timestamp(secs)
}

fn format_timestamp(secs: u64) -> String {
    let (year, month, day) = civil_from_days(secs / 86400);
    let rem = secs % 86400;
    format!(
        "{year:04}-{month:02}-{day:02}T{:02}:{:02}:{:02}Z",
        rem / 3600,
        (rem % 3600) / 60,
        rem % 60
    )
}

/// Days since the Unix epoch to (year, month, day), Hinnant's civil calendar algorithm.
fn civil_from_days(days: u64) -> (u64, u64, u64) {
    let z = days + 719468;
    let era = z / 146097;
    let doe = z - era * 146097;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + u64::from(month <= 2);
    (year, month, day)
}
