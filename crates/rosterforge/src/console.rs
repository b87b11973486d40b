//! Colorful console output for solver events.
//!
//! Provides a custom `tracing` layer that renders the solver's structured
//! events (`solve_start`, `phase_start`, `phase_end`, `new_best`,
//! `solve_end`) with colors.

use std::io::{self, Write};
use std::sync::OnceLock;

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

/// Initializes the console output.
///
/// Safe to call multiple times - only the first call has effect. `RUST_LOG`
/// overrides the default `rosterforge_solver=info` filter.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("rosterforge_solver=info,rosterforge=info"));

        // A subscriber installed elsewhere wins.
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(RosterConsoleLayer)
            .try_init();
    });
}

fn print_banner() {
    let version_line = format!(
        "  RosterForge v{} - monthly shift rostering\n",
        env!("CARGO_PKG_VERSION")
    );
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats solver events with colors.
pub struct RosterConsoleLayer;

impl<S: Subscriber> Layer<S> for RosterConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !event.metadata().target().starts_with("rosterforge") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    phase: Option<String>,
    phase_index: Option<u64>,
    month: Option<String>,
    employees: Option<u64>,
    days: Option<u64>,
    weeks: Option<u64>,
    target: Option<String>,
    duration_ms: Option<u64>,
    steps: Option<u64>,
    speed: Option<u64>,
    step: Option<u64>,
    score: Option<String>,
    reason: Option<String>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        let s = s.trim_matches('"').to_string();
        match field.name() {
            "event" => self.event = Some(s),
            "phase" => self.phase = Some(s),
            "month" => self.month = Some(s),
            "target" => self.target = Some(s),
            "score" => self.score = Some(s),
            "reason" => self.reason = Some(s),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "phase_index" => self.phase_index = Some(value),
            "employees" => self.employees = Some(value),
            "days" => self.days = Some(value),
            "weeks" => self.weeks = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            "steps" => self.steps = Some(value),
            "speed" => self.speed = Some(value),
            "step" => self.step = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "phase" => self.phase = Some(value.to_string()),
            "month" => self.month = Some(value.to_string()),
            "target" => self.target = Some(value.to_string()),
            "score" => self.score = Some(value.to_string()),
            "reason" => self.reason = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor) -> String {
    match v.event.as_deref().unwrap_or("") {
        "solve_start" => format_solve_start(v),
        "phase_start" => format_phase_start(v),
        "phase_end" => format_phase_end(v),
        "new_best" => format_new_best(v),
        "solve_end" => format_solve_end(v),
        _ => String::new(),
    }
}

fn format_solve_start(v: &EventVisitor) -> String {
    let employees = v.employees.unwrap_or(0);
    let days = v.days.unwrap_or(0);
    format!(
        "{} {} {} month ({}), employees ({}), days ({}), weeks ({}), variables ({}), target ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Solver]".bright_cyan(),
        v.month.as_deref().unwrap_or("?").bright_yellow(),
        employees.to_formatted_string(&Locale::en).bright_yellow(),
        days.to_formatted_string(&Locale::en).bright_yellow(),
        v.weeks.unwrap_or(0).to_formatted_string(&Locale::en).bright_yellow(),
        (employees * days).to_formatted_string(&Locale::en).bright_magenta(),
        format_score(v.target.as_deref().unwrap_or("N/A")),
    )
}

fn format_phase_start(v: &EventVisitor) -> String {
    let phase = v.phase.as_deref().unwrap_or("Unknown");
    format!(
        "{} {} {} {} phase ({}) started",
        timestamp().bright_black(),
        "INFO".bright_green(),
        format!("[{}]", phase).bright_cyan(),
        phase.white().bold(),
        v.phase_index.unwrap_or(0).to_string().yellow()
    )
}

fn format_phase_end(v: &EventVisitor) -> String {
    let phase = v.phase.as_deref().unwrap_or("Unknown");
    format!(
        "{} {} {} {} phase ({}) ended: time spent ({}), best score ({}), step speed ({}/sec), step total ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        format!("[{}]", phase).bright_cyan(),
        phase.white().bold(),
        v.phase_index.unwrap_or(0).to_string().yellow(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        format_score(v.score.as_deref().unwrap_or("N/A")),
        v.speed
            .unwrap_or(0)
            .to_formatted_string(&Locale::en)
            .bright_magenta()
            .bold(),
        v.steps.unwrap_or(0).to_formatted_string(&Locale::en).white()
    )
}

fn format_new_best(v: &EventVisitor) -> String {
    format!(
        "    {} Step {:>7} | {}",
        "->".bright_blue(),
        v.step.unwrap_or(0).to_formatted_string(&Locale::en).white(),
        format_score(v.score.as_deref().unwrap_or("N/A"))
    )
}

fn format_solve_end(v: &EventVisitor) -> String {
    let score = v.score.as_deref().unwrap_or("N/A");
    let feasible = score.starts_with("0hard");
    let status = if feasible {
        "FEASIBLE ROSTER".bright_green().bold().to_string()
    } else {
        "INFEASIBLE ROSTER".bright_red().bold().to_string()
    };
    format!(
        "{} {} {} Solving ended: {} in {} ({}), best score ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Solver]".bright_cyan(),
        status,
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        v.reason.as_deref().unwrap_or("?").white(),
        format_score(score)
    )
}

fn timestamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| format!("{:5}.{:03}", d.as_secs() % 100000, d.subsec_millis()))
        .unwrap_or_else(|_| "    0.000".to_string())
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        format!("{}m {}s", ms / 60_000, (ms % 60_000) / 1000)
    }
}

/// Colors each level of a `"Xhard/Ymedium/Zsoft"` score: negative hard
/// red, negative medium and soft yellow, zero green.
fn format_score(score: &str) -> String {
    let parts: Vec<&str> = score.split('/').collect();
    let [hard, medium, soft] = parts.as_slice() else {
        return score.white().to_string();
    };
    let level = |part: &str, suffix: &str, negative_is_hard: bool| {
        let value: i64 = part.trim_end_matches(suffix).parse().unwrap_or(0);
        match (value < 0, negative_is_hard) {
            (true, true) => part.bright_red().to_string(),
            (true, false) => part.yellow().to_string(),
            (false, _) => part.bright_green().to_string(),
        }
    };
    format!(
        "{}/{}/{}",
        level(hard, "hard", true),
        level(medium, "medium", false),
        level(soft, "soft", false)
    )
}
