//! Monthly roster quickstart.
//!
//! Reads an employee shift-history CSV (or uses a built-in workforce),
//! generates the roster of the configured month, writes it as CSV and
//! answers one replacement query.
//!
//! ```text
//! monthly-roster --history inbound.csv --month 3 --output march.csv \
//!     --absent E104 --date 2026-03-10
//! ```

use std::error::Error;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::Parser;
use tracing::warn;

use rosterforge::{
    generate_roster, Affinity, EmployeeHistory, ReplacementRecommender, Roster, RosterConfig,
    ShiftState,
};

/// Columns of the history sheet that are not dates.
const METADATA_COLUMNS: [&str; 7] = [
    "Employee ID",
    "User ID",
    "NAME",
    "Name",
    "Status",
    "Department",
    "Dept",
];

#[derive(Parser)]
#[command(name = "monthly-roster")]
#[command(about = "Generate a balanced monthly shift roster", long_about = None)]
struct Cli {
    /// Shift-history CSV: metadata columns plus one column per past date
    #[arg(long)]
    history: Option<PathBuf>,

    /// Roster configuration (TOML); defaults apply when missing
    #[arg(short, long, default_value = "roster.toml")]
    config: PathBuf,

    #[arg(long)]
    year: Option<i32>,

    #[arg(long)]
    month: Option<u32>,

    #[arg(long)]
    seed: Option<u64>,

    /// Roster CSV to write; defaults to `roster_<year>-<month>.csv`
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Employee to replace; defaults to the first employee
    #[arg(long)]
    absent: Option<String>,

    /// Date of the absence (YYYY-MM-DD); defaults to their first worked day
    #[arg(long)]
    date: Option<NaiveDate>,
}

fn main() -> Result<(), Box<dyn Error>> {
    rosterforge::console::init();
    let cli = Cli::parse();

    let config = load_config(&cli)?;
    let histories = match &cli.history {
        Some(path) => read_histories(path)?,
        None => demo_histories(),
    };

    let generated = generate_roster(&histories, &config)?;
    if let Some(warning) = &generated.warning {
        warn!("{warning}");
    }

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("roster_{}.csv", generated.roster.month())));
    write_roster(&generated.roster, File::create(&output)?)?;
    println!(
        "Roster for {} written to {} (spread {}, score {})",
        generated.roster.month(),
        output.display(),
        generated.spread(),
        generated.score
    );

    let recommender = ReplacementRecommender::new(config.replacement_top_n);
    answer_replacement(&generated.roster, &recommender, &cli)?;
    Ok(())
}

fn load_config(cli: &Cli) -> Result<RosterConfig, Box<dyn Error>> {
    let mut config = if cli.config.exists() {
        RosterConfig::load(&cli.config)?
    } else {
        RosterConfig::default()
    };
    if let Some(year) = cli.year {
        config.year = year;
    }
    if let Some(month) = cli.month {
        config.month = month;
    }
    if let Some(seed) = cli.seed {
        config = config.with_random_seed(seed);
    }
    config.validate()?;
    Ok(config)
}

/// Reads one [`EmployeeHistory`] per row. Every column that is not
/// metadata, `Remarks` or an unnamed spreadsheet column is a history date.
fn read_histories(path: &Path) -> Result<Vec<EmployeeHistory>, Box<dyn Error>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers = reader.headers()?.clone();

    let column = |names: &[&str]| headers.iter().position(|h| names.contains(&h.trim()));
    let id_col = column(&["Employee ID"]).ok_or("history is missing the 'Employee ID' column")?;
    let name_col = column(&["NAME", "Name"]);
    let status_col = column(&["Status"]);
    let department_col = column(&["Department", "Dept"]);
    let date_cols: Vec<usize> = headers
        .iter()
        .enumerate()
        .filter(|(_, h)| {
            let h = h.trim();
            !h.is_empty()
                && !METADATA_COLUMNS.contains(&h)
                && !h.starts_with("Unnamed")
                && h != "Remarks"
        })
        .map(|(i, _)| i)
        .collect();

    let mut histories = Vec::new();
    for record in reader.records() {
        let record = record?;
        let field = |col: Option<usize>| col.and_then(|c| record.get(c)).unwrap_or("").trim();
        let id = field(Some(id_col));
        if id.is_empty() {
            continue;
        }
        let labels = date_cols.iter().filter_map(|&c| record.get(c));
        histories.push(
            EmployeeHistory::from_labels(id, field(name_col), labels)
                .with_status(field(status_col))
                .with_department(field(department_col)),
        );
    }
    Ok(histories)
}

/// Three day-only, three night-only and four mixed histories.
fn demo_histories() -> Vec<EmployeeHistory> {
    let names = [
        ("E101", "Asha Raman", ["Day", "Day", "WO", "Day"]),
        ("E102", "Ben Okafor", ["Day", "WO", "Day", "Day"]),
        ("E103", "Chen Wei", ["WO", "Day", "Day", "Day"]),
        ("E104", "Dara Quinn", ["Night", "Night", "WO", "Night"]),
        ("E105", "Eli Novak", ["Night", "WO", "Night", "Night"]),
        ("E106", "Farah Said", ["WO", "Night", "Night", "Night"]),
        ("E107", "Gus Lindqvist", ["Day", "Night", "WO", "Day"]),
        ("E108", "Hana Ito", ["Night", "Day", "Day", "WO"]),
        ("E109", "Ivo Petrov", ["WO", "Leave", "WO", "WO"]),
        ("E110", "Jun Park", ["Day", "WO", "Night", "Night"]),
    ];
    names
        .into_iter()
        .map(|(id, name, labels)| {
            EmployeeHistory::from_labels(id, name, labels)
                .with_department("Operations")
                .with_status("Active")
        })
        .collect()
}

fn state_label(state: ShiftState) -> &'static str {
    match state {
        ShiftState::Rest => "WO",
        working => working.as_str(),
    }
}

/// Shift DNA labels as the history sheets spell them.
fn affinity_label(affinity: Affinity) -> &'static str {
    match affinity {
        Affinity::FixedDay => "Fixed_Day",
        Affinity::FixedNight => "Fixed_Night",
        Affinity::Rotating => "Rotating",
    }
}

fn write_roster<W: Write>(roster: &Roster, out: W) -> csv::Result<()> {
    let mut writer = csv::Writer::from_writer(out);

    let dates = roster.dates();
    let mut header = vec![
        "Employee ID".to_string(),
        "Name".to_string(),
        "Dept".to_string(),
        "Status".to_string(),
        "Shift DNA".to_string(),
    ];
    header.extend(dates.iter().map(|d| d.format("%Y-%m-%d").to_string()));
    header.push("Total_Work_Hours".to_string());
    header.push("Total Shifts".to_string());
    writer.write_record(&header)?;

    for row in roster.grid() {
        let mut record = vec![
            row.id,
            row.name,
            row.department,
            row.status,
            affinity_label(row.affinity).to_string(),
        ];
        record.extend(row.states.iter().map(|s| state_label(*s).to_string()));
        record.push(row.work_hours.to_string());
        record.push(row.total_shifts.to_string());
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

fn answer_replacement(
    roster: &Roster,
    recommender: &ReplacementRecommender,
    cli: &Cli,
) -> Result<(), Box<dyn Error>> {
    let absent = match &cli.absent {
        Some(id) => id.clone(),
        None => match roster.rows().first() {
            Some(row) => row.employee_id().to_string(),
            None => return Ok(()),
        },
    };
    let date = match cli.date {
        Some(date) => date,
        None => {
            let row = roster.row(&absent)?;
            match row.assignments().iter().find(|a| a.state.is_working()) {
                Some(a) => a.date,
                None => return Ok(()),
            }
        }
    };

    let replacement = recommender.recommend(roster, &absent, date)?;
    println!(
        "\n{} is absent on {} ({} shift). Best replacement: {} ({}, {} shifts this month)",
        replacement.absent,
        replacement.date,
        replacement.shift,
        replacement.best.name,
        replacement.best.employee,
        replacement.best.total_work_units
    );
    for (rank, candidate) in replacement.alternatives.iter().enumerate() {
        println!(
            "  {}. {:<16} {:<10} {:>3} shifts",
            rank + 1,
            candidate.name,
            candidate.affinity,
            candidate.total_work_units
        );
    }
    Ok(())
}
