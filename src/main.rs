use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use archery_scorer::calendar::ArrowCountCalendar;
use archery_scorer::dataset::RoundDataset;
use archery_scorer::handicap::HandicapTable;
use archery_scorer::notation;
use archery_scorer::xlsx;
use archery_scorer::{FullRound, ScorePadFormatter, ScorerConfig, ScoringSystemVersion};

#[derive(Parser)]
#[command(name = "archery-scorer")]
#[command(about = "Archery handicaps, predicted scores and score pads", long_about = None)]
struct Cli {
    /// Handicap scheme: legacy or 2023
    #[arg(long, global = true, env = "ARCHERY_SCORING_SYSTEM", value_parser = parse_system)]
    system: Option<ScoringSystemVersion>,

    /// Score as an inner-ten (compound) archer
    #[arg(long, global = true)]
    inner_ten: bool,

    /// Round used when --round is not given
    #[arg(long, global = true, env = "ARCHERY_DEFAULT_ROUND")]
    default_round: Option<String>,

    /// Arrows per end
    #[arg(long, global = true, env = "ARCHERY_END_SIZE")]
    end_size: Option<usize>,

    /// Directory of round CSV tables merged over the bundled rounds
    #[arg(long, global = true, env = "ARCHERY_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the known rounds
    Rounds,

    /// Predict the score for a handicap
    Score {
        #[arg(short, long)]
        round: Option<String>,

        /// Distance variant of the round
        #[arg(short = 't', long)]
        sub_type: Option<u32>,

        #[arg(long, allow_negative_numbers = true)]
        handicap: i32,

        /// Only count the first N arrows of the round
        #[arg(long)]
        shot: Option<usize>,
    },

    /// Work out the handicap for a score
    Handicap {
        #[arg(short, long)]
        round: Option<String>,

        #[arg(short = 't', long)]
        sub_type: Option<u32>,

        #[arg(long)]
        score: u32,

        #[arg(long)]
        shot: Option<usize>,
    },

    /// Export handicap tables (CSV for one round, Excel for one or all)
    Table {
        #[arg(short, long)]
        round: Option<String>,

        #[arg(short = 't', long)]
        sub_type: Option<u32>,

        /// Every round and sub type
        #[arg(long)]
        all: bool,

        #[arg(short, long)]
        output: PathBuf,
    },

    /// Build a score pad from typed arrows
    Pad {
        #[arg(short, long)]
        round: Option<String>,

        #[arg(short = 't', long)]
        sub_type: Option<u32>,

        /// Arrows such as "X 10 9, 9 M"
        #[arg(long, conflicts_with = "input")]
        arrows: Option<String>,

        /// Score sheet with one end per line
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Write the pad to a CSV or Excel file instead of the terminal
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show each end best arrow first
        #[arg(long)]
        sorted: bool,
    },

    /// Summarise arrows shot per month
    ArrowCount {
        /// CSV with date and arrow_count columns
        input: PathBuf,

        #[arg(long)]
        year: Option<i32>,
    },
}

fn parse_system(s: &str) -> std::result::Result<ScoringSystemVersion, String> {
    ScoringSystemVersion::from_str(s).ok_or_else(|| format!("unknown scoring system: {}", s))
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = build_config(&cli);
    let dataset = config.load_dataset().context("Failed to load round data")?;

    match cli.command {
        Commands::Rounds => {
            rounds(&dataset)?;
        }
        Commands::Score { round, sub_type, handicap, shot } => {
            let round = config.resolve_round(&dataset, round.as_deref())?;
            score(&config, &round, sub_type, handicap, shot)?;
        }
        Commands::Handicap { round, sub_type, score, shot } => {
            let round = config.resolve_round(&dataset, round.as_deref())?;
            handicap(&config, &round, sub_type, score, shot)?;
        }
        Commands::Table { round, sub_type, all, output } => {
            table(&config, &dataset, round.as_deref(), sub_type, all, &output)?;
        }
        Commands::Pad { round, sub_type, arrows, input, output, sorted } => {
            let round = config.resolve_round(&dataset, round.as_deref())?;
            pad(&config, &round, sub_type, arrows.as_deref(), input.as_deref(), output.as_deref(), sorted)?;
        }
        Commands::ArrowCount { input, year } => {
            arrow_count(&input, year)?;
        }
    }

    Ok(())
}

fn build_config(cli: &Cli) -> ScorerConfig {
    let mut config = ScorerConfig::default().with_inner_ten(cli.inner_ten);
    if let Some(system) = cli.system {
        config = config.with_system(system);
    }
    if let Some(name) = &cli.default_round {
        config = config.with_default_round(name);
    }
    if let Some(end_size) = cli.end_size {
        config = config.with_end_size(end_size);
    }
    if let Some(dir) = &cli.data_dir {
        config = config.with_data_dir(dir.clone());
    }
    config
}

fn output_ext(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

fn rounds(dataset: &RoundDataset) -> Result<()> {
    for round in dataset.full_rounds().context("Invalid round data")? {
        let kind = match (round.round.is_outdoor, round.round.is_metric) {
            (true, true) => "outdoor metric",
            (true, false) => "outdoor imperial",
            (false, true) => "indoor metric",
            (false, false) => "indoor imperial",
        };
        println!("{} ({}) - {} arrows, {}", round.round.display_name, round.round.name, round.total_arrows(), kind);

        for sub_type in round.sub_type_selections() {
            let specs = round.distance_specs(sub_type)?;
            let distances: Vec<String> = specs
                .iter()
                .map(|s| format!("{} @ {} ({}cm)", s.arrow_count, s.distance, s.face_size_cm))
                .collect();
            let label = match sub_type {
                Some(id) => match round.sub_type(id) {
                    Some(s) => format!("  [{}] {}: ", id, s.name),
                    None => format!("  [{}]: ", id),
                },
                None => "  ".to_string(),
            };
            println!("{}{}", label, distances.join(", "));
        }
    }
    Ok(())
}

fn score(config: &ScorerConfig, round: &FullRound, sub_type: Option<u32>, handicap: i32, shot: Option<usize>) -> Result<()> {
    let mut params = config.handicap_params();
    if let Some(shot) = shot {
        params = params.with_shot_arrows(shot);
    }
    let predicted = round.score_for_handicap(sub_type, handicap, &params)?;
    println!(
        "{}: handicap {} ({}) predicts {} of {}",
        round.round.display_name,
        handicap,
        params.system,
        predicted,
        round.max_score()
    );
    Ok(())
}

fn handicap(config: &ScorerConfig, round: &FullRound, sub_type: Option<u32>, score: u32, shot: Option<usize>) -> Result<()> {
    let mut params = config.handicap_params();
    if let Some(shot) = shot {
        params = params.with_shot_arrows(shot);
    }
    let handicap = round.handicap_for_score(sub_type, score, &params)?;
    println!(
        "{}: score {} is handicap {} ({})",
        round.round.display_name, score, handicap, params.system
    );
    Ok(())
}

fn table(
    config: &ScorerConfig,
    dataset: &RoundDataset,
    round: Option<&str>,
    sub_type: Option<u32>,
    all: bool,
    output: &Path,
) -> Result<()> {
    let params = config.handicap_params();
    let tables = if all {
        let rounds = dataset.full_rounds().context("Invalid round data")?;
        HandicapTable::for_rounds(&rounds, &params)?
    } else {
        let round = config.resolve_round(dataset, round)?;
        vec![HandicapTable::build(&round, sub_type, &params)?]
    };
    println!("Built {} handicap tables ({})", tables.len(), params.system);

    match output_ext(output).as_str() {
        "xlsx" => {
            println!("Writing Excel file: {}", output.display());
            xlsx::write_handicap_tables_to_xlsx(&tables, output).context("Failed to write Excel file")?;
        }
        "csv" => {
            if tables.len() != 1 {
                anyhow::bail!("CSV output holds one table; use .xlsx with --all");
            }
            println!("Writing CSV file: {}", output.display());
            let file = std::fs::File::create(output).context("Failed to create CSV file")?;
            tables[0].write_csv(file).context("Failed to write CSV file")?;
        }
        other => {
            anyhow::bail!("Unsupported output format: {}", other);
        }
    }

    println!("Done!");
    Ok(())
}

fn pad(
    config: &ScorerConfig,
    round: &FullRound,
    sub_type: Option<u32>,
    arrows: Option<&str>,
    input: Option<&Path>,
    output: Option<&Path>,
    sorted: bool,
) -> Result<()> {
    let shot = match (arrows, input) {
        (Some(text), _) => notation::parse_arrows(text)?,
        (None, Some(path)) => notation::read_arrows_file(path).context("Failed to read score sheet")?,
        (None, None) => anyhow::bail!("Give arrows with --arrows or --input"),
    };

    let score_pad = round.score_pad(sub_type, &shot, config.end_size)?;
    let mut formatter = ScorePadFormatter::default();
    if sorted {
        formatter = formatter.with_sorted_ends();
    }

    let Some(output) = output else {
        println!("{}", formatter.column_titles(&score_pad).join("\t"));
        for cells in formatter.cells(&score_pad)? {
            println!("{}", cells.join("\t"));
        }
        if shot.len() < round.total_arrows() {
            let params = config.handicap_params().with_shot_arrows(shot.len());
            if let Some(total) = score_pad.grand_total() {
                let handicap = round.handicap_for_score(sub_type, total.score, &params)?;
                println!("Handicap so far: {} ({} of {} arrows)", handicap, shot.len(), round.total_arrows());
            }
        }
        return Ok(());
    };

    match output_ext(output).as_str() {
        "csv" => {
            println!("Writing CSV file: {}", output.display());
            let file = std::fs::File::create(output).context("Failed to create CSV file")?;
            formatter.write_csv(&score_pad, file).context("Failed to write CSV file")?;
        }
        "xlsx" => {
            println!("Writing Excel file: {}", output.display());
            xlsx::write_score_pad_to_xlsx(&score_pad, &formatter, &round.round.display_name, output)
                .context("Failed to write Excel file")?;
        }
        other => {
            anyhow::bail!("Unsupported output format: {}", other);
        }
    }

    println!("Done!");
    Ok(())
}

fn arrow_count(input: &Path, year: Option<i32>) -> Result<()> {
    let content = std::fs::read_to_string(input).context("Failed to read shoot records")?;
    let calendar = ArrowCountCalendar::read_csv(&content).context("Failed to parse shoot records")?;

    match year {
        Some(year) => {
            for (month, count) in calendar.months_of_year(year) {
                println!("{}-{:02}: {}", year, month, count);
            }
        }
        None => {
            println!("Total arrows: {}", calendar.total());
        }
    }
    Ok(())
}
