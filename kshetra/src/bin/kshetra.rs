//! Command-line front end.
//!
//! # Usage
//!
//! ```bash
//! kshetra process --dir /workspace/bags --all --params params.toml --idf world.idf
//! kshetra process --dir /workspace/bags --match lab_ --params params.toml --idf world.idf
//! kshetra inspect processed/run_01/run_01.processed
//! kshetra tables /workspace/bags/run_01/run_01.tables
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use kshetra::io::tables::TablesPlayer;
use kshetra::{
    BagProcessor, BagSelection, KshetraConfig, LocationalCostFactory, LogTables, OracleResources,
    load_processed, run_batch,
};

#[derive(Parser, Debug)]
#[command(name = "kshetra")]
#[command(about = "Process coverage-control experiment recordings")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Process recordings into .processed files
    Process(ProcessArgs),
    /// Summarize a .processed file
    Inspect {
        /// Processed bag file
        file: PathBuf,
    },
    /// List topics of a .tables file
    Tables {
        /// Tables file
        file: PathBuf,
    },
}

#[derive(Args, Debug)]
struct ProcessArgs {
    /// Directory containing one sub-directory per recording
    #[arg(short, long, default_value = "/workspace/bags")]
    dir: PathBuf,

    #[command(flatten)]
    selection: SelectionArgs,

    /// Coverage parameters file (TOML)
    #[arg(short, long)]
    params: PathBuf,

    /// Importance density function file
    #[arg(short, long)]
    idf: PathBuf,

    /// Processing configuration (YAML); defaults to configs/config.yaml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory, overriding output.save_dir
    #[arg(long)]
    save_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct SelectionArgs {
    /// Process every recording in the directory
    #[arg(short, long)]
    all: bool,

    /// Process recordings whose name contains this substring
    #[arg(short, long = "match", value_name = "SUBSTRING")]
    matching: Option<String>,

    /// Process a single recording
    #[arg(short, long, value_name = "NAME")]
    single: Option<String>,
}

impl SelectionArgs {
    fn selection(&self) -> BagSelection {
        match (&self.matching, &self.single) {
            (Some(s), _) => BagSelection::Matching(s.clone()),
            (_, Some(name)) => BagSelection::Single(name.clone()),
            _ => BagSelection::All,
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {} - {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Process(args) => process(args),
        Command::Inspect { file } => inspect(&file),
        Command::Tables { file } => tables(&file),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&Path>) -> kshetra::Result<KshetraConfig> {
    let config = match path {
        Some(p) => {
            let config = KshetraConfig::load(p)?;
            log::info!("Loaded config from {}", p.display());
            config
        }
        None => KshetraConfig::load_default()?,
    };
    Ok(config)
}

fn process(args: ProcessArgs) -> kshetra::Result<ExitCode> {
    let config = load_config(args.config.as_deref())?;
    let save_dir = args
        .save_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.output.save_dir));

    let processor = BagProcessor::new(
        config,
        OracleResources::new(&args.params, &args.idf),
        LocationalCostFactory,
    )?;
    let report = run_batch(&processor, &args.dir, &args.selection.selection(), &save_dir)?;

    for (name, err) in &report.failed {
        println!("FAILED  {:<32} {}", name, err);
    }
    for (name, path) in &report.processed {
        println!("OK      {:<32} {}", name, path.display());
    }

    Ok(if report.all_succeeded() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn inspect(file: &Path) -> kshetra::Result<ExitCode> {
    let bag = load_processed(file)?;
    let map = bag.global_map();

    println!("Processed bag: {}", bag.bag_name());
    println!("  Robots:       {}", bag.num_robots());
    println!("  Duration:     {:.2} s", bag.duration());
    println!("  Fine steps:   {}", bag.t_fine().len());
    println!("  Coarse steps: {}", bag.t_coarse().len());
    println!(
        "  Global map:   {}x{} ({:.1}% known)",
        map.rows(),
        map.cols(),
        map.known_fraction() * 100.0
    );
    if let Some(cost) = bag.final_cost() {
        println!("  Final cost:   {:.4}", cost);
    }
    Ok(ExitCode::SUCCESS)
}

fn tables(file: &Path) -> kshetra::Result<ExitCode> {
    let header = TablesPlayer::open(file)?.header().clone();
    let tables = LogTables::load(file)?;

    println!("Tables file: {}", file.display());
    println!("  Version:  {}", header.version);
    println!("  Records:  {}", header.record_count);
    println!(
        "  Span:     {} - {}",
        header.first_timestamp, header.last_timestamp
    );
    println!();
    println!("  {:<20} {:<28} {:>10}", "NAMESPACE", "TOPIC", "SAMPLES");
    for (ns, topic, count) in tables.summary() {
        println!("  {:<20} {:<28} {:>10}", ns, topic, count);
    }
    Ok(ExitCode::SUCCESS)
}
