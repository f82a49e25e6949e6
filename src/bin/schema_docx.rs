//! Render a JSON schema model into a Word document.
//!
//! ```text
//! schema_docx --model schema.json --output-dir out [--config docx.toml] [-v]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use schema_docx::{Database, DocxConfig, DocxProducer, OutputProducer, ProduceOutcome};

struct CliConfig {
    model: Option<PathBuf>,
    output_dir: PathBuf,
    config: Option<PathBuf>,
    verbose: bool,
}

impl CliConfig {
    fn from_args() -> Self {
        let args: Vec<String> = std::env::args().collect();
        let mut model = None;
        let mut output_dir = PathBuf::from(".");
        let mut config = None;
        let mut verbose = false;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--model" | "-m" => {
                    i += 1;
                    if i < args.len() {
                        model = Some(PathBuf::from(&args[i]));
                    }
                },
                "--output-dir" | "-o" => {
                    i += 1;
                    if i < args.len() {
                        output_dir = PathBuf::from(&args[i]);
                    }
                },
                "--config" | "-c" => {
                    i += 1;
                    if i < args.len() {
                        config = Some(PathBuf::from(&args[i]));
                    }
                },
                "--verbose" | "-v" => {
                    verbose = true;
                },
                other => {
                    eprintln!("Warning: ignoring unknown argument {}", other);
                },
            }
            i += 1;
        }

        Self {
            model,
            output_dir,
            config,
            verbose,
        }
    }
}

fn load_database(path: &Path) -> schema_docx::Result<Database> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn main() {
    let cli = CliConfig::from_args();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let Some(model_path) = cli.model else {
        eprintln!(
            "Usage: schema_docx --model <schema.json> --output-dir <dir> [--config <docx.toml>] [-v]"
        );
        std::process::exit(1);
    };

    let config = match &cli.config {
        Some(path) => match DocxConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            },
        },
        None => DocxConfig::default(),
    };

    let database = match load_database(&model_path) {
        Ok(database) => database,
        Err(e) => {
            eprintln!("Error reading {}: {}", model_path.display(), e);
            std::process::exit(1);
        },
    };

    let producer = DocxProducer::with_config(config);
    match producer.generate(&database, &cli.output_dir) {
        ProduceOutcome::Written(path) => println!("Wrote {}", path.display()),
        ProduceOutcome::NothingToWrite => println!("No tables in {}, nothing written", database.name),
        ProduceOutcome::Failed(reason) => {
            eprintln!("Error: {}", reason);
            std::process::exit(1);
        },
    }
}
