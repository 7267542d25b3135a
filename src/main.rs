//! `medpredict` command-line entry point.

use std::io::{self, Write};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use tracing::{error, info};

use medpredict::api::http::run_server;
use medpredict::api::shell::{print_fields, Shell};
use medpredict::common::config::{AppCfg, LogFormat};
use medpredict::common::log;
use medpredict::features::catalog::DISCLAIMER;
use medpredict::features::domain::{DiseaseKind, FieldValue, RangePolicy, Values};
use medpredict::features::service::{default_values, with_defaults};
use medpredict::inference::{InferenceService, PageDispatcher};
use medpredict::models::FsModelRepo;

#[derive(Parser, Debug)]
#[command(name = "medpredict")]
#[command(version)]
#[command(about = "Disease prediction from patient measurements using pre-trained classifiers")]
struct Args {
    /// Directory holding the model artifacts [env: MEDPREDICT_MODEL_DIR]
    #[arg(long, global = true, value_name = "DIR")]
    model_dir: Option<PathBuf>,

    /// Log filter directive, e.g. `debug` or `medpredict=trace` [env: MEDPREDICT_LOG_LEVEL]
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Log line format [env: MEDPREDICT_LOG_FORMAT]
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    /// Treatment of values outside a field's bounds [env: MEDPREDICT_RANGE_POLICY]
    #[arg(long, global = true, value_enum)]
    range_policy: Option<RangePolicy>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the REST API
    Serve {
        /// Listen address [env: MEDPREDICT_BIND]
        #[arg(long)]
        bind: Option<SocketAddr>,
    },
    /// Run a single prediction
    Predict {
        /// Page to predict for (diabetes, heart_disease, parkinsons)
        #[arg(short, long, default_value = "diabetes")]
        domain: String,

        /// Field value, repeatable
        #[arg(short = 's', long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
        values: Vec<(String, String)>,

        /// Fill fields not given with the form defaults
        #[arg(long)]
        defaults: bool,

        /// Print the prediction as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the field table of a page
    Fields {
        #[arg(short, long, default_value = "diabetes")]
        domain: String,
    },
    /// Interactive session on stdin/stdout
    Shell,
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("expected NAME=VALUE, got `{raw}`")),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> anyhow::Result<ExitCode> {
    let mut cfg = AppCfg::load()?;
    if let Some(dir) = args.model_dir {
        cfg.model_dir = dir;
    }
    if let Some(level) = args.log_level {
        cfg.log_level = level;
    }
    if let Some(format) = args.log_format {
        cfg.log_format = format;
    }
    if let Some(policy) = args.range_policy {
        cfg.range_policy = policy;
    }
    if let Command::Serve { bind: Some(bind) } = &args.command {
        cfg.bind = *bind;
    }
    log::init(&cfg.log_level, cfg.log_format)?;

    // `fields` only needs the static tables.
    if let Command::Fields { domain } = &args.command {
        let kind: DiseaseKind = domain.parse()?;
        let spec = kind.spec();
        let mut out = io::stdout().lock();
        writeln!(out, "{}", spec.title)?;
        print_fields(spec, &default_values(kind), &mut out)?;
        return Ok(ExitCode::SUCCESS);
    }

    let repo = match FsModelRepo::new(&cfg).load_all() {
        Ok(repo) => repo,
        Err(err) => {
            error!(code = err.code().as_u32(), error = %err, "model loading failed");
            return Err(anyhow!(err).context("cannot start without all three models"));
        }
    };
    info!(model_dir = %cfg.model_dir.display(), models = ?repo, "models loaded");
    let service = InferenceService::new(repo, cfg.range_policy);

    match args.command {
        Command::Serve { .. } => {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .context("failed to start the async runtime")?;
            runtime.block_on(run_server(cfg.bind, service))?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Predict {
            domain,
            values,
            defaults,
            json,
        } => predict_once(&service, &domain, values, defaults, json),
        Command::Shell => {
            let stdin = io::stdin();
            Shell::new(&service).run(stdin.lock(), io::stdout().lock())?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Fields { .. } => Ok(ExitCode::SUCCESS),
    }
}

fn predict_once(
    service: &InferenceService,
    domain: &str,
    assignments: Vec<(String, String)>,
    defaults: bool,
    json: bool,
) -> anyhow::Result<ExitCode> {
    let mut dispatcher = PageDispatcher::new();
    let kind = dispatcher.select_by_name(domain)?;

    let values: Values = assignments
        .into_iter()
        .map(|(name, value)| (name, FieldValue::Text(value)))
        .collect();
    let values = if defaults {
        with_defaults(kind, &values)
    } else {
        values
    };

    match dispatcher.submit(service, &values) {
        Ok(prediction) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&prediction)?);
            } else {
                println!("{}", prediction.label);
                eprintln!("{DISCLAIMER}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("error: {err}");
            Ok(ExitCode::from(2))
        }
    }
}
