use std::path::PathBuf;

use anyhow::{Context, Result};
use cfn_stack_generator::{cloudformation, config, stack, writer};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uuid::Uuid;

/// Prints the CloudFormation template for the API infrastructure.
#[derive(Parser, Debug)]
#[command(name = "cfn-stack-generator")]
#[command(version)]
#[command(
    about = "Generate the CloudFormation template for the API infrastructure",
    long_about = None
)]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(short = 'c', long, env = "CFN_STACK_CONFIG")]
    config: Option<PathBuf>,

    /// Write the template to this file instead of standard output
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Default value of the `Uuid` parameter, random when omitted
    #[arg(long)]
    uuid: Option<Uuid>,

    /// Check the template against the CloudFormation ValidateTemplate API
    #[arg(long)]
    validate: bool,

    /// AWS region used for validation
    #[arg(long)]
    region: Option<String>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = config::load(cli.config.as_deref()).context("Failed to load the configuration")?;

    let uuid = cli.uuid.unwrap_or_else(Uuid::new_v4).to_string();
    info!(uuid = %uuid, "generating template");

    let template = stack::build(&config, &uuid).context("Failed to build the template")?;
    let rendered = template.to_json()?;

    if cli.validate {
        let validator = cloudformation::Validator::new(cli.region.clone()).await?;
        let parameter_keys = validator
            .validate(&template.to_compact_json()?)
            .await
            .context("CloudFormation rejected the template")?;
        info!(parameters = parameter_keys.len(), "template is valid");
    }

    writer::write(cli.output.as_deref(), &rendered)?;

    return Ok(());
}

/// Logs go to stderr; stdout only ever carries the template.
fn init_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}
