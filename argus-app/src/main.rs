mod config;
mod input;

use std::path::PathBuf;

use argus_transform::{engines::Pipeline, Function};
use eyre::{bail, WrapErr};
use structopt::StructOpt;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[derive(StructOpt, Debug)]
#[structopt(name = "argus", about = "Applies metric transforms to a JSON metrics document")]
struct Opts {
    /// TOML file declaring the transforms to apply.
    #[structopt(short, long, parse(from_os_str))]
    config: Option<PathBuf>,

    /// JSON metrics file. Overrides the configured input; stdin when neither is set.
    #[structopt(short, long, parse(from_os_str))]
    input: Option<PathBuf>,

    #[structopt(long)]
    pretty: bool,

    /// Lists the available transform functions and exits.
    #[structopt(long)]
    list_functions: bool,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let opts = Opts::from_args();

    if opts.list_functions {
        let mut out = String::new();

        for function in Function::all() {
            out.push_str(&format!("{:<12} {}\n", function.name(), function.description()));
        }

        tokio::io::stdout().write_all(out.as_bytes()).await?;
        return Ok(());
    }

    let config_path = match opts.config {
        Some(path) => path,
        None => bail!("Missing --config, see --help"),
    };

    let source = tokio::fs::read_to_string(config_path.as_path())
        .await
        .wrap_err_with(|| format!("Error when reading configuration {:?}", config_path))?;

    let config = Config::parse(source.as_str())?;
    let input_path = opts.input.or_else(|| config.input.path.clone());
    let pipeline = Pipeline::start(config.build()?);

    if pipeline.is_empty() {
        tracing::warn!(
            target = "main-process",
            "No transform configured, metrics are passed through unchanged"
        );
    }

    tracing::info!(
        target = "main-process",
        "Pipeline loaded with {} transform(s): [{}]",
        pipeline.len(),
        pipeline.stage_names().collect::<Vec<_>>().join(", ")
    );

    let raw = match input_path.as_ref() {
        Some(path) => tokio::fs::read(path)
            .await
            .wrap_err_with(|| format!("Error when reading metrics from {:?}", path))?,

        None => {
            let mut raw = Vec::new();
            tokio::io::stdin()
                .read_to_end(&mut raw)
                .await
                .wrap_err("Error when reading metrics from stdin")?;

            raw
        }
    };

    let mut metrics = input::decode(raw.as_slice())?;
    let metrics = pipeline.run(metrics.as_mut())?;

    tracing::info!(
        target = "main-process",
        "{} metric(s) transformed",
        metrics.len()
    );

    let out = input::encode(metrics, opts.pretty)?;
    let mut stdout = tokio::io::stdout();
    stdout.write_all(out.as_slice()).await?;
    stdout.flush().await?;

    Ok(())
}
