use clap::Parser;
use reqwest::Client;
use tracing::info;

use crate::args::HarnessArgs;
use crate::cases::{CaseContext, ResultLog, run_cases};
use crate::config::{RunConfig, load_config};
use crate::dispatch::Dispatcher;
use crate::error::{AppError, AppResult, HttpError};
use crate::probe::{ProbeOutcome, probe};
use crate::sinks::SinksConfig;
use crate::stats::build_summary;

pub(crate) fn run() -> AppResult<()> {
    let args = HarnessArgs::parse();
    let file = load_config(args.config.as_deref())?;
    let config = RunConfig::resolve(&args, file)?;

    crate::logger::init_logging(config.verbose);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(config))
}

async fn run_async(config: RunConfig) -> AppResult<()> {
    let client = Client::builder()
        .timeout(config.request_timeout)
        .build()
        .map_err(|err| AppError::http(HttpError::BuildClientFailed { source: err }))?;

    let dispatcher = Dispatcher::new(config.pool_width);
    let ctx = CaseContext {
        client,
        url: config.url.clone(),
        dispatcher,
    };

    info!("running verification suite against {}", config.url);
    let mut log = ResultLog::new();
    run_cases(&ctx, &mut log).await;

    info!(
        "collecting {} sample probes ({} wide)",
        config.samples.get(),
        ctx.dispatcher.width()
    );
    let samples = collect_samples(&ctx, config.samples.get()).await;

    let results = log.into_results();
    let summary = build_summary(&results, &samples);
    for sink in SinksConfig::from_run_config(&config).build() {
        sink.write(&results, &summary)?;
    }

    // Case failures surface as FAIL rows, never as a non-zero exit.
    Ok(())
}

async fn collect_samples(ctx: &CaseContext, n: usize) -> Vec<ProbeOutcome> {
    let client = ctx.client.clone();
    let url = ctx.url.clone();
    ctx.dispatcher
        .dispatch(n, move |_| {
            let client = client.clone();
            let url = url.clone();
            async move { probe(&client, &url).await }
        })
        .await
}
