// ABOUTME: Status command implementation.
// ABOUTME: Queries the function once and prints its last update status.

use lambship::config::Config;
use lambship::error::Result;
use lambship::output::Output;
use lambship::platform::{ConnectOptions, FunctionOps, connect_functions};
use serde::Serialize;

#[derive(Serialize)]
struct StatusReport<'a> {
    function: &'a str,
    arn: Option<&'a str>,
    status: String,
}

pub async fn status(config: &Config, output: &Output) -> Result<()> {
    let functions = connect_functions(&ConnectOptions {
        region: config.region.clone(),
        profile: config.profile.clone(),
    })
    .await?;

    let info = functions.get_function(&config.function).await?;
    let report = StatusReport {
        function: config.function.as_str(),
        arn: info.arn.as_deref(),
        status: info.status.to_string(),
    };

    output.success_with(
        &format!("{}: {}", config.function, info.status),
        &report,
    );
    Ok(())
}
