// ABOUTME: Deploy command implementation.
// ABOUTME: Connects to the platform and runs the deployer with progress output.

use lambship::config::Config;
use lambship::deploy::{DeployStep, Deployer, DeploymentRequest, Readiness};
use lambship::diagnostics::Diagnostics;
use lambship::error::{Error, Result};
use lambship::output::Output;
use lambship::platform::{ConnectOptions, connect};
use serde::Serialize;

#[derive(Serialize)]
struct DeployReport<'a> {
    function: &'a str,
    image: String,
    arn: Option<&'a str>,
    action: String,
    readiness: &'static str,
    status_queries: usize,
}

/// Deploy the configured function.
pub async fn deploy(config: Config, no_wait: bool, mut output: Output) -> Result<()> {
    output.start_timer();
    let mut diag = Diagnostics::default();

    let request = config.request()?;
    let deployer_config = config.deployer_config()?;
    let policy = if no_wait {
        None
    } else {
        config.readiness.policy()
    };

    output.progress(&format!(
        "Deploying {} (version {})",
        request.function(),
        request.version_tag()
    ));

    output.progress("  → Connecting to container engine and AWS...");
    let platform = connect(&ConnectOptions {
        region: config.region.clone(),
        profile: config.profile.clone(),
    })
    .await?;

    let deployer = Deployer::new(
        deployer_config,
        platform.images,
        platform.registry,
        platform.functions,
    );
    let outcome = deployer
        .deploy_with_progress(&request, policy.as_ref(), |step| {
            output.progress(&progress_message(&step, &request))
        })
        .await?;

    diag.record_readiness(outcome.function.as_str(), &outcome.readiness);
    for warning in diag.warnings() {
        output.warning(&warning.message);
    }

    if let Readiness::Failed { reason, .. } = &outcome.readiness {
        return Err(Error::NotReady {
            function: outcome.function.to_string(),
            reason: reason
                .clone()
                .unwrap_or_else(|| "platform reported the update as failed".to_string()),
        });
    }

    let report = DeployReport {
        function: outcome.function.as_str(),
        image: outcome.image.to_string(),
        arn: outcome.function_arn.as_deref(),
        action: outcome.action.to_string(),
        readiness: readiness_label(&outcome.readiness),
        status_queries: outcome.readiness.queries(),
    };
    output.success_with(
        &format!("Deployed {} ({})", outcome.function, outcome.image),
        &report,
    );
    Ok(())
}

fn progress_message(step: &DeployStep, request: &DeploymentRequest) -> String {
    match step {
        DeployStep::WritingContext => "  → Writing build context...".to_string(),
        DeployStep::Authenticating => "  → Authenticating to registry...".to_string(),
        DeployStep::Building { image } => format!("  → Building {image}..."),
        DeployStep::EnsuringRepository => "  → Ensuring repository exists...".to_string(),
        DeployStep::RepositoryCreated => {
            format!("  → Created repository {}", request.function())
        }
        DeployStep::Pushing => "  → Pushing image...".to_string(),
        DeployStep::Publishing => "  → Publishing function...".to_string(),
        DeployStep::Published { action } => {
            format!("  ✓ Function {} {}", request.function(), action)
        }
        DeployStep::WaitingForReadiness { policy } => format!(
            "  → Waiting for update to finish (up to {} checks, every {:?})...",
            policy.max_attempts, policy.interval
        ),
    }
}

fn readiness_label(readiness: &Readiness) -> &'static str {
    match readiness {
        Readiness::NotRequested => "not_requested",
        Readiness::Ready { .. } => "ready",
        Readiness::Failed { .. } => "failed",
        Readiness::TimedOut { .. } => "timed_out",
    }
}
