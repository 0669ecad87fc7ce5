// ABOUTME: Prepare command implementation.
// ABOUTME: Writes the build context locally for inspection.

use lambship::config::Config;
use lambship::deploy::write_build_context;
use lambship::error::Result;
use lambship::output::Output;

pub fn prepare(config: &Config, output: &Output) -> Result<()> {
    let request = config.request()?;
    let context = write_build_context(&config.scratch_root(), &config.build.base_image, &request)?;

    output.success(&format!(
        "Build context for {} written to {}",
        request.function(),
        context.dir().display()
    ));
    Ok(())
}
