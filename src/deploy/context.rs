// ABOUTME: Build context materialization.
// ABOUTME: Writes the Dockerfile, source module and requirements manifest.

use std::path::{Path, PathBuf};

use super::error::DeployError;
use super::request::DeploymentRequest;
use crate::types::FunctionName;

pub const DOCKERFILE: &str = "Dockerfile";
pub const MANIFEST: &str = "requirements.txt";

/// A written build context directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
    dir: PathBuf,
    source_file: String,
}

impl BuildContext {
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn dockerfile(&self) -> PathBuf {
        self.dir.join(DOCKERFILE)
    }

    pub fn source(&self) -> PathBuf {
        self.dir.join(&self.source_file)
    }

    pub fn manifest(&self) -> PathBuf {
        self.dir.join(MANIFEST)
    }
}

/// Render the build descriptor for a function.
pub fn dockerfile(base_image: &str, function: &FunctionName) -> String {
    format!(
        "FROM {base_image}\n\
         COPY . ${{LAMBDA_TASK_ROOT}}\n\
         RUN pip install -r {MANIFEST}\n\
         CMD [\"{}\"]\n",
        function.handler()
    )
}

/// Render the dependency manifest: one specifier per line.
pub fn manifest(requirements: &[String]) -> String {
    requirements.join("\n")
}

/// Write the build context to `root/{function}`.
///
/// Any previous content of that directory is removed first, so the context
/// always holds exactly the descriptor, the source file and the manifest.
pub fn write_build_context(
    root: &Path,
    base_image: &str,
    request: &DeploymentRequest,
) -> Result<BuildContext, DeployError> {
    let function = request.function();
    let dir = root.join(function.as_str());

    if dir.exists() {
        std::fs::remove_dir_all(&dir).map_err(|e| DeployError::context(&dir, e))?;
    }
    std::fs::create_dir_all(&dir).map_err(|e| DeployError::context(&dir, e))?;

    let context = BuildContext {
        dir,
        source_file: function.source_file(),
    };

    let files = [
        (context.dockerfile(), dockerfile(base_image, function)),
        (context.source(), request.code().to_string()),
        (context.manifest(), manifest(request.dependency_specifiers())),
    ];
    for (path, content) in files {
        std::fs::write(&path, content).map_err(|e| DeployError::context(&path, e))?;
    }

    tracing::debug!(dir = %context.dir.display(), "wrote build context");
    Ok(context)
}
