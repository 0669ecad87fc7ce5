// ABOUTME: Test support utilities.
// ABOUTME: In-memory engine, registry and function fakes plus request helpers.

// Each test binary only uses some of these helpers, so allow dead_code.
#![allow(dead_code)]

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use lambship::deploy::{Deployer, DeployerConfig, DeploymentRequest};
use lambship::platform::{
    BuildReport, BuildRequest, FunctionError, FunctionInfo, FunctionOps, FunctionSpec,
    FunctionStatus, ImageError, ImageOps, PushReport, RegistryCredentials, RegistryError,
    RegistryOps, RepositoryStatus,
};
use lambship::types::{FunctionName, ImageRef, VersionTag};
use parking_lot::Mutex;
use std::collections::{HashSet, VecDeque};
use std::path::Path;
use std::sync::Once;
use std::time::Duration;

pub const PROXY_ENDPOINT: &str = "https://123456789012.dkr.ecr.us-east-1.amazonaws.com";
pub const REGISTRY: &str = "123456789012.dkr.ecr.us-east-1.amazonaws.com";
pub const ROLE_ARN: &str = "arn:aws:iam::123456789012:role/lambda-exec";

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests. Safe to call multiple times.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter = EnvFilter::from_default_env()
            .add_directive("lambship=debug".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

pub fn function_name(name: &str) -> FunctionName {
    FunctionName::new(name).unwrap()
}

pub fn handler_code() -> String {
    "def handler(event, context):\n    return {'statusCode': 200, 'body': 'hello'}\n".to_string()
}

/// Request asking for non-default timeout and memory.
pub fn request(name: &str) -> DeploymentRequest {
    DeploymentRequest::new(function_name(name), handler_code())
        .requirements(vec!["requests==2.31.0".to_string(), "boto3".to_string()])
        .version(VersionTag::new("v1.0").unwrap())
        .timeout(Duration::from_secs(60))
        .memory_size(1024)
}

pub fn deployer_config(scratch_root: &Path) -> DeployerConfig {
    DeployerConfig::new(scratch_root).with_role(ROLE_ARN)
}

pub fn deployer(
    scratch_root: &Path,
    functions: FakeFunctions,
) -> Deployer<FakeEngine, FakeRegistry, FakeFunctions> {
    Deployer::new(
        deployer_config(scratch_root),
        FakeEngine::default(),
        FakeRegistry::default(),
        functions,
    )
}

// =============================================================================
// FakeEngine
// =============================================================================

#[derive(Default)]
pub struct FakeEngine {
    state: Mutex<EngineState>,
}

#[derive(Default)]
struct EngineState {
    builds: Vec<BuildRequest>,
    pushes: Vec<(ImageRef, RegistryCredentials)>,
    build_error: Option<String>,
    push_error: Option<String>,
}

impl FakeEngine {
    pub fn failing_build(message: &str) -> Self {
        let engine = Self::default();
        engine.state.lock().build_error = Some(message.to_string());
        engine
    }

    pub fn failing_push(message: &str) -> Self {
        let engine = Self::default();
        engine.state.lock().push_error = Some(message.to_string());
        engine
    }

    pub fn builds(&self) -> Vec<BuildRequest> {
        self.state.lock().builds.clone()
    }

    pub fn pushes(&self) -> Vec<(ImageRef, RegistryCredentials)> {
        self.state.lock().pushes.clone()
    }
}

#[async_trait]
impl ImageOps for FakeEngine {
    async fn build_image(&self, request: &BuildRequest) -> Result<BuildReport, ImageError> {
        let mut state = self.state.lock();
        state.builds.push(request.clone());
        match &state.build_error {
            Some(message) => Err(ImageError::BuildFailed(message.clone())),
            None => Ok(BuildReport { log_lines: 4 }),
        }
    }

    async fn push_image(
        &self,
        reference: &ImageRef,
        credentials: &RegistryCredentials,
    ) -> Result<PushReport, ImageError> {
        let mut state = self.state.lock();
        state.pushes.push((reference.clone(), credentials.clone()));
        match &state.push_error {
            Some(message) => Err(ImageError::PushFailed(message.clone())),
            None => Ok(PushReport { progress_lines: 3 }),
        }
    }
}

// =============================================================================
// FakeRegistry
// =============================================================================

pub struct FakeRegistry {
    token: String,
    endpoint: String,
    state: Mutex<RegistryState>,
}

#[derive(Default)]
struct RegistryState {
    repositories: HashSet<String>,
    create_calls: usize,
    reject_auth: bool,
    repository_error: Option<String>,
}

impl Default for FakeRegistry {
    fn default() -> Self {
        Self {
            token: STANDARD.encode("AWS:secret-token"),
            endpoint: PROXY_ENDPOINT.to_string(),
            state: Mutex::new(RegistryState::default()),
        }
    }
}

impl FakeRegistry {
    pub fn with_token(token: &str) -> Self {
        Self {
            token: token.to_string(),
            ..Self::default()
        }
    }

    pub fn rejecting() -> Self {
        let registry = Self::default();
        registry.state.lock().reject_auth = true;
        registry
    }

    pub fn failing_repository(message: &str) -> Self {
        let registry = Self::default();
        registry.state.lock().repository_error = Some(message.to_string());
        registry
    }

    pub fn with_repository(self, name: &str) -> Self {
        self.state.lock().repositories.insert(name.to_string());
        self
    }

    pub fn create_calls(&self) -> usize {
        self.state.lock().create_calls
    }

    pub fn has_repository(&self, name: &str) -> bool {
        self.state.lock().repositories.contains(name)
    }
}

#[async_trait]
impl RegistryOps for FakeRegistry {
    async fn authorize(&self) -> Result<RegistryCredentials, RegistryError> {
        if self.state.lock().reject_auth {
            return Err(RegistryError::AuthorizationRejected(
                "AccessDeniedException".to_string(),
            ));
        }
        RegistryCredentials::from_token(&self.token, &self.endpoint)
    }

    async fn create_repository(
        &self,
        name: &FunctionName,
    ) -> Result<RepositoryStatus, RegistryError> {
        let mut state = self.state.lock();
        state.create_calls += 1;
        if let Some(reason) = &state.repository_error {
            return Err(RegistryError::RepositoryCreation {
                name: name.to_string(),
                reason: reason.clone(),
            });
        }
        if state.repositories.insert(name.to_string()) {
            Ok(RepositoryStatus::Created)
        } else {
            Ok(RepositoryStatus::AlreadyExists)
        }
    }
}

// =============================================================================
// FakeFunctions
// =============================================================================

/// Scripted compute platform.
///
/// Status queries pop from `statuses`; once the script runs out every query
/// reports `InProgress`.
pub struct FakeFunctions {
    state: Mutex<FunctionsState>,
}

struct FunctionsState {
    exists: bool,
    statuses: VecDeque<Result<FunctionStatus, String>>,
    update_error: Option<String>,
    create_conflict: bool,
    updates: Vec<ImageRef>,
    creates: Vec<FunctionSpec>,
    queries: usize,
}

impl FakeFunctions {
    fn new(exists: bool) -> Self {
        Self {
            state: Mutex::new(FunctionsState {
                exists,
                statuses: VecDeque::new(),
                update_error: None,
                create_conflict: false,
                updates: Vec::new(),
                creates: Vec::new(),
                queries: 0,
            }),
        }
    }

    pub fn existing() -> Self {
        Self::new(true)
    }

    pub fn missing() -> Self {
        Self::new(false)
    }

    pub fn with_statuses(self, statuses: Vec<Result<FunctionStatus, String>>) -> Self {
        self.state.lock().statuses = statuses.into();
        self
    }

    /// Successful on the `n`th query, in progress before.
    pub fn successful_on(self, n: usize) -> Self {
        let mut statuses: Vec<_> = (1..n).map(|_| Ok(FunctionStatus::InProgress)).collect();
        statuses.push(Ok(FunctionStatus::Successful));
        self.with_statuses(statuses)
    }

    pub fn failing_updates(self, message: &str) -> Self {
        self.state.lock().update_error = Some(message.to_string());
        self
    }

    /// Creation loses a race: another caller created the function first.
    pub fn losing_create_race(self) -> Self {
        self.state.lock().create_conflict = true;
        self
    }

    pub fn queries(&self) -> usize {
        self.state.lock().queries
    }

    pub fn updates(&self) -> Vec<ImageRef> {
        self.state.lock().updates.clone()
    }

    pub fn creates(&self) -> Vec<FunctionSpec> {
        self.state.lock().creates.clone()
    }

    fn info(name: &FunctionName, status: FunctionStatus) -> FunctionInfo {
        FunctionInfo {
            arn: Some(format!(
                "arn:aws:lambda:us-east-1:123456789012:function:{}",
                name
            )),
            status,
        }
    }
}

#[async_trait]
impl FunctionOps for FakeFunctions {
    async fn update_function_code(
        &self,
        name: &FunctionName,
        image: &ImageRef,
    ) -> Result<FunctionInfo, FunctionError> {
        let mut state = self.state.lock();
        if let Some(message) = &state.update_error {
            return Err(FunctionError::Api(message.clone()));
        }
        if !state.exists {
            return Err(FunctionError::NotFound(name.to_string()));
        }
        state.updates.push(image.clone());
        Ok(Self::info(name, FunctionStatus::InProgress))
    }

    async fn create_function(&self, spec: &FunctionSpec) -> Result<FunctionInfo, FunctionError> {
        let mut state = self.state.lock();
        state.creates.push(spec.clone());
        if state.create_conflict {
            state.exists = true;
            return Err(FunctionError::AlreadyExists(spec.name.to_string()));
        }
        state.exists = true;
        Ok(Self::info(&spec.name, FunctionStatus::InProgress))
    }

    async fn get_function(&self, name: &FunctionName) -> Result<FunctionInfo, FunctionError> {
        let mut state = self.state.lock();
        state.queries += 1;
        if !state.exists {
            return Err(FunctionError::NotFound(name.to_string()));
        }
        match state.statuses.pop_front() {
            Some(Ok(status)) => Ok(Self::info(name, status)),
            Some(Err(message)) => Err(FunctionError::Api(message)),
            None => Ok(Self::info(name, FunctionStatus::InProgress)),
        }
    }
}
