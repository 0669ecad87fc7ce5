// ABOUTME: Integration tests for build context materialization.
// ABOUTME: Verifies exact file contents and that stale files never leak into a build.

mod support;

use lambship::deploy::{DeployErrorKind, DeploymentRequest, write_build_context};
use std::fs;
use support::{function_name, request};

const BASE_IMAGE: &str = "public.ecr.aws/lambda/python:3.8";

fn entries(dir: &std::path::Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn writes_exactly_three_artifacts() {
    let scratch = tempfile::tempdir().unwrap();
    let request = request("my_lambda_function");

    let context = write_build_context(scratch.path(), BASE_IMAGE, &request).unwrap();

    assert_eq!(context.dir(), scratch.path().join("my_lambda_function"));
    assert_eq!(
        entries(context.dir()),
        vec!["Dockerfile", "my_lambda_function.py", "requirements.txt"]
    );
}

#[test]
fn artifacts_have_exact_content() {
    let scratch = tempfile::tempdir().unwrap();
    let request = request("my_lambda_function");

    let context = write_build_context(scratch.path(), BASE_IMAGE, &request).unwrap();

    assert_eq!(
        fs::read_to_string(context.dockerfile()).unwrap(),
        "FROM public.ecr.aws/lambda/python:3.8\n\
         COPY . ${LAMBDA_TASK_ROOT}\n\
         RUN pip install -r requirements.txt\n\
         CMD [\"my_lambda_function.handler\"]\n"
    );
    assert_eq!(
        fs::read_to_string(context.source()).unwrap(),
        request.code()
    );
    assert_eq!(
        fs::read_to_string(context.manifest()).unwrap(),
        "requests==2.31.0\nboto3"
    );
}

#[test]
fn no_requirements_writes_empty_manifest() {
    let scratch = tempfile::tempdir().unwrap();
    let request = DeploymentRequest::new(function_name("bare"), "def handler(e, c): pass\n");

    let context = write_build_context(scratch.path(), BASE_IMAGE, &request).unwrap();

    assert_eq!(fs::read_to_string(context.manifest()).unwrap(), "");
}

#[test]
fn custom_base_image_is_used() {
    let scratch = tempfile::tempdir().unwrap();
    let request = request("fn");

    let context =
        write_build_context(scratch.path(), "public.ecr.aws/lambda/python:3.12", &request)
            .unwrap();

    let dockerfile = fs::read_to_string(context.dockerfile()).unwrap();
    assert!(dockerfile.starts_with("FROM public.ecr.aws/lambda/python:3.12\n"));
}

#[test]
fn rewriting_removes_stale_files() {
    let scratch = tempfile::tempdir().unwrap();
    let request = request("fn");

    let context = write_build_context(scratch.path(), BASE_IMAGE, &request).unwrap();
    fs::write(context.dir().join("leftover.py"), "secret = 1").unwrap();
    fs::create_dir(context.dir().join("__pycache__")).unwrap();

    let context = write_build_context(scratch.path(), BASE_IMAGE, &request).unwrap();
    assert_eq!(
        entries(context.dir()),
        vec!["Dockerfile", "fn.py", "requirements.txt"]
    );
}

#[test]
fn functions_get_separate_directories() {
    let scratch = tempfile::tempdir().unwrap();

    write_build_context(scratch.path(), BASE_IMAGE, &request("first")).unwrap();
    write_build_context(scratch.path(), BASE_IMAGE, &request("second")).unwrap();

    assert_eq!(entries(scratch.path()), vec!["first", "second"]);
    assert_eq!(
        entries(&scratch.path().join("first")),
        vec!["Dockerfile", "first.py", "requirements.txt"]
    );
}

#[test]
fn unwritable_root_is_a_context_error() {
    let scratch = tempfile::tempdir().unwrap();
    let blocker = scratch.path().join("not-a-dir");
    fs::write(&blocker, "file").unwrap();

    let err = write_build_context(&blocker, BASE_IMAGE, &request("fn")).unwrap_err();
    assert_eq!(err.kind(), DeployErrorKind::Context);
    assert!(err.to_string().contains("not-a-dir"));
}
