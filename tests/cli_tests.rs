mod common;

use common::{CommandOutput, TestContext};
use serde_json::json;
use std::fs;

const RELEASE_PATH: &str = "/repos/lemueld6200/my_afse/releases/latest";

#[test]
fn test_help_and_version() {
    let ctx = TestContext::new();

    // Test --help
    let output: CommandOutput = ctx
        .cmd()
        .arg("--help")
        .output()
        .expect("Failed to run release-relay")
        .into();

    output
        .assert_success()
        .assert_stdout_contains("Relay a GitHub repository's latest release")
        .assert_stdout_contains("Usage: release-relay");

    // Test version
    let output: CommandOutput = ctx
        .cmd()
        .arg("version")
        .output()
        .expect("Failed to run release-relay")
        .into();

    output.assert_success().assert_stdout_contains("release-relay v");
}

#[test]
fn test_fetch_without_token_fails() {
    let ctx = TestContext::new();
    let mut server = mockito::Server::new();
    let upstream = server.mock("GET", mockito::Matcher::Any).expect(0).create();

    let output: CommandOutput = ctx
        .cmd()
        .env("RELAY_API_BASE_URL", server.url())
        .arg("fetch")
        .output()
        .expect("Failed to run release-relay")
        .into();

    output
        .assert_failure()
        .assert_stdout_contains("no credential configured");
    upstream.assert();
}

#[test]
fn test_fetch_prints_version() {
    let ctx = TestContext::new();
    let mut server = mockito::Server::new();
    let release = server
        .mock("GET", RELEASE_PATH)
        .match_header("authorization", "token cli-test")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "tag_name": "v2.3.1", "assets": [] }).to_string())
        .create();

    let output: CommandOutput = ctx
        .cmd()
        .env("RELAY_API_BASE_URL", server.url())
        .env("TOKEN", "token cli-test")
        .arg("fetch")
        .output()
        .expect("Failed to run release-relay")
        .into();

    output.assert_success();
    assert_eq!(output.stdout.trim(), "2.3.1");
    release.assert();
}

#[test]
fn test_fetch_downloads_asset() {
    let ctx = TestContext::new();
    let mut server = mockito::Server::new();
    let release = server
        .mock("GET", RELEASE_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "tag_name": "v2.3.1",
                "assets": [{ "name": "app.bin", "url": format!("{}/assets/7", server.url()) }]
            })
            .to_string(),
        )
        .create();
    let redirect = server
        .mock("GET", "/assets/7")
        .with_status(302)
        .with_header("location", &format!("{}/cdn/app.bin", server.url()))
        .create();
    let content = server
        .mock("GET", "/cdn/app.bin")
        .with_status(200)
        .with_body("downloaded via relay")
        .create();

    let output: CommandOutput = ctx
        .cmd()
        .env("RELAY_API_BASE_URL", server.url())
        .env("TOKEN", "token cli-test")
        .args(["fetch", "app.bin", "--output", "out.bin"])
        .output()
        .expect("Failed to run release-relay")
        .into();

    output.assert_success().assert_stdout_contains("out.bin (20 bytes)");
    let saved = fs::read_to_string(ctx.temp_dir.path().join("out.bin")).expect("Asset not written");
    assert_eq!(saved, "downloaded via relay");
    release.assert();
    redirect.assert();
    content.assert();
}

#[test]
fn test_fetch_unknown_asset_fails() {
    let ctx = TestContext::new();
    let mut server = mockito::Server::new();
    let release = server
        .mock("GET", RELEASE_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "tag_name": "v2.3.1", "assets": [] }).to_string())
        .create();

    let output: CommandOutput = ctx
        .cmd()
        .env("RELAY_API_BASE_URL", server.url())
        .env("TOKEN", "token cli-test")
        .args(["fetch", "missing.bin"])
        .output()
        .expect("Failed to run release-relay")
        .into();

    output
        .assert_failure()
        .assert_stdout_contains("asset 'missing.bin' not found");
    release.assert();
}
