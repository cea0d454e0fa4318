//! Build script for the bus tracker
//! Tracks the embedded dataset and stamps the git commit into the binary

use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=data/mock_data.json");
    println!("cargo:rerun-if-env-changed=GIT_COMMIT");

    if std::env::var("GIT_COMMIT").is_ok() {
        return;
    }

    let commit = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok());

    if let Some(commit) = commit {
        println!("cargo:rustc-env=GIT_COMMIT={}", commit.trim());
    }
}
