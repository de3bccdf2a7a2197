//! Build script for ppov-api
//!
//! Embeds `GIT_HASH`, `BUILD_TIMESTAMP` and `BUILD_PROFILE` for the startup
//! banner. The script reruns when the checked-out commit changes, so the
//! timestamp records the last build that picked up a new commit.

use std::path::PathBuf;
use std::process::Command;

/// Run git and return trimmed stdout, or None outside a repository
fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }

    let text = String::from_utf8(output.stdout).ok()?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn watch_git_head() {
    let Some(git_dir) = git(&["rev-parse", "--git-dir"]).map(PathBuf::from) else {
        return;
    };

    // HEAD changes on checkout; the branch ref it names changes on commit
    println!("cargo:rerun-if-changed={}", git_dir.join("HEAD").display());
    if let Some(branch_ref) = git(&["symbolic-ref", "-q", "HEAD"]) {
        println!(
            "cargo:rerun-if-changed={}",
            git_dir.join(branch_ref).display()
        );
    }
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    watch_git_head();

    let git_hash = git(&["rev-parse", "--short=8", "HEAD"]).unwrap_or_else(|| "unknown".to_string());
    let build_timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());

    println!("cargo:rustc-env=GIT_HASH={}", git_hash);
    println!("cargo:rustc-env=BUILD_TIMESTAMP={}", build_timestamp);
    println!("cargo:rustc-env=BUILD_PROFILE={}", profile);
}
