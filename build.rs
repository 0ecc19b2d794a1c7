// table-heatmap/build.rs
use std::process::Command;

fn main() {
    let version = std::env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| "0.0.0".to_string());
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());

    // Short commit hash, or "unknown" outside a git checkout
    let commit = Command::new("git")
        .args(["rev-parse", "--short=8", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let dirty = Command::new("git")
        .args(["diff", "--quiet"])
        .status()
        .map(|status| if status.success() { "" } else { "-dirty" })
        .unwrap_or("");

    println!(
        "cargo:rustc-env=TABLE_HEATMAP_VERSION={} {}{}-{}",
        version, commit, dirty, profile
    );

    println!("cargo:rerun-if-changed=.git/HEAD");
}
