use std::process::Command;

fn main() {
    // Stamp the short commit hash so the WASM build can report what it was
    // built from. Falls back to "unknown" outside a git checkout.
    let commit = Command::new("git")
        .args(["rev-parse", "--short=8", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|hash| hash.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=BUILD_COMMIT={}", commit);
    println!("cargo:rerun-if-changed=.git/HEAD");
}
