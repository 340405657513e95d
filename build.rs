//! Build script: embeds version information.

use std::process::Command;

fn main() {
    // PONDORASTI_VERSION wins (release builds); local builds use git describe.
    if let Ok(version) = std::env::var("PONDORASTI_VERSION") {
        println!("cargo:rustc-env=PONDORASTI_VERSION={version}");
    } else if let Ok(output) = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        && output.status.success()
    {
        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !version.is_empty() {
            println!("cargo:rustc-env=PONDORASTI_VERSION={version}");
        }
    }

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");
    println!("cargo:rerun-if-env-changed=PONDORASTI_VERSION");
}
