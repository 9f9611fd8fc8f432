use std::process::Command;

use anyhow::{Context, Result};

/// Every workspace package, in dependency order.
const PACKAGES: &[&str] =
    &["altolink-domain", "altolink-common", "altolink-core", "altolink-infra", "altolink-api"];

/// Check that each package compiles on its own, including its tests.
///
/// Catches features that only compile through workspace feature unification.
pub fn check_packages() -> Result<()> {
    println!("Checking {} altolink packages in isolation...", PACKAGES.len());

    for (index, package) in PACKAGES.iter().enumerate() {
        println!("\n[{}/{}] cargo check -p {package} --all-targets", index + 1, PACKAGES.len());

        let status = Command::new("cargo")
            .args(["check", "-p", package, "--all-targets"])
            .status()
            .with_context(|| format!("Failed to run cargo check for '{package}'"))?;

        if !status.success() {
            anyhow::bail!("Package '{package}' failed to compile");
        }

        println!("✅ {package} compiled successfully");
    }

    println!("\n✅ All {} packages compile in isolation!", PACKAGES.len());

    Ok(())
}
