use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;

/// One feature set the driver API is documented under.
///
/// `defmt` changes the derives on every public type, so a broken intra-doc
/// link or a `cfg_attr` typo can hide in one set and not the other.
struct DocVariant {
    name: &'static str,
    features: &'static str,
}

const VARIANTS: &[DocVariant] = &[
    DocVariant {
        name: "host",
        features: "dac/std",
    },
    DocVariant {
        name: "defmt",
        features: "dac/defmt",
    },
];

/// Separate target dir per variant so the two builds never overwrite each other.
fn target_dir(workspace: &Path, variant: &DocVariant) -> PathBuf {
    workspace.join("target").join(format!("doc-{}", variant.name))
}

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn run(open: bool) -> Result<()> {
    println!();
    println!("{}", "📚 Documenting dac + platform per feature set...".cyan().bold());
    println!();

    let workspace = workspace_root();
    let total_start = Instant::now();

    for variant in VARIANTS {
        let dir = target_dir(&workspace, variant);
        println!(
            "{}",
            format!("  {} ({})...", variant.name, variant.features).cyan()
        );
        let start = Instant::now();

        let output = Command::new("cargo")
            .current_dir(&workspace)
            .env("RUSTDOCFLAGS", "-D warnings")
            .args(["doc", "-p", "dac", "-p", "platform", "--no-deps"])
            .args(["--features", variant.features])
            .arg("--target-dir")
            .arg(&dir)
            .output()
            .with_context(|| format!("Failed to run cargo doc for {}", variant.name))?;

        if !output.status.success() {
            eprintln!("{}", format!("  ✗ {} docs failed", variant.name).red().bold());
            eprintln!();
            eprintln!("{}", String::from_utf8_lossy(&output.stderr));
            anyhow::bail!("Documentation build failed for the {} feature set", variant.name);
        }

        println!(
            "{}",
            format!(
                "  ✓ {} -> {} ({:.2}s)",
                variant.name,
                dir.join("doc/dac/index.html").display(),
                start.elapsed().as_secs_f64()
            )
            .green()
        );
    }

    println!();
    println!(
        "{}",
        format!(
            "✓ {} documentation sets built in {:.2}s",
            VARIANTS.len(),
            total_start.elapsed().as_secs_f64()
        )
        .green()
        .bold()
    );

    if open {
        // Host docs are the ones with std::error::Error impls listed
        if let Some(host) = VARIANTS.first() {
            let index = target_dir(&workspace, host).join("doc/dac/index.html");
            open_in_browser(&index)?;
        }
    }

    println!();
    Ok(())
}

fn open_in_browser(index: &Path) -> Result<()> {
    let opener = if cfg!(target_os = "macos") {
        "open"
    } else if cfg!(target_os = "windows") {
        "explorer"
    } else {
        "xdg-open"
    };
    Command::new(opener)
        .arg(index)
        .status()
        .with_context(|| format!("Failed to open {}", index.display()))?;
    Ok(())
}
