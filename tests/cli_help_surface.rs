use std::process::Command;

use anyhow::{Context, Result};

fn run_oppdesk(args: &[&str]) -> Result<String> {
    let out = Command::new(env!("CARGO_BIN_EXE_oppdesk"))
        .args(args)
        .output()
        .with_context(|| format!("run oppdesk {:?}", args))?;

    if !out.status.success() {
        anyhow::bail!(
            "oppdesk {:?} failed (status {:?})\nstdout:\n{}\nstderr:\n{}",
            args,
            out.status,
            String::from_utf8_lossy(&out.stdout),
            String::from_utf8_lossy(&out.stderr)
        );
    }

    Ok(String::from_utf8_lossy(&out.stdout).to_string())
}

#[test]
fn cli_help_surface_is_stable() -> Result<()> {
    let help = run_oppdesk(&["--help"])?;
    assert!(help.contains("Usage: oppdesk"));
    assert!(help.contains("[COMMAND]"));
    for cmd in [
        "list", "show", "create", "update", "delete", "stats", "attention", "sync",
    ] {
        assert!(help.contains(cmd), "missing {cmd} in help");
    }
    assert!(help.contains("--api-url"));

    let create_help = run_oppdesk(&["create", "--help"])?;
    assert!(create_help.contains("Usage: oppdesk create"));
    assert!(create_help.contains("--set <FIELD=VALUE>"));

    let sync_help = run_oppdesk(&["sync", "--help"])?;
    assert!(sync_help.contains("--status"));

    Ok(())
}
