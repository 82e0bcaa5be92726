use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use oppdesk::api::ApiClient;
use oppdesk::config::ClientConfig;

pub struct ServerGuard {
    pub base_url: String,
    _data_dir: tempfile::TempDir,
    child: Child,
}

impl Drop for ServerGuard {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

impl ServerGuard {
    #[allow(dead_code)]
    pub fn client(&self) -> Result<ApiClient> {
        let config = ClientConfig {
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(5),
        };
        ApiClient::new(&config)
    }
}

/// Server with an empty store and sync unconfigured.
#[allow(dead_code)]
pub fn spawn_server() -> Result<ServerGuard> {
    spawn(None)
}

/// Server whose sync run upserts `rows` (a JSON array of opportunity payloads).
#[allow(dead_code)]
pub fn spawn_server_with_sync_source(rows: &serde_json::Value) -> Result<ServerGuard> {
    spawn(Some(rows))
}

fn spawn(sync_rows: Option<&serde_json::Value>) -> Result<ServerGuard> {
    let data_dir = tempfile::tempdir().context("create server tempdir")?;
    let addr_file = data_dir.path().join("addr.txt");

    let mut cmd = Command::new(env!("CARGO_BIN_EXE_oppdesk-server"));
    cmd.args(["--addr", "127.0.0.1:0", "--addr-file"])
        .arg(&addr_file);

    if let Some(rows) = sync_rows {
        let source = data_dir.path().join("sync-source.json");
        std::fs::write(&source, serde_json::to_vec(rows)?).context("write sync source")?;
        cmd.arg("--sync-source").arg(&source);
    }

    let child = cmd
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .context("spawn oppdesk-server")?;

    let base_url = read_addr_file(&addr_file)?;
    wait_for_healthz(&base_url)?;

    Ok(ServerGuard {
        base_url,
        _data_dir: data_dir,
        child,
    })
}

fn read_addr_file(addr_file: &Path) -> Result<String> {
    let start = Instant::now();
    loop {
        if start.elapsed() > Duration::from_secs(5) {
            anyhow::bail!("addr file not written at {}", addr_file.display());
        }

        if let Ok(s) = std::fs::read_to_string(addr_file) {
            let s = s.trim();
            if !s.is_empty() {
                return Ok(format!("http://{}", s));
            }
        }
        thread::sleep(Duration::from_millis(10));
    }
}

pub fn wait_for_healthz(base_url: &str) -> Result<()> {
    let client = reqwest::blocking::Client::new();
    let start = Instant::now();
    loop {
        if start.elapsed() > Duration::from_secs(5) {
            anyhow::bail!("server did not become healthy at {}/healthz", base_url);
        }
        match client.get(format!("{}/healthz", base_url)).send() {
            Ok(resp) if resp.status().is_success() => return Ok(()),
            _ => {
                thread::sleep(Duration::from_millis(50));
            }
        }
    }
}
