use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Run the CLI binary against a server with an isolated data directory.
pub fn run_cli(args: &[&str], data_dir: &Path, server: &str) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_sesh"));
    cmd.args(args);
    cmd.env("SESH_DATA_DIR", data_dir);
    cmd.env("SESH_SERVER", server);
    cmd.env("CLICOLOR", "0");
    cmd.env_remove("RUST_LOG");
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI off the async runtime so a mock server can answer it.
pub async fn run_cli_async(args: &[&str], data_dir: &Path, server: &str) -> Output {
    let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
    let data_dir: PathBuf = data_dir.to_path_buf();
    let server = server.to_string();

    tokio::task::spawn_blocking(move || {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        run_cli(&args, &data_dir, &server)
    })
    .await
    .expect("CLI task panicked")
}

/// Run the CLI and expect success, returning stdout.
pub async fn run_cli_success(args: &[&str], data_dir: &Path, server: &str) -> String {
    let output = run_cli_async(args, data_dir, server).await;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}
