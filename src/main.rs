//! Commit Viz - interactive commit-history scatter plot for a line-of-code export
//!
//! # Usage
//! ```bash
//! commit-viz loc.csv                    # Start server
//! commit-viz loc.csv --open             # Start and open browser
//! commit-viz loc.csv --config viz.toml  # Custom layout / repo slug
//! commit-viz status                     # Check if running
//! commit-viz kill                       # Stop running instance
//! ```

mod config;
mod dataset;
mod error;
mod models;
mod routes;
mod viz;

use std::fs;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use axum::Router;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use clap::{Parser, Subcommand};
use rust_embed::Embed;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use viz::VizContext;

/// Embedded page assets
#[derive(Embed)]
#[folder = "assets"]
struct Assets;

/// Commit Viz - explore a project's commit history in your browser
#[derive(Parser)]
#[command(name = "commit-viz")]
#[command(about = "Interactive commit-history visualization", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the line-of-code CSV export
    #[arg(value_name = "DATASET")]
    dataset: Option<String>,

    /// Open browser automatically after starting
    #[arg(short, long)]
    open: bool,

    /// Port to run the server on
    #[arg(short, long, default_value = "3001")]
    port: u16,

    /// TOML file overriding layout and repository settings
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// GitHub "owner/repo" used to build commit links
    #[arg(long, value_name = "OWNER/REPO")]
    repo_slug: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check if commit-viz is currently running
    Status,
    /// Stop the running commit-viz instance
    Kill,
}

/// PID file info stored as JSON
#[derive(serde::Serialize, serde::Deserialize)]
struct PidInfo {
    pid: u32,
    dataset: String,
    port: u16,
}

fn get_pid_file_path() -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push("commit-viz.pid");
    path
}

fn read_pid_info() -> Option<PidInfo> {
    let path = get_pid_file_path();
    let mut file = fs::File::open(&path).ok()?;
    let mut contents = String::new();
    file.read_to_string(&mut contents).ok()?;
    serde_json::from_str(&contents).ok()
}

fn write_pid_info(info: &PidInfo) -> anyhow::Result<()> {
    let path = get_pid_file_path();
    let mut file = fs::File::create(&path)?;
    file.write_all(serde_json::to_string(info)?.as_bytes())?;
    Ok(())
}

fn remove_pid_file() {
    let _ = fs::remove_file(get_pid_file_path());
}

#[cfg(unix)]
fn is_process_running(pid: u32) -> bool {
    // Signal 0 only checks that the process exists
    unsafe { libc::kill(pid as i32, 0) == 0 }
}

#[cfg(windows)]
fn is_process_running(pid: u32) -> bool {
    use std::process::Command;
    Command::new("tasklist")
        .args(["/FI", &format!("PID eq {}", pid), "/NH"])
        .output()
        .map(|output| String::from_utf8_lossy(&output.stdout).contains(&pid.to_string()))
        .unwrap_or(false)
}

#[cfg(unix)]
fn kill_process(pid: u32) -> bool {
    unsafe { libc::kill(pid as i32, libc::SIGTERM) == 0 }
}

#[cfg(windows)]
fn kill_process(pid: u32) -> bool {
    use std::process::Command;
    Command::new("taskkill")
        .args(["/PID", &pid.to_string(), "/F"])
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

fn handle_status() {
    match read_pid_info() {
        Some(info) if is_process_running(info.pid) => {
            println!("✓ commit-viz is running");
            println!("  PID:     {}", info.pid);
            println!("  Dataset: {}", info.dataset);
            println!("  URL:     http://127.0.0.1:{}", info.port);
        }
        Some(_) => {
            println!("✗ commit-viz is not running (stale PID file)");
            remove_pid_file();
        }
        None => println!("✗ commit-viz is not running"),
    }
}

fn handle_kill() {
    match read_pid_info() {
        Some(info) if is_process_running(info.pid) => {
            if kill_process(info.pid) {
                println!("✓ Stopped commit-viz (PID {})", info.pid);
                remove_pid_file();
            } else {
                println!("✗ Failed to stop commit-viz (PID {})", info.pid);
            }
        }
        Some(_) => {
            println!("✗ commit-viz is not running (stale PID file)");
            remove_pid_file();
        }
        None => println!("✗ commit-viz is not running"),
    }
}

fn asset_response(path: &str) -> Option<Response> {
    let content = Assets::get(path)?;
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    Some(([(header::CONTENT_TYPE, mime.to_string())], content.data.into_owned()).into_response())
}

/// Serve embedded static files
async fn serve_static(req: Request<Body>) -> Response {
    let path = req.uri().path().trim_start_matches('/');

    // Non-file paths get the page itself
    let path = if path.is_empty() || !path.contains('.') {
        "index.html"
    } else {
        path
    };

    asset_response(path)
        .or_else(|| asset_response("index.html"))
        .unwrap_or_else(|| (StatusCode::NOT_FOUND, "Not Found").into_response())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Status) => {
            handle_status();
            return Ok(());
        }
        Some(Commands::Kill) => {
            handle_kill();
            return Ok(());
        }
        None => {}
    }

    let Some(dataset_path) = cli.dataset else {
        eprintln!("Usage: commit-viz <DATASET> [--open] [--config FILE]");
        eprintln!("       commit-viz status");
        eprintln!("       commit-viz kill");
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  commit-viz meta/loc.csv        # Serve the visualization");
        eprintln!("  commit-viz meta/loc.csv -o     # ... and open the browser");
        std::process::exit(1);
    };

    if let Some(info) = read_pid_info() {
        if is_process_running(info.pid) {
            eprintln!("✗ commit-viz is already running (PID {})", info.pid);
            eprintln!("  Dataset: {}", info.dataset);
            eprintln!("  URL:     http://127.0.0.1:{}", info.port);
            eprintln!();
            eprintln!("Run 'commit-viz kill' to stop it first.");
            std::process::exit(1);
        } else {
            remove_pid_file();
        }
    }

    // Quiet by default; RUST_LOG=commit_viz=debug traces every view change
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut viz_config = match config::load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("✗ {}", e);
            std::process::exit(1);
        }
    };
    if let Some(slug) = cli.repo_slug {
        viz_config.repo_slug = slug;
        if let Err(e) = config::validate(&viz_config) {
            eprintln!("✗ {}", e);
            std::process::exit(1);
        }
    }

    let canonical_path = fs::canonicalize(&dataset_path)
        .unwrap_or_else(|_| PathBuf::from(&dataset_path));

    // No retry: without the dataset there is nothing to render
    let data = match dataset::load_dataset(&canonical_path, &viz_config.repo_slug) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("✗ Failed to load dataset: {}", e);
            eprintln!("  Path: {}", dataset_path);
            std::process::exit(1);
        }
    };
    let line_count = data.line_count;
    let skipped_records = data.skipped_records;
    let commit_count = data.commits.len();

    let shared_viz = Arc::new(RwLock::new(VizContext::new(data.commits, viz_config)));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .merge(routes::create_router(shared_viz))
        .fallback(get(serve_static))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = format!("127.0.0.1:{}", cli.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("✗ Failed to bind to port {}: {}", cli.port, e);
            eprintln!("  Try a different port with --port <PORT>");
            std::process::exit(1);
        }
    };

    let canonical_display = canonical_path.to_string_lossy().to_string();
    write_pid_info(&PidInfo {
        pid: std::process::id(),
        dataset: canonical_display.clone(),
        port: cli.port,
    })?;

    let url = format!("http://127.0.0.1:{}", cli.port);
    println!();
    println!("  ┌─────────────────────────────────────────────┐");
    println!("  │                 Commit Viz                  │");
    println!("  └─────────────────────────────────────────────┘");
    println!();
    println!("  Dataset: {}", canonical_display);
    println!("  Commits: {} ({} lines)", commit_count, line_count);
    if skipped_records > 0 {
        println!("  Skipped: {} malformed records", skipped_records);
    }
    println!("  Server:  {}", url);
    println!();
    println!("  Commands:");
    println!("    commit-viz status  - Check if running");
    println!("    commit-viz kill    - Stop the server");
    println!();
    println!("  Press Ctrl+C to stop");
    println!();

    if cli.open {
        if let Err(e) = open::that(&url) {
            eprintln!("  Warning: Could not open browser: {}", e);
        }
    }

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        println!("\n  Shutting down...");
        remove_pid_file();
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
