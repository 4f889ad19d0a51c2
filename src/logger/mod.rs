//! Logger module
//!
//! Provides logging utilities for the credential hashing service:
//! - Server lifecycle logging
//! - Per-request access logging
//! - Error logging for rejected requests
//! - File-based logging support
//!
//! Logging is fire-and-forget; it never fails a request.

pub mod writer;

use chrono::Local;
use std::net::SocketAddr;

use crate::config::Config;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

/// Write to info/access log
fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_info(message),
        None => println!("{message}"),
    }
}

/// Write to error log
fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    write_info("======================================");
    write_info("Credential hash server started");
    write_info(&format!("Listening on: http://{addr}"));
    write_info(&format!("Hash endpoint: {}", config.routes.hash_path));
    write_info(&format!("Digest algorithm: {}", config.hash.algorithm));
    write_info(&format!("Max body size: {} bytes", config.http.max_body_size));
    write_info(&format!("Log level: {}", config.logging.level));
    if let Some(workers) = config.server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    write_info("======================================\n");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    write_info(&format!("[Connection] Accepted from: {peer_addr}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

/// Info entry emitted once per successful digest
pub fn log_digest_created() {
    write_info("digest created");
}

/// Common-log style access line for a completed request
pub fn log_request(method: &str, path: &str, status: u16, body_bytes: usize) {
    write_info(&format!(
        "[{}] \"{method} {path}\" {status} {body_bytes}",
        Local::now().format("%d/%b/%Y:%H:%M:%S %z"),
    ));
}

pub fn log_shutdown() {
    write_info("\n[Shutdown] Server stopping, waiting for in-flight connections");
}
