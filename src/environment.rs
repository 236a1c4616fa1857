//! Runtime environment capture.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sysinfo::System;
use tracing::info;

const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Host facts recorded alongside every benchmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentInfo {
    pub captured_at: DateTime<Utc>,
    pub os_name: Option<String>,
    pub os_version: Option<String>,
    pub host_name: Option<String>,
    pub cpu_brand: Option<String>,
    pub cpu_cores: usize,
    pub total_memory_gb: f64,
    pub available_memory_gb: f64,
}

/// Log and capture runtime environment information.
pub fn log_runtime_environment() -> EnvironmentInfo {
    let env = capture_environment();

    info!("=== Runtime Environment ===");
    info!("Date/Time: {}", env.captured_at.format("%Y-%m-%d %H:%M:%S UTC"));
    info!(
        "OS: {} {}",
        env.os_name.as_deref().unwrap_or("unknown"),
        env.os_version.as_deref().unwrap_or("")
    );
    if let Some(host) = &env.host_name {
        info!("Host: {}", host);
    }
    info!("CPU: {}", env.cpu_brand.as_deref().unwrap_or("unknown"));
    info!("CPU cores visible: {}", env.cpu_cores);
    info!("Total memory: {:.2} GB", env.total_memory_gb);
    info!("Available memory: {:.2} GB", env.available_memory_gb);
    info!("===========================");

    env
}

fn capture_environment() -> EnvironmentInfo {
    let sys = System::new_all();
    let cpu_brand = sys
        .cpus()
        .first()
        .map(|cpu| cpu.brand().trim().to_string())
        .filter(|brand| !brand.is_empty());

    EnvironmentInfo {
        captured_at: Utc::now(),
        os_name: System::name(),
        os_version: System::os_version(),
        host_name: System::host_name(),
        cpu_brand,
        cpu_cores: num_cpus::get(),
        total_memory_gb: sys.total_memory() as f64 / BYTES_PER_GB,
        available_memory_gb: sys.available_memory() as f64 / BYTES_PER_GB,
    }
}
