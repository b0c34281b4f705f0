//! # Runtime
//!
//! A thin orchestration layer for the [Tokio](https://tokio.rs) async runtime.
//!
//! This crate provides the runtime profiles used across the workspace so every
//! binary boots the same way.
//!
//! ## Profiles
//! * **UI**: A current-thread runtime. Interactive shells run their whole event loop
//!   cooperatively on one thread, so tenant state needs no locking discipline beyond
//!   the single-writer rule.
//! * **Service**: A multi-threaded runtime for background workloads.
//!
//! ## Example
//!
//! ```rust,ignore
//! #[ehub_runtime::main(ui)]
//! async fn main() -> anyhow::Result<()> {
//!     Ok(())
//! }
//! ```

pub use anyhow::Result;
pub use ehub_derive::main;

use anyhow::anyhow;
use std::{sync::OnceLock, thread::available_parallelism, time::Duration};
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

/// The default number of worker threads if detection fails.
const DEFAULT_WORKER_THREADS: usize = 4;
/// The default stack size for threads (3 `MiB`).
const DEFAULT_STACK_SIZE: usize = 3 * 1024 * 1024;
/// Minimum allowed stack size (1 `MiB`).
const MIN_STACK_SIZE: usize = 1024 * 1024;
/// Maximum allowed stack size (16 `MiB`).
const MAX_STACK_SIZE: usize = 16 * 1024 * 1024;
/// How long an idle thread stays alive.
const THREAD_KEEP_ALIVE: Duration = Duration::from_secs(60);
const DEFAULT_THREAD_NAME: &str = "ehub-worker";

static WORKER_THREADS: OnceLock<usize> = OnceLock::new();

/// Detects the number of worker threads from `TOKIO_WORKER_THREADS` or the hardware.
fn get_worker_threads() -> usize {
    *WORKER_THREADS.get_or_init(|| {
        std::env::var("TOKIO_WORKER_THREADS")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .filter(|&n| n > 0 && n <= 1024)
            .unwrap_or_else(|| {
                available_parallelism()
                    .map(std::num::NonZero::get)
                    .unwrap_or(DEFAULT_WORKER_THREADS)
            })
    })
}

fn validate_stack_size(stack_size: usize) -> usize {
    stack_size.clamp(MIN_STACK_SIZE, MAX_STACK_SIZE)
}

fn normalize_thread_name(name: &str) -> String {
    if name.trim().is_empty() { DEFAULT_THREAD_NAME.to_owned() } else { name.to_owned() }
}

/// Scheduler flavour of the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    /// Every task runs on the thread that calls `block_on`.
    CurrentThread,
    MultiThread,
}

/// Configuration for the Tokio runtime.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub flavor: Flavor,
    pub worker_threads: usize,
    pub stack_size: usize,
    pub thread_name: String,
    pub thread_keep_alive: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            flavor: Flavor::MultiThread,
            worker_threads: get_worker_threads(),
            stack_size: DEFAULT_STACK_SIZE,
            thread_name: DEFAULT_THREAD_NAME.to_owned(),
            thread_keep_alive: THREAD_KEEP_ALIVE,
        }
    }
}

impl RuntimeConfig {
    /// Preset for interactive shells: one cooperative thread.
    #[must_use = "Use this configuration for single-threaded interactive applications"]
    pub fn ui() -> Self {
        Self {
            flavor: Flavor::CurrentThread,
            worker_threads: 1,
            stack_size: DEFAULT_STACK_SIZE,
            thread_name: "ehub-ui".to_owned(),
            thread_keep_alive: Duration::from_secs(30),
        }
    }

    /// Preset for background services.
    #[must_use = "Use this configuration for multi-threaded services"]
    pub fn service() -> Self {
        Self {
            flavor: Flavor::MultiThread,
            worker_threads: get_worker_threads(),
            stack_size: 4 * 1024 * 1024,
            thread_name: "ehub-svc".to_owned(),
            thread_keep_alive: Duration::from_secs(300),
        }
    }

    #[must_use = "Customize the number of worker threads for the runtime"]
    pub fn with_worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = threads.clamp(1, 1024);
        self
    }

    #[must_use = "Customize the stack size for worker threads"]
    pub fn with_stack_size(mut self, size: usize) -> Self {
        self.stack_size = validate_stack_size(size);
        self
    }

    #[must_use = "Customize the thread name"]
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = normalize_thread_name(&name.into());
        self
    }

    #[must_use = "Customize how long idle threads stay alive"]
    pub const fn with_thread_keep_alive(mut self, keep_alive: Duration) -> Self {
        self.thread_keep_alive = keep_alive;
        self
    }

    fn normalized(&self) -> Self {
        Self {
            flavor: self.flavor,
            worker_threads: self.worker_threads.clamp(1, 1024),
            stack_size: validate_stack_size(self.stack_size),
            thread_name: normalize_thread_name(&self.thread_name),
            thread_keep_alive: self.thread_keep_alive,
        }
    }
}

/// Creates a new Tokio runtime from `config`.
///
/// Worker count, stack size and thread name are clamped to safe bounds first.
/// A [`Flavor::CurrentThread`] config ignores the worker settings.
///
/// # Errors
///
/// Returns an [`anyhow::Error`] if the runtime cannot be created, typically due to
/// OS-level limits on thread creation.
///
/// # Examples
///
/// ```rust
/// use ehub_runtime::{build_runtime_with_config, RuntimeConfig};
///
/// let runtime = build_runtime_with_config(&RuntimeConfig::ui())?;
/// let answer = runtime.block_on(async { 40 + 2 });
/// assert_eq!(answer, 42);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn build_runtime_with_config(config: &RuntimeConfig) -> Result<Runtime> {
    let config = config.normalized();
    debug!(config = ?config, "Building tokio runtime");

    let mut builder = match config.flavor {
        Flavor::CurrentThread => Builder::new_current_thread(),
        Flavor::MultiThread => {
            let mut builder = Builder::new_multi_thread();
            builder
                .worker_threads(config.worker_threads)
                .thread_keep_alive(config.thread_keep_alive);
            builder
        },
    };

    builder.thread_name(&config.thread_name).thread_stack_size(config.stack_size).enable_all();

    builder.build().map_err(|e| anyhow!("Failed to initialize runtime: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worker_threads_validation() {
        let config = RuntimeConfig::default().with_worker_threads(0);
        assert_eq!(config.worker_threads, 1);

        let config = RuntimeConfig::default().with_worker_threads(2000);
        assert_eq!(config.worker_threads, 1024);
    }

    #[test]
    fn test_stack_size_validation() {
        let config = RuntimeConfig::default().with_stack_size(100);
        assert_eq!(config.stack_size, MIN_STACK_SIZE);

        let config = RuntimeConfig::default().with_stack_size(100 * 1024 * 1024);
        assert_eq!(config.stack_size, MAX_STACK_SIZE);
    }

    #[test]
    fn test_blank_thread_name_falls_back() {
        let config = RuntimeConfig::ui().with_thread_name("  ");
        assert_eq!(config.thread_name, DEFAULT_THREAD_NAME);
    }

    #[test]
    fn test_ui_profile_is_single_threaded() {
        let config = RuntimeConfig::ui();
        assert_eq!(config.flavor, Flavor::CurrentThread);

        let rt = build_runtime_with_config(&config).expect("ui runtime");
        let caller = std::thread::current().id();
        let inner = rt.block_on(async { std::thread::current().id() });
        assert_eq!(caller, inner, "ui runtime must poll on the calling thread");
    }

    #[test]
    fn test_service_profile_runs_on_workers() {
        let config = RuntimeConfig::service();
        assert_eq!(config.flavor, Flavor::MultiThread);

        let rt = build_runtime_with_config(&config).expect("service runtime");
        let answer = rt.block_on(async { tokio::spawn(async { 40 + 2 }).await });
        assert_eq!(answer.expect("join"), 42);
    }
}
