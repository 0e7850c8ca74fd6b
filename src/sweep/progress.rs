//! Terminal progress for scans and deletions.
//!
//! Each reporter owns its own bar and counters, so concurrent scans (or
//! tests) never share state. Rendering is delegated to indicatif, throttled
//! to one redraw per [`REFRESH_INTERVAL`].

use crossbeam_channel::{bounded, select, tick, Sender};
use humansize::{format_size, BINARY};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Minimum time between two redraws of a bar.
pub const REFRESH_INTERVAL: Duration = Duration::from_millis(100);

const SCAN_TEMPLATE: &str =
    "{prefix}: {bar:40.cyan} {percent:>3}% [{per_sec}] {msg}";
const DELETE_TEMPLATE: &str =
    "{prefix}: {bar:40.cyan} {percent:>3}% {pos}/{len} [{per_sec}, {eta} left]";
const BAR_CHARS: &str = "█░";

/// Where progress bars are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgressMode {
    /// Single redrawn line on stderr.
    #[default]
    Terminal,
    /// Nothing is drawn; counters still work.
    Hidden,
}

impl ProgressMode {
    fn new_bar(self, len: u64) -> ProgressBar {
        let hz = (1000 / REFRESH_INTERVAL.as_millis()) as u8;
        let target = match self {
            ProgressMode::Terminal => ProgressDrawTarget::stderr_with_hz(hz),
            ProgressMode::Hidden => ProgressDrawTarget::hidden(),
        };
        ProgressBar::with_draw_target(Some(len), target)
    }

    /// Bar for the delete phase, where the total is known up front.
    pub fn delete_bar(self, total: u64) -> ProgressBar {
        let bar = self.new_bar(total);
        bar.set_style(style(DELETE_TEMPLATE));
        bar.set_prefix("Deleting");
        bar
    }
}

fn style(template: &str) -> ProgressStyle {
    ProgressStyle::default_bar()
        .template(template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars(BAR_CHARS)
}

/// Total shown while scanning. The real total is unknown until the walk ends, so
/// the bar chases a target that keeps moving ahead of the count.
pub fn virtual_total(visited: u64) -> u64 {
    visited + visited / 3 + 1000
}

/// Counters written by the walker and its workers, read by the ticker.
#[derive(Debug, Default)]
pub struct ScanCounters {
    visited: AtomicU64,
    found: AtomicU64,
    found_bytes: AtomicU64,
}

impl ScanCounters {
    /// One filesystem entry (file or directory) was visited.
    pub fn visit(&self) {
        self.visited.fetch_add(1, Ordering::Relaxed);
    }

    /// A candidate was sized.
    pub fn record_candidate(&self, size: u64) {
        self.found.fetch_add(1, Ordering::Relaxed);
        self.found_bytes.fetch_add(size, Ordering::Relaxed);
    }

    pub fn visited(&self) -> u64 {
        self.visited.load(Ordering::Relaxed)
    }

    pub fn found(&self) -> u64 {
        self.found.load(Ordering::Relaxed)
    }

    pub fn found_bytes(&self) -> u64 {
        self.found_bytes.load(Ordering::Relaxed)
    }

    fn message(&self) -> String {
        format!(
            "{} entries, {} found ({})",
            self.visited(),
            self.found(),
            format_size(self.found_bytes(), BINARY)
        )
    }
}

/// Background thread that redraws the scan bar from [`ScanCounters`].
pub struct ScanTicker {
    counters: Arc<ScanCounters>,
    stop: Sender<()>,
    handle: Option<JoinHandle<()>>,
}

impl ScanTicker {
    /// Start ticking. The bar keeps redrawing until [`ScanTicker::finish`] is called.
    pub fn start(mode: ProgressMode) -> Self {
        let counters = Arc::new(ScanCounters::default());
        let bar = mode.new_bar(virtual_total(0));
        bar.set_style(style(SCAN_TEMPLATE));
        bar.set_prefix("Scanning");

        let (stop, stopped) = bounded::<()>(1);
        let ticks = tick(REFRESH_INTERVAL);
        let thread_counters = Arc::clone(&counters);

        let handle = thread::spawn(move || loop {
            select! {
                recv(ticks) -> _ => {
                    let visited = thread_counters.visited();
                    bar.set_length(virtual_total(visited));
                    bar.set_position(visited);
                    bar.set_message(thread_counters.message());
                }
                recv(stopped) -> _ => {
                    // Final frame: the real total is known now.
                    let visited = thread_counters.visited();
                    bar.set_length(visited);
                    bar.set_position(visited);
                    bar.set_message(thread_counters.message());
                    bar.finish();
                    break;
                }
            }
        });

        Self {
            counters,
            stop,
            handle: Some(handle),
        }
    }

    pub fn counters(&self) -> &Arc<ScanCounters> {
        &self.counters
    }

    /// Stop the ticker, draw the 100% frame and wait for the thread to exit.
    /// Returns the number of visited entries.
    pub fn finish(mut self) -> u64 {
        self.shutdown();
        self.counters.visited()
    }

    fn shutdown(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = self.stop.send(());
            if handle.join().is_err() {
                eprintln!("Warning: progress thread panicked");
            }
        }
    }
}

impl Drop for ScanTicker {
    fn drop(&mut self) {
        self.shutdown();
    }
}
