pub use core::time::Duration;

// `std::time::Instant::now()` panics on `wasm32-unknown-unknown`; `web-time`
// backs it with `performance.now()` in the browser.
#[cfg(target_arch = "wasm32")]
pub use web_time::Instant;

#[cfg(not(target_arch = "wasm32"))]
pub use std::time::Instant;

/// Busy-waits on the calling thread for `d`.
///
/// This is the "main thread blocked" effect of the legacy stack demo: nothing
/// else on the thread (UI updates, heartbeat ticks, input) runs until it returns.
/// Returns the time actually spent.
pub fn spin_for(d: Duration) -> Duration {
    let started = Instant::now();
    while started.elapsed() < d {
        core::hint::spin_loop();
    }
    started.elapsed()
}

pub fn millis(ms: u32) -> Duration {
    Duration::from_millis(u64::from(ms))
}
