//! Stage stopwatch for `PerfStats`.
//!
//! The platform split lives in `now` / `since_ms` only: the browser has no
//! monotonic `Instant`, so wasm builds read `Date.now()` (millisecond wall
//! clock, may step backwards, hence the clamp).

#[cfg(target_arch = "wasm32")]
type Stamp = f64;
#[cfg(not(target_arch = "wasm32"))]
type Stamp = std::time::Instant;

#[inline]
fn now() -> Stamp {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        std::time::Instant::now()
    }
}

#[inline]
fn since_ms(start: &Stamp) -> f64 {
    #[cfg(target_arch = "wasm32")]
    {
        (js_sys::Date::now() - start).max(0.0)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        start.elapsed().as_secs_f64() * 1000.0
    }
}

#[derive(Clone, Copy)]
pub(crate) struct PerfTimer {
    start: Stamp,
}

impl PerfTimer {
    #[inline]
    pub(crate) fn start() -> Self {
        PerfTimer { start: now() }
    }

    #[inline]
    pub(crate) fn elapsed_ms(&self) -> f64 {
        since_ms(&self.start)
    }

    /// Time since the previous lap (or start); the next lap starts now.
    #[inline]
    pub(crate) fn lap_ms(&mut self) -> f64 {
        let ms = self.elapsed_ms();
        self.start = now();
        ms
    }
}
