//! Host scheduling primitives: one-shot frame callbacks and repeating timers.
//!
//! The engine never blocks or sleeps. It asks the host for a frame callback
//! or a repeating timer and gets back a handle; the host later calls
//! [`Player::on_frame`](crate::Player::on_frame) or
//! [`Player::on_timer`](crate::Player::on_timer) with the current time or the
//! timer's handle. Everything runs on one thread, one callback at a time.

/// Handle to a pending frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameRequest(pub u32);

/// Handle to a repeating timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(pub u32);

/// Host frame and timer scheduling.
pub trait Scheduler {
    /// Ask for one callback on the next display refresh.
    fn request_frame(&mut self) -> FrameRequest;

    /// Cancel a pending frame callback. Unknown handles are ignored.
    fn cancel_frame(&mut self, request: FrameRequest);

    /// Start a timer that fires every `interval_ms` until cancelled.
    fn start_timer(&mut self, interval_ms: u32) -> TimerId;

    /// Cancel a timer. Unknown handles are ignored.
    fn cancel_timer(&mut self, timer: TimerId);
}

/// Scheduler that only tracks what is outstanding.
///
/// For headless hosts that drive the player from their own loop: consume the
/// pending request with [`take_frame`](Self::take_frame) before delivering
/// the frame callback, and deliver ticks for each entry in
/// [`timers`](Self::timers) yourself.
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    next_handle: u32,
    frame: Option<FrameRequest>,
    timers: Vec<(TimerId, u32)>,
}

impl ManualScheduler {
    /// Create a scheduler with nothing outstanding.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the pending frame request, if any.
    #[inline]
    pub fn pending_frame(&self) -> Option<FrameRequest> {
        self.frame
    }

    /// Consume the pending frame request, as the host does when it fires.
    pub fn take_frame(&mut self) -> Option<FrameRequest> {
        self.frame.take()
    }

    /// Get the running timers with their intervals.
    #[inline]
    pub fn timers(&self) -> &[(TimerId, u32)] {
        &self.timers
    }

    fn next(&mut self) -> u32 {
        self.next_handle += 1;
        self.next_handle
    }
}

impl Scheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameRequest {
        let request = FrameRequest(self.next());
        self.frame = Some(request);
        request
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        if self.frame == Some(request) {
            self.frame = None;
        }
    }

    fn start_timer(&mut self, interval_ms: u32) -> TimerId {
        let timer = TimerId(self.next());
        self.timers.push((timer, interval_ms));
        timer
    }

    fn cancel_timer(&mut self, timer: TimerId) {
        self.timers.retain(|(id, _)| *id != timer);
    }
}

/// Browser `requestAnimationFrame` / `setInterval` scheduling.
#[cfg(feature = "web")]
pub mod web {
    use super::*;
    use std::collections::HashMap;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::{JsCast, JsValue};

    /// Scheduler backed by the browser window.
    ///
    /// Frame callbacks receive the `requestAnimationFrame` timestamp. Timer
    /// callbacks receive the [`TimerId`] number, so a single callback can
    /// serve every timer. Both callbacks must be bound with
    /// [`bind`](Self::bind) before anything is scheduled.
    #[derive(Default)]
    pub struct WindowScheduler {
        on_frame: Option<Closure<dyn FnMut(f64)>>,
        on_timer: Option<Closure<dyn FnMut(JsValue)>>,
        next_timer: u32,
        /// Our timer ids -> browser interval handles
        intervals: HashMap<u32, i32>,
    }

    impl WindowScheduler {
        /// Create an unbound scheduler.
        pub fn new() -> Self {
            Self::default()
        }

        /// Install the frame and timer callbacks.
        pub fn bind(&mut self, on_frame: Closure<dyn FnMut(f64)>, on_timer: Closure<dyn FnMut(JsValue)>) {
            self.on_frame = Some(on_frame);
            self.on_timer = Some(on_timer);
        }
    }

    impl Scheduler for WindowScheduler {
        fn request_frame(&mut self) -> FrameRequest {
            let handle = match (web_sys::window(), self.on_frame.as_ref()) {
                (Some(window), Some(cb)) => window
                    .request_animation_frame(cb.as_ref().unchecked_ref())
                    .unwrap_or_else(|err| {
                        log::error!("requestAnimationFrame failed: {:?}", err);
                        0
                    }),
                _ => {
                    log::error!("frame requested before the scheduler was bound");
                    0
                }
            };
            FrameRequest(handle as u32)
        }

        fn cancel_frame(&mut self, request: FrameRequest) {
            if let Some(window) = web_sys::window() {
                if let Err(err) = window.cancel_animation_frame(request.0 as i32) {
                    log::warn!("cancelAnimationFrame failed: {:?}", err);
                }
            }
        }

        fn start_timer(&mut self, interval_ms: u32) -> TimerId {
            self.next_timer += 1;
            let timer = TimerId(self.next_timer);

            if let (Some(window), Some(cb)) = (web_sys::window(), self.on_timer.as_ref()) {
                let args = js_sys::Array::of1(&JsValue::from(timer.0));
                match window.set_interval_with_callback_and_timeout_and_arguments(
                    cb.as_ref().unchecked_ref(),
                    interval_ms as i32,
                    &args,
                ) {
                    Ok(handle) => {
                        self.intervals.insert(timer.0, handle);
                    }
                    Err(err) => log::error!("setInterval failed: {:?}", err),
                }
            } else {
                log::error!("timer requested before the scheduler was bound");
            }
            timer
        }

        fn cancel_timer(&mut self, timer: TimerId) {
            if let Some(handle) = self.intervals.remove(&timer.0) {
                if let Some(window) = web_sys::window() {
                    window.clear_interval_with_handle(handle);
                }
            }
        }
    }
}
