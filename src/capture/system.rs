//! The composite capture subsystem wiring hooks, state, motion and wheel.

use ::std::sync::Arc;
use ::tokio::sync::broadcast;
use ::tracing::{debug, warn};

use crate::{
    codes::InputCode,
    events::{CaptureEvent, MotionEvent, RawInputEvent},
    hook::{HookChannel, KeyboardHook, MouseHook, Sink},
    motion::{MotionSampler, SystemCursor},
    state::InputState,
    wheel::{ScrollDirection, WheelAggregator},
};

/// Which capture channels hold a live OS registration.
///
/// Registration failure of one channel is non-fatal: the subsystem runs with
/// whatever it could register (e.g. keyboard active, mouse inactive).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capability {
    pub keyboard: bool,
    pub mouse: bool,
}

impl Capability {
    /// Whether at least one channel is capturing.
    pub const fn any(self) -> bool {
        self.keyboard || self.mouse
    }
}

/// The global input capture subsystem.
///
/// Two execution contexts touch this object. The OS hook-callback context
/// updates the press-state table and wheel aggregator synchronously as
/// events arrive, system-wide and regardless of window focus. The consumer's
/// fixed-interval driver (typically ~60 Hz, owned by the rendering layer)
/// calls [`tick`] and queries [`is_pressed`]/[`is_scroll_active`] once per
/// frame. All shared state is per-key atomic, so neither context ever blocks
/// the other.
///
/// The thread that calls [`start`] must pump a Win32 message loop; the OS
/// delivers low-level hook callbacks through it. The rendering layer that
/// owns the overlay window provides this already.
///
/// Dropping the subsystem releases the hook registrations even if [`stop`]
/// was never called.
///
/// [`start`]: Self::start
/// [`stop`]: Self::stop
/// [`tick`]: Self::tick
/// [`is_pressed`]: Self::is_pressed
/// [`is_scroll_active`]: Self::is_scroll_active
pub struct InputCapture {
    keyboard: HookChannel<KeyboardHook>,
    mouse: HookChannel<MouseHook>,
    state: Arc<InputState>,
    wheel: Arc<WheelAggregator>,
    sampler: MotionSampler<SystemCursor>,
    events: broadcast::Sender<CaptureEvent>,
    motion_threshold: f64,
}

impl InputCapture {
    pub(super) fn new(motion_threshold: f64, scroll_frames: u8, event_capacity: usize) -> Self {
        let (events, _) = broadcast::channel(event_capacity);
        Self {
            keyboard: HookChannel::new(),
            mouse: HookChannel::new(),
            state: Arc::new(InputState::new()),
            wheel: Arc::new(WheelAggregator::new(scroll_frames)),
            sampler: MotionSampler::new(SystemCursor),
            events,
            motion_threshold,
        }
    }

    /// Installs the system-wide hooks and reports which channels succeeded.
    ///
    /// Starting an already-started subsystem is a no-op that reports the
    /// current capability. If another subsystem instance already holds a
    /// channel's registration, that channel reports as unavailable here;
    /// it is never silently shared.
    pub fn start(&self) -> Capability {
        debug!("Starting input capture");
        let capability = Capability {
            keyboard: self.keyboard.start(self.keyboard_sink()),
            mouse: self.mouse.start(self.mouse_sink()),
        };
        if capability != (Capability { keyboard: true, mouse: true }) {
            warn!(
                keyboard = capability.keyboard,
                mouse = capability.mouse,
                "Input capture running with reduced capability"
            );
        }
        capability
    }

    /// Removes the hooks and resets all tracked state. Safe to call
    /// repeatedly or when never started.
    ///
    /// Hooks are removed before state is cleared: in the other order, a
    /// callback still in flight could repopulate a code immediately after
    /// the clear and leave a stuck key on the overlay.
    pub fn stop(&mut self) {
        debug!("Stopping input capture");
        self.keyboard.stop();
        self.mouse.stop();
        self.state.clear_all();
        self.wheel.reset();
        self.sampler.reset();
    }

    /// Whether any hook registration is currently live.
    pub fn is_active(&self) -> bool {
        self.keyboard.is_active() || self.mouse.is_active()
    }

    /// Advances the subsystem by one poll interval: ages the scroll
    /// activity signal and samples cursor motion. Any qualifying motion is
    /// returned and also broadcast to subscribers.
    pub fn tick(&mut self) -> Option<MotionEvent> {
        self.wheel.tick();
        let motion = self.sampler.sample(self.motion_threshold);
        if let Some(motion) = motion {
            let _ = self.events.send(CaptureEvent::Motion(motion));
        }
        motion
    }

    /// Returns `true` if the given key or button is currently held.
    pub fn is_pressed(&self, code: InputCode) -> bool {
        self.state.is_pressed(code)
    }

    /// Whether the given scroll direction was used recently enough to
    /// display.
    pub fn is_scroll_active(&self, direction: ScrollDirection) -> bool {
        self.wheel.is_active(direction)
    }

    /// Subscribes to the edge-triggered state-change and motion event
    /// stream. Events are broadcast; every subscriber sees every event,
    /// subject to the configured channel capacity.
    pub fn subscribe(&self) -> broadcast::Receiver<CaptureEvent> {
        self.events.subscribe()
    }

    fn keyboard_sink(&self) -> Sink {
        let state = Arc::clone(&self.state);
        let events = self.events.clone();
        Arc::new(move |event| match event {
            RawInputEvent::KeyDown { code, .. } => {
                if state.record_down(code) {
                    let _ = events.send(CaptureEvent::StateChanged {
                        code,
                        pressed: true,
                    });
                }
            }
            RawInputEvent::KeyUp { code, .. } => {
                if state.record_up(code) {
                    let _ = events.send(CaptureEvent::StateChanged {
                        code,
                        pressed: false,
                    });
                }
            }
            // Button and wheel events never arrive on the keyboard channel.
            _ => {}
        })
    }

    fn mouse_sink(&self) -> Sink {
        let state = Arc::clone(&self.state);
        let wheel = Arc::clone(&self.wheel);
        let events = self.events.clone();
        Arc::new(move |event| match event {
            RawInputEvent::ButtonDown { code } => {
                if state.record_down(code) {
                    let _ = events.send(CaptureEvent::StateChanged {
                        code,
                        pressed: true,
                    });
                }
            }
            RawInputEvent::ButtonUp { code } => {
                if state.record_up(code) {
                    let _ = events.send(CaptureEvent::StateChanged {
                        code,
                        pressed: false,
                    });
                }
            }
            RawInputEvent::Wheel { delta } => wheel.on_wheel(delta),
            // Key events never arrive on the mouse channel.
            _ => {}
        })
    }
}
