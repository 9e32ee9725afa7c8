use crate::{
    animation::FrameClock,
    core::{
        engine::{ZoomEngine, ZoomUpdate},
        geo::Point,
        viewport::Transform,
    },
    input::{
        events::{GestureEvent, GesturePhase, PanEvent},
        gestures::{TapConfig, TapRecognizer},
    },
    traits::{NoopObserver, ZoomObserver},
};
use std::time::Duration;

/// Routes decoded input into a [`ZoomEngine`].
///
/// Applies the recognizer gating the engine expects (pointer counts, double
/// taps only while zoomed), disambiguates raw taps and forwards every new
/// transform and zoom flip to a [`ZoomObserver`].
#[derive(Debug)]
pub struct InputHandler<O: ZoomObserver = NoopObserver> {
    engine: ZoomEngine,
    taps: TapRecognizer,
    observer: O,
    clock: FrameClock,
    /// Whether the current pan stream passed the pointer gate
    pan_accepted: bool,
    last_transform: Option<Transform>,
}

impl InputHandler<NoopObserver> {
    pub fn new(engine: ZoomEngine) -> Self {
        Self::with_observer(engine, NoopObserver)
    }
}

impl<O: ZoomObserver> InputHandler<O> {
    pub fn with_observer(engine: ZoomEngine, observer: O) -> Self {
        let motion = engine.motion();
        let taps = TapRecognizer::with_config(TapConfig {
            double_tap_timeout: Duration::from_millis(motion.double_tap_max_delay_ms),
            double_tap_distance_threshold: motion.double_tap_max_distance,
        });

        Self {
            engine,
            taps,
            observer,
            clock: FrameClock::new(),
            pan_accepted: false,
            last_transform: None,
        }
    }

    pub fn engine(&self) -> &ZoomEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut ZoomEngine {
        &mut self.engine
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    /// Whether a pan with this many pointers may drive the engine
    pub fn accepts_pan(&self, number_of_pointers: u32) -> bool {
        if self.engine.is_zoomed() {
            (1..=2).contains(&number_of_pointers)
        } else {
            number_of_pointers == 2
        }
    }

    /// Handles a decoded gesture; `None` when the event was filtered out
    pub fn handle_event(&mut self, event: &GestureEvent) -> Option<ZoomUpdate> {
        if !self.engine.config().interactive || self.engine.is_shut_down() {
            return None;
        }

        // a moving pointer fails the double tap, so a held tap resolves before the gesture
        if matches!(event, GestureEvent::Pan(_) | GestureEvent::Pinch(_)) {
            if let Some(tap) = self.taps.flush() {
                log::trace!("held tap resolved by {:?}", event);
                self.handle_event(&tap);
            }
        }

        match event {
            GestureEvent::Pan(pan) => {
                if !self.gate_pan(pan) {
                    log::trace!("pan with {} pointers filtered", pan.number_of_pointers);
                    return None;
                }
            }
            GestureEvent::DoubleTap(_) if !self.engine.is_zoomed() => return None,
            _ => {}
        }

        let update = self.engine.handle(event);
        Some(self.emit(update))
    }

    fn gate_pan(&mut self, pan: &PanEvent) -> bool {
        let accepted = match pan.phase {
            GesturePhase::Start => self.accepts_pan(pan.number_of_pointers),
            // a stream already running keeps going; one seen first mid-way is gated now
            _ => self.pan_accepted || self.accepts_pan(pan.number_of_pointers),
        };
        self.pan_accepted = accepted && !pan.phase.is_release();
        accepted
    }

    /// Feeds a raw tap at monotonic time `now`
    pub fn handle_tap(&mut self, position: Point, now: Duration) -> Vec<ZoomUpdate> {
        if !self.engine.config().interactive || self.engine.is_shut_down() {
            return Vec::new();
        }

        let mut resolved = Vec::new();
        resolved.extend(self.taps.set_double_tap_enabled(self.engine.is_zoomed()));
        resolved.extend(self.taps.tap(position, now));
        self.dispatch(resolved)
    }

    /// Releases a held single tap once the double-tap window closed
    pub fn poll(&mut self, now: Duration) -> Vec<ZoomUpdate> {
        let resolved: Vec<_> = self.taps.poll(now).into_iter().collect();
        self.dispatch(resolved)
    }

    fn dispatch(&mut self, events: Vec<GestureEvent>) -> Vec<ZoomUpdate> {
        events
            .iter()
            .filter_map(|event| self.handle_event(event))
            .collect()
    }

    /// Advances settle animations by an explicit frame delta
    pub fn tick(&mut self, dt: Duration) -> ZoomUpdate {
        let update = self.engine.tick(dt);
        self.emit(update)
    }

    /// Advances settle animations by the wall-clock time since the last frame
    pub fn advance_frame(&mut self) -> ZoomUpdate {
        let dt = self.clock.tick();
        self.tick(dt)
    }

    /// Moves the content vertically; `None` once the handler is shut down
    pub fn set_y_displacement(&mut self, y_displacement: f64) -> Option<ZoomUpdate> {
        if self.engine.is_shut_down() {
            return None;
        }
        let update = self.engine.set_y_displacement(y_displacement);
        Some(self.emit(update))
    }

    /// Stops the engine and drops any held tap
    pub fn shutdown(&mut self) {
        self.engine.shutdown();
        self.taps.reset();
        self.pan_accepted = false;
    }

    fn emit(&mut self, update: ZoomUpdate) -> ZoomUpdate {
        if let Some(zoomed) = update.zoom_changed {
            self.observer.on_zoom_changed(zoomed);
        }
        if self.last_transform != Some(update.transform) {
            self.observer.on_transform(&update.transform);
            self.last_transform = Some(update.transform);
        }
        update
    }
}
