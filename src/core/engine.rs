//! The zoom geometry engine.
//!
//! [`ZoomEngine`] turns decoded gesture events into a continuously valid
//! [`Transform`] and a discrete zoom flag. Every handler is a bounded,
//! synchronous update of the engine-owned [`GestureState`]; settle animations
//! advance only when the host calls [`ZoomEngine::tick`].
//!
//! Release handling is split in two: [`ZoomEngine::plan_release`] computes the
//! targets from the current state without touching it, and the release handlers
//! apply that plan. Planning twice with no input in between yields the same plan.

use crate::{
    animation::AnimatedValue,
    core::{
        bounds::DisplacementBounds,
        config::{GeometryConfig, MotionConfig, MotionProfile},
        constants::{DISMISS_THRESHOLD, DOUBLE_TAP_MIN_SCALE, MAX_IMAGE_SCALE, MIN_IMAGE_SCALE},
        geo::Point,
        state::{GestureKind, GestureState, PanContext, PinchContext, ZoomPhase},
        viewport::{Transform, Viewport},
    },
    input::events::{GestureEvent, GesturePhase, PanEvent, PinchEvent, TapEvent},
    Result,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tolerance for treating the scale as resting at the minimum
const SCALE_EPSILON: f64 = 1e-6;

/// Output of every engine update
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomUpdate {
    pub transform: Transform,
    /// New value of the zoom flag when this update flipped it
    pub zoom_changed: Option<bool>,
}

/// How one state variable is brought to rest
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Settle {
    /// Timing curve to the value
    Timing(f64),
    /// Enter spring to the value
    EnterSpring(f64),
    /// Exit spring to the value
    ExitSpring(f64),
    /// Free scroll with the velocity, stopping inside the range
    Decay { velocity: f64, min: f64, max: f64 },
}

/// Outcome class of a release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReleaseDecision {
    /// Stay zoomed, correct bounds
    Adjust,
    /// Stay zoomed, spring back from below the minimum scale
    Recover,
    /// Pinch on inline content passed the device width: enter zoom
    Enter,
    /// Pinch on inline content was too small: snap back inline
    Restore,
    /// Leave zoom
    Exit,
}

/// Targets computed on gesture release
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReleasePlan {
    pub decision: ReleaseDecision,
    /// Scale the displacement limits were computed for
    pub target_scale: f64,
    pub bounds: DisplacementBounds,
    pub scale: Option<Settle>,
    pub translate_x: Option<Settle>,
    pub translate_y: Option<Settle>,
    pub progress: Option<Settle>,
    /// New zoom flag, when the release flips it
    pub zoomed: Option<bool>,
}

/// Gesture-driven pinch/pan/zoom state machine for one displayed content item
#[derive(Debug)]
pub struct ZoomEngine {
    config: GeometryConfig,
    viewport: Viewport,
    motion: MotionConfig,
    state: GestureState,
    pan: PanContext,
    pinch: PinchContext,
    y_displacement: f64,
    shut_down: bool,
}

impl ZoomEngine {
    /// Creates an engine at inline rest. Fails on unusable geometry.
    pub fn new(config: GeometryConfig, profile: MotionProfile) -> Result<Self> {
        config.validate()?;
        let viewport = Viewport::new(&config);
        log::debug!(
            "zoom engine: container {}x{}, full {}x{}, zoom ratio {:.3}",
            viewport.container.width,
            viewport.container.height,
            viewport.full.width,
            viewport.full.height,
            viewport.zoom_ratio
        );

        Ok(Self {
            config,
            viewport,
            motion: profile.resolve(),
            state: GestureState::new(),
            pan: PanContext::default(),
            pinch: PinchContext::default(),
            y_displacement: 0.0,
            shut_down: false,
        })
    }

    pub fn config(&self) -> &GeometryConfig {
        &self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn motion(&self) -> &MotionConfig {
        &self.motion
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn is_zoomed(&self) -> bool {
        self.state.is_zoomed
    }

    pub fn phase(&self) -> ZoomPhase {
        self.state.phase()
    }

    /// Whether no settle animation is running
    pub fn is_settled(&self) -> bool {
        self.state.is_settled()
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    /// Whether a pinch stream lost a pointer and is being ignored until it ends
    pub fn is_pinch_suspended(&self) -> bool {
        self.pinch.active && self.pinch.suspended
    }

    /// Offset of the host sheet, applied to the container while zooming
    pub fn set_y_displacement(&mut self, y_displacement: f64) -> ZoomUpdate {
        if !self.shut_down {
            self.y_displacement = y_displacement;
        }
        self.update(None)
    }

    /// Current output transform
    pub fn transform(&self) -> Transform {
        self.viewport.transform(
            self.state.scale.get(),
            self.state.translation(),
            self.state.progress.get(),
            self.y_displacement,
        )
    }

    fn update(&self, zoom_changed: Option<bool>) -> ZoomUpdate {
        ZoomUpdate {
            transform: self.transform(),
            zoom_changed,
        }
    }

    fn accepts_input(&self) -> bool {
        self.config.interactive && !self.shut_down
    }

    /// Routes an event to its handler
    pub fn handle(&mut self, event: &GestureEvent) -> ZoomUpdate {
        match event {
            GestureEvent::Pan(pan) => self.on_pan(pan),
            GestureEvent::Pinch(pinch) => self.on_pinch(pinch),
            GestureEvent::SingleTap(tap) => self.on_single_tap(tap),
            GestureEvent::DoubleTap(tap) => self.on_double_tap(tap),
        }
    }

    /// Advances settle animations by `dt`
    pub fn tick(&mut self, dt: Duration) -> ZoomUpdate {
        if !self.shut_down {
            self.state.tick(dt);
        }
        self.update(None)
    }

    /// Stops all settle animations. Later calls leave the state untouched.
    pub fn shutdown(&mut self) {
        if !self.shut_down {
            self.state.cancel_all();
            self.pan.reset();
            self.pinch.reset();
            self.shut_down = true;
            log::trace!("zoom engine shut down");
        }
    }

    pub fn on_pan(&mut self, event: &PanEvent) -> ZoomUpdate {
        if !self.accepts_input() {
            return self.update(None);
        }

        match event.phase {
            GesturePhase::Start => {
                self.pan
                    .begin(self.state.scale.get(), self.state.translate_y.get());
                self.update(None)
            }
            GesturePhase::Active => {
                if !self.pan.active {
                    self.pan
                        .begin(self.state.scale.get(), self.state.translate_y.get());
                }
                self.on_pan_active(event);
                self.update(None)
            }
            GesturePhase::End | GesturePhase::Cancel | GesturePhase::Fail => {
                if !self.pan.active {
                    self.pan
                        .begin(self.state.scale.get(), self.state.translate_y.get());
                }
                let velocity = Point::new(event.velocity_x, event.velocity_y);
                self.end_gesture(GestureKind::Pan, velocity)
            }
        }
    }

    fn on_pan_active(&mut self, event: &PanEvent) {
        let ctx = self.pan;

        // dragging content at rest shrinks it as dismissal feedback
        if ctx.start_scale <= MIN_IMAGE_SCALE {
            let pull =
                (ctx.start_y + event.translation_y.abs()) / self.viewport.device.height / 2.0;
            self.state
                .scale
                .set(ctx.start_scale - pull * ctx.start_scale);
        }

        let dx = event.translation_x - ctx.prev_translation.x;
        let dy = event.translation_y - ctx.prev_translation.y;
        self.state.translate_x.set(self.state.translate_x.get() + dx);
        self.state.translate_y.set(self.state.translate_y.get() + dy);
        self.pan.prev_translation = Point::new(event.translation_x, event.translation_y);

        log::trace!(
            "pan: translate ({:.1}, {:.1}), scale {:.3}",
            self.state.translate_x.get(),
            self.state.translate_y.get(),
            self.state.scale.get()
        );
    }

    pub fn on_pinch(&mut self, event: &PinchEvent) -> ZoomUpdate {
        if !self.accepts_input() {
            return self.update(None);
        }

        match event.phase {
            GesturePhase::Start => {
                self.pinch
                    .begin(self.state.scale.get(), self.state.translation());
                self.update(None)
            }
            GesturePhase::Active => {
                if !self.pinch.active {
                    self.pinch
                        .begin(self.state.scale.get(), self.state.translation());
                }
                if !self.pinch.suspended {
                    self.on_pinch_active(event);
                }
                self.update(None)
            }
            GesturePhase::End | GesturePhase::Cancel | GesturePhase::Fail => {
                if !self.pinch.active {
                    self.pinch
                        .begin(self.state.scale.get(), self.state.translation());
                }
                self.end_gesture(GestureKind::Pinch, Point::default())
            }
        }
    }

    fn on_pinch_active(&mut self, event: &PinchEvent) {
        let initial = *self.pinch.initial_event_scale.get_or_insert(event.scale);

        if event.number_of_pointers != 2 {
            // a lifted finger must not move the content
            let restore = self.pinch.prev_translate;
            self.state.translate_x.set(restore.x);
            self.state.translate_y.set(restore.y);
            self.pinch.suspended = true;
            log::debug!(
                "pinch: pointer count dropped to {}, suspending stream",
                event.number_of_pointers
            );
            return;
        }

        let ctx = self.pinch;
        if self.state.is_zoomed
            && ctx.start_scale <= MIN_IMAGE_SCALE
            && event.scale > MIN_IMAGE_SCALE
        {
            self.pinch.block_exit = true;
        }

        let initial = if initial > 0.0 { initial } else { 1.0 };
        let scale = ctx.start_scale * (event.scale / initial);
        self.state.scale.set(scale);

        match ctx.prev_event_scale {
            Some(prev) if prev > 0.0 => {
                let growth = event.scale / prev - 1.0;
                let anchor = if ctx.anchor_scale > 0.0 {
                    ctx.anchor_scale
                } else {
                    1.0
                };
                let container = self.viewport.container;
                let dx = growth * (container.width / anchor / 2.0 - event.focal_x);
                let dy = self.viewport.zoom_ratio
                    * growth
                    * (container.height / anchor / 2.0 - event.focal_y);
                self.state.translate_x.set(self.state.translate_x.get() + dx);
                self.state.translate_y.set(self.state.translate_y.get() + dy);
            }
            _ => {
                self.pinch.anchor_scale = scale;
            }
        }

        self.pinch.prev_translate = self.state.translation();
        self.pinch.prev_event_scale = Some(event.scale);

        log::trace!(
            "pinch: scale {:.3}, translate ({:.1}, {:.1})",
            scale,
            self.state.translate_x.get(),
            self.state.translate_y.get()
        );
    }

    pub fn on_single_tap(&mut self, event: &TapEvent) -> ZoomUpdate {
        if !self.accepts_input() {
            return self.update(None);
        }

        let motion = self.motion.clone();
        if !self.state.is_zoomed {
            self.state.is_zoomed = true;
            self.state.progress.spring_to(1.0, &motion.enter_spring);
            log::debug!("single tap: entering zoom");
            return self.finish_transition(Some(true));
        }

        let at_rest = (self.state.scale.get() - MIN_IMAGE_SCALE).abs() < SCALE_EPSILON;
        if at_rest && self.viewport.is_in_letterbox(event.absolute_y) {
            self.state.is_zoomed = false;
            self.state.progress.spring_to(0.0, &motion.exit_spring);
            self.state.scale.spring_to(MIN_IMAGE_SCALE, &motion.exit_spring);
            self.state.translate_x.spring_to(0.0, &motion.exit_spring);
            self.state.translate_y.spring_to(0.0, &motion.exit_spring);
            log::debug!("single tap outside content at y={:.1}: leaving zoom", event.absolute_y);
            return self.finish_transition(Some(false));
        }

        self.update(None)
    }

    pub fn on_double_tap(&mut self, event: &TapEvent) -> ZoomUpdate {
        if !self.accepts_input() || !self.state.is_zoomed {
            return self.update(None);
        }

        let timing = self.motion.timing;
        if self.state.scale.get() > MIN_IMAGE_SCALE + SCALE_EPSILON {
            self.state.scale.timing_to(MIN_IMAGE_SCALE, &timing);
            self.state.translate_x.timing_to(0.0, &timing);
            self.state.translate_y.timing_to(0.0, &timing);
            log::debug!("double tap: resetting to rest");
        } else {
            let (scale, translation) = self.double_tap_target(event);
            self.state.scale.timing_to(scale, &timing);
            self.state.translate_x.timing_to(translation.x, &timing);
            self.state.translate_y.timing_to(translation.y, &timing);
            log::debug!(
                "double tap: zooming to {:.2} at ({:.1}, {:.1})",
                scale,
                translation.x,
                translation.y
            );
        }

        self.finish_transition(None)
    }

    /// Scale and bounded translation a double tap at `event` zooms into
    pub fn double_tap_target(&self, event: &TapEvent) -> (f64, Point) {
        let viewport = &self.viewport;
        let scale = (viewport.device.height / viewport.full.height)
            .max(DOUBLE_TAP_MIN_SCALE)
            .min(MAX_IMAGE_SCALE);

        let toward = viewport
            .center()
            .subtract(&event.position())
            .multiply(scale / viewport.zoom_ratio);
        let bounds = DisplacementBounds::for_scale(viewport, scale, true);

        (scale, Point::new(bounds.x.bound(toward.x), bounds.y.bound(toward.y)))
    }

    /// Computes release targets from the current state without changing it
    pub fn plan_release(&self, kind: GestureKind, velocity: Point) -> ReleasePlan {
        let viewport = &self.viewport;
        let state = &self.state;
        let scale = state.scale.get();
        let translation = state.translation();
        let zoomed = state.is_zoomed;

        let (start_scale, block_exit) = match kind {
            GestureKind::Pan => (self.pan.start_scale, false),
            GestureKind::Pinch => (self.pinch.start_scale, self.pinch.block_exit),
        };

        // zoomed bounds follow the scale the content comes to rest at, which
        // differs from the live value while a scale settle is still running;
        // a pinch that started inline is normalized to fullscreen coordinates
        let mut target_scale = if zoomed {
            state
                .scale
                .resting_value()
                .clamp(MIN_IMAGE_SCALE, MAX_IMAGE_SCALE)
        } else {
            (scale / viewport.width_ratio()).min(MAX_IMAGE_SCALE)
        };
        let bounds = DisplacementBounds::for_scale(viewport, target_scale, zoomed);

        let mut plan = ReleasePlan {
            decision: ReleaseDecision::Adjust,
            target_scale,
            bounds,
            scale: None,
            translate_x: bounds
                .x
                .settle(state.translate_x.resting_value())
                .map(Settle::Timing),
            translate_y: bounds
                .y
                .settle(state.translate_y.resting_value())
                .map(Settle::Timing),
            progress: None,
            zoomed: None,
        };
        let mut started = (plan.translate_x.is_some(), plan.translate_y.is_some());

        let exit = |plan: &mut ReleasePlan| {
            plan.decision = ReleaseDecision::Exit;
            plan.zoomed = Some(false);
            plan.scale = Some(Settle::ExitSpring(MIN_IMAGE_SCALE));
            plan.translate_x = Some(Settle::ExitSpring(0.0));
            plan.translate_y = Some(Settle::ExitSpring(0.0));
            plan.progress = Some(Settle::ExitSpring(0.0));
        };

        if !zoomed {
            started = (true, true);
            if scale * viewport.container.width >= viewport.device.width {
                plan.decision = ReleaseDecision::Enter;
                plan.zoomed = Some(true);
                plan.progress = Some(Settle::Timing(1.0));
                plan.scale = Some(Settle::Timing(target_scale));
            } else {
                plan.decision = ReleaseDecision::Restore;
                plan.scale = Some(Settle::ExitSpring(MIN_IMAGE_SCALE));
                plan.translate_x = Some(Settle::ExitSpring(0.0));
                plan.translate_y = Some(Settle::ExitSpring(0.0));
                plan.progress = Some(Settle::ExitSpring(0.0));
            }
        } else {
            if scale < MIN_IMAGE_SCALE {
                started = (true, true);
                if kind == GestureKind::Pinch && start_scale <= MIN_IMAGE_SCALE && !block_exit {
                    exit(&mut plan);
                } else {
                    plan.decision = ReleaseDecision::Recover;
                    plan.scale = Some(Settle::ExitSpring(MIN_IMAGE_SCALE));
                    plan.translate_x = Some(Settle::ExitSpring(0.0));
                    plan.translate_y = Some(Settle::ExitSpring(0.0));
                    target_scale = MIN_IMAGE_SCALE;
                }
            }

            if kind == GestureKind::Pan && plan.decision != ReleaseDecision::Exit {
                // horizontal velocity damps the vertical dismissal swing
                let swing =
                    translation.y.abs() + velocity.y.abs() - (velocity.x / 2.0).abs();
                let fits = viewport.full.height * scale <= viewport.device.height;
                if swing > DISMISS_THRESHOLD * target_scale && fits {
                    started = (true, true);
                    exit(&mut plan);
                }
            }

            if plan.decision == ReleaseDecision::Adjust && scale > MAX_IMAGE_SCALE {
                plan.scale = Some(Settle::Timing(MAX_IMAGE_SCALE));
            }
        }

        if velocity.y != 0.0 && !started.1 {
            plan.translate_y = Some(Settle::Decay {
                velocity: velocity.y,
                min: -bounds.y.max_displacement,
                max: bounds.y.max_displacement,
            });
        }
        if velocity.x != 0.0 && !started.0 {
            plan.translate_x = Some(Settle::Decay {
                velocity: velocity.x,
                min: -bounds.x.max_displacement,
                max: bounds.x.max_displacement,
            });
        }

        plan.target_scale = target_scale;
        plan
    }

    /// Runs the release computation for a finished stream and resets its context
    pub fn end_gesture(&mut self, kind: GestureKind, velocity: Point) -> ZoomUpdate {
        let plan = self.plan_release(kind, velocity);
        log::debug!(
            "{:?} release: {:?} at target scale {:.3}",
            kind,
            plan.decision,
            plan.target_scale
        );

        match kind {
            GestureKind::Pan => self.pan.reset(),
            GestureKind::Pinch => self.pinch.reset(),
        }

        self.apply_plan(&plan);
        self.finish_transition(plan.zoomed)
    }

    fn apply_plan(&mut self, plan: &ReleasePlan) {
        let motion = self.motion.clone();
        let settle = |value: &mut AnimatedValue, target: Option<Settle>| {
            match target {
                Some(Settle::Timing(target)) => value.timing_to(target, &motion.timing),
                Some(Settle::EnterSpring(target)) => value.spring_to(target, &motion.enter_spring),
                Some(Settle::ExitSpring(target)) => value.spring_to(target, &motion.exit_spring),
                Some(Settle::Decay { velocity, min, max }) => {
                    value.decay(velocity, &motion.decay, (min, max))
                }
                None => {}
            }
        };

        settle(&mut self.state.scale, plan.scale);
        settle(&mut self.state.translate_x, plan.translate_x);
        settle(&mut self.state.translate_y, plan.translate_y);
        settle(&mut self.state.progress, plan.progress);

        if let Some(zoomed) = plan.zoomed {
            self.state.is_zoomed = zoomed;
        }
    }

    fn finish_transition(&mut self, zoom_changed: Option<bool>) -> ZoomUpdate {
        if self.motion.instant {
            self.state.finish_all();
        }
        if let Some(zoomed) = zoom_changed {
            log::debug!("zoom state changed: zoomed = {}", zoomed);
        }
        self.update(zoom_changed)
    }
}

impl Drop for ZoomEngine {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::Size;

    fn engine(profile: MotionProfile) -> ZoomEngine {
        ZoomEngine::new(
            GeometryConfig::new(Size::new(375.0, 812.0), 1.0, 20.0),
            profile,
        )
        .unwrap()
    }

    fn settle(engine: &mut ZoomEngine) {
        for _ in 0..2000 {
            if engine.is_settled() {
                return;
            }
            engine.tick(Duration::from_millis(16));
        }
        panic!("engine did not settle");
    }

    #[test]
    fn test_invalid_geometry_fails() {
        let result = ZoomEngine::new(
            GeometryConfig::new(Size::new(0.0, 0.0), 1.0, 0.0),
            MotionProfile::Standard,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_single_tap_enters_and_letterbox_tap_exits() {
        let mut engine = engine(MotionProfile::Standard);
        let update = engine.on_single_tap(&TapEvent::new(187.5, 400.0));
        assert_eq!(update.zoom_changed, Some(true));
        assert_eq!(engine.phase(), ZoomPhase::Entering);
        settle(&mut engine);
        assert_eq!(engine.phase(), ZoomPhase::Zoomed);

        // tap on the content itself does nothing
        let update = engine.on_single_tap(&TapEvent::new(187.5, 406.0));
        assert_eq!(update.zoom_changed, None);
        assert!(engine.is_zoomed());

        let update = engine.on_single_tap(&TapEvent::new(187.5, 20.0));
        assert_eq!(update.zoom_changed, Some(false));
        settle(&mut engine);
        assert_eq!(engine.phase(), ZoomPhase::Inline);
    }

    #[test]
    fn test_double_tap_is_ignored_inline() {
        let mut engine = engine(MotionProfile::Standard);
        engine.on_double_tap(&TapEvent::new(100.0, 100.0));
        assert!(engine.is_settled());
        assert_eq!(engine.state().scale.get(), 1.0);
    }

    #[test]
    fn test_double_tap_target_is_bounded() {
        let mut engine = engine(MotionProfile::Reduced);
        engine.on_single_tap(&TapEvent::new(0.0, 400.0));

        // tapping the far corner would push the content off screen unbounded
        let (scale, translation) = engine.double_tap_target(&TapEvent::new(0.0, 0.0));
        assert_eq!(scale, DOUBLE_TAP_MIN_SCALE);
        let bounds = DisplacementBounds::for_scale(engine.viewport(), scale, true);
        assert!(bounds.x.contains(translation.x));
        assert!(bounds.y.contains(translation.y));
        assert!(translation.x > 0.0);
    }

    #[test]
    fn test_plan_release_is_pure() {
        let mut engine = engine(MotionProfile::Reduced);
        engine.on_single_tap(&TapEvent::new(0.0, 400.0));
        engine.on_pinch(&PinchEvent::new(GesturePhase::Start, 1.0, Point::new(0.0, 0.0)));
        engine.on_pinch(&PinchEvent::new(GesturePhase::Active, 1.0, Point::new(100.0, 100.0)));
        engine.on_pinch(&PinchEvent::new(GesturePhase::Active, 3.0, Point::new(100.0, 100.0)));

        let first = engine.plan_release(GestureKind::Pinch, Point::default());
        let second = engine.plan_release(GestureKind::Pinch, Point::default());
        assert_eq!(first, second);
        assert_eq!(first.decision, ReleaseDecision::Adjust);
    }

    #[test]
    fn test_pinch_above_max_is_pulled_back() {
        let mut engine = engine(MotionProfile::Reduced);
        engine.on_single_tap(&TapEvent::new(0.0, 400.0));
        engine.on_pinch(&PinchEvent::new(GesturePhase::Start, 1.0, Point::default()));
        engine.on_pinch(&PinchEvent::new(GesturePhase::Active, 1.0, Point::new(167.5, 167.5)));
        engine.on_pinch(&PinchEvent::new(GesturePhase::Active, 6.0, Point::new(167.5, 167.5)));
        assert!(engine.state().scale.get() > MAX_IMAGE_SCALE);

        engine.on_pinch(&PinchEvent::new(GesturePhase::End, 6.0, Point::new(167.5, 167.5)));
        assert_eq!(engine.state().scale.get(), MAX_IMAGE_SCALE);
        assert!(engine.is_zoomed());
    }

    #[test]
    fn test_pinch_back_in_below_min_blocks_exit() {
        let mut engine = engine(MotionProfile::Reduced);
        engine.on_single_tap(&TapEvent::new(0.0, 400.0));

        engine.on_pinch(&PinchEvent::new(GesturePhase::Start, 1.0, Point::default()));
        engine.on_pinch(&PinchEvent::new(GesturePhase::Active, 1.0, Point::new(167.5, 167.5)));
        engine.on_pinch(&PinchEvent::new(GesturePhase::Active, 0.5, Point::new(167.5, 167.5)));
        // spreading back out past 1 latches the block
        engine.on_pinch(&PinchEvent::new(GesturePhase::Active, 1.2, Point::new(167.5, 167.5)));
        engine.on_pinch(&PinchEvent::new(GesturePhase::Active, 0.6, Point::new(167.5, 167.5)));
        assert!(engine.state().scale.get() < MIN_IMAGE_SCALE);
        let update =
            engine.on_pinch(&PinchEvent::new(GesturePhase::End, 0.6, Point::new(167.5, 167.5)));

        assert_eq!(update.zoom_changed, None);
        assert!(engine.is_zoomed());
        assert_eq!(engine.state().scale.get(), MIN_IMAGE_SCALE);
    }

    #[test]
    fn test_pinch_in_below_min_exits() {
        let mut engine = engine(MotionProfile::Reduced);
        engine.on_single_tap(&TapEvent::new(0.0, 400.0));

        engine.on_pinch(&PinchEvent::new(GesturePhase::Start, 1.0, Point::default()));
        engine.on_pinch(&PinchEvent::new(GesturePhase::Active, 1.0, Point::new(167.5, 167.5)));
        engine.on_pinch(&PinchEvent::new(GesturePhase::Active, 0.6, Point::new(167.5, 167.5)));
        let update =
            engine.on_pinch(&PinchEvent::new(GesturePhase::End, 0.6, Point::new(167.5, 167.5)));

        assert_eq!(update.zoom_changed, Some(false));
        assert_eq!(engine.phase(), ZoomPhase::Inline);
        assert_eq!(engine.state().scale.get(), MIN_IMAGE_SCALE);
    }

    #[test]
    fn test_small_inline_pinch_restores() {
        let mut engine = engine(MotionProfile::Standard);
        engine.on_pinch(&PinchEvent::new(GesturePhase::Start, 1.0, Point::default()));
        engine.on_pinch(&PinchEvent::new(GesturePhase::Active, 1.0, Point::new(100.0, 100.0)));
        engine.on_pinch(&PinchEvent::new(GesturePhase::Active, 1.05, Point::new(100.0, 100.0)));
        let update =
            engine.on_pinch(&PinchEvent::new(GesturePhase::End, 1.05, Point::new(100.0, 100.0)));
        assert_eq!(update.zoom_changed, None);
        assert!(!engine.is_zoomed());

        settle(&mut engine);
        assert_eq!(engine.state().scale.get(), MIN_IMAGE_SCALE);
        assert_eq!(engine.state().translation(), Point::default());
    }

    #[test]
    fn test_small_pan_at_rest_recovers_without_exit() {
        let mut engine = engine(MotionProfile::Reduced);
        engine.on_single_tap(&TapEvent::new(0.0, 400.0));

        engine.on_pan(&PanEvent::new(GesturePhase::Start, 0.0, 0.0));
        engine.on_pan(&PanEvent::new(GesturePhase::Active, 0.0, 40.0));
        assert!(engine.state().scale.get() < MIN_IMAGE_SCALE);
        let update = engine.on_pan(&PanEvent::new(GesturePhase::End, 0.0, 40.0));

        assert_eq!(update.zoom_changed, None);
        assert!(engine.is_zoomed());
        assert_eq!(engine.state().scale.get(), MIN_IMAGE_SCALE);
        assert_eq!(engine.state().translation(), Point::default());
    }

    #[test]
    fn test_horizontal_velocity_damps_dismissal() {
        let mut engine = engine(MotionProfile::Reduced);
        engine.on_single_tap(&TapEvent::new(0.0, 400.0));

        engine.on_pan(&PanEvent::new(GesturePhase::Start, 0.0, 0.0));
        engine.on_pan(&PanEvent::new(GesturePhase::Active, 0.0, 100.0));
        // 100 + 300 - 400 / 2 = 200 stays under the threshold
        let plan = engine.plan_release(GestureKind::Pan, Point::new(400.0, 300.0));
        assert_ne!(plan.decision, ReleaseDecision::Exit);
        // without the horizontal component it would dismiss
        let plan = engine.plan_release(GestureKind::Pan, Point::new(0.0, 300.0));
        assert_eq!(plan.decision, ReleaseDecision::Exit);
    }

    #[test]
    fn test_flick_decays_inside_bounds() {
        let mut engine = engine(MotionProfile::Standard);
        engine.on_single_tap(&TapEvent::new(0.0, 400.0));
        settle(&mut engine);
        engine.on_double_tap(&TapEvent::new(187.5, 406.0));
        settle(&mut engine);
        let scale = engine.state().scale.get();
        assert!(scale > MIN_IMAGE_SCALE);

        engine.on_pan(&PanEvent::new(GesturePhase::Start, 0.0, 0.0));
        engine.on_pan(&PanEvent::new(GesturePhase::Active, 10.0, 0.0));
        let plan = engine.plan_release(GestureKind::Pan, Point::new(5000.0, 0.0));
        assert!(matches!(plan.translate_x, Some(Settle::Decay { .. })));
        engine.on_pan(&PanEvent::new(GesturePhase::End, 10.0, 0.0).with_velocity(5000.0, 0.0));

        settle(&mut engine);
        let bounds = DisplacementBounds::for_scale(engine.viewport(), scale, true);
        assert!(bounds.x.contains(engine.state().translate_x.get()));
        assert!(engine.state().translate_x.get() > 10.0);
    }

    #[test]
    fn test_shutdown_stops_everything() {
        let mut engine = engine(MotionProfile::Standard);
        engine.on_single_tap(&TapEvent::new(0.0, 400.0));
        assert!(!engine.is_settled());

        engine.shutdown();
        assert!(engine.is_settled());
        let before = engine.transform();
        let update = engine.on_single_tap(&TapEvent::new(0.0, 20.0));
        assert_eq!(update.zoom_changed, None);
        assert_eq!(engine.tick(Duration::from_millis(16)).transform, before);
    }

    #[test]
    fn test_non_interactive_engine_ignores_gestures() {
        let mut config = GeometryConfig::default();
        config.interactive = false;
        let mut engine = ZoomEngine::new(config, MotionProfile::Standard).unwrap();
        let update = engine.on_single_tap(&TapEvent::new(0.0, 400.0));
        assert_eq!(update.zoom_changed, None);
        assert!(!engine.is_zoomed());
    }

    #[test]
    fn test_y_displacement_moves_container_only_when_zoomed() {
        let mut engine = engine(MotionProfile::Reduced);
        let inline = engine.set_y_displacement(120.0);
        assert_eq!(inline.transform.container.translate_y, 0.0);

        engine.on_single_tap(&TapEvent::new(0.0, 400.0));
        let with_offset = engine.transform().container.translate_y;
        let without = engine.set_y_displacement(0.0).transform.container.translate_y;
        assert!((with_offset - without - 120.0).abs() < 1e-9);
    }
}
