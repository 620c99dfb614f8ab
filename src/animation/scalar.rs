use std::fmt;
use std::time::Duration;

use super::Easing;

/// Callback notified with every value written to a scalar.
pub type ScalarObserver = Box<dyn FnMut(f64)>;

/// One animatable numeric value.
pub trait AnimatedScalar {
    /// Starts a transition from the current value to `target`.
    ///
    /// Any in-flight transition is replaced; a zero duration writes `target`
    /// immediately.
    fn set(&mut self, target: f64, duration: Duration, easing: Easing);

    fn current(&self) -> f64;

    /// Stops the in-flight transition, leaving the value where it is.
    fn cancel(&mut self);

    /// Writes `value` immediately, cancelling any transition.
    fn jump_to(&mut self, value: f64);

    fn is_animating(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Transition {
    from: f64,
    to: f64,
    duration_seconds: f64,
    elapsed_seconds: f64,
    easing: Easing,
}

impl Transition {
    fn value(self) -> f64 {
        let progress = self.easing.apply(self.elapsed_seconds / self.duration_seconds);
        self.from + (self.to - self.from) * progress
    }

    fn is_finished(self) -> bool {
        self.elapsed_seconds >= self.duration_seconds
    }
}

/// [`AnimatedScalar`] advanced explicitly by its owner.
///
/// Once [`TimedScalar::retire`] is called the scalar ignores every further
/// write, so a dropped view can never be updated by a late frame tick.
pub struct TimedScalar {
    value: f64,
    transition: Option<Transition>,
    observer: Option<ScalarObserver>,
    retired: bool,
}

impl TimedScalar {
    #[must_use]
    pub fn new(initial: f64) -> Self {
        Self {
            value: sanitize(initial),
            transition: None,
            observer: None,
            retired: false,
        }
    }

    #[must_use]
    pub fn with_observer(mut self, observer: impl FnMut(f64) + 'static) -> Self {
        self.set_observer(observer);
        self
    }

    pub fn set_observer(&mut self, observer: impl FnMut(f64) + 'static) {
        if !self.retired {
            self.observer = Some(Box::new(observer));
        }
    }

    /// Value the scalar is heading to (the current value when idle).
    #[must_use]
    pub fn target(&self) -> f64 {
        self.transition.map_or(self.value, |transition| transition.to)
    }

    #[must_use]
    pub fn is_retired(&self) -> bool {
        self.retired
    }

    /// Moves the transition forward by `delta_seconds`.
    ///
    /// Returns `true` while the transition is still running afterwards.
    /// Negative or non-finite deltas do not move time.
    pub fn advance(&mut self, delta_seconds: f64) -> bool {
        if self.retired {
            return false;
        }
        let Some(mut transition) = self.transition else {
            return false;
        };

        if delta_seconds.is_finite() && delta_seconds > 0.0 {
            transition.elapsed_seconds += delta_seconds;
        }

        if transition.is_finished() {
            self.transition = None;
            self.write(transition.to);
            return false;
        }

        self.transition = Some(transition);
        self.write(transition.value());
        true
    }

    /// Cancels the transition and disconnects the observer for good.
    pub fn retire(&mut self) {
        self.transition = None;
        self.observer = None;
        self.retired = true;
    }

    fn write(&mut self, value: f64) {
        self.value = value;
        if let Some(observer) = self.observer.as_mut() {
            observer(value);
        }
    }
}

impl AnimatedScalar for TimedScalar {
    fn set(&mut self, target: f64, duration: Duration, easing: Easing) {
        if self.retired {
            return;
        }
        let target = sanitize(target);
        let duration_seconds = duration.as_secs_f64();
        if duration_seconds <= 0.0 {
            self.transition = None;
            self.write(target);
            return;
        }

        self.transition = Some(Transition {
            from: self.value,
            to: target,
            duration_seconds,
            elapsed_seconds: 0.0,
            easing,
        });
    }

    fn current(&self) -> f64 {
        self.value
    }

    fn cancel(&mut self) {
        self.transition = None;
    }

    fn jump_to(&mut self, value: f64) {
        if self.retired {
            return;
        }
        self.transition = None;
        self.write(sanitize(value));
    }

    fn is_animating(&self) -> bool {
        self.transition.is_some()
    }
}

impl Default for TimedScalar {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl fmt::Debug for TimedScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimedScalar")
            .field("value", &self.value)
            .field("transition", &self.transition)
            .field("has_observer", &self.observer.is_some())
            .field("retired", &self.retired)
            .finish()
    }
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}
