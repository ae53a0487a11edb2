//! Hold-to-confirm trigger.
//!
//! A pose must be held continuously for `hold_secs` before the trigger
//! fires, and it fires once per hold.  Dropping the pose re-arms it.

/// Debounced one-shot trigger driven by a per-tick boolean.
#[derive(Debug, Clone, PartialEq)]
pub struct HoldTimer {
    hold_secs: f32,
    elapsed:   f32,
    fired:     bool,
}

impl HoldTimer {
    pub fn new(hold_secs: f32) -> Self {
        HoldTimer { hold_secs: hold_secs.max(0.0), elapsed: 0.0, fired: false }
    }

    /// Feed one tick.  Returns `true` on the single tick the hold completes.
    pub fn update(&mut self, detected: bool, dt: f32) -> bool {
        if !detected {
            self.reset();
            return false;
        }
        if self.fired {
            return false;
        }
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
        if self.elapsed >= self.hold_secs {
            self.fired = true;
            return true;
        }
        false
    }

    /// Forget any partial hold and re-arm.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.fired = false;
    }

    /// 0.0–1.0 progress of the current hold.
    pub fn progress(&self) -> f32 {
        if self.fired || self.hold_secs <= 0.0 {
            return if self.fired { 1.0 } else { 0.0 };
        }
        (self.elapsed / self.hold_secs).min(1.0)
    }

    pub fn has_fired(&self) -> bool { self.fired }
}
