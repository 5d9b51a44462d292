//! Cooldown gates for player actions

/// Minimum spacing between uses of an action, measured on the simulation clock
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cooldown {
    pub duration_ms: f64,
    /// `None` until the first successful use; an unused action is always ready
    pub last_used_ms: Option<f64>,
}

impl Cooldown {
    pub const fn new(duration_ms: f64) -> Self {
        Self {
            duration_ms,
            last_used_ms: None,
        }
    }

    pub fn is_ready(&self, now_ms: f64) -> bool {
        match self.last_used_ms {
            None => true,
            Some(last) => now_ms - last >= self.duration_ms,
        }
    }

    /// Consume the cooldown if it has elapsed. Returns whether the action may proceed.
    pub fn try_use(&mut self, now_ms: f64) -> bool {
        if !self.is_ready(now_ms) {
            return false;
        }
        self.last_used_ms = Some(now_ms);
        true
    }

    /// Forget the last use (run restart)
    pub fn reset(&mut self) {
        self.last_used_ms = None;
    }

    /// Recharge fraction in [0, 1] for HUD indicators (1 = ready)
    pub fn progress(&self, now_ms: f64) -> f32 {
        let Some(last) = self.last_used_ms else {
            return 1.0;
        };
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        let elapsed = now_ms - last;
        let remaining = (self.duration_ms - elapsed).max(0.0);
        (1.0 - remaining / self.duration_ms).clamp(0.0, 1.0) as f32
    }
}
