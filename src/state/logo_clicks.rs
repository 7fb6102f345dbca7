// Logo-click unlock counter for the diagnostics overlay.
use crate::config::{LOGO_CLICK_WINDOW_MS, LOGO_CLICKS_TO_UNLOCK, LOGO_HINT_FROM};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogoClickOutcome {
    Counted(u32),
    /// Close to unlocking; carries the number of clicks still needed.
    Hint(u32),
    Unlocked,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LogoClickCounter {
    pub count: u32,
    pub last_click_ms: Option<f64>,
}

impl LogoClickCounter {
    pub fn register(&mut self, now_ms: f64) -> LogoClickOutcome {
        let within_window = self
            .last_click_ms
            .is_some_and(|last| now_ms - last < LOGO_CLICK_WINDOW_MS);
        let next = if within_window { self.count + 1 } else { 1 };
        self.last_click_ms = Some(now_ms);

        if next >= LOGO_CLICKS_TO_UNLOCK {
            self.count = 0;
            return LogoClickOutcome::Unlocked;
        }
        self.count = next;
        if next >= LOGO_HINT_FROM {
            LogoClickOutcome::Hint(LOGO_CLICKS_TO_UNLOCK - next)
        } else {
            LogoClickOutcome::Counted(next)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_quick_clicks_unlock() {
        let mut c = LogoClickCounter::default();
        let mut outcomes = Vec::new();
        for i in 0..10 {
            outcomes.push(c.register(1_000.0 + i as f64 * 300.0));
        }
        assert_eq!(outcomes[0], LogoClickOutcome::Counted(1));
        assert_eq!(outcomes[5], LogoClickOutcome::Counted(6));
        assert_eq!(outcomes[6], LogoClickOutcome::Hint(3));
        assert_eq!(outcomes[8], LogoClickOutcome::Hint(1));
        assert_eq!(outcomes[9], LogoClickOutcome::Unlocked);
        assert_eq!(c.count, 0);
    }

    #[test]
    fn slow_click_restarts_count() {
        let mut c = LogoClickCounter::default();
        c.register(0.0);
        c.register(500.0);
        assert_eq!(c.register(2_600.0), LogoClickOutcome::Counted(1));
    }

    #[test]
    fn click_exactly_at_window_edge_restarts() {
        let mut c = LogoClickCounter::default();
        c.register(0.0);
        assert_eq!(c.register(2_000.0), LogoClickOutcome::Counted(1));
        assert_eq!(c.register(3_999.0), LogoClickOutcome::Counted(2));
    }

    #[test]
    fn window_is_measured_from_previous_click() {
        let mut c = LogoClickCounter::default();
        for i in 0..5 {
            c.register(i as f64 * 1_900.0);
        }
        assert_eq!(c.count, 5);
    }
}
