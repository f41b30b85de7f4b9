//! Narrow outbound interfaces the simulation core talks through.
//!
//! Collision responses never reach for audio, UI, or globals directly; they
//! notify a [`FeedbackSink`] and bump a [`ScoreSink`]. Both are plain
//! non-blocking calls.

use crate::api::types::Feedback;

/// Fire-and-forget notifications for sound/visual feedback.
pub trait FeedbackSink {
    fn notify(&mut self, feedback: Feedback);
}

/// Score and currency counters mutated by collision responses.
pub trait ScoreSink {
    fn add_points(&mut self, points: u32);
    fn add_currency(&mut self, coins: u32);
}

/// The pair of sinks threaded through one simulation tick.
pub struct Sinks<'a> {
    pub feedback: &'a mut dyn FeedbackSink,
    pub score: &'a mut dyn ScoreSink,
}

/// Per-frame feedback buffer. Cleared by the runner at the start of a frame.
#[derive(Debug, Default, Clone)]
pub struct FeedbackLog {
    entries: Vec<Feedback>,
}

impl FeedbackLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Feedback> {
        self.entries.iter()
    }

    pub fn contains(&self, feedback: Feedback) -> bool {
        self.entries.contains(&feedback)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl FeedbackSink for FeedbackLog {
    fn notify(&mut self, feedback: Feedback) {
        self.entries.push(feedback);
    }
}

/// Running score and coin count for the current level.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Dashboard {
    pub points: u32,
    pub coins: u32,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl ScoreSink for Dashboard {
    fn add_points(&mut self, points: u32) {
        self.points = self.points.saturating_add(points);
    }

    fn add_currency(&mut self, coins: u32) {
        self.coins = self.coins.saturating_add(coins);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feedback_log_records_in_order() {
        let mut log = FeedbackLog::new();
        log.notify(Feedback::Jump);
        log.notify(Feedback::Coin);
        let seen: Vec<_> = log.iter().copied().collect();
        assert_eq!(seen, vec![Feedback::Jump, Feedback::Coin]);
        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn dashboard_accumulates() {
        let mut dash = Dashboard::new();
        dash.add_points(100);
        dash.add_points(100);
        dash.add_currency(1);
        assert_eq!(dash, Dashboard { points: 200, coins: 1 });
        dash.reset();
        assert_eq!(dash, Dashboard::default());
    }
}
