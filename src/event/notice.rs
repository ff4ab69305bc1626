use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

use super::{EventHandler, SketchEvent};

const MAX_PENDING: usize = 16;

/// Collects messages that should be shown to the user.
///
/// Clones share the same queue: register one clone on a sketchpad and drain
/// another from the UI.
#[derive(Debug, Clone, Default)]
pub struct NoticeBoard {
    pending: Arc<Mutex<VecDeque<String>>>,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn post(&self, message: impl Into<String>) {
        let mut pending = self.pending.lock();
        if pending.len() == MAX_PENDING {
            pending.pop_front();
        }
        pending.push_back(message.into());
    }

    /// Remove and return all pending notices, oldest first
    pub fn drain(&self) -> Vec<String> {
        self.pending.lock().drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }
}

impl EventHandler for NoticeBoard {
    fn handle_event(&mut self, event: &SketchEvent) {
        if let SketchEvent::ImageRejected { reason } = event {
            self.post(format!("Could not open image: {reason}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_rejections_become_notices() {
        let board = NoticeBoard::new();
        let mut handler = board.clone();

        handler.handle_event(&SketchEvent::Cleared);
        assert!(board.is_empty());

        handler.handle_event(&SketchEvent::ImageRejected {
            reason: "bad header".into(),
        });
        let notices = board.drain();
        assert_eq!(notices.len(), 1);
        assert!(notices[0].contains("bad header"));
        assert!(board.is_empty());
    }

    #[test]
    fn test_queue_is_bounded() {
        let board = NoticeBoard::new();
        for i in 0..(MAX_PENDING + 4) {
            board.post(format!("notice {i}"));
        }
        let notices = board.drain();
        assert_eq!(notices.len(), MAX_PENDING);
        assert_eq!(notices[0], "notice 4");
    }
}
