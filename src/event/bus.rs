use super::{EventHandler, SketchEvent};

/// Fans events out to registered handlers, in registration order
#[derive(Default)]
pub struct EventBus {
    handlers: Vec<Box<dyn EventHandler>>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, handler: Box<dyn EventHandler>) {
        self.handlers.push(handler);
    }

    pub fn emit(&mut self, event: SketchEvent) {
        log::debug!("{event:?}");
        for handler in &mut self.handlers {
            handler.handle_event(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counter(Arc<AtomicUsize>);

    impl EventHandler for Counter {
        fn handle_event(&mut self, _event: &SketchEvent) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_every_handler_sees_every_event() {
        let seen = Arc::new(AtomicUsize::new(0));
        let mut bus = EventBus::new();
        bus.subscribe(Box::new(Counter(seen.clone())));
        bus.subscribe(Box::new(Counter(seen.clone())));

        bus.emit(SketchEvent::Cleared);
        bus.emit(SketchEvent::Undone { remaining: 0 });

        assert_eq!(seen.load(Ordering::SeqCst), 4);
    }
}
