use std::collections::VecDeque;

use crate::frame::Frame;

/// A single traced outcome.
///
/// `frame_index` is the last frame the emitter saw, so events raised by input
/// handlers between ticks are attributed to the preceding frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub frame_index: u64,
    pub kind: &'static str,
    pub message: String,
}

/// Bounded, ordered event trace. Once `capacity` is reached the oldest event
/// is dropped for each new one.
#[derive(Debug)]
pub struct EventBus {
    events: VecDeque<Event>,
    capacity: usize,
    dropped: u64,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::with_capacity(EventBus::DEFAULT_CAPACITY)
    }
}

impl EventBus {
    pub const DEFAULT_CAPACITY: usize = 256;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(capacity.min(Self::DEFAULT_CAPACITY)),
            capacity: capacity.max(1),
            dropped: 0,
        }
    }

    pub fn emit(&mut self, frame: Frame, kind: &'static str, message: impl Into<String>) {
        if self.events.len() == self.capacity {
            self.events.pop_front();
            self.dropped += 1;
        }
        self.events.push_back(Event {
            frame_index: frame.index,
            kind,
            message: message.into(),
        });
    }

    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn last(&self) -> Option<&Event> {
        self.events.back()
    }

    pub fn count_kind(&self, kind: &str) -> usize {
        self.events.iter().filter(|e| e.kind == kind).count()
    }

    /// Number of events evicted because the bus was full.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

#[cfg(test)]
mod tests {
    use super::EventBus;
    use crate::frame::Frame;

    #[test]
    fn records_events_with_frame_index() {
        let mut bus = EventBus::new();
        bus.emit(Frame::new(2, 0.1), "test", "hello");
        assert_eq!(bus.len(), 1);
        assert_eq!(bus.last().map(|e| e.frame_index), Some(2));
    }

    #[test]
    fn full_bus_drops_oldest() {
        let mut bus = EventBus::with_capacity(2);
        let f = Frame::new(0, 1.0);
        bus.emit(f, "a", "1");
        bus.emit(f, "b", "2");
        bus.emit(f, "a", "3");
        let messages: Vec<&str> = bus.events().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["2", "3"]);
        assert_eq!(bus.dropped(), 1);
        assert_eq!(bus.count_kind("a"), 1);
    }
}
