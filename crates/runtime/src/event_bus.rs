/// Structured record of what happened to the map, in order.
///
/// The browser app mirrors these to the console; tests assert on them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub seq: u64,
    pub kind: &'static str,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct EventBus {
    next_seq: u64,
    events: Vec<Event>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, kind: &'static str, message: impl Into<String>) {
        self.events.push(Event {
            seq: self.next_seq,
            kind,
            message: message.into(),
        });
        self.next_seq += 1;
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn kinds(&self) -> Vec<&'static str> {
        self.events.iter().map(|e| e.kind).collect()
    }

    /// Takes pending events; sequence numbers keep counting.
    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}
