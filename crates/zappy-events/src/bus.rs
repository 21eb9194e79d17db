use std::collections::HashMap;
use tokio::sync::mpsc::UnboundedSender;

/// Fan-out registry for connected GUI spectators. Every server-initiated
/// notification (§4.6) is pushed here once and forwarded to every
/// registered spectator's write half; a spectator whose receiver has gone
/// away is pruned lazily on the next broadcast instead of being removed
/// eagerly.
#[derive(Debug, Default)]
pub struct GuiBroadcaster {
    spectators: HashMap<u32, UnboundedSender<String>>,
    next_spectator_id: u32,
}

impl GuiBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a spectator's outbound channel, returning a handle used to
    /// unregister it later.
    pub fn register(&mut self, sender: UnboundedSender<String>) -> u32 {
        let id = self.next_spectator_id;
        self.next_spectator_id += 1;
        self.spectators.insert(id, sender);
        id
    }

    pub fn unregister(&mut self, id: u32) {
        self.spectators.remove(&id);
    }

    pub fn spectator_count(&self) -> usize {
        self.spectators.len()
    }

    /// Push one line to every connected spectator.
    pub fn broadcast(&mut self, line: String) {
        self.spectators.retain(|_, sender| sender.send(line.clone()).is_ok());
    }

    /// Push a line to a single spectator, if still connected.
    pub fn send_to(&mut self, id: u32, line: String) {
        let mut drop_it = false;
        if let Some(sender) = self.spectators.get(&id) {
            if sender.send(line).is_err() {
                drop_it = true;
            }
        }
        if drop_it {
            self.spectators.remove(&id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn broadcast_reaches_every_registered_spectator() {
        let mut bus = GuiBroadcaster::new();
        let (tx1, mut rx1) = tokio::sync::mpsc::unbounded_channel();
        let (tx2, mut rx2) = tokio::sync::mpsc::unbounded_channel();
        bus.register(tx1);
        bus.register(tx2);

        bus.broadcast("msz 10 10\n".to_string());

        assert_eq!(rx1.try_recv().unwrap(), "msz 10 10\n");
        assert_eq!(rx2.try_recv().unwrap(), "msz 10 10\n");
    }

    #[test]
    fn dropped_receiver_is_pruned_on_next_broadcast() {
        let mut bus = GuiBroadcaster::new();
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        bus.register(tx);
        drop(rx);

        bus.broadcast("pex #1\n".to_string());

        assert_eq!(bus.spectator_count(), 0);
    }

    #[test]
    fn unregister_stops_future_delivery() {
        let mut bus = GuiBroadcaster::new();
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let id = bus.register(tx);
        bus.unregister(id);

        bus.broadcast("sgt 100\n".to_string());

        assert!(rx.try_recv().is_err());
    }
}
