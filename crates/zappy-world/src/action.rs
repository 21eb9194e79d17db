use zappy_types::CommandKind;

/// One command waiting to take effect, plus the tick it completes on
/// (§3 "Action"). A player's queue is FIFO; only the head action runs.
#[derive(Debug, Clone)]
pub struct QueuedAction {
    pub kind: CommandKind,
    pub text: String,
    pub end_tick: u64,
}

/// FIFO of pending commands for one player.
#[derive(Debug, Clone, Default)]
pub struct ActionQueue {
    pending: std::collections::VecDeque<QueuedAction>,
}

impl ActionQueue {
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// `freq` converts the cost table's tick count into ticks actually
    /// elapsed: a cost rounds up to the next whole wall-clock second before
    /// being expressed back in ticks (§3 "`⌈d/f⌉`", S2 `⌈7/10⌉ = 1 s`).
    pub fn push(&mut self, kind: CommandKind, text: String, scheduled_at_tick: u64, freq: u32) {
        let seconds = (kind.cost_ticks() as f64 / freq as f64).ceil() as u64;
        let end_tick = scheduled_at_tick + seconds * freq as u64;
        self.pending.push_back(QueuedAction { kind, text, end_tick });
    }

    pub fn front(&self) -> Option<&QueuedAction> {
        self.pending.front()
    }

    pub fn back(&self) -> Option<&QueuedAction> {
        self.pending.back()
    }

    /// Pop the head action if it is due by `now`, i.e. `end_tick <= now`.
    pub fn pop_due(&mut self, now: u64) -> Option<QueuedAction> {
        if self.pending.front().is_some_and(|a| a.end_tick <= now) {
            self.pending.pop_front()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_tick_rounds_up_to_the_next_whole_second() {
        // S2: Forward costs 7, f=10 -> ceil(7/10) = 1 s = 10 ticks.
        let mut queue = ActionQueue::default();
        queue.push(CommandKind::Forward, "Forward".to_string(), 10, 10);
        assert_eq!(queue.front().unwrap().end_tick, 10 + 10);
    }

    #[test]
    fn pop_due_only_fires_once_end_tick_reached() {
        let mut queue = ActionQueue::default();
        queue.push(CommandKind::Inventory, "Inventory".to_string(), 0, 10);
        let end_tick = queue.front().unwrap().end_tick;
        assert!(queue.pop_due(end_tick - 1).is_none());
        assert!(queue.pop_due(end_tick).is_some());
    }

    #[test]
    fn second_push_schedules_after_the_current_tail() {
        let mut queue = ActionQueue::default();
        queue.push(CommandKind::Incantation, "Incantation".to_string(), 0, 10);
        let tail_end = queue.back().unwrap().end_tick;
        queue.push(CommandKind::Forward, "Forward".to_string(), tail_end, 10);
        assert_eq!(queue.back().unwrap().end_tick, tail_end + 10);
    }

    #[test]
    fn queue_is_fifo() {
        let mut queue = ActionQueue::default();
        queue.push(CommandKind::Forward, "Forward".to_string(), 0, 10);
        queue.push(CommandKind::Right, "Right".to_string(), 0, 10);
        assert_eq!(queue.len(), 2);
        let first = queue.pop_due(u64::MAX).unwrap();
        assert_eq!(first.kind, CommandKind::Forward);
        let second = queue.pop_due(u64::MAX).unwrap();
        assert_eq!(second.kind, CommandKind::Right);
    }
}
