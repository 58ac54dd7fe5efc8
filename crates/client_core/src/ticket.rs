//! Tickets matching async service results to the request that is still expected.

/// Opaque id attached to an in-flight request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Issues monotonically increasing tickets.
#[derive(Debug, Default)]
pub struct TicketCounter {
    next: u64,
}

impl TicketCounter {
    pub fn issue(&mut self) -> Ticket {
        let ticket = Ticket(self.next);
        self.next += 1;
        ticket
    }
}

/// One in-flight slot for an operation kind. A result is only accepted when its
/// ticket is still the active one.
#[derive(Debug, Clone)]
pub struct Slot<K = ()> {
    active: Option<(Ticket, K)>,
}

impl<K> Default for Slot<K> {
    fn default() -> Self {
        Self { active: None }
    }
}

impl<K: Copy> Slot<K> {
    pub fn begin(&mut self, ticket: Ticket, key: K) {
        self.active = Some((ticket, key));
    }

    pub fn active_key(&self) -> Option<K> {
        self.active.map(|(_, key)| key)
    }

    pub fn is_busy(&self) -> bool {
        self.active.is_some()
    }

    /// Drops any active request; its result will be ignored.
    pub fn cancel(&mut self) {
        self.active = None;
    }

    /// Frees the slot if `ticket` is the active request, returning its key.
    pub fn finish(&mut self, ticket: Ticket) -> Option<K> {
        match self.active {
            Some((active, key)) if active == ticket => {
                self.active = None;
                Some(key)
            }
            _ => None,
        }
    }
}
