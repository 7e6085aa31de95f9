/// Rescan scheduling

/// What caused a rescan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTrigger {
    Initial,
    Navigation,
    Mutation,
}

impl RefreshTrigger {
    /// Navigations can change the signed-in channel list; DOM growth cannot
    pub fn refetches_directory(self) -> bool {
        !matches!(self, RefreshTrigger::Mutation)
    }
}

/// Identifies one scheduled run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Last-write-wins scheduling: each `schedule` supersedes the pending run
#[derive(Debug, Default)]
pub struct Debouncer {
    generation: u64,
    pending: Option<Ticket>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self) -> Ticket {
        self.generation += 1;
        let ticket = Ticket(self.generation);
        self.pending = Some(ticket);
        ticket
    }

    /// Consume the pending run if `ticket` is still the latest
    pub fn fire(&mut self, ticket: Ticket) -> bool {
        if self.pending == Some(ticket) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
