//! Generation counter for asynchronous image loads.
//!
//! Every load takes a [`LoadTicket`]. Starting another load, or retiring the
//! generation when the view goes away, makes older tickets stale, and their
//! completions must be dropped.

/// Identifies one load attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket(u32);

impl LoadTicket {
    pub fn id(self) -> u32 {
        self.0
    }

    /// Rebuild a ticket that crossed a boundary as a raw id.
    pub fn from_id(id: u32) -> Self {
        Self(id)
    }
}

#[derive(Debug, Default)]
pub struct LoadGeneration {
    current: u32,
    retired: bool,
}

impl LoadGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new load, superseding every outstanding ticket.
    pub fn begin(&mut self) -> LoadTicket {
        self.current = self.current.wrapping_add(1);
        LoadTicket(self.current)
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        !self.retired && ticket.0 == self.current
    }

    /// Supersede outstanding tickets without starting a load.
    pub fn cancel(&mut self) {
        self.current = self.current.wrapping_add(1);
    }

    /// No ticket, past or future, is current after this.
    pub fn retire(&mut self) {
        self.retired = true;
    }

    pub fn is_retired(&self) -> bool {
        self.retired
    }
}
