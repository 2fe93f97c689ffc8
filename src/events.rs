use serde::{Deserialize, Serialize};

use crate::decimal::Money;

/// events emitted while a schedule is calculated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScheduleEvent {
    // loan events
    LoanPaidOff {
        term: u32,
        loan: String,
        final_payment: Money,
    },

    // rollover events
    RolloverReleased {
        term: u32,
        amount: Money,
    },
    RolloverClaimed {
        term: u32,
        loan: String,
        amount: Money,
    },

    // run events
    ScheduleCompleted {
        terms: u32,
        total_interest: Money,
    },
}

/// event store for collecting events during a run
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<ScheduleEvent>,
}

impl EventStore {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: ScheduleEvent) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<ScheduleEvent> {
        std::mem::take(&mut self.events)
    }
}
