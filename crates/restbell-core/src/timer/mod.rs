mod scheduler;
mod slot;

pub use scheduler::{Scheduler, SchedulerState, REARM_DELAY_SECS};
pub use slot::{
    format_mmss, parse_duration_min, Slot, SlotConfig, SlotPhase, MAX_DURATION_MIN,
};
