//! This module provides ways to tweak a [`MemoryStore`](crate::memory::MemoryStore), so that it can return errors in some tests

use crate::error::CalendarError;

/// This stores some behaviour tweaks, that describe how a mocked store will behave during a given test
///
/// So that a functions fails _n_ times after _m_ initial successes, set `(m, n)` for the suited parameter
#[derive(Default, Clone, Debug)]
pub struct MockBehaviour {
    /// If this is true, every action will be allowed
    pub is_suspended: bool,

    // From the RecordStore trait
    pub list_records_behaviour: (u32, u32),
    pub create_record_behaviour: (u32, u32),
    pub update_record_behaviour: (u32, u32),
    pub delete_record_behaviour: (u32, u32),
    pub set_completion_behaviour: (u32, u32),
    pub delete_completed_behaviour: (u32, u32),
    pub delete_all_behaviour: (u32, u32),
}

impl MockBehaviour {
    pub fn new() -> Self {
        Self::default()
    }

    /// All operations will fail at once, for `n_fails` times
    pub fn fail_now(n_fails: u32) -> Self {
        Self {
            is_suspended: false,
            list_records_behaviour: (0, n_fails),
            create_record_behaviour: (0, n_fails),
            update_record_behaviour: (0, n_fails),
            delete_record_behaviour: (0, n_fails),
            set_completion_behaviour: (0, n_fails),
            delete_completed_behaviour: (0, n_fails),
            delete_all_behaviour: (0, n_fails),
        }
    }

    /// Suspend this mock behaviour until you call `resume`
    pub fn suspend(&mut self) {
        self.is_suspended = true;
    }
    /// Make this behaviour active again
    pub fn resume(&mut self) {
        self.is_suspended = false;
    }

    pub fn can_list_records(&mut self) -> Result<(), CalendarError> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.list_records_behaviour, "list_records")
    }
    pub fn can_create_record(&mut self) -> Result<(), CalendarError> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.create_record_behaviour, "create_record")
    }
    pub fn can_update_record(&mut self) -> Result<(), CalendarError> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.update_record_behaviour, "update_record")
    }
    pub fn can_delete_record(&mut self) -> Result<(), CalendarError> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.delete_record_behaviour, "delete_record")
    }
    pub fn can_set_completion(&mut self) -> Result<(), CalendarError> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.set_completion_behaviour, "set_completion")
    }
    pub fn can_delete_completed(&mut self) -> Result<(), CalendarError> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.delete_completed_behaviour, "delete_completed")
    }
    pub fn can_delete_all(&mut self) -> Result<(), CalendarError> {
        if self.is_suspended { return Ok(()) }
        decrement(&mut self.delete_all_behaviour, "delete_all")
    }
}


/// Return Ok(()) in case the value is `(1+, _)` or `(_, 0)`, or return Err and decrement otherwise
fn decrement(value: &mut (u32, u32), descr: &str) -> Result<(), CalendarError> {
    let remaining_successes = value.0;
    let remaining_failures = value.1;

    if remaining_successes > 0 {
        value.0 -= 1;
        log::debug!("Mock behaviour: allowing a {} ({:?})", descr, value);
        Ok(())
    } else if remaining_failures > 0 {
        value.1 -= 1;
        log::debug!("Mock behaviour: failing a {} ({:?})", descr, value);
        Err(CalendarError::RemoteFailure(format!("Mocked behaviour requires this {} to fail this time. ({:?})", descr, value)))
    } else {
        log::debug!("Mock behaviour: allowing a {} ({:?})", descr, value);
        Ok(())
    }
}
