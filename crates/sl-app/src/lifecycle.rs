//! Request lifecycle: per-operation exclusivity and transient status.
//!
//! Each operation class admits at most one in-flight request; a concurrent
//! duplicate is rejected immediately, never queued. Status values carry an
//! expiry instant instead of a background timer: terminal statuses lapse
//! 3.2 s after posting, informational ones persist until superseded.

use std::fmt;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::error::{AppError, AppResult};

/// How long a terminal (success/error) status stays visible.
pub const STATUS_DISMISS: Duration = Duration::from_millis(3200);

/// Operation classes guarded independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationClass {
    Preview,
    Save,
}

impl OperationClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationClass::Preview => "preview",
            OperationClass::Save => "save",
        }
    }
}

impl fmt::Display for OperationClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// At-most-one-in-flight guard for one operation class.
#[derive(Debug)]
pub struct OperationGate {
    class: OperationClass,
    busy: AtomicBool,
}

impl OperationGate {
    pub fn new(class: OperationClass) -> Self {
        Self {
            class,
            busy: AtomicBool::new(false),
        }
    }

    /// Claim the gate, or reject with `Busy` if a request is pending.
    /// The permit releases the gate on drop, including error paths.
    pub fn try_acquire(&self) -> AppResult<GatePermit<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .map_err(|_| AppError::Busy(self.class))?;
        Ok(GatePermit { gate: self })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

#[derive(Debug)]
pub struct GatePermit<'a> {
    gate: &'a OperationGate,
}

impl Drop for GatePermit<'_> {
    fn drop(&mut self) {
        self.gate.busy.store(false, Ordering::Release);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

/// A transient status value with its own expiry.
#[derive(Debug, Clone)]
pub struct Status {
    pub kind: StatusKind,
    pub message: String,
    expires_at: Option<Instant>,
}

impl Status {
    pub fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// Latest-wins status holder. Readers see nothing once a terminal status
/// has lapsed; `Info` stays until the next status supersedes it.
pub struct StatusBoard {
    current: Mutex<Option<Status>>,
    dismiss_after: Duration,
}

impl Default for StatusBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusBoard {
    pub fn new() -> Self {
        Self::with_dismiss(STATUS_DISMISS)
    }

    pub fn with_dismiss(dismiss_after: Duration) -> Self {
        Self {
            current: Mutex::new(None),
            dismiss_after,
        }
    }

    pub fn post_info(&self, message: impl Into<String>) {
        self.post(StatusKind::Info, message.into(), None);
    }

    pub fn post_success(&self, message: impl Into<String>) {
        self.post(
            StatusKind::Success,
            message.into(),
            Some(Instant::now() + self.dismiss_after),
        );
    }

    pub fn post_error(&self, message: impl Into<String>) {
        self.post(
            StatusKind::Error,
            message.into(),
            Some(Instant::now() + self.dismiss_after),
        );
    }

    fn post(&self, kind: StatusKind, message: String, expires_at: Option<Instant>) {
        let mut slot = self.current.lock().expect("status board poisoned");
        *slot = Some(Status {
            kind,
            message,
            expires_at,
        });
    }

    /// The current status, if any and not yet expired.
    pub fn current(&self) -> Option<Status> {
        let mut slot = self.current.lock().expect("status board poisoned");
        let now = Instant::now();
        if slot.as_ref().is_some_and(|s| s.is_expired(now)) {
            *slot = None;
        }
        slot.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn second_acquire_is_rejected_first_completes() {
        let gate = OperationGate::new(OperationClass::Preview);

        let permit = gate.try_acquire().unwrap();
        let err = gate.try_acquire().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Busy);

        // First request still completes and releases the gate
        drop(permit);
        assert!(!gate.is_busy());
        assert!(gate.try_acquire().is_ok());
    }

    #[test]
    fn classes_guard_independently() {
        let preview = OperationGate::new(OperationClass::Preview);
        let save = OperationGate::new(OperationClass::Save);

        let _p = preview.try_acquire().unwrap();
        assert!(save.try_acquire().is_ok());
    }

    #[test]
    fn terminal_status_expires() {
        let board = StatusBoard::with_dismiss(Duration::from_millis(10));
        board.post_success("done");
        assert_eq!(board.current().unwrap().kind, StatusKind::Success);

        std::thread::sleep(Duration::from_millis(20));
        assert!(board.current().is_none());
    }

    #[test]
    fn info_status_persists_until_superseded() {
        let board = StatusBoard::with_dismiss(Duration::from_millis(10));
        board.post_info("working");

        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(board.current().unwrap().kind, StatusKind::Info);

        board.post_error("boom");
        assert_eq!(board.current().unwrap().kind, StatusKind::Error);
    }

    #[test]
    fn newer_status_supersedes_before_expiry() {
        let board = StatusBoard::with_dismiss(Duration::from_millis(500));
        board.post_error("first");
        board.post_info("second");
        let status = board.current().unwrap();
        assert_eq!(status.kind, StatusKind::Info);
        assert_eq!(status.message, "second");
    }
}
