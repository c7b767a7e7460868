//! Transport result codes
//!
//! Reason codes the host messaging layer reports when an inbound message is
//! dropped or an outbound message fails. The watchface only logs them.

/// Result of a messaging operation, as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AppMessageResult {
    Ok,
    /// The companion did not acknowledge in time
    SendTimeout,
    /// The companion rejected the message
    SendRejected,
    /// No phone connected
    NotConnected,
    /// The companion app is not running
    AppNotRunning,
    InvalidArgs,
    /// A previous outbound message is still in flight
    Busy,
    /// Message did not fit the inbox/outbox buffer
    BufferOverflow,
    AlreadyReleased,
    CallbackAlreadyRegistered,
    CallbackNotRegistered,
    OutOfMemory,
    /// Messaging was closed
    Closed,
    InternalError,
    InvalidState,
}

// Wire format values
const RESULT_OK: u16 = 0;
const RESULT_SEND_TIMEOUT: u16 = 1 << 1;
const RESULT_SEND_REJECTED: u16 = 1 << 2;
const RESULT_NOT_CONNECTED: u16 = 1 << 3;
const RESULT_APP_NOT_RUNNING: u16 = 1 << 4;
const RESULT_INVALID_ARGS: u16 = 1 << 5;
const RESULT_BUSY: u16 = 1 << 6;
const RESULT_BUFFER_OVERFLOW: u16 = 1 << 7;
const RESULT_ALREADY_RELEASED: u16 = 1 << 9;
const RESULT_CALLBACK_ALREADY_REGISTERED: u16 = 1 << 10;
const RESULT_CALLBACK_NOT_REGISTERED: u16 = 1 << 11;
const RESULT_OUT_OF_MEMORY: u16 = 1 << 12;
const RESULT_CLOSED: u16 = 1 << 13;
const RESULT_INTERNAL_ERROR: u16 = 1 << 14;
const RESULT_INVALID_STATE: u16 = 1 << 15;

impl AppMessageResult {
    /// Parse a result from its host code
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            RESULT_OK => Some(AppMessageResult::Ok),
            RESULT_SEND_TIMEOUT => Some(AppMessageResult::SendTimeout),
            RESULT_SEND_REJECTED => Some(AppMessageResult::SendRejected),
            RESULT_NOT_CONNECTED => Some(AppMessageResult::NotConnected),
            RESULT_APP_NOT_RUNNING => Some(AppMessageResult::AppNotRunning),
            RESULT_INVALID_ARGS => Some(AppMessageResult::InvalidArgs),
            RESULT_BUSY => Some(AppMessageResult::Busy),
            RESULT_BUFFER_OVERFLOW => Some(AppMessageResult::BufferOverflow),
            RESULT_ALREADY_RELEASED => Some(AppMessageResult::AlreadyReleased),
            RESULT_CALLBACK_ALREADY_REGISTERED => Some(AppMessageResult::CallbackAlreadyRegistered),
            RESULT_CALLBACK_NOT_REGISTERED => Some(AppMessageResult::CallbackNotRegistered),
            RESULT_OUT_OF_MEMORY => Some(AppMessageResult::OutOfMemory),
            RESULT_CLOSED => Some(AppMessageResult::Closed),
            RESULT_INTERNAL_ERROR => Some(AppMessageResult::InternalError),
            RESULT_INVALID_STATE => Some(AppMessageResult::InvalidState),
            _ => None,
        }
    }

    /// Convert to host code
    pub fn code(self) -> u16 {
        match self {
            AppMessageResult::Ok => RESULT_OK,
            AppMessageResult::SendTimeout => RESULT_SEND_TIMEOUT,
            AppMessageResult::SendRejected => RESULT_SEND_REJECTED,
            AppMessageResult::NotConnected => RESULT_NOT_CONNECTED,
            AppMessageResult::AppNotRunning => RESULT_APP_NOT_RUNNING,
            AppMessageResult::InvalidArgs => RESULT_INVALID_ARGS,
            AppMessageResult::Busy => RESULT_BUSY,
            AppMessageResult::BufferOverflow => RESULT_BUFFER_OVERFLOW,
            AppMessageResult::AlreadyReleased => RESULT_ALREADY_RELEASED,
            AppMessageResult::CallbackAlreadyRegistered => RESULT_CALLBACK_ALREADY_REGISTERED,
            AppMessageResult::CallbackNotRegistered => RESULT_CALLBACK_NOT_REGISTERED,
            AppMessageResult::OutOfMemory => RESULT_OUT_OF_MEMORY,
            AppMessageResult::Closed => RESULT_CLOSED,
            AppMessageResult::InternalError => RESULT_INTERNAL_ERROR,
            AppMessageResult::InvalidState => RESULT_INVALID_STATE,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, AppMessageResult::Ok)
    }

    /// Returns true if the phone side is unreachable rather than the message bad
    pub fn is_link_problem(&self) -> bool {
        matches!(
            self,
            AppMessageResult::SendTimeout
                | AppMessageResult::NotConnected
                | AppMessageResult::AppNotRunning
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip() {
        let results = [
            AppMessageResult::Ok,
            AppMessageResult::SendTimeout,
            AppMessageResult::SendRejected,
            AppMessageResult::NotConnected,
            AppMessageResult::Busy,
            AppMessageResult::BufferOverflow,
            AppMessageResult::Closed,
            AppMessageResult::InvalidState,
        ];

        for result in results {
            assert_eq!(AppMessageResult::from_code(result.code()), Some(result));
        }
    }

    #[test]
    fn test_known_codes() {
        assert_eq!(AppMessageResult::NotConnected.code(), 8);
        assert_eq!(AppMessageResult::BufferOverflow.code(), 128);
        assert_eq!(AppMessageResult::InvalidState.code(), 32768);
    }

    #[test]
    fn test_unknown_code() {
        assert!(AppMessageResult::from_code(3).is_none());
        assert!(AppMessageResult::from_code(256).is_none());
    }

    #[test]
    fn test_link_problem() {
        assert!(AppMessageResult::NotConnected.is_link_problem());
        assert!(!AppMessageResult::Busy.is_link_problem());
        assert!(AppMessageResult::Ok.is_ok());
    }
}
