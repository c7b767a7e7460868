//! Simulated outbox
//!
//! Encodes each outbound dictionary into the host byte layout and queues it
//! for the companion task. Completion is reported later by the companion as
//! an outbox sent/failed event.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Sender;
use heapless::Vec;
use log::debug;
use wristcast_hal::{Outbox, OutboxHandle};
use wristcast_protocol::{AppMessageResult, Dictionary, MAX_DICT_SIZE};

use crate::channels::COMPANION_CHANNEL_SIZE;

/// One outbound message on its way to the companion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanionRequest {
    pub handle: OutboxHandle,
    pub payload: Vec<u8, MAX_DICT_SIZE>,
}

/// Outbox feeding the companion request queue
pub struct QueueOutbox<'a> {
    sender: Sender<'a, CriticalSectionRawMutex, CompanionRequest, COMPANION_CHANNEL_SIZE>,
    next: OutboxHandle,
}

impl<'a> QueueOutbox<'a> {
    pub fn new(
        sender: Sender<'a, CriticalSectionRawMutex, CompanionRequest, COMPANION_CHANNEL_SIZE>,
    ) -> Self {
        Self {
            sender,
            next: OutboxHandle::new(1),
        }
    }
}

impl Outbox for QueueOutbox<'_> {
    fn submit(&mut self, message: &Dictionary) -> Result<OutboxHandle, AppMessageResult> {
        let payload = message
            .encode_to_vec()
            .map_err(|_| AppMessageResult::BufferOverflow)?;

        let handle = self.next;
        self.sender
            .try_send(CompanionRequest { handle, payload })
            .map_err(|_| AppMessageResult::Busy)?;

        debug!("Queued outbound message #{} ({} tuples)", handle.id(), message.len());
        self.next = handle.next();
        Ok(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_sync::channel::Channel;

    #[test]
    fn test_submit_assigns_handles() {
        let channel: Channel<CriticalSectionRawMutex, CompanionRequest, COMPANION_CHANNEL_SIZE> =
            Channel::new();
        let mut outbox = QueueOutbox::new(channel.sender());

        let first = outbox.submit(&Dictionary::new()).unwrap();
        let second = outbox.submit(&Dictionary::new()).unwrap();
        assert_eq!(first.id(), 1);
        assert_eq!(second.id(), 2);

        let request = channel.try_receive().unwrap();
        assert_eq!(request.handle, first);
        assert_eq!(request.payload.as_slice(), &[0]);
    }

    #[test]
    fn test_full_queue_is_busy() {
        let channel: Channel<CriticalSectionRawMutex, CompanionRequest, COMPANION_CHANNEL_SIZE> =
            Channel::new();
        let mut outbox = QueueOutbox::new(channel.sender());

        for _ in 0..COMPANION_CHANNEL_SIZE {
            outbox.submit(&Dictionary::new()).unwrap();
        }
        assert_eq!(outbox.submit(&Dictionary::new()), Err(AppMessageResult::Busy));

        // A rejected submit does not consume a handle
        channel.try_receive().unwrap();
        let handle = outbox.submit(&Dictionary::new()).unwrap();
        assert_eq!(handle.id(), COMPANION_CHANNEL_SIZE as u32 + 1);
    }
}
