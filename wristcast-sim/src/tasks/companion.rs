//! Simulated phone companion
//!
//! Answers every refresh request with the configured weather reply. Replies
//! travel in the host dictionary byte layout and are decoded on arrival, the
//! same path a real inbound message takes.

use embassy_time::Timer;
use log::{debug, info, warn};

use wristcast_core::state::Event;
use wristcast_protocol::{AppMessageResult, DictError, Dictionary, MessageKey, Tuple};

use crate::channels::{COMPANION_CHANNEL, EVENT_CHANNEL};
use crate::config::CompanionSection;

/// Build the reply the companion sends for a weather lookup
pub fn weather_reply(config: &CompanionSection) -> Result<Dictionary, DictError> {
    Dictionary::from_tuples(&[
        Tuple::int(MessageKey::Temperature.to_u32(), config.temperature),
        Tuple::text(MessageKey::Conditions.to_u32(), &config.conditions),
        Tuple::text(MessageKey::Latitude.to_u32(), &config.latitude),
        Tuple::text(MessageKey::Longitude.to_u32(), &config.longitude),
    ])
}

/// Move a message across the simulated link
///
/// Encodes into the host byte layout and decodes it again on the watch side.
pub fn transport(message: &Dictionary) -> Result<Dictionary, AppMessageResult> {
    let bytes = message
        .encode_to_vec()
        .map_err(|_| AppMessageResult::BufferOverflow)?;
    Dictionary::decode(&bytes).map_err(|_| AppMessageResult::InternalError)
}

/// Whether the `count`th request should be reported as failed
fn should_fail(fail_every: u32, count: u32) -> bool {
    fail_every > 0 && count % fail_every == 0
}

async fn deliver(config: &CompanionSection) {
    Timer::after_millis(config.response_delay_ms).await;

    let event = match weather_reply(config)
        .map_err(|_| AppMessageResult::BufferOverflow)
        .and_then(|reply| transport(&reply))
    {
        Ok(message) => Event::InboxReceived(message),
        Err(reason) => Event::InboxDropped(reason),
    };
    EVENT_CHANNEL.send(event).await;
}

/// Companion task - serves refresh requests from the outbox
#[embassy_executor::task]
pub async fn companion_task(config: &'static CompanionSection) {
    info!("Companion task started");

    // The phone looks up weather once when the app opens
    if config.answer_on_ready {
        debug!("Companion ready, sending weather");
        deliver(config).await;
    }

    let mut count = 0u32;
    loop {
        let request = COMPANION_CHANNEL.receive().await;
        count = count.wrapping_add(1);

        match Dictionary::decode(&request.payload) {
            Ok(message) => debug!(
                "Companion got request #{} ({} tuples)",
                request.handle.id(),
                message.len()
            ),
            Err(e) => warn!("Companion got malformed request: {:?}", e),
        }

        if should_fail(config.fail_every, count) {
            EVENT_CHANNEL
                .send(Event::OutboxFailed(request.handle, AppMessageResult::NotConnected))
                .await;
            continue;
        }

        EVENT_CHANNEL.send(Event::OutboxSent(request.handle)).await;
        deliver(config).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wristcast_core::weather::WeatherDecoder;

    #[test]
    fn test_reply_survives_transport() {
        let config = CompanionSection::default();
        let reply = weather_reply(&config).unwrap();
        let received = transport(&reply).unwrap();
        assert_eq!(received, reply);

        let (readings, report) = WeatherDecoder::default().decode(&received);
        assert!(report.rejected.is_empty());
        assert_eq!(readings.weather.as_str(), "72°F, Cloudy");
        assert_eq!(readings.location.as_str(), "41.878, -87.629");
    }

    #[test]
    fn test_long_conditions_truncated() {
        let config = CompanionSection {
            conditions: "x".repeat(100),
            ..CompanionSection::default()
        };
        let received = transport(&weather_reply(&config).unwrap()).unwrap();
        let conditions = received
            .find(MessageKey::Conditions.to_u32())
            .and_then(|t| t.value.as_str())
            .unwrap();
        assert!(conditions.len() < 100);
    }

    #[test]
    fn test_failure_cadence() {
        let failed: Vec<u32> = (1..=9).filter(|&n| should_fail(3, n)).collect();
        assert_eq!(failed, vec![3, 6, 9]);
        assert!(!(1..=9).any(|n| should_fail(0, n)));
    }
}
