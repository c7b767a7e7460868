//! Weather reply decoder
//!
//! Projects one companion reply into the four display fragments and then
//! composes the weather and location lines. Decoding is tolerant per key:
//! an unknown key or a value of the wrong type is reported and skipped, and
//! the remaining pairs of the same message are still applied.

use core::fmt::Write;

use heapless::{String, Vec};
use wristcast_protocol::{text, Dictionary, MessageKey, TupleType, MAX_TUPLES};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Capacity of the temperature fragment ("-40°F")
pub const TEMPERATURE_CAP: usize = 7;

/// Capacity of the conditions fragment
pub const CONDITIONS_CAP: usize = 31;

/// Characters kept from the latitude text
pub const LATITUDE_CHARS: usize = 6;

/// Characters kept from the longitude text
pub const LONGITUDE_CHARS: usize = 6;

/// Characters kept from a negative longitude (room for the sign)
pub const NEGATIVE_LONGITUDE_CHARS: usize = 7;

/// Capacity of a composed display line
pub const COMPOSITE_CAP: usize = 31;

/// Separator between fragments of a composed line
pub const SEPARATOR: &str = ", ";

/// A composed display line
pub type Composite = String<COMPOSITE_CAP>;

/// What happens to fragments a message does not mention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FragmentPolicy {
    /// Missing fragments keep the value from an earlier message
    #[default]
    CarryForward,
    /// Every message starts from blank fragments
    Reset,
}

/// Why a pair of a message was not applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rejection {
    /// Key is not part of the weather schema
    UnknownKey(u32),
    /// Known key carrying a value of the wrong type
    TypeMismatch { key: MessageKey, found: TupleType },
}

/// Outcome of decoding one message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DecodeReport {
    /// Pairs copied into fragments
    pub applied: u8,
    /// Pairs whose value was cut to fit its fragment
    pub truncated: u8,
    /// Pairs skipped, in message order
    pub rejected: Vec<Rejection, MAX_TUPLES>,
}

impl DecodeReport {
    /// Keys that were not recognized, in message order
    pub fn unknown_keys(&self) -> impl Iterator<Item = u32> + '_ {
        self.rejected.iter().filter_map(|r| match r {
            Rejection::UnknownKey(key) => Some(*key),
            _ => None,
        })
    }
}

/// The composed weather and location lines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Readings {
    /// "<temp>, <conditions>"
    pub weather: Composite,
    /// "<lat>, <lon>"
    pub location: Composite,
}

/// Long-lived fragment buffers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeatherFragments {
    temperature: String<TEMPERATURE_CAP>,
    conditions: String<CONDITIONS_CAP>,
    latitude: String<LATITUDE_CHARS>,
    longitude: String<NEGATIVE_LONGITUDE_CHARS>,
}

impl WeatherFragments {
    pub fn temperature(&self) -> &str {
        &self.temperature
    }

    pub fn conditions(&self) -> &str {
        &self.conditions
    }

    pub fn latitude(&self) -> &str {
        &self.latitude
    }

    pub fn longitude(&self) -> &str {
        &self.longitude
    }

    pub fn clear(&mut self) {
        self.temperature.clear();
        self.conditions.clear();
        self.latitude.clear();
        self.longitude.clear();
    }

    /// Set the temperature fragment to `<degrees>°F`
    ///
    /// Returns `true` if the text was cut.
    pub fn set_temperature(&mut self, degrees: i32) -> bool {
        let mut full: String<16> = String::new();
        let _ = write!(full, "{}°F", degrees);
        text::assign(&mut self.temperature, &full)
    }

    pub fn set_conditions(&mut self, conditions: &str) -> bool {
        text::assign(&mut self.conditions, conditions)
    }

    /// Keep the first six characters of the latitude
    pub fn set_latitude(&mut self, latitude: &str) -> bool {
        let kept = text::take_chars(latitude, LATITUDE_CHARS);
        text::assign(&mut self.latitude, kept) || kept.len() < latitude.len()
    }

    /// Keep the first six characters of the longitude, seven if negative
    pub fn set_longitude(&mut self, longitude: &str) -> bool {
        let count = if longitude.starts_with('-') {
            NEGATIVE_LONGITUDE_CHARS
        } else {
            LONGITUDE_CHARS
        };
        let kept = text::take_chars(longitude, count);
        text::assign(&mut self.longitude, kept) || kept.len() < longitude.len()
    }

    /// Compose the two display lines from the current fragments
    pub fn compose(&self) -> Readings {
        Readings {
            weather: join(&self.temperature, &self.conditions),
            location: join(&self.latitude, &self.longitude),
        }
    }
}

fn join(first: &str, second: &str) -> Composite {
    let mut line = Composite::new();
    text::append(&mut line, first);
    text::append(&mut line, SEPARATOR);
    text::append(&mut line, second);
    line
}

/// Weather reply decoder
#[derive(Debug, Clone, Default)]
pub struct WeatherDecoder {
    policy: FragmentPolicy,
    fragments: WeatherFragments,
}

impl WeatherDecoder {
    pub fn new(policy: FragmentPolicy) -> Self {
        Self {
            policy,
            fragments: WeatherFragments::default(),
        }
    }

    /// Decode one message and compose the display lines
    ///
    /// Pairs are applied front to back; the lines are composed once the
    /// whole message has been consumed.
    pub fn decode(&mut self, message: &Dictionary) -> (Readings, DecodeReport) {
        if self.policy == FragmentPolicy::Reset {
            self.fragments.clear();
        }

        let mut report = DecodeReport::default();
        for tuple in message.iter() {
            let Some(key) = MessageKey::from_u32(tuple.key) else {
                let _ = report.rejected.push(Rejection::UnknownKey(tuple.key));
                continue;
            };

            let truncated = match key {
                MessageKey::Temperature => tuple
                    .value
                    .as_i32()
                    .map(|degrees| self.fragments.set_temperature(degrees)),
                MessageKey::Conditions => tuple
                    .value
                    .as_str()
                    .map(|s| self.fragments.set_conditions(s)),
                MessageKey::Latitude => tuple
                    .value
                    .as_str()
                    .map(|s| self.fragments.set_latitude(s)),
                MessageKey::Longitude => tuple
                    .value
                    .as_str()
                    .map(|s| self.fragments.set_longitude(s)),
            };

            match truncated {
                Some(cut) => {
                    report.applied += 1;
                    if cut {
                        report.truncated += 1;
                    }
                }
                None => {
                    let _ = report.rejected.push(Rejection::TypeMismatch {
                        key,
                        found: tuple.value.tuple_type(),
                    });
                }
            }
        }

        (self.fragments.compose(), report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wristcast_protocol::Tuple;

    fn message(tuples: &[Tuple]) -> Dictionary {
        Dictionary::from_tuples(tuples).unwrap()
    }

    #[test]
    fn test_weather_line() {
        let mut decoder = WeatherDecoder::default();
        let (readings, report) =
            decoder.decode(&message(&[Tuple::int(0, 72), Tuple::text(1, "Cloudy")]));

        assert_eq!(readings.weather.as_str(), "72°F, Cloudy");
        assert_eq!(report.applied, 2);
        assert!(report.rejected.is_empty());
    }

    #[test]
    fn test_location_line() {
        let mut decoder = WeatherDecoder::default();
        let (readings, _) = decoder.decode(&message(&[
            Tuple::text(2, "41.878113"),
            Tuple::text(3, "-87.629799"),
        ]));

        assert_eq!(readings.location.as_str(), "41.878, -87.629");
    }

    #[test]
    fn test_longitude_sign_keeps_extra_char() {
        let mut fragments = WeatherFragments::default();
        fragments.set_longitude("-87.636");
        assert_eq!(fragments.longitude(), "-87.636");
        fragments.set_longitude("87.636");
        assert_eq!(fragments.longitude(), "87.636");
        fragments.set_longitude("87.6361");
        assert_eq!(fragments.longitude(), "87.636");
    }

    #[test]
    fn test_temperature_truncated_to_buffer() {
        let mut fragments = WeatherFragments::default();
        assert!(!fragments.set_temperature(-40));
        assert_eq!(fragments.temperature(), "-40°F");
        assert!(fragments.set_temperature(-1000));
        assert_eq!(fragments.temperature(), "-1000°");
        assert!(fragments.set_temperature(123456));
        assert_eq!(fragments.temperature(), "123456");
    }

    #[test]
    fn test_conditions_truncated() {
        let mut fragments = WeatherFragments::default();
        assert!(fragments.set_conditions("Heavy thunderstorm with hail and wind"));
        assert_eq!(fragments.conditions().len(), CONDITIONS_CAP);
    }

    #[test]
    fn test_unknown_key_does_not_abort() {
        let mut decoder = WeatherDecoder::default();
        let (readings, report) = decoder.decode(&message(&[
            Tuple::int(0, 60),
            Tuple::int(9, 1),
            Tuple::text(1, "Rain"),
        ]));

        assert_eq!(readings.weather.as_str(), "60°F, Rain");
        assert_eq!(report.applied, 2);
        assert_eq!(report.rejected.as_slice(), &[Rejection::UnknownKey(9)]);
        assert_eq!(report.unknown_keys().count(), 1);
    }

    #[test]
    fn test_type_mismatch_skipped() {
        let mut decoder = WeatherDecoder::default();
        let (readings, report) = decoder.decode(&message(&[
            Tuple::text(0, "72"),
            Tuple::text(1, "Clear"),
        ]));

        assert_eq!(readings.weather.as_str(), ", Clear");
        assert_eq!(
            report.rejected.as_slice(),
            &[Rejection::TypeMismatch {
                key: MessageKey::Temperature,
                found: TupleType::CString,
            }]
        );
    }

    #[test]
    fn test_unsigned_temperature_accepted() {
        let mut decoder = WeatherDecoder::default();
        let (readings, _) = decoder.decode(&message(&[Tuple::uint(0, 88), Tuple::text(1, "Sun")]));
        assert_eq!(readings.weather.as_str(), "88°F, Sun");
    }

    #[test]
    fn test_carry_forward_keeps_missing_fragments() {
        let mut decoder = WeatherDecoder::new(FragmentPolicy::CarryForward);
        decoder.decode(&message(&[
            Tuple::int(0, 72),
            Tuple::text(1, "Cloudy"),
            Tuple::text(2, "41.878"),
            Tuple::text(3, "-87.629"),
        ]));

        let (readings, _) = decoder.decode(&message(&[Tuple::int(0, 75)]));
        assert_eq!(readings.weather.as_str(), "75°F, Cloudy");
        assert_eq!(readings.location.as_str(), "41.878, -87.629");
    }

    #[test]
    fn test_reset_clears_missing_fragments() {
        let mut decoder = WeatherDecoder::new(FragmentPolicy::Reset);
        decoder.decode(&message(&[Tuple::int(0, 72), Tuple::text(1, "Cloudy")]));

        let (readings, _) = decoder.decode(&message(&[Tuple::int(0, 75)]));
        assert_eq!(readings.weather.as_str(), "75°F, ");
        assert_eq!(readings.location.as_str(), ", ");
    }

    #[test]
    fn test_composite_fits_buffer() {
        let mut fragments = WeatherFragments::default();
        fragments.set_temperature(-100);
        fragments.set_conditions("Heavy thunderstorm with hail and wind");
        let readings = fragments.compose();
        assert_eq!(readings.weather.len(), COMPOSITE_CAP);
        assert!(readings.weather.starts_with("-100°F, Heavy"));
    }

    #[test]
    fn test_empty_message() {
        let mut decoder = WeatherDecoder::default();
        let (readings, report) = decoder.decode(&Dictionary::new());
        assert_eq!(readings.weather.as_str(), ", ");
        assert_eq!(report, DecodeReport::default());
    }
}
