//! Keys understood in companion replies

use crate::tuple::TupleType;

/// Keys of an inbound weather reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MessageKey {
    /// Temperature as a signed 32-bit integer
    Temperature,
    /// Weather conditions ("Cloudy", "Rain", ...)
    Conditions,
    /// Latitude as decimal text
    Latitude,
    /// Longitude as decimal text
    Longitude,
}

// Wire format values
const KEY_TEMPERATURE: u32 = 0;
const KEY_CONDITIONS: u32 = 1;
const KEY_LATITUDE: u32 = 2;
const KEY_LONGITUDE: u32 = 3;

impl MessageKey {
    /// Parse a key from its wire id
    pub fn from_u32(key: u32) -> Option<Self> {
        match key {
            KEY_TEMPERATURE => Some(MessageKey::Temperature),
            KEY_CONDITIONS => Some(MessageKey::Conditions),
            KEY_LATITUDE => Some(MessageKey::Latitude),
            KEY_LONGITUDE => Some(MessageKey::Longitude),
            _ => None,
        }
    }

    /// Convert to wire id
    pub fn to_u32(self) -> u32 {
        match self {
            MessageKey::Temperature => KEY_TEMPERATURE,
            MessageKey::Conditions => KEY_CONDITIONS,
            MessageKey::Latitude => KEY_LATITUDE,
            MessageKey::Longitude => KEY_LONGITUDE,
        }
    }

    /// The value type the companion sends for this key
    pub fn expected_type(self) -> TupleType {
        match self {
            MessageKey::Temperature => TupleType::Int,
            _ => TupleType::CString,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_ids() {
        assert_eq!(MessageKey::from_u32(0), Some(MessageKey::Temperature));
        assert_eq!(MessageKey::from_u32(1), Some(MessageKey::Conditions));
        assert_eq!(MessageKey::from_u32(2), Some(MessageKey::Latitude));
        assert_eq!(MessageKey::from_u32(3), Some(MessageKey::Longitude));
        assert_eq!(MessageKey::Longitude.to_u32(), 3);
    }

    #[test]
    fn test_unknown_key() {
        assert!(MessageKey::from_u32(4).is_none());
        assert!(MessageKey::from_u32(9).is_none());
        assert!(MessageKey::from_u32(u32::MAX).is_none());
    }

    #[test]
    fn test_expected_type() {
        assert_eq!(MessageKey::Temperature.expected_type(), TupleType::Int);
        assert_eq!(MessageKey::Latitude.expected_type(), TupleType::CString);
    }
}
