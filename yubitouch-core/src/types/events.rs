//! Touch events emitted by detectors.
//!
//! Each detector reports the start and the end of a period during which the
//! hardware key waits for a physical touch. Events carry no payload beyond
//! their tag; the textual tags (`GPG_ON`, `U2F_OFF`, ...) are the ones detectors
//! write on the wire.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The subsystem that asked for a touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TouchSource {
    /// A GnuPG operation (signing, decryption, authentication).
    Gpg,
    /// A U2F / FIDO2 request.
    U2f,
    /// An HMAC challenge-response request.
    Hmac,
}

/// A discrete touch event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TouchEvent {
    #[serde(rename = "GPG_ON")]
    GpgOn,
    #[serde(rename = "GPG_OFF")]
    GpgOff,
    #[serde(rename = "U2F_ON")]
    U2fOn,
    #[serde(rename = "U2F_OFF")]
    U2fOff,
    #[serde(rename = "HMAC_ON")]
    HmacOn,
    #[serde(rename = "HMAC_OFF")]
    HmacOff,
}

impl TouchEvent {
    /// Every event tag, ON before OFF for each source.
    pub const ALL: [TouchEvent; 6] = [
        TouchEvent::GpgOn,
        TouchEvent::GpgOff,
        TouchEvent::U2fOn,
        TouchEvent::U2fOff,
        TouchEvent::HmacOn,
        TouchEvent::HmacOff,
    ];

    /// Returns `true` if the event opens a touch request.
    pub fn is_on(&self) -> bool {
        matches!(self, TouchEvent::GpgOn | TouchEvent::U2fOn | TouchEvent::HmacOn)
    }

    pub fn source(&self) -> TouchSource {
        match self {
            TouchEvent::GpgOn | TouchEvent::GpgOff => TouchSource::Gpg,
            TouchEvent::U2fOn | TouchEvent::U2fOff => TouchSource::U2f,
            TouchEvent::HmacOn | TouchEvent::HmacOff => TouchSource::Hmac,
        }
    }

    /// The wire tag of this event.
    pub fn as_str(&self) -> &'static str {
        match self {
            TouchEvent::GpgOn => "GPG_ON",
            TouchEvent::GpgOff => "GPG_OFF",
            TouchEvent::U2fOn => "U2F_ON",
            TouchEvent::U2fOff => "U2F_OFF",
            TouchEvent::HmacOn => "HMAC_ON",
            TouchEvent::HmacOff => "HMAC_OFF",
        }
    }
}

impl fmt::Display for TouchEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the known event tags.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown touch event tag: '{0}'")]
pub struct ParseTouchEventError(pub String);

impl FromStr for TouchEvent {
    type Err = ParseTouchEventError;

    /// Parses a wire tag. Surrounding whitespace is ignored; tags are case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        TouchEvent::ALL
            .iter()
            .copied()
            .find(|event| event.as_str() == tag)
            .ok_or_else(|| ParseTouchEventError(tag.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use static_assertions::assert_impl_all;

    assert_impl_all!(TouchEvent: std::fmt::Debug, Clone, Copy, PartialEq, Eq, std::hash::Hash, Send, Sync);

    #[test]
    fn on_events_are_exactly_the_on_tags() {
        let on: Vec<_> = TouchEvent::ALL.iter().filter(|e| e.is_on()).collect();
        assert_eq!(on, vec![&TouchEvent::GpgOn, &TouchEvent::U2fOn, &TouchEvent::HmacOn]);
    }

    #[test]
    fn each_source_has_one_on_and_one_off() {
        for source in [TouchSource::Gpg, TouchSource::U2f, TouchSource::Hmac] {
            let events: Vec<_> = TouchEvent::ALL.iter().filter(|e| e.source() == source).collect();
            assert_eq!(events.len(), 2);
            assert!(events[0].is_on());
            assert!(!events[1].is_on());
        }
    }

    #[test]
    fn parse_accepts_wire_tags() {
        assert_eq!("GPG_ON".parse::<TouchEvent>(), Ok(TouchEvent::GpgOn));
        assert_eq!("  HMAC_OFF\n".parse::<TouchEvent>(), Ok(TouchEvent::HmacOff));
        assert_eq!(TouchEvent::U2fOff.to_string(), "U2F_OFF");
    }

    #[test]
    fn parse_rejects_unknown_tags() {
        assert_eq!(
            "gpg_on".parse::<TouchEvent>(),
            Err(ParseTouchEventError("gpg_on".to_string()))
        );
        assert!("".parse::<TouchEvent>().is_err());
    }

    #[test]
    fn serde_uses_wire_tags() {
        let json = serde_json::to_string(&TouchEvent::U2fOn).unwrap();
        assert_eq!(json, "\"U2F_ON\"");
        let event: TouchEvent = serde_json::from_str("\"HMAC_ON\"").unwrap();
        assert_eq!(event, TouchEvent::HmacOn);
    }
}
