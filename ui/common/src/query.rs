use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

pub const DEFAULT_ADDRESS: &str = "Toronto, Canada";

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid walk time `{0}`, expected 5, 10 or 15 minutes")]
pub struct InvalidWalkTime(pub String);

/// Walk-time budget offered by the form. Only these three values exist.
#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(try_from = "u8", into = "u8")]
pub enum WalkTime {
    Five,
    #[default]
    Ten,
    Fifteen,
}

impl WalkTime {
    pub const ALL: [WalkTime; 3] = [WalkTime::Five, WalkTime::Ten, WalkTime::Fifteen];

    pub fn minutes(self) -> u8 {
        match self {
            WalkTime::Five => 5,
            WalkTime::Ten => 10,
            WalkTime::Fifteen => 15,
        }
    }

    pub fn label(self) -> String {
        format!("{} Minutes", self.minutes())
    }

    pub fn from_minutes(minutes: u8) -> Result<Self, InvalidWalkTime> {
        match minutes {
            5 => Ok(WalkTime::Five),
            10 => Ok(WalkTime::Ten),
            15 => Ok(WalkTime::Fifteen),
            other => Err(InvalidWalkTime(other.to_string())),
        }
    }
}

impl fmt::Display for WalkTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.minutes())
    }
}

impl FromStr for WalkTime {
    type Err = InvalidWalkTime;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let minutes = s
            .trim()
            .parse::<u8>()
            .map_err(|_| InvalidWalkTime(s.to_string()))?;
        Self::from_minutes(minutes)
    }
}

impl TryFrom<u8> for WalkTime {
    type Error = InvalidWalkTime;

    fn try_from(minutes: u8) -> Result<Self, Self::Error> {
        Self::from_minutes(minutes)
    }
}

impl From<WalkTime> for u8 {
    fn from(walk_time: WalkTime) -> u8 {
        walk_time.minutes()
    }
}

/// The (address, walk time) pair the form hands to the map.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AddressQuery {
    pub address: String,
    pub walk_time: WalkTime,
}

impl Default for AddressQuery {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            walk_time: WalkTime::default(),
        }
    }
}

impl AddressQuery {
    pub fn new(address: impl Into<String>, walk_time: WalkTime) -> Self {
        Self {
            address: address.into(),
            walk_time,
        }
    }

    /// Query parameters in the order the backend expects them.
    /// Values are raw; encoding happens when they are put on a URL.
    pub fn query_pairs(&self) -> [(&'static str, String); 2] {
        [
            ("address", self.address.clone()),
            ("walk_time", self.walk_time.to_string()),
        ]
    }
}

#[test]
fn test_walk_time_only_three_values() {
    let minutes: Vec<u8> = WalkTime::ALL.iter().map(|w| w.minutes()).collect();
    assert_eq!(minutes, vec![5, 10, 15]);

    for m in 0..=u8::MAX {
        let parsed = WalkTime::from_minutes(m);
        assert_eq!(parsed.is_ok(), [5, 10, 15].contains(&m), "minutes {m}");
    }
}

#[test]
fn test_walk_time_parse() {
    assert_eq!("5".parse::<WalkTime>(), Ok(WalkTime::Five));
    assert_eq!(" 15 ".parse::<WalkTime>(), Ok(WalkTime::Fifteen));
    assert_eq!(
        "20".parse::<WalkTime>(),
        Err(InvalidWalkTime("20".to_string()))
    );
    assert!("ten".parse::<WalkTime>().is_err());
    assert_eq!(WalkTime::Ten.label(), "10 Minutes");
}

#[test]
fn test_walk_time_serde() {
    assert_eq!(serde_json::to_string(&WalkTime::Fifteen).unwrap(), "15");
    assert_eq!(serde_json::from_str::<WalkTime>("5").unwrap(), WalkTime::Five);
    assert!(serde_json::from_str::<WalkTime>("7").is_err());
}

#[test]
fn test_address_query_defaults() {
    let query = AddressQuery::default();
    assert_eq!(query.address, "Toronto, Canada");
    assert_eq!(query.walk_time, WalkTime::Ten);

    let empty = AddressQuery::new("", WalkTime::Five);
    assert_eq!(
        empty.query_pairs(),
        [("address", String::new()), ("walk_time", "5".to_string())]
    );
}
