use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Display colour for a phase bar, serialized as `"#RRGGBB"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PhaseColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl PhaseColor {
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Neutral grey used when a phase has no colour of its own.
    pub const FALLBACK: PhaseColor = PhaseColor::from_rgb(0x6B, 0x72, 0x80);

    /// Colour for a well-known phase key, falling back to grey.
    pub fn for_key(key: &str) -> Self {
        PHASE_PALETTE
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, c)| *c)
            .unwrap_or(Self::FALLBACK)
    }
}

impl fmt::Display for PhaseColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for PhaseColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(format!("invalid colour '{}', expected #RRGGBB", s));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| format!("invalid colour '{}', expected #RRGGBB", s))
        };
        Ok(Self::from_rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl Serialize for PhaseColor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for PhaseColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ── Phase palette ────────────────────────────────────────────────────────────

const BLUE: PhaseColor = PhaseColor::from_rgb(0x3B, 0x82, 0xF6);
const GREEN: PhaseColor = PhaseColor::from_rgb(0x10, 0xB9, 0x81);
const AMBER: PhaseColor = PhaseColor::from_rgb(0xF5, 0x9E, 0x0B);
const VIOLET: PhaseColor = PhaseColor::from_rgb(0x8B, 0x5C, 0xF6);
const PINK: PhaseColor = PhaseColor::from_rgb(0xEC, 0x48, 0x99);
const ORANGE: PhaseColor = PhaseColor::from_rgb(0xF9, 0x73, 0x16);
const RED: PhaseColor = PhaseColor::from_rgb(0xEF, 0x44, 0x44);

const PHASE_PALETTE: &[(&str, PhaseColor)] = &[
    ("planning", BLUE),
    ("acquisition", GREEN),
    ("warmup", AMBER),
    ("event", VIOLET),
    ("open_cart", PINK),
    ("recovery", ORANGE),
    ("downsell", RED),
    ("debriefing", PhaseColor::FALLBACK),
    ("pre_launch", GREEN),
    ("launch", VIOLET),
    ("post_launch", PINK),
    ("promotion", GREEN),
    ("follow_up", PINK),
    ("research", BLUE),
    ("creation", GREEN),
    ("testing", AMBER),
    ("optimization", PINK),
];
