use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{zone_error, PlaybookError, Result};
use crate::input::resolve_prefix;

/// Fill used for working slots whose zone is unset or unknown.
pub const UNASSIGNED_COLOR: Rgb = Rgb::new(0xD9, 0xD9, 0xD9);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(0xFF, 0xFF, 0xFF);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Accepts `#RRGGBB` or `RRGGBB`.
    pub fn from_hex(input: &str) -> Result<Self> {
        let hex = input.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(zone_error(format!("'{}' is not a #RRGGBB color", input.trim())));
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
        match (channel(0), channel(2), channel(4)) {
            (Ok(r), Ok(g), Ok(b)) => Ok(Rgb::new(r, g, b)),
            _ => Err(zone_error(format!("'{}' is not a #RRGGBB color", input.trim()))),
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    pub fn to_u32(self) -> u32 {
        (u32::from(self.r) << 16) | (u32::from(self.g) << 8) | u32::from(self.b)
    }

    pub fn luminance(self) -> f64 {
        (0.299 * f64::from(self.r) + 0.587 * f64::from(self.g) + 0.114 * f64::from(self.b)) / 255.0
    }

    /// Black or white, whichever reads on top of this fill.
    pub fn contrast_text(self) -> Rgb {
        if self.luminance() > 0.5 {
            Rgb::BLACK
        } else {
            Rgb::WHITE
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Rgb::from_hex(&raw).map_err(serde::de::Error::custom)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Zone {
    pub name: String,
    pub color: Rgb,
}

impl Zone {
    pub fn new(name: impl Into<String>, color: Rgb) -> Self {
        Self {
            name: name.into().trim().to_string(),
            color,
        }
    }
}

/// The active set of zones, unique by name, in display order.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(try_from = "Vec<Zone>", into = "Vec<Zone>")]
pub struct ZoneConfig {
    zones: Vec<Zone>,
}

impl TryFrom<Vec<Zone>> for ZoneConfig {
    type Error = PlaybookError;

    fn try_from(zones: Vec<Zone>) -> Result<Self> {
        ZoneConfig::new(zones)
    }
}

impl From<ZoneConfig> for Vec<Zone> {
    fn from(config: ZoneConfig) -> Self {
        config.zones
    }
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self::defaults()
    }
}

impl ZoneConfig {
    pub fn new(zones: Vec<Zone>) -> Result<Self> {
        let mut config = ZoneConfig { zones: Vec::with_capacity(zones.len()) };
        for zone in zones {
            config.add(zone)?;
        }
        Ok(config)
    }

    pub fn defaults() -> Self {
        let zones = [
            ("Adults", Rgb::new(0xFF, 0x00, 0x00)),
            ("Kids/Footwear", Rgb::new(0xFF, 0xD7, 0x00)),
            ("Cashiers", Rgb::new(0x00, 0xC8, 0x53)),
            ("Replenishment/Refill", Rgb::new(0x9C, 0x27, 0xB0)),
            ("Shipment", Rgb::new(0x21, 0x96, 0xF3)),
            ("Operation", Rgb::new(0xFF, 0x92, 0x2B)),
            ("Fitting Rooms", Rgb::new(0xFF, 0x7F, 0x50)),
        ];
        ZoneConfig {
            zones: zones.into_iter().map(|(name, color)| Zone::new(name, color)).collect(),
        }
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Zone> {
        self.zones.iter().find(|z| z.name == name)
    }

    /// Color for a working slot. Unset and unknown zones get [`UNASSIGNED_COLOR`].
    pub fn color_of(&self, name: Option<&str>) -> Rgb {
        name.and_then(|n| self.get(n))
            .map(|z| z.color)
            .unwrap_or(UNASSIGNED_COLOR)
    }

    /// Exact or unique case-insensitive prefix lookup, e.g. `cash` -> `Cashiers`.
    pub fn resolve_name(&self, query: &str) -> Result<&Zone> {
        let names: Vec<&str> = self.zones.iter().map(|z| z.name.as_str()).collect();
        let name = resolve_prefix(query, &names).map_err(|e| zone_error(e.to_string()))?;
        self.get(&name)
            .ok_or_else(|| zone_error(format!("Unknown zone: '{}'", query)))
    }

    pub fn add(&mut self, zone: Zone) -> Result<()> {
        if zone.name.is_empty() {
            return Err(zone_error("Zone name cannot be empty"));
        }
        if self.get(&zone.name).is_some() {
            return Err(zone_error(format!("Zone '{}' already exists", zone.name)));
        }
        self.zones.push(zone);
        Ok(())
    }

    /// Replace the zone called `name`, possibly renaming it.
    pub fn update(&mut self, name: &str, zone: Zone) -> Result<()> {
        let pos = self
            .zones
            .iter()
            .position(|z| z.name == name)
            .ok_or_else(|| zone_error(format!("Unknown zone: '{}'", name)))?;
        if zone.name.is_empty() {
            return Err(zone_error("Zone name cannot be empty"));
        }
        if zone.name != name && self.get(&zone.name).is_some() {
            return Err(zone_error(format!("Zone '{}' already exists", zone.name)));
        }
        self.zones[pos] = zone;
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> Result<Zone> {
        let pos = self
            .zones
            .iter()
            .position(|z| z.name == name)
            .ok_or_else(|| zone_error(format!("Unknown zone: '{}'", name)))?;
        Ok(self.zones.remove(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_hex() {
        let gold = Rgb::from_hex("#FFD700").unwrap();
        assert_eq!(gold, Rgb::new(0xFF, 0xD7, 0x00));
        assert_eq!(gold.to_hex(), "#FFD700");
        assert_eq!(Rgb::from_hex("00c853").unwrap().to_u32(), 0x00C853);
        assert!(Rgb::from_hex("#FFF").is_err());
        assert!(Rgb::from_hex("#GG0000").is_err());
    }

    #[test]
    fn test_contrast_text() {
        assert_eq!(Rgb::from_hex("#FFD700").unwrap().contrast_text(), Rgb::BLACK);
        assert_eq!(Rgb::from_hex("#9C27B0").unwrap().contrast_text(), Rgb::WHITE);
    }

    #[test]
    fn test_zone_names_are_unique() {
        let mut zones = ZoneConfig::defaults();
        assert_eq!(zones.len(), 7);
        assert!(zones.add(Zone::new("Adults", Rgb::BLACK)).is_err());
        assert!(zones.add(Zone::new("  ", Rgb::BLACK)).is_err());
        zones.add(Zone::new("Greeter", Rgb::WHITE)).unwrap();

        assert!(zones.update("Greeter", Zone::new("Cashiers", Rgb::WHITE)).is_err());
        zones.update("Greeter", Zone::new("Front Door", Rgb::BLACK)).unwrap();
        assert_eq!(zones.get("Front Door").unwrap().color, Rgb::BLACK);

        let removed = zones.remove("Front Door").unwrap();
        assert_eq!(removed.name, "Front Door");
        assert!(zones.remove("Front Door").is_err());

        let duplicated = vec![Zone::new("A", Rgb::BLACK), Zone::new("A", Rgb::WHITE)];
        assert!(ZoneConfig::new(duplicated).is_err());
    }

    #[test]
    fn test_resolve_name_and_color() {
        let zones = ZoneConfig::defaults();
        assert_eq!(zones.resolve_name("cash").unwrap().name, "Cashiers");
        assert_eq!(zones.resolve_name("fitting rooms").unwrap().name, "Fitting Rooms");
        assert!(zones.resolve_name("zzz").is_err());

        assert_eq!(zones.color_of(Some("Shipment")), Rgb::new(0x21, 0x96, 0xF3));
        assert_eq!(zones.color_of(Some("Nowhere")), UNASSIGNED_COLOR);
        assert_eq!(zones.color_of(None), UNASSIGNED_COLOR);
    }

    #[test]
    fn test_zone_config_serde() {
        let json = serde_json::to_string(&ZoneConfig::defaults()).unwrap();
        assert!(json.starts_with(r##"[{"name":"Adults","color":"#FF0000"}"##));
        let back: ZoneConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ZoneConfig::defaults());

        let dup = r##"[{"name":"A","color":"#000000"},{"name":"A","color":"#FFFFFF"}]"##;
        assert!(serde_json::from_str::<ZoneConfig>(dup).is_err());
    }
}
