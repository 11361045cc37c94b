use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque ID types for type safety
pub type EntryId = u32;
pub type DrawId = u64;
pub type SessionId = String;

/// A single participant. Identity is the `id`, so two entries with the same
/// name remain distinguishable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Entry {
    pub id: EntryId,
    pub name: String,
}

/// One completed draw in the session's audit trail
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WinnerRecord {
    pub entry_id: EntryId,
    pub name: String,
    pub timestamp: DateTime<Utc>,
    /// 1-based, strictly increasing within a session
    pub round: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionPhase {
    Idle,
    Drawing,
    Revealed,
}

/// When the pool is refilled from the full roster
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RefillThreshold {
    /// Refill once every entry has won in the current cycle
    #[default]
    Empty,
    /// Refill when a single entry is left, so the last one is never a forced win
    LastOne,
}

impl RefillThreshold {
    pub fn should_refill(self, remaining: usize) -> bool {
        match self {
            RefillThreshold::Empty => remaining == 0,
            RefillThreshold::LastOne => remaining <= 1,
        }
    }
}

pub const MIN_SPIN_DURATION_SECS: u32 = 2;
pub const MAX_SPIN_DURATION_SECS: u32 = 10;
pub const MIN_SPIN_SPEED_MS: u32 = 30;
pub const MAX_SPIN_SPEED_MS: u32 = 80;

/// Advisory pacing knobs passed through to presentations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DrawSettings {
    pub spin_duration_secs: u32,
    /// Base tick interval of the name roulette; lower is faster
    pub spin_speed_ms: u32,
}

impl Default for DrawSettings {
    fn default() -> Self {
        Self {
            spin_duration_secs: 4,
            spin_speed_ms: 50,
        }
    }
}

impl DrawSettings {
    /// Clamp both knobs into their slider ranges. Speed snaps to steps of 10.
    pub fn clamped(self) -> Self {
        let speed = self
            .spin_speed_ms
            .clamp(MIN_SPIN_SPEED_MS, MAX_SPIN_SPEED_MS);
        Self {
            spin_duration_secs: self
                .spin_duration_secs
                .clamp(MIN_SPIN_DURATION_SECS, MAX_SPIN_DURATION_SECS),
            spin_speed_ms: (speed + 5) / 10 * 10,
        }
    }

    pub fn speed_label(&self) -> &'static str {
        match self.spin_speed_ms {
            30 => "fast",
            50 => "normal",
            _ => "slow",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum AnimationType {
    #[default]
    NameRoulette,
    Wheel,
    CardFlip,
    SlotMachine,
    Gacha,
    Bingo,
    TreasureChest,
    Omikuji,
}

impl AnimationType {
    pub const ALL: [AnimationType; 8] = [
        AnimationType::NameRoulette,
        AnimationType::Wheel,
        AnimationType::CardFlip,
        AnimationType::SlotMachine,
        AnimationType::Gacha,
        AnimationType::Bingo,
        AnimationType::TreasureChest,
        AnimationType::Omikuji,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            AnimationType::NameRoulette => "Name Roulette",
            AnimationType::Wheel => "Roulette Wheel",
            AnimationType::CardFlip => "Card Flip",
            AnimationType::SlotMachine => "Slot Machine",
            AnimationType::Gacha => "Gacha Capsule",
            AnimationType::Bingo => "Bingo Cage",
            AnimationType::TreasureChest => "Treasure Chest",
            AnimationType::Omikuji => "Omikuji",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AnimationType::NameRoulette => "Names flicker past until one sticks",
            AnimationType::Wheel => "TV-style spinning wheel",
            AnimationType::CardFlip => "Shuffle the cards, flip the winner",
            AnimationType::SlotMachine => "Three reels spin and stop in turn",
            AnimationType::Gacha => "A capsule drops out and pops open",
            AnimationType::Bingo => "Festival cage churns out a ball",
            AnimationType::TreasureChest => "The chest shakes, then opens",
            AnimationType::Omikuji => "Shake the box and draw a stick",
        }
    }
}

impl std::str::FromStr for AnimationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_value(serde_json::Value::String(s.to_string()))
            .map_err(|_| format!("Unknown animation type: {}", s))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum VisualTheme {
    #[default]
    Default,
    Casino,
    Festival,
    Corporate,
}

#[derive(Debug, Clone, Serialize)]
pub struct ThemeConfig {
    pub id: VisualTheme,
    pub name: &'static str,
    pub primary_color: &'static str,
    pub accent_color: &'static str,
    pub confetti_colors: [&'static str; 6],
}

impl VisualTheme {
    pub const ALL: [VisualTheme; 4] = [
        VisualTheme::Default,
        VisualTheme::Casino,
        VisualTheme::Festival,
        VisualTheme::Corporate,
    ];

    pub fn config(&self) -> ThemeConfig {
        match self {
            VisualTheme::Default => ThemeConfig {
                id: *self,
                name: "Golden",
                primary_color: "#B8860B",
                accent_color: "#FFD700",
                confetti_colors: [
                    "#FFD700", "#FFA500", "#FF6347", "#00FF00", "#00CED1", "#FF1493",
                ],
            },
            VisualTheme::Casino => ThemeConfig {
                id: *self,
                name: "Casino",
                primary_color: "#B91C1C",
                accent_color: "#FFD700",
                confetti_colors: [
                    "#DC2626", "#FFD700", "#000000", "#FFFFFF", "#B91C1C", "#FEF08A",
                ],
            },
            VisualTheme::Festival => ThemeConfig {
                id: *self,
                name: "Party",
                primary_color: "#BE185D",
                accent_color: "#7C3AED",
                confetti_colors: [
                    "#EC4899", "#8B5CF6", "#06B6D4", "#10B981", "#F59E0B", "#EF4444",
                ],
            },
            VisualTheme::Corporate => ThemeConfig {
                id: *self,
                name: "Business",
                primary_color: "#1D4ED8",
                accent_color: "#3B82F6",
                confetti_colors: [
                    "#3B82F6", "#60A5FA", "#1E40AF", "#93C5FD", "#1E3A8A", "#DBEAFE",
                ],
            },
        }
    }

    pub fn accent_color(&self) -> &'static str {
        self.config().accent_color
    }
}

impl std::str::FromStr for VisualTheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_value(serde_json::Value::String(s.to_string()))
            .map_err(|_| format!("Unknown theme: {}", s))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Host,
    Beamer,
    Audience,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refill_threshold() {
        assert!(RefillThreshold::Empty.should_refill(0));
        assert!(!RefillThreshold::Empty.should_refill(1));
        assert!(RefillThreshold::LastOne.should_refill(1));
        assert!(RefillThreshold::LastOne.should_refill(0));
        assert!(!RefillThreshold::LastOne.should_refill(2));
    }

    #[test]
    fn test_settings_clamped() {
        let s = DrawSettings {
            spin_duration_secs: 30,
            spin_speed_ms: 12,
        }
        .clamped();
        assert_eq!(s.spin_duration_secs, MAX_SPIN_DURATION_SECS);
        assert_eq!(s.spin_speed_ms, MIN_SPIN_SPEED_MS);

        let s = DrawSettings {
            spin_duration_secs: 1,
            spin_speed_ms: 64,
        }
        .clamped();
        assert_eq!(s.spin_duration_secs, MIN_SPIN_DURATION_SECS);
        assert_eq!(s.spin_speed_ms, 60);
    }

    #[test]
    fn test_animation_type_wire_names() {
        assert_eq!(
            serde_json::to_string(&AnimationType::SlotMachine).unwrap(),
            "\"slotMachine\""
        );
        assert_eq!(
            "treasureChest".parse::<AnimationType>().unwrap(),
            AnimationType::TreasureChest
        );
        assert!("confetti".parse::<AnimationType>().is_err());
    }

    #[test]
    fn test_theme_accent() {
        assert_eq!(VisualTheme::Festival.accent_color(), "#7C3AED");
        assert_eq!("casino".parse::<VisualTheme>().unwrap(), VisualTheme::Casino);
    }

    #[test]
    fn test_phase_wire_names() {
        assert_eq!(
            serde_json::to_string(&SessionPhase::Revealed).unwrap(),
            "\"REVEALED\""
        );
    }
}
