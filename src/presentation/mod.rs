//! Presentation adapters.
//!
//! Each animation variant turns `(entries, winner_index)` into an
//! `AnimationPlan` the browser renders. A plan never picks its own winner;
//! randomness here is cosmetic only (extra wheel turns, which card slot
//! gets flipped).

mod cage;
mod cards;
mod capsule;
mod chest;
mod roulette;
mod slots;
mod stick;
mod wheel;

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::types::{AnimationType, DrawSettings, Entry};

pub use cage::BingoCage;
pub use cards::CardFlip;
pub use capsule::GachaCapsule;
pub use chest::TreasureChest;
pub use roulette::NameRoulette;
pub use slots::SlotMachine;
pub use stick::OmikujiStick;
pub use wheel::RouletteWheel;

/// One browser animation frame at 60 fps
pub(crate) const FRAME_MS: f64 = 1000.0 / 60.0;

/// Hold on the revealed winner before signalling completion
pub(crate) const REVEAL_HOLD_MS: u64 = 500;

/// Shared palette for wheel segments, capsules and bingo balls
pub(crate) const PALETTE: [&str; 12] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEAA7", "#DDA0DD", "#F8B500", "#00CED1",
    "#E74C3C", "#3498DB", "#2ECC71", "#9B59B6",
];

/// Rendering instructions for one draw
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnimationPlan {
    pub animation_type: AnimationType,
    pub accent_color: String,
    /// Time from start until the reveal is fully shown and completion is due
    pub duration_ms: u64,
    pub detail: PlanDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlanDetail {
    NameRoulette {
        /// Delay after each displayed name; the name shown after the last
        /// delay is the winner
        tick_delays_ms: Vec<u64>,
        start_index: usize,
    },
    Wheel {
        /// Radians per segment
        segment_angle: f64,
        /// Final rotation in radians (negative, clockwise)
        target_rotation: f64,
        spin_ms: u64,
        segment_colors: Vec<String>,
    },
    SlotMachine {
        item_height_px: u32,
        /// How many times the entry list is repeated on each reel strip
        strip_repeat: u32,
        reels: Vec<ReelPlan>,
        settle_ms: u64,
    },
    CardFlip {
        card_count: usize,
        /// Which face-down card turns out to be the winner
        winner_slot: usize,
        shuffle_count: u32,
        shuffle_interval_ms: u64,
        select_delay_ms: u64,
        flip_delay_ms: u64,
        hold_ms: u64,
    },
    Gacha {
        capsule_color: String,
        spin_ms: u64,
        drop_ms: u64,
        open_ms: u64,
        hold_ms: u64,
    },
    Bingo {
        ball_color: String,
        visible_balls: usize,
        churn_ms: u64,
        eject_delay_ms: u64,
        eject_ms: u64,
        hold_ms: u64,
    },
    TreasureChest {
        shuffle_interval_ms: u64,
        shake_ms: u64,
        open_ms: u64,
        hold_ms: u64,
    },
    Omikuji {
        shake_ms: u64,
        draw_ms: u64,
        hold_ms: u64,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReelPlan {
    /// Pixels per frame while spinning freely
    pub speed_px: f64,
    pub stop_delay_ms: u64,
    pub decelerate_ms: u64,
    /// Strip offset that centers the winner in the window
    pub target_offset_px: u32,
}

/// Detail plus total running time, as produced by one adapter
#[derive(Debug, Clone, PartialEq)]
pub struct Choreography {
    pub detail: PlanDetail,
    pub duration_ms: u64,
}

/// The capability every animation variant provides.
///
/// `entries` is the pool used for the draw and `winner_index` indexes into
/// it. Implementations must not reorder or reinterpret either.
pub trait Presentation: Send + Sync {
    fn kind(&self) -> AnimationType;

    fn choreograph(
        &self,
        entries: &[Entry],
        winner_index: usize,
        settings: &DrawSettings,
        rng: &mut dyn RngCore,
    ) -> Choreography;
}

impl AnimationType {
    pub fn presentation(&self) -> &'static dyn Presentation {
        match self {
            AnimationType::NameRoulette => &NameRoulette,
            AnimationType::Wheel => &RouletteWheel,
            AnimationType::CardFlip => &CardFlip,
            AnimationType::SlotMachine => &SlotMachine,
            AnimationType::Gacha => &GachaCapsule,
            AnimationType::Bingo => &BingoCage,
            AnimationType::TreasureChest => &TreasureChest,
            AnimationType::Omikuji => &OmikujiStick,
        }
    }
}

/// Build the plan for one draw with the given animation type
pub fn plan_draw(
    animation_type: AnimationType,
    entries: &[Entry],
    winner_index: usize,
    settings: &DrawSettings,
    accent_color: &str,
    rng: &mut dyn RngCore,
) -> AnimationPlan {
    debug_assert!(winner_index < entries.len());
    let settings = settings.clamped();
    let Choreography {
        detail,
        duration_ms,
    } = animation_type
        .presentation()
        .choreograph(entries, winner_index, &settings, rng);

    AnimationPlan {
        animation_type,
        accent_color: accent_color.to_string(),
        duration_ms,
        detail,
    }
}

pub(crate) fn palette_color(index: usize, palette_len: usize) -> String {
    PALETTE[index % palette_len.min(PALETTE.len())].to_string()
}

pub(crate) fn secs_scaled(settings: &DrawSettings, ms_per_sec: u64) -> u64 {
    settings.spin_duration_secs as u64 * ms_per_sec
}
