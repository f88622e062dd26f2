//! Shared timing, class-name and palette constants.

// ── Card play ───────────────────────────────────────────────────

/// How long the played card's clone flies before it is removed.
pub const CARD_PLAY_MS: u32 = 400;

/// Classes applied to the clicked card as immediate press feedback.
pub const PRESSED_CLASSES: [&str; 2] = ["scale-95", "opacity-75"];

/// Transition used by the flying clone.
pub const FLIGHT_TRANSITION: &str = "all 0.4s cubic-bezier(0.34, 1.56, 0.64, 1)";

/// Vertical landing point of the flight as a fraction of viewport height.
pub const FLIGHT_TARGET_Y_RATIO: f64 = 0.35;

// ── Card deal ───────────────────────────────────────────────────

/// Class identifying a card on the desk.
pub const DESK_CARD_CLASS: &str = "game-card";

/// Class identifying a card in the player's hand.
pub const HAND_CARD_CLASS: &str = "hand-card";

/// Class added to the desk container on mount.
pub const DESK_CONTAINER_CLASS: &str = "desk-card";

/// Per-card entrance delay step on the desk.
pub const DESK_STAGGER_MS: u32 = 100;

/// Per-card entrance delay step in the hand.
pub const HAND_STAGGER_MS: u32 = 50;

/// Entrance keyframes name, duration and easing; the delay is appended per card.
pub const ENTRANCE_ANIMATION: &str = "cardPlace 0.4s cubic-bezier(0.34, 1.56, 0.64, 1)";

/// Attribute marking a card that already received its entrance.
pub const ANIMATED_ATTR: &str = "data-animated";

// ── Flip ────────────────────────────────────────────────────────

pub const FLIP_ATTR: &str = "data-flip";
pub const FLIP_CLASS: &str = "card-flip";
pub const FLIP_MS: u32 = 600;

// ── Round / turn ────────────────────────────────────────────────

pub const ROUND_ATTR: &str = "data-round";
pub const ROUND_INDICATOR_CLASS: &str = "round-indicator";
pub const ROUND_PULSE_CLASS: &str = "new-round";
pub const ROUND_PULSE_MS: u32 = 1500;

/// Outbound event name sent when the displayed round changes.
pub const ROUND_CHANGED_EVENT: &str = "round_changed";

pub const TURN_ATTR: &str = "data-turn";
pub const MAX_TURNS_ATTR: &str = "data-max-turns";
pub const TURN_BAR_CLASS: &str = "turn-indicator";
pub const TURN_BAR_TRANSITION_CLASSES: [&str; 2] = ["transition-all", "duration-500"];
pub const DEFAULT_TURN: u32 = 1;
pub const DEFAULT_MAX_TURNS: u32 = 3;

// ── Fallback cleanup ────────────────────────────────────────────

/// Added to an animation's duration before its fallback removal fires.
/// Web Animations start on the next frame, so the finish handler runs first.
pub const FALLBACK_SLACK_MS: u32 = 50;

// ── Celebration ─────────────────────────────────────────────────

pub const WINNER_ATTR: &str = "data-winner";
pub const WIN_CLASS: &str = "celebrate-win";
pub const PARTICLE_CLASS: &str = "confetti-particle";
pub const PARTICLE_COUNT: u32 = 20;
pub const PARTICLE_COLORS: [&str; 5] = ["#3b82f6", "#22c55e", "#eab308", "#ec4899", "#8b5cf6"];
pub const PARTICLE_SIZE_PX: u32 = 8;
pub const PARTICLE_MIN_VELOCITY: f64 = 50.0;
pub const PARTICLE_VELOCITY_SPREAD: f64 = 100.0;
pub const PARTICLE_MIN_MS: u32 = 1000;
pub const PARTICLE_DURATION_SPREAD_MS: u32 = 500;

/// Upward bias applied to every particle's first leg, in pixels.
pub const PARTICLE_LIFT_PX: f64 = 50.0;

/// Downward drift added on the second leg, in pixels.
pub const PARTICLE_FALL_PX: f64 = 100.0;

pub const PARTICLE_EASING: &str = "cubic-bezier(0, 0.5, 0.5, 1)";

// ── Flash ───────────────────────────────────────────────────────

/// Server push event consumed by the game flash binding.
pub const GAME_FLASH_EVENT: &str = "game_flash";
pub const FLASH_MS: u32 = 500;
pub const FLASH_Z_INDEX: &str = "9998";

/// Page-level round flash overlay.
pub const ROUND_FLASH_CLASSES: [&str; 5] = ["fixed", "inset-0", "bg-blue-500/10", "pointer-events-none", "z-50"];
pub const ROUND_FLASH_ANIMATION: &str = "fadeIn 0.3s ease-out reverse";
pub const ROUND_FLASH_MS: u32 = 300;

// ── Tilt ────────────────────────────────────────────────────────

/// Pixels of pointer offset per degree of tilt.
pub const TILT_DIVISOR: f64 = 10.0;
pub const TILT_PERSPECTIVE_PX: u32 = 500;
pub const TILT_SCALE: f64 = 1.05;

// ── Overlay stacking ────────────────────────────────────────────

pub const CLONE_Z_INDEX: &str = "9999";
pub const PARTICLE_Z_INDEX: &str = "100";
