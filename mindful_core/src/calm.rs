//! Grounding and paced-breathing helpers for acute stress.

/// The 5-4-3-2-1 grounding exercise, in order
pub const GROUNDING_STEPS: [&str; 5] = [
    "Name 5 things you can see",
    "Name 4 things you can touch",
    "Name 3 things you can hear",
    "Name 2 things you can smell",
    "Name 1 thing you can taste",
];

pub const CALMING_PHRASES: [&str; 5] = [
    "You are safe right now.",
    "Focus on the present moment.",
    "Try slow, steady breaths.",
    "Name what you can see around you.",
    "This will pass, one breath at a time.",
];

/// Fallback pace for a non-positive breathing rate
pub const DEFAULT_BREATHS_PER_MINUTE: i32 = 6;

pub fn grounding_step(index: usize) -> Option<&'static str> {
    GROUNDING_STEPS.get(index).copied()
}

/// Milliseconds for one full breath cycle at the given rate
pub fn millis_per_breath(breaths_per_minute: i32) -> u64 {
    let rate = if breaths_per_minute <= 0 {
        DEFAULT_BREATHS_PER_MINUTE
    } else {
        breaths_per_minute
    };
    (60_000.0 / f64::from(rate)).round() as u64
}
