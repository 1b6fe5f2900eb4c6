//! HUD text
//!
//! The display collaborator only reads [`HudSnapshot`]s; these helpers give
//! every front end the same wording.

use crate::sim::HudSnapshot;

const HEART: char = '\u{2665}';

/// Whole seconds survived, e.g. `Time: 12s`
pub fn format_time(elapsed_secs: f32) -> String {
    format!("Time: {}s", elapsed_secs.max(0.0).round() as u64)
}

/// One heart per remaining life
pub fn format_lives(lives: u8) -> String {
    std::iter::repeat_n(HEART, lives as usize).collect()
}

/// Single-line HUD
pub fn hud_line(hud: &HudSnapshot) -> String {
    format!("{}  {}", format_lives(hud.lives), format_time(hud.elapsed_secs))
}
