//! Theme module for where-to-move
//!
//! This module provides a centralized color palette and styling constants
//! for the light "open house" look of the quiz cards.

use ratatui::style::Color;

// ============================================================================
// Background Colors
// ============================================================================

/// Page background - light gray (#f3f4f6)
pub const BG_PAGE: Color = Color::Rgb(243, 244, 246);

/// Card background - white (#ffffff)
pub const BG_CARD: Color = Color::Rgb(255, 255, 255);

/// Map placeholder background (#e5e7eb)
pub const BG_MAP_PLACEHOLDER: Color = Color::Rgb(229, 231, 235);

/// Map water tint behind the outlines (#93c5fd)
pub const BG_MAP: Color = Color::Rgb(147, 197, 253);

/// Subtle border color (#d1d5db)
pub const BORDER_SUBTLE: Color = Color::Rgb(209, 213, 219);

// ============================================================================
// Accent Colors
// ============================================================================

/// Primary brand blue (#006aff)
pub const BRAND_BLUE: Color = Color::Rgb(0, 106, 255);

/// Map outline color (#1e3a8a)
pub const MAP_OUTLINE: Color = Color::Rgb(30, 58, 138);

// ============================================================================
// Swipe Indicator Colors
// ============================================================================

/// "Yes" indicator green (#22c55e)
pub const GREEN_YES: Color = Color::Rgb(34, 197, 94);

/// "No" indicator red (#ef4444)
pub const RED_NO: Color = Color::Rgb(239, 68, 68);

// ============================================================================
// Text Colors
// ============================================================================

/// Primary text color - near black (#1f2937)
pub const TEXT_PRIMARY: Color = Color::Rgb(31, 41, 55);

/// Secondary text color (#4b5563)
pub const TEXT_SECONDARY: Color = Color::Rgb(75, 85, 99);

/// Muted text color - for labels and hints (#6b7280)
pub const TEXT_MUTED: Color = Color::Rgb(107, 114, 128);

/// Spinner frames for the loading screen
const SPINNER_FRAMES: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// Spinner glyph for an animation tick
pub fn spinner_frame(tick: u64) -> &'static str {
    SPINNER_FRAMES[(tick % SPINNER_FRAMES.len() as u64) as usize]
}

/// Blend `color` toward `background` by `opacity` (0.0 = background)
pub fn fade(color: Color, background: Color, opacity: f64) -> Color {
    match (color, background) {
        (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) => {
            let t = opacity.clamp(0.0, 1.0);
            let mix = |a: u8, b: u8| (f64::from(b) + (f64::from(a) - f64::from(b)) * t).round() as u8;
            Color::Rgb(mix(r1, r2), mix(g1, g2), mix(b1, b2))
        }
        _ => color,
    }
}
