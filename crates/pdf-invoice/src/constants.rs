//! Invoice page geometry
//!
//! Positions are measured from the bottom-left page corner in millimetres,
//! font sizes and line advances in points.

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4;

#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

#[inline]
pub fn pt_to_mm(pt: f32) -> f32 {
    pt / POINTS_PER_MM
}

// =============================================================================
// Page
// =============================================================================

/// A4 portrait
pub const DEFAULT_PAGE_WIDTH_MM: f32 = 210.0;
pub const DEFAULT_PAGE_HEIGHT_MM: f32 = 297.0;

pub const LEFT_MM: f32 = 25.0;
pub const DESCRIPTION_MM: f32 = 50.0;
pub const RIGHT_MM: f32 = 185.0;
pub const CENTER_MM: f32 = 105.0;
pub const SUMMARY_LABEL_MM: f32 = 135.0;
pub const SUMMARY_RULE_MM: f32 = 165.0;

// =============================================================================
// Blocks
// =============================================================================

pub const SENDER_TOP_MM: f32 = 280.0;
pub const SENDER_LINE_MM: f32 = 250.0;
pub const SENDER_LINE_RULE_END_MM: f32 = 110.0;
pub const RECIPIENT_TOP_MM: f32 = 230.0;
pub const DATE_MM: f32 = 190.0;
pub const NUMBER_MM: f32 = 180.0;
pub const LETTER_TOP_MM: f32 = 170.0;
pub const FOOTER_TOP_MM: f32 = 25.0;

/// Rows continue on a new page once the cursor drops below this
pub const BREAK_BELOW_MM: f32 = 35.0;
/// Where rows resume on a continuation page
pub const CONTINUATION_TOP_MM: f32 = 250.0;

/// Gap between a text baseline and the rule under it
pub const RULE_GAP_MM: f32 = 1.5;
/// Gap between the two rules under the total
pub const DOUBLE_RULE_GAP_MM: f32 = 1.0;

// =============================================================================
// Type
// =============================================================================

pub const BODY_FONT_SIZE: f32 = 12.0;
pub const SENDER_LINE_FONT_SIZE: f32 = 8.0;
pub const FOOTER_FONT_SIZE: f32 = 10.0;
pub const LINE_ADVANCE_PT: f32 = 12.0;
pub const RULE_WIDTH_PT: f32 = 0.5;

/// Approximate character width ratio for Helvetica
pub const HELVETICA_CHAR_WIDTH_RATIO: f32 = 0.5;
