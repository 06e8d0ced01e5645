// SPDX-License-Identifier: PMPL-1.0-or-later
//! a11ylint - static WCAG checks over raw markup text
//!
//! Part of the gitbot-fleet ecosystem. a11ylint reads HTML and JSX source
//! as text and answers pass/fail questions about it with regular
//! expressions; no document tree is ever built.
//!
//! ## Rules
//!
//! - **Alt Text** (1.1.1): image-like elements carry `alt=`
//! - **ARIA** (4.1.2 and related): eleven sub-checks plus an aggregate
//! - **Keyboard** (2.1.1): interactive elements are focusable or handled
//!
//! ## Color
//!
//! [`check_contrast_ratio`] compares two color literals (hex, rgb, hsl)
//! against the 4.5:1 AA threshold for normal text (1.4.3).

pub mod color;
pub mod config;
pub mod error;
pub mod fleet;
pub mod report;
pub mod rules;
pub mod sanitize;
pub mod scanner;

pub use color::{
    check_contrast_ratio, contrast_ratio, convert_to_rgb, detect_color_mode, hex_to_rgb,
    hsl_to_rgb, relative_luminance, ColorError, ColorMode,
};
pub use rules::alt_text::check_alt;
pub use rules::aria::{
    check_aria, check_aria_errors, check_aria_focus_mgmt, check_aria_keyboard_navigation,
    check_aria_labels, check_aria_landmarks, check_aria_live_regions, check_aria_properties,
    check_aria_relationships, check_aria_required, check_aria_role_duplications,
    check_aria_roles,
};
pub use rules::keyboard::check_keyboard_access;
pub use sanitize::{normalize_whitespace, remove_comments};
