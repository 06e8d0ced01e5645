// SPDX-License-Identifier: PMPL-1.0-or-later
//! ARIA validator - WCAG 4.1.2 Name, Role, Value (Level A) and related criteria
//!
//! Eleven independent sub-checks over raw markup, plus [`check_aria`] which
//! ANDs six of them:
//! - labeling, required-field marking, roles, properties, error
//!   identification and landmarks are part of the aggregate
//! - focus management, live regions, keyboard navigation, relationships and
//!   role duplication are callable on their own but not aggregated
//!
//! Checks that scan elements pass vacuously when nothing matches. Error
//! identification and live regions look for a document-level marker and
//! fail when it is absent.

use crate::fleet::{ImpactAssessment, Severity, WcagLevel};
use crate::rules::Rule;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Roles accepted by [`check_aria_roles`]
pub const VALID_ROLES: &[&str] = &["button", "heading", "alert", "log", "region", "status", "img"];

/// Roles accepted by [`check_aria_landmarks`]
pub const LANDMARK_ROLES: &[&str] = &["banner", "navigation", "main", "complementary", "contentinfo", "region"];

/// Role pairs that must not appear together in one document
pub const CONFLICTING_ROLES: &[(&str, &str)] = &[("button", "link"), ("heading", "banner")];

/// Attributes that reference another element by id
pub const RELATIONSHIP_ATTRIBUTES: &[&str] = &["aria-owns", "aria-controls", "aria-activedescendant"];

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid aria regex")
}

static LABELED_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)<(button|input|select|a|img|iframe)\b([^>]*)>"));
static LABEL_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile(r#"(?i)\b(?:aria-label|aria-labelledby|aria-describedby)=["'][^"']+["']"#)
});

static REQUIRED_INPUT_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)<input\b([^>]*)required\b([^>]*)>"));
static ARIA_REQUIRED_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(r#"(?i)\baria-required=["']true["']"#));

static FOCUS_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)<(input|button|select|textarea|a|div|span)\b([^>]*)>"));
static ARIA_HIDDEN_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(r#"(?i)\baria-hidden=["']true["']"#));
static NEGATIVE_TABINDEX_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(r#"(?i)\btabindex=["']-1["']"#));

static ROLE_RE: LazyLock<Regex> = LazyLock::new(|| compile(r#"(?i)role=["']?([^"']*)["']?"#));
static QUOTED_ROLE_RE: LazyLock<Regex> = LazyLock::new(|| compile(r#"role=["']([^"']*)["']"#));

static ARIA_PROPERTY_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(r#"(?i)\b(aria-[a-z]+)=["']([^"']+)["']"#));

static ARIA_INVALID_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(r#"(?i)aria-invalid=["']?true["']?"#));
static ROLE_ALERT_RE: LazyLock<Regex> = LazyLock::new(|| compile(r#"(?i)role=["']alert["']"#));

static LIVE_REGION_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(r#"(?i)\baria-live=["'](?:polite|assertive)["']"#));

static KEYBOARD_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)<(button|a|input|select|textarea)\b([^>]*)>"));
static NUMERIC_TABINDEX_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(r#"(?i)\btabindex=["'][0-9]+["']"#));

static RELATIONSHIP_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r#"(?i)\b({})=["']([^"']+)["']"#,
        RELATIONSHIP_ATTRIBUTES.join("|")
    ))
});
static ID_RE: LazyLock<Regex> = LazyLock::new(|| compile(r#"id=["']([^"']*)["']"#));

/// Role values in document order, trimmed
fn roles(markup: &str) -> impl Iterator<Item = &str> {
    ROLE_RE
        .captures_iter(markup)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

/// Aggregate ARIA verdict: labels, required, roles, properties, errors and
/// landmarks must all pass
pub fn check_aria(markup: &str) -> bool {
    check_aria_labels(markup)
        && check_aria_required(markup)
        && check_aria_roles(markup)
        && check_aria_properties(markup)
        && check_aria_errors(markup)
        && check_aria_landmarks(markup)
}

/// Buttons, inputs, selects, links, images and iframes must carry a
/// non-empty `aria-label`, `aria-labelledby` or `aria-describedby`
pub fn check_aria_labels(markup: &str) -> bool {
    let mut valid = true;

    for caps in LABELED_TAG_RE.captures_iter(markup) {
        if !LABEL_ATTR_RE.is_match(&caps[2]) {
            tracing::debug!(element = &caps[0], "missing aria-label, aria-labelledby or aria-describedby");
            valid = false;
        }
    }

    valid
}

/// Inputs marked `required` must also carry `aria-required="true"`
pub fn check_aria_required(markup: &str) -> bool {
    let mut valid = true;

    for caps in REQUIRED_INPUT_RE.captures_iter(markup) {
        if !ARIA_REQUIRED_RE.is_match(&caps[0]) {
            tracing::debug!(element = &caps[0], "required input without aria-required");
            valid = false;
        }
    }

    valid
}

/// Focusable or structural elements must not carry `aria-hidden="true"` or
/// `tabindex="-1"`.
///
/// This flags the markers normally used to take decorative content out of
/// the tab order; the inverted polarity is kept as-is.
pub fn check_aria_focus_mgmt(markup: &str) -> bool {
    let mut valid = true;

    for caps in FOCUS_TAG_RE.captures_iter(markup) {
        let attributes = &caps[2];
        if ARIA_HIDDEN_RE.is_match(attributes) || NEGATIVE_TABINDEX_RE.is_match(attributes) {
            tracing::debug!(element = &caps[0], "element hidden from focus order");
            valid = false;
        }
    }

    valid
}

/// Every `role` value must be in [`VALID_ROLES`]
pub fn check_aria_roles(markup: &str) -> bool {
    let mut valid = true;

    for role in roles(markup) {
        if !VALID_ROLES.contains(&role) {
            tracing::debug!(role, "invalid ARIA role");
            valid = false;
        }
    }

    valid
}

/// Every `aria-*` assignment must carry a value.
///
/// The pattern only matches non-empty values, so an empty assignment is
/// never seen and this check passes for any document.
pub fn check_aria_properties(markup: &str) -> bool {
    ARIA_PROPERTY_RE
        .captures_iter(markup)
        .all(|caps| !caps[2].is_empty())
}

/// The document must identify errors with `aria-invalid="true"` or
/// `role="alert"` somewhere
pub fn check_aria_errors(markup: &str) -> bool {
    let found = ARIA_INVALID_RE.is_match(markup) || ROLE_ALERT_RE.is_match(markup);
    if !found {
        tracing::debug!("missing aria-invalid or role=alert for error identification");
    }
    found
}

/// Every `role` value must be in [`LANDMARK_ROLES`]
pub fn check_aria_landmarks(markup: &str) -> bool {
    let mut valid = true;

    for role in roles(markup) {
        if !LANDMARK_ROLES.contains(&role) {
            tracing::debug!(role, "role is not a landmark");
            valid = false;
        }
    }

    valid
}

/// The document must contain a polite or assertive live region
pub fn check_aria_live_regions(markup: &str) -> bool {
    let found = LIVE_REGION_RE.is_match(markup);
    if !found {
        tracing::debug!("missing aria-live region");
    }
    found
}

/// Buttons, links, inputs, selects and textareas must carry a non-negative
/// numeric `tabindex`
pub fn check_aria_keyboard_navigation(markup: &str) -> bool {
    let mut valid = true;

    for caps in KEYBOARD_TAG_RE.captures_iter(markup) {
        if !NUMERIC_TABINDEX_RE.is_match(&caps[2]) {
            tracing::debug!(element = &caps[0], "missing non-negative tabindex");
            valid = false;
        }
    }

    valid
}

/// `aria-owns`, `aria-controls` and `aria-activedescendant` must reference
/// an `id` present somewhere in the document
pub fn check_aria_relationships(markup: &str) -> bool {
    let ids: HashSet<&str> = ID_RE
        .captures_iter(markup)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect();

    let mut valid = true;

    for caps in RELATIONSHIP_RE.captures_iter(markup) {
        let target = &caps[2];
        if !ids.contains(target) {
            tracing::debug!(attribute = &caps[1], target, "relationship references a missing id");
            valid = false;
        }
    }

    valid
}

/// No document may contain both roles of a pair in [`CONFLICTING_ROLES`].
///
/// Role values are not tied to the element that carries them, so this is a
/// document-wide co-occurrence test.
pub fn check_aria_role_duplications(markup: &str) -> bool {
    let quoted: HashSet<&str> = QUOTED_ROLE_RE
        .captures_iter(markup)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect();

    let mut valid = true;

    for role in roles(markup) {
        for (primary, conflicting) in CONFLICTING_ROLES {
            if role == *primary && quoted.contains(conflicting) {
                tracing::debug!(role, conflicting, "conflicting roles in document");
                valid = false;
            }
        }
    }

    valid
}

/// One ARIA check, as a catalogue entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AriaCheck {
    Aggregate,
    Labels,
    Required,
    FocusManagement,
    Roles,
    Properties,
    ErrorIdentification,
    Landmarks,
    LiveRegions,
    KeyboardNavigation,
    Relationships,
    RoleDuplication,
}

impl AriaCheck {
    /// The eleven sub-checks, in reporting order
    pub const SUB_RULES: [AriaCheck; 11] = [
        AriaCheck::Labels,
        AriaCheck::Required,
        AriaCheck::FocusManagement,
        AriaCheck::Roles,
        AriaCheck::Properties,
        AriaCheck::ErrorIdentification,
        AriaCheck::Landmarks,
        AriaCheck::LiveRegions,
        AriaCheck::KeyboardNavigation,
        AriaCheck::Relationships,
        AriaCheck::RoleDuplication,
    ];

    /// The scan behind this check
    pub fn check_fn(&self) -> fn(&str) -> bool {
        match self {
            AriaCheck::Aggregate => check_aria,
            AriaCheck::Labels => check_aria_labels,
            AriaCheck::Required => check_aria_required,
            AriaCheck::FocusManagement => check_aria_focus_mgmt,
            AriaCheck::Roles => check_aria_roles,
            AriaCheck::Properties => check_aria_properties,
            AriaCheck::ErrorIdentification => check_aria_errors,
            AriaCheck::Landmarks => check_aria_landmarks,
            AriaCheck::LiveRegions => check_aria_live_regions,
            AriaCheck::KeyboardNavigation => check_aria_keyboard_navigation,
            AriaCheck::Relationships => check_aria_relationships,
            AriaCheck::RoleDuplication => check_aria_role_duplications,
        }
    }
}

/// Rule wrapper for one [`AriaCheck`]
pub struct AriaRule(pub AriaCheck);

impl Rule for AriaRule {
    fn id(&self) -> &'static str {
        match self.0 {
            AriaCheck::Aggregate => "WCAG-4.1.2-aria",
            AriaCheck::Labels => "WCAG-4.1.2-aria-labels",
            AriaCheck::Required => "WCAG-3.3.2-aria-required",
            AriaCheck::FocusManagement => "WCAG-2.4.3-aria-focus-management",
            AriaCheck::Roles => "WCAG-4.1.2-aria-roles",
            AriaCheck::Properties => "WCAG-4.1.2-aria-properties",
            AriaCheck::ErrorIdentification => "WCAG-3.3.1-aria-errors",
            AriaCheck::Landmarks => "WCAG-1.3.1-aria-landmarks",
            AriaCheck::LiveRegions => "WCAG-4.1.3-aria-live-regions",
            AriaCheck::KeyboardNavigation => "WCAG-2.1.1-aria-keyboard-navigation",
            AriaCheck::Relationships => "WCAG-1.3.1-aria-relationships",
            AriaCheck::RoleDuplication => "WCAG-4.1.2-aria-role-duplication",
        }
    }

    fn name(&self) -> &'static str {
        match self.0 {
            AriaCheck::Aggregate => "Name, Role, Value: ARIA",
            AriaCheck::Labels => "Name, Role, Value: ARIA Labels",
            AriaCheck::Required => "Labels or Instructions: ARIA Required",
            AriaCheck::FocusManagement => "Focus Order: ARIA Focus Management",
            AriaCheck::Roles => "Name, Role, Value: ARIA Roles",
            AriaCheck::Properties => "Name, Role, Value: ARIA Properties",
            AriaCheck::ErrorIdentification => "Error Identification: ARIA Errors",
            AriaCheck::Landmarks => "Info and Relationships: ARIA Landmarks",
            AriaCheck::LiveRegions => "Status Messages: ARIA Live Regions",
            AriaCheck::KeyboardNavigation => "Keyboard: ARIA Keyboard Navigation",
            AriaCheck::Relationships => "Info and Relationships: ARIA Relationships",
            AriaCheck::RoleDuplication => "Name, Role, Value: Conflicting Roles",
        }
    }

    fn description(&self) -> &'static str {
        match self.0 {
            AriaCheck::Aggregate => "Labels, required fields, roles, properties, error identification and landmarks together",
            AriaCheck::Labels => "Interactive elements carry aria-label, aria-labelledby or aria-describedby",
            AriaCheck::Required => "Required inputs carry aria-required=\"true\"",
            AriaCheck::FocusManagement => "Focusable elements are not marked aria-hidden=\"true\" or tabindex=\"-1\"",
            AriaCheck::Roles => "Role values come from the accepted role list",
            AriaCheck::Properties => "aria-* attributes carry a value",
            AriaCheck::ErrorIdentification => "The document identifies errors with aria-invalid or role=\"alert\"",
            AriaCheck::Landmarks => "Role values are landmark roles",
            AriaCheck::LiveRegions => "The document has a polite or assertive aria-live region",
            AriaCheck::KeyboardNavigation => "Focusable elements carry a non-negative numeric tabindex",
            AriaCheck::Relationships => "aria-owns, aria-controls and aria-activedescendant reference existing ids",
            AriaCheck::RoleDuplication => "The document does not mix conflicting roles such as button and link",
        }
    }

    fn wcag(&self) -> (&'static str, WcagLevel) {
        match self.0 {
            AriaCheck::Aggregate
            | AriaCheck::Labels
            | AriaCheck::Roles
            | AriaCheck::Properties
            | AriaCheck::RoleDuplication => ("4.1.2", WcagLevel::A),
            AriaCheck::Required => ("3.3.2", WcagLevel::A),
            AriaCheck::FocusManagement => ("2.4.3", WcagLevel::A),
            AriaCheck::ErrorIdentification => ("3.3.1", WcagLevel::A),
            AriaCheck::Landmarks | AriaCheck::Relationships => ("1.3.1", WcagLevel::A),
            AriaCheck::LiveRegions => ("4.1.3", WcagLevel::AA),
            AriaCheck::KeyboardNavigation => ("2.1.1", WcagLevel::A),
        }
    }

    fn severity(&self) -> Severity {
        match self.0 {
            AriaCheck::Aggregate
            | AriaCheck::Labels
            | AriaCheck::Required
            | AriaCheck::Roles
            | AriaCheck::Relationships
            | AriaCheck::RoleDuplication => Severity::Error,
            AriaCheck::FocusManagement
            | AriaCheck::Properties
            | AriaCheck::ErrorIdentification
            | AriaCheck::Landmarks
            | AriaCheck::KeyboardNavigation => Severity::Warning,
            AriaCheck::LiveRegions => Severity::Info,
        }
    }

    fn impact(&self) -> ImpactAssessment {
        match self.0 {
            AriaCheck::FocusManagement => ImpactAssessment::blind_and_motor(),
            AriaCheck::KeyboardNavigation => ImpactAssessment::motor(),
            AriaCheck::ErrorIdentification => ImpactAssessment::cognitive(),
            _ => ImpactAssessment::blind(),
        }
    }

    fn failure_message(&self) -> &'static str {
        match self.0 {
            AriaCheck::Aggregate => "ARIA usage failed one or more of the labeling, required, roles, properties, error and landmark checks.",
            AriaCheck::Labels => "Interactive element has no aria-label, aria-labelledby or aria-describedby.",
            AriaCheck::Required => "Required input is missing aria-required=\"true\".",
            AriaCheck::FocusManagement => "Focusable element is marked aria-hidden=\"true\" or tabindex=\"-1\".",
            AriaCheck::Roles => "Element uses a role outside the accepted role list.",
            AriaCheck::Properties => "ARIA attribute has no value.",
            AriaCheck::ErrorIdentification => "Document does not identify errors with aria-invalid=\"true\" or role=\"alert\".",
            AriaCheck::Landmarks => "Element uses a role that is not a landmark role.",
            AriaCheck::LiveRegions => "Document has no aria-live=\"polite\" or aria-live=\"assertive\" region.",
            AriaCheck::KeyboardNavigation => "Focusable element is missing a non-negative tabindex.",
            AriaCheck::Relationships => "ARIA relationship references an id that does not exist in the document.",
            AriaCheck::RoleDuplication => "Document mixes conflicting roles (button/link or heading/banner).",
        }
    }

    fn category(&self) -> &'static str {
        "accessibility/aria"
    }

    fn check(&self, markup: &str) -> bool {
        (self.0.check_fn())(markup)
    }
}
