use super::*;

// =============================================================
// InteractionProfile
// =============================================================

#[test]
fn desktop_profile_pans_and_hits_badges() {
    let p = InteractionProfile::for_mode(DeviceMode::Desktop);
    assert!(p.allow_drag);
    assert!(p.allow_wheel_zoom);
    assert_eq!(p.badge_visibility, BadgeVisibility::All);
    assert_eq!(p.hit_test_mode, HitTestMode::Badge);
}

#[test]
fn mobile_profile_locks_pan_and_hits_boxes() {
    let p = InteractionProfile::for_mode(DeviceMode::Mobile);
    assert!(!p.allow_drag);
    assert!(!p.allow_wheel_zoom);
    assert_eq!(p.badge_visibility, BadgeVisibility::SelectedOnly);
    assert_eq!(p.hit_test_mode, HitTestMode::BoundingBox);
}

#[test]
fn default_profile_is_desktop() {
    assert_eq!(DeviceMode::default(), DeviceMode::Desktop);
    assert_eq!(InteractionProfile::default(), InteractionProfile::for_mode(DeviceMode::Desktop));
}

// =============================================================
// BadgeVisibility
// =============================================================

#[test]
fn all_shows_every_badge() {
    assert!(BadgeVisibility::All.shows(0, None));
    assert!(BadgeVisibility::All.shows(3, Some(1)));
}

#[test]
fn selected_only_shows_just_the_selection() {
    assert!(BadgeVisibility::SelectedOnly.shows(2, Some(2)));
    assert!(!BadgeVisibility::SelectedOnly.shows(1, Some(2)));
    assert!(!BadgeVisibility::SelectedOnly.shows(0, None));
}

// =============================================================
// Button / Cursor
// =============================================================

#[test]
fn button_from_dom_codes() {
    assert_eq!(Button::from_dom(0), Button::Primary);
    assert_eq!(Button::from_dom(1), Button::Middle);
    assert_eq!(Button::from_dom(2), Button::Secondary);
    assert_eq!(Button::from_dom(4), Button::Primary);
}

#[test]
fn cursor_css_values() {
    assert_eq!(Cursor::Default.as_css(), "default");
    assert_eq!(Cursor::Grab.as_css(), "grab");
    assert_eq!(Cursor::Grabbing.as_css(), "grabbing");
}
