use client_core::affordances::{ClassList, DRAG_CLASS};
use egui::{Color32, Stroke};
use shared::domain::{HIGH_CLASS, LOW_CLASS};

const LOW_RISK: Color32 = Color32::from_rgb(46, 160, 67);
const HIGH_RISK: Color32 = Color32::from_rgb(218, 54, 51);
const DRAG_ACTIVE: Color32 = Color32::from_rgb(56, 139, 253);

/// Badge color for the risk label's style classes.
pub fn risk_color(classes: &ClassList, fallback: Color32) -> Color32 {
    if classes.contains(HIGH_CLASS) {
        HIGH_RISK
    } else if classes.contains(LOW_CLASS) {
        LOW_RISK
    } else {
        fallback
    }
}

pub fn drop_zone_stroke(classes: &ClassList, idle: Stroke) -> Stroke {
    if classes.contains(DRAG_CLASS) {
        Stroke::new(2.0, DRAG_ACTIVE)
    } else {
        idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_classes_pick_badge_colors() {
        let fallback = Color32::GRAY;
        assert_eq!(
            risk_color(&ClassList::from_attribute("value badge high"), fallback),
            HIGH_RISK
        );
        assert_eq!(
            risk_color(&ClassList::from_attribute("value badge low"), fallback),
            LOW_RISK
        );
        assert_eq!(
            risk_color(&ClassList::from_attribute("value badge"), fallback),
            fallback
        );
    }

    #[test]
    fn drag_class_highlights_drop_zone() {
        let idle = Stroke::new(1.0, Color32::DARK_GRAY);
        assert_eq!(
            drop_zone_stroke(&ClassList::from_attribute("drop-zone drag"), idle).color,
            DRAG_ACTIVE
        );
        assert_eq!(drop_zone_stroke(&ClassList::from_attribute("drop-zone"), idle), idle);
    }
}
