//! Property-based invariant tests for plan editing.
//!
//! 1. N undos after N commits restore the state before them; N redos
//!    return to the final state.
//! 2. The number of undo steps never exceeds the configured limit.
//! 3. The recent-template list is capped and free of duplicates.
//! 4. Stored rotations stay normalized through any update.

use kurbo::{Point, Size};
use planscale_core::{
    FurnitureLibrary, MAX_RECENT_ITEMS, Modifiers, Plan, PlanConfig, PointerEvent,
};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

/// A horizontal or vertical drag long enough to be kept.
fn drag_strategy() -> impl Strategy<Value = (Point, Point)> {
    (0.0f64..1000.0, 0.0f64..1000.0, 5.0f64..400.0, any::<bool>()).prop_map(|(x, y, len, horizontal)| {
        let start = Point::new(x, y);
        let end = if horizontal {
            Point::new(x + len, y)
        } else {
            Point::new(x, y + len)
        };
        (start, end)
    })
}

fn drag(plan: &mut Plan, (from, to): (Point, Point)) {
    plan.handle_pointer(PointerEvent::down(from), Modifiers::NONE);
    plan.handle_pointer(PointerEvent::moved(to), Modifiers::NONE);
    plan.handle_pointer(PointerEvent::up(to), Modifiers::NONE);
}

fn calibrated(config: PlanConfig) -> Plan {
    let mut plan = Plan::with_config(config);
    plan.begin_calibration();
    drag(&mut plan, (Point::ZERO, Point::new(100.0, 0.0)));
    plan.apply_calibration(1.0, "m").unwrap();
    plan.clear_history();
    plan
}

fn template_id_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "bed-king", "sofa-2seat", "fridge", "stove", "toilet", "shower", "desk-large", "custom",
    ])
    .prop_map(str::to_string)
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Undo/redo symmetry
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn undo_redo_symmetry(drags in prop::collection::vec(drag_strategy(), 1..20)) {
        let mut plan = calibrated(PlanConfig::default());
        let initial = plan.project();

        for d in &drags {
            drag(&mut plan, *d);
        }
        let last = plan.project();
        prop_assert_eq!(plan.store().lines().len(), drags.len());

        for _ in 0..drags.len() {
            prop_assert!(plan.undo());
        }
        prop_assert_eq!(plan.project(), initial);
        prop_assert!(!plan.can_undo());

        for _ in 0..drags.len() {
            prop_assert!(plan.redo());
        }
        prop_assert_eq!(plan.project(), last);
        prop_assert!(!plan.can_redo());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. History cap
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn history_never_exceeds_limit(
        limit in 1usize..10,
        drags in prop::collection::vec(drag_strategy(), 0..25),
    ) {
        let config = PlanConfig { history_limit: limit, ..PlanConfig::default() };
        let mut plan = calibrated(config);
        for d in &drags {
            drag(&mut plan, *d);
        }

        let mut undos = 0;
        while plan.undo() {
            undos += 1;
        }
        prop_assert_eq!(undos, drags.len().min(limit));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Recent templates
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn recent_list_capped_and_unique(ids in prop::collection::vec(template_id_strategy(), 0..40)) {
        let mut library = FurnitureLibrary::new();
        for id in &ids {
            library.add_to_recent(id);
        }

        let recent = library.recent_ids();
        prop_assert!(recent.len() <= MAX_RECENT_ITEMS);
        for (i, id) in recent.iter().enumerate() {
            prop_assert!(!recent[i + 1..].contains(id), "duplicate {}", id);
        }
        if let Some(last) = ids.last() {
            prop_assert_eq!(&recent[0], last);
        }
    }

    #[test]
    fn placing_furniture_tracks_recency(ids in prop::collection::vec(template_id_strategy(), 1..15)) {
        let mut plan = calibrated(PlanConfig::default());
        let mut library = FurnitureLibrary::new();
        let image = Size::new(800.0, 600.0);

        for id in &ids {
            plan.place_furniture(id, &mut library, &image).unwrap();
        }
        prop_assert_eq!(plan.store().furniture().len(), ids.len());
        prop_assert!(library.recent_ids().len() <= MAX_RECENT_ITEMS);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Rotation stays normalized
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn furniture_rotation_normalized(turns in prop::collection::vec(-1000.0f64..1000.0, 1..10)) {
        let mut plan = calibrated(PlanConfig::default());
        let mut library = FurnitureLibrary::new();
        let id = plan
            .place_furniture("sofa-2seat", &mut library, &Size::new(400.0, 400.0))
            .unwrap();

        for turn in turns {
            plan.edit(|store| store.update_furniture(&id, |item| item.rotation += turn));
            let rotation = plan.store().furniture_item(&id).unwrap().rotation;
            prop_assert!((0.0..360.0).contains(&rotation), "rotation {}", rotation);
        }
    }
}
