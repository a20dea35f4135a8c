use super::*;

const VGA: Canvas = Canvas {
    width: 640,
    height: 480,
};

fn scaled(factor: f64) -> SizePolicy {
    SizePolicy::Scaled { factor }
}

#[test]
fn growing_bubble_at_top_left_corner_floors_origin() {
    let factor = 1.0 + 2.0 * 0.2;
    let p = resolve_placement(AnchorRect::new(0, 0, 100, 100), VGA, scaled(factor))
        .unwrap()
        .unwrap();
    assert_eq!(p.target, (140, 140));
    assert_eq!(p.region, AnchorRect::new(0, 0, 140, 140));
    assert!(!p.was_clipped());
}

#[test]
fn right_edge_clamps_width_to_remaining_columns() {
    let p = resolve_placement(AnchorRect::new(620, 0, 30, 30), VGA, scaled(1.0))
        .unwrap()
        .unwrap();
    assert_eq!(p.target, (20, 30));
    assert_eq!(p.region, AnchorRect::new(620, 0, 20, 30));
}

#[test]
fn centered_growth_shifts_origin_by_half_the_growth() {
    let p = resolve_placement(AnchorRect::new(200, 150, 100, 80), VGA, scaled(1.5))
        .unwrap()
        .unwrap();
    assert_eq!(p.region, AnchorRect::new(175, 130, 150, 120));
}

#[test]
fn shrinking_factor_centers_inside_anchor() {
    let p = resolve_placement(AnchorRect::new(100, 100, 50, 50), VGA, scaled(0.5))
        .unwrap()
        .unwrap();
    // offset = (25 - 50) / 2 = -12 (truncating)
    assert_eq!(p.region, AnchorRect::new(112, 112, 25, 25));
}

#[test]
fn bottom_right_growth_stays_on_face_when_fully_clamped() {
    let p = resolve_placement(AnchorRect::new(560, 400, 80, 80), VGA, scaled(1.5))
        .unwrap()
        .unwrap();
    // raw 120 -> clamp to 80 = anchor size, so no centering shift.
    assert_eq!(p.target, (80, 80));
    assert_eq!(p.region, AnchorRect::new(560, 400, 80, 80));
}

#[test]
fn partially_clamped_growth_centers_on_clamped_size() {
    let p = resolve_placement(AnchorRect::new(600, 0, 30, 30), VGA, scaled(2.0))
        .unwrap()
        .unwrap();
    // x: 60 -> 40, offset (40 - 30) / 2 = 5. y: 60 unclamped, offset 15, floored at 0.
    assert_eq!(p.target, (40, 60));
    assert_eq!(p.region, AnchorRect::new(595, 0, 40, 60));
    assert_eq!(p.region.right(), 635);
}

#[test]
fn zero_sized_and_off_frame_anchors_collapse() {
    assert!(
        resolve_placement(AnchorRect::new(10, 10, 0, 40), VGA, scaled(1.0))
            .unwrap()
            .is_none()
    );
    assert!(
        resolve_placement(AnchorRect::new(700, 10, 40, 40), VGA, scaled(1.0))
            .unwrap()
            .is_none()
    );
    assert!(
        resolve_placement(AnchorRect::new(10, 480, 40, 40), VGA, scaled(1.0))
            .unwrap()
            .is_none()
    );
}

#[test]
fn invalid_factor_is_rejected() {
    let a = AnchorRect::new(0, 0, 10, 10);
    assert!(resolve_placement(a, VGA, scaled(f64::NAN)).is_err());
    assert!(resolve_placement(a, VGA, scaled(-1.0)).is_err());
}

#[test]
fn above_policy_sits_on_top_of_anchor() {
    let p = resolve_placement(AnchorRect::new(100, 200, 80, 90), VGA, SizePolicy::Above)
        .unwrap()
        .unwrap();
    assert_eq!(p.region, AnchorRect::new(100, 155, 80, 45));
}

#[test]
fn above_policy_floors_at_top_of_frame() {
    let p = resolve_placement(AnchorRect::new(100, 10, 80, 90), VGA, SizePolicy::Above)
        .unwrap()
        .unwrap();
    assert_eq!(p.region, AnchorRect::new(100, 0, 80, 45));
}

#[test]
fn above_policy_clamps_width_at_right_edge() {
    let p = resolve_placement(AnchorRect::new(600, 100, 80, 60), VGA, SizePolicy::Above)
        .unwrap()
        .unwrap();
    assert_eq!(p.region, AnchorRect::new(600, 70, 40, 30));
}

#[test]
fn absolute_policy_ignores_anchor() {
    let rect = AnchorRect::new(480, 360, 160, 120);
    let p = resolve_placement(AnchorRect::new(0, 0, 1, 1), VGA, SizePolicy::At(rect))
        .unwrap()
        .unwrap();
    assert_eq!(p.region, rect);
}

#[test]
fn place_overlay_resizes_to_region() {
    let asset = PixelBuffer::filled(64, 64, &[10, 20, 30, 255]).unwrap();
    let placed = place_overlay(&asset, AnchorRect::new(620, 0, 30, 30), VGA, scaled(1.0))
        .unwrap()
        .unwrap();
    assert_eq!((placed.overlay.width(), placed.overlay.height()), (20, 30));
    assert_eq!(placed.region.width, 20);
}

#[test]
fn overlay_always_matches_region_and_stays_in_frame() {
    let asset = PixelBuffer::filled(7, 5, &[1, 2, 3, 200]).unwrap();
    let frame = Canvas::new(97, 61);
    let coords = [0u32, 1, 30, 59, 60, 61, 95, 96, 97, 200];
    let sizes = [0u32, 1, 2, 17, 60, 96, 97, 500];
    let policies = [scaled(1.0), scaled(1.6), scaled(0.3), SizePolicy::Above];

    for &x in &coords {
        for &y in &coords {
            for &w in &sizes {
                for &h in &sizes {
                    for &policy in &policies {
                        let anchor = AnchorRect::new(x, y, w, h);
                        let Some(placed) = place_overlay(&asset, anchor, frame, policy).unwrap()
                        else {
                            continue;
                        };
                        assert_eq!(placed.overlay.width(), placed.region.width, "{anchor:?}");
                        assert_eq!(placed.overlay.height(), placed.region.height, "{anchor:?}");
                        assert!(placed.region.fits_in(frame), "{anchor:?} {policy:?}");
                        assert!(!placed.region.is_empty());
                    }
                }
            }
        }
    }
}
