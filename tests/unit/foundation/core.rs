use super::*;

#[test]
fn anchor_edges_saturate() {
    let r = AnchorRect::new(u32::MAX - 1, 3, 10, 4);
    assert_eq!(r.right(), u32::MAX);
    assert_eq!(r.bottom(), 7);
}

#[test]
fn anchor_fits_in_boundaries() {
    let canvas = Canvas::new(640, 480);
    assert!(AnchorRect::new(0, 0, 640, 480).fits_in(canvas));
    assert!(AnchorRect::new(620, 0, 20, 30).fits_in(canvas));
    assert!(!AnchorRect::new(620, 0, 30, 30).fits_in(canvas));
    assert!(!AnchorRect::new(0, 470, 10, 11).fits_in(canvas));
}

#[test]
fn anchor_parse_accepts_spaces_and_rejects_garbage() {
    assert_eq!(
        AnchorRect::parse("10, 20,30 ,40").unwrap(),
        AnchorRect::new(10, 20, 30, 40)
    );
    assert!(AnchorRect::parse("1,2,3").is_err());
    assert!(AnchorRect::parse("1,2,3,-4").is_err());
    assert!("a,b,c,d".parse::<AnchorRect>().is_err());
}

#[test]
fn canvas_quarter_truncates() {
    assert_eq!(Canvas::new(642, 481).quarter(), Canvas::new(160, 120));
    assert!(Canvas::new(0, 10).is_empty());
}
