use super::*;

fn crown() -> OverlayAsset {
    OverlayAsset::new(PixelBuffer::filled(16, 8, &[255, 215, 0, 255]).unwrap()).unwrap()
}

#[test]
fn crown_sits_above_face() {
    let c = CrownEffect::new(crown());
    let mut frame = PixelBuffer::filled(120, 120, &[10, 10, 10]).unwrap();
    let stats = c
        .crown_faces(&mut frame, &[AnchorRect::new(40, 60, 40, 40)])
        .unwrap();
    assert_eq!(stats.composited, 1);

    // Region (40, 40) 40x20.
    assert_eq!(frame.pixel(40, 40), Some(&[255u8, 215, 0][..]));
    assert_eq!(frame.pixel(79, 59), Some(&[255u8, 215, 0][..]));
    assert_eq!(frame.pixel(40, 60), Some(&[10u8, 10, 10][..]));
    assert_eq!(frame.pixel(40, 39), Some(&[10u8, 10, 10][..]));
}

#[test]
fn crown_near_top_is_pushed_down_to_row_zero() {
    let c = CrownEffect::new(crown());
    let mut frame = PixelBuffer::filled(50, 50, &[0, 0, 0]).unwrap();
    let ctx = FrameContext {
        anchors: &[AnchorRect::new(5, 4, 20, 20)],
        ..FrameContext::default()
    };
    c.apply(&mut frame, &ctx).unwrap();
    assert_eq!(frame.pixel(5, 0), Some(&[255u8, 215, 0][..]));
    assert_eq!(frame.pixel(5, 9), Some(&[255u8, 215, 0][..]));
    assert_eq!(frame.pixel(5, 10), Some(&[0u8, 0, 0][..]));
}

#[test]
fn semi_transparent_crown_blends_linearly() {
    let asset =
        OverlayAsset::new(PixelBuffer::filled(4, 2, &[200, 200, 200, 51]).unwrap()).unwrap();
    let c = CrownEffect::new(asset);
    let mut frame = PixelBuffer::filled(10, 10, &[100, 100, 100]).unwrap();
    c.crown_faces(&mut frame, &[AnchorRect::new(0, 4, 4, 4)])
        .unwrap();
    // a = 0.2 -> 0.2*200 + 0.8*100 = 120
    assert_eq!(frame.pixel(0, 2), Some(&[120u8, 120, 120][..]));
}
