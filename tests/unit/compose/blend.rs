use super::*;

fn rgba_overlay(w: u32, h: u32, px: [u8; 4]) -> PixelBuffer {
    PixelBuffer::filled(w, h, &px).unwrap()
}

#[test]
fn mask_px_full_and_empty_masks() {
    assert_eq!(mask_px(10, 200, 255), 200);
    assert_eq!(mask_px(10, 200, 0), 10);
}

#[test]
fn mask_px_partial_mask_is_bitwise_not_fractional() {
    // 0b1000_0000 mask keeps only the top bit of the foreground.
    assert_eq!(mask_px(0b0101_0101, 0b1111_0000, 0b1000_0000), 0b1101_0101);
}

#[test]
fn lerp_px_endpoints_are_exact() {
    assert_eq!(lerp_px(37, 201, 1.0), 201);
    assert_eq!(lerp_px(37, 201, 0.0), 37);
    assert_eq!(lerp_px(0, 255, 0.5), 128);
}

#[test]
fn opaque_linear_blend_reproduces_foreground() {
    let mut frame = PixelBuffer::filled(8, 6, &[9, 99, 199]).unwrap();
    let overlay = rgba_overlay(4, 3, [250, 1, 77, 255]);
    let region = AnchorRect::new(2, 1, 4, 3);
    composite_at(&mut frame, region, &overlay, BlendMode::OPAQUE).unwrap();

    let roi = frame.extract_region(2, 1, 4, 3).unwrap();
    assert_eq!(roi, overlay.to_rgb());
    assert_eq!(frame.pixel(1, 1), Some(&[9u8, 99, 199][..]));
}

#[test]
fn transparent_linear_blend_is_identity() {
    let base = PixelBuffer::filled(5, 5, &[12, 34, 56]).unwrap();
    let mut frame = base.clone();
    let overlay = rgba_overlay(5, 5, [255, 255, 255, 0]);
    composite_at(
        &mut frame,
        AnchorRect::new(0, 0, 5, 5),
        &overlay,
        BlendMode::OPAQUE,
    )
    .unwrap();
    assert_eq!(frame, base);
}

#[test]
fn mask_blend_full_mask_overwrites_and_empty_mask_keeps() {
    let mut frame = PixelBuffer::filled(4, 4, &[1, 2, 3]).unwrap();
    composite_at(
        &mut frame,
        AnchorRect::new(0, 0, 2, 4),
        &rgba_overlay(2, 4, [200, 100, 50, 255]),
        BlendMode::Mask,
    )
    .unwrap();
    composite_at(
        &mut frame,
        AnchorRect::new(2, 0, 2, 4),
        &rgba_overlay(2, 4, [200, 100, 50, 0]),
        BlendMode::Mask,
    )
    .unwrap();

    assert_eq!(frame.pixel(1, 3), Some(&[200u8, 100, 50][..]));
    assert_eq!(frame.pixel(2, 0), Some(&[1u8, 2, 3][..]));
}

#[test]
fn global_opacity_scales_alpha() {
    // Firework frame 30 of 60 over a 100-gray background with per-pixel alpha 200.
    let mut frame = PixelBuffer::filled(2, 2, &[100, 100, 100]).unwrap();
    let overlay = rgba_overlay(2, 2, [250, 0, 100, 200]);
    composite_at(
        &mut frame,
        AnchorRect::new(0, 0, 2, 2),
        &overlay,
        BlendMode::Linear { opacity: 0.5 },
    )
    .unwrap();

    let a = 0.5 * (200.0 / 255.0);
    let expect = |f: f64| (a * f + (1.0 - a) * 100.0).round().clamp(0.0, 255.0) as u8;
    assert_eq!(
        frame.pixel(1, 1),
        Some(&[expect(250.0), expect(0.0), expect(100.0)][..])
    );
    assert_eq!(frame.pixel(0, 0).unwrap()[0], 159);
}

#[test]
fn zero_opacity_leaves_frame_untouched() {
    let base = PixelBuffer::filled(3, 3, &[5, 6, 7]).unwrap();
    let mut frame = base.clone();
    composite_at(
        &mut frame,
        AnchorRect::new(0, 0, 3, 3),
        &rgba_overlay(3, 3, [255, 255, 255, 255]),
        BlendMode::Linear { opacity: 0.0 },
    )
    .unwrap();
    assert_eq!(frame, base);
}

#[test]
fn mismatched_overlay_fails_without_touching_frame() {
    let base = PixelBuffer::filled(6, 6, &[1, 1, 1]).unwrap();
    let mut frame = base.clone();
    let err = composite_at(
        &mut frame,
        AnchorRect::new(0, 0, 3, 3),
        &rgba_overlay(3, 2, [255, 0, 0, 255]),
        BlendMode::Mask,
    )
    .unwrap_err();
    assert!(matches!(err, PartycamError::DimensionMismatch(_)));
    assert_eq!(frame, base);
}

#[test]
fn region_outside_frame_is_out_of_bounds() {
    let mut frame = PixelBuffer::filled(6, 6, &[1, 1, 1]).unwrap();
    let err = composite_at(
        &mut frame,
        AnchorRect::new(4, 4, 3, 3),
        &rgba_overlay(3, 3, [255, 0, 0, 255]),
        BlendMode::OPAQUE,
    )
    .unwrap_err();
    assert!(matches!(err, PartycamError::OutOfBounds(_)));
}

#[test]
fn overlay_without_alpha_is_rejected() {
    let mut frame = PixelBuffer::filled(2, 2, &[1, 1, 1]).unwrap();
    let rgb = PixelBuffer::filled(2, 2, &[9, 9, 9]).unwrap();
    let err = composite_at(&mut frame, AnchorRect::new(0, 0, 2, 2), &rgb, BlendMode::Mask)
        .unwrap_err();
    assert!(matches!(err, PartycamError::NoAlphaChannel(_)));
}

#[test]
fn rgba_frame_keeps_its_alpha() {
    let mut frame = PixelBuffer::filled(1, 1, &[0, 0, 0, 77]).unwrap();
    composite_at(
        &mut frame,
        AnchorRect::new(0, 0, 1, 1),
        &rgba_overlay(1, 1, [255, 255, 255, 255]),
        BlendMode::OPAQUE,
    )
    .unwrap();
    assert_eq!(frame.data(), &[255, 255, 255, 77]);
}

#[test]
fn non_finite_opacity_is_rejected() {
    let mut bg = PixelBuffer::filled(1, 1, &[0, 0, 0]).unwrap();
    let fg = PixelBuffer::filled(1, 1, &[1, 1, 1]).unwrap();
    let a = PixelBuffer::filled(1, 1, &[255]).unwrap();
    assert!(linear_blend_in_place(&mut bg, &fg, &a, f32::NAN).is_err());
}

#[test]
fn crossfade_endpoints_and_midpoint() {
    let a = PixelBuffer::filled(4, 3, &[0, 100, 200]).unwrap();
    let b = PixelBuffer::filled(4, 3, &[200, 100, 0]).unwrap();

    let mut f = a.clone();
    crossfade_in_place(&mut f, &b, 0.0).unwrap();
    assert_eq!(f, a);

    let mut f = a.clone();
    crossfade_in_place(&mut f, &b, 1.0).unwrap();
    assert_eq!(f, b);

    let mut f = a.clone();
    crossfade_in_place(&mut f, &b, 0.5).unwrap();
    assert!(f.data().chunks_exact(3).all(|px| px == [100, 100, 100]));
}

#[test]
fn crossfade_rejects_size_and_channel_mismatch() {
    let mut f = PixelBuffer::filled(4, 3, &[0, 0, 0]).unwrap();
    let small = PixelBuffer::filled(3, 3, &[0, 0, 0]).unwrap();
    let rgba = PixelBuffer::filled(4, 3, &[0, 0, 0, 0]).unwrap();
    assert!(matches!(
        crossfade_in_place(&mut f, &small, 0.5),
        Err(PartycamError::DimensionMismatch(_))
    ));
    assert!(matches!(
        crossfade_in_place(&mut f, &rgba, 0.5),
        Err(PartycamError::ChannelMismatch(_))
    ));
}
