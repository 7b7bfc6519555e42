use super::*;

fn is_keep(mask: &Frame, x: u32, y: u32) -> bool {
    mask.pixel(x, y) == Some(TRANSPARENT)
}

#[test]
fn keep_rect_shrinks_from_both_sides() {
    let r = Placement::new(0.0, 0.0, 10.0, 10.0).keep_rect(0.2);
    assert_eq!(r, Rect::new(1.0, 1.0, 9.0, 9.0));
}

#[test]
fn keep_rect_uses_scaled_size_but_unscaled_expand() {
    let r = Placement::new(4.0, 2.0, 20.0, 10.0)
        .with_scale(0.5, 2.0)
        .keep_rect(0.1);
    // expand = (2, 1); origin floor(4 + 1), floor(2 + 0.5); size round(10 - 2), round(20 - 1)
    assert_eq!(r, Rect::new(5.0, 2.0, 13.0, 21.0));
}

#[test]
fn mask_without_placements_is_all_generate() {
    let mask = build_mask(3, 2, &[], 0.1, 0.0).unwrap();
    assert!(mask.data().chunks_exact(4).all(|p| p == OPAQUE_WHITE));
}

#[test]
fn mask_clears_keep_region() {
    let mask = build_mask(10, 10, &[Placement::covering(10, 10)], 0.2, 0.0).unwrap();
    assert!(!is_keep(&mask, 0, 0));
    assert!(!is_keep(&mask, 9, 5));
    assert!(!is_keep(&mask, 5, 9));
    assert!(is_keep(&mask, 1, 1));
    assert!(is_keep(&mask, 8, 8));
    let keep = mask
        .data()
        .chunks_exact(4)
        .filter(|p| *p == TRANSPARENT)
        .count();
    assert_eq!(keep, 64);
}

#[test]
fn zero_expand_keeps_whole_image() {
    let mask = build_mask(4, 4, &[Placement::covering(4, 4)], 0.0, 0.0).unwrap();
    assert!(mask.data().chunks_exact(4).all(|p| p == TRANSPARENT));
}

#[test]
fn keep_region_is_clipped_to_canvas() {
    let p = Placement::new(-5.0, 2.0, 10.0, 100.0);
    let mask = build_mask(6, 6, &[p], 0.0, 0.0).unwrap();
    for y in 0..6 {
        for x in 0..6 {
            assert_eq!(is_keep(&mask, x, y), x < 5 && y >= 2, "({x}, {y})");
        }
    }
}

#[test]
fn full_expand_collapses_keep_region() {
    let mask = build_mask(4, 4, &[Placement::covering(4, 4)], 1.0, 0.0).unwrap();
    assert!(mask.data().chunks_exact(4).all(|p| p == OPAQUE_WHITE));
}

#[test]
fn blur_feathers_mask_edges() {
    let hard = build_mask(20, 20, &[Placement::covering(20, 20)], 0.5, 0.0).unwrap();
    let soft = build_mask(20, 20, &[Placement::covering(20, 20)], 0.5, 0.02).unwrap();
    assert_ne!(hard, soft);
    // Boundary pixel of the keep region picks up some of the surrounding white.
    let edge = soft.pixel(5, 10).unwrap();
    assert!(edge[3] > 0 && edge[3] < 255, "{edge:?}");
    // Canvas corner is far from the hole and stays fully white.
    assert_eq!(soft.pixel(0, 0), Some(OPAQUE_WHITE));
}

#[test]
fn invalid_expand_is_rejected() {
    assert!(build_mask(2, 2, &[], 1.5, 0.0).is_err());
    assert!(build_mask(2, 2, &[], f32::NAN, 0.0).is_err());
}

#[test]
fn placement_parses_from_cli_text() {
    let p: Placement = "1, 2, 30, 40".parse().unwrap();
    assert_eq!(p, Placement::new(1.0, 2.0, 30.0, 40.0));
    let p: Placement = "0,0,8,8,0.5,2".parse().unwrap();
    assert_eq!((p.scale_x, p.scale_y), (0.5, 2.0));
    assert!("1,2,3".parse::<Placement>().is_err());
    assert!("a,b,c,d".parse::<Placement>().is_err());
    assert!("0,0,-1,4".parse::<Placement>().is_err());
}
