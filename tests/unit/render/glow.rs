use super::*;

#[test]
fn zero_radius_is_identity() {
    let src = vec![1u8, 2, 3, 4, 5, 6, 7, 8];
    assert_eq!(blur_premul(&src, 1, 2, 0, 1.0).unwrap(), src);
}

#[test]
fn flat_layer_is_unchanged() {
    let (w, h) = (6u32, 4u32);
    let src = [12u8, 24, 36, 48].repeat((w * h) as usize);
    assert_eq!(blur_premul(&src, w, h, 3, 2.0).unwrap(), src);
}

#[test]
fn single_pixel_spreads_and_keeps_energy() {
    let (w, h) = (7u32, 7u32);
    let mut src = vec![0u8; (w * h * 4) as usize];
    let c = ((3 * w + 3) * 4) as usize;
    src[c..c + 4].copy_from_slice(&[255, 255, 255, 255]);

    let out = blur_premul(&src, w, h, 2, 1.2).unwrap();
    assert!(out.chunks_exact(4).filter(|px| px[3] != 0).count() > 1);
    let total: i32 = out.chunks_exact(4).map(|px| i32::from(px[3])).sum();
    assert!((total - 255).abs() <= 6);
}

#[test]
fn mismatched_length_is_an_error() {
    assert!(blur_premul(&[0u8; 7], 1, 2, 1, 1.0).is_err());
    assert!(blur_premul(&[0u8; 8], 1, 2, 1, 0.0).is_err());
}

#[test]
fn over_respects_alpha() {
    let mut dst = vec![0u8, 0, 255, 255];
    over_in_place(&mut dst, &[128, 0, 0, 128]).unwrap();
    assert_eq!(dst, vec![128, 0, 127, 255]);

    let mut dst = vec![9u8, 9, 9, 9];
    over_in_place(&mut dst, &[0, 0, 0, 0]).unwrap();
    assert_eq!(dst, vec![9, 9, 9, 9]);

    let mut dst = vec![9u8, 9, 9, 9];
    over_in_place(&mut dst, &[1, 2, 3, 255]).unwrap();
    assert_eq!(dst, vec![1, 2, 3, 255]);

    assert!(over_in_place(&mut [0u8; 4], &[0u8; 8]).is_err());
}
