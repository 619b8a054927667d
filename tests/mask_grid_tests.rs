//! Mask grid tests - bounds, density, merges and overlap

use tui_charmap::core::{ErrorKind, MaskGrid};
use tui_charmap::types::{MergeMode, Offset};

#[test]
fn test_local_bounds_ignore_offset() {
    let mut mask = MaskGrid::filled(4, 3, false);
    for offset in [Offset::ORIGIN, Offset::new(5, -2), Offset::new(-7, 9)] {
        mask.set_offset(offset);
        for y in -2..5 {
            for x in -2..6 {
                let inside = (0..4).contains(&x) && (0..3).contains(&y);
                assert_eq!(mask.is_in_bounds(x, y), inside, "local ({}, {})", x, y);
                assert_eq!(
                    mask.is_within_bounds(x + offset.x(), y + offset.y()),
                    inside,
                    "world ({}, {}) at {}",
                    x,
                    y,
                    offset
                );
            }
        }
    }
}

#[test]
fn test_world_access_subtracts_offset() {
    let mut mask = MaskGrid::filled(2, 2, false);
    mask.set_offset(Offset::new(3, 1));
    mask.set(4, 2, true).unwrap();
    assert_eq!(mask.get_local(1, 1), Ok(true));
    assert_eq!(mask.get(0, 0).unwrap_err().kind(), ErrorKind::OutOfBounds);
    assert_eq!(mask.set_local(2, 0, true).unwrap_err().kind(), ErrorKind::OutOfBounds);
}

#[test]
fn test_area_coefficient_extremes() {
    assert_eq!(MaskGrid::filled(5, 4, true).area_coefficient(), 1.0);
    assert_eq!(MaskGrid::filled(5, 4, false).area_coefficient(), 0.0);
    assert_eq!(MaskGrid::new().area_coefficient(), 0.0);
    assert_eq!(MaskGrid::with_density(4, 2, 2).area_coefficient(), 0.25);
}

#[test]
fn test_density_count_is_clamped_length() {
    let (w, h) = (4usize, 3usize);
    let area = (w * h) as i64;
    for length in -3..=area + 3 {
        let mask = MaskGrid::with_density(w, h, length);
        let expected = length.clamp(0, area) as usize;
        assert_eq!(mask.true_count(), expected, "length {}", length);

        // Row-major: the set cells are exactly the first `expected` ones.
        for idx in 0..w * h {
            let (x, y) = ((idx % w) as i32, (idx / w) as i32);
            assert_eq!(mask.get_local(x, y), Ok(idx < expected));
        }
    }
}

#[test]
fn test_or_merge_fills_and_is_idempotent() {
    let mut a = MaskGrid::filled(3, 3, false);
    let b = MaskGrid::filled(3, 3, true);
    a.merge(&b, Offset::ORIGIN, MergeMode::Or);
    assert_eq!(a.true_count(), 9);
    a.merge(&b, Offset::ORIGIN, MergeMode::Or);
    assert_eq!(a.true_count(), 9);
}

#[test]
fn test_xor_with_copy_clears() {
    let mut a = MaskGrid::from_bits(3, 2, "101101").unwrap();
    let copy = a.duplicate();
    a.merge(&copy, Offset::ORIGIN, MergeMode::Xor);
    assert_eq!(a.true_count(), 0);
    assert_eq!(copy.true_count(), 4);
}

#[test]
fn test_uncovered_cells_per_mode() {
    // Cell 0 is covered by a true cell; cell 1 is not covered.
    let other = MaskGrid::filled(1, 1, true);
    let cases = [
        (MergeMode::And, "10"),
        (MergeMode::Or, "10"),
        (MergeMode::Xor, "00"),
        (MergeMode::Nand, "01"),
        (MergeMode::Nor, "01"),
        (MergeMode::Xnor, "11"),
    ];
    for (mode, expected) in cases {
        let mut mask = MaskGrid::from_bits(2, 1, "10").unwrap();
        mask.merge(&other, Offset::ORIGIN, mode);
        assert_eq!(mask.to_bit_string(None), expected, "{}", mode.as_str());
    }
}

#[test]
fn test_merge_respects_relative_and_own_offsets() {
    let mut a = MaskGrid::filled(3, 1, false);
    a.set_offset(Offset::new(10, 0));
    let mut b = MaskGrid::filled(1, 1, true);
    b.set_offset(Offset::new(1, 0));

    // b's world cell is relative + own offset = (11, 0), a's local x = 1.
    a.merge(&b, Offset::new(10, 0), MergeMode::Or);
    assert_eq!(a.to_bit_string(None), "010");
}

#[test]
fn test_merge_bits_rejects_unknown_modes() {
    let mut a = MaskGrid::filled(1, 1, false);
    let b = MaskGrid::filled(1, 1, true);
    let err = a.merge_bits(&b, Offset::ORIGIN, 0b0101).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    a.merge_bits(&b, Offset::ORIGIN, 0b0111).unwrap();
    assert_eq!(a.get_local(0, 0), Ok(true));
}

#[test]
fn test_intersection_overlap_rect() {
    let a = MaskGrid::filled(4, 4, true);
    let mut b = MaskGrid::filled(3, 3, true);
    b.set_offset(Offset::new(2, 2));

    let overlap = MaskGrid::intersection_of(&a, &b, Offset::new(1, 0));
    assert_eq!(overlap.offset(), Offset::new(3, 2));
    assert_eq!((overlap.width(), overlap.height()), (1, 2));
    assert_eq!(overlap.true_count(), 0);

    let apart = MaskGrid::intersection_of(&a, &b, Offset::new(10, 10));
    assert_eq!(apart.area(), 0);
}

#[test]
fn test_adopt_aliases_copy_detaches() {
    let source = MaskGrid::filled(2, 2, false);
    let mut shared = MaskGrid::new();
    let mut copied = MaskGrid::new();
    shared.adopt(&source);
    copied.copy_from(&source);

    shared.set_local(0, 0, true).unwrap();
    assert_eq!(source.get_local(0, 0), Ok(true));
    assert_eq!(copied.get_local(0, 0), Ok(false));
}

#[test]
fn test_rows_and_invert() {
    let mut mask = MaskGrid::from_rows(&[vec![true, false], vec![false, false]]).unwrap();
    mask.invert();
    assert_eq!(mask.rows(), vec![vec![false, true], vec![true, true]]);
    assert_eq!(mask.to_string(), "01\n11");

    let err = MaskGrid::from_rows(&[vec![true], vec![true, true]]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}
