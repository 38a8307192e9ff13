mod common;

use approx::assert_abs_diff_eq;

use common::{document_rgba, padded};
use scrollsnap_core::color::grayscale::{to_gray, ColumnSampling};
use scrollsnap_core::error::{InputError, ScrollError};
use scrollsnap_core::frame::{validate, OwnedFrame, PixelFormat, PixelSource, PixelView};

fn input_error(err: ScrollError) -> InputError {
    match err {
        ScrollError::InvalidInput(e) => e,
        other => panic!("expected invalid input, got {other:?}"),
    }
}

#[test]
fn test_view_rejects_empty_grid() {
    let data = [0u8; 16];
    let err = PixelView::packed(&data, 0, 4, PixelFormat::Gray8).unwrap_err();
    assert_eq!(
        input_error(err),
        InputError::EmptyImage {
            width: 0,
            height: 4
        }
    );
}

#[test]
fn test_view_rejects_short_stride() {
    let data = [0u8; 64];
    let err = PixelView::new(&data, 4, 4, 12, PixelFormat::Rgba8).unwrap_err();
    assert_eq!(input_error(err), InputError::StrideTooSmall { stride: 12, min: 16 });
}

#[test]
fn test_view_rejects_short_buffer() {
    let data = [0u8; 40];
    let err = PixelView::new(&data, 2, 4, 12, PixelFormat::Rgba8).unwrap_err();
    assert_eq!(
        input_error(err),
        InputError::InsufficientData {
            expected: 44,
            actual: 40
        }
    );
}

#[test]
fn test_huge_geometry_is_rejected_without_overflow() {
    let data = [0u8; 16];
    let err = PixelView::new(&data, 4, 3, usize::MAX / 2 + 1, PixelFormat::Gray8).unwrap_err();
    assert!(matches!(
        input_error(err),
        InputError::GeometryOverflow { width: 4, height: 3, .. }
    ));

    let err = PixelView::packed(&data, usize::MAX / 2, 2, PixelFormat::Rgba8).unwrap_err();
    assert!(matches!(input_error(err), InputError::GeometryOverflow { .. }));

    let err = OwnedFrame::new(vec![0; 16], usize::MAX / 2, 1, PixelFormat::Rgb8).unwrap_err();
    assert!(err.is_invalid_input());
}

#[test]
fn test_last_row_needs_no_padding() {
    // 3 rows of 2 RGB pixels with 2 padding bytes, last row unpadded.
    let data = [0u8; 8 + 8 + 6];
    let view = PixelView::new(&data, 2, 3, 8, PixelFormat::Rgb8).unwrap();
    assert_eq!(view.row(2).len(), 6);
    assert!(validate(&view).is_ok());
}

#[test]
fn test_owned_frame_requires_packed_data() {
    let err = OwnedFrame::new(vec![0; 11], 2, 2, PixelFormat::Bgra8).unwrap_err();
    assert!(err.is_invalid_input());
}

#[test]
fn test_copy_strips_padding() {
    let frame = document_rgba(10, 7, 0, 3);
    let source = padded(&frame, 5);
    assert_eq!(source.stride(), 45);

    let copy = OwnedFrame::copy_from(&source).unwrap();
    assert_eq!(copy, frame);
    assert_eq!(copy.stride(), 40);
    assert_eq!(copy.data().len(), 280);
    assert_eq!(copy.view().row(3), frame.row(3));
}

#[test]
fn test_gray_conversion_uses_bt601_weights() {
    let rgb = [255u8, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255];
    let view = PixelView::packed(&rgb, 4, 1, PixelFormat::Rgb8).unwrap();
    let gray = to_gray(&view, &ColumnSampling::default());

    assert_eq!(gray.dim(), (1, 4));
    assert_abs_diff_eq!(gray[[0, 0]], 0.299, epsilon = 1e-5);
    assert_abs_diff_eq!(gray[[0, 1]], 0.587, epsilon = 1e-5);
    assert_abs_diff_eq!(gray[[0, 2]], 0.114, epsilon = 1e-5);
    assert_abs_diff_eq!(gray[[0, 3]], 1.0, epsilon = 1e-5);
}

#[test]
fn test_bgra_channel_order() {
    // Pure red in BGRA byte order, alpha ignored.
    let bgra = [0u8, 0, 255, 17];
    let rgba = [255u8, 0, 0, 200];
    let bgra_view = PixelView::packed(&bgra, 1, 1, PixelFormat::Bgra8).unwrap();
    let rgba_view = PixelView::packed(&rgba, 1, 1, PixelFormat::Rgba8).unwrap();

    let a = to_gray(&bgra_view, &ColumnSampling::default());
    let b = to_gray(&rgba_view, &ColumnSampling::default());
    assert_eq!(a, b);
    assert_abs_diff_eq!(a[[0, 0]], 0.299, epsilon = 1e-5);
}

#[test]
fn test_gray8_is_scaled_to_unit_range() {
    let data = [0u8, 51, 255];
    let view = PixelView::packed(&data, 3, 1, PixelFormat::Gray8).unwrap();
    let gray = to_gray(&view, &ColumnSampling::default());
    assert_eq!(gray[[0, 0]], 0.0);
    assert_abs_diff_eq!(gray[[0, 1]], 0.2, epsilon = 1e-6);
    assert_eq!(gray[[0, 2]], 1.0);
}

#[test]
fn test_column_sampling() {
    let sampling = ColumnSampling {
        step: 3,
        ignore_right: 2,
    };
    assert_eq!(sampling.columns(10), vec![0, 3, 6]);

    // Ignoring every column falls back to the full width.
    let sampling = ColumnSampling {
        step: 1,
        ignore_right: 4,
    };
    assert_eq!(sampling.columns(4), vec![0, 1, 2, 3]);

    let sampling = ColumnSampling {
        step: 0,
        ignore_right: 0,
    };
    assert_eq!(sampling.columns(3), vec![0, 1, 2]);
}

#[test]
fn test_sampled_gray_skips_padding_and_columns() {
    let frame = document_rgba(12, 5, 0, 9);
    let sampling = ColumnSampling {
        step: 2,
        ignore_right: 4,
    };
    let packed = to_gray(&frame, &sampling);
    let strided = to_gray(&padded(&frame, 7), &sampling);

    assert_eq!(packed.dim(), (5, 4));
    assert_eq!(packed, strided);
}
