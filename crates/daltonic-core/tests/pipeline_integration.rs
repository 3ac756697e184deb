//! End-to-end properties of the correction pipeline, driven through the
//! public API only.

use daltonic_core::color::ColorSpaceTransform;
use daltonic_core::{
    ChannelOrder, CorrectionConfig, CorrectionMode, DaltonError, DaltonizationEngine,
    DeficiencyType, Frame, FrameCorrectionPipeline, Region, RegionSelectionPolicy,
};

/// Deterministic pseudo-random frame (xorshift), so failures are reproducible.
fn noise_frame(width: u32, height: u32, seed: u32) -> Frame {
    let mut state = seed.max(1);
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        (state & 0xff) as u8
    };
    let pixels = (0..width * height).map(|_| [next(), next(), next()]).collect();
    Frame::new(width, height, pixels, ChannelOrder::Rgb).expect("valid frame")
}

fn assert_close3(actual: [u8; 3], expected: [u8; 3], tol: i16) {
    for i in 0..3 {
        let diff = (actual[i] as i16 - expected[i] as i16).abs();
        assert!(
            diff <= tol,
            "channel {} mismatch: got {}, expected {}, diff {} > {}",
            i,
            actual[i],
            expected[i],
            diff,
            tol
        );
    }
}

#[test]
fn lms_round_trip_stays_within_one_step() {
    let engine = DaltonizationEngine::new();
    assert_eq!(engine.transform(), &ColorSpaceTransform::new());
    let cst = engine.transform();
    let frame = noise_frame(32, 32, 7);
    let back = cst.to_rgb(&cst.to_lms(&frame), frame.channel_order);
    assert_eq!((back.width, back.height), (frame.width, frame.height));
    for (a, b) in back.pixels.iter().zip(&frame.pixels) {
        assert_close3(*a, *b, 1);
    }
}

#[test]
fn off_mode_is_exact_identity() {
    let engine = DaltonizationEngine::new();
    let frame = noise_frame(16, 9, 42);
    assert_eq!(engine.correct(&frame, DeficiencyType::None).unwrap(), frame);
}

#[test]
fn correction_is_deterministic_and_size_preserving() {
    let engine = DaltonizationEngine::new();
    let frame = noise_frame(20, 10, 3);
    for &ty in DeficiencyType::deficient() {
        let a = engine.correct(&frame, ty).unwrap();
        let b = engine.correct(&frame, ty).unwrap();
        assert_eq!(a.to_raw(), b.to_raw());
        assert_eq!((a.width, a.height, a.channel_order), (20, 10, ChannelOrder::Rgb));
        assert_eq!(a.pixels.len(), frame.pixels.len());
    }
}

#[test]
fn saturated_colors_stay_in_range() {
    // u8 output is bounded by construction; this exercises the clamp path with
    // the most out-of-gamut inputs and checks nothing wraps around.
    let engine = DaltonizationEngine::new();
    let frame = Frame::new(
        6,
        1,
        vec![
            [255, 0, 0],
            [0, 255, 0],
            [0, 0, 255],
            [255, 255, 0],
            [0, 255, 255],
            [255, 0, 255],
        ],
        ChannelOrder::Rgb,
    )
    .unwrap();
    let out = engine.correct(&frame, DeficiencyType::Protanopia).unwrap();
    // Pure red: blue channel saturates instead of wrapping.
    assert_eq!(out.pixels[0], [228, 0, 255]);
    // Pure green: blue goes negative in LMS→RGB and clamps to zero.
    assert_eq!(out.pixels[1][2], 0);
}

#[test]
fn deuteranopia_changes_green_pixel_red_and_blue() {
    let frame = Frame::new(2, 1, vec![[255, 0, 0], [0, 255, 0]], ChannelOrder::Rgb).unwrap();

    let mut off = FrameCorrectionPipeline::default();
    let unmodified = off.process_frame(frame.clone(), 0, None).unwrap().frame;
    assert_eq!(unmodified, frame);

    let mut on = FrameCorrectionPipeline::default();
    on.modes_mut().set(CorrectionMode::Deuteranopia);
    let corrected = on.process_frame(frame, 0, None).unwrap().frame;

    let green_off = unmodified.pixel(1, 0);
    let green_on = corrected.pixel(1, 0);
    assert_ne!(green_on[0], green_off[0], "red channel of the green pixel");
    assert_ne!(green_on[2], green_off[2], "blue channel of the green pixel");
}

#[test]
fn off_protanopia_off_sequence_is_byte_identical() {
    let frame = noise_frame(8, 8, 99);
    let mut pipeline = FrameCorrectionPipeline::default();

    let first = pipeline.process_frame(frame.clone(), 0, None).unwrap();
    pipeline.modes_mut().set_by_name("protanopia").unwrap();
    let middle = pipeline.process_frame(frame.clone(), 1, None).unwrap();
    pipeline.modes_mut().set_by_name("off").unwrap();
    let last = pipeline.process_frame(frame.clone(), 2, None).unwrap();

    assert_eq!(first.frame.to_raw(), last.frame.to_raw());
    assert_eq!(first.frame, frame);
    assert_ne!(middle.frame, frame);
}

#[test]
fn invalid_mode_name_is_non_fatal() {
    let mut pipeline = FrameCorrectionPipeline::default();
    pipeline.modes_mut().set(CorrectionMode::Tritanopia);
    let err = pipeline.modes_mut().set_by_name("grayscale").unwrap_err();
    assert!(matches!(err, DaltonError::InvalidMode(_)));
    assert_eq!(pipeline.modes().active(), CorrectionMode::Tritanopia);
}

#[test]
fn cadence_windows_return_identical_regions() {
    let n = 4;
    let mut policy = RegionSelectionPolicy::new(n).unwrap();
    let mut previous: Option<Vec<Region>> = None;
    for frame_index in 0..(n * 5) {
        let shift = frame_index as i32;
        let raw = vec![Region::new(shift, 0, shift + 5, 5)];
        let selected = policy.select_regions(frame_index, &raw, 64, 64).to_vec();
        if frame_index % n == 0 {
            assert_eq!(selected, raw);
            assert_eq!(policy.cache().frame_index(), Some(frame_index));
        } else {
            assert_eq!(Some(&selected), previous.as_ref());
        }
        previous = Some(selected);
    }
}

#[test]
fn selected_regions_are_always_in_bounds() {
    let (width, height) = (50u32, 40u32);
    let raw: Vec<Region> = (-3..6)
        .flat_map(|i| {
            (-3..6).map(move |j| Region::new(i * 12, j * 10, i * 12 + 25, j * 10 + 22))
        })
        .collect();
    let mut policy = RegionSelectionPolicy::new(1).unwrap();
    let selected = policy.select_regions(0, &raw, width, height);
    assert!(!selected.is_empty());
    for r in selected {
        assert!(0 <= r.x1 && r.x1 < r.x2 && r.x2 <= width as i32, "{r:?}");
        assert!(0 <= r.y1 && r.y1 < r.y2 && r.y2 <= height as i32, "{r:?}");
    }
    // Boxes that start past the right or bottom edge never survive.
    assert!(selected.iter().all(|r| r.x1 < width as i32 && r.y1 < height as i32));
    assert!(selected.len() < raw.len());
}

#[test]
fn region_correction_leaves_outside_pixels_alone() {
    let frame = noise_frame(12, 8, 5);
    let mut pipeline = FrameCorrectionPipeline::default();
    pipeline.modes_mut().set(CorrectionMode::Deuteranopia);

    let detections = [
        Region::new(2, 1, 6, 5).with_detection(9, "traffic light", 0.9),
        Region::new(100, 100, 120, 120),
    ];
    let out = pipeline
        .process_frame(frame.clone(), 0, Some(&detections))
        .unwrap();

    assert_eq!(out.regions.len(), 1);
    assert_eq!(out.regions[0].label.as_deref(), Some("traffic light"));

    let engine = DaltonizationEngine::new();
    let expected_patch = engine
        .correct(&frame.crop(&out.regions[0]).unwrap(), DeficiencyType::Deuteranopia)
        .unwrap();
    for y in 0..8 {
        for x in 0..12 {
            let inside = (2..6).contains(&x) && (1..5).contains(&y);
            let expected = if inside {
                expected_patch.pixel(x - 2, y - 1)
            } else {
                frame.pixel(x, y)
            };
            assert_eq!(out.frame.pixel(x, y), expected, "pixel ({x}, {y})");
        }
    }
}

#[test]
fn smaller_frame_between_refreshes_is_corrected_in_bounds() {
    let mut pipeline = FrameCorrectionPipeline::default();
    pipeline.modes_mut().set(CorrectionMode::Tritanopia);

    let big = noise_frame(10, 10, 11);
    let detections = [Region::new(0, 0, 10, 10)];
    pipeline.process_frame(big, 0, Some(&detections)).unwrap();

    let small = noise_frame(4, 4, 12);
    let out = pipeline
        .process_frame(small.clone(), 1, Some(&detections))
        .unwrap();
    assert_eq!(out.regions, vec![Region::new(0, 0, 4, 4)]);
    let expected = pipeline
        .engine()
        .correct(&small, DeficiencyType::Tritanopia)
        .unwrap();
    assert_eq!(out.frame, expected);
}

#[test]
fn pipeline_from_config() {
    let config = CorrectionConfig::from_json_str(
        r#"{"skip_frames": 2, "redistribution_strength": 0.7, "initial_mode": "protanopia"}"#,
    )
    .unwrap();
    let pipeline = FrameCorrectionPipeline::from_config(&config).unwrap();
    assert_eq!(pipeline.modes().active(), CorrectionMode::Protanopia);
    assert_eq!(pipeline.engine().redistributor().strength(), 0.7);
    assert_eq!(pipeline.policy().skip_frames(), 2);
    assert!(pipeline.needs_detection(4));
    assert!(!pipeline.needs_detection(5));
}

#[test]
fn malformed_raw_buffer_produces_no_output() {
    let err = Frame::from_raw(4, 4, 4, &[0u8; 64], ChannelOrder::Bgr).unwrap_err();
    assert!(matches!(err, DaltonError::InvalidFrame(_)));
}
