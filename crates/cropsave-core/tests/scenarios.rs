// tests/scenarios.rs
//
// End-to-end runs of the crop pipeline through the public API.

use cropsave_core::{
    resolve_crop, CropError, CropPipeline, CropRequest, FileSink, MemorySink, OutputFormat,
    PixelBuffer, RectF, ReleaseTracker, SizeLimit,
};

/// Image where each pixel encodes its own position.
fn positional_image(width: u32, height: u32) -> PixelBuffer {
    let mut pixels = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            pixels.push((x % 256) as u8);
            pixels.push((y % 256) as u8);
            pixels.push(((x + y) % 256) as u8);
        }
    }
    PixelBuffer::new(width, height, pixels)
}

/// Black image with one white marker pixel.
fn marker_image(width: u32, height: u32, x: u32, y: u32) -> PixelBuffer {
    let mut pixels = vec![0u8; (width * height * 3) as usize];
    let idx = ((y * width + x) * 3) as usize;
    pixels[idx..idx + 3].copy_from_slice(&[255, 255, 255]);
    PixelBuffer::new(width, height, pixels)
}

#[test]
fn scenario_a_inner_crop_at_unit_scale() {
    let crop = RectF::new(10.0, 10.0, 110.0, 110.0);
    let bounds = RectF::new(0.0, 0.0, 200.0, 200.0);

    let geometry = resolve_crop(&crop, &bounds, 1.0, 0.0, None).unwrap();
    assert_eq!(geometry.offset_x, 10);
    assert_eq!(geometry.offset_y, 10);
    assert_eq!(geometry.width, 100);
    assert_eq!(geometry.height, 100);
    assert!(geometry.should_crop);

    let result = CropPipeline::new(positional_image(200, 200), CropRequest::new(crop, bounds, 1.0))
        .unwrap()
        .produce_cropped_image()
        .unwrap();
    assert_eq!(result.dimensions(), (100, 100));
    assert_eq!(result.pixel_at(0, 0), Some([10, 10, 20]));
    assert_eq!(result.pixel_at(99, 99), Some([109, 109, 218]));
}

#[test]
fn scenario_b_full_bounds_is_passthrough() {
    let tracker = ReleaseTracker::new();
    let source = positional_image(500, 500).with_tracker(&tracker);
    let source_ptr = source.pixels().as_ptr();
    let bounds = RectF::new(0.0, 0.0, 500.0, 500.0);

    let cropped = CropPipeline::new(source, CropRequest::new(bounds, bounds, 1.0))
        .unwrap()
        .run()
        .unwrap();

    assert!(!cropped.geometry.should_crop);
    // Same allocation, no copy was made
    assert_eq!(cropped.buffer.pixels().as_ptr(), source_ptr);
    assert_eq!(tracker.allocated(), 1);
    assert_eq!(tracker.live(), 1);
}

#[test]
fn scenario_c_size_limit_downscales_then_crops() {
    let tracker = ReleaseTracker::new();
    let rect = RectF::new(0.0, 0.0, 1000.0, 1000.0);
    let request = CropRequest {
        size_limit: Some(SizeLimit::new(300, 300)),
        ..CropRequest::new(rect, rect, 1.0)
    };

    let cropped = CropPipeline::new(positional_image(1000, 1000).with_tracker(&tracker), request)
        .unwrap()
        .run()
        .unwrap();

    // resize_scale = min(300 / 1000, 300 / 1000) = 0.3
    assert!((cropped.scale - 1.0 / 0.3).abs() < 1e-3, "scale was {}", cropped.scale);
    assert!(cropped.geometry.should_crop);
    assert_eq!((cropped.geometry.width, cropped.geometry.height), (300, 300));
    assert_eq!(cropped.buffer.dimensions(), (300, 300));

    // The pre-resize buffer was released
    assert_eq!(tracker.live(), 1);
}

#[test]
fn scenario_d_quarter_turn_moves_marker_clockwise() {
    // 40x20 source rotated 90° lays out as 20x40 on screen
    let source = marker_image(40, 20, 0, 0);
    let laid_out = RectF::new(0.0, 0.0, 20.0, 40.0);
    let request = CropRequest {
        angle: 90.0,
        ..CropRequest::new(laid_out, laid_out, 1.0)
    };

    let cropped = CropPipeline::new(source, request).unwrap().run().unwrap();

    assert!(cropped.geometry.should_crop);
    assert_eq!(cropped.buffer.dimensions(), (20, 40));
    // Top-left ends up top-right after a clockwise quarter turn
    assert_eq!(cropped.buffer.pixel_at(19, 0), Some([255, 255, 255]));
    assert_eq!(cropped.buffer.pixel_at(0, 0), Some([0, 0, 0]));
}

#[test]
fn zero_scale_fails_before_any_work_and_leaks_nothing() {
    let tracker = ReleaseTracker::new();
    let source = positional_image(50, 50).with_tracker(&tracker);
    let bounds = RectF::new(0.0, 0.0, 50.0, 50.0);

    let err = CropPipeline::new(source, CropRequest::new(bounds, bounds, 0.0)).unwrap_err();

    assert!(matches!(err, CropError::Precondition(_)));
    assert_eq!(tracker.allocated(), 1);
    assert_eq!(tracker.live(), 0);
}

#[test]
fn empty_bounds_is_precondition_error() {
    let request = CropRequest::new(RectF::new(0.0, 0.0, 10.0, 10.0), RectF::default(), 1.0);
    let err = CropPipeline::new(positional_image(10, 10), request).unwrap_err();
    assert!(matches!(err, CropError::Precondition(_)));
}

#[test]
fn independent_runs_are_pixel_identical() {
    let source = positional_image(120, 80);
    let copy = source.clone();
    let request = CropRequest {
        angle: 17.5,
        ..CropRequest::new(
            RectF::new(30.0, 20.0, 110.0, 80.0),
            RectF::new(0.0, 0.0, 140.0, 115.0),
            1.0,
        )
    };

    let first = CropPipeline::new(source, request.clone())
        .unwrap()
        .produce_cropped_image()
        .unwrap();
    let second = CropPipeline::new(copy, request)
        .unwrap()
        .produce_cropped_image()
        .unwrap();

    assert_eq!(first.dimensions(), second.dimensions());
    assert_eq!(first.pixels(), second.pixels());
}

#[test]
fn parallel_runs_on_owned_buffers() {
    let handles: Vec<_> = (0..4u32)
        .map(|i| {
            std::thread::spawn(move || {
                let size = 64 + i * 16;
                let bounds = RectF::new(0.0, 0.0, size as f32, size as f32);
                let crop = RectF::new(8.0, 8.0, 40.0, 40.0);
                CropPipeline::new(positional_image(size, size), CropRequest::new(crop, bounds, 1.0))
                    .unwrap()
                    .produce_cropped_image()
                    .unwrap()
            })
        })
        .collect();

    for handle in handles {
        let result = handle.join().unwrap();
        assert_eq!(result.dimensions(), (32, 32));
        assert_eq!(result.pixel_at(0, 0), Some([8, 8, 16]));
    }
}

#[test]
fn save_png_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cropped.png");
    let request = CropRequest {
        format: OutputFormat::Png,
        ..CropRequest::new(
            RectF::new(5.0, 5.0, 25.0, 15.0),
            RectF::new(0.0, 0.0, 40.0, 30.0),
            1.0,
        )
    };

    CropPipeline::new(positional_image(40, 30), request)
        .unwrap()
        .save(&FileSink::new(&path))
        .unwrap();

    let decoded = PixelBuffer::decode(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(decoded.dimensions(), (20, 10));
    // PNG is lossless, so pixels survive exactly
    assert_eq!(decoded.pixel_at(0, 0), Some([5, 5, 10]));
}

#[test]
fn save_to_unwritable_destination_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let sink = FileSink::new(dir.path().join("no-such-dir").join("out.jpg"));
    let bounds = RectF::new(0.0, 0.0, 10.0, 10.0);

    let err = CropPipeline::new(positional_image(10, 10), CropRequest::new(bounds, bounds, 1.0))
        .unwrap()
        .save(&sink)
        .unwrap_err();
    assert!(matches!(err, CropError::Io(_)));
}

#[test]
fn scaled_view_maps_back_to_source_pixels() {
    // 400x300 source shown at half size, offset by (20, 10) on screen
    let bounds = RectF::new(20.0, 10.0, 220.0, 160.0);
    let crop = RectF::new(70.0, 35.0, 170.0, 110.0);
    let sink = MemorySink::new();
    let request = CropRequest {
        format: OutputFormat::WebP,
        ..CropRequest::new(crop, bounds, 0.5)
    };

    CropPipeline::new(positional_image(400, 300), request)
        .unwrap()
        .save(&sink)
        .unwrap();

    let decoded = PixelBuffer::decode(&sink.contents()).unwrap();
    // (70 - 20) / 0.5 = 100, (35 - 10) / 0.5 = 50; 100 / 0.5 = 200, 75 / 0.5 = 150
    assert_eq!(decoded.dimensions(), (200, 150));
    assert_eq!(decoded.pixel_at(0, 0), Some([100, 50, 150]));
}
