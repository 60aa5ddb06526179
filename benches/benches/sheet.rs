// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for the per-frame paths of `understory_sheet`.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use kurbo::{Insets, Point, Rect, Size, Vec2};
use understory_sheet::decider::decide;
use understory_sheet::drag::GestureSample;
use understory_sheet::frame::{Container, SheetLayout, offscreen_frame, presented_frame};
use understory_sheet::scroll::{OverscrollArbiter, ScrollSample, ScrollStep};
use understory_sheet::{
    DismissalPolicy, InputSource, PixelGrid, SheetAnimation, SheetConfig, SheetController,
    SheetHost, SheetStyle,
};

/// Host that keeps the last written values and drops animations.
struct NullHost {
    container: Container,
    frame: Rect,
    shading: f64,
}

impl SheetHost for NullHost {
    type ScrollView = u32;

    fn container(&self) -> Option<Container> {
        Some(self.container)
    }

    fn preferred_content_height(&self) -> f64 {
        420.0
    }

    fn presented_frame(&self) -> Option<Rect> {
        Some(self.frame)
    }

    fn set_presented_frame(&mut self, frame: Rect) {
        self.frame = frame;
    }

    fn set_pull_bar_origin_y(&mut self, _: f64) {}

    fn set_shading_alpha(&mut self, alpha: f64) {
        self.shading = alpha;
    }

    fn animate(&mut self, animation: SheetAnimation) {
        black_box(animation);
    }

    fn begin_interactive_dismissal(&mut self) {}

    fn scroll_view(&self) -> Option<u32> {
        None
    }

    fn subscribe_scroll(&mut self, _: u32) -> bool {
        true
    }

    fn unsubscribe_scroll(&mut self, _: u32) {}
}

fn ignore(_animated: bool) {}

fn phone() -> Container {
    Container::new(Size::new(390.0, 844.0), Insets::new(0.0, 47.0, 0.0, 34.0))
}

fn bench_geometry(c: &mut Criterion) {
    let mut group = c.benchmark_group("sheet/geometry");
    let container = phone();

    for scale in [1.0, 2.0, 3.0] {
        let grid = PixelGrid::new(scale);
        group.bench_function(BenchmarkId::new("presented_frame", scale), |b| {
            b.iter(|| black_box(presented_frame(Some(&container), black_box(333.3), grid)));
        });
    }

    let style = SheetStyle::default();
    let grid = PixelGrid::new(3.0);
    let presented = presented_frame(Some(&container), 333.3, grid);
    let offscreen = offscreen_frame(&container, presented.size());
    group.bench_function("layout_at_progress", |b| {
        b.iter(|| {
            black_box(SheetLayout::at_progress(
                presented,
                offscreen,
                black_box(0.37),
                &style,
                grid,
            ))
        });
    });

    group.finish();
}

fn bench_decider(c: &mut Criterion) {
    let policy = DismissalPolicy::default();
    c.bench_function("sheet/decide", |b| {
        b.iter(|| {
            black_box(decide(
                black_box(1800.0),
                black_box(180.0),
                black_box(600.0),
                &policy,
            ))
        });
    });
}

fn bench_gestures(c: &mut Criterion) {
    let mut group = c.benchmark_group("sheet/gestures");
    let samples: u16 = 120;

    group.bench_function(BenchmarkId::new("drag", samples), |b| {
        b.iter(|| {
            let mut host = NullHost {
                container: phone(),
                frame: Rect::new(0.0, 390.0, 390.0, 844.0),
                shading: 1.0,
            };
            let mut sheet: SheetController<fn(bool), u32> =
                SheetController::new(ignore as fn(bool), SheetConfig::default());
            sheet.presentation_will_begin();
            sheet.presentation_did_end(true, &mut host);

            sheet.handle_drag(InputSource::SheetDrag, &GestureSample::began(), &mut host);
            for i in 0..samples {
                let sample = GestureSample::changed(
                    Vec2::new(0.0, f64::from(i) * 2.0),
                    Vec2::new(0.0, 400.0),
                );
                sheet.handle_drag(InputSource::SheetDrag, &sample, &mut host);
            }
            let end = GestureSample::ended(Vec2::new(0.0, 240.0), Vec2::new(0.0, 400.0));
            black_box(sheet.handle_drag(InputSource::SheetDrag, &end, &mut host));
            black_box(host.shading)
        });
    });

    group.bench_function(BenchmarkId::new("overscroll_arbiter", samples), |b| {
        b.iter(|| {
            let mut arbiter = OverscrollArbiter::default();
            arbiter.will_begin_dragging();
            let mut progress = None;
            for i in 0..samples {
                let y = f64::from(i) - 40.0;
                let sample = ScrollSample::tracking(Point::new(0.0, y), Vec2::new(0.0, 300.0))
                    .with_content_offset(Point::new(0.0, (-y).max(0.0)), 0.0);
                if let ScrollStep::Drive {
                    overlay_translation,
                    ..
                } = arbiter.did_scroll(&sample, progress)
                {
                    progress = Some(overlay_translation / 420.0);
                }
            }
            black_box(arbiter.overlay_translation)
        });
    });

    group.finish();
}

criterion_group!(benches, bench_geometry, bench_decider, bench_gestures);
criterion_main!(benches);
