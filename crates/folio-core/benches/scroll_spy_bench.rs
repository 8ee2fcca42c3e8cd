#![forbid(unsafe_code)]

//! Benchmark: scroll spy evaluation and the full scroll event path.
//!
//! Run with: `cargo bench -p folio-core --bench scroll_spy_bench`

use core::time::Duration;
use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use folio_core::section::section_at;
use folio_core::{LayoutSnapshot, PageEvent, PortfolioPage, ScrollSpy};

fn layout(count: usize) -> LayoutSnapshot {
    let ids: Vec<String> = (0..count).map(|i| format!("section-{i}")).collect();
    LayoutSnapshot::stacked(ids.iter().map(|id| (id.as_str(), 720.0)))
}

fn bench_section_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("scroll_spy/section_at");
    for count in [5_usize, 50, 500] {
        let snapshot = layout(count);
        let bottom = count as f64 * 720.0;
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &snapshot, |b, snapshot| {
            let mut offset = 0.0;
            b.iter(|| {
                offset = (offset + 137.0) % bottom;
                black_box(section_at(&snapshot.sections, black_box(offset), 100.0));
            });
        });
    }
    group.finish();
}

fn bench_spy_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("scroll_spy/sweep");
    let snapshot = layout(50);
    group.bench_function("top_to_bottom_50", |b| {
        b.iter(|| {
            let mut spy = ScrollSpy::new("section-0", 100.0);
            let mut changes = 0_u32;
            let mut offset = 0.0;
            while offset < 50.0 * 720.0 {
                if spy.observe(&snapshot.sections, offset).is_some() {
                    changes += 1;
                }
                offset += 16.0;
            }
            black_box(changes);
        });
    });
    group.finish();
}

fn bench_scroll_events(c: &mut Criterion) {
    let mut group = c.benchmark_group("page/scroll_events");
    group.throughput(Throughput::Elements(240));
    group.bench_function("frame_rate_scroll_240", |b| {
        b.iter(|| {
            let mut host = layout(5);
            let mut page = PortfolioPage::default();
            page.init(&host);
            for frame in 0..240_u32 {
                host.scroll_offset = f64::from(frame) * 15.0;
                page.handle(PageEvent::Scroll, &host);
                page.advance_time(Duration::from_millis(16), &host);
            }
            black_box(page.take_effects().len());
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_section_lookup,
    bench_spy_sweep,
    bench_scroll_events
);
criterion_main!(benches);
