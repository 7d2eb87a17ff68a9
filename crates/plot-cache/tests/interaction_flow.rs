//! End-to-end interaction flow: a pointer event selects rows, the selection
//! lands in a reactive value, and the follow-up render request goes through
//! the plot cache.

use bytes::Bytes;
use plot_interact_cache::{Lookup, PlotCache, PlotKey};
use plot_interact_hittest::{nearest, within, NearestOptions, PlotTransform};
use plot_interact_reactive::ReactiveValue;
use plot_interact_shared::{
    CacheConfig, DataPoint, DataRect, Dataset, PlotSize, RenderedPlot,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn scatter() -> Dataset {
    Dataset::from_xy(
        "wt",
        vec![2.6, 2.9, 3.2, 3.4, 4.1],
        "mpg",
        vec![21.0, 22.8, 21.4, 18.7, 17.3],
    )
    .unwrap()
}

fn transform() -> PlotTransform {
    PlotTransform::from_viewport(
        (2.0, 5.0),
        (10.0, 35.0),
        PlotSize::new(600, 400).unwrap(),
        1.0,
    )
    .unwrap()
}

#[test]
fn click_updates_selection_and_rerenders_through_cache() {
    init_logging();

    let dataset = scatter();
    let selection: ReactiveValue<Vec<usize>> = ReactiveValue::new(Vec::new());
    let mut selection_rx = selection.subscribe();
    let cache = PlotCache::new(&CacheConfig::default()).unwrap();

    // Click lands essentially on row 1 (wt 2.9, mpg 22.8).
    let click = DataPoint::new(2.91, 22.7);
    let hits = nearest(
        &dataset,
        click,
        "wt",
        "mpg",
        &transform(),
        NearestOptions::default(),
    )
    .unwrap();
    selection.set(hits.selected_indices()).unwrap();

    let event = selection_rx.try_recv().unwrap();
    assert_eq!(*event.new, vec![1]);

    // Re-render keyed by the new selection.
    let key = PlotKey::Seq(vec![
        "scatter".into(),
        PlotKey::Seq(event.new.iter().map(|&i| PlotKey::Int(i as i64)).collect()),
    ]);
    let requested = PlotSize::new(600, 400).unwrap();

    let permit = match cache.lookup(&key, requested).unwrap() {
        Lookup::Miss(permit) => permit,
        Lookup::Hit(_) => panic!("fresh key cannot hit"),
    };
    let bucket = permit.bucket();
    assert!(bucket.width >= requested.width && bucket.height >= requested.height);
    permit
        .store(RenderedPlot::new(bucket, Bytes::from_static(b"plot-v1")))
        .unwrap();

    // A slightly resized viewport still hits the cached raster.
    match cache.lookup(&key, PlotSize::new(610, 405).unwrap()).unwrap() {
        Lookup::Hit(plot) => assert_eq!(plot.pixels, Bytes::from_static(b"plot-v1")),
        Lookup::Miss(_) => panic!("resize within the bucket must hit"),
    }

    let stats = cache.stats();
    assert_eq!((stats.hits, stats.misses), (1, 1));
}

#[test]
fn brush_then_invalidation_forces_rerender() {
    init_logging();

    let dataset = scatter();
    let cache = PlotCache::new(&CacheConfig::default()).unwrap();

    let brush = DataRect::new(2.8, 3.5, 18.0, 23.0).unwrap();
    let hits = within(&dataset, brush, "wt", "mpg", false).unwrap();
    assert_eq!(hits.selected_indices(), vec![1, 2, 3]);

    let key = PlotKey::Seq(vec![
        "brush-summary".into(),
        PlotKey::Int(hits.len() as i64),
    ]);
    let requested = PlotSize::new(300, 300).unwrap();

    if let Lookup::Miss(permit) = cache.lookup(&key, requested).unwrap() {
        let bucket = permit.bucket();
        permit
            .store(RenderedPlot::new(bucket, Bytes::from_static(b"summary")))
            .unwrap();
    }
    assert!(cache.lookup(&key, requested).unwrap().is_hit());

    // Underlying data changed: the host invalidates and the next lookup misses.
    cache.invalidate_all().unwrap();
    assert!(!cache.lookup(&key, requested).unwrap().is_hit());
}
