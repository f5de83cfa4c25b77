// crates/atlas-core/benches/pipeline.rs
use atlas_core::loader::Loader;
use atlas_core::pipeline::{self, Criteria, SortKey};
use atlas_core::{Collection, Country};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

/// The 25-record fixture repeated until it is about the size of the live dataset.
fn dataset() -> Collection {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/countries_v3.json");
    let base = Loader::load_snapshot(path).expect("fixture loads");
    let mut countries: Vec<Country> = Vec::with_capacity(250);
    for round in 0..10 {
        for c in &base {
            let mut c = c.clone();
            c.code = format!("{}{round}", c.code);
            countries.push(c);
        }
    }
    Collection::new(countries)
}

fn bench_pipeline(c: &mut Criterion) {
    let coll = dataset();
    let favorites: Vec<String> = coll.countries().iter().step_by(7).map(|c| c.code.clone()).collect();

    let mut group = c.benchmark_group("pipeline");
    for sort in SortKey::ALL {
        group.bench_function(format!("visible/{sort}"), |b| {
            let criteria = Criteria {
                search: "",
                sort,
                favorites_only: false,
                favorites: &favorites,
            };
            b.iter(|| black_box(pipeline::visible(coll.countries(), &criteria)).len())
        });
    }
    group.bench_function("visible/search", |b| {
        let criteria = Criteria {
            search: "EUROPE",
            sort: SortKey::NameAsc,
            favorites_only: false,
            favorites: &favorites,
        };
        b.iter(|| black_box(pipeline::visible(coll.countries(), &criteria)).len())
    });
    group.bench_function("visible/favorites-only", |b| {
        let criteria = Criteria {
            search: "",
            sort: SortKey::PopulationDesc,
            favorites_only: true,
            favorites: &favorites,
        };
        b.iter(|| black_box(pipeline::visible(coll.countries(), &criteria)).len())
    });
    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
