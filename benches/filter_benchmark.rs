use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use voyagevista_showcase::catalog::{Catalog, Listing, Tag};
use voyagevista_showcase::filter::{visible, Category, FilterCriteria};

// Catalog of `copies` x the seeded listings, with fresh ids
fn scaled_catalog(copies: u32) -> Catalog {
    let seed = Catalog::seeded();
    let listings: Vec<Listing> = (0..copies)
        .flat_map(|copy| {
            seed.listings().iter().map(move |listing| Listing {
                id: copy * 100 + listing.id,
                ..listing.clone()
            })
        })
        .collect();
    Catalog::new(listings).expect("scaled catalog is valid")
}

pub fn filter_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("listing_filter");

    let queries = [
        FilterCriteria::default(),
        FilterCriteria::new(Category::Tag(Tag::Beach), ""),
        FilterCriteria::new(Category::All, "mumbai"),
        FilterCriteria::new(Category::Tag(Tag::Mountain), "COORG"),
    ];

    for copies in [1, 10, 100].iter() {
        let catalog = scaled_catalog(*copies);
        group.bench_with_input(
            BenchmarkId::from_parameter(catalog.len()),
            &catalog,
            |b, catalog| {
                b.iter(|| {
                    for criteria in &queries {
                        black_box(visible(catalog, criteria));
                    }
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, filter_benchmark);
criterion_main!(benches);
