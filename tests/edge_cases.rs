use geozset::codec::{decode_int, encode_int};
use geozset::ranges::decompose;
use geozset::storage::{ScoredMember, ScoredStore};
use geozset::{Candidate, GeoError, GeoIndex, GeoKey, GeoRange, MemoryBackend, ScanCap};
use std::sync::atomic::{AtomicUsize, Ordering};

const BIT_DEPTH: u8 = 52;

/// Store wrapper that fails selected operations.
#[derive(Default)]
struct FlakyStore {
    inner: MemoryBackend,
    fail_inserts: bool,
    fail_removes: bool,
    fail_scans: bool,
    scans: AtomicUsize,
}

impl ScoredStore for FlakyStore {
    fn insert_scored(&self, collection: &str, members: &[ScoredMember]) -> geozset::Result<u64> {
        if self.fail_inserts {
            return Err(GeoError::Store("insert rejected".into()));
        }
        self.inner.insert_scored(collection, members)
    }

    fn remove_by_key(&self, collection: &str, labels: &[&str]) -> geozset::Result<u64> {
        if self.fail_removes {
            return Err(GeoError::Store("remove rejected".into()));
        }
        self.inner.remove_by_key(collection, labels)
    }

    fn scan_by_score_range(
        &self,
        collection: &str,
        range: &GeoRange,
        limit: Option<usize>,
    ) -> geozset::Result<Vec<Candidate>> {
        self.scans.fetch_add(1, Ordering::SeqCst);
        if self.fail_scans {
            return Err(GeoError::Store("scan timed out".into()));
        }
        self.inner.scan_by_score_range(collection, range, limit)
    }

    fn score_of(&self, collection: &str, label: &str) -> geozset::Result<Option<f64>> {
        self.inner.score_of(collection, label)
    }

    fn len(&self, collection: &str) -> geozset::Result<usize> {
        self.inner.len(collection)
    }
}

#[test]
fn test_insert_error_is_propagated_verbatim() {
    let index = GeoIndex::new(FlakyStore {
        fail_inserts: true,
        ..Default::default()
    });

    let err = index
        .add_coordinates("set", BIT_DEPTH, &[GeoKey::new(1.0, 1.0, "demo")])
        .unwrap_err();
    assert!(matches!(err, GeoError::Store(ref msg) if msg == "insert rejected"));
}

#[test]
fn test_remove_error_is_propagated_verbatim() {
    let index = GeoIndex::new(FlakyStore {
        fail_removes: true,
        ..Default::default()
    });

    let err = index.remove_coordinates_by_keys("set", &["demo"]).unwrap_err();
    assert!(matches!(err, GeoError::Store(ref msg) if msg == "remove rejected"));
}

#[test]
fn test_remove_nothing_skips_store() {
    let index = GeoIndex::new(FlakyStore {
        fail_removes: true,
        ..Default::default()
    });

    assert_eq!(index.remove_coordinates_by_keys("set", &[]).unwrap(), 0);
}

#[test]
fn test_add_nothing_skips_store() {
    let index = GeoIndex::new(FlakyStore {
        fail_inserts: true,
        ..Default::default()
    });

    assert_eq!(index.add_coordinates("set", BIT_DEPTH, &[]).unwrap(), 0);
}

#[test]
fn test_scan_error_aborts_search() {
    let store = FlakyStore {
        fail_scans: true,
        ..Default::default()
    };
    store
        .inner
        .insert_scored(
            "set",
            &[ScoredMember::new("demo", encode_int(1.0, 1.0, BIT_DEPTH) as f64)],
        )
        .unwrap();
    let index = GeoIndex::new(store);

    let err = index
        .search_by_radius("set", 1.0, 1.0, 5000.0, BIT_DEPTH)
        .unwrap_err();
    assert!(matches!(err, GeoError::Store(ref msg) if msg == "scan timed out"));
    // Sequential scans stop at the first failure.
    assert_eq!(index.store().scans.load(Ordering::SeqCst), 1);
}

#[test]
fn test_one_scan_per_range() {
    let index = GeoIndex::new(FlakyStore::default());
    index
        .search_by_radius("set", 39.9523, -75.1638, 5000.0, BIT_DEPTH)
        .unwrap();

    let expected = decompose(39.9523, -75.1638, 26, BIT_DEPTH).unwrap().len();
    assert_eq!(index.store().scans.load(Ordering::SeqCst), expected);
}

#[test]
fn test_precision_error_skips_scans() {
    let index = GeoIndex::new(FlakyStore::default());
    let err = index
        .search_by_radius("set", 39.9523, -75.1638, 5000.0, 24)
        .unwrap_err();
    assert!(matches!(err, GeoError::Precision { search: 26, storage: 24 }));
    assert_eq!(index.store().scans.load(Ordering::SeqCst), 0);
}

#[test]
fn test_invalid_inputs() {
    let index = GeoIndex::memory();
    assert!(matches!(
        index.add_coordinates("set", 0, &[GeoKey::new(1.0, 1.0, "a")]),
        Err(GeoError::InvalidInput(_))
    ));
    assert!(matches!(
        index.add_coordinates("set", 53, &[GeoKey::new(1.0, 1.0, "a")]),
        Err(GeoError::InvalidInput(_))
    ));
    assert!(matches!(
        index.search_by_radius("set", 91.0, 0.0, 100.0, BIT_DEPTH),
        Err(GeoError::InvalidInput(_))
    ));
    assert!(matches!(
        index.search_by_radius("set", 0.0, 0.0, f64::INFINITY, BIT_DEPTH),
        Err(GeoError::InvalidInput(_))
    ));
}

#[test]
fn test_search_across_antimeridian() {
    let index = GeoIndex::memory();
    index
        .add_coordinates(
            "dateline",
            BIT_DEPTH,
            &[
                GeoKey::new(0.5, 179.99, "east"),
                GeoKey::new(0.5, 170.0, "far"),
            ],
        )
        .unwrap();

    let found = index
        .search_by_radius("dateline", 0.5, -179.99, 5000.0, BIT_DEPTH)
        .unwrap();
    assert_eq!(found, vec!["east"]);
}

#[test]
fn test_search_near_poles() {
    let index = GeoIndex::memory();
    index
        .add_coordinates(
            "poles",
            BIT_DEPTH,
            &[
                GeoKey::new(90.0, 0.0, "North Pole"),
                GeoKey::new(-90.0, 0.0, "South Pole"),
                GeoKey::new(89.99, 0.01, "Near North"),
            ],
        )
        .unwrap();

    let found = index
        .search_by_radius("poles", 90.0, 0.0, 5000.0, BIT_DEPTH)
        .unwrap();
    assert_eq!(found, vec!["North Pole", "Near North"]);

    let found = index
        .search_by_radius("poles", -90.0, 0.0, 5000.0, BIT_DEPTH)
        .unwrap();
    assert_eq!(found, vec!["South Pole"]);
}

#[test]
fn test_zero_radius_finds_exact_point() {
    let index = GeoIndex::memory();
    index
        .add_coordinates(
            "set",
            BIT_DEPTH,
            &[GeoKey::new(51.5074, -0.1278, "here"), GeoKey::new(51.6, -0.1278, "there")],
        )
        .unwrap();

    let found = index
        .search_by_radius("set", 51.5074, -0.1278, 0.0, BIT_DEPTH)
        .unwrap();
    assert_eq!(found, vec!["here"]);
}

#[test]
fn test_coarser_storage_depth() {
    let index = GeoIndex::memory();
    index
        .add_coordinates(
            "coarse",
            30,
            &[
                GeoKey::new(39.9523, -75.1638, "Philadelphia"),
                GeoKey::new(43.6667, -79.4167, "Toronto"),
            ],
        )
        .unwrap();

    let found = index
        .search_by_radius("coarse", 39.9523, -75.1638, 5000.0, 30)
        .unwrap();
    assert_eq!(found, vec!["Philadelphia"]);
}

/// Two members in the same coarse cell: the far one sorts first by score.
fn crowded_index(scan_cap: ScanCap) -> (GeoIndex, f64, f64) {
    let index = GeoIndex::builder()
        .scan_cap(scan_cap)
        .build_in_memory()
        .unwrap();

    let cell = encode_int(39.9523, -75.1638, 26);
    let centre = decode_int(cell, 26).point;
    let corner = decode_int(cell << 26, BIT_DEPTH).point;

    index
        .add_coordinates(
            "crowded",
            BIT_DEPTH,
            &[
                GeoKey::from_point(corner, "far"),
                GeoKey::from_point(centre, "near"),
            ],
        )
        .unwrap();

    (index, centre.lat(), centre.lon())
}

#[test]
fn test_per_range_cap_is_approximate() {
    let (index, lat, lon) = crowded_index(ScanCap::PerRange);

    let top = index
        .search_by_radius_with_limit("crowded", lat, lon, 5000.0, BIT_DEPTH, 1)
        .unwrap();
    assert_eq!(top, vec!["far"]);
}

#[test]
fn test_exact_cap_finds_true_nearest() {
    let (index, lat, lon) = crowded_index(ScanCap::Exact);

    let top = index
        .search_by_radius_with_limit("crowded", lat, lon, 5000.0, BIT_DEPTH, 1)
        .unwrap();
    assert_eq!(top, vec!["near"]);

    let all = index
        .search_by_radius("crowded", lat, lon, 5000.0, BIT_DEPTH)
        .unwrap();
    assert_eq!(all, vec!["near", "far"]);
}

#[cfg(feature = "parallel")]
#[test]
fn test_parallel_scans_match_sequential() {
    let sequential = GeoIndex::memory();
    let parallel = GeoIndex::builder()
        .parallel_scans(true)
        .build_in_memory()
        .unwrap();

    let keys: Vec<GeoKey> = (0..500)
        .map(|i| {
            let lat = 40.0 + (i as f64 * 0.0001);
            let lon = -74.0 + (i as f64 * 0.0001);
            GeoKey::new(lat, lon, format!("p{}", i))
        })
        .collect();
    sequential.add_coordinates("grid", BIT_DEPTH, &keys).unwrap();
    parallel.add_coordinates("grid", BIT_DEPTH, &keys).unwrap();

    for radius in [100.0, 1000.0, 5000.0] {
        let a = sequential
            .search_by_radius("grid", 40.01, -73.99, radius, BIT_DEPTH)
            .unwrap();
        let b = parallel
            .search_by_radius("grid", 40.01, -73.99, radius, BIT_DEPTH)
            .unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn test_large_collection() {
    let index = GeoIndex::memory();

    let keys: Vec<GeoKey> = (0..10_000)
        .map(|i| {
            let lat = 40.0 + (i as f64 * 0.00001);
            let lon = -74.0 + (i as f64 * 0.00001);
            GeoKey::new(lat, lon, format!("data{}", i))
        })
        .collect();
    assert_eq!(index.add_coordinates("stress", BIT_DEPTH, &keys).unwrap(), 10_000);

    let found = index
        .search_by_radius_with_distances("stress", 40.0, -74.0, 1000.0, BIT_DEPTH, Some(100))
        .unwrap();
    assert_eq!(found.len(), 100);
    assert_eq!(found[0].label, "data0");
    assert!(found.windows(2).all(|w| w[0].distance <= w[1].distance));
}
