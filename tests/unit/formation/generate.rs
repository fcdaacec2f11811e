use std::collections::HashSet;

use super::*;
use crate::foundation::core::Uv;

const KINDS: [FormationKind; 4] = [
    FormationKind::Station,
    FormationKind::Flag,
    FormationKind::Silhouette,
    FormationKind::Staff,
];

#[test]
fn every_kind_returns_exact_count_of_finite_points() {
    for kind in KINDS {
        for count in [0usize, 1, 2, 3, 7, 99, 100, 101, 1000, 10_000] {
            let f = generate(kind, count);
            assert_eq!(f.len(), count, "{kind:?} count={count}");
            assert!(f.points().iter().all(|p| p.is_finite()), "{kind:?}");
        }
    }
}

#[test]
fn zero_count_is_empty() {
    for kind in KINDS {
        assert!(generate(kind, 0).is_empty());
        assert!(generate(kind, 0).bounds().is_none());
    }
}

#[test]
fn ceil_sqrt_is_exact() {
    assert_eq!(ceil_sqrt(0), 0);
    assert_eq!(ceil_sqrt(1), 1);
    assert_eq!(ceil_sqrt(2), 2);
    assert_eq!(ceil_sqrt(4), 2);
    assert_eq!(ceil_sqrt(5), 3);
    assert_eq!(ceil_sqrt(10_000), 100);
    assert_eq!(ceil_sqrt(10_001), 101);
}

#[test]
fn flag_uv_in_unit_square_and_index_mapping_is_bijective() {
    for count in [1usize, 149, 150, 151, 1000, 10_000] {
        let spec = FlagSpec::default();
        let f = FormationSpec::Flag(spec.clone()).generate(count, 0);
        let rows = count.div_ceil(spec.columns);

        let mut seen = HashSet::new();
        for p in f.points() {
            let uv = p.uv.expect("flag points carry uv");
            assert!((0.0..=1.0).contains(&uv.u));
            assert!((0.0..=1.0).contains(&uv.v));
            assert_eq!(p.z, 0.0);

            let col = (uv.u * (spec.columns - 1) as f64).round() as usize;
            let row = if rows > 1 {
                (uv.v * (rows - 1) as f64).round() as usize
            } else {
                0
            };
            assert!(seen.insert((col, row)), "duplicate cell for count={count}");
        }
        assert_eq!(seen.len(), count);
    }
}

#[test]
fn flag_layout_is_centered_and_flipped() {
    let spec = FlagSpec::default();
    let f = FormationSpec::Flag(spec.clone()).generate(10_000, 0);

    let first = f[0];
    assert!((first.x + spec.width / 2.0).abs() < 1e-9);
    assert!((first.y - (spec.lift + spec.height / 2.0)).abs() < 1e-9);

    let last = f[f.len() - 1];
    assert!(last.y < first.y);
    assert!((last.y - (spec.lift - spec.height / 2.0)).abs() < 1e-9);
}

#[test]
fn station_is_a_centered_grid_with_bounded_jitter() {
    let spec = StationSpec::default();
    let f = FormationSpec::Station(spec.clone()).generate(100, 3);
    assert!(f.points().iter().all(|p| p.uv.is_none()));
    assert!(f.points().iter().all(|p| (0.0..spec.jitter).contains(&p.y)));

    // 10 x 10 grid, spacing 0.15, shifted by half the grid extent.
    assert!((f[0].x + 0.75).abs() < 1e-9);
    assert!((f[0].z + 0.75).abs() < 1e-9);
    assert!((f[11].x - (0.15 - 0.75)).abs() < 1e-9);
    assert!((f[11].z - (0.15 - 0.75)).abs() < 1e-9);
}

#[test]
fn station_uv_columns_assign_raster_coordinates() {
    let spec = StationSpec {
        uv_columns: Some(10),
        ..StationSpec::default()
    };
    let f = FormationSpec::Station(spec).generate(100, 0);
    assert_eq!(f[0].uv, Some(Uv::new(0.0, 0.0)));
    assert_eq!(f[9].uv, Some(Uv::new(1.0, 0.0)));
    assert_eq!(f[99].uv, Some(Uv::new(1.0, 1.0)));
}

#[test]
fn silhouette_allocation_floors_then_fills_remainder() {
    let spec = SilhouetteSpec {
        regions: vec![
            SoftRegion {
                name: "a".to_owned(),
                center: [0.0, 50.0, 0.0],
                radii: [1.0, 1.0, 1.0],
                weight: 1.0,
            },
            SoftRegion {
                name: "b".to_owned(),
                center: [0.0, -50.0, 0.0],
                radii: [1.0, 1.0, 1.0],
                weight: 1.0,
            },
        ],
        fill: FillBox {
            min: [-1.0, -1.0, -1.0],
            max: [1.0, 1.0, 1.0],
        },
    };
    let f = FormationSpec::Silhouette(spec).generate(7, 11);
    assert_eq!(f.len(), 7);

    let in_a = f.points().iter().filter(|p| p.y > 40.0).count();
    let in_b = f.points().iter().filter(|p| p.y < -40.0).count();
    assert_eq!(in_a, 3);
    assert_eq!(in_b, 3);
    let last = f[6];
    assert!(last.y.abs() <= 1.0);
}

#[test]
fn silhouette_points_stay_inside_their_ellipsoid() {
    let spec = SilhouetteSpec {
        regions: vec![SoftRegion {
            name: "only".to_owned(),
            center: [1.0, 2.0, 3.0],
            radii: [0.5, 2.0, 1.0],
            weight: 1.0,
        }],
        ..SilhouetteSpec::default()
    };
    let f = FormationSpec::Silhouette(spec).generate(500, 1);
    for p in f.points() {
        let d = ((p.x - 1.0) / 0.5).powi(2) + ((p.y - 2.0) / 2.0).powi(2) + (p.z - 3.0).powi(2);
        assert!(d <= 1.0 + 1e-9);
    }
}

#[test]
fn silhouette_without_weight_scatters_everything_in_fill_box() {
    let spec = SilhouetteSpec {
        regions: vec![],
        ..SilhouetteSpec::default()
    };
    let f = FormationSpec::Silhouette(spec.clone()).generate(50, 0);
    assert_eq!(f.len(), 50);
    for p in f.points() {
        assert!((spec.fill.min[1]..spec.fill.max[1]).contains(&p.y));
    }
}

#[test]
fn staff_regions_sum_to_count() {
    for count in [0usize, 1, 2, 3, 7, 10, 33, 10_000, 25_000] {
        let (a, b, c) = staff::split_counts(count);
        assert_eq!(a + b + c, count);
    }
    assert_eq!(staff::split_counts(100), (70, 15, 15));
    assert_eq!(staff::split_counts(10), (7, 1, 2));
}

#[test]
fn staff_points_respect_radii() {
    let spec = StaffSpec::default();
    let f = FormationSpec::Staff(spec.clone()).generate(1000, 5);
    for p in f.points() {
        let r = (p.x * p.x + p.z * p.z).sqrt();
        assert!(r <= spec.cap_radius + 1e-9);
        let dy = (p.y - spec.center_y).abs();
        assert!(dy <= spec.length / 2.0 + spec.cap_length + 1e-9);
    }
}

#[test]
fn same_seed_same_formation() {
    let spec = FormationSpec::default_for(FormationKind::Silhouette);
    assert_eq!(spec.generate(300, 42), spec.generate(300, 42));
    assert_ne!(spec.generate(300, 42), spec.generate(300, 43));
}

#[test]
fn spec_json_uses_kind_tag_and_defaults() {
    let spec: FormationSpec = serde_json::from_str(r#"{"kind":"flag","columns":10}"#).unwrap();
    let FormationSpec::Flag(flag) = spec else {
        panic!("expected flag spec");
    };
    assert_eq!(flag.columns, 10);
    assert_eq!(flag.width, FlagSpec::default().width);

    let spec: FormationSpec = serde_json::from_str(r#"{"kind":"station"}"#).unwrap();
    assert_eq!(spec, FormationSpec::default_for(FormationKind::Station));
}
