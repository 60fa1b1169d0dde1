use quench_hist::{linspace, Binning, Histogram};

#[test]
fn linspace_covers_the_range() {
    let edges = linspace(4, 0.0, 2.0);
    assert_eq!(edges, vec![0.0, 0.5, 1.0, 1.5, 2.0]);
}

#[test]
fn fill_routes_to_half_open_bins() {
    let mut h = Histogram::with_edges(vec![0.0, 1.0, 2.0, 3.0]).unwrap();
    h.fill(0.5);
    h.fill(1.0); // lower edge belongs to the upper bin
    h.fill(2.999);
    assert_eq!(h.bin_content(0), Some(1.0));
    assert_eq!(h.bin_content(1), Some(1.0));
    assert_eq!(h.bin_content(2), Some(1.0));
    assert_eq!(h.entries(), 3);
}

#[test]
fn out_of_range_values_become_under_and_overflow() {
    let mut h = Histogram::with_edges(vec![0.0, 1.0]).unwrap();
    h.fill(-0.1);
    h.fill(1.0); // the last edge is exclusive
    h.fill(7.0);
    h.fill(f64::NAN);
    assert_eq!(h.underflow(), 1.0);
    assert_eq!(h.overflow(), 3.0);
    assert_eq!(h.sum(), 0.0);
}

#[test]
fn weights_and_scaling_compose() {
    let mut h = Histogram::with_edges(vec![0.0, 10.0]).unwrap();
    h.fill_weighted(5.0, 2.5);
    h.fill_weighted(5.0, 0.5);
    h.scale(2.0);
    assert!((h.sum() - 6.0).abs() < 1e-12);
}

#[test]
fn merge_adds_and_checks_edges() {
    let mut a = Histogram::with_edges(vec![0.0, 1.0, 2.0]).unwrap();
    let mut b = a.clone();
    a.fill(0.5);
    b.fill(0.5);
    b.fill(1.5);
    a.merge(&b).unwrap();
    assert_eq!(a.bin_content(0), Some(2.0));
    assert_eq!(a.bin_content(1), Some(1.0));

    let other = Histogram::with_edges(vec![0.0, 2.0]).unwrap();
    assert!(a.merge(&other).is_err());
}

#[test]
fn invalid_layouts_are_rejected() {
    assert!(Histogram::with_edges(vec![1.0]).is_err());
    assert!(Histogram::with_edges(vec![0.0, 0.0]).is_err());
    assert!(Histogram::with_edges(vec![0.0, f64::INFINITY]).is_err());
    assert!(Binning::uniform(0, 0.0, 1.0).build().is_err());
    assert!(Binning::uniform(10, 1.0, 0.0).build().is_err());
}

#[test]
fn uniform_binning_matches_explicit_edges() {
    let uniform = Binning::uniform(2, -0.5, 1.5).build().unwrap();
    let explicit = Histogram::with_edges(vec![-0.5, 0.5, 1.5]).unwrap();
    assert_eq!(uniform.edges(), explicit.edges());
}
