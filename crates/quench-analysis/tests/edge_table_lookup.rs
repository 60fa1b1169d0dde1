use proptest::prelude::*;
use quench_analysis::EdgeTable;

#[test]
fn first_not_exceeded_edge_wins() {
    let table = EdgeTable::new(vec![10.0, 30.0, 60.0, 90.0]).unwrap();
    assert_eq!(table.bin(10.0), Some(0));
    assert_eq!(table.bin(10.01), Some(1));
    assert_eq!(table.bin(1000.0), None);
    assert_eq!(table.bin(-5.0), Some(0));
    assert_eq!(table.bin(90.0), Some(3));
    assert_eq!(table.bin(90.0001), None);
}

#[test]
fn edges_bin_to_their_own_index() {
    let table = EdgeTable::new(vec![0.3, 0.8, 1.2, 1.6, 2.1, 2.8]).unwrap();
    for (i, &edge) in table.edges().iter().enumerate() {
        assert_eq!(table.bin(edge), Some(i));
    }
}

#[test]
fn non_finite_values_never_bin() {
    let table = EdgeTable::new(vec![1.0, 2.0]).unwrap();
    assert_eq!(table.bin(f64::NAN), None);
    assert_eq!(table.bin(f64::INFINITY), None);
    assert_eq!(table.bin(f64::NEG_INFINITY), Some(0));
}

#[test]
fn construction_validates_ordering() {
    assert!(EdgeTable::new(vec![]).is_err());
    assert!(EdgeTable::new(vec![1.0, 1.0]).is_err());
    assert!(EdgeTable::new(vec![2.0, 1.0]).is_err());
    assert!(EdgeTable::new(vec![0.0, f64::NAN]).is_err());
    assert!(EdgeTable::new(vec![5.0]).is_ok());
}

fn strictly_increasing(mut edges: Vec<f64>) -> Vec<f64> {
    edges.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap());
    edges.dedup();
    edges
}

proptest! {
    #[test]
    fn lookup_is_monotone(
        raw in prop::collection::vec(-1000.0f64..1000.0, 1..12),
        a in -1500.0f64..1500.0,
        b in -1500.0f64..1500.0,
    ) {
        let edges = strictly_increasing(raw);
        let table = EdgeTable::new(edges).unwrap();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        // None sorts above every bin: overflow only ever moves upward.
        let rank = |bin: Option<usize>| bin.unwrap_or(usize::MAX);
        prop_assert!(rank(table.bin(lo)) <= rank(table.bin(hi)));
    }

    #[test]
    fn overflow_iff_above_every_edge(
        raw in prop::collection::vec(-1000.0f64..1000.0, 1..12),
        value in -1500.0f64..1500.0,
    ) {
        let edges = strictly_increasing(raw);
        let last = *edges.last().unwrap();
        let table = EdgeTable::new(edges).unwrap();
        prop_assert_eq!(table.bin(value).is_none(), value > last);
    }
}
