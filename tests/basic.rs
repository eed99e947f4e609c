//! Basic test - just to prove the counter works

use tallycraft::WordTally;

#[test]
fn test_basic_scan_and_query() {
    let mut tally = WordTally::new(0).unwrap();

    tally.scan("Hello World").unwrap();

    assert_eq!(tally.total(), 2, "two tokens scanned");
    assert_eq!(tally.unique(), 2, "both tokens distinct");
}

#[test]
fn test_basic_add_and_snapshot() {
    let mut tally = WordTally::new(0).unwrap();

    tally.add("alpha").unwrap();
    tally.add("alpha").unwrap();
    tally.add("beta").unwrap();

    let entries = tally.snapshot().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].key, b"alpha");
    assert_eq!(entries[0].count, 2);
}

#[test]
fn test_empty_counter_is_well_formed() {
    let tally = WordTally::new(0).unwrap();

    assert!(tally.is_empty());
    assert_eq!(tally.total(), 0);
    assert_eq!(tally.unique(), 0);
    assert!(tally.snapshot().unwrap().is_empty());
    assert_eq!(tally.iter().count(), 0);
}
