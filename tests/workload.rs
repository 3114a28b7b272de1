//! Tests for the synthetic task source and its duration tiers.

use fanout::task;

#[test]
fn generate_yields_dense_ordered_ids() {
    let tasks = task::generate(50);
    assert_eq!(tasks.len(), 50);
    for (i, t) in tasks.iter().enumerate() {
        assert_eq!(t.id, i);
        assert_eq!(t.data, format!("task data {i}"));
    }
}

#[test]
fn generate_is_restartable() {
    assert_eq!(task::generate(50), task::generate(50));
    assert!(task::generate(0).is_empty());
}

#[test]
fn duration_tiers_step_at_every_tenth_and_hundredth_id() {
    let heaviest = task::duration_for(0);
    let heavy = task::duration_for(10);
    let base = task::duration_for(1);
    assert!(heaviest > heavy && heavy > base);

    // The hundredth-id tier supersedes the tenth-id tier.
    assert_eq!(task::duration_for(100), heaviest);
    assert_eq!(task::duration_for(110), heavy);

    let mut counts = (0, 0, 0);
    for id in 0..100 {
        let d = task::duration_for(id);
        if d == heaviest {
            counts.0 += 1;
        } else if d == heavy {
            counts.1 += 1;
        } else {
            counts.2 += 1;
        }
    }
    assert_eq!(counts, (1, 9, 90));
}
