use dataviews::{
    kfold_indices, kfolds, sampleobs, shuffleobs, split_indices, splitobs, DataView, RngSource,
};

#[test]
fn splitobs_of_one_to_one_hundred_cuts_at_seventy_and_ninety() {
    let splits = splitobs(1..101, &[0.7, 0.2], false, RngSource::Default).unwrap();

    let materialized: Vec<Vec<usize>> = splits
        .iter()
        .map(|split| split.getobs_all().unwrap())
        .collect();

    assert_eq!(materialized.len(), 3);
    assert_eq!(materialized[0], (1..=70).collect::<Vec<_>>());
    assert_eq!(materialized[1], (71..=90).collect::<Vec<_>>());
    assert_eq!(materialized[2], (91..=100).collect::<Vec<_>>());
}

#[test]
fn split_sizes_follow_rounded_fractions() {
    let splits = split_indices(100, &[0.7, 0.2], false, RngSource::Default).unwrap();
    let sizes: Vec<usize> = splits.as_slice().iter().map(Vec::len).collect();

    assert_eq!(sizes, vec![70, 20, 10]);
}

#[test]
fn kfolds_of_ten_by_five_rotates_two_element_validations() {
    let folds = kfold_indices(10, 5).unwrap();
    assert_eq!(folds.len(), 5);

    for (fold, (train, validation)) in folds.as_slice().iter().enumerate() {
        assert_eq!(validation, &vec![2 * fold, 2 * fold + 1]);

        let mut union: Vec<usize> = train.as_slice().iter().chain(validation).copied().collect();
        union.sort_unstable();
        assert_eq!(union, (0..10).collect::<Vec<_>>());

        // No overlap within a pair: the union is exact, so sizes add up.
        assert_eq!(train.len() + validation.len(), 10);
    }
}

#[test]
fn kfolds_views_are_lazy_over_the_same_parent() {
    let data: Vec<i64> = (100..110).collect();
    let folds = kfolds(data, 5).unwrap();

    let (train, validation) = &folds[4];
    assert_eq!(validation.getobs_all().unwrap(), vec![108, 109]);
    assert_eq!(train.numobs(), 8);
}

#[test]
fn equal_seeds_shuffle_equally() {
    let a = shuffleobs((0..64).collect::<Vec<usize>>(), 5);
    let b = shuffleobs((0..64).collect::<Vec<usize>>(), 5);

    assert_eq!(
        a.getobs_all().unwrap(),
        b.getobs_all().unwrap()
    );
}

#[test]
fn sampled_views_stay_inside_the_parent() {
    let view = sampleobs((0..1000).collect::<Vec<usize>>(), 32, 11).unwrap();

    assert_eq!(view.numobs(), 32);
    for item in view.getobs_all().unwrap() {
        assert!(item < 1000);
    }
}
