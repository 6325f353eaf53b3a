use std::collections::BTreeSet;

use sxe_search::{decode_gradient, gradient_count};

fn decoded(dimensions: usize) -> Vec<Vec<i8>> {
    let count = gradient_count(dimensions).expect("count");
    (0..count)
        .map(|index| {
            let mut out = vec![0.0; dimensions];
            decode_gradient(index, &mut out);
            out.iter().map(|&c| c as i8).collect()
        })
        .collect()
}

#[test]
fn plane_has_axes_then_diagonals() {
    assert_eq!(
        decoded(2),
        vec![
            vec![0, -1],
            vec![0, 1],
            vec![-1, 0],
            vec![1, 0],
            vec![-1, -1],
            vec![1, -1],
            vec![-1, 1],
            vec![1, 1],
        ]
    );
}

#[test]
fn higher_dimensions_have_one_zero_each() {
    for dimensions in 3..=6 {
        let gradients = decoded(dimensions);
        assert_eq!(gradients.len() as u64, gradient_count(dimensions).unwrap());
        for gradient in &gradients {
            assert_eq!(gradient.iter().filter(|&&c| c == 0).count(), 1);
            assert!(gradient.iter().all(|&c| (-1..=1).contains(&c)));
        }
        let distinct: BTreeSet<_> = gradients.iter().cloned().collect();
        assert_eq!(distinct.len(), gradients.len(), "dimensions={dimensions}");
    }
}

#[test]
fn gradient_sets_are_closed_under_negation() {
    for dimensions in 2..=5 {
        let gradients: BTreeSet<_> = decoded(dimensions).into_iter().collect();
        for gradient in &gradients {
            let negated: Vec<i8> = gradient.iter().map(|c| -c).collect();
            assert!(gradients.contains(&negated));
        }
    }
}
