//! Score blending and winner selection.

use crate::candidate::Candidate;

/// Blend a candidate's own-name score with parent-level evidence.
///
/// `(own + parent * factor) / (1 + factor)`: at the default factor of 0.5
/// the parent contributes one third of the result, the candidate's own
/// score two thirds. Pure: each candidate blends with its own parent's
/// evidence, independent of the rest of the candidate set.
pub fn blend(own_score: f64, parent_score: f64, factor: f64) -> f64 {
    (own_score + parent_score * factor) / (1.0 + factor)
}

/// The highest-scoring candidate; ties keep the earliest one.
///
/// Relies on the strict comparison: a later candidate must beat, not
/// match, the current best, which makes selection deterministic given the
/// rank order from candidate selection.
pub(crate) fn pick_best(candidates: &[Candidate]) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;
    for candidate in candidates {
        match best {
            Some(current) if candidate.score > current.score => {
                best = Some(*candidate);
            }
            None => best = Some(*candidate),
            Some(_) => {}
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use orgraft_tree::OrgTree;

    #[test]
    fn blend_weights_parent_at_one_third() {
        assert_eq!(blend(90.0, 60.0, 0.5), 80.0);
        assert_eq!(blend(100.0, 100.0, 0.5), 100.0);
    }

    #[test]
    fn blend_with_zero_factor_keeps_own_score() {
        assert_eq!(blend(87.5, 10.0, 0.0), 87.5);
    }

    #[test]
    fn pick_best_prefers_higher_score() {
        let mut tree = OrgTree::new("r");
        let a = tree.add_child(tree.root(), "a").unwrap();
        let b = tree.add_child(tree.root(), "b").unwrap();

        let picked = pick_best(&[
            Candidate { node: a, score: 70.0 },
            Candidate { node: b, score: 80.0 },
        ])
        .unwrap();
        assert_eq!(picked.node, b);
    }

    #[test]
    fn pick_best_keeps_first_on_tie() {
        let mut tree = OrgTree::new("r");
        let a = tree.add_child(tree.root(), "a").unwrap();
        let b = tree.add_child(tree.root(), "b").unwrap();

        let picked = pick_best(&[
            Candidate { node: a, score: 80.0 },
            Candidate { node: b, score: 80.0 },
        ])
        .unwrap();
        assert_eq!(picked.node, a);
    }

    #[test]
    fn pick_best_of_empty_is_none() {
        assert!(pick_best(&[]).is_none());
    }
}
