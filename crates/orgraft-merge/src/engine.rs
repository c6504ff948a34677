//! The merge engine: traversal order, accept/reject, and structural folding.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use orgraft_index::NameIndex;
use orgraft_sim::SimilarityMatrix;
use orgraft_tree::{NameResolver, NodeId, OrgTree};

use crate::candidate::{select_candidates, Candidate};
use crate::config::MergeConfig;
use crate::error::{MergeError, MergeResult};
use crate::score::{blend, pick_best};

/// Counts of what one merge pass did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeOutcome {
    /// Source nodes processed.
    pub considered: usize,
    /// Source nodes folded into the base tree.
    pub merged: usize,
    /// Source nodes whose best candidate fell at or below the threshold.
    pub skipped: usize,
    /// Source nodes with no candidates at all.
    pub unmatched: usize,
    /// Child subtrees grafted into the base tree.
    pub grafted: usize,
}

/// Drives one merge of a source tree into a base tree.
///
/// Construction builds both name indexes and the full similarity matrix;
/// [`merge`] then walks the source tree and mutates the base tree in place.
/// The merger owns exclusive write access to both trees for its lifetime,
/// so merging several sources into one base is strictly sequential: each
/// later merge re-indexes the base and sees the earlier merges' effects.
///
/// [`merge`]: Merger::merge
pub struct Merger<'a> {
    base: &'a mut OrgTree,
    base_label: &'a str,
    source: &'a mut OrgTree,
    source_label: &'a str,
    resolver: &'a dyn NameResolver,
    config: MergeConfig,
    base_index: NameIndex,
    similarity: SimilarityMatrix,
}

impl<'a> Merger<'a> {
    /// Prepare a merge: index both trees and score all name pairs.
    pub fn new(
        base: &'a mut OrgTree,
        base_label: &'a str,
        source: &'a mut OrgTree,
        source_label: &'a str,
        resolver: &'a dyn NameResolver,
        config: MergeConfig,
    ) -> Self {
        let base_index = NameIndex::build(base, resolver, base_label);
        let source_index = NameIndex::build(source, resolver, source_label);
        let base_names: Vec<String> = base_index.names().map(str::to_owned).collect();
        let source_names: Vec<String> =
            source_index.names().map(str::to_owned).collect();

        info!(
            source = source_label,
            base = base_label,
            "scoring source names against the base tree"
        );
        let similarity = SimilarityMatrix::build(&source_names, &base_names);

        Self {
            base,
            base_label,
            source,
            source_label,
            resolver,
            config,
            base_index,
            similarity,
        }
    }

    /// Fold the source tree into the base tree.
    ///
    /// Source nodes are processed in reverse level order (deepest first,
    /// root last), so every descendant's decision is final before its
    /// ancestor is considered; an ancestor's merge only moves the children
    /// still directly attached to it. Decisions are never revisited, even
    /// when a later, shallower merge changes the parent context an earlier
    /// node was disambiguated against.
    pub fn merge(&mut self) -> MergeResult<MergeOutcome> {
        info!(
            source = self.source_label,
            "checking source nodes for matches in the base tree"
        );
        let mut order = self.source.level_order();
        order.reverse();

        let mut outcome = MergeOutcome::default();
        for node in order {
            outcome.considered += 1;
            let name = self
                .resolver
                .full_name(self.source, node, self.source_label);
            let mut candidates = select_candidates(
                &name,
                &self.similarity,
                &self.base_index,
                self.config.candidate_limit,
            )?;
            debug!(count = candidates.len(), name = %name, "candidates for source node");

            // "No candidates" is a boundary condition of its own; it is not
            // a low-confidence match.
            if candidates.is_empty() {
                outcome.unmatched += 1;
                debug!(name = %name, "no candidates; node stays in the source tree");
                continue;
            }

            self.apply_parent_evidence(&mut candidates, node)?;
            let Some(best) = pick_best(&candidates) else {
                outcome.unmatched += 1;
                continue;
            };

            if best.score > self.config.accept_threshold {
                info!(
                    score = best.score,
                    source = %name,
                    target = %best.node,
                    "merging source node into base"
                );
                self.apply_merge(node, best, &mut outcome)?;
                outcome.merged += 1;
            } else {
                outcome.skipped += 1;
                debug!(
                    score = best.score,
                    name = %name,
                    target = %best.node,
                    "skipped low-confidence candidate"
                );
            }
        }

        info!(
            merged = outcome.merged,
            skipped = outcome.skipped,
            unmatched = outcome.unmatched,
            grafted = outcome.grafted,
            "merge complete"
        );
        Ok(outcome)
    }

    /// Re-weight each candidate with the similarity of the parents' names.
    ///
    /// Applies only where both sides have a parent: a root source node and
    /// root candidates keep their own-name scores untouched. Every
    /// candidate blends against its own parent, so different candidates
    /// pull in different evidence.
    fn apply_parent_evidence(
        &self,
        candidates: &mut [Candidate],
        source_node: NodeId,
    ) -> MergeResult<()> {
        if self.source.is_root(source_node) {
            return Ok(());
        }
        let Some(source_parent) = self.source.parent(source_node) else {
            return Ok(());
        };
        let source_parent_name =
            self.resolver
                .full_name(self.source, source_parent, self.source_label);

        for candidate in candidates.iter_mut() {
            if self.base.is_root(candidate.node) {
                continue;
            }
            let Some(base_parent) = self.base.parent(candidate.node) else {
                continue;
            };
            let base_parent_name =
                self.resolver
                    .full_name(self.base, base_parent, self.base_label);
            let parent_score = self
                .similarity
                .score(&source_parent_name, &base_parent_name)
                .ok_or_else(|| MergeError::MissingScore {
                    source_name: source_parent_name.clone(),
                    base: base_parent_name.clone(),
                })?;

            let rescored = blend(candidate.score, parent_score, self.config.parent_factor);
            debug!(
                target = %candidate.node,
                own = candidate.score,
                parent = parent_score,
                rescored,
                "blended parent evidence"
            );
            candidate.score = rescored;
        }
        Ok(())
    }

    /// Commit an accepted match: transfer the attribute payload and graft
    /// the source node's remaining children under the selection.
    ///
    /// Children already merged by the earlier, deeper passes had their own
    /// subtrees moved then; whatever is still attached here follows the
    /// ancestor's match.
    fn apply_merge(
        &mut self,
        node: NodeId,
        best: Candidate,
        outcome: &mut MergeOutcome,
    ) -> MergeResult<()> {
        let payload = self
            .source
            .attr(node, self.source_label)
            .cloned()
            .unwrap_or(Value::Null);
        self.base.set_attr(best.node, self.source_label, payload)?;

        let children: Vec<NodeId> = self
            .source
            .children(node)
            .map(|c| c.to_vec())
            .unwrap_or_default();
        for child in children {
            debug!(child = %child, target = %best.node, "grafting child into base");
            self.base.adopt_subtree(&mut *self.source, child, best.node)?;
            outcome.grafted += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orgraft_tree::PathResolver;
    use serde_json::json;

    fn merge_with(
        base: &mut OrgTree,
        source: &mut OrgTree,
        config: MergeConfig,
    ) -> MergeOutcome {
        let resolver = PathResolver::default();
        let mut merger = Merger::new(base, "base", source, "src", &resolver, config);
        merger.merge().unwrap()
    }

    #[test]
    fn exact_match_merges_and_transfers_attributes() {
        let mut base = OrgTree::new("Department of Example");
        let mut source = OrgTree::new("Department Of Example");
        source
            .set_attr(source.root(), "src", json!({"head": "A. Example"}))
            .unwrap();

        let outcome = merge_with(&mut base, &mut source, MergeConfig::default());

        assert_eq!(outcome.merged, 1);
        assert_eq!(outcome.skipped, 0);
        assert_eq!(
            base.attr(base.root(), "src"),
            Some(&json!({"head": "A. Example"}))
        );
    }

    #[test]
    fn merge_without_payload_records_null_entry() {
        let mut base = OrgTree::new("Department of Example");
        let mut source = OrgTree::new("Department Of Example");

        merge_with(&mut base, &mut source, MergeConfig::default());

        assert_eq!(base.attr(base.root(), "src"), Some(&json!(null)));
    }

    // Long, shared child names carry enough own-level evidence to clear the
    // threshold even though the roots and therefore the parents disagree.
    fn scenario_trees() -> (OrgTree, OrgTree) {
        let alpha = "Bureau of Alpha Operations and Statistical Reporting Coordination";
        let beta = "Bureau of Beta Operations and Statistical Reporting Coordination";

        let mut base = OrgTree::new("Example Agency Listing");
        let parent = base
            .add_child(base.root(), "Department of Technical Services")
            .unwrap();
        base.add_child(parent, alpha).unwrap();
        base.add_child(parent, beta).unwrap();

        let mut source = OrgTree::new("Example Agency List");
        let s_parent = source
            .add_child(source.root(), "Department of Technical Services")
            .unwrap();
        let s_alpha = source.add_child(s_parent, alpha).unwrap();
        let s_beta = source.add_child(s_parent, beta).unwrap();
        source.set_attr(s_alpha, "src", json!("alpha payload")).unwrap();
        source.set_attr(s_beta, "src", json!("beta payload")).unwrap();

        (base, source)
    }

    #[test]
    fn children_merge_while_their_parent_is_skipped() {
        let (mut base, mut source) = scenario_trees();
        let outcome = merge_with(&mut base, &mut source, MergeConfig::default());

        // Both bureaus merge on their own evidence; the parent and the
        // root stay below the threshold.
        assert_eq!(outcome.merged, 2);
        assert_eq!(outcome.skipped, 2);
        assert_eq!(outcome.considered, 4);
        assert_eq!(outcome.grafted, 0);

        let parent = base.children(base.root()).unwrap()[0];
        let bureaus = base.children(parent).unwrap().to_vec();
        assert_eq!(base.attr(bureaus[0], "src"), Some(&json!("alpha payload")));
        assert_eq!(base.attr(bureaus[1], "src"), Some(&json!("beta payload")));
        assert_eq!(base.attr(parent, "src"), None);

        // The skipped parent keeps its subtree in the source tree.
        assert_eq!(source.node_count(), 4);
    }

    #[test]
    fn disjoint_trees_leave_base_unchanged() {
        let mut base = OrgTree::new("Example Agency Listing");
        let dept = base.add_child(base.root(), "Department of Things").unwrap();
        base.add_child(dept, "Bureau of Stuff").unwrap();
        let before = base.to_nested();

        let mut source = OrgTree::new("qqq www");
        let x = source.add_child(source.root(), "zzz kkk").unwrap();
        source.set_attr(x, "src", json!(1)).unwrap();

        let outcome = merge_with(&mut base, &mut source, MergeConfig::default());

        assert_eq!(outcome.merged, 0);
        assert_eq!(outcome.skipped, outcome.considered);
        assert_eq!(base.to_nested(), before);
    }

    // Resolver that ignores ancestry, so duplicate local names collide and
    // only parent evidence can separate them.
    struct LocalNameResolver;

    impl NameResolver for LocalNameResolver {
        fn full_name(&self, tree: &OrgTree, node: NodeId, _label: &str) -> String {
            tree.name(node).unwrap_or_default().to_string()
        }
    }

    #[test]
    fn parent_evidence_separates_duplicate_names() {
        let mut base = OrgTree::new("HQ");
        let r1 = base.add_child(base.root(), "Region 1").unwrap();
        let r2 = base.add_child(base.root(), "Region 2").unwrap();
        let c1 = base.add_child(r1, "Central Office").unwrap();
        let c2 = base.add_child(r2, "Central Office").unwrap();

        let mut source = OrgTree::new("Region 2");
        let office = source.add_child(source.root(), "Central Office").unwrap();
        source.set_attr(office, "src", json!("office payload")).unwrap();

        let resolver = LocalNameResolver;
        let mut merger = Merger::new(
            &mut base,
            "base",
            &mut source,
            "src",
            &resolver,
            MergeConfig::default(),
        );
        let outcome = merger.merge().unwrap();

        // Both base offices score 100 on their own name; the Region 2 one
        // wins on parent evidence even though the Region 1 one ranks first.
        assert_eq!(outcome.merged, 2);
        assert_eq!(base.attr(c2, "src"), Some(&json!("office payload")));
        assert_eq!(base.attr(c1, "src"), None);

        // The source root matched Region 2 and grafted its remaining child.
        assert_eq!(base.attr(r2, "src"), Some(&json!(null)));
        assert_eq!(base.children(r2).unwrap().len(), 2);
        assert_eq!(source.node_count(), 1);
    }

    #[test]
    fn raising_the_threshold_never_accepts_more() {
        let make_trees = || {
            let base = OrgTree::new("Department of Example Services Administrations");
            let source = OrgTree::new("Department of Example Services Administration");
            (base, source)
        };

        let (mut base, mut source) = make_trees();
        let low = merge_with(
            &mut base,
            &mut source,
            MergeConfig {
                accept_threshold: 95.0,
                ..MergeConfig::default()
            },
        );

        let (mut base, mut source) = make_trees();
        let high = merge_with(
            &mut base,
            &mut source,
            MergeConfig {
                accept_threshold: 99.0,
                ..MergeConfig::default()
            },
        );

        assert!(high.merged <= low.merged);
        assert_eq!(low.merged, 1);
        assert_eq!(high.merged, 0);
    }

    #[test]
    fn root_score_ignores_parent_factor() {
        let make_trees = || {
            let base = OrgTree::new("Department of Example Services Administrations");
            let source = OrgTree::new("Department of Example Services Administration");
            (base, source)
        };

        let (mut base, mut source) = make_trees();
        let modest = merge_with(
            &mut base,
            &mut source,
            MergeConfig {
                parent_factor: 0.0,
                ..MergeConfig::default()
            },
        );

        let (mut base, mut source) = make_trees();
        let extreme = merge_with(
            &mut base,
            &mut source,
            MergeConfig {
                parent_factor: 100.0,
                ..MergeConfig::default()
            },
        );

        assert_eq!(modest, extreme);
        assert_eq!(modest.merged, 1);
    }

    #[test]
    fn zero_candidate_limit_leaves_every_node_unmatched() {
        let (mut base, mut source) = scenario_trees();
        let before = base.to_nested();

        let outcome = merge_with(
            &mut base,
            &mut source,
            MergeConfig {
                candidate_limit: 0,
                ..MergeConfig::default()
            },
        );

        assert_eq!(outcome.unmatched, outcome.considered);
        assert_eq!(outcome.merged, 0);
        assert_eq!(base.to_nested(), before);
    }

    #[test]
    fn repeated_merges_are_byte_identical() {
        let run = || {
            let (mut base, mut source) = scenario_trees();
            let outcome = merge_with(&mut base, &mut source, MergeConfig::default());
            let json = serde_json::to_string(&base.to_nested()).unwrap();
            (outcome, json)
        };

        let (first_outcome, first_json) = run();
        let (second_outcome, second_json) = run();

        assert_eq!(first_outcome, second_outcome);
        assert_eq!(first_json, second_json);
    }
}
