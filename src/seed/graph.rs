//! Stage ordering derived from the foreign-key graph.
//!
//! Insertion runs parents before children; cleanup runs the exact reverse.

use demo_data_gen::EntityKind;
use std::collections::VecDeque;

/// Fixed insertion order of the seeding stages
pub const STAGE_ORDER: [EntityKind; 7] = [
    EntityKind::Prospect,
    EntityKind::EnrichmentData,
    EntityKind::EngagementScore,
    EntityKind::Campaign,
    EntityKind::Message,
    EntityKind::Interaction,
    EntityKind::AgentLog,
];

/// Deletion order: children before parents
pub fn cleanup_order() -> Vec<EntityKind> {
    STAGE_ORDER.iter().rev().copied().collect()
}

/// Kahn topological sort of `kinds` over their FK references.
///
/// Ties are broken by position in `kinds`, so a list that is already a
/// valid order comes back unchanged. Kinds caught in a cycle are appended
/// at the end in input order.
pub fn dependency_order(kinds: &[EntityKind]) -> Vec<EntityKind> {
    let n = kinds.len();
    let index_of = |kind: EntityKind| kinds.iter().position(|k| *k == kind);

    let mut in_degree = vec![0usize; n];
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); n];
    for (child, kind) in kinds.iter().enumerate() {
        for parent in kind.references() {
            if let Some(p) = index_of(parent) {
                if p != child {
                    in_degree[child] += 1;
                    children[p].push(child);
                }
            }
        }
    }

    let mut queue: VecDeque<usize> = (0..n).filter(|&i| in_degree[i] == 0).collect();
    let mut order = Vec::with_capacity(n);
    let mut placed = vec![false; n];

    while let Some(i) = queue.pop_front() {
        order.push(kinds[i]);
        placed[i] = true;
        for &c in &children[i] {
            in_degree[c] -= 1;
            if in_degree[c] == 0 {
                // Keep the queue sorted by input position
                let at = queue.iter().position(|&q| q > c).unwrap_or(queue.len());
                queue.insert(at, c);
            }
        }
    }

    order.extend((0..n).filter(|&i| !placed[i]).map(|i| kinds[i]));
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_order_matches_fk_graph() {
        assert_eq!(dependency_order(&STAGE_ORDER), STAGE_ORDER.to_vec());
    }

    #[test]
    fn test_parents_precede_children() {
        for (i, kind) in STAGE_ORDER.iter().enumerate() {
            for parent in kind.references() {
                let p = STAGE_ORDER.iter().position(|k| *k == parent).unwrap();
                assert!(p < i, "{} must come after {}", kind, parent);
            }
        }
    }

    #[test]
    fn test_sort_reorders_scrambled_input() {
        let scrambled = [
            EntityKind::Message,
            EntityKind::AgentLog,
            EntityKind::Interaction,
            EntityKind::Campaign,
            EntityKind::Prospect,
        ];
        let order = dependency_order(&scrambled);
        assert_eq!(
            order,
            vec![
                EntityKind::AgentLog,
                EntityKind::Campaign,
                EntityKind::Prospect,
                EntityKind::Message,
                EntityKind::Interaction,
            ]
        );
    }

    #[test]
    fn test_cleanup_is_reverse() {
        let cleanup = cleanup_order();
        assert_eq!(cleanup.first(), Some(&EntityKind::AgentLog));
        assert_eq!(cleanup.last(), Some(&EntityKind::Prospect));
        for (i, kind) in cleanup.iter().enumerate() {
            for parent in kind.references() {
                let p = cleanup.iter().position(|k| *k == parent).unwrap();
                assert!(p > i, "{} must be deleted before {}", kind, parent);
            }
        }
    }
}
