//! Opening-name lineage by breadth-first search from the starting position.
//!
//! A position inherits the name of its closest named ancestor. Names reset
//! lineage: the children of a named position carry exactly that one name,
//! and unnamed positions pass their own lineage through unchanged. When
//! several parents reach the same position their names are merged, in the
//! order the queue delivers them.
//!
//! Each position is expanded once, from the first queue entry that reaches
//! it. A duplicate entry processed later only adds its names to that
//! position's reported lineage; those names are not pushed down to
//! children that were already queued.

use std::collections::{HashMap, VecDeque};

use tracing::debug;

use crate::catalog::PositionCatalog;
use crate::error::OracleError;
use crate::oracle::RulesOracle;

/// Inherited ancestor names by identity. Only reachable cataloged positions
/// (and the root) have an entry.
pub type Lineage = HashMap<String, Vec<String>>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PropagationStats {
    /// Positions whose children were enumerated.
    pub expanded: usize,
    /// Queue entries that reached an already-visited position.
    pub merged: usize,
}

struct QueuedNode {
    identity: String,
    named_parents: Vec<String>,
}

pub fn propagate<O: RulesOracle>(
    root: &str,
    catalog: &PositionCatalog,
    oracle: &O,
) -> Result<(Lineage, PropagationStats), OracleError> {
    let mut queue = VecDeque::from([QueuedNode {
        identity: root.to_string(),
        named_parents: Vec::new(),
    }]);
    let mut visited: Lineage = HashMap::new();
    let mut stats = PropagationStats::default();

    while let Some(node) = queue.pop_front() {
        if let Some(lineage) = visited.get_mut(&node.identity) {
            // Queued more than once before being visited: merge the parents.
            for name in node.named_parents {
                if !lineage.contains(&name) {
                    lineage.push(name);
                }
            }
            stats.merged += 1;
            continue;
        }

        visited.insert(node.identity.clone(), node.named_parents.clone());
        stats.expanded += 1;

        let inherited = match catalog.name(&node.identity) {
            Some(name) => vec![name.to_string()],
            None => node.named_parents,
        };

        let mut children: Vec<(u64, QueuedNode)> = Vec::new();
        for mv in oracle.legal_moves(&node.identity)? {
            if visited.contains_key(&mv.resulting_identity) {
                continue;
            }
            let Some(frequency) = catalog.frequency(&mv.resulting_identity) else {
                continue;
            };
            children.push((
                frequency,
                QueuedNode {
                    identity: mv.resulting_identity,
                    named_parents: inherited.clone(),
                },
            ));
        }

        // Stable: equally frequent siblings keep move-generation order.
        children.sort_by(|a, b| b.0.cmp(&a.0));
        queue.extend(children.into_iter().map(|(_, child)| child));
    }

    debug!(
        expanded = stats.expanded,
        merged = stats.merged,
        "Propagated opening names"
    );

    Ok((visited, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::{LegalMove, Side};
    use std::cell::RefCell;

    /// Graph oracle that records how often each position is expanded.
    #[derive(Default)]
    struct GraphOracle {
        edges: HashMap<&'static str, Vec<&'static str>>,
        expansions: RefCell<HashMap<String, usize>>,
    }

    impl GraphOracle {
        fn new(edges: &[(&'static str, &'static str)]) -> Self {
            let mut oracle = Self::default();
            for (from, to) in edges {
                oracle.edges.entry(*from).or_default().push(*to);
            }
            oracle
        }
    }

    impl RulesOracle for GraphOracle {
        fn legal_moves(&self, identity: &str) -> Result<Vec<LegalMove>, OracleError> {
            *self.expansions.borrow_mut().entry(identity.to_string()).or_default() += 1;
            Ok(self
                .edges
                .get(identity)
                .into_iter()
                .flatten()
                .map(|to| LegalMove {
                    notation: format!("to-{to}"),
                    resulting_identity: to.to_string(),
                })
                .collect())
        }

        fn is_terminal(&self, identity: &str) -> Result<bool, OracleError> {
            Ok(!self.edges.contains_key(identity))
        }

        fn winner(&self, _: &str) -> Result<Option<Side>, OracleError> {
            Ok(None)
        }

        fn side_to_move(&self, _: &str) -> Result<Side, OracleError> {
            Ok(Side::Maximizing)
        }
    }

    fn catalog(positions: &[(&str, u64)], names: &[(&str, &str)]) -> PositionCatalog {
        let mut catalog = PositionCatalog::new();
        for (id, freq) in positions {
            catalog.insert_position(*id, *freq);
        }
        for (id, name) in names {
            catalog.insert_name(*id, *name);
        }
        catalog
    }

    #[test]
    fn test_named_parent_resets_lineage() {
        let oracle = GraphOracle::new(&[("root", "a"), ("a", "b"), ("b", "c")]);
        let catalog = catalog(
            &[("a", 10), ("b", 9), ("c", 8)],
            &[("root", "Start"), ("b", "Named B")],
        );

        let (lineage, _) = propagate("root", &catalog, &oracle).unwrap();
        assert_eq!(lineage["root"], Vec::<String>::new());
        assert_eq!(lineage["a"], vec!["Start"]);
        assert_eq!(lineage["b"], vec!["Start"]);
        assert_eq!(lineage["c"], vec!["Named B"]);
    }

    #[test]
    fn test_uncataloged_positions_gate_traversal() {
        let oracle = GraphOracle::new(&[("root", "a"), ("root", "x"), ("x", "y")]);
        let catalog = catalog(&[("a", 10), ("y", 5)], &[]);

        let (lineage, _) = propagate("root", &catalog, &oracle).unwrap();
        assert!(lineage.contains_key("a"));
        assert!(!lineage.contains_key("x"));
        assert!(!lineage.contains_key("y"));
    }

    #[test]
    fn test_converging_paths_merge_and_expand_once() {
        let oracle = GraphOracle::new(&[
            ("root", "p"),
            ("root", "q"),
            ("p", "t"),
            ("q", "t"),
            ("t", "u"),
        ]);
        let catalog = catalog(
            &[("p", 100), ("q", 50), ("t", 40), ("u", 30)],
            &[("p", "P Opening"), ("q", "Q Opening")],
        );

        let (lineage, stats) = propagate("root", &catalog, &oracle).unwrap();
        assert_eq!(lineage["t"], vec!["P Opening", "Q Opening"]);
        // u was queued from t's first expansion, before Q's name arrived.
        assert_eq!(lineage["u"], vec!["P Opening"]);
        assert_eq!(stats.merged, 1);
        assert!(oracle.expansions.borrow().values().all(|&n| n == 1));
    }

    #[test]
    fn test_siblings_sorted_by_frequency() {
        // Both children lead to t; the more frequent sibling is visited first
        // so its name comes first in the merged lineage.
        let oracle = GraphOracle::new(&[
            ("root", "rare"),
            ("root", "common"),
            ("rare", "t"),
            ("common", "t"),
        ]);
        let catalog = catalog(
            &[("rare", 1), ("common", 99), ("t", 5)],
            &[("rare", "Rare Line"), ("common", "Main Line")],
        );

        let (lineage, _) = propagate("root", &catalog, &oracle).unwrap();
        assert_eq!(lineage["t"], vec!["Main Line", "Rare Line"]);
    }

    #[test]
    fn test_duplicate_names_are_not_repeated() {
        let oracle = GraphOracle::new(&[("root", "p"), ("root", "q"), ("p", "t"), ("q", "t")]);
        let catalog = catalog(&[("p", 2), ("q", 1), ("t", 1)], &[("root", "Start")]);

        let (lineage, _) = propagate("root", &catalog, &oracle).unwrap();
        assert_eq!(lineage["t"], vec!["Start"]);
    }
}
