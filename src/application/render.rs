/*
Tree rendering for hierarchies.

Type graphs are DAGs: a type reachable along several parents (diamonds) is
expanded under the first parent that reaches it and shown as a `Name (*)`
leaf everywhere else, so output stays linear in the number of edges.
 */
use std::collections::HashSet;

use termtree::Tree;

use crate::domain::{KindId, KindRegistry, TypeGraph, TypeId};

/// Suffix of a type already expanded elsewhere in the output
pub const SEEN_MARKER: &str = " (*)";

pub trait ToTree {
    fn to_trees(&self) -> Vec<Tree<String>>;
}

impl ToTree for TypeGraph {
    /// One tree per root type, children below their parents.
    fn to_trees(&self) -> Vec<Tree<String>> {
        fn build(graph: &TypeGraph, ty: TypeId, seen: &mut HashSet<TypeId>) -> Tree<String> {
            if !seen.insert(ty) {
                return Tree::new(format!("{}{}", graph.name(ty), SEEN_MARKER));
            }
            let leaves: Vec<_> = graph
                .children(ty)
                .into_iter()
                .map(|child| build(graph, child, &mut *seen))
                .collect();
            Tree::new(graph.name(ty).to_string()).with_leaves(leaves)
        }

        let mut seen = HashSet::new();
        self.roots()
            .into_iter()
            .map(|root| build(self, root, &mut seen))
            .collect()
    }
}

impl ToTree for KindRegistry {
    fn to_trees(&self) -> Vec<Tree<String>> {
        fn build(registry: &KindRegistry, kind: KindId) -> Tree<String> {
            let mut tree = Tree::new(registry.name(kind).to_string());
            for child in registry.children(kind) {
                tree.push(build(registry, child));
            }
            tree
        }

        vec![build(self, self.root())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::HierarchyBuilder;

    #[test]
    fn test_shared_types_are_expanded_once() {
        // two stacked diamonds: A < B,C < D < E,F < G
        let mut builder = HierarchyBuilder::new();
        builder.declare("A", Vec::<String>::new());
        builder.declare("B", ["A"]);
        builder.declare("C", ["A"]);
        builder.declare("D", ["B", "C"]);
        builder.declare("E", ["D"]);
        builder.declare("F", ["D"]);
        builder.declare("G", ["E", "F"]);
        let graph = builder.build().unwrap();

        let trees = graph.to_trees();

        assert_eq!(trees.len(), 1);
        let text = trees[0].to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 9, "{text}");
        assert_eq!(lines.iter().filter(|l| l.ends_with(" G")).count(), 1);
        assert!(text.contains("G (*)"));
        assert!(text.contains("D (*)"));
    }
}
