//! Selector matching algorithm.

use super::{Combinator, Selector, SelectorList, SelectorPart, TypeSelector};
use crate::node::NodeId;
use crate::tree::DocumentTree;

/// Selector matching engine over a [`DocumentTree`].
pub struct SelectorMatcher;

impl SelectorMatcher {
    /// Check whether `node` matches any selector in the list.
    pub fn matches_list(tree: &DocumentTree, node: NodeId, list: &SelectorList) -> bool {
        list.selectors
            .iter()
            .any(|selector| Self::matches(tree, node, selector))
    }

    /// Check whether `node` matches a full selector, combinators included.
    ///
    /// Ancestors are taken from the whole tree, not only from the subtree a
    /// query started at.
    fn matches(tree: &DocumentTree, node: NodeId, selector: &Selector) -> bool {
        match selector.parts.len() {
            0 => false,
            len => Self::matches_from(tree, node, selector, len - 1),
        }
    }

    /// Match `selector.parts[..=index]` with `node` as the subject of `parts[index]`.
    ///
    /// Backtracks over descendant combinators so that mixed chains such as
    /// `.a > .b .c` are matched exactly.
    fn matches_from(tree: &DocumentTree, node: NodeId, selector: &Selector, index: usize) -> bool {
        if !Self::part_matches(tree, node, &selector.parts[index]) {
            return false;
        }
        if index == 0 {
            return true;
        }

        let parent = tree.parent(node).ok().flatten();
        match selector.combinators[index - 1] {
            Combinator::Child => {
                parent.is_some_and(|p| Self::matches_from(tree, p, selector, index - 1))
            }
            Combinator::Descendant => {
                let mut current = parent;
                while let Some(ancestor) = current {
                    if Self::matches_from(tree, ancestor, selector, index - 1) {
                        return true;
                    }
                    current = tree.parent(ancestor).ok().flatten();
                }
                false
            }
        }
    }

    /// Check if a compound selector part matches the node on its own.
    fn part_matches(tree: &DocumentTree, node: NodeId, part: &SelectorPart) -> bool {
        let Ok(data) = tree.node(node) else {
            return false;
        };

        // Check type selector
        if let Some(TypeSelector::Type(name)) = &part.type_selector
            && *name != data.tag
        {
            return false;
        }

        // Check ID selector
        if let Some(id) = &part.id
            && data.attribute("id") != Some(id.as_str())
        {
            return false;
        }

        // Check class selectors (all must match)
        if !part.classes.iter().all(|class| data.has_class(class)) {
            return false;
        }

        // Check attribute selectors (all must match)
        part.attributes
            .iter()
            .all(|attr| attr.matches(tree.attribute(node, &attr.name).ok().flatten().as_deref()))
    }
}
