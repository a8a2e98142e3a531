/// Ordered, deduplicating clue index
///
/// Unbalanced binary search tree over clue text, stored in an arena where
/// each parent owns its children by index. Ordering is byte-wise
/// lexicographic (`str` ordering); exact equality short-circuits insertion.
use std::cmp::Ordering;

#[derive(Debug, Clone)]
struct ClueNode {
    text: String,
    left: Option<usize>,
    right: Option<usize>,
}

/// Binary search tree of distinct clue texts
#[derive(Debug, Clone, Default)]
pub struct ClueIndex {
    nodes: Vec<ClueNode>,
    root: Option<usize>,
}

impl ClueIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a clue; returns false when an equal text is already indexed
    pub fn insert(&mut self, text: &str) -> bool {
        let new_index = self.nodes.len();

        let Some(mut current) = self.root else {
            self.nodes.push(ClueNode::leaf(text));
            self.root = Some(new_index);
            return true;
        };

        loop {
            let node = &mut self.nodes[current];
            let next = match text.cmp(node.text.as_str()) {
                Ordering::Equal => return false,
                Ordering::Less => &mut node.left,
                Ordering::Greater => &mut node.right,
            };
            match *next {
                Some(child) => current = child,
                None => {
                    *next = Some(new_index);
                    self.nodes.push(ClueNode::leaf(text));
                    return true;
                }
            }
        }
    }

    pub fn contains(&self, text: &str) -> bool {
        let mut current = self.root;
        while let Some(index) = current {
            let node = &self.nodes[index];
            current = match text.cmp(node.text.as_str()) {
                Ordering::Equal => return true,
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
        }
        false
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the tree in nodes (0 when empty)
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(usize, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();
        while let Some((index, level)) = stack.pop() {
            deepest = deepest.max(level);
            let node = &self.nodes[index];
            stack.extend(node.left.map(|c| (c, level + 1)));
            stack.extend(node.right.map(|c| (c, level + 1)));
        }
        deepest
    }

    /// Drop every clue
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// Lazy in-order traversal: ascending lexicographic order
    pub fn iter(&self) -> InOrder<'_> {
        let mut iter = InOrder {
            index: self,
            stack: Vec::new(),
        };
        iter.descend_left(self.root);
        iter
    }

    /// Check the search-tree ordering: every left descendant sorts strictly
    /// before its ancestor and every right descendant strictly after.
    pub fn is_well_ordered(&self) -> bool {
        // (node, exclusive lower bound, exclusive upper bound)
        let mut stack: Vec<(usize, Option<&str>, Option<&str>)> =
            self.root.map(|r| (r, None, None)).into_iter().collect();

        while let Some((index, low, high)) = stack.pop() {
            let node = &self.nodes[index];
            let text = node.text.as_str();
            if low.is_some_and(|l| text <= l) || high.is_some_and(|h| text >= h) {
                return false;
            }
            stack.extend(node.left.map(|c| (c, low, Some(text))));
            stack.extend(node.right.map(|c| (c, Some(text), high)));
        }
        true
    }
}

impl ClueNode {
    fn leaf(text: &str) -> Self {
        Self {
            text: text.to_string(),
            left: None,
            right: None,
        }
    }
}

/// In-order iterator over a `ClueIndex`
pub struct InOrder<'a> {
    index: &'a ClueIndex,
    stack: Vec<usize>,
}

impl<'a> InOrder<'a> {
    fn descend_left(&mut self, mut current: Option<usize>) {
        while let Some(node) = current {
            self.stack.push(node);
            current = self.index.nodes[node].left;
        }
    }
}

impl<'a> Iterator for InOrder<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        let node = &self.index.nodes[current];
        self.descend_left(node.right);
        Some(node.text.as_str())
    }
}

impl<'a> IntoIterator for &'a ClueIndex {
    type Item = &'a str;
    type IntoIter = InOrder<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<S: AsRef<str>> Extend<S> for ClueIndex {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for text in iter {
            self.insert(text.as_ref());
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for ClueIndex {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut index = ClueIndex::new();
        index.extend(iter);
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(index: &ClueIndex) -> Vec<&str> {
        index.iter().collect()
    }

    #[test]
    fn test_empty_index() {
        let index = ClueIndex::new();
        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
        assert_eq!(index.depth(), 0);
        assert_eq!(index.iter().next(), None);
        assert!(index.is_well_ordered());
    }

    #[test]
    fn test_in_order_is_sorted() {
        let index: ClueIndex = ["tire mark", "broken ashtray", "wet footprint", "crumpled note"]
            .into_iter()
            .collect();
        assert_eq!(
            collect(&index),
            vec!["broken ashtray", "crumpled note", "tire mark", "wet footprint"]
        );
    }

    #[test]
    fn test_duplicate_insert_is_noop() {
        let mut index = ClueIndex::new();
        assert!(index.insert("note"));
        assert!(index.insert("fingerprint"));
        assert!(!index.insert("note"));
        assert!(!index.insert("fingerprint"));
        assert_eq!(index.len(), 2);
        assert_eq!(collect(&index), vec!["fingerprint", "note"]);
    }

    #[test]
    fn test_duplicates_anywhere_match_single_insert() {
        let once: ClueIndex = ["m", "c", "x", "a"].into_iter().collect();
        let orders: [&[&str]; 3] = [
            &["m", "m", "c", "x", "a"],
            &["a", "m", "c", "a", "x", "m"],
            &["x", "c", "x", "a", "m", "c", "c"],
        ];
        for order in orders {
            let repeated: ClueIndex = order.iter().collect();
            assert_eq!(collect(&repeated), collect(&once));
            assert_eq!(repeated.len(), 4);
        }
    }

    #[test]
    fn test_ordering_invariant_after_mixed_inserts() {
        let mut index = ClueIndex::new();
        // Deterministic pseudo-random sequence with repeats
        let mut state: u32 = 7;
        for _ in 0..200 {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            let text = format!("clue-{}", (state >> 16) % 50);
            index.insert(&text);
            assert!(index.is_well_ordered());
        }
        let listed = collect(&index);
        let mut sorted = listed.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(listed, sorted);
    }

    #[test]
    fn test_comparison_is_case_and_byte_sensitive() {
        let index: ClueIndex = ["note", "Note", "note "].into_iter().collect();
        assert_eq!(index.len(), 3);
        assert_eq!(collect(&index), vec!["Note", "note", "note "]);
        assert!(index.contains("Note"));
        assert!(!index.contains("NOTE"));
    }

    #[test]
    fn test_sorted_insertion_degenerates_to_list() {
        let index: ClueIndex = ["a", "b", "c", "d", "e"].into_iter().collect();
        assert_eq!(index.depth(), 5);
        assert!(index.is_well_ordered());
    }

    #[test]
    fn test_iteration_is_restartable() {
        let index: ClueIndex = ["b", "a", "c"].into_iter().collect();
        let first: Vec<_> = index.iter().collect();
        let second: Vec<_> = (&index).into_iter().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_clear_resets_index() {
        let mut index: ClueIndex = ["b", "a"].into_iter().collect();
        index.clear();
        assert!(index.is_empty());
        assert!(index.insert("a"));
        assert_eq!(collect(&index), vec!["a"]);
    }
}
