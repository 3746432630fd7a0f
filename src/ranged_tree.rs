use core::cmp::Ordering::{self, Less, Greater, Equal};
use core::fmt::Debug;
use core::iter::FromIterator;
use core::mem;
use core::ops::Index;
use log::{debug, trace};
use crate::element::Element;
use crate::entry::{Entry, RangedEntry, SingleEntry};
use crate::error::Error;
use crate::node::{Cover, Node};

mod balance;




/**
 * A height-balanced binary search tree answering whether an element is covered
 * by any of the single values or inclusive ranges inserted into it. The tree is
 * a set of points: inserting something already covered changes nothing, and
 * overlapping or adjacent ranges are merged into one interval node.
 *
 * Nodes are held in an arena and linked by index, so `clone` produces a fully
 * independent deep copy.
 */
#[derive(Clone, Debug)]
pub struct RangedTree<T> {
    root: Option<usize>,
    nodes: Vec<Node<T>>,
}




// ============================================================================
impl<T: Element> RangedTree<T> {

    pub fn new() -> Self {
        Self { root: None, nodes: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /**
     * Return the number of nodes in the tree. A merged range counts once.
     */
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn height(&self) -> usize {
        self.height_of(self.root)
    }




    /**
     * Return true if `obj` equals an inserted value or lies within an
     * inserted range. Takes `O(log n)` comparisons and does not allocate.
     */
    pub fn contains(&self, obj: T) -> bool {
        let mut cursor = self.root;

        while let Some(node) = cursor.map(|id| &self.nodes[id]) {
            cursor = match node.cover.locate(&obj) {
                Less    => node.l,
                Greater => node.r,
                Equal   => return true,
            }
        }
        false
    }




    /**
     * Insert a single value or a range. Anything already covered is a no-op.
     */
    pub fn insert<E: Into<Entry<T>>>(&mut self, entry: E) {
        match entry.into() {
            Entry::Single(SingleEntry { value }) => self.insert_value(value),
            Entry::Ranged(range) => self.insert_interval(range.start(), range.end()),
        }
    }




    /**
     * Insert the inclusive range `start..=end`. Fails without touching the
     * tree if `start > end`.
     */
    pub fn insert_range(&mut self, start: T, end: T) -> Result<(), Error>
    where
        T: Debug,
    {
        let entry = RangedEntry::new(start, end)?;
        self.insert(entry);
        Ok(())
    }




    /**
     * Move the contents out of this tree, leaving it empty.
     */
    pub fn take(&mut self) -> Self {
        mem::take(self)
    }




    // ========================================================================
    fn insert_value(&mut self, value: T) {
        let mut parent = None;
        let mut side = Equal;
        let mut cursor = self.root;

        while let Some(id) = cursor {
            side = self.nodes[id].cover.locate(&value);
            parent = Some(id);
            cursor = match side {
                Less    => self.nodes[id].l,
                Greater => self.nodes[id].r,
                Equal   => return,
            }
        }
        self.attach(parent, side, Cover::Value(value));
        self.rebalance_from(parent);
    }

    fn insert_interval(&mut self, start: T, end: T) {
        let mut parent = None;
        let mut side = Equal;
        let mut cursor = self.root;

        while let Some(id) = cursor {
            side = self.nodes[id].cover.locate_interval(start, end);
            parent = Some(id);
            cursor = match side {
                Less    => self.nodes[id].l,
                Greater => self.nodes[id].r,
                Equal   => return self.widen(id, start, end),
            }
        }
        self.attach(parent, side, Cover::Interval(start, end));
        self.rebalance_from(parent);
    }




    /**
     * Push a new leaf into the arena and link it below `parent` on the given
     * side (or make it the root).
     */
    fn attach(&mut self, parent: Option<usize>, side: Ordering, cover: Cover<T>) -> usize {
        let id = self.nodes.len();
        self.nodes.push(Node::new(cover, parent));

        match parent {
            None => {
                self.root = Some(id)
            }
            Some(p) => {
                if side == Less {
                    self.nodes[p].l = Some(id)
                } else {
                    self.nodes[p].r = Some(id)
                }
            }
        }
        trace!("attach node {} below {:?}", id, parent);
        id
    }




    /**
     * Grow the cover of node `id` to include `start..=end`. The node keeps its
     * place in the tree; any in-order neighbour the grown cover now reaches is
     * folded into it and unlinked, one at a time, until neither neighbour
     * touches.
     */
    fn widen(&mut self, mut id: usize, start: T, end: T) {
        let old = self.nodes[id].cover;

        if old.includes(start, end) {
            return
        }
        self.nodes[id].cover = old.union(start, end);

        loop {
            let cover = self.nodes[id].cover;
            let neighbour = self
                .predecessor(id)
                .filter(|&n| self.nodes[n].cover.touches(&cover))
                .or_else(|| self.successor(id).filter(|&n| self.nodes[n].cover.touches(&cover)));

            match neighbour {
                Some(n) => {
                    let absorbed = self.nodes[n].cover;
                    self.nodes[id].cover = cover.union(absorbed.lower(), absorbed.upper());
                    id = self.unlink(n, id);
                    debug!("node {} absorbed a neighbour, {} nodes left", id, self.nodes.len());
                }
                None => break,
            }
        }
    }

    fn predecessor(&self, id: usize) -> Option<usize> {
        if let Some(mut n) = self.nodes[id].l {
            while let Some(r) = self.nodes[n].r {
                n = r
            }
            return Some(n)
        }
        let mut child = id;
        let mut parent = self.nodes[id].parent;

        while let Some(p) = parent {
            if self.nodes[p].r == Some(child) {
                return Some(p)
            }
            child = p;
            parent = self.nodes[p].parent;
        }
        None
    }

    fn successor(&self, id: usize) -> Option<usize> {
        if let Some(mut n) = self.nodes[id].r {
            while let Some(l) = self.nodes[n].l {
                n = l
            }
            return Some(n)
        }
        let mut child = id;
        let mut parent = self.nodes[id].parent;

        while let Some(p) = parent {
            if self.nodes[p].l == Some(child) {
                return Some(p)
            }
            child = p;
            parent = self.nodes[p].parent;
        }
        None
    }




    // ========================================================================
    #[cfg(test)]
    pub(crate) fn validate(&self) {
        self.validate_links();
        self.validate_heights();
        self.validate_order();
    }

    /**
     * Panic unless every child points back at its parent and every node is
     * reachable from the root.
     */
    #[cfg(test)]
    fn validate_links(&self) {
        let mut visited = 0;
        let mut stack: Vec<_> = self.root.into_iter().collect();

        if let Some(root) = self.root {
            assert_eq!(self.nodes[root].parent, None, "root has a parent");
        }
        while let Some(id) = stack.pop() {
            visited += 1;
            for child in self.nodes[id].l.into_iter().chain(self.nodes[id].r) {
                if self.nodes[child].parent != Some(id) {
                    panic!("parent link out of sync with child link")
                }
                stack.push(child)
            }
        }
        assert_eq!(visited, self.nodes.len(), "unreachable nodes in arena");
    }

    /**
     * Panic unless every cached height is correct and every balance factor
     * is within one.
     */
    #[cfg(test)]
    fn validate_heights(&self) {
        for id in 0..self.nodes.len() {
            let node = &self.nodes[id];
            let height = 1 + self.height_of(node.l).max(self.height_of(node.r));

            if node.height != height {
                panic!("stored height out of sync with sub-tree")
            }
            if self.balance_factor(id).abs() > 1 {
                panic!("unbalanced node")
            }
        }
    }

    /**
     * Return every node's cover, in order.
     */
    #[cfg(test)]
    fn sorted_covers(&self) -> Vec<Cover<T>> {
        let mut covers = Vec::with_capacity(self.nodes.len());
        let mut stack = Vec::new();
        let mut cursor = self.root;

        loop {
            while let Some(id) = cursor {
                stack.push(id);
                cursor = self.nodes[id].l;
            }
            match stack.pop() {
                Some(id) => {
                    covers.push(self.nodes[id].cover);
                    cursor = self.nodes[id].r;
                }
                None => break,
            }
        }
        covers
    }

    /**
     * Panic unless the covers are strictly ordered and pairwise disjoint.
     */
    #[cfg(test)]
    fn validate_order(&self) {
        let covers = self.sorted_covers();

        for pair in covers.windows(2) {
            if pair[0].upper() >= pair[1].lower() {
                panic!("unordered node")
            }
        }
    }
}




// ============================================================================
impl<T: Element> Default for RangedTree<T> {
    fn default() -> Self {
        Self::new()
    }
}




// ============================================================================
impl<T: Element> Extend<Entry<T>> for RangedTree<T> {
    fn extend<I: IntoIterator<Item = Entry<T>>>(&mut self, iter: I) {
        for entry in iter {
            self.insert(entry)
        }
    }
}




// ============================================================================
impl<T: Element> FromIterator<Entry<T>> for RangedTree<T> {
    fn from_iter<I: IntoIterator<Item = Entry<T>>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}




// ============================================================================
impl<T: Element> Index<T> for RangedTree<T> {
    type Output = bool;

    fn index(&self, obj: T) -> &bool {
        if self.contains(obj) {
            &true
        } else {
            &false
        }
    }
}




// ============================================================================
#[cfg(test)]
mod test {

    use crate::element::Element;
    use crate::entry::{Entry, RangedEntry, SingleEntry};
    use crate::error::Error;
    use super::RangedTree;

    /**
     * A simple deterministic linear congruential generator:
     *
     * https://en.wikipedia.org/wiki/Linear_congruential_generator
     */
    fn stupid_random_values(len: usize, mut seed: usize, modulus: usize) -> Vec<usize> {
        let mut values = Vec::new();
        let a = 1103515245;
        let c = 12345;
        let m = 1 << 31;
        for _ in 0..len {
            seed = (a * seed + c) % m;
            values.push(seed % modulus)
        }
        values
    }

    fn stupid_random_ranges(len: usize, seed: usize) -> Vec<(usize, usize)> {
        stupid_random_values(len, seed, 1000)
            .into_iter()
            .zip(stupid_random_values(len, seed + 1, 12))
            .map(|(start, width)| (start, start + width))
            .collect()
    }

    #[test]
    fn empty_tree_contains_nothing() {
        let tree = RangedTree::<char>::new();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.height(), 0);
        assert!(!tree.contains('a'));
        assert!(!tree['a']);
    }

    #[test]
    fn single_entries_are_found() {
        let mut tree = RangedTree::new();
        tree.insert(SingleEntry::new('c'));
        tree.insert(SingleEntry::new('a'));
        tree.insert(SingleEntry::new('e'));
        assert!(tree.contains('a'));
        assert!(tree.contains('c'));
        assert!(tree.contains('e'));
        assert!(!tree.contains('b'));
        assert!(!tree.contains('d'));
        tree.validate();
    }

    #[test]
    fn ranged_entry_covers_every_element_inside() {
        let mut tree = RangedTree::new();
        tree.insert(RangedEntry::new('a', 'z').unwrap());
        assert!(tree.contains('m'));
        assert!(tree.contains('a'));
        assert!(tree.contains('z'));
        assert!(!tree.contains('A'));
        assert!(!tree.contains('{'));
        assert!(tree['m']);
        assert!(!tree['A']);
    }

    #[test]
    fn membership_is_independent_of_insertion_order() {
        let values = stupid_random_values(500, 42, 2000);
        let forward: RangedTree<_> = values.iter().copied().map(Entry::single).collect();
        let reverse: RangedTree<_> = values.iter().rev().copied().map(Entry::single).collect();

        for x in 0..2000 {
            assert_eq!(forward.contains(x), values.contains(&x));
            assert_eq!(reverse.contains(x), values.contains(&x));
        }
        forward.validate();
        reverse.validate();
    }

    #[test]
    fn duplicate_single_entries_are_ignored() {
        let mut tree = RangedTree::new();
        tree.insert(SingleEntry::new(7));
        tree.insert(SingleEntry::new(3));
        let len = tree.len();
        let height = tree.height();
        tree.insert(SingleEntry::new(7));
        tree.insert(SingleEntry::new(3));
        assert_eq!(tree.len(), len);
        assert_eq!(tree.height(), height);
        assert!(tree.contains(7));
        assert!(!tree.contains(5));
    }

    #[test]
    fn values_inside_a_range_are_already_covered() {
        let mut tree = RangedTree::new();
        tree.insert_range(10, 20).unwrap();
        tree.insert(SingleEntry::new(15));
        tree.insert_range(12, 18).unwrap();
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn overlapping_ranges_coalesce() {
        let mut tree = RangedTree::new();
        tree.insert_range(1, 5).unwrap();
        tree.insert_range(3, 8).unwrap();
        assert_eq!(tree.len(), 1);
        assert!((1..=8).all(|x| tree.contains(x)));
        assert!(!tree.contains(0));
        assert!(!tree.contains(9));
    }

    #[test]
    fn adjacent_ranges_coalesce() {
        let mut tree = RangedTree::new();
        tree.insert_range('a', 'f').unwrap();
        tree.insert_range('g', 'z').unwrap();
        assert_eq!(tree.len(), 1);
        assert!(tree.contains('f'));
        assert!(tree.contains('g'));
    }

    #[test]
    fn bridging_range_merges_neighbours() {
        let mut tree = RangedTree::new();
        tree.insert_range(0, 2).unwrap();
        tree.insert_range(10, 12).unwrap();
        tree.insert_range(20, 22).unwrap();
        tree.insert(SingleEntry::new(30));
        tree.insert(SingleEntry::new(15));
        assert_eq!(tree.len(), 5);

        tree.insert_range(2, 21).unwrap();
        assert_eq!(tree.len(), 2);
        assert!((0..=22).all(|x| tree.contains(x)));
        assert!(tree.contains(30));
        assert!(!tree.contains(23));
        tree.validate();
    }

    #[test]
    fn bridging_ranges_absorb_neighbours_one_by_one() {
        let n = 300;
        let mut tree: RangedTree<_> = (0..n).map(|k| Entry::single(4 * k)).collect();
        assert_eq!(tree.len(), n);

        for k in 0..n - 1 {
            tree.insert_range(4 * k + 1, 4 * k + 3).unwrap();
            assert_eq!(tree.len(), n - k - 1);
            tree.validate();
        }
        assert_eq!(tree.len(), 1);
        assert!((0..=4 * (n - 1)).all(|x| tree.contains(x)));
        assert!(!tree.contains(4 * n - 3));
    }

    #[test]
    fn wide_range_absorbs_both_sides() {
        let mut tree: RangedTree<_> = (0..100).map(|k| Entry::ranged(10 * k, 10 * k + 3).unwrap()).collect();
        tree.insert(SingleEntry::new(5000));
        tree.insert_range(204, 719).unwrap();
        assert_eq!(tree.len(), 100 - 53 + 1 + 1);
        assert!((200..=723).all(|x| tree.contains(x)));
        assert!(!tree.contains(724));
        assert!(!tree.contains(199));
        assert!(tree.contains(5000));
        tree.validate();
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
    struct Opaque(i32);

    impl Element for Opaque {}

    #[test]
    fn non_discrete_ranges_merge_only_on_overlap() {
        let mut tree = RangedTree::new();
        tree.insert_range(Opaque(1), Opaque(2)).unwrap();
        tree.insert_range(Opaque(3), Opaque(4)).unwrap();
        assert_eq!(tree.len(), 2);
        assert!(tree.contains(Opaque(2)));
        assert!(tree.contains(Opaque(3)));
        assert!(!tree.contains(Opaque(5)));
        tree.validate();

        let mut tree = RangedTree::new();
        tree.insert_range(Opaque(1), Opaque(3)).unwrap();
        tree.insert_range(Opaque(3), Opaque(4)).unwrap();
        assert_eq!(tree.len(), 1);
        assert!((1..=4).all(|x| tree.contains(Opaque(x))));
        tree.validate();
    }

    #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    struct Plain(u8);

    impl Element for Plain {}

    #[test]
    fn elements_need_not_be_debug() {
        let tree: RangedTree<_> = [Plain(3), Plain(1), Plain(2)].iter().copied().map(Entry::single).collect();
        assert_eq!(tree.len(), 3);
        assert!(tree.contains(Plain(1)));
        assert!(!tree.contains(Plain(4)));
    }

    #[test]
    fn range_absorbs_values_it_covers() {
        let mut tree: RangedTree<_> = (0..64).map(|x| Entry::single(x * 2)).collect();
        tree.insert_range(10, 20).unwrap();
        assert!((10..=20).all(|x| tree.contains(x)));
        assert!(!tree.contains(21));
        assert!(tree.contains(22));
        assert!(!tree.contains(9));
        assert_eq!(tree.len(), 64 - 6 + 1);
        tree.validate();
    }

    #[test]
    fn random_ranges_match_brute_force() {
        for seed in 0..20 {
            let ranges = stupid_random_ranges(200, seed);
            let mut tree = RangedTree::new();
            let mut covered = vec![false; 1020];

            for &(start, end) in &ranges {
                tree.insert_range(start, end).unwrap();
                tree.validate();
                for x in start..=end {
                    covered[x] = true
                }
            }
            for x in 0..covered.len() {
                assert_eq!(tree.contains(x), covered[x], "seed {} element {}", seed, x);
            }
        }
    }

    #[test]
    fn mixed_entries_match_brute_force() {
        let values = stupid_random_values(300, 7, 1000);
        let ranges = stupid_random_ranges(100, 9);
        let mut tree = RangedTree::new();
        let mut covered = vec![false; 1020];

        for (i, &value) in values.iter().enumerate() {
            tree.insert(SingleEntry::new(value));
            covered[value] = true;

            if i % 3 == 0 {
                let (start, end) = ranges[i / 3];
                tree.insert_range(start, end).unwrap();
                for x in start..=end {
                    covered[x] = true
                }
            }
            tree.validate();
        }
        for x in 0..covered.len() {
            assert_eq!(tree.contains(x), covered[x]);
        }
    }

    #[test]
    fn invalid_range_leaves_tree_unchanged() {
        let mut tree = RangedTree::new();
        tree.insert_range(2, 4).unwrap();
        tree.insert(SingleEntry::new(9));
        let len = tree.len();

        assert!(matches!(tree.insert_range(5, 1), Err(Error::InvalidRange { .. })));
        assert_eq!(tree.len(), len);
        assert!((2..=4).all(|x| tree.contains(x)));
        assert!(tree.contains(9));
        assert!(!tree.contains(1));
        assert!(!tree.contains(5));
    }

    #[test]
    fn copy_is_independent_of_source() {
        let a: RangedTree<_> = vec![Entry::single('x'), Entry::ranged('a', 'c').unwrap()].into_iter().collect();
        let mut b = a.clone();
        b.insert(SingleEntry::new('q'));
        b.insert_range('d', 'k').unwrap();

        assert!(b.contains('q'));
        assert!(b.contains('e'));
        assert!(!a.contains('q'));
        assert!(!a.contains('e'));
        assert!(a.contains('b'));
        assert!(a.contains('x'));
    }

    #[test]
    fn take_leaves_source_empty() {
        let mut a: RangedTree<_> = vec![Entry::single(1), Entry::ranged(10, 20).unwrap()].into_iter().collect();
        let b = a.take();

        assert!(b.contains(1));
        assert!(b.contains(15));
        assert!(!a.contains(1));
        assert!(!a.contains(15));
        assert!(a.is_empty());
    }

    #[test]
    fn extend_adds_to_existing_coverage() {
        let mut tree = RangedTree::new();
        tree.insert(SingleEntry::new(0u8));
        tree.extend(vec![Entry::ranged(b'0', b'9').unwrap(), Entry::single(b'_')]);
        assert!(tree.contains(0));
        assert!(tree.contains(b'5'));
        assert!(tree.contains(b'_'));
        assert!(!tree.contains(b'a'));
    }
}
