use log::trace;
use crate::element::Element;
use super::RangedTree;




// ============================================================================
impl<T: Element> RangedTree<T> {




    /**
     * Return the cached height of a maybe-node. An absent child has height 0.
     */
    pub(super) fn height_of(&self, id: Option<usize>) -> usize {
        id.map_or(0, |id| self.nodes[id].height)
    }

    pub(super) fn recalc_height(&mut self, id: usize) {
        let node = &self.nodes[id];
        let height = 1 + self.height_of(node.l).max(self.height_of(node.r));
        self.nodes[id].height = height;
    }




    /**
     * Right-subtree height minus left-subtree height.
     */
    pub(super) fn balance_factor(&self, id: usize) -> isize {
        let node = &self.nodes[id];
        self.height_of(node.r) as isize - self.height_of(node.l) as isize
    }




    /**
     * Point the link that used to lead to `old` at `new` instead. With no
     * parent, `old` was the root.
     */
    fn replace_child(&mut self, parent: Option<usize>, old: usize, new: Option<usize>) {
        match parent {
            None => {
                self.root = new
            }
            Some(p) => {
                if self.nodes[p].l == Some(old) {
                    self.nodes[p].l = new
                } else {
                    self.nodes[p].r = new
                }
            }
        }
    }




    /**
     * Rotate the sub-tree at `x` to the left, promoting its right child:
     *
     *    x(a, y(b, c))   =>   y(x(a, b), c)
     *
     * Returns the index of the new sub-tree root. A node without a right
     * child is left as it is.
     */
    pub(super) fn rotate_left(&mut self, x: usize) -> usize {
        let y = match self.nodes[x].r {
            Some(y) => y,
            None => return x,
        };
        let parent = self.nodes[x].parent;
        let b = self.nodes[y].l;

        self.nodes[x].r = b;
        if let Some(b) = b {
            self.nodes[b].parent = Some(x)
        }
        self.nodes[y].l = Some(x);
        self.nodes[x].parent = Some(y);
        self.nodes[y].parent = parent;
        self.replace_child(parent, x, Some(y));

        self.recalc_height(x);
        self.recalc_height(y);
        trace!("rotate left: node {} promoted over {}", y, x);
        y
    }




    /**
     * Rotate the sub-tree at `x` to the right, promoting its left child:
     *
     *    x(y(a, b), c)   =>   y(a, x(b, c))
     */
    pub(super) fn rotate_right(&mut self, x: usize) -> usize {
        let y = match self.nodes[x].l {
            Some(y) => y,
            None => return x,
        };
        let parent = self.nodes[x].parent;
        let b = self.nodes[y].r;

        self.nodes[x].l = b;
        if let Some(b) = b {
            self.nodes[b].parent = Some(x)
        }
        self.nodes[y].r = Some(x);
        self.nodes[x].parent = Some(y);
        self.nodes[y].parent = parent;
        self.replace_child(parent, x, Some(y));

        self.recalc_height(x);
        self.recalc_height(y);
        trace!("rotate right: node {} promoted over {}", y, x);
        y
    }




    /**
     * Take node `z` out of the tree and free its arena slot, then restore the
     * AVL invariant above the point where the shape changed. A node with two
     * children is replaced by its in-order successor. Freeing the slot moves
     * the last node of the arena into it, so an index the caller wants to
     * keep using is passed as `keep` and returned at its new place.
     */
    pub(super) fn unlink(&mut self, z: usize, keep: usize) -> usize {
        let parent = self.nodes[z].parent;
        let (l, r) = (self.nodes[z].l, self.nodes[z].r);

        let changed = match (l, r) {
            (Some(l), Some(r)) => {
                let mut s = r;
                while let Some(sl) = self.nodes[s].l {
                    s = sl
                }
                let changed = if s == r {
                    Some(s)
                } else {
                    let sp = self.nodes[s].parent;
                    let sr = self.nodes[s].r;

                    if let Some(sp) = sp {
                        self.nodes[sp].l = sr
                    }
                    if let Some(sr) = sr {
                        self.nodes[sr].parent = sp
                    }
                    self.nodes[s].r = Some(r);
                    self.nodes[r].parent = Some(s);
                    sp
                };
                self.nodes[s].l = Some(l);
                self.nodes[l].parent = Some(s);
                self.nodes[s].parent = parent;
                self.replace_child(parent, z, Some(s));
                changed
            }
            (child, None) | (None, child) => {
                if let Some(c) = child {
                    self.nodes[c].parent = parent
                }
                self.replace_child(parent, z, child);
                parent
            }
        };

        let moved = self.free_slot(z);
        let relocate = |id: usize| if Some(id) == moved { z } else { id };

        self.rebalance_from(changed.map(relocate));
        relocate(keep)
    }




    /**
     * Remove the already unlinked node `z` from the arena. The last node takes
     * its slot; the old index of that node is returned if one moved.
     */
    fn free_slot(&mut self, z: usize) -> Option<usize> {
        let last = self.nodes.len() - 1;
        self.nodes.swap_remove(z);

        if z == last {
            return None
        }
        let (parent, l, r) = (self.nodes[z].parent, self.nodes[z].l, self.nodes[z].r);

        self.replace_child(parent, last, Some(z));
        for child in l.into_iter().chain(r) {
            self.nodes[child].parent = Some(z)
        }
        Some(last)
    }




    /**
     * Restore the AVL invariant on the path from `start` up to the root,
     * innermost first. The four classic cases are picked by the sign of the
     * balance factor of the node and of its heavier child.
     */
    pub(super) fn rebalance_from(&mut self, start: Option<usize>) {
        let mut cursor = start;

        while let Some(id) = cursor {
            self.recalc_height(id);

            let top = match self.balance_factor(id) {
                bf if bf > 1 => {
                    if let Some(r) = self.nodes[id].r {
                        if self.balance_factor(r) < 0 {
                            self.rotate_right(r);
                        }
                    }
                    self.rotate_left(id)
                }
                bf if bf < -1 => {
                    if let Some(l) = self.nodes[id].l {
                        if self.balance_factor(l) > 0 {
                            self.rotate_left(l);
                        }
                    }
                    self.rotate_right(id)
                }
                _ => id,
            };

            debug_assert!(self.balance_factor(top).abs() <= 1, "sub-tree left unbalanced");
            cursor = self.nodes[top].parent;
        }
    }
}
