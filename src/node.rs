use core::cmp::Ordering::{self, Less, Greater, Equal};
use crate::element::Element;




/**
 * The set of elements a single node stands for: either one exact value, or an
 * inclusive interval tested on both sides at once. An interval is a property
 * of the node itself, so moving the node around during a rotation never
 * changes what it covers.
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Cover<T> {
    Value(T),
    Interval(T, T),
}




// ============================================================================
impl<T: Element> Cover<T> {

    pub(crate) fn lower(&self) -> T {
        match *self {
            Cover::Value(value) => value,
            Cover::Interval(start, _) => start,
        }
    }

    pub(crate) fn upper(&self) -> T {
        match *self {
            Cover::Value(value) => value,
            Cover::Interval(_, end) => end,
        }
    }




    /**
     * Locate `obj` with respect to this cover: `Less` means descend left,
     * `Greater` means descend right, and `Equal` is a match.
     */
    pub(crate) fn locate(&self, obj: &T) -> Ordering {
        match self {
            Cover::Value(value) => obj.cmp(value),
            Cover::Interval(start, end) => {
                if obj < start {
                    Less
                } else if obj > end {
                    Greater
                } else {
                    Equal
                }
            }
        }
    }




    /**
     * Locate the interval `start..=end` with respect to this cover. `Equal`
     * means the two overlap or sit end-to-end, so they can be merged.
     */
    pub(crate) fn locate_interval(&self, start: T, end: T) -> Ordering {
        if end < self.lower() && !end.adjoins(self.lower()) {
            Less
        } else if start > self.upper() && !self.upper().adjoins(start) {
            Greater
        } else {
            Equal
        }
    }

    pub(crate) fn touches(&self, other: &Self) -> bool {
        self.locate_interval(other.lower(), other.upper()) == Equal
    }

    pub(crate) fn includes(&self, start: T, end: T) -> bool {
        self.lower() <= start && end <= self.upper()
    }

    pub(crate) fn union(&self, start: T, end: T) -> Self {
        Cover::Interval(self.lower().min(start), self.upper().max(end))
    }
}




/**
 * A node in the tree arena. Children are owned through the arena; `parent` is
 * only used to walk back towards the root and does not imply ownership.
 */
#[derive(Clone, Debug)]
pub(crate) struct Node<T> {
    pub(crate) cover: Cover<T>,
    pub(crate) height: usize,
    pub(crate) parent: Option<usize>,
    pub(crate) l: Option<usize>,
    pub(crate) r: Option<usize>,
}

impl<T: Element> Node<T> {
    pub(crate) fn new(cover: Cover<T>, parent: Option<usize>) -> Self {
        Self { cover, height: 1, parent, l: None, r: None }
    }
}
