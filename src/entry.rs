use core::convert::TryFrom;
use core::fmt::Debug;
use core::ops::RangeInclusive;
use crate::element::Element;
use crate::error::Error;




/**
 * A request to cover exactly one element.
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SingleEntry<T> {
    pub value: T,
}

impl<T: Element> SingleEntry<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }
}

impl<T: Element> From<T> for SingleEntry<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}




/**
 * A request to cover every element in the inclusive range `start..=end`. The
 * bounds are private so that a `RangedEntry` with `start > end` cannot exist;
 * `new` is the only way to build one.
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RangedEntry<T> {
    range_start: T,
    range_end: T,
}

impl<T: Element + Debug> RangedEntry<T> {
    pub fn new(range_start: T, range_end: T) -> Result<Self, Error> {
        if range_start > range_end {
            Err(Error::invalid_range(range_start, range_end))
        } else {
            Ok(Self { range_start, range_end })
        }
    }
}

impl<T: Element> RangedEntry<T> {

    pub fn start(&self) -> T {
        self.range_start
    }

    pub fn end(&self) -> T {
        self.range_end
    }
}

impl<T: Element + Debug> TryFrom<RangeInclusive<T>> for RangedEntry<T> {
    type Error = Error;

    fn try_from(range: RangeInclusive<T>) -> Result<Self, Self::Error> {
        let (start, end) = range.into_inner();
        Self::new(start, end)
    }
}




/**
 * An insertion request: either a single element or an inclusive range. Entries
 * are consumed by `RangedTree::insert` and never retained.
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entry<T> {
    Single(SingleEntry<T>),
    Ranged(RangedEntry<T>),
}

impl<T: Element> Entry<T> {

    pub fn single(value: T) -> Self {
        Entry::Single(SingleEntry::new(value))
    }

    pub fn ranged(start: T, end: T) -> Result<Self, Error>
    where
        T: Debug,
    {
        RangedEntry::new(start, end).map(Entry::Ranged)
    }
}

impl<T> From<SingleEntry<T>> for Entry<T> {
    fn from(entry: SingleEntry<T>) -> Self {
        Entry::Single(entry)
    }
}

impl<T> From<RangedEntry<T>> for Entry<T> {
    fn from(entry: RangedEntry<T>) -> Self {
        Entry::Ranged(entry)
    }
}
