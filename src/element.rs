/**
 * The bound on anything stored in a `RangedTree`. Elements must be totally
 * ordered and cheap to copy. Discrete types may also report the element that
 * immediately follows them, which lets adjacent ranges (`a-f` and `g-z`)
 * coalesce into a single interval node. Types for which no such notion exists
 * keep the default `successor`, in which case only overlapping ranges merge.
 */
pub trait Element: Ord + Copy {

    /**
     * Return the next element in the order, or `None` if this is the largest
     * element or the type is not discrete.
     */
    fn successor(self) -> Option<Self> {
        None
    }

    /**
     * Return true if `next` immediately follows `self`.
     */
    fn adjoins(self, next: Self) -> bool {
        self < next && self.successor() == Some(next)
    }
}




// ============================================================================
macro_rules! discrete_integer {
    ($($t:ty),*) => {
        $(
            impl Element for $t {
                fn successor(self) -> Option<Self> {
                    self.checked_add(1)
                }
            }
        )*
    };
}

discrete_integer!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);




// ============================================================================
impl Element for char {
    fn successor(self) -> Option<Self> {
        match self as u32 {
            0xD7FF => Some('\u{E000}'),
            c => char::from_u32(c + 1),
        }
    }
}
