// Marked pointer operations using the least significant bit as the
// logical-deletion flag.
//
// Bit layout:
//   Bit 0: DELETE_MARK - the node owning this `next` word is logically removed
//
// Nodes are at least 4-byte aligned, so the bit is always free. Keeping the
// mark inside the pointer word means a single CAS swaps both together.
//
const DELETE_MARK: usize = 0b1;

/// A pointer that uses its least significant bit as a deletion mark.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct MarkedPtr<T> {
    ptr: *mut T,
}

impl<T> MarkedPtr<T> {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Create a new MarkedPtr from a (possibly marked) pointer.
    #[inline]
    pub(crate) fn new(ptr: *mut T) -> Self {
        MarkedPtr { ptr }
    }

    /// Strip the mark bit from a raw pointer without creating a MarkedPtr.
    #[inline]
    pub(crate) fn unmask(ptr: *mut T) -> *mut T {
        (ptr as usize & !DELETE_MARK) as *mut T
    }

    // =========================================================================
    // Extraction
    // =========================================================================

    /// Get the clean pointer without the mark bit (the one you dereference).
    #[inline]
    pub(crate) fn as_ptr(&self) -> *mut T {
        Self::unmask(self.ptr)
    }

    /// Get the raw pointer with the mark bit intact (for CAS operations).
    #[inline]
    pub(crate) fn as_raw(&self) -> *mut T {
        self.ptr
    }

    /// Check if DELETE-marked.
    #[inline]
    pub(crate) fn is_marked(&self) -> bool {
        (self.ptr as usize & DELETE_MARK) != 0
    }

    /// Same pointer, with the mark set or cleared.
    #[inline]
    pub(crate) fn with_mark(&self, mark: bool) -> Self {
        let ptr_bits = self.as_ptr() as usize;
        let marked_bits = if mark { ptr_bits | DELETE_MARK } else { ptr_bits };
        MarkedPtr {
            ptr: marked_bits as *mut T,
        }
    }
}
