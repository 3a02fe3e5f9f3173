use std::mem::ManuallyDrop;
use std::ptr;

// The lifted element goes back into `data[pos]` on drop.
pub(super) struct Hole<'a, T> {
    data: &'a mut [T],
    elt: ManuallyDrop<T>,
    pos: usize,
}

impl<'a, T> Hole<'a, T> {
    // SAFETY: `pos` must be in bounds.
    #[inline]
    pub(super) unsafe fn new(data: &'a mut [T], pos: usize) -> Self {
        debug_assert!(pos < data.len());
        // SAFETY: `pos` is in bounds; the slot is treated as vacant from here
        // until `move_to` refills it or `drop` writes the element back.
        let elt = unsafe { ptr::read(data.get_unchecked(pos)) };
        Hole {
            data,
            elt: ManuallyDrop::new(elt),
            pos,
        }
    }

    #[inline]
    pub(super) fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub(super) fn element(&self) -> &T {
        &self.elt
    }

    // SAFETY: `index` must be in bounds and not equal to `pos`.
    #[inline]
    pub(super) unsafe fn get(&self, index: usize) -> &T {
        debug_assert!(index != self.pos);
        debug_assert!(index < self.data.len());
        unsafe { self.data.get_unchecked(index) }
    }

    // SAFETY: `index` must be in bounds and not equal to `pos`.
    #[inline]
    pub(super) unsafe fn move_to(&mut self, index: usize) {
        debug_assert!(index != self.pos);
        debug_assert!(index < self.data.len());
        unsafe {
            let base = self.data.as_mut_ptr();
            ptr::copy_nonoverlapping(base.add(index), base.add(self.pos), 1);
        }
        self.pos = index;
    }
}

impl<T> Drop for Hole<'_, T> {
    #[inline]
    fn drop(&mut self) {
        // SAFETY: `pos` is in bounds and vacant.
        unsafe {
            let pos = self.pos;
            ptr::copy_nonoverlapping(&*self.elt, self.data.as_mut_ptr().add(pos), 1);
        }
    }
}
