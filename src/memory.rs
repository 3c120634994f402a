//! Page table and physical frame bookkeeping.
//!
//! Both tables are only ever mutated together, through
//! [`TranslationEngine`](crate::TranslationEngine)'s fault handler.

/// Flat page table: one entry per logical page, `None` while unmapped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTable {
    entries: Vec<Option<usize>>,
}

impl PageTable {
    /// Create a page table with every page unmapped
    pub fn new(page_count: usize) -> Self {
        PageTable { entries: vec![None; page_count] }
    }

    /// Frame holding `page`, if resident
    #[inline]
    pub fn frame_of(&self, page: usize) -> Option<usize> {
        self.entries[page]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn resident_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    /// `(page, frame)` rows in page order
    pub fn iter(&self) -> impl Iterator<Item = (usize, Option<usize>)> + '_ {
        self.entries.iter().copied().enumerate()
    }

    pub(crate) fn map(&mut self, page: usize, frame: usize) {
        debug_assert!(self.entries[page].is_none(), "page {} already mapped", page);
        self.entries[page] = Some(frame);
    }

    pub(crate) fn clear(&mut self) {
        self.entries.fill(None);
    }
}

/// Physical frames, each recording the page resident in it
///
/// Occupancy is derived from the owner slot, so a frame is occupied exactly
/// when some page table entry points at it. Also owns the allocation cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameTable {
    owners: Vec<Option<usize>>,
    cursor: usize,
}

impl FrameTable {
    /// Create a frame table with every frame free and the cursor at frame 0
    pub fn new(frame_count: usize) -> Self {
        FrameTable { owners: vec![None; frame_count], cursor: 0 }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    #[inline]
    pub fn is_occupied(&self, frame: usize) -> bool {
        self.owners[frame].is_some()
    }

    /// Page resident in `frame`, if any
    #[inline]
    pub fn page_in(&self, frame: usize) -> Option<usize> {
        self.owners[frame]
    }

    /// Next frame index the allocator will try first; `len()` means "scan from 0"
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn occupied_count(&self) -> usize {
        self.owners.iter().filter(|o| o.is_some()).count()
    }

    pub fn free_count(&self) -> usize {
        self.len() - self.occupied_count()
    }

    /// `(frame, page)` rows in frame order
    pub fn iter(&self) -> impl Iterator<Item = (usize, Option<usize>)> + '_ {
        self.owners.iter().copied().enumerate()
    }

    /// Pick a free frame without claiming it.
    ///
    /// Next-fit with full fallback: the frame under the cursor wins if it is
    /// free, otherwise the lowest free frame. `None` when every frame is taken.
    pub fn find_free_frame(&self) -> Option<usize> {
        if self.cursor < self.len() && !self.is_occupied(self.cursor) {
            return Some(self.cursor);
        }
        self.owners.iter().position(|o| o.is_none())
    }

    /// Claim `frame` for `page` and move the cursor just past it
    pub(crate) fn occupy(&mut self, frame: usize, page: usize) {
        debug_assert!(!self.is_occupied(frame), "frame {} already occupied", frame);
        self.owners[frame] = Some(page);
        self.cursor = (frame + 1).min(self.len());
    }

    pub(crate) fn clear(&mut self) {
        self.owners.fill(None);
        self.cursor = 0;
    }
}
