use log::{debug, info, warn};

use crate::config::AddressSpaceConfig;
use crate::constants::INVALID_ADDRESS;
use crate::memory::{FrameTable, PageTable};

/// A logical address split into page number and offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogicalAddress {
    pub raw: usize,
    pub page: usize,
    pub offset: usize,
}

impl LogicalAddress {
    /// Decompose a raw address; `page_size` need not be a power of two
    pub fn decompose(raw: usize, page_size: usize) -> Self {
        LogicalAddress {
            raw,
            page: raw / page_size,
            offset: raw % page_size,
        }
    }
}

impl std::fmt::Display for LogicalAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LA({}) = (page={}, offset={})", self.raw, self.page, self.offset)
    }
}

/// Why an input was refused before reaching the page table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    /// Not a string of ASCII digits
    NotANumber,
    /// Negative, or past the end of the logical address space
    OutOfRange,
}

/// Outcome of one translation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationResult {
    /// Page already resident
    Hit {
        address: LogicalAddress,
        frame: usize,
        physical: usize,
    },
    /// Page fault serviced by loading the page into a free frame
    FaultLoaded {
        address: LogicalAddress,
        frame: usize,
        physical: usize,
    },
    /// Page fault with every frame taken; nothing changed
    FaultNoFrame { address: LogicalAddress },
    /// Input rejected; nothing changed
    InvalidAddress {
        raw_input: String,
        reason: InvalidReason,
    },
}

impl TranslationResult {
    pub fn address(&self) -> Option<&LogicalAddress> {
        match self {
            TranslationResult::Hit { address, .. }
            | TranslationResult::FaultLoaded { address, .. }
            | TranslationResult::FaultNoFrame { address } => Some(address),
            TranslationResult::InvalidAddress { .. } => None,
        }
    }

    pub fn page(&self) -> Option<usize> {
        self.address().map(|a| a.page)
    }

    pub fn offset(&self) -> Option<usize> {
        self.address().map(|a| a.offset)
    }

    pub fn frame(&self) -> Option<usize> {
        match self {
            TranslationResult::Hit { frame, .. } | TranslationResult::FaultLoaded { frame, .. } => {
                Some(*frame)
            }
            _ => None,
        }
    }

    pub fn physical(&self) -> Option<usize> {
        match self {
            TranslationResult::Hit { physical, .. }
            | TranslationResult::FaultLoaded { physical, .. } => Some(*physical),
            _ => None,
        }
    }

    /// True for both kinds of page fault
    pub fn is_fault(&self) -> bool {
        matches!(
            self,
            TranslationResult::FaultLoaded { .. } | TranslationResult::FaultNoFrame { .. }
        )
    }

    /// True when the request got as far as the page table
    pub fn reached_page_table(&self) -> bool {
        !matches!(self, TranslationResult::InvalidAddress { .. })
    }

    /// Convert to the replay output format (-1 for anything without a physical address)
    pub fn to_output(&self) -> i64 {
        self.physical()
            .and_then(|pa| i64::try_from(pa).ok())
            .unwrap_or(INVALID_ADDRESS)
    }
}

/// Single-level paging engine with demand loading and no eviction
///
/// Owns the page table, the frame table and the allocation cursor. A frame,
/// once assigned, stays assigned until [`reset`](Self::reset).
#[derive(Debug, Clone)]
pub struct TranslationEngine {
    config: AddressSpaceConfig,
    page_table: PageTable,
    frames: FrameTable,
}

impl TranslationEngine {
    pub fn new(config: AddressSpaceConfig) -> Self {
        TranslationEngine {
            config,
            page_table: PageTable::new(config.page_count()),
            frames: FrameTable::new(config.frame_count()),
        }
    }

    #[inline]
    pub fn config(&self) -> &AddressSpaceConfig {
        &self.config
    }

    pub fn page_table(&self) -> &PageTable {
        &self.page_table
    }

    pub fn frames(&self) -> &FrameTable {
        &self.frames
    }

    /// Translate a logical address, loading its page on a fault.
    ///
    /// Out-of-range input and faults with no free frame leave all state untouched.
    pub fn translate(&mut self, logical: i64) -> TranslationResult {
        let raw = match usize::try_from(logical) {
            Ok(raw) if raw < self.config.address_limit() => raw,
            _ => {
                debug!("LA {} outside 0..={}", logical, self.config.max_address());
                return TranslationResult::InvalidAddress {
                    raw_input: logical.to_string(),
                    reason: InvalidReason::OutOfRange,
                };
            }
        };
        let address = LogicalAddress::decompose(raw, self.config.page_size());

        if let Some(frame) = self.page_table.frame_of(address.page) {
            let physical = self.physical_address(frame, address.offset);
            debug!("{} hit in frame {} -> PA {}", address, frame, physical);
            return TranslationResult::Hit { address, frame, physical };
        }

        self.handle_fault(address)
    }

    /// Sole mutator of the page and frame tables
    fn handle_fault(&mut self, address: LogicalAddress) -> TranslationResult {
        let Some(frame) = self.frames.find_free_frame() else {
            warn!("page fault on page {}: no free frames", address.page);
            return TranslationResult::FaultNoFrame { address };
        };

        self.frames.occupy(frame, address.page);
        self.page_table.map(address.page, frame);

        let physical = self.physical_address(frame, address.offset);
        debug!(
            "page fault on page {}: loaded into frame {} -> PA {}",
            address.page, frame, physical
        );
        TranslationResult::FaultLoaded { address, frame, physical }
    }

    #[inline]
    fn physical_address(&self, frame: usize, offset: usize) -> usize {
        frame * self.config.page_size() + offset
    }

    /// Unmap every page, free every frame and rewind the cursor
    pub fn reset(&mut self) {
        self.page_table.clear();
        self.frames.clear();
        info!(
            "engine reset: {} pages unmapped, {} frames free",
            self.page_table.len(),
            self.frames.len()
        );
    }

    /// `(page, frame)` for every logical page, in page order
    pub fn page_table_snapshot(&self) -> Vec<(usize, Option<usize>)> {
        self.page_table.iter().collect()
    }

    /// `(frame, page)` for every physical frame, in frame order
    pub fn frame_snapshot(&self) -> Vec<(usize, Option<usize>)> {
        self.frames.iter().collect()
    }

    /// Translate a batch of addresses into replay output values
    pub fn translate_batch(&mut self, addresses: &[i64]) -> Vec<i64> {
        addresses
            .iter()
            .map(|&la| self.translate(la).to_output())
            .collect()
    }
}
