//! Session geometry and limits, fixed at startup.

use crate::constants::*;
use crate::error::ConfigError;

/// Shape of the simulated address space
///
/// Only constructible through [`AddressSpaceConfig::new`], so every value in
/// circulation has non-zero dimensions and an address range that fits in an `i64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressSpaceConfig {
    page_size: usize,
    page_count: usize,
    frame_count: usize,
}

impl AddressSpaceConfig {
    pub fn new(page_size: usize, page_count: usize, frame_count: usize) -> Result<Self, ConfigError> {
        if page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        if page_count == 0 {
            return Err(ConfigError::ZeroPageCount);
        }
        if frame_count == 0 {
            return Err(ConfigError::ZeroFrameCount);
        }
        if page_count > MAX_PAGES {
            return Err(ConfigError::TooManyPages { page_count, limit: MAX_PAGES });
        }
        if frame_count > MAX_FRAMES {
            return Err(ConfigError::TooManyFrames { frame_count, limit: MAX_FRAMES });
        }

        let overflow = ConfigError::AddressSpaceOverflow { page_size, page_count };
        let limit = page_size.checked_mul(page_count).ok_or(overflow.clone())?;
        if i64::try_from(limit).is_err() {
            return Err(overflow);
        }
        // Physical addresses must fit as well
        if frame_count
            .checked_mul(page_size)
            .and_then(|size| i64::try_from(size).ok())
            .is_none()
        {
            return Err(overflow);
        }

        Ok(AddressSpaceConfig { page_size, page_count, frame_count })
    }

    #[inline]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    #[inline]
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    #[inline]
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// One past the highest valid logical address
    #[inline]
    pub fn address_limit(&self) -> usize {
        self.page_count * self.page_size
    }

    /// Highest valid logical address
    #[inline]
    pub fn max_address(&self) -> usize {
        self.address_limit() - 1
    }

    /// Bytes of simulated physical memory
    #[inline]
    pub fn physical_size(&self) -> usize {
        self.frame_count * self.page_size
    }
}

impl Default for AddressSpaceConfig {
    fn default() -> Self {
        AddressSpaceConfig {
            page_size: PAGE_SIZE,
            page_count: NUM_PAGES,
            frame_count: NUM_FRAMES,
        }
    }
}

/// Address space plus the per-session submission budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatorConfig {
    pub address_space: AddressSpaceConfig,
    pub max_attempts: usize,
}

impl SimulatorConfig {
    pub fn new(address_space: AddressSpaceConfig, max_attempts: usize) -> Result<Self, ConfigError> {
        if max_attempts == 0 {
            return Err(ConfigError::ZeroMaxAttempts);
        }
        Ok(SimulatorConfig { address_space, max_attempts })
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        SimulatorConfig {
            address_space: AddressSpaceConfig::default(),
            max_attempts: MAX_TRANSLATIONS,
        }
    }
}
