// Reference session geometry: 8 logical pages of 1 KiB backed by 4 physical frames.
pub const PAGE_SIZE: usize = 1024;
pub const NUM_PAGES: usize = 8;
pub const NUM_FRAMES: usize = 4;

/// Inputs accepted by one text-mode session before it locks.
pub const MAX_TRANSLATIONS: usize = 10;

/// Upper bounds on table sizes accepted at startup; both tables are allocated eagerly.
pub const MAX_PAGES: usize = 1 << 20;
pub const MAX_FRAMES: usize = 1 << 20;

pub const MAX_ADDRESS: usize = NUM_PAGES * PAGE_SIZE - 1;

/// Replay output for any address that did not produce a physical address.
pub const INVALID_ADDRESS: i64 = -1;
