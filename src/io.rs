//! Text-mode protocol rendering and replay file I/O.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::budget::parse_logical_address;
use crate::config::AddressSpaceConfig;
use crate::constants::INVALID_ADDRESS;
use crate::translation::{InvalidReason, TranslationEngine, TranslationResult};

const RULE: &str = "---------------------------------";

pub fn write_banner<W: Write>(out: &mut W, config: &AddressSpaceConfig, max_attempts: usize) -> io::Result<()> {
    writeln!(out, "=== Virtual Memory Simulator (Text Mode) ===")?;
    writeln!(out, "Page Size: {} bytes", config.page_size())?;
    writeln!(out, "Logical Address Range: 0 – {}", config.max_address())?;
    writeln!(out, "Maximum Inputs: {}", max_attempts)?;
    writeln!(out, "--------------------------------------------")?;
    writeln!(out)
}

/// Prompt for the `attempt`-th input (1-based)
pub fn prompt(attempt: usize, max_attempts: usize) -> String {
    format!("[{}/{}] Enter logical address: ", attempt, max_attempts)
}

pub fn write_result<W: Write>(
    out: &mut W,
    result: &TranslationResult,
    config: &AddressSpaceConfig,
) -> io::Result<()> {
    if let Some(address) = result.address() {
        writeln!(out, "Logical Address: {}", address.raw)?;
        writeln!(out, "  Page Number: {}", address.page)?;
        writeln!(out, "  Offset: {}", address.offset)?;
    }

    match result {
        TranslationResult::Hit { address, frame, physical } => {
            writeln!(out, "Page {} already in Frame {}", address.page, frame)?;
            writeln!(out, "→ Physical Address: {}", physical)
        }
        TranslationResult::FaultLoaded { address, frame, physical } => {
            writeln!(out, "*** PAGE FAULT: Page {} not in memory ***", address.page)?;
            writeln!(out, "→ Loading Page {} → Frame {}", address.page, frame)?;
            writeln!(out, "→ Physical Address: {}", physical)
        }
        TranslationResult::FaultNoFrame { address } => {
            writeln!(out, "*** PAGE FAULT: Page {} not in memory ***", address.page)?;
            writeln!(out, "❌ No free frames available! Cannot load page.")
        }
        TranslationResult::InvalidAddress { reason: InvalidReason::NotANumber, .. } => {
            writeln!(out, "Error: Please enter a valid integer.")?;
            writeln!(out)
        }
        TranslationResult::InvalidAddress { reason: InvalidReason::OutOfRange, .. } => {
            writeln!(out, "Error: Invalid address! Enter 0–{}.", config.max_address())?;
            writeln!(out)
        }
    }
}

pub fn write_page_table<W: Write>(out: &mut W, engine: &TranslationEngine) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "PAGE TABLE:")?;
    writeln!(out, "{}", RULE)?;
    writeln!(out, "Page | Frame | Status")?;
    writeln!(out, "{}", RULE)?;
    for (page, frame) in engine.page_table().iter() {
        match frame {
            Some(frame) => writeln!(out, "{:4} | {:5} | Loaded", page, frame)?,
            None => writeln!(out, "{:4} | {:5} | Not Loaded", page, "-")?,
        }
    }
    writeln!(out, "{}", RULE)
}

/// Physical frame occupancy, one row per frame
pub fn write_frame_table<W: Write>(out: &mut W, engine: &TranslationEngine) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "PHYSICAL FRAMES:")?;
    writeln!(out, "{}", RULE)?;
    for (frame, page) in engine.frames().iter() {
        match page {
            Some(page) => writeln!(out, "Frame {:3} | Page {}", frame, page)?,
            None => writeln!(out, "Frame {:3} | Free", frame)?,
        }
    }
    writeln!(out, "{}", RULE)
}

/// Read whitespace-separated address tokens for replay.
///
/// Tokens are kept as text so malformed entries still produce an output slot.
pub fn read_logical_addresses<P: AsRef<Path>>(path: P) -> io::Result<Vec<String>> {
    let content = fs::read_to_string(path.as_ref())?;
    Ok(content.split_whitespace().map(str::to_string).collect())
}

/// Translate replay tokens through `engine`; malformed tokens yield -1
pub fn replay<S: AsRef<str>>(engine: &mut TranslationEngine, tokens: &[S]) -> Vec<i64> {
    // INVALID_ADDRESS is negative, so the engine refuses it without touching its tables
    let addresses: Vec<i64> = tokens
        .iter()
        .map(|token| parse_logical_address(token.as_ref()).unwrap_or(INVALID_ADDRESS))
        .collect();
    engine.translate_batch(&addresses)
}

pub fn format_results(results: &[i64]) -> String {
    let output: Vec<String> = results.iter().map(|r| r.to_string()).collect();
    output.join(" ")
}

pub fn write_results<P: AsRef<Path>>(path: P, results: &[i64]) -> io::Result<()> {
    fs::write(path.as_ref(), format_results(results))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translation::LogicalAddress;

    fn render(result: &TranslationResult) -> String {
        let mut out = Vec::new();
        write_result(&mut out, result, &AddressSpaceConfig::default()).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_prompt_format() {
        assert_eq!(prompt(1, 10), "[1/10] Enter logical address: ");
        assert_eq!(prompt(10, 10), "[10/10] Enter logical address: ");
    }

    #[test]
    fn test_banner() {
        let mut out = Vec::new();
        write_banner(&mut out, &AddressSpaceConfig::default(), 10).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("=== Virtual Memory Simulator (Text Mode) ===\n"));
        assert!(text.contains("Page Size: 1024 bytes"));
        assert!(text.contains("Logical Address Range: 0 – 8191"));
        assert!(text.contains("Maximum Inputs: 10"));
    }

    #[test]
    fn test_render_fault_loaded() {
        let text = render(&TranslationResult::FaultLoaded {
            address: LogicalAddress::decompose(1030, 1024),
            frame: 1,
            physical: 1030,
        });
        assert_eq!(
            text,
            "Logical Address: 1030\n  Page Number: 1\n  Offset: 6\n\
             *** PAGE FAULT: Page 1 not in memory ***\n\
             → Loading Page 1 → Frame 1\n\
             → Physical Address: 1030\n"
        );
    }

    #[test]
    fn test_render_hit() {
        let text = render(&TranslationResult::Hit {
            address: LogicalAddress::decompose(1023, 1024),
            frame: 0,
            physical: 1023,
        });
        assert!(text.contains("Page 0 already in Frame 0\n"));
        assert!(text.ends_with("→ Physical Address: 1023\n"));
        assert!(!text.contains("PAGE FAULT"));
    }

    #[test]
    fn test_render_no_frame() {
        let text = render(&TranslationResult::FaultNoFrame {
            address: LogicalAddress::decompose(4096, 1024),
        });
        assert!(text.contains("*** PAGE FAULT: Page 4 not in memory ***"));
        assert!(text.ends_with("not in memory ***\n❌ No free frames available! Cannot load page.\n"));
        assert!(!text.contains("Physical Address"));
    }

    #[test]
    fn test_render_invalid() {
        let text = render(&TranslationResult::InvalidAddress {
            raw_input: "abc".to_string(),
            reason: InvalidReason::NotANumber,
        });
        assert_eq!(text, "Error: Please enter a valid integer.\n\n");

        let text = render(&TranslationResult::InvalidAddress {
            raw_input: "9000".to_string(),
            reason: InvalidReason::OutOfRange,
        });
        assert_eq!(text, "Error: Invalid address! Enter 0–8191.\n\n");
    }

    #[test]
    fn test_page_table_dump() {
        let mut engine = TranslationEngine::new(AddressSpaceConfig::default());
        engine.translate(2048);

        let mut out = Vec::new();
        write_page_table(&mut out, &engine).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[1], "PAGE TABLE:");
        assert_eq!(lines[3], "Page | Frame | Status");
        assert_eq!(lines[5], "   0 | -     | Not Loaded");
        assert_eq!(lines[7], "   2 |     0 | Loaded");
        assert_eq!(lines.len(), 5 + 8 + 1);
    }

    #[test]
    fn test_frame_table_dump() {
        let mut engine = TranslationEngine::new(AddressSpaceConfig::default());
        engine.translate(5 * 1024);

        let mut out = Vec::new();
        write_frame_table(&mut out, &engine).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Frame   0 | Page 5"));
        assert!(text.contains("Frame   3 | Free"));
    }

    #[test]
    fn test_replay_mixed_tokens() {
        let mut engine = TranslationEngine::new(AddressSpaceConfig::default());
        let tokens = ["0", "1023", "abc", "1024", "8192", "-5"];
        assert_eq!(replay(&mut engine, &tokens), vec![0, 1023, -1, 1024, -1, -1]);
        assert_eq!(engine.frames().occupied_count(), 2);
        assert_eq!(engine.frames().cursor(), 2);
    }

    #[test]
    fn test_read_and_write_replay_files() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.txt");
        let output = dir.path().join("output.txt");
        fs::write(&input, "0 1024\n 2048\tfoo\n").unwrap();

        let tokens = read_logical_addresses(&input).unwrap();
        assert_eq!(tokens, vec!["0", "1024", "2048", "foo"]);

        write_results(&output, &[0, 1024, 2048, -1]).unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), "0 1024 2048 -1");
    }

    #[test]
    fn test_read_missing_file() {
        assert!(read_logical_addresses("/nonexistent/addresses.txt").is_err());
    }

    #[test]
    fn test_format_results() {
        assert_eq!(format_results(&[0, 1023, -1]), "0 1023 -1");
        assert_eq!(format_results(&[]), "");
    }
}
