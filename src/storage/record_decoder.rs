//! Byte-level decoding of a single archive record.
//!
//! A record is a run of legacy markup text terminated by `0x00`. Inside it,
//! `0x01`/`0x02` bytes toggle a suppressed region whose content is dropped,
//! and other control bytes are noise. Markup tags such as `<hw>` are plain
//! text at this level and pass through untouched.

use log::trace;

/// Size of the window read from the data file for one record.
pub const RECORD_WINDOW_SIZE: usize = 32 * 1024;

const RECORD_TERMINATOR: u8 = 0x00;
const SUPPRESS_TOGGLE_A: u8 = 0x01;
const SUPPRESS_TOGGLE_B: u8 = 0x02;

/// Returns whether a byte, taken as a Latin-1 code point, is printable.
///
/// C0/C1 controls, DEL, the no-break space and the soft hyphen are not.
pub fn is_printable_byte(b: u8) -> bool {
    matches!(b, 0x20..=0x7E | 0xA1..=0xAC | 0xAE..=0xFF)
}

/// Reduces a raw record window to its visible text.
///
/// Decoding stops at the first `0x00`. A window without a terminator is
/// decoded to its end; there is no error for missing terminators or dangling
/// suppression markers. The result is trimmed.
pub fn decode_record(window: &[u8]) -> String {
    let mut output = Vec::with_capacity(window.len());
    let mut suppressed = false;

    for &b in window {
        match b {
            RECORD_TERMINATOR => break,
            SUPPRESS_TOGGLE_A | SUPPRESS_TOGGLE_B => suppressed = !suppressed,
            b if b < 0x20 && b != b'\n' && b != b'\r' => {}
            b => {
                if !suppressed && is_printable_byte(b) {
                    output.push(b);
                }
            }
        }
    }

    if suppressed {
        trace!("record window ended inside a suppressed region");
    }

    String::from_utf8_lossy(&output).trim().to_string()
}
