use encoding_rs::{EncoderResult, WINDOWS_1252};

// Helvetica advance widths (1/1000 em) for WinAnsiEncoding codes 32..=255.
// Codes WinAnsi leaves undefined are zero and never produced by `encode`.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 224] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, 0,
    556, 0, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000, 0, 611, 0,
    0, 222, 222, 333, 333, 350, 556, 1000, 333, 1000, 500, 333, 944, 0, 500, 667,
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
];

const REPLACEMENT: u8 = b'?';

/// Encodes `text` as WinAnsi (Windows-1252). Characters the encoding has no
/// slot for, and control characters other than tab, become `?`.
pub fn encode(text: &str) -> Vec<u8> {
    let text: String = text
        .chars()
        .map(|c| match c {
            '\t' => ' ',
            c if c.is_control() => char::from(REPLACEMENT),
            c => c,
        })
        .collect();

    let mut encoder = WINDOWS_1252.new_encoder();
    // Every character encodes to a single byte, so the output never
    // outgrows the UTF-8 input.
    let mut out = vec![0u8; text.len()];
    let (mut read, mut written) = (0, 0);
    loop {
        let (result, consumed, produced) =
            encoder.encode_from_utf8_without_replacement(&text[read..], &mut out[written..], true);
        read += consumed;
        written += produced;
        match result {
            EncoderResult::InputEmpty => break,
            EncoderResult::Unmappable(_) => {
                out[written] = REPLACEMENT;
                written += 1;
            }
            EncoderResult::OutputFull => out.resize(out.len() + text.len() - read + 1, 0),
        }
    }
    out.truncate(written);
    out
}

fn code_width(code: u8) -> u16 {
    match code {
        32.. => HELVETICA_WIDTHS[usize::from(code - 32)],
        _ => 0,
    }
}

/// Width in points of `text` set in Helvetica at `font_size`.
pub fn text_width(text: &str, font_size: f32) -> f32 {
    let units: u32 = encode(text)
        .into_iter()
        .map(|code| u32::from(code_width(code)))
        .sum();
    units as f32 * font_size / 1000.0
}
