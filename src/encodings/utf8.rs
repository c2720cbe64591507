// encodings/utf8.rs - UTF-8 codec (RFC 3629 range: U+0000 - U+10FFFF).
//
// Decoding returns the zero sentinel on malformed input and never
// resynchronizes; callers treat zero as ERR_ENCODING.

use crate::error::IdentError;
use crate::identifier::*;

// === UTF-8 Helpers ===

#[inline]
fn utf8_istail(c: u8) -> bool {
    (c & 0xc0) == 0x80
}

// === EncLen_UTF8 Table ===
// Maps first byte to sequence length; 0 marks a byte that cannot start one
// (continuation bytes, C0/C1 overlong leads, F5..FF).

static ENC_LEN_UTF8: [u8; 256] = [
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2,
    3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 4, 4, 4, 4, 4, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

/// Smallest codepoint that needs a sequence of the given length.
static MIN_FOR_LEN: [u32; 5] = [0, 0, 0x80, 0x800, 0x10000];

/// Byte length of the sequence starting with `lead`, 0 if `lead` is invalid.
#[inline]
pub fn enc_len(lead: u8) -> usize {
    ENC_LEN_UTF8[lead as usize] as usize
}

/// Decode one codepoint at `*pos` and advance past it.
///
/// Returns 0 for malformed input (and for a literal NUL byte); `*pos` is left
/// unchanged in the malformed case.
pub fn decode(buf: &[u8], pos: &mut usize) -> CodePoint {
    let p = *pos;
    if p >= buf.len() {
        return 0;
    }
    let lead = buf[p];
    let len = enc_len(lead);
    if len == 0 || p + len > buf.len() {
        return 0;
    }
    if len == 1 {
        *pos = p + 1;
        return lead as CodePoint;
    }

    let mut code = (lead as u32) & (0x7f >> len);
    for &b in &buf[p + 1..p + len] {
        if !utf8_istail(b) {
            return 0;
        }
        code = (code << 6) | (b as u32 & 0x3f);
    }
    if code < MIN_FOR_LEN[len] || code > MAX_CODE_POINT || (0xD800..=0xDFFF).contains(&code) {
        return 0;
    }
    *pos = p + len;
    code
}

/// Number of bytes needed to encode `code`, or `None` above U+10FFFF.
#[inline]
pub fn encoded_len(code: CodePoint) -> Option<usize> {
    if (code & 0xffffff80) == 0 {
        Some(1)
    } else if (code & 0xfffff800) == 0 {
        Some(2)
    } else if (code & 0xffff0000) == 0 {
        Some(3)
    } else if code <= MAX_CODE_POINT {
        Some(4)
    } else {
        None
    }
}

/// Encode `code` into `buf`, returning the number of bytes written.
pub fn encode(code: CodePoint, buf: &mut [u8; 4]) -> Result<usize, i32> {
    let len = encoded_len(code).ok_or(ERR_ENCODING)?;
    match len {
        1 => buf[0] = code as u8,
        2 => {
            buf[0] = ((code >> 6) & 0x1f) as u8 | 0xc0;
            buf[1] = (code & 0x3f) as u8 | 0x80;
        }
        3 => {
            buf[0] = ((code >> 12) & 0x0f) as u8 | 0xe0;
            buf[1] = ((code >> 6) & 0x3f) as u8 | 0x80;
            buf[2] = (code & 0x3f) as u8 | 0x80;
        }
        _ => {
            buf[0] = ((code >> 18) & 0x07) as u8 | 0xf0;
            buf[1] = ((code >> 12) & 0x3f) as u8 | 0x80;
            buf[2] = ((code >> 6) & 0x3f) as u8 | 0x80;
            buf[3] = (code & 0x3f) as u8 | 0x80;
        }
    }
    Ok(len)
}

/// Append `code` to `out`; returns false for non-scalar values.
pub fn push_utf8(out: &mut String, code: CodePoint) -> bool {
    match char::from_u32(code) {
        Some(ch) => {
            out.push(ch);
            true
        }
        None => false,
    }
}

/// Is the whole buffer well-formed UTF-8 without NUL bytes?
pub fn is_valid(buf: &[u8]) -> bool {
    let mut pos = 0;
    while pos < buf.len() {
        if decode(buf, &mut pos) == 0 {
            return false;
        }
    }
    true
}

/// Decode the whole buffer. `Encoding` on the first malformed sequence,
/// `Memory` when the output cannot be allocated.
pub fn decode_all(buf: &[u8]) -> Result<Vec<CodePoint>, IdentError> {
    let mut out = Vec::new();
    out.try_reserve_exact(buf.len()).map_err(|_| IdentError::Memory)?;
    let mut pos = 0;
    while pos < buf.len() {
        match decode(buf, &mut pos) {
            0 => return Err(IdentError::Encoding),
            cp => out.push(cp),
        }
    }
    Ok(out)
}
