/// XOR `a` and `b` into `dst`. All three must have the same length.
#[inline]
pub fn xor_n(dst: &mut [u8], a: &[u8], b: &[u8]) {
    debug_assert!(dst.len() == a.len() && a.len() == b.len());
    for ((d, x), y) in dst.iter_mut().zip(a).zip(b) {
        *d = x ^ y;
    }
}

/// Lowercase hex of `buf` in memory order.
pub fn hex_lower(buf: &[u8]) -> String {
    hex::encode(buf)
}

/// Printable rendering of a code: zero octets dropped, the rest lossily decoded.
pub fn printable(buf: &[u8]) -> String {
    let trimmed: Vec<u8> = buf.iter().copied().filter(|&b| b != 0).collect();
    String::from_utf8_lossy(&trimmed).into_owned()
}

/// Strip one trailing line terminator (`\n` or `\r\n`).
#[inline]
pub fn strip_line_terminator(line: &[u8]) -> &[u8] {
    match line {
        [rest @ .., b'\r', b'\n'] => rest,
        [rest @ .., b'\n'] => rest,
        _ => line,
    }
}
