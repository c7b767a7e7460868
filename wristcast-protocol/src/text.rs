//! Bounded text helpers
//!
//! All display text lives in fixed-capacity `heapless::String`s. Truncation
//! never splits a UTF-8 sequence: a cut that would land inside a character
//! backs off to the previous boundary.

use heapless::String;

/// Longest prefix of `s` that fits in `max_bytes`
pub fn clip(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// First `count` characters of `s`
pub fn take_chars(s: &str, count: usize) -> &str {
    match s.char_indices().nth(count) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Overwrite `dst` with `src`, truncating to the capacity of `dst`
///
/// Returns `true` if `src` had to be cut.
pub fn assign<const N: usize>(dst: &mut String<N>, src: &str) -> bool {
    let clipped = clip(src, N);
    dst.clear();
    // Cannot fail: `clipped` fits by construction
    let _ = dst.push_str(clipped);
    clipped.len() < src.len()
}

/// Append `src` to `dst`, truncating to the remaining capacity
///
/// Returns `true` if `src` had to be cut.
pub fn append<const N: usize>(dst: &mut String<N>, src: &str) -> bool {
    let room = N - dst.len();
    let clipped = clip(src, room);
    let _ = dst.push_str(clipped);
    clipped.len() < src.len()
}

/// Build a bounded string from `src`, truncating to `N` bytes
pub fn bounded<const N: usize>(src: &str) -> String<N> {
    let mut out = String::new();
    assign(&mut out, src);
    out
}
