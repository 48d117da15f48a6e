//! Computer-keyboard piano: two rows, one octave each.
//!
//! ```text
//!   upper:  2 3   5 6 7         lower:  s d   g h j
//!          q w e r t y u               z x c v b n m
//! ```

const LOWER_ROW: [(char, u8); 12] = [
    ('z', 0),
    ('s', 1),
    ('x', 2),
    ('d', 3),
    ('c', 4),
    ('v', 5),
    ('g', 6),
    ('b', 7),
    ('h', 8),
    ('n', 9),
    ('j', 10),
    ('m', 11),
];

const UPPER_ROW: [(char, u8); 12] = [
    ('q', 0),
    ('2', 1),
    ('w', 2),
    ('3', 3),
    ('e', 4),
    ('r', 5),
    ('5', 6),
    ('t', 7),
    ('6', 8),
    ('y', 9),
    ('7', 10),
    ('u', 11),
];

/// Note number for `key`, with the lower row starting at `octave`'s C.
pub fn note_for_key(key: char, octave: i32) -> Option<u8> {
    let key = key.to_ascii_lowercase();
    let (offset, row) = LOWER_ROW
        .iter()
        .find(|(k, _)| *k == key)
        .map(|&(_, semitone)| (semitone, 0))
        .or_else(|| {
            UPPER_ROW
                .iter()
                .find(|(k, _)| *k == key)
                .map(|&(_, semitone)| (semitone, 1))
        })?;
    let note = (octave + 1 + row) * 12 + offset as i32;
    u8::try_from(note).ok().filter(|n| *n < 128)
}
