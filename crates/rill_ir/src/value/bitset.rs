//! Character and byte sets.

/// A set of code points, stored as a growable bit vector.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bitset {
    words: Vec<u64>,
}

impl Bitset {
    pub fn new() -> Self {
        Bitset::default()
    }

    /// Build a set from a spec string such as `"a-z0-9_"`.
    ///
    /// A `-` between two characters denotes an inclusive range; a leading or
    /// trailing `-` stands for itself.
    pub fn from_spec(spec: &str) -> Self {
        let chars: Vec<char> = spec.chars().collect();
        let mut set = Bitset::new();
        let mut i = 0;
        while i < chars.len() {
            let lo = chars[i];
            if i + 2 < chars.len() && chars[i + 1] == '-' {
                let hi = chars[i + 2];
                set.insert_range(lo as u32, hi as u32);
                i += 3;
            } else {
                set.insert(lo as u32);
                i += 1;
            }
        }
        set
    }

    pub fn insert(&mut self, point: u32) {
        let word = (point / 64) as usize;
        if word >= self.words.len() {
            self.words.resize(word + 1, 0);
        }
        self.words[word] |= 1 << (point % 64);
    }

    /// Insert every point in `lo..=hi` (in either order).
    pub fn insert_range(&mut self, lo: u32, hi: u32) {
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        for point in lo..=hi {
            self.insert(point);
        }
    }

    pub fn contains(&self, point: u32) -> bool {
        self.words
            .get((point / 64) as usize)
            .is_some_and(|w| w & (1 << (point % 64)) != 0)
    }

    /// Membership test for a character, optionally ignoring case.
    pub fn contains_char(&self, c: char, case_sensitive: bool) -> bool {
        if self.contains(c as u32) {
            return true;
        }
        if case_sensitive {
            return false;
        }
        c.to_lowercase().any(|l| self.contains(l as u32))
            || c.to_uppercase().any(|u| self.contains(u as u32))
    }

    /// Number of members.
    pub fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }
}
