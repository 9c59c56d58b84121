use super::tag_map::Tag;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

const FAR_APART: u32 = 1_000;

/// Physical keyboard layouts. Each has a key priority order based on distance
/// from the home row and how hard the key is to reach.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyLayout {
    Colemak,
    Workman,
    Dvorak,
    #[default]
    Qwerty,
    Qwertz,
    Qgmlwy,
    Qgmlwb,
    Norman,
}

impl KeyLayout {
    pub const ALL: [KeyLayout; 8] = [
        KeyLayout::Colemak,
        KeyLayout::Workman,
        KeyLayout::Dvorak,
        KeyLayout::Qwerty,
        KeyLayout::Qwertz,
        KeyLayout::Qgmlwy,
        KeyLayout::Qgmlwb,
        KeyLayout::Norman,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Colemak => "colemak",
            Self::Workman => "workman",
            Self::Dvorak => "dvorak",
            Self::Qwerty => "qwerty",
            Self::Qwertz => "qwertz",
            Self::Qgmlwy => "qgmlwy",
            Self::Qgmlwb => "qgmlwb",
            Self::Norman => "norman",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|layout| layout.name().eq_ignore_ascii_case(name))
    }

    pub fn rows(self) -> [&'static str; 4] {
        match self {
            Self::Colemak => ["1234567890", "qwfpgjluy", "arstdhneio", "zxcvbkm"],
            Self::Workman => ["1234567890", "qdrwbjfup", "ashtgyneoi", "zxmcvkl"],
            Self::Dvorak => ["1234567890", "pyfgcrl", "aoeuidhtns", "qjkxbmwvz"],
            Self::Qwerty => ["1234567890", "qwertyuiop", "asdfghjkl", "zxcvbnm"],
            Self::Qwertz => ["1234567890", "qwertzuiop", "asdfghjkl", "yxcvbnm"],
            Self::Qgmlwy => ["1234567890", "qgmlwyfub", "dstnriaeoh", "zxcvjkp"],
            Self::Qgmlwb => ["1234567890", "qgmlwbyuv", "dstnriaeoh", "zxcfjkp"],
            Self::Norman => ["1234567890", "qwdfkjurl", "asetgynioh", "zxcvbpm"],
        }
    }

    /// Keys from easiest to hardest to reach.
    pub fn priority_order(self) -> &'static str {
        match self {
            Self::Colemak => "tndhseriaovkcmbxzgjplfuwyq5849673210",
            Self::Workman => "tnhegysoaiclvkmxzwfrubjdpq5849673210",
            Self::Dvorak => "uhetidonasxkbjmqwvzgfycprl5849673210",
            Self::Qwerty => "fjghdkslavncmbxzrutyeiwoqp5849673210",
            Self::Qwertz => "fjghdkslavncmbxyrutzeiwoqp5849673210",
            Self::Qgmlwy => "naterisodhvkcpjxzlfmuwygbq5849673210",
            Self::Qgmlwb => "naterisodhfkcpjxzlymuwbgvq5849673210",
            Self::Norman => "tneigysoahbvpcmxzjkufrdlwq5849673210",
        }
    }

    pub fn all_chars(self) -> Vec<char> {
        let mut chars: Vec<char> = self.rows().iter().flat_map(|row| row.chars()).collect();
        chars.sort_unstable();
        chars
    }

    pub fn priority(self, ch: char) -> usize {
        self.priority_order()
            .chars()
            .position(|c| c == ch)
            .unwrap_or(usize::MAX)
    }

    pub fn key_position(self, ch: char) -> Option<(usize, usize)> {
        self.rows()
            .iter()
            .enumerate()
            .find_map(|(row, keys)| keys.chars().position(|c| c == ch).map(|col| (row, col)))
    }

    /// Squared distance between two keys; repeated keys are 0.
    pub fn distance_between_keys(self, a: char, b: char) -> u32 {
        if a == b {
            return 0;
        }
        match (self.key_position(a), self.key_position(b)) {
            (Some((r1, c1)), Some((r2, c2))) => {
                let dr = r1.abs_diff(r2) as u32;
                let dc = c1.abs_diff(c2) as u32;
                dr * dr + dc * dc
            }
            _ => FAR_APART,
        }
    }
}

/// Characters tags are built from, and every possible two-key tag.
#[derive(Debug, Clone)]
pub struct TagAlphabet {
    layout: KeyLayout,
    chars: Vec<char>,
    tags: Vec<Tag>,
}

impl TagAlphabet {
    /// `allowed` is filtered to letters and digits; when nothing is left, the
    /// layout's keys are used.
    pub fn new(layout: KeyLayout, allowed: &str) -> Self {
        let mut chars: Vec<char> = Vec::new();
        for ch in allowed
            .chars()
            .filter(|c| c.is_alphanumeric())
            .flat_map(char::to_lowercase)
        {
            if !chars.contains(&ch) {
                chars.push(ch);
            }
        }
        if chars.is_empty() {
            chars = layout.all_chars();
        }

        let mut alphabet = Self {
            layout,
            chars,
            tags: Vec::new(),
        };
        let mut tags: Vec<Tag> = Vec::with_capacity(alphabet.chars.len().pow(2));
        for &a in &alphabet.chars {
            for &b in &alphabet.chars {
                let mut tag = Tag::default();
                tag.push(a);
                tag.push(b);
                tags.push(tag);
            }
        }
        tags.sort_by(|a, b| alphabet.compare_tags(a, b));
        alphabet.tags = tags;
        alphabet
    }

    pub fn layout(&self) -> KeyLayout {
        self.layout
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// All two-key tags, easiest first.
    pub fn all_tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Digits last, then nearby keys, then the first key's priority.
    pub fn compare_tags(&self, a: &str, b: &str) -> Ordering {
        let key = |tag: &str| {
            let mut chars = tag.chars();
            let first = chars.next().unwrap_or(' ');
            let last = chars.last().unwrap_or(first);
            (
                has_digit(tag),
                self.layout.distance_between_keys(first, last),
                self.layout.priority(first),
            )
        };
        key(a).cmp(&key(b))
    }
}

pub fn has_digit(tag: &str) -> bool {
    tag.chars().any(|c| c.is_ascii_digit())
}

impl Default for TagAlphabet {
    fn default() -> Self {
        Self::new(KeyLayout::default(), "")
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/jump/layout.rs"]
mod tests;
