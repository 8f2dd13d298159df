use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Read,
    Write,
}

/// One word of the listing, at a fixed content address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    pub index: usize,
    pub word: u32,
    pub phase: Phase,
    pub padding: bool,
}

impl Entry {
    pub fn data(index: usize, word: u32, phase: Phase) -> Self {
        Self { index, word, phase, padding: false }
    }

    pub fn padding(index: usize, phase: Phase) -> Self {
        Self { index, word: 0, phase, padding: true }
    }

    #[inline]
    pub fn is_padding(&self) -> bool {
        self.padding
    }
}

impl Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read => write!(f, "read"),
            Self::Write => write!(f, "write"),
        }
    }
}
