use crate::config_error;
use super::PatternError;

pub const DEFAULT_WORD_WIDTH: usize = 32;
pub const DEFAULT_ADDRESS_WIDTH: usize = 22;
pub const MAX_WORD_WIDTH: usize = u32::BITS as usize;

/// Arguments of one pattern run.
///
/// Word layout, msb to lsb:
///
/// ```text
///  word_width-1                  datum_width          0
///  +------------------------------+--------------------+
///  |          address             |       datum        |
///  +------------------------------+--------------------+
/// ```
///
/// The listing holds `2^index_width` words: a read block and a write block,
/// each `2^(index_width-1)` long, where `index_width = bit_length(size) + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternArg {
    /// number of unique addresses
    pub size: usize,
    pub address_width: usize,
    pub word_width: usize,
}

impl PatternArg {
    pub fn new(size: usize, address_width: usize) -> Self {
        Self { size, address_width, word_width: DEFAULT_WORD_WIDTH }
    }

    pub fn with_word_width(mut self, word_width: usize) -> Self {
        self.word_width = word_width;
        self
    }

    /// Configuration problems are reported before sampling ones.
    pub fn validate(&self) -> Result<(), PatternError> {
        if self.size == 0 {
            config_error!("address count must be positive");
        }
        if self.address_width < 1 {
            config_error!("address width must be at least 1 bit");
        }
        if self.word_width > MAX_WORD_WIDTH {
            config_error!("word width {} exceeds {} bits", self.word_width, MAX_WORD_WIDTH);
        }
        if self.word_width <= self.address_width {
            config_error!(
                "must specify fewer than {} address bits, got {}",
                self.word_width, self.address_width
            );
        }

        let domain = self.address_domain();
        if self.size as u64 > domain {
            return Err(PatternError::Sampling { requested: self.size, domain });
        }

        Ok(())
    }

    #[inline]
    pub fn datum_width(&self) -> usize {
        self.word_width.saturating_sub(self.address_width)
    }

    #[inline]
    pub fn index_width(&self) -> usize {
        bit_length(self.size) + 1
    }

    /// Total entries in the listing.
    #[inline]
    pub fn depth(&self) -> usize {
        1 << self.index_width()
    }

    /// Entries in each of the read and write blocks.
    #[inline]
    pub fn block_capacity(&self) -> usize {
        1 << (self.index_width() - 1)
    }

    #[inline]
    pub fn address_domain(&self) -> u64 {
        1u64 << self.address_width.min(63)
    }

    #[inline]
    pub fn datum_mask(&self) -> u32 {
        full_bits_number(self.datum_width())
    }

    #[inline]
    pub fn pack(&self, address: u32, datum: u32) -> u32 {
        (address << self.datum_width()) | (datum & self.datum_mask())
    }

    /// Split a word into `(address, datum)`.
    #[inline]
    pub fn unpack(&self, word: u32) -> (u32, u32) {
        (word >> self.datum_width(), word & self.datum_mask())
    }
}

/// Number of bits needed to represent `value`, 0 for 0.
pub fn bit_length(value: usize) -> usize {
    (usize::BITS - value.leading_zeros()) as usize
}

fn full_bits_number(size: usize) -> u32 {
    if size >= MAX_WORD_WIDTH {
        u32::MAX
    } else {
        (1u32 << size) - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_length() {
        assert_eq!(bit_length(0), 0);
        assert_eq!(bit_length(1), 1);
        assert_eq!(bit_length(2), 2);
        assert_eq!(bit_length(3), 2);
        assert_eq!(bit_length(4), 3);
        assert_eq!(bit_length(1000), 10);
    }

    #[test]
    fn test_sizing() {
        let arg = PatternArg::new(1, 2);
        assert_eq!(arg.datum_width(), 30);
        assert_eq!(arg.index_width(), 2);
        assert_eq!(arg.depth(), 4);
        assert_eq!(arg.block_capacity(), 2);

        // a power of two still leaves padding in the read block
        let arg = PatternArg::new(8, 22);
        assert_eq!(arg.index_width(), 5);
        assert_eq!(arg.block_capacity(), 16);

        let arg = PatternArg::new(1000, DEFAULT_ADDRESS_WIDTH);
        assert_eq!(arg.depth(), 2048);
    }

    #[test]
    fn test_pack_unpack() {
        let arg = PatternArg::new(4, 22);
        assert_eq!(arg.datum_width(), 10);
        assert_eq!(arg.datum_mask(), 0x3ff);

        let word = arg.pack(0x2a, 0x155);
        assert_eq!(word, (0x2a << 10) | 0x155);
        assert_eq!(arg.unpack(word), (0x2a, 0x155));

        let arg = PatternArg::new(1, 31);
        assert_eq!(arg.pack(0x7fff_ffff, 1), u32::MAX);
        assert_eq!(arg.unpack(u32::MAX), (0x7fff_ffff, 1));
    }

    #[test]
    fn test_validate_configuration() {
        assert!(PatternArg::new(4, 22).validate().is_ok());
        assert!(PatternArg::new(1, 31).validate().is_ok());

        for arg in [
            PatternArg::new(1, 32),
            PatternArg::new(1, 40),
            PatternArg::new(0, 8),
            PatternArg::new(1, 0),
            PatternArg::new(1, 8).with_word_width(33),
            PatternArg::new(1, 8).with_word_width(8),
        ] {
            assert!(
                matches!(arg.validate(), Err(PatternError::Configuration(_))),
                "{:?} should be rejected", arg
            );
        }
    }

    #[test]
    fn test_validate_sampling() {
        match PatternArg::new(10, 1).validate() {
            Err(PatternError::Sampling { requested, domain }) => {
                assert_eq!(requested, 10);
                assert_eq!(domain, 2);
            }
            other => panic!("unexpected {:?}", other),
        }

        // the whole domain can be drawn
        assert!(PatternArg::new(4, 2).validate().is_ok());
        assert!(PatternArg::new(5, 2).validate().is_err());
    }
}
