use std::collections::{HashMap, HashSet};
use tracing::debug;
use super::{PatternArg, Phase, VerifyError};

/// Addresses and data recovered from a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPattern {
    pub read_order: Vec<u32>,
    pub write_order: Vec<u32>,
    pub memory: HashMap<u32, u32>,
}

/// Decode `(index, word)` pairs laid out for `arg` and check them.
/// `arg` goes through the same validation as generation.
///
/// Padding is located by position, not by value: address 0 with datum 0
/// packs to a zero word too.
pub fn verify(
    arg: &PatternArg,
    words: impl IntoIterator<Item = (usize, u32)>,
) -> Result<DecodedPattern, VerifyError> {
    arg.validate()?;
    let words: Vec<(usize, u32)> = words.into_iter().collect();
    if words.len() != arg.depth() {
        return Err(VerifyError::DepthMismatch { expected: arg.depth(), found: words.len() });
    }

    let capacity = arg.block_capacity();
    let mut decoded = DecodedPattern {
        read_order: Vec::with_capacity(arg.size),
        write_order: Vec::with_capacity(arg.size),
        memory: HashMap::with_capacity(arg.size),
    };
    let mut written = HashSet::with_capacity(arg.size);

    for (expected, &(index, word)) in words.iter().enumerate() {
        if index != expected {
            return Err(VerifyError::IndexGap { expected, found: index });
        }
        if arg.word_width < u32::BITS as usize && word >> arg.word_width != 0 {
            return Err(VerifyError::WordOverflow { index, word, width: arg.word_width });
        }

        let phase = if index < capacity { Phase::Read } else { Phase::Write };
        if index % capacity >= arg.size {
            if word != 0 {
                return Err(VerifyError::NonZeroPadding { index, word });
            }
            continue;
        }

        let (address, datum) = arg.unpack(word);
        match phase {
            Phase::Read => {
                if decoded.memory.insert(address, datum).is_some() {
                    return Err(VerifyError::DuplicateAddress { phase, address });
                }
                decoded.read_order.push(address);
            }
            Phase::Write => {
                let read = match decoded.memory.get(&address) {
                    Some(&read) => read,
                    None => return Err(VerifyError::UnknownAddress { index, address }),
                };
                if read != datum {
                    return Err(VerifyError::DatumMismatch { address, read, write: datum });
                }
                if !written.insert(address) {
                    return Err(VerifyError::DuplicateAddress { phase, address });
                }
                decoded.write_order.push(address);
            }
        }
    }

    debug!("verified {} addresses in {} entries", decoded.read_order.len(), words.len());
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};
    use crate::pattern::{generate, PatternError};
    use super::*;

    fn words(size: usize, address_width: usize) -> (PatternArg, Vec<(usize, u32)>) {
        let mut rng = StdRng::seed_from_u64(0xdead);
        let arg = PatternArg::new(size, address_width);
        let pattern = generate(arg, &mut rng).unwrap();
        (arg, pattern.words().collect())
    }

    #[test]
    fn test_verify_generated() {
        let mut rng = StdRng::seed_from_u64(9);
        let pattern = generate(PatternArg::new(77, 20), &mut rng).unwrap();
        let decoded = pattern.verify().unwrap();
        assert_eq!(decoded.read_order, pattern.read_order());
        assert_eq!(decoded.write_order, pattern.write_order());
        assert_eq!(&decoded.memory, pattern.memory());
    }

    #[test]
    fn test_zero_word_data_entry() {
        // address 0 with datum 0 is a real entry, not padding
        let arg = PatternArg::new(1, 2);
        let words = vec![(0, 0), (1, 0), (2, 0), (3, 0)];
        let decoded = verify(&arg, words).unwrap();
        assert_eq!(decoded.read_order, vec![0]);
        assert_eq!(decoded.memory.get(&0), Some(&0));
    }

    #[test]
    fn test_depth_mismatch() {
        let (arg, mut words) = words(5, 8);
        words.pop();
        assert!(matches!(
            verify(&arg, words),
            Err(VerifyError::DepthMismatch { expected: 16, found: 15 })
        ));
    }

    #[test]
    fn test_index_gap() {
        let (arg, mut words) = words(5, 8);
        words[3].0 = 4;
        assert!(matches!(verify(&arg, words), Err(VerifyError::IndexGap { expected: 3, found: 4 })));
    }

    #[test]
    fn test_datum_mismatch() {
        let (arg, mut words) = words(5, 8);
        let capacity = arg.block_capacity();
        words[capacity].1 ^= 1;
        assert!(matches!(verify(&arg, words), Err(VerifyError::DatumMismatch { .. })));
    }

    #[test]
    fn test_non_zero_padding() {
        let (arg, mut words) = words(5, 8);
        words[6].1 = 0x10;
        assert!(matches!(
            verify(&arg, words),
            Err(VerifyError::NonZeroPadding { index: 6, word: 0x10 })
        ));
    }

    #[test]
    fn test_duplicate_read_address() {
        let (arg, mut words) = words(5, 8);
        words[1].1 = words[0].1;
        assert!(matches!(
            verify(&arg, words),
            Err(VerifyError::DuplicateAddress { phase: Phase::Read, .. })
        ));
    }

    #[test]
    fn test_rejected_arguments() {
        let arg = PatternArg::new(1, 8).with_word_width(40);
        let words = vec![(0, 1), (1, 0), (2, 1), (3, 0)];
        assert!(matches!(
            verify(&arg, words.clone()),
            Err(VerifyError::Argument(PatternError::Configuration(_)))
        ));

        let arg = PatternArg::new(usize::MAX, 8);
        assert!(matches!(verify(&arg, words), Err(VerifyError::Argument(_))));
    }

    #[test]
    fn test_word_overflow() {
        let arg = PatternArg::new(1, 4).with_word_width(8);
        let words = vec![(0, 0x100), (1, 0), (2, 0), (3, 0)];
        assert!(matches!(verify(&arg, words), Err(VerifyError::WordOverflow { index: 0, .. })));
    }
}
