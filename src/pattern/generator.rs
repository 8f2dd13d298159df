use std::collections::HashMap;
use rand::{seq::{index, SliceRandom}, Rng};
use tracing::debug;
use super::{verify, DecodedPattern, Entry, PatternArg, PatternError, Phase, VerifyError};

/// Build the read block then the write block of a pattern.
///
/// ```text
///   0                 size          capacity        capacity+size      depth
///   +-----------------+-------------+---------------+----------------+
///   | read (drawn)    | zero pad    | write (shuffle)| zero pad       |
///   +-----------------+-------------+---------------+----------------+
/// ```
///
/// Every write entry carries the same datum its address got in the read block.
pub struct PatternGenerator {
    arg: PatternArg,
    entries: Vec<Entry>,
    memory: HashMap<u32, u32>,
    read_order: Vec<u32>,
    write_order: Vec<u32>,
}

/// Output of one generation run.
#[derive(Debug, Clone)]
pub struct Pattern {
    arg: PatternArg,
    entries: Vec<Entry>,
    memory: HashMap<u32, u32>,
    read_order: Vec<u32>,
    write_order: Vec<u32>,
}

/// Validate `arg` and generate a full pattern from `rng`.
pub fn generate<R: Rng + ?Sized>(arg: PatternArg, rng: &mut R) -> Result<Pattern, PatternError> {
    Ok(PatternGenerator::new(arg)?.generate(rng))
}

impl PatternGenerator {
    pub fn new(arg: PatternArg) -> Result<Self, PatternError> {
        arg.validate()?;
        Ok(Self {
            arg,
            entries: Vec::with_capacity(arg.depth()),
            memory: HashMap::with_capacity(arg.size),
            read_order: Vec::with_capacity(arg.size),
            write_order: Vec::with_capacity(arg.size),
        })
    }

    pub fn generate<R: Rng + ?Sized>(mut self, rng: &mut R) -> Pattern {
        debug!(
            "generate {} addresses with {} address bits, {} datum bits, depth {}",
            self.arg.size, self.arg.address_width, self.arg.datum_width(), self.arg.depth()
        );

        let addresses = self.sample_addresses(rng);

        // read phase
        for &address in addresses.iter() {
            let datum = self.random_datum(rng);
            self.add_read_entry(address, datum);
        }
        self.pad_to(self.arg.block_capacity(), Phase::Read);
        debug!("read block ends at 0x{:x}", self.entries.len());

        // write phase, same data in a fresh order
        let mut shuffled = addresses;
        shuffled.shuffle(rng);
        for address in shuffled {
            self.add_write_entry(address);
        }
        self.pad_to(self.arg.depth(), Phase::Write);
        debug!("write block ends at 0x{:x}", self.entries.len());

        debug_assert_eq!(self.entries.len(), self.arg.depth());
        Pattern {
            arg: self.arg,
            entries: self.entries,
            memory: self.memory,
            read_order: self.read_order,
            write_order: self.write_order,
        }
    }

    fn sample_addresses<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<u32> {
        // validate() keeps address_width below the word width, so the domain fits in u32
        let domain = self.arg.address_domain() as usize;
        index::sample(rng, domain, self.arg.size)
            .into_iter()
            .map(|address| address as u32)
            .collect()
    }

    #[inline]
    fn random_datum<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        rng.random_range(0..=self.arg.datum_mask())
    }

    fn add_read_entry(&mut self, address: u32, datum: u32) {
        let word = self.arg.pack(address, datum);
        self.entries.push(Entry::data(self.entries.len(), word, Phase::Read));
        self.memory.insert(address, datum);
        self.read_order.push(address);
    }

    fn add_write_entry(&mut self, address: u32) {
        let datum = self.memory[&address];
        let word = self.arg.pack(address, datum);
        self.entries.push(Entry::data(self.entries.len(), word, Phase::Write));
        self.write_order.push(address);
    }

    fn pad_to(&mut self, end: usize, phase: Phase) {
        while self.entries.len() < end {
            self.entries.push(Entry::padding(self.entries.len(), phase));
        }
    }
}

impl Pattern {
    #[inline]
    pub fn arg(&self) -> &PatternArg {
        &self.arg
    }

    #[inline]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    pub fn read_block(&self) -> &[Entry] {
        &self.entries[..self.arg.block_capacity()]
    }

    pub fn write_block(&self) -> &[Entry] {
        &self.entries[self.arg.block_capacity()..]
    }

    /// Addresses in drawn order, as they appear in the read block.
    pub fn read_order(&self) -> &[u32] {
        &self.read_order
    }

    /// Addresses in shuffled order, as they appear in the write block.
    pub fn write_order(&self) -> &[u32] {
        &self.write_order
    }

    pub fn datum(&self, address: u32) -> Option<u32> {
        self.memory.get(&address).copied()
    }

    pub fn memory(&self) -> &HashMap<u32, u32> {
        &self.memory
    }

    /// `(index, word)` pairs in index order.
    pub fn words(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.entries.iter().map(|e| (e.index, e.word))
    }

    pub fn verify(&self) -> Result<DecodedPattern, VerifyError> {
        verify(&self.arg, self.words())
    }
}
