use super::Phase;

#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    #[error("pattern arguments invalid: {0}")]
    Configuration(String),

    #[error("can't sample {requested} unique addresses from a domain of {domain}")]
    Sampling { requested: usize, domain: u64 },
}

#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    #[error(transparent)]
    Argument(#[from] PatternError),

    #[error("listing is {found} bits wide but pattern words are {expected}")]
    WidthMismatch { expected: usize, found: usize },

    #[error("expect {expected} entries but got {found}")]
    DepthMismatch { expected: usize, found: usize },

    #[error("expect entry index 0x{expected:x} but got 0x{found:x}")]
    IndexGap { expected: usize, found: usize },

    #[error("word 0x{word:x} at 0x{index:x} exceeds {width} bits")]
    WordOverflow { index: usize, word: u32, width: usize },

    #[error("padding entry 0x{index:x} holds non-zero word 0x{word:x}")]
    NonZeroPadding { index: usize, word: u32 },

    #[error("address 0x{address:x} appears twice in {phase} phase")]
    DuplicateAddress { phase: Phase, address: u32 },

    #[error("write entry 0x{index:x} targets address 0x{address:x} which was never read")]
    UnknownAddress { index: usize, address: u32 },

    #[error("address 0x{address:x} read datum 0x{read:x} but write datum 0x{write:x}")]
    DatumMismatch { address: u32, read: u32, write: u32 },
}

#[macro_export]
macro_rules! config_error {
    ($msg:literal $(,)?) => {
        Err($crate::pattern::PatternError::Configuration(format!($msg)))?
    };
    ($fmt:expr, $($arg:tt)*) => {
        Err($crate::pattern::PatternError::Configuration(format!($fmt, $($arg)*)))?
    };
}
