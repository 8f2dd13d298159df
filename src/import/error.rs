#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("line {line}: invalid header '{content}'")]
    InvalidHeader { line: usize, content: String },

    #[error("missing header key '{0}'")]
    MissingHeader(&'static str),

    #[error("unsupport {key} '{radix}', only HEX")]
    UnsupportRadix { key: &'static str, radix: String },

    #[error("line {line}: expect '{expect}' but got '{content}'")]
    UnexpectedLine { line: usize, expect: &'static str, content: String },

    #[error("line {line}: invalid content '{content}'")]
    InvalidContent { line: usize, content: String },

    #[error("line {line}: expect index 0x{expected:x} but got 0x{found:x}")]
    IndexGap { line: usize, expected: usize, found: usize },

    #[error("depth is {depth} but listing holds {found} entries")]
    DepthMismatch { depth: usize, found: usize },

    #[error("listing ends without 'END'")]
    MissingEnd,
}
