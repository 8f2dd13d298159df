use std::path::Path;
use tracing::info;
use crate::{pattern::{verify, DecodedPattern, PatternArg, VerifyError}, ErrorContext, MifGenResult};
use super::ImportError;

/// A MIF listing read back from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MifListing {
    pub depth: usize,
    pub width: usize,
    pub entries: Vec<(usize, u32)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Header,
    Begin,
    Content,
    Done,
}

#[derive(Default)]
struct Header {
    depth: Option<usize>,
    width: Option<usize>,
    address_radix: Option<String>,
    data_radix: Option<String>,
}

impl MifListing {
    /// Check the header width against `arg`, then decode the entries.
    pub fn verify(&self, arg: &PatternArg) -> Result<DecodedPattern, VerifyError> {
        if self.width != arg.word_width {
            return Err(VerifyError::WidthMismatch { expected: arg.word_width, found: self.width });
        }
        verify(arg, self.entries.iter().copied())
    }
}

pub fn read_mif<P: AsRef<Path>>(path: P) -> MifGenResult<MifListing> {
    let path = path.as_ref();
    info!("read listing {:?}", path);
    let content = std::fs::read_to_string(path).with_context(|| format!("read {:?}", path))?;
    Ok(parse_mif(&content)?)
}

/// Parse a HEX radix MIF listing. Content indices must start at 0 and be contiguous.
pub fn parse_mif(content: &str) -> Result<MifListing, ImportError> {
    let mut header = Header::default();
    let mut section = Section::Header;
    let mut entries = vec![];

    for (number, raw) in content.lines().enumerate() {
        let line = number + 1;
        let text = strip_comment(raw).trim();
        if text.is_empty() {
            continue;
        }

        match section {
            Section::Header => {
                if text == "CONTENT" {
                    section = Section::Begin;
                } else {
                    header.parse_line(line, text)?;
                }
            }
            Section::Begin => {
                if text != "BEGIN" {
                    return Err(ImportError::UnexpectedLine { line, expect: "BEGIN", content: text.into() });
                }
                section = Section::Content;
            }
            Section::Content => {
                if text == "END" || text == "END;" {
                    section = Section::Done;
                    continue;
                }
                let (index, word) = parse_content(line, text)?;
                if index != entries.len() {
                    return Err(ImportError::IndexGap { line, expected: entries.len(), found: index });
                }
                entries.push((index, word));
            }
            Section::Done => {
                return Err(ImportError::UnexpectedLine { line, expect: "end of file", content: text.into() });
            }
        }
    }

    if section != Section::Done {
        return Err(ImportError::MissingEnd);
    }

    let (depth, width) = header.finish()?;
    if entries.len() != depth {
        return Err(ImportError::DepthMismatch { depth, found: entries.len() });
    }

    Ok(MifListing { depth, width, entries })
}

impl Header {
    fn parse_line(&mut self, line: usize, text: &str) -> Result<(), ImportError> {
        let invalid = || ImportError::InvalidHeader { line, content: text.into() };

        let (key, value) = text.strip_suffix(';')
            .and_then(|t| t.split_once('='))
            .ok_or_else(invalid)?;
        let value = value.trim();

        match key.trim() {
            "DEPTH" => self.depth = Some(value.parse().map_err(|_| invalid())?),
            "WIDTH" => self.width = Some(value.parse().map_err(|_| invalid())?),
            "ADDRESS_RADIX" => self.address_radix = Some(value.to_string()),
            "DATA_RADIX" => self.data_radix = Some(value.to_string()),
            _ => return Err(invalid()),
        }

        Ok(())
    }

    fn finish(self) -> Result<(usize, usize), ImportError> {
        let depth = self.depth.ok_or(ImportError::MissingHeader("DEPTH"))?;
        let width = self.width.ok_or(ImportError::MissingHeader("WIDTH"))?;
        check_radix("ADDRESS_RADIX", self.address_radix)?;
        check_radix("DATA_RADIX", self.data_radix)?;
        Ok((depth, width))
    }
}

fn check_radix(key: &'static str, radix: Option<String>) -> Result<(), ImportError> {
    match radix {
        None => Err(ImportError::MissingHeader(key)),
        Some(radix) if radix.eq_ignore_ascii_case("HEX") => Ok(()),
        Some(radix) => Err(ImportError::UnsupportRadix { key, radix }),
    }
}

fn parse_content(line: usize, text: &str) -> Result<(usize, u32), ImportError> {
    let invalid = || ImportError::InvalidContent { line, content: text.into() };

    let (index, word) = text.strip_suffix(';')
        .and_then(|t| t.split_once(':'))
        .ok_or_else(invalid)?;
    let index = usize::from_str_radix(index.trim(), 16).map_err(|_| invalid())?;
    let word = u32::from_str_radix(word.trim(), 16).map_err(|_| invalid())?;

    Ok((index, word))
}

#[inline]
fn strip_comment(raw: &str) -> &str {
    match raw.find("--") {
        Some(pos) => &raw[..pos],
        None => raw,
    }
}
