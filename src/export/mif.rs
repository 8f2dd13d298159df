use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};
use crate::{pattern::Pattern, MifGenResult};

pub const MIF_RADIX: &str = "HEX";

/// Render `pattern` as a MIF listing.
///
/// Index and word are lowercase hex without leading zeros, and the listing
/// ends with `END` and no trailing newline.
pub fn render_mif<W: FmtWrite>(out: &mut W, pattern: &Pattern) -> MifGenResult<()> {
    render_words(out, pattern.arg().word_width, pattern.depth(), pattern.words())
}

/// Render any `(index, word)` sequence with the MIF header of `width` and `depth`.
pub fn render_words<W: FmtWrite>(
    out: &mut W,
    width: usize,
    depth: usize,
    words: impl IntoIterator<Item = (usize, u32)>,
) -> MifGenResult<()> {
    write!(out, "DEPTH = {};\n", depth)?;
    write!(out, "WIDTH = {};\n", width)?;
    write!(out, "ADDRESS_RADIX = {};\n", MIF_RADIX)?;
    write!(out, "DATA_RADIX = {};\n", MIF_RADIX)?;
    write!(out, "CONTENT\nBEGIN\n\n")?;

    let mut first = true;
    for (index, word) in words {
        if !first {
            out.write_char('\n')?;
        }
        first = false;
        write!(out, "{:x} : {:x};", index, word)?;
    }

    write!(out, "\nEND")?;
    Ok(())
}

pub fn mif_string(pattern: &Pattern) -> MifGenResult<String> {
    let mut content = String::with_capacity(32 * (pattern.depth() + 4));
    render_mif(&mut content, pattern)?;
    Ok(content)
}

/// Write `pattern` to `path`, replacing any existing file.
pub fn write_mif<P: AsRef<Path>>(pattern: &Pattern, path: P) -> MifGenResult<()> {
    let path = path.as_ref();
    let content = mif_string(pattern)?;

    info!("write {} entries to {:?}", pattern.depth(), path);
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(content.as_bytes())?;
    writer.flush()?;
    debug!("wrote {} bytes", content.len());

    Ok(())
}
