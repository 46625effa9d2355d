use derive_new::new;
use minus::Pager;
use std::io::{self, Write};

/// `std::io::Write` adapter for the minus pager.
///
/// minus collects its content through `push_str`, so this wrapper lets the
/// render functions target a pager and a plain stdout handle through the
/// same writer parameter. Call `minus::page_all` with the wrapped pager
/// once rendering is done.
#[derive(new)]
pub struct PagerWriter {
    pager: Pager,
}

impl Write for PagerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text =
            std::str::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.pager.push_str(text).map_err(io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
