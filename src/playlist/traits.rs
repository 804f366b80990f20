// Line source abstraction over helper output

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// A finite, non-restartable sequence of text lines.
///
/// The live helper process and in-memory buffers both implement this, so
/// entry collection does not care where the lines come from.
#[async_trait]
pub trait LineSource: Send {
    /// Name of the source (for logging)
    fn name(&self) -> &'static str;

    /// Next line without its terminator, or `None` once the stream is exhausted.
    /// Invalid UTF-8 is replaced rather than rejected.
    async fn next_line(&mut self) -> std::io::Result<Option<String>>;
}

/// Reads lines incrementally from any async buffered reader
pub struct ReaderLines<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R> ReaderLines<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
        }
    }
}

#[async_trait]
impl<R> LineSource for ReaderLines<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    fn name(&self) -> &'static str {
        "reader"
    }

    async fn next_line(&mut self) -> std::io::Result<Option<String>> {
        self.buf.clear();
        let read = self.reader.read_until(b'\n', &mut self.buf).await?;
        if read == 0 {
            return Ok(None);
        }

        while matches!(self.buf.last(), Some(b'\n' | b'\r')) {
            self.buf.pop();
        }
        Ok(Some(String::from_utf8_lossy(&self.buf).into_owned()))
    }
}
