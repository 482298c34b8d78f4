use std::io::{self, Read, Seek, SeekFrom};
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};

/// A progress bar that implements the `Read` trait.
///
/// This wrapper of `indicatif`'s `ProgressBar` updates progress based on the
/// current offset within the file.
pub struct ReadProgress<R> {
    inner: R,
    progress_bar: ProgressBar,
}

impl<R> ReadProgress<R>
where
    R: Seek,
{
    pub fn new(mut read: R) -> io::Result<Self> {
        let len = read.seek(SeekFrom::End(0))? + 1;
        read.seek(SeekFrom::Start(0))?;
        let progress_bar = ProgressBar::new(len);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("{bar} {bytes}/{total_bytes} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        Ok(ReadProgress {
            inner: read,
            progress_bar,
        })
    }
}

impl<R> Read for ReadProgress<R>
where
    R: Read + Seek,
{
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n_read = self.inner.read(buf)?;
        let pos = self.inner.stream_position()?;
        self.progress_bar.set_position(pos);
        Ok(n_read)
    }
}

impl<R> Drop for ReadProgress<R> {
    fn drop(&mut self) {
        self.progress_bar.finish();
    }
}

/// Measure the number of sentences processed per second.
///
/// A `ResolveSpeed` instance logs the processing speed and the number of
/// repaired lemmas when it is dropped.
pub struct ResolveSpeed {
    start: Instant,
    n_sentences: usize,
    n_changed: usize,
}

impl ResolveSpeed {
    pub fn new() -> Self {
        ResolveSpeed {
            start: Instant::now(),
            n_sentences: 0,
            n_changed: 0,
        }
    }

    /// Count a processed sentence with its number of repaired lemmas.
    pub fn count_sentence(&mut self, n_changed: usize) {
        self.n_sentences += 1;
        self.n_changed += n_changed;
    }
}

impl Default for ResolveSpeed {
    fn default() -> Self {
        ResolveSpeed::new()
    }
}

impl Drop for ResolveSpeed {
    fn drop(&mut self) {
        let elapsed_secs = self.start.elapsed().as_secs_f32();
        log::info!(
            "Processed {} sentences in {:.1}s ({:.1} sents/s), repaired {} lemmas",
            self.n_sentences,
            elapsed_secs,
            self.n_sentences as f32 / elapsed_secs,
            self.n_changed
        );
    }
}
