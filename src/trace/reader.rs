//! Event log reader.

use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use csv::{ReaderBuilder, Trim};
use tracing::debug;

use crate::{
    cli::AnalysisMode, context::RateContext, error::AnalysisError, events::Event,
    EventProcessor, EventSource,
};

/// Reads events from a header-less CSV log.
pub struct CsvEventReader<R: Read> {
    source: PathBuf,
    reader: csv::Reader<R>,
}

impl CsvEventReader<File> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Could not open event log {}", path.display()))?;

        Ok(Self::from_reader(file, path))
    }
}

impl<R: Read> CsvEventReader<R> {
    /// Wraps `rdr`. `source` only names the log in diagnostics.
    pub fn from_reader<P: Into<PathBuf>>(rdr: R, source: P) -> Self {
        let reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(rdr);

        Self {
            source: source.into(),
            reader,
        }
    }
}

impl<R: Read> EventSource for CsvEventReader<R> {
    fn event_loop<P: EventProcessor>(
        &mut self,
        processor: &mut P,
        ctx: &RateContext,
    ) -> Result<()> {
        let with_group = ctx.mode == AnalysisMode::Sweep;
        let mut count = 0;

        for result in self.reader.records() {
            let record = result.with_context(|| {
                format!("Malformed CSV in {}", self.source.display())
            })?;
            let line = record
                .position()
                .map_or(count + 1, |p| p.line() as usize);

            let event = Event::from_record(&record, line, with_group)
                .with_context(|| format!("Invalid event in {}", self.source.display()))?;

            processor.consume_event(event, ctx)?;
            count += 1;
        }

        if count == 0 {
            return Err(AnalysisError::EmptyInput {
                path: self.source.clone(),
            }
            .into());
        }

        debug!(events = count, source = %self.source.display(), "Event log read");

        Ok(())
    }
}
