//! An RPC completion rate plotter.
//!
//! rpc-rate reads event logs recording the completion time of RPCs, bins the
//! events into fixed-width windows, smooths the resulting rate curve and plots
//! it. Logs either hold a parameter sweep, with one curve per group size, or a
//! single run.
//!
//! The main components are either __event sources__ or __event processors__:
//! - An event source produces a stream of events. It implements the `EventSource` trait.
//!   Currently, the only event source is the CSV log reader.
//! - An event processor consumes a stream of events. It implements the
//!   `EventProcessor` trait. There is one processor per analysis: sweeps and
//!   single runs.

pub mod cli;
pub mod context;
pub mod error;
pub mod events;
pub mod io;
pub mod plot;
pub mod processors;
pub mod rate;
pub mod trace;
pub mod utils;

use anyhow::Result;

use crate::{context::RateContext, events::Event};

/// Feeds an `EventProcessor` with a stream of events.
pub trait EventSource {
    /// Consume and feed all events to the supplied processor.
    fn event_loop<P: EventProcessor>(&mut self, processor: &mut P, ctx: &RateContext)
        -> Result<()>;

    /// Process the events with the supplied `EventProcessor`.
    fn process_events<P: EventProcessor>(
        &mut self,
        mut processor: P,
        ctx: &RateContext,
    ) -> Result<()> {
        processor.init(ctx)?;

        self.event_loop(&mut processor, ctx)?;

        processor.finalize(ctx)
    }
}

/// Consumes a stream of events.
pub trait EventProcessor {
    /// Prepare the processor before any event is supplied.
    fn init(&mut self, ctx: &RateContext) -> Result<()>;

    /// Process an event.
    fn consume_event(&mut self, event: Event, ctx: &RateContext) -> Result<()>;

    /// Called once the source is exhausted. Produces the outputs.
    fn finalize(&mut self, ctx: &RateContext) -> Result<()>;
}
