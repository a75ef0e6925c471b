//! Store scanner
//!
//! Walks the laptop store one record at a time, taking the read lock only
//! while a single record is inspected. The request context is checked before
//! every record, so a canceled search stops at the next record boundary.

use thiserror::Error;

use super::filter::matches;
use crate::{
    context::{Interrupted, RequestContext},
    models::laptop::{Filter, Laptop},
    repository::LaptopStore,
};

/// Why a scan ended early
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ScanError<E> {
    #[error("search is canceled")]
    Canceled,

    #[error("search deadline is exceeded")]
    DeadlineExceeded,

    #[error("cannot deliver found laptop: {0}")]
    Sink(E),
}

impl<E> From<Interrupted> for ScanError<E> {
    fn from(interrupted: Interrupted) -> Self {
        match interrupted {
            Interrupted::Canceled => ScanError::Canceled,
            Interrupted::DeadlineExceeded => ScanError::DeadlineExceeded,
        }
    }
}

/// Lazy iterator over the laptops matching a filter.
///
/// Covers the records present when it was created. Yields one `Err` when the
/// context is interrupted, then ends.
pub struct Scan<'a> {
    store: &'a LaptopStore,
    filter: &'a Filter,
    ctx: &'a RequestContext,
    next: usize,
    end: usize,
    done: bool,
}

impl<'a> Scan<'a> {
    pub fn new(store: &'a LaptopStore, ctx: &'a RequestContext, filter: &'a Filter) -> Self {
        Self {
            store,
            filter,
            ctx,
            next: 0,
            end: store.len(),
            done: false,
        }
    }
}

impl Iterator for Scan<'_> {
    type Item = Result<Laptop, Interrupted>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        while self.next < self.end {
            if let Err(interrupted) = self.ctx.check() {
                self.done = true;
                return Some(Err(interrupted));
            }

            let index = self.next;
            self.next += 1;
            if let Some(laptop) = self.store.copy_at_if(index, |l| matches(l, self.filter)) {
                return Some(Ok(laptop));
            }
        }

        self.done = true;
        None
    }
}

/// Hand every laptop matching `filter` to `sink`.
///
/// Stops on the first interruption of `ctx` or the first sink error. Laptops
/// already handed over stay delivered.
pub fn search<F, E>(
    store: &LaptopStore,
    ctx: &RequestContext,
    filter: &Filter,
    mut sink: F,
) -> Result<(), ScanError<E>>
where
    F: FnMut(Laptop) -> Result<(), E>,
{
    for found in Scan::new(store, ctx, filter) {
        let laptop = found?;
        sink(laptop).map_err(ScanError::Sink)?;
    }
    Ok(())
}
