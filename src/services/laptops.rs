//! Laptop service: id resolution on create, streaming search

use std::{
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use chrono::Utc;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_stream::{wrappers::ReceiverStream, Stream};
use tokio_util::sync::DropGuard;
use uuid::Uuid;
use validator::Validate;

use crate::{
    config::SearchConfig,
    context::RequestContext,
    error::{AppError, AppResult},
    models::laptop::{Filter, Laptop},
    repository::{LaptopStore, Repository, StoreError},
    search::{self, ScanError},
};

/// The receiving side of a search stream went away
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("search stream is closed")]
pub struct StreamClosed;

#[derive(Clone)]
pub struct LaptopService {
    store: Arc<LaptopStore>,
    channel_capacity: usize,
}

impl LaptopService {
    pub fn new(repository: Repository, config: &SearchConfig) -> Self {
        Self {
            store: repository.laptops,
            channel_capacity: config.channel_capacity.max(1),
        }
    }

    /// Register a laptop and return its id.
    ///
    /// An empty id is replaced by a random UUID; a non-empty one must parse as a UUID.
    pub async fn create(&self, ctx: &RequestContext, mut laptop: Laptop) -> AppResult<String> {
        tracing::info!("received a create laptop request with id: {:?}", laptop.id);

        laptop.id = if laptop.id.is_empty() {
            Uuid::new_v4().to_string()
        } else {
            // Braced, urn and simple forms all name the same record
            match Uuid::parse_str(&laptop.id) {
                Ok(id) => id.to_string(),
                Err(e) => {
                    tracing::warn!("rejected laptop id {:?}: {}", laptop.id, e);
                    return Err(AppError::InvalidArgument(format!(
                        "laptop ID is not a valid UUID: {}",
                        e
                    )));
                }
            }
        };

        laptop
            .validate()
            .map_err(|e| AppError::InvalidArgument(e.to_string()))?;

        if let Err(interrupted) = ctx.check() {
            tracing::info!("create laptop {} stopped: {}", laptop.id, interrupted);
            return Err(interrupted.into());
        }

        if laptop.updated_at.is_none() {
            laptop.updated_at = Some(Utc::now());
        }

        match self.store.save(&laptop) {
            Ok(()) => {}
            Err(StoreError::AlreadyExists(id)) => {
                tracing::warn!("laptop {} already exists", id);
                return Err(AppError::AlreadyExists(format!(
                    "cannot save laptop to store: laptop {} already exists",
                    id
                )));
            }
            Err(e @ StoreError::Internal(_)) => {
                return Err(AppError::Internal(format!("cannot save laptop to store: {}", e)));
            }
        }

        tracing::info!("saved laptop with id: {}", laptop.id);
        Ok(laptop.id)
    }

    /// Get a laptop by id
    pub async fn get_by_id(&self, id: &str) -> AppResult<Laptop> {
        self.store
            .find(id)
            .ok_or_else(|| AppError::NotFound(format!("Laptop {} not found", id)))
    }

    pub fn count(&self) -> usize {
        self.store.len()
    }

    /// Run a search on the current thread, handing each match to `sink`.
    ///
    /// Blocks while `sink` blocks; call from a blocking context.
    pub fn search_with<F, E>(&self, ctx: &RequestContext, filter: &Filter, sink: F) -> AppResult<()>
    where
        F: FnMut(Laptop) -> Result<(), E>,
        E: std::fmt::Display,
    {
        tracing::info!("received a search laptop request: {}", filter);

        match search::search(&self.store, ctx, filter, sink) {
            Ok(()) => Ok(()),
            Err(e @ (ScanError::Canceled | ScanError::DeadlineExceeded)) => {
                tracing::warn!("search stopped: {}", e);
                Err(AppError::Internal(format!("unexpected error: {}", e)))
            }
            Err(e @ ScanError::Sink(_)) => {
                let message = format!("unexpected error: {}", e);
                tracing::error!("search failed: {}", message);
                Err(AppError::Internal(message))
            }
        }
    }

    /// Start a search on a blocking worker and stream its matches.
    ///
    /// A failed search ends the stream with one `Err` item. Dropping the
    /// returned stream cancels `ctx` and ends the scan at the next record.
    pub fn search_stream(&self, ctx: RequestContext, filter: Filter) -> LaptopStream {
        let (tx, rx) = mpsc::channel(self.channel_capacity);
        let guard = ctx.token().clone().drop_guard();
        let service = self.clone();

        tokio::task::spawn_blocking(move || {
            let sink = |laptop: Laptop| {
                tracing::debug!("sending found laptop with id: {}", laptop.id);
                tx.blocking_send(Ok(laptop)).map_err(|_| StreamClosed)
            };
            if let Err(e) = service.search_with(&ctx, &filter, sink) {
                if tx.blocking_send(Err(e)).is_err() {
                    tracing::debug!("search stream closed before its error was delivered");
                }
            }
        });

        LaptopStream {
            inner: ReceiverStream::new(rx),
            _cancel_on_drop: guard,
        }
    }
}

/// Matches of a running search, in scan order
pub struct LaptopStream {
    inner: ReceiverStream<AppResult<Laptop>>,
    _cancel_on_drop: DropGuard,
}

impl Stream for LaptopStream {
    type Item = AppResult<Laptop>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
