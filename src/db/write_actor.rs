use super::DbPool;
use crate::errors::Result;
use diesel::SqliteConnection;
use std::any::Any;
use tokio::sync::{mpsc, oneshot};

// Type alias for the job to be executed by the writer actor.
// It takes a mutable reference to a SqliteConnection and returns a Result.
type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    // Sender part of the MPSC channel to send jobs.
    // Each job is a boxed closure, and a oneshot sender is used for the reply.
    // The Box<dyn Any + Send> is used for type erasure of the job's return type.
    #[allow(clippy::type_complexity)]
    tx: mpsc::Sender<(
        Job<Box<dyn Any + Send + 'static>>,
        oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>,
    )>,
}

impl WriteHandle {
    /// Executes a database job on the writer actor's dedicated connection.
    ///
    /// The job runs inside an immediate transaction, so a delete-then-insert
    /// sequence is never observable half-done by readers.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        // Create a oneshot channel for receiving the result from the actor.
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |c| job(c).map(|v| Box::new(v) as Box<dyn Any + Send>)),
                ret_tx,
            ))
            .await
            .expect("Writer actor's receiving channel was closed, indicating the actor stopped.");

        ret_rx
            .await
            .expect("Writer actor dropped the reply sender without sending a result.")
            .map(|boxed: Box<dyn Any + Send + 'static>| {
                *boxed
                    .downcast::<T>()
                    .unwrap_or_else(|_| panic!("Failed to downcast writer actor result."))
            })
    }
}

/// Spawns a background Tokio task that acts as the single writer to the
/// database. The actor owns one connection from the pool and processes write
/// jobs serially, which keeps concurrent per-fund save() calls from ever
/// interleaving on the same key.
pub fn spawn_writer(pool: DbPool) -> WriteHandle {
    // The channel is bounded; 1024 is an arbitrary size.
    let (tx, mut rx) = mpsc::channel::<(
        Job<Box<dyn Any + Send + 'static>>,
        oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>,
    )>(1024);

    tokio::spawn(async move {
        // This connection is held for the lifetime of the actor.
        let mut conn = pool
            .get()
            .expect("Failed to get a connection from the DB pool for the writer actor.");

        while let Some((job, reply_tx)) = rx.recv().await {
            let result: Result<Box<dyn Any + Send + 'static>> =
                conn.immediate_transaction(|c| job(c));

            // Ignore error if the receiver has dropped (e.g. the request was cancelled).
            let _ = reply_tx.send(result);
        }
        // rx.recv() returned None: all WriteHandles dropped, actor terminates.
    });

    WriteHandle { tx }
}
