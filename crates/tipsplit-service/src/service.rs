//! # Calculation Service
//!
//! The task that owns the engine, and the handle used to reach it.
//!
//! ## Lifecycle
//! ```text
//! CalculationService::new ──► (service, handle)
//!        │
//!        ▼
//! tokio::spawn(service.run())
//!        │
//!        ├── Command::Input      → adapter.apply → engine emits → streams
//!        ├── Command::Subscribe  → engine.subscribe(forwarder)
//!        ├── Command::Snapshot   → reply with inputs + latest result
//!        ├── Command::Shutdown   → leave loop
//!        └── channel closed      → leave loop (all handles dropped)
//!        │
//!        ▼
//! engine dropped ──► every ResultStream yields None
//! ```

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use tipsplit_core::{
    CalculationEngine, CalculationResult, InputAdapter, InputEvent, InputSnapshot, ListenerId,
};

use crate::error::{ServiceError, ServiceResult};

// =============================================================================
// Constants
// =============================================================================

/// Default depth of the command channel.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for the calculation service.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Commands buffered before `send` waits for the service to catch up.
    pub channel_capacity: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl ServiceConfig {
    /// Validates the configuration.
    pub fn validate(&self) -> ServiceResult<()> {
        if self.channel_capacity == 0 {
            return Err(ServiceError::InvalidConfig(
                "channel_capacity must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Commands
// =============================================================================

enum Command {
    Input {
        event: InputEvent,
        ack: oneshot::Sender<bool>,
    },
    Subscribe {
        reply: oneshot::Sender<ResultStream>,
    },
    Snapshot {
        reply: oneshot::Sender<(InputSnapshot, CalculationResult)>,
    },
    SubscriberCount {
        reply: oneshot::Sender<usize>,
    },
    Shutdown,
}

// =============================================================================
// Result Stream
// =============================================================================

/// Ordered results for one consumer.
///
/// Backed by an unbounded channel: a slow consumer delays nothing and
/// loses nothing.
#[derive(Debug)]
pub struct ResultStream {
    rx: mpsc::UnboundedReceiver<CalculationResult>,
}

impl ResultStream {
    /// Waits for the next result. `None` once the service has stopped and
    /// every buffered result has been read.
    pub async fn next(&mut self) -> Option<CalculationResult> {
        self.rx.recv().await
    }

    /// Returns a buffered result without waiting.
    pub fn try_next(&mut self) -> Option<CalculationResult> {
        self.rx.try_recv().ok()
    }
}

// =============================================================================
// Service Handle
// =============================================================================

/// Cloneable handle for talking to a running service.
#[derive(Clone)]
pub struct ServiceHandle {
    command_tx: mpsc::Sender<Command>,
}

impl ServiceHandle {
    /// Sends one raw input event and waits until it has been applied.
    ///
    /// ## Returns
    /// - `Ok(true)` if the engine recomputed (every stream got one result)
    /// - `Ok(false)` if the event was rejected and nothing changed
    pub async fn send(&self, event: InputEvent) -> ServiceResult<bool> {
        let (ack, ack_rx) = oneshot::channel();
        self.command(Command::Input { event, ack }).await?;
        ack_rx
            .await
            .map_err(|_| ServiceError::ChannelClosed("input acknowledgement dropped".into()))
    }

    /// Opens a stream of every result emitted after this call.
    pub async fn subscribe(&self) -> ServiceResult<ResultStream> {
        let (reply, reply_rx) = oneshot::channel();
        self.command(Command::Subscribe { reply }).await?;
        reply_rx
            .await
            .map_err(|_| ServiceError::ChannelClosed("subscription reply dropped".into()))
    }

    /// Returns the latest result.
    pub async fn latest(&self) -> ServiceResult<CalculationResult> {
        Ok(self.snapshot().await?.1)
    }

    /// Returns the engine's current inputs.
    pub async fn inputs(&self) -> ServiceResult<InputSnapshot> {
        Ok(self.snapshot().await?.0)
    }

    /// Returns the number of open result streams.
    pub async fn subscriber_count(&self) -> ServiceResult<usize> {
        let (reply, reply_rx) = oneshot::channel();
        self.command(Command::SubscriberCount { reply }).await?;
        reply_rx
            .await
            .map_err(|_| ServiceError::ChannelClosed("subscriber count reply dropped".into()))
    }

    /// Asks the service to stop. Commands already queued are handled first.
    pub async fn shutdown(&self) -> ServiceResult<()> {
        self.command(Command::Shutdown).await
    }

    /// Returns true once the service task has stopped.
    pub fn is_closed(&self) -> bool {
        self.command_tx.is_closed()
    }

    async fn snapshot(&self) -> ServiceResult<(InputSnapshot, CalculationResult)> {
        let (reply, reply_rx) = oneshot::channel();
        self.command(Command::Snapshot { reply }).await?;
        reply_rx
            .await
            .map_err(|_| ServiceError::ChannelClosed("snapshot reply dropped".into()))
    }

    async fn command(&self, command: Command) -> ServiceResult<()> {
        self.command_tx
            .send(command)
            .await
            .map_err(|_| ServiceError::ChannelClosed("command channel".into()))
    }
}

// =============================================================================
// Service
// =============================================================================

/// Single owner of the engine and the input adapter.
pub struct CalculationService {
    /// The engine; only this task touches it.
    engine: CalculationEngine,

    /// Local edit state of the input controls.
    adapter: InputAdapter,

    /// Every producer's commands, in arrival order.
    command_rx: mpsc::Receiver<Command>,

    /// Open streams and the engine listener feeding each.
    subscriptions: Vec<(ListenerId, mpsc::UnboundedSender<CalculationResult>)>,
}

impl CalculationService {
    /// Creates a service and returns it with its handle.
    pub fn new(config: &ServiceConfig) -> ServiceResult<(Self, ServiceHandle)> {
        config.validate()?;

        let (command_tx, command_rx) = mpsc::channel(config.channel_capacity);

        let service = CalculationService {
            engine: CalculationEngine::new(),
            adapter: InputAdapter::new(),
            command_rx,
            subscriptions: Vec::new(),
        };

        Ok((service, ServiceHandle { command_tx }))
    }

    /// Creates a service and spawns it on the current tokio runtime.
    pub fn spawn(config: &ServiceConfig) -> ServiceResult<(ServiceHandle, JoinHandle<()>)> {
        let (service, handle) = Self::new(config)?;
        let task = tokio::spawn(service.run());
        Ok((handle, task))
    }

    /// Runs the command loop until shutdown or until every handle is dropped.
    ///
    /// This should be spawned as a background task.
    pub async fn run(mut self) {
        info!("Calculation service starting");

        while let Some(command) = self.command_rx.recv().await {
            match command {
                Command::Input { event, ack } => {
                    let applied = self.adapter.apply(event, &mut self.engine);
                    self.prune_closed_subscriptions();
                    // The sender may have given up waiting; the event still counts.
                    let _ = ack.send(applied);
                }

                Command::Subscribe { reply } => self.add_subscription(reply),

                Command::Snapshot { reply } => {
                    let _ = reply.send((self.engine.inputs(), self.engine.latest()));
                }

                Command::SubscriberCount { reply } => {
                    self.prune_closed_subscriptions();
                    let _ = reply.send(self.subscriptions.len());
                }

                Command::Shutdown => {
                    info!("Calculation service shutting down");
                    break;
                }
            }
        }

        info!(
            emissions = self.engine.emission_count(),
            "Calculation service stopped"
        );
    }

    fn add_subscription(&mut self, reply: oneshot::Sender<ResultStream>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let forward = tx.clone();
        let id = self.engine.subscribe(move |result: &CalculationResult| {
            // A closed stream is pruned after the current command.
            let _ = forward.send(*result);
        });

        if reply.send(ResultStream { rx }).is_err() {
            debug!("Subscriber left before its stream was delivered");
            self.engine.unsubscribe(id);
            return;
        }

        self.subscriptions.push((id, tx));
        debug!(subscribers = self.subscriptions.len(), "Result stream opened");
    }

    fn prune_closed_subscriptions(&mut self) {
        let engine = &mut self.engine;
        self.subscriptions.retain(|(id, tx)| {
            if tx.is_closed() {
                engine.unsubscribe(*id);
                debug!("Result stream closed by consumer");
                false
            } else {
                true
            }
        });
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
