//! # tipsplit-service: Serializing Host for the Calculation Engine
//!
//! Runs one [`CalculationEngine`](tipsplit_core::CalculationEngine) inside a
//! tokio task and lets any number of producers and consumers talk to it
//! through a cloneable [`ServiceHandle`].
//!
//! ## Message Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  handle.send(event) ──┐                                                 │
//! │  handle.send(event) ──┤  mpsc (bounded)   ┌─────────────────────────┐  │
//! │  handle.subscribe() ──┼──────────────────►│  CalculationService     │  │
//! │  handle.latest()    ──┤   one command     │   InputAdapter          │  │
//! │  handle.shutdown()  ──┘   at a time       │   CalculationEngine     │  │
//! │                                           └────────────┬────────────┘  │
//! │                                                        │ per result    │
//! │                            ┌───────────────────────────┼──────────┐    │
//! │                            ▼                           ▼          ▼    │
//! │                      ResultStream #0            ResultStream #1  ...   │
//! │                      (unbounded: nothing is dropped)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Subscriptions travel on the same channel as input events, so a stream
//! sees exactly the results of events sent after it was created.
//!
//! ## Example
//! ```rust
//! use tipsplit_core::InputEvent;
//! use tipsplit_service::{CalculationService, ServiceConfig};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), tipsplit_service::ServiceError> {
//! let (handle, task) = CalculationService::spawn(&ServiceConfig::default())?;
//! let mut results = handle.subscribe().await?;
//!
//! handle.send(InputEvent::BillTextChanged { text: "100".into() }).await?;
//! assert_eq!(results.next().await.unwrap().amount_per_person, 100.0);
//!
//! handle.shutdown().await?;
//! task.await.unwrap();
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod service;

pub use error::{ServiceError, ServiceResult};
pub use service::{CalculationService, ResultStream, ServiceConfig, ServiceHandle};
