//! Client side of the arena battle system
//!
//! [`machine`] holds the pure state machine, [`BattleController`] runs it
//! against a [`Transport`], and [`BattleMirror`] is the client's copy of the
//! session it is driving.
//!
//! # Example
//!
//! ```ignore
//! use arena_client::{BattleController, HttpTransport, HttpTransportConfig};
//!
//! let transport = HttpTransport::new(HttpTransportConfig::new("http://localhost:8080"))?;
//! let mut controller = BattleController::new(transport);
//!
//! controller.start(request).await;
//! controller.select_move(Some("ember".into())).await;
//! let state = controller.confirm_move().await;
//! println!("{:?}", state.message);
//! ```

mod controller;
pub mod machine;
mod mirror;
pub mod transport;


pub use controller::{BattleController, TRANSPORT_ERROR_MESSAGE};
pub use machine::{reduce, ClientEvent, ClientPhase, ClientState, Effect};
pub use mirror::BattleMirror;
pub use transport::{HttpTransport, HttpTransportConfig, LocalTransport, Transport, TransportError};

pub use arena_protocol::{BattleId, BattleType, CreatureId, MoveId, PlayerId, StartRequest};
