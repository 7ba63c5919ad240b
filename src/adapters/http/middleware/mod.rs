//! HTTP middleware: the edge gate wrapper and the route guard.

mod gate;
mod guard;

pub use gate::{edge_gate, GateState};
pub use guard::{route_guard, CurrentUser, GuardRejection};
