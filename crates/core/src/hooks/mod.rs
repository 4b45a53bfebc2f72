//! Hook-style state for function components.
//!
//! An [`Owner`] stores named cells for one component instance. Each render
//! pass gets a fresh [`Hooks`] that hands out [`StateCell`]s by explicit name
//! or by call order.

mod cell;
mod owner;
mod runtime;

pub use cell::StateCell;
pub use owner::{Owner, OwnerId, RenderRequests};
pub use runtime::{Hooks, StateDecl};
