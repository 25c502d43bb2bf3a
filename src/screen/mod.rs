//! Navigation screen: model, update, render
//!
//! [`NavigationModel`] holds the state and turns [`Message`]s into
//! [`Command`]s; [`NavigationScreen`] runs it against a location provider and
//! a map display.

pub mod message;
pub mod model;
pub mod runtime;

pub use message::{Command, Message, Update};
pub use model::NavigationModel;
pub use runtime::NavigationScreen;
