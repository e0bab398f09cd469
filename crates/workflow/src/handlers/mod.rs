//! Consumers of the domain events emitted by transitions.
//!
//! [`LeaveLedger`] runs inside the decision transaction. [`Notifier`] and
//! [`Messenger`] run after commit and never fail the decision.

pub mod leave_ledger;
pub mod messenger;
pub mod notifier;

pub use leave_ledger::LeaveLedger;
pub use messenger::Messenger;
pub use notifier::Notifier;
