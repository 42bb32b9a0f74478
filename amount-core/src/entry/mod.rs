//! The amount-entry engine.
//!
//! Keystrokes go through the [`validator`], which keeps the buffer a
//! well-formed signed-term chain. The [`evaluator`] reduces a chain to one
//! decimal value, the [`policy`] decides whether a buffer may be saved, and
//! the [`session`] ties them together into the reduce-then-save flow of the
//! commit key.

pub mod common;
pub mod evaluator;
pub mod policy;
pub mod session;
pub mod validator;

pub use common::{format_two_decimals, has_internal_operator};
pub use evaluator::{EvalError, Expression, MalformedReason, Operator, evaluate};
pub use policy::{AmountError, check_savable, finalize, is_savable};
pub use session::{CommitLabel, CommitOutcome, EntryPhase, EntrySession, Transition, transition};
pub use validator::{apply, apply_all, is_key_enabled};
