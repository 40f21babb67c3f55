//! Alfred script-filter feedback.
//!
//! - `variables`: variable stores and the feedback → item → modifier lookup chain.
//! - `icon`, `modifier`, `item`, `feedback`: the entity tree.
//! - `serializer`: ordered JSON emission and `arg` encoding.

pub mod error;
pub mod feedback;
pub mod icon;
pub mod item;
pub mod modifier;
pub mod serializer;
pub mod variables;

pub use error::FeedbackError;
pub use feedback::{Feedback, ItemMut, ModifierMut};
pub use icon::{Icon, IconKind};
pub use item::{Item, abbreviate_home};
pub use modifier::{Modifier, ModifierKey};
pub use serializer::ArgVars;
pub use variables::{VarScope, Variables};
