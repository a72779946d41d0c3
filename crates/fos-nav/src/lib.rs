//! fOS Navigation - Screen reader document navigation
//!
//! Moves a virtual cursor through a live [`fos_dom::Document`] at a chosen
//! granularity (character, word, line, sentence, object, group, table cell)
//! and produces the spoken description of each stop.
//!
//! ```ignore
//! let doc = fos_html::parse("<p>Hello world.</p>")?;
//! let mut nav = NavigationManager::new(&doc, NavConfig::default());
//! nav.navigate(&doc);
//! for description in nav.get_description(&doc) {
//!     println!("{}", description.spoken());
//! }
//! ```

mod classify;
mod config;
mod cursor;
mod description;
mod error;
mod frame;
mod history;
mod manager;
mod page_selection;
mod predicates;
mod role;
mod shifter;
mod speech;
mod traverse;
pub mod walker;

pub use config::{NavConfig, ReadMode};
pub use cursor::{Cursor, CursorSelection};
pub use description::{Earcon, NavDescription, SpeechHint};
pub use error::NavError;
pub use frame::{FrameCommand, FrameMessage, IframeRegistry, Outgoing};
pub use history::{NavigationHistory, NodePredicate, Reverted};
pub use manager::NavigationManager;
pub use page_selection::PageSelection;
pub use predicates::Structure;
pub use role::Role;
pub use shifter::{GRANULARITY_CHAIN, GranularityShifter, HeuristicLayoutTables, LayoutTablePolicy};
pub use speech::{DEFAULT_TRANSCRIPT_SIZE, QueueMode, SpeechQueue, Speaker, Utterance};
pub use traverse::{Leaves, first_leaf, leaves_from, leaves_within};
pub use walker::{Walker, WalkerKind};
