//! State-driven modal presentation for Elm-style terminal UIs.
//!
//! Modal state in TUI apps tends to accumulate as boolean-ish flag fields
//! plus request/confirm/cancel message plumbing, and the flag and its
//! payload can drift apart. This crate drives presentation from the shape
//! of the domain state instead: an alert is presented exactly while an
//! `Option<T>` holds a value, and dismissing it writes `None` back through
//! the same [`Binding`]. Enum-shaped state joins in through [`CasePath`]
//! projections, so "this specific case is present" can drive a presentation
//! without a dedicated optional field.
//!
//! The moving parts:
//!
//! - [`StateCell`] / [`Binding`]: two-way references over externally owned
//!   state, with derived lenses, case projections, and a presence flag.
//! - [`AlertPresenter`] / [`SheetPresenter`]: reconcile a binding with the
//!   presentation lifecycle each UI pass, route keys, and write absent back
//!   on dismissal.
//! - [`Alert`]: the directive builder (title/message/actions as functions
//!   of the presented value).
//! - [`DismissAction`] / [`PresentationContext`]: an explicit dismiss
//!   capability threaded to content builders; no ambient lookup.
//! - [`Element`] + [`render`]: the modal view vocabulary and a `ratatui`
//!   seam for hosts that do not already have one.

pub mod alert;
pub mod binding;
pub mod case_path;
pub mod dismiss;
pub mod element;
pub mod presenter;
pub mod render;
pub mod theme;

#[macro_use]
pub mod macros;

pub use alert::{Alert, AlertButton, ButtonRole};
pub use binding::{Binding, StateCell};
pub use case_path::CasePath;
pub use dismiss::{DismissAction, PresentationContext};
pub use element::{Alignment, Element, FocusId, Layer, LayoutConstraint};
pub use presenter::{AlertPresenter, EndReason, PresentEvent, SheetPresenter};
pub use render::{render_element, render_layers};
pub use theme::{Theme, ThemeVariant};
