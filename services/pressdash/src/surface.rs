//! Surface trait: the UI contract the dashboard renders into
//!
//! Keeps the controller independent of any concrete UI stack. The binary
//! ships a terminal surface; a web front end would implement the same trait
//! against its DOM.

use crate::render::ActivityRow;

/// Tone of the shared result banner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerTone {
    Info,
    Success,
    Danger,
}

/// The two operator controls that can submit a processing request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    /// The canned fixed-range button
    ProcessCanned,
    /// The custom-range form's submit button
    ProcessCustom,
}

/// Presentation state of a control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlState {
    /// Enabled, original label
    Ready,
    /// Disabled, busy indicator in place of the label
    Busy,
}

/// Sink for everything the dashboard displays
#[cfg_attr(test, mockall::automock)]
pub trait Surface: Send + Sync {
    /// Write the three counters verbatim
    fn show_counters(&self, pending: i64, published: i64, errors: i64);

    /// Replace the entire activity table with the given rows
    fn replace_activity(&self, rows: Vec<ActivityRow>);

    /// Set the shared result banner. Last write wins; the two action
    /// controls are not serialized against each other.
    fn show_banner(&self, tone: BannerTone, text: &str);

    /// Enable/disable an action control and swap its label
    fn set_control(&self, control: Control, state: ControlState);

    /// Blocking notification for client-side validation failures
    fn alert(&self, message: &str);

    /// Hook invoked after control labels change. Surfaces that inflate
    /// icon glyphs override this; for everyone else it is a no-op.
    fn refresh_icons(&self) {}
}
