//! The page the widget renders into.

use crate::error::WidgetResult;
use crate::view::Element;

/// Elements whose class list carries the busy flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusyTarget {
    Body,
    SubmitButton,
}

/// DOM operations the widget needs.
///
/// The browser binding implements this over web-sys; tests use an in-memory
/// page.
pub trait Page {
    /// Handle on an appended node, used to scroll it into view.
    type Handle;

    /// Materialize `element` and append it to the transcript container.
    fn append_to_transcript(&self, element: &Element) -> WidgetResult<Self::Handle>;

    /// Take back a node appended by [`append_to_transcript`](Self::append_to_transcript).
    fn remove_from_transcript(&self, handle: &Self::Handle);

    fn scroll_into_view(&self, handle: &Self::Handle);

    /// Toggle `class` on `target`. Returns whether the class is now present.
    fn toggle_class(&self, target: BusyTarget, class: &str) -> WidgetResult<bool>;
}
