//! Plain-text transcript: a [`Page`] that prints exchanges as lines.

use std::cell::{Cell, RefCell};
use std::io::Write;

use grandpy_core::page::{BusyTarget, Page};
use grandpy_core::view::{Element, Node};
use grandpy_core::WidgetResult;

const USER_PREFIX: &str = "Vous    : ";
const GRANDPY_PREFIX: &str = "GrandPy : ";
const INDENT: &str = "          ";

/// Text lines for one transcript node.
///
/// The question node gives a single `Vous` line. An answer node gives a
/// `GrandPy` line followed by indented lines for map, intro, article and link.
pub fn lines(element: &Element) -> Vec<String> {
    if element.has_class("chatbox__message") {
        return vec![format!("{USER_PREFIX}{}", element.text_content())];
    }

    let mut out = Vec::new();
    for child in &element.children {
        let line = match child {
            Node::Text(text) => text.clone(),
            Node::Map(map) => format!("[map: {}, {}]", map.latitude, map.longitude),
            Node::Element(el) if el.tag == "img" => continue,
            Node::Element(el) if el.tag == "a" => match el.attribute("href") {
                Some(href) => format!("{} <{href}>", el.text_content()),
                None => el.text_content(),
            },
            Node::Element(el) => el.text_content(),
        };
        if line.trim().is_empty() {
            continue;
        }
        let prefix = if out.is_empty() { GRANDPY_PREFIX } else { INDENT };
        out.push(format!("{prefix}{line}"));
    }
    out
}

/// Prints appended nodes to `out` once they are scrolled into view.
///
/// Nodes wait in `pending` until then, so a node taken back with
/// `remove_from_transcript` is never printed. Busy state is only tracked.
pub struct TerminalPage<W> {
    out: RefCell<W>,
    pending: RefCell<Vec<(usize, Vec<String>)>>,
    busy: Cell<bool>,
    appended: Cell<usize>,
}

impl<W: Write> TerminalPage<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: RefCell::new(out),
            pending: RefCell::new(Vec::new()),
            busy: Cell::new(false),
            appended: Cell::new(0),
        }
    }

    #[cfg(test)]
    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl<W: Write> Page for TerminalPage<W> {
    type Handle = usize;

    fn append_to_transcript(&self, element: &Element) -> WidgetResult<usize> {
        let index = self.appended.get();
        self.appended.set(index + 1);
        self.pending.borrow_mut().push((index, lines(element)));
        Ok(index)
    }

    fn remove_from_transcript(&self, handle: &usize) {
        self.pending.borrow_mut().retain(|(index, _)| index != handle);
    }

    fn scroll_into_view(&self, _handle: &usize) {
        let mut out = self.out.borrow_mut();
        for (_, node) in self.pending.borrow_mut().drain(..) {
            for line in node {
                if let Err(e) = writeln!(out, "{line}") {
                    log::warn!("could not print transcript: {e}");
                    return;
                }
            }
        }
        let _ = out.flush();
    }

    fn toggle_class(&self, target: BusyTarget, _class: &str) -> WidgetResult<bool> {
        if target == BusyTarget::Body {
            self.busy.set(!self.busy.get());
        }
        Ok(self.busy.get())
    }
}
