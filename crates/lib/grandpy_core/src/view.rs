//! Transcript view tree.
//!
//! Answers are first rendered into a small, target independent element
//! tree. The browser binding materializes it with web-sys, the terminal
//! front-end prints it as text, and tests inspect it directly.

use log::warn;

use crate::config::WidgetConfig;
use crate::models::AnswerResponse;

pub const USER_AVATAR: &str = "user.jpg";
pub const GRANDPY_AVATAR: &str = "grandpy.jpg";

/// A node of the view tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    /// Inserted as a text node, never parsed as markup.
    Text(String),
    /// Placeholder for the map service, rendered as `div.answer__map`.
    Map(MapView),
}

/// What the map service needs to draw one answer.
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: u8,
    /// Marker title.
    pub title: String,
}

impl MapView {
    pub const CLASS: &'static str = "answer__map";
}

/// An HTML element with classes, attributes and children.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: &'static str,
    pub classes: Vec<&'static str>,
    pub attributes: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            classes: Vec::new(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn class(mut self, class: &'static str) -> Self {
        self.classes.push(class);
        self
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attributes.push((name, value.into()));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    pub fn map(mut self, map: MapView) -> Self {
        self.children.push(Node::Map(map));
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| *c == class)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Concatenated text of all descendant text nodes, like DOM `textContent`.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }

    /// Depth-first search for the first descendant element carrying `class`.
    pub fn find_by_class(&self, class: &str) -> Option<&Element> {
        self.children.iter().find_map(|node| match node {
            Node::Element(el) if el.has_class(class) => Some(el),
            Node::Element(el) => el.find_by_class(class),
            _ => None,
        })
    }

    /// Maps among the descendants, in document order.
    pub fn maps(&self) -> Vec<&MapView> {
        let mut out = Vec::new();
        collect_maps(&self.children, &mut out);
        out
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => collect_text(&el.children, out),
            Node::Map(_) => {}
        }
    }
}

fn collect_maps<'a>(nodes: &'a [Node], out: &mut Vec<&'a MapView>) {
    for node in nodes {
        match node {
            Node::Map(map) => out.push(map),
            Node::Element(el) => collect_maps(&el.children, out),
            Node::Text(_) => {}
        }
    }
}

/// The two nodes one answer adds to the transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct Exchange {
    pub question: Element,
    pub answer: Element,
}

/// `div.chatbox__message`: the user's avatar and question.
pub fn user_question(data: &AnswerResponse, config: &WidgetConfig) -> Element {
    Element::new("div")
        .class("chatbox__message")
        .child(
            Element::new("img")
                .class("message__avatar")
                .attr("src", config.image_url(USER_AVATAR))
                .attr("alt", "user avatar"),
        )
        .child(
            Element::new("div")
                .class("message__content")
                .text(data.question.as_str()),
        )
}

fn grandpy_avatar(config: &WidgetConfig) -> Element {
    Element::new("img")
        .class("answer__avatar")
        .attr("src", config.image_url(GRANDPY_AVATAR))
        .attr("alt", "Grandpy avatar")
}

/// `div.chatbox__answer` with the answer, map, intro, article and link.
///
/// Missing optional fields degrade: absent text renders empty, an absent or
/// invalid location drops the map, an absent URL drops the link.
pub fn grandpy_answer(data: &AnswerResponse, config: &WidgetConfig) -> Element {
    let content = format!("{}{}", data.answer, data.address.as_deref().unwrap_or_default());

    let mut answer = Element::new("div")
        .class("chatbox__answer")
        .child(grandpy_avatar(config))
        .child(Element::new("p").class("answer__content").text(content));

    match data.location() {
        Some((latitude, longitude)) => {
            answer = answer.map(MapView {
                latitude,
                longitude,
                zoom: config.map_zoom,
                title: data.answer.clone(),
            });
        }
        None => warn!("positive answer without a usable location, map skipped"),
    }

    answer = answer
        .child(
            Element::new("p")
                .class("answer__intro")
                .text(data.intro.as_deref().unwrap_or_default()),
        )
        .child(
            Element::new("p")
                .class("answer__article")
                .text(data.summary.as_deref().unwrap_or_default()),
        );

    match &data.url {
        Some(url) => {
            let mut link = Element::new("a")
                .class("answer__link")
                .attr("href", url.as_str());
            if let Some(title) = &data.title {
                link = link.attr("title", title.as_str());
            }
            answer = answer.child(link.text(config.link_label.as_str()));
        }
        None => warn!("positive answer without an article url, link skipped"),
    }

    answer
}

/// `div.chatbox__answer.chatbox__answer--negative`: avatar and answer only.
pub fn grandpy_negative_answer(data: &AnswerResponse, config: &WidgetConfig) -> Element {
    Element::new("div")
        .class("chatbox__answer")
        .class("chatbox__answer--negative")
        .child(grandpy_avatar(config))
        .child(
            Element::new("p")
                .class("answer__content")
                .text(data.answer.as_str()),
        )
}

/// Question and positive answer.
pub fn positive_exchange(data: &AnswerResponse, config: &WidgetConfig) -> Exchange {
    Exchange {
        question: user_question(data, config),
        answer: grandpy_answer(data, config),
    }
}

/// Question and negative answer.
pub fn negative_exchange(data: &AnswerResponse, config: &WidgetConfig) -> Exchange {
    Exchange {
        question: user_question(data, config),
        answer: grandpy_negative_answer(data, config),
    }
}
