//! The chat widget: submit a question, render the answer.

use async_trait::async_trait;
use log::{debug, error, info, warn};

use crate::config::WidgetConfig;
use crate::error::WidgetResult;
use crate::models::{AnswerResponse, QuestionForm};
use crate::page::{BusyTarget, Page};
use crate::view::{self, Exchange};

/// Sends the serialized form to the question endpoint.
#[async_trait(?Send)]
pub trait QuestionSender {
    type Error: std::error::Error;

    async fn send(&self, form: &QuestionForm) -> Result<AnswerResponse, Self::Error>;
}

/// Which path a submission took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Positive,
    Negative,
    /// The request, decoding or rendering failed. Only logged.
    Failed,
}

/// Chat widget bound to a page and a question sender.
///
/// Nothing prevents a second submission while one is in flight; each one
/// toggles the busy flag independently.
pub struct ChatWidget<P, S> {
    page: P,
    sender: S,
    config: WidgetConfig,
}

impl<P, S> ChatWidget<P, S>
where
    P: Page,
    S: QuestionSender,
{
    pub fn new(page: P, sender: S, config: WidgetConfig) -> Self {
        Self {
            page,
            sender,
            config,
        }
    }

    /// Post `form` and render the answer into the transcript.
    ///
    /// Answers that do not echo the question get the one from `form`.
    /// The busy flag is raised before the request and lowered after a
    /// successful render. On failure the error is logged and the flag is
    /// left raised.
    pub async fn submit(&self, form: &QuestionForm) -> Submission {
        self.toggle_busy_state();
        debug!("submitting question {:?}", form.question().unwrap_or_default());

        let mut data = match self.sender.send(form).await {
            Ok(data) => data,
            Err(e) => {
                error!("question request failed: {e}");
                return Submission::Failed;
            }
        };

        if data.question.is_empty() {
            data.question = form.question().unwrap_or_default().to_string();
        }

        let (rendered, outcome) = if data.found {
            (self.render_positive(&data), Submission::Positive)
        } else {
            (self.render_negative(&data), Submission::Negative)
        };
        if let Err(e) = rendered {
            error!("failed to render answer: {e}");
            return Submission::Failed;
        }

        self.toggle_busy_state();
        info!("answer rendered (found: {})", data.found);
        outcome
    }

    /// Append the question and the full answer, then scroll to the question.
    pub fn render_positive(&self, data: &AnswerResponse) -> WidgetResult<P::Handle> {
        self.render(view::positive_exchange(data, &self.config))
    }

    /// Append the question and the negative answer, then scroll to the question.
    pub fn render_negative(&self, data: &AnswerResponse) -> WidgetResult<P::Handle> {
        self.render(view::negative_exchange(data, &self.config))
    }

    /// Either both nodes land in the transcript or neither does.
    fn render(&self, exchange: Exchange) -> WidgetResult<P::Handle> {
        let question = self.page.append_to_transcript(&exchange.question)?;
        if let Err(e) = self.page.append_to_transcript(&exchange.answer) {
            self.page.remove_from_transcript(&question);
            return Err(e);
        }
        self.page.scroll_into_view(&question);
        Ok(question)
    }

    /// Flip the busy class on the body and the submit button.
    ///
    /// Returns whether the body is now busy, or `None` if the page refused.
    pub fn toggle_busy_state(&self) -> Option<bool> {
        let class = self.config.busy_class.as_str();
        let body = self.page.toggle_class(BusyTarget::Body, class);
        if let Err(e) = self.page.toggle_class(BusyTarget::SubmitButton, class) {
            warn!("cannot toggle busy class on submit button: {e}");
        }
        match body {
            Ok(busy) => Some(busy),
            Err(e) => {
                warn!("cannot toggle busy class on body: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::collections::{HashMap, HashSet};
    use std::rc::Rc;

    use super::*;
    use crate::error::WidgetError;
    use crate::view::Element;

    #[derive(Default)]
    struct PageState {
        transcript: Vec<Element>,
        scrolled: Vec<usize>,
        classes: HashMap<BusyTarget, HashSet<String>>,
        /// Appends fail once the transcript holds this many nodes.
        fail_at: Option<usize>,
    }

    #[derive(Clone, Default)]
    struct MemoryPage(Rc<RefCell<PageState>>);

    impl MemoryPage {
        fn is_busy(&self, target: BusyTarget) -> bool {
            self.0
                .borrow()
                .classes
                .get(&target)
                .is_some_and(|c| c.contains("waiting"))
        }
    }

    impl Page for MemoryPage {
        type Handle = usize;

        fn append_to_transcript(&self, element: &Element) -> WidgetResult<usize> {
            let mut state = self.0.borrow_mut();
            if state.fail_at.is_some_and(|n| state.transcript.len() >= n) {
                return Err(WidgetError::Page("transcript detached".into()));
            }
            state.transcript.push(element.clone());
            Ok(state.transcript.len() - 1)
        }

        fn remove_from_transcript(&self, handle: &usize) {
            self.0.borrow_mut().transcript.remove(*handle);
        }

        fn scroll_into_view(&self, handle: &usize) {
            self.0.borrow_mut().scrolled.push(*handle);
        }

        fn toggle_class(&self, target: BusyTarget, class: &str) -> WidgetResult<bool> {
            let mut state = self.0.borrow_mut();
            let classes = state.classes.entry(target).or_default();
            if classes.remove(class) {
                Ok(false)
            } else {
                classes.insert(class.to_string());
                Ok(true)
            }
        }
    }

    #[derive(Debug, thiserror::Error)]
    #[error("connection refused")]
    struct Offline;

    struct StubSender {
        reply: Option<AnswerResponse>,
        page: MemoryPage,
        busy_while_sending: Cell<bool>,
        sent: RefCell<Vec<QuestionForm>>,
    }

    impl StubSender {
        fn new(reply: Option<AnswerResponse>, page: &MemoryPage) -> Self {
            Self {
                reply,
                page: page.clone(),
                busy_while_sending: Cell::new(false),
                sent: RefCell::new(Vec::new()),
            }
        }
    }

    #[async_trait(?Send)]
    impl QuestionSender for StubSender {
        type Error = Offline;

        async fn send(&self, form: &QuestionForm) -> Result<AnswerResponse, Offline> {
            self.busy_while_sending.set(
                self.page.is_busy(BusyTarget::Body) && self.page.is_busy(BusyTarget::SubmitButton),
            );
            self.sent.borrow_mut().push(form.clone());
            self.reply.clone().ok_or(Offline)
        }
    }

    fn positive() -> AnswerResponse {
        AnswerResponse {
            found: true,
            question: "Où est OpenClassrooms ?".into(),
            answer: "Bien sûr mon poussin ! Voici ce que tu cherches : ".into(),
            address: Some("7 Cité Paradis, 75010 Paris, France".into()),
            latitude: Some(48.8747265),
            longitude: Some(2.3505517),
            intro: Some("Au fait, cela me rappelle :".into()),
            title: Some("Cité Paradis".into()),
            summary: Some("La cité Paradis est une voie publique.".into()),
            url: Some("https://fr.wikipedia.org/wiki/Cit%C3%A9_Paradis".into()),
        }
    }

    fn negative() -> AnswerResponse {
        AnswerResponse {
            found: false,
            question: "Salut".into(),
            answer: "Mes oreilles ne sont plus de toute jeunesse, peux-tu répéter ?".into(),
            address: None,
            latitude: None,
            longitude: None,
            intro: None,
            title: None,
            summary: None,
            url: None,
        }
    }

    fn widget(reply: Option<AnswerResponse>) -> (ChatWidget<MemoryPage, StubSender>, MemoryPage) {
        let page = MemoryPage::default();
        let sender = StubSender::new(reply, &page);
        (
            ChatWidget::new(page.clone(), sender, WidgetConfig::default()),
            page,
        )
    }

    #[tokio::test]
    async fn positive_answer_appends_question_and_full_answer() {
        let (widget, page) = widget(Some(positive()));
        let form = QuestionForm::with_question("Où est OpenClassrooms ?");

        assert_eq!(widget.submit(&form).await, Submission::Positive);

        let state = page.0.borrow();
        assert_eq!(state.transcript.len(), 2);
        assert!(state.transcript[0].has_class("chatbox__message"));
        let answer = &state.transcript[1];
        assert!(answer.has_class("chatbox__answer"));
        assert_eq!(
            answer.find_by_class("answer__intro").map(Element::text_content),
            Some("Au fait, cela me rappelle :".to_string())
        );
        assert_eq!(
            answer.find_by_class("answer__article").map(Element::text_content),
            Some("La cité Paradis est une voie publique.".to_string())
        );
        assert_eq!(
            answer
                .find_by_class("answer__link")
                .and_then(|l| l.attribute("href")),
            Some("https://fr.wikipedia.org/wiki/Cit%C3%A9_Paradis")
        );
        assert_eq!(answer.maps().len(), 1);
        assert_eq!(state.scrolled, vec![0]);
        assert_eq!(widget.sender.sent.borrow()[0], form);
    }

    #[tokio::test]
    async fn negative_answer_appends_only_negative_node() {
        let (widget, page) = widget(Some(negative()));

        assert_eq!(
            widget.submit(&QuestionForm::with_question("Salut")).await,
            Submission::Negative
        );

        let state = page.0.borrow();
        assert_eq!(state.transcript.len(), 2);
        let answer = &state.transcript[1];
        assert!(answer.has_class("chatbox__answer--negative"));
        assert!(answer.maps().is_empty());
        assert!(answer.find_by_class("answer__article").is_none());
        assert!(answer.find_by_class("answer__link").is_none());
        assert_eq!(state.scrolled, vec![0]);
    }

    #[tokio::test]
    async fn missing_question_is_taken_from_form() {
        let mut reply = negative();
        reply.question.clear();
        let (widget, page) = widget(Some(reply));

        widget.submit(&QuestionForm::with_question("Où est Lyon ?")).await;

        let state = page.0.borrow();
        assert_eq!(state.transcript[0].text_content(), "Où est Lyon ?");
    }

    #[tokio::test]
    async fn busy_flag_is_raised_during_request_and_lowered_after() {
        let (widget, page) = widget(Some(positive()));

        widget.submit(&QuestionForm::with_question("Paris")).await;

        assert!(widget.sender.busy_while_sending.get());
        assert!(!page.is_busy(BusyTarget::Body));
        assert!(!page.is_busy(BusyTarget::SubmitButton));
    }

    #[tokio::test]
    async fn failed_request_is_logged_and_leaves_busy_flag_on() {
        let (widget, page) = widget(None);

        assert_eq!(
            widget.submit(&QuestionForm::with_question("Paris")).await,
            Submission::Failed
        );

        assert!(page.0.borrow().transcript.is_empty());
        assert!(page.is_busy(BusyTarget::Body));
        assert!(page.is_busy(BusyTarget::SubmitButton));
    }

    #[tokio::test]
    async fn render_failure_counts_as_failed_submission() {
        let (widget, page) = widget(Some(positive()));
        page.0.borrow_mut().fail_at = Some(0);

        assert_eq!(
            widget.submit(&QuestionForm::with_question("Paris")).await,
            Submission::Failed
        );
        assert!(page.0.borrow().scrolled.is_empty());
        assert!(page.is_busy(BusyTarget::Body));
    }

    #[tokio::test]
    async fn failed_answer_append_takes_the_question_back() {
        let (widget, page) = widget(Some(positive()));
        page.0.borrow_mut().fail_at = Some(1);

        assert_eq!(
            widget.submit(&QuestionForm::with_question("Paris")).await,
            Submission::Failed
        );

        let state = page.0.borrow();
        assert!(state.transcript.is_empty());
        assert!(state.scrolled.is_empty());
    }

    #[tokio::test]
    async fn consecutive_submissions_accumulate_in_transcript() {
        let (widget, page) = widget(Some(negative()));
        widget.submit(&QuestionForm::with_question("un")).await;
        widget.submit(&QuestionForm::with_question("deux")).await;

        let state = page.0.borrow();
        assert_eq!(state.transcript.len(), 4);
        assert_eq!(state.scrolled, vec![0, 2]);
    }

    #[test]
    fn toggle_busy_state_flips_both_targets() {
        let (widget, page) = widget(None);
        assert_eq!(widget.toggle_busy_state(), Some(true));
        assert!(page.is_busy(BusyTarget::SubmitButton));
        assert_eq!(widget.toggle_busy_state(), Some(false));
        assert!(!page.is_busy(BusyTarget::SubmitButton));
    }
}
