//! Widget error types.

use thiserror::Error;

/// Convenience alias for widget operations.
pub type WidgetResult<T> = Result<T, WidgetError>;

/// Errors raised while wiring or rendering the widget.
///
/// Network failures during a submission are not represented here: they are
/// logged by [`crate::widget::ChatWidget::submit`] and never surfaced.
#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Invalid configuration: {}", .0.join("; "))]
    InvalidConfig(Vec<String>),

    #[error("Page error: {0}")]
    Page(String),
}
