//! Widget configuration.

use serde::{Deserialize, Serialize};

use crate::error::{WidgetError, WidgetResult};

/// Largest zoom level the map service accepts.
pub const MAX_MAP_ZOOM: u8 = 22;

/// Configuration for the chat widget.
///
/// Every field has a default matching the stock GrandPy page, so the browser
/// binding works with no config object at all.
///
/// | Field                  | Default             |
/// |------------------------|---------------------|
/// | `endpoint`             | `/question`         |
/// | `formSelector`         | `#chatbox-form`     |
/// | `transcriptSelector`   | `#chatbox`          |
/// | `submitButtonSelector` | `.chatbox__button`  |
/// | `busyClass`            | `waiting`           |
/// | `imageFolder`          | `/static/img`       |
/// | `mapZoom`              | `10`                |
/// | `linkLabel`            | `En savoir plus`    |
/// | `logLevel`             | `info`              |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WidgetConfig {
    /// Path the form is posted to.
    pub endpoint: String,
    pub form_selector: String,
    /// Container the exchanges are appended to.
    pub transcript_selector: String,
    pub submit_button_selector: String,
    /// Class toggled on `<body>` and the submit button while waiting.
    pub busy_class: String,
    /// Folder holding `user.jpg` and `grandpy.jpg`, without trailing slash.
    pub image_folder: String,
    pub map_zoom: u8,
    pub link_label: String,
    pub log_level: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            endpoint: "/question".into(),
            form_selector: "#chatbox-form".into(),
            transcript_selector: "#chatbox".into(),
            submit_button_selector: ".chatbox__button".into(),
            busy_class: "waiting".into(),
            image_folder: "/static/img".into(),
            map_zoom: 10,
            link_label: "En savoir plus".into(),
            log_level: "info".into(),
        }
    }
}

impl WidgetConfig {
    /// Returns `self` if [`validate`](Self::validate) finds nothing wrong.
    pub fn validated(self) -> WidgetResult<Self> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(WidgetError::InvalidConfig(errors))
        }
    }

    /// Returns a list of validation error messages (empty = valid).
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.endpoint.starts_with('/') {
            errors.push(format!(
                "endpoint must be an absolute path, got '{}'",
                self.endpoint
            ));
        }

        for (name, value) in [
            ("formSelector", &self.form_selector),
            ("transcriptSelector", &self.transcript_selector),
            ("submitButtonSelector", &self.submit_button_selector),
        ] {
            if value.trim().is_empty() {
                errors.push(format!("{name} is required"));
            }
        }

        if self.busy_class.trim().is_empty() || self.busy_class.contains(char::is_whitespace) {
            errors.push("busyClass must be a single class name".to_string());
        }

        if self.map_zoom > MAX_MAP_ZOOM {
            errors.push(format!("mapZoom must be at most {MAX_MAP_ZOOM}"));
        }

        if self.log_level.parse::<log::LevelFilter>().is_err() {
            errors.push(format!("logLevel '{}' is not a log level", self.log_level));
        }

        errors
    }

    /// Parsed log level; falls back to `Info` on garbage.
    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }

    /// URL of an image inside [`image_folder`](Self::image_folder).
    pub fn image_url(&self, file: &str) -> String {
        format!("{}/{}", self.image_folder.trim_end_matches('/'), file)
    }
}
