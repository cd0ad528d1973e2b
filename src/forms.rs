//! Form state and validation for login, compose and listing creation.

use crate::config::{MAX_POST_CHARS, MIN_PASSWORD_CHARS, NEAR_LIMIT_CHARS};
use crate::models::{parse_price, Category, Condition};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

/// Placeholder image attached by the "add image" button
pub const PLACEHOLDER_IMAGE: &str =
    "https://images.unsplash.com/photo-1579546929518-9e396f3cc809?w=800&q=80";

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"))
}

/// Inline error messages keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.insert(field.to_string(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
        f.write_str(&parts.join("; "))
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub show_password: bool,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            show_password: false,
        }
    }

    pub fn toggle_password_visibility(&mut self) {
        self.show_password = !self.show_password;
    }

    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();

        if self.email.is_empty() {
            errors.add("email", "Email is required");
        } else if !email_pattern().is_match(&self.email) {
            errors.add("email", "Email is invalid");
        }

        if self.password.is_empty() {
            errors.add("password", "Password is required");
        } else if self.password.chars().count() < MIN_PASSWORD_CHARS {
            errors.add(
                "password",
                format!("Password must be at least {} characters", MIN_PASSWORD_CHARS),
            );
        }

        errors.into_result()
    }
}

/// Compose modal for posts, replies and edits
#[derive(Debug, Clone, Default)]
pub struct ComposeForm {
    pub content: String,
    pub media_url: Option<String>,
    pub reply_to: Option<String>,
    pub editing: Option<String>,
}

impl ComposeForm {
    pub fn reply(post_id: impl Into<String>) -> Self {
        Self {
            reply_to: Some(post_id.into()),
            ..Self::default()
        }
    }

    /// Prefill from an existing post for the edit flow
    pub fn edit(post_id: impl Into<String>, content: impl Into<String>, media_url: Option<String>) -> Self {
        Self {
            content: content.into(),
            media_url,
            editing: Some(post_id.into()),
            ..Self::default()
        }
    }

    /// Negative once over the limit
    pub fn remaining_chars(&self) -> i64 {
        MAX_POST_CHARS as i64 - self.content.chars().count() as i64
    }

    pub fn is_over_limit(&self) -> bool {
        self.remaining_chars() < 0
    }

    pub fn is_near_limit(&self) -> bool {
        (0..=NEAR_LIMIT_CHARS).contains(&self.remaining_chars())
    }

    pub fn add_image(&mut self) {
        self.media_url = Some(PLACEHOLDER_IMAGE.to_string());
    }

    pub fn remove_image(&mut self) {
        self.media_url = None;
    }

    pub fn submit_label(&self) -> &'static str {
        if self.editing.is_some() {
            "Update"
        } else {
            "Tweet"
        }
    }

    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        if self.content.trim().is_empty() {
            errors.add("content", "Post cannot be empty");
        } else if self.is_over_limit() {
            errors.add(
                "content",
                format!("Post must be at most {} characters", MAX_POST_CHARS),
            );
        }
        errors.into_result()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Market listing creation form
#[derive(Debug, Clone)]
pub struct ListingForm {
    pub title: String,
    pub description: String,
    /// Raw price text; blank means "make an offer"
    pub price: String,
    pub location: String,
    pub category: Category,
    pub condition: Condition,
    pub is_new: bool,
    pub allow_bargaining: bool,
    pub image: Option<String>,
}

impl Default for ListingForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            price: String::new(),
            location: String::new(),
            category: Category::default(),
            condition: Condition::default(),
            is_new: true,
            allow_bargaining: false,
            image: None,
        }
    }
}

/// Payload handed to the backend when listing an item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingDraft {
    pub title: String,
    pub description: String,
    pub price: Option<f64>,
    pub location: String,
    pub category: Category,
    pub condition: Condition,
    pub is_new: bool,
    pub allow_bargaining: bool,
    pub image: Option<String>,
}

impl ListingForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        if self.title.trim().is_empty() {
            errors.add("title", "Title is required");
        }
        if self.description.trim().is_empty() {
            errors.add("description", "Description is required");
        } else if self.description.chars().count() > MAX_POST_CHARS {
            errors.add(
                "description",
                format!("Description must be at most {} characters", MAX_POST_CHARS),
            );
        }
        if self.location.trim().is_empty() {
            errors.add("location", "Location is required");
        }
        errors.into_result()
    }

    /// Validate and build the payload. Price text that does not parse is
    /// treated as "make an offer".
    pub fn to_draft(&self) -> Result<ListingDraft, FieldErrors> {
        self.validate()?;
        Ok(ListingDraft {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            price: parse_price(&self.price),
            location: self.location.trim().to_string(),
            category: self.category,
            condition: self.condition,
            is_new: self.is_new,
            allow_bargaining: self.allow_bargaining,
            image: self.image.clone(),
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_requires_fields() {
        let errors = LoginForm::default().validate().unwrap_err();
        assert_eq!(errors.get("email"), Some("Email is required"));
        assert_eq!(errors.get("password"), Some("Password is required"));
    }

    #[test]
    fn test_login_checks_format_and_length() {
        let errors = LoginForm::new("not-an-email", "12345").validate().unwrap_err();
        assert_eq!(errors.get("email"), Some("Email is invalid"));
        assert_eq!(
            errors.get("password"),
            Some("Password must be at least 6 characters")
        );

        assert!(LoginForm::new("jane@example.com", "123456").validate().is_ok());
    }

    #[test]
    fn test_password_visibility_toggle() {
        let mut form = LoginForm::default();
        form.toggle_password_visibility();
        assert!(form.show_password);
        form.toggle_password_visibility();
        assert!(!form.show_password);
    }

    #[test]
    fn test_compose_counter() {
        let mut form = ComposeForm::default();
        assert_eq!(form.remaining_chars(), 280);
        assert!(form.validate().is_err());

        form.content = "x".repeat(265);
        assert!(form.is_near_limit());
        assert!(!form.is_over_limit());
        assert!(form.validate().is_ok());

        form.content = "x".repeat(281);
        assert!(form.is_over_limit());
        assert!(!form.is_near_limit());
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_compose_whitespace_is_empty() {
        let form = ComposeForm {
            content: "   ".to_string(),
            ..ComposeForm::default()
        };
        assert_eq!(form.validate().unwrap_err().get("content"), Some("Post cannot be empty"));
    }

    #[test]
    fn test_compose_edit_prefills() {
        let mut form = ComposeForm::edit("p1", "hello", None);
        assert_eq!(form.submit_label(), "Update");
        form.add_image();
        assert_eq!(form.media_url.as_deref(), Some(PLACEHOLDER_IMAGE));
        form.reset();
        assert_eq!(form.submit_label(), "Tweet");
        assert!(form.content.is_empty());
    }

    #[test]
    fn test_listing_form_requires_title_description_location() {
        let errors = ListingForm::default().validate().unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_listing_draft_parses_price() {
        let mut form = ListingForm {
            title: "Desk lamp".to_string(),
            description: "Works fine".to_string(),
            location: "Denver, CO".to_string(),
            price: "$30".to_string(),
            ..ListingForm::default()
        };
        assert_eq!(form.to_draft().unwrap().price, Some(30.0));

        form.price = "free-ish".to_string();
        assert_eq!(form.to_draft().unwrap().price, None);

        form.reset();
        assert!(form.is_new);
        assert!(!form.allow_bargaining);
        assert_eq!(form.category, Category::Electronics);
        assert_eq!(form.condition, Condition::New);
    }
}
