#![forbid(unsafe_code)]

//! Simulated contact form.
//!
//! Nothing leaves the process: a valid submission raises a confirmation
//! toast and clears the form, an invalid one raises a destructive toast
//! listing what to fix.

use std::fmt;

use qline_i18n::Translator;
use qline_toast::{ToastHandle, ToastProps, ToastVariant, Toaster};
use tracing::{debug, info};

/// A form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    /// Translation key of the field label.
    #[must_use]
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::Name => "contactPage.name",
            Self::Email => "contactPage.email",
            Self::Message => "contactPage.message",
        }
    }
}

/// One validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    /// The field is empty or whitespace.
    Required(Field),
    /// The email address is malformed.
    InvalidEmail,
}

impl FieldError {
    /// The field at fault.
    #[must_use]
    pub const fn field(self) -> Field {
        match self {
            Self::Required(field) => field,
            Self::InvalidEmail => Field::Email,
        }
    }

    /// Translation key of the message shown to the user.
    #[must_use]
    pub const fn message_key(self) -> &'static str {
        match self {
            Self::Required(_) => "contactPage.errorRequired",
            Self::InvalidEmail => "contactPage.errorEmail",
        }
    }

    /// `"<label>: <message>"` in the translator's language.
    #[must_use]
    pub fn describe(self, translator: &Translator) -> String {
        format!(
            "{}: {}",
            translator.t(self.field().label_key()),
            translator.t(self.message_key())
        )
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required(field) => write!(f, "{field:?} is required"),
            Self::InvalidEmail => write!(f, "email address is invalid"),
        }
    }
}

/// Field values as typed by the visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    /// Empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Every problem with the current values, in field order.
    #[must_use]
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push(FieldError::Required(Field::Name));
        }
        let email = self.email.trim();
        if email.is_empty() {
            errors.push(FieldError::Required(Field::Email));
        } else if !is_plausible_email(email) {
            errors.push(FieldError::InvalidEmail);
        }
        if self.message.trim().is_empty() {
            errors.push(FieldError::Required(Field::Message));
        }
        errors
    }

    /// Validate and raise the matching toast.
    ///
    /// On success the form is cleared and the confirmation toast's handle
    /// returned. On failure the form is kept and the errors returned after
    /// the error toast is raised.
    pub fn submit(
        &mut self,
        translator: &Translator,
        toaster: &Toaster,
    ) -> Result<ToastHandle, Vec<FieldError>> {
        let errors = self.validate();
        if !errors.is_empty() {
            let description = errors
                .iter()
                .map(|err| err.describe(translator))
                .collect::<Vec<_>>()
                .join("\n");
            toaster.toast(
                ToastProps::new()
                    .title(translator.t("contactPage.errorTitle"))
                    .description(description)
                    .variant(ToastVariant::Destructive),
            );
            debug!(errors = errors.len(), "contact form rejected");
            return Err(errors);
        }

        let handle = toaster.toast(
            ToastProps::new()
                .title(translator.t("contactPage.successTitle"))
                .description(
                    translator.format("contactPage.successDescription", &[("name", self.name.trim())]),
                ),
        );
        info!(toast = %handle.id(), "contact form submitted");
        *self = Self::default();
        Ok(handle)
    }
}

fn is_plausible_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, _)| !host.is_empty())
        && !domain.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_form_reports_every_field() {
        assert_eq!(
            ContactForm::new().validate(),
            vec![
                FieldError::Required(Field::Name),
                FieldError::Required(Field::Email),
                FieldError::Required(Field::Message),
            ]
        );
    }

    #[test]
    fn whitespace_counts_as_empty() {
        let form = ContactForm::new()
            .name("  ")
            .email("ada@example.com")
            .message("\n");
        assert_eq!(
            form.validate(),
            vec![
                FieldError::Required(Field::Name),
                FieldError::Required(Field::Message),
            ]
        );
    }

    #[test]
    fn email_shape() {
        for ok in ["a@b.co", "first.last@sub.example.org", " ada@example.com "] {
            let form = ContactForm::new().name("A").email(ok).message("hi");
            assert!(form.validate().is_empty(), "{ok}");
        }
        for bad in ["ada", "@example.com", "ada@", "ada@example", "ada@.com", "a@b@c.com", "ada@example.", "a da@x.com"] {
            let form = ContactForm::new().name("A").email(bad).message("hi");
            assert_eq!(form.validate(), vec![FieldError::InvalidEmail], "{bad}");
        }
    }

    #[test]
    fn field_error_points_at_field() {
        assert_eq!(FieldError::InvalidEmail.field(), Field::Email);
        assert_eq!(FieldError::Required(Field::Message).field(), Field::Message);
        assert_eq!(FieldError::InvalidEmail.message_key(), "contactPage.errorEmail");
        assert_eq!(FieldError::Required(Field::Name).to_string(), "Name is required");
    }
}
