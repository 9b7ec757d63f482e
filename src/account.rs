//! Account and message forms
//!
//! Signup and login only gate the logged-in flag. Nothing here is checked
//! against stored credentials. The contact and feedback forms are validated
//! and acknowledged but not stored.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use thiserror::Error;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern is valid"));

static AADHAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{12}$").expect("aadhar pattern is valid"));

const MIN_NAME_LEN: usize = 3;
const MIN_PASSWORD_LEN: usize = 8;
const MAX_RATING: u8 = 5;

/// First rule a form broke. `Display` is the text shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Full name must be at least 3 characters.")]
    NameTooShort,
    #[error("Age must be between 1 and 120.")]
    AgeOutOfRange,
    #[error("Aadhar number must be exactly 12 digits.")]
    InvalidAadhar,
    #[error("Please select a gender.")]
    MissingGender,
    #[error("Please enter a valid email.")]
    InvalidEmail,
    #[error("Password must be at least 8 characters.")]
    PasswordTooShort,
    #[error("Email and password are required.")]
    MissingCredentials,
    #[error("All fields are required.")]
    MissingContactFields,
    #[error("Please enter a valid email address.")]
    InvalidContactEmail,
    #[error("Please choose a rating from 1 to 5.")]
    RatingOutOfRange,
    #[error("Please enter your feedback.")]
    MissingFeedback,
}

/// Profile kept for the logged-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    pub full_name: String,
    pub age: u8,
    pub aadhar: String,
    pub gender: String,
    pub email: String,
    pub medical_history: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupForm {
    pub full_name: String,
    pub age: String,
    pub aadhar: String,
    pub gender: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub medical_history: String,
}

impl SignupForm {
    /// Check the form and build the profile it describes.
    ///
    /// The password is checked but not kept.
    ///
    /// # Errors
    ///
    /// Returns the first failing rule, in form order.
    pub fn validate(&self) -> Result<UserProfile, ValidationError> {
        if self.full_name.trim().chars().count() < MIN_NAME_LEN {
            return Err(ValidationError::NameTooShort);
        }

        let age = self
            .age
            .trim()
            .parse::<u8>()
            .ok()
            .filter(|age| (1..=120).contains(age))
            .ok_or(ValidationError::AgeOutOfRange)?;

        if !AADHAR.is_match(&self.aadhar) {
            return Err(ValidationError::InvalidAadhar);
        }

        if self.gender.trim().is_empty() {
            return Err(ValidationError::MissingGender);
        }

        if !EMAIL.is_match(&self.email) {
            return Err(ValidationError::InvalidEmail);
        }

        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort);
        }

        Ok(UserProfile {
            full_name: self.full_name.trim().to_string(),
            age,
            aadhar: self.aadhar.clone(),
            gender: self.gender.trim().to_string(),
            email: self.email.clone(),
            medical_history: self.medical_history.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    /// # Errors
    ///
    /// [`ValidationError::MissingCredentials`] if either field is blank,
    /// [`ValidationError::InvalidEmail`] if the email is malformed.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.email.trim().is_empty() || self.password.trim().is_empty() {
            return Err(ValidationError::MissingCredentials);
        }
        if !EMAIL.is_match(&self.email) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(())
    }
}

/// Home page "get in touch" form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub const ACKNOWLEDGEMENT: &'static str =
        "Thank you for your message! We will get back to you soon.";

    /// # Errors
    ///
    /// [`ValidationError::MissingContactFields`] if any field is blank,
    /// [`ValidationError::InvalidContactEmail`] if the email is malformed.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if [&self.name, &self.email, &self.message]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            return Err(ValidationError::MissingContactFields);
        }
        if !EMAIL.is_match(&self.email) {
            return Err(ValidationError::InvalidContactEmail);
        }
        Ok(())
    }
}

/// Star rating plus free text
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedbackForm {
    #[serde(default)]
    pub rating: u8,
    pub feedback: String,
}

impl FeedbackForm {
    pub const ACKNOWLEDGEMENT: &'static str = "Thank you for your feedback!";

    /// # Errors
    ///
    /// [`ValidationError::RatingOutOfRange`] unless a star was picked,
    /// [`ValidationError::MissingFeedback`] if the text is blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=MAX_RATING).contains(&self.rating) {
            return Err(ValidationError::RatingOutOfRange);
        }
        if self.feedback.trim().is_empty() {
            return Err(ValidationError::MissingFeedback);
        }
        Ok(())
    }
}
