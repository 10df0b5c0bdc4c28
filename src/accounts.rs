use crate::{
    error::BookingError,
    types::{ProviderProfile, User, UserType},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(email(message = "a valid email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "a password is required"))]
    pub password: String,
    pub user_type: UserType,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(email(message = "a valid email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "a password is required"))]
    pub password: String,
    pub confirm_password: String,
    #[validate(length(min = 1, message = "a first name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "a last name is required"))]
    pub last_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub profession: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub company: String,
    pub user_type: UserType,
}

fn non_empty(value: String) -> Option<String> {
    Some(value).filter(|value| !value.trim().is_empty())
}

/// There is no credential check: logging in creates a fresh session user.
pub fn login(form: LoginForm) -> Result<User, BookingError> {
    form.validate()?;
    let name = form
        .email
        .split('@')
        .next()
        .unwrap_or_default()
        .to_string();

    Ok(User {
        email: form.email,
        user_type: form.user_type,
        id: Uuid::new_v4(),
        name,
        phone: None,
        profession: None,
        description: None,
        company: None,
    })
}

/// Profession, description and company are only kept for providers.
pub fn register(form: RegisterForm) -> Result<User, BookingError> {
    if form.password != form.confirm_password {
        return Err(BookingError::PasswordMismatch);
    }
    form.validate()?;

    let is_provider = form.user_type == UserType::Provider;
    let provider_field = |value: String| if is_provider { non_empty(value) } else { None };

    Ok(User {
        email: form.email,
        user_type: form.user_type,
        id: Uuid::new_v4(),
        name: format!("{} {}", form.first_name, form.last_name),
        phone: non_empty(form.phone),
        profession: provider_field(form.profession),
        description: provider_field(form.description),
        company: provider_field(form.company),
    })
}

/// Directory entry for a provider account, `None` for consumers.
pub fn provider_profile(user: &User) -> Option<ProviderProfile> {
    if !user.is_provider() {
        return None;
    }
    Some(ProviderProfile {
        id: user.id,
        name: user.name.clone(),
        profession: user.profession.clone().unwrap_or_default(),
        description: user.description.clone().unwrap_or_default(),
        rating: 0.0,
        reviews: 0,
    })
}

/// Case-insensitive match on name or profession. An empty term matches everyone.
pub fn search_providers<'a>(
    providers: &'a [ProviderProfile],
    term: &str,
) -> Vec<&'a ProviderProfile> {
    let term = term.trim().to_lowercase();
    providers
        .iter()
        .filter(|provider| {
            provider.name.to_lowercase().contains(&term)
                || provider.profession.to_lowercase().contains(&term)
        })
        .collect()
}
