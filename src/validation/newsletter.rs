use serde::Deserialize;

use super::non_blank;
use crate::errors::{GinywowError, Result};

const INVALID_EMAIL: &str = "Please enter a valid email address";
const MAX_EMAIL_LENGTH: usize = 254;
const MAX_LOCAL_LENGTH: usize = 64;
const MAX_LABEL_LENGTH: usize = 63;
const MAX_SOURCE_LENGTH: usize = 50;

/// RFC 5322 local-part 允许的 atext 符号
const LOCAL_SPECIALS: &str = ".!#$%&'*+/=?^_`{|}~-";

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterInput {
    pub email: Option<String>,
    pub source: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsubscribeInput {
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubscription {
    /// 已去空白并转小写
    pub email: String,
    pub source: String,
}

pub fn is_valid_email(email: &str) -> bool {
    if email.len() > MAX_EMAIL_LENGTH {
        return false;
    }

    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };

    is_valid_local_part(local) && is_valid_domain(domain)
}

fn is_valid_local_part(local: &str) -> bool {
    !local.is_empty()
        && local.len() <= MAX_LOCAL_LENGTH
        && !local.starts_with('.')
        && !local.ends_with('.')
        && !local.contains("..")
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || LOCAL_SPECIALS.contains(c))
}

fn is_valid_domain(domain: &str) -> bool {
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }

    let labels_ok = labels.iter().all(|label| {
        !label.is_empty()
            && label.len() <= MAX_LABEL_LENGTH
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });

    let tld_ok = labels
        .last()
        .is_some_and(|tld| tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()));

    labels_ok && tld_ok
}

/// 去空白、转小写
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn validated_email(email: Option<&String>) -> Result<String> {
    let email = non_blank(email)
        .map(normalize_email)
        .filter(|e| is_valid_email(e))
        .ok_or_else(|| GinywowError::validation(INVALID_EMAIL))?;
    Ok(email)
}

/// `default_source` 用于未填写 source 的提交
pub fn validate_newsletter(input: &NewsletterInput, default_source: &str) -> Result<NewSubscription> {
    let email = validated_email(input.email.as_ref())?;

    let source = non_blank(input.source.as_ref()).unwrap_or(default_source);
    if source.chars().count() > MAX_SOURCE_LENGTH {
        return Err(GinywowError::validation(format!(
            "Source must be at most {} characters",
            MAX_SOURCE_LENGTH
        )));
    }

    Ok(NewSubscription {
        email,
        source: source.to_string(),
    })
}

/// 退订只需要合法邮箱，返回规范化后的邮箱
pub fn validate_unsubscribe(input: &UnsubscribeInput) -> Result<String> {
    validated_email(input.email.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subscribe(email: &str) -> Result<NewSubscription> {
        validate_newsletter(
            &NewsletterInput {
                email: Some(email.to_string()),
                source: None,
            },
            "website",
        )
    }

    #[test]
    fn test_accepts_common_addresses() {
        for email in [
            "a@b.com",
            "user@domain.tld",
            "first.last+tag@sub.example.co.uk",
            "o'brien@example.ie",
            "x_y-z@my-domain.io",
        ] {
            assert!(is_valid_email(email), "{}", email);
        }
    }

    #[test]
    fn test_rejects_malformed_addresses() {
        for email in [
            "not-an-email",
            "@example.com",
            "user@",
            "user@localhost",
            "user@@example.com",
            "a@b@c.com",
            ".user@example.com",
            "user.@example.com",
            "us..er@example.com",
            "user@-example.com",
            "user@example-.com",
            "user@example..com",
            "user@example.c",
            "user@example.c0m",
            "us er@example.com",
            "user@exa_mple.com",
        ] {
            assert!(!is_valid_email(email), "{}", email);
        }
    }

    #[test]
    fn test_length_limits() {
        let local = "a".repeat(65);
        assert!(!is_valid_email(&format!("{}@example.com", local)));
        let label = "b".repeat(64);
        assert!(!is_valid_email(&format!("a@{}.com", label)));
        let long = format!("a@{}.com", vec!["c".repeat(60); 5].join("."));
        assert!(long.len() > MAX_EMAIL_LENGTH);
        assert!(!is_valid_email(&long));
    }

    #[test]
    fn test_subscription_is_normalized() {
        let sub = subscribe("  A@B.Com ").unwrap();
        assert_eq!(sub.email, "a@b.com");
        assert_eq!(sub.source, "website");
    }

    #[test]
    fn test_invalid_email_message() {
        let err = subscribe("not-an-email").unwrap_err();
        assert_eq!(err.message(), "Please enter a valid email address");

        let err = validate_newsletter(&NewsletterInput::default(), "website").unwrap_err();
        assert_eq!(err.message(), "Please enter a valid email address");
    }

    #[test]
    fn test_source_rules() {
        let sub = validate_newsletter(
            &NewsletterInput {
                email: Some("a@b.com".to_string()),
                source: Some("  footer ".to_string()),
            },
            "website",
        )
        .unwrap();
        assert_eq!(sub.source, "footer");

        let err = validate_newsletter(
            &NewsletterInput {
                email: Some("a@b.com".to_string()),
                source: Some("s".repeat(51)),
            },
            "website",
        )
        .unwrap_err();
        assert_eq!(err.message(), "Source must be at most 50 characters");
    }

    #[test]
    fn test_unsubscribe_normalizes_email() {
        let email = validate_unsubscribe(&UnsubscribeInput {
            email: Some(" Reader@Example.COM".to_string()),
        })
        .unwrap();
        assert_eq!(email, "reader@example.com");
    }
}
