use crate::error::ContactError;
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

pub const SENT_MESSAGE: &str = "메시지가 성공적으로 전송되었습니다!";

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn new(name: &str, email: &str, message: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            message: message.trim().to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), ContactError> {
        if self.name.is_empty() || self.email.is_empty() || self.message.is_empty() {
            return Err(ContactError::MissingField);
        }
        if !is_valid_email(&self.email) {
            return Err(ContactError::InvalidEmail);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("kim@example.com"));
        assert!(is_valid_email("a.b@c.co.kr"));
        assert!(!is_valid_email("kim@example"));
        assert!(!is_valid_email("kim example@x.com"));
        assert!(!is_valid_email("@x.com"));
    }

    #[test]
    fn inputs_are_trimmed_before_checks() {
        let form = ContactForm::new("  ", "kim@example.com", "hello");
        assert_eq!(form.validate(), Err(ContactError::MissingField));

        let form = ContactForm::new(" 김 ", " kim@example.com ", " 안녕하세요 ");
        assert_eq!(form.name, "김");
        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn bad_email_message() {
        let err = ContactForm::new("김", "nope", "hi").validate().unwrap_err();
        assert_eq!(err.to_string(), "유효한 이메일 주소를 입력해주세요.");
    }
}
