use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct CustomerName(String);

impl CustomerName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

/// Brazilian taxpayer number, stored as typed (with or without punctuation).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct Cpf(String);

impl Cpf {
    pub fn new(cpf: impl Into<String>) -> Self {
        Self(cpf.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct Phone(String);

impl Phone {
    pub fn new(phone: impl Into<String>) -> Self {
        Self(phone.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    pub fn new(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    /// Loose shape check: one `@`, something before it and a dotted domain after it.
    pub fn is_well_formed(email: &str) -> bool {
        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };
        !local.is_empty()
            && !domain.contains('@')
            && !email.chars().any(char::is_whitespace)
            && domain
                .split_once('.')
                .map(|(host, tld)| !host.is_empty() && !tld.is_empty())
                .unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct Address(String);

impl Address {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }
}

#[cfg(test)]
mod test {
    use super::Email;

    #[test]
    fn email_shape() {
        assert!(Email::is_well_formed("ana@example.com"));
        assert!(!Email::is_well_formed("ana.example.com"));
        assert!(!Email::is_well_formed("@example.com"));
        assert!(!Email::is_well_formed("ana@example"));
        assert!(!Email::is_well_formed("ana @example.com"));
    }
}
