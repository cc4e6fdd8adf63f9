//! Contact address matching
//!
//! A contact may carry several phone numbers and email addresses; a call
//! targets exactly one of them, picked by index.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phone {
    pub number: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
    pub address: String,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    #[serde(default)]
    pub phones: Vec<Phone>,
    #[serde(default)]
    pub emails: Vec<Email>,
}

/// The single address of a contact that was matched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MatchedAddress {
    Phone {
        number: String,
        label: String,
    },
    Email {
        address: String,
        label: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedContact {
    pub name: String,
    pub address: MatchedAddress,
}

impl MatchedContact {
    pub fn new(name: impl Into<String>, address: MatchedAddress) -> Self {
        Self {
            name: name.into(),
            address,
        }
    }

    /// Match the phone number at `index`, or `None` if out of range
    pub fn from_phone(contact: &Contact, index: usize) -> Option<Self> {
        let phone = contact.phones.get(index)?;
        Some(Self::new(
            contact.name.clone(),
            MatchedAddress::Phone {
                number: phone.number.clone(),
                label: phone.label.clone(),
            },
        ))
    }

    /// Match the email address at `index`, or `None` if out of range
    pub fn from_email(contact: &Contact, index: usize) -> Option<Self> {
        let email = contact.emails.get(index)?;
        Some(Self::new(
            contact.name.clone(),
            MatchedAddress::Email {
                address: email.address.clone(),
                label: email.label.clone(),
            },
        ))
    }
}
