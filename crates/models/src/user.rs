use std::fmt;

use serde_json::Value;

use crate::base::BaseModel;
use crate::entity::{Entity, Model};

pub const EMAIL: &str = "email";
pub const PASSWORD: &str = "password";
pub const FIRST_NAME: &str = "first_name";
pub const LAST_NAME: &str = "last_name";

/// Account holder. Profile fields read as `""` and stay out of
/// `to_dict()` until they are assigned.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct User {
    base: BaseModel,
}

impl User {
    pub fn email(&self) -> &str { self.base.str_field(EMAIL) }
    pub fn password(&self) -> &str { self.base.str_field(PASSWORD) }
    pub fn first_name(&self) -> &str { self.base.str_field(FIRST_NAME) }
    pub fn last_name(&self) -> &str { self.base.str_field(LAST_NAME) }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.base.put(EMAIL, Value::String(email.into()));
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.base.put(PASSWORD, Value::String(password.into()));
    }

    pub fn set_first_name(&mut self, first_name: impl Into<String>) {
        self.base.put(FIRST_NAME, Value::String(first_name.into()));
    }

    pub fn set_last_name(&mut self, last_name: impl Into<String>) {
        self.base.put(LAST_NAME, Value::String(last_name.into()));
    }
}

impl Model for User {
    fn class_name(&self) -> &'static str { Self::CLASS_NAME }
    fn base(&self) -> &BaseModel { &self.base }
    fn base_mut(&mut self) -> &mut BaseModel { &mut self.base }
}

impl Entity for User {
    const CLASS_NAME: &'static str = "User";

    fn from_base(base: BaseModel) -> Self { Self { base } }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.base.fmt_repr(f, Self::CLASS_NAME)
    }
}
