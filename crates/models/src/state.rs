use std::fmt;

use serde_json::Value;

use crate::base::BaseModel;
use crate::entity::{Entity, Model};

/// A named region. `name` reads as `""` until assigned.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct State {
    base: BaseModel,
}

impl State {
    pub fn name(&self) -> &str {
        self.base.str_field("name")
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.base.put("name", Value::String(name.into()));
    }
}

impl Model for State {
    fn class_name(&self) -> &'static str { Self::CLASS_NAME }
    fn base(&self) -> &BaseModel { &self.base }
    fn base_mut(&mut self) -> &mut BaseModel { &mut self.base }
}

impl Entity for State {
    const CLASS_NAME: &'static str = "State";

    fn from_base(base: BaseModel) -> Self { Self { base } }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.base.fmt_repr(f, Self::CLASS_NAME)
    }
}
