use std::thread::sleep;
use std::time::Duration;

use serde_json::{json, Value};

use super::dict;
use crate::base::{isoformat, now};
use crate::store::memory::MemoryStore;
use crate::{Entity, Model, ModelError, ObjectStore, Persist, State};

#[test]
fn fresh_state_has_class_name_and_string_id() {
    let st = State::fresh();
    assert_eq!(st.class_name(), "State");
    assert!(uuid::Uuid::parse_str(st.id()).is_ok());
    assert_eq!(st.base().created_at, st.base().updated_at);
}

#[test]
fn created_state_is_registered() {
    let mut store = MemoryStore::default();
    let st = State::create(&mut store);
    let key = format!("State.{}", st.borrow().id());
    assert!(store.all().contains_key(&key));

    st.borrow_mut().set_name("Utah");
    assert_eq!(store.all()[&key].borrow().to_dict(), st.borrow().to_dict());
}

#[test]
fn fresh_state_is_not_registered() {
    let store = MemoryStore::default();
    let _st = State::fresh();
    assert!(store.all().is_empty());
}

#[test]
fn name_defaults_to_empty_and_stays_out_of_dict() {
    let mut st = State::fresh();
    assert_eq!(st.name(), "");
    assert!(!st.to_dict().contains_key("name"));

    st.set_name("California");
    assert_eq!(st.name(), "California");
    assert_eq!(st.to_dict()["name"], json!("California"));
}

#[test]
fn two_states_have_unique_ids() {
    assert_ne!(State::fresh().id(), State::fresh().id());
}

#[test]
fn sequential_states_have_increasing_timestamps() {
    let first = State::fresh();
    sleep(Duration::from_millis(50));
    let second = State::fresh();
    assert!(first.base().created_at < second.base().created_at);
    assert!(first.base().updated_at < second.base().updated_at);
}

#[test]
fn display_shows_raw_attributes() {
    let dt = now();
    let mut st = State::fresh();
    st.base_mut().id = "123456".into();
    st.base_mut().created_at = dt;
    st.base_mut().updated_at = dt;

    let text = st.to_string();
    assert!(text.starts_with("[State] (123456) "));
    assert!(text.contains("\"id\": \"123456\""));
    assert!(text.contains(&format!("\"created_at\": {dt:?}")));
    assert!(text.contains(&format!("\"updated_at\": {dt:?}")));
    assert!(!text.contains("__class__"));
}

#[test]
fn rehydrates_from_dict() -> Result<(), ModelError> {
    let dt = now();
    let iso = isoformat(&dt);
    let st = State::from_dict(&dict(json!({ "id": "345", "created_at": iso, "updated_at": iso })))?;
    assert_eq!(st.id(), "345");
    assert_eq!(st.base().created_at, dt);
    assert_eq!(st.base().updated_at, dt);
    Ok(())
}

#[test]
fn rehydrating_with_null_fields_is_a_type_error() {
    let err = State::from_dict(&dict(json!({ "id": null, "created_at": null, "updated_at": null }))).unwrap_err();
    assert!(matches!(err, ModelError::Type(_)));
}

#[test]
fn to_dict_feeds_back_into_from_dict() -> Result<(), ModelError> {
    let mut st = State::fresh();
    st.set_name("Nevada");
    let copy = State::from_dict(&st.to_dict())?;
    assert_eq!(copy, st);
    Ok(())
}

#[test]
fn save_refreshes_updated_at_and_writes_snapshot() -> Result<(), ModelError> {
    let mut store = MemoryStore::default();
    let st = State::create(&mut store);
    sleep(Duration::from_millis(50));
    let first = st.borrow().base().updated_at;

    st.save(&mut store)?;
    let second = st.borrow().base().updated_at;
    assert!(first < second);

    sleep(Duration::from_millis(50));
    st.save(&mut store)?;
    assert!(second < st.borrow().base().updated_at);
    assert!(st.borrow().base().created_at < second);
    assert_eq!(store.saves, 2);

    let saved = store.saved().expect("snapshot written");
    assert_eq!(saved[&st.borrow().key()], Value::Object(st.borrow().to_dict()));
    Ok(())
}

#[test]
fn saving_one_state_writes_unsaved_changes_of_others() -> Result<(), ModelError> {
    let mut store = MemoryStore::default();
    let a = State::create(&mut store);
    let b = State::create(&mut store);
    a.borrow_mut().set_name("California");
    b.save(&mut store)?;

    let saved = store.saved().expect("snapshot written");
    assert_eq!(saved[&a.borrow().key()]["name"], json!("California"));
    Ok(())
}

#[test]
fn reassigned_id_keeps_a_single_record() -> Result<(), ModelError> {
    let mut store = MemoryStore::default();
    let st = State::create(&mut store);
    st.borrow_mut().base_mut().id = "123456".into();
    st.save(&mut store)?;

    let keys: Vec<&String> = store.all().keys().collect();
    assert_eq!(keys, vec!["State.123456"]);
    let saved = store.saved().expect("snapshot written");
    assert_eq!(saved.len(), 1);
    assert_eq!(saved["State.123456"]["id"], json!("123456"));
    Ok(())
}

#[test]
fn reassigned_id_is_rekeyed_when_another_object_saves() -> Result<(), ModelError> {
    let mut store = MemoryStore::default();
    let st = State::create(&mut store);
    let other = State::create(&mut store);
    st.borrow_mut().base_mut().id = "654321".into();
    other.save(&mut store)?;

    assert_eq!(store.all().len(), 2);
    assert!(store.all().contains_key("State.654321"));
    assert!(store.saved().expect("snapshot written").contains_key("State.654321"));
    Ok(())
}

#[test]
fn save_fails_while_the_state_is_borrowed() {
    let mut store = MemoryStore::default();
    let st = State::create(&mut store);
    let _reader = st.borrow();
    assert!(matches!(st.save(&mut store), Err(ModelError::Borrowed(_))));
    assert_eq!(store.saves, 0);
}

#[test]
fn store_save_fails_while_an_object_is_mutably_borrowed() {
    let mut store = MemoryStore::default();
    let st = State::create(&mut store);
    let _writer = st.borrow_mut();
    assert!(matches!(store.save(), Err(ModelError::Borrowed(_))));
}

#[test]
fn to_dict_output_is_exact() {
    let dt = now();
    let mut st = State::fresh();
    st.base_mut().id = "123456".into();
    st.base_mut().created_at = dt;
    st.base_mut().updated_at = dt;

    let expected = dict(json!({
        "id": "123456",
        "__class__": "State",
        "created_at": isoformat(&dt),
        "updated_at": isoformat(&dt),
    }));
    assert_eq!(st.to_dict(), expected);
}

#[test]
fn to_dict_contains_added_attributes() -> Result<(), ModelError> {
    let mut st = State::fresh();
    st.base_mut().set("middle_name", "Alx")?;
    st.base_mut().set("my_number", 98)?;
    assert_eq!(st.base().get("middle_name"), Some(&json!("Alx")));
    assert_eq!(st.to_dict()["my_number"], json!(98));
    Ok(())
}

#[test]
fn to_dict_timestamps_are_strings() {
    let d = State::fresh().to_dict();
    assert!(d["id"].is_string());
    assert!(d["created_at"].is_string());
    assert!(d["updated_at"].is_string());
    assert_eq!(d["__class__"], json!("State"));
}

#[test]
fn to_dict_differs_from_raw_attributes() {
    let st = State::fresh();
    assert_ne!(&st.to_dict(), st.base().attributes());
}
