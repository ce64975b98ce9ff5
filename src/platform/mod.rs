//! Platform abstraction layer
//!
//! Binds the controller to a concrete document:
//! - `web`: the browser DOM and LocalStorage (WASM only)
//! - `memory`: headless in-memory document for native runs and tests
//!
//! `bootstrap` is the one entry point both share: wait for the document,
//! resolve config, look up the form and select, then attach.

pub mod memory;
#[cfg(target_arch = "wasm32")]
pub mod web;

use std::rc::Rc;

use crate::config::AutofillConfig;
use crate::controller::{AutofillController, SelectControl, SubmitSource};
use crate::ready::{DocumentReadiness, when_ready};
use crate::storage::KeyValueStore;
use crate::{AutofillError, Result};

/// Element-by-id lookup on a parsed document
pub trait ElementSource {
    type Form: SubmitSource;
    type Select: SelectControl + 'static;

    fn form(&self, id: &str) -> Result<Self::Form>;
    fn select(&self, id: &str) -> Result<Self::Select>;

    /// Text of the element with this id, if it exists
    fn text_content(&self, id: &str) -> Option<String>;
}

/// Config from `explicit` JSON, else the page's inline block, else defaults
pub fn resolve_config<D>(document: &D, explicit: Option<&str>) -> Result<AutofillConfig>
where
    D: ElementSource + ?Sized,
{
    let json = match explicit {
        Some(json) => Some(json.to_string()),
        None => document.text_content(AutofillConfig::ELEMENT_ID),
    };
    match json {
        Some(json) => AutofillConfig::from_json(&json),
        None => Ok(AutofillConfig::default()),
    }
}

/// Look up the form and select named by `config`
pub fn bind_elements<D>(document: &D, config: &AutofillConfig) -> Result<(D::Form, D::Select)>
where
    D: ElementSource + ?Sized,
{
    let form = document.form(&config.form_id)?;
    let select = document.select(&config.select_id)?;
    Ok((form, select))
}

/// Resolve config, bind elements and attach a controller. The document must
/// already be parsed.
pub fn setup<D, S>(
    document: &D,
    store: Rc<S>,
    explicit: Option<&str>,
) -> Result<AutofillController<S>>
where
    D: ElementSource + ?Sized,
    S: KeyValueStore + 'static,
{
    let config = resolve_config(document, explicit)?;
    let (form, select) = bind_elements(document, &config)?;
    if !form.mark_attached() {
        return Err(AutofillError::AlreadyAttached {
            id: config.form_id,
        });
    }

    let controller = AutofillController::from_config(store, &config);
    controller.attach(&form, select);

    log::info!(
        "Login autofill attached (#{} -> #{}, key '{}')",
        config.select_id,
        config.form_id,
        config.storage_key
    );
    Ok(controller)
}

/// Run `setup` once the document is parsed. Failures are logged and leave
/// the page without autofill. Returns `true` if setup ran synchronously.
pub fn bootstrap<D, S>(document: D, store: Rc<S>, explicit: Option<String>) -> bool
where
    D: DocumentReadiness + ElementSource + Clone + 'static,
    S: KeyValueStore + 'static,
{
    let target = document.clone();
    when_ready(&document, move || {
        match setup(&target, store, explicit.as_deref()) {
            Ok(_) => {}
            Err(err @ AutofillError::AlreadyAttached { .. }) => log::warn!("{}", err),
            Err(err) => log::error!("Login autofill disabled: {}", err),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::memory::{MemoryDocument, MemoryForm, MemorySelect};
    use super::*;
    use crate::storage::MemoryStore;
    use proptest::prelude::*;

    fn login_page(doc: MemoryDocument) -> (MemoryDocument, MemoryForm, MemorySelect) {
        let form = MemoryForm::new();
        let select = MemorySelect::new(["alice", "bob"]);
        let doc = doc
            .with_form("loginform", &form)
            .with_select("users", &select);
        (doc, form, select)
    }

    #[test]
    fn test_scenario_remembers_across_reloads() {
        let store = Rc::new(MemoryStore::new());

        // First visit: nothing stored, default option shown
        let (doc, form, select) = login_page(MemoryDocument::parsed());
        assert!(bootstrap(doc, store.clone(), None));
        assert_eq!(select.value(), "alice");

        select.set_value("bob");
        form.submit();
        assert_eq!(store.get("uid").as_deref(), Some("bob"));

        // Reload: fresh document, same storage
        let (doc, _form, select) = login_page(MemoryDocument::parsed());
        bootstrap(doc, store.clone(), None);
        assert_eq!(select.value(), "bob");
    }

    #[test]
    fn test_restore_from_prepopulated_store() {
        let store = Rc::new(MemoryStore::with_entry("uid", "bob"));
        let (doc, _form, select) = login_page(MemoryDocument::parsed());

        bootstrap(doc, store, None);
        assert_eq!(select.value(), "bob");
    }

    #[test]
    fn test_absent_key_keeps_default() {
        let store = Rc::new(MemoryStore::new());
        let (doc, _form, select) = login_page(MemoryDocument::parsed());

        bootstrap(doc, store.clone(), None);
        assert_eq!(select.value(), "alice");
        assert!(store.is_empty());
    }

    #[test]
    fn test_unmatched_stored_value_deselects() {
        let store = Rc::new(MemoryStore::with_entry("uid", "carol"));
        let (doc, _form, select) = login_page(MemoryDocument::parsed());

        bootstrap(doc, store, None);
        assert_eq!(select.selected_index(), None);
    }

    #[test]
    fn test_deferred_until_parsed() {
        let store = Rc::new(MemoryStore::with_entry("uid", "bob"));
        let (doc, form, select) = login_page(MemoryDocument::loading());

        assert!(!bootstrap(doc.clone(), store, None));
        assert_eq!(doc.lookups(), 0);
        assert_eq!(form.handler_count(), 0);
        assert_eq!(select.value(), "alice");

        doc.finish_parsing();
        assert_eq!(doc.lookups(), 2);
        assert_eq!(form.handler_count(), 1);
        assert_eq!(select.value(), "bob");
    }

    #[test]
    fn test_immediate_when_already_parsed() {
        let store = Rc::new(MemoryStore::new());
        let (doc, form, _select) = login_page(MemoryDocument::parsed());

        assert!(bootstrap(doc.clone(), store, None));
        assert_eq!(doc.lookups(), 2);
        assert_eq!(form.handler_count(), 1);
    }

    #[test]
    fn test_second_bootstrap_keeps_single_handler() {
        let store = Rc::new(MemoryStore::with_entry("uid", "bob"));
        let (doc, form, select) = login_page(MemoryDocument::parsed());

        bootstrap(doc.clone(), store.clone(), None);
        bootstrap(doc.clone(), store.clone(), None);
        assert_eq!(form.handler_count(), 1);

        let err = setup(&doc, store.clone(), None).err().unwrap();
        assert!(matches!(err, AutofillError::AlreadyAttached { ref id } if id == "loginform"));

        select.set_value("alice");
        form.submit();
        assert_eq!(select.value(), "alice");
        assert_eq!(store.get("uid").as_deref(), Some("alice"));
    }

    #[test]
    fn test_missing_select_is_reported() {
        let store = Rc::new(MemoryStore::with_entry("uid", "bob"));
        let form = MemoryForm::new();
        let doc = MemoryDocument::parsed().with_form("loginform", &form);

        let err = setup(&doc, store.clone(), None).err().unwrap();
        assert!(matches!(err, AutofillError::MissingElement { ref id } if id == "users"));
        assert_eq!(form.handler_count(), 0);

        // bootstrap logs and carries on
        assert!(bootstrap(doc, store, None));
    }

    #[test]
    fn test_wrong_element_type_is_reported() {
        let select = MemorySelect::new(["alice"]);
        let doc = MemoryDocument::parsed()
            .with_select("loginform", &select)
            .with_select("users", &select);

        let err = setup(&doc, Rc::new(MemoryStore::new()), None).err().unwrap();
        assert!(matches!(err, AutofillError::WrongElementType { expected: "<form>", .. }));
    }

    #[test]
    fn test_inline_config_block() {
        let store = Rc::new(MemoryStore::new());
        let form = MemoryForm::new();
        let select = MemorySelect::new(["alice", "bob"]);
        let doc = MemoryDocument::parsed()
            .with_form("signin", &form)
            .with_select("accounts", &select)
            .with_text(
                AutofillConfig::ELEMENT_ID,
                r#"{ "storage_key": "last_user", "form_id": "signin", "select_id": "accounts" }"#,
            );

        let controller = setup(&doc, store.clone(), None).unwrap();
        assert_eq!(controller.key(), "last_user");

        select.set_value("bob");
        form.submit();
        assert_eq!(store.get("last_user").as_deref(), Some("bob"));
        assert_eq!(store.get("uid"), None);
    }

    #[test]
    fn test_explicit_config_wins_over_inline() {
        let doc = MemoryDocument::parsed().with_text(AutofillConfig::ELEMENT_ID, "not json");
        let config = resolve_config(&doc, Some(r#"{ "storage_key": "k" }"#)).unwrap();
        assert_eq!(config.storage_key, "k");

        assert!(matches!(resolve_config(&doc, None), Err(AutofillError::Config(_))));
    }

    #[test]
    fn test_invalid_inline_config_does_not_attach() {
        let (doc, form, _select) = login_page(MemoryDocument::parsed());
        let doc = doc.with_text(AutofillConfig::ELEMENT_ID, r#"{ "select_id": "" }"#);

        assert!(setup(&doc, Rc::new(MemoryStore::new()), None).is_err());
        assert_eq!(form.handler_count(), 0);
    }

    proptest! {
        #[test]
        fn prop_submit_stores_selected_value(uid in "\\PC*") {
            let store = Rc::new(MemoryStore::new());
            let form = MemoryForm::new();
            let select = MemorySelect::new(["alice".to_string(), uid.clone()]);
            let doc = MemoryDocument::parsed()
                .with_form("loginform", &form)
                .with_select("users", &select);
            bootstrap(doc, store.clone(), None);

            select.set_value(&uid);
            form.submit();
            prop_assert_eq!(store.get("uid"), Some(uid));
        }

        #[test]
        fn prop_repeat_submit_is_idempotent(uid in "\\PC*") {
            let store = Rc::new(MemoryStore::new());
            let form = MemoryForm::new();
            let select = MemorySelect::new([uid.clone()]);
            let doc = MemoryDocument::parsed()
                .with_form("loginform", &form)
                .with_select("users", &select);
            bootstrap(doc, store.clone(), None);

            form.submit();
            let first = store.get("uid");
            form.submit();
            prop_assert_eq!(store.get("uid"), first);
            prop_assert_eq!(store.len(), 1);
        }
    }
}
