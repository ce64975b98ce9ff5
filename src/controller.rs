//! Autofill controller
//!
//! Restores the remembered identity into the user select on load and
//! writes the select's value back to storage on every form submission.
//! Works against already-resolved element handles; finding the elements
//! and waiting for the document is the platform layer's job.

use std::rc::Rc;

use crate::config::AutofillConfig;
use crate::storage::KeyValueStore;

/// A `<select>`-like control with a string value
pub trait SelectControl {
    fn value(&self) -> String;

    /// Select the option with this value. Unknown values follow the host's
    /// own select semantics.
    fn set_value(&self, value: &str);
}

/// A `<form>`-like element that reports submissions
pub trait SubmitSource {
    /// Register `handler` to run on every submission. The handler must not
    /// cancel or alter the submission.
    fn on_submit(&self, handler: Box<dyn FnMut()>);

    /// Flag the form as carrying the autofill handler. Returns `false` if it
    /// was already flagged.
    fn mark_attached(&self) -> bool;
}

/// Remembers the last selected identity under one storage key
pub struct AutofillController<S> {
    store: Rc<S>,
    key: Rc<str>,
}

impl<S> Clone for AutofillController<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            key: self.key.clone(),
        }
    }
}

impl<S: KeyValueStore + 'static> AutofillController<S> {
    pub fn new(store: Rc<S>, key: &str) -> Self {
        Self {
            store,
            key: Rc::from(key),
        }
    }

    pub fn from_config(store: Rc<S>, config: &AutofillConfig) -> Self {
        Self::new(store, &config.storage_key)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The remembered identity, if any
    pub fn remembered(&self) -> Option<String> {
        self.store.get(&self.key)
    }

    /// Apply the remembered identity to `select`.
    /// An empty stored string still counts as a value.
    pub fn restore<C: SelectControl + ?Sized>(&self, select: &C) -> Option<String> {
        let uid = self.remembered()?;
        select.set_value(&uid);
        log::info!("Restored '{}' into user select", uid);
        Some(uid)
    }

    /// Write the select's current value to storage, overwriting any previous
    /// value, and return what was written
    pub fn persist<C: SelectControl + ?Sized>(&self, select: &C) -> String {
        let uid = select.value();
        self.store.set(&self.key, &uid);
        log::info!("Remembered '{}' under '{}'", uid, self.key);
        uid
    }

    /// Restore now and persist on every submission of `form`
    pub fn attach<F, C>(&self, form: &F, select: C)
    where
        F: SubmitSource + ?Sized,
        C: SelectControl + 'static,
    {
        self.restore(&select);

        let controller = self.clone();
        form.on_submit(Box::new(move || {
            controller.persist(&select);
        }));
    }
}
