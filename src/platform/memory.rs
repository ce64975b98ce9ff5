//! In-memory document, form and select
//!
//! Headless stand-ins for the browser DOM. Used by the native binary and by
//! tests. Handles are cheap `Rc` clones sharing one underlying element, like
//! JS references to the same node.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use super::ElementSource;
use crate::controller::{SelectControl, SubmitSource};
use crate::ready::{DocumentReadiness, ReadyState};
use crate::{AutofillError, Result};

/// `<select>` with a fixed option list
#[derive(Clone, Debug)]
pub struct MemorySelect {
    options: Rc<[String]>,
    selected: Rc<Cell<Option<usize>>>,
}

impl MemorySelect {
    /// New select; like a browser, the first option starts selected
    pub fn new<I, T>(options: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let options: Rc<[String]> = options.into_iter().map(Into::into).collect();
        let selected = if options.is_empty() { None } else { Some(0) };
        Self {
            options,
            selected: Rc::new(Cell::new(selected)),
        }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Index of the selected option, `None` when nothing is selected
    pub fn selected_index(&self) -> Option<usize> {
        self.selected.get()
    }
}

impl SelectControl for MemorySelect {
    fn value(&self) -> String {
        self.selected
            .get()
            .map(|i| self.options[i].clone())
            .unwrap_or_default()
    }

    /// Unknown values deselect everything, matching `HTMLSelectElement.value`
    fn set_value(&self, value: &str) {
        self.selected
            .set(self.options.iter().position(|o| o == value));
    }
}

/// `<form>` whose submissions are triggered by `submit`
#[derive(Clone, Default)]
pub struct MemoryForm {
    handlers: Rc<RefCell<Vec<Box<dyn FnMut()>>>>,
    submissions: Rc<Cell<usize>>,
    attached: Rc<Cell<bool>>,
}

impl MemoryForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire the submit event through every registered handler
    pub fn submit(&self) {
        for handler in self.handlers.borrow_mut().iter_mut() {
            handler();
        }
        self.submissions.set(self.submissions.get() + 1);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.borrow().len()
    }

    pub fn submissions(&self) -> usize {
        self.submissions.get()
    }
}

impl SubmitSource for MemoryForm {
    fn on_submit(&self, handler: Box<dyn FnMut()>) {
        self.handlers.borrow_mut().push(handler);
    }

    fn mark_attached(&self) -> bool {
        !self.attached.replace(true)
    }
}

#[derive(Clone)]
enum MemoryElement {
    Form(MemoryForm),
    Select(MemorySelect),
    Text(String),
}

#[derive(Default)]
struct DocumentInner {
    state: Cell<ReadyState>,
    pending: RefCell<Vec<Box<dyn FnOnce()>>>,
    elements: RefCell<HashMap<String, MemoryElement>>,
    lookups: Cell<usize>,
}

/// Document with an element-by-id table and a controllable parse state
#[derive(Clone, Default)]
pub struct MemoryDocument {
    inner: Rc<DocumentInner>,
}

impl MemoryDocument {
    /// A document that is still being parsed
    pub fn loading() -> Self {
        Self::default()
    }

    /// A document whose element tree is already built
    pub fn parsed() -> Self {
        let doc = Self::default();
        doc.inner.state.set(ReadyState::Interactive);
        doc
    }

    pub fn with_form(self, id: &str, form: &MemoryForm) -> Self {
        self.insert(id, MemoryElement::Form(form.clone()));
        self
    }

    pub fn with_select(self, id: &str, select: &MemorySelect) -> Self {
        self.insert(id, MemoryElement::Select(select.clone()));
        self
    }

    /// Add an element carrying only text content, e.g. an inline config block
    pub fn with_text(self, id: &str, text: &str) -> Self {
        self.insert(id, MemoryElement::Text(text.to_string()));
        self
    }

    fn insert(&self, id: &str, element: MemoryElement) {
        self.inner
            .elements
            .borrow_mut()
            .insert(id.to_string(), element);
    }

    fn lookup(&self, id: &str) -> Option<MemoryElement> {
        self.inner.lookups.set(self.inner.lookups.get() + 1);
        self.inner.elements.borrow().get(id).cloned()
    }

    /// Number of form/select lookups made so far
    pub fn lookups(&self) -> usize {
        self.inner.lookups.get()
    }

    /// Finish parsing and fire `DOMContentLoaded` listeners once
    pub fn finish_parsing(&self) {
        if self.inner.state.get().is_parsed() {
            return;
        }
        self.inner.state.set(ReadyState::Interactive);
        let pending = self.inner.pending.take();
        log::debug!("DOMContentLoaded ({} listeners)", pending.len());
        for callback in pending {
            callback();
        }
    }

    /// Finish loading auxiliary resources
    pub fn finish_loading(&self) {
        self.finish_parsing();
        self.inner.state.set(ReadyState::Complete);
    }
}

impl DocumentReadiness for MemoryDocument {
    fn ready_state(&self) -> ReadyState {
        self.inner.state.get()
    }

    fn on_content_loaded(&self, callback: Box<dyn FnOnce()>) {
        self.inner.pending.borrow_mut().push(callback);
    }
}

impl ElementSource for MemoryDocument {
    type Form = MemoryForm;
    type Select = MemorySelect;

    fn form(&self, id: &str) -> Result<MemoryForm> {
        match self.lookup(id) {
            Some(MemoryElement::Form(form)) => Ok(form),
            Some(_) => Err(AutofillError::wrong_type(id, "<form>")),
            None => Err(AutofillError::missing(id)),
        }
    }

    fn select(&self, id: &str) -> Result<MemorySelect> {
        match self.lookup(id) {
            Some(MemoryElement::Select(select)) => Ok(select),
            Some(_) => Err(AutofillError::wrong_type(id, "<select>")),
            None => Err(AutofillError::missing(id)),
        }
    }

    fn text_content(&self, id: &str) -> Option<String> {
        match self.inner.elements.borrow().get(id) {
            Some(MemoryElement::Text(text)) => Some(text.clone()),
            _ => None,
        }
    }
}
