//! Login Autofill entry point
//!
//! On the web this wires the controller to the page. Natively it replays the
//! login scenario against the in-memory document.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

    if let Err(err) = login_autofill::platform::web::start(None) {
        log::error!("Login autofill unavailable: {}", err);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Login autofill (native) starting...");
    log::info!("Native mode has no browser - replaying the login scenario headless");

    replay_login_scenario();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn replay_login_scenario() {
    use std::rc::Rc;

    use login_autofill::platform::bootstrap;
    use login_autofill::platform::memory::{MemoryDocument, MemoryForm, MemorySelect};
    use login_autofill::{KeyValueStore, MemoryStore, SelectControl};

    let store = Rc::new(MemoryStore::new());
    let load_page = || {
        let form = MemoryForm::new();
        let select = MemorySelect::new(["alice", "bob"]);
        let doc = MemoryDocument::loading()
            .with_form("loginform", &form)
            .with_select("users", &select);
        bootstrap(doc.clone(), store.clone(), None);
        doc.finish_parsing();
        (form, select)
    };

    let (form, select) = load_page();
    println!("first visit: users = {:?}", select.value());

    select.set_value("bob");
    form.submit();
    println!("submitted:   uid = {:?}", store.get("uid"));

    let (_form, select) = load_page();
    println!("reload:      users = {:?}", select.value());
    assert_eq!(select.value(), "bob", "selection should survive a reload");
}
