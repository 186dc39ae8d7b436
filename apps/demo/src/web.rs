use crate::MOUNT_ID;
use slideverify_core::VerifierOptions;
use slideverify_platform_web::WebVerifier;
use std::cell::RefCell;
use wasm_bindgen::prelude::*;

thread_local! {
    static MOUNTED: RefCell<Option<WebVerifier>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());

    let options = VerifierOptions::new().on_success(|| log::info!("verification succeeded"));
    let verifier = WebVerifier::mount_by_id(MOUNT_ID, options)?;
    MOUNTED.with(|slot| slot.replace(Some(verifier)));
    Ok(())
}

/// Re-arms the mounted widget after a success.
#[wasm_bindgen]
pub fn reset_captcha() {
    MOUNTED.with(|slot| {
        if let Some(verifier) = slot.borrow().as_ref() {
            verifier.reset();
        }
    });
}

/// Unmounts the widget's listeners; returns how many were removed.
#[wasm_bindgen]
pub fn unmount_captcha() -> usize {
    MOUNTED.with(|slot| {
        slot.borrow_mut()
            .take()
            .map(|mut verifier| verifier.teardown())
            .unwrap_or(0)
    })
}
