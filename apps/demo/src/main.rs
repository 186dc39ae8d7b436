#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    println!("=== Slide-to-verify demo ===");
    println!("Track 300px, handle 40px; a release past 255px verifies.");
    println!();

    let mut stdout = std::io::stdout().lock();
    let summary = slideverify_demo::script::run(&mut stdout)?;

    println!();
    println!(
        "Finished: {} success callback(s), final state {}",
        summary.successes, summary.final_state
    );
    Ok(())
}

// The wasm build starts from `#[wasm_bindgen(start)]` in the library.
#[cfg(target_arch = "wasm32")]
fn main() {}
