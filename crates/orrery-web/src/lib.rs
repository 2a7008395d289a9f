//! Browser bridge for the orrery core.
//!
//! The page calls `orrery_init` once, then `orrery_tick(dt)` from its
//! `requestAnimationFrame` loop, and reads body records straight out of
//! wasm memory at `get_bodies_ptr()` (`get_body_count()` records of
//! `get_body_floats()` f32 each, layout in `orrery::bridge::protocol`).

pub mod runner;

pub use runner::OrreryRunner;

use std::cell::RefCell;
use wasm_bindgen::prelude::*;

use orrery::{SimClock, SolarSystem, BODY_FLOATS, PROTOCOL_VERSION};

thread_local! {
    static RUNNER: RefCell<Option<OrreryRunner>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut OrreryRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow.as_mut().expect("Orrery not initialized. Call orrery_init() first.");
        f(runner)
    })
}

fn install(runner: OrreryRunner) {
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
}

fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Initialize with the built-in planetary table, paused at `start_ms`.
#[wasm_bindgen]
pub fn orrery_init(start_ms: f64) -> Result<(), JsValue> {
    init_logging();
    let system = SolarSystem::builtin().map_err(|e| JsValue::from_str(&e.to_string()))?;
    install(OrreryRunner::new(system, start_ms));
    log::info!("orrery: initialized");
    Ok(())
}

/// Initialize from a JSON element table. Invalid tables are rejected
/// with a descriptive error and leave any previous runner in place.
#[wasm_bindgen]
pub fn orrery_init_with_table(json: &str, start_ms: f64) -> Result<(), JsValue> {
    init_logging();
    let runner = OrreryRunner::from_json(json, start_ms).map_err(|e| {
        log::error!("orrery: {}", e);
        JsValue::from_str(&e.to_string())
    })?;
    install(runner);
    log::info!("orrery: initialized from custom table");
    Ok(())
}

#[wasm_bindgen]
pub fn orrery_tick(frame_dt_ms: f64) {
    with_runner(|r| r.tick(frame_dt_ms));
}

#[wasm_bindgen]
pub fn orrery_update(time_ms: f64) {
    with_runner(|r| r.update(time_ms));
}

#[wasm_bindgen]
pub fn orrery_run() {
    with_runner(|r| r.run());
}

#[wasm_bindgen]
pub fn orrery_pause() {
    with_runner(|r| r.pause());
}

#[wasm_bindgen]
pub fn orrery_is_running() -> bool {
    with_runner(|r| r.is_running())
}

#[wasm_bindgen]
pub fn orrery_speed_up() {
    with_runner(|r| r.speed_up());
}

#[wasm_bindgen]
pub fn orrery_slow_down() {
    with_runner(|r| r.slow_down());
}

#[wasm_bindgen]
pub fn orrery_time_warp() -> f64 {
    with_runner(|r| r.time_warp())
}

#[wasm_bindgen]
pub fn orrery_time_warp_index() -> u32 {
    with_runner(|r| r.time_warp_index() as u32)
}

/// Every selectable warp factor, slowest first.
#[wasm_bindgen]
pub fn orrery_time_warp_factors() -> js_sys::Float64Array {
    js_sys::Float64Array::from(&SimClock::WARP_FACTORS[..])
}

#[wasm_bindgen]
pub fn orrery_time_ms() -> f64 {
    with_runner(|r| r.time_ms())
}

/// Simulated UTC date as `[year, month, day]`.
#[wasm_bindgen]
pub fn orrery_date() -> js_sys::Array {
    let (year, month, day) = with_runner(|r| r.date());
    [year as f64, month as f64, day as f64]
        .into_iter()
        .map(JsValue::from_f64)
        .collect()
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_bodies_ptr() -> *const f32 {
    with_runner(|r| r.bodies_ptr())
}

#[wasm_bindgen]
pub fn get_body_count() -> u32 {
    with_runner(|r| r.body_count())
}

#[wasm_bindgen]
pub fn get_body_floats() -> u32 {
    BODY_FLOATS as u32
}

#[wasm_bindgen]
pub fn get_protocol_version() -> f32 {
    PROTOCOL_VERSION
}

#[wasm_bindgen]
pub fn get_body_name(index: u32) -> Option<String> {
    with_runner(|r| r.body_name(index as usize).map(str::to_owned))
}

/// All body names in record order.
#[wasm_bindgen]
pub fn get_body_names() -> js_sys::Array {
    with_runner(|r| {
        r.system()
            .bodies()
            .iter()
            .map(|b| JsValue::from_str(b.name()))
            .collect()
    })
}
