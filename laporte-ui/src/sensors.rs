//! Bảng sensor: điền giá trị vào các ô có sẵn và chạy đồng hồ đếm ngược.

use std::cell::RefCell;
use std::rc::Rc;

use laporte_core::{DashboardConfig, RenderContext, RenderProfile, SensorBoard};
use laporte_wasm::{config_from_js, now_seconds, BrowserClock};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Document;

use crate::channel::Channel;
use crate::dom::{self, DomTargets};

const SNAPSHOT_EVENTS: [&str; 3] = ["init_response", "update_response", "event_response"];

#[wasm_bindgen]
pub fn mount_sensor_view(config: Option<JsValue>) -> Result<(), JsValue> {
    let config = config_from_js(config, DashboardConfig::default())?;
    let document = dom::document()?;
    let board = Rc::new(RefCell::new(SensorBoard::new(RenderProfile::sensor())));

    let mut channel = Channel::connect(&config.namespace, &config.status_selector)?;
    for event in SNAPSHOT_EVENTS {
        let board = board.clone();
        let document = document.clone();
        let clock = BrowserClock::for_config(&config);
        channel.on_payload(event, move |payload| {
            match laporte_payload::decode_snapshot_value(&payload) {
                Ok(snapshot) => {
                    let ctx = RenderContext::new(now_seconds(), &clock);
                    let mut targets = DomTargets::new(document.clone());
                    board.borrow_mut().apply(&snapshot, &ctx, &mut targets);
                }
                Err(err) => dom::report(event, &laporte_wasm::js_error(err)),
            }
        });
    }

    start_ticker(board, document, config.tick_ms)?;
    // kênh và đồng hồ sống cùng trang
    std::mem::forget(channel);
    Ok(())
}

fn start_ticker(
    board: Rc<RefCell<SensorBoard>>,
    document: Document,
    tick_ms: u32,
) -> Result<(), JsValue> {
    let tick = Closure::<dyn FnMut()>::new(move || {
        let mut targets = DomTargets::new(document.clone());
        board.borrow_mut().tick(&mut targets);
    });

    dom::window()?.set_interval_with_callback_and_timeout_and_arguments_0(
        tick.as_ref().unchecked_ref(),
        i32::try_from(tick_ms).unwrap_or(i32::MAX),
    )?;
    tick.forget();
    Ok(())
}
