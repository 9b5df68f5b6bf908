use std::rc::Rc;

use js_sys::JSON;
use laporte_core::{DashboardConfig, MessageLog, MessageRow, RenderContext, RowBuffer};
use laporte_wasm::{config_from_js, now_seconds, BrowserClock};
use wasm_bindgen::prelude::*;
use yew::prelude::*;

use crate::channel::Channel;
use crate::dom;
use crate::view::ViewProps;

#[derive(Clone)]
struct MessagesState {
    log: MessageLog,
    /// Mới nhất đứng đầu.
    rows: RowBuffer<MessageRow>,
    clock: BrowserClock,
}

impl Reducible for MessagesState {
    type Action = String;

    fn reduce(self: Rc<Self>, text: String) -> Rc<Self> {
        let mut next = (*self).clone();
        let ctx = RenderContext::new(now_seconds(), &self.clock);
        let row = next.log.record(text, &ctx);
        next.rows.push_front(row);
        Rc::new(next)
    }
}

#[function_component(MessagesView)]
fn messages_view(props: &ViewProps) -> Html {
    let state = {
        let config = props.config.clone();
        use_reducer(move || MessagesState {
            log: MessageLog::default(),
            rows: RowBuffer::new(config.max_rows),
            clock: BrowserClock::for_config(&config),
        })
    };

    {
        let dispatcher = state.dispatcher();
        use_effect_with(props.config.clone(), move |config| {
            let channel = subscribe(config, dispatcher)
                .map_err(|err| dom::report("message view", &err))
                .ok();
            move || drop(channel)
        });
    }

    html! {
        <>
            {
                for state.rows.iter().map(|row| html! {
                    <tr>
                        <td>{ row.id }</td>
                        <td>{ row.time.clone() }</td>
                        <td><samp>{ row.text.clone() }</samp></td>
                    </tr>
                })
            }
        </>
    }
}

fn subscribe(
    config: &DashboardConfig,
    dispatcher: UseReducerDispatcher<MessagesState>,
) -> Result<Channel, JsValue> {
    let mut channel = Channel::connect(&config.namespace, &config.status_selector)?;
    channel.on_event("update_response", move |payload| {
        match raw_text(&payload) {
            Ok(text) => dispatcher.dispatch(text),
            Err(err) => dom::report("update_response", &err),
        }
    });
    Ok(channel)
}

/// Chuỗi giữ nguyên, object được stringify lại.
fn raw_text(payload: &JsValue) -> Result<String, JsValue> {
    match payload.as_string() {
        Some(text) => Ok(text),
        None => JSON::stringify(payload).map(String::from),
    }
}

#[wasm_bindgen]
pub fn mount_message_view(config: Option<JsValue>) -> Result<(), JsValue> {
    let config = config_from_js(config, DashboardConfig::default())?;
    let target = dom::mount_root(&config.log_selector)?;
    yew::Renderer::<MessagesView>::with_root_and_props(target, ViewProps { config }).render();
    Ok(())
}
