//! Bảng log thời gian thực của namespace `/logs`.

use std::rc::Rc;

use laporte_core::{DashboardConfig, LogRecord, LogRow, RenderContext, RowBuffer};
use laporte_wasm::{config_from_js, now_seconds, BrowserClock};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use yew::prelude::*;

use crate::channel::Channel;
use crate::dom;
use crate::view::ViewProps;

#[derive(Clone, Copy, PartialEq)]
enum Scroll {
    /// Sau khi nạp lịch sử.
    Instant,
    /// Sau một dòng mới, chỉ khi người dùng bật "follow".
    Follow,
}

#[derive(Clone)]
struct LogEntry {
    id: u64,
    row: LogRow,
    collapsed: bool,
}

#[derive(Clone)]
struct LogState {
    entries: RowBuffer<LogEntry>,
    next_id: u64,
    revision: u64,
    scroll: Option<Scroll>,
}

impl LogState {
    fn new(max_rows: usize) -> Self {
        Self {
            entries: RowBuffer::new(max_rows),
            next_id: 0,
            revision: 0,
            scroll: None,
        }
    }

    fn entry(&mut self, row: LogRow) -> LogEntry {
        let id = self.next_id;
        self.next_id += 1;
        LogEntry {
            id,
            collapsed: row.long,
            row,
        }
    }
}

enum LogAction {
    History(Vec<LogRow>),
    Append(LogRow),
    Expand(u64),
}

impl Reducible for LogState {
    type Action = LogAction;

    fn reduce(self: Rc<Self>, action: LogAction) -> Rc<Self> {
        let mut next = (*self).clone();
        next.scroll = match action {
            LogAction::History(rows) => {
                let entries: Vec<_> = rows.into_iter().map(|row| next.entry(row)).collect();
                next.entries.replace(entries);
                Some(Scroll::Instant)
            }
            LogAction::Append(row) => {
                let entry = next.entry(row);
                next.entries.push_back(entry);
                Some(Scroll::Follow)
            }
            LogAction::Expand(id) => {
                next.entries
                    .update(|entry| entry.id == id, |entry| entry.collapsed = false);
                None
            }
        };
        next.revision += 1;
        Rc::new(next)
    }
}

#[function_component(LogView)]
fn log_view(props: &ViewProps) -> Html {
    let state = {
        let max_rows = props.config.max_rows;
        use_reducer(move || LogState::new(max_rows))
    };

    {
        let dispatcher = state.dispatcher();
        use_effect_with(props.config.clone(), move |config| {
            let channel = subscribe(config, dispatcher)
                .map_err(|err| dom::report("log view", &err))
                .ok();
            move || drop(channel)
        });
    }

    use_effect_with(props.config.log_selector.clone(), |selector| {
        let selector = selector.clone();
        let listener = Closure::<dyn FnMut()>::new(move || dom::check_all_truncated(&selector));
        let window = dom::window().ok();
        if let Some(window) = &window {
            let _ = window
                .add_event_listener_with_callback("resize", listener.as_ref().unchecked_ref());
        }
        move || {
            if let Some(window) = window {
                let _ = window.remove_event_listener_with_callback(
                    "resize",
                    listener.as_ref().unchecked_ref(),
                );
            }
        }
    });

    {
        let config = props.config.clone();
        use_effect_with((state.revision, state.scroll), move |(_, scroll)| {
            dom::check_all_truncated(&config.log_selector);
            match scroll {
                Some(Scroll::Instant) => dom::scroll_to(&config.log_end_selector, false),
                Some(Scroll::Follow) if dom::is_checked(&config.follow_selector) => {
                    dom::scroll_to(&config.log_end_selector, true)
                }
                _ => {}
            }
        });
    }

    let dispatcher = state.dispatcher();
    html! {
        <>
            {
                for state.entries.iter().map(|entry| render_entry(entry, &dispatcher))
            }
        </>
    }
}

fn subscribe(
    config: &DashboardConfig,
    dispatcher: UseReducerDispatcher<LogState>,
) -> Result<Channel, JsValue> {
    let mut channel = Channel::connect(&config.namespace, &config.status_selector)?;

    {
        let dispatcher = dispatcher.clone();
        let config = config.clone();
        channel.on_payload("hist_response", move |payload| {
            match laporte_payload::decode_log_batch_value(payload) {
                Ok(records) => dispatcher.dispatch(LogAction::History(to_rows(&records, &config))),
                Err(err) => dom::report("hist_response", &laporte_wasm::js_error(err)),
            }
        });
    }

    let config = config.clone();
    channel.on_payload("log_response", move |payload| {
        match laporte_payload::decode_log_value(payload) {
            Ok(record) => {
                let clock = BrowserClock::for_config(&config);
                let ctx = RenderContext::new(now_seconds(), &clock);
                dispatcher.dispatch(LogAction::Append(
                    record.to_row(&ctx, config.truncate_chars),
                ));
            }
            Err(err) => dom::report("log_response", &laporte_wasm::js_error(err)),
        }
    });

    Ok(channel)
}

fn to_rows(records: &[LogRecord], config: &DashboardConfig) -> Vec<LogRow> {
    let clock = BrowserClock::for_config(config);
    let ctx = RenderContext::new(now_seconds(), &clock);
    records
        .iter()
        .map(|record| record.to_row(&ctx, config.truncate_chars))
        .collect()
}

fn render_entry(entry: &LogEntry, dispatcher: &UseReducerDispatcher<LogState>) -> Html {
    let row = &entry.row;
    let onclick = {
        let dispatcher = dispatcher.clone();
        let id = entry.id;
        Callback::from(move |_| dispatcher.dispatch(LogAction::Expand(id)))
    };

    html! {
        <tr class={row.class}>
            <td>
                { row.time.clone() }
                <br/>
                <small class="text-secondary font-weight-light">{ row.level.clone() }</small>
            </td>
            <td>
                <small>{ row.event_id.clone() }</small>
            </td>
            <td>
                { row.function.clone() }
                <br/>
                <small class="text-secondary font-weight-light">{ row.location.clone() }</small>
            </td>
            <td class="small text-break">
                <div class={classes!(entry.collapsed.then_some("truncate-overflow"))} {onclick}>
                    <samp>{ row.message.clone() }</samp>
                </div>
            </td>
        </tr>
    }
}

#[wasm_bindgen]
pub fn mount_log_view(config: Option<JsValue>) -> Result<(), JsValue> {
    let config = config_from_js(config, DashboardConfig::logs())?;
    let target = dom::mount_root(&config.log_selector)?;
    yew::Renderer::<LogView>::with_root_and_props(target, ViewProps { config }).render();
    Ok(())
}
