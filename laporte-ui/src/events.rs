//! Bảng sự kiện: mỗi sự kiện là một nhóm dòng gộp rowspan theo node/sensor.

use std::rc::Rc;

use laporte_core::{
    CellValue, DashboardConfig, EventRecord, EventRow, EventTable, RenderContext, RowBuffer,
    SpanCell,
};
use laporte_wasm::{config_from_js, now_seconds, BrowserClock};
use wasm_bindgen::prelude::*;
use yew::prelude::*;

use crate::channel::Channel;
use crate::dom;
use crate::view::ViewProps;

#[derive(Clone)]
struct EventsState {
    table: EventTable,
    /// Một phần tử cho mỗi sự kiện, để giới hạn không cắt ngang nhóm rowspan.
    records: RowBuffer<Vec<EventRow>>,
    clock: BrowserClock,
    revision: u64,
    /// `Some(true)` sau khi nạp lịch sử, `Some(false)` sau một sự kiện mới.
    scroll: Option<bool>,
}

impl EventsState {
    fn new(config: &DashboardConfig) -> Self {
        Self {
            table: EventTable::default(),
            records: RowBuffer::new(config.max_rows),
            clock: BrowserClock::for_config(config),
            revision: 0,
            scroll: None,
        }
    }
}

enum EventsAction {
    History(Vec<EventRecord>),
    Append(EventRecord),
}

impl Reducible for EventsState {
    type Action = EventsAction;

    fn reduce(self: Rc<Self>, action: EventsAction) -> Rc<Self> {
        let mut next = (*self).clone();
        let ctx = RenderContext::new(now_seconds(), &self.clock);
        match action {
            EventsAction::History(records) => {
                next.table.reset();
                let rendered: Vec<_> = records
                    .iter()
                    .map(|record| next.table.rows(record, &ctx))
                    .collect();
                next.records.replace(rendered);
                next.scroll = Some(true);
            }
            EventsAction::Append(record) => {
                let rows = next.table.rows(&record, &ctx);
                next.records.push_back(rows);
                next.scroll = Some(false);
            }
        }
        next.revision += 1;
        Rc::new(next)
    }
}

#[function_component(EventsView)]
fn events_view(props: &ViewProps) -> Html {
    let state = {
        let config = props.config.clone();
        use_reducer(move || EventsState::new(&config))
    };

    {
        let dispatcher = state.dispatcher();
        use_effect_with(props.config.clone(), move |config| {
            let channel = subscribe(config, dispatcher)
                .map_err(|err| dom::report("events view", &err))
                .ok();
            move || drop(channel)
        });
    }

    {
        let config = props.config.clone();
        use_effect_with((state.revision, state.scroll), move |(_, scroll)| match scroll {
            Some(true) => dom::scroll_to(&config.log_end_selector, false),
            Some(false) if dom::is_checked(&config.follow_selector) => {
                dom::scroll_to(&config.log_end_selector, true)
            }
            _ => {}
        });
    }

    html! {
        <>
            { for state.records.iter().flatten().map(render_row) }
        </>
    }
}

fn subscribe(
    config: &DashboardConfig,
    dispatcher: UseReducerDispatcher<EventsState>,
) -> Result<Channel, JsValue> {
    let mut channel = Channel::connect(&config.namespace, &config.status_selector)?;

    {
        let dispatcher = dispatcher.clone();
        channel.on_payload("hist_response", move |payload| {
            match laporte_payload::decode_event_batch_value(payload) {
                Ok(records) => dispatcher.dispatch(EventsAction::History(records)),
                Err(err) => dom::report("hist_response", &laporte_wasm::js_error(err)),
            }
        });
    }

    channel.on_payload("event_response", move |payload| {
        match laporte_payload::decode_event_value(&payload) {
            Ok(record) => dispatcher.dispatch(EventsAction::Append(record)),
            Err(err) => dom::report("event_response", &laporte_wasm::js_error(err)),
        }
    });

    Ok(channel)
}

fn render_row(row: &EventRow) -> Html {
    html! {
        <tr class={classes!(row.striped.then_some("odd-row"))}>
            {
                match &row.header {
                    Some(header) => html! {
                        <>
                            <td rowspan={header.rowspan.to_string()}>{ header.time.clone() }</td>
                            <td rowspan={header.rowspan.to_string()} class="font-weight-light">
                                { header.event_id.clone() }
                            </td>
                        </>
                    },
                    None => html! {},
                }
            }
            { render_span(row.node.as_ref()) }
            { render_span(row.sensor.as_ref()) }
            <td>{ row.metric.clone() }</td>
            <td>{ render_cell(&row.value) }</td>
        </tr>
    }
}

fn render_span(cell: Option<&SpanCell>) -> Html {
    match cell {
        Some(cell) => html! {
            <td rowspan={cell.rowspan.to_string()}>{ cell.text.clone() }</td>
        },
        None => html! {},
    }
}

fn render_cell(value: &CellValue) -> Html {
    match value {
        CellValue::Blank => html! {},
        CellValue::Text(text) => html! { <>{ text.clone() }</> },
        CellValue::Expired => html! { <i>{"expired"}</i> },
    }
}

#[wasm_bindgen]
pub fn mount_event_view(config: Option<JsValue>) -> Result<(), JsValue> {
    let config = config_from_js(config, DashboardConfig::default())?;
    let target = dom::mount_root(&config.log_selector)?;
    yew::Renderer::<EventsView>::with_root_and_props(target, ViewProps { config }).render();
    Ok(())
}
