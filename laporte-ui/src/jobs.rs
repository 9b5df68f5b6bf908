use std::rc::Rc;

use laporte_core::{DashboardConfig, JobBoard, JobRow, RenderContext, Snapshot};
use laporte_wasm::{config_from_js, now_seconds, BrowserClock};
use wasm_bindgen::prelude::*;
use yew::prelude::*;

use crate::channel::Channel;
use crate::dom;
use crate::view::ViewProps;

#[derive(Default)]
struct JobsState {
    board: JobBoard,
}

impl Reducible for JobsState {
    type Action = Snapshot;

    fn reduce(self: Rc<Self>, snapshot: Snapshot) -> Rc<Self> {
        let mut board = self.board.clone();
        board.merge(&snapshot);
        Rc::new(Self { board })
    }
}

/// Danh sách job, vẽ lại toàn bộ sau mỗi lần cập nhật.
#[function_component(JobsView)]
fn jobs_view(props: &ViewProps) -> Html {
    let jobs = use_reducer(JobsState::default);

    {
        let dispatcher = jobs.dispatcher();
        use_effect_with(props.config.clone(), move |config| {
            let channel = subscribe(config, dispatcher)
                .map_err(|err| dom::report("jobs view", &err))
                .ok();
            move || drop(channel)
        });
    }

    let clock = BrowserClock::for_config(&props.config);
    let ctx = RenderContext::new(now_seconds(), &clock);
    html! {
        <>
            { for jobs.board.rows(&ctx).iter().map(render_job) }
        </>
    }
}

fn subscribe(
    config: &DashboardConfig,
    dispatcher: UseReducerDispatcher<JobsState>,
) -> Result<Channel, JsValue> {
    let mut channel = Channel::connect(&config.namespace, &config.status_selector)?;
    for event in ["init_response", "update_response"] {
        let dispatcher = dispatcher.clone();
        channel.on_payload(event, move |payload| {
            match laporte_payload::decode_snapshot_value(&payload) {
                Ok(snapshot) => dispatcher.dispatch(snapshot),
                Err(err) => dom::report(event, &laporte_wasm::js_error(err)),
            }
        });
    }
    Ok(channel)
}

fn render_job(row: &JobRow) -> Html {
    html! {
        <tr class="table-light">
            <td>{ row.time.clone() }</td>
            <td>{ row.node.clone() }</td>
            <td>{ row.sensor.clone() }</td>
            <td>{ row.kind.as_str() }</td>
        </tr>
    }
}

#[wasm_bindgen]
pub fn mount_jobs_view(config: Option<JsValue>) -> Result<(), JsValue> {
    let config = config_from_js(config, DashboardConfig::default())?;
    let target = dom::mount_root(&config.jobs_selector)?;
    yew::Renderer::<JobsView>::with_root_and_props(target, ViewProps { config }).render();
    Ok(())
}
