//! Trang metrics: tải lại văn bản exposition mỗi khi có dữ liệu mới.

use gloo_net::http::Request;
use laporte_core::{html_encode, render_exposition, DashboardConfig, EncodeMode, ExpositionLine};
use laporte_wasm::config_from_js;
use wasm_bindgen::prelude::*;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::channel::Channel;
use crate::dom;
use crate::view::ViewProps;

const REFRESH_EVENTS: [&str; 3] = ["connect", "event_response", "update_response"];

#[function_component(MetricsView)]
fn metrics_view(props: &ViewProps) -> Html {
    let lines = use_state(Vec::<ExpositionLine>::new);

    {
        let lines = lines.clone();
        use_effect_with(props.config.clone(), move |config| {
            let channel = subscribe(config, lines)
                .map_err(|err| dom::report("metrics view", &err))
                .ok();
            move || drop(channel)
        });
    }

    html! {
        <>
            { for lines.iter().map(render_line) }
        </>
    }
}

fn subscribe(
    config: &DashboardConfig,
    lines: UseStateHandle<Vec<ExpositionLine>>,
) -> Result<Channel, JsValue> {
    let mut channel = Channel::connect(&config.namespace, &config.status_selector)?;
    for event in REFRESH_EVENTS {
        let lines = lines.clone();
        let path = config.metrics_path.clone();
        channel.on_event(event, move |_| refresh(path.clone(), lines.clone()));
    }
    Ok(channel)
}

fn refresh(path: String, lines: UseStateHandle<Vec<ExpositionLine>>) {
    spawn_local(async move {
        match fetch_exposition(&path).await {
            Ok(body) => lines.set(render_exposition(&body)),
            Err(err) => dom::warn(&format!("GET {path} thất bại: {err}")),
        }
    });
}

async fn fetch_exposition(path: &str) -> Result<String, gloo_net::Error> {
    let response = Request::get(path).send().await?;
    if !response.ok() {
        return Err(gloo_net::Error::GlooError(format!(
            "HTTP {}",
            response.status()
        )));
    }
    response.text().await
}

fn render_line(line: &ExpositionLine) -> Html {
    if line.comment {
        html! {
            <>
                <span class="text-secondary">{ line.text.clone() }</span>
                <br/>
            </>
        }
    } else {
        html! {
            <>
                { line.text.clone() }
                <br/>
            </>
        }
    }
}

fn metrics_link(origin: &str, path: &str) -> String {
    let href = html_encode(&format!("{origin}{path}"), EncodeMode::Basic);
    format!(r#"<small><a href="{href}">{href}</a></small>"#)
}

#[wasm_bindgen]
pub fn mount_metrics_view(config: Option<JsValue>) -> Result<(), JsValue> {
    let config = config_from_js(config, DashboardConfig::default())?;
    let origin = dom::window()?.location().origin()?;
    dom::set_html(&config.url_selector, &metrics_link(&origin, &config.metrics_path));

    let target = dom::mount_root(&config.metrics_selector)?;
    yew::Renderer::<MetricsView>::with_root_and_props(target, ViewProps { config }).render();
    Ok(())
}
