mod api;
mod files;
mod state;
mod view;

use std::future::Future;
use std::rc::Rc;

use pcbgen_client::{Controller, Endpoints, FlowError, NoticeKind};
use yew::prelude::*;

use api::HttpApi;
use state::*;
use view::*;

type PageController = Controller<HttpApi, YewView>;

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<App>::new().render();
}

/// Run a flow in the background. Its UI effects are already applied, so a
/// returned error only needs logging.
fn run_flow<F>(name: &'static str, flow: F)
where
    F: Future<Output = Result<(), FlowError>> + 'static,
{
    wasm_bindgen_futures::spawn_local(async move {
        match flow.await {
            Ok(()) => log::debug!("{name} finished"),
            Err(e) if e.is_precondition() => log::debug!("{name} not started: {e}"),
            Err(e) => log::warn!("{name} failed: {e}"),
        }
    });
}

// ─── App Component ──────────────────────────────────────────────────

#[function_component(App)]
fn app() -> Html {
    let settings = use_memo((), |_| init_settings());
    let ui = {
        let mode = settings.mode;
        use_reducer(move || UiState {
            mode,
            ..UiState::default()
        })
    };

    let controller: Rc<PageController> = {
        let dispatcher = ui.dispatcher();
        let api_base = settings.api_base.clone();
        use_memo((), move |_| {
            log::info!(
                "board server at {}",
                if api_base.is_empty() { "page origin" } else { api_base.as_str() }
            );
            Controller::new(
                HttpApi::new(Endpoints::with_base(&api_base)),
                YewView::new(dispatcher),
            )
        })
    };

    // ─── Callbacks ──────────────────────────────────────────────────

    let change_mode = {
        let ui = ui.clone();
        Callback::from(move |mode: Mode| {
            write_storage("mode", mode.as_str());
            ui.dispatch(UiAction::SetMode(mode));
        })
    };

    let on_drag_over = {
        let ui = ui.clone();
        Callback::from(move |e: DragEvent| {
            e.prevent_default();
            if !ui.drag_active {
                ui.dispatch(UiAction::DragActive(true));
            }
        })
    };

    let on_drag_leave = {
        let ui = ui.clone();
        Callback::from(move |_: DragEvent| {
            ui.dispatch(UiAction::DragActive(false));
        })
    };

    let on_drop = {
        let controller = controller.clone();
        Callback::from(move |e: DragEvent| {
            e.prevent_default();
            let dropped = files::dropped_files(&e);
            let controller = controller.clone();
            run_flow("upload", async move { controller.drop_files(dropped).await });
        })
    };

    let on_generate = {
        let controller = controller.clone();
        Callback::from(move |_: MouseEvent| {
            let controller = controller.clone();
            run_flow("generate", async move { controller.generate_board().await });
        })
    };

    let on_suggest_again = {
        let controller = controller.clone();
        Callback::from(move |_: MouseEvent| {
            let controller = controller.clone();
            run_flow("suggest", async move { controller.suggest_again().await });
        })
    };

    let on_download = {
        let controller = controller.clone();
        Callback::from(move |_: MouseEvent| {
            let controller = controller.clone();
            run_flow("download", async move { controller.download().await });
        })
    };

    // ─── Render ─────────────────────────────────────────────────────

    let mode = ui.mode;
    let menu_item = |item: Mode, label: &'static str, id: &'static str| {
        let change_mode = change_mode.clone();
        html! {
            <a
                id={id}
                class={classes!("menu-item", (mode == item).then_some("selected"))}
                onclick={Callback::from(move |_: MouseEvent| change_mode.emit(item))}
            >
                {label}
            </a>
        }
    };

    let notice = ui.notice.as_ref().map(|n| {
        let kind = match n.kind {
            NoticeKind::Success => "toast-success",
            NoticeKind::Error => "toast-error",
        };
        html! { <div id="toast" class={classes!("toast", kind)}>{n.message.clone()}</div> }
    });

    let image = ui.image.as_ref().map(|img| {
        html! {
            <img
                key={img.id.clone()}
                id={img.id.clone()}
                class="generated-image"
                src={img.src.clone()}
                data-zoom-image={img.src.clone()}
                height={IMAGE_HEIGHT_PX.to_string()}
                onclick={on_download.clone()}
            />
        }
    });

    html! {
        <div id="topmostdiv">
            <nav class="menu">
                {menu_item(Mode::Generate, "Generate", "generateItem")}
                {menu_item(Mode::Suggest, "Suggest", "suggestItem")}
            </nav>

            <section id="generateControls" hidden={mode != Mode::Generate}>
                <button onclick={on_generate}>{"Generate new board"}</button>
            </section>

            <section id="suggestControls" hidden={mode != Mode::Suggest}>
                <div
                    id="droparea"
                    class={classes!("droparea", ui.drag_active.then_some("drag-active"))}
                    ondragover={on_drag_over}
                    ondragleave={on_drag_leave}
                    ondrop={on_drop}
                >
                    <h1 id="h1Message" hidden={ui.waiting}>{"Drop a board file here"}</h1>
                    <div id="waitFileUpload" hidden={!ui.waiting}>
                        <div class="spinner"></div>
                        {phase_label(ui.phase)}
                    </div>
                </div>
                <button onclick={on_suggest_again}>{"Suggest again"}</button>
            </section>

            <div id="placeholder">{for image}</div>
            <button class="download" onclick={on_download}>{"Download board"}</button>

            {for notice}
        </div>
    }
}
