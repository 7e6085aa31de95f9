/// YouTube content script: keeps favorite markers in sync with the page and
/// drives the analysis modal.

use crate::api::fetch_directory;
use crate::bridge;
use crate::config::ExtensionConfig;
use crate::directory::ChannelDirectory;
use crate::dom::{marker_video_info, WebPage};
use crate::error::{ExtensionError, Result};
use crate::modal::{ModalController, ModalState, SettleGuard, VideoInfo};
use crate::scanner::scan_page;
use crate::scheduler::{Debouncer, RefreshTrigger};
use crate::session::{ExtensionMessage, UserDataResponse};
use crate::timer::{now_ms, run_later};
use crate::ui::modal::{AnalysisModal, AnalysisModalProps, MODAL_ROOT_ID};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{AddEventListenerOptions, Element, MouseEvent, MutationObserver, MutationObserverInit};
use yew::{AppHandle, Callback};

/// YouTube fires this after each client-side navigation
const NAVIGATION_EVENT: &str = "yt-navigate-finish";

pub struct ContentScript {
    config: ExtensionConfig,
    page: WebPage,
    directory: RefCell<ChannelDirectory>,
    modal: RefCell<ModalController>,
    debouncer: RefCell<Debouncer>,
    settle: SettleGuard,
    view: RefCell<AppHandle<AnalysisModal>>,
    on_close: Callback<()>,
    on_analyze: Callback<()>,
}

impl ContentScript {
    /// Mount the modal, install listeners and run the first scan
    pub fn start(config: ExtensionConfig) -> Result<Rc<ContentScript>> {
        let page = WebPage::current()?;
        let modal_root = mount_point(&page)?;
        let settle = SettleGuard::new(now_ms(), config.settle_window_ms);

        let script = Rc::new_cyclic(|weak: &Weak<ContentScript>| {
            let on_close = {
                let weak = weak.clone();
                Callback::from(move |_: ()| {
                    if let Some(script) = weak.upgrade() {
                        script.deactivate();
                    }
                })
            };
            let on_analyze = {
                let weak = weak.clone();
                Callback::from(move |_: ()| {
                    if let Some(script) = weak.upgrade() {
                        script.open_analysis();
                    }
                })
            };

            let view = yew::Renderer::<AnalysisModal>::with_root_and_props(
                modal_root,
                AnalysisModalProps {
                    info: None,
                    on_close: on_close.clone(),
                    on_analyze: on_analyze.clone(),
                },
            )
            .render();

            ContentScript {
                config,
                page,
                directory: RefCell::new(ChannelDirectory::empty()),
                modal: RefCell::new(ModalController::new()),
                debouncer: RefCell::new(Debouncer::new()),
                settle,
                view: RefCell::new(view),
                on_close,
                on_analyze,
            }
        });

        script.listen_for_marker_clicks()?;
        script.listen_for_navigation()?;
        script.observe_mutations()?;
        script.refresh(RefreshTrigger::Initial);

        log::info!("content script initialized");
        Ok(script)
    }

    /// Re-fetch the directory if the trigger calls for it, then rescan
    pub fn refresh(self: &Rc<Self>, trigger: RefreshTrigger) {
        let script = Rc::clone(self);
        spawn_local(async move {
            if trigger.refetches_directory() {
                let token = request_api_token().await;
                let directory = fetch_directory(&script.config, token.as_deref()).await;
                *script.directory.borrow_mut() = directory;
            }

            log::debug!("rescanning after {:?}", trigger);
            let directory = script.directory.borrow();
            scan_page(&script.page, &directory);
        });
    }

    pub fn activate(&self, info: VideoInfo) {
        let changed = self.modal.borrow_mut().activate(info);
        if changed {
            self.render();
        }
    }

    pub fn deactivate(&self) {
        self.modal.borrow_mut().deactivate();
        self.render();
    }

    fn open_analysis(&self) {
        let url = self.modal.borrow_mut().open_analysis(&self.config);
        if let Some(url) = url {
            if let Err(e) = self.page.open_tab(&url) {
                log::error!("could not open analysis page: {}", e);
            }
            self.render();
        }
    }

    fn render(&self) {
        let info = self.modal.borrow().state().video_info().cloned();
        self.view.borrow_mut().update(AnalysisModalProps {
            info,
            on_close: self.on_close.clone(),
            on_analyze: self.on_analyze.clone(),
        });
    }

    /// Current modal state, for inspection
    pub fn modal_state(&self) -> ModalState {
        self.modal.borrow().state().clone()
    }

    /// The clicked marker's details, once marker clicks are live
    fn intercepted_marker(&self, event: &MouseEvent) -> Option<VideoInfo> {
        if !self.settle.is_settled(now_ms()) {
            return None;
        }
        clicked_marker(event)
    }

    fn on_mouse_down(&self, event: &MouseEvent) {
        let Some(info) = self.intercepted_marker(event) else {
            return;
        };

        event.prevent_default();
        event.stop_propagation();
        event.stop_immediate_propagation();
        self.activate(info);
    }

    // The title link would otherwise navigate on the click that follows
    fn on_click(&self, event: &MouseEvent) {
        if self.intercepted_marker(event).is_some() {
            event.prevent_default();
            event.stop_propagation();
        }
    }

    fn schedule_mutation_rescan(self: &Rc<Self>) {
        if self.debouncer.borrow().is_pending() {
            log::trace!("postponing pending rescan");
        }
        let ticket = self.debouncer.borrow_mut().schedule();
        let weak = Rc::downgrade(self);

        let scheduled = run_later(self.config.mutation_debounce_ms, move || {
            if let Some(script) = weak.upgrade() {
                let due = script.debouncer.borrow_mut().fire(ticket);
                if due {
                    script.refresh(RefreshTrigger::Mutation);
                }
            }
        });
        if let Err(e) = scheduled {
            log::warn!("could not schedule rescan: {}", e);
        }
    }

    fn listen_for_marker_clicks(self: &Rc<Self>) -> Result<()> {
        let options = AddEventListenerOptions::new();
        options.set_capture(true);

        let weak = Rc::downgrade(self);
        let on_mouse_down = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            if let Some(script) = weak.upgrade() {
                script.on_mouse_down(&event);
            }
        });

        let weak = Rc::downgrade(self);
        let on_click = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            if let Some(script) = weak.upgrade() {
                script.on_click(&event);
            }
        });

        let document = self.page.document();
        document
            .add_event_listener_with_callback_and_add_event_listener_options(
                "mousedown",
                on_mouse_down.as_ref().unchecked_ref(),
                &options,
            )
            .map_err(ExtensionError::dom)?;
        document
            .add_event_listener_with_callback_and_add_event_listener_options(
                "click",
                on_click.as_ref().unchecked_ref(),
                &options,
            )
            .map_err(ExtensionError::dom)?;

        // Listeners live as long as the page
        on_mouse_down.forget();
        on_click.forget();
        Ok(())
    }

    fn listen_for_navigation(self: &Rc<Self>) -> Result<()> {
        let weak = Rc::downgrade(self);
        let delay = self.config.navigation_delay_ms;

        let on_navigate = Closure::<dyn FnMut()>::new(move || {
            let weak = weak.clone();
            let scheduled = run_later(delay, move || {
                if let Some(script) = weak.upgrade() {
                    // A full refresh covers any rescan still waiting on mutations
                    script.debouncer.borrow_mut().cancel();
                    script.refresh(RefreshTrigger::Navigation);
                }
            });
            if let Err(e) = scheduled {
                log::warn!("could not schedule navigation rescan: {}", e);
            }
        });

        self.page
            .window()
            .add_event_listener_with_callback(NAVIGATION_EVENT, on_navigate.as_ref().unchecked_ref())
            .map_err(ExtensionError::dom)?;
        on_navigate.forget();
        Ok(())
    }

    fn observe_mutations(self: &Rc<Self>) -> Result<()> {
        let weak = Rc::downgrade(self);
        let on_mutation = Closure::<dyn FnMut()>::new(move || {
            if let Some(script) = weak.upgrade() {
                script.schedule_mutation_rescan();
            }
        });

        let observer =
            MutationObserver::new(on_mutation.as_ref().unchecked_ref()).map_err(ExtensionError::dom)?;
        let options = MutationObserverInit::new();
        options.set_child_list(true);
        options.set_subtree(true);

        let body = self.page.body()?;
        observer
            .observe_with_options(&body, &options)
            .map_err(ExtensionError::dom)?;
        on_mutation.forget();
        Ok(())
    }
}

/// Ask the background worker for the session token
async fn request_api_token() -> Option<String> {
    match bridge::send_message::<UserDataResponse>(&ExtensionMessage::GetUserDataForApi).await {
        Ok(response) => {
            if response.token().is_none() {
                log::warn!("no session: {}", response.error.as_deref().unwrap_or("unknown"));
            }
            response.token().map(str::to_string)
        }
        Err(e) => {
            log::error!("session request failed: {}", e);
            None
        }
    }
}

fn clicked_marker(event: &MouseEvent) -> Option<VideoInfo> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    marker_video_info(&target)
}

fn mount_point(page: &WebPage) -> Result<Element> {
    if let Some(existing) = page.document().get_element_by_id(MODAL_ROOT_ID) {
        return Ok(existing);
    }

    let root = page
        .document()
        .create_element("div")
        .map_err(ExtensionError::dom)?;
    root.set_id(MODAL_ROOT_ID);
    page.body()?
        .append_child(&root)
        .map_err(ExtensionError::dom)?;
    Ok(root)
}
