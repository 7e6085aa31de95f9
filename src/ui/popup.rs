/// Popup UI for the AscenTube extension

use crate::bridge;
use crate::config::CONFIG;
use crate::session::{ExtensionMessage, UserStatus};
use crate::timer::run_later;
use patternfly_yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

const SYNC_HINT: &str = "웹사이트 로그인 후, 유튜브 페이지를 새로고침하거나 잠시 기다려주세요.";

/// What the popup shows for a status query result
#[derive(Clone, PartialEq, Debug)]
pub struct StatusView {
    pub headline: String,
    pub message: Option<String>,
    pub logged_in: bool,
}

impl StatusView {
    pub fn from_status(result: Result<UserStatus, String>) -> StatusView {
        match result {
            Ok(UserStatus {
                is_logged_in: true,
                user_name: Some(name),
            }) => StatusView {
                headline: format!("{}님, 환영합니다!", name),
                message: None,
                logged_in: true,
            },
            Ok(UserStatus {
                is_logged_in: true,
                user_name: None,
            }) => StatusView {
                headline: "로그인 상태입니다.".to_string(),
                message: Some("사용자 정보가 일부 누락되었을 수 있습니다.".to_string()),
                logged_in: true,
            },
            Ok(_) => StatusView {
                headline: "로그인이 필요합니다.".to_string(),
                message: Some("AscenTube 웹사이트에서 먼저 로그인해주세요.".to_string()),
                logged_in: false,
            },
            Err(e) => {
                log::warn!("status query failed: {}", e);
                StatusView {
                    headline: "상태 확인 중 오류 발생".to_string(),
                    message: Some("백그라운드 스크립트 연결을 확인해주세요.".to_string()),
                    logged_in: false,
                }
            }
        }
    }
}

#[derive(Clone, PartialEq)]
enum PopupState {
    Checking,
    Ready(StatusView),
}

#[function_component(App)]
pub fn app() -> Html {
    let state = use_state(|| PopupState::Checking);
    let sync_message = use_state(|| None::<String>);
    let sync_generation = use_mut_ref(|| 0u32);

    // Query login status on mount
    {
        let state = state.clone();
        use_effect_with((), move |_| {
            refresh_status(state);
            || ()
        });
    }

    let on_sync = {
        let state = state.clone();
        let sync_message = sync_message.clone();
        let sync_generation = sync_generation.clone();

        Callback::from(move |_| {
            sync_message.set(Some(SYNC_HINT.to_string()));
            state.set(PopupState::Checking);
            refresh_status(state.clone());

            // Only the most recent click clears the hint
            let generation = {
                let mut current = sync_generation.borrow_mut();
                *current += 1;
                *current
            };
            let sync_message = sync_message.clone();
            let sync_generation = sync_generation.clone();
            let scheduled = run_later(CONFIG.sync_message_ms, move || {
                if *sync_generation.borrow() == generation {
                    sync_message.set(None);
                }
            });
            if let Err(e) = scheduled {
                log::warn!("could not schedule hint removal: {}", e);
            }
        })
    };

    let is_busy = matches!(*state, PopupState::Checking);

    html! {
        <div class="padding-20">
            <h1 class="popup-title">{"AscenTube"}</h1>

            {match &*state {
                PopupState::Checking => html! {
                    <div class="loading-text-center">
                        <Spinner />
                        <p class="loading-text">{"상태 확인 중..."}</p>
                    </div>
                },
                PopupState::Ready(view) => html! {
                    <div class="message-top-margin">
                        <p id="loginStatus" class="message-text">{&view.headline}</p>
                        if let Some(message) = &view.message {
                            <Alert
                                r#type={if view.logged_in { AlertType::Info } else { AlertType::Warning }}
                                title={message.clone()}
                                inline={true}
                            >
                            </Alert>
                        }
                    </div>
                },
            }}

            <div class="flex-column-gap">
                <Button onclick={on_sync} disabled={is_busy} variant={ButtonVariant::Secondary} block={true}>
                    {"🔄 동기화"}
                </Button>
                if let Some(message) = &*sync_message {
                    <p id="syncMessage" class="message-paragraph">{message}</p>
                }
            </div>

            <p class="footer-popup">
                {"AscenTube v0.1.0"}
            </p>
        </div>
    }
}

fn refresh_status(state: UseStateHandle<PopupState>) {
    spawn_local(async move {
        let result = bridge::send_message::<UserStatus>(&ExtensionMessage::GetUserStatus)
            .await
            .map_err(|e| format!("Failed to get status: {}", e));
        state.set(PopupState::Ready(StatusView::from_status(result)));
    });
}
