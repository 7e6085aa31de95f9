/// Analysis modal rendered over YouTube pages

use crate::modal::VideoInfo;
use crate::ui::components::{ModalButton, ModalButtonVariant, ModalHeader};
use yew::prelude::*;

pub const MODAL_ROOT_ID: &str = "ascenTubeModalRoot";

const OVERLAY_STYLE: &str = "position: fixed; top: 0; left: 0; width: 100%; height: 100%; background-color: rgba(0, 0, 0, 0.6); z-index: 9998;";
const MODAL_STYLE: &str = "position: fixed; top: 50%; left: 50%; transform: translate(-50%, -50%); display: flex; flex-direction: column; width: 480px; max-width: 95vw; max-height: 90vh; overflow: hidden; padding: 20px; border: 1px solid #ccc; border-radius: 8px; box-shadow: 0 4px 8px rgba(0,0,0,0.2); background-color: #fff; color: #333; z-index: 9999;";

#[derive(Properties, PartialEq, Clone)]
pub struct AnalysisModalProps {
    /// Present while the modal is open
    pub info: Option<VideoInfo>,
    pub on_close: Callback<()>,
    pub on_analyze: Callback<()>,
}

#[function_component(AnalysisModal)]
pub fn analysis_modal(props: &AnalysisModalProps) -> Html {
    let Some(info) = &props.info else {
        return html! {};
    };

    let close = props.on_close.reform(|_: MouseEvent| ());
    let analyze = props.on_analyze.reform(|_: MouseEvent| ());

    html! {
        <>
            <div id="ascenTubeModalOverlay" style={OVERLAY_STYLE} onclick={close.clone()}></div>
            <div id="ascenTubeAnalysisModal" style={MODAL_STYLE}>
                <ModalHeader title={modal_title(info)} on_close={close} />
                <div id="ascenTubeModalContent" style="flex-grow: 1; overflow-y: auto; padding-right: 10px; padding-bottom: 50px;">
                    <p style="margin-top: 0; line-height: 1.6; white-space: pre-wrap;">{modal_body(info)}</p>
                    <div style="text-align: center; margin-top: 20px;">
                        <ModalButton
                            id={AttrValue::from("ascenTubeRealtimeAnalysisButton")}
                            onclick={analyze}
                            variant={ModalButtonVariant::Primary}
                        >
                            <span style="font-size: 1.4em;">{"🔍"}</span>
                            {"실시간 분석하기"}
                        </ModalButton>
                    </div>
                </div>
            </div>
        </>
    }
}

pub fn modal_title(info: &VideoInfo) -> String {
    format!("\"{}\" 실시간 분석하기", info.video_title)
}

pub fn modal_body(info: &VideoInfo) -> String {
    format!(
        "채널: {} ({})\n영상 링크: {}\n\n",
        info.channel_name,
        info.channel_label(),
        info.video_url
    )
}
