/// Reusable UI components for the injected modal
///
/// These render inside YouTube pages, so they carry inline styles instead
/// of relying on a stylesheet.

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ModalButtonProps {
    pub onclick: Callback<MouseEvent>,
    pub children: Children,
    #[prop_or_default]
    pub variant: ModalButtonVariant,
    #[prop_or_default]
    pub id: Option<AttrValue>,
}

#[derive(PartialEq, Clone, Default)]
pub enum ModalButtonVariant {
    #[default]
    Primary,
    Close,
}

#[function_component(ModalButton)]
pub fn modal_button(props: &ModalButtonProps) -> Html {
    let style = match props.variant {
        ModalButtonVariant::Primary => "display: flex; align-items: center; justify-content: center; gap: 10px; margin: 0 auto; padding: 12px 30px; border: none; border-radius: 8px; background-color: #ff0000; color: white; font-size: 1.3em; font-weight: bold; cursor: pointer; transition: background-color 0.2s;",
        ModalButtonVariant::Close => "background: none; border: none; padding: 0 5px; font-size: 1.8em; line-height: 1; color: #888; cursor: pointer;",
    };

    html! {
        <button id={props.id.clone()} onclick={props.onclick.clone()} style={style}>
            {props.children.clone()}
        </button>
    }
}

#[derive(Properties, PartialEq)]
pub struct ModalHeaderProps {
    pub title: AttrValue,
    pub on_close: Callback<MouseEvent>,
}

#[function_component(ModalHeader)]
pub fn modal_header(props: &ModalHeaderProps) -> Html {
    html! {
        <div style="display: flex; justify-content: space-between; align-items: center; border-bottom: 1px solid #eee; margin-bottom: 15px; padding-bottom: 10px;">
            <h2 style="margin: 0; font-size: 1.3em; color: #1a73e8; font-weight: 600;">{props.title.clone()}</h2>
            <ModalButton
                id={AttrValue::from("ascenTubeModalCloseButton")}
                onclick={props.on_close.clone()}
                variant={ModalButtonVariant::Close}
            >
                {"×"}
            </ModalButton>
        </div>
    }
}
