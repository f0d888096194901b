//! Name, tags and profile image fields shared by every system

use dioxus::prelude::*;
use uuid::Uuid;

use crate::application::sheet_edit::BasicInfo;
use crate::ui::presentation::services::use_character_service;

const IMAGE_TYPES: [(&str, &str); 2] = [("image/png", "PNG"), ("image/jpeg", "JPEG")];

#[derive(Props, Clone, PartialEq)]
pub struct BasicInfoFormProps {
    pub info: BasicInfo,
    pub on_change: EventHandler<BasicInfo>,
    /// Set when editing a saved character; enables upload URL issuing.
    #[props(default)]
    pub character_id: Option<Uuid>,
}

#[component]
pub fn BasicInfoForm(props: BasicInfoFormProps) -> Element {
    let mut tag_input = use_signal(String::new);
    let on_change = props.on_change;

    let name_info = props.info.clone();
    let image_info = props.info.clone();
    let add_info = props.info.clone();
    let enter_info = props.info.clone();

    let mut add_tag = move |info: BasicInfo| {
        let mut next = info;
        if next.add_tag(&tag_input.peek()) {
            on_change.call(next);
        }
        tag_input.set(String::new());
    };

    rsx! {
        div {
            class: "grid gap-4",

            div {
                label { class: "label", "名前 *" }
                input {
                    r#type: "text",
                    class: "input",
                    value: "{props.info.name}",
                    oninput: move |e| {
                        let mut next = name_info.clone();
                        next.name = e.value();
                        on_change.call(next);
                    },
                }
            }

            div {
                label { class: "label", "タグ" }
                div {
                    class: "flex gap-2",
                    input {
                        r#type: "text",
                        class: "input flex-1",
                        placeholder: "タグを入力してEnter",
                        value: "{tag_input}",
                        oninput: move |e| tag_input.set(e.value()),
                        onkeydown: move |e: KeyboardEvent| {
                            if e.key() == Key::Enter {
                                e.prevent_default();
                                add_tag(enter_info.clone());
                            }
                        },
                    }
                    button {
                        r#type: "button",
                        class: "btn btn-secondary",
                        onclick: move |_| add_tag(add_info.clone()),
                        "追加"
                    }
                }
                div {
                    class: "flex flex-wrap gap-2 mt-2",
                    for tag in props.info.tags.iter().map(str::to_string) {
                        TagChip {
                            key: "{tag}",
                            tag: tag.clone(),
                            on_remove: {
                                let info = props.info.clone();
                                move |tag: String| {
                                    let mut next = info.clone();
                                    next.remove_tag(&tag);
                                    on_change.call(next);
                                }
                            },
                        }
                    }
                }
            }

            div {
                label { class: "label", "プロフィール画像URL" }
                input {
                    r#type: "url",
                    class: "input",
                    placeholder: "https://...",
                    value: "{props.info.profile_image_url}",
                    oninput: move |e| {
                        let mut next = image_info.clone();
                        next.profile_image_url = e.value();
                        on_change.call(next);
                    },
                }
                if let Some(id) = props.character_id {
                    ImageUploadUrl {
                        character_id: id,
                        info: props.info.clone(),
                        on_change,
                    }
                }
            }
        }
    }
}

#[component]
fn TagChip(tag: String, on_remove: EventHandler<String>) -> Element {
    let removed = tag.clone();
    rsx! {
        span {
            class: "tag",
            "{tag}"
            button {
                r#type: "button",
                class: "tag-remove",
                onclick: move |_| on_remove.call(removed.clone()),
                "×"
            }
        }
    }
}

/// Issues an upload URL and points the profile image at its public URL.
#[component]
fn ImageUploadUrl(character_id: Uuid, info: BasicInfo, on_change: EventHandler<BasicInfo>) -> Element {
    let character_service = use_character_service();
    let mut mime_type = use_signal(|| IMAGE_TYPES[0].0.to_string());
    let mut upload_url: Signal<Option<String>> = use_signal(|| None);
    let mut loading = use_signal(|| false);
    let mut error: Signal<Option<String>> = use_signal(|| None);

    let request = move |_: MouseEvent| {
        let svc = character_service.clone();
        let info = info.clone();
        let mime = mime_type.peek().clone();
        spawn(async move {
            loading.set(true);
            error.set(None);
            match svc.image_upload_url(character_id, &mime).await {
                Ok(res) => {
                    tracing::info!(character_id = %character_id, "Issued image upload URL");
                    upload_url.set(Some(res.upload_url));
                    let mut next = info;
                    next.profile_image_url = res.public_url;
                    on_change.call(next);
                }
                Err(e) => error.set(Some(e.user_message())),
            }
            loading.set(false);
        });
    };

    rsx! {
        div {
            class: "flex flex-col gap-2 mt-2",
            div {
                class: "flex gap-2 items-center",
                select {
                    class: "input",
                    value: "{mime_type}",
                    onchange: move |e| mime_type.set(e.value()),
                    for (value, label) in IMAGE_TYPES {
                        option { key: "{value}", value: "{value}", "{label}" }
                    }
                }
                button {
                    r#type: "button",
                    class: "btn btn-secondary",
                    disabled: *loading.read(),
                    onclick: request,
                    if *loading.read() { "発行中..." } else { "アップロードURLを発行" }
                }
            }
            if let Some(url) = upload_url.read().as_ref() {
                code { class: "break-all text-sm", "{url}" }
            }
            if let Some(err) = error.read().as_ref() {
                div { class: "text-red-400 text-sm", "{err}" }
            }
        }
    }
}
