//! Email/password form shared by the login and signup pages.

use super::ErrorDisplay;
use dash_api::models::Credentials;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct AuthFormProps {
    pub title: String,
    pub submit_label: String,
    pub on_submit: EventHandler<Credentials>,
    /// Message from the last failed attempt, empty if none
    #[props(default)]
    pub error: String,
    /// Disables the button while a request is in flight
    #[props(default = false)]
    pub busy: bool,
    pub footer_prompt: String,
    pub footer_link: String,
    pub footer_href: String,
}

#[component]
pub fn AuthForm(props: AuthFormProps) -> Element {
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let on_submit = props.on_submit;

    let submit = move |evt: Event<FormData>| {
        evt.prevent_default();
        on_submit.call(Credentials::new(email(), password()));
    };

    let input_style = "width: 100%; box-sizing: border-box; padding: 8px 12px; border: 1px solid #ccc; border-radius: 6px; margin-bottom: 12px;";

    rsx! {
        div {
            style: "min-height: 100vh; display: flex; align-items: center; justify-content: center; background: #f3f4f6;",
            div {
                style: "background: white; border-radius: 8px; box-shadow: 0 1px 3px rgba(0,0,0,0.15); padding: 32px; max-width: 400px; width: 100%;",
                h1 {
                    style: "font-size: 24px; text-align: center; margin: 0 0 24px 0;",
                    "{props.title}"
                }
                if !props.error.is_empty() {
                    ErrorDisplay { message: props.error.clone() }
                }
                form {
                    onsubmit: submit,
                    input {
                        r#type: "email",
                        placeholder: "Email",
                        style: "{input_style}",
                        value: "{email}",
                        oninput: move |evt: Event<FormData>| email.set(evt.value()),
                    }
                    input {
                        r#type: "password",
                        placeholder: "Password",
                        style: "{input_style}",
                        value: "{password}",
                        oninput: move |evt: Event<FormData>| password.set(evt.value()),
                    }
                    button {
                        r#type: "submit",
                        disabled: props.busy,
                        style: "width: 100%; padding: 10px; background: #3b82f6; color: white; border: none; border-radius: 6px; cursor: pointer;",
                        "{props.submit_label}"
                    }
                }
                p {
                    style: "margin-top: 16px; text-align: center; color: #555;",
                    "{props.footer_prompt} "
                    a {
                        href: "{props.footer_href}",
                        style: "color: #3b82f6;",
                        "{props.footer_link}"
                    }
                }
            }
        }
    }
}
