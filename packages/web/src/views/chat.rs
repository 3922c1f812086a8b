use dioxus::prelude::*;
use ui::ChatView;

#[component]
pub fn Chat() -> Element {
    rsx! { ChatView { title: "Messages" } }
}

#[component]
pub fn OrgChat() -> Element {
    rsx! { ChatView { title: "Applicant chat" } }
}
