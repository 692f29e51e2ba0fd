use std::cell::RefCell;
use std::rc::Rc;

use gloo::timers::callback::Timeout;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlFormElement, HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::api::GlooClient;
use crate::config::ClientConfig;
use crate::controller::{ActivityView, BrowserConfirm, Controller, StatusMessage};
use crate::markup::{activity_card, REMOVE_BUTTON_SELECTOR};
use crate::model::Catalog;

const PLACEHOLDER_OPTION: &str = "-- Select an activity --";

/// Delay before the status region hides itself. `None` keeps it shown.
fn hide_after(timeout_ms: u32) -> Option<u32> {
    (timeout_ms > 0).then_some(timeout_ms)
}

/// `(value, label)` pairs for the activity select, blank placeholder first.
fn select_options(names: &[String]) -> Vec<(String, String)> {
    std::iter::once((String::new(), PLACEHOLDER_OPTION.to_string()))
        .chain(names.iter().map(|name| (name.clone(), name.clone())))
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
enum ListState {
    Loading,
    Loaded(Catalog),
    Failed,
}

/// Yew state handles the controller writes through.
#[derive(Clone)]
struct PageView {
    list: UseStateHandle<ListState>,
    options: UseStateHandle<Vec<String>>,
    message: UseStateHandle<Option<StatusMessage>>,
    message_visible: UseStateHandle<bool>,
    hide_timer: Rc<RefCell<Option<Timeout>>>,
    message_timeout_ms: u32,
    form: NodeRef,
}

impl ActivityView for PageView {
    fn show_catalog(&self, catalog: Catalog) {
        self.options.set(catalog.names().map(str::to_string).collect());
        self.list.set(ListState::Loaded(catalog));
    }

    fn show_load_failure(&self) {
        self.list.set(ListState::Failed);
    }

    fn show_message(&self, message: StatusMessage) {
        self.message.set(Some(message));
        self.message_visible.set(true);

        // Replacing the handle drops, and so cancels, any pending hide.
        let timer = hide_after(self.message_timeout_ms).map(|ms| {
            let visible = self.message_visible.clone();
            Timeout::new(ms, move || visible.set(false))
        });
        *self.hide_timer.borrow_mut() = timer;
    }

    fn reset_form(&self) {
        if let Some(form) = self.form.cast::<HtmlFormElement>() {
            form.reset();
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub config: ClientConfig,
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let api = GlooClient::new(props.config.api_base.clone());

    let form_ref = use_node_ref();
    let email_ref = use_node_ref();
    let activity_ref = use_node_ref();

    let view = PageView {
        list: use_state(|| ListState::Loading),
        options: use_state(Vec::<String>::new),
        message: use_state(|| None::<StatusMessage>),
        message_visible: use_state(|| false),
        hide_timer: use_mut_ref(|| None::<Timeout>),
        message_timeout_ms: props.config.message_timeout_ms,
        form: form_ref.clone(),
    };

    // Initial load.
    {
        let controller = Controller::new(api.clone(), view.clone());
        use_effect_with((), move |_| {
            spawn_local(async move { controller.fetch_activities().await });
            || ()
        });
    }

    // One listener on the container; buttons are plain markup inside the cards.
    let on_list_click = {
        let api = api.clone();
        let view = view.clone();
        Callback::from(move |e: MouseEvent| {
            let Some(btn) = e
                .target_dyn_into::<Element>()
                .and_then(|el| el.closest(REMOVE_BUTTON_SELECTOR).ok().flatten())
            else {
                return;
            };
            let activity = btn.get_attribute("data-activity").unwrap_or_default();
            let email = btn.get_attribute("data-email").unwrap_or_default();
            if activity.is_empty() || email.is_empty() {
                return;
            }

            let controller = Controller::new(api.clone(), view.clone());
            spawn_local(async move {
                controller.remove_participant(&BrowserConfirm, &activity, &email).await;
            });
        })
    };

    let on_submit = {
        let api = api.clone();
        let view = view.clone();
        let email_ref = email_ref.clone();
        let activity_ref = activity_ref.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let email = email_ref
                .cast::<HtmlInputElement>()
                .map(|input| input.value())
                .unwrap_or_default();
            let activity = activity_ref
                .cast::<HtmlSelectElement>()
                .map(|select| select.value())
                .unwrap_or_default();

            let controller = Controller::new(api.clone(), view.clone());
            spawn_local(async move {
                controller.submit_signup(&activity, &email).await;
            });
        })
    };

    let list_body = match &*view.list {
        ListState::Loading => html! { <p>{ "Loading activities..." }</p> },
        ListState::Failed => html! { <p>{ "Failed to load activities. Please try again later." }</p> },
        ListState::Loaded(catalog) => html! {
            <>
              { for catalog.activities.iter().map(|(name, activity)| html! {
                  <div class="activity-card" key={name.clone()}>
                    { Html::from_html_unchecked(activity_card(name, activity).into()) }
                  </div>
              }) }
            </>
        },
    };

    let message_class = match &*view.message {
        Some(m) => classes!(m.kind.css_class(), (!*view.message_visible).then_some("hidden")),
        None => classes!("hidden"),
    };
    let message_text = (*view.message).as_ref().map(|m| m.text.clone()).unwrap_or_default();

    html! {
      <>
        <header>
          <h1>{ "Mergington High School" }</h1>
          <h2>{ "Extracurricular Activities" }</h2>
        </header>

        <main>
          <section id="activities-container">
            <h3>{ "Available Activities" }</h3>
            <div id="activities-list" onclick={on_list_click}>
              { list_body }
            </div>
          </section>

          <section id="signup-container">
            <h3>{ "Sign Up for an Activity" }</h3>
            <form id="signup-form" ref={form_ref} onsubmit={on_submit}>
              <div class="form-group">
                <label for="email">{ "Student Email:" }</label>
                <input type="email" id="email" ref={email_ref} required=true placeholder="your-email@mergington.edu" />
              </div>
              <div class="form-group">
                <label for="activity">{ "Select Activity:" }</label>
                <select id="activity" ref={activity_ref} required=true>
                  { for select_options(&view.options).into_iter().map(|(value, label)| html! {
                      <option key={value.clone()} {value}>{ label }</option>
                  }) }
                </select>
              </div>
              <button type="submit">{ "Sign Up" }</button>
            </form>
            <div id="message" class={message_class}>{ message_text }</div>
          </section>
        </main>
      </>
    }
}
