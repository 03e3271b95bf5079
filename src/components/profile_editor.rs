//! Profile Editor Component
//!
//! Edit form shared by business and user pages. The "are you a business?"
//! answer decides which fields show and where the form is posted; a
//! non-empty address is geocoded before saving.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::ProfileForm;
use crate::components::InlineError;
use crate::context::use_app_context;
use crate::maps::AddressAutocomplete;
use crate::profile_view::{self, calendar_preview, ProfileView};
use crate::routes::go_to;

#[component]
fn TextField(
    label: &'static str,
    name: &'static str,
    value: RwSignal<String>,
    #[prop(optional)] multiline: bool,
) -> impl IntoView {
    let id = format!("edit-{}", name);
    let input = if multiline {
        view! {
            <textarea
                class="form-control"
                id=id.clone()
                name=name
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        }
        .into_any()
    } else {
        view! {
            <input
                type="text"
                class="form-control"
                id=id.clone()
                name=name
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        }
        .into_any()
    };
    view! {
        <div class="form-group">
            <label for=id>{label}</label>
            {input}
        </div>
    }
}

/// Address input with place suggestions, biased to where the browser is
#[component]
fn LocationField(value: RwSignal<String>) -> impl IntoView {
    let input_ref = NodeRef::<leptos::html::Input>::new();

    Effect::new(move |attached: Option<bool>| {
        if attached == Some(true) {
            return true;
        }
        let Some(input) = input_ref.get() else {
            return false;
        };
        match AddressAutocomplete::attach(&input, move |picked| value.set(picked)) {
            Ok(autocomplete) => autocomplete.bias_to_browser_location(),
            Err(e) => log::debug!("[PROFILE] no address suggestions: {}", e),
        }
        true
    });

    view! {
        <div class="form-group">
            <label for="edit-location">"Location"</label>
            <input
                type="text"
                class="form-control"
                id="edit-location"
                name="location"
                autocomplete="off"
                node_ref=input_ref
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </div>
    }
}

#[component]
pub fn ProfileEditor(view: ProfileView, on_cancel: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();
    let initial = view.to_form();

    let is_business = RwSignal::new(initial.is_business);
    let name = RwSignal::new(initial.name);
    let location = RwSignal::new(initial.location);
    let bio = RwSignal::new(initial.bio);
    let story = RwSignal::new(initial.story);
    let about = RwSignal::new(initial.about);
    let support = RwSignal::new(initial.support);
    let calendar_email = RwSignal::new(initial.calendar_email);

    let (saving, set_saving) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    let config = ctx.config.clone();
    let preview = Memo::new(move |_| calendar_preview(&config, &calendar_email.get()));

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }
        let form = ProfileForm {
            is_business: is_business.get_untracked(),
            name: name.get_untracked(),
            location: location.get_untracked(),
            bio: bio.get_untracked(),
            story: story.get_untracked(),
            about: about.get_untracked(),
            support: support.get_untracked(),
            calendar_email: calendar_email.get_untracked(),
            lat: None,
            long: None,
        };
        set_saving.set(true);
        set_error.set(None);
        let api = ctx.api.clone();
        let geocoder = ctx.geocoder.clone();
        spawn_local(async move {
            let target = form.target();
            match profile_view::save(&api, geocoder.as_ref(), form).await {
                Ok(next) => go_to(if next.is_empty() { target } else { &next }),
                Err(e) => {
                    log::warn!("[PROFILE] save rejected: {}", e);
                    set_error.set(Some(e.to_string()));
                    set_saving.set(false);
                }
            }
        });
    };

    view! {
        <form id="edit-section" class="profile-editor" on:submit=on_submit>
            <fieldset class="form-group questionnaire">
                <legend>"Are you a business?"</legend>
                <label>
                    <input
                        type="radio"
                        id="yes"
                        name="isBusiness"
                        prop:checked=move || is_business.get()
                        on:change=move |_| is_business.set(true)
                    />
                    " Yes"
                </label>
                <label>
                    <input
                        type="radio"
                        id="no"
                        name="isBusiness"
                        prop:checked=move || !is_business.get()
                        on:change=move |_| is_business.set(false)
                    />
                    " No"
                </label>
            </fieldset>

            <TextField label="Name" name="name" value=name />
            <LocationField value=location />
            <TextField label="Bio" name="bio" value=bio multiline=true />

            <div id="business-questionnaire" hidden=move || !is_business.get()>
                <TextField label="Our Story" name="story" value=story multiline=true />
                <TextField label="About" name="about" value=about multiline=true />
                <TextField label="How to Support" name="support" value=support multiline=true />
                <TextField label="Public Google Calendar" name="calendar" value=calendar_email />
                <p id="calendar-warning" class="text-warning" hidden=move || preview.get().is_none()>
                    "Make sure this calendar is public, otherwise visitors will not see it."
                </p>
                <iframe
                    id="edit-calendar-preview"
                    hidden=move || preview.get().is_none()
                    src=move || preview.get().unwrap_or_default()
                    height="300px"
                    width="500px"
                ></iframe>
            </div>

            <InlineError message=error />
            <div class="form-actions">
                <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                    {move || if saving.get() { "Saving..." } else { "Save" }}
                </button>
                <button type="button" class="btn btn-light" on:click=move |_| on_cancel.run(())>
                    "Cancel"
                </button>
            </div>
        </form>
    }
}
