use std::rc::Rc;

use yew::prelude::*;
use gloo_timers::callback::Timeout;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use log::info;

use crate::booking::{submit, BookingDispatch, BookingDraft, FieldErrors, FormPhase, LogDispatch, ShootType, ValidationError};
use crate::config::CONFIRMATION_MS;

#[derive(Properties, Clone)]
pub struct BookingFormProps {
    /// Where valid requests go. Defaults to logging them.
    #[prop_or_else(log_dispatch)]
    pub dispatch: Rc<dyn BookingDispatch>,
}

impl PartialEq for BookingFormProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.dispatch, &other.dispatch)
    }
}

fn log_dispatch() -> Rc<dyn BookingDispatch> {
    Rc::new(LogDispatch)
}

fn now_ms() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64
}

fn error_line(error: Option<ValidationError>) -> Html {
    match error {
        Some(error) => html! { <span class="field-error">{error.to_string()}</span> },
        None => html! {},
    }
}

#[function_component(BookingForm)]
pub fn booking_form(props: &BookingFormProps) -> Html {
    let draft = use_state(BookingDraft::default);
    let errors = use_state(FieldErrors::default);
    let phase = use_state(|| FormPhase::Editing);
    let revert = use_mut_ref(|| None::<Timeout>);

    // Drop a pending revert when the form unmounts.
    {
        let revert = revert.clone();
        use_effect_with_deps(
            move |_| {
                move || {
                    revert.borrow_mut().take();
                }
            },
            (),
        );
    }

    let on_name = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*draft).clone();
            next.name = input.value();
            draft.set(next);
        })
    };

    let on_email = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*draft).clone();
            next.email = input.value();
            draft.set(next);
        })
    };

    let on_type = {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let mut next = (*draft).clone();
            next.shoot_type = select.value();
            draft.set(next);
        })
    };

    let onsubmit = {
        let draft = draft.clone();
        let errors = errors.clone();
        let phase = phase.clone();
        let revert = revert.clone();
        let dispatch = props.dispatch.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            match submit(&draft, &*dispatch, now_ms()) {
                Ok(sent) => {
                    info!("Booking sent, confirmation shown for {}ms", CONFIRMATION_MS);
                    errors.set(FieldErrors::default());
                    draft.set(BookingDraft::default());
                    phase.set(sent);
                    let phase = phase.clone();
                    *revert.borrow_mut() = Some(Timeout::new(CONFIRMATION_MS, move || {
                        phase.set(FormPhase::Editing);
                    }));
                }
                Err(field_errors) => {
                    info!("Booking rejected with {} field errors", field_errors.count());
                    errors.set(field_errors);
                }
            }
        })
    };

    let showing = phase.at(now_ms());

    html! {
        <div class="booking-form">
            <style>
                {r#"
                    .booking-form {
                        width: 100%;
                        max-width: 28rem;
                        background: rgba(255, 255, 255, 0.05);
                        border: 1px solid rgba(255, 255, 255, 0.1);
                        padding: 2rem;
                        backdrop-filter: blur(4px);
                    }
                    .booking-form h3 {
                        font-family: var(--font-display);
                        font-size: 1.5rem;
                        text-transform: uppercase;
                        margin-bottom: 1.5rem;
                    }
                    .booking-form input,
                    .booking-form select {
                        width: 100%;
                        background: transparent;
                        border: none;
                        border-bottom: 1px solid rgba(255, 255, 255, 0.2);
                        padding: 0.75rem 0;
                        color: #fff;
                        outline: none;
                        transition: border-color 0.3s;
                    }
                    .booking-form input:focus,
                    .booking-form select:focus {
                        border-color: #dc2626;
                    }
                    .booking-form option {
                        color: #000;
                    }
                    .booking-field {
                        margin-bottom: 1rem;
                    }
                    .field-error {
                        display: block;
                        color: #ef4444;
                        font-size: 0.75rem;
                        margin-top: 0.25rem;
                    }
                    .booking-submit {
                        width: 100%;
                        background: #fff;
                        color: #000;
                        font-weight: bold;
                        text-transform: uppercase;
                        letter-spacing: 0.1em;
                        padding: 1rem;
                        margin-top: 1rem;
                        border: none;
                        cursor: pointer;
                        transition: all 0.3s;
                    }
                    .booking-submit:hover {
                        background: #dc2626;
                        color: #fff;
                    }
                    .booking-sent {
                        color: #22c55e;
                        text-align: center;
                        padding: 2.5rem 0;
                        font-weight: bold;
                        text-transform: uppercase;
                    }
                "#}
            </style>
            <h3>{"Réservation rapide"}</h3>
            if showing.is_sent() {
                <div class="booking-sent">{"Message envoyé !"}</div>
            } else {
                <form onsubmit={onsubmit}>
                    <div class="booking-field">
                        <input
                            type="text"
                            placeholder="VOTRE NOM"
                            value={draft.name.clone()}
                            oninput={on_name}
                        />
                        {error_line(errors.name)}
                    </div>
                    <div class="booking-field">
                        <input
                            type="text"
                            inputmode="email"
                            placeholder="VOTRE E-MAIL"
                            value={draft.email.clone()}
                            oninput={on_email}
                        />
                        {error_line(errors.email)}
                    </div>
                    <div class="booking-field">
                        <select onchange={on_type}>
                            <option value="" selected={draft.shoot_type.is_empty()}>{"SÉLECTIONNEZ LE TYPE"}</option>
                            {
                                ShootType::ALL.iter().map(|shoot| html! {
                                    <option
                                        value={shoot.as_str()}
                                        selected={draft.shoot_type == shoot.as_str()}
                                    >
                                        {shoot.label()}
                                    </option>
                                }).collect::<Html>()
                            }
                        </select>
                        {error_line(errors.shoot_type)}
                    </div>
                    <button type="submit" class="booking-submit">{"Envoyer la demande"}</button>
                </form>
            }
        </div>
    }
}
