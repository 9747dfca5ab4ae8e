//! "Start a project" lead capture dialog
//!
//! The form posts a `ProjectRequest` to `/api/send-email` and shows the
//! result inline. All request state goes through `SubmissionState`:
//! - fields are disabled while submitting
//! - the submit button stays disabled after success until the dialog closes
//! - the dialog closes itself `AUTO_CLOSE_DELAY_MS` after a success, unless
//!   the user closed it first
//! - opening or closing the dialog resets the state to idle, and a reply to
//!   a send from before the reset is ignored

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::core::modal::LEAD_CAPTURE_MODAL;
use crate::core::submission::{
    FORM_SUBMISSION_ERROR_SCOPE, ProjectRequest, SubmissionPhase, SubmissionState, SubmitOutcome,
};
use crate::ui::common::{ErrorMessage, SuccessMessage};
use crate::ui::i18n::use_translate;
use crate::ui::icon::{Icon, icons};
use crate::ui::modal::{Modal, ModalContext, use_modal_context};

/// POST the request and classify the result
#[cfg(not(feature = "ssr"))]
async fn send_project_request(request: &ProjectRequest) -> SubmitOutcome {
    use crate::core::submission::{SEND_EMAIL_PATH, interpret_response};
    use gloo_net::http::Request;

    let request = match Request::post(SEND_EMAIL_PATH)
        .header("Content-Type", "application/json")
        .json(request)
    {
        Ok(request) => request,
        Err(err) => return SubmitOutcome::Transport(err.to_string()),
    };

    match request.send().await {
        Ok(response) => {
            let status = response.status();
            match response.text().await {
                Ok(body) => interpret_response(status, &body),
                Err(err) => SubmitOutcome::Transport(err.to_string()),
            }
        }
        Err(err) => SubmitOutcome::Transport(err.to_string()),
    }
}

#[cfg(feature = "ssr")]
async fn send_project_request(_request: &ProjectRequest) -> SubmitOutcome {
    SubmitOutcome::Transport("submissions are only sent from the browser".to_string())
}

/// Fire-and-forget failure report
fn report_failure(details: &str) {
    leptos::logging::error!("[{}] {}", FORM_SUBMISSION_ERROR_SCOPE, details);
}

/// Wait out the success banner, then close unless something reset the form
async fn auto_close_after_success(
    token: crate::core::submission::AutoCloseToken,
    submission: RwSignal<SubmissionState>,
    modals: ModalContext,
) {
    #[cfg(not(feature = "ssr"))]
    {
        use crate::core::submission::AUTO_CLOSE_DELAY_MS;
        use gloo_timers::future::TimeoutFuture;

        TimeoutFuture::new(AUTO_CLOSE_DELAY_MS).await;
        if submission
            .try_update(|s| s.auto_close(token))
            .unwrap_or(false)
        {
            modals.close(LEAD_CAPTURE_MODAL);
        }
    }
    #[cfg(feature = "ssr")]
    {
        let _ = (token, submission, modals);
    }
}

/// Button opening the lead capture dialog
#[component]
pub fn StartProjectButton(
    #[prop(default = "landing-btn-primary")]
    class: &'static str,
) -> impl IntoView {
    let modals = use_modal_context();
    let tr = use_translate();

    view! {
        <button
            type="button"
            class=class
            on:click=move |_| modals.open(LEAD_CAPTURE_MODAL)
        >
            {tr("lead.open")}
            <Icon name=icons::ARROW_RIGHT class="w-4 h-4 ml-2 inline-block"/>
        </button>
    }
}

/// Lead capture dialog with its form
#[component]
pub fn LeadCaptureModal() -> impl IntoView {
    let modals = use_modal_context();
    let tr = use_translate();

    // Form state
    let user_name = RwSignal::new(String::new());
    let user_email = RwSignal::new(String::new());
    let project_name = RwSignal::new(String::new());
    let budget = RwSignal::new(String::new());
    let project_description = RwSignal::new(String::new());

    let submission = RwSignal::new(SubmissionState::new());

    // Every open/close starts from idle and voids a pending auto-close
    let is_open = modals.is_open_signal(LEAD_CAPTURE_MODAL);
    Effect::new(move |_| {
        let _ = is_open.get();
        submission.update(|s| s.reset());
    });

    let fields_disabled = move || submission.with(|s| s.fields_disabled());
    let submit_disabled = move || submission.with(|s| s.submit_disabled());
    let is_submitting = move || submission.with(|s| s.is_submitting());

    let error = Signal::derive(move || {
        submission.with(|s| match s.phase() {
            SubmissionPhase::Error(message) => Some(message.clone()),
            _ => None,
        })
    });
    let success = Signal::derive(move || {
        submission.with(|s| (*s.phase() == SubmissionPhase::Success).then(|| tr("lead.success")))
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let Some(Ok(attempt)) = submission.try_update(|s| s.begin()) else {
            return;
        };

        let request = ProjectRequest {
            user_name: user_name.get_untracked(),
            user_email: user_email.get_untracked(),
            project_name: project_name.get_untracked(),
            budget: budget.get_untracked(),
            project_description: project_description.get_untracked(),
        };
        let fallback = tr("lead.error_generic");

        // The browser enforces `required` first; this catches what slips past
        if let Err(err) = request.validate() {
            submission.update(|s| {
                s.finish(
                    attempt,
                    SubmitOutcome::Rejected {
                        message: Some(err.to_string()),
                    },
                    &fallback,
                );
            });
            return;
        }

        spawn_local(async move {
            let outcome = send_project_request(&request).await;
            if let Some(details) = outcome.failure_details() {
                report_failure(&details);
            }

            let token = submission.try_update(|s| s.finish(attempt, outcome, &fallback)).flatten();
            if let Some(token) = token {
                auto_close_after_success(token, submission, modals).await;
            }
        });
    };

    let input_class = "w-full px-3 py-2 bg-theme-secondary border border-theme rounded-lg
                       text-theme-primary placeholder-theme-tertiary
                       focus:outline-none focus:ring-2 focus:ring-accent-primary focus:border-transparent
                       disabled:opacity-60 transition-colors";

    view! {
        <Modal
            id=LEAD_CAPTURE_MODAL
            title=tr("lead.title")
            subtitle=tr("lead.subtitle")
            close_label=tr("modal.close")
        >
            <form on:submit=on_submit class="space-y-4">
                <ErrorMessage error=error/>
                <SuccessMessage message=success/>

                <div class="grid gap-4 sm:grid-cols-2">
                    <div>
                        <label for="lead-name" class="block text-sm font-medium text-theme-primary mb-1">
                            {tr("lead.name")}
                        </label>
                        <input
                            id="lead-name"
                            name="userName"
                            type="text"
                            autocomplete="name"
                            required=true
                            class=input_class
                            prop:value=move || user_name.get()
                            on:input=move |ev| user_name.set(event_target_value(&ev))
                            disabled=fields_disabled
                        />
                    </div>
                    <div>
                        <label for="lead-email" class="block text-sm font-medium text-theme-primary mb-1">
                            {tr("lead.email")}
                        </label>
                        <input
                            id="lead-email"
                            name="userEmail"
                            type="email"
                            autocomplete="email"
                            required=true
                            class=input_class
                            prop:value=move || user_email.get()
                            on:input=move |ev| user_email.set(event_target_value(&ev))
                            disabled=fields_disabled
                        />
                    </div>
                </div>

                <div class="grid gap-4 sm:grid-cols-2">
                    <div>
                        <label for="lead-project" class="block text-sm font-medium text-theme-primary mb-1">
                            {tr("lead.project")}
                        </label>
                        <input
                            id="lead-project"
                            name="projectName"
                            type="text"
                            required=true
                            class=input_class
                            prop:value=move || project_name.get()
                            on:input=move |ev| project_name.set(event_target_value(&ev))
                            disabled=fields_disabled
                        />
                    </div>
                    <div>
                        <label for="lead-budget" class="block text-sm font-medium text-theme-primary mb-1">
                            {tr("lead.budget")}
                        </label>
                        <input
                            id="lead-budget"
                            name="budget"
                            type="text"
                            placeholder=tr("lead.budget_placeholder")
                            class=input_class
                            prop:value=move || budget.get()
                            on:input=move |ev| budget.set(event_target_value(&ev))
                            disabled=fields_disabled
                        />
                    </div>
                </div>

                <div>
                    <label for="lead-description" class="block text-sm font-medium text-theme-primary mb-1">
                        {tr("lead.description")}
                    </label>
                    <textarea
                        id="lead-description"
                        name="projectDescription"
                        rows=4
                        required=true
                        class=input_class
                        prop:value=move || project_description.get()
                        on:input=move |ev| project_description.set(event_target_value(&ev))
                        disabled=fields_disabled
                    ></textarea>
                </div>

                <button
                    type="submit"
                    class="w-full py-2.5 px-4 bg-accent-primary hover:bg-accent-primary-hover
                           text-white font-medium rounded-lg
                           focus:outline-none focus:ring-2 focus:ring-offset-2 focus:ring-accent-primary
                           disabled:opacity-50 disabled:cursor-not-allowed
                           transition-colors"
                    disabled=submit_disabled
                >
                    {move || {
                        if is_submitting() {
                            view! {
                                <span class="flex items-center justify-center">
                                    <Icon name=icons::LOADER class="animate-spin -ml-1 mr-2 h-4 w-4" />
                                    {tr("lead.submitting")}
                                </span>
                            }.into_any()
                        } else {
                            view! { <span class="block">{tr("lead.submit")}</span> }.into_any()
                        }
                    }}
                </button>
            </form>
        </Modal>
    }
}
