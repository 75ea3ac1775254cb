use crate::helpers::{let_tasks_run, spawn_form, spawn_form_with_timeout, Reply, StubWaitlistClient};
use std::sync::Arc;
use std::time::Duration;
use waitlist_intake::form::{FailureReason, SubmissionState, Tone};

#[tokio::test]
async fn invalid_emails_are_rejected_without_a_network_call() {
    let client = StubWaitlistClient::replying(Reply::Created);
    let form = spawn_form(client.clone());

    let test_cases = vec![
        ("", "empty"),
        ("person.example.com", "missing the @"),
        ("person@example", "no dot after the @"),
        ("per son@example.com", "embedded whitespace"),
        ("a@b@example.com", "two @"),
    ];

    for (raw, description) in test_cases {
        form.on_change(raw);
        form.on_submit(raw);

        assert_eq!(
            form.submission(),
            SubmissionState::Error(FailureReason::InvalidEmail),
            "The form did not reject an email with {}",
            description
        );
    }

    let_tasks_run().await;
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn valid_email_goes_through_submitting_to_success() {
    let client = StubWaitlistClient::gated(Reply::Created);
    let form = spawn_form(client.clone());
    assert_eq!(form.submission(), SubmissionState::Idle);

    form.on_change("person@example.com");
    form.on_submit("person@example.com");
    assert_eq!(form.submission(), SubmissionState::Submitting);
    assert!(form.feedback().button_disabled);

    client.release();
    let settled = form.settled().await;

    assert_eq!(settled.submission, SubmissionState::Success);
    assert_eq!(client.calls(), vec!["person@example.com".to_string()]);
}

#[tokio::test]
async fn email_is_normalized_before_dispatch() {
    let client = StubWaitlistClient::replying(Reply::Created);
    let form = spawn_form(client.clone());

    form.on_submit("  Person@Example.com ");
    form.settled().await;

    assert_eq!(client.calls(), vec!["person@example.com".to_string()]);
}

#[tokio::test]
async fn rapid_double_submit_sends_a_single_request() {
    let client = StubWaitlistClient::gated(Reply::Created);
    let form = spawn_form(client.clone());

    let first = form.on_submit("person@example.com");
    let second = form.on_submit("person@example.com");

    assert!(first.is_some());
    assert!(second.is_none());

    client.release();
    form.settled().await;

    assert_eq!(client.calls().len(), 1);
}

#[tokio::test]
async fn created_and_already_exists_look_the_same() {
    let created = spawn_form(StubWaitlistClient::replying(Reply::Created));
    let duplicate = spawn_form(StubWaitlistClient::replying(Reply::AlreadyExists));

    created.on_submit("person@example.com");
    duplicate.on_submit("person@example.com");
    let created_state = created.settled().await;
    let duplicate_state = duplicate.settled().await;

    assert_eq!(created_state.submission, SubmissionState::Success);
    assert_eq!(duplicate_state.submission, SubmissionState::Success);
    assert_eq!(created.feedback(), duplicate.feedback());
}

#[tokio::test]
async fn network_failure_errors_and_editing_resets_to_idle() {
    let client = StubWaitlistClient::replying(Reply::Fail);
    let form = spawn_form(client.clone());

    form.on_submit("person@example.com");
    let settled = form.settled().await;

    assert_eq!(
        settled.submission,
        SubmissionState::Error(FailureReason::SubmissionFailed)
    );
    let notice = form.feedback().notice.unwrap();
    assert_eq!(notice.tone, Tone::Error);
    assert!(notice.dismissible);

    form.on_change("person@example.co");

    assert_eq!(form.submission(), SubmissionState::Idle);
}

#[tokio::test]
async fn failed_submission_can_be_retried_by_resubmitting() {
    let client = StubWaitlistClient::replying(Reply::Fail);
    let form = spawn_form(client.clone());

    form.on_submit("person@example.com");
    form.settled().await;
    form.on_submit("person@example.com");
    form.settled().await;

    assert_eq!(client.calls().len(), 2);
}

#[tokio::test]
async fn slow_registration_times_out_as_a_failure() {
    // Never released.
    let client = StubWaitlistClient::gated(Reply::Created);
    let form = spawn_form_with_timeout(client.clone(), Duration::from_millis(50));

    form.on_submit("person@example.com");
    let settled = form.settled().await;

    assert_eq!(
        settled.submission,
        SubmissionState::Error(FailureReason::SubmissionFailed)
    );
}

#[tokio::test]
async fn late_response_after_teardown_is_discarded() {
    let client = StubWaitlistClient::gated(Reply::Created);
    let form = spawn_form(client.clone());
    let mut observer = form.subscribe();

    form.on_submit("person@example.com");
    let_tasks_run().await;
    assert_eq!(client.calls().len(), 1);
    observer.borrow_and_update();

    form.teardown();

    // Unmounting resets the form once.
    assert!(form.is_torn_down());
    assert!(observer.has_changed().unwrap());
    assert_eq!(
        observer.borrow_and_update().submission,
        SubmissionState::Idle
    );

    client.release();
    let_tasks_run().await;

    assert_eq!(form.submission(), SubmissionState::Idle);
    assert!(!observer.has_changed().unwrap_or(false));

    // The unmounted form ignores further input.
    form.on_change("someone@else.com");
    assert_eq!(form.snapshot().email, "person@example.com");
}

#[tokio::test]
async fn waiting_for_a_pending_registration_ends_on_teardown() {
    let client = StubWaitlistClient::gated(Reply::Created);
    let form = Arc::new(spawn_form(client.clone()));

    form.on_submit("person@example.com");
    let waiter = {
        let form = Arc::clone(&form);
        tokio::spawn(async move { form.settled().await })
    };
    let_tasks_run().await;
    assert!(!waiter.is_finished());

    form.teardown();
    client.release();

    let settled = tokio::time::timeout(Duration::from_secs(2), waiter)
        .await
        .expect("settled() did not return after teardown")
        .unwrap();
    assert_eq!(settled.submission, SubmissionState::Idle);
}

#[tokio::test]
async fn settled_returns_immediately_on_a_torn_down_form() {
    let form = spawn_form(StubWaitlistClient::replying(Reply::Created));
    form.teardown();

    let settled = tokio::time::timeout(Duration::from_secs(2), form.settled())
        .await
        .expect("settled() hung on a torn down form");

    assert_eq!(settled.submission, SubmissionState::Idle);
}

#[tokio::test]
async fn every_state_change_is_published() {
    let client = StubWaitlistClient::gated(Reply::Created);
    let form = spawn_form(client.clone());
    let mut observer = form.subscribe();

    form.on_change("person@example.com");
    assert!(observer.has_changed().unwrap());
    assert_eq!(observer.borrow_and_update().email, "person@example.com");

    form.on_submit("person@example.com");
    assert_eq!(
        observer.borrow_and_update().submission,
        SubmissionState::Submitting
    );

    client.release();
    observer.changed().await.unwrap();
    assert_eq!(observer.borrow().submission, SubmissionState::Success);
}

#[tokio::test]
async fn dismissing_an_error_restores_the_call_to_action() {
    let form = spawn_form(StubWaitlistClient::replying(Reply::Created));

    form.on_submit("nope");
    assert!(form.feedback().notice.is_some());

    form.dismiss_error();

    assert_eq!(form.submission(), SubmissionState::Idle);
    assert_eq!(form.feedback().notice, None);
}
