use crate::helpers::spawn_app;
use tokio::runtime::Handle;
use waitlist_api::domain::WaitlistRepository;
use waitlist_intake::configuration::WaitlistClientSettings;
use waitlist_intake::form::SubmissionState;
use waitlist_intake::WaitlistForm;

fn form_for(address: &str) -> WaitlistForm {
    let settings = WaitlistClientSettings {
        base_url: address.to_string(),
        api_token: None,
        timeout_milliseconds: 10_000,
    };
    WaitlistForm::from_settings(&settings, Handle::current()).expect("Failed to build form")
}

#[tokio::test]
async fn a_form_submission_lands_on_the_waitlist() {
    // Arrange
    let app = spawn_app().await;
    let form = form_for(&app.address);

    // Act
    form.on_change("  Person@Example.com ");
    form.on_submit("  Person@Example.com ");
    let settled = form.settled().await;

    // Assert
    assert_eq!(settled.submission, SubmissionState::Success);
    assert_eq!(app.repository.count().await.unwrap(), 1);
}

#[tokio::test]
async fn a_second_form_with_the_same_email_also_succeeds() {
    // Arrange
    let app = spawn_app().await;
    let first = form_for(&app.address);
    let second = form_for(&app.address);

    // Act
    first.on_submit("person@example.com");
    let first_state = first.settled().await;
    second.on_submit("Person@Example.com");
    let second_state = second.settled().await;

    // Assert
    assert_eq!(first_state.submission, SubmissionState::Success);
    assert_eq!(second_state.submission, SubmissionState::Success);
    assert_eq!(first.feedback(), second.feedback());
    assert_eq!(app.repository.count().await.unwrap(), 1);
}
