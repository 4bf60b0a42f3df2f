use mvp_core::prelude::*;
use mvp_test_utils::{reopen_file_wizard, setup_file_wizard, setup_memory_wizard};
use proptest::prelude::*;

#[test]
fn test_capture_scenario() {
    let wizard = setup_memory_wizard();

    wizard.capture("A pet-sharing app").unwrap();
    assert_eq!(wizard.session().idea().as_deref(), Some("A pet-sharing app"));

    assert!(matches!(wizard.capture(""), Err(WizardError::EmptyIdea)));
    assert_eq!(wizard.session().idea().as_deref(), Some("A pet-sharing app"));
}

#[test]
fn test_session_survives_restart() {
    let (wizard, dir) = setup_file_wizard();
    wizard.capture_with_assist("A social platform for book lovers", true).unwrap();
    wizard.login("reader@example.com").unwrap();
    wizard
        .session()
        .set_last_artifact(&ArtifactId::from("1700000000000"))
        .unwrap();

    let reopened = reopen_file_wizard(&dir);
    let session = reopened.session();
    assert_eq!(session.idea().as_deref(), Some("A social platform for book lovers"));
    assert!(session.ai_assist());
    assert!(session.is_authenticated());
    assert_eq!(session.current_user().as_deref(), Some("reader@example.com"));
    assert_eq!(session.last_artifact(), Some(ArtifactId::from("1700000000000")));
}

#[test]
fn test_corrupt_state_file_degrades_to_fresh_session() {
    let (wizard, dir) = setup_file_wizard();
    wizard.capture("idea").unwrap();
    let path = wizard.context().config.state_path();
    std::fs::write(&path, "{{{{").unwrap();

    let reopened = reopen_file_wizard(&dir);
    assert_eq!(reopened.session().idea(), None);
    assert_eq!(reopened.resume_stage(), Stage::Capture);
    assert!(reopened.records().list().is_empty());
}

#[test]
fn test_undecodable_state_file_recovers_on_next_write() {
    let (wizard, dir) = setup_file_wizard();
    wizard.capture("idea").unwrap();
    let path = wizard.context().config.state_path();
    std::fs::write(&path, [0xFF, 0xFE, 0x00, 0x7B]).unwrap();

    let reopened = reopen_file_wizard(&dir);
    assert!(reopened.records().list().is_empty());
    assert_eq!(reopened.capture("new idea").unwrap(), Stage::Review);
    reopened.records().create("t", "d").unwrap();
    reopened.login("ada@example.com").unwrap();

    assert_eq!(reopened.session().idea().as_deref(), Some("new idea"));
    assert!(reopened.dashboard().is_ok());
}

proptest! {
    #[test]
    fn prop_non_blank_ideas_are_stored_verbatim(text in "\\PC*") {
        let wizard = setup_memory_wizard();
        wizard.capture("previous").unwrap();

        let result = wizard.capture(&text);
        if text.trim().is_empty() {
            prop_assert!(matches!(result, Err(WizardError::EmptyIdea)));
            let idea = wizard.session().idea();
            prop_assert_eq!(idea.as_deref(), Some("previous"));
        } else {
            prop_assert_eq!(result.unwrap(), Stage::Review);
            prop_assert_eq!(wizard.session().idea(), Some(text.clone()));
        }
    }

    #[test]
    fn prop_whitespace_is_always_rejected(text in "[ \\t\\n\\r]{0,12}") {
        let wizard = setup_memory_wizard();
        prop_assert!(wizard.capture(&text).is_err());
        prop_assert_eq!(wizard.session().idea(), None);
    }
}
