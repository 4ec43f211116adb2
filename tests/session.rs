use animelist::modules::edit::{DismissSignal, FormKind};
use animelist::modules::manager::{EditOutcome, ListManager};
use animelist::modules::render::render;
use animelist::modules::serialize::{Event, Script};
use animelist::modules::types::{EntryId, Submission};
use animelist::modules::validation::Field;
use std::fs;
use tempfile::tempdir;

#[tokio::test]
async fn naruto_shows_up_in_both_lists() {
    let mut manager: ListManager = ListManager::default();
    manager
        .submit_add(&Submission::new("Naruto", "Action", "1", "8", true))
        .await
        .unwrap();

    let view = manager.view();
    assert_eq!(view.all.len(), 1);
    assert_eq!(view.recommended.len(), 1);
    assert_eq!(view.all[0], view.recommended[0]);

    let card = &view.all[0];
    assert_eq!(card.title, "Naruto");
    assert_eq!(card.stars, 4);
    assert_eq!(card.rating_label, "(8/10)");
    assert!(card.recommended);
    assert_eq!(card.edit.id, EntryId(1));
}

#[tokio::test]
async fn attached_image_is_inlined() {
    let tmp = tempdir().unwrap();
    let cover = tmp.path().join("cover.png");
    fs::write(&cover, [0x89, b'P', b'N', b'G']).unwrap();

    let mut manager: ListManager = ListManager::default();
    let id = manager
        .submit_add(&Submission::new("Mushishi", "Mystery", "1", "9", false).with_image(&cover))
        .await
        .unwrap();

    let image = manager.get(id).unwrap().image().unwrap();
    assert_eq!(image.mime(), "image/png");
    assert!(image.data_url().starts_with("data:image/png;base64,"));
    assert!(manager.view().all[0].image.is_some());
    assert!(manager.view().recommended.is_empty());

    // The edit form has no cover, so the saved entry drops it.
    manager.open_edit(id);
    manager
        .submit_edit(&Submission::new("Mushishi Zoku Shou", "Mystery", "2", "9.5", true))
        .unwrap();
    let edited = manager.get(id).unwrap();
    assert_eq!(edited.id(), id);
    assert_eq!(edited.fields().title(), "Mushishi Zoku Shou");
    assert!(edited.image().is_none());
    assert!(manager.view().all[0].image.is_none());
    assert_eq!(manager.view().recommended.len(), 1);
}

#[tokio::test]
async fn scripted_session_replays() {
    let script: Script = toml::from_str(r#"
        [[event]]
        type = "add"
        title = "Naruto"
        genre = "Action"
        season = "1"
        rating = "8"
        recommended = true

        [[event]]
        type = "add"
        title = ""
        genre = "Comedy"
        season = "1"
        rating = "5"

        [[event]]
        type = "add"
        title = "Gintama"
        genre = "Comedy"
        season = "4"
        rating = "10"

        [[event]]
        type = "open_edit"
        id = 2

        [[event]]
        type = "close"
        signal = "escape"

        [[event]]
        type = "open_edit"
        id = 1
    "#).unwrap();

    let mut manager: ListManager = ListManager::default();
    for event in &script.events {
        match event {
            Event::Add(submission) => {
                let _ = manager.submit_add(submission).await;
            }
            Event::OpenEdit { id } => {
                manager.open_edit(*id);
            }
            Event::Close { signal } => {
                manager.close_edit(*signal);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    // The rejected submission consumed no id.
    let ids: Vec<EntryId> = manager.entries().iter().map(|e| e.id()).collect();
    assert_eq!(ids, vec![EntryId(1), EntryId(2)]);
    assert!(manager.add_errors().is_empty());
    assert_eq!(manager.session().editing(), Some(EntryId(1)));

    let outcome = manager
        .submit_edit(&Submission::new("Naruto", "Action, Adventure", "1", "7", false))
        .unwrap();
    assert_eq!(outcome, EditOutcome::Updated(EntryId(1)));
    assert!(manager.view().recommended.is_empty());
    assert_eq!(manager.view().all[0].stars, 4);
    assert_eq!(manager.view(), &render(manager.entries()));
}

#[test]
fn edit_surface_errors_follow_blur_and_input() {
    let mut manager: ListManager = ListManager::default();
    assert!(!manager.close_edit(DismissSignal::Overlay));
    assert!(!manager.field_blur(FormKind::Add, Field::Genre, "  "));
    assert!(manager.add_errors().is_invalid(Field::Genre));
    manager.field_input(FormKind::Add, Field::Genre);
    assert!(!manager.add_errors().is_invalid(Field::Genre));
}
