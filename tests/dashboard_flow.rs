//! End-to-end flow: sign up, restore the session from disk, work the task
//! dashboard through the modal, and log out again.

use std::time::Duration;

use tempfile::TempDir;

use taskdash::auth::SimulatedAuth;
use taskdash::dashboard::{Dashboard, SubmitOutcome};
use taskdash::filter::StatusFilter;
use taskdash::session::SessionManager;
use taskdash::storage::FileStore;
use taskdash::task::{TaskCollection, TaskStatus};

fn session_manager(dir: &TempDir) -> SessionManager {
    let store = FileStore::open(dir.path().join("session.json"));
    let auth = SimulatedAuth::new(Duration::ZERO).with_account("Ada", "ada@example.com", "hunter2");
    SessionManager::new(store, auth)
}

#[tokio::test]
async fn full_dashboard_session() {
    let dir = TempDir::new().expect("tempdir");

    // Fresh start: nothing persisted yet.
    let mut session = session_manager(&dir);
    session.initialize();
    assert!(!session.is_loading());
    assert!(!session.is_authenticated());

    let user = session
        .login("ada@example.com", "hunter2")
        .await
        .expect("login")
        .clone();
    assert!(session.is_authenticated());
    assert!(session.token().is_some());

    // Create two tasks through the modal.
    let mut dashboard = Dashboard::new(TaskCollection::new());

    dashboard.open_create();
    {
        let form = dashboard.form_mut().expect("form");
        form.title = "Design landing page".to_string();
        form.description = "Hero section first".to_string();
        form.status = TaskStatus::InProgress;
    }
    let outcome = dashboard.submit().await.expect("submit");
    assert!(matches!(outcome, SubmitOutcome::Created(_)));
    assert!(dashboard.form().is_none());

    dashboard.open_create();
    dashboard.form_mut().expect("form").title = "Write docs".to_string();
    dashboard.submit().await.expect("submit");

    // Newest first.
    let titles: Vec<String> = dashboard
        .visible_tasks()
        .iter()
        .map(|task| task.title.clone())
        .collect();
    assert_eq!(titles, ["Write docs", "Design landing page"]);

    // Search and status filters compose over the same collection.
    dashboard.set_search_query("design");
    assert_eq!(dashboard.visible_tasks().len(), 1);

    dashboard.set_search_query("");
    dashboard.set_status_filter(StatusFilter::Only(TaskStatus::InProgress));
    let in_progress: Vec<String> = dashboard
        .visible_tasks()
        .iter()
        .map(|task| task.title.clone())
        .collect();
    assert_eq!(in_progress, ["Design landing page"]);
    dashboard.set_status_filter(StatusFilter::All);

    // Edit the newest task through the modal.
    let docs_id = dashboard.visible_tasks()[0].id;
    dashboard.open_edit(docs_id).expect("open edit");
    dashboard.form_mut().expect("form").status = TaskStatus::Completed;
    let outcome = dashboard.submit().await.expect("submit");
    assert!(
        matches!(outcome, SubmitOutcome::Updated(ref task) if task.status == TaskStatus::Completed)
    );

    // Delete it and make sure only the other task remains.
    assert!(dashboard.delete(docs_id));
    let remaining: Vec<String> = dashboard
        .visible_tasks()
        .iter()
        .map(|task| task.title.clone())
        .collect();
    assert_eq!(remaining, ["Design landing page"]);

    // A fresh process restores the same session from disk.
    drop(session);
    let mut restored = session_manager(&dir);
    restored.initialize();
    assert_eq!(restored.user(), Some(&user));

    // Logout clears the persisted records for good.
    restored.logout();
    let mut after_logout = session_manager(&dir);
    after_logout.initialize();
    assert!(after_logout.user().is_none());
    assert!(after_logout.token().is_none());
}

#[tokio::test]
async fn signup_then_restore() {
    let dir = TempDir::new().expect("tempdir");

    let mut session = session_manager(&dir);
    session.initialize();
    let user = session
        .signup("Grace", "grace@example.com", "pw")
        .await
        .expect("signup")
        .clone();
    assert_eq!(user.name, "Grace");
    drop(session);

    let mut restored = session_manager(&dir);
    restored.initialize();
    assert_eq!(restored.user(), Some(&user));
}
