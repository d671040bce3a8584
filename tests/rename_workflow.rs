//! Integration tests for the rename workflow.
//!
//! These tests verify the workflow against the recording MockConnection:
//! each capability is invoked exactly when the linear sequence reaches it,
//! and a failure at any step prevents every later step.

use renamify::connection::mock::{FailOn, MockConnection, MockOperation};
use renamify::connection::{Application, ConnectionError};
use renamify::plugin::Plugin;
use renamify::renamer::{rename_app, RenamerPlugin};

fn strings(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

fn myapp() -> Application {
    Application {
        guid: "abc-123".to_string(),
        name: "myapp".to_string(),
    }
}

fn patch_ops(ops: &[MockOperation]) -> Vec<&MockOperation> {
    ops.iter()
        .filter(|op| matches!(op, MockOperation::CliCommandWithoutOutput { .. }))
        .collect()
}

fn listing_ops(ops: &[MockOperation]) -> Vec<&MockOperation> {
    ops.iter()
        .filter(|op| matches!(op, MockOperation::CliCommand { .. }))
        .collect()
}

mod workflow {
    use super::*;

    #[tokio::test]
    async fn renames_app_with_potato_suffix() {
        let conn = MockConnection::with_apps(vec![myapp()]);

        rename_app(&conn, "myapp").await.unwrap();

        assert_eq!(
            conn.operations(),
            vec![
                MockOperation::GetApp {
                    name: "myapp".to_string()
                },
                MockOperation::CliCommandWithoutOutput {
                    args: strings(&[
                        "curl",
                        "/v3/apps/abc-123",
                        "-X",
                        "PATCH",
                        "-d",
                        r#"{"name": "myapp-potato"}"#,
                    ])
                },
                MockOperation::CliCommand {
                    args: strings(&["app", "myapp-potato"])
                },
            ]
        );
    }

    #[tokio::test]
    async fn patched_app_is_findable_under_new_name() {
        let conn = MockConnection::with_apps(vec![myapp()]);

        rename_app(&conn, "myapp").await.unwrap();

        assert_eq!(conn.stored_app("myapp-potato").unwrap().guid, "abc-123");
        assert!(conn.stored_app("myapp").is_none());
    }

    #[tokio::test]
    async fn lookup_failure_stops_before_patch_and_listing() {
        let conn = MockConnection::new();

        let err = rename_app(&conn, "ghost").await.unwrap_err();
        assert!(err.to_string().contains("App 'ghost' not found"));

        let ops = conn.operations();
        assert_eq!(
            ops,
            vec![MockOperation::GetApp {
                name: "ghost".to_string()
            }]
        );
        assert!(patch_ops(&ops).is_empty());
        assert!(listing_ops(&ops).is_empty());
    }

    #[tokio::test]
    async fn patch_failure_stops_before_listing() {
        let conn = MockConnection::with_apps(vec![myapp()]).fail_on(
            FailOn::CliCommandWithoutOutput(ConnectionError::ApiError {
                status: 422,
                message: "name must be unique".to_string(),
            }),
        );

        let err = rename_app(&conn, "myapp").await.unwrap_err();
        assert!(err.to_string().contains("name must be unique"));

        assert!(listing_ops(&conn.operations()).is_empty());
    }

    #[tokio::test]
    async fn listing_failure_is_fatal_but_patch_already_landed() {
        let conn = MockConnection::with_apps(vec![myapp()]).fail_on(FailOn::CliCommand(
            ConnectionError::CommandFailed {
                command: "app".to_string(),
                message: "exit status 1".to_string(),
            },
        ));

        assert!(rename_app(&conn, "myapp").await.is_err());

        // No rollback: the app keeps its new name.
        assert!(conn.stored_app("myapp-potato").is_some());
    }

    #[tokio::test]
    async fn listing_runs_exactly_once_with_new_name() {
        let conn = MockConnection::with_apps(vec![myapp()]);

        rename_app(&conn, "myapp").await.unwrap();

        let ops = conn.operations();
        let listings = listing_ops(&ops);
        assert_eq!(listings.len(), 1);
        assert_eq!(
            listings[0],
            &MockOperation::CliCommand {
                args: strings(&["app", "myapp-potato"])
            }
        );
    }

    #[tokio::test]
    async fn error_message_is_surfaced_verbatim() {
        let conn = MockConnection::new().fail_on(FailOn::GetApp(ConnectionError::NotFound(
            "Server error, error code: 100004".to_string(),
        )));

        let err = rename_app(&conn, "myapp").await.unwrap_err();
        assert_eq!(
            format!("{:#}", err),
            "not found: Server error, error code: 100004"
        );
    }
}

mod dispatch {
    use super::*;

    #[tokio::test]
    async fn recognized_command_runs_workflow() {
        let conn = MockConnection::with_apps(vec![myapp()]);

        RenamerPlugin
            .run(&conn, &strings(&["renamify", "myapp"]))
            .await
            .unwrap();

        assert_eq!(conn.operations().len(), 3);
    }

    #[tokio::test]
    async fn unrecognized_command_is_a_silent_noop() {
        let conn = MockConnection::with_apps(vec![myapp()]);

        RenamerPlugin
            .run(&conn, &strings(&["uninstall-plugin", "RenamerPlugin"]))
            .await
            .unwrap();

        assert!(conn.operations().is_empty());
    }

    #[tokio::test]
    async fn empty_arguments_are_a_silent_noop() {
        let conn = MockConnection::new();

        RenamerPlugin.run(&conn, &[]).await.unwrap();

        assert!(conn.operations().is_empty());
    }

    #[test]
    fn metadata_never_touches_the_connection() {
        let conn = MockConnection::new();

        let first = RenamerPlugin.metadata();
        let second = RenamerPlugin.metadata();

        assert_eq!(first, second);
        assert!(conn.operations().is_empty());
    }
}
