mod helpers;

use helpers::*;

#[tokio::test]
async fn test_fetches_exactly_the_requested_ids() {
    let db = setup_test_db().await;
    seed_user(&db, "1", "a@x.com", None, None, None).await;
    seed_user(&db, "2", "b@x.com", None, None, None).await;
    seed_user(&db, "3", "c@x.com", None, None, None).await;

    let rows = db
        .get_users_by_ids(&["1".to_string(), "3".to_string()])
        .await
        .unwrap();

    let mut emails: Vec<String> = rows.iter().map(|r| r.email.clone()).collect();
    emails.sort();
    assert_eq!(emails, vec!["a@x.com".to_string(), "c@x.com".to_string()]);

    teardown_test_db(db).await;
}

#[tokio::test]
async fn test_unknown_ids_are_simply_absent() {
    let db = setup_test_db().await;
    seed_user(&db, "1", "a@x.com", None, None, None).await;

    let rows = db
        .get_users_by_ids(&["1".to_string(), "ghost".to_string()])
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);

    let rows = db.get_users_by_ids(&[]).await.unwrap();
    assert!(rows.is_empty());

    teardown_test_db(db).await;
}

#[tokio::test]
async fn test_null_subscription_flag_reads_as_subscribed() {
    let db = setup_test_db().await;
    seed_user(&db, "1", "null@x.com", None, None, None).await;
    seed_user(&db, "2", "yes@x.com", Some(true), None, None).await;
    seed_user(&db, "3", "no@x.com", Some(false), None, None).await;

    let rows = db
        .get_users_by_ids(&["1".to_string(), "2".to_string(), "3".to_string()])
        .await
        .unwrap();

    for row in &rows {
        match row.email.as_str() {
            "null@x.com" => {
                assert_eq!(row.email_subscription_enabled, None);
                assert!(row.is_subscribed());
            }
            "yes@x.com" => {
                assert_eq!(row.email_subscription_enabled, Some(true));
                assert!(row.is_subscribed());
            }
            "no@x.com" => {
                assert_eq!(row.email_subscription_enabled, Some(false));
                assert!(!row.is_subscribed());
            }
            other => panic!("unexpected row: {}", other),
        }
    }

    teardown_test_db(db).await;
}

#[tokio::test]
async fn test_name_columns_round_trip_as_options() {
    let db = setup_test_db().await;
    seed_user(&db, "1", "a@x.com", None, Some("Ann"), None).await;
    seed_user(&db, "2", "b@x.com", None, None, Some("Lee")).await;

    let rows = db
        .get_users_by_ids(&["1".to_string(), "2".to_string()])
        .await
        .unwrap();

    let ann = rows.iter().find(|r| r.email == "a@x.com").unwrap();
    assert_eq!(ann.first_name.as_deref(), Some("Ann"));
    assert_eq!(ann.last_name, None);

    let lee = rows.iter().find(|r| r.email == "b@x.com").unwrap();
    assert_eq!(lee.first_name, None);
    assert_eq!(lee.last_name.as_deref(), Some("Lee"));

    teardown_test_db(db).await;
}
